//! Test utilities and module declarations for storage tests.
//!
//! Run against the in-memory backend through `StorageBackend`, so the
//! dispatch layer is exercised alongside the store semantics.

use envvars_core::App;

use crate::StorageBackend;
use crate::traits::AppStore;


pub fn create_test_storage() -> StorageBackend {
    StorageBackend::new_memory()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn create_test_app(storage: &StorageBackend, name: &str) -> App {
    storage.create_app(name).await.unwrap()
}
