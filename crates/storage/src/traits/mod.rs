//! Storage backend trait abstraction
//!
//! Async domain traits implemented by every backend and by the
//! enum-dispatching [`crate::StorageBackend`].

pub mod app;
pub mod env_var;

pub use app::AppStore;
pub use env_var::EnvVarStore;
