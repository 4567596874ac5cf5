//! Storage layer for envvars
//!
//! PostgreSQL-backed storage (sqlx) with a composite unique index on
//! `(owner_id, key)` and cascade deletion from `apps`. An in-memory backend
//! with the same semantics serves tests and ephemeral runs.

pub mod backend;
pub mod error;
pub mod memory;
mod pg_migrations;
pub mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::{PgPoolConfig, PgStorage};
pub use traits::{AppStore, EnvVarStore};
