//! Service layer for envvars
//!
//! Validates input and applies business rules between HTTP/CLI handlers and
//! storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod app_service;
mod env_var_service;
mod error;

pub use app_service::AppService;
pub use env_var_service::{EnvVarService, Upserted};
pub use error::ServiceError;
