//! Core types for envvars
//!
//! Domain types shared across all other crates: the owning `App`, the
//! owner-scoped `EnvironmentVariable`, and the field limits both obey.

mod app;
pub mod constants;
mod dotenv;
mod env_config;
mod env_var;
mod error;

pub use app::*;
pub use constants::*;
pub use dotenv::render_dotenv;
pub use env_config::env_parse_with_default;
pub use env_var::*;
pub use error::*;
