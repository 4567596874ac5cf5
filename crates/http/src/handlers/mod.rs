pub mod apps;
pub mod env_vars;
