//! Common utilities module

/// Environment variable loading utilities
pub mod env_loader;

/// Identifier input coercion
pub mod ids;

pub use env_loader::{load_env_optional, load_env_validated, EnvLoader};
pub use ids::IdInput;
