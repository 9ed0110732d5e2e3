//! Environment variable loading utilities
//!
//! Prefix-scoped lookups with type conversion and fallback defaults, used by
//! [`crate::config::MondayConfig`].

use std::env;
use std::str::FromStr;

/// Load an environment variable as an Option<T>, treating blank values as absent
pub fn load_env_optional<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| v.trim().parse().ok())
}

/// Load an environment variable with validation, falling back to `default`
pub fn load_env_validated<T, F>(key: &str, default: T, validator: F) -> T
where
    T: FromStr,
    F: Fn(&T) -> bool,
{
    match load_env_optional(key) {
        Some(value) if validator(&value) => value,
        Some(_) => {
            tracing::warn!("Ignoring out-of-range value for {}", key);
            default
        }
        None => default,
    }
}

/// Builder for loading multiple environment variables with consistent prefix
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Full variable name for a suffix, e.g. `MONDAY_API_TOKEN`
    pub fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Load a string value with default
    pub fn load_string(&self, suffix: &str, default: &str) -> String {
        self.load_optional(suffix)
            .unwrap_or_else(|| default.to_string())
    }

    /// Load an optional value
    pub fn load_optional<T>(&self, suffix: &str) -> Option<T>
    where
        T: FromStr,
    {
        load_env_optional(&self.key(suffix))
    }

    /// Load a validated value
    pub fn load_validated<T, F>(&self, suffix: &str, default: T, validator: F) -> T
    where
        T: FromStr,
        F: Fn(&T) -> bool,
    {
        load_env_validated(&self.key(suffix), default, validator)
    }
}
