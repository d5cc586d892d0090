//! # Unidad Config
//!
//! Configuration types for the Unidad Educativa API, loaded from environment
//! variables (a `.env` file is read by the binaries through `dotenvy`):
//!
//! - [`server`]: bind address
//! - [`database`]: connection pool and migrations
//! - [`cors`]: allowed origins
//!
//! Every `from_env` constructor has a `from_lookup` twin that reads from an
//! arbitrary key/value source, which is what the tests use.

pub mod cors;
pub mod database;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when the variable is unset or empty.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}
