//! Configuration Module
//!
//! Handles loading and managing cache and server configuration from
//! environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Default cache capacity
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default HTTP server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Cache and server configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Cache capacity (default: 1000). Must be a positive
    ///   integer; zero, negative or unparsable values are rejected.
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Result<Self> {
        let max_entries = match env::var("MAX_ENTRIES") {
            Ok(raw) => parse_capacity(&raw)?,
            Err(_) => DEFAULT_MAX_ENTRIES,
        };

        Ok(Self {
            max_entries,
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

/// Parses a capacity setting, rejecting anything that is not a positive
/// integer.
pub fn parse_capacity(raw: &str) -> Result<usize> {
    let value: i128 = raw.trim().parse().map_err(|_| {
        CacheError::InvalidConfiguration(format!("capacity '{}' is not an integer", raw))
    })?;

    if value <= 0 {
        return Err(CacheError::InvalidConfiguration(format!(
            "capacity must be a positive integer, got {}",
            value
        )));
    }

    usize::try_from(value).map_err(|_| {
        CacheError::InvalidConfiguration(format!("capacity {} does not fit in memory", value))
    })
}
