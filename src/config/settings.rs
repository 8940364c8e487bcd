//! Process configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `APP_HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: listen port (default `3001`)
//! - `STORE_BACKEND`: `redis` (default) or `memory`
//! - `REDIS_URL`: connection string, required for the redis backend
//! - `REDIS_POOL_SIZE`: max pooled redis connections (default `8`)

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::constants;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidValue {
                name: "STORE_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub backend: StoreBackend,
    pub redis_url: Option<String>,
    pub redis_pool_size: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| constants::DEFAULT_HOST.to_string());
        let port = parse_or("PORT", lookup("PORT"), constants::DEFAULT_PORT)?;
        let backend = lookup("STORE_BACKEND")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(StoreBackend::Redis);
        let redis_url = lookup("REDIS_URL").filter(|url| !url.trim().is_empty());
        let redis_pool_size = parse_or(
            "REDIS_POOL_SIZE",
            lookup("REDIS_POOL_SIZE"),
            constants::DEFAULT_REDIS_POOL_SIZE,
        )?;

        if backend == StoreBackend::Redis && redis_url.is_none() {
            return Err(ConfigError::Missing("REDIS_URL"));
        }
        if redis_pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "REDIS_POOL_SIZE",
                value: "0".to_string(),
            });
        }

        Ok(Settings {
            host,
            port,
            backend,
            redis_url,
            redis_pool_size,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_with_redis_url() {
        let s = settings(&[("REDIS_URL", "redis://127.0.0.1:6379")]).unwrap();
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 3001);
        assert_eq!(s.backend, StoreBackend::Redis);
        assert_eq!(s.redis_pool_size, 8);
    }

    #[test]
    fn memory_backend_needs_no_redis() {
        let s = settings(&[("STORE_BACKEND", "Memory"), ("PORT", "8080")]).unwrap();
        assert_eq!(s.backend, StoreBackend::Memory);
        assert_eq!(s.port, 8080);
        assert_eq!(s.redis_url, None);
    }

    #[test]
    fn redis_backend_requires_url() {
        assert_eq!(settings(&[]), Err(ConfigError::Missing("REDIS_URL")));
        assert_eq!(
            settings(&[("REDIS_URL", "  ")]),
            Err(ConfigError::Missing("REDIS_URL"))
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            settings(&[("STORE_BACKEND", "mongo")]),
            Err(ConfigError::InvalidValue { name: "STORE_BACKEND", .. })
        ));
        assert!(matches!(
            settings(&[("STORE_BACKEND", "memory"), ("PORT", "http")]),
            Err(ConfigError::InvalidValue { name: "PORT", .. })
        ));
        assert!(matches!(
            settings(&[("STORE_BACKEND", "memory"), ("REDIS_POOL_SIZE", "0")]),
            Err(ConfigError::InvalidValue { name: "REDIS_POOL_SIZE", .. })
        ));
    }
}
