//! Configuration management for Docshelf Server

use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Folder scanned when `DOCUMENTS_DIR` is not set
pub const DEFAULT_DOCUMENTS_DIR: &str = "reviews";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    pub documents_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid SERVER_PORT '{0}'")]
    InvalidPort(String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            library: LibraryConfig {
                documents_dir: PathBuf::from(DEFAULT_DOCUMENTS_DIR),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.server.port,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port,
            },
            library: LibraryConfig {
                documents_dir: lookup("DOCUMENTS_DIR")
                    .filter(|dir| !dir.trim().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or(defaults.library.documents_dir),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.library.documents_dir, PathBuf::from("reviews"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8080"),
            ("DOCUMENTS_DIR", "/srv/docs"),
        ]))
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.library.documents_dir, PathBuf::from("/srv/docs"));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("SERVER_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "http"));
    }

    #[test]
    fn test_blank_documents_dir_uses_default() {
        let config = Config::from_lookup(lookup(&[("DOCUMENTS_DIR", "  ")])).unwrap();
        assert_eq!(config.library.documents_dir, PathBuf::from("reviews"));
    }
}
