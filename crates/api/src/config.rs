//! Process configuration read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `MEDCAT_BIND_ADDR` | `0.0.0.0:8080` |
//! | `MEDCAT_CATALOG_PATH` | unset (serve the embedded catalog) |
//! | `MEDCAT_LOG_FORMAT` | `json` |
//!
//! Log filtering itself is controlled by `RUST_LOG`.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use medcat_observability::{LogFormat, ParseLogFormatError};

pub const BIND_ADDR_VAR: &str = "MEDCAT_BIND_ADDR";
pub const CATALOG_PATH_VAR: &str = "MEDCAT_CATALOG_PATH";
pub const LOG_FORMAT_VAR: &str = "MEDCAT_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MEDCAT_BIND_ADDR={value} is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("MEDCAT_LOG_FORMAT: {0}")]
    InvalidLogFormat(#[from] ParseLogFormatError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// External catalog document; the embedded catalog is served when unset.
    pub catalog_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_value = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            catalog_path: get(CATALOG_PATH_VAR).map(PathBuf::from),
            log_format,
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_every_variable() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
            (CATALOG_PATH_VAR, "/srv/catalog.json"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = ApiConfig::from_lookup(lookup(&[
            (CATALOG_PATH_VAR, "  "),
            (LOG_FORMAT_VAR, ""),
        ]))
        .unwrap();
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = ApiConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));

        let err = ApiConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogFormat(_)));
    }
}
