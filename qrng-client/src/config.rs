//! Configuration management for the QRNG client

use crate::fetcher::{FetcherConfig, ANU_API_URL};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Endpoint of the JSON API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Largest `length` or block size accepted in one request
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Request timeout in seconds (0 = no timeout)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_length: default_max_length(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `QRNG_*` environment variables
    pub fn from_env() -> Result<Self> {
        let config: Self = envy::prefixed("QRNG_")
            .from_env()
            .map_err(|e| Error::Config(format!("Failed to parse environment variables: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.parsed_url()?;

        if self.max_length == 0 {
            return Err(Error::Config("max_length must be > 0".to_string()));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs > 0 {
            Some(Duration::from_secs(self.timeout_secs))
        } else {
            None
        }
    }

    /// Settings for the HTTP fetcher
    pub fn fetcher_config(&self) -> Result<FetcherConfig> {
        let mut config = FetcherConfig::new(self.parsed_url()?);
        config.timeout = self.timeout();
        Ok(config)
    }

    fn parsed_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base_url '{}': {}", self.base_url, e)))
    }
}

fn default_base_url() -> String {
    ANU_API_URL.to_string()
}

fn default_max_length() -> usize {
    crate::MAX_LENGTH
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_length, 1024);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_max_length() {
        let config = ClientConfig {
            max_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = ClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), None);
        assert_eq!(config.fetcher_config().unwrap().timeout, None);
    }

    #[test]
    fn test_from_iter_like_environment() {
        let vars = vec![
            ("QRNG_BASE_URL".to_string(), "http://localhost:8080/api".to_string()),
            ("QRNG_MAX_LENGTH".to_string(), "256".to_string()),
        ];
        let config: ClientConfig = envy::prefixed("QRNG_").from_iter(vars).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.max_length, 256);
        assert_eq!(config.timeout_secs, 30);
    }
}
