//! Configuration types for the connector.
//!
//! - `ConnectionDescriptor`: what to connect to, supplied per call
//! - `IamConfig`: IAM targets for the Redshift dialects
//! - `ToolkitConfig`: settings used when a connection is opened
//! - `ConnectorConfig`: the two above, held by the connector

mod connection;
mod iam;
mod toolkit;

pub use connection::ConnectionDescriptor;
pub use iam::{CLUSTER_IDENTIFIER_ENV, IamConfig, REGION_ENV, SERVERLESS_WORKGROUP_ENV};
pub use toolkit::ToolkitConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding the connect timeout, in seconds
pub const CONNECT_TIMEOUT_ENV: &str = "RELCONN_CONNECT_TIMEOUT_SECS";

/// Process-level connector configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// IAM targets
    pub iam: IamConfig,
    /// Connection settings
    pub toolkit: ToolkitConfig,
}

impl ConnectorConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns a configuration error when a variable is set but invalid
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    /// Returns a configuration error when a variable is set but invalid
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut toolkit = ToolkitConfig::default();
        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                crate::error::ConnectorError::configuration(format!(
                    "{} must be a whole number of seconds: {}",
                    CONNECT_TIMEOUT_ENV, e
                ))
            })?;
            toolkit.connect_timeout = Duration::from_secs(secs);
        }

        let config = Self {
            iam: IamConfig::from_lookup(&lookup),
            toolkit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns error if any section is invalid
    pub fn validate(&self) -> crate::Result<()> {
        self.toolkit.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_defaults() {
        let config = ConnectorConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ConnectorConfig::default());
    }

    #[test]
    fn test_from_lookup_connect_timeout() {
        let config = ConnectorConfig::from_lookup(|key| {
            (key == CONNECT_TIMEOUT_ENV).then(|| "12".to_string())
        })
        .unwrap();
        assert_eq!(config.toolkit.connect_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let result = ConnectorConfig::from_lookup(|key| {
            (key == CONNECT_TIMEOUT_ENV).then(|| "soon".to_string())
        });
        assert!(result.is_err());

        let result = ConnectorConfig::from_lookup(|key| {
            (key == CONNECT_TIMEOUT_ENV).then(|| "0".to_string())
        });
        assert!(result.is_err());
    }
}
