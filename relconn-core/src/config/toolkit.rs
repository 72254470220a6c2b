//! Settings applied when the reflection toolkit opens a connection.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for [`SqlxToolkit`](crate::adapters::SqlxToolkit).
///
/// # Example
/// ```rust
/// use relconn_core::ToolkitConfig;
/// use std::time::Duration;
///
/// let config = ToolkitConfig::default().with_connect_timeout(Duration::from_secs(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Upper bound for connect plus authentication
    pub connect_timeout: Duration,
    /// Application name reported to servers that accept one
    pub application_name: String,
    /// Use HTTPS for the ClickHouse HTTP interface
    pub clickhouse_tls: bool,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            application_name: format!("relconn-{}", env!("CARGO_PKG_VERSION")),
            clickhouse_tls: false,
        }
    }
}

impl ToolkitConfig {
    /// Validates timeout bounds.
    ///
    /// # Errors
    /// Returns error if the connect timeout is zero or above five minutes
    pub fn validate(&self) -> crate::Result<()> {
        if self.connect_timeout.is_zero() {
            return Err(crate::error::ConnectorError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }

        if self.connect_timeout > Duration::from_secs(300) {
            return Err(crate::error::ConnectorError::configuration(
                "connect_timeout should not exceed 300 seconds",
            ));
        }

        Ok(())
    }

    /// Builder method to set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builder method to set the application name.
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }

    /// Builder method to enable HTTPS for ClickHouse.
    pub fn with_clickhouse_tls(mut self, enabled: bool) -> Self {
        self.clickhouse_tls = enabled;
        self
    }
}
