//! Reflection toolkit traits and the sqlx/clickhouse implementation.
//!
//! This module defines the seam between the connector and the database
//! drivers. The connector only sees [`SqlToolkit`] and [`Inspector`]; the
//! production [`SqlxToolkit`] picks a backend from the driver's wire protocol.
//!
//! # Module Structure
//! - `helpers`: Shared helper utilities
//! - Backend modules (postgres, mysql, clickhouse), each feature-gated
//!
//! # Security Guarantees
//! - Backends issue catalog queries only
//! - Connection strings are redacted in logs and error messages
//! - Every connect is bounded by the configured timeout

pub(crate) mod helpers;

#[cfg(feature = "clickhouse")]
mod clickhouse;
#[cfg(feature = "mysql")]
mod mysql;
#[cfg(feature = "postgresql")]
mod postgres;

#[cfg(feature = "mysql")]
pub use mysql::map_mysql_type;
#[cfg(feature = "postgresql")]
pub use postgres::map_postgres_type;

#[cfg(feature = "clickhouse")]
pub use self::clickhouse::map_clickhouse_type;

use crate::config::ToolkitConfig;
use crate::dialect::Protocol;
use crate::models::ReflectedTable;
use crate::{ConnectionUrl, Result};
use async_trait::async_trait;

/// Opens connections for the connector.
///
/// # Object Safety
/// This trait is object-safe, allowing the connector to hold an
/// `Arc<dyn SqlToolkit>` and tests to substitute a fake.
#[async_trait]
pub trait SqlToolkit: Send + Sync {
    /// Opens one connection to `url`.
    ///
    /// Handshake and authentication are complete when this returns.
    ///
    /// # Errors
    /// Returns error if the server cannot be reached, rejects the
    /// credentials, or the backend is not compiled in
    async fn connect(&self, url: &ConnectionUrl) -> Result<Box<dyn Inspector>>;
}

/// Catalog access over one open connection.
///
/// Dropping an inspector releases its connection. [`Inspector::close`] does
/// the same but waits for a clean shutdown.
#[async_trait]
pub trait Inspector: Send {
    /// Names of all schemas (databases, for the MySQL and ClickHouse
    /// families) visible to the session.
    ///
    /// # Errors
    /// Returns error if the catalog query fails
    async fn schema_names(&mut self) -> Result<Vec<String>>;

    /// Tables and views of `schema`, with their columns in ordinal order.
    ///
    /// # Errors
    /// Returns error if a catalog query fails
    async fn reflect_schema(&mut self, schema: &str) -> Result<Vec<ReflectedTable>>;

    /// Closes the connection.
    ///
    /// # Errors
    /// Returns error if the server did not acknowledge the shutdown
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Production toolkit backed by `sqlx` and `clickhouse`.
#[derive(Debug, Clone, Default)]
pub struct SqlxToolkit {
    config: ToolkitConfig,
}

impl SqlxToolkit {
    /// Creates a toolkit that connects with `config`.
    pub fn new(config: ToolkitConfig) -> Self {
        Self { config }
    }

    /// Settings used for every connection
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }
}

#[async_trait]
impl SqlToolkit for SqlxToolkit {
    async fn connect(&self, url: &ConnectionUrl) -> Result<Box<dyn Inspector>> {
        tracing::debug!(
            url = %url,
            timeout_secs = self.config.connect_timeout.as_secs(),
            "Opening connection"
        );

        match url.driver().protocol() {
            #[cfg(feature = "postgresql")]
            Protocol::Postgres => postgres::connect(url, &self.config).await,
            #[cfg(not(feature = "postgresql"))]
            Protocol::Postgres => Err(crate::error::ConnectorError::unsupported_feature(
                "PostgreSQL protocol (compile with --features postgresql)",
                url.drivername(),
            )),
            #[cfg(feature = "mysql")]
            Protocol::MySql => mysql::connect(url, &self.config).await,
            #[cfg(not(feature = "mysql"))]
            Protocol::MySql => Err(crate::error::ConnectorError::unsupported_feature(
                "MySQL protocol (compile with --features mysql)",
                url.drivername(),
            )),
            #[cfg(feature = "clickhouse")]
            Protocol::ClickHouseHttp => self::clickhouse::connect(url, &self.config).await,
            #[cfg(not(feature = "clickhouse"))]
            Protocol::ClickHouseHttp => Err(crate::error::ConnectorError::unsupported_feature(
                "ClickHouse HTTP interface (compile with --features clickhouse)",
                url.drivername(),
            )),
        }
    }
}
