//! PostgreSQL-protocol backend (PostgreSQL, ProtonBase, Redshift).
//!
//! # Module Structure
//! - `reflection`: Catalog queries for `pg_catalog` and Redshift SVV views
//! - `type_mapping`: Catalog type names to generic type tokens
//!
//! # Security Guarantees
//! - One unpooled connection per inspector, closed on drop
//! - Only catalog queries are issued
//! - Connection details are redacted in errors and logs

mod reflection;
mod type_mapping;

pub use type_mapping::map_postgres_type;

use super::helpers::with_connect_timeout;
use super::Inspector;
use crate::config::ToolkitConfig;
use crate::dialect::Driver;
use crate::error::ConnectorError;
use crate::models::ReflectedTable;
use crate::{ConnectionUrl, Result};
use async_trait::async_trait;
use reflection::CatalogFlavor;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgConnection};

/// Inspector over a single PostgreSQL-protocol connection
pub(crate) struct PgInspector {
    conn: PgConnection,
    flavor: CatalogFlavor,
}

impl std::fmt::Debug for PgInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgInspector")
            .field("flavor", &self.flavor)
            .finish_non_exhaustive()
    }
}

/// Opens a PostgreSQL-protocol connection for `url`.
///
/// # Errors
/// Returns a connection error if the connect fails or times out
pub(crate) async fn connect(
    url: &ConnectionUrl,
    config: &ToolkitConfig,
) -> Result<Box<dyn Inspector>> {
    let options = connect_options(url, config);

    let conn = with_connect_timeout(url, config.connect_timeout, async {
        options
            .connect()
            .await
            .map_err(|e| ConnectorError::connection_failed(format!("connect to {}", url), e))
    })
    .await?;

    let flavor = catalog_flavor(url.driver());
    tracing::debug!(url = %url, ?flavor, "PostgreSQL-protocol connection established");

    Ok(Box::new(PgInspector { conn, flavor }))
}

fn connect_options(url: &ConnectionUrl, config: &ToolkitConfig) -> PgConnectOptions {
    let mut options = PgConnectOptions::new()
        .host(url.host())
        .port(url.effective_port())
        .username(url.username())
        .application_name(&config.application_name);

    if let Some(password) = url.password() {
        options = options.password(password);
    }
    if let Some(database) = url.database() {
        options = options.database(database);
    }

    options
}

fn catalog_flavor(driver: Driver) -> CatalogFlavor {
    match driver {
        Driver::Redshift => CatalogFlavor::Redshift,
        _ => CatalogFlavor::Postgres,
    }
}

#[async_trait]
impl Inspector for PgInspector {
    async fn schema_names(&mut self) -> Result<Vec<String>> {
        reflection::schema_names(&mut self.conn).await
    }

    async fn reflect_schema(&mut self, schema: &str) -> Result<Vec<ReflectedTable>> {
        reflection::reflect_schema(&mut self.conn, self.flavor, schema).await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| ConnectorError::connection_failed("close PostgreSQL connection", e))
    }
}
