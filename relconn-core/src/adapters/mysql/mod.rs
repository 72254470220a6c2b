//! MySQL-protocol backend (MySQL, StarRocks).
//!
//! # Module Structure
//! - `reflection`: `information_schema` queries with the schema bound as a parameter
//! - `type_mapping`: Catalog type names to generic type tokens
//!
//! # Security Guarantees
//! - One unpooled connection per inspector, closed on drop
//! - Only catalog queries are issued
//! - Connection details are redacted in errors and logs

mod reflection;
mod type_mapping;

pub use type_mapping::map_mysql_type;

use super::Inspector;
use super::helpers::with_connect_timeout;
use crate::config::ToolkitConfig;
use crate::dialect::Driver;
use crate::error::ConnectorError;
use crate::models::ReflectedTable;
use crate::{ConnectionUrl, Result};
use async_trait::async_trait;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::{ConnectOptions, Connection, MySqlConnection};

/// Inspector over a single MySQL-protocol connection
pub(crate) struct MySqlInspector {
    conn: MySqlConnection,
}

impl std::fmt::Debug for MySqlInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlInspector").finish_non_exhaustive()
    }
}

/// Opens a MySQL-protocol connection for `url`.
///
/// # Errors
/// Returns a connection error if the connect fails or times out
pub(crate) async fn connect(
    url: &ConnectionUrl,
    config: &ToolkitConfig,
) -> Result<Box<dyn Inspector>> {
    let options = connect_options(url);

    let conn = with_connect_timeout(url, config.connect_timeout, async {
        options
            .connect()
            .await
            .map_err(|e| ConnectorError::connection_failed(format!("connect to {}", url), e))
    })
    .await?;

    tracing::debug!(url = %url, "MySQL-protocol connection established");

    Ok(Box::new(MySqlInspector { conn }))
}

fn connect_options(url: &ConnectionUrl) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new()
        .host(url.host())
        .port(url.effective_port())
        .username(url.username());

    if let Some(password) = url.password() {
        options = options.password(password);
    }
    if let Some(database) = url.database() {
        options = options.database(database);
    }

    // StarRocks rejects parts of the session setup sqlx sends to MySQL.
    if url.driver() == Driver::StarRocks {
        options = options
            .pipes_as_concat(false)
            .no_engine_substitution(false)
            .timezone(None::<String>)
            .set_names(false);
    }

    options
}

#[async_trait]
impl Inspector for MySqlInspector {
    async fn schema_names(&mut self) -> Result<Vec<String>> {
        reflection::schema_names(&mut self.conn).await
    }

    async fn reflect_schema(&mut self, schema: &str) -> Result<Vec<ReflectedTable>> {
        reflection::reflect_schema(&mut self.conn, schema).await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| ConnectorError::connection_failed("close MySQL connection", e))
    }
}
