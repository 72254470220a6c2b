//! ClickHouse backend over the HTTP interface.
//!
//! HTTP is stateless, so "connecting" means building a client and proving
//! the server accepts the credentials with `SELECT 1`. Schemas are
//! ClickHouse databases, read from `system.databases`; tables and columns come
//! from `system.tables` and `system.columns`.

mod type_mapping;

pub use type_mapping::map_clickhouse_type;

use super::Inspector;
use super::helpers::{ColumnRow, TableRow, assemble_tables, with_connect_timeout};
use crate::config::ToolkitConfig;
use crate::error::ConnectorError;
use crate::models::{ReflectedColumn, ReflectedTable, TableKind};
use crate::{ConnectionUrl, Result};
use async_trait::async_trait;
use clickhouse::{Client, Row};
use serde::Deserialize;

const DATABASES_QUERY: &str = "SELECT name FROM system.databases ORDER BY name";

const TABLES_QUERY: &str =
    "SELECT name, engine, comment FROM system.tables WHERE database = ? ORDER BY name";

const COLUMNS_QUERY: &str = "SELECT table, name, type, comment FROM system.columns \
     WHERE database = ? ORDER BY table, position";

// Row structs are decoded positionally; field order matches the SELECT lists.

#[derive(Debug, Row, Deserialize)]
struct DatabaseRow {
    name: String,
}

#[derive(Debug, Row, Deserialize)]
struct SystemTableRow {
    name: String,
    engine: String,
    comment: String,
}

#[derive(Debug, Row, Deserialize)]
struct SystemColumnRow {
    table: String,
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    comment: String,
}

/// Inspector over a ClickHouse HTTP client
pub(crate) struct ClickHouseInspector {
    client: Client,
}

impl std::fmt::Debug for ClickHouseInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickHouseInspector").finish_non_exhaustive()
    }
}

/// Builds a client for `url` and checks that the server accepts it.
///
/// # Errors
/// Returns a connection error if the check fails or times out
pub(crate) async fn connect(
    url: &ConnectionUrl,
    config: &ToolkitConfig,
) -> Result<Box<dyn Inspector>> {
    let client = create_client(url, config.clickhouse_tls);

    with_connect_timeout(url, config.connect_timeout, async {
        client
            .query("SELECT 1")
            .fetch_one::<u8>()
            .await
            .map_err(|e| ConnectorError::connection_failed(format!("connect to {}", url), e))
    })
    .await?;

    tracing::debug!(url = %url, "ClickHouse connection verified");

    Ok(Box::new(ClickHouseInspector { client }))
}

fn endpoint(url: &ConnectionUrl, tls: bool) -> String {
    let scheme = if tls { "https" } else { "http" };
    let host = url.host();
    if host.contains(':') && !host.starts_with('[') {
        format!("{}://[{}]:{}", scheme, host, url.effective_port())
    } else {
        format!("{}://{}:{}", scheme, host, url.effective_port())
    }
}

fn create_client(url: &ConnectionUrl, tls: bool) -> Client {
    let mut client = Client::default().with_url(endpoint(url, tls));

    if !url.username().is_empty() {
        client = client.with_user(url.username());
    }
    if let Some(password) = url.password() {
        client = client.with_password(password);
    }
    if let Some(database) = url.database() {
        client = client.with_database(database);
    }

    client
}

fn engine_to_kind(engine: &str) -> TableKind {
    match engine {
        "View" | "MaterializedView" | "LiveView" | "WindowView" => TableKind::View,
        _ => TableKind::Table,
    }
}

#[async_trait]
impl Inspector for ClickHouseInspector {
    async fn schema_names(&mut self) -> Result<Vec<String>> {
        let rows = self
            .client
            .query(DATABASES_QUERY)
            .fetch_all::<DatabaseRow>()
            .await
            .map_err(|e| ConnectorError::reflection_failed("Failed to query system.databases", e))?;

        Ok(rows.into_iter().map(|row| row.name).collect())
    }

    async fn reflect_schema(&mut self, schema: &str) -> Result<Vec<ReflectedTable>> {
        let table_rows = self
            .client
            .query(TABLES_QUERY)
            .bind(schema)
            .fetch_all::<SystemTableRow>()
            .await
            .map_err(|e| {
                ConnectorError::reflection_failed(
                    format!("Failed to list tables of database '{}'", schema),
                    e,
                )
            })?;

        let column_rows = self
            .client
            .query(COLUMNS_QUERY)
            .bind(schema)
            .fetch_all::<SystemColumnRow>()
            .await
            .map_err(|e| {
                ConnectorError::reflection_failed(
                    format!("Failed to list columns of database '{}'", schema),
                    e,
                )
            })?;

        let tables: Vec<TableRow> = table_rows
            .into_iter()
            .map(|row| TableRow {
                kind: engine_to_kind(&row.engine),
                name: row.name,
                comment: Some(row.comment),
            })
            .collect();

        let columns: Vec<ColumnRow> = column_rows
            .into_iter()
            .map(|row| ColumnRow {
                table: row.table,
                column: ReflectedColumn {
                    name: row.name,
                    type_name: map_clickhouse_type(&row.type_name),
                    comment: Some(row.comment),
                },
            })
            .collect();

        tracing::debug!(
            schema = schema,
            tables = tables.len(),
            columns = columns.len(),
            "Reflected ClickHouse database"
        );

        Ok(assemble_tables(schema, tables, columns))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        // HTTP client holds no session; dropping it releases pooled sockets.
        Ok(())
    }
}
