//! Helper utilities shared by the reflection backends.
//!
//! Provides common functionality so each backend decodes rows, bounds its
//! connect time and assembles tables the same way.

use crate::error::ConnectorError;
use crate::models::{ReflectedColumn, ReflectedTable, TableKind, non_empty};
use crate::{ConnectionUrl, Result};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

/// Extension trait for extracting typed values from catalog rows
/// with consistent error handling.
///
/// # Example
/// ```rust,ignore
/// use crate::adapters::helpers::RowExt;
///
/// let name: String = row.get_field("table_name", Some("pg_class"))?;
/// let comment: Option<String> = row.get_field("table_comment", None)?;
/// ```
#[cfg(any(feature = "postgresql", feature = "mysql"))]
pub(crate) trait RowExt {
    /// Database the row was read from
    type Db: sqlx::Database;

    /// Extracts a typed field from the row with proper error context.
    ///
    /// # Arguments
    /// * `field_name` - Name of the column to extract
    /// * `table_context` - Optional catalog table for error messages
    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, Self::Db> + sqlx::Type<Self::Db>;
}

#[cfg(feature = "postgresql")]
impl RowExt for sqlx::postgres::PgRow {
    type Db = sqlx::Postgres;

    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, Self::Db> + sqlx::Type<Self::Db>,
    {
        sqlx::Row::try_get(self, field_name)
            .map_err(|e| ConnectorError::parse_field(field_name, table_context, e))
    }
}

#[cfg(feature = "mysql")]
impl RowExt for sqlx::mysql::MySqlRow {
    type Db = sqlx::MySql;

    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, Self::Db> + sqlx::Type<Self::Db>,
    {
        sqlx::Row::try_get(self, field_name)
            .map_err(|e| ConnectorError::parse_field(field_name, table_context, e))
    }
}

/// Runs a connect future under `timeout`.
///
/// # Errors
/// Returns a connection error when the timeout elapses, otherwise whatever
/// the future returned.
pub(crate) async fn with_connect_timeout<T, F>(
    url: &ConnectionUrl,
    timeout: Duration,
    connect: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, connect).await {
        Ok(result) => result,
        Err(elapsed) => Err(ConnectorError::connection_failed(
            format!(
                "connect to {} timed out after {}s",
                url,
                timeout.as_secs()
            ),
            elapsed,
        )),
    }
}

/// One row of a backend's table listing
#[derive(Debug)]
pub(crate) struct TableRow {
    pub name: String,
    pub kind: TableKind,
    pub comment: Option<String>,
}

/// One row of a backend's column listing
#[derive(Debug)]
pub(crate) struct ColumnRow {
    pub table: String,
    pub column: ReflectedColumn,
}

/// Joins table and column listings of one schema.
///
/// Tables keep the order of `tables`; columns keep the order of `columns`.
/// Columns whose table is not in `tables` are skipped.
pub(crate) fn assemble_tables(
    schema: &str,
    tables: Vec<TableRow>,
    columns: Vec<ColumnRow>,
) -> Vec<ReflectedTable> {
    let mut positions = HashMap::with_capacity(tables.len());
    let mut reflected = Vec::with_capacity(tables.len());

    for row in tables {
        positions.insert(row.name.clone(), reflected.len());
        let mut table = ReflectedTable::new(Some(schema.to_string()), row.name, row.kind);
        table.comment = non_empty(row.comment);
        reflected.push(table);
    }

    for row in columns {
        match positions.get(&row.table) {
            Some(&index) => {
                let mut column = row.column;
                column.comment = non_empty(column.comment);
                reflected[index].columns.push(column);
            }
            None => {
                tracing::trace!(
                    schema = schema,
                    table = %row.table,
                    "Skipping column of unlisted relation"
                );
            }
        }
    }

    reflected
}
