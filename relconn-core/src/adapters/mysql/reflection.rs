//! `information_schema` queries for MySQL and StarRocks.
//!
//! Catalog columns are cast to `CHAR` so they decode as text on both servers.
//! The schema name is always bound as a parameter.

use super::map_mysql_type;
use crate::Result;
use crate::adapters::helpers::{ColumnRow, RowExt, TableRow, assemble_tables};
use crate::error::ConnectorError;
use crate::models::{ReflectedColumn, ReflectedTable, TableKind};
use sqlx::MySqlConnection;

const SCHEMAS_QUERY: &str = r"
SELECT CAST(SCHEMA_NAME AS CHAR) AS schema_name
FROM information_schema.SCHEMATA
ORDER BY SCHEMA_NAME
";

const TABLES_QUERY: &str = r"
SELECT
    CAST(TABLE_NAME AS CHAR) AS table_name,
    CAST(TABLE_TYPE AS CHAR) AS table_type,
    CAST(TABLE_COMMENT AS CHAR) AS table_comment
FROM information_schema.TABLES
WHERE TABLE_SCHEMA = ?
ORDER BY TABLE_NAME
";

const COLUMNS_QUERY: &str = r"
SELECT
    CAST(TABLE_NAME AS CHAR) AS table_name,
    CAST(COLUMN_NAME AS CHAR) AS column_name,
    CAST(DATA_TYPE AS CHAR) AS data_type,
    CAST(COLUMN_COMMENT AS CHAR) AS column_comment
FROM information_schema.COLUMNS
WHERE TABLE_SCHEMA = ?
ORDER BY TABLE_NAME, ORDINAL_POSITION
";

/// All database names visible to the session.
pub(crate) async fn schema_names(conn: &mut MySqlConnection) -> Result<Vec<String>> {
    let rows = sqlx::query(SCHEMAS_QUERY)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            ConnectorError::reflection_failed("Failed to query information_schema.SCHEMATA", e)
        })?;

    rows.iter()
        .map(|row| row.get_field("schema_name", Some("SCHEMATA")))
        .collect()
}

/// Tables and views of `schema` with their columns.
pub(crate) async fn reflect_schema(
    conn: &mut MySqlConnection,
    schema: &str,
) -> Result<Vec<ReflectedTable>> {
    let table_rows = sqlx::query(TABLES_QUERY)
        .bind(schema)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            ConnectorError::reflection_failed(
                format!("Failed to list tables of database '{}'", schema),
                e,
            )
        })?;

    let mut tables = Vec::with_capacity(table_rows.len());
    for row in &table_rows {
        let table_type: Option<String> = row.get_field("table_type", Some("TABLES"))?;
        let kind = table_type_to_kind(table_type.as_deref());
        let comment: Option<String> = row.get_field("table_comment", Some("TABLES"))?;
        tables.push(TableRow {
            name: row.get_field("table_name", Some("TABLES"))?,
            kind,
            // MySQL reports the literal comment "VIEW" for every view.
            comment: if kind == TableKind::View { None } else { comment },
        });
    }

    let column_rows = sqlx::query(COLUMNS_QUERY)
        .bind(schema)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            ConnectorError::reflection_failed(
                format!("Failed to list columns of database '{}'", schema),
                e,
            )
        })?;

    let mut columns = Vec::with_capacity(column_rows.len());
    for row in &column_rows {
        let data_type: String = row.get_field("data_type", Some("COLUMNS"))?;
        columns.push(ColumnRow {
            table: row.get_field("table_name", Some("COLUMNS"))?,
            column: ReflectedColumn {
                name: row.get_field("column_name", Some("COLUMNS"))?,
                type_name: map_mysql_type(&data_type),
                comment: row.get_field("column_comment", Some("COLUMNS"))?,
            },
        });
    }

    tracing::debug!(
        schema = schema,
        tables = tables.len(),
        columns = columns.len(),
        "Reflected database"
    );

    Ok(assemble_tables(schema, tables, columns))
}

fn table_type_to_kind(table_type: Option<&str>) -> TableKind {
    match table_type {
        Some("VIEW" | "SYSTEM VIEW") => TableKind::View,
        _ => TableKind::Table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::future::Future;
    use std::pin::Pin;

    type SendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

    // Inspector methods box these futures as `Send`; compiling is the check.
    fn boxed_schema_names(conn: &mut MySqlConnection) -> SendFuture<'_, Vec<String>> {
        Box::pin(schema_names(conn))
    }

    fn boxed_reflect_schema<'a>(
        conn: &'a mut MySqlConnection,
        schema: &'a str,
    ) -> SendFuture<'a, Vec<ReflectedTable>> {
        Box::pin(reflect_schema(conn, schema))
    }

    #[test]
    fn test_catalog_futures_are_send() {
        let _: fn(&mut MySqlConnection) -> SendFuture<'_, Vec<String>> = boxed_schema_names;
        let _: for<'a> fn(&'a mut MySqlConnection, &'a str) -> SendFuture<'a, Vec<ReflectedTable>> =
            boxed_reflect_schema;
    }

    #[test]
    fn test_queries_bind_schema() {
        for query in [TABLES_QUERY, COLUMNS_QUERY] {
            assert!(query.contains("TABLE_SCHEMA = ?"));
            assert!(!query.contains('\''));
        }
        assert!(COLUMNS_QUERY.contains("ORDER BY TABLE_NAME, ORDINAL_POSITION"));
    }

    #[test]
    fn test_table_type_to_kind() {
        assert_eq!(table_type_to_kind(Some("BASE TABLE")), TableKind::Table);
        assert_eq!(table_type_to_kind(Some("VIEW")), TableKind::View);
        assert_eq!(table_type_to_kind(Some("SYSTEM VIEW")), TableKind::View);
        assert_eq!(table_type_to_kind(None), TableKind::Table);
    }
}
