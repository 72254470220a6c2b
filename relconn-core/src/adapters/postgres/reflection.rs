//! Catalog queries for the PostgreSQL-family backends.
//!
//! Native PostgreSQL (and ProtonBase, and provisioned Redshift reached through
//! the PostgreSQL driver) is read from `pg_catalog`. The `redshift+sqlx`
//! driver reads tables and columns from the `svv_tables`/`svv_columns` system
//! views, which also cover Redshift Serverless, late-binding views and
//! external tables.

use super::map_postgres_type;
use crate::Result;
use crate::adapters::helpers::{ColumnRow, RowExt, TableRow, assemble_tables};
use crate::error::ConnectorError;
use crate::models::{ReflectedColumn, ReflectedTable, TableKind};
use sqlx::PgConnection;

/// Which catalog a PostgreSQL-protocol server is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogFlavor {
    /// `pg_catalog` relations with `obj_description`/`col_description`
    Postgres,
    /// Redshift `svv_tables`/`svv_columns` with `remarks`
    Redshift,
}

const SCHEMAS_QUERY: &str = r"
SELECT nspname::text AS schema_name
FROM pg_catalog.pg_namespace
WHERE nspname NOT LIKE 'pg!_%' ESCAPE '!'
ORDER BY nspname
";

const PG_TABLES_QUERY: &str = r"
SELECT
    c.relname::text AS table_name,
    c.relkind::text AS relkind,
    obj_description(c.oid, 'pg_class') AS table_comment
FROM pg_catalog.pg_class c
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
WHERE n.nspname = $1
  AND c.relkind IN ('r', 'p', 'v', 'm')
ORDER BY c.relname
";

const PG_COLUMNS_QUERY: &str = r"
SELECT
    c.relname::text AS table_name,
    a.attname::text AS column_name,
    format_type(a.atttypid, a.atttypmod) AS data_type,
    col_description(c.oid, a.attnum::int) AS column_comment
FROM pg_catalog.pg_attribute a
JOIN pg_catalog.pg_class c ON c.oid = a.attrelid
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
WHERE n.nspname = $1
  AND c.relkind IN ('r', 'p', 'v', 'm')
  AND a.attnum > 0
  AND NOT a.attisdropped
ORDER BY c.relname, a.attnum
";

const REDSHIFT_TABLES_QUERY: &str = r"
SELECT
    table_name::text AS table_name,
    table_type::text AS table_type,
    remarks::text AS table_comment
FROM svv_tables
WHERE table_schema = $1
ORDER BY table_name
";

const REDSHIFT_COLUMNS_QUERY: &str = r"
SELECT
    table_name::text AS table_name,
    column_name::text AS column_name,
    data_type::text AS data_type,
    remarks::text AS column_comment
FROM svv_columns
WHERE table_schema = $1
ORDER BY table_name, ordinal_position
";

/// Schema names, except `pg_*` system namespaces.
pub(crate) async fn schema_names(conn: &mut PgConnection) -> Result<Vec<String>> {
    let rows = sqlx::query(SCHEMAS_QUERY)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| ConnectorError::reflection_failed("Failed to query pg_namespace", e))?;

    rows.iter()
        .map(|row| row.get_field("schema_name", Some("pg_namespace")))
        .collect()
}

/// Tables and views of `schema` with their columns.
pub(crate) async fn reflect_schema(
    conn: &mut PgConnection,
    flavor: CatalogFlavor,
    schema: &str,
) -> Result<Vec<ReflectedTable>> {
    let (tables_query, columns_query, source) = match flavor {
        CatalogFlavor::Postgres => (PG_TABLES_QUERY, PG_COLUMNS_QUERY, "pg_class"),
        CatalogFlavor::Redshift => (REDSHIFT_TABLES_QUERY, REDSHIFT_COLUMNS_QUERY, "svv_tables"),
    };

    let table_rows = sqlx::query(tables_query)
        .bind(schema)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            ConnectorError::reflection_failed(
                format!("Failed to list relations of schema '{}' from {}", schema, source),
                e,
            )
        })?;

    let mut tables = Vec::with_capacity(table_rows.len());
    for row in &table_rows {
        let name: String = row.get_field("table_name", Some(source))?;
        let kind = match flavor {
            CatalogFlavor::Postgres => {
                let relkind: String = row.get_field("relkind", Some(source))?;
                relkind_to_kind(&relkind)
            }
            CatalogFlavor::Redshift => {
                let table_type: Option<String> = row.get_field("table_type", Some(source))?;
                table_type_to_kind(table_type.as_deref())
            }
        };
        tables.push(TableRow {
            name,
            kind,
            comment: row.get_field("table_comment", Some(source))?,
        });
    }

    let column_rows = sqlx::query(columns_query)
        .bind(schema)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            ConnectorError::reflection_failed(
                format!("Failed to list columns of schema '{}'", schema),
                e,
            )
        })?;

    let mut columns = Vec::with_capacity(column_rows.len());
    for row in &column_rows {
        let data_type: String = row.get_field("data_type", Some("columns"))?;
        columns.push(ColumnRow {
            table: row.get_field("table_name", Some("columns"))?,
            column: ReflectedColumn {
                name: row.get_field("column_name", Some("columns"))?,
                type_name: map_postgres_type(&data_type),
                comment: row.get_field("column_comment", Some("columns"))?,
            },
        });
    }

    tracing::debug!(
        schema = schema,
        tables = tables.len(),
        columns = columns.len(),
        ?flavor,
        "Reflected schema"
    );

    Ok(assemble_tables(schema, tables, columns))
}

/// `pg_class.relkind` to table kind: plain and materialized views are views
fn relkind_to_kind(relkind: &str) -> TableKind {
    match relkind {
        "v" | "m" => TableKind::View,
        _ => TableKind::Table,
    }
}

fn table_type_to_kind(table_type: Option<&str>) -> TableKind {
    match table_type {
        Some(t) if t.eq_ignore_ascii_case("VIEW") => TableKind::View,
        _ => TableKind::Table,
    }
}
