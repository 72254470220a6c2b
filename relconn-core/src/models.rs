//! Reflected metadata and the table info records built from it.
//!
//! Everything here is built fresh per call and dropped after the call
//! returns.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Kind of relation returned by reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// Base table, including partitioned tables
    Table,
    /// View or materialized view
    View,
}

/// Column as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedColumn {
    /// Column name
    pub name: String,
    /// Type token after per-backend resolution, e.g. `VARCHAR`
    pub type_name: String,
    /// Column comment; empty catalog comments are `None`
    pub comment: Option<String>,
}

/// Table or view as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedTable {
    /// Schema (database for MySQL and ClickHouse) the table was reflected from
    pub schema: Option<String>,
    /// Unqualified table name
    pub name: String,
    /// Table or view
    pub kind: TableKind,
    /// Table comment; empty catalog comments are `None`
    pub comment: Option<String>,
    /// Columns in ordinal order
    pub columns: Vec<ReflectedColumn>,
}

impl ReflectedTable {
    /// Creates a table with no columns.
    pub fn new(schema: Option<String>, name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            schema,
            name: name.into(),
            kind,
            comment: None,
            columns: Vec::new(),
        }
    }

    /// Key under which the table is stored: `schema.name`, or `name` when
    /// reflected without a schema.
    pub fn key(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }
}

/// Collection of reflected tables, keyed by [`ReflectedTable::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaData {
    tables: BTreeMap<String, ReflectedTable>,
}

impl MetaData {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, replacing any earlier table with the same key.
    pub fn add_table(&mut self, table: ReflectedTable) {
        self.tables.insert(table.key(), table);
    }

    /// All tables by key
    pub fn tables(&self) -> &BTreeMap<String, ReflectedTable> {
        &self.tables
    }

    /// Looks up one table by key
    pub fn get(&self, key: &str) -> Option<&ReflectedTable> {
        self.tables.get(key)
    }

    /// Table keys
    pub fn table_names(&self) -> BTreeSet<String> {
        self.tables.keys().cloned().collect()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no table was reflected
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Extend<ReflectedTable> for MetaData {
    fn extend<I: IntoIterator<Item = ReflectedTable>>(&mut self, iter: I) {
        for table in iter {
            self.add_table(table);
        }
    }
}

/// DDL text and description for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Best-effort `CREATE TABLE` text, not validated SQL
    pub ddl: String,
    /// Table comment
    pub description: Option<String>,
}

/// Treats empty catalog comments as absent
pub(crate) fn non_empty(comment: Option<String>) -> Option<String> {
    comment.filter(|c| !c.is_empty())
}
