//! ClickHouse column types.
//!
//! ClickHouse type names are already engine-specific and precise, so they are
//! kept as reported. Only the `Nullable(...)` and `LowCardinality(...)`
//! wrappers are removed, since nullability and dictionary encoding are
//! storage details rather than the column's type.

const WRAPPERS: [&str; 2] = ["Nullable(", "LowCardinality("];

/// Removes `Nullable`/`LowCardinality` wrappers from a ClickHouse type name.
///
/// # Example
/// ```rust
/// use relconn_core::adapters::map_clickhouse_type;
///
/// assert_eq!(map_clickhouse_type("LowCardinality(Nullable(String))"), "String");
/// assert_eq!(map_clickhouse_type("DateTime64(3, 'UTC')"), "DateTime64(3, 'UTC')");
/// ```
pub fn map_clickhouse_type(catalog_type: &str) -> String {
    let mut current = catalog_type.trim();

    loop {
        let inner = WRAPPERS.iter().find_map(|wrapper| {
            current
                .strip_prefix(wrapper)
                .and_then(|rest| rest.strip_suffix(')'))
        });
        match inner {
            Some(inner) => current = inner.trim(),
            None => return current.to_string(),
        }
    }
}
