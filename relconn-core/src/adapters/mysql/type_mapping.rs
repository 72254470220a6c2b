//! MySQL and StarRocks catalog type names to generic type tokens.
//!
//! Input is `information_schema.COLUMNS.DATA_TYPE`, which MySQL reports
//! without length or precision. StarRocks may report nested types such as
//! `array<int(11)>`.

/// Maps a MySQL-family `DATA_TYPE` to a generic type token.
///
/// Unknown types keep their catalog name.
///
/// # Example
/// ```rust
/// use relconn_core::adapters::map_mysql_type;
///
/// assert_eq!(map_mysql_type("int"), "INTEGER");
/// assert_eq!(map_mysql_type("datetime"), "DATETIME");
/// assert_eq!(map_mysql_type("array<int(11)>"), "ARRAY");
/// ```
pub fn map_mysql_type(catalog_type: &str) -> String {
    let trimmed = catalog_type.trim();
    let lower = trimmed.to_lowercase();

    if lower.starts_with("array<") {
        return "ARRAY".to_string();
    }
    if lower.starts_with("map<") {
        return "MAP".to_string();
    }
    if lower.starts_with("struct<") {
        return "STRUCT".to_string();
    }

    let base = lower
        .split(['(', ' '])
        .next()
        .unwrap_or_default();

    let token = match base {
        // String types
        "char" | "character" => "CHAR",
        "varchar" => "VARCHAR",
        "tinytext" => "TINYTEXT",
        "text" => "TEXT",
        "mediumtext" => "MEDIUMTEXT",
        "longtext" => "LONGTEXT",
        "string" => "STRING",

        // Integer types
        "tinyint" => "TINYINT",
        "smallint" => "SMALLINT",
        "mediumint" => "MEDIUMINT",
        "int" | "integer" => "INTEGER",
        "bigint" => "BIGINT",
        "largeint" => "LARGEINT",

        // Floating point and exact numeric types
        "decimal" | "decimalv3" => "DECIMAL",
        "numeric" => "NUMERIC",
        "float" => "FLOAT",
        "double" => "DOUBLE",
        "real" => "REAL",

        "bit" => "BIT",
        "boolean" | "bool" => "BOOLEAN",

        // Date and time types
        "date" => "DATE",
        "datetime" => "DATETIME",
        "timestamp" => "TIMESTAMP",
        "time" => "TIME",
        "year" => "YEAR",

        // Binary types
        "binary" => "BINARY",
        "varbinary" => "VARBINARY",
        "tinyblob" => "TINYBLOB",
        "blob" => "BLOB",
        "mediumblob" => "MEDIUMBLOB",
        "longblob" => "LONGBLOB",

        "json" => "JSON",
        "enum" => "ENUM",
        "set" => "SET",

        _ => return trimmed.to_string(),
    };

    token.to_string()
}
