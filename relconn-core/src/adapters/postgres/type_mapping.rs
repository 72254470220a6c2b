//! PostgreSQL and Redshift catalog type names to generic type tokens.
//!
//! Input is `format_type()` output (`character varying(64)`,
//! `timestamp(3) with time zone`, `integer[]`) or Redshift `svv_columns`
//! `data_type`. Type modifiers are dropped; the token names the type family.

/// Maps a PostgreSQL-family catalog type name to a generic type token.
///
/// Unknown types (enums, domains, extension types) keep their catalog name.
///
/// # Example
/// ```rust
/// use relconn_core::adapters::map_postgres_type;
///
/// assert_eq!(map_postgres_type("character varying(255)"), "VARCHAR");
/// assert_eq!(map_postgres_type("timestamp(3) with time zone"), "TIMESTAMP");
/// assert_eq!(map_postgres_type("mood"), "mood");
/// ```
pub fn map_postgres_type(catalog_type: &str) -> String {
    let trimmed = catalog_type.trim();
    if trimmed.ends_with("[]") {
        return "ARRAY".to_string();
    }

    let base = strip_modifiers(trimmed);
    let token = match base.to_lowercase().as_str() {
        // String types
        "character varying" | "varchar" => "VARCHAR",
        "character" | "char" | "bpchar" => "CHAR",
        "text" => "TEXT",

        // Integer types
        "smallint" | "int2" => "SMALLINT",
        "integer" | "int" | "int4" => "INTEGER",
        "bigint" | "int8" => "BIGINT",

        // Floating point and exact numeric types
        "real" | "float4" => "REAL",
        "double precision" | "float8" => "DOUBLE_PRECISION",
        "numeric" | "decimal" => "NUMERIC",
        "money" => "MONEY",

        "boolean" | "bool" => "BOOLEAN",

        // Date and time types
        "date" => "DATE",
        "timestamp without time zone"
        | "timestamp with time zone"
        | "timestamp"
        | "timestamptz" => "TIMESTAMP",
        "time without time zone" | "time with time zone" | "time" | "timetz" => "TIME",
        "interval" => "INTERVAL",

        "bytea" => "BYTEA",
        "json" => "JSON",
        "jsonb" => "JSONB",
        "uuid" => "UUID",

        // Network types
        "inet" => "INET",
        "cidr" => "CIDR",
        "macaddr" => "MACADDR",
        "macaddr8" => "MACADDR8",

        "bit" | "bit varying" | "varbit" => "BIT",
        "oid" => "OID",
        "regclass" => "REGCLASS",
        "tsvector" => "TSVECTOR",

        // Range types
        "int4range" => "INT4RANGE",
        "int8range" => "INT8RANGE",
        "numrange" => "NUMRANGE",
        "daterange" => "DATERANGE",
        "tsrange" => "TSRANGE",
        "tstzrange" => "TSTZRANGE",

        // Redshift-only types
        "super" => "SUPER",
        "geometry" => "GEOMETRY",
        "geography" => "GEOGRAPHY",
        "hllsketch" => "HLLSKETCH",

        _ => return trimmed.to_string(),
    };

    token.to_string()
}

/// Removes every parenthesised modifier and collapses the whitespace left
/// behind: `timestamp(3) without time zone` becomes
/// `timestamp without time zone`.
fn strip_modifiers(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len());
    let mut depth = 0_usize;
    for ch in type_name.chars() {
        match ch {
            '(' => depth = depth.saturating_add(1),
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
