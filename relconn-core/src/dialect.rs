//! Dialect tags and the static dialect-to-driver mapping.
//!
//! A dialect is the engine variant named by the caller (`redshift-iam`,
//! `starrocks`, ...). A driver is what the connection URL is built for. Several
//! dialects share one driver; the IAM dialects additionally change how the
//! credentials are obtained.

use crate::error::ConnectorError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The static dialect mapping, in [`Dialect::ALL`] order.
///
/// Serverless Redshift goes through the Redshift driver family; every other
/// Redshift flavor is reached as plain PostgreSQL.
pub const DIALECT_DRIVERS: [(Dialect, Driver); 8] = [
    (Dialect::MySql, Driver::MySql),
    (Dialect::PostgreSql, Driver::PostgreSql),
    (Dialect::ProtonBase, Driver::PostgreSql),
    (Dialect::Redshift, Driver::PostgreSql),
    (Dialect::RedshiftIam, Driver::PostgreSql),
    (Dialect::RedshiftServerlessIam, Driver::Redshift),
    (Dialect::StarRocks, Driver::StarRocks),
    (Dialect::ClickHouse, Driver::ClickHouse),
];

/// Supported dialect tags (case-sensitive on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// MySQL
    #[serde(rename = "mysql")]
    MySql,
    /// PostgreSQL
    #[serde(rename = "postgresql")]
    PostgreSql,
    /// ProtonBase (PostgreSQL-compatible)
    #[serde(rename = "protonbase")]
    ProtonBase,
    /// Amazon Redshift with caller-supplied credentials
    #[serde(rename = "redshift")]
    Redshift,
    /// Provisioned Redshift cluster with IAM-issued credentials
    #[serde(rename = "redshift-iam")]
    RedshiftIam,
    /// Redshift Serverless workgroup with IAM-issued credentials
    #[serde(rename = "redshift-serverless-iam")]
    RedshiftServerlessIam,
    /// StarRocks over the MySQL protocol
    #[serde(rename = "starrocks")]
    StarRocks,
    /// ClickHouse over HTTP
    #[serde(rename = "clickhouse")]
    ClickHouse,
}

/// Driver a connection URL is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Driver {
    /// `mysql+sqlx`
    MySql,
    /// `postgresql+sqlx`
    PostgreSql,
    /// `redshift+sqlx`, the Redshift driver family
    Redshift,
    /// `starrocks`
    StarRocks,
    /// `clickhouse`
    ClickHouse,
}

/// Wire protocol used to reach a driver's server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// PostgreSQL frontend/backend protocol (sqlx)
    Postgres,
    /// MySQL client/server protocol (sqlx)
    MySql,
    /// ClickHouse HTTP interface
    ClickHouseHttp,
}

/// Which IAM credential API a dialect goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IamFlavor {
    /// Provisioned cluster, `GetClusterCredentialsWithIAM`
    Cluster,
    /// Serverless workgroup, `GetCredentials`
    Serverless,
}

impl Dialect {
    /// Every dialect in mapping order
    pub const ALL: [Self; 8] = [
        Self::MySql,
        Self::PostgreSql,
        Self::ProtonBase,
        Self::Redshift,
        Self::RedshiftIam,
        Self::RedshiftServerlessIam,
        Self::StarRocks,
        Self::ClickHouse,
    ];

    /// The dialect tag as accepted by [`Dialect::from_str`]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::ProtonBase => "protonbase",
            Self::Redshift => "redshift",
            Self::RedshiftIam => "redshift-iam",
            Self::RedshiftServerlessIam => "redshift-serverless-iam",
            Self::StarRocks => "starrocks",
            Self::ClickHouse => "clickhouse",
        }
    }

    /// Driver for this dialect, looked up in [`DIALECT_DRIVERS`]
    pub const fn driver(self) -> Driver {
        DIALECT_DRIVERS[self as usize].1
    }

    /// IAM flavor for dialects whose credentials are issued by the cloud
    pub const fn iam_flavor(self) -> Option<IamFlavor> {
        match self {
            Self::RedshiftIam => Some(IamFlavor::Cluster),
            Self::RedshiftServerlessIam => Some(IamFlavor::Serverless),
            _ => None,
        }
    }

    /// Whether caller-supplied credentials are replaced by IAM-issued ones
    pub const fn requires_iam(self) -> bool {
        self.iam_flavor().is_some()
    }

    /// Built-in schemas removed from schema listings for this dialect
    pub const fn hidden_schemas(self) -> &'static [&'static str] {
        match self {
            Self::PostgreSql => &["pg_catalog", "information_schema"],
            _ => &[],
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ConnectorError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dialect| dialect.as_str() == tag)
            .ok_or_else(|| ConnectorError::unsupported_dialect(tag))
    }
}

impl Driver {
    /// Driver identifier carried by the connection URL
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::MySql => "mysql+sqlx",
            Self::PostgreSql => "postgresql+sqlx",
            Self::Redshift => "redshift+sqlx",
            Self::StarRocks => "starrocks",
            Self::ClickHouse => "clickhouse",
        }
    }

    /// Wire protocol spoken by the driver's server
    pub const fn protocol(self) -> Protocol {
        match self {
            Self::PostgreSql | Self::Redshift => Protocol::Postgres,
            Self::MySql | Self::StarRocks => Protocol::MySql,
            Self::ClickHouse => Protocol::ClickHouseHttp,
        }
    }

    /// Port used when the descriptor does not name one
    pub const fn default_port(self) -> u16 {
        match self {
            Self::PostgreSql => 5432,
            Self::Redshift => 5439,
            Self::MySql => 3306,
            Self::StarRocks => 9030,
            Self::ClickHouse => 8123,
        }
    }

    /// URL scheme used when rendering a connection string for the backend
    pub(crate) const fn url_scheme(self) -> &'static str {
        match self.protocol() {
            Protocol::Postgres => "postgres",
            Protocol::MySql => "mysql",
            Protocol::ClickHouseHttp => "http",
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// `(dialect tag, driver identifier)` pairs of the static mapping
pub fn dialect_drivers() -> impl Iterator<Item = (&'static str, &'static str)> {
    DIALECT_DRIVERS
        .into_iter()
        .map(|(dialect, driver)| (dialect.as_str(), driver.identifier()))
}
