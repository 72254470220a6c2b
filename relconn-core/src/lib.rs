//! Dialect-aware relational connector.
//!
//! Builds driver-qualified connection URLs for a fixed set of database
//! dialects, swaps in short-lived IAM credentials for the Redshift IAM
//! dialects, and delegates schema listing, table listing and DDL synthesis to
//! a reflection toolkit.
//!
//! # Security Guarantees
//! - Passwords are held in zeroizing containers and never logged
//! - IAM-issued credentials are relayed, never stored
//! - All database operations are catalog reads
//! - One connection per operation, released on every exit path
//!
//! # Architecture
//! - [`RelationalConnector`] is the facade callers use
//! - [`adapters::SqlToolkit`] opens connections; [`adapters::SqlxToolkit`] is
//!   the production implementation over `sqlx` and `clickhouse`
//! - [`security::CredentialProvider`] issues IAM credentials; the AWS SDK
//!   implementation sits behind the `aws-iam` feature

pub mod adapters;
pub mod config;
mod connection_url;
mod connector;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod logging;
pub mod models;
pub mod security;

// Re-export commonly used types
pub use adapters::{Inspector, SqlToolkit, SqlxToolkit};
pub use config::{ConnectionDescriptor, ConnectorConfig, IamConfig, ToolkitConfig};
pub use connection_url::ConnectionUrl;
pub use connector::{ConnectionStatus, RelationalConnector};
pub use dialect::{DIALECT_DRIVERS, Dialect, Driver, IamFlavor, Protocol, dialect_drivers};
pub use error::{ConnectorError, Result};
pub use models::{MetaData, ReflectedColumn, ReflectedTable, TableInfo, TableKind};
