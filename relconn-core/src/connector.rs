//! The relational connector facade.
//!
//! Every operation opens one connection through the injected [`SqlToolkit`],
//! asks one set of catalog questions and closes the connection before it
//! returns. Nothing is cached between calls.

use crate::adapters::{Inspector, SqlToolkit, SqlxToolkit};
use crate::config::{ConnectionDescriptor, ConnectorConfig};
use crate::ddl::synthesize_ddl;
use crate::dialect::Dialect;
use crate::error::ConnectorError;
use crate::models::{MetaData, TableInfo};
use crate::security::{CredentialProvider, Credentials};
use crate::{ConnectionUrl, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Outcome of [`RelationalConnector::test_connection`].
#[derive(Debug)]
pub enum ConnectionStatus {
    /// Connect and authentication succeeded
    Connected,
    /// Any step failed; the error has already been logged
    Failed(ConnectorError),
}

impl ConnectionStatus {
    /// True when the connection succeeded
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&ConnectorError> {
        match self {
            Self::Connected => None,
            Self::Failed(error) => Some(error),
        }
    }
}

impl From<ConnectionStatus> for bool {
    fn from(status: ConnectionStatus) -> Self {
        status.is_connected()
    }
}

/// Dialect-aware facade over the reflection toolkit and IAM credentials.
///
/// `RelationalConnector` is `Send + Sync` and holds only immutable state, so
/// one instance can be shared behind an `Arc` by any number of tasks.
///
/// # Example
/// ```rust,no_run
/// use relconn_core::{ConnectionDescriptor, RelationalConnector};
///
/// # async fn run() -> relconn_core::Result<()> {
/// let connector = RelationalConnector::from_env().await?;
/// let descriptor = ConnectionDescriptor::new("postgresql", "db.internal")
///     .with_database("analytics")
///     .with_credentials("reporter", Some("secret".to_string()));
///
/// let schemas = connector.list_schemas(&descriptor).await?;
/// let ddl = connector.get_table_ddl(&descriptor, &schemas, &[]).await?;
/// for (table, info) in &ddl {
///     println!("{table}: {}", info.ddl);
/// }
/// # Ok(())
/// # }
/// ```
pub struct RelationalConnector {
    toolkit: Arc<dyn SqlToolkit>,
    credentials: Arc<dyn CredentialProvider>,
    config: ConnectorConfig,
}

impl std::fmt::Debug for RelationalConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationalConnector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RelationalConnector {
    /// Creates a connector from explicit collaborators.
    pub fn new(
        toolkit: Arc<dyn SqlToolkit>,
        credentials: Arc<dyn CredentialProvider>,
        config: ConnectorConfig,
    ) -> Self {
        Self {
            toolkit,
            credentials,
            config,
        }
    }

    /// Creates the production connector for `config`.
    ///
    /// Uses [`SqlxToolkit`] and, with the `aws-iam` feature, the AWS SDK
    /// credential provider. Without `aws-iam`, IAM dialects fail with
    /// `UnsupportedFeature`.
    ///
    /// # Errors
    /// Returns a configuration error if `config` is invalid
    pub async fn from_config(config: ConnectorConfig) -> Result<Self> {
        config.validate()?;

        let toolkit = Arc::new(SqlxToolkit::new(config.toolkit.clone()));

        #[cfg(feature = "aws-iam")]
        let credentials: Arc<dyn CredentialProvider> = Arc::new(
            crate::security::AwsCredentialProvider::from_env(config.iam.region.as_deref()).await,
        );
        #[cfg(not(feature = "aws-iam"))]
        let credentials: Arc<dyn CredentialProvider> =
            Arc::new(crate::security::DisabledCredentialProvider);

        Ok(Self::new(toolkit, credentials, config))
    }

    /// Creates the production connector from environment variables.
    ///
    /// # Errors
    /// Returns a configuration error if a variable is set but invalid
    pub async fn from_env() -> Result<Self> {
        Self::from_config(ConnectorConfig::from_env()?).await
    }

    /// Configuration in use
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Resolves the credentials a connection for `dialect` should use.
    ///
    /// IAM dialects get short-lived credentials from the provider (duration
    /// 1000 seconds); every other dialect gets `supplied` back unchanged.
    ///
    /// # Errors
    /// Returns `Configuration` when the IAM target is not configured and
    /// propagates any provider failure
    pub async fn resolve_iam_credentials(
        &self,
        dialect: Dialect,
        database: &str,
        supplied: Credentials,
    ) -> Result<Credentials> {
        crate::security::resolve_iam_credentials(
            self.credentials.as_ref(),
            &self.config.iam,
            dialect,
            database,
            supplied,
        )
        .await
    }

    /// Builds the driver-qualified connection URL for `descriptor`.
    ///
    /// Unknown dialect tags fail before any network or credential call. For
    /// IAM dialects the caller-supplied credentials are discarded.
    ///
    /// # Errors
    /// Returns `UnsupportedDialect`, a configuration error for an invalid
    /// descriptor, or any IAM resolution error
    pub async fn build_connection_url(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<ConnectionUrl> {
        let dialect = descriptor.dialect()?;
        descriptor.validate()?;

        let credentials = self
            .resolve_iam_credentials(
                dialect,
                &descriptor.database,
                descriptor.credentials().clone(),
            )
            .await?;

        let url = ConnectionUrl::new(
            dialect.driver(),
            credentials,
            descriptor.host.clone(),
            descriptor.port,
            descriptor.database.clone(),
        );
        tracing::debug!(dialect = %dialect, url = %url, "Built connection URL");
        Ok(url)
    }

    /// Checks that a connection to `descriptor` can be opened.
    ///
    /// Never returns an error: every failure is logged and reported as
    /// [`ConnectionStatus::Failed`].
    pub async fn test_connection(&self, descriptor: &ConnectionDescriptor) -> ConnectionStatus {
        match self.try_connect(descriptor).await {
            Ok(()) => {
                tracing::info!(target_db = %descriptor, "Connection test succeeded");
                ConnectionStatus::Connected
            }
            Err(error) => {
                tracing::error!(
                    target_db = %descriptor,
                    error = %error,
                    "Failed to connect"
                );
                ConnectionStatus::Failed(error)
            }
        }
    }

    async fn try_connect(&self, descriptor: &ConnectionDescriptor) -> Result<()> {
        let url = self.build_connection_url(descriptor).await?;
        let inspector = self.toolkit.connect(&url).await?;
        release(inspector, Ok(())).await
    }

    /// Lists schema names visible on `descriptor`.
    ///
    /// For `postgresql`, `pg_catalog` and `information_schema` are removed;
    /// every other dialect returns the reflection layer's list as is.
    ///
    /// # Errors
    /// Returns `UnsupportedDialect` for unknown tags, and propagates URL,
    /// connection and reflection errors
    pub async fn list_schemas(&self, descriptor: &ConnectionDescriptor) -> Result<Vec<String>> {
        let dialect = descriptor.dialect()?;
        let url = self.build_connection_url(descriptor).await?;

        let mut inspector = self.toolkit.connect(&url).await?;
        let result = inspector.schema_names().await;
        let names = release(inspector, result).await?;

        let hidden = dialect.hidden_schemas();
        let schemas: Vec<String> = names
            .into_iter()
            .filter(|name| !hidden.contains(&name.as_str()))
            .collect();

        tracing::info!(
            dialect = %dialect,
            count = schemas.len(),
            "Listed schemas"
        );
        Ok(schemas)
    }

    /// Reflects tables and views of every schema in `schemas`.
    ///
    /// An empty `schemas` slice returns empty metadata without building a
    /// URL, resolving credentials or connecting.
    ///
    /// # Errors
    /// Returns `UnsupportedDialect` for unknown tags, and propagates URL,
    /// connection and reflection errors
    pub async fn reflect_metadata(
        &self,
        descriptor: &ConnectionDescriptor,
        schemas: &[String],
    ) -> Result<MetaData> {
        let dialect = descriptor.dialect()?;
        if schemas.is_empty() {
            tracing::debug!(dialect = %dialect, "No schemas requested, skipping reflection");
            return Ok(MetaData::new());
        }

        let url = self.build_connection_url(descriptor).await?;
        let mut inspector = self.toolkit.connect(&url).await?;
        let result = reflect_schemas(inspector.as_mut(), schemas).await;
        let metadata = release(inspector, result).await?;

        tracing::debug!(
            dialect = %dialect,
            schemas = schemas.len(),
            tables = metadata.len(),
            "Reflected metadata"
        );
        Ok(metadata)
    }

    /// Lists the keys (`schema.table`) of all tables and views in `schemas`.
    ///
    /// # Errors
    /// Same as [`RelationalConnector::reflect_metadata`]
    pub async fn list_tables(
        &self,
        descriptor: &ConnectionDescriptor,
        schemas: &[String],
    ) -> Result<BTreeSet<String>> {
        let metadata = self.reflect_metadata(descriptor, schemas).await?;
        Ok(metadata.table_names())
    }

    /// Synthesizes DDL text for the tables of `schemas`.
    ///
    /// When `table_filter` is non-empty only tables whose key is listed are
    /// returned; filter entries that match nothing are ignored.
    ///
    /// # Errors
    /// Same as [`RelationalConnector::reflect_metadata`]
    pub async fn get_table_ddl(
        &self,
        descriptor: &ConnectionDescriptor,
        schemas: &[String],
        table_filter: &[String],
    ) -> Result<BTreeMap<String, TableInfo>> {
        let metadata = self.reflect_metadata(descriptor, schemas).await?;

        let mut table_info = BTreeMap::new();
        for (key, table) in metadata.tables() {
            if !table_filter.is_empty() && !table_filter.contains(key) {
                continue;
            }

            let info = TableInfo {
                ddl: synthesize_ddl(key, table),
                description: table.comment.clone(),
            };
            table_info.insert(key.clone(), info);
            tracing::info!(table = %key, "Added table DDL");
        }

        Ok(table_info)
    }
}

async fn reflect_schemas(inspector: &mut dyn Inspector, schemas: &[String]) -> Result<MetaData> {
    let mut metadata = MetaData::new();
    for schema in schemas {
        let tables = inspector.reflect_schema(schema).await?;
        tracing::debug!(schema = %schema, tables = tables.len(), "Reflected schema");
        metadata.extend(tables);
    }
    Ok(metadata)
}

/// Closes `inspector` and returns `result`.
///
/// A failed close is logged and never replaces the operation's own outcome.
async fn release<T>(inspector: Box<dyn Inspector>, result: Result<T>) -> Result<T> {
    if let Err(error) = inspector.close().await {
        tracing::warn!(error = %error, "Failed to close connection cleanly");
    }
    result
}
