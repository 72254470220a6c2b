//! IAM credential resolution for the Redshift dialects.
//!
//! Provisioned clusters and serverless workgroups issue short-lived database
//! credentials through two different APIs. Both are called with a fixed
//! duration of [`IAM_CREDENTIAL_DURATION_SECS`]. Failures are propagated as
//! they come back from the provider: there is no retry and no fallback to the
//! caller-supplied credentials.

use super::credentials::Credentials;
use crate::config::IamConfig;
use crate::dialect::{Dialect, IamFlavor};
use crate::error::ConnectorError;
use crate::Result;
use async_trait::async_trait;

/// Lifetime requested for IAM-issued database credentials, in seconds
pub const IAM_CREDENTIAL_DURATION_SECS: i32 = 1000;

/// Parameters of a `GetClusterCredentialsWithIAM` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterCredentialsRequest {
    /// `DbName`
    pub db_name: String,
    /// `ClusterIdentifier`
    pub cluster_identifier: String,
    /// `DurationSeconds`
    pub duration_seconds: i32,
}

/// Parameters of a serverless `GetCredentials` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerlessCredentialsRequest {
    /// `dbName`
    pub db_name: String,
    /// `workgroupName`
    pub workgroup_name: String,
    /// `durationSeconds`
    pub duration_seconds: i32,
}

/// Issues temporary database credentials from a cloud identity.
///
/// # Object Safety
/// Object-safe so the connector can hold `Arc<dyn CredentialProvider>` and
/// tests can substitute a recording fake.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Issues credentials for a provisioned cluster (`DbUser`, `DbPassword`)
    async fn cluster_credentials(&self, request: &ClusterCredentialsRequest)
    -> Result<Credentials>;

    /// Issues credentials for a serverless workgroup (`dbUser`, `dbPassword`)
    async fn serverless_credentials(
        &self,
        request: &ServerlessCredentialsRequest,
    ) -> Result<Credentials>;
}

/// Provider used when IAM support is not available to the connector.
///
/// Every call fails with `UnsupportedFeature`; non-IAM dialects never reach it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCredentialProvider;

#[async_trait]
impl CredentialProvider for DisabledCredentialProvider {
    async fn cluster_credentials(
        &self,
        _request: &ClusterCredentialsRequest,
    ) -> Result<Credentials> {
        Err(ConnectorError::unsupported_feature(
            "IAM cluster credentials",
            Dialect::RedshiftIam.driver().identifier(),
        ))
    }

    async fn serverless_credentials(
        &self,
        _request: &ServerlessCredentialsRequest,
    ) -> Result<Credentials> {
        Err(ConnectorError::unsupported_feature(
            "IAM serverless credentials",
            Dialect::RedshiftServerlessIam.driver().identifier(),
        ))
    }
}

/// Resolves the credentials a connection for `dialect` should use.
///
/// For IAM dialects the supplied credentials are discarded and replaced by
/// the provider's answer. For every other dialect `supplied` is returned
/// unchanged and the provider is not called.
///
/// # Errors
/// Returns `Configuration` when the cluster identifier or workgroup needed by
/// the dialect is not configured, and propagates any provider error.
pub async fn resolve_iam_credentials(
    provider: &dyn CredentialProvider,
    iam: &IamConfig,
    dialect: Dialect,
    database: &str,
    supplied: Credentials,
) -> Result<Credentials> {
    let Some(flavor) = dialect.iam_flavor() else {
        return Ok(supplied);
    };
    drop(supplied);

    match flavor {
        IamFlavor::Cluster => {
            let cluster_identifier = iam.cluster_identifier.clone().ok_or_else(|| {
                ConnectorError::configuration(format!(
                    "dialect '{}' requires a Redshift cluster identifier",
                    dialect
                ))
            })?;
            let request = ClusterCredentialsRequest {
                db_name: database.to_string(),
                cluster_identifier,
                duration_seconds: IAM_CREDENTIAL_DURATION_SECS,
            };
            tracing::debug!(
                cluster = %request.cluster_identifier,
                database = %request.db_name,
                "Requesting IAM cluster credentials"
            );
            provider.cluster_credentials(&request).await
        }
        IamFlavor::Serverless => {
            let workgroup_name = iam.serverless_workgroup.clone().ok_or_else(|| {
                ConnectorError::configuration(format!(
                    "dialect '{}' requires a Redshift Serverless workgroup",
                    dialect
                ))
            })?;
            let request = ServerlessCredentialsRequest {
                db_name: database.to_string(),
                workgroup_name,
                duration_seconds: IAM_CREDENTIAL_DURATION_SECS,
            };
            tracing::debug!(
                workgroup = %request.workgroup_name,
                database = %request.db_name,
                "Requesting IAM serverless credentials"
            );
            provider.serverless_credentials(&request).await
        }
    }
}
