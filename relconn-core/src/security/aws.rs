//! AWS-backed credential provider for the Redshift IAM dialects.
//!
//! Uses the official `aws-sdk-redshift` and `aws-sdk-redshiftserverless`
//! clients. The ambient AWS credential chain (environment, profile, instance
//! role) decides which identity the credentials are issued for.

use super::credentials::Credentials;
use super::iam::{ClusterCredentialsRequest, CredentialProvider, ServerlessCredentialsRequest};
use crate::Result;
use crate::error::ConnectorError;
use async_trait::async_trait;

/// Credential provider calling Redshift and Redshift Serverless.
#[derive(Debug, Clone)]
pub struct AwsCredentialProvider {
    redshift: aws_sdk_redshift::Client,
    serverless: aws_sdk_redshiftserverless::Client,
}

impl AwsCredentialProvider {
    /// Loads the AWS SDK configuration from the environment.
    ///
    /// `region` overrides the region resolved by the default provider chain.
    pub async fn from_env(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            region = ?sdk_config.region().map(ToString::to_string),
            "AWS credential provider initialized"
        );

        Self::from_sdk_config(&sdk_config)
    }

    /// Builds both SDK clients from an already loaded configuration.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            redshift: aws_sdk_redshift::Client::new(sdk_config),
            serverless: aws_sdk_redshiftserverless::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl CredentialProvider for AwsCredentialProvider {
    async fn cluster_credentials(
        &self,
        request: &ClusterCredentialsRequest,
    ) -> Result<Credentials> {
        let output = self
            .redshift
            .get_cluster_credentials_with_iam()
            .db_name(&request.db_name)
            .cluster_identifier(&request.cluster_identifier)
            .duration_seconds(request.duration_seconds)
            .send()
            .await
            .map_err(|e| {
                ConnectorError::credentials_failed(
                    format!(
                        "GetClusterCredentialsWithIAM failed for cluster '{}'",
                        request.cluster_identifier
                    ),
                    e,
                )
            })?;

        let user = output.db_user().ok_or_else(|| {
            ConnectorError::missing_credential_field("GetClusterCredentialsWithIAM", "DbUser")
        })?;
        let password = output.db_password().ok_or_else(|| {
            ConnectorError::missing_credential_field("GetClusterCredentialsWithIAM", "DbPassword")
        })?;

        tracing::info!(
            cluster = %request.cluster_identifier,
            db_user = %user,
            "Issued IAM cluster credentials"
        );

        Ok(Credentials::new(user.to_string(), Some(password.to_string())))
    }

    async fn serverless_credentials(
        &self,
        request: &ServerlessCredentialsRequest,
    ) -> Result<Credentials> {
        let output = self
            .serverless
            .get_credentials()
            .db_name(&request.db_name)
            .workgroup_name(&request.workgroup_name)
            .duration_seconds(request.duration_seconds)
            .send()
            .await
            .map_err(|e| {
                ConnectorError::credentials_failed(
                    format!(
                        "GetCredentials failed for workgroup '{}'",
                        request.workgroup_name
                    ),
                    e,
                )
            })?;

        let user = output
            .db_user()
            .ok_or_else(|| ConnectorError::missing_credential_field("GetCredentials", "dbUser"))?;
        let password = output.db_password().ok_or_else(|| {
            ConnectorError::missing_credential_field("GetCredentials", "dbPassword")
        })?;

        tracing::info!(
            workgroup = %request.workgroup_name,
            db_user = %user,
            "Issued IAM serverless credentials"
        );

        Ok(Credentials::new(user.to_string(), Some(password.to_string())))
    }
}
