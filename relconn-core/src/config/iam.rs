//! IAM settings for the Redshift dialects.

use serde::{Deserialize, Serialize};

/// Environment variable holding the provisioned cluster identifier
pub const CLUSTER_IDENTIFIER_ENV: &str = "REDSHIFT_CLUSTER_IDENTIFIER";
/// Environment variable holding the serverless workgroup name
pub const SERVERLESS_WORKGROUP_ENV: &str = "REDSHIFT_SERVERLESS_WORKGROUP";
/// Environment variable overriding the AWS region
pub const REGION_ENV: &str = "AWS_REGION";

/// Targets for IAM credential issuance.
///
/// Passed explicitly into credential resolution; nothing in the connector
/// reads the environment on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IamConfig {
    /// `ClusterIdentifier` for `redshift-iam`
    pub cluster_identifier: Option<String>,
    /// `workgroupName` for `redshift-serverless-iam`
    pub serverless_workgroup: Option<String>,
    /// AWS region override for the SDK clients
    pub region: Option<String>,
}

impl IamConfig {
    /// Reads the IAM targets from the process environment.
    ///
    /// Unset or empty variables leave the field as `None`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the IAM targets through `lookup`, skipping empty values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            cluster_identifier: read(CLUSTER_IDENTIFIER_ENV),
            serverless_workgroup: read(SERVERLESS_WORKGROUP_ENV),
            region: read(REGION_ENV),
        }
    }

    /// Builder method to set the cluster identifier.
    pub fn with_cluster_identifier(mut self, cluster_identifier: impl Into<String>) -> Self {
        self.cluster_identifier = Some(cluster_identifier.into());
        self
    }

    /// Builder method to set the serverless workgroup.
    pub fn with_serverless_workgroup(mut self, workgroup: impl Into<String>) -> Self {
        self.serverless_workgroup = Some(workgroup.into());
        self
    }

    /// Builder method to set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}
