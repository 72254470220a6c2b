//! Credential handling.
//!
//! # Module Structure
//! - `credentials`: Secure credential container with automatic memory zeroing
//! - `iam`: IAM credential resolution and the `CredentialProvider` seam
//! - `aws`: AWS SDK provider for Redshift and Redshift Serverless (feature-gated)
//!
//! # Security Guarantees
//! - Credentials are stored in `Zeroizing` containers
//! - IAM-issued passwords are relayed, never persisted
//! - Passwords are redacted from `Debug` output and logs

mod credentials;
mod iam;

#[cfg(feature = "aws-iam")]
mod aws;

pub use credentials::Credentials;
pub use iam::{
    ClusterCredentialsRequest, CredentialProvider, DisabledCredentialProvider,
    IAM_CREDENTIAL_DURATION_SECS, ServerlessCredentialsRequest, resolve_iam_credentials,
};

#[cfg(feature = "aws-iam")]
pub use aws::AwsCredentialProvider;
