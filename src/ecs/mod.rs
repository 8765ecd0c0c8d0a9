//! Amazon ECS service status lookups.
//!
//! The status endpoint talks to ECS through the [`ServiceStatusSource`] trait so
//! handlers can be exercised against a mock upstream. [`EcsStatusClient`] is the
//! production implementation backed by the AWS SDK.

mod client;
mod model;

pub use client::EcsStatusClient;
pub use model::ServiceStatus;

use async_trait::async_trait;

/// Error returned when the upstream call itself fails
#[derive(Debug, Clone, thiserror::Error)]
pub enum EcsError {
    /// DescribeServices failed (network, credentials, throttling, region)
    #[error("{0}")]
    DescribeServices(String),
}

/// Something that can describe a single ECS service.
#[async_trait]
pub trait ServiceStatusSource: Send + Sync {
    /// Describe `service` in `cluster`.
    ///
    /// Returns `Ok(None)` when the API answered but reported no matching service.
    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Option<ServiceStatus>, EcsError>;
}
