//! AWS SDK implementation of [`ServiceStatusSource`].

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ecs::config::Region;
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::Client;
use tracing::instrument;

use crate::config::EcsConfig;

use super::{EcsError, ServiceStatus, ServiceStatusSource};

/// ECS client issuing one `DescribeServices` call per lookup.
///
/// No retries beyond the SDK defaults, no caching: every call is a full round
/// trip to the API.
#[derive(Clone, Debug)]
pub struct EcsStatusClient {
    client: Client,
}

impl EcsStatusClient {
    /// Build a client from the shared AWS configuration chain, pinning the region
    /// when one is configured.
    pub async fn from_config(config: &EcsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            region = ?sdk_config.region(),
            "Initialized ECS client"
        );

        Self::new(Client::new(&sdk_config))
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceStatusSource for EcsStatusClient {
    #[instrument(name = "ecs::describe_service", skip(self))]
    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Option<ServiceStatus>, EcsError> {
        let output = self
            .client
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .map_err(|e| EcsError::DescribeServices(DisplayErrorContext(&e).to_string()))?;

        for failure in output.failures() {
            tracing::debug!(
                arn = failure.arn().unwrap_or_default(),
                reason = failure.reason().unwrap_or_default(),
                "DescribeServices reported a failure"
            );
        }

        Ok(output.services().first().map(ServiceStatus::from))
    }
}
