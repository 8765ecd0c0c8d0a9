//! The status value object returned by `/ecs-status`.

use aws_sdk_ecs::primitives::DateTime as AwsDateTime;
use aws_sdk_ecs::types::Service;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Deployment status ECS assigns to the deployment currently being rolled out
const PRIMARY_DEPLOYMENT: &str = "PRIMARY";

/// Snapshot of one ECS service, built per request and discarded after serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub service_name: String,
    /// ACTIVE, DRAINING, INACTIVE, ... passed through verbatim
    pub status: String,
    pub running_count: u32,
    pub pending_count: u32,
    pub desired_count: u32,
    pub task_definition: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub platform_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_type: Option<String>,
}

impl From<&Service> for ServiceStatus {
    fn from(service: &Service) -> Self {
        // The primary deployment carries the most recent update time; fall back
        // to whichever deployment is listed first.
        let deployments = service.deployments();
        let updated_at = deployments
            .iter()
            .find(|d| d.status() == Some(PRIMARY_DEPLOYMENT))
            .or_else(|| deployments.first())
            .and_then(|d| d.updated_at())
            .and_then(to_chrono);

        Self {
            service_name: service.service_name().unwrap_or_default().to_string(),
            status: service.status().unwrap_or_default().to_string(),
            running_count: clamp_count(service.running_count()),
            pending_count: clamp_count(service.pending_count()),
            desired_count: clamp_count(service.desired_count()),
            task_definition: service.task_definition().unwrap_or_default().to_string(),
            created_at: service.created_at().and_then(to_chrono),
            updated_at,
            platform_version: service.platform_version().map(str::to_string),
            launch_type: service.launch_type().map(|lt| lt.as_str().to_string()),
        }
    }
}

/// Counts are reported as i32 by the API; negative values never make sense here.
fn clamp_count(count: i32) -> u32 {
    u32::try_from(count).unwrap_or(0)
}

fn to_chrono(dt: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}
