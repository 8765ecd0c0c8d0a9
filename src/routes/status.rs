//! ECS status proxy endpoint.
//!
//! One `DescribeServices` round trip per request. No retries and no caching
//! between polls; overlapping polls each hit the API.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::instrument;

use crate::config::EcsConfig;
use crate::ecs::{ServiceStatus, ServiceStatusSource};
use crate::error::AppError;

/// State for the status route, only built when a status source is configured.
#[derive(Clone)]
pub struct StatusState {
    pub source: Arc<dyn ServiceStatusSource>,
    pub ecs: EcsConfig,
}

#[instrument(
    name = "status::ecs_status",
    skip(state),
    fields(cluster = %state.ecs.cluster, service = %state.ecs.service)
)]
pub async fn ecs_status(State(state): State<StatusState>) -> Result<Json<ServiceStatus>, AppError> {
    let ecs = &state.ecs;

    match state.source.describe_service(&ecs.cluster, &ecs.service).await {
        Ok(Some(status)) => {
            tracing::debug!(
                status = %status.status,
                running = status.running_count,
                desired = status.desired_count,
                "Fetched ECS service status"
            );
            Ok(Json(status))
        }
        Ok(None) => Err(AppError::ServiceNotFound {
            cluster: ecs.cluster.clone(),
            service: ecs.service.clone(),
        }),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching ECS status");
            Err(AppError::Upstream {
                service_name: ecs.service.clone(),
                source: e,
            })
        }
    }
}
