use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::ecs::EcsError;

/// Status string reported in the fallback payload when ECS cannot be reached
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

const UPSTREAM_ERROR: &str = "Failed to fetch ECS status";
const FALLBACK_MESSAGE: &str = "Unable to retrieve service status";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Service not found")]
    ServiceNotFound { cluster: String, service: String },

    #[error("Failed to fetch ECS status: {source}")]
    Upstream { service_name: String, source: EcsError },

    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct UpstreamErrorBody {
    error: &'static str,
    message: String,
    fallback: FallbackStatus,
}

/// Minimal status the page can still render when the lookup failed
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FallbackStatus {
    service_name: String,
    status: &'static str,
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ServiceNotFound {
                ref cluster,
                ref service,
            } => {
                tracing::warn!(%cluster, %service, "ECS service not found");
                let body = ErrorBody {
                    error: self.to_string(),
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            AppError::Upstream {
                service_name,
                source,
            } => {
                let body = UpstreamErrorBody {
                    error: UPSTREAM_ERROR,
                    message: source.to_string(),
                    fallback: FallbackStatus {
                        service_name,
                        status: UNKNOWN_STATUS,
                        message: FALLBACK_MESSAGE,
                    },
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            AppError::Template(_) => {
                tracing::error!("Internal error: {:?}", self);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = format!(
                    r#"<!DOCTYPE html>
<html>
<head>
    <title>Error {}</title>
</head>
<body>
    <h1>Error {}</h1>
    <p>Internal server error</p>
</body>
</html>"#,
                    status.as_u16(),
                    status.as_u16(),
                );
                (status, Html(body)).into_response()
            }
        }
    }
}
