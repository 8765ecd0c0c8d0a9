//! Health check endpoint for container orchestration.
//!
//! Liveness check only: it reports that the process can answer HTTP and never
//! touches ECS.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// ISO-8601 UTC time of the check, millisecond precision
    pub timestamp: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn test_health_reports_healthy_with_timestamp() {
        let Json(body) = health().await;

        assert_eq!(body.status, "healthy");
        assert!(body.timestamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }
}
