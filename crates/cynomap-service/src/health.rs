//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Whether the static dataset file is present (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_available: Option<bool>,

    /// Whether tracking credentials are configured (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_configured: Option<bool>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            dataset_available: None,
            tracking_configured: None,
        }
    }

    pub fn ready(service: &str, version: &str, tracking_configured: bool) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            dataset_available: Some(true),
            tracking_configured: Some(tracking_configured),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            dataset_available: Some(false),
            tracking_configured: None,
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"cynomap-service","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Ready once the static dataset file is present. Tracking credentials are
/// optional; without them maps are served without presence.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    if !state.dataset_available() {
        let status = HealthStatus::not_ready(service, version, "dataset missing");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, state.has_credentials());
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert!(status.dataset_available.is_none());
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("test-service", "1.0.0", "dataset missing");
        assert!(status.status.starts_with("not_ready:"));
        assert_eq!(status.dataset_available, Some(false));
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("cynomap-service", "0.1.0");
        let json = serde_json::to_string(&status).expect("serializes");
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("dataset_available"));
    }
}
