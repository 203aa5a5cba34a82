//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use cynomap_lib::{Error as LibError, TrackingError};

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for unknown resources.
pub const PROBLEM_NOT_FOUND: &str = "/problems/not-found";

/// Problem type URI for rejected tracking credentials.
pub const PROBLEM_TRACKING_UNAUTHORIZED: &str = "/problems/tracking-unauthorized";

/// Problem type URI for an unreachable or misbehaving tracking API.
pub const PROBLEM_TRACKING_UNAVAILABLE: &str = "/problems/tracking-unavailable";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for service unavailable (e.g., missing dataset).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use cynomap_service::{ProblemDetails, PROBLEM_INVALID_REQUEST};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_INVALID_REQUEST,
///     "Invalid Request",
///     StatusCode::BAD_REQUEST,
/// )
/// .with_detail("invalid jump range 'abc'")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for unknown paths.
    pub fn not_found(path: &str, request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_NOT_FOUND, "Not Found", StatusCode::NOT_FOUND)
            .with_detail(format!("No map is served at '{path}'"))
            .with_request_id(request_id)
    }

    /// Create a 502 Bad Gateway problem for tracking failures.
    pub fn tracking_failure(error: &TrackingError, request_id: impl Into<String>) -> Self {
        let (type_uri, title) = match error {
            TrackingError::Unauthorized { .. } => {
                (PROBLEM_TRACKING_UNAUTHORIZED, "Tracking Credentials Rejected")
            }
            TrackingError::Unreachable { .. } | TrackingError::MalformedResponse { .. } => {
                (PROBLEM_TRACKING_UNAVAILABLE, "Tracking Unavailable")
            }
        };
        Self::new(type_uri, title, StatusCode::BAD_GATEWAY)
            .with_detail(error.to_string())
            .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::InvalidJumpRange { .. } | LibError::InvalidCredentials { .. } => {
            ProblemDetails::bad_request(error.to_string(), request_id)
        }
        LibError::DatasetNotFound { path } => ProblemDetails::service_unavailable(
            format!("Dataset not available at {}", path.display()),
            request_id,
        ),
        LibError::Tracking(tracking) => ProblemDetails::tracking_failure(tracking, request_id),
        LibError::UnsupportedSchema => {
            ProblemDetails::internal_error("Unsupported dataset schema", request_id)
        }
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_problem_details_bad_request() {
        let problem = ProblemDetails::bad_request("Invalid range", "req-123");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.type_uri, PROBLEM_INVALID_REQUEST);
        assert_eq!(problem.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).expect("serializes");

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"title\":\"Invalid Request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"detail\":\"Test error\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_from_lib_error_invalid_range() {
        let error = LibError::InvalidJumpRange {
            value: "abc".to_string(),
        };
        let problem = from_lib_error(&error, "req-range");

        assert_eq!(problem.status, 400);
        assert!(problem.detail.as_deref().unwrap_or_default().contains("abc"));
    }

    #[test]
    fn test_from_lib_error_dataset_missing() {
        let error = LibError::DatasetNotFound {
            path: PathBuf::from("/data/static_data.db"),
        };
        let problem = from_lib_error(&error, "req-data");

        assert_eq!(problem.status, 503);
        assert_eq!(problem.type_uri, PROBLEM_SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_from_lib_error_tracking_failures() {
        let unauthorized = from_lib_error(
            &LibError::Tracking(TrackingError::Unauthorized { status: 403 }),
            "req-auth",
        );
        assert_eq!(unauthorized.status, 502);
        assert_eq!(unauthorized.type_uri, PROBLEM_TRACKING_UNAUTHORIZED);

        let unreachable = from_lib_error(
            &LibError::Tracking(TrackingError::Unreachable {
                message: "timed out".to_string(),
            }),
            "req-net",
        );
        assert_eq!(unreachable.status, 502);
        assert_eq!(unreachable.type_uri, PROBLEM_TRACKING_UNAVAILABLE);
    }

    #[test]
    fn test_from_lib_error_schema() {
        let problem = from_lib_error(&LibError::UnsupportedSchema, "req-schema");
        assert_eq!(problem.status, 500);
        assert_eq!(problem.type_uri, PROBLEM_INTERNAL_ERROR);
    }
}
