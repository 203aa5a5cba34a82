//! HTTP service rendering cyno maps.
//!
//! Thin axum layer over `cynomap-lib`: each map request computes a fresh map
//! on a blocking thread and returns it as a standalone SVG document.
//!
//! # Endpoints
//!
//! - `GET /` - HTML page embedding the default map
//! - `GET /cynos.svg` - map for the configured default range
//! - `GET /cynos-<range>.svg` - map for an explicit range in light-years
//! - `GET /health/live` - liveness probe
//! - `GET /health/ready` - readiness probe
//!
//! Failures are returned as RFC 9457 Problem Details.

#![deny(warnings)]

mod config;
mod handlers;
mod health;
pub mod logging;
mod problem;
mod state;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use config::ServiceConfig;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_NOT_FOUND, PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_TRACKING_UNAUTHORIZED,
    PROBLEM_TRACKING_UNAVAILABLE,
};
pub use state::AppState;

/// Build the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/cynos.svg", get(handlers::default_map))
        .route("/{file}", get(handlers::ranged_map))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
