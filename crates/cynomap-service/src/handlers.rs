//! Map endpoints.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info};

use cynomap_lib::{JumpRange, SvgMode};

use crate::problem::{from_lib_error, ProblemDetails};
use crate::AppState;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

const INDEX_PAGE: &str =
    r#"<iframe src="/cynos.svg" width="600px" height="600px" scrolling="yes"></iframe>"#;

/// Handle GET / with a page embedding the default map.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Handle GET /cynos.svg using the configured default range.
pub async fn default_map(State(state): State<AppState>) -> Response {
    let request_id = generate_request_id();
    let range = state.default_range();
    render(state, range, request_id).await
}

/// Handle GET /{file}, serving `cynos-<range>.svg`.
pub async fn ranged_map(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    let request_id = generate_request_id();

    let Some(raw_range) = range_from_file_name(&file) else {
        return ProblemDetails::not_found(&file, request_id).into_response();
    };

    match raw_range.parse::<JumpRange>() {
        Ok(range) => render(state, range, request_id).await,
        Err(err) => {
            info!(request_id = %request_id, range = raw_range, "rejected jump range");
            from_lib_error(&err, &request_id).into_response()
        }
    }
}

async fn render(state: AppState, range: JumpRange, request_id: String) -> Response {
    info!(request_id = %request_id, range = %range, "handling map request");

    let task = tokio::task::spawn_blocking(move || state.render_svg(range, SvgMode::Standalone));
    match task.await {
        Ok(Ok(svg)) => {
            info!(request_id = %request_id, bytes = svg.len(), "map rendered");
            (StatusCode::OK, [(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response()
        }
        Ok(Err(err)) => {
            error!(request_id = %request_id, error = %err, "map computation failed");
            from_lib_error(&err, &request_id).into_response()
        }
        Err(err) => {
            error!(request_id = %request_id, error = %err, "map task aborted");
            ProblemDetails::internal_error("map computation aborted", request_id).into_response()
        }
    }
}

fn range_from_file_name(file: &str) -> Option<&str> {
    file.strip_prefix("cynos-")?.strip_suffix(".svg")
}

/// Generate a unique request ID for tracing.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();

    format!("req-{:x}", timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_taken_from_the_file_name() {
        assert_eq!(range_from_file_name("cynos-13.svg"), Some("13"));
        assert_eq!(range_from_file_name("cynos-6.5.svg"), Some("6.5"));
        assert_eq!(range_from_file_name("cynos-abc.svg"), Some("abc"));
        assert_eq!(range_from_file_name("cynos.svg"), None);
        assert_eq!(range_from_file_name("map-13.svg"), None);
        assert_eq!(range_from_file_name("cynos-13.png"), None);
    }

    #[test]
    fn request_ids_are_prefixed() {
        assert!(generate_request_id().starts_with("req-"));
    }
}
