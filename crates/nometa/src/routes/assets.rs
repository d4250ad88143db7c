//! Static file serving from the document root.

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt as _;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Serve `req` from the document root, falling back to the template for
/// paths with no file behind them.
pub async fn serve(state: &AppState, req: Request) -> Response {
    let path = req.uri().path().to_string();
    if is_hidden(&path) {
        tracing::debug!(path = %path, "refusing dotfile path");
        return not_found();
    }

    let service = ServeDir::new(&state.config.root)
        .fallback(ServeFile::new(state.config.template_path()));
    let response = service
        .oneshot(req)
        .await
        .unwrap_or_else(|never| match never {});

    if response.status().is_server_error() {
        tracing::error!(path = %path, status = %response.status(), "static file error");
        return not_found();
    }

    response.map(Body::new)
}

/// Whether any segment of `path` names a dotfile or dot directory.
fn is_hidden(path: &str) -> bool {
    path.split('/').any(|segment| segment.starts_with('.'))
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
