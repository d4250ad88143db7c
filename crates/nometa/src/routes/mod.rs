//! Route definitions for the metadata middleware.
//!
//! ## Routes
//!
//! - `GET /` and `GET /{*path}`: if the path embeds a NIP-19 identifier,
//!   the template with preview metadata spliced in; otherwise the static
//!   file at that path, or the template when there is none.

mod assets;
mod preview;

use axum::Router;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::identifier;
use crate::state::AppState;

/// Build the complete router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle))
        .route("/{*path}", get(handle))
        .with_state(state)
}

async fn handle(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_string();

    match identifier::decode(&path) {
        Some(identifier) => preview::preview_response(&state, &path, &identifier)
            .await
            .unwrap_or_else(IntoResponse::into_response),
        None => assets::serve(&state, req).await,
    }
}
