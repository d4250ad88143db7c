//! Preview responses for paths carrying a NIP-19 identifier.

use std::time::Instant;

use axum::response::{Html, IntoResponse, Response};

use crate::error::Result;
use crate::identifier::Identifier;
use crate::resolve::{self, Resolved};
use crate::state::AppState;
use crate::{meta, render, template};

/// Serve the template with preview metadata for `identifier` spliced in.
///
/// This is the main entry point for identifier paths. It:
/// 1. Reads the template from the document root
/// 2. Resolves the record and its author's profile from relays
/// 3. Synthesizes preview metadata for the record
/// 4. Renders the meta tags and splices them into the template
///
/// Lookup and synthesis failures degrade to the unmodified template; only
/// a template read failure is an error.
pub async fn preview_response(
    state: &AppState,
    path: &str,
    identifier: &Identifier,
) -> Result<Response> {
    let start = Instant::now();

    // Load the template
    let template = template::load(&state.config).await?;

    // Resolve the record, then the author profile
    let resolved = match resolve::resolve_identifier(
        state.resolver.as_ref(),
        identifier,
        &state.config.default_relays,
    )
    .await
    {
        Ok(Some(resolved)) => resolved,
        Ok(None) => {
            tracing::debug!(identifier = %path, "record not found");
            return Ok(Html(template).into_response());
        }
        Err(e) => {
            tracing::warn!(identifier = %path, error = %e, "record lookup failed");
            return Ok(Html(template).into_response());
        }
    };

    // Build the metadata, with the identifier's first relay hint for event links
    let Resolved { record, profile } = &resolved;
    let relay_hint = identifier.relays().first().map(String::as_str);
    let metadata = match meta::synthesize(record, profile, relay_hint, &state.config) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!(identifier = %path, error = %e, "metadata synthesis failed");
            return Ok(Html(template).into_response());
        }
    };

    // Render and splice into the marker region
    let html = template::splice(&template, &render::render_meta(&metadata));

    tracing::info!(
        identifier = %path,
        kind = record.kind,
        npub = %meta::npub(&record.author).unwrap_or_default(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "rendered preview"
    );

    Ok(Html(html).into_response())
}
