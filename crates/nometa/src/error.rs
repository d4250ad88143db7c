//! Error types for the metadata middleware.
//!
//! Most failures in the request path are recovered locally (unknown
//! identifiers fall through to static serving, missing profiles become
//! empty profiles). The errors that do reach a response are answered with
//! a bare 404, matching what a static file server would say.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, MetaError>;

/// Metadata middleware error type.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// The relay client failed to answer a query.
    #[error("resolver error: {0}")]
    Resolver(#[from] nostr_sdk::client::Error),

    /// A key or event reference could not be encoded as NIP-19.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Reading the template or a static file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<nostr::nips::nip19::Error> for MetaError {
    fn from(err: nostr::nips::nip19::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<std::convert::Infallible> for MetaError {
    fn from(err: std::convert::Infallible) -> Self {
        match err {}
    }
}

impl IntoResponse for MetaError {
    fn into_response(self) -> Response {
        match &self {
            Self::Io(err) => tracing::error!(error = %err, "filesystem error"),
            Self::Resolver(err) => tracing::error!(error = %err, "resolver error"),
            Self::Encoding(msg) => tracing::error!(error = %msg, "encoding error"),
            Self::Internal(err) => tracing::error!(error = %err, "internal error"),
        }

        (StatusCode::NOT_FOUND, "Not Found").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_encoding() {
        let err = MetaError::Encoding("bad key".to_string());
        assert_eq!(err.to_string(), "encoding error: bad key");
    }

    #[test]
    fn error_display_io() {
        let err = MetaError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.to_string(), "I/O error: denied");
    }

    #[test]
    fn error_display_internal() {
        let err = MetaError::Internal(anyhow::anyhow!("something broke"));
        assert_eq!(err.to_string(), "internal error: something broke");
    }

    #[test]
    fn error_into_response_is_not_found() {
        let err = MetaError::Io(std::io::Error::other("disk on fire"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn encoding_error_into_response_is_not_found() {
        let err = MetaError::Encoding("x".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
