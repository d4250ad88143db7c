//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::resolve::ContentResolver;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Record lookup backend.
    pub resolver: Arc<dyn ContentResolver>,
}

impl AppState {
    /// Create a new application state from configuration and a resolver.
    pub fn new(config: Config, resolver: Arc<dyn ContentResolver>) -> Self {
        tracing::info!(
            root = %config.root.display(),
            template = %config.template_path().display(),
            "application state initialized"
        );

        Self {
            config: Arc::new(config),
            resolver,
        }
    }
}
