//! nometa - link preview metadata for Nostr single-page apps.
//!
//! Serves a static web app from a document root. When a request path
//! embeds a NIP-19 identifier, the referenced record and its author's
//! profile are fetched from Nostr relays, and Open Graph / Twitter Card
//! tags describing them are spliced into the app's HTML template so that
//! crawlers get a meaningful preview. Every other path is served from disk.
//!
//! # Pipeline
//!
//! - **Identify**: find the first bech32 string in the path and decode it
//! - **Resolve**: query relays for the record, then for the author profile
//! - **Synthesize**: derive titles, description, canonical URL and media
//! - **Splice**: render meta tags with maud and replace the marker region
//!
//! # Template markers
//!
//! ```html
//! <meta name="nometa_start"/>
//! <title>My App</title>
//! <meta name="nometa_end"/>
//! ```
//!
//! Everything between (and including) the markers is replaced. A template
//! without markers is served unchanged.

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod identifier;
pub mod kind;
pub mod links;
pub mod meta;
pub mod render;
pub mod resolve;
pub mod routes;
pub mod state;
pub mod template;

pub use config::Config;
pub use resolve::{ContentResolver, RelayResolver};
pub use routes::router;
pub use state::AppState;
