//! Metadata to HTML head fragment.

use maud::{Markup, PreEscaped, html};

use crate::meta::Metadata;

/// Twitter account credited on every card.
const TWITTER_SITE: &str = "@nostrprotocol";

/// Sanitize a dynamic value for use as element text or a quoted attribute.
///
/// Control whitespace becomes spaces, markup is cleaned by ammonia, and
/// double quotes are entity-encoded.
pub fn san(value: &str) -> String {
    let flat = value.replace(['\n', '\r', '\t'], " ");
    ammonia::Builder::default()
        .clean(&flat)
        .to_string()
        .replace('"', "&quot;")
}

/// Render the meta tag block spliced into the template head.
pub fn render_meta(meta: &Metadata) -> String {
    meta_markup(meta).into_string()
}

fn sanitized(value: &str) -> PreEscaped<String> {
    PreEscaped(san(value))
}

fn meta_markup(meta: &Metadata) -> Markup {
    html! {
        title { (sanitized(&meta.html_title)) }
        meta property="og:title" content=(sanitized(&meta.title));
        meta name="twitter:title" content=(sanitized(&meta.title));
        meta name="description" content=(sanitized(&meta.description));
        meta property="og:description" content=(sanitized(&meta.description));
        meta name="twitter:description" content=(sanitized(&meta.description));
        link rel="canonical" href=(sanitized(&meta.canonical_url));
        meta property="og:url" content=(sanitized(&meta.canonical_url));
        meta property="og:type" content=(sanitized(&meta.og_type));
        meta name="twitter:site" content=(TWITTER_SITE);
        meta name="twitter:card" content=(sanitized(&meta.twitter_card_type));
        meta property="og:site_name" content=(sanitized(&meta.site_name));

        @for url in &meta.images {
            meta name="twitter:image" content=(sanitized(url));
            meta name="twitter:image:alt" content=(sanitized(&meta.title));
            meta property="og:image" content=(sanitized(url));
        }
        @for url in &meta.videos {
            meta property="og:video" content=(sanitized(url));
        }
        @for url in &meta.audios {
            meta property="og:audio" content=(sanitized(url));
        }
    }
}
