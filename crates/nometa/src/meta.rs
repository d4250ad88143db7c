//! Preview metadata synthesis.
//!
//! Turns a resolved record and its author's profile into the strings that
//! end up in Open Graph and Twitter Card tags. All the per-kind decisions
//! live here; rendering and splicing only move strings around.

use nostr::nips::nip01::Coordinate;
use nostr::nips::nip19::{Nip19Coordinate, Nip19Event};
use nostr::{EventId, Kind, PublicKey, RelayUrl, ToBech32};

use crate::config::Config;
use crate::error::{MetaError, Result};
use crate::event::{ContentRecord, ProfileMetadata};
use crate::kind::{self, BodyRule};
use crate::links::{self, Link, LinkKind};

/// Maximum length of the derived user name.
const USER_NAME_MAX: usize = 60;

/// Maximum length of the derived body.
const BODY_MAX: usize = 200;

/// Body prefix shown in the HTML title.
const HTML_TITLE_BODY: usize = 60;

/// Structured preview metadata for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub site_name: String,
    pub user_name: String,
    /// Open Graph / Twitter title.
    pub title: String,
    /// Document `<title>`.
    pub html_title: String,
    pub description: String,
    pub canonical_url: String,
    pub og_type: String,
    pub twitter_card_type: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub audios: Vec<String>,
}

impl Metadata {
    fn add_link(&mut self, link: Link) {
        match link.kind {
            LinkKind::Image => self.images.push(link.url),
            LinkKind::Video | LinkKind::Youtube => self.videos.push(link.url),
            LinkKind::Audio => self.audios.push(link.url),
            LinkKind::Url => {}
        }
    }
}

/// Build preview metadata for `record`.
///
/// `profile` is the author's profile (empty if none was found).
///
/// `relay_hint` is the first relay hint of the requested identifier, not
/// the relay that served the record. It is the only relay carried in the
/// canonical `nevent`, so identifiers without hints (`note1...`, or an
/// `nevent` with none) canonicalize to an `nevent` with no relays. Profile
/// and `naddr` links never carry relays.
pub fn synthesize(
    record: &ContentRecord,
    profile: &ProfileMetadata,
    relay_hint: Option<&str>,
    config: &Config,
) -> Result<Metadata> {
    let author = author_key(&record.author)?;
    let npub = author.to_bech32()?;
    let user_name = user_name(profile, &npub);

    let mut meta = Metadata {
        site_name: format!("{user_name} on Nostr"),
        og_type: kind::og_type(record.kind).to_string(),
        ..Default::default()
    };

    if record.kind == 0 {
        meta.title = format!("{user_name} on Nostr ({})", short_key(&npub));
        meta.html_title = meta.title.clone();
        meta.description = profile.about().to_string();
        meta.canonical_url = config.canonical_url(&npub);
        if !profile.picture().is_empty() {
            meta.images.push(profile.picture().to_string());
        }
        meta.twitter_card_type = "summary".to_string();
        meta.user_name = user_name;
        return Ok(meta);
    }

    let label = kind::kind_label(record.kind);
    let header = record.first_tag(&["title", "name"]);
    let derived = match kind::body_rule(record.kind) {
        BodyRule::Content => record.content.clone(),
        BodyRule::Count { tags, noun } => {
            let count: usize = tags.iter().map(|t| record.count_tags(t)).sum();
            format!("{count} {noun}")
        }
        BodyRule::Summary => record.first_tag(kind::SUMMARY_TAGS).to_string(),
    };
    let full_body = if header.is_empty() {
        derived
    } else {
        format!("{header} - {derived}")
    };
    let body = truncate(&full_body, BODY_MAX);

    meta.canonical_url = config.canonical_url(&encode_record(record, author, relay_hint)?);
    meta.title = format!(
        "{label} by {user_name} on Nostr, {}",
        calendar_date(record.created_at)
    );
    meta.html_title = format!("{user_name}: {}...", prefix(&body, HTML_TITLE_BODY));
    meta.description = format!("{label}: {body}");

    let cover = record.first_tag(&["image", "thumb"]);
    if !cover.is_empty() {
        meta.images.push(cover.to_string());
    }

    let link_source = if kind::is_short_form(record.kind) {
        &record.content
    } else {
        &full_body
    };
    for link in links::classify(link_source) {
        meta.add_link(link);
    }

    meta.twitter_card_type = if meta.images.is_empty() {
        "summary"
    } else {
        "summary_large_image"
    }
    .to_string();
    meta.user_name = user_name;

    Ok(meta)
}

fn author_key(hex: &str) -> Result<PublicKey> {
    PublicKey::from_hex(hex).map_err(|e| MetaError::Encoding(format!("author {hex}: {e}")))
}

/// `npub` encoding of a hex public key.
pub fn npub(hex: &str) -> Result<String> {
    Ok(author_key(hex)?.to_bech32()?)
}

/// NIP-19 reference to a non-profile record: `naddr` for addressable
/// kinds, `nevent` otherwise.
fn encode_record(
    record: &ContentRecord,
    author: PublicKey,
    relay_hint: Option<&str>,
) -> Result<String> {
    if kind::is_addressable(record.kind) {
        let coordinate =
            Coordinate::new(Kind::from(record.kind), author).identifier(record.tag("d"));
        return Ok(Nip19Coordinate::new(coordinate, []).to_bech32()?);
    }

    let id = EventId::from_hex(&record.id)
        .map_err(|e| MetaError::Encoding(format!("event {}: {e}", record.id)))?;
    let relays = relay_hint.and_then(|url| RelayUrl::parse(url).ok());
    Ok(Nip19Event::new(id).relays(relays).to_bech32()?)
}

/// Display name for the author, falling back to a shortened npub.
pub fn user_name(profile: &ProfileMetadata, npub: &str) -> String {
    let display_name = profile.display_name();
    let name = profile.name();

    let full = match (display_name.is_empty(), name.is_empty()) {
        (false, false) if display_name == name => display_name.to_string(),
        (false, false) => format!("{display_name} / {name}"),
        (false, true) => display_name.to_string(),
        (true, false) => name.to_string(),
        (true, true) => short_key(npub),
    };

    truncate(&full, USER_NAME_MAX)
}

/// Shorten a bech32 key for display: first 10 + `...` + last 4 chars.
pub fn short_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 14 {
        return key.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Truncate to `max_chars` characters, appending "..." if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}

/// The first `max_chars` characters of `s`.
fn prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

fn calendar_date(created_at: u64) -> String {
    i64::try_from(created_at)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
