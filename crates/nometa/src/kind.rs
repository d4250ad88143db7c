//! Event kind taxonomy: human labels, body derivation rules, kind ranges.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Human label for every kind the previewer knows by name.
pub const KIND_LABELS: &[(u16, &str)] = &[
    (1, "Note"),
    (3, "Contact list"),
    (6, "Repost"),
    (7, "Reaction"),
    (8, "Badge award"),
    (16, "Repost"),
    (1063, "File"),
    (1311, "Chat message"),
    (1984, "Report"),
    (1985, "Label"),
    (9041, "Zap goal"),
    (9735, "Zap"),
    (9802, "Highlight"),
    (10000, "Mute list"),
    (10001, "Pin list"),
    (10003, "Bookmark list"),
    (10004, "Community list"),
    (10005, "Public chat list"),
    (10006, "Blocked relay list"),
    (10007, "Search relay list"),
    (10015, "Interest list"),
    (10030, "Emoji list"),
    (30000, "Profile list"),
    (30001, "List"),
    (30002, "Relay set"),
    (30003, "Bookmark set"),
    (30004, "Curation set"),
    (30008, "Profile badges"),
    (30009, "Badge definition"),
    (30015, "Interest set"),
    (30017, "Stall"),
    (30018, "Product"),
    (30023, "Post"),
    (30024, "Post draft"),
    (30030, "Emoji set"),
    (30311, "Live event"),
    (30315, "Status"),
    (30402, "Classified listing"),
    (30403, "Classified listing draft"),
    (31922, "Calendar event"),
    (31923, "Calendar event"),
    (31924, "Calendar"),
    (31925, "Calendar event RSVP"),
    (31989, "App recommendations"),
    (31990, "App info"),
    (34550, "Community"),
];

static LABELS: LazyLock<HashMap<u16, &'static str>> =
    LazyLock::new(|| KIND_LABELS.iter().copied().collect());

/// Label for a kind, e.g. `"Note"`, or `"Event (31337)"` for unknown kinds.
pub fn kind_label(kind: u16) -> String {
    match LABELS.get(&kind) {
        Some(label) => (*label).to_string(),
        None => format!("Event ({kind})"),
    }
}

/// Short-form text kinds whose content is the preview body.
pub fn is_short_form(kind: u16) -> bool {
    matches!(kind, 1 | 1311)
}

/// Replaceable and parameterized-replaceable kinds, addressed by
/// author + `d` tag + kind rather than by event ID.
pub fn is_addressable(kind: u16) -> bool {
    (10_000..20_000).contains(&kind) || (30_000..40_000).contains(&kind)
}

/// How the preview body of a record is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRule {
    /// Use the record content verbatim.
    Content,
    /// Count tags with any of the given names: `"{count} {noun}"`.
    Count {
        tags: &'static [&'static str],
        noun: &'static str,
    },
    /// First of the `summary`, `description`, `alt` tags.
    Summary,
}

/// List kinds described by how many entries they hold.
const COUNT_RULES: &[(&[u16], &[&str], &str)] = &[
    (&[10000, 30000], &["p"], "profiles"),
    (&[10001, 10003, 30003, 30004], &["e", "a"], "posts"),
    (&[10004], &["a"], "communities"),
    (&[10005], &["e"], "chats"),
    (&[10007, 30002], &["relay"], "relays"),
    (&[10015, 30015], &["t"], "tags"),
    (&[10030, 30030], &["emoji"], "emojis"),
];

/// Tags consulted, in order, by [`BodyRule::Summary`].
pub const SUMMARY_TAGS: &[&str] = &["summary", "description", "alt"];

/// Body rule for a (non-profile) kind.
pub fn body_rule(kind: u16) -> BodyRule {
    if is_short_form(kind) {
        return BodyRule::Content;
    }

    COUNT_RULES
        .iter()
        .find(|(kinds, _, _)| kinds.contains(&kind))
        .map(|&(_, tags, noun)| BodyRule::Count { tags, noun })
        .unwrap_or(BodyRule::Summary)
}

/// Open Graph object type for a kind.
pub fn og_type(kind: u16) -> &'static str {
    match kind {
        0 => "profile",
        30023 | 30024 => "article",
        _ => "website",
    }
}
