//! Content records and author profiles as seen by the synthesizer.
//!
//! Records are converted out of `nostr::Event` at the resolver boundary so
//! the synthesis code works on plain hex strings and tag vectors.

use serde::{Deserialize, Deserializer};

/// A resolved Nostr event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    /// Event ID (hex).
    pub id: String,
    /// Author public key (hex).
    pub author: String,
    /// Event kind number.
    pub kind: u16,
    /// Unix timestamp of event creation.
    pub created_at: u64,
    /// Event tags; the first element of each entry is the tag name.
    pub tags: Vec<Vec<String>>,
    /// Raw event content.
    pub content: String,
}

impl ContentRecord {
    /// Value of the first tag named `name`, or `""` when there is none.
    pub fn tag(&self, name: &str) -> &str {
        self.tags
            .iter()
            .find(|t| t.len() > 1 && t[0] == name)
            .map(|t| t[1].as_str())
            .unwrap_or("")
    }

    /// First non-empty value among the named tags, in order.
    pub fn first_tag(&self, names: &[&str]) -> &str {
        names
            .iter()
            .map(|name| self.tag(name))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    /// Number of tags named `name` that carry a value.
    pub fn count_tags(&self, name: &str) -> usize {
        self.tags
            .iter()
            .filter(|t| t.len() > 1 && t[0] == name)
            .count()
    }
}

impl From<nostr::Event> for ContentRecord {
    fn from(event: nostr::Event) -> Self {
        Self {
            id: event.id.to_hex(),
            author: event.pubkey.to_hex(),
            kind: event.kind.as_u16(),
            created_at: event.created_at.as_u64(),
            tags: event
                .tags
                .iter()
                .map(|tag| tag.as_slice().to_vec())
                .collect(),
            content: event.content,
        }
    }
}

/// Parsed profile metadata from kind 0 JSON content.
///
/// Every field is optional; a field holding a non-string JSON value is
/// treated as missing rather than failing the whole profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileMetadata {
    /// Short handle.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// User-facing display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
    /// Short biography.
    #[serde(default, deserialize_with = "lenient_string")]
    pub about: Option<String>,
    /// Profile picture URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub picture: Option<String>,
}

impl ProfileMetadata {
    /// Parse from kind 0 JSON content string.
    pub fn from_json(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }

    /// Metadata of a profile record, or the empty profile when absent.
    pub fn from_record(record: Option<&ContentRecord>) -> Self {
        record
            .map(|r| Self::from_json(&r.content))
            .unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }

    pub fn about(&self) -> &str {
        self.about.as_deref().unwrap_or("")
    }

    pub fn picture(&self) -> &str {
        self.picture.as_deref().unwrap_or("")
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}
