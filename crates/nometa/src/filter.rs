//! Resolver queries built from decoded identifiers.

use nostr::{EventId, Filter, Kind, PublicKey};

use crate::identifier::Identifier;

/// Event constraints sent to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub kinds: Vec<u16>,
    pub authors: Vec<PublicKey>,
    pub ids: Vec<EventId>,
    /// Required `d` tag value, for addressable events.
    pub d_tag: Option<String>,
}

impl EventFilter {
    /// Convert to a relay filter asking for a single event.
    pub fn to_nostr(&self) -> Filter {
        let mut filter = Filter::new().limit(1);
        if !self.kinds.is_empty() {
            filter = filter.kinds(self.kinds.iter().map(|k| Kind::from(*k)));
        }
        if !self.authors.is_empty() {
            filter = filter.authors(self.authors.iter().copied());
        }
        if !self.ids.is_empty() {
            filter = filter.ids(self.ids.iter().copied());
        }
        if let Some(d_tag) = &self.d_tag {
            filter = filter.identifier(d_tag.clone());
        }
        filter
    }
}

/// A filter plus the relays to send it to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub filter: EventFilter,
    /// Identifier hints first, then the default relays; no duplicates.
    pub relays: Vec<String>,
}

impl Query {
    /// Build the content query for a decoded identifier.
    pub fn for_identifier(identifier: &Identifier, default_relays: &[String]) -> Self {
        let filter = match identifier {
            Identifier::Npub { pubkey } | Identifier::Nprofile { pubkey, .. } => EventFilter {
                kinds: vec![0],
                authors: vec![*pubkey],
                ..Default::default()
            },
            Identifier::Note { id } | Identifier::Nevent { id, .. } => EventFilter {
                ids: vec![*id],
                ..Default::default()
            },
            Identifier::Naddr {
                pubkey,
                identifier,
                kind,
                ..
            } => EventFilter {
                kinds: vec![*kind],
                authors: vec![*pubkey],
                d_tag: Some(identifier.clone()),
                ..Default::default()
            },
        };

        Self {
            filter,
            relays: relay_union(identifier.relays(), default_relays),
        }
    }

    /// Query for the latest profile of `author` over the same relays.
    pub fn profile(author: PublicKey, relays: &[String]) -> Self {
        Self {
            filter: EventFilter {
                kinds: vec![0],
                authors: vec![author],
                ..Default::default()
            },
            relays: relays.to_vec(),
        }
    }
}

fn relay_union(hints: &[String], defaults: &[String]) -> Vec<String> {
    let mut relays: Vec<String> = Vec::with_capacity(hints.len() + defaults.len());
    for relay in hints.iter().chain(defaults) {
        if !relays.contains(relay) {
            relays.push(relay.clone());
        }
    }
    relays
}
