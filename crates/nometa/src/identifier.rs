//! NIP-19 identifier detection.
//!
//! Scans a request path for an embedded bech32 string and demultiplexes it
//! into one of the entity types the previewer can resolve. Anything else
//! (no match, bad checksum, secret keys) yields `None` so the caller can
//! fall through to static file serving.

use std::sync::LazyLock;

use nostr::nips::nip19::{FromBech32, Nip19};
use nostr::{EventId, PublicKey};
use regex::Regex;

/// Generic bech32 shape: human-readable part, `1` separator, data + checksum.
static BECH32_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z0-9]{1,83}1[qpzry9x8gf2tvdw0s3jn54khce6mua7l]{6,}")
        .expect("bech32 regex should compile")
});

/// A decoded NIP-19 entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// `npub1...` - bare public key.
    Npub { pubkey: PublicKey },
    /// `note1...` - bare event ID.
    Note { id: EventId },
    /// `nprofile1...` - public key with relay hints.
    Nprofile {
        pubkey: PublicKey,
        relays: Vec<String>,
    },
    /// `nevent1...` - event ID with relay hints.
    Nevent { id: EventId, relays: Vec<String> },
    /// `naddr1...` - replaceable event coordinate.
    Naddr {
        pubkey: PublicKey,
        identifier: String,
        kind: u16,
        relays: Vec<String>,
    },
}

impl Identifier {
    /// Relay hints carried by the identifier.
    pub fn relays(&self) -> &[String] {
        match self {
            Self::Npub { .. } | Self::Note { .. } => &[],
            Self::Nprofile { relays, .. }
            | Self::Nevent { relays, .. }
            | Self::Naddr { relays, .. } => relays,
        }
    }
}

/// Find and decode the first bech32 identifier in `path`.
pub fn decode(path: &str) -> Option<Identifier> {
    let candidate = BECH32_REGEX.find(path)?.as_str();

    let nip19 = match Nip19::from_bech32(candidate) {
        Ok(nip19) => nip19,
        Err(e) => {
            tracing::debug!(candidate = %candidate, error = %e, "not a NIP-19 identifier");
            return None;
        }
    };

    match nip19 {
        Nip19::Pubkey(pubkey) => Some(Identifier::Npub { pubkey }),
        Nip19::EventId(id) => Some(Identifier::Note { id }),
        Nip19::Profile(profile) => Some(Identifier::Nprofile {
            pubkey: profile.public_key,
            relays: profile.relays.iter().map(|r| r.to_string()).collect(),
        }),
        Nip19::Event(event) => Some(Identifier::Nevent {
            id: event.event_id,
            relays: event.relays.iter().map(|r| r.to_string()).collect(),
        }),
        Nip19::Coordinate(coord) => Some(Identifier::Naddr {
            pubkey: coord.coordinate.public_key,
            identifier: coord.coordinate.identifier.clone(),
            kind: coord.coordinate.kind.as_u16(),
            relays: coord.relays.iter().map(|r| r.to_string()).collect(),
        }),
        _ => {
            tracing::debug!(candidate = %candidate, "unsupported NIP-19 entity");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr::nips::nip01::Coordinate;
    use nostr::nips::nip19::{Nip19Coordinate, Nip19Event, Nip19Profile};
    use nostr::{Keys, Kind, RelayUrl, ToBech32};

    const PUBKEY_HEX: &str = "82341f882b6eabcd2ba7f1ef90aad961cf074af15b9ef44a09f9d2a8fbfbe6a2";
    const EVENT_HEX: &str = "a84c5de86efc2ec2cff7bad077c4171e09146b633b7ad117fffe088d9579ac33";

    fn pubkey() -> PublicKey {
        PublicKey::from_hex(PUBKEY_HEX).unwrap()
    }

    #[test]
    fn npub_at_path_root() {
        let npub = pubkey().to_bech32().unwrap();
        let decoded = decode(&format!("/{npub}"));
        assert_eq!(decoded, Some(Identifier::Npub { pubkey: pubkey() }));
    }

    #[test]
    fn npub_embedded_deep_in_path() {
        let npub = pubkey().to_bech32().unwrap();
        let decoded = decode(&format!("/p/{npub}/notes"));
        match decoded {
            Some(Identifier::Npub { pubkey }) => assert_eq!(pubkey.to_hex(), PUBKEY_HEX),
            other => panic!("Expected Npub, got {other:?}"),
        }
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let npub = pubkey().to_bech32().unwrap();
        let mut corrupted = npub.clone();
        let last = corrupted.pop().unwrap();
        corrupted.push(if last == 'q' { 'p' } else { 'q' });
        assert_ne!(corrupted, npub);
        assert_eq!(decode(&format!("/{corrupted}")), None);
    }

    #[test]
    fn note_decodes() {
        let id = EventId::from_hex(EVENT_HEX).unwrap();
        let note = id.to_bech32().unwrap();
        assert_eq!(decode(&format!("/{note}")), Some(Identifier::Note { id }));
    }

    #[test]
    fn nevent_keeps_relay_hints() {
        let id = EventId::from_hex(EVENT_HEX).unwrap();
        let relay = RelayUrl::parse("wss://relay.example.com").unwrap();
        let nevent = Nip19Event::new(id).relays([relay]).to_bech32().unwrap();

        match decode(&format!("/{nevent}")) {
            Some(Identifier::Nevent { id: decoded, relays }) => {
                assert_eq!(decoded, id);
                assert_eq!(relays.len(), 1);
                assert!(relays[0].starts_with("wss://relay.example.com"));
            }
            other => panic!("Expected Nevent, got {other:?}"),
        }
    }

    #[test]
    fn nprofile_decodes() {
        let nprofile = Nip19Profile::new(pubkey(), []).to_bech32().unwrap();
        match decode(&format!("/{nprofile}")) {
            Some(Identifier::Nprofile { pubkey: pk, relays }) => {
                assert_eq!(pk, pubkey());
                assert!(relays.is_empty());
            }
            other => panic!("Expected Nprofile, got {other:?}"),
        }
    }

    #[test]
    fn naddr_decodes_coordinate() {
        let coordinate = Coordinate::new(Kind::from(30023), pubkey()).identifier("my-article");
        let naddr = Nip19Coordinate::new(coordinate, []).to_bech32().unwrap();

        match decode(&format!("/a/{naddr}")) {
            Some(Identifier::Naddr {
                pubkey: pk,
                identifier,
                kind,
                relays,
            }) => {
                assert_eq!(pk, pubkey());
                assert_eq!(identifier, "my-article");
                assert_eq!(kind, 30023);
                assert!(relays.is_empty());
            }
            other => panic!("Expected Naddr, got {other:?}"),
        }
    }

    #[test]
    fn secret_key_is_not_previewed() {
        let nsec = Keys::generate().secret_key().to_bech32().unwrap();
        assert_eq!(decode(&format!("/{nsec}")), None);
    }

    #[test]
    fn plain_paths_have_no_identifier() {
        assert_eq!(decode("/"), None);
        assert_eq!(decode("/index.html"), None);
        assert_eq!(decode("/assets/app.js"), None);
    }

    #[test]
    fn garbage_bech32_rejected() {
        assert_eq!(decode("/npub1invalidchecksum"), None);
    }

    #[test]
    fn only_first_candidate_considered() {
        let npub = pubkey().to_bech32().unwrap();
        // The leading candidate fails its checksum, so the valid npub after it is never tried.
        assert_eq!(decode(&format!("/npub1qqqqqqqq/{npub}")), None);
    }

    #[test]
    fn relays_accessor() {
        let ident = Identifier::Nevent {
            id: EventId::from_hex(EVENT_HEX).unwrap(),
            relays: vec!["wss://r".to_string()],
        };
        assert_eq!(ident.relays(), ["wss://r".to_string()]);
        assert!(Identifier::Npub { pubkey: pubkey() }.relays().is_empty());
    }
}
