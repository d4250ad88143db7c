//! Record resolution over Nostr relays.
//!
//! [`ContentResolver`] is the seam between request handling and the
//! network: handlers only hand it a [`Query`] and get back at most one
//! record. [`RelayResolver`] is the production implementation backed by a
//! shared `nostr_sdk::Client`.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use nostr::PublicKey;
use nostr_sdk::{Client, ClientOptions, RelayPoolOptions};

use crate::config::Config;
use crate::error::Result;
use crate::event::{ContentRecord, ProfileMetadata};
use crate::filter::Query;
use crate::identifier::Identifier;

/// Fetches the newest record matching a query.
pub trait ContentResolver: Send + Sync {
    /// Resolve `query`, returning `Ok(None)` when no relay has a match.
    fn resolve<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, Result<Option<ContentRecord>>>;
}

/// Relays that may be in the pool at once beyond the defaults.
const MAX_TRANSIENT_RELAYS: usize = 16;

/// Resolver that queries Nostr relays through a connection pool.
///
/// Default relays stay in the pool for the life of the process. Hint
/// relays named by a request are added for that request only and removed
/// once its fetch finishes.
pub struct RelayResolver {
    client: Client,
    timeout: Duration,
}

impl RelayResolver {
    /// Create the client, add the default relays and start connecting.
    pub async fn connect(config: &Config) -> Self {
        // Defaults plus a bounded number of per-request hint relays
        let max_relays = config.default_relays.len() + MAX_TRANSIENT_RELAYS;
        let pool_opts = RelayPoolOptions::default().max_relays(Some(max_relays));
        let client = Client::builder()
            .opts(ClientOptions::new().pool(pool_opts))
            .build();

        for relay_url in &config.default_relays {
            if let Err(e) = client.add_relay(relay_url).await {
                tracing::warn!(relay = %relay_url, error = %e, "failed to add default relay");
            } else {
                tracing::debug!(relay = %relay_url, "added default relay");
            }
        }

        client.connect().await;

        tracing::info!(
            relays = config.default_relays.len(),
            max_relays,
            timeout_secs = config.fetch_timeout.as_secs(),
            "relay resolver initialized"
        );

        Self {
            client,
            timeout: config.fetch_timeout,
        }
    }

    /// Make sure every relay in `urls` is in the pool.
    ///
    /// Returns the relays that can be queried and, separately, the ones
    /// this call added, which the caller must release.
    async fn ensure_relays(&self, urls: &[String]) -> (Vec<String>, Vec<String>) {
        let mut usable = Vec::with_capacity(urls.len());
        let mut added = Vec::new();
        for url in urls {
            match self.client.add_relay(url).await {
                Ok(true) => {
                    added.push(url.clone());
                    if let Err(e) = self.client.connect_relay(url).await {
                        tracing::warn!(relay = %url, error = %e, "failed to connect hint relay");
                        continue;
                    }
                    tracing::debug!(relay = %url, "added hint relay");
                    usable.push(url.clone());
                }
                Ok(false) => usable.push(url.clone()),
                Err(e) => {
                    tracing::warn!(relay = %url, error = %e, "skipping unusable relay");
                }
            }
        }
        (usable, added)
    }

    /// Drop relays added for a single query from the pool.
    async fn release_relays(&self, urls: &[String]) {
        for url in urls {
            if let Err(e) = self.client.force_remove_relay(url).await {
                tracing::warn!(relay = %url, error = %e, "failed to remove hint relay");
            } else {
                tracing::debug!(relay = %url, "removed hint relay");
            }
        }
    }
}

impl ContentResolver for RelayResolver {
    fn resolve<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, Result<Option<ContentRecord>>> {
        async move {
            let (relays, added) = self.ensure_relays(&query.relays).await;
            if relays.is_empty() {
                tracing::warn!("no usable relays for query");
                self.release_relays(&added).await;
                return Ok(None);
            }

            let fetched = self
                .client
                .fetch_events_from(relays, query.filter.to_nostr(), self.timeout)
                .await;

            // Hint relays are released whether or not the fetch succeeded
            self.release_relays(&added).await;

            Ok(fetched?.into_iter().next().map(ContentRecord::from))
        }
        .boxed()
    }
}

/// A resolved record together with its author's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub record: ContentRecord,
    pub profile: ProfileMetadata,
}

/// Resolve the record named by `identifier` and its author's profile.
///
/// Returns `Ok(None)` when the record is not found. A failed or empty
/// profile lookup yields an empty profile rather than an error.
pub async fn resolve_identifier(
    resolver: &dyn ContentResolver,
    identifier: &Identifier,
    default_relays: &[String],
) -> Result<Option<Resolved>> {
    let query = Query::for_identifier(identifier, default_relays);

    let Some(record) = resolver.resolve(&query).await? else {
        return Ok(None);
    };

    let profile = if record.kind == 0 {
        ProfileMetadata::from_json(&record.content)
    } else {
        author_profile(resolver, &record.author, &query.relays).await
    };

    Ok(Some(Resolved { record, profile }))
}

async fn author_profile(
    resolver: &dyn ContentResolver,
    author: &str,
    relays: &[String],
) -> ProfileMetadata {
    let author = match PublicKey::from_hex(author) {
        Ok(pk) => pk,
        Err(e) => {
            tracing::warn!(author = %author, error = %e, "invalid author key");
            return ProfileMetadata::default();
        }
    };

    match resolver.resolve(&Query::profile(author, relays)).await {
        Ok(record) => ProfileMetadata::from_record(record.as_ref()),
        Err(e) => {
            tracing::warn!(author = %author, error = %e, "profile lookup failed");
            ProfileMetadata::default()
        }
    }
}
