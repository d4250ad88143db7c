//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// Placeholder replaced by the encoded identifier in [`Config::url_template`].
pub const URL_PLACEHOLDER: &str = "<bech32>";

/// Relays every query is sent to, in addition to any identifier hints.
pub const DEFAULT_RELAYS: &[&str] = &[
    "wss://relay.nostr.band",
    "wss://nos.lol",
    "wss://relay.damus.io",
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Document root that static files and the template are served from.
    pub root: PathBuf,

    /// Template file name, relative to `root`.
    pub template_file: String,

    /// Canonical URL template; [`URL_PLACEHOLDER`] is replaced by the
    /// NIP-19 encoding of the previewed entity.
    /// e.g., "https://njump.me/<bech32>"
    pub url_template: String,

    /// Relays queried for every request.
    pub default_relays: Vec<String>,

    /// Upper bound on a single resolver round trip.
    pub fetch_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PORT`: Listen port (default: 8080)
    /// - `NOMETA_ROOT`: Document root (default: "./public")
    /// - `NOMETA_FILE`: Template file relative to the root (default: "index.html")
    /// - `NOMETA_URL_TMPL`: Canonical URL template (default: "https://njump.me/<bech32>")
    /// - `NOMETA_RELAYS`: Comma-separated default relays
    /// - `NOMETA_FETCH_TIMEOUT_SECS`: Resolver timeout in seconds (default: 10)
    pub fn from_env() -> anyhow::Result<Self> {
        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{raw}'"))?,
            Err(_) => 8080,
        };
        let bind_addr = format!("0.0.0.0:{port}");

        let root = PathBuf::from(
            std::env::var("NOMETA_ROOT").unwrap_or_else(|_| "./public".to_string()),
        );

        let template_file = std::env::var("NOMETA_FILE")
            .unwrap_or_else(|_| "index.html".to_string())
            .trim_start_matches('/')
            .to_string();

        let url_template = std::env::var("NOMETA_URL_TMPL")
            .unwrap_or_else(|_| format!("https://njump.me/{URL_PLACEHOLDER}"));
        if !url_template.contains(URL_PLACEHOLDER) {
            tracing::warn!(
                url_template = %url_template,
                "canonical URL template has no {URL_PLACEHOLDER} placeholder"
            );
        }

        let mut default_relays: Vec<String> = Vec::new();
        match std::env::var("NOMETA_RELAYS") {
            Ok(raw) => {
                for relay in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    if !default_relays.iter().any(|r| r == relay) {
                        default_relays.push(relay.to_string());
                    }
                }
            }
            Err(_) => default_relays.extend(DEFAULT_RELAYS.iter().map(|s| s.to_string())),
        }

        let fetch_timeout = match std::env::var("NOMETA_FETCH_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("NOMETA_FETCH_TIMEOUT_SECS must be an integer, got '{raw}'")
                })?;
                anyhow::ensure!(secs > 0, "NOMETA_FETCH_TIMEOUT_SECS must be positive");
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(10),
        };

        tracing::info!(
            bind_addr = %bind_addr,
            root = %root.display(),
            template_file = %template_file,
            url_template = %url_template,
            relay_count = default_relays.len(),
            fetch_timeout_secs = fetch_timeout.as_secs(),
            "nometa configuration loaded"
        );

        Ok(Self {
            bind_addr,
            root,
            template_file,
            url_template,
            default_relays,
            fetch_timeout,
        })
    }

    /// Full path of the template file.
    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.template_file)
    }

    /// Substitute an encoded identifier into the canonical URL template.
    pub fn canonical_url(&self, bech32: &str) -> String {
        self.url_template.replace(URL_PLACEHOLDER, bech32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "PORT",
        "NOMETA_ROOT",
        "NOMETA_FILE",
        "NOMETA_URL_TMPL",
        "NOMETA_RELAYS",
        "NOMETA_FETCH_TIMEOUT_SECS",
    ];

    /// Helper to run config tests with isolated env vars.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:8080");
            assert_eq!(config.root, PathBuf::from("./public"));
            assert_eq!(config.template_file, "index.html");
            assert_eq!(config.url_template, "https://njump.me/<bech32>");
            assert_eq!(config.default_relays, DEFAULT_RELAYS);
            assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("PORT", "3000"),
                ("NOMETA_ROOT", "/srv/www"),
                ("NOMETA_FILE", "app.html"),
                ("NOMETA_URL_TMPL", "https://example.com/e/<bech32>"),
                ("NOMETA_RELAYS", "wss://a.example, wss://b.example"),
                ("NOMETA_FETCH_TIMEOUT_SECS", "3"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "0.0.0.0:3000");
                assert_eq!(config.root, PathBuf::from("/srv/www"));
                assert_eq!(config.template_file, "app.html");
                assert_eq!(config.url_template, "https://example.com/e/<bech32>");
                assert_eq!(
                    config.default_relays,
                    vec!["wss://a.example".to_string(), "wss://b.example".to_string()]
                );
                assert_eq!(config.fetch_timeout, Duration::from_secs(3));
            },
        );
    }

    #[test]
    fn config_template_leading_slash_stripped() {
        with_env_vars(
            &[("NOMETA_ROOT", "/srv/www"), ("NOMETA_FILE", "/index.html")],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.template_file, "index.html");
                assert_eq!(config.template_path(), PathBuf::from("/srv/www/index.html"));
            },
        );
    }

    #[test]
    fn config_relays_deduplicated_and_blank_skipped() {
        with_env_vars(&[("NOMETA_RELAYS", "wss://a, ,wss://a,,wss://b")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.default_relays, vec!["wss://a", "wss://b"]);
        });
    }

    #[test]
    fn config_invalid_port_rejected() {
        with_env_vars(&[("PORT", "eighty")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn config_zero_timeout_rejected() {
        with_env_vars(&[("NOMETA_FETCH_TIMEOUT_SECS", "0")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn config_template_without_placeholder_accepted() {
        with_env_vars(&[("NOMETA_URL_TMPL", "https://example.com/")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.canonical_url("npub1xyz"), "https://example.com/");
        });
    }

    #[test]
    fn canonical_url_substitutes_placeholder() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(
                config.canonical_url("note1abc"),
                "https://njump.me/note1abc"
            );
        });
    }
}
