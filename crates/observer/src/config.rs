//! Observer configuration from environment variables
//!
//! Every variable is optional. Empty values count as unset so a blank line
//! in `.env` falls back to the default instead of failing to parse.

use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::application::services::DEFAULT_POLL_INTERVAL_MS;
use crate::infrastructure::http_client::{DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::infrastructure::websocket::DEFAULT_RECONNECT_DELAY_MS;
use crate::state::DEFAULT_HERALD_TTL_MS;

pub const DEFAULT_WS_URL: &str = "ws://localhost:3301";

pub const ENV_API_URL: &str = "NULLVIEW_API_URL";
pub const ENV_WS_URL: &str = "NULLVIEW_WS_URL";
pub const ENV_RECONNECT_DELAY_MS: &str = "NULLVIEW_RECONNECT_DELAY_MS";
pub const ENV_HERALD_TTL_MS: &str = "NULLVIEW_HERALD_TTL_MS";
pub const ENV_FEED_PAGE_SIZE: &str = "NULLVIEW_FEED_PAGE_SIZE";
pub const ENV_POLL_INTERVAL_MS: &str = "NULLVIEW_POLL_INTERVAL_MS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "NULLVIEW_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} is not a usable URL: {reason}")]
    InvalidUrl { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverConfig {
    /// Simulation Service base URL, without the `/api` suffix
    pub api_url: String,
    /// Live event source base URL, without the `/ws/{id}` suffix
    pub ws_url: String,
    pub reconnect_delay: Duration,
    pub herald_ttl: Duration,
    pub feed_page_size: u32,
    pub poll_interval: Duration,
    pub http_timeout_secs: u64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
            herald_ttl: Duration::from_millis(DEFAULT_HERALD_TTL_MS),
            feed_page_size: nullview_shared::DEFAULT_FEED_PAGE_SIZE,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl ObserverConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let api_url = match get(ENV_API_URL) {
            Some(raw) => validated_url(ENV_API_URL, &raw, &["http", "https"])?,
            None => defaults.api_url,
        };
        let ws_url = match get(ENV_WS_URL) {
            Some(raw) => validated_url(ENV_WS_URL, &raw, &["ws", "wss"])?,
            None => defaults.ws_url,
        };

        Ok(Self {
            api_url,
            ws_url,
            reconnect_delay: number(ENV_RECONNECT_DELAY_MS, get(ENV_RECONNECT_DELAY_MS))?
                .map(Duration::from_millis)
                .unwrap_or(defaults.reconnect_delay),
            herald_ttl: number(ENV_HERALD_TTL_MS, get(ENV_HERALD_TTL_MS))?
                .map(Duration::from_millis)
                .unwrap_or(defaults.herald_ttl),
            feed_page_size: number(ENV_FEED_PAGE_SIZE, get(ENV_FEED_PAGE_SIZE))?
                .unwrap_or(defaults.feed_page_size),
            poll_interval: number(ENV_POLL_INTERVAL_MS, get(ENV_POLL_INTERVAL_MS))?
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            http_timeout_secs: number(ENV_HTTP_TIMEOUT_SECS, get(ENV_HTTP_TIMEOUT_SECS))?
                .unwrap_or(defaults.http_timeout_secs),
        })
    }
}

fn number<T: FromStr>(key: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError> {
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value })
    })
    .transpose()
}

fn validated_url(key: &'static str, raw: &str, schemes: &[&str]) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        key,
        reason: e.to_string(),
    })?;
    if !schemes.contains(&url.scheme()) {
        return Err(ConfigError::InvalidUrl {
            key,
            reason: format!("scheme must be one of {}", schemes.join(", ")),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ObserverConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, ObserverConfig::default());
        assert_eq!(config.reconnect_delay, Duration::from_secs(3));
        assert_eq!(config.herald_ttl, Duration::from_secs(8));
        assert_eq!(config.feed_page_size, 20);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ObserverConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://sim.example.org/"),
            (ENV_WS_URL, "wss://sim.example.org"),
            (ENV_RECONNECT_DELAY_MS, "500"),
            (ENV_FEED_PAGE_SIZE, "50"),
        ]))
        .expect("config");

        assert_eq!(config.api_url, "https://sim.example.org");
        assert_eq!(config.ws_url, "wss://sim.example.org");
        assert_eq!(config.reconnect_delay, Duration::from_millis(500));
        assert_eq!(config.feed_page_size, 50);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            ObserverConfig::from_lookup(lookup(&[(ENV_HERALD_TTL_MS, "  ")])).expect("config");
        assert_eq!(config.herald_ttl, Duration::from_millis(DEFAULT_HERALD_TTL_MS));
    }

    #[test]
    fn bad_number_is_reported_with_its_key() {
        let err = ObserverConfig::from_lookup(lookup(&[(ENV_POLL_INTERVAL_MS, "soon")]))
            .expect_err("should fail");
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: ENV_POLL_INTERVAL_MS,
                value: "soon".into()
            }
        );
    }

    #[test]
    fn websocket_url_must_use_ws_scheme() {
        let err = ObserverConfig::from_lookup(lookup(&[(ENV_WS_URL, "http://localhost:3301")]))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidUrl { key: ENV_WS_URL, .. }));
    }
}
