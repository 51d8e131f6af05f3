//! Runtime configuration loaded from environment variables.
//!
//! Every setting has a default, so the binary runs against the built-in
//! sample listings with no configuration at all.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Simulated latency of the sample listing fetch.
    /// Env: `DWELLDEX_FETCH_DELAY_MS`
    /// Default: `1500`
    pub fetch_delay: Duration,

    /// Simulated latency of a listing submission.
    /// Env: `DWELLDEX_SUBMIT_DELAY_MS`
    /// Default: `800`
    pub submit_delay: Duration,

    /// Remote endpoint serving a JSON array of listings.
    /// Env: `DWELLDEX_SOURCE_URL`
    /// Default: unset (sample listings).
    pub source_url: Option<String>,

    /// Remote endpoint accepting new listings.
    /// Env: `DWELLDEX_SUBMIT_URL`
    /// Default: unset (delayed echo).
    pub submit_url: Option<String>,

    /// Env: `DWELLDEX_HTTP_TIMEOUT_SECS`
    /// Default: `30`
    pub http_timeout: Duration,

    /// Where the binary writes the filtered listings.
    /// Env: `DWELLDEX_OUTPUT`
    /// Default: `filtered_properties.json`
    pub output_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch_delay: Duration::from_millis(1500),
            submit_delay: Duration::from_millis(800),
            source_url: None,
            submit_url: None,
            http_timeout: Duration::from_secs(30),
            output_path: PathBuf::from("filtered_properties.json"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, falling back to defaults for
    /// missing or malformed values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse_u64(&lookup, "DWELLDEX_FETCH_DELAY_MS") {
            config.fetch_delay = Duration::from_millis(ms);
        }

        if let Some(ms) = parse_u64(&lookup, "DWELLDEX_SUBMIT_DELAY_MS") {
            config.submit_delay = Duration::from_millis(ms);
        }

        config.source_url = lookup("DWELLDEX_SOURCE_URL").filter(|url| !url.is_empty());
        config.submit_url = lookup("DWELLDEX_SUBMIT_URL").filter(|url| !url.is_empty());

        if let Some(secs) = parse_u64(&lookup, "DWELLDEX_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(secs);
        }

        if let Some(path) = lookup("DWELLDEX_OUTPUT") {
            config.output_path = PathBuf::from(path);
        }

        // RUST_LOG is read by tracing-subscriber's EnvFilter directly.

        config
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Invalid number, using default");
            None
        }
    }
}
