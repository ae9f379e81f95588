//! Configuration loading from environment variables.
//!
//! Everything is read once at startup. `.env` files are honoured through
//! `dotenvy` in the binary before [`Config::from_env`] runs.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `RUST_LOG`: Logging level (default: "info,onboarding=debug")
//! - `POSTAL_LOOKUP_BASE_URL`: Postal directory API root (default: "https://api.postalpincode.in")
//! - `POSTAL_LOOKUP_USER_AGENT`: HTTP user agent for directory requests
//! - `POSTAL_LOOKUP_TIMEOUT_MS`: Bound on one lookup attempt (default: 5000)
//! - `POSTAL_LOOKUP_MAX_RETRIES`: Extra attempts after a timeout or transport failure (default: 2)
//! - `POSTAL_LOOKUP_INITIAL_BACKOFF_MS`: Delay before the first retry (default: 250)
//! - `POSTAL_LOOKUP_MAX_BACKOFF_MS`: Upper bound on the retry delay (default: 2000)
//! - `MANUAL_OVERRIDE_POLICY`: `discard` or `preserve` manual state/city when a new pincode resolves (default: discard)

use crate::application::pincode_lookup::{LookupConfig, ManualOverridePolicy, RetryPolicy};
use crate::infrastructure::postal::india_post::DEFAULT_BASE_URL;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postal directory API root, without trailing slash
    pub postal_lookup_base_url: String,

    /// HTTP User-Agent sent to the postal directory
    pub postal_lookup_user_agent: Option<String>,

    /// Milliseconds before a single lookup attempt is abandoned
    pub postal_lookup_timeout_ms: u64,

    /// Retries after a timeout or transport failure
    pub postal_lookup_max_retries: u32,

    /// Delay before the first retry; doubles each retry
    pub postal_lookup_initial_backoff_ms: u64,

    /// Cap for the retry delay
    pub postal_lookup_max_backoff_ms: u64,

    /// Fate of manual state/city when a later pincode resolves
    pub manual_override_policy: ManualOverridePolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    pub fn from_source<F>(source: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            postal_lookup_base_url: env_or(
                &source,
                "POSTAL_LOOKUP_BASE_URL",
                DEFAULT_BASE_URL.to_string(),
            )?,
            postal_lookup_user_agent: source("POSTAL_LOOKUP_USER_AGENT"),
            postal_lookup_timeout_ms: env_or(&source, "POSTAL_LOOKUP_TIMEOUT_MS", 5000)?,
            postal_lookup_max_retries: env_or(&source, "POSTAL_LOOKUP_MAX_RETRIES", 2)?,
            postal_lookup_initial_backoff_ms: env_or(
                &source,
                "POSTAL_LOOKUP_INITIAL_BACKOFF_MS",
                250,
            )?,
            postal_lookup_max_backoff_ms: env_or(&source, "POSTAL_LOOKUP_MAX_BACKOFF_MS", 2000)?,
            manual_override_policy: env_or(
                &source,
                "MANUAL_OVERRIDE_POLICY",
                ManualOverridePolicy::Discard,
            )?,
        })
    }

    /// Resolver settings derived from this configuration.
    pub fn lookup(&self) -> LookupConfig {
        LookupConfig {
            timeout: Duration::from_millis(self.postal_lookup_timeout_ms.max(1)),
            retry: RetryPolicy {
                max_retries: self.postal_lookup_max_retries,
                initial_backoff: Duration::from_millis(self.postal_lookup_initial_backoff_ms),
                max_backoff: Duration::from_millis(self.postal_lookup_max_backoff_ms),
            },
            manual_override: self.manual_override_policy,
        }
    }
}

/// Parse a variable, falling back to `default` when unset.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<F, T>(source: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match source(key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}
