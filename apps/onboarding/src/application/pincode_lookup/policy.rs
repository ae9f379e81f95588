use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// What a successful re-resolution does to state and city the user typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManualOverridePolicy {
    /// The lookup result replaces manual values and the form locks again.
    #[default]
    Discard,
    /// Manual values survive and stay editable.
    Preserve,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown manual override policy {0:?}, expected \"discard\" or \"preserve\"")]
pub struct ParsePolicyError(pub String);

impl FromStr for ManualOverridePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(ManualOverridePolicy::Discard),
            "preserve" => Ok(ManualOverridePolicy::Preserve),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Retries for degraded lookups. Attempt `n` (0-based) waits
/// `initial_backoff * 2^n`, capped at `max_backoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(16);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(2),
        }
    }
}

/// Resolver settings, usually derived from [`crate::config::Config::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupConfig {
    /// Bound on a single lookup attempt.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub manual_override: ManualOverridePolicy,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
            manual_override: ManualOverridePolicy::default(),
        }
    }
}
