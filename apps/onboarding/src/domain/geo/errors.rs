use thiserror::Error;

/// Why the postal lookup could not produce a state and city.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("No post office found for pincode {0}. Please enter state and city manually.")]
    NotFound(String),

    #[error("Malformed pincode lookup: {0}")]
    Malformed(String),

    #[error("Pincode belongs to an unsupported region: {0}")]
    UnsupportedRegion(String),

    #[error("Pincode lookup service unavailable: {0}")]
    Transport(String),

    #[error("Pincode lookup timed out after {0} ms")]
    Timeout(u64),
}

impl LookupError {
    /// Only degraded-service failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LookupError::Transport(_) | LookupError::Timeout(_))
    }
}

/// Commands the pincode resolver refuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("Pincode must be at most 6 digits, got {0:?}")]
    InvalidPincode(String),

    #[error("State and city are filled from the pincode and cannot be edited")]
    Locked,

    #[error("Pincode lookup session is closed")]
    Closed,

    #[error("Pincode resolver must be created inside a tokio runtime")]
    NoRuntime,
}
