use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

pub const PINCODE_LEN: usize = 6;

lazy_static! {
    static ref PINCODE_REGEX: regex::Regex = regex::Regex::new(r"^[0-9]{6}$").unwrap();
    static ref DELIVERABLE_REGEX: regex::Regex = regex::Regex::new(r"^[1-9][0-9]{5}$").unwrap();
}

/// A complete six digit postal code, ready to be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct Pincode {
    #[validate(regex(path = *PINCODE_REGEX))]
    value: String,
}

impl Pincode {
    pub fn new(value: impl Into<String>) -> Result<Self, validator::ValidationErrors> {
        let pincode = Self {
            value: value.into(),
        };
        pincode.validate()?;
        Ok(pincode)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// No Indian pincode starts with zero.
    pub fn is_deliverable(&self) -> bool {
        DELIVERABLE_REGEX.is_match(&self.value)
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
