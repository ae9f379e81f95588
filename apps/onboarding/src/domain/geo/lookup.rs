use super::errors::LookupError;
use super::region::Region;
use super::value_objects::Pincode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What a pincode resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub state: Region,
    pub city: String,
}

/// External postal directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostalLookup: Send + Sync {
    async fn resolve(&self, pincode: &Pincode) -> Result<PostalAddress, LookupError>;
}
