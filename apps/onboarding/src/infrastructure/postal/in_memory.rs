use crate::domain::geo::{LookupError, Pincode, PostalAddress, PostalLookup, Region};
use async_trait::async_trait;
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref HEAD_OFFICES: HashMap<&'static str, (Region, &'static str)> = {
        let mut m = HashMap::new();
        // Head post offices of the metros and state capitals
        m.insert("560001", (Region::Karnataka, "Bengaluru"));
        m.insert("570001", (Region::Karnataka, "Mysuru"));
        m.insert("110001", (Region::Delhi, "New Delhi"));
        m.insert("400001", (Region::Maharashtra, "Mumbai"));
        m.insert("411001", (Region::Maharashtra, "Pune"));
        m.insert("600001", (Region::TamilNadu, "Chennai"));
        m.insert("700001", (Region::WestBengal, "Kolkata"));
        m.insert("500001", (Region::Telangana, "Hyderabad"));
        m.insert("380001", (Region::Gujarat, "Ahmedabad"));
        m.insert("302001", (Region::Rajasthan, "Jaipur"));
        m.insert("226001", (Region::UttarPradesh, "Lucknow"));
        m.insert("682001", (Region::Kerala, "Kochi"));
        m.insert("751001", (Region::Odisha, "Bhubaneswar"));
        m.insert("781001", (Region::Assam, "Guwahati"));
        m.insert("403001", (Region::Goa, "Panaji"));
        m
    };
}

/// Postal directory held in memory. Used offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPostalLookup {
    entries: HashMap<String, PostalAddress>,
}

impl InMemoryPostalLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory preloaded with the head office table.
    pub fn seeded() -> Self {
        HEAD_OFFICES
            .iter()
            .fold(Self::new(), |lookup, (pincode, (state, city))| {
                lookup.with_entry(*pincode, *state, *city)
            })
    }

    pub fn with_entry(mut self, pincode: &str, state: Region, city: &str) -> Self {
        self.entries.insert(
            pincode.to_string(),
            PostalAddress {
                state,
                city: city.to_string(),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PostalLookup for InMemoryPostalLookup {
    async fn resolve(&self, pincode: &Pincode) -> Result<PostalAddress, LookupError> {
        self.entries
            .get(pincode.as_str())
            .cloned()
            .ok_or_else(|| LookupError::NotFound(pincode.to_string()))
    }
}
