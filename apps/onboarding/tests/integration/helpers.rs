use async_trait::async_trait;
use onboarding::{
    application::{
        onboarding_session::FormSession,
        pincode_lookup::{LookupConfig, PincodeResolver, RetryPolicy},
    },
    domain::{
        geo::{LookupError, Pincode, PostalAddress, PostalLookup, Region},
        vendor::{FieldName, ServiceMode},
    },
};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// Postal lookup whose answer and latency are fixed per pincode.
#[derive(Default)]
pub struct ScriptedLookup {
    script: HashMap<String, (Duration, Result<PostalAddress, LookupError>)>,
    calls: AtomicUsize,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, pincode: &str, delay_ms: u64, state: Region, city: &str) -> Self {
        self.script.insert(
            pincode.to_string(),
            (
                Duration::from_millis(delay_ms),
                Ok(PostalAddress {
                    state,
                    city: city.to_string(),
                }),
            ),
        );
        self
    }

    pub fn fail(mut self, pincode: &str, delay_ms: u64, error: LookupError) -> Self {
        self.script
            .insert(pincode.to_string(), (Duration::from_millis(delay_ms), Err(error)));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostalLookup for ScriptedLookup {
    async fn resolve(&self, pincode: &Pincode) -> Result<PostalAddress, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (delay, outcome) = self
            .script
            .get(pincode.as_str())
            .cloned()
            .unwrap_or((Duration::ZERO, Err(LookupError::NotFound(pincode.to_string()))));
        tokio::time::sleep(delay).await;
        outcome
    }
}

/// Default lookup settings without retries, so failures surface at once.
pub fn no_retry() -> LookupConfig {
    LookupConfig {
        retry: RetryPolicy::none(),
        ..LookupConfig::default()
    }
}

pub fn spawn_resolver(lookup: Arc<ScriptedLookup>, config: LookupConfig) -> PincodeResolver {
    PincodeResolver::new(lookup, config).expect("resolver needs a runtime")
}

pub fn spawn_session(lookup: Arc<ScriptedLookup>) -> FormSession {
    FormSession::new(lookup, no_retry()).expect("session needs a runtime")
}

/// Types a complete, valid company section into the session.
pub fn fill_valid_basics(session: &mut FormSession) {
    let store = session.vendor_mut();
    let inputs = [
        (FieldName::LegalCompanyName, "Acme Logistics Private Limited"),
        (FieldName::CompanyName, "Acme Logistics"),
        (FieldName::SubVendor, "Acme South"),
        (FieldName::VendorCode, "acm001"),
        (FieldName::PrimaryContactName, "Asha Rao"),
        (FieldName::PrimaryContactPhone, "98450 12345"),
        (FieldName::PrimaryContactEmail, "asha.rao@acme.example"),
        (FieldName::VendorPhoneNumber, "080-22334455"),
        (FieldName::VendorEmailAddress, "ops@acme.example"),
        (FieldName::Gstin, "29abcde1234f1z5"),
        (FieldName::Address, "12 MG Road"),
    ];
    for (field, raw) in inputs {
        store.input(field, raw).expect("text field accepts text");
    }
    store
        .input(FieldName::ServiceModes, ServiceMode::RoadFtl)
        .expect("service mode accepted");
    store
        .input(FieldName::CompanyRating, 4.2)
        .expect("rating accepted");
}
