use super::dto::{GeoSource, VendorSubmission};
use crate::application::pincode_lookup::{LookupConfig, PincodeResolver};
use crate::application::vendor_basics::VendorBasicsStore;
use crate::domain::geo::{GeoError, GeoState, PINCODE_LEN, PostalLookup, Region};
use crate::domain::vendor::{FieldName, TransportMode};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// One pass through the company section of the onboarding form.
///
/// Owns the vendor basics store and the pincode resolver from the moment the
/// form opens until it is submitted or abandoned. Nothing outlives the
/// session; dropping it cancels any pending lookup.
pub struct FormSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    vendor: VendorBasicsStore,
    geo: PincodeResolver,
    transport_mode: TransportMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoIssue {
    #[error("pincode lookup is still in progress")]
    Pending,
    #[error("pincode must be 6 digits")]
    IncompletePincode,
    #[error("state is required")]
    MissingState,
    #[error("city is required")]
    MissingCity,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{}", describe_incomplete(.fields, .geo))]
    Incomplete {
        fields: Vec<FieldName>,
        geo: Option<GeoIssue>,
    },

    #[error("Transport mode {0} is not available yet")]
    TransportUnavailable(TransportMode),

    #[error("Form session is closed")]
    Closed,
}

fn describe_incomplete(fields: &[FieldName], geo: &Option<GeoIssue>) -> String {
    let mut parts = Vec::new();
    if !fields.is_empty() {
        let names: Vec<&str> = fields.iter().map(FieldName::as_str).collect();
        parts.push(format!("invalid fields: {}", names.join(", ")));
    }
    if let Some(issue) = geo {
        parts.push(issue.to_string());
    }
    format!("Vendor details incomplete ({})", parts.join("; "))
}

impl FormSession {
    /// # Errors
    ///
    /// `NoRuntime` when called outside a tokio runtime.
    pub fn new(lookup: Arc<dyn PostalLookup>, config: LookupConfig) -> Result<Self, GeoError> {
        let session = Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            vendor: VendorBasicsStore::new(),
            geo: PincodeResolver::new(lookup, config)?,
            transport_mode: TransportMode::default(),
        };
        info!(session_id = %session.id, "onboarding form session started");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn vendor(&self) -> &VendorBasicsStore {
        &self.vendor
    }

    pub fn vendor_mut(&mut self) -> &mut VendorBasicsStore {
        &mut self.vendor
    }

    pub fn geo(&self) -> &PincodeResolver {
        &self.geo
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    /// # Errors
    ///
    /// `TransportUnavailable` for the reserved modes.
    pub fn set_transport_mode(&mut self, mode: TransportMode) -> Result<(), SessionError> {
        if !mode.is_enabled() {
            return Err(SessionError::TransportUnavailable(mode));
        }
        self.transport_mode = mode;
        Ok(())
    }

    /// Validates everything and, if complete, closes the session and returns
    /// the record to persist. On failure the session stays open and the
    /// field errors are visible through [`vendor`](Self::vendor).
    ///
    /// # Errors
    ///
    /// `Incomplete` with every invalid field and the first geo problem,
    /// `Closed` if the session already ended.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn submit(&mut self) -> Result<VendorSubmission, SessionError> {
        if self.geo.is_closed() {
            return Err(SessionError::Closed);
        }

        let fields_valid = self.vendor.validate_all();
        let geo = self.geo.state();

        let state = match (fields_valid, check_geo(&geo)) {
            (true, Ok(state)) => state,
            (_, geo_check) => {
                let fields: Vec<FieldName> = self.vendor.errors().keys().copied().collect();
                let issue = geo_check.err();
                warn!(invalid_fields = fields.len(), geo_issue = ?issue, "submission rejected");
                return Err(SessionError::Incomplete { fields, geo: issue });
            }
        };

        let submission = VendorSubmission {
            session_id: self.id,
            basics: self.vendor.basics().clone(),
            pincode: geo.pincode,
            state,
            city: geo.city.trim().to_string(),
            geo_source: if geo.is_manual {
                GeoSource::Manual
            } else {
                GeoSource::Lookup
            },
            transport_mode: self.transport_mode,
            submitted_at: Utc::now(),
        };

        self.geo.shutdown();
        info!(vendor_code = %submission.basics.vendor_code, "vendor submission accepted");
        Ok(submission)
    }

    pub fn abandon(self) {
        self.geo.shutdown();
        info!(session_id = %self.id, "onboarding form session abandoned");
    }
}

fn check_geo(geo: &GeoState) -> Result<Region, GeoIssue> {
    if geo.is_loading {
        return Err(GeoIssue::Pending);
    }
    if geo.pincode.len() != PINCODE_LEN {
        return Err(GeoIssue::IncompletePincode);
    }
    let state = geo.state.ok_or(GeoIssue::MissingState)?;
    if geo.city.trim().is_empty() {
        return Err(GeoIssue::MissingCity);
    }
    Ok(state)
}
