use crate::domain::geo::Region;
use crate::domain::vendor::{TransportMode, VendorBasics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Where the submitted state and city came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GeoSource {
    Lookup,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VendorSubmission {
    pub session_id: Uuid,
    pub basics: VendorBasics,
    pub pincode: String,
    pub state: Region,
    pub city: String,
    pub geo_source: GeoSource,
    pub transport_mode: TransportMode,
    pub submitted_at: DateTime<Utc>,
}
