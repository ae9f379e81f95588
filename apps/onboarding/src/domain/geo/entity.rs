use super::region::Region;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Geo fields of the form plus the resolution status that governs them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeoState {
    pub pincode: String,
    pub state: Option<Region>,
    pub city: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_manual: bool,
}

impl GeoState {
    /// Whether the user may type into state and city. Both the view and the
    /// write path go through this.
    pub fn is_editable(&self) -> bool {
        self.is_manual || self.error.is_some()
    }
}
