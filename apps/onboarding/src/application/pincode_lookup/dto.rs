use crate::domain::geo::{GeoState, Region};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeoFields {
    pub pincode: String,
    pub state: Option<Region>,
    pub city: String,
}

/// Read side of the pincode lookup, as handed to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PincodeLookupView {
    pub geo: GeoFields,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_manual: bool,
    pub editable: bool,
}

impl From<&GeoState> for PincodeLookupView {
    fn from(state: &GeoState) -> Self {
        Self {
            geo: GeoFields {
                pincode: state.pincode.clone(),
                state: state.state,
                city: state.city.clone(),
            },
            is_loading: state.is_loading,
            error: state.error.clone(),
            is_manual: state.is_manual,
            editable: state.is_editable(),
        }
    }
}
