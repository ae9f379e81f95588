use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

/// Administrative regions a vendor address can be registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Region {
    #[serde(rename = "ANDHRA PRADESH")]
    AndhraPradesh,
    #[serde(rename = "ARUNACHAL PRADESH")]
    ArunachalPradesh,
    #[serde(rename = "ASSAM")]
    Assam,
    #[serde(rename = "BIHAR")]
    Bihar,
    #[serde(rename = "CHHATTISGARH")]
    Chhattisgarh,
    #[serde(rename = "GOA")]
    Goa,
    #[serde(rename = "GUJARAT")]
    Gujarat,
    #[serde(rename = "HARYANA")]
    Haryana,
    #[serde(rename = "HIMACHAL PRADESH")]
    HimachalPradesh,
    #[serde(rename = "JHARKHAND")]
    Jharkhand,
    #[serde(rename = "KARNATAKA")]
    Karnataka,
    #[serde(rename = "KERALA")]
    Kerala,
    #[serde(rename = "MADHYA PRADESH")]
    MadhyaPradesh,
    #[serde(rename = "MAHARASHTRA")]
    Maharashtra,
    #[serde(rename = "MANIPUR")]
    Manipur,
    #[serde(rename = "MEGHALAYA")]
    Meghalaya,
    #[serde(rename = "MIZORAM")]
    Mizoram,
    #[serde(rename = "NAGALAND")]
    Nagaland,
    #[serde(rename = "ODISHA")]
    Odisha,
    #[serde(rename = "PUNJAB")]
    Punjab,
    #[serde(rename = "RAJASTHAN")]
    Rajasthan,
    #[serde(rename = "SIKKIM")]
    Sikkim,
    #[serde(rename = "TAMIL NADU")]
    TamilNadu,
    #[serde(rename = "TELANGANA")]
    Telangana,
    #[serde(rename = "TRIPURA")]
    Tripura,
    #[serde(rename = "UTTAR PRADESH")]
    UttarPradesh,
    #[serde(rename = "UTTARAKHAND")]
    Uttarakhand,
    #[serde(rename = "WEST BENGAL")]
    WestBengal,
    #[serde(rename = "DELHI")]
    Delhi,
}

/// Older or formal names still returned by some postal datasets.
const ALIASES: [(&str, Region); 3] = [
    ("ORISSA", Region::Odisha),
    ("UTTARANCHAL", Region::Uttarakhand),
    ("NCT OF DELHI", Region::Delhi),
];

impl Region {
    pub const ALL: [Region; 29] = [
        Region::AndhraPradesh,
        Region::ArunachalPradesh,
        Region::Assam,
        Region::Bihar,
        Region::Chhattisgarh,
        Region::Goa,
        Region::Gujarat,
        Region::Haryana,
        Region::HimachalPradesh,
        Region::Jharkhand,
        Region::Karnataka,
        Region::Kerala,
        Region::MadhyaPradesh,
        Region::Maharashtra,
        Region::Manipur,
        Region::Meghalaya,
        Region::Mizoram,
        Region::Nagaland,
        Region::Odisha,
        Region::Punjab,
        Region::Rajasthan,
        Region::Sikkim,
        Region::TamilNadu,
        Region::Telangana,
        Region::Tripura,
        Region::UttarPradesh,
        Region::Uttarakhand,
        Region::WestBengal,
        Region::Delhi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::AndhraPradesh => "ANDHRA PRADESH",
            Region::ArunachalPradesh => "ARUNACHAL PRADESH",
            Region::Assam => "ASSAM",
            Region::Bihar => "BIHAR",
            Region::Chhattisgarh => "CHHATTISGARH",
            Region::Goa => "GOA",
            Region::Gujarat => "GUJARAT",
            Region::Haryana => "HARYANA",
            Region::HimachalPradesh => "HIMACHAL PRADESH",
            Region::Jharkhand => "JHARKHAND",
            Region::Karnataka => "KARNATAKA",
            Region::Kerala => "KERALA",
            Region::MadhyaPradesh => "MADHYA PRADESH",
            Region::Maharashtra => "MAHARASHTRA",
            Region::Manipur => "MANIPUR",
            Region::Meghalaya => "MEGHALAYA",
            Region::Mizoram => "MIZORAM",
            Region::Nagaland => "NAGALAND",
            Region::Odisha => "ODISHA",
            Region::Punjab => "PUNJAB",
            Region::Rajasthan => "RAJASTHAN",
            Region::Sikkim => "SIKKIM",
            Region::TamilNadu => "TAMIL NADU",
            Region::Telangana => "TELANGANA",
            Region::Tripura => "TRIPURA",
            Region::UttarPradesh => "UTTAR PRADESH",
            Region::Uttarakhand => "UTTARAKHAND",
            Region::WestBengal => "WEST BENGAL",
            Region::Delhi => "DELHI",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown region: {0}")]
pub struct ParseRegionError(pub String);

impl FromStr for Region {
    type Err = ParseRegionError;

    /// Case-insensitive; runs of whitespace count as one space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == normalized)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == normalized)
                    .map(|(_, region)| *region)
            })
            .ok_or_else(|| ParseRegionError(s.to_string()))
    }
}
