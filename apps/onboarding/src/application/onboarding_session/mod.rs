pub mod dto;
pub mod use_case;

pub use dto::{GeoSource, VendorSubmission};
pub use use_case::{FormSession, GeoIssue, SessionError};
