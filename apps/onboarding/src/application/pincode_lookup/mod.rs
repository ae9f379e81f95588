pub mod dto;
pub mod policy;
pub mod resolver;

pub use dto::{GeoFields, PincodeLookupView};
pub use policy::{LookupConfig, ManualOverridePolicy, RetryPolicy};
pub use resolver::PincodeResolver;
