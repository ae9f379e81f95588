pub mod geo;
pub mod vendor;
