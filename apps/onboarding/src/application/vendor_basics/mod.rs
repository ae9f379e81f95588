pub mod store;

pub use store::VendorBasicsStore;
