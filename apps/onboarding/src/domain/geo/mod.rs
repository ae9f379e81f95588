pub mod entity;
pub mod errors;
pub mod lookup;
pub mod region;
pub mod value_objects;

pub use entity::GeoState;
pub use errors::{GeoError, LookupError};
pub use lookup::{PostalAddress, PostalLookup};
pub use region::Region;
pub use value_objects::{PINCODE_LEN, Pincode};
