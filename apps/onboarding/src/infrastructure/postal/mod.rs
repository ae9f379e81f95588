pub mod in_memory;
pub mod india_post;

pub use in_memory::InMemoryPostalLookup;
pub use india_post::IndiaPostLookup;
