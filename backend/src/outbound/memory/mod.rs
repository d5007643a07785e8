//! In-memory adapters for fixture mode.

mod in_memory_spatial_store;

pub use in_memory_spatial_store::InMemorySpatialStore;
