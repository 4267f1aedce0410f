//! Reserved catalog loading.
//!
//! - [`load`] - reading the JSON dataset into typed regions

mod load;

// Re-export public types and functions
pub use load::{group_regions, parse_catalog, read_catalog, Catalog, CatalogInfo};
