//! CIDR conflict processing logic.
//!
//! This module contains the algorithms run against the reserved catalog:
//! - [`overlap`] - address range overlap between two blocks
//! - `evaluate` - conflict evaluation and roll-up, and reset
//! - [`filter`] - location selection and search

mod evaluate;
mod filter;
mod overlap;

// Re-export public functions
pub use evaluate::{
    evaluate, reset, unparsable_entries, CatalogEntryUnparsable, ConflictHit, Evaluation,
};
pub use filter::{search_locations, select_locations};
pub use overlap::overlaps;
