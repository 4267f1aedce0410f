//! Domain models for reserved CIDR conflict checking.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`CidrBlock`] - validated IPv4 CIDR block and the [`parse`] acceptance rule
//! - [`CidrFacts`] - derived subnet facts for one block
//! - [`Region`], [`Location`], [`Category`] and [`ReservedEntry`] - the reserved catalog

mod catalog;
mod cidr;
mod facts;

// Re-export public types
pub use catalog::{Category, Location, Region, ReservedEntry, ServiceKind};
pub use cidr::{parse, CidrBlock, CidrParseError, FormatIssue, MAX_LENGTH};
pub use facts::{assignable_hosts, derive_facts, CidrFacts};
