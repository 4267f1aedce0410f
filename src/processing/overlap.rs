//! Address range overlap between CIDR blocks.

use crate::models::CidrBlock;

/// True when the two blocks share at least one address.
///
/// Compares the canonical `[network, broadcast]` ranges, so host bits in the
/// supplied addresses never matter. Adjacent blocks do not overlap.
pub fn overlaps(a: &CidrBlock, b: &CidrBlock) -> bool {
    a.network() <= b.broadcast() && b.network() <= a.broadcast()
}
