//! Derived subnet facts for a CIDR block.

use super::CidrBlock;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Read-only report of everything derivable from one [`CidrBlock`].
///
/// `conflict` is only ever set by the evaluation pass; `service` is empty for the
/// requested block and names the catalog entry otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CidrFacts {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service: String,
    pub cidr_notation: String,
    pub subnet_bits: u8,
    pub subnet_mask: String,
    pub wildcard_mask: String,
    pub network_address: String,
    pub broadcast_address: String,
    pub assignable_hosts: u32,
    #[serde(default)]
    pub first_assignable_host: String,
    #[serde(default)]
    pub last_assignable_host: String,
    #[serde(default)]
    pub conflict: bool,
}

/// Number of assignable hosts for a prefix length.
///
/// /31 and /32 report zero: a single host or a point-to-point pair has no usable range.
pub fn assignable_hosts(prefix_len: u8) -> u32 {
    if prefix_len >= 31 {
        0
    } else {
        ((1u64 << (32 - prefix_len)) - 2) as u32
    }
}

fn dotted(bits: u32) -> String {
    Ipv4Addr::from(bits).to_string()
}

/// Compute the [`CidrFacts`] for a block, labelled with `service`.
pub fn derive_facts(block: &CidrBlock, service: &str) -> CidrFacts {
    let network = block.network();
    let broadcast = block.broadcast();
    let hosts = assignable_hosts(block.prefix_len());

    let (first, last) = if hosts == 0 {
        (String::new(), String::new())
    } else {
        (dotted(network + 1), dotted(broadcast - 1))
    };

    CidrFacts {
        service: service.to_string(),
        cidr_notation: block.to_string(),
        subnet_bits: block.prefix_len(),
        subnet_mask: dotted(block.mask()),
        wildcard_mask: dotted(block.wildcard()),
        network_address: dotted(network),
        broadcast_address: dotted(broadcast),
        assignable_hosts: hosts,
        first_assignable_host: first,
        last_assignable_host: last,
        conflict: false,
    }
}
