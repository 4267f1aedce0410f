//! Reserved address catalog: regions, locations, service categories and entries.

use super::{parse, CidrBlock, CidrFacts};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The provider service classes a location can reserve address space for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    PrivateNetwork,
    ServiceNetwork,
    SslVpn,
    Evault,
    FileBlock,
    Icos,
    AdvMon,
    Rhels,
    Ims,
}

impl ServiceKind {
    /// Every kind, in the order categories are laid out on a location.
    pub const ALL: [ServiceKind; 9] = [
        ServiceKind::PrivateNetwork,
        ServiceKind::ServiceNetwork,
        ServiceKind::SslVpn,
        ServiceKind::Evault,
        ServiceKind::FileBlock,
        ServiceKind::Icos,
        ServiceKind::AdvMon,
        ServiceKind::Rhels,
        ServiceKind::Ims,
    ];

    /// Human readable category name.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::PrivateNetwork => "Private Network",
            ServiceKind::ServiceNetwork => "Service Network",
            ServiceKind::SslVpn => "SSL VPN",
            ServiceKind::Evault => "eVault",
            ServiceKind::FileBlock => "File & Block",
            ServiceKind::Icos => "ICOS",
            ServiceKind::AdvMon => "AdvMon (Nimsoft)",
            ServiceKind::Rhels => "RHELS",
            ServiceKind::Ims => "IMS",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One named leaf group: a service label and its reserved CIDR strings.
///
/// CIDR strings stay unparsed here; catalog data is external and may be malformed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedEntry {
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub cidr_blocks: Vec<String>,
}

impl ReservedEntry {
    pub fn new(service: &str, cidr_blocks: &[&str]) -> ReservedEntry {
        ReservedEntry {
            service: service.to_string(),
            cidr_blocks: cidr_blocks.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }
}

/// A service class on one location.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<ReservedEntry>,
    #[serde(default)]
    pub conflict: bool,
}

impl Category {
    pub fn new(name: &str, entries: Vec<ReservedEntry>) -> Category {
        Category {
            name: name.to_string(),
            entries,
            conflict: false,
        }
    }
}

/// A data center.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub geo_region: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// One fact set per parsable leaf CIDR across all categories.
    #[serde(default)]
    pub cidr_networks: Vec<CidrFacts>,
    #[serde(default)]
    pub conflict: bool,
}

impl Location {
    pub fn new(name: &str, categories: Vec<Category>) -> Location {
        Location {
            key: name.to_string(),
            name: name.to_string(),
            categories,
            ..Default::default()
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Iterate `(service, cidr)` for every leaf CIDR string on this location.
    pub fn leaves(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories.iter().flat_map(|category| {
            category.entries.iter().flat_map(|entry| {
                entry
                    .cidr_blocks
                    .iter()
                    .map(move |cidr| (entry.service.as_str(), cidr.as_str()))
            })
        })
    }

    /// Lookup table from leaf block to its facts.
    ///
    /// When the same block is reserved by several entries, the first one wins.
    pub fn cidr_index(&self) -> HashMap<CidrBlock, &CidrFacts> {
        let mut index = HashMap::new();
        for facts in &self.cidr_networks {
            if let Ok(block) = parse(&facts.cidr_notation) {
                index.entry(block).or_insert(facts);
            }
        }
        index
    }

    /// Facts for a leaf given as catalog text; `010.002.128.000/24` finds `10.2.128.0/24`.
    pub fn facts_for(&self, cidr: &str) -> Option<&CidrFacts> {
        let block = parse(cidr).ok()?;
        self.cidr_networks
            .iter()
            .find(|f| parse(&f.cidr_notation).is_ok_and(|b| b == block))
    }
}

/// A geographic region grouping locations.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub conflict: bool,
    /// Set once a conflict pass has run against this region.
    #[serde(default)]
    pub calculating: bool,
}

impl Region {
    pub fn new(name: &str, locations: Vec<Location>) -> Region {
        Region {
            name: name.to_string(),
            locations,
            conflict: false,
            calculating: false,
        }
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.name == name)
    }
}
