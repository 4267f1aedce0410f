//! Conflict evaluation of a requested block against the reserved catalog.
//!
//! Every pass returns a fresh annotated copy of the catalog. Leaf conflicts are
//! folded up with logical OR: leaf -> category -> location -> region, and across
//! the whole catalog onto the requested block's own facts.

use super::overlap::overlaps;
use crate::models::{derive_facts, parse, CidrBlock, CidrFacts, CidrParseError, Location, Region};
use std::fmt;

/// A catalog leaf CIDR that could not be parsed. Skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntryUnparsable {
    pub region: String,
    pub location: String,
    pub service: String,
    pub cidr: String,
    pub error: CidrParseError,
}

impl fmt::Display for CatalogEntryUnparsable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {}: skipped '{}' ({})",
            self.region, self.location, self.service, self.cidr, self.error
        )
    }
}

/// One conflicting leaf, with the names of the location and region owning it.
#[derive(Debug, PartialEq, Eq)]
pub struct ConflictHit<'a> {
    pub region: &'a str,
    pub location: &'a str,
    pub facts: &'a CidrFacts,
}

/// Result of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Facts of the requested block; `conflict` is the OR over the whole catalog.
    pub request_facts: CidrFacts,
    pub catalog: Vec<Region>,
    pub diagnostics: Vec<CatalogEntryUnparsable>,
}

impl Evaluation {
    /// All conflicting leaves in catalog order.
    pub fn conflicts(&self) -> Vec<ConflictHit<'_>> {
        self.catalog
            .iter()
            .flat_map(|region| {
                region.locations.iter().flat_map(move |location| {
                    location
                        .cidr_networks
                        .iter()
                        .filter(|facts| facts.conflict)
                        .map(move |facts| ConflictHit {
                            region: &region.name,
                            location: &location.name,
                            facts,
                        })
                })
            })
            .collect()
    }
}

// Rebuild `cidr_networks` and every roll-up flag of one location. With no request
// all flags come out false.
fn annotate_location(
    region: &str,
    location: &Location,
    requested: Option<&CidrBlock>,
    diagnostics: &mut Vec<CatalogEntryUnparsable>,
) -> Location {
    let mut annotated = location.clone();
    annotated.cidr_networks.clear();

    for category in annotated.categories.iter_mut() {
        category.conflict = false;
        for entry in &category.entries {
            for cidr in &entry.cidr_blocks {
                let leaf = match parse(cidr) {
                    Ok(leaf) => leaf,
                    Err(error) => {
                        diagnostics.push(CatalogEntryUnparsable {
                            region: region.to_string(),
                            location: location.name.clone(),
                            service: entry.service.clone(),
                            cidr: cidr.clone(),
                            error,
                        });
                        continue;
                    }
                };
                let mut facts = derive_facts(&leaf, &entry.service);
                facts.conflict = requested.is_some_and(|r| overlaps(r, &leaf));
                if facts.conflict {
                    log::trace!("{} {} {} overlaps", location.name, entry.service, leaf);
                    category.conflict = true;
                }
                annotated.cidr_networks.push(facts);
            }
        }
    }

    annotated.conflict = annotated.categories.iter().any(|c| c.conflict);
    annotated
}

fn annotate(
    catalog: &[Region],
    requested: Option<&CidrBlock>,
) -> (Vec<Region>, Vec<CatalogEntryUnparsable>) {
    let mut diagnostics = Vec::new();
    let regions = catalog
        .iter()
        .map(|region| {
            let locations: Vec<Location> = region
                .locations
                .iter()
                .map(|l| annotate_location(&region.name, l, requested, &mut diagnostics))
                .collect();
            Region {
                name: region.name.clone(),
                conflict: locations.iter().any(|l| l.conflict),
                calculating: requested.is_some(),
                locations,
            }
        })
        .collect();
    (regions, diagnostics)
}

/// Evaluate `requested` against every leaf of `catalog`.
///
/// The input catalog is never modified. Malformed leaf CIDRs are skipped and
/// reported in [`Evaluation::diagnostics`].
pub fn evaluate(requested: &CidrBlock, catalog: &[Region]) -> Evaluation {
    let mut request_facts = derive_facts(requested, "");
    let (catalog, diagnostics) = annotate(catalog, Some(requested));
    request_facts.conflict = catalog.iter().any(|r| r.conflict);

    for d in &diagnostics {
        log::debug!("CatalogEntryUnparsable {d}");
    }
    let leaves: usize = catalog
        .iter()
        .flat_map(|r| r.locations.iter())
        .map(|l| l.cidr_networks.len())
        .sum();
    let evaluation = Evaluation {
        request_facts,
        catalog,
        diagnostics,
    };
    log::info!(
        "evaluate({requested}) leaves={leaves} conflicts={} conflict={} skipped={}",
        evaluation.conflicts().len(),
        evaluation.request_facts.conflict,
        evaluation.diagnostics.len()
    );
    evaluation
}

/// Return a copy of `catalog` with every conflict flag and `calculating` cleared.
pub fn reset(catalog: &[Region]) -> Vec<Region> {
    let (regions, diagnostics) = annotate(catalog, None);
    log::debug!(
        "reset() regions={} skipped={}",
        regions.len(),
        diagnostics.len()
    );
    regions
}

/// List the leaf CIDRs in `catalog` that cannot be parsed.
pub fn unparsable_entries(catalog: &[Region]) -> Vec<CatalogEntryUnparsable> {
    annotate(catalog, None).1
}
