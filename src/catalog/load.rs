//! Reading the reserved-range dataset from JSON.
//!
//! The dataset is a flat list of data centers with one array per service class.
//! Loading turns it into typed [`Region`]s with each location's `cidr_networks`
//! indexed and every conflict flag cleared.

use crate::config;
use crate::models::{Category, Location, Region, ReservedEntry, ServiceKind};
use crate::processing::{reset, unparsable_entries};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// Dataset metadata.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogInfo {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub release_notes: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub issues: String,
}

/// A loaded catalog: metadata plus regions ready for evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub info: CatalogInfo,
    pub regions: Vec<Region>,
}

impl Catalog {
    pub fn location_count(&self) -> usize {
        self.regions.iter().map(|r| r.locations.len()).sum()
    }
}

#[derive(Deserialize, Debug, Default)]
struct SourceEntry {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    cidr_blocks: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
struct SourceDataCenter {
    #[serde(default)]
    key: String,
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    geo_region: String,
    #[serde(default)]
    private_networks: Vec<SourceEntry>,
    #[serde(default)]
    service_network: Vec<SourceEntry>,
    #[serde(default)]
    ssl_vpn: Vec<SourceEntry>,
    #[serde(default)]
    evault: Vec<SourceEntry>,
    #[serde(default)]
    file_block: Vec<SourceEntry>,
    #[serde(default)]
    icos: Vec<SourceEntry>,
    #[serde(default)]
    advmon: Vec<SourceEntry>,
    #[serde(default)]
    rhe_ls: Vec<SourceEntry>,
    #[serde(default)]
    ims: Vec<SourceEntry>,
}

impl SourceDataCenter {
    fn take_entries(&mut self, kind: ServiceKind) -> Vec<SourceEntry> {
        let entries = match kind {
            ServiceKind::PrivateNetwork => &mut self.private_networks,
            ServiceKind::ServiceNetwork => &mut self.service_network,
            ServiceKind::SslVpn => &mut self.ssl_vpn,
            ServiceKind::Evault => &mut self.evault,
            ServiceKind::FileBlock => &mut self.file_block,
            ServiceKind::Icos => &mut self.icos,
            ServiceKind::AdvMon => &mut self.advmon,
            ServiceKind::Rhels => &mut self.rhe_ls,
            ServiceKind::Ims => &mut self.ims,
        };
        std::mem::take(entries)
    }

    fn into_location(mut self) -> Location {
        // Absent service arrays become empty categories.
        let categories = ServiceKind::ALL
            .iter()
            .map(|kind| {
                let entries = self
                    .take_entries(*kind)
                    .into_iter()
                    .map(|e| ReservedEntry {
                        service: kind.label().to_string(),
                        key: e.key,
                        name: e.name,
                        cidr_blocks: e.cidr_blocks,
                    })
                    .collect();
                Category::new(kind.label(), entries)
            })
            .collect();

        Location {
            key: self.key,
            name: self.name,
            city: self.city,
            state: self.state,
            country: self.country,
            geo_region: self.geo_region,
            categories,
            cidr_networks: vec![],
            conflict: false,
        }
    }
}

#[derive(Deserialize, Debug)]
struct SourceCatalog {
    #[serde(flatten)]
    info: CatalogInfo,
    #[serde(default)]
    data_centers: Vec<SourceDataCenter>,
}

/// Group locations into regions by `geo_region`.
///
/// Known regions come first in [`config::REGION_ORDER`] and are kept even when
/// empty; unknown geo values follow as their own regions. Locations are sorted by name.
pub fn group_regions(locations: Vec<Location>) -> Vec<Region> {
    let mut regions: Vec<Region> = config::REGION_ORDER
        .iter()
        .map(|(_, name)| Region::new(name, vec![]))
        .collect();

    for location in locations
        .into_iter()
        .sorted_by(|a, b| a.name.cmp(&b.name))
    {
        let name = config::region_name(&location.geo_region).to_string();
        match regions.iter_mut().find(|r| r.name == name) {
            Some(region) => region.locations.push(location),
            None => {
                log::debug!("New region '{name}' for location {}", location.name);
                regions.push(Region::new(&name, vec![location]));
            }
        }
    }
    regions
}

/// Parse a catalog from its JSON text.
pub fn parse_catalog(json: &str) -> Result<Catalog, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let source: SourceCatalog = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing catalog JSON: path={} error={}", e.path(), e))?;

    let locations: Vec<Location> = source
        .data_centers
        .into_iter()
        .map(SourceDataCenter::into_location)
        .collect();
    let regions = reset(&group_regions(locations));

    for entry in unparsable_entries(&regions) {
        log::warn!("Catalog entry will be skipped: {entry}");
    }

    let catalog = Catalog {
        info: source.info,
        regions,
    };
    log::info!(
        "Loaded catalog '{}' v{} ({}) regions={} locations={}",
        catalog.info.name,
        catalog.info.version,
        catalog.info.last_updated,
        catalog.regions.len(),
        catalog.location_count()
    );
    Ok(catalog)
}

/// Read and parse the catalog file at `path`.
pub fn read_catalog(path: &str) -> Result<Catalog, Box<dyn Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Catalog file does not exist: {path}").into());
    }
    log::info!("Reading catalog file: {path}");
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading catalog file {path}: {e}"))?;
    parse_catalog(&json)
}
