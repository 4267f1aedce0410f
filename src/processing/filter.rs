//! Location selection and search over a catalog.
//!
//! Both filters keep every region, even when no location survives, so a caller
//! can still render the full region list.

use crate::models::{Location, Region};

fn retain_locations<F>(catalog: &[Region], keep: F) -> Vec<Region>
where
    F: Fn(&Location) -> bool,
{
    catalog
        .iter()
        .map(|region| {
            let locations: Vec<Location> =
                region.locations.iter().filter(|l| keep(*l)).cloned().collect();
            let filtered_count = region.locations.len() - locations.len();
            if filtered_count > 0 {
                log::debug!("{}: filtered out {} locations", region.name, filtered_count);
            }
            Region {
                name: region.name.clone(),
                conflict: locations.iter().any(|l| l.conflict),
                calculating: region.calculating,
                locations,
            }
        })
        .collect()
}

/// Keep only the locations named in `names` (case-insensitive).
///
/// An empty `names` selects every location.
pub fn select_locations(catalog: &[Region], names: &[&str]) -> Vec<Region> {
    if names.is_empty() {
        return catalog.to_vec();
    }
    retain_locations(catalog, |location| {
        names.iter().any(|n| n.eq_ignore_ascii_case(&location.name))
    })
}

/// Keep the locations whose name contains `needle` (case-insensitive).
pub fn search_locations(catalog: &[Region], needle: &str) -> Vec<Region> {
    let needle = needle.to_lowercase();
    retain_locations(catalog, |location| {
        location.name.to_lowercase().contains(&needle)
    })
}
