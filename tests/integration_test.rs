//! Integration tests for reserved-cidr-check
//!
//! These tests verify the complete workflow from reading the catalog to evaluating requests.

use reserved_cidr_check::{
    catalog::read_catalog,
    check_request, evaluate, parse,
    processing::{reset, search_locations},
};

const TEST_CATALOG: &str = "src/tests/test_data/ip-ranges_test_01.json";

#[test]
fn test_full_workflow_with_catalog() {
    let catalog = read_catalog(TEST_CATALOG).expect("Failed to read catalog");

    // Inside the wdc04 eVault range 10.200.16.0/22 only.
    let result = check_request(&catalog.regions, "10.200.17.64/26", &[]).expect("valid cidr");
    assert!(result.request_facts.conflict);
    assert_eq!(result.request_facts.network_address, "10.200.17.64");
    assert_eq!(result.request_facts.assignable_hosts, 62);

    let hits = result.conflicts();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].location, "wdc04");
    assert_eq!(hits[0].facts.service, "eVault");

    let americas = &result.catalog[0];
    assert!(americas.conflict);
    assert!(americas.location("wdc04").unwrap().conflict);
    assert!(!americas.location("dal10").unwrap().conflict);
    assert!(result.catalog[1..].iter().all(|r| !r.conflict && r.calculating));

    // The malformed wdc04 file & block entry is reported, not fatal.
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].cidr, "10.200.300.0/24");
}

#[test]
fn test_service_network_overlap_across_regions() {
    let catalog = read_catalog(TEST_CATALOG).expect("Failed to read catalog");

    // Hits the dal10 service network and SSL VPN, wdc04 SSL VPN and ams03 service network.
    let result = evaluate(&parse("10.2.0.0/16").unwrap(), &catalog.regions);
    let mut locations: Vec<&str> = result.conflicts().iter().map(|h| h.location).collect();
    locations.dedup();
    assert_eq!(locations, vec!["dal10", "wdc04", "ams03"]);
    assert!(result.catalog[1].conflict);
    assert!(!result.catalog[2].conflict);
    assert!(!result.catalog[3].conflict);
}

#[test]
fn test_repeated_requests_are_independent() {
    let catalog = read_catalog(TEST_CATALOG).expect("Failed to read catalog");
    let before = catalog.clone();

    let first = check_request(&catalog.regions, "10.150.3.0/24", &[]).unwrap();
    let second = check_request(&catalog.regions, "192.168.0.0/24", &[]).unwrap();

    assert_eq!(catalog, before, "catalog must not change");
    assert!(first.request_facts.conflict);
    assert!(first.catalog[3].conflict, "sao01 in Latin America");
    assert!(!second.request_facts.conflict);
    assert!(second.catalog.iter().all(|r| !r.conflict && r.calculating));

    let cleared = reset(&first.catalog);
    assert_eq!(cleared, catalog.regions);
}

#[test]
fn test_selected_and_searched_locations() {
    let catalog = read_catalog(TEST_CATALOG).expect("Failed to read catalog");

    let result = check_request(&catalog.regions, "10.0.0.0/8", &["AMS03"]).unwrap();
    let evaluated: Vec<&str> = result
        .catalog
        .iter()
        .flat_map(|r| r.locations.iter().map(|l| l.name.as_str()))
        .collect();
    assert_eq!(evaluated, vec!["ams03"]);
    assert_eq!(result.catalog.len(), 4);

    let found = search_locations(&result.catalog, "ams");
    assert!(found[1].conflict);
}

#[test]
fn test_invalid_request_rejected() {
    let catalog = read_catalog(TEST_CATALOG).expect("Failed to read catalog");
    for bad in ["10.10.10.0/33", "256.1.1.1/24", "10.10.10.0", "dal10"] {
        assert!(check_request(&catalog.regions, bad, &[]).is_err(), "{bad}");
    }
}
