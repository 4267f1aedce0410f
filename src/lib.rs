//! Detect whether a requested IPv4 CIDR block overlaps a provider's reserved ranges.
//!
//! The arithmetic lives in [`models`] ([`parse`], [`derive_facts`]) and
//! [`processing`] ([`overlaps`], [`evaluate`], [`reset`]). [`catalog`] loads the
//! reserved dataset and [`output`] renders a terminal report.

pub mod catalog;
pub mod config;
pub mod models;
pub mod output;
pub mod processing;

pub use models::{derive_facts, parse, CidrBlock, CidrFacts, CidrParseError, Region};
pub use processing::{evaluate, overlaps, reset, select_locations, Evaluation};

/// Validate `cidr` and check it against the selected locations of `catalog`.
///
/// `selected` names data centers (case-insensitive); empty means all. The request
/// `0.0.0.0/0` means "nothing requested": the selection comes back unevaluated.
pub fn check_request(
    catalog: &[Region],
    cidr: &str,
    selected: &[&str],
) -> Result<Evaluation, CidrParseError> {
    let requested = parse(cidr)?;
    let scoped = select_locations(catalog, selected);

    if requested.is_unspecified() {
        log::info!("check_request({}) treated as no request", config::NO_REQUEST_CIDR);
        return Ok(Evaluation {
            request_facts: derive_facts(&requested, ""),
            catalog: reset(&scoped),
            diagnostics: vec![],
        });
    }
    Ok(evaluate(&requested, &scoped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Location, ReservedEntry};

    fn catalog() -> Vec<Region> {
        let location = |name: &str, cidr: &str| {
            Location::new(
                name,
                vec![Category::new(
                    "Private Network",
                    vec![ReservedEntry::new("private_network", &[cidr])],
                )],
            )
        };
        vec![Region::new(
            "Americas",
            vec![location("dal10", "10.10.10.0/24"), location("dal12", "10.20.0.0/16")],
        )]
    }

    #[test]
    fn test_check_request_rejects_bad_input() {
        for bad in ["10.10.10.0/33", "256.1.1.1/24", "10.10.10.0", ""] {
            assert!(matches!(
                check_request(&catalog(), bad, &[]),
                Err(CidrParseError::InvalidFormat { .. })
            ));
        }
    }

    #[test]
    fn test_check_request_selection() {
        let result = check_request(&catalog(), "10.20.1.0/24", &["DAL10"]).unwrap();
        assert_eq!(result.catalog[0].locations.len(), 1);
        assert!(!result.request_facts.conflict, "dal12 was not selected");

        let result = check_request(&catalog(), "10.20.1.0/24", &[]).unwrap();
        assert!(result.request_facts.conflict);
        assert!(result.catalog[0].location("dal12").unwrap().conflict);
    }

    #[test]
    fn test_check_request_no_request() {
        let result = check_request(&catalog(), "0.0.0.0/0", &[]).unwrap();
        assert!(!result.request_facts.conflict);
        assert!(result.catalog.iter().all(|r| !r.calculating && !r.conflict));
        assert_eq!(result.catalog[0].locations[0].cidr_networks.len(), 1);
    }
}
