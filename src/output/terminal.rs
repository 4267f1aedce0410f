//! Terminal report of an evaluation.

use crate::catalog::CatalogInfo;
use crate::models::{CidrFacts, Location};
use crate::processing::Evaluation;
use colored::Colorize;

/// Format a value as a left-aligned field of at least `width` characters.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:<width$}")
}

/// The `label: value` lines describing one block.
pub fn facts_lines(facts: &CidrFacts) -> Vec<String> {
    let or_none = |s: &str| {
        if s.is_empty() {
            "-".to_string()
        } else {
            s.to_string()
        }
    };
    vec![
        format!("{} {}", format_field("cidr notation:", 22), facts.cidr_notation),
        format!("{} {}", format_field("subnet mask:", 22), facts.subnet_mask),
        format!("{} {}", format_field("wildcard mask:", 22), facts.wildcard_mask),
        format!("{} {}", format_field("network address:", 22), facts.network_address),
        format!("{} {}", format_field("broadcast address:", 22), facts.broadcast_address),
        format!("{} {}", format_field("assignable hosts:", 22), facts.assignable_hosts),
        format!(
            "{} {}",
            format_field("first assignable host:", 22),
            or_none(&facts.first_assignable_host)
        ),
        format!(
            "{} {}",
            format_field("last assignable host:", 22),
            or_none(&facts.last_assignable_host)
        ),
    ]
}

/// One summary line per location.
pub fn location_line(region: &str, location: &Location, calculating: bool) -> String {
    let status = if !calculating {
        "-".normal()
    } else if location.conflict {
        "CONFLICT".red().bold()
    } else {
        "ok".green()
    };
    format!(
        "{} {} {} {}",
        format_field(region, 14),
        format_field(&location.name, 8),
        format_field(format!("{}, {}", location.city, location.country), 24),
        status
    )
}

/// Print the requested block, every location status and the conflicting leaves.
pub fn print_report(info: &CatalogInfo, evaluation: &Evaluation) {
    println!(
        "# catalog '{}' v{} updated {}",
        info.name, info.version, info.last_updated
    );
    for line in facts_lines(&evaluation.request_facts) {
        println!("{line}");
    }
    let verdict = if evaluation.request_facts.conflict {
        "conflicts with reserved ranges".on_red()
    } else {
        "no conflict".normal()
    };
    println!("{} {}", format_field("result:", 22), verdict);
    println!();

    for region in &evaluation.catalog {
        for location in &region.locations {
            println!("{}", location_line(&region.name, location, region.calculating));
        }
    }

    let conflicts = evaluation.conflicts();
    if !conflicts.is_empty() {
        println!();
        for hit in conflicts {
            println!(
                "{} {} {} {}",
                format_field(hit.location, 8),
                format_field(&hit.facts.service, 16),
                format_field(&hit.facts.cidr_notation, 18),
                format!("{} - {}", hit.facts.network_address, hit.facts.broadcast_address).red()
            );
        }
    }

    if !evaluation.diagnostics.is_empty() {
        println!(
            "#{}# {} catalog entries could not be parsed and were skipped",
            "NOTE".on_red(),
            evaluation.diagnostics.len()
        );
    }
}
