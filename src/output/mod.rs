//! Output formatting for evaluation results.
//!
//! - [`terminal`] - terminal report with coloured conflict markers

mod terminal;

pub use terminal::{facts_lines, format_field, location_line, print_report};
