//! CLI command handlers

pub mod demo;
pub mod emit;

use loglib::{LogError, Severity};

/// clap value parser for severity names (case-sensitive)
pub fn parse_severity(value: &str) -> Result<Severity, LogError> {
    value.parse()
}
