//! Pure formatting functions for UI output.
//!
//! This module contains all console display logic. Styling goes through
//! `console`, which drops colors when the output is not a terminal.

use crate::boundary::BoundaryWarning;
use crate::domain::{BuildTagSnapshot, BuildVariant};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render the resolved tags of a snapshot, one per line
pub fn format_snapshot(snapshot: &BuildTagSnapshot) -> String {
    let previous = |tag: Option<&crate::domain::BuildTag>| {
        tag.map(|t| t.name.clone())
            .unwrap_or_else(|| "(none)".to_string())
    };

    format!(
        "  Current:                      {} (build {}, version {})\n  \
         Previous in order:            {}\n  \
         Previous on different commit: {}",
        snapshot.current.name,
        snapshot.current.build_number,
        snapshot.current.build_version,
        previous(snapshot.previous_in_order.as_ref()),
        previous(snapshot.previous_on_different_commit.as_ref()),
    )
}

/// Describe a variant by its flavor and build type
pub fn format_variant(variant: &BuildVariant) -> String {
    match &variant.flavor_name {
        Some(flavor) => format!(
            "'{}' (flavor {}, build type {})",
            variant, flavor, variant.build_type
        ),
        None => format!("'{}' (build type {})", variant, variant.build_type),
    }
}

/// Display the resolved tags of a variant.
pub fn display_snapshot(variant: &BuildVariant, snapshot: &BuildTagSnapshot) {
    println!(
        "\n{}",
        style(format!("Build tags for variant {}", format_variant(variant))).bold()
    );
    println!("{}", format_snapshot(snapshot));
}

/// Display configured variants.
pub fn display_available_variants(variants: &[String]) {
    println!("{}", style("Configured variants:").bold());
    for variant in variants {
        println!("  - {}", variant);
    }
}
