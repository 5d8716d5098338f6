//! User interface module - console output for the command-line tool.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_available_variants, display_boundary_warning, display_error, display_snapshot,
    display_status, display_success, format_snapshot, format_variant,
};
