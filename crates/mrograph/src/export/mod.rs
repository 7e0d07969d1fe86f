//! Export module for visualizing and analyzing hierarchies in external tools.
//!
//! Supports:
//! - **DOT**: Graphviz rendering of the inheritance graph
//! - **JSON**: declarations plus computed MROs for web tooling
//! - **CSV**: one row per MRO entry for spreadsheets/pandas

pub mod dot;
pub mod json;
pub mod csv;

pub use dot::{DotOptions, export_dot, export_dot_styled};
pub use json::export_json;
pub use csv::export_csv_mro;

use crate::error::{HierarchyError, Result};
use crate::graph::Hierarchy;
use log::warn;

const WARN_CLASS_COUNT: usize = 10_000;
const MAX_CLASS_COUNT: usize = 100_000;

/// Check hierarchy size for export operations and issue warnings/errors.
fn check_export_size(hierarchy: &Hierarchy) -> Result<()> {
    let class_count = hierarchy.class_count();

    if class_count > MAX_CLASS_COUNT {
        return Err(HierarchyError::InvalidOperation {
            message: format!(
                "Hierarchy too large for export ({class_count} classes > 100K limit)"
            ),
        });
    }

    if class_count > WARN_CLASS_COUNT {
        warn!("Exporting large hierarchy ({class_count} classes)");
    }

    Ok(())
}
