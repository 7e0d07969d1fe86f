//! CSV format export for data analysis in spreadsheets and pandas.
//!
//! Renders one row per `(class, position, ancestor)` entry of every MRO.

use crate::error::Result;
use crate::graph::Hierarchy;
use log::warn;

/// Render the MRO table of every class as CSV.
///
/// The first line is the `class,position,ancestor` header. A class without
/// a consistent linearization has no rows; it is logged at `warn` and left
/// out, so use [`export_json`](super::export_json) when those classes must
/// be reported.
///
/// # Errors
///
/// Returns [`HierarchyError::InvalidOperation`](crate::HierarchyError::InvalidOperation)
/// if the hierarchy exceeds the export size limit.
pub fn export_csv_mro(hierarchy: &Hierarchy) -> Result<String> {
    super::check_export_size(hierarchy)?;

    let mut output = String::from("class,position,ancestor\n");

    for class in hierarchy.classes() {
        let mro = match hierarchy.linearize(class.id) {
            Ok(mro) => mro,
            Err(e) => {
                warn!("Omitting {} from CSV export: {e}", class.name);
                continue;
            }
        };

        let name = escape_csv(&class.name);
        for (position, &ancestor) in mro.iter().enumerate() {
            output.push_str(&format!(
                "{name},{position},{}\n",
                escape_csv(&hierarchy.name_of(ancestor))
            ));
        }
    }

    Ok(output)
}

/// Quote a field holding a delimiter, quote or line break; inner quotes are doubled.
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
