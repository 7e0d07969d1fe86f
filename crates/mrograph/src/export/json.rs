//! JSON format export for web tooling.
//!
//! Produces `{"classes": [...]}` with each class's declaration and either its
//! MRO (as names) or the reason it has none.

use crate::error::{HierarchyError, Result};
use crate::graph::{ClassDecl, Hierarchy};
use serde_json::{json, Value};

/// Export hierarchy and computed MROs to JSON
pub fn export_json(hierarchy: &Hierarchy) -> Result<String> {
    super::check_export_size(hierarchy)?;

    let classes: Vec<Value> = hierarchy
        .classes()
        .iter()
        .map(|class| class_to_json(hierarchy, class))
        .collect();

    let result = json!({
        "classes": classes,
    });

    serde_json::to_string_pretty(&result)
        .map_err(|e| HierarchyError::export("Failed to serialize hierarchy", Some(e)))
}

/// Convert one class to a JSON object
fn class_to_json(hierarchy: &Hierarchy, class: &ClassDecl) -> Value {
    let bases: Vec<String> = class.bases.iter().map(|&b| hierarchy.name_of(b)).collect();

    let mut obj = json!({
        "id": class.id,
        "name": class.name,
        "bases": bases,
        "methods": class.methods,
    });

    match hierarchy.mro_names(class.id) {
        Ok(mro) => obj["mro"] = json!(mro),
        Err(e) => obj["error"] = json!(e.to_string()),
    }

    obj
}
