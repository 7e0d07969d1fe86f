//! DOT format export for Graphviz visualization.
//!
//! Generates a digraph with one node per class and one `child -> base` edge
//! per declared base. Edge labels give the base's position in the child's
//! local precedence order.

use crate::error::Result;
use crate::graph::Hierarchy;

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
    /// List locally defined methods under the class name
    pub show_methods: bool,
    /// Fill color for classes with bases (hex color code)
    pub node_color: String,
    /// Fill color for classes without bases (hex color code)
    pub root_color: String,
}

impl Default for DotOptions {
    fn default() -> Self {
        DotOptions {
            rankdir: "BT".to_string(),
            show_methods: false,
            node_color: "#FFE082".to_string(),
            root_color: "#E0E0E0".to_string(),
        }
    }
}

/// Export hierarchy to Graphviz DOT format
pub fn export_dot(hierarchy: &Hierarchy) -> Result<String> {
    export_dot_styled(hierarchy, DotOptions::default())
}

/// Export hierarchy to Graphviz DOT format with custom styling
pub fn export_dot_styled(hierarchy: &Hierarchy, options: DotOptions) -> Result<String> {
    super::check_export_size(hierarchy)?;

    let mut output = String::new();

    // Header
    output.push_str("digraph class_hierarchy {\n");
    output.push_str(&format!("    rankdir={};\n", options.rankdir));
    output.push_str("    node [shape=box, style=filled];\n\n");

    for class in hierarchy.classes() {
        let mut label = escape_dot_label(&class.name);
        if options.show_methods && !class.methods.is_empty() {
            let methods: Vec<&str> = class.methods.iter().map(String::as_str).collect();
            label.push_str("\\n");
            label.push_str(&escape_dot_label(&methods.join(", ")));
        }

        let color = if class.is_root() {
            &options.root_color
        } else {
            &options.node_color
        };

        output.push_str(&format!(
            "    c{} [label=\"{label}\", fillcolor=\"{color}\"];\n",
            class.id.raw()
        ));
    }

    output.push('\n');

    for class in hierarchy.classes() {
        for (position, base) in class.bases.iter().enumerate() {
            output.push_str(&format!(
                "    c{} -> c{} [label=\"{}\"];\n",
                class.id.raw(),
                base.raw(),
                position + 1
            ));
        }
    }

    output.push_str("}\n");

    Ok(output)
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
