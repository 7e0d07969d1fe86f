//! Unit tests for export functionality.
//!
//! Tests cover:
//! - export_dot() node and edge output
//! - export_dot_styled() with method labels
//! - export_json() MROs and inconsistency reporting
//! - export_csv_mro() rows, quoting and omitted classes

use mrograph::export::{export_csv_mro, export_dot, export_dot_styled, export_json, DotOptions};
use mrograph::{ClassGraph, Hierarchy};

const NO_METHODS: [&str; 0] = [];

fn create_test_hierarchy() -> Hierarchy {
    let mut graph = ClassGraph::new();
    let a = graph.declare("A", &[], ["hello"]).unwrap();
    let b = graph.declare("B", &[a], ["hello"]).unwrap();
    let c = graph.declare("C", &[a], ["hello"]).unwrap();
    graph.declare("D", &[b, c], ["hello", "bye"]).unwrap();
    graph.finalize().unwrap()
}

#[test]
fn test_export_dot() {
    let hierarchy = create_test_hierarchy();
    let dot = export_dot(&hierarchy).unwrap();

    assert!(dot.starts_with("digraph class_hierarchy {"));
    assert!(dot.contains("c0 [label=\"A\""));
    assert!(dot.contains("c3 -> c1 [label=\"1\"];"));
    assert!(dot.contains("c3 -> c2 [label=\"2\"];"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_export_dot_styled() {
    let hierarchy = create_test_hierarchy();
    let options = DotOptions {
        rankdir: "TB".to_string(),
        show_methods: true,
        ..Default::default()
    };
    let dot = export_dot_styled(&hierarchy, options).unwrap();

    assert!(dot.contains("rankdir=TB;"));
    assert!(dot.contains("label=\"D\\nbye, hello\""));
}

#[test]
fn test_export_json() {
    let hierarchy = create_test_hierarchy();
    let json = export_json(&hierarchy).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let classes = parsed["classes"].as_array().unwrap();
    assert_eq!(classes.len(), 4);
    assert_eq!(classes[3]["name"], "D");
    assert_eq!(classes[3]["bases"], serde_json::json!(["B", "C"]));
    assert_eq!(classes[3]["mro"], serde_json::json!(["D", "B", "C", "A"]));
}

#[test]
fn test_export_json_reports_inconsistency() {
    let mut graph = ClassGraph::new();
    let a = graph.declare("A", &[], NO_METHODS).unwrap();
    let b = graph.declare("B", &[a], NO_METHODS).unwrap();
    graph.declare("Bad", &[a, b], NO_METHODS).unwrap();
    let hierarchy = graph.finalize().unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&export_json(&hierarchy).unwrap()).unwrap();
    let bad = &parsed["classes"][2];
    assert!(bad.get("mro").is_none());
    assert!(bad["error"].as_str().unwrap().contains("Bad"));
}

#[test]
fn test_export_csv_mro() {
    let hierarchy = create_test_hierarchy();
    let csv = export_csv_mro(&hierarchy).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "class,position,ancestor");
    // A:1 + B:2 + C:2 + D:4 rows
    assert_eq!(lines.len(), 1 + 9);
    assert!(lines.contains(&"D,1,B"));
    assert!(lines.contains(&"D,3,A"));
    assert!(csv.ends_with('\n'));
}

#[test]
fn test_export_csv_quotes_carriage_return() {
    let mut graph = ClassGraph::new();
    graph.declare("A\rB", &[], NO_METHODS).unwrap();
    let hierarchy = graph.finalize().unwrap();

    let csv = export_csv_mro(&hierarchy).unwrap();
    assert_eq!(csv, "class,position,ancestor\n\"A\rB\",0,\"A\rB\"\n");
}

#[test]
fn test_export_csv_omits_inconsistent_classes() {
    let mut graph = ClassGraph::new();
    let a = graph.declare("A", &[], NO_METHODS).unwrap();
    let b = graph.declare("B", &[a], NO_METHODS).unwrap();
    graph.declare("Bad", &[a, b], NO_METHODS).unwrap();
    let hierarchy = graph.finalize().unwrap();

    let csv = export_csv_mro(&hierarchy).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines, vec!["class,position,ancestor", "A,0,A", "B,0,B", "B,1,A"]);
}
