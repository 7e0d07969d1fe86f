//! Integration tests for sharing a finalized hierarchy across threads.

use mrograph::{ClassGraph, ClassId, Hierarchy};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;

// Layered lattice: every class in layer n inherits from every class in layer n - 1.
fn create_lattice(layers: usize, width: usize) -> (Hierarchy, ClassId) {
    let mut graph = ClassGraph::new();
    let top = graph.declare("Top", &[], ["run"]).unwrap();
    let mut previous = vec![top];

    for layer in 0..layers {
        let mut current = Vec::with_capacity(width);
        for i in 0..width {
            let id = graph
                .declare(format!("L{layer}_{i}"), &previous, ["run"])
                .unwrap();
            current.push(id);
        }
        previous = current;
    }

    let bottom = graph.declare("Bottom", &previous, ["run"]).unwrap();
    (graph.finalize().unwrap(), bottom)
}

#[test]
fn test_concurrent_first_linearization_agrees() {
    let (hierarchy, bottom) = create_lattice(6, 4);
    let hierarchy = Arc::new(hierarchy);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let hierarchy = Arc::clone(&hierarchy);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                hierarchy.linearize(bottom).unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let first = &results[0];
    assert_eq!(first.len(), hierarchy.class_count());
    assert!(results.iter().all(|r| r == first));
}

#[test]
fn test_concurrent_dispatch_queries() {
    let (hierarchy, bottom) = create_lattice(3, 3);
    let hierarchy = Arc::new(hierarchy);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let hierarchy = Arc::clone(&hierarchy);
            thread::spawn(move || {
                hierarchy
                    .resolver()
                    .chain(bottom, "run")
                    .unwrap()
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let expected = hierarchy.linearize(bottom).unwrap().classes().to_vec();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_hierarchy_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Hierarchy>();
}
