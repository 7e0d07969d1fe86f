//! # mrograph
//!
//! C3 method resolution order and cooperative dispatch for declared class
//! hierarchies with multiple inheritance.
//!
//! ## Core Principles
//!
//! - **Declare, then freeze**: classes are declared bases-first into an
//!   append-only [`ClassGraph`], then finalized into a read-only [`Hierarchy`]
//! - **No partial orders**: a class either has a C3 linearization or an
//!   [`HierarchyError::InconsistentHierarchy`] error
//! - **Explicit position**: `super()`-style forwarding is a query that takes
//!   the currently executing class, not hidden call-stack state
//!
//! ## Architecture
//!
//! ```text
//! Declarations
//!     ↓
//! ClassGraph (append-only, bases before dependents)
//!     ↓ finalize
//! Hierarchy (frozen, per-class compute-once C3 cache)
//!     ↓
//! DispatchResolver (resolve_first / resolve_next / chains)   Export (DOT, JSON, CSV)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mrograph::ClassGraph;
//!
//! # fn example() -> mrograph::Result<()> {
//! let mut graph = ClassGraph::new();
//! let a = graph.declare("A", &[], ["hello"])?;
//! let b = graph.declare("B", &[a], ["hello"])?;
//! let c = graph.declare("C", &[a], ["hello"])?;
//! let d = graph.declare("D", &[b, c], ["hello"])?;
//!
//! let hierarchy = graph.finalize()?;
//! assert_eq!(hierarchy.mro_names(d)?, ["D", "B", "C", "A"]);
//!
//! // Every override runs once, in MRO order.
//! let calls: Vec<_> = hierarchy.resolver().chain(d, "hello")?.collect();
//! assert_eq!(calls, [d, b, c, a]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod dispatch;
pub mod error;
pub mod export;
pub mod graph;
pub mod linearize;

// Re-export main types
pub use dispatch::{CooperativeChain, DispatchResolver};
pub use error::{HierarchyError, Result};
pub use graph::{ClassDecl, ClassGraph, ClassId, FinalizeOptions, Hierarchy};
pub use linearize::Linearization;
