//! Class hierarchy types and construction.
//!
//! This module defines the fundamental building blocks:
//! - [`ClassDecl`]: one declared class with ordered bases and local methods
//! - [`ClassGraph`]: the append-only builder
//! - [`Hierarchy`]: the frozen, shareable graph with cached linearizations

mod types;
mod class_graph;
mod hierarchy;

pub use types::{ClassDecl, ClassId};
pub use class_graph::ClassGraph;
pub use hierarchy::{FinalizeOptions, Hierarchy};
