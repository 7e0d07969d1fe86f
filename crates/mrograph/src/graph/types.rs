//! Core hierarchy types: class handles and declarations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Handle for a declared class (monotonic counter, assigned by the graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(u32);

impl ClassId {
    /// Wrap a raw handle value.
    ///
    /// Handles are only meaningful for the graph that assigned them; a raw
    /// value the graph never handed out is reported as an unknown class.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One declared class.
///
/// `bases` keeps the authored left-to-right order, which is the local
/// precedence order used by linearization. `methods` holds only the methods
/// defined directly on this class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Handle assigned by the graph
    pub id: ClassId,
    /// Unique class name
    pub name: String,
    /// Direct bases in declaration order
    pub bases: Vec<ClassId>,
    /// Locally defined method names
    pub methods: BTreeSet<String>,
}

impl ClassDecl {
    /// Create a declaration (ID will be assigned by graph).
    pub fn new(
        id: ClassId,
        name: impl Into<String>,
        bases: Vec<ClassId>,
        methods: BTreeSet<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            bases,
            methods,
        }
    }

    /// Whether this class defines `method` itself.
    pub fn defines(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    /// Whether this class has no declared bases.
    pub fn is_root(&self) -> bool {
        self.bases.is_empty()
    }
}
