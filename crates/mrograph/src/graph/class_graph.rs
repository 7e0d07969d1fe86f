//! Append-only class declarations.

use super::hierarchy::{FinalizeOptions, Hierarchy};
use super::types::{ClassDecl, ClassId};
use crate::error::{HierarchyError, Result};
use log::debug;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A class graph under construction.
///
/// Classes are declared one at a time and every base must already exist, so
/// declaration order is a topological order and the graph can never contain
/// a cycle. Nothing can be removed or changed once declared. Call
/// [`finalize`](Self::finalize) to freeze the graph for queries.
#[derive(Debug, Default)]
pub struct ClassGraph {
    classes: Vec<ClassDecl>,
    names: HashMap<String, ClassId>,
    root: Option<ClassId>,
}

impl ClassGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph whose first class is an implicit root.
    ///
    /// Every class later declared without bases inherits from the root, so it
    /// ends every MRO the way `object` does in Python.
    ///
    /// # Errors
    ///
    /// Never fails on a fresh graph; the `Result` mirrors [`declare`](Self::declare).
    pub fn with_root<I, M>(name: impl Into<String>, methods: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let mut graph = Self::new();
        let root = graph.declare(name, &[], methods)?;
        graph.root = Some(root);
        Ok(graph)
    }

    /// Declare a class.
    ///
    /// # Parameters
    ///
    /// - `name`: unique class name
    /// - `bases`: direct bases, in local precedence order
    /// - `methods`: methods defined directly on the class
    ///
    /// # Returns
    ///
    /// The handle assigned to the new class.
    ///
    /// # Errors
    ///
    /// - [`HierarchyError::DuplicateClass`] if `name` is taken
    /// - [`HierarchyError::UnknownBase`] if a base was not declared in this graph
    /// - [`HierarchyError::DuplicateBase`] if a base is listed twice
    ///
    /// A rejected declaration leaves the graph unchanged.
    pub fn declare<I, M>(
        &mut self,
        name: impl Into<String>,
        bases: &[ClassId],
        methods: I,
    ) -> Result<ClassId>
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(HierarchyError::DuplicateClass { name });
        }

        if let Some(base) = bases.iter().find(|b| self.classes.get(b.index()).is_none()) {
            return Err(HierarchyError::UnknownBase {
                class: name,
                base: base.to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(bases.len());
        if let Some(base) = bases.iter().find(|b| !seen.insert(**b)) {
            return Err(HierarchyError::DuplicateBase {
                base: self.classes[base.index()].name.clone(),
                class: name,
            });
        }

        let bases = match (bases.is_empty(), self.root) {
            (true, Some(root)) => vec![root],
            _ => bases.to_vec(),
        };
        let methods: BTreeSet<String> = methods.into_iter().map(Into::into).collect();

        let id = self.next_class_id();
        debug!(
            "Declaring class: id={id}, name={name}, bases={}, methods={}",
            bases.len(),
            methods.len()
        );

        self.names.insert(name.clone(), id);
        self.classes.push(ClassDecl::new(id, name, bases, methods));

        Ok(id)
    }

    /// Get a declaration by handle.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownClass`] if the handle is not in this graph.
    pub fn get_class(&self, id: ClassId) -> Result<&ClassDecl> {
        self.classes
            .get(id.index())
            .ok_or_else(|| HierarchyError::UnknownClass {
                class: id.to_string(),
            })
    }

    /// Look up a class handle by name.
    pub fn class_id(&self, name: &str) -> Result<ClassId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| HierarchyError::UnknownClass {
                class: name.to_string(),
            })
    }

    /// Direct bases of a class, in declaration order.
    pub fn bases_of(&self, id: ClassId) -> Result<&[ClassId]> {
        self.get_class(id).map(|c| c.bases.as_slice())
    }

    /// Methods defined directly on a class.
    pub fn methods_of(&self, id: ClassId) -> Result<&BTreeSet<String>> {
        self.get_class(id).map(|c| &c.methods)
    }

    /// The implicit root, if the graph was created with one.
    pub fn root(&self) -> Option<ClassId> {
        self.root
    }

    /// Get the total number of declared classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// All declarations, in declaration order.
    pub fn classes(&self) -> &[ClassDecl] {
        &self.classes
    }

    /// Freeze the graph with default options (lazy, lenient).
    pub fn finalize(self) -> Result<Hierarchy> {
        self.finalize_with(FinalizeOptions::default())
    }

    /// Freeze the graph.
    ///
    /// # Errors
    ///
    /// With [`FinalizeOptions::strict`] set, returns the first
    /// [`HierarchyError::InconsistentHierarchy`] found.
    pub fn finalize_with(self, options: FinalizeOptions) -> Result<Hierarchy> {
        Hierarchy::build(self.classes, self.names, self.root, options)
    }

    fn next_class_id(&self) -> ClassId {
        ClassId::new(self.classes.len() as u32)
    }
}
