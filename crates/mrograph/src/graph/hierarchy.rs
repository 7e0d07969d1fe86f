//! The frozen class hierarchy and its linearization cache.

use super::types::{ClassDecl, ClassId};
use crate::dispatch::DispatchResolver;
use crate::error::{HierarchyError, Result};
use crate::linearize::{self, Linearization};
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

/// Options controlling [`ClassGraph::finalize_with`](super::ClassGraph::finalize_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeOptions {
    /// Linearize every class during finalize instead of on first query.
    pub eager: bool,
    /// Fail finalize on the first inconsistent class. Implies `eager`.
    pub strict: bool,
}

impl FinalizeOptions {
    /// Lazy, lenient finalize.
    pub fn lazy() -> Self {
        Self::default()
    }

    /// Linearize everything up front, keeping inconsistent classes as cached errors.
    pub fn eager() -> Self {
        Self {
            eager: true,
            strict: false,
        }
    }

    /// Linearize everything up front and reject any inconsistency.
    pub fn strict() -> Self {
        Self {
            eager: true,
            strict: true,
        }
    }
}

/// Cached failure of one merge. `class` is where the merge stalled, which
/// may be a base of the class that was queried.
#[derive(Debug, Clone)]
struct Inconsistency {
    class: ClassId,
    conflicting: Vec<ClassId>,
}

type CachedMro = std::result::Result<Linearization, Inconsistency>;

/// A finalized, read-only class hierarchy.
///
/// All queries take `&self`, and the type is `Send + Sync`, so one hierarchy
/// can serve concurrent lookups behind an `Arc`. Linearizations are computed
/// at most once per class; concurrent first queries for the same class block
/// on the same cache cell rather than merging twice.
#[derive(Debug)]
pub struct Hierarchy {
    classes: Vec<ClassDecl>,
    names: HashMap<String, ClassId>,
    subclasses: Vec<Vec<ClassId>>,
    root: Option<ClassId>,
    mro_cache: Vec<OnceLock<CachedMro>>,
}

impl Hierarchy {
    pub(super) fn build(
        classes: Vec<ClassDecl>,
        names: HashMap<String, ClassId>,
        root: Option<ClassId>,
        options: FinalizeOptions,
    ) -> Result<Self> {
        let mut subclasses = vec![Vec::new(); classes.len()];
        for class in &classes {
            for base in &class.bases {
                subclasses[base.index()].push(class.id);
            }
        }

        let mro_cache = (0..classes.len()).map(|_| OnceLock::new()).collect();
        let hierarchy = Self {
            classes,
            names,
            subclasses,
            root,
            mro_cache,
        };

        info!(
            "Finalized hierarchy: {} classes (eager={}, strict={})",
            hierarchy.class_count(),
            options.eager || options.strict,
            options.strict
        );

        if options.eager || options.strict {
            let inconsistent = hierarchy.inconsistent_classes();
            if let Some(&first) = inconsistent.first() {
                if options.strict {
                    hierarchy.linearize(first)?;
                }
                for &id in &inconsistent {
                    warn!(
                        "Class {} has no consistent method resolution order",
                        hierarchy.name_of(id)
                    );
                }
            }
        }

        Ok(hierarchy)
    }

    // ===== Declaration Lookups =====

    /// Get a declaration by handle.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownClass`] if the handle is not in this hierarchy.
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

    /// Direct subclasses of a class, in declaration order.
    pub fn subclasses(&self, id: ClassId) -> Result<&[ClassId]> {
        self.get_class(id)?;
        Ok(&self.subclasses[id.index()])
    }

    /// The implicit root, if the graph was created with one.
    pub fn root(&self) -> Option<ClassId> {
        self.root
    }

    /// Get the total number of classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// All declarations, in declaration order.
    pub fn classes(&self) -> &[ClassDecl] {
        &self.classes
    }

    /// Class name for messages; falls back to the raw handle.
    pub(crate) fn name_of(&self, id: ClassId) -> String {
        self.classes
            .get(id.index())
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    // ===== Linearization =====

    /// The method resolution order of a class.
    ///
    /// Computed on first use and cached; later calls return the same
    /// sequence.
    ///
    /// # Errors
    ///
    /// - [`HierarchyError::UnknownClass`] if the handle is not in this hierarchy
    /// - [`HierarchyError::InconsistentHierarchy`] if the class, or one of its
    ///   ancestors, has no C3 linearization
    pub fn linearize(&self, id: ClassId) -> Result<Linearization> {
        self.get_class(id)?;
        self.prepare(id);

        match self.cached(id) {
            Ok(mro) => Ok(mro.clone()),
            Err(inconsistency) => Err(self.inconsistency_error(inconsistency)),
        }
    }

    /// MRO rendered as class names.
    pub fn mro_names(&self, id: ClassId) -> Result<Vec<String>> {
        let mro = self.linearize(id)?;
        Ok(mro.iter().map(|&c| self.name_of(c)).collect())
    }

    /// Ancestors in resolution order, without the class itself.
    pub fn ancestors(&self, id: ClassId) -> Result<Vec<ClassId>> {
        Ok(self.linearize(id)?.ancestors().to_vec())
    }

    /// Whether `sub` is `sup` or inherits from it.
    pub fn is_subclass(&self, sub: ClassId, sup: ClassId) -> Result<bool> {
        self.get_class(sup)?;
        Ok(self.linearize(sub)?.contains(sup))
    }

    /// Linearize every class and return those that have no consistent order,
    /// in declaration order. Descendants of an inconsistent class are included.
    pub fn inconsistent_classes(&self) -> Vec<ClassId> {
        self.classes
            .iter()
            .map(|c| c.id)
            .filter(|&id| self.cached(id).is_err())
            .collect()
    }

    /// Create a dispatch resolver over this hierarchy.
    pub fn resolver(&self) -> DispatchResolver<'_> {
        DispatchResolver::new(self)
    }

    /// Fill the cache for every uncached ancestor of `id`, bases first.
    ///
    /// Handles are assigned in declaration order and bases are declared
    /// before dependents, so ascending handle order is a topological order.
    /// Working through it keeps [`compute`](Self::compute) from recursing.
    fn prepare(&self, id: ClassId) {
        if self.mro_cache[id.index()].get().is_some() {
            return;
        }

        let mut pending = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![id];
        visited.insert(id);

        while let Some(current) = stack.pop() {
            if self.mro_cache[current.index()].get().is_some() {
                continue;
            }
            pending.push(current);
            for &base in &self.classes[current.index()].bases {
                if visited.insert(base) {
                    stack.push(base);
                }
            }
        }

        pending.sort_unstable();
        for class in pending {
            self.cached(class);
        }
    }

    fn cached(&self, id: ClassId) -> &CachedMro {
        self.mro_cache[id.index()].get_or_init(|| self.compute(id))
    }

    fn compute(&self, id: ClassId) -> CachedMro {
        let class = &self.classes[id.index()];

        let mut base_mros = Vec::with_capacity(class.bases.len());
        for &base in &class.bases {
            match self.cached(base) {
                Ok(mro) => base_mros.push(mro.clone()),
                Err(inconsistency) => return Err(inconsistency.clone()),
            }
        }

        match linearize::merge(id, &class.bases, &base_mros) {
            Ok(mro) => {
                debug!("Linearized {}: {} classes", class.name, mro.len());
                Ok(mro)
            }
            Err(conflict) => {
                debug!(
                    "Linearization of {} failed on {} conflicting heads",
                    class.name,
                    conflict.conflicting.len()
                );
                Err(Inconsistency {
                    class: id,
                    conflicting: conflict.conflicting,
                })
            }
        }
    }

    fn inconsistency_error(&self, inconsistency: &Inconsistency) -> HierarchyError {
        HierarchyError::InconsistentHierarchy {
            class: self.name_of(inconsistency.class),
            conflicting: inconsistency
                .conflicting
                .iter()
                .map(|&c| self.name_of(c))
                .collect(),
        }
    }
}
