//! Method lookup and cooperative dispatch over cached linearizations.
//!
//! [`DispatchResolver::resolve_first`] is ordinary method lookup: the first
//! class in the MRO that defines the method. [`DispatchResolver::resolve_next`]
//! is the `super()` step: given the class whose implementation is running,
//! find the next definer further along the *same* MRO. Threading that
//! position through explicitly is what lets every override in a diamond run
//! exactly once. [`CooperativeChain`] packages the position as a cursor.

use crate::error::{HierarchyError, Result};
use crate::graph::{ClassId, Hierarchy};
use crate::linearize::Linearization;

/// Read-only method lookup over a finalized [`Hierarchy`].
#[derive(Debug, Clone, Copy)]
pub struct DispatchResolver<'h> {
    hierarchy: &'h Hierarchy,
}

impl<'h> DispatchResolver<'h> {
    /// Create a resolver borrowing `hierarchy`.
    pub fn new(hierarchy: &'h Hierarchy) -> Self {
        Self { hierarchy }
    }

    /// The hierarchy this resolver reads from.
    pub fn hierarchy(&self) -> &'h Hierarchy {
        self.hierarchy
    }

    /// First class in the MRO of `class` (itself included) that defines `method`.
    ///
    /// # Errors
    ///
    /// - [`HierarchyError::MethodNotFound`] if no class in the MRO defines it
    /// - any error from [`Hierarchy::linearize`]
    pub fn resolve_first(&self, class: ClassId, method: &str) -> Result<ClassId> {
        let mro = self.hierarchy.linearize(class)?;
        self.find_from(&mro, 0, method)
            .map(|(_, owner)| owner)
            .ok_or_else(|| HierarchyError::MethodNotFound {
                class: self.hierarchy.name_of(class),
                method: method.to_string(),
            })
    }

    /// Next class strictly past `after` in the MRO of `class` that defines `method`.
    ///
    /// `class` is the class the call chain started from, not `after`; the
    /// search always runs along the starting class's MRO.
    ///
    /// # Errors
    ///
    /// - [`HierarchyError::NotInMro`] if `after` is not in the MRO of `class`
    /// - [`HierarchyError::NoNextImplementation`] if no later class defines it
    /// - any error from [`Hierarchy::linearize`]
    pub fn resolve_next(&self, class: ClassId, method: &str, after: ClassId) -> Result<ClassId> {
        let mro = self.hierarchy.linearize(class)?;
        let position = self.position_in(&mro, class, after)?;
        self.find_from(&mro, position + 1, method)
            .map(|(_, owner)| owner)
            .ok_or_else(|| self.no_next(class, method, after))
    }

    /// Every class in the MRO of `class` that defines `method`, in MRO order.
    ///
    /// Empty when nothing defines it.
    pub fn implementations(&self, class: ClassId, method: &str) -> Result<Vec<ClassId>> {
        let mro = self.hierarchy.linearize(class)?;
        Ok(mro
            .iter()
            .copied()
            .filter(|&c| self.defines(c, method))
            .collect())
    }

    /// Start a cooperative call chain at the first implementation of `method`.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_first`](Self::resolve_first).
    pub fn chain(&self, class: ClassId, method: &str) -> Result<CooperativeChain<'h>> {
        let mro = self.hierarchy.linearize(class)?;
        let (position, _) = self.find_from(&mro, 0, method).ok_or_else(|| {
            HierarchyError::MethodNotFound {
                class: self.hierarchy.name_of(class),
                method: method.to_string(),
            }
        })?;

        Ok(CooperativeChain {
            resolver: *self,
            class,
            method: method.to_string(),
            mro,
            position,
            finished: false,
            started: false,
        })
    }

    fn defines(&self, class: ClassId, method: &str) -> bool {
        self.hierarchy
            .get_class(class)
            .map(|c| c.defines(method))
            .unwrap_or(false)
    }

    fn find_from(&self, mro: &Linearization, start: usize, method: &str) -> Option<(usize, ClassId)> {
        mro.classes()
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, &c)| self.defines(c, method))
            .map(|(pos, &c)| (pos, c))
    }

    fn position_in(&self, mro: &Linearization, class: ClassId, after: ClassId) -> Result<usize> {
        mro.position(after).ok_or_else(|| HierarchyError::NotInMro {
            class: self.hierarchy.name_of(class),
            after: self.hierarchy.name_of(after),
        })
    }

    fn no_next(&self, class: ClassId, method: &str, after: ClassId) -> HierarchyError {
        HierarchyError::NoNextImplementation {
            class: self.hierarchy.name_of(class),
            method: method.to_string(),
            after: self.hierarchy.name_of(after),
        }
    }
}

/// Cursor over one cooperative call chain.
///
/// The only state is the MRO position of the implementation currently
/// executing. It moves strictly forward and never revisits a class. Use
/// [`forward`](Self::forward) at each `super()` call site, or iterate to visit
/// every implementation in order.
#[derive(Debug, Clone)]
pub struct CooperativeChain<'h> {
    resolver: DispatchResolver<'h>,
    class: ClassId,
    method: String,
    mro: Linearization,
    position: usize,
    finished: bool,
    started: bool,
}

impl<'h> CooperativeChain<'h> {
    /// Class the chain was started from.
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// Method being dispatched.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Class whose implementation is currently executing, or `None` once
    /// the chain has run past its last implementation.
    pub fn current(&self) -> Option<ClassId> {
        (!self.finished).then(|| self.mro.classes()[self.position])
    }

    /// Move to the next implementation and return its class.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::NoNextImplementation`] when the current
    /// implementation is the last one. The chain is then finished and
    /// [`current`](Self::current) returns `None`.
    pub fn forward(&mut self) -> Result<ClassId> {
        let after = self.mro.classes()[self.position];
        self.started = true;
        if self.finished {
            return Err(self.resolver.no_next(self.class, &self.method, after));
        }

        match self.resolver.find_from(&self.mro, self.position + 1, &self.method) {
            Some((next, owner)) => {
                self.position = next;
                Ok(owner)
            }
            None => {
                self.finished = true;
                Err(self.resolver.no_next(self.class, &self.method, after))
            }
        }
    }

    /// Like [`forward`](Self::forward), but treats the end of the chain as
    /// "do nothing further".
    pub fn forward_or_stop(&mut self) -> Option<ClassId> {
        self.forward().ok()
    }
}

impl Iterator for CooperativeChain<'_> {
    type Item = ClassId;

    /// Yields the current implementation first, then each later one.
    fn next(&mut self) -> Option<ClassId> {
        if !self.started {
            self.started = true;
            return self.current();
        }
        self.forward_or_stop()
    }
}
