//! C3 linearization.
//!
//! The MRO of a class `C` with bases `B1..Bn` is
//! `[C] ++ merge(MRO(B1), ..., MRO(Bn), [B1, ..., Bn])`. The merge repeatedly
//! takes the first list head that does not occur in the tail of any list. If
//! every head is blocked the hierarchy is inconsistent and no order exists.
//!
//! This module holds the pure merge. Caching and the mapping from handles to
//! declarations live in [`Hierarchy`](crate::Hierarchy).

use crate::graph::ClassId;
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;

/// The method resolution order of one class.
///
/// The class itself comes first, followed by every ancestor exactly once.
/// Cloning is cheap; all clones share one slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Linearization(Arc<[ClassId]>);

impl Linearization {
    /// All classes in resolution order.
    pub fn classes(&self) -> &[ClassId] {
        &self.0
    }

    /// Iterate in resolution order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassId> {
        self.0.iter()
    }

    /// Number of classes, including the class itself.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a linearization produced by a hierarchy.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The class this linearization belongs to.
    pub fn head(&self) -> Option<ClassId> {
        self.0.first().copied()
    }

    /// Ancestors only, in resolution order.
    pub fn ancestors(&self) -> &[ClassId] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// Index of `class` in the order.
    pub fn position(&self, class: ClassId) -> Option<usize> {
        self.0.iter().position(|&c| c == class)
    }

    /// Whether `class` occurs in the order.
    pub fn contains(&self, class: ClassId) -> bool {
        self.0.contains(&class)
    }

    /// The part of the order strictly past `class`.
    pub fn after(&self, class: ClassId) -> Option<&[ClassId]> {
        self.position(class).map(|pos| &self.0[pos + 1..])
    }
}

impl From<Vec<ClassId>> for Linearization {
    fn from(classes: Vec<ClassId>) -> Self {
        Self(classes.into())
    }
}

impl<'a> IntoIterator for &'a Linearization {
    type Item = &'a ClassId;
    type IntoIter = std::slice::Iter<'a, ClassId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A stalled merge: every remaining head occurs in some list's tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    /// Distinct remaining heads, in input list order
    pub conflicting: Vec<ClassId>,
}

/// Compute the C3 linearization of `class`.
///
/// `base_mros` must hold the linearization of each entry of `bases`, in the
/// same order. The base list itself takes part in the merge as the final
/// input, which is what enforces local precedence order.
///
/// # Errors
///
/// Returns a [`MergeConflict`] naming the blocked heads when no consistent
/// order exists. No partial order is produced.
pub fn merge(
    class: ClassId,
    bases: &[ClassId],
    base_mros: &[Linearization],
) -> std::result::Result<Linearization, MergeConflict> {
    let lists: Vec<&[ClassId]> = base_mros
        .iter()
        .map(Linearization::classes)
        .chain(std::iter::once(bases))
        .filter(|list| !list.is_empty())
        .collect();

    // How many lists hold a class somewhere past their cursor.
    let mut tail_counts: HashMap<ClassId, usize> = HashMap::new();
    for list in &lists {
        for &c in &list[1..] {
            *tail_counts.entry(c).or_default() += 1;
        }
    }

    let capacity = 1 + base_mros.iter().map(Linearization::len).max().unwrap_or(0);
    let mut result = Vec::with_capacity(capacity);
    result.push(class);

    let mut cursors = vec![0usize; lists.len()];

    loop {
        let mut exhausted = true;
        let mut candidate = None;

        for (list, &cursor) in lists.iter().zip(&cursors) {
            if let Some(&head) = list.get(cursor) {
                exhausted = false;
                if tail_counts.get(&head).copied().unwrap_or(0) == 0 {
                    candidate = Some(head);
                    break;
                }
            }
        }

        if exhausted {
            return Ok(result.into());
        }

        let Some(head) = candidate else {
            let mut conflicting = Vec::new();
            for (list, &cursor) in lists.iter().zip(&cursors) {
                if let Some(&head) = list.get(cursor) {
                    if !conflicting.contains(&head) {
                        conflicting.push(head);
                    }
                }
            }
            trace!("C3 merge for {class} stalled on {conflicting:?}");
            return Err(MergeConflict { conflicting });
        };

        trace!("C3 merge for {class}: selected {head}");
        result.push(head);

        for (list, cursor) in lists.iter().zip(cursors.iter_mut()) {
            if list.get(*cursor) == Some(&head) {
                *cursor += 1;
                if let Some(next) = list.get(*cursor) {
                    if let Some(count) = tail_counts.get_mut(next) {
                        *count -= 1;
                    }
                }
            }
        }
    }
}
