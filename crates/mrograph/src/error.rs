//! Error types for hierarchy construction, linearization and dispatch.
//!
//! All fallible operations return [`Result<T>`]. Messages name classes by
//! their declared name rather than by raw [`ClassId`](crate::ClassId).

use thiserror::Error;

/// Result type alias for mrograph operations.
pub type Result<T> = std::result::Result<T, HierarchyError>;

/// Every failure a class graph, linearizer or dispatch query can report.
///
/// Construction and reference errors reject a single declaration or query and
/// leave the graph untouched. Dispatch misses are always recoverable by the
/// caller.
#[derive(Error, Debug)]
pub enum HierarchyError {
    /// A class with this name was already declared
    #[error("Class already declared: {name}")]
    DuplicateClass {
        /// Name of the rejected class
        name: String,
    },

    /// The same base appears twice in one declaration
    #[error("Duplicate base '{base}' in declaration of {class}")]
    DuplicateBase {
        /// Class being declared
        class: String,
        /// Base listed more than once
        base: String,
    },

    /// A base handle was not assigned by this graph
    #[error("Unknown base {base} in declaration of {class}")]
    UnknownBase {
        /// Class being declared
        class: String,
        /// Debug rendering of the offending handle
        base: String,
    },

    /// Referenced class is not in the graph
    #[error("Class not found: {class}")]
    UnknownClass {
        /// Name or handle that failed to resolve
        class: String,
    },

    /// C3 merge found no valid head
    #[error(
        "Cannot create a consistent method resolution order for {class}: conflicting bases {}",
        .conflicting.join(", ")
    )]
    InconsistentHierarchy {
        /// Class whose linearization failed
        class: String,
        /// Heads left in the merge when it stalled
        conflicting: Vec<String>,
    },

    /// No class in the MRO defines the method
    #[error("Method '{method}' not found in the MRO of {class}")]
    MethodNotFound {
        /// Class the lookup started from
        class: String,
        /// Method name
        method: String,
    },

    /// Nothing past `after` in the MRO defines the method
    #[error("No implementation of '{method}' after {after} in the MRO of {class}")]
    NoNextImplementation {
        /// Class whose MRO is being walked
        class: String,
        /// Method name
        method: String,
        /// Position the search started past
        after: String,
    },

    /// `after` is not an ancestor of `class`
    #[error("{after} is not in the MRO of {class}")]
    NotInMro {
        /// Class whose MRO was searched
        class: String,
        /// Class that was expected in it
        after: String,
    },

    /// Invalid operation (e.g., exporting an oversized hierarchy)
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of what went wrong
        message: String,
    },

    /// Export failure (serialization)
    #[error("Export error: {message}")]
    Export {
        /// Detailed error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl HierarchyError {
    /// Create an export error from a message and optional source.
    pub fn export<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Export {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Whether this is a dispatch-time lookup miss.
    ///
    /// Callers that treat a missing implementation as "do nothing further"
    /// can branch on this instead of matching both variants.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            Self::MethodNotFound { .. } | Self::NoNextImplementation { .. }
        )
    }
}
