//! Error types for log interpretation.

use thiserror::Error;

use crate::id::Id;

/// Errors that can occur while folding an operation log into an
/// interpretation.
///
/// The interpreter performs no I/O, so every failure here indicates a
/// data-integrity problem in the log itself: the external sync collaborator
/// delivered an operation referencing an id the log never registered.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InterpretError {
    /// An `Assign` or `Remove` referenced an id that no prior operation
    /// registered as an entity, key, or value.
    #[error("operation {op} references {target}, which is not registered in the log")]
    DanglingReference {
        /// The id of the offending operation.
        op: Id,
        /// The unregistered id it referenced.
        target: Id,
    },
}

impl InterpretError {
    /// Check if this error indicates an invalid log state.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, InterpretError::DanglingReference { .. })
    }
}

impl From<InterpretError> for crate::Error {
    fn from(err: InterpretError) -> Self {
        crate::Error::Interpret(err)
    }
}
