//! Error types for operation log mutation.

use thiserror::Error;

use crate::id::Id;

/// Errors that can occur while mutating or inspecting an operation log.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OpSetError {
    /// An operation was inserted at an id the log already holds. The log is
    /// strictly append-only: no overwrite, no silent idempotent insert.
    #[error("an operation with id {id} is already present in the log")]
    DuplicateOp {
        /// The id that was already occupied.
        id: Id,
    },

    /// The log's minimum-keyed entry is not a `Root` operation, which means
    /// the log was corrupted or improperly constructed.
    #[error("the log's minimum-keyed entry is not a Root operation")]
    MissingRoot,
}

impl OpSetError {
    /// Check if this error indicates an already-occupied id.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, OpSetError::DuplicateOp { .. })
    }

    /// Check if this error indicates a corrupted log.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, OpSetError::MissingRoot)
    }
}

impl From<OpSetError> for crate::Error {
    fn from(err: OpSetError) -> Self {
        crate::Error::OpSet(err)
    }
}
