//! Error types for identifier construction.

use thiserror::Error;

/// Errors that can occur while constructing identifiers.
///
/// Both variants are invalid-argument failures: identifier components are
/// non-negative by contract and construction is the only place that can be
/// violated.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum IdError {
    /// An actor was constructed with a negative value.
    #[error("Actor value must be non-negative, but was {value}")]
    NegativeActor {
        /// The rejected value.
        value: i64,
    },

    /// A counter was constructed with a negative value.
    #[error("Counter value must be non-negative, but was {value}")]
    NegativeCounter {
        /// The rejected value.
        value: i64,
    },
}

impl IdError {
    /// Check if this error is an invalid-argument failure.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            IdError::NegativeActor { .. } | IdError::NegativeCounter { .. }
        )
    }
}

impl From<IdError> for crate::Error {
    fn from(err: IdError) -> Self {
        crate::Error::Id(err)
    }
}
