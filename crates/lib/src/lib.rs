//!
//! Converge: the interpretation engine of an operation-based CRDT document
//! store.
//!
//! A document is a replicated, JSON-like value (maps, ordered lists, sets,
//! text, and scalar leaves) whose state is defined as a deterministic fold
//! over an append-only, globally ordered log of operations contributed by
//! independent replicas with no coordination.
//!
//! ## Core Concepts
//!
//! * **Identifiers (`id::Id`)**: a `(counter, actor)` pair; the document's
//!   causal, total-order operation key. Ordering is replica-independent, so
//!   every replica agrees on replay order without wall clocks or
//!   coordination.
//! * **Operations (`op::Op`)**: a closed set of document construction and
//!   mutation commands; one per log entry.
//! * **Operation log (`opset::OpSet`)**: the append-only, uniqueness-enforcing,
//!   causally sorted collection of `(Id, Op)` pairs for one document, guarded
//!   by an explicit mutex at its API boundary.
//! * **Interpretation (`interp::Interpretation`)**: the materialized view
//!   produced by replaying the log: live assignments, containment forest,
//!   ordered-list chains, and entity registries. Immutable and freely
//!   shareable once produced; supports incremental re-interpretation from a
//!   prior snapshot's watermark.
//!
//! Transport, wire serialization, persistence, and user-facing document APIs
//! are external collaborators; this crate is the deterministic core they
//! build on.

pub mod id;
pub mod interp;
pub mod op;
pub mod opset;
pub mod scalar;

pub use id::{Actor, Counter, Id};
pub use interp::{Element, Interpretation, ListLink};
pub use op::Op;
pub use opset::OpSet;
pub use scalar::Scalar;

/// Result type used throughout the Converge library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Converge library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured identifier errors from the id module
    #[error(transparent)]
    Id(id::IdError),

    /// Structured operation log errors from the opset module
    #[error(transparent)]
    OpSet(opset::OpSetError),

    /// Structured interpretation errors from the interp module
    #[error(transparent)]
    Interpret(interp::InterpretError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Id(_) => "id",
            Error::OpSet(_) => "opset",
            Error::Interpret(_) => "interp",
        }
    }

    /// Check if this error is an invalid-argument failure.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Id(id_err) => id_err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error indicates an id conflict (already exists).
    pub fn is_already_exists(&self) -> bool {
        match self {
            Error::OpSet(opset_err) => opset_err.is_already_exists(),
            _ => false,
        }
    }

    /// Check if this error indicates a corrupted or malformed log.
    pub fn is_invalid_state(&self) -> bool {
        match self {
            Error::OpSet(opset_err) => opset_err.is_invalid_state(),
            Error::Interpret(interp_err) => interp_err.is_invalid_state(),
            _ => false,
        }
    }
}
