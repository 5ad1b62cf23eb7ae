//! The operation model: the closed set of log entry variants.
//!
//! Every entry in a document's log is one [`Op`]. The `Make*` variants
//! create entities (containers, property keys, scalar leaves) that are
//! identified by their own operation [`Id`]; `Insert`, `Assign`, and
//! `Remove` mutate structure by referencing previously created ids.
//! Exhaustive matching in the interpreter guarantees every variant is
//! handled.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::id::{Actor, Id};
use crate::scalar::Scalar;

/// One entry in the operation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Declares the document's globally unique identity and originating
    /// actor. Exactly one per log, always stored at [`Id::MIN`].
    Root {
        /// Globally unique document identity.
        doc: Uuid,
        /// The actor that created the document.
        creator: Actor,
    },

    /// Creates an unordered map entity.
    MakeMap {
        /// True when this entity is the document's root container.
        root: bool,
    },

    /// Creates a vector entity; seeds an empty ordered-list chain.
    MakeVector {
        /// True when this entity is the document's root container.
        root: bool,
    },

    /// Creates a set entity.
    MakeSet {
        /// True when this entity is the document's root container.
        root: bool,
    },

    /// Creates a list entity; seeds an empty ordered-list chain.
    MakeList {
        /// True when this entity is the document's root container.
        root: bool,
    },

    /// Creates a text entity.
    MakeText {
        /// True when this entity is the document's root container.
        root: bool,
    },

    /// Creates a property-key entity carrying a scalar, addressable by that
    /// scalar through the interpretation's key cache.
    MakeKey {
        /// The key's payload, typically a string or index.
        value: Scalar,
    },

    /// Creates an immutable scalar leaf entity.
    MakeValue {
        /// True when this value stands alone as the document root.
        root: bool,
        /// The leaf's payload.
        value: Scalar,
    },

    /// Splices this operation's element into an ordered-list chain
    /// immediately after the element identified by `after` (or after the
    /// list head when `after` is the list entity itself).
    Insert {
        /// The element to splice after.
        after: Id,
    },

    /// Records that `entity`'s `attribute` currently holds `value`.
    Assign {
        /// The containing entity.
        entity: Id,
        /// A previously created key entity.
        attribute: Id,
        /// A previously created entity or value leaf.
        value: Id,
    },

    /// Tombstones the current assignment of `attribute` on `entity`.
    Remove {
        /// The containing entity.
        entity: Id,
        /// The key entity whose assignment is removed.
        attribute: Id,
    },
}

impl Op {
    /// Returns true for the `Root` variant.
    pub fn is_root(&self) -> bool {
        matches!(self, Op::Root { .. })
    }

    /// Returns the creator actor when this is a `Root` operation.
    pub fn creator(&self) -> Option<Actor> {
        match self {
            Op::Root { creator, .. } => Some(*creator),
            _ => None,
        }
    }

    /// A short name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Op::Root { .. } => "Root",
            Op::MakeMap { .. } => "MakeMap",
            Op::MakeVector { .. } => "MakeVector",
            Op::MakeSet { .. } => "MakeSet",
            Op::MakeList { .. } => "MakeList",
            Op::MakeText { .. } => "MakeText",
            Op::MakeKey { .. } => "MakeKey",
            Op::MakeValue { .. } => "MakeValue",
            Op::Insert { .. } => "Insert",
            Op::Assign { .. } => "Assign",
            Op::Remove { .. } => "Remove",
        }
    }
}
