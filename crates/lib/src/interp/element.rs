//! Materialized assignment records and ordered-list chain nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::Id;

/// A materialized assignment: `entity`'s `attribute` holds `value`, recorded
/// by the operation `origin`.
///
/// The derived `Ord` compares fields in declaration order, so every element
/// of one `(entity, attribute)` pair, and every element of one entity, forms
/// a contiguous range in a sorted set. Supersession and removal in the
/// interpreter rely on that layout to stay bounded range scans.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Element {
    /// The containing entity.
    pub entity: Id,
    /// The key entity this assignment is stored under.
    pub attribute: Id,
    /// The contained entity or value leaf.
    pub value: Id,
    /// The id of the `Assign` operation that produced this element.
    pub origin: Id,
}

impl Element {
    /// Creates an element from its parts.
    pub fn new(entity: Id, attribute: Id, value: Id, origin: Id) -> Self {
        Self {
            entity,
            attribute,
            value,
            origin,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} . {} = {}; by {})",
            self.entity, self.attribute, self.value, self.origin
        )
    }
}

/// A node in the linked-chain representation of an ordered list.
///
/// The chain is stored as a map from each link to the link that follows it;
/// a freshly created list maps `Link(list_id)` to `End`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ListLink {
    /// Points at the element with the given id.
    Link(Id),
    /// Terminates a chain.
    End,
}

impl fmt::Display for ListLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListLink::Link(id) => write!(f, "->{id}"),
            ListLink::End => write!(f, "-|"),
        }
    }
}
