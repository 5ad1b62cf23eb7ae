//! The materialized view of a document and the fold that produces it.
//!
//! An [`Interpretation`] is what you get by replaying an operation log in
//! ascending [`Id`] order: the set of live assignments, the containment
//! forest, the ordered-list chains, and the entity registries. It is a
//! derived, disposable value: it never mutates the log, the log never
//! references it, and once produced it can be shared freely across threads.
//!
//! Replay order is fixed by `Id`, not by arrival order, so every replica
//! that holds the same set of `(Id, Op)` pairs materializes an identical
//! view.

mod element;
mod errors;
pub(crate) mod fold;

pub use element::{Element, ListLink};
pub use errors::InterpretError;

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use crate::id::Id;
use crate::op::Op;
use crate::scalar::Scalar;

/// The contiguous element range covering one `(entity, attribute)` pair.
pub(crate) fn attribute_range(entity: Id, attribute: Id) -> RangeInclusive<Element> {
    Element::new(entity, attribute, Id::MIN, Id::MIN)
        ..=Element::new(entity, attribute, Id::MAX, Id::MAX)
}

/// The contiguous element range covering every assignment on one entity.
pub(crate) fn entity_range(entity: Id) -> RangeInclusive<Element> {
    Element::new(entity, Id::MIN, Id::MIN, Id::MIN)
        ..=Element::new(entity, Id::MAX, Id::MAX, Id::MAX)
}

/// The materialized, read-only view produced by folding an operation log.
///
/// All accessors are borrows; nothing here mutates after construction. The
/// view records the highest folded operation id as its watermark, which is
/// what makes incremental re-interpretation possible: feeding the
/// interpreter this snapshot plus only the operations above the watermark
/// yields the same view as a full replay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Interpretation {
    /// Live assignments, ordered by `(entity, attribute, value, origin)`.
    elements: BTreeSet<Element>,
    /// Ordered-list chains: each link maps to the link that follows it.
    list_links: BTreeMap<ListLink, ListLink>,
    /// Containment forest: value id to containing entity id.
    parents: BTreeMap<Id, Id>,
    /// Container entities, by creating operation id.
    entities: BTreeMap<Id, Op>,
    /// Property-key entities, by creating operation id.
    keys: BTreeMap<Id, Op>,
    /// Scalar leaf entities, by creating operation id.
    values: BTreeMap<Id, Op>,
    /// Reverse lookup of key entities by their carried scalar.
    key_cache: BTreeMap<Scalar, Id>,
    /// Highest operation id folded into this view.
    watermark: Id,
    /// Count of operations folded into this view.
    folded: usize,
}

impl Interpretation {
    /// The live assignment set.
    pub fn elements(&self) -> &BTreeSet<Element> {
        &self.elements
    }

    /// The live assignments for one `(entity, attribute)` pair, in order.
    pub fn elements_for(&self, entity: Id, attribute: Id) -> impl Iterator<Item = &Element> {
        self.elements.range(attribute_range(entity, attribute))
    }

    /// The ordered-list chain map.
    pub fn list_links(&self) -> &BTreeMap<ListLink, ListLink> {
        &self.list_links
    }

    /// The containment forest: value id to containing entity id.
    pub fn parents(&self) -> &BTreeMap<Id, Id> {
        &self.parents
    }

    /// The entity currently containing `value`, if any.
    pub fn parent_of(&self, value: Id) -> Option<Id> {
        self.parents.get(&value).copied()
    }

    /// True when `ancestor` transitively contains `id` in the containment
    /// forest.
    pub fn is_ancestor(&self, ancestor: Id, id: Id) -> bool {
        let mut cursor = id;
        while let Some(&parent) = self.parents.get(&cursor) {
            if parent == ancestor {
                return true;
            }
            cursor = parent;
        }
        false
    }

    /// Container entities, keyed by their creating operation id.
    pub fn entities(&self) -> &BTreeMap<Id, Op> {
        &self.entities
    }

    /// Property-key entities, keyed by their creating operation id.
    pub fn keys(&self) -> &BTreeMap<Id, Op> {
        &self.keys
    }

    /// Scalar leaf entities, keyed by their creating operation id.
    pub fn values(&self) -> &BTreeMap<Id, Op> {
        &self.values
    }

    /// Reverse lookup of key entities by their carried scalar.
    pub fn key_cache(&self) -> &BTreeMap<Scalar, Id> {
        &self.key_cache
    }

    /// The key entity currently cached for `scalar`, if any.
    pub fn attribute_id(&self, scalar: &Scalar) -> Option<Id> {
        self.key_cache.get(scalar).copied()
    }

    /// The highest operation id folded into this view.
    pub fn watermark(&self) -> Id {
        self.watermark
    }

    /// The number of operations folded into this view.
    ///
    /// Together with the watermark this identifies the exact log prefix the
    /// view was built from: if the log later merges an operation with an id
    /// at or below the watermark, the count no longer matches the prefix and
    /// the view cannot be extended incrementally.
    pub fn folded(&self) -> usize {
        self.folded
    }

    /// Lazily walks the chain of the list entity `list`, yielding element
    /// ids in list order.
    ///
    /// The traversal starts at `Link(list)`, follows successor links, and
    /// terminates at `End`; it never yields the list entity itself and can
    /// be restarted by calling this again. An id with no chain entry yields
    /// an empty traversal.
    pub fn list_iter(&self, list: Id) -> ListIter<'_> {
        ListIter {
            links: &self.list_links,
            cursor: ListLink::Link(list),
        }
    }
}

/// Lazy, restartable traversal over one ordered-list chain.
///
/// Created by [`Interpretation::list_iter`].
#[derive(Debug, Clone)]
pub struct ListIter<'a> {
    links: &'a BTreeMap<ListLink, ListLink>,
    cursor: ListLink,
}

impl Iterator for ListIter<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        match self.links.get(&self.cursor) {
            Some(ListLink::Link(to)) => {
                let id = *to;
                self.cursor = ListLink::Link(id);
                Some(id)
            }
            Some(ListLink::End) | None => None,
        }
    }
}
