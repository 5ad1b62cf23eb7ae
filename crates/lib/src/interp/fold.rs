//! The replay fold that turns an ordered operation stream into a view.
//!
//! The fold consumes `(Id, Op)` pairs in ascending id order and applies each
//! one to a working [`Interpretation`]. Seeding the fold with a prior
//! snapshot and only the operations above its watermark is equivalent to
//! replaying the full log from scratch.

use tracing::{debug, trace};

use super::{Element, Interpretation, InterpretError, ListLink, attribute_range, entity_range};
use crate::id::Id;
use crate::op::Op;

/// Folds `ops` into `view`, advancing the watermark past every consumed id.
///
/// Callers must supply operations in ascending id order, all strictly above
/// `view.watermark()`; [`crate::opset::OpSet`] guarantees both by iterating
/// its sorted map under the log lock.
pub(crate) fn fold<'a, I>(
    ops: I,
    mut view: Interpretation,
) -> Result<Interpretation, InterpretError>
where
    I: IntoIterator<Item = (&'a Id, &'a Op)>,
{
    for (&id, op) in ops {
        apply(&mut view, id, op)?;
        view.watermark = id;
        view.folded += 1;
    }
    Ok(view)
}

fn apply(view: &mut Interpretation, id: Id, op: &Op) -> Result<(), InterpretError> {
    trace!(op = %id, kind = op.kind(), "applying operation");
    match op {
        // Already consumed by the log for `creator`.
        Op::Root { .. } => {}
        Op::MakeMap { .. } | Op::MakeSet { .. } | Op::MakeText { .. } => {
            view.entities.insert(id, op.clone());
        }
        Op::MakeList { .. } | Op::MakeVector { .. } => {
            view.entities.insert(id, op.clone());
            view.list_links.insert(ListLink::Link(id), ListLink::End);
        }
        Op::MakeKey { value } => {
            view.keys.insert(id, op.clone());
            // Last writer for a given scalar wins the cache slot; the key
            // entity itself is never removed.
            view.key_cache.insert(value.clone(), id);
        }
        Op::MakeValue { .. } => {
            view.values.insert(id, op.clone());
        }
        Op::Insert { after } => insert(view, id, *after),
        Op::Assign {
            entity,
            attribute,
            value,
        } => assign(view, id, *entity, *attribute, *value)?,
        Op::Remove { entity, attribute } => remove(view, id, *entity, *attribute)?,
    }
    Ok(())
}

/// Splices `id` into an ordered-list chain immediately after `after`.
fn insert(view: &mut Interpretation, id: Id, after: Id) {
    let prev = ListLink::Link(after);
    match view.list_links.get(&prev).copied() {
        Some(next) => {
            view.list_links.insert(prev, ListLink::Link(id));
            view.list_links.insert(ListLink::Link(id), next);
        }
        None => {
            // Stale or concurrently detached predecessor: the element stays
            // unlinked but its id remains valid for later operations.
            debug!(op = %id, %after, "insert references an unknown list link, leaving element unlinked");
        }
    }
}

/// Records an assignment, enforcing the cycle and single-location
/// invariants.
fn assign(
    view: &mut Interpretation,
    id: Id,
    entity: Id,
    attribute: Id,
    value: Id,
) -> Result<(), InterpretError> {
    require_entity(view, id, entity)?;
    require_key(view, id, attribute)?;
    require_containable(view, id, value)?;

    // An entity may never directly or transitively contain itself.
    if value == entity || view.is_ancestor(value, entity) {
        debug!(op = %id, %entity, %value, "assignment would create a containment cycle, skipping");
        return Ok(());
    }

    // A value lives in at most one place: detach it from its previous
    // location before recording the new one.
    if let Some(prev_entity) = view.parents.remove(&value) {
        let stale: Vec<Element> = view
            .elements
            .range(entity_range(prev_entity))
            .filter(|el| el.value == value)
            .copied()
            .collect();
        for el in stale {
            view.elements.remove(&el);
        }
    }

    // Last assignment wins per (entity, attribute): every older tuple in
    // the range is superseded, and its value leaves the containment forest.
    let superseded: Vec<Element> = view
        .elements
        .range(attribute_range(entity, attribute))
        .copied()
        .collect();
    for el in superseded {
        view.parents.remove(&el.value);
        view.elements.remove(&el);
    }

    view.parents.insert(value, entity);
    view.elements.insert(Element::new(entity, attribute, value, id));
    Ok(())
}

/// Tombstones every live assignment of `attribute` on `entity`.
fn remove(
    view: &mut Interpretation,
    id: Id,
    entity: Id,
    attribute: Id,
) -> Result<(), InterpretError> {
    require_entity(view, id, entity)?;
    require_key(view, id, attribute)?;

    let dead: Vec<Element> = view
        .elements
        .range(attribute_range(entity, attribute))
        .copied()
        .collect();
    for el in dead {
        view.parents.remove(&el.value);
        view.elements.remove(&el);
    }
    Ok(())
}

fn require_entity(view: &Interpretation, op: Id, target: Id) -> Result<(), InterpretError> {
    if view.entities.contains_key(&target) {
        Ok(())
    } else {
        Err(InterpretError::DanglingReference { op, target })
    }
}

fn require_key(view: &Interpretation, op: Id, target: Id) -> Result<(), InterpretError> {
    if view.keys.contains_key(&target) {
        Ok(())
    } else {
        Err(InterpretError::DanglingReference { op, target })
    }
}

fn require_containable(view: &Interpretation, op: Id, target: Id) -> Result<(), InterpretError> {
    if view.entities.contains_key(&target) || view.values.contains_key(&target) {
        Ok(())
    } else {
        Err(InterpretError::DanglingReference { op, target })
    }
}
