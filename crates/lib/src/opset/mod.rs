//! The append-only, causally-ordered operation log for one document.
//!
//! An [`OpSet`] owns every `(Id, Op)` pair of exactly one document behind a
//! mutex-guarded sorted map. Inserts are strictly append-only: an id can
//! never be overwritten, not even with an identical payload, so callers (the
//! sync collaborator) must deduplicate operations they already delivered.
//!
//! Interpretation happens under the same lock as mutation, which guarantees
//! the replay sees a consistent, fully ordered snapshot of the log.

mod errors;

pub use errors::OpSetError;

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Mutex;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::Result;
use crate::id::{Actor, Id};
use crate::interp::{Interpretation, fold};
use crate::op::Op;

/// The operation log of one document.
///
/// All methods take `&self`; the internal mutex makes concurrent inserts
/// from multiple threads (one applying locally authored operations, one
/// merging operations received from peers) safe, and makes `interpret` reads
/// mutually exclusive with writers.
#[derive(Debug)]
pub struct OpSet {
    ops: Mutex<BTreeMap<Id, Op>>,
}

impl OpSet {
    /// Creates a fresh document log: a random actor, a new document
    /// identity, and `Id::MIN → Root` seeded into the map.
    pub fn new() -> Self {
        Self::with_creator(Actor::random())
    }

    /// Creates a fresh document log authored by a specific actor.
    pub fn with_creator(creator: Actor) -> Self {
        let mut ops = BTreeMap::new();
        ops.insert(
            Id::MIN,
            Op::Root {
                doc: Uuid::new_v4(),
                creator,
            },
        );
        Self {
            ops: Mutex::new(ops),
        }
    }

    /// Builds a log from a pre-populated sorted collection of operations,
    /// the merge path for operations received from other replicas.
    ///
    /// Fails with [`OpSetError::MissingRoot`] when the minimum-keyed entry
    /// is not a `Root` operation.
    pub fn from_ops(ops: BTreeMap<Id, Op>) -> Result<Self> {
        root_creator(&ops)?;
        Ok(Self {
            ops: Mutex::new(ops),
        })
    }

    /// The actor recorded in the document's `Root` operation.
    ///
    /// Both constructors guarantee a `Root` at the minimum key, so the
    /// [`OpSetError::MissingRoot`] failure here is a guard against internal
    /// corruption rather than a reachable construction path.
    pub fn creator(&self) -> Result<Actor> {
        let ops = self.ops.lock().unwrap();
        Ok(root_creator(&ops)?)
    }

    /// The document's globally unique identity, from the `Root` operation.
    pub fn doc_id(&self) -> Result<Uuid> {
        let ops = self.ops.lock().unwrap();
        match ops.first_key_value() {
            Some((_, Op::Root { doc, .. })) => Ok(*doc),
            _ => Err(OpSetError::MissingRoot.into()),
        }
    }

    /// Appends one operation to the log.
    ///
    /// Fails with [`OpSetError::DuplicateOp`] when `id` is already present,
    /// even if the stored payload is identical; the log is unchanged after a
    /// failed insert.
    pub fn insert(&self, id: Id, op: Op) -> Result<()> {
        let mut ops = self.ops.lock().unwrap();
        if ops.contains_key(&id) {
            return Err(OpSetError::DuplicateOp { id }.into());
        }
        trace!(op = %id, kind = op.kind(), "appending operation");
        ops.insert(id, op);
        Ok(())
    }

    /// Number of operations in the log, including the `Root`.
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    /// True when the log holds no operations at all.
    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// A clone of the log's current contents, for the transport collaborator
    /// to ship to peers.
    pub fn ops(&self) -> BTreeMap<Id, Op> {
        self.ops.lock().unwrap().clone()
    }

    /// The ordered suffix of operations strictly above `watermark`, for
    /// incremental peer exchange.
    pub fn ops_after(&self, watermark: Id) -> Vec<(Id, Op)> {
        self.ops
            .lock()
            .unwrap()
            .range((Bound::Excluded(watermark), Bound::Unbounded))
            .map(|(id, op)| (*id, op.clone()))
            .collect()
    }

    /// Replays the full log into a fresh [`Interpretation`].
    pub fn interpret(&self) -> Result<Interpretation> {
        self.interpret_from(&Interpretation::default())
    }

    /// Replays only the operations above `snapshot`'s watermark on top of
    /// the snapshot.
    ///
    /// Arrival order is not id order: the log accepts merged operations with
    /// ids below its current maximum, so an op may land at or below the
    /// snapshot's watermark after the snapshot was taken. The snapshot's
    /// folded-operation count detects that case and this falls back to a
    /// full replay. Either way, for any snapshot previously produced from
    /// this log the result is identical to [`OpSet::interpret`] of the
    /// current log.
    pub fn interpret_from(&self, snapshot: &Interpretation) -> Result<Interpretation> {
        let ops = self.ops.lock().unwrap();
        let prefix = ops
            .range((Bound::Excluded(Id::MIN), Bound::Included(snapshot.watermark())))
            .count();
        if prefix != snapshot.folded() {
            debug!(
                watermark = %snapshot.watermark(),
                "operations merged below the snapshot watermark, refolding the full log"
            );
            let all = ops.range((Bound::Excluded(Id::MIN), Bound::Unbounded));
            return Ok(fold::fold(all, Interpretation::default())?);
        }
        let suffix = ops.range((Bound::Excluded(snapshot.watermark()), Bound::Unbounded));
        Ok(fold::fold(suffix, snapshot.clone())?)
    }
}

impl Default for OpSet {
    fn default() -> Self {
        Self::new()
    }
}

fn root_creator(ops: &BTreeMap<Id, Op>) -> std::result::Result<Actor, OpSetError> {
    match ops.first_key_value() {
        Some((_, Op::Root { creator, .. })) => Ok(*creator),
        _ => Err(OpSetError::MissingRoot),
    }
}
