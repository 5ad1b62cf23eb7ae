//! Tests for the append-only operation log and its invariants.

use std::collections::BTreeMap;

use converge::{Actor, Id, Op, OpSet, Scalar};

use crate::helpers::Author;

#[test]
fn test_fresh_log_exposes_creator() {
    let creator = Actor::new(1234).unwrap();
    let log = OpSet::with_creator(creator);
    assert_eq!(log.creator().unwrap(), creator);

    let random = OpSet::new();
    random.creator().unwrap();
}

#[test]
fn test_duplicate_insert_is_rejected_even_with_identical_payload() {
    let log = OpSet::new();
    let mut author = Author::new(&log, 1);
    let id = author.push(Op::MakeMap { root: true });

    let before = log.ops();
    let err = log.insert(id, Op::MakeMap { root: true }).unwrap_err();
    assert!(err.is_already_exists());
    assert_eq!(log.ops(), before);
}

#[test]
fn test_from_ops_without_root_is_invalid_state() {
    let mut ops = BTreeMap::new();
    let log = OpSet::new();
    let mut author = Author::new(&log, 1);
    let id = author.push(Op::MakeMap { root: true });
    ops.insert(id, Op::MakeMap { root: true });

    let err = OpSet::from_ops(ops).unwrap_err();
    assert!(err.is_invalid_state());
}

#[test]
fn test_log_round_trips_through_the_sync_boundary() {
    let log = OpSet::new();
    let mut author = Author::new(&log, 1);
    let map = author.push(Op::MakeMap { root: true });
    let key = author.push(Op::MakeKey {
        value: Scalar::from("title"),
    });
    let value = author.push(Op::MakeValue {
        root: false,
        value: Scalar::from("hello"),
    });
    author.push(Op::Assign {
        entity: map,
        attribute: key,
        value,
    });

    // A peer reconstructing the log from shipped ops sees the same document.
    let peer = OpSet::from_ops(log.ops()).unwrap();
    assert_eq!(peer.creator().unwrap(), log.creator().unwrap());
    assert_eq!(peer.doc_id().unwrap(), log.doc_id().unwrap());
    assert_eq!(peer.interpret().unwrap(), log.interpret().unwrap());
}

#[test]
fn test_ops_after_supports_incremental_exchange() {
    let log = OpSet::new();
    let mut author = Author::new(&log, 1);
    let map = author.push(Op::MakeMap { root: true });

    // Peer clones the log at this point.
    let peer = OpSet::from_ops(log.ops()).unwrap();
    let watermark = peer.interpret().unwrap().watermark();

    // The origin keeps editing.
    let key = author.push(Op::MakeKey {
        value: Scalar::from("x"),
    });
    let value = author.push(Op::MakeValue {
        root: false,
        value: Scalar::Int(5),
    });
    author.push(Op::Assign {
        entity: map,
        attribute: key,
        value,
    });

    // Only the suffix travels; the peer converges.
    for (id, op) in log.ops_after(watermark) {
        peer.insert(id, op).unwrap();
    }
    assert_eq!(peer.interpret().unwrap(), log.interpret().unwrap());
}

#[test]
fn test_failed_insert_leaves_log_usable() {
    let log = OpSet::new();
    let mut author = Author::new(&log, 1);
    let id = author.push(Op::MakeMap { root: true });

    assert!(log.insert(id, Op::MakeSet { root: false }).is_err());

    // Subsequent appends and reads still work.
    author.push(Op::MakeKey {
        value: Scalar::from("k"),
    });
    assert_eq!(log.len(), 3);
    log.interpret().unwrap();
}

#[test]
fn test_inserting_below_existing_ops_is_allowed() {
    // Arrival order is not id order: a remote op with a lower id than ops
    // already present must still be accepted.
    let log = OpSet::new();
    let late = Id::new(
        converge::Counter::new(5).unwrap(),
        Actor::new(1).unwrap(),
    );
    log.insert(late, Op::MakeMap { root: true }).unwrap();

    let early = Id::new(
        converge::Counter::new(1).unwrap(),
        Actor::new(2).unwrap(),
    );
    log.insert(early, Op::MakeSet { root: false }).unwrap();

    let ids: Vec<Id> = log.ops().keys().copied().collect();
    assert_eq!(ids, vec![Id::MIN, early, late]);
}
