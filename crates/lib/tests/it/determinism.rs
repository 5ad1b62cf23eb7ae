//! Arrival-order permutation tests for replay convergence.
//!
//! The defining property of the engine: for the same final set of
//! `(Id, Op)` pairs, the interpretation is identical no matter in which
//! order the operations arrived, because replay order is fixed by id.

use std::collections::BTreeMap;

use converge::{Actor, Counter, Id, Op, OpSet, Scalar};
use rand::seq::SliceRandom;

fn id(counter: i64, actor: i64) -> Id {
    Id::new(Counter::new(counter).unwrap(), Actor::new(actor).unwrap())
}

/// A two-replica editing session: a map holding a list and a twice-written
/// scalar slot, with concurrent list inserts and a removal.
fn scripted_ops() -> (Vec<(Id, Op)>, Id, Id) {
    let m = id(1, 1);
    let k_items = id(2, 1);
    let list = id(3, 1);
    let x = id(5, 1);
    let z = id(5, 2);
    let k_n = id(7, 1);
    let v1 = id(8, 1);
    let v2 = id(9, 2);

    let ops = vec![
        (m, Op::MakeMap { root: true }),
        (
            k_items,
            Op::MakeKey {
                value: Scalar::from("items"),
            },
        ),
        (list, Op::MakeList { root: false }),
        (
            id(4, 1),
            Op::Assign {
                entity: m,
                attribute: k_items,
                value: list,
            },
        ),
        (x, Op::Insert { after: list }),
        (z, Op::Insert { after: list }),
        (id(6, 1), Op::Insert { after: x }),
        (
            k_n,
            Op::MakeKey {
                value: Scalar::from("n"),
            },
        ),
        (
            v1,
            Op::MakeValue {
                root: false,
                value: Scalar::Int(1),
            },
        ),
        (
            id(9, 1),
            Op::Assign {
                entity: m,
                attribute: k_n,
                value: v1,
            },
        ),
        (
            v2,
            Op::MakeValue {
                root: false,
                value: Scalar::Int(2),
            },
        ),
        (
            id(10, 2),
            Op::Assign {
                entity: m,
                attribute: k_n,
                value: v2,
            },
        ),
        (
            id(11, 1),
            Op::Remove {
                entity: m,
                attribute: k_items,
            },
        ),
    ];
    (ops, m, list)
}

#[test]
fn test_every_arrival_order_converges() {
    let creator = Actor::new(1).unwrap();
    let root_map = OpSet::with_creator(creator).ops();

    let (mut ops, _m, _list) = scripted_ops();

    let baseline = {
        let mut full: BTreeMap<Id, Op> = root_map.clone();
        full.extend(ops.iter().cloned());
        OpSet::from_ops(full).unwrap().interpret().unwrap()
    };

    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        ops.shuffle(&mut rng);
        let log = OpSet::from_ops(root_map.clone()).unwrap();
        for (id, op) in &ops {
            log.insert(*id, op.clone()).unwrap();
        }
        assert_eq!(log.interpret().unwrap(), baseline);
    }
}

#[test]
fn test_replay_order_resolves_concurrent_list_inserts() {
    let creator = Actor::new(1).unwrap();
    let mut full = OpSet::with_creator(creator).ops();
    let (ops, _m, list) = scripted_ops();
    full.extend(ops);

    let view = OpSet::from_ops(full).unwrap().interpret().unwrap();

    // Inserts replay in id order: 5@1 splices x behind the head, 5@2
    // splices z behind the head (in front of x), then 6@1 places y after x.
    let order: Vec<Id> = view.list_iter(list).collect();
    assert_eq!(order, vec![id(5, 2), id(5, 1), id(6, 1)]);
}

#[test]
fn test_concurrent_assigns_resolve_to_highest_id() {
    let creator = Actor::new(1).unwrap();
    let mut full = OpSet::with_creator(creator).ops();
    let (ops, m, _list) = scripted_ops();
    full.extend(ops);

    let view = OpSet::from_ops(full).unwrap().interpret().unwrap();

    // Both replicas wrote the "n" slot; the assignment with the higher id
    // (10@2, carrying v2 = 9@2) wins on every replica.
    let winner: Vec<_> = view.elements_for(m, id(7, 1)).collect();
    assert_eq!(winner.len(), 1);
    assert_eq!(winner[0].value, id(9, 2));
    assert_eq!(view.parent_of(id(9, 2)), Some(m));
    assert_eq!(view.parent_of(id(8, 1)), None);
}
