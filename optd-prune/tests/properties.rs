use std::collections::HashSet;

use optd_prune::{
    path::{PathId, PathOrdering},
    rel::{JoinInfo, RelOptInfo},
    relids::RelIds,
    testing::{join, rel, relids, scan, sorted_on},
    JoinRelPruner,
};
use proptest::prelude::*;

/// (relids, [(cost, ordering)]) for one candidate relation.
type RelShape = (Vec<u32>, Vec<(u8, u8)>);

fn rel_shapes() -> impl Strategy<Value = Vec<RelShape>> {
    prop::collection::vec(
        (
            prop::collection::vec(1u32..=5, 1..4),
            prop::collection::vec((0u8..50, 0u8..3), 1..5),
        ),
        0..12,
    )
}

fn ordering(choice: u8) -> PathOrdering {
    match choice {
        0 => PathOrdering::Unordered,
        n => sorted_on(1, n as u32),
    }
}

/// Builds candidate relations with globally unique path ids.
fn build(shapes: &[RelShape], pruneable: bool) -> Vec<RelOptInfo> {
    let a = scan(0, 1, 1.0, PathOrdering::Unordered);
    let mut next_id = 1;
    shapes
        .iter()
        .map(|(ids, paths)| {
            let pathlist = paths
                .iter()
                .map(|&(cost, order)| {
                    next_id += 1;
                    join(next_id, cost as f64, ordering(order), &a, &a)
                })
                .collect();
            let mut rel = rel(ids, pathlist);
            rel.pruneable = pruneable;
            rel
        })
        .collect()
}

fn summary(rels: &[RelOptInfo]) -> Vec<(RelIds, Vec<PathId>)> {
    rels.iter()
        .map(|r| (r.relids.clone(), r.pathlist.iter().map(|p| p.id).collect()))
        .collect()
}

fn relid_set(rels: &[RelOptInfo]) -> HashSet<RelIds> {
    rels.iter().map(|r| r.relids.clone()).collect()
}

proptest! {
    #[test]
    fn deduplicate_yields_distinct_relids(shapes in rel_shapes()) {
        let out = JoinRelPruner::default().deduplicate(build(&shapes, true)).unwrap();
        prop_assert_eq!(relid_set(&out).len(), out.len());
    }

    #[test]
    fn deduplicate_is_idempotent(shapes in rel_shapes()) {
        let pruner = JoinRelPruner::default();
        let once = pruner.deduplicate(build(&shapes, true)).unwrap();
        let expected = summary(&once);
        let twice = pruner.deduplicate(once).unwrap();
        prop_assert_eq!(summary(&twice), expected);
    }

    #[test]
    fn cheapest_is_minimal(shapes in rel_shapes(), pruneable in any::<bool>()) {
        let out = JoinRelPruner::default().finish_level(build(&shapes, pruneable)).unwrap();
        for rel in &out {
            let cheapest = rel.cheapest_path.as_ref().unwrap();
            prop_assert!(rel.pathlist.iter().any(|p| p.id == cheapest.id));
            prop_assert!(rel.pathlist.iter().all(|p| cheapest.cost <= p.cost));
        }
    }

    #[test]
    fn dominated_unordered_path_follows_pruneable(
        shapes in rel_shapes(),
        pruneable in any::<bool>(),
    ) {
        let pruner = JoinRelPruner::default();
        let deduped = pruner.deduplicate(build(&shapes, pruneable)).unwrap();
        let designated: Vec<Option<_>> = deduped
            .iter()
            .map(|rel| rel.cheapest_unordered_path().cloned())
            .collect();
        let out = pruner.select_cheapest_and_size(deduped).unwrap();
        for (rel, unordered) in out.iter().zip(designated) {
            let Some(unordered) = unordered else { continue };
            let cheapest = rel.cheapest_path.as_ref().unwrap();
            let listed = rel.pathlist.iter().any(|p| p.id == unordered.id);
            if unordered.cost > cheapest.cost && pruneable {
                prop_assert!(!listed);
            }
            if !pruneable || unordered.id == cheapest.id {
                prop_assert!(listed);
            }
        }
    }

    #[test]
    fn merge_batches_matches_deduplicate(left in rel_shapes(), right in rel_shapes()) {
        let pruner = JoinRelPruner::default();
        let first = build(&left, true);
        let second = build(&right, true);
        let combined = pruner
            .deduplicate(first.iter().chain(&second).cloned().collect())
            .unwrap();
        let merged = pruner
            .merge_batches(
                pruner.deduplicate(first).unwrap(),
                pruner.deduplicate(second).unwrap(),
            )
            .unwrap();
        prop_assert_eq!(relid_set(&merged), relid_set(&combined));
        prop_assert_eq!(relid_set(&merged).len(), merged.len());
    }

    #[test]
    fn merging_selected_batches_keeps_cheapest_minimal(
        left in rel_shapes(),
        right in rel_shapes(),
        pruneable in any::<bool>(),
    ) {
        let pruner = JoinRelPruner::default();
        let mut first = build(&[left.clone(), right].concat(), pruneable);
        let second = first.split_off(left.len());
        let first = pruner.finish_level(first).unwrap();
        let second = pruner.finish_level(second).unwrap();
        let merged = pruner.merge_batches(first, second).unwrap();
        for rel in &merged {
            let cheapest = rel.cheapest_path.as_ref().unwrap();
            prop_assert!(rel.pathlist.iter().any(|p| p.id == cheapest.id));
            prop_assert!(rel.pathlist.iter().all(|p| cheapest.cost <= p.cost));
            prop_assert_eq!(rel.size, 1000.0);
        }
    }

    #[test]
    fn prune_exhausted_removes_exactly_exhausted(
        edges in prop::collection::vec(prop::collection::vec(any::<bool>(), 0..4), 0..10)
    ) {
        let rels: Vec<RelOptInfo> = edges
            .iter()
            .enumerate()
            .map(|(i, inactive)| {
                let mut rel = rel(&[i as u32 + 1], vec![]);
                rel.joininfo = inactive
                    .iter()
                    .map(|&inactive| JoinInfo { inactive, ..JoinInfo::new(relids(&[99]), vec![]) })
                    .collect();
                rel
            })
            .collect();
        let expected: HashSet<RelIds> = rels
            .iter()
            .filter(|rel| rel.joininfo.is_empty() || rel.joininfo.iter().any(|info| !info.inactive))
            .map(|rel| rel.relids.clone())
            .collect();
        let out = JoinRelPruner::default().prune_exhausted(rels);
        prop_assert_eq!(relid_set(&out), expected);
    }
}
