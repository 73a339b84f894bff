use tracing::{debug, trace};

use super::JoinRelPruner;
use crate::rel::RelOptInfo;

impl JoinRelPruner {
    /// Drops relations that have been joined in every possible way at this
    /// level: those with join edges, all of them inactive. Relations without
    /// any edge are kept since they may still take part in a cross join.
    ///
    /// Surviving relations keep their relative order.
    pub fn prune_exhausted(&self, rels: Vec<RelOptInfo>) -> Vec<RelOptInfo> {
        let input = rels.len();
        let (exhausted, kept): (Vec<_>, Vec<_>) =
            rels.into_iter().partition(RelOptInfo::is_exhausted);
        for rel in &exhausted {
            trace!(event = "drop_exhausted", task = "prune_exhausted", relids = %rel.relids, edges = rel.joininfo.len());
        }
        debug!(event = "task_finish", task = "prune_exhausted", input, output = kept.len());
        kept
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::{
        path::PathOrdering,
        rel::{JoinInfo, RelOptInfo},
        relids::RelIds,
        testing::{rel, relids, scan},
        JoinRelPruner,
    };

    /// A relation over `ids` with one join edge per entry of `inactive`.
    fn with_edges(ids: &[u32], inactive: &[bool]) -> RelOptInfo {
        let mut rel = rel(ids, vec![scan(1, ids[0], 1.0, PathOrdering::Unordered)]);
        rel.joininfo = inactive
            .iter()
            .enumerate()
            .map(|(i, &inactive)| JoinInfo {
                inactive,
                ..JoinInfo::new(relids(&[10 + i as u32]), vec![])
            })
            .collect();
        rel
    }

    #[test_case(&[true], false ; "single inactive edge")]
    #[test_case(&[], true ; "no edges")]
    #[test_case(&[true, false], true ; "one active edge")]
    #[test_case(&[true, true], false ; "all edges inactive")]
    #[test_case(&[false], true ; "active edge")]
    fn survival(inactive: &[bool], survives: bool) {
        let out = JoinRelPruner::default().prune_exhausted(vec![with_edges(&[1, 2], inactive)]);
        assert_eq!(out.len() == 1, survives);
    }

    #[test]
    fn keeps_order_of_survivors() {
        let rels = vec![
            with_edges(&[1], &[]),
            with_edges(&[2], &[true]),
            with_edges(&[3], &[false]),
            with_edges(&[4], &[]),
        ];
        let out: Vec<RelIds> = JoinRelPruner::default()
            .prune_exhausted(rels)
            .into_iter()
            .map(|rel| rel.relids)
            .collect();
        assert_eq!(out, vec![relids(&[1]), relids(&[3]), relids(&[4])]);
    }

    #[test]
    fn empty_level() {
        assert!(JoinRelPruner::default().prune_exhausted(vec![]).is_empty());
    }
}
