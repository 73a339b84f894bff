//! Small builders for paths and relations, for tests of the pruner and of
//! drivers built on top of it.

use std::sync::Arc;

use crate::{
    cost::Cost,
    path::{
        ArcPath, ColumnRef, JoinClause, JoinMethod, JoinPath, Path, PathId, PathKind,
        PathOrdering, ScanPath, SortDirection, SortKey,
    },
    rel::RelOptInfo,
    relids::{RelId, RelIds},
};

pub fn relids(ids: &[u32]) -> RelIds {
    ids.iter().copied().collect()
}

/// A sequential scan of `relid` returning 100 rows.
pub fn scan(id: usize, relid: u32, cost: f64, ordering: PathOrdering) -> ArcPath {
    Arc::new(Path::new(
        PathId(id),
        ordering,
        Cost::new(cost),
        PathKind::Scan(ScanPath {
            relid: RelId(relid),
            rows: 100.0,
        }),
    ))
}

/// A hash join of 100 outer rows with 40 inner rows on one clause of
/// selectivity 0.25, so its estimated size is always 1000.
pub fn join(
    id: usize,
    cost: f64,
    ordering: PathOrdering,
    outer: &ArcPath,
    inner: &ArcPath,
) -> ArcPath {
    Arc::new(Path::new(
        PathId(id),
        ordering,
        Cost::new(cost),
        PathKind::Join(JoinPath {
            method: JoinMethod::HashJoin,
            outer: outer.clone(),
            inner: inner.clone(),
            outer_rows: 100.0,
            inner_rows: 40.0,
            clauses: vec![JoinClause {
                outer: ColumnRef {
                    relid: leftmost_relid(outer),
                    column: 0,
                },
                inner: ColumnRef {
                    relid: leftmost_relid(inner),
                    column: 0,
                },
                selectivity: 0.25,
            }],
        }),
    ))
}

fn leftmost_relid(path: &Path) -> RelId {
    match &path.kind {
        PathKind::Scan(scan) => scan.relid,
        PathKind::Join(join) => leftmost_relid(&join.outer),
    }
}

pub fn sorted_on(relid: u32, column: u32) -> PathOrdering {
    PathOrdering::Sorted(vec![SortKey {
        column: ColumnRef::new(relid, column),
        direction: SortDirection::Asc,
    }])
}

pub fn rel(ids: &[u32], pathlist: Vec<ArcPath>) -> RelOptInfo {
    RelOptInfo::with_paths(relids(ids), pathlist)
}
