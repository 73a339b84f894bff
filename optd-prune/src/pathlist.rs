use tracing::trace;

use crate::{path::ArcPath, rel::RelOptInfo};

/// Combines the path lists of two candidates for the same relation.
pub trait PathListMerger: 'static + Send + Sync {
    /// Merges `new_paths` into `old_paths`, the current path list of `rel`.
    /// The result replaces the path list of `rel`.
    fn merge(&self, rel: &RelOptInfo, old_paths: Vec<ArcPath>, new_paths: Vec<ArcPath>)
        -> Vec<ArcPath>;
}

/// Keeps the cheapest path for every distinct output ordering, treating
/// "unordered" as one more ordering.
///
/// A path only ever competes with paths of the same ordering, so a more
/// expensive sorted path still survives next to a cheaper unordered one. On
/// equal cost the path that came first (old paths before new paths) wins, and
/// survivors keep the position of the first path seen with their ordering.
#[derive(Default, Clone, Copy, Debug)]
pub struct OrderingDominanceMerger;

impl PathListMerger for OrderingDominanceMerger {
    fn merge(
        &self,
        rel: &RelOptInfo,
        old_paths: Vec<ArcPath>,
        new_paths: Vec<ArcPath>,
    ) -> Vec<ArcPath> {
        let mut survivors: Vec<ArcPath> = Vec::with_capacity(old_paths.len() + new_paths.len());
        for path in old_paths.into_iter().chain(new_paths) {
            match survivors.iter_mut().find(|p| p.ordering == path.ordering) {
                Some(incumbent) if path.cost < incumbent.cost => {
                    trace!(event = "path_replaced", task = "merge_path_lists", relids = %rel.relids, old = %incumbent.id, new = %path.id);
                    *incumbent = path;
                }
                Some(incumbent) => {
                    trace!(event = "path_dominated", task = "merge_path_lists", relids = %rel.relids, path = %path.id, by = %incumbent.id);
                }
                None => survivors.push(path),
            }
        }
        survivors
    }
}
