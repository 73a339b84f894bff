use std::collections::{hash_map::Entry, HashMap};

use itertools::Itertools;
use tracing::{debug, trace};

use super::JoinRelPruner;
use crate::{error::Result, path::ArcPath, rel::RelOptInfo, relids::RelIds};

impl JoinRelPruner {
    /// Merges relations built from the same base relations.
    ///
    /// The first relation with a given `relids` survives and keeps its
    /// position; the path lists of later duplicates are merged into it.
    /// Survivors that already had a cheapest path get it selected again.
    pub fn deduplicate(&self, rels: Vec<RelOptInfo>) -> Result<Vec<RelOptInfo>> {
        let input = rels.len();
        let mut survivors: Vec<RelOptInfo> = Vec::with_capacity(rels.len());
        let mut positions: HashMap<RelIds, usize> = HashMap::with_capacity(rels.len());
        let mut reselect = vec![];
        for rel in rels {
            match positions.entry(rel.relids.clone()) {
                Entry::Occupied(entry) => {
                    let idx = *entry.get();
                    if self.absorb(&mut survivors[idx], rel, "deduplicate") {
                        reselect.push(idx);
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(survivors.len());
                    survivors.push(rel);
                }
            }
        }
        self.reselect(&mut survivors, reselect)?;
        debug!(event = "task_finish", task = "deduplicate", input, output = survivors.len());
        self.verify_distinct(&survivors)?;
        self.verify_cheapest(survivors.iter().filter(|rel| rel.cheapest_path.is_some()))?;
        Ok(survivors)
    }

    /// Merges two lists that are each already deduplicated. Relations of
    /// `first` keep their position, followed by the relations of `second`
    /// that did not match any of them.
    ///
    /// Either list may already have been through
    /// [`Self::select_cheapest_and_size`]; a relation of `first` that absorbs a
    /// selected duplicate, or was selected itself, is selected and sized again
    /// over the merged path list.
    pub fn merge_batches(
        &self,
        mut first: Vec<RelOptInfo>,
        second: Vec<RelOptInfo>,
    ) -> Result<Vec<RelOptInfo>> {
        let positions: HashMap<RelIds, usize> = first
            .iter()
            .enumerate()
            .map(|(idx, rel)| (rel.relids.clone(), idx))
            .collect();
        let (first_len, second_len) = (first.len(), second.len());
        let mut kept = Vec::with_capacity(second.len());
        let mut reselect = vec![];
        for rel in second {
            match positions.get(&rel.relids) {
                Some(&idx) => {
                    if self.absorb(&mut first[idx], rel, "merge_batches") {
                        reselect.push(idx);
                    }
                }
                None => kept.push(rel),
            }
        }
        self.reselect(&mut first, reselect)?;
        first.extend(kept);
        debug!(event = "task_finish", task = "merge_batches", first = first_len, second = second_len, output = first.len());
        self.verify_distinct(&first)?;
        self.verify_cheapest(first.iter().filter(|rel| rel.cheapest_path.is_some()))?;
        Ok(first)
    }

    /// Folds `duplicate` into `rel`, which covers the same base relations.
    /// Returns whether either of them had a cheapest path selected.
    fn absorb(&self, rel: &mut RelOptInfo, duplicate: RelOptInfo, task: &'static str) -> bool {
        trace!(event = "merge_rel", task, relids = %rel.relids, paths = rel.pathlist.len(), dup_paths = duplicate.pathlist.len());
        let selected = rel.cheapest_path.is_some() || duplicate.cheapest_path.is_some();
        let old_paths = std::mem::take(&mut rel.pathlist);
        let merged = self.merger.merge(rel, old_paths, duplicate.pathlist);
        rel.pathlist = merged;

        // Cached selections must keep pointing into the path list.
        if !still_listed(&rel.cheapest_path, &rel.pathlist) {
            rel.cheapest_path = None;
        }
        if !still_listed(&rel.unordered_path, &rel.pathlist) {
            rel.unordered_path = None;
        }
        selected
    }

    fn reselect(&self, rels: &mut [RelOptInfo], positions: Vec<usize>) -> Result<()> {
        for idx in positions.into_iter().unique() {
            self.select_and_size(&mut rels[idx])?;
        }
        Ok(())
    }
}

fn still_listed(path: &Option<ArcPath>, pathlist: &[ArcPath]) -> bool {
    path.as_ref()
        .is_some_and(|path| pathlist.iter().any(|p| p.id == path.id))
}
