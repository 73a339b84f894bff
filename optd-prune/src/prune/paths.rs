use tracing::{debug, trace};

use super::JoinRelPruner;
use crate::{
    error::{PruneError, Result},
    path::{ArcPath, PathId},
    rel::RelOptInfo,
};

impl JoinRelPruner {
    /// Sets the cheapest path of `rel` and decides the fate of its designated
    /// unordered path.
    ///
    /// If the unordered path is not the cheapest one and `rel` is pruneable,
    /// it is removed from the path list and `unordered_path` is cleared.
    /// Otherwise it is kept and recorded as `unordered_path`.
    pub fn prune_rel_path(
        &self,
        rel: &mut RelOptInfo,
        unordered: Option<PathId>,
    ) -> Result<ArcPath> {
        let cheapest = self
            .cost_model
            .select_cheapest(&rel.pathlist)
            .ok_or_else(|| PruneError::EmptyPathList {
                relids: rel.relids.clone(),
            })?;
        rel.cheapest_path = Some(cheapest.clone());

        let Some(unordered) = unordered else {
            rel.unordered_path = None;
            return Ok(cheapest);
        };
        let Some(pos) = rel.pathlist.iter().position(|p| p.id == unordered) else {
            return Err(PruneError::UnknownUnorderedPath {
                relids: rel.relids.clone(),
                path: unordered,
            });
        };

        if unordered != cheapest.id && rel.pruneable && self.config.prune_unordered_paths {
            let removed = rel.pathlist.remove(pos);
            trace!(event = "prune_unordered", task = "prune_rel_path", relids = %rel.relids, path = %removed.id, cost = %removed.cost, cheapest = %cheapest.id);
            rel.unordered_path = None;
        } else {
            rel.unordered_path = Some(rel.pathlist[pos].clone());
        }
        Ok(cheapest)
    }

    /// Runs [`Self::prune_rel_path`] on every join relation of a level, using
    /// the cheapest unordered entry of each path list as its unordered path,
    /// and re-estimates each relation's size from its cheapest path.
    ///
    /// A cheapest path that is not a join means the driver pruned a level
    /// where no join happened yet, and fails the whole call.
    pub fn select_cheapest_and_size(
        &self,
        mut rels: Vec<RelOptInfo>,
    ) -> Result<Vec<RelOptInfo>> {
        for rel in rels.iter_mut() {
            self.select_and_size(rel)?;
        }
        debug!(event = "task_finish", task = "select_cheapest_and_size", rels = rels.len());
        self.verify_cheapest(&rels)?;
        Ok(rels)
    }

    pub(super) fn select_and_size(&self, rel: &mut RelOptInfo) -> Result<()> {
        rel.size = 0.0;
        let unordered = rel.cheapest_unordered_path().map(|p| p.id);
        let cheapest = self.prune_rel_path(rel, unordered)?;
        let Some(join) = cheapest.as_join() else {
            return Err(PruneError::NonJoinCheapestPath {
                relids: rel.relids.clone(),
                path: cheapest.id,
            });
        };
        rel.size = self.cost_model.estimate_join_size(join);
        trace!(event = "select_cheapest", task = "select_cheapest_and_size", relids = %rel.relids, cheapest = %cheapest, size = rel.size);
        Ok(())
    }
}
