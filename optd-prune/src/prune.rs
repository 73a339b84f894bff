//! The per-level operations applied to candidate join relations.
//!
//! The enumeration driver calls them once per level, in this order:
//! [`JoinRelPruner::deduplicate`], [`JoinRelPruner::select_cheapest_and_size`],
//! optionally [`JoinRelPruner::merge_batches`] when two candidate lists were
//! built separately, and [`JoinRelPruner::prune_exhausted`] on the previous
//! level's relations before moving on.

mod dedup;
mod exhausted;
mod paths;

use std::{collections::HashSet, sync::Arc};

use tracing::debug;

use crate::{
    config::PruneConfig,
    cost::{CostModel, DefaultCostModel},
    error::{PruneError, Result},
    pathlist::{OrderingDominanceMerger, PathListMerger},
    rel::RelOptInfo,
};

pub struct JoinRelPruner {
    /// Cost model, used to pick the cheapest path and size join relations
    cost_model: Arc<dyn CostModel>,
    /// Decides which paths survive when two path lists for one relation meet
    merger: Arc<dyn PathListMerger>,
    config: PruneConfig,
}

impl JoinRelPruner {
    pub fn new(
        cost_model: Arc<dyn CostModel>,
        merger: Arc<dyn PathListMerger>,
        config: PruneConfig,
    ) -> Self {
        Self {
            cost_model,
            merger,
            config,
        }
    }

    pub fn with_config(config: PruneConfig) -> Self {
        Self::new(
            Arc::new(DefaultCostModel),
            Arc::new(OrderingDominanceMerger),
            config,
        )
    }

    /// Deduplicates a freshly enumerated level and selects the cheapest path of
    /// every surviving relation.
    pub fn finish_level(&self, rels: Vec<RelOptInfo>) -> Result<Vec<RelOptInfo>> {
        let rels = self.deduplicate(rels)?;
        self.select_cheapest_and_size(rels)
    }

    fn verify_distinct(&self, rels: &[RelOptInfo]) -> Result<()> {
        if !self.config.verify_invariants {
            return Ok(());
        }
        let mut seen = HashSet::with_capacity(rels.len());
        for rel in rels {
            if !seen.insert(&rel.relids) {
                return Err(PruneError::DuplicateRelids {
                    relids: rel.relids.clone(),
                });
            }
        }
        Ok(())
    }

    fn verify_cheapest<'a>(&self, rels: impl IntoIterator<Item = &'a RelOptInfo>) -> Result<()> {
        if !self.config.verify_invariants {
            return Ok(());
        }
        let mut checked = 0;
        for rel in rels {
            checked += 1;
            let minimal = rel.cheapest_path.as_ref().is_some_and(|cheapest| {
                rel.pathlist.iter().any(|p| p.id == cheapest.id)
                    && rel.pathlist.iter().all(|p| cheapest.cost <= p.cost)
            });
            if !minimal {
                return Err(PruneError::CheapestNotMinimal {
                    relids: rel.relids.clone(),
                });
            }
        }
        debug!(event = "verified", task = "verify_invariants", rels = checked);
        Ok(())
    }
}

impl Default for JoinRelPruner {
    fn default() -> Self {
        Self::with_config(PruneConfig::default())
    }
}
