use serde::{Deserialize, Serialize};

/// Knobs for [`JoinRelPruner`](crate::JoinRelPruner).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Discard unordered paths beaten by the cheapest path of a pruneable
    /// relation. When off, unordered paths are kept for every relation.
    pub prune_unordered_paths: bool,
    /// Re-check the output of each level operation and fail with an invariant
    /// violation instead of handing broken state to the next level.
    pub verify_invariants: bool,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            prune_unordered_paths: true,
            verify_invariants: false,
        }
    }
}
