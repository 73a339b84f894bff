use thiserror::Error;

use crate::{path::PathId, relids::RelIds};

pub type Result<T, E = PruneError> = std::result::Result<T, E>;

/// Internal-consistency violations detected while pruning.
///
/// Every variant means the join enumeration driver broke its side of the
/// contract. None of them can be recovered from by retrying; the planning
/// pass that hit one should be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PruneError {
    #[error("cheapest path {path} of relation {relids} is not a join path")]
    NonJoinCheapestPath { relids: RelIds, path: PathId },
    #[error("relation {relids} has no paths")]
    EmptyPathList { relids: RelIds },
    #[error("unordered path {path} is not in the path list of relation {relids}")]
    UnknownUnorderedPath { relids: RelIds, path: PathId },
    #[error("relation {relids} appears more than once after pruning")]
    DuplicateRelids { relids: RelIds },
    #[error("cheapest path of relation {relids} does not have the minimum cost")]
    CheapestNotMinimal { relids: RelIds },
}
