//! Join relation deduplication and path pruning for bottom-up join enumeration.
//!
//! A join enumeration driver proposes candidate join relations one level at a
//! time. Between levels it hands them to a [`JoinRelPruner`], which merges
//! relations covering the same base relations, keeps only the useful paths of
//! each survivor and drops relations with no join edges left to exploit.

pub mod config;
pub mod cost;
pub mod error;
pub mod path;
pub mod pathlist;
pub mod prune;
pub mod rel;
pub mod relids;
pub mod testing;

pub use config::PruneConfig;
pub use error::{PruneError, Result};
pub use prune::JoinRelPruner;
