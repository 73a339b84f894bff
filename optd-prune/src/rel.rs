use std::fmt::Display;

use crate::{
    path::{ArcPath, JoinClause},
    relids::RelIds,
};

/// A join edge from a relation to relations it has not been combined with yet.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinInfo {
    pub target_relids: RelIds,
    pub clauses: Vec<JoinClause>,
    /// Set once every join order at the current level has used this edge.
    pub inactive: bool,
}

impl JoinInfo {
    pub fn new(target_relids: RelIds, clauses: Vec<JoinClause>) -> Self {
        Self {
            target_relids,
            clauses,
            inactive: false,
        }
    }
}

/// A base or join relation under consideration during join enumeration.
#[derive(Clone, Debug)]
pub struct RelOptInfo {
    pub relids: RelIds,
    pub pathlist: Vec<ArcPath>,
    pub cheapest_path: Option<ArcPath>,
    pub unordered_path: Option<ArcPath>,
    /// Whether an unordered path beaten by the cheapest path may be discarded.
    pub pruneable: bool,
    /// Estimated output cardinality.
    pub size: f64,
    pub joininfo: Vec<JoinInfo>,
}

impl RelOptInfo {
    pub fn new(relids: RelIds) -> Self {
        Self {
            relids,
            pathlist: Vec::new(),
            cheapest_path: None,
            unordered_path: None,
            pruneable: true,
            size: 0.0,
            joininfo: Vec::new(),
        }
    }

    pub fn with_paths(relids: RelIds, pathlist: Vec<ArcPath>) -> Self {
        Self {
            pathlist,
            ..Self::new(relids)
        }
    }

    /// The cheapest path that guarantees no output order. The earliest one
    /// wins among equally cheap unordered paths.
    pub fn cheapest_unordered_path(&self) -> Option<&ArcPath> {
        self.pathlist
            .iter()
            .filter(|path| path.is_unordered())
            .min_by_key(|path| path.cost)
    }

    /// Returns the join edge leading to exactly `join_relids`, if any.
    pub fn joininfo_member(&self, join_relids: &RelIds) -> Option<&JoinInfo> {
        self.joininfo
            .iter()
            .find(|info| &info.target_relids == join_relids)
    }

    /// Returns the join edge leading to exactly `join_relids`, adding an active
    /// edge without clauses when there is none yet.
    pub fn find_joininfo_node(&mut self, join_relids: RelIds) -> &mut JoinInfo {
        let idx = match self
            .joininfo
            .iter()
            .position(|info| info.target_relids == join_relids)
        {
            Some(idx) => idx,
            None => {
                self.joininfo.push(JoinInfo::new(join_relids, Vec::new()));
                self.joininfo.len() - 1
            }
        };
        &mut self.joininfo[idx]
    }

    /// A relation is exhausted when it has join edges and every one of them has
    /// already been used at this level. Relations without edges never are.
    pub fn is_exhausted(&self) -> bool {
        !self.joininfo.is_empty() && self.joininfo.iter().all(|info| info.inactive)
    }
}

impl Display for RelOptInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(Rel {} paths={} size={}", self.relids, self.pathlist.len(), self.size)?;
        if let Some(cheapest) = &self.cheapest_path {
            write!(f, " cheapest={}", cheapest.id)?;
        }
        write!(f, ")")
    }
}
