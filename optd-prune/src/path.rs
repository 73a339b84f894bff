use std::{fmt::Display, sync::Arc};

use itertools::Itertools;

use crate::{cost::Cost, relids::RelId};

pub type ArcPath = Arc<Path>;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct PathId(pub usize);

impl Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A column of a base relation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct ColumnRef {
    pub relid: RelId,
    pub column: u32,
}

impl ColumnRef {
    pub fn new(relid: u32, column: u32) -> Self {
        Self {
            relid: RelId(relid),
            column,
        }
    }
}

impl Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}.{}", self.relid, self.column)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, strum::Display)]
pub enum SortDirection {
    #[strum(serialize = "asc")]
    Asc,
    #[strum(serialize = "desc")]
    Desc,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct SortKey {
    pub column: ColumnRef,
    pub direction: SortDirection,
}

/// The output order a path guarantees.
#[derive(Clone, PartialEq, Eq, Debug, Default, Hash)]
pub enum PathOrdering {
    #[default]
    Unordered,
    Sorted(Vec<SortKey>),
}

impl Display for PathOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unordered => write!(f, "unordered"),
            Self::Sorted(keys) => write!(
                f,
                "[{}]",
                keys.iter()
                    .map(|k| format!("{} {}", k.column, k.direction))
                    .join(", ")
            ),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, strum::Display)]
pub enum JoinMethod {
    NestLoop,
    MergeJoin,
    HashJoin,
}

/// An equi-join condition between two base-relation columns.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinClause {
    pub outer: ColumnRef,
    pub inner: ColumnRef,
    /// Fraction of the cross product expected to satisfy the clause.
    pub selectivity: f64,
}

#[derive(Clone, Debug)]
pub struct ScanPath {
    pub relid: RelId,
    pub rows: f64,
}

#[derive(Clone, Debug)]
pub struct JoinPath {
    pub method: JoinMethod,
    pub outer: ArcPath,
    pub inner: ArcPath,
    /// Estimated sizes of the input relations at the time the join was built.
    pub outer_rows: f64,
    pub inner_rows: f64,
    pub clauses: Vec<JoinClause>,
}

#[derive(Clone, Debug)]
pub enum PathKind {
    Scan(ScanPath),
    Join(JoinPath),
}

/// One way of producing the tuples of a relation.
#[derive(Clone, Debug)]
pub struct Path {
    pub id: PathId,
    pub ordering: PathOrdering,
    pub cost: Cost,
    pub kind: PathKind,
}

impl Path {
    pub fn new(id: PathId, ordering: PathOrdering, cost: Cost, kind: PathKind) -> Self {
        Self {
            id,
            ordering,
            cost,
            kind,
        }
    }

    pub fn is_unordered(&self) -> bool {
        matches!(self.ordering, PathOrdering::Unordered)
    }

    pub fn as_join(&self) -> Option<&JoinPath> {
        match &self.kind {
            PathKind::Join(join) => Some(join),
            PathKind::Scan(_) => None,
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            PathKind::Scan(scan) => write!(f, "({} Scan {}", self.id, scan.relid)?,
            PathKind::Join(join) => write!(
                f,
                "({} {} {} {}",
                self.id, join.method, join.outer.id, join.inner.id
            )?,
        }
        write!(f, " cost={} order={})", self.cost, self.ordering)
    }
}
