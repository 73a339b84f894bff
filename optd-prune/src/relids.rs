use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Identifier of a single base relation.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Serialize, Deserialize,
)]
pub struct RelId(pub u32);

impl Display for RelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RelId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// The set of base relations a candidate relation is built from.
///
/// Always kept sorted and free of duplicates, so two sets built from the same
/// base relations in different join orders compare (and hash) equal.
#[derive(
    Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(from = "Vec<RelId>", into = "Vec<RelId>")]
pub struct RelIds(Vec<RelId>);

impl RelIds {
    pub fn new(ids: impl IntoIterator<Item = RelId>) -> Self {
        let mut ids = ids.into_iter().collect_vec();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn single(id: RelId) -> Self {
        Self(vec![id])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: RelId) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = RelId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[RelId] {
        &self.0
    }

    /// The relation set produced by joining `self` with `other`.
    pub fn union(&self, other: &RelIds) -> RelIds {
        Self(
            self.0
                .iter()
                .merge(other.0.iter())
                .dedup()
                .copied()
                .collect(),
        )
    }

    pub fn is_subset_of(&self, other: &RelIds) -> bool {
        self.iter().all(|id| other.contains(id))
    }

    pub fn overlaps(&self, other: &RelIds) -> bool {
        self.iter().any(|id| other.contains(id))
    }
}

impl FromIterator<RelId> for RelIds {
    fn from_iter<I: IntoIterator<Item = RelId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl FromIterator<u32> for RelIds {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(RelId))
    }
}

impl From<Vec<RelId>> for RelIds {
    fn from(ids: Vec<RelId>) -> Self {
        Self::new(ids)
    }
}

impl From<RelIds> for Vec<RelId> {
    fn from(ids: RelIds) -> Self {
        ids.0
    }
}

impl Display for RelIds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(","))
    }
}
