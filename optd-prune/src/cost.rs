use std::fmt::Display;

use ordered_float::OrderedFloat;

use crate::path::{ArcPath, JoinPath};

/// Total estimated cost of a path.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(pub OrderedFloat<f64>);

impl Cost {
    pub fn new(total: f64) -> Self {
        Self(OrderedFloat(total))
    }

    pub fn total(&self) -> f64 {
        self.0 .0
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.total())
    }
}

/// The parts of the cost model the pruner relies on. Costs themselves are
/// computed when paths are built; the pruner only compares and sizes them.
pub trait CostModel: 'static + Send + Sync {
    /// Returns the path with the minimum total cost, or `None` for an empty list.
    fn select_cheapest(&self, pathlist: &[ArcPath]) -> Option<ArcPath>;

    /// Estimated output cardinality of a join.
    fn estimate_join_size(&self, join: &JoinPath) -> f64;
}

/// Picks the first of the minimal-cost paths and sizes joins as the product of
/// the input sizes and the clause selectivities.
#[derive(Default, Clone, Copy, Debug)]
pub struct DefaultCostModel;

impl CostModel for DefaultCostModel {
    fn select_cheapest(&self, pathlist: &[ArcPath]) -> Option<ArcPath> {
        // `min_by_key` returns the first of several equal minima.
        pathlist.iter().min_by_key(|path| path.cost).cloned()
    }

    fn estimate_join_size(&self, join: &JoinPath) -> f64 {
        let selectivity: f64 = join.clauses.iter().map(|c| c.selectivity).product();
        (join.outer_rows * join.inner_rows * selectivity).ceil().max(0.0)
    }
}
