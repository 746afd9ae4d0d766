// Valuation engine: salary projections, team totals, trade deltas, and
// per-player value metrics.

pub mod salary;
pub mod totals;
pub mod trade;
pub mod value;
