// League rosters: domain model, feed normalization, reconciliation, and
// the all-time history standings.

pub mod categories;
pub mod history;
pub mod model;
pub mod normalize;
pub mod reconcile;
