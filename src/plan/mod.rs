//! Route construction: turning a scored/selected dictionary into a
//! complete, non-overlapping cover of the input.

pub mod finalize;
pub mod formal;
pub mod greedy;

pub use finalize::RouteFinalizer;
pub use formal::FormalPlanner;
pub use greedy::GreedyPlanner;
