//! Dictionary selection: deciding which UDWs get dynamically bound into the
//! codebook before planning begins.

pub mod formal;
pub mod heuristic;
pub mod static_cb;

pub use formal::FormalDictionarySelector;
pub use heuristic::HeuristicDictionarySelector;
pub use static_cb::StaticDictionarySelector;
