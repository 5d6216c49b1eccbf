//! Auxiliary indexes kept alongside the knowledge store.

pub mod stats_index;

pub use stats_index::StatsIndex;
