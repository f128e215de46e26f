//! Post-query aggregation: merge, sort, pin-promote and facet counting.
//!
//! Runs once both content queries have returned. Everything here is a pure
//! transform of its inputs.

pub mod collate;
pub mod facets;
pub mod merge;

pub use facets::merge_facets;
pub use merge::{merge_results, ResultAggregator, PIN_SCORE_THRESHOLD};
