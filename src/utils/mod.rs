//! Internal helpers for time-filter parsing and subgraph ID extraction.

pub(crate) mod date;
pub(crate) mod subgraph;
