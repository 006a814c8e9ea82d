//! Stream allocation, filter-graph synthesis and backend command assembly.

pub(crate) mod command;
pub(crate) mod filter_graph;
pub(crate) mod plan;
pub(crate) mod streams;
