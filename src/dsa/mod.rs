pub mod graph;
pub(crate) mod bitset;
