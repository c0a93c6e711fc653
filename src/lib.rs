//! # Corvid
//!
//! Corvid is a Rust library for directed graphs. It provides a mutable
//! adjacency-set representation keyed by integer vertex ids, together with
//! the classic traversals over it: breadth-first search producing shortest
//! hop-distances and a predecessor tree, and depth-first search producing
//! discovery/finish times and, on request, a reverse-finish-time topological
//! ordering.
//!
//! The graph is a single-owner, single-threaded structure: all operations are
//! synchronous in-memory mutations or traversals. Wrap it in a lock if you
//! need shared mutation.

pub mod digraph;
pub mod reader;

pub use digraph::{
    bfs::BfsTree, dfs::DfsForest, Digraph, DigraphError, OrderingProvenance, VertexId,
};
pub use reader::{read_digraph, ReadError};
