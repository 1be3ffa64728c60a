//! Graphtrace core library.
//!
//! Two subsystems share one data model: the Graph Generator builds graphs
//! that satisfy a requested structural class, and the Algorithm Tracer runs
//! classic graph algorithms on an adjacency matrix while recording every
//! state transition as a replayable [`Step`].
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod analysis;
mod builder;
mod error;
mod generate;
mod matrix;
mod model;
mod trace;
mod union_find;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{GeneratorBuilder, PropertyMode},
    error::{EndpointRole, GraphTraceError, GraphTraceErrorCode, Result},
    generate::{GraphGenerator, generate_graph},
    matrix::{AdjacencyMatrix, NO_EDGE, is_traversable},
    model::{Edge, Graph, GraphClass, Node, NodeIndex, Properties},
    trace::{
        Algorithm, SpanningEdge, Step, Trace, bfs, dfs, dijkstra, floyd_warshall, kruskal, prim,
        run_algorithm,
    },
};
