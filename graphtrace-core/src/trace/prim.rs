//! Prim's algorithm without a heap: each round rescans every edge leaving
//! the tree for the globally lightest one.

use crate::{
    error::{EndpointRole, Result},
    matrix::AdjacencyMatrix,
    model::NodeIndex,
};

use super::{
    Algorithm, Distance, SpanningEdge, Step, Trace, ensure_endpoint, ensure_nodes,
    warn_if_asymmetric,
};

struct PrimRun {
    visited: Vec<NodeIndex>,
    in_tree: Vec<bool>,
    mst: Vec<SpanningEdge>,
    steps: Vec<Step>,
}

impl PrimRun {
    fn emit(&mut self, current: Option<NodeIndex>, message: String) {
        self.steps.push(Step::Prim {
            visited: self.visited.clone(),
            mst: self.mst.clone(),
            current,
            message,
        });
    }

    /// Tree nodes are scanned in join order and targets in ascending order;
    /// strict `<` keeps the first lightest edge found.
    fn lightest_crossing_edge(&self, matrix: &AdjacencyMatrix) -> Option<SpanningEdge> {
        let mut best: Option<SpanningEdge> = None;
        for &source in &self.visited {
            for target in 0..matrix.node_count() {
                if self.in_tree[target] {
                    continue;
                }
                let Some(weight) = matrix.weight(source, target) else {
                    continue;
                };
                if best.is_none_or(|edge| weight < edge.weight) {
                    best = Some(SpanningEdge::new(source, target, weight));
                }
            }
        }
        best
    }
}

/// Traces Prim's minimum spanning tree grown from `start`.
///
/// The matrix is read as undirected; an asymmetric matrix is logged as a
/// warning and traced anyway.
///
/// # Errors
/// Returns [`crate::GraphTraceError::EmptyGraph`] for an empty matrix and
/// [`crate::GraphTraceError::NodeOutOfRange`] when `start` is outside the
/// matrix.
pub fn prim(matrix: &AdjacencyMatrix, start: NodeIndex) -> Result<Trace> {
    let node_count = ensure_nodes(matrix)?;
    ensure_endpoint(EndpointRole::Start, start, node_count)?;
    warn_if_asymmetric(Algorithm::Prim, matrix);

    let mut run = PrimRun {
        visited: vec![start],
        in_tree: vec![false; node_count],
        mst: Vec::with_capacity(node_count.saturating_sub(1)),
        steps: Vec::new(),
    };
    run.in_tree[start] = true;
    run.emit(Some(start), format!("Starting Prim's algorithm from node {start}"));

    while run.visited.len() < node_count {
        let Some(edge) = run.lightest_crossing_edge(matrix) else {
            run.emit(
                None,
                "Could not find an edge to add. Graph is disconnected.".to_owned(),
            );
            break;
        };
        run.in_tree[edge.target] = true;
        run.visited.push(edge.target);
        run.mst.push(edge);
        run.emit(
            Some(edge.target),
            format!(
                "Added edge {} → {} with weight {} to MST",
                edge.source,
                edge.target,
                Distance(edge.weight)
            ),
        );
    }

    let edges = run.mst.len();
    run.emit(
        None,
        format!("Completed Prim's algorithm. MST has {edges} edges."),
    );

    Ok(Trace::new(Algorithm::Prim, run.steps))
}
