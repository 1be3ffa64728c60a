//! Breadth-first search with an explicit queue. Nodes are marked visited
//! when enqueued, so each node enters the queue at most once.

use std::collections::VecDeque;

use crate::{
    error::{EndpointRole, Result},
    matrix::{AdjacencyMatrix, is_traversable},
    model::NodeIndex,
};

use super::{Algorithm, Step, Trace, ensure_endpoint, ensure_nodes};

struct BfsRun {
    visited: Vec<NodeIndex>,
    seen: Vec<bool>,
    queue: VecDeque<NodeIndex>,
    steps: Vec<Step>,
}

impl BfsRun {
    fn emit(&mut self, current: Option<NodeIndex>, message: String) {
        self.steps.push(Step::Bfs {
            visited: self.visited.clone(),
            queue: self.queue.iter().copied().collect(),
            current,
            message,
        });
    }

    fn discover(&mut self, node: NodeIndex) {
        self.seen[node] = true;
        self.visited.push(node);
        self.queue.push_back(node);
    }
}

/// Traces a breadth-first search from `start` that stops once `end` is
/// dequeued.
///
/// # Errors
/// Returns [`crate::GraphTraceError::EmptyGraph`] for an empty matrix and
/// [`crate::GraphTraceError::NodeOutOfRange`] for an endpoint outside the
/// matrix.
pub fn bfs(matrix: &AdjacencyMatrix, start: NodeIndex, end: NodeIndex) -> Result<Trace> {
    let node_count = ensure_nodes(matrix)?;
    ensure_endpoint(EndpointRole::Start, start, node_count)?;
    ensure_endpoint(EndpointRole::End, end, node_count)?;

    let mut run = BfsRun {
        visited: Vec::with_capacity(node_count),
        seen: vec![false; node_count],
        queue: VecDeque::with_capacity(node_count),
        steps: Vec::new(),
    };
    run.discover(start);
    run.emit(None, format!("Starting BFS from node {start}"));

    while let Some(current) = run.queue.pop_front() {
        run.emit(Some(current), format!("Processing node {current}"));

        if current == end {
            run.emit(Some(current), format!("Reached target node {end}"));
            break;
        }

        for neighbour in 0..node_count {
            if is_traversable(matrix.get(current, neighbour)) && !run.seen[neighbour] {
                run.discover(neighbour);
                run.emit(Some(current), format!("Adding node {neighbour} to queue"));
            }
        }
    }

    if !run.seen[end] {
        run.emit(None, format!("Could not reach target node {end}"));
    }

    Ok(Trace::new(Algorithm::Bfs, run.steps))
}
