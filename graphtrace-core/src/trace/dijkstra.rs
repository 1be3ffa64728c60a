//! Array-based Dijkstra: every round scans all unsettled nodes for the
//! smallest tentative distance. Strict `<` comparisons make the lowest index
//! win ties, and a round that finds no finite distance ends the search.

use crate::{
    error::{EndpointRole, Result},
    matrix::{AdjacencyMatrix, NO_EDGE, is_traversable},
    model::NodeIndex,
};

use super::{Algorithm, Distance, Step, Trace, ensure_endpoint, ensure_nodes};

struct DijkstraRun {
    visited: Vec<NodeIndex>,
    settled: Vec<bool>,
    distances: Vec<f64>,
    parent: Vec<Option<NodeIndex>>,
    steps: Vec<Step>,
}

impl DijkstraRun {
    fn emit(&mut self, current: Option<NodeIndex>, message: String) {
        self.steps.push(Step::Dijkstra {
            visited: self.visited.clone(),
            distances: self.distances.clone(),
            parent: self.parent.clone(),
            current,
            message,
        });
    }

    fn closest_unsettled(&self) -> Option<NodeIndex> {
        let mut best = None;
        let mut best_distance = NO_EDGE;
        for (node, &distance) in self.distances.iter().enumerate() {
            if !self.settled[node] && distance < best_distance {
                best_distance = distance;
                best = Some(node);
            }
        }
        best
    }
}

/// Traces single-source shortest paths from `start`, stopping once `end` is
/// settled.
///
/// # Errors
/// Returns [`crate::GraphTraceError::EmptyGraph`] for an empty matrix and
/// [`crate::GraphTraceError::NodeOutOfRange`] for an endpoint outside the
/// matrix.
///
/// # Examples
/// ```
/// use graphtrace_core::{AdjacencyMatrix, NO_EDGE, Step, dijkstra};
///
/// let matrix = AdjacencyMatrix::try_from_rows(vec![
///     vec![0.0, 4.0, 1.0],
///     vec![4.0, 0.0, 2.0],
///     vec![1.0, 2.0, 0.0],
/// ])?;
/// let trace = dijkstra(&matrix, 0, 1)?;
/// let Some(Step::Dijkstra { distances, parent, .. }) = trace.last() else {
///     unreachable!("dijkstra emits dijkstra steps");
/// };
/// assert_eq!(distances[1], 3.0);
/// assert_eq!(parent[1], Some(2));
/// # Ok::<(), graphtrace_core::GraphTraceError>(())
/// ```
pub fn dijkstra(matrix: &AdjacencyMatrix, start: NodeIndex, end: NodeIndex) -> Result<Trace> {
    let node_count = ensure_nodes(matrix)?;
    ensure_endpoint(EndpointRole::Start, start, node_count)?;
    ensure_endpoint(EndpointRole::End, end, node_count)?;

    let mut run = DijkstraRun {
        visited: Vec::with_capacity(node_count),
        settled: vec![false; node_count],
        distances: vec![NO_EDGE; node_count],
        parent: vec![None; node_count],
        steps: Vec::new(),
    };
    run.distances[start] = 0.0;
    run.emit(None, format!("Starting Dijkstra's algorithm from node {start}"));

    for _ in 0..node_count {
        let Some(current) = run.closest_unsettled() else {
            break;
        };
        run.settled[current] = true;
        run.visited.push(current);
        let reached = run.distances[current];
        run.emit(
            Some(current),
            format!("Visiting node {current} with distance {}", Distance(reached)),
        );

        if current == end {
            run.emit(
                Some(current),
                format!(
                    "Reached target node {end} with shortest distance {}",
                    Distance(reached)
                ),
            );
            break;
        }

        for neighbour in 0..node_count {
            let weight = matrix.get(current, neighbour);
            if !is_traversable(weight) || run.settled[neighbour] {
                continue;
            }
            let candidate = reached + weight;
            if candidate < run.distances[neighbour] {
                run.distances[neighbour] = candidate;
                run.parent[neighbour] = Some(current);
                run.emit(
                    Some(current),
                    format!(
                        "Updated distance to node {neighbour} to {}",
                        Distance(candidate)
                    ),
                );
            }
        }
    }

    if run.distances[end] == NO_EDGE {
        run.emit(None, format!("Could not reach target node {end}"));
    }

    Ok(Trace::new(Algorithm::Dijkstra, run.steps))
}
