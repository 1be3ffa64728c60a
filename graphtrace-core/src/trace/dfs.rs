//! Depth-first search with an explicit stack.
//!
//! Nodes are marked visited when popped, so a node may sit on the stack more
//! than once; later copies are discarded at pop time. Neighbours are pushed
//! in descending index order so the lowest index is explored first.

use crate::{
    error::{EndpointRole, Result},
    matrix::{AdjacencyMatrix, is_traversable},
    model::NodeIndex,
};

use super::{Algorithm, Step, Trace, ensure_endpoint, ensure_nodes};

struct DfsRun {
    visited: Vec<NodeIndex>,
    seen: Vec<bool>,
    stack: Vec<NodeIndex>,
    steps: Vec<Step>,
}

impl DfsRun {
    fn emit(&mut self, current: Option<NodeIndex>, message: String) {
        self.steps.push(Step::Dfs {
            visited: self.visited.clone(),
            stack: self.stack.clone(),
            current,
            message,
        });
    }
}

/// Traces a depth-first search from `start` that stops once `end` is
/// visited.
///
/// # Errors
/// Returns [`crate::GraphTraceError::EmptyGraph`] for an empty matrix and
/// [`crate::GraphTraceError::NodeOutOfRange`] for an endpoint outside the
/// matrix.
///
/// # Examples
/// ```
/// use graphtrace_core::{AdjacencyMatrix, NO_EDGE, dfs};
///
/// let matrix = AdjacencyMatrix::try_from_rows(vec![
///     vec![0.0, 1.0, 1.0],
///     vec![1.0, 0.0, NO_EDGE],
///     vec![1.0, NO_EDGE, 0.0],
/// ])?;
/// let trace = dfs(&matrix, 0, 2)?;
/// let messages: Vec<_> = trace.iter().map(|step| step.message()).collect();
/// assert_eq!(
///     messages,
///     [
///         "Starting DFS from node 0",
///         "Visiting node 0",
///         "Adding node 2 to stack",
///         "Adding node 1 to stack",
///         "Visiting node 1",
///         "Visiting node 2",
///         "Reached target node 2",
///     ]
/// );
/// # Ok::<(), graphtrace_core::GraphTraceError>(())
/// ```
pub fn dfs(matrix: &AdjacencyMatrix, start: NodeIndex, end: NodeIndex) -> Result<Trace> {
    let node_count = ensure_nodes(matrix)?;
    ensure_endpoint(EndpointRole::Start, start, node_count)?;
    ensure_endpoint(EndpointRole::End, end, node_count)?;

    let mut run = DfsRun {
        visited: Vec::with_capacity(node_count),
        seen: vec![false; node_count],
        stack: vec![start],
        steps: Vec::new(),
    };
    run.emit(None, format!("Starting DFS from node {start}"));

    while let Some(current) = run.stack.pop() {
        if run.seen[current] {
            continue;
        }
        run.seen[current] = true;
        run.visited.push(current);
        run.emit(Some(current), format!("Visiting node {current}"));

        if current == end {
            run.emit(Some(current), format!("Reached target node {end}"));
            break;
        }

        for neighbour in (0..node_count).rev() {
            if is_traversable(matrix.get(current, neighbour)) && !run.seen[neighbour] {
                run.stack.push(neighbour);
                run.emit(Some(current), format!("Adding node {neighbour} to stack"));
            }
        }
    }

    if !run.seen[end] {
        run.emit(None, format!("Could not reach target node {end}"));
    }

    Ok(Trace::new(Algorithm::Dfs, run.steps))
}
