//! Algorithm Tracer: classic graph algorithms instrumented to record every
//! internal state transition as a [`Step`].
//!
//! All six procedures read the adjacency matrix only and never mutate it.
//! Unreachable targets and disconnected inputs are not errors; they end the
//! trace with an explanatory step. Only malformed requests (an empty matrix
//! or an endpoint outside `0..N`) fail.

mod bfs;
mod dfs;
mod dijkstra;
mod floyd_warshall;
mod kruskal;
mod prim;
mod step;

#[cfg(test)]
mod property;

use std::{fmt, str::FromStr};

use tracing::{debug, instrument, warn};

use crate::{
    error::{EndpointRole, GraphTraceError, Result},
    matrix::AdjacencyMatrix,
    model::{GraphClass, NodeIndex},
};

pub use self::{
    bfs::bfs,
    dfs::dfs,
    dijkstra::dijkstra,
    floyd_warshall::floyd_warshall,
    kruskal::kruskal,
    prim::prim,
    step::{SpanningEdge, Step},
};
pub(crate) use self::step::Distance;

/// The six traceable algorithms.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Algorithm {
    Dfs,
    Bfs,
    Dijkstra,
    FloydWarshall,
    Prim,
    Kruskal,
}

impl Algorithm {
    /// Every algorithm in presentation order.
    pub const ALL: [Self; 6] = [
        Self::Dfs,
        Self::Bfs,
        Self::Dijkstra,
        Self::FloydWarshall,
        Self::Prim,
        Self::Kruskal,
    ];

    /// Returns the algorithm tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dfs => "dfs",
            Self::Bfs => "bfs",
            Self::Dijkstra => "dijkstra",
            Self::FloydWarshall => "floydWarshall",
            Self::Prim => "prim",
            Self::Kruskal => "kruskal",
        }
    }

    /// Returns `true` when the algorithm treats the matrix as undirected.
    #[must_use]
    pub const fn assumes_undirected(self) -> bool {
        matches!(self, Self::Prim | Self::Kruskal)
    }

    /// Static presentation table of sensible class/algorithm pairings.
    ///
    /// Advisory only: the tracer runs any combination.
    ///
    /// # Examples
    /// ```
    /// use graphtrace_core::{Algorithm, GraphClass};
    ///
    /// assert!(Algorithm::Kruskal.is_recommended_for(GraphClass::Disconnected));
    /// assert!(!Algorithm::Prim.is_recommended_for(GraphClass::Disconnected));
    /// assert!(!Algorithm::Prim.is_recommended_for(GraphClass::Directed));
    /// ```
    #[must_use]
    pub const fn is_recommended_for(self, class: GraphClass) -> bool {
        match self {
            Self::Dfs | Self::Bfs | Self::Dijkstra | Self::FloydWarshall => true,
            Self::Prim => !matches!(
                class,
                GraphClass::Directed | GraphClass::Mixed | GraphClass::Disconnected
            ),
            Self::Kruskal => !matches!(class, GraphClass::Directed | GraphClass::Mixed),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = GraphTraceError;

    fn from_str(raw: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == raw)
            .ok_or_else(|| GraphTraceError::UnknownAlgorithm {
                provided: raw.to_owned(),
            })
    }
}

/// Ordered steps produced by one algorithm run.
///
/// # Examples
/// ```
/// use graphtrace_core::{AdjacencyMatrix, NO_EDGE, bfs};
///
/// let matrix = AdjacencyMatrix::try_from_rows(vec![
///     vec![0.0, 1.0, NO_EDGE],
///     vec![1.0, 0.0, NO_EDGE],
///     vec![NO_EDGE, NO_EDGE, 0.0],
/// ])?;
/// let trace = bfs(&matrix, 0, 2)?;
/// let last = trace.last().expect("traces are never empty");
/// assert_eq!(last.message(), "Could not reach target node 2");
/// # Ok::<(), graphtrace_core::GraphTraceError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Trace {
    algorithm: Algorithm,
    steps: Vec<Step>,
}

impl Trace {
    pub(crate) fn new(algorithm: Algorithm, steps: Vec<Step>) -> Self {
        debug!(algorithm = %algorithm, steps = steps.len(), "trace recorded");
        Self { algorithm, steps }
    }

    /// Returns the algorithm that produced the trace.
    #[must_use]
    #[rustfmt::skip]
    pub fn algorithm(&self) -> Algorithm { self.algorithm }

    /// Returns every step in execution order.
    #[must_use]
    #[rustfmt::skip]
    pub fn steps(&self) -> &[Step] { &self.steps }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the step at `index`, as a renderer scrubbing the trace would.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Returns the terminal step.
    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Consumes the trace, returning its steps.
    #[must_use]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Rejects an empty matrix and returns its node count.
pub(crate) fn ensure_nodes(matrix: &AdjacencyMatrix) -> Result<usize> {
    if matrix.is_empty() {
        return Err(GraphTraceError::EmptyGraph);
    }
    Ok(matrix.node_count())
}

pub(crate) fn ensure_endpoint(role: EndpointRole, node: NodeIndex, node_count: usize) -> Result<()> {
    if node < node_count {
        Ok(())
    } else {
        Err(GraphTraceError::NodeOutOfRange {
            role,
            node,
            node_count,
        })
    }
}

/// Logs when an algorithm that assumes an undirected graph receives a
/// matrix whose two triangles disagree.
pub(crate) fn warn_if_asymmetric(algorithm: Algorithm, matrix: &AdjacencyMatrix) {
    if !matrix.is_symmetric() {
        warn!(
            algorithm = %algorithm,
            "matrix is not symmetric; spanning tree results are not meaningful"
        );
    }
}

/// Runs `algorithm` on `matrix` between `start` and `end`.
///
/// Both endpoints are validated for every algorithm; Prim ignores `end` and
/// Kruskal ignores both.
///
/// # Errors
/// Returns [`GraphTraceError::EmptyGraph`] for an empty matrix and
/// [`GraphTraceError::NodeOutOfRange`] when an endpoint is not below the node
/// count.
///
/// # Examples
/// ```
/// use graphtrace_core::{Algorithm, GraphClass, GraphGenerator, run_algorithm};
///
/// let graph = GraphGenerator::seeded(3).generate(GraphClass::Tree, 5)?;
/// let trace = run_algorithm(Algorithm::Dfs, graph.adjacency_matrix(), 0, 4)?;
/// assert_eq!(trace.last().and_then(|step| step.current_node()), Some(4));
/// # Ok::<(), graphtrace_core::GraphTraceError>(())
/// ```
#[instrument(
    name = "core.trace",
    err,
    skip(matrix),
    fields(algorithm = %algorithm, node_count = matrix.node_count()),
)]
pub fn run_algorithm(
    algorithm: Algorithm,
    matrix: &AdjacencyMatrix,
    start: NodeIndex,
    end: NodeIndex,
) -> Result<Trace> {
    let node_count = ensure_nodes(matrix)?;
    ensure_endpoint(EndpointRole::Start, start, node_count)?;
    ensure_endpoint(EndpointRole::End, end, node_count)?;

    match algorithm {
        Algorithm::Dfs => dfs(matrix, start, end),
        Algorithm::Bfs => bfs(matrix, start, end),
        Algorithm::Dijkstra => dijkstra(matrix, start, end),
        Algorithm::FloydWarshall => floyd_warshall(matrix, start, end),
        Algorithm::Prim => prim(matrix, start),
        Algorithm::Kruskal => kruskal(matrix),
    }
}
