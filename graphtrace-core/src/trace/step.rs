//! Snapshots emitted by the tracer.
//!
//! Every collection inside a [`Step`] is an owned copy taken when the step
//! was emitted; later progress of the algorithm never changes an earlier
//! step.

use std::fmt;

use crate::model::NodeIndex;

use super::Algorithm;

/// An edge selected or considered by a spanning-tree algorithm.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpanningEdge {
    /// Endpoint already in the tree (Prim) or the lower index (Kruskal).
    pub source: NodeIndex,
    /// Endpoint joined by the edge.
    pub target: NodeIndex,
    /// Matrix weight of the edge.
    pub weight: f64,
}

impl SpanningEdge {
    #[must_use]
    pub const fn new(source: NodeIndex, target: NodeIndex, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

/// One discrete state transition of an algorithm.
///
/// Consumers match on the variant to read the fields that algorithm
/// records. Distances hold `f64::INFINITY` for unreached nodes; with the
/// `serde` feature they serialize as `null`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "algorithm", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Step {
    /// Depth-first search.
    Dfs {
        /// Nodes in the order they were visited.
        visited: Vec<NodeIndex>,
        /// Frontier, top of the stack last.
        stack: Vec<NodeIndex>,
        current: Option<NodeIndex>,
        message: String,
    },
    /// Breadth-first search.
    Bfs {
        /// Nodes in the order they were discovered.
        visited: Vec<NodeIndex>,
        /// Frontier, front of the queue first.
        queue: Vec<NodeIndex>,
        current: Option<NodeIndex>,
        message: String,
    },
    /// Array-based Dijkstra.
    Dijkstra {
        /// Settled nodes in settlement order.
        visited: Vec<NodeIndex>,
        /// Best known distance per node.
        distances: Vec<f64>,
        /// Predecessor on the best known path, `None` until relaxed.
        parent: Vec<Option<NodeIndex>>,
        current: Option<NodeIndex>,
        message: String,
    },
    /// Floyd-Warshall all-pairs shortest paths.
    FloydWarshall {
        /// Full N×N distance table.
        distances: Vec<Vec<f64>>,
        /// Row of the improved cell.
        i: Option<NodeIndex>,
        /// Column of the improved cell.
        j: Option<NodeIndex>,
        /// Intermediate node of the current round.
        k: Option<NodeIndex>,
        message: String,
    },
    /// Prim's minimum spanning tree.
    Prim {
        /// Nodes in the tree, in the order they joined.
        visited: Vec<NodeIndex>,
        mst: Vec<SpanningEdge>,
        current: Option<NodeIndex>,
        message: String,
    },
    /// Kruskal's minimum spanning tree.
    Kruskal {
        /// Every candidate edge in processing order.
        edges: Vec<SpanningEdge>,
        mst: Vec<SpanningEdge>,
        /// Edge under consideration.
        current: Option<SpanningEdge>,
        message: String,
    },
}

impl Step {
    /// Returns the algorithm that emitted the step.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Dfs { .. } => Algorithm::Dfs,
            Self::Bfs { .. } => Algorithm::Bfs,
            Self::Dijkstra { .. } => Algorithm::Dijkstra,
            Self::FloydWarshall { .. } => Algorithm::FloydWarshall,
            Self::Prim { .. } => Algorithm::Prim,
            Self::Kruskal { .. } => Algorithm::Kruskal,
        }
    }

    /// Returns the human-readable description of the transition.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Dfs { message, .. }
            | Self::Bfs { message, .. }
            | Self::Dijkstra { message, .. }
            | Self::FloydWarshall { message, .. }
            | Self::Prim { message, .. }
            | Self::Kruskal { message, .. } => message,
        }
    }

    /// Returns the node the step focuses on. Floyd-Warshall and Kruskal
    /// steps never focus a single node.
    #[must_use]
    pub const fn current_node(&self) -> Option<NodeIndex> {
        match self {
            Self::Dfs { current, .. }
            | Self::Bfs { current, .. }
            | Self::Dijkstra { current, .. }
            | Self::Prim { current, .. } => *current,
            Self::FloydWarshall { .. } | Self::Kruskal { .. } => None,
        }
    }

    /// Returns the visited sequence for the algorithms that keep one.
    #[must_use]
    pub fn visited(&self) -> Option<&[NodeIndex]> {
        match self {
            Self::Dfs { visited, .. }
            | Self::Bfs { visited, .. }
            | Self::Dijkstra { visited, .. }
            | Self::Prim { visited, .. } => Some(visited),
            Self::FloydWarshall { .. } | Self::Kruskal { .. } => None,
        }
    }

    /// Returns the partial spanning tree of Prim and Kruskal steps.
    #[must_use]
    pub fn mst(&self) -> Option<&[SpanningEdge]> {
        match self {
            Self::Prim { mst, .. } | Self::Kruskal { mst, .. } => Some(mst),
            _ => None,
        }
    }
}

/// Formats a distance for step messages: integral values print without a
/// fraction and an unreached distance prints as `∞`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Distance(pub(crate) f64);

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_infinite() {
            f.write_str("∞")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
