//! Graph data model shared by the generator and the tracer.
//!
//! A [`Graph`] is created once per generation call and never mutated. The
//! edge list is the authoritative structural record: for mixed graphs the
//! [`AdjacencyMatrix`] alone cannot tell a directed edge from an undirected
//! one, so consumers that care about direction must read [`Graph::edges`].

use std::{fmt, str::FromStr};

use crate::{error::GraphTraceError, matrix::AdjacencyMatrix};

/// Position of a node in the node sequence (`0..N`).
pub type NodeIndex = usize;

/// A node with a normalised layout position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Index of the node; always equal to its position in [`Graph::nodes`].
    pub id: NodeIndex,
    /// Horizontal position in `[0, 1]`.
    pub x: f64,
    /// Vertical position in `[0, 1]`.
    pub y: f64,
    /// Partition (0 or 1), present only for bipartite graphs.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub group: Option<u8>,
}

/// A weighted edge as it was declared by the generator.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Source endpoint.
    pub source: NodeIndex,
    /// Target endpoint.
    pub target: NodeIndex,
    /// Positive integer weight in `1..=9`.
    pub weight: u32,
    /// Declared direction. `None` for classes whose edges are implicitly
    /// undirected.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub directed: Option<bool>,
}

impl Edge {
    /// Creates an edge of an implicitly undirected class.
    #[must_use]
    pub const fn undirected(source: NodeIndex, target: NodeIndex, weight: u32) -> Self {
        Self {
            source,
            target,
            weight,
            directed: None,
        }
    }

    /// Creates an edge with an explicit direction flag.
    #[must_use]
    pub const fn with_direction(
        source: NodeIndex,
        target: NodeIndex,
        weight: u32,
        directed: bool,
    ) -> Self {
        Self {
            source,
            target,
            weight,
            directed: Some(directed),
        }
    }

    /// Returns `true` when the edge may only be traversed from source to target.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        matches!(self.directed, Some(true))
    }
}

/// The twelve structural classes a caller can request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GraphClass {
    /// Random connected graph with undirected edges.
    Undirected,
    /// Weakly connected graph whose edges all carry a direction.
    Directed,
    /// Weakly connected graph mixing directed and undirected edges.
    Mixed,
    /// Alias of [`GraphClass::Undirected`].
    Connected,
    /// Two or three components with no edge crossing between them.
    Disconnected,
    /// Ring through every node plus random chords.
    Cyclic,
    /// Directed acyclic graph; edges only run from lower to higher index.
    Acyclic,
    /// Undirected graph truncated to at most `ceil(N log2 N)` edges.
    Sparse,
    /// Alias of [`GraphClass::Complete`].
    Dense,
    /// Random spanning tree.
    Tree,
    /// Complete graph `K_N`.
    Complete,
    /// Two groups with edges only between them.
    Bipartite,
}

impl GraphClass {
    /// Every class in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Undirected,
        Self::Directed,
        Self::Mixed,
        Self::Connected,
        Self::Disconnected,
        Self::Cyclic,
        Self::Acyclic,
        Self::Sparse,
        Self::Dense,
        Self::Tree,
        Self::Complete,
        Self::Bipartite,
    ];

    /// Returns the class tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undirected => "undirected",
            Self::Directed => "directed",
            Self::Mixed => "mixed",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Cyclic => "cyclic",
            Self::Acyclic => "acyclic",
            Self::Sparse => "sparse",
            Self::Dense => "dense",
            Self::Tree => "tree",
            Self::Complete => "complete",
            Self::Bipartite => "bipartite",
        }
    }
}

impl fmt::Display for GraphClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphClass {
    type Err = GraphTraceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == raw)
            .ok_or_else(|| GraphTraceError::UnknownGraphClass {
                provided: raw.to_owned(),
            })
    }
}

/// Structural metadata attached to a generated graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Properties {
    /// The class that was requested.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub class: GraphClass,
    /// Connected when edge direction is ignored.
    pub is_connected: bool,
    /// Contains at least one cycle.
    pub is_cyclic: bool,
    /// Has more edges than `N log2 N`, or is complete.
    pub is_dense: bool,
    /// Connected, acyclic and exactly `N - 1` edges.
    pub is_tree: bool,
    /// Every ordered pair of distinct nodes is joined.
    pub is_complete: bool,
    /// Nodes admit a two-colouring with no monochromatic edge.
    pub is_bipartite: bool,
}

/// A generated graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency_matrix: AdjacencyMatrix,
    is_directed: bool,
    properties: Properties,
}

impl Graph {
    pub(crate) fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        adjacency_matrix: AdjacencyMatrix,
        is_directed: bool,
        properties: Properties,
    ) -> Self {
        Self {
            nodes,
            edges,
            adjacency_matrix,
            is_directed,
            properties,
        }
    }

    /// Returns the nodes in index order.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// Returns the declared edges in generation order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the weighted adjacency matrix consumed by the tracer.
    #[must_use]
    #[rustfmt::skip]
    pub fn adjacency_matrix(&self) -> &AdjacencyMatrix { &self.adjacency_matrix }

    /// Returns `true` for the directed, mixed and acyclic classes.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_directed(&self) -> bool { self.is_directed }

    /// Returns the structural metadata of the graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn properties(&self) -> &Properties { &self.properties }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
