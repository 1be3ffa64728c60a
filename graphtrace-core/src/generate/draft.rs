//! Mutable working state of a graph under construction.

use rand::Rng;

use crate::{
    matrix::AdjacencyMatrix,
    model::{Edge, Node, NodeIndex},
};

const POSITION_MARGIN: f64 = 0.1;
const POSITION_SPAN: f64 = 0.8;

/// Draws an edge weight uniformly from `1..=9`.
pub(super) fn random_weight<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..=9)
}

/// Draws a coordinate uniformly from `[0.1, 0.9)`.
pub(super) fn random_position<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    POSITION_MARGIN + POSITION_SPAN * rng.gen_range(0.0..1.0)
}

/// Draws how many random extra-edge placements to attempt when `span`
/// distinct attempt counts are possible (`0..span`).
pub(super) fn extra_attempts<R: Rng + ?Sized>(rng: &mut R, span: usize) -> usize {
    if span == 0 { 0 } else { rng.gen_range(0..span) }
}

/// Nodes, edges and matrix kept in lockstep while a constructor runs.
#[derive(Debug)]
pub(super) struct Draft {
    pub(super) nodes: Vec<Node>,
    pub(super) edges: Vec<Edge>,
    pub(super) matrix: AdjacencyMatrix,
    pub(super) is_directed: bool,
}

impl Draft {
    pub(super) fn with_nodes(nodes: Vec<Node>, is_directed: bool) -> Self {
        let matrix = AdjacencyMatrix::empty(nodes.len());
        Self {
            nodes,
            edges: Vec::new(),
            matrix,
            is_directed,
        }
    }

    /// Scatters `node_count` nodes uniformly over the inner layout square.
    pub(super) fn scattered<R: Rng + ?Sized>(
        rng: &mut R,
        node_count: usize,
        is_directed: bool,
    ) -> Self {
        let nodes = (0..node_count)
            .map(|id| Node {
                id,
                x: random_position(rng),
                y: random_position(rng),
                group: None,
            })
            .collect();
        Self::with_nodes(nodes, is_directed)
    }

    #[rustfmt::skip]
    pub(super) fn node_count(&self) -> usize { self.nodes.len() }

    /// Returns `true` when neither the edge list nor the matrix records an
    /// edge `source → target`.
    pub(super) fn is_vacant(&self, source: NodeIndex, target: NodeIndex) -> bool {
        source != target && self.matrix.is_vacant(source, target)
    }

    pub(super) fn add_undirected(&mut self, source: NodeIndex, target: NodeIndex, weight: u32) {
        self.edges.push(Edge::undirected(source, target, weight));
        self.matrix.connect_undirected(source, target, weight);
    }

    pub(super) fn add_directed(&mut self, source: NodeIndex, target: NodeIndex, weight: u32) {
        self.edges
            .push(Edge::with_direction(source, target, weight, true));
        self.matrix.connect_directed(source, target, weight);
    }

    /// Adds an edge of a mixed graph; undirected ones fill both cells.
    pub(super) fn add_mixed(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        weight: u32,
        directed: bool,
    ) {
        self.edges
            .push(Edge::with_direction(source, target, weight, directed));
        if directed {
            self.matrix.connect_directed(source, target, weight);
        } else {
            self.matrix.connect_undirected(source, target, weight);
        }
    }

    /// Keeps the first `limit` edges and rebuilds the matrix from them.
    pub(super) fn truncate_edges(&mut self, limit: usize) {
        if self.edges.len() <= limit {
            return;
        }
        self.edges.truncate(limit);
        self.matrix = AdjacencyMatrix::from_edges(self.node_count(), &self.edges);
    }
}
