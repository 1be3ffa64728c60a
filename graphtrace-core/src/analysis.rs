//! Structural checkers used to compute [`Properties`] from the edges a
//! generator actually produced.
//!
//! The checkers only look at the final edge list and matrix; they never
//! consult the class that was requested, so they double as an independent
//! oracle for the construction rules.

use std::collections::VecDeque;

use crate::{
    matrix::AdjacencyMatrix,
    model::{Edge, GraphClass, Properties},
    union_find::DisjointSet,
};

/// Returns `true` when every node is reachable from every other once edge
/// direction is ignored. Graphs with at most one node are connected.
#[must_use]
pub fn is_weakly_connected(node_count: usize, edges: &[Edge]) -> bool {
    if node_count <= 1 {
        return true;
    }
    let mut components = DisjointSet::new(node_count);
    for edge in edges {
        components.union(edge.source, edge.target);
    }
    components.components() == 1
}

/// Detects a cycle among the undirected edges only. An edge whose endpoints
/// are already in one component closes a cycle.
#[must_use]
pub fn has_undirected_cycle(node_count: usize, edges: &[Edge]) -> bool {
    let mut components = DisjointSet::new(node_count);
    edges
        .iter()
        .filter(|edge| !edge.is_directed())
        .any(|edge| !components.union(edge.source, edge.target))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum VisitState {
    Unvisited,
    OnStack,
    Done,
}

/// Detects a directed cycle in `matrix` with a depth-first search that keeps
/// the current recursion path; an edge back into the path is a cycle.
///
/// Every traversable cell counts as a directed edge, so a symmetric matrix
/// with any edge reports a cycle.
#[must_use]
pub fn has_directed_cycle(matrix: &AdjacencyMatrix) -> bool {
    let node_count = matrix.node_count();
    let mut state = vec![VisitState::Unvisited; node_count];

    for root in 0..node_count {
        if state[root] != VisitState::Unvisited {
            continue;
        }
        state[root] = VisitState::OnStack;
        let mut path = vec![(root, 0_usize)];

        while let Some(frame) = path.last_mut() {
            let (node, neighbour) = *frame;
            if neighbour == node_count {
                state[node] = VisitState::Done;
                path.pop();
                continue;
            }
            frame.1 += 1;
            if matrix.weight(node, neighbour).is_none() {
                continue;
            }
            match state[neighbour] {
                VisitState::OnStack => return true,
                VisitState::Unvisited => {
                    state[neighbour] = VisitState::OnStack;
                    path.push((neighbour, 0));
                }
                VisitState::Done => {}
            }
        }
    }

    false
}

/// Detects a cycle in a graph that may mix directed and undirected edges.
///
/// Undirected edges are collapsed into components first. The graph is cyclic
/// when the undirected part has a cycle, when a directed edge runs inside a
/// single component, or when the directed edges between components form a
/// directed cycle.
#[must_use]
pub fn has_cycle(node_count: usize, edges: &[Edge]) -> bool {
    let mut components = DisjointSet::new(node_count);
    for edge in edges.iter().filter(|edge| !edge.is_directed()) {
        if !components.union(edge.source, edge.target) {
            return true;
        }
    }

    let mut condensed = AdjacencyMatrix::empty(node_count);
    for edge in edges.iter().filter(|edge| edge.is_directed()) {
        let source = components.find(edge.source);
        let target = components.find(edge.target);
        if source == target {
            return true;
        }
        condensed.connect_directed(source, target, edge.weight);
    }

    has_directed_cycle(&condensed)
}

/// Returns `true` when every ordered pair of distinct nodes has a
/// traversable cell.
#[must_use]
pub fn is_complete(matrix: &AdjacencyMatrix) -> bool {
    let node_count = matrix.node_count();
    (0..node_count).all(|row| {
        (0..node_count).all(|column| row == column || matrix.weight(row, column).is_some())
    })
}

/// Two-colours the undirected view of the graph breadth-first. Fails on the
/// first edge whose endpoints received the same colour.
#[must_use]
pub fn is_bipartite(node_count: usize, edges: &[Edge]) -> bool {
    let mut neighbours = vec![Vec::new(); node_count];
    for edge in edges {
        neighbours[edge.source].push(edge.target);
        neighbours[edge.target].push(edge.source);
    }

    let mut colour: Vec<Option<bool>> = vec![None; node_count];
    let mut queue = VecDeque::new();
    for root in 0..node_count {
        if colour[root].is_some() {
            continue;
        }
        colour[root] = Some(false);
        queue.push_back(root);
        while let Some(node) = queue.pop_front() {
            let side = colour[node].unwrap_or(false);
            for &next in &neighbours[node] {
                match colour[next] {
                    Some(other) if other == side => return false,
                    Some(_) => {}
                    None => {
                        colour[next] = Some(!side);
                        queue.push_back(next);
                    }
                }
            }
        }
    }
    true
}

/// Density threshold: more than `N log2 N` edges, or a complete graph on at
/// least two nodes.
#[must_use]
pub fn is_dense(node_count: usize, edge_count: usize, complete: bool) -> bool {
    if node_count >= 2 && complete {
        return true;
    }
    let nodes = node_count as f64;
    edge_count as f64 > nodes * nodes.log2().max(0.0)
}

/// A tree is weakly connected with exactly `N - 1` edges, which also rules
/// out cycles in the undirected view.
#[must_use]
pub fn is_tree(node_count: usize, edges: &[Edge]) -> bool {
    node_count >= 1
        && edges.len() == node_count - 1
        && is_weakly_connected(node_count, edges)
}

/// Computes every [`Properties`] field from the final edge set and matrix.
#[must_use]
pub fn verify_properties(
    class: GraphClass,
    node_count: usize,
    edges: &[Edge],
    matrix: &AdjacencyMatrix,
) -> Properties {
    let is_complete = node_count >= 1 && is_complete(matrix);
    Properties {
        class,
        is_connected: is_weakly_connected(node_count, edges),
        is_cyclic: has_cycle(node_count, edges),
        is_dense: is_dense(node_count, edges.len(), is_complete),
        is_tree: is_tree(node_count, edges),
        is_complete,
        is_bipartite: is_bipartite(node_count, edges),
    }
}
