//! Property-based tests for the per-class construction contracts.
//!
//! Every class is generated at the sizes the control surface offers and the
//! result is checked against an oracle that does not share code with the
//! construction rules or the analysis checkers.

use std::collections::VecDeque;

use proptest::prelude::*;
use proptest::test_runner::{TestCaseError, TestCaseResult};

use super::classes::{blocks, sparse_limit};
use crate::{
    GraphClass, GraphGenerator,
    analysis::verify_properties,
    matrix::{NO_EDGE, is_traversable},
    model::Graph,
    test_utils::{ensure, suite_proptest_config},
};

const SIZES: [usize; 4] = [2, 5, 10, 20];

/// Breadth-first reachability over the undirected view of the edge list.
fn component_sizes(graph: &Graph) -> Vec<usize> {
    let n = graph.node_count();
    let mut neighbours = vec![Vec::new(); n];
    for edge in graph.edges() {
        neighbours[edge.source].push(edge.target);
        neighbours[edge.target].push(edge.source);
    }
    let mut seen = vec![false; n];
    let mut sizes = Vec::new();
    for root in 0..n {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        let mut size = 0;
        let mut queue = VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            size += 1;
            for &next in &neighbours[node] {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        sizes.push(size);
    }
    sizes
}

fn validate_layout(graph: &Graph, node_count: usize) -> TestCaseResult {
    ensure(graph.node_count() == node_count, || {
        format!("expected {node_count} nodes, got {}", graph.node_count())
    })?;
    for (index, node) in graph.nodes().iter().enumerate() {
        ensure(node.id == index, || format!("node {index} carries id {}", node.id))?;
        ensure(
            (0.1..=0.9).contains(&node.x) && (0.1..=0.9).contains(&node.y),
            || format!("node {index} outside the layout square: ({}, {})", node.x, node.y),
        )?;
    }
    Ok(())
}

/// Every edge is mirrored by exactly the matrix cells its direction implies,
/// and no other off-diagonal cell is populated.
fn validate_matrix_consistency(graph: &Graph) -> TestCaseResult {
    let matrix = graph.adjacency_matrix();
    let n = graph.node_count();
    let mut expected_cells = 0;
    for edge in graph.edges() {
        ensure(edge.source != edge.target, || format!("self-loop {edge:?}"))?;
        ensure((1..=9).contains(&edge.weight), || format!("weight out of range {edge:?}"))?;
        let weight = f64::from(edge.weight);
        ensure(matrix.get(edge.source, edge.target) == weight, || {
            format!("forward cell does not match {edge:?}")
        })?;
        if edge.is_directed() {
            expected_cells += 1;
        } else {
            expected_cells += 2;
            ensure(matrix.get(edge.target, edge.source) == weight, || {
                format!("undirected edge {edge:?} is not mirrored")
            })?;
        }
    }

    let mut populated = 0;
    for row in 0..n {
        ensure(matrix.get(row, row) == 0.0, || format!("diagonal {row} is not zero"))?;
        for column in 0..n {
            let value = matrix.get(row, column);
            if row != column {
                ensure(value == NO_EDGE || is_traversable(value), || {
                    format!("cell ({row}, {column}) holds {value}")
                })?;
                populated += usize::from(is_traversable(value));
            }
        }
    }
    ensure(populated == expected_cells, || {
        format!("{populated} populated cells for {expected_cells} implied by the edges")
    })
}

fn validate_class_contract(graph: &Graph, class: GraphClass) -> TestCaseResult {
    let n = graph.node_count();
    let edges = graph.edges();
    let components = component_sizes(graph).len();
    let pairs = n * (n - 1) / 2;

    match class {
        GraphClass::Undirected | GraphClass::Connected => {
            ensure(components == 1, || format!("{components} components"))?;
            ensure(edges.len() >= n - 1, || "backbone incomplete".to_owned())?;
            ensure(graph.adjacency_matrix().is_symmetric(), || "asymmetric".to_owned())?;
        }
        GraphClass::Directed => {
            ensure(components == 1, || format!("{components} components"))?;
            ensure(edges.iter().all(|edge| edge.directed == Some(true)), || {
                "undirected edge in a directed graph".to_owned()
            })?;
            ensure(graph.is_directed(), || "directed flag unset".to_owned())?;
        }
        GraphClass::Mixed => {
            ensure(components == 1, || format!("{components} components"))?;
            ensure(edges.iter().all(|edge| edge.directed.is_some()), || {
                "mixed edge without a direction flag".to_owned()
            })?;
        }
        GraphClass::Disconnected => {
            let block_ranges = blocks(n);
            for edge in edges {
                ensure(
                    block_ranges.iter().any(|block| {
                        block.contains(&edge.source) && block.contains(&edge.target)
                    }),
                    || format!("edge {edge:?} crosses a block boundary"),
                )?;
            }
            ensure(components == block_ranges.len(), || {
                format!("{components} components for {} blocks", block_ranges.len())
            })?;
        }
        GraphClass::Cyclic => {
            ensure(components == 1, || format!("{components} components"))?;
            if n >= 3 {
                ensure(edges.len() >= n, || "ring incomplete".to_owned())?;
                ensure(graph.properties().is_cyclic, || "ring reported acyclic".to_owned())?;
            }
        }
        GraphClass::Acyclic => {
            ensure(components == 1, || format!("{components} components"))?;
            ensure(
                edges
                    .iter()
                    .all(|edge| edge.source < edge.target && edge.is_directed()),
                || "edge against the index order".to_owned(),
            )?;
        }
        GraphClass::Sparse => {
            ensure(edges.len() <= sparse_limit(n), || {
                format!("{} edges exceed the sparse limit", edges.len())
            })?;
            ensure(!graph.properties().is_dense, || "sparse graph reported dense".to_owned())?;
        }
        GraphClass::Complete | GraphClass::Dense => {
            ensure(edges.len() == pairs, || format!("{} edges, expected {pairs}", edges.len()))?;
            ensure(graph.properties().is_complete, || "not complete".to_owned())?;
        }
        GraphClass::Tree => {
            ensure(edges.len() == n - 1, || format!("{} edges in a tree", edges.len()))?;
            ensure(components == 1, || format!("{components} components"))?;
        }
        GraphClass::Bipartite => {
            let left = n / 2;
            for node in graph.nodes() {
                let expected = if node.id < left { 0 } else { 1 };
                ensure(node.group == Some(expected), || {
                    format!("node {} in group {:?}", node.id, node.group)
                })?;
            }
            for edge in edges {
                ensure((edge.source < left) != (edge.target < left), || {
                    format!("edge {edge:?} stays within a group")
                })?;
            }
        }
    }
    Ok(())
}

/// Generates `class` at `node_count` nodes from `seed` and checks every
/// construction invariant.
pub(super) fn run_class_contract_property(
    class: GraphClass,
    node_count: usize,
    seed: u64,
) -> TestCaseResult {
    let graph = GraphGenerator::seeded(seed)
        .generate(class, node_count)
        .map_err(|err| TestCaseError::fail(format!("generation failed: {err}")))?;

    validate_layout(&graph, node_count)?;
    validate_matrix_consistency(&graph)?;
    validate_class_contract(&graph, class)?;

    ensure(graph.properties().class == class, || "wrong class tag".to_owned())?;
    let mut recomputed =
        verify_properties(class, node_count, graph.edges(), graph.adjacency_matrix());
    if class == GraphClass::Sparse {
        recomputed.is_dense = false;
    }
    ensure(&recomputed == graph.properties(), || {
        format!("reported {:?}, recomputed {recomputed:?}", graph.properties())
    })
}

/// Expands to an rstest grid over the offered sizes and a few fixed seeds
/// for one class.
macro_rules! class_contract_test {
    ($test_name:ident, $class:expr) => {
        #[rstest::rstest]
        fn $test_name(
            #[values(2, 5, 10, 20)] node_count: usize,
            #[values(7, 42, 999)] seed: u64,
        ) {
            run_class_contract_property($class, node_count, seed)
                .expect("class contract must hold");
        }
    };
}

class_contract_test!(undirected_contract, GraphClass::Undirected);
class_contract_test!(directed_contract, GraphClass::Directed);
class_contract_test!(mixed_contract, GraphClass::Mixed);
class_contract_test!(connected_contract, GraphClass::Connected);
class_contract_test!(disconnected_contract, GraphClass::Disconnected);
class_contract_test!(cyclic_contract, GraphClass::Cyclic);
class_contract_test!(acyclic_contract, GraphClass::Acyclic);
class_contract_test!(sparse_contract, GraphClass::Sparse);
class_contract_test!(dense_contract, GraphClass::Dense);
class_contract_test!(tree_contract, GraphClass::Tree);
class_contract_test!(complete_contract, GraphClass::Complete);
class_contract_test!(bipartite_contract, GraphClass::Bipartite);

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn every_class_honours_its_contract(
        class in proptest::sample::select(GraphClass::ALL.to_vec()),
        node_count in proptest::sample::select(SIZES.to_vec()),
        seed in any::<u64>(),
    ) {
        run_class_contract_property(class, node_count, seed)?;
    }

    #[test]
    fn seeded_generation_is_reproducible(
        class in proptest::sample::select(GraphClass::ALL.to_vec()),
        node_count in 1_usize..=20,
        seed in any::<u64>(),
    ) {
        let first = GraphGenerator::seeded(seed).generate(class, node_count);
        let second = GraphGenerator::seeded(seed).generate(class, node_count);
        prop_assert_eq!(first, second);
    }
}
