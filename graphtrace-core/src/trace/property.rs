//! Property-based tests checking traces against independent oracles.
//!
//! - DFS/BFS visit exactly the nodes reachable from the start.
//! - BFS grows its visited set by one node per enqueue.
//! - Dijkstra agrees with a Bellman-Ford oracle and with Floyd-Warshall, and
//!   never raises a tentative distance.
//! - Prim and Kruskal match a brute-force minimum spanning forest on small
//!   undirected graphs.
//! - Repeated runs produce identical traces.

use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

use super::*;
use crate::{
    matrix::NO_EDGE,
    model::Edge,
    test_utils::{ensure, suite_proptest_config},
    union_find::DisjointSet,
};

/// Random matrix with its endpoints.
#[derive(Clone, Debug)]
struct TraceFixture {
    matrix: AdjacencyMatrix,
    start: NodeIndex,
    end: NodeIndex,
}

fn fixture_strategy(max_nodes: usize, directed: bool) -> impl Strategy<Value = TraceFixture> {
    (1..=max_nodes).prop_flat_map(move |node_count| {
        let cells = node_count * node_count;
        (
            proptest::collection::vec(proptest::option::weighted(0.35, 1_u32..=9), cells),
            0..node_count,
            0..node_count,
        )
            .prop_map(move |(weights, start, end)| {
                let edges: Vec<Edge> = weights
                    .into_iter()
                    .enumerate()
                    .filter_map(|(cell, weight)| {
                        let (source, target) = (cell / node_count, cell % node_count);
                        let keep = if directed { source != target } else { source < target };
                        weight
                            .filter(|_| keep)
                            .map(|weight| Edge::with_direction(source, target, weight, directed))
                    })
                    .collect();
                TraceFixture {
                    matrix: AdjacencyMatrix::from_edges(node_count, &edges),
                    start,
                    end,
                }
            })
    })
}

fn reachable_from(matrix: &AdjacencyMatrix, start: NodeIndex) -> BTreeSet<NodeIndex> {
    let mut reached = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        for next in 0..matrix.node_count() {
            if matrix.weight(node, next).is_some() && reached.insert(next) {
                queue.push_back(next);
            }
        }
    }
    reached
}

/// Single-source distances by repeated relaxation of every edge.
fn bellman_ford(matrix: &AdjacencyMatrix, start: NodeIndex) -> Vec<f64> {
    let n = matrix.node_count();
    let mut distances = vec![NO_EDGE; n];
    distances[start] = 0.0;
    for _ in 1..n {
        for source in 0..n {
            for target in 0..n {
                if let Some(weight) = matrix.weight(source, target) {
                    let candidate = distances[source] + weight;
                    if candidate < distances[target] {
                        distances[target] = candidate;
                    }
                }
            }
        }
    }
    distances
}

/// Weight of the minimum spanning forest, found by trying every edge subset
/// of the forest's size.
fn brute_force_forest_weight(matrix: &AdjacencyMatrix) -> (usize, f64) {
    let n = matrix.node_count();
    let edges: Vec<(usize, usize, f64)> = (0..n)
        .flat_map(|source| (source + 1..n).map(move |target| (source, target)))
        .filter_map(|(source, target)| {
            matrix
                .weight(source, target)
                .map(|weight| (source, target, weight))
        })
        .collect();
    let mut components = DisjointSet::new(n);
    for &(source, target, _) in &edges {
        components.union(source, target);
    }
    let size = n - components.components();

    let mut best = NO_EDGE;
    for mask in 0_u32..(1 << edges.len()) {
        if mask.count_ones() as usize != size {
            continue;
        }
        let mut forest = DisjointSet::new(n);
        let mut total = 0.0;
        let acyclic = edges.iter().enumerate().all(|(index, &(source, target, weight))| {
            if mask & (1 << index) == 0 {
                return true;
            }
            total += weight;
            forest.union(source, target)
        });
        if acyclic && total < best {
            best = total;
        }
    }
    (size, if size == 0 { 0.0 } else { best })
}

fn visited_set(trace: &Trace) -> BTreeSet<NodeIndex> {
    trace
        .last()
        .and_then(Step::visited)
        .map(|visited| visited.iter().copied().collect())
        .unwrap_or_default()
}

fn mst_weight(trace: &Trace) -> (usize, f64) {
    let mst = trace.last().and_then(Step::mst).unwrap_or_default();
    (mst.len(), mst.iter().map(|edge| edge.weight).sum())
}

fn run_reachability_property(fixture: &TraceFixture) -> TestCaseResult {
    let TraceFixture { matrix, start, end } = fixture;
    let reachable = reachable_from(matrix, *start);
    for trace in [dfs(matrix, *start, *end), bfs(matrix, *start, *end)] {
        let trace = trace.map_err(|err| TestCaseError::fail(err.to_string()))?;
        let visited = visited_set(&trace);
        let last = trace.last().map(Step::message).unwrap_or_default();
        if reachable.contains(end) {
            ensure(visited.contains(end) && visited.is_subset(&reachable), || {
                format!("{:?} visited {visited:?} of {reachable:?}", trace.algorithm())
            })?;
            ensure(last == format!("Reached target node {end}"), || last.to_owned())?;
        } else {
            ensure(visited == reachable, || {
                format!("{:?} visited {visited:?}, reachable {reachable:?}", trace.algorithm())
            })?;
            ensure(last == format!("Could not reach target node {end}"), || last.to_owned())?;
        }
    }
    Ok(())
}

fn run_bfs_growth_property(fixture: &TraceFixture) -> TestCaseResult {
    let trace = bfs(&fixture.matrix, fixture.start, fixture.end)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    for pair in trace.steps().windows(2) {
        let before = pair[0].visited().map_or(0, <[_]>::len);
        let after = pair[1].visited().map_or(0, <[_]>::len);
        let grows = pair[1].message().starts_with("Adding node");
        ensure(after == before + usize::from(grows), || {
            format!("visited went from {before} to {after} at `{}`", pair[1].message())
        })?;
    }
    Ok(())
}

fn run_shortest_path_property(fixture: &TraceFixture) -> TestCaseResult {
    let TraceFixture { matrix, start, end } = fixture;
    let expected = bellman_ford(matrix, *start)[*end];

    let trace = dijkstra(matrix, *start, *end).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let mut previous: Option<&Vec<f64>> = None;
    for step in trace.iter() {
        let Step::Dijkstra { distances, .. } = step else {
            return Err(TestCaseError::fail("foreign step in a dijkstra trace"));
        };
        if let Some(previous) = previous {
            ensure(distances.iter().zip(previous).all(|(now, before)| now <= before), || {
                format!("distance increased: {previous:?} -> {distances:?}")
            })?;
        }
        previous = Some(distances);
    }
    let reported = previous.map_or(NO_EDGE, |distances| distances[*end]);
    ensure(reported == expected, || format!("dijkstra {reported}, oracle {expected}"))?;

    let all_pairs =
        floyd_warshall(matrix, *start, *end).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let Some(Step::FloydWarshall { distances, .. }) = all_pairs.last() else {
        return Err(TestCaseError::fail("floyd-warshall trace without a final table"));
    };
    ensure(distances[*start][*end] == expected, || {
        format!("floyd-warshall {}, oracle {expected}", distances[*start][*end])
    })
}

fn run_spanning_tree_property(fixture: &TraceFixture) -> TestCaseResult {
    let matrix = &fixture.matrix;
    let (forest_size, forest_weight) = brute_force_forest_weight(matrix);

    let kruskal_trace = kruskal(matrix).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let (edges, weight) = mst_weight(&kruskal_trace);
    ensure(edges == forest_size && weight == forest_weight, || {
        format!("kruskal {edges} edges / {weight}, oracle {forest_size} / {forest_weight}")
    })?;

    let component = reachable_from(matrix, fixture.start);
    let prim_trace = prim(matrix, fixture.start).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let (edges, weight) = mst_weight(&prim_trace);
    ensure(edges == component.len() - 1, || {
        format!("prim added {edges} edges to a component of {}", component.len())
    })?;
    let component_matrix = restrict(matrix, &component);
    let (_, component_weight) = brute_force_forest_weight(&component_matrix);
    ensure(weight == component_weight, || {
        format!("prim weight {weight}, oracle {component_weight}")
    })
}

/// Copies the submatrix induced by `nodes`.
fn restrict(matrix: &AdjacencyMatrix, nodes: &BTreeSet<NodeIndex>) -> AdjacencyMatrix {
    let nodes: Vec<NodeIndex> = nodes.iter().copied().collect();
    let rows = nodes
        .iter()
        .map(|&row| nodes.iter().map(|&column| matrix.get(row, column)).collect())
        .collect();
    AdjacencyMatrix::try_from_rows(rows).unwrap_or_else(|_| AdjacencyMatrix::empty(0))
}

fn run_idempotence_property(fixture: &TraceFixture) -> TestCaseResult {
    for algorithm in Algorithm::ALL {
        let first = run_algorithm(algorithm, &fixture.matrix, fixture.start, fixture.end);
        let second = run_algorithm(algorithm, &fixture.matrix, fixture.start, fixture.end);
        ensure(first == second, || format!("{algorithm} produced different traces"))?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn traversals_visit_the_reachable_set(fixture in fixture_strategy(10, true)) {
        run_reachability_property(&fixture)?;
    }

    #[test]
    fn bfs_visited_grows_only_on_enqueue(fixture in fixture_strategy(10, true)) {
        run_bfs_growth_property(&fixture)?;
    }

    #[test]
    fn shortest_paths_match_the_oracle(fixture in fixture_strategy(9, true)) {
        run_shortest_path_property(&fixture)?;
    }

    #[test]
    fn spanning_trees_are_minimum(fixture in fixture_strategy(6, false)) {
        run_spanning_tree_property(&fixture)?;
    }

    #[test]
    fn tracing_is_idempotent(fixture in fixture_strategy(8, true)) {
        run_idempotence_property(&fixture)?;
    }
}

/// Runs the oracle properties on graphs from the generator, covering every
/// class at the offered sizes.
#[rstest::rstest]
fn generated_graphs_satisfy_trace_oracles(
    #[values(
        GraphClass::Undirected,
        GraphClass::Directed,
        GraphClass::Mixed,
        GraphClass::Disconnected,
        GraphClass::Cyclic,
        GraphClass::Acyclic,
        GraphClass::Sparse,
        GraphClass::Tree,
        GraphClass::Complete,
        GraphClass::Bipartite
    )]
    class: GraphClass,
    #[values(2, 5, 6)] node_count: usize,
) {
    let graph = crate::GraphGenerator::seeded(node_count as u64)
        .generate(class, node_count)
        .expect("generation succeeds");
    let fixture = TraceFixture {
        matrix: graph.adjacency_matrix().clone(),
        start: 0,
        end: node_count - 1,
    };
    run_reachability_property(&fixture).expect("reachability must hold");
    run_bfs_growth_property(&fixture).expect("bfs growth must hold");
    run_shortest_path_property(&fixture).expect("shortest paths must agree");
    run_idempotence_property(&fixture).expect("tracing must be idempotent");
    if !graph.is_directed() {
        run_spanning_tree_property(&fixture).expect("spanning trees must be minimum");
    }
}
