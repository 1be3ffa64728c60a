//! Shared test utilities for `graphtrace-core`.

use graphtrace_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::{Config as ProptestConfig, TestCaseError, TestCaseResult};

use crate::{AdjacencyMatrix, Edge};

/// Builds a proptest configuration from the shared run profile so every
/// suite honours `PROPTEST_CASES` and `GRAPHTRACE_PBT_FORK` alike.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Fails the current proptest case with `message` unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) -> TestCaseResult {
    if condition {
        Ok(())
    } else {
        Err(TestCaseError::fail(message()))
    }
}

/// Builds an undirected matrix from `(source, target, weight)` triples.
#[must_use]
pub(crate) fn undirected_matrix(node_count: usize, edges: &[(usize, usize, u32)]) -> AdjacencyMatrix {
    let edges: Vec<Edge> = edges
        .iter()
        .map(|&(source, target, weight)| Edge::undirected(source, target, weight))
        .collect();
    AdjacencyMatrix::from_edges(node_count, &edges)
}

/// Builds a directed matrix from `(source, target, weight)` triples.
#[must_use]
pub(crate) fn directed_matrix(node_count: usize, edges: &[(usize, usize, u32)]) -> AdjacencyMatrix {
    let edges: Vec<Edge> = edges
        .iter()
        .map(|&(source, target, weight)| Edge::with_direction(source, target, weight, true))
        .collect();
    AdjacencyMatrix::from_edges(node_count, &edges)
}
