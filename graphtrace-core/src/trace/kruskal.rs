//! Kruskal's algorithm over the upper triangle of the matrix.
//!
//! Candidates are stably sorted by weight, so equal weights keep row-major
//! order. Component membership is tracked with [`DisjointSet`].

use crate::{error::Result, matrix::AdjacencyMatrix, union_find::DisjointSet};

use super::{Algorithm, Distance, SpanningEdge, Step, Trace, ensure_nodes, warn_if_asymmetric};

/// Collects every traversable `i < j` cell as a candidate edge, lightest
/// first.
fn candidate_edges(matrix: &AdjacencyMatrix) -> Vec<SpanningEdge> {
    let node_count = matrix.node_count();
    let mut edges: Vec<SpanningEdge> = (0..node_count)
        .flat_map(|source| {
            (source + 1..node_count).filter_map(move |target| {
                matrix
                    .weight(source, target)
                    .map(|weight| SpanningEdge::new(source, target, weight))
            })
        })
        .collect();
    edges.sort_by(|left, right| left.weight.total_cmp(&right.weight));
    edges
}

/// Traces Kruskal's minimum spanning tree (or forest) of `matrix`.
///
/// Only the upper triangle is read; an asymmetric matrix is logged as a
/// warning and traced anyway.
///
/// # Errors
/// Returns [`crate::GraphTraceError::EmptyGraph`] for an empty matrix.
///
/// # Examples
/// ```
/// use graphtrace_core::{AdjacencyMatrix, kruskal};
///
/// let matrix = AdjacencyMatrix::try_from_rows(vec![
///     vec![0.0, 1.0, 3.0],
///     vec![1.0, 0.0, 1.0],
///     vec![3.0, 1.0, 0.0],
/// ])?;
/// let trace = kruskal(&matrix)?;
/// let mst = trace.last().and_then(|step| step.mst()).unwrap_or_default();
/// assert_eq!(mst.iter().map(|edge| edge.weight).sum::<f64>(), 2.0);
/// # Ok::<(), graphtrace_core::GraphTraceError>(())
/// ```
pub fn kruskal(matrix: &AdjacencyMatrix) -> Result<Trace> {
    let node_count = ensure_nodes(matrix)?;
    warn_if_asymmetric(Algorithm::Kruskal, matrix);

    let edges = candidate_edges(matrix);
    let target_size = node_count - 1;
    let mut mst: Vec<SpanningEdge> = Vec::with_capacity(target_size);
    let mut steps = Vec::new();
    let mut emit = |mst: &[SpanningEdge], current: Option<SpanningEdge>, message: String| {
        steps.push(Step::Kruskal {
            edges: edges.clone(),
            mst: mst.to_vec(),
            current,
            message,
        });
    };

    emit(
        &mst,
        None,
        format!("Starting Kruskal's algorithm with {} edges", edges.len()),
    );

    let mut components = DisjointSet::new(node_count);
    let mut completed = target_size == 0;
    for &edge in &edges {
        if completed {
            break;
        }
        let SpanningEdge {
            source,
            target,
            weight,
        } = edge;
        emit(
            &mst,
            Some(edge),
            format!(
                "Considering edge {source} → {target} with weight {}",
                Distance(weight)
            ),
        );

        if components.connected(source, target) {
            emit(
                &mst,
                Some(edge),
                format!("Skipped edge {source} → {target} to avoid cycle"),
            );
            continue;
        }
        components.union(source, target);
        mst.push(edge);
        emit(
            &mst,
            Some(edge),
            format!(
                "Added edge {source} → {target} with weight {} to MST",
                Distance(weight)
            ),
        );
        completed = mst.len() == target_size;
    }

    if completed {
        emit(
            &mst,
            None,
            format!("Completed Kruskal's algorithm. MST has {} edges.", mst.len()),
        );
    } else {
        emit(
            &mst,
            None,
            "Could not find a complete MST. Graph is disconnected.".to_owned(),
        );
    }

    Ok(Trace::new(Algorithm::Kruskal, steps))
}
