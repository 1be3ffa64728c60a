//! Floyd-Warshall all-pairs shortest paths over a full distance table,
//! iterating `k`, then `i`, then `j`.

use crate::{
    error::{EndpointRole, Result},
    matrix::{AdjacencyMatrix, NO_EDGE, is_traversable},
    model::NodeIndex,
};

use super::{Algorithm, Distance, Step, Trace, ensure_endpoint, ensure_nodes};

/// Seeds the distance table: `0` on the diagonal, the edge weight where one
/// is traversable, `∞` elsewhere.
fn initial_distances(matrix: &AdjacencyMatrix) -> Vec<Vec<f64>> {
    let node_count = matrix.node_count();
    (0..node_count)
        .map(|row| {
            (0..node_count)
                .map(|column| {
                    if row == column {
                        0.0
                    } else {
                        matrix.weight(row, column).unwrap_or(NO_EDGE)
                    }
                })
                .collect()
        })
        .collect()
}

/// Traces all-pairs shortest paths; the final step reports the distance
/// from `start` to `end`, which may be `∞`.
///
/// # Errors
/// Returns [`crate::GraphTraceError::EmptyGraph`] for an empty matrix and
/// [`crate::GraphTraceError::NodeOutOfRange`] for an endpoint outside the
/// matrix.
pub fn floyd_warshall(matrix: &AdjacencyMatrix, start: NodeIndex, end: NodeIndex) -> Result<Trace> {
    let node_count = ensure_nodes(matrix)?;
    ensure_endpoint(EndpointRole::Start, start, node_count)?;
    ensure_endpoint(EndpointRole::End, end, node_count)?;

    let mut distances = initial_distances(matrix);
    let mut steps = Vec::new();
    let mut emit = |distances: &Vec<Vec<f64>>, i, j, k, message: String| {
        steps.push(Step::FloydWarshall {
            distances: distances.clone(),
            i,
            j,
            k,
            message,
        });
    };

    emit(
        &distances,
        None,
        None,
        None,
        "Starting Floyd-Warshall algorithm".to_owned(),
    );

    for k in 0..node_count {
        emit(
            &distances,
            None,
            None,
            Some(k),
            format!("Using node {k} as intermediate node"),
        );
        for i in 0..node_count {
            for j in 0..node_count {
                let via_k = distances[i][k];
                let from_k = distances[k][j];
                if via_k == NO_EDGE || from_k == NO_EDGE {
                    continue;
                }
                let candidate = via_k + from_k;
                let old = distances[i][j];
                if candidate < old {
                    distances[i][j] = candidate;
                    emit(
                        &distances,
                        Some(i),
                        Some(j),
                        Some(k),
                        format!(
                            "Updated distance from {i} to {j} via {k}: {} → {}",
                            Distance(old),
                            Distance(candidate)
                        ),
                    );
                }
            }
        }
    }

    emit(
        &distances,
        None,
        None,
        None,
        format!(
            "Completed Floyd-Warshall algorithm. Shortest distance from {start} to {end} is {}",
            Distance(distances[start][end])
        ),
    );

    Ok(Trace::new(Algorithm::FloydWarshall, steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_off_diagonal_cells_are_not_edges() {
        let matrix = AdjacencyMatrix::try_from_rows(vec![vec![0.0, 0.0], vec![0.0, 0.0]])
            .expect("square input");
        let distances = initial_distances(&matrix);
        assert_eq!(distances, vec![vec![0.0, NO_EDGE], vec![NO_EDGE, 0.0]]);
    }
}
