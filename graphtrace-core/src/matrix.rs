//! Weighted adjacency matrix.
//!
//! The matrix is the numeric view the tracer works on. Two sentinels share
//! the "no traversable edge" meaning: [`NO_EDGE`] (`+∞`) marks a missing edge
//! and `0` marks the diagonal. Algorithms must test for both, which is what
//! [`is_traversable`] does.

use crate::{
    error::{GraphTraceError, Result},
    model::{Edge, NodeIndex},
};

/// Sentinel stored where no edge exists.
pub const NO_EDGE: f64 = f64::INFINITY;

/// Returns `true` when `value` denotes an edge an algorithm may follow.
#[must_use]
pub fn is_traversable(value: f64) -> bool {
    value != 0.0 && value != NO_EDGE
}

/// Square N×N matrix of edge weights.
///
/// # Examples
/// ```
/// use graphtrace_core::{AdjacencyMatrix, NO_EDGE};
///
/// let matrix = AdjacencyMatrix::try_from_rows(vec![
///     vec![0.0, 4.0],
///     vec![NO_EDGE, 0.0],
/// ])?;
/// assert_eq!(matrix.weight(0, 1), Some(4.0));
/// assert_eq!(matrix.weight(1, 0), None);
/// assert!(!matrix.is_symmetric());
/// # Ok::<(), graphtrace_core::GraphTraceError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "serde_repr::MatrixRows", try_from = "serde_repr::MatrixRows")
)]
pub struct AdjacencyMatrix {
    node_count: usize,
    cells: Vec<f64>,
}

impl AdjacencyMatrix {
    /// Creates a matrix for `node_count` nodes with no edges: `0` on the
    /// diagonal and [`NO_EDGE`] everywhere else.
    #[must_use]
    pub fn empty(node_count: usize) -> Self {
        let mut cells = vec![NO_EDGE; node_count * node_count];
        for node in 0..node_count {
            cells[node * node_count + node] = 0.0;
        }
        Self { node_count, cells }
    }

    /// Builds a matrix from the declared edges of a graph. Undirected edges
    /// fill both cells, directed edges only `[source][target]`.
    ///
    /// # Panics
    /// Panics if an edge endpoint is not below `node_count`.
    #[must_use]
    pub fn from_edges(node_count: usize, edges: &[Edge]) -> Self {
        let mut matrix = Self::empty(node_count);
        for edge in edges {
            if edge.is_directed() {
                matrix.connect_directed(edge.source, edge.target, edge.weight);
            } else {
                matrix.connect_undirected(edge.source, edge.target, edge.weight);
            }
        }
        matrix
    }

    /// Validates and adopts row-major input.
    ///
    /// # Errors
    /// Returns [`GraphTraceError::NonSquareMatrix`] when a row length differs
    /// from the number of rows, and [`GraphTraceError::InvalidCell`] when a
    /// cell is negative or NaN.
    pub fn try_from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let node_count = rows.len();
        let mut cells = Vec::with_capacity(node_count * node_count);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != node_count {
                return Err(GraphTraceError::NonSquareMatrix {
                    row,
                    len: values.len(),
                    expected: node_count,
                });
            }
            for (column, value) in values.into_iter().enumerate() {
                if value.is_nan() || value < 0.0 {
                    return Err(GraphTraceError::InvalidCell { row, column, value });
                }
                cells.push(value);
            }
        }
        Ok(Self { node_count, cells })
    }

    /// Returns the number of nodes (rows).
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns `true` when the matrix has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Returns the raw cell value, sentinels included.
    ///
    /// # Panics
    /// Panics if `row` or `column` is not below [`Self::node_count`].
    #[must_use]
    pub fn get(&self, row: NodeIndex, column: NodeIndex) -> f64 {
        assert!(
            row < self.node_count && column < self.node_count,
            "cell ({row}, {column}) outside a {n}x{n} matrix",
            n = self.node_count,
        );
        self.cells[row * self.node_count + column]
    }

    /// Returns the weight of the edge `row → column`, or `None` when the
    /// cell holds either sentinel.
    ///
    /// # Panics
    /// Panics if `row` or `column` is not below [`Self::node_count`].
    #[must_use]
    pub fn weight(&self, row: NodeIndex, column: NodeIndex) -> Option<f64> {
        let value = self.get(row, column);
        is_traversable(value).then_some(value)
    }

    /// Returns one row of the matrix.
    ///
    /// # Panics
    /// Panics if `row` is not below [`Self::node_count`].
    #[must_use]
    pub fn row(&self, row: NodeIndex) -> &[f64] {
        let start = row * self.node_count;
        &self.cells[start..start + self.node_count]
    }

    /// Copies the matrix into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.node_count == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.node_count)
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Returns `true` when `[i][j] == [j][i]` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.node_count).all(|row| {
            (row + 1..self.node_count).all(|column| self.get(row, column) == self.get(column, row))
        })
    }

    pub(crate) fn is_vacant(&self, row: NodeIndex, column: NodeIndex) -> bool {
        self.get(row, column) == NO_EDGE
    }

    pub(crate) fn connect_directed(&mut self, source: NodeIndex, target: NodeIndex, weight: u32) {
        let index = source * self.node_count + target;
        self.cells[index] = f64::from(weight);
    }

    pub(crate) fn connect_undirected(&mut self, source: NodeIndex, target: NodeIndex, weight: u32) {
        self.connect_directed(source, target, weight);
        self.connect_directed(target, source, weight);
    }
}

#[cfg(feature = "serde")]
mod serde_repr {
    //! JSON cannot carry infinities, so missing edges travel as `null`.

    use super::{AdjacencyMatrix, NO_EDGE};
    use crate::error::GraphTraceError;

    #[derive(serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub(super) struct MatrixRows(Vec<Vec<Option<f64>>>);

    impl From<AdjacencyMatrix> for MatrixRows {
        fn from(matrix: AdjacencyMatrix) -> Self {
            Self(
                matrix
                    .to_rows()
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|value| (value != NO_EDGE).then_some(value))
                            .collect()
                    })
                    .collect(),
            )
        }
    }

    impl TryFrom<MatrixRows> for AdjacencyMatrix {
        type Error = GraphTraceError;

        fn try_from(rows: MatrixRows) -> Result<Self, Self::Error> {
            Self::try_from_rows(
                rows.0
                    .into_iter()
                    .map(|row| row.into_iter().map(|cell| cell.unwrap_or(NO_EDGE)).collect())
                    .collect(),
            )
        }
    }
}
