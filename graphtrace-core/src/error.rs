//! Error types for the graphtrace core library.
//!
//! Every variant describes an invalid argument supplied by the caller.
//! Unreachable targets and disconnected spanning trees are not errors; the
//! tracer reports them as the final step of a trace.

use std::fmt;

use thiserror::Error;

use crate::model::NodeIndex;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Which endpoint of a traversal a node index was supplied for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EndpointRole {
    /// The node the algorithm starts from.
    Start,
    /// The node the algorithm tries to reach.
    End,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Error type produced by graph generation and algorithm tracing.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphTraceError {
    /// A graph must contain at least one node.
    #[error("graph must contain at least one node")]
    EmptyGraph,
    /// A start or end node lies outside `[0, node_count)`.
    #[error("{role} node {node} is out of range for a graph of {node_count} nodes")]
    NodeOutOfRange {
        /// Endpoint the index was supplied for.
        role: EndpointRole,
        /// The offending node index.
        node: NodeIndex,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An adjacency matrix row did not have one entry per node.
    #[error("adjacency matrix row {row} has {len} entries but {expected} were expected")]
    NonSquareMatrix {
        /// Index of the ragged row.
        row: usize,
        /// Number of entries found in the row.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },
    /// A matrix cell was negative or NaN.
    #[error("adjacency matrix cell ({row}, {column}) holds {value}, expected a weight, 0, or infinity")]
    InvalidCell {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// The rejected value.
        value: f64,
    },
    /// A graph class tag did not name one of the twelve structural classes.
    #[error("unknown graph class `{provided}`")]
    UnknownGraphClass {
        /// The tag supplied by the caller.
        provided: String,
    },
    /// An algorithm tag did not name one of the six traced algorithms.
    #[error("unknown algorithm `{provided}`")]
    UnknownAlgorithm {
        /// The tag supplied by the caller.
        provided: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphTraceError`] variants.
    enum GraphTraceErrorCode for GraphTraceError {
        /// A graph must contain at least one node.
        EmptyGraph => EmptyGraph => "GRAPHTRACE_EMPTY_GRAPH",
        /// A start or end node lies outside the graph.
        NodeOutOfRange => NodeOutOfRange { .. } => "GRAPHTRACE_NODE_OUT_OF_RANGE",
        /// An adjacency matrix row did not have one entry per node.
        NonSquareMatrix => NonSquareMatrix { .. } => "GRAPHTRACE_NON_SQUARE_MATRIX",
        /// A matrix cell was negative or NaN.
        InvalidCell => InvalidCell { .. } => "GRAPHTRACE_INVALID_CELL",
        /// A graph class tag was not recognised.
        UnknownGraphClass => UnknownGraphClass { .. } => "GRAPHTRACE_UNKNOWN_GRAPH_CLASS",
        /// An algorithm tag was not recognised.
        UnknownAlgorithm => UnknownAlgorithm { .. } => "GRAPHTRACE_UNKNOWN_ALGORITHM",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphTraceError>;
