//! Graph Generator: builds graphs that satisfy a requested structural class
//! by construction.
//!
//! The twelve class tags map onto ten construction rules; `connected` reuses
//! the undirected rule and `dense` the complete one, while `sparse` truncates
//! an undirected graph. Properties are then attached according to the
//! configured [`PropertyMode`].

mod classes;
mod declared;
mod draft;

#[cfg(test)]
mod property;

use rand::rngs::SmallRng;
use tracing::{debug, instrument, warn};

use crate::{
    analysis::verify_properties,
    builder::{GeneratorBuilder, PropertyMode},
    error::{GraphTraceError, Result},
    model::{Graph, GraphClass},
};

use self::{declared::declared_properties, draft::Draft};

/// Construction rule selected for a class tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Construction {
    Undirected,
    Directed,
    Mixed,
    Disconnected,
    Cyclic,
    Acyclic,
    Sparse,
    Complete,
    Tree,
    Bipartite,
}

impl Construction {
    pub(crate) const fn for_class(class: GraphClass) -> Self {
        match class {
            GraphClass::Undirected | GraphClass::Connected => Self::Undirected,
            GraphClass::Directed => Self::Directed,
            GraphClass::Mixed => Self::Mixed,
            GraphClass::Disconnected => Self::Disconnected,
            GraphClass::Cyclic => Self::Cyclic,
            GraphClass::Acyclic => Self::Acyclic,
            GraphClass::Sparse => Self::Sparse,
            GraphClass::Complete | GraphClass::Dense => Self::Complete,
            GraphClass::Tree => Self::Tree,
            GraphClass::Bipartite => Self::Bipartite,
        }
    }
}

/// Randomised graph generator.
///
/// Owns its random source, so two generators built with the same seed yield
/// the same sequence of graphs.
///
/// # Examples
/// ```
/// use graphtrace_core::{GraphClass, GraphGenerator};
///
/// let mut generator = GraphGenerator::seeded(11);
/// let graph = generator.generate(GraphClass::Complete, 4)?;
/// assert_eq!(graph.edges().len(), 6);
/// assert!(graph.properties().is_complete);
/// # Ok::<(), graphtrace_core::GraphTraceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GraphGenerator {
    rng: SmallRng,
    property_mode: PropertyMode,
}

impl Default for GraphGenerator {
    fn default() -> Self {
        GeneratorBuilder::new().build()
    }
}

impl GraphGenerator {
    pub(crate) fn new(rng: SmallRng, property_mode: PropertyMode) -> Self {
        Self { rng, property_mode }
    }

    /// Creates a generator with a fixed seed and verified properties.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        GeneratorBuilder::new().with_seed(seed).build()
    }

    /// Returns how this generator reports properties.
    #[must_use]
    #[rustfmt::skip]
    pub fn property_mode(&self) -> PropertyMode { self.property_mode }

    /// Generates a graph of `class` with `node_count` nodes.
    ///
    /// # Errors
    /// Returns [`GraphTraceError::EmptyGraph`] when `node_count` is zero.
    #[instrument(
        name = "core.generate",
        err,
        skip(self),
        fields(mode = ?self.property_mode),
    )]
    pub fn generate(&mut self, class: GraphClass, node_count: usize) -> Result<Graph> {
        if node_count == 0 {
            warn!("refusing to generate a graph without nodes");
            return Err(GraphTraceError::EmptyGraph);
        }

        let construction = Construction::for_class(class);
        let rng = &mut self.rng;
        let (draft, declared) = match construction {
            Construction::Sparse => {
                let mut draft = classes::undirected(rng, node_count);
                let mut declared = declared_properties(construction, class, &draft);
                declared.is_dense = false;
                draft.truncate_edges(classes::sparse_limit(node_count));
                (draft, declared)
            }
            _ => {
                let draft = build(construction, rng, node_count);
                let declared = declared_properties(construction, class, &draft);
                (draft, declared)
            }
        };

        let properties = match self.property_mode {
            PropertyMode::Declared => declared,
            PropertyMode::Verified => {
                let mut verified =
                    verify_properties(class, node_count, &draft.edges, &draft.matrix);
                if construction == Construction::Sparse {
                    verified.is_dense = false;
                }
                verified
            }
        };

        debug!(
            edges = draft.edges.len(),
            connected = properties.is_connected,
            cyclic = properties.is_cyclic,
            "graph generated"
        );

        let Draft {
            nodes,
            edges,
            matrix,
            is_directed,
        } = draft;
        Ok(Graph::new(nodes, edges, matrix, is_directed, properties))
    }
}

fn build(construction: Construction, rng: &mut SmallRng, node_count: usize) -> Draft {
    match construction {
        Construction::Undirected | Construction::Sparse => classes::undirected(rng, node_count),
        Construction::Directed => classes::directed(rng, node_count),
        Construction::Mixed => classes::mixed(rng, node_count),
        Construction::Disconnected => classes::disconnected(rng, node_count),
        Construction::Cyclic => classes::cyclic(rng, node_count),
        Construction::Acyclic => classes::acyclic(rng, node_count),
        Construction::Complete => classes::complete(rng, node_count),
        Construction::Tree => classes::tree(rng, node_count),
        Construction::Bipartite => classes::bipartite(rng, node_count),
    }
}

/// Generates a graph with an entropy-seeded generator.
///
/// # Errors
/// Returns [`GraphTraceError::EmptyGraph`] when `node_count` is zero.
///
/// # Examples
/// ```
/// use graphtrace_core::{GraphClass, generate_graph};
///
/// let graph = generate_graph(GraphClass::Tree, 8)?;
/// assert!(graph.properties().is_tree);
/// # Ok::<(), graphtrace_core::GraphTraceError>(())
/// ```
pub fn generate_graph(class: GraphClass, node_count: usize) -> Result<Graph> {
    GraphGenerator::default().generate(class, node_count)
}
