//! Properties implied by each construction rule, used in
//! [`PropertyMode::Declared`](crate::PropertyMode::Declared).
//!
//! Only cyclicity of the random classes is measured here; everything else
//! comes from what the constructor intended to build.

use super::{Construction, classes::left_group_size, draft::Draft};
use crate::{
    analysis::{has_directed_cycle, has_undirected_cycle, is_dense},
    model::{GraphClass, Properties},
};

pub(super) fn declared_properties(
    construction: Construction,
    class: GraphClass,
    draft: &Draft,
) -> Properties {
    let n = draft.node_count();
    let edge_count = draft.edges.len();
    let pairs = n * n.saturating_sub(1) / 2;
    let by_density = is_dense(n, edge_count, false);

    let properties = |is_connected, is_cyclic, is_dense, is_tree, is_complete, is_bipartite| {
        Properties {
            class,
            is_connected,
            is_cyclic,
            is_dense,
            is_tree,
            is_complete,
            is_bipartite,
        }
    };

    match construction {
        Construction::Undirected | Construction::Sparse => {
            let cyclic = has_undirected_cycle(n, &draft.edges);
            properties(
                true,
                cyclic,
                by_density,
                edge_count + 1 == n && !cyclic,
                edge_count == pairs,
                false,
            )
        }
        Construction::Directed => properties(
            true,
            has_directed_cycle(&draft.matrix),
            by_density,
            false,
            edge_count == 2 * pairs,
            false,
        ),
        Construction::Mixed => properties(
            true,
            has_undirected_cycle(n, &draft.edges) || has_directed_cycle(&draft.matrix),
            by_density,
            false,
            false,
            false,
        ),
        Construction::Disconnected => properties(
            false,
            has_undirected_cycle(n, &draft.edges),
            false,
            false,
            false,
            false,
        ),
        Construction::Cyclic => properties(
            true,
            true,
            by_density,
            false,
            edge_count == pairs,
            n % 2 == 0,
        ),
        Construction::Acyclic => properties(
            true,
            false,
            by_density,
            edge_count + 1 == n,
            false,
            false,
        ),
        Construction::Complete => properties(true, n > 2, true, n <= 2, true, n <= 2),
        Construction::Tree => properties(true, false, false, true, n <= 2, true),
        Construction::Bipartite => {
            let left = left_group_size(n);
            properties(
                true,
                edge_count + 1 > n,
                by_density,
                edge_count + 1 == n,
                edge_count == left * (n - left),
                true,
            )
        }
    }
}
