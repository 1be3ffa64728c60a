//! Per-class construction rules.
//!
//! Every constructor places a backbone that establishes the class contract
//! first and only then layers random extra edges on top. Extra placements
//! that would create a self-loop or reuse an occupied cell are dropped, not
//! retried, so the final edge count varies between runs.

use std::ops::Range;

use rand::Rng;

use super::draft::{Draft, extra_attempts, random_position, random_weight};
use crate::model::Node;

/// Probability of an extra edge between any free left/right pair.
pub(super) const BIPARTITE_EXTRA_EDGE_PROBABILITY: f64 = 0.3;

const LEFT_BAND: Range<f64> = 0.1..0.4;
const RIGHT_BAND: Range<f64> = 0.6..0.9;

fn pairs(node_count: usize) -> usize {
    node_count * node_count.saturating_sub(1) / 2
}

/// Links every node of `block` after the first to a uniformly random
/// earlier node of the same block.
fn undirected_backbone<R: Rng + ?Sized>(rng: &mut R, draft: &mut Draft, block: Range<usize>) {
    for node in block.start + 1..block.end {
        let target = rng.gen_range(block.start..node);
        let weight = random_weight(rng);
        draft.add_undirected(node, target, weight);
    }
}

fn undirected_extras<R: Rng + ?Sized>(
    rng: &mut R,
    draft: &mut Draft,
    block: Range<usize>,
    attempts: usize,
) {
    for _ in 0..attempts {
        let source = rng.gen_range(block.clone());
        let target = rng.gen_range(block.clone());
        if draft.is_vacant(source, target) {
            let weight = random_weight(rng);
            draft.add_undirected(source, target, weight);
        }
    }
}

pub(super) fn undirected<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> Draft {
    let mut draft = Draft::scattered(rng, node_count, false);
    undirected_backbone(rng, &mut draft, 0..node_count);
    let cap = (3 * node_count).min(pairs(node_count));
    let attempts = extra_attempts(rng, (cap + 1).saturating_sub(node_count));
    undirected_extras(rng, &mut draft, 0..node_count, attempts);
    draft
}

pub(super) fn directed<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> Draft {
    let mut draft = Draft::scattered(rng, node_count, true);
    for node in 1..node_count {
        let earlier = rng.gen_range(0..node);
        let weight = random_weight(rng);
        if rng.gen_bool(0.5) {
            draft.add_directed(node, earlier, weight);
        } else {
            draft.add_directed(earlier, node, weight);
        }
    }

    let cap = (3 * node_count).min(2 * pairs(node_count));
    let attempts = extra_attempts(rng, (cap + 1).saturating_sub(node_count));
    for _ in 0..attempts {
        let source = rng.gen_range(0..node_count);
        let target = rng.gen_range(0..node_count);
        if draft.is_vacant(source, target) {
            let weight = random_weight(rng);
            draft.add_directed(source, target, weight);
        }
    }
    draft
}

pub(super) fn mixed<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> Draft {
    let mut draft = Draft::scattered(rng, node_count, true);
    for node in 1..node_count {
        let earlier = rng.gen_range(0..node);
        let weight = random_weight(rng);
        let directed = rng.gen_bool(0.5);
        draft.add_mixed(node, earlier, weight, directed);
    }

    let cap = (3 * node_count).min(2 * pairs(node_count));
    let attempts = extra_attempts(rng, (cap + 1).saturating_sub(node_count));
    for _ in 0..attempts {
        let source = rng.gen_range(0..node_count);
        let target = rng.gen_range(0..node_count);
        if !draft.is_vacant(source, target) {
            continue;
        }
        let directed = rng.gen_bool(0.5);
        // An undirected edge would overwrite an existing reverse cell.
        if !directed && !draft.is_vacant(target, source) {
            continue;
        }
        let weight = random_weight(rng);
        draft.add_mixed(source, target, weight, directed);
    }
    draft
}

/// Splits `0..node_count` into at most three contiguous blocks; the last
/// block absorbs the remainder.
pub(super) fn blocks(node_count: usize) -> Vec<Range<usize>> {
    let count = (node_count / 3).clamp(1, 3);
    let size = node_count / count;
    (0..count)
        .map(|block| {
            let start = block * size;
            let end = if block + 1 == count {
                node_count
            } else {
                start + size
            };
            start..end
        })
        .collect()
}

pub(super) fn disconnected<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> Draft {
    let mut draft = Draft::scattered(rng, node_count, false);
    for block in blocks(node_count) {
        undirected_backbone(rng, &mut draft, block.clone());
        let size = block.len();
        let cap = (2 * size).min(pairs(size));
        let attempts = extra_attempts(rng, cap);
        undirected_extras(rng, &mut draft, block, attempts);
    }
    draft
}

pub(super) fn cyclic<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> Draft {
    let mut draft = Draft::scattered(rng, node_count, false);
    match node_count {
        0 | 1 => {}
        2 => {
            let weight = random_weight(rng);
            draft.add_undirected(0, 1, weight);
        }
        _ => {
            for node in 0..node_count {
                let weight = random_weight(rng);
                draft.add_undirected(node, (node + 1) % node_count, weight);
            }
        }
    }

    let cap = (2 * node_count).min(pairs(node_count));
    let attempts = extra_attempts(rng, cap.saturating_sub(node_count));
    undirected_extras(rng, &mut draft, 0..node_count, attempts);
    draft
}

pub(super) fn acyclic<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> Draft {
    let mut draft = Draft::scattered(rng, node_count, true);
    for node in 0..node_count.saturating_sub(1) {
        let weight = random_weight(rng);
        draft.add_directed(node, node + 1, weight);
    }
    if node_count < 2 {
        return draft;
    }

    let cap = (2 * node_count).min(pairs(node_count));
    let attempts = extra_attempts(rng, (cap + 1).saturating_sub(node_count));
    for _ in 0..attempts {
        let source = rng.gen_range(0..node_count - 1);
        let target = rng.gen_range(source + 1..node_count);
        if draft.is_vacant(source, target) {
            let weight = random_weight(rng);
            draft.add_directed(source, target, weight);
        }
    }
    draft
}

/// Edge limit of the sparse class: `ceil(N log2 N)`.
pub(super) fn sparse_limit(node_count: usize) -> usize {
    let nodes = node_count as f64;
    (nodes * nodes.log2()).ceil().max(0.0) as usize
}

pub(super) fn complete<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> Draft {
    let mut draft = Draft::scattered(rng, node_count, false);
    for source in 0..node_count {
        for target in source + 1..node_count {
            let weight = random_weight(rng);
            draft.add_undirected(source, target, weight);
        }
    }
    draft
}

pub(super) fn tree<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> Draft {
    let mut draft = Draft::scattered(rng, node_count, false);
    undirected_backbone(rng, &mut draft, 0..node_count);
    draft
}

/// Size of the left group of a bipartite graph.
pub(super) fn left_group_size(node_count: usize) -> usize {
    node_count / 2
}

pub(super) fn bipartite<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> Draft {
    let left = left_group_size(node_count);
    let nodes = (0..node_count)
        .map(|id| {
            let (band, group) = if id < left {
                (LEFT_BAND, 0)
            } else {
                (RIGHT_BAND, 1)
            };
            Node {
                id,
                x: rng.gen_range(band),
                y: random_position(rng),
                group: Some(group),
            }
        })
        .collect();
    let mut draft = Draft::with_nodes(nodes, false);

    for source in 0..left {
        let target = rng.gen_range(left..node_count);
        let weight = random_weight(rng);
        draft.add_undirected(source, target, weight);
    }
    for source in 0..left {
        for target in left..node_count {
            if draft.is_vacant(source, target) && rng.gen_bool(BIPARTITE_EXTRA_EDGE_PROBABILITY) {
                let weight = random_weight(rng);
                draft.add_undirected(source, target, weight);
            }
        }
    }
    draft
}
