//! Weighted undirected similarity graph over sample indices.

use crate::types::{Concept, SimilarityScore};

/// One weighted edge between two sample indices.
///
/// By construction `i > j` (lower-triangular enumeration) and edges keep
/// their insertion order, which fixes the serialized output order.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Higher sample index of the pair.
    pub i: usize,
    /// Lower sample index of the pair.
    pub j: usize,
    /// Similarity score of the pair; may be undefined.
    pub weight: SimilarityScore,
}

/// An undirected weighted graph whose nodes are sample indices.
///
/// Node `k` is tagged with the `k`-th sampled concept. Self-loops are
/// rejected; the assembler guarantees each unordered pair is inserted
/// exactly once.
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    nodes: Vec<Concept>,
    edges: Vec<Edge>,
}

impl SimilarityGraph {
    /// Create an empty graph with capacity for `n` nodes.
    pub fn with_node_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
            edges: Vec::new(),
        }
    }

    /// Append a node; its index is its insertion position.
    pub fn add_node(&mut self, concept: Concept) -> usize {
        self.nodes.push(concept);
        self.nodes.len() - 1
    }

    /// Insert an edge between two distinct existing nodes.
    ///
    /// The pair is stored as `(max, min)` so the on-disk orientation is
    /// uniform. Panics in debug builds on self-loops or unknown indices;
    /// the assembler never produces either.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: SimilarityScore) {
        debug_assert_ne!(a, b, "self-loops are excluded");
        debug_assert!(a < self.nodes.len() && b < self.nodes.len());
        let (i, j) = if a > b { (a, b) } else { (b, a) };
        self.edges.push(Edge { i, j, weight });
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Concept tag of a node.
    pub fn concept(&self, index: usize) -> Option<&Concept> {
        self.nodes.get(index)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Lazily enumerate the lower triangle of an `n x n` index square.
///
/// Yields `(i, j)` with `j < i`, row by row: `(1,0), (2,0), (2,1), ...`.
/// This is the pair order the assembler scores in, and the order edges
/// appear on disk. Kept lazy so a future implementation can shard the
/// sequence without touching scoring or assembly.
pub fn lower_triangle_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..n).flat_map(|i| (0..i).map(move |j| (i, j)))
}
