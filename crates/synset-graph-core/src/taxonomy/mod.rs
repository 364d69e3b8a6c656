//! Taxonomy abstraction over the lexical corpus.
//!
//! The similarity metrics never talk to a corpus directly; they go through
//! the [`Taxonomy`] trait, an injected read-only capability. This keeps the
//! scoring pipeline free of hidden global state and lets tests substitute
//! small hand-built hierarchies for the real corpus.

mod dag;

pub use dag::InMemoryTaxonomy;

use crate::error::CoreResult;
use crate::types::Concept;

/// A common subsumer of two concepts, with the distances needed by the
/// structural metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsumer {
    /// The subsuming concept.
    pub concept: Concept,
    /// Longest hypernym-path length from the subsumer to a root.
    pub depth: usize,
    /// Shortest hypernym distance from the left concept to the subsumer.
    pub dist_left: usize,
    /// Shortest hypernym distance from the right concept to the subsumer.
    pub dist_right: usize,
}

/// Read-only structural view of a lexical taxonomy.
///
/// Implementations must be deterministic: the same pair of concepts always
/// yields the same answer, and every operation is symmetric in its two
/// concept arguments where the definition is symmetric.
pub trait Taxonomy {
    /// Ordered enumeration of every concept in the taxonomy.
    ///
    /// The order is stable for the lifetime of the value; sampling indexes
    /// into it.
    fn concepts(&self) -> &[Concept];

    /// Longest hypernym-path length found anywhere in the taxonomy.
    fn max_depth(&self) -> usize;

    /// Shortest path between two concepts through any common subsumer.
    ///
    /// `Ok(None)` when the concepts share no subsumer (disjoint
    /// hierarchies); `Ok(Some(0))` when the concepts are identical.
    fn path_distance(&self, a: &Concept, b: &Concept) -> CoreResult<Option<usize>>;

    /// The deepest common subsumer of two concepts, or `None` when they
    /// share no subsumer. Depth ties break toward the lexicographically
    /// smallest concept so the choice is reproducible.
    fn deepest_common_subsumer(&self, a: &Concept, b: &Concept) -> CoreResult<Option<Subsumer>>;

    /// All common subsumers of two concepts, in a deterministic order.
    fn common_subsumers(&self, a: &Concept, b: &Concept) -> CoreResult<Vec<Concept>>;
}
