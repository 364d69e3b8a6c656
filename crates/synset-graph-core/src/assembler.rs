//! Incremental graph assembly over the sampled concepts.
//!
//! For one metric, every node is inserted up front, then the lower
//! triangle of the index square is scored pair by pair: each index is
//! compared against all indices before it, so every unordered pair gets
//! exactly one edge and `N*(N-1)/2` scorer evaluations happen in total.
//!
//! Scoring goes through the [`PairScorer`] seam. The production scorer
//! binds a metric to the taxonomy (and IC table); tests inject fixed
//! tables through the same seam.

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::graph::{lower_triangle_pairs, SimilarityGraph};
use crate::metrics::MetricKind;
use crate::progress::ProgressEstimator;
use crate::sampler::Sample;
use crate::statistics::InformationContent;
use crate::taxonomy::Taxonomy;
use crate::types::{Concept, SimilarityScore};

/// A side-effect-free pairwise scoring capability.
///
/// Implementations must be deterministic and symmetric; the assembler
/// calls each unordered pair exactly once and relies on both properties.
pub trait PairScorer {
    /// Short label used in progress output and error context.
    fn name(&self) -> &str;

    /// Score one pair of concepts.
    fn score_pair(&self, a: &Concept, b: &Concept) -> CoreResult<SimilarityScore>;
}

/// [`PairScorer`] binding a [`MetricKind`] to a taxonomy and, for the
/// corpus-based metrics, an information-content table.
#[derive(Debug)]
pub struct MetricScorer<'a, T: Taxonomy + ?Sized> {
    metric: MetricKind,
    taxonomy: &'a T,
    ic: Option<&'a InformationContent>,
}

impl<'a, T: Taxonomy + ?Sized> MetricScorer<'a, T> {
    /// Bind a metric to its inputs.
    ///
    /// Fails with [`CoreError::MissingStatistics`] immediately (before any
    /// scoring) when the metric needs IC and none is supplied.
    pub fn new(
        metric: MetricKind,
        taxonomy: &'a T,
        ic: Option<&'a InformationContent>,
    ) -> CoreResult<Self> {
        if metric.requires_ic() && ic.is_none() {
            return Err(CoreError::MissingStatistics { metric });
        }
        Ok(Self {
            metric,
            taxonomy,
            ic,
        })
    }
}

impl<T: Taxonomy + ?Sized> PairScorer for MetricScorer<'_, T> {
    fn name(&self) -> &str {
        self.metric.short_name()
    }

    fn score_pair(&self, a: &Concept, b: &Concept) -> CoreResult<SimilarityScore> {
        self.metric.score(self.taxonomy, self.ic, a, b)
    }
}

/// Build the similarity graph for one scorer over the whole sample.
///
/// The node set always equals the full sample; edges follow the
/// lower-triangular scan order. The first scorer failure aborts the build
/// with a [`CoreError::PairScoring`] naming the pair; no partial graph is
/// returned.
pub fn assemble(
    sample: &Sample,
    scorer: &dyn PairScorer,
    estimator: &mut ProgressEstimator,
) -> CoreResult<SimilarityGraph> {
    let n = sample.len();
    let mut graph = SimilarityGraph::with_node_capacity(n);

    debug!(scorer = scorer.name(), nodes = n, "adding nodes");
    for (_, concept) in sample.iter() {
        graph.add_node(concept.clone());
    }

    debug!(
        scorer = scorer.name(),
        pairs = n * n.saturating_sub(1) / 2,
        "adding edges"
    );
    let mut current_row = 0usize;
    for (i, j) in lower_triangle_pairs(n) {
        if i != current_row {
            // Entering row i means i outer iterations are complete.
            estimator.tick(i);
            current_row = i;
        }
        // Sample indices come straight from the triangle scan, so the
        // lookups cannot fail.
        let left = &sample.concepts()[i];
        let right = &sample.concepts()[j];
        let weight = scorer
            .score_pair(left, right)
            .map_err(|source| CoreError::PairScoring {
                metric: scorer.name().to_string(),
                left: left.clone(),
                right: right.clone(),
                source: Box::new(source),
            })?;
        graph.add_edge(i, j, weight);
    }
    Ok(graph)
}
