//! Uniform sampling of the taxonomy population.
//!
//! One sample is drawn per run and shared by every metric, so graphs built
//! for different metrics are node-for-node comparable. Sampling is seeded
//! (`ChaCha8Rng`) to make whole runs reproducible.

use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{CoreError, CoreResult};
use crate::types::Concept;

/// An ordered, duplicate-free sample of taxonomy concepts.
///
/// Each concept's position in the sample is its node index (`0..N-1`) in
/// every graph built during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    concepts: Vec<Concept>,
}

impl Sample {
    /// Build a sample from an explicit concept sequence; positions become
    /// node indices.
    ///
    /// Rejects empty sequences and duplicate concepts. Useful for fixed
    /// fixtures and for replaying a previously written node file.
    pub fn from_concepts(concepts: Vec<Concept>) -> CoreResult<Self> {
        if concepts.is_empty() {
            return Err(CoreError::InvalidSampleSize {
                requested: 0,
                population: 0,
            });
        }
        let mut seen = std::collections::HashSet::new();
        for concept in &concepts {
            if !seen.insert(concept) {
                return Err(CoreError::Config(format!(
                    "duplicate concept '{}' in sample",
                    concept
                )));
            }
        }
        Ok(Self { concepts })
    }

    /// Number of sampled concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Whether the sample is empty (never true for a valid sample).
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Concept at a sample index.
    pub fn get(&self, index: usize) -> Option<&Concept> {
        self.concepts.get(index)
    }

    /// Iterate `(index, concept)` pairs in sample order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Concept)> {
        self.concepts.iter().enumerate()
    }

    /// The sampled concepts in index order.
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }
}

/// Draw `n` distinct concepts from `population`, uniformly without
/// replacement.
///
/// The draw is deterministic for a fixed population, `n` and `seed`. The
/// returned order is the draw order, not taxonomic order.
///
/// # Errors
///
/// [`CoreError::InvalidSampleSize`] when `n == 0` or `n` exceeds the
/// population size.
pub fn sample_concepts(population: &[Concept], n: usize, seed: u64) -> CoreResult<Sample> {
    if n == 0 || n > population.len() {
        return Err(CoreError::InvalidSampleSize {
            requested: n,
            population: population.len(),
        });
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let concepts = index::sample(&mut rng, population.len(), n)
        .into_iter()
        .map(|i| population[i].clone())
        .collect();
    Ok(Sample { concepts })
}
