//! Core domain types shared across the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque concept identifier drawn from the lexical taxonomy.
///
/// For WordNet-style corpora this is a synset key such as `dog.n.01`.
/// The identifier is immutable and compared byte-wise; the crate never
/// inspects its internal structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Concept(String);

impl Concept {
    /// Create a concept from its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Concept {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Concept {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A pairwise similarity score.
///
/// Metrics that cannot relate two concepts (no connecting path, no common
/// subsumer) yield [`SimilarityScore::Undefined`]. The sentinel is carried
/// through graph assembly and serialization verbatim; it is never coerced
/// to a numeric default and never treated as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimilarityScore {
    /// A defined similarity value.
    Value(f64),
    /// The metric is undefined for this pair.
    Undefined,
}

impl SimilarityScore {
    /// The numeric value, if defined.
    pub fn value(self) -> Option<f64> {
        match self {
            SimilarityScore::Value(v) => Some(v),
            SimilarityScore::Undefined => None,
        }
    }

    /// Whether the score is defined.
    pub fn is_defined(self) -> bool {
        matches!(self, SimilarityScore::Value(_))
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `None` is the reserved on-disk literal for an undefined weight.
            SimilarityScore::Undefined => f.write_str("None"),
            // Debug formatting keeps the decimal point on integral values
            // (`1.0`, not `1`), matching the weight column format.
            SimilarityScore::Value(v) => write!(f, "{:?}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concept_display_is_raw_identifier() {
        let c = Concept::new("dog.n.01");
        assert_eq!(c.to_string(), "dog.n.01");
        assert_eq!(c.as_str(), "dog.n.01");
    }

    #[test]
    fn undefined_score_displays_reserved_literal() {
        assert_eq!(SimilarityScore::Undefined.to_string(), "None");
    }

    #[test]
    fn value_score_keeps_decimal_point() {
        assert_eq!(SimilarityScore::Value(0.5).to_string(), "0.5");
        assert_eq!(SimilarityScore::Value(1.0).to_string(), "1.0");
        assert_eq!(SimilarityScore::Value(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn score_value_accessor() {
        assert_eq!(SimilarityScore::Value(0.25).value(), Some(0.25));
        assert_eq!(SimilarityScore::Undefined.value(), None);
        assert!(!SimilarityScore::Undefined.is_defined());
    }
}
