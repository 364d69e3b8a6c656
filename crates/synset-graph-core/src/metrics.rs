//! The closed set of synset similarity metrics.
//!
//! Three structural metrics (`path`, `lch`, `wup`) read only the hypernym
//! hierarchy; three corpus-based metrics (`res`, `jcn`, `lin`) additionally
//! weigh concepts by information content. All six are pure, deterministic
//! and symmetric. A pair the metric cannot relate yields
//! [`SimilarityScore::Undefined`], never an error and never a numeric
//! stand-in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::statistics::InformationContent;
use crate::taxonomy::Taxonomy;
use crate::types::{Concept, SimilarityScore};

/// Identifier of a similarity metric.
///
/// The set is closed: metric names are validated when configuration is
/// parsed, so an unsupported name fails before any scoring starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Shortest-path similarity: `1 / (d + 1)`.
    Path,
    /// Leacock-Chodorow: `-ln((d + 1) / (2 * D))`.
    Lch,
    /// Wu-Palmer: depth-weighted overlap at the deepest common subsumer.
    Wup,
    /// Resnik: IC of the most informative common subsumer.
    Res,
    /// Jiang-Conrath: `1 / (IC(a) + IC(b) - 2 * IC(lcs))`.
    Jcn,
    /// Lin: `2 * IC(lcs) / (IC(a) + IC(b))`.
    Lin,
}

impl MetricKind {
    /// Every supported metric, in canonical order.
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Path,
        MetricKind::Lch,
        MetricKind::Wup,
        MetricKind::Res,
        MetricKind::Jcn,
        MetricKind::Lin,
    ];

    /// Short name used in configuration and output file names.
    pub fn short_name(self) -> &'static str {
        match self {
            MetricKind::Path => "path",
            MetricKind::Lch => "lch",
            MetricKind::Wup => "wup",
            MetricKind::Res => "res",
            MetricKind::Jcn => "jcn",
            MetricKind::Lin => "lin",
        }
    }

    /// Whether the metric needs an information-content table.
    pub fn requires_ic(self) -> bool {
        matches!(self, MetricKind::Res | MetricKind::Jcn | MetricKind::Lin)
    }

    /// Score a pair of concepts.
    ///
    /// `ic` may be `None` for the structural metrics; the corpus-based
    /// metrics fail with [`CoreError::MissingStatistics`] without it.
    pub fn score<T: Taxonomy + ?Sized>(
        self,
        taxonomy: &T,
        ic: Option<&InformationContent>,
        a: &Concept,
        b: &Concept,
    ) -> CoreResult<SimilarityScore> {
        match self {
            MetricKind::Path => path_similarity(taxonomy, a, b),
            MetricKind::Lch => lch_similarity(taxonomy, a, b),
            MetricKind::Wup => wup_similarity(taxonomy, a, b),
            MetricKind::Res => {
                let ic = ic.ok_or(CoreError::MissingStatistics { metric: self })?;
                res_similarity(taxonomy, ic, a, b)
            }
            MetricKind::Jcn => {
                let ic = ic.ok_or(CoreError::MissingStatistics { metric: self })?;
                jcn_similarity(taxonomy, ic, a, b)
            }
            MetricKind::Lin => {
                let ic = ic.ok_or(CoreError::MissingStatistics { metric: self })?;
                lin_similarity(taxonomy, ic, a, b)
            }
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for MetricKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "path" => Ok(MetricKind::Path),
            "lch" => Ok(MetricKind::Lch),
            "wup" => Ok(MetricKind::Wup),
            "res" => Ok(MetricKind::Res),
            "jcn" => Ok(MetricKind::Jcn),
            "lin" => Ok(MetricKind::Lin),
            other => Err(CoreError::UnknownMetric(other.to_string())),
        }
    }
}

fn path_similarity<T: Taxonomy + ?Sized>(
    taxonomy: &T,
    a: &Concept,
    b: &Concept,
) -> CoreResult<SimilarityScore> {
    Ok(match taxonomy.path_distance(a, b)? {
        Some(d) => SimilarityScore::Value(1.0 / (d as f64 + 1.0)),
        None => SimilarityScore::Undefined,
    })
}

fn lch_similarity<T: Taxonomy + ?Sized>(
    taxonomy: &T,
    a: &Concept,
    b: &Concept,
) -> CoreResult<SimilarityScore> {
    let depth = taxonomy.max_depth();
    if depth == 0 {
        return Ok(SimilarityScore::Undefined);
    }
    Ok(match taxonomy.path_distance(a, b)? {
        Some(d) => {
            SimilarityScore::Value(-((d as f64 + 1.0) / (2.0 * depth as f64)).ln())
        }
        None => SimilarityScore::Undefined,
    })
}

fn wup_similarity<T: Taxonomy + ?Sized>(
    taxonomy: &T,
    a: &Concept,
    b: &Concept,
) -> CoreResult<SimilarityScore> {
    Ok(match taxonomy.deepest_common_subsumer(a, b)? {
        Some(subsumer) => {
            // Node depth counts the subsumer itself, hence +1.
            let depth = (subsumer.depth + 1) as f64;
            let len_a = subsumer.dist_left as f64 + depth;
            let len_b = subsumer.dist_right as f64 + depth;
            SimilarityScore::Value(2.0 * depth / (len_a + len_b))
        }
        None => SimilarityScore::Undefined,
    })
}

/// IC of the most informative common subsumer, if any subsumer has an
/// IC entry.
fn most_informative_subsumer<T: Taxonomy + ?Sized>(
    taxonomy: &T,
    ic: &InformationContent,
    a: &Concept,
    b: &Concept,
) -> CoreResult<Option<f64>> {
    let subsumers = taxonomy.common_subsumers(a, b)?;
    let best = subsumers
        .iter()
        .filter_map(|s| ic.get(s))
        .fold(None, |acc: Option<f64>, v| match acc {
            Some(current) if current >= v => Some(current),
            _ => Some(v),
        });
    Ok(best)
}

fn res_similarity<T: Taxonomy + ?Sized>(
    taxonomy: &T,
    ic: &InformationContent,
    a: &Concept,
    b: &Concept,
) -> CoreResult<SimilarityScore> {
    Ok(match most_informative_subsumer(taxonomy, ic, a, b)? {
        Some(ic_lcs) => SimilarityScore::Value(ic_lcs),
        None => SimilarityScore::Undefined,
    })
}

fn jcn_similarity<T: Taxonomy + ?Sized>(
    taxonomy: &T,
    ic: &InformationContent,
    a: &Concept,
    b: &Concept,
) -> CoreResult<SimilarityScore> {
    let (Some(ic_a), Some(ic_b)) = (ic.get(a), ic.get(b)) else {
        return Ok(SimilarityScore::Undefined);
    };
    let Some(ic_lcs) = most_informative_subsumer(taxonomy, ic, a, b)? else {
        return Ok(SimilarityScore::Undefined);
    };
    let difference = ic_a + ic_b - 2.0 * ic_lcs;
    // Identical information content saturates rather than dividing by zero.
    if difference == 0.0 {
        Ok(SimilarityScore::Value(f64::INFINITY))
    } else {
        Ok(SimilarityScore::Value(1.0 / difference))
    }
}

fn lin_similarity<T: Taxonomy + ?Sized>(
    taxonomy: &T,
    ic: &InformationContent,
    a: &Concept,
    b: &Concept,
) -> CoreResult<SimilarityScore> {
    let (Some(ic_a), Some(ic_b)) = (ic.get(a), ic.get(b)) else {
        return Ok(SimilarityScore::Undefined);
    };
    if ic_a + ic_b == 0.0 {
        return Ok(SimilarityScore::Undefined);
    }
    let Some(ic_lcs) = most_informative_subsumer(taxonomy, ic, a, b)? else {
        return Ok(SimilarityScore::Undefined);
    };
    Ok(SimilarityScore::Value(2.0 * ic_lcs / (ic_a + ic_b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::InMemoryTaxonomy;
    use std::collections::HashMap;

    fn tax() -> InMemoryTaxonomy {
        let entries = vec![
            ("entity", vec![]),
            ("animal", vec!["entity"]),
            ("plant", vec!["entity"]),
            ("dog", vec!["animal"]),
            ("cat", vec!["animal"]),
            ("oak", vec!["plant"]),
        ];
        InMemoryTaxonomy::from_entries(
            entries
                .into_iter()
                .map(|(c, ps)| (Concept::from(c), ps.into_iter().map(Concept::from))),
        )
        .unwrap()
    }

    fn ic() -> InformationContent {
        let values: HashMap<Concept, f64> = [
            ("entity", 0.0),
            ("animal", 1.0),
            ("plant", 1.2),
            ("dog", 3.0),
            ("cat", 3.5),
            ("oak", 4.0),
        ]
        .into_iter()
        .map(|(c, v)| (Concept::from(c), v))
        .collect();
        InformationContent::from_values(values)
    }

    fn score(metric: MetricKind, a: &str, b: &str) -> SimilarityScore {
        let table = ic();
        metric
            .score(&tax(), Some(&table), &Concept::from(a), &Concept::from(b))
            .unwrap()
    }

    #[test]
    fn metric_names_round_trip() {
        for metric in MetricKind::ALL {
            let parsed: MetricKind = metric.short_name().parse().unwrap();
            assert_eq!(parsed, metric);
        }
    }

    #[test]
    fn unknown_metric_name_fails_fast() {
        let err = "hso".parse::<MetricKind>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownMetric(name) if name == "hso"));
    }

    #[test]
    fn only_corpus_metrics_require_ic() {
        assert!(!MetricKind::Path.requires_ic());
        assert!(!MetricKind::Lch.requires_ic());
        assert!(!MetricKind::Wup.requires_ic());
        assert!(MetricKind::Res.requires_ic());
        assert!(MetricKind::Jcn.requires_ic());
        assert!(MetricKind::Lin.requires_ic());
    }

    #[test]
    fn corpus_metric_without_ic_is_missing_statistics() {
        let err = MetricKind::Res
            .score(&tax(), None, &Concept::from("dog"), &Concept::from("cat"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingStatistics {
                metric: MetricKind::Res
            }
        ));
    }

    #[test]
    fn structural_metric_succeeds_without_ic() {
        let s = MetricKind::Path
            .score(&tax(), None, &Concept::from("dog"), &Concept::from("cat"))
            .unwrap();
        assert_eq!(s, SimilarityScore::Value(1.0 / 3.0));
    }

    #[test]
    fn path_similarity_values() {
        // dog -- animal -- cat: distance 2.
        assert_eq!(score(MetricKind::Path, "dog", "cat"), SimilarityScore::Value(1.0 / 3.0));
        // Identical concepts: distance 0.
        assert_eq!(score(MetricKind::Path, "dog", "dog"), SimilarityScore::Value(1.0));
    }

    #[test]
    fn lch_uses_taxonomy_depth() {
        // d = 2, D = 2: -ln(3/4).
        let expected = -(3.0f64 / 4.0).ln();
        match score(MetricKind::Lch, "dog", "cat") {
            SimilarityScore::Value(v) => assert!((v - expected).abs() < 1e-12),
            other => panic!("expected value, got {:?}", other),
        }
    }

    #[test]
    fn wup_weights_by_subsumer_depth() {
        // lcs(dog, cat) = animal, node depth 2; dist 1 each side.
        // 2*2 / (1+2 + 1+2) = 4/6.
        assert_eq!(score(MetricKind::Wup, "dog", "cat"), SimilarityScore::Value(2.0 / 3.0));
    }

    #[test]
    fn res_is_ic_of_most_informative_subsumer() {
        assert_eq!(score(MetricKind::Res, "dog", "cat"), SimilarityScore::Value(1.0));
        // dog/oak only share entity (IC 0).
        assert_eq!(score(MetricKind::Res, "dog", "oak"), SimilarityScore::Value(0.0));
    }

    #[test]
    fn jcn_saturates_on_zero_difference() {
        // jcn(dog, cat) = 1 / (3 + 3.5 - 2*1) = 1/4.5.
        assert_eq!(
            score(MetricKind::Jcn, "dog", "cat"),
            SimilarityScore::Value(1.0 / 4.5)
        );
        // Same concept: IC difference 0 saturates to infinity.
        assert_eq!(
            score(MetricKind::Jcn, "dog", "dog"),
            SimilarityScore::Value(f64::INFINITY)
        );
    }

    #[test]
    fn lin_combines_pair_and_subsumer_ic() {
        // 2*1 / (3 + 3.5).
        assert_eq!(
            score(MetricKind::Lin, "dog", "cat"),
            SimilarityScore::Value(2.0 / 6.5)
        );
    }

    #[test]
    fn all_metrics_are_symmetric() {
        let pairs = [("dog", "cat"), ("dog", "oak"), ("cat", "oak"), ("animal", "oak")];
        for metric in MetricKind::ALL {
            for (a, b) in pairs {
                assert_eq!(
                    score(metric, a, b),
                    score(metric, b, a),
                    "{} not symmetric on ({}, {})",
                    metric,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn disjoint_hierarchies_are_undefined_not_errors() {
        let entries = vec![
            (Concept::from("a"), vec![]),
            (Concept::from("b"), vec![]),
        ];
        let tax = InMemoryTaxonomy::from_entries(
            entries.into_iter().map(|(c, ps)| (c, ps.into_iter())),
        )
        .unwrap();
        let s = MetricKind::Path
            .score(&tax, None, &Concept::from("a"), &Concept::from("b"))
            .unwrap();
        assert_eq!(s, SimilarityScore::Undefined);
    }
}
