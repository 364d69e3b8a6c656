//! Run orchestration: sample once, then build and persist one graph per
//! configured metric.
//!
//! Per-metric failures are isolated: a metric that cannot run (missing
//! statistics, scoring failure, unwritable output) is reported and the
//! remaining metrics still execute. Completed edge files from earlier
//! metrics stay valid. Sampling and node-file failures abort the whole
//! run, since nothing downstream can proceed without them.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::assembler::{assemble, MetricScorer};
use crate::config::RunConfig;
use crate::error::CoreResult;
use crate::metrics::MetricKind;
use crate::progress::ProgressEstimator;
use crate::sampler::{sample_concepts, Sample};
use crate::serialize::{edge_file_name, node_file_name, write_edge_file, write_node_file};
use crate::statistics::InformationContent;
use crate::taxonomy::Taxonomy;

/// Outcome of one metric within a run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricOutcome {
    /// The graph was built and serialized.
    Completed {
        /// Path of the written edge-list file.
        edge_file: PathBuf,
        /// Number of edges written.
        edges: usize,
    },
    /// The metric failed; earlier metrics' outputs are unaffected.
    Failed {
        /// Rendered error chain.
        error: String,
    },
}

/// Per-metric report in the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct MetricReport {
    /// The metric that ran.
    pub metric: MetricKind,
    /// Wall time spent on this metric, in seconds.
    pub elapsed_secs: f64,
    /// How the metric ended.
    #[serde(flatten)]
    pub outcome: MetricOutcome,
}

/// Serializable summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Size of the taxonomy the sample was drawn from.
    pub population_size: usize,
    /// Number of sampled concepts.
    pub sample_size: usize,
    /// Path of the written node file.
    pub node_file: PathBuf,
    /// One report per configured metric, in run order.
    pub metrics: Vec<MetricReport>,
}

impl RunSummary {
    /// Whether every configured metric completed.
    pub fn all_completed(&self) -> bool {
        self.metrics
            .iter()
            .all(|r| matches!(r.outcome, MetricOutcome::Completed { .. }))
    }
}

/// One graph construction run over an injected taxonomy and optional IC
/// table. Both inputs are read-only and shared across all metrics.
pub struct GraphRun<'a, T: Taxonomy + ?Sized> {
    config: &'a RunConfig,
    taxonomy: &'a T,
    ic: Option<&'a InformationContent>,
}

impl<'a, T: Taxonomy + ?Sized> GraphRun<'a, T> {
    /// Prepare a run. No work happens until [`GraphRun::execute`].
    pub fn new(
        config: &'a RunConfig,
        taxonomy: &'a T,
        ic: Option<&'a InformationContent>,
    ) -> Self {
        Self {
            config,
            taxonomy,
            ic,
        }
    }

    /// Execute the run: validate, sample, write the node file, then build
    /// and serialize one graph per metric.
    pub fn execute(&self) -> CoreResult<RunSummary> {
        let started_at = Utc::now();
        self.config.validate()?;

        let population = self.taxonomy.concepts();
        let sample = sample_concepts(population, self.config.sample_size, self.config.seed)?;
        info!(
            population = population.len(),
            sample = sample.len(),
            seed = self.config.seed,
            "sampled taxonomy"
        );

        std::fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| crate::error::CoreError::serialization(&self.config.output_dir, e))?;

        let node_file = self
            .config
            .output_dir
            .join(node_file_name(&self.config.file_prefix));
        write_node_file(&node_file, &sample)?;
        info!(path = %node_file.display(), "wrote node file");

        let mut reports = Vec::with_capacity(self.config.metrics.len());
        for &metric in &self.config.metrics {
            info!(%metric, "building similarity graph");
            let start = Instant::now();
            let outcome = match self.run_metric(metric, &sample) {
                Ok((edge_file, edges)) => {
                    info!(
                        %metric,
                        edges,
                        elapsed_secs = start.elapsed().as_secs_f64(),
                        "metric completed"
                    );
                    MetricOutcome::Completed { edge_file, edges }
                }
                Err(e) => {
                    error!(%metric, error = %render_chain(&e), "metric failed");
                    MetricOutcome::Failed {
                        error: render_chain(&e),
                    }
                }
            };
            reports.push(MetricReport {
                metric,
                elapsed_secs: start.elapsed().as_secs_f64(),
                outcome,
            });
        }

        Ok(RunSummary {
            started_at,
            finished_at: Utc::now(),
            population_size: population.len(),
            sample_size: sample.len(),
            node_file,
            metrics: reports,
        })
    }

    fn run_metric(&self, metric: MetricKind, sample: &Sample) -> CoreResult<(PathBuf, usize)> {
        let scorer = MetricScorer::new(metric, self.taxonomy, self.ic)?;
        let mut estimator =
            ProgressEstimator::new(sample.len(), self.config.checkpoint_fraction);
        let graph = assemble(sample, &scorer, &mut estimator)?;

        let edge_file = self
            .config
            .output_dir
            .join(edge_file_name(&self.config.file_prefix, metric));
        write_edge_file(&edge_file, &graph)?;
        Ok((edge_file, graph.edge_count()))
    }
}

fn render_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::taxonomy::InMemoryTaxonomy;
    use crate::types::Concept;

    fn taxonomy() -> InMemoryTaxonomy {
        let entries = vec![
            ("root", vec![]),
            ("a", vec!["root"]),
            ("b", vec!["root"]),
            ("c", vec!["a"]),
            ("d", vec!["a"]),
            ("e", vec!["b"]),
        ];
        InMemoryTaxonomy::from_entries(
            entries
                .into_iter()
                .map(|(c, ps)| (Concept::from(c), ps.into_iter().map(Concept::from))),
        )
        .unwrap()
    }

    fn config(dir: &std::path::Path, metrics: Vec<MetricKind>) -> RunConfig {
        RunConfig {
            sample_size: 4,
            metrics,
            ic_source: None,
            seed: 11,
            output_dir: dir.to_path_buf(),
            file_prefix: "test".to_string(),
            ..RunConfig::default()
        }
    }

    #[test]
    fn run_writes_node_file_and_one_edge_file_per_metric() {
        let dir = tempfile::tempdir().unwrap();
        let tax = taxonomy();
        let cfg = config(dir.path(), vec![MetricKind::Path, MetricKind::Wup]);

        let summary = GraphRun::new(&cfg, &tax, None).execute().unwrap();
        assert!(summary.all_completed());
        assert!(dir.path().join("test.nodes").exists());
        assert!(dir.path().join("test_path.graph").exists());
        assert!(dir.path().join("test_wup.graph").exists());
        assert_eq!(summary.sample_size, 4);
        assert_eq!(summary.population_size, 6);
    }

    #[test]
    fn metric_failures_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let tax = taxonomy();
        // res needs IC; none is supplied. path must still complete.
        let cfg = config(dir.path(), vec![MetricKind::Res, MetricKind::Path]);

        let summary = GraphRun::new(&cfg, &tax, None).execute().unwrap();
        assert!(!summary.all_completed());
        assert!(matches!(
            summary.metrics[0].outcome,
            MetricOutcome::Failed { .. }
        ));
        assert!(matches!(
            summary.metrics[1].outcome,
            MetricOutcome::Completed { .. }
        ));
        assert!(dir.path().join("test_path.graph").exists());
        assert!(!dir.path().join("test_res.graph").exists());
    }

    #[test]
    fn oversized_sample_aborts_the_whole_run() {
        let dir = tempfile::tempdir().unwrap();
        let tax = taxonomy();
        let mut cfg = config(dir.path(), vec![MetricKind::Path]);
        cfg.sample_size = 100;

        let err = GraphRun::new(&cfg, &tax, None).execute().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSampleSize { .. }));
        assert!(!dir.path().join("test.nodes").exists());
    }

    #[test]
    fn summary_serializes_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let tax = taxonomy();
        let cfg = config(dir.path(), vec![MetricKind::Path]);

        let summary = GraphRun::new(&cfg, &tax, None).execute().unwrap();
        let json = serde_json::to_string_pretty(&summary).unwrap();
        assert!(json.contains("\"status\": \"completed\""));
        assert!(json.contains("\"metric\": \"path\""));
    }
}
