//! Run configuration.
//!
//! A [`RunConfig`] is fixed before a run starts and immutable afterwards.
//! Metric names are parsed into [`MetricKind`] during deserialization, so
//! an unsupported metric fails at configuration time, not mid-run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::metrics::MetricKind;

/// Default checkpoint interval: every 5% of the outer loop.
pub const DEFAULT_CHECKPOINT_FRACTION: f64 = 0.05;

/// Configuration for one graph construction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of concepts to sample from the taxonomy.
    pub sample_size: usize,
    /// Metrics to evaluate, in run order.
    pub metrics: Vec<MetricKind>,
    /// Information-content corpus source, if any corpus-based metric runs.
    pub ic_source: Option<String>,
    /// RNG seed for the sampler.
    pub seed: u64,
    /// Directory the node and edge files are written into.
    pub output_dir: PathBuf,
    /// File name prefix for all outputs.
    pub file_prefix: String,
    /// Fraction of the scoring loop between progress checkpoints.
    pub checkpoint_fraction: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sample_size: 5000,
            metrics: MetricKind::ALL.to_vec(),
            ic_source: None,
            seed: 42,
            output_dir: PathBuf::from("graph"),
            file_prefix: "wordnet".to_string(),
            checkpoint_fraction: DEFAULT_CHECKPOINT_FRACTION,
        }
    }
}

impl RunConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: RunConfig = toml::from_str(&contents).map_err(|e| {
            CoreError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency. Called before any work starts.
    pub fn validate(&self) -> CoreResult<()> {
        if self.sample_size == 0 {
            return Err(CoreError::Config("sample_size must be positive".into()));
        }
        if self.metrics.is_empty() {
            return Err(CoreError::Config("at least one metric must be configured".into()));
        }
        if self.file_prefix.is_empty() {
            return Err(CoreError::Config("file_prefix must not be empty".into()));
        }
        if !(self.checkpoint_fraction > 0.0 && self.checkpoint_fraction <= 0.5) {
            return Err(CoreError::Config(
                "checkpoint_fraction must be in (0, 0.5]".into(),
            ));
        }
        Ok(())
    }

    /// Whether any configured metric needs information content.
    pub fn needs_statistics(&self) -> bool {
        self.metrics.iter().any(|m| m.requires_ic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_runs_all_metrics() {
        let config = RunConfig::default();
        config.validate().unwrap();
        assert_eq!(config.metrics.len(), 6);
        assert!(config.needs_statistics());
    }

    #[test]
    fn zero_sample_size_is_rejected() {
        let config = RunConfig {
            sample_size: 0,
            ..RunConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn empty_metric_set_is_rejected() {
        let config = RunConfig {
            metrics: vec![],
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn structural_only_config_needs_no_statistics() {
        let config = RunConfig {
            metrics: vec![MetricKind::Path, MetricKind::Wup],
            ..RunConfig::default()
        };
        assert!(!config.needs_statistics());
    }

    #[test]
    fn toml_round_trip_with_metric_names() {
        let toml_src = r#"
            sample_size = 100
            metrics = ["path", "res"]
            ic_source = "brown"
            seed = 7
        "#;
        let config: RunConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.sample_size, 100);
        assert_eq!(config.metrics, vec![MetricKind::Path, MetricKind::Res]);
        assert_eq!(config.ic_source.as_deref(), Some("brown"));
        assert_eq!(config.seed, 7);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.file_prefix, "wordnet");
    }

    #[test]
    fn unknown_metric_name_fails_at_parse_time() {
        let toml_src = r#"metrics = ["path", "hso"]"#;
        assert!(toml::from_str::<RunConfig>(toml_src).is_err());
    }
}
