//! Error types for similarity graph construction.
//!
//! All fallible operations return [`CoreResult`]. Errors are typed with
//! `thiserror` and carry enough context to identify the failing metric,
//! pair, or file without a debugger.

use std::path::PathBuf;
use thiserror::Error;

use crate::metrics::MetricKind;
use crate::types::Concept;

/// Result type alias for graph construction operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Error type for all graph construction operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Requested sample size is zero or exceeds the population.
    #[error("invalid sample size: requested {requested} from a population of {population}")]
    InvalidSampleSize {
        /// Sample size that was requested.
        requested: usize,
        /// Number of concepts available to sample from.
        population: usize,
    },

    /// A metric name outside the supported set was configured.
    #[error("unknown similarity metric '{0}' (expected one of: path, lch, wup, res, jcn, lin)")]
    UnknownMetric(String),

    /// An information-content metric was requested without loaded statistics.
    #[error("metric '{metric}' requires information-content statistics but none were loaded")]
    MissingStatistics {
        /// The metric that needed statistics.
        metric: MetricKind,
    },

    /// An information-content corpus could not be loaded or parsed.
    #[error("information-content source '{corpus}' failed to load: {detail}")]
    Statistics {
        /// Name of the corpus source.
        corpus: String,
        /// What went wrong.
        detail: String,
    },

    /// The taxonomy is malformed or a lookup failed.
    #[error("taxonomy error: {0}")]
    Taxonomy(String),

    /// A metric evaluation failed for a specific pair.
    ///
    /// Aborts the current metric's graph; other metrics are unaffected.
    #[error("metric '{metric}' failed on pair ({left}, {right})")]
    PairScoring {
        /// Short name of the metric being evaluated.
        metric: String,
        /// First concept of the pair.
        left: Concept,
        /// Second concept of the pair.
        right: Concept,
        /// Underlying failure.
        #[source]
        source: Box<CoreError>,
    },

    /// An output file could not be created or written.
    #[error("failed writing {path}")]
    Serialization {
        /// Path of the file being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The run configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Wrap an I/O error with the path being written.
    pub fn serialization(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            source,
        }
    }
}
