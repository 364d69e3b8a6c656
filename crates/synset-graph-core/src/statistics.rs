//! Information-content statistics for the corpus-based metrics.
//!
//! `res`, `jcn` and `lin` weigh concepts by how informative they are in a
//! reference corpus: `IC(c) = -ln(count(c) / total)`, where counts are the
//! accumulated frequencies from a counts file and `total` is the largest
//! (root) count. The table is loaded once per source, cached for the run,
//! and never mutated afterwards.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::types::Concept;

/// Read-only information-content table.
#[derive(Debug, Clone, Default)]
pub struct InformationContent {
    values: HashMap<Concept, f64>,
}

impl InformationContent {
    /// Build a table directly from IC values. Mostly useful in tests.
    pub fn from_values(values: HashMap<Concept, f64>) -> Self {
        Self { values }
    }

    /// Derive IC values from raw corpus frequency counts.
    ///
    /// The largest count is taken as the root total; concepts with a zero
    /// count get no entry (their IC is undefined, not infinite).
    pub fn from_counts(counts: HashMap<Concept, f64>) -> CoreResult<Self> {
        let total = counts.values().copied().fold(0.0f64, f64::max);
        if total <= 0.0 {
            return Err(CoreError::Statistics {
                corpus: "<counts>".into(),
                detail: "no positive counts".into(),
            });
        }
        let values = counts
            .into_iter()
            .filter(|(_, count)| *count > 0.0)
            .map(|(concept, count)| (concept, -(count / total).ln()))
            .collect();
        Ok(Self { values })
    }

    /// Parse a counts file: one `concept count` pair per line, `#` comments
    /// and blank lines skipped.
    pub fn from_counts_reader(reader: impl BufRead, source: &str) -> CoreResult<Self> {
        let mut counts: HashMap<Concept, f64> = HashMap::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| CoreError::Statistics {
                corpus: source.to_string(),
                detail: format!("read error at line {}: {}", lineno + 1, e),
            })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(concept), Some(count)) = (fields.next(), fields.next()) else {
                return Err(CoreError::Statistics {
                    corpus: source.to_string(),
                    detail: format!("line {}: expected '<concept> <count>'", lineno + 1),
                });
            };
            let count: f64 = count.parse().map_err(|e| CoreError::Statistics {
                corpus: source.to_string(),
                detail: format!("line {}: bad count '{}': {}", lineno + 1, count, e),
            })?;
            counts.insert(Concept::from(concept), count);
        }
        Self::from_counts(counts).map_err(|_| CoreError::Statistics {
            corpus: source.to_string(),
            detail: "no positive counts".into(),
        })
    }

    /// IC value for a concept, if the corpus observed it.
    pub fn get(&self, concept: &Concept) -> Option<f64> {
        self.values.get(concept).copied()
    }

    /// Number of concepts with an IC entry.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Loads and caches [`InformationContent`] tables by corpus source name.
///
/// Loading is idempotent: the first `load` for a source reads the file,
/// later calls return the cached table.
#[derive(Debug, Default)]
pub struct IcProvider {
    sources: HashMap<String, PathBuf>,
    cache: HashMap<String, InformationContent>,
}

impl IcProvider {
    /// Create an empty provider with no registered sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counts file under a source name (e.g. `brown`).
    pub fn with_source(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.sources.insert(name.into(), path.into());
        self
    }

    /// Names of all registered sources.
    pub fn source_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Load (or fetch from cache) the IC table for a source.
    pub fn load(&mut self, name: &str) -> CoreResult<&InformationContent> {
        if !self.cache.contains_key(name) {
            let path = self.sources.get(name).ok_or_else(|| CoreError::Statistics {
                corpus: name.to_string(),
                detail: format!(
                    "unknown source (registered: {})",
                    self.source_names().join(", ")
                ),
            })?;
            let table = load_counts_file(path, name)?;
            info!(source = name, concepts = table.len(), "loaded information content");
            self.cache.insert(name.to_string(), table);
        }
        Ok(&self.cache[name])
    }
}

fn load_counts_file(path: &Path, source: &str) -> CoreResult<InformationContent> {
    let file = File::open(path).map_err(|e| CoreError::Statistics {
        corpus: source.to_string(),
        detail: format!("cannot open {}: {}", path.display(), e),
    })?;
    InformationContent::from_counts_reader(BufReader::new(file), source)
}
