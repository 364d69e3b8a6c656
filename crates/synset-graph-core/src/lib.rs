//! Pairwise similarity graph construction over a sampled lexical taxonomy.
//!
//! This crate samples N concepts from a taxonomy, scores every unordered
//! pair under each configured similarity metric, assembles one weighted
//! undirected graph per metric, and serializes the node index and edge
//! lists for downstream embedding experiments.
//!
//! # Architecture
//!
//! - **types**: `Concept` identifiers and the `SimilarityScore` sentinel
//! - **error**: typed errors with `CoreError`/`CoreResult`
//! - **config**: immutable per-run configuration
//! - **taxonomy**: injected read-only structural view of the corpus
//! - **statistics**: information-content tables for the corpus metrics
//! - **sampler**: seeded uniform sampling without replacement
//! - **metrics**: the closed `path`/`lch`/`wup`/`res`/`jcn`/`lin` set
//! - **progress**: checkpointed ETA estimation for the O(N^2) loop
//! - **graph** / **assembler**: lower-triangular graph assembly
//! - **serialize**: node and edge-list file formats
//! - **runner**: per-metric orchestration with failure isolation
//!
//! # Example
//!
//! ```
//! use synset_graph_core::config::RunConfig;
//! use synset_graph_core::metrics::MetricKind;
//! use synset_graph_core::runner::GraphRun;
//! use synset_graph_core::taxonomy::InMemoryTaxonomy;
//! use synset_graph_core::types::Concept;
//!
//! # fn main() -> Result<(), synset_graph_core::error::CoreError> {
//! let taxonomy = InMemoryTaxonomy::from_entries([
//!     (Concept::from("entity"), vec![]),
//!     (Concept::from("animal"), vec![Concept::from("entity")]),
//!     (Concept::from("dog"), vec![Concept::from("animal")]),
//!     (Concept::from("cat"), vec![Concept::from("animal")]),
//! ])?;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = RunConfig {
//!     sample_size: 3,
//!     metrics: vec![MetricKind::Path, MetricKind::Wup],
//!     output_dir: dir.path().to_path_buf(),
//!     ..RunConfig::default()
//! };
//!
//! let summary = GraphRun::new(&config, &taxonomy, None).execute()?;
//! assert!(summary.all_completed());
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod progress;
pub mod runner;
pub mod sampler;
pub mod serialize;
pub mod statistics;
pub mod taxonomy;
pub mod types;

// Re-exports for convenience
pub use assembler::{assemble, MetricScorer, PairScorer};
pub use config::RunConfig;
pub use error::{CoreError, CoreResult};
pub use graph::{lower_triangle_pairs, Edge, SimilarityGraph};
pub use metrics::MetricKind;
pub use progress::{Checkpoint, ProgressEstimator};
pub use runner::{GraphRun, MetricOutcome, MetricReport, RunSummary};
pub use sampler::{sample_concepts, Sample};
pub use serialize::{edge_file_name, node_file_name, write_edge_file, write_node_file};
pub use statistics::{IcProvider, InformationContent};
pub use taxonomy::{InMemoryTaxonomy, Subsumer, Taxonomy};
pub use types::{Concept, SimilarityScore};
