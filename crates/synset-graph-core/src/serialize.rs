//! On-disk serialization of samples and similarity graphs.
//!
//! Two plain-text formats, both whitespace separated:
//!
//! - node file (one per run): `<index> <concept>` per line, sample order;
//! - edge file (one per metric): `<i> <j> <weight>` per line, insertion
//!   order of the triangular scan.
//!
//! Undefined weights serialize as the reserved literal `None`; numeric
//! weights always carry a decimal point (`1.0`, never `1`), with `inf`
//! for the saturated jcn value. Output is byte-identical across runs for
//! the same sample and metric.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::graph::SimilarityGraph;
use crate::metrics::MetricKind;
use crate::sampler::Sample;

/// Node file name for a run prefix: `<prefix>.nodes`.
pub fn node_file_name(prefix: &str) -> String {
    format!("{}.nodes", prefix)
}

/// Edge file name for a metric: `<prefix>_<metric>.graph`.
pub fn edge_file_name(prefix: &str, metric: MetricKind) -> String {
    format!("{}_{}.graph", prefix, metric.short_name())
}

/// Write the sample as an indexed node list.
pub fn write_node_file(path: &Path, sample: &Sample) -> CoreResult<()> {
    let file = File::create(path).map_err(|e| CoreError::serialization(path, e))?;
    let mut writer = BufWriter::new(file);
    for (index, concept) in sample.iter() {
        writeln!(writer, "{} {}", index, concept)
            .map_err(|e| CoreError::serialization(path, e))?;
    }
    writer.flush().map_err(|e| CoreError::serialization(path, e))
}

/// Write a graph as a weighted edge list.
pub fn write_edge_file(path: &Path, graph: &SimilarityGraph) -> CoreResult<()> {
    let file = File::create(path).map_err(|e| CoreError::serialization(path, e))?;
    let mut writer = BufWriter::new(file);
    for edge in graph.edges() {
        writeln!(writer, "{} {} {}", edge.i, edge.j, edge.weight)
            .map_err(|e| CoreError::serialization(path, e))?;
    }
    writer.flush().map_err(|e| CoreError::serialization(path, e))
}
