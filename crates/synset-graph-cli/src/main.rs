//! Synset similarity graph CLI.
//!
//! Loads a hypernym taxonomy (and, for the corpus-based metrics, an
//! information-content counts file), samples N concepts, builds one
//! weighted similarity graph per configured metric, and writes the node
//! index plus one edge-list file per metric.
//!
//! Exit codes: 0 when every metric completed, 1 on any failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use synset_graph_core::{
    CoreError, CoreResult, GraphRun, IcProvider, InMemoryTaxonomy, InformationContent,
    MetricKind, RunConfig, RunSummary,
};

/// Build weighted similarity graphs over a sampled lexical taxonomy.
#[derive(Parser, Debug)]
#[command(name = "synset-graph")]
#[command(version)]
#[command(about = "Build weighted similarity graphs over a sampled lexical taxonomy")]
struct Cli {
    /// Hypernym taxonomy file (`concept parent...` per line).
    #[arg(long)]
    taxonomy: PathBuf,

    /// Optional TOML run configuration; CLI flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of concepts to sample.
    #[arg(short = 'n', long)]
    sample_size: Option<usize>,

    /// Comma-separated metrics to run (path,lch,wup,res,jcn,lin).
    #[arg(short, long, value_delimiter = ',')]
    metrics: Option<Vec<MetricKind>>,

    /// RNG seed for sampling.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the node and edge files.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// File name prefix for all outputs.
    #[arg(long)]
    prefix: Option<String>,

    /// Information-content corpus to load (brown, semcor, genesis).
    #[arg(long)]
    ic_source: Option<String>,

    /// Directory containing `ic-<source>.dat` counts files.
    #[arg(long, default_value = ".")]
    ic_dir: PathBuf,

    /// Counts file overriding the `--ic-dir` lookup for `--ic-source`.
    #[arg(long)]
    ic_file: Option<PathBuf>,

    /// Write the run summary as JSON to this path.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Standard corpus sources resolvable from `--ic-dir`.
const IC_SOURCES: [&str; 3] = ["brown", "semcor", "genesis"];

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).init();

    match run(&cli) {
        Ok(summary) => {
            if summary.all_completed() {
                ExitCode::SUCCESS
            } else {
                warn!("run finished with failed metrics");
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!(error = %e, "run aborted");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CoreResult<RunSummary> {
    let config = build_config(cli)?;
    config.validate()?;

    let taxonomy = InMemoryTaxonomy::from_file(&cli.taxonomy)?;
    info!(
        path = %cli.taxonomy.display(),
        concepts = taxonomy.len(),
        "loaded taxonomy"
    );

    // Statistics are a run input: if a source is configured it must load,
    // otherwise the whole run aborts. With no source configured the
    // corpus-based metrics fail individually instead.
    let ic = match &config.ic_source {
        Some(source) => Some(load_statistics(cli, source)?),
        None => {
            if config.needs_statistics() {
                warn!("corpus-based metrics configured without --ic-source; they will fail");
            }
            None
        }
    };

    let summary = GraphRun::new(&config, &taxonomy, ic.as_ref()).execute()?;

    if let Some(path) = &cli.summary {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| CoreError::Config(format!("cannot encode summary: {}", e)))?;
        std::fs::write(path, json).map_err(|e| CoreError::serialization(path, e))?;
        info!(path = %path.display(), "wrote run summary");
    }
    Ok(summary)
}

fn build_config(cli: &Cli) -> CoreResult<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(n) = cli.sample_size {
        config.sample_size = n;
    }
    if let Some(metrics) = &cli.metrics {
        config.metrics = metrics.clone();
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(prefix) = &cli.prefix {
        config.file_prefix = prefix.clone();
    }
    if let Some(source) = &cli.ic_source {
        config.ic_source = Some(source.clone());
    }
    Ok(config)
}

fn load_statistics(cli: &Cli, source: &str) -> CoreResult<InformationContent> {
    let mut provider = IcProvider::new();
    for name in IC_SOURCES {
        provider = provider.with_source(name, cli.ic_dir.join(format!("ic-{}.dat", name)));
    }
    if let Some(file) = &cli.ic_file {
        provider = provider.with_source(source, file.clone());
    }
    Ok(provider.load(source)?.clone())
}
