use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use hitmap::{
    GeoBoundsAggregation, MapperConfig, ResponseMapper, SearchResult, StatsAggregation,
    ValueAggregation,
};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Map a search-engine REST response into its result documents
#[derive(Parser, Debug)]
#[command(name = "hitmap")]
#[command(about = "Extract sources, hits and aggregations from search responses", long_about = None)]
struct Args {
    /// Response body file, `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Result path, e.g. hits/hits/_source. Omit to treat the whole body as one result.
    #[arg(short, long)]
    path: Option<String>,

    /// HTTP status code the body was received with
    #[arg(long, default_value_t = 200)]
    status: u16,

    /// HTTP reason phrase the body was received with
    #[arg(long, default_value = "OK")]
    reason: String,

    /// JSON file with mapper configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// What to print
    #[arg(long, value_enum, default_value_t = Mode::Sources)]
    mode: Mode,

    /// Aggregation name, for --mode aggregation
    #[arg(long)]
    aggregation: Option<String>,

    /// Aggregation kind, for --mode aggregation
    #[arg(long, value_enum, default_value_t = AggregationKind::GeoBounds)]
    kind: AggregationKind,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Source documents found along --path, tagged with their metadata id
    Sources,
    /// Search hits with their metadata
    Hits,
    /// A single named aggregation
    Aggregation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AggregationKind {
    GeoBounds,
    Stats,
    Value,
}

impl AggregationKind {
    fn type_name(self) -> &'static str {
        match self {
            AggregationKind::GeoBounds => GeoBoundsAggregation::TYPE,
            AggregationKind::Stats => StatsAggregation::TYPE,
            AggregationKind::Value => ValueAggregation::TYPE,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<MapperConfig>(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => MapperConfig::default(),
    };
    let mapper = ResponseMapper::new(config);

    let body = read_body(&args.input)?;
    info!("Read {} bytes from {:?}", body.len(), args.input);

    let output = match args.mode {
        Mode::Sources => {
            let result = mapper.parse(&body, args.status, &args.reason, args.path.as_deref())?;
            if !result.is_succeeded() {
                warn!("Response not succeeded: {}", result.error_message().unwrap_or_default());
                Value::Array(Vec::new())
            } else {
                Value::Array(result.source_as_json_list()?)
            }
        }
        Mode::Hits => {
            let result = SearchResult::parse(&mapper, &body, args.status, &args.reason)?;
            let hits = result.hits::<Value, Value>()?;
            for diagnostic in &hits.diagnostics {
                warn!("Skipped hit {}: {}", diagnostic.index, diagnostic.error);
            }
            serde_json::to_value(&hits.objects)?
        }
        Mode::Aggregation => {
            let Some(name) = args.aggregation.as_deref() else {
                bail!("--aggregation is required with --mode aggregation");
            };
            let result = SearchResult::parse(&mapper, &body, args.status, &args.reason)?;
            let aggregations = result.aggregations()?;
            info!("Reading {} aggregation '{}'", args.kind.type_name(), name);
            let parsed = match args.kind {
                AggregationKind::GeoBounds => aggregations.geo_bounds(name)?.map(serde_json::to_value),
                AggregationKind::Stats => aggregations.stats(name)?.map(serde_json::to_value),
                AggregationKind::Value => aggregations.value(name)?.map(serde_json::to_value),
            };
            match parsed {
                Some(value) => value?,
                None => bail!("{} aggregation '{}' not found", args.kind.type_name(), name),
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_body(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("reading response body from stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
    }
}
