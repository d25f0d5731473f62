//! Coauthor Roster - Entry Point
//!
//! Fetches a researcher's publications, lists their collaborators, and looks each one up on ORCID.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Datelike;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use coauthor_roster::{
    FileProfileSource, OrcidClient, ProfileSource, SemanticScholarClient, TargetIdentity,
    config::Config,
    formatters::{csv, json, table},
    models::{OutputFormat, YearRange},
    pipeline::{self, RunContext},
};

/// Years covered when no period is given.
const DEFAULT_SPAN: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "coauthor-roster")]
#[command(about = "List an author's collaborators with affiliations and ORCID iDs")]
#[command(version)]
struct Cli {
    /// Full name of the author whose collaborators are listed
    #[arg(short, long)]
    author_name: String,

    /// Other spellings of the author's name, separated by ';'
    #[arg(short = 't', long)]
    variations: Option<String>,

    /// Publication years, "START-END" or a single year (default: the last three years)
    #[arg(short, long)]
    period: Option<YearRange>,

    /// Concurrent collaborator lookups
    #[arg(short, long, default_value = "1")]
    num_workers: usize,

    /// CSV file to write
    #[arg(short, long, default_value = "collaborators.csv")]
    output_file: PathBuf,

    /// Print the publications scanned and debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Read publications from a JSON file instead of Semantic Scholar
    #[arg(long)]
    publications: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Semantic Scholar API key (optional, enables higher rate limits)
    #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY")]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

/// `--verbose` wins over `RUST_LOG`, which wins over `--log-level`.
fn log_filter(verbose: bool, log_level: &str) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

fn init_tracing(filter: EnvFilter, json: bool) {
    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(log_filter(cli.verbose, &cli.log_level), cli.json_logs);

    let started = Instant::now();
    let years = cli
        .period
        .unwrap_or_else(|| YearRange::ending_at(chrono::Local::now().year(), DEFAULT_SPAN));

    let variants =
        cli.variations.as_deref().map(TargetIdentity::split_variants).unwrap_or_default();
    let target = TargetIdentity::new(&cli.author_name, variants)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        author = target.display_name(),
        period = %years,
        variants = target.variant_keys().len(),
        "Starting coauthor roster"
    );

    let mut config = Config::from_env()?;
    if cli.api_key.is_some() {
        config = Config { orcid_api_url: config.orcid_api_url, ..Config::new(cli.api_key) };
    }

    let registry = OrcidClient::new(&config)?;
    let profiles: Box<dyn ProfileSource> = match cli.publications {
        Some(ref path) => Box::new(FileProfileSource::load(path)?),
        None => Box::new(SemanticScholarClient::new(&config)?),
    };

    let ctx = RunContext::new(target, years, config.lookup_timeout).with_workers(cli.num_workers);
    let roster = pipeline::run(&ctx, profiles.as_ref(), &registry).await?;

    if cli.verbose {
        eprint!("{}", table::format_publications(&roster.publications));
    }

    if cli.format.is_json() {
        println!("{}", json::format_json(&roster)?);
    } else {
        print!("{}", table::format_table(&roster));
    }

    csv::write_csv(&cli.output_file, &roster.rows)?;

    tracing::info!(
        path = %cli.output_file.display(),
        rows = roster.rows.len(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Roster written"
    );

    Ok(())
}
