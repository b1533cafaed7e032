//! Scholar Analytics - Entry Point
//!
//! One-shot analysis and export from the command line, or a long-running
//! MCP server over stdio or HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_analytics::{
    AnalysisConfig, FilterCriteria, RecordStore,
    analytics::analyze_filtered,
    config::defaults,
    export::export_papers,
    formatters::format_report,
    models::ExportFormat,
    server::McpServer,
};

#[derive(Parser, Debug)]
#[command(name = "scholar-analytics")]
#[command(about = "Bibliometric analytics for academic paper collections")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a paper collection and print the report
    Analyze {
        /// JSON file with an array of papers (or an object with `papers`)
        #[arg(long, short)]
        input: PathBuf,

        /// Report format
        #[arg(long, default_value = "markdown")]
        format: OutputFormat,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export a paper collection as CSV, BibTeX, RIS or JSON
    Export {
        /// JSON file with an array of papers (or an object with `papers`)
        #[arg(long, short)]
        input: PathBuf,

        /// Export format: csv, bibtex, ris or json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Run the MCP server
    Serve {
        /// Preload papers from this JSON file
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Transport mode: stdio or http
        #[arg(long, default_value = "stdio")]
        transport: Transport,

        /// HTTP server port (only used with --transport http)
        #[arg(long, default_value_t = defaults::HTTP_PORT, env = "PORT")]
        port: u16,
    },
}

/// Filter flags shared by `analyze` and `export`.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Earliest publication year (inclusive)
    #[arg(long)]
    year_min: Option<i32>,

    /// Latest publication year (inclusive)
    #[arg(long)]
    year_max: Option<i32>,

    /// Minimum citation count (inclusive)
    #[arg(long)]
    citation_min: Option<u64>,

    /// Maximum citation count (inclusive)
    #[arg(long)]
    citation_max: Option<u64>,

    /// Case-insensitive substring of any author name
    #[arg(long)]
    author: Option<String>,

    /// Exact venue name (repeatable)
    #[arg(long = "venue")]
    venues: Vec<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        let mut criteria = Self::new()
            .years(args.year_min, args.year_max)
            .citations(args.citation_min, args.citation_max);
        if let Some(author) = args.author {
            criteria = criteria.author(author);
        }
        if !args.venues.is_empty() {
            criteria = criteria.venues(args.venues);
        }
        criteria
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable Markdown
    #[default]
    Markdown,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Standard input/output (for desktop MCP clients)
    #[default]
    Stdio,
    /// HTTP API plus MCP endpoint
    Http,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout is reserved for reports and the stdio transport.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_store(path: &Path) -> anyhow::Result<RecordStore> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let store = RecordStore::from_json_str(&text)
        .with_context(|| format!("Invalid paper collection in {}", path.display()))?;
    tracing::info!(papers = store.len(), path = %path.display(), "Loaded papers");
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = AnalysisConfig::from_env()?;

    match cli.command {
        Command::Analyze { input, format, filter } => {
            let store = load_store(&input)?;
            let criteria = FilterCriteria::from(filter);
            let report = analyze_filtered(store.papers(), &criteria, &config)?;

            match format {
                OutputFormat::Markdown => println!("{}", format_report(&report)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Command::Export { input, format, output, filter } => {
            let store = load_store(&input)?;
            let papers = store.filter(&FilterCriteria::from(filter))?;
            let rendered = export_papers(&papers, format)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(papers = papers.len(), path = %path.display(), "Export written");
                }
                None => print!("{rendered}"),
            }
        }
        Command::Serve { input, transport, port } => {
            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                transport = ?transport,
                "Starting Scholar Analytics server"
            );

            let store = match input {
                Some(path) => load_store(&path)?,
                None => RecordStore::empty(),
            };
            let server = McpServer::with_store(config, store);

            match transport {
                Transport::Stdio => server.run_stdio().await?,
                Transport::Http => server.run_http(port).await?,
            }
        }
    }

    Ok(())
}
