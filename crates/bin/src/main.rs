//! Altman CLI binary.
//!
//! Searches for companies, computes Altman Z-Scores with full provenance of
//! every input, and inspects the raw statements a score was built from.

use altman::{Analysis, AnalysisError, AnalysisRequest, Analyzer, CompanySearch};
use altman_core::RiskCategory;
use altman_core::history::DEFAULT_MAX_YEARS;
use altman_data::{FetchConfig, RawStatementSet, StatementKind, YahooProvider, YahooSymbolSearch};
use altman_output::{
    Diagnostics, ExportFormat, Exporter, HistoryExport, ScoreSummary, TrendChart,
    render_components,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "altman")]
#[command(about = "Altman Z-Score analysis with traceable inputs", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find ticker symbols by company name or symbol
    Search {
        /// Company name or ticker
        query: String,
    },

    /// Full analysis: figures, score, sources and historical trend
    Analyze {
        /// Ticker symbol
        ticker: String,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Most recent years of history to show (0 for all)
        #[arg(long, env = "ALTMAN_MAX_YEARS", default_value_t = DEFAULT_MAX_YEARS)]
        years: usize,

        /// Write the historical series to a .csv or .json file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Current-period score only
    Score {
        /// Ticker symbol
        ticker: String,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the raw statement fields available for a ticker
    Fields {
        /// Ticker symbol
        ticker: String,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Print the statement tables as well
        #[arg(long)]
        tables: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct FetchArgs {
    /// Fetch timeout in seconds
    #[arg(long = "timeout", env = "ALTMAN_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Ignore the built-in manual overrides
    #[arg(long)]
    no_overrides: bool,
}

impl FetchArgs {
    const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn request(&self, ticker: &str) -> AnalysisRequest {
        let request = AnalysisRequest::new(ticker).with_timeout(self.timeout());
        if self.no_overrides {
            request.without_overrides()
        } else {
            request
        }
    }

    fn analyzer(&self) -> Result<Analyzer<YahooProvider>, Box<dyn std::error::Error>> {
        let config = FetchConfig::default().with_timeout(self.timeout());
        Ok(Analyzer::new(YahooProvider::new(config)?))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Search { query } => search(&query).await?,
        Commands::Analyze {
            ticker,
            fetch,
            years,
            export,
            format,
        } => {
            let request = fetch.request(&ticker).with_max_years(years);
            tracing::debug!(?request, "starting analysis");
            let raw = fetch_raw(&fetch.analyzer()?, &request).await?;
            let analysis = evaluate(&request, &raw, format)?;
            print_analysis(&analysis, format)?;
            if let Some(path) = export {
                export_history(&analysis, &path)?;
            }
        }
        Commands::Score {
            ticker,
            fetch,
            format,
        } => {
            let request = fetch.request(&ticker);
            let raw = fetch_raw(&fetch.analyzer()?, &request).await?;
            let analysis = evaluate(&request, &raw, format)?;
            let summary = ScoreSummary::new(&analysis.financials, &analysis.z_score);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Text => {
                    println!("{summary}");
                    println!("{}", analysis.z_score.category.explanation());
                    println!();
                    print!("{}", render_components(&summary.components));
                }
            }
        }
        Commands::Fields {
            ticker,
            fetch,
            tables,
            format,
        } => {
            let request = fetch.request(&ticker);
            let raw = fetch_raw(&fetch.analyzer()?, &request).await?;
            print_fields(&raw, tables, format)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "altman=info,altman_core=info,altman_data=info,warn",
        2 => "altman=debug,altman_core=debug,altman_data=debug,info",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn search(query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let search = CompanySearch::new(YahooSymbolSearch::new()?);
    let results = search.search(query).await;

    if results.is_empty() {
        println!("No companies found matching '{query}'");
        return Ok(());
    }

    println!("{:<8} {:<40} {}", "Ticker", "Company", "Exchange");
    println!("{}", "-".repeat(70));
    for m in results {
        println!("{:<8} {:<40} {}", m.ticker, m.name, m.exchange);
    }
    Ok(())
}

async fn fetch_raw(
    analyzer: &Analyzer<YahooProvider>,
    request: &AnalysisRequest,
) -> Result<RawStatementSet, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Fetching financial statements for {}...", request.ticker));

    match analyzer.fetch(request).await {
        Ok(raw) => {
            pb.finish_and_clear();
            Ok(raw)
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            Err(e.into())
        }
    }
}

/// Resolve and score `raw`, printing the diagnostics when resolution fails.
fn evaluate(
    request: &AnalysisRequest,
    raw: &RawStatementSet,
    format: OutputFormat,
) -> Result<Analysis, Box<dyn std::error::Error>> {
    match Analysis::evaluate(request, raw) {
        Ok(analysis) => Ok(analysis),
        Err(AnalysisError::Resolution(e)) => {
            let diagnostics = Diagnostics::new(raw, &e);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diagnostics)?),
                OutputFormat::Text => print!("{}", diagnostics.to_ascii()),
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_analysis(analysis: &Analysis, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    if format == OutputFormat::Json {
        println!("{}", analysis.report()?.to_json()?);
        return Ok(());
    }

    let summary = ScoreSummary::new(&analysis.financials, &analysis.z_score);
    print!("{}", summary.to_ascii_table());

    match &analysis.history {
        Ok(points) => {
            println!();
            let title = format!(
                "Historical Z-Score Trend for {}",
                analysis.financials.company_name
            );
            print!("{}", TrendChart::new(title).render(points));
            println!();
            println!("{:<6} {:<12} {:>8}  {}", "Year", "Period", "Z-Score", "Zone");
            for point in points {
                let category = RiskCategory::classify(point.z_score);
                println!(
                    "{:<6} {:<12} {:>8.2}  {}",
                    point.year,
                    point.period,
                    point.z_score,
                    category.zone()
                );
            }
        }
        Err(e) => println!("\n{e}"),
    }
    Ok(())
}

fn export_history(analysis: &Analysis, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let points = analysis.history_points();
    if points.is_empty() {
        eprintln!("No historical data to export");
        return Ok(());
    }

    let format = ExportFormat::from_path(path)?;
    HistoryExport::new(&analysis.financials.ticker, points).export_to_file(path, format)?;
    eprintln!("Exported {} years to {}", points.len(), path.display());
    Ok(())
}

fn print_fields(
    raw: &RawStatementSet,
    tables: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let available = raw.available_fields();

    if format == OutputFormat::Json {
        let by_name: BTreeMap<String, &Vec<String>> = available
            .iter()
            .map(|(kind, fields)| (kind.to_string(), fields))
            .collect();
        println!("{}", serde_json::to_string_pretty(&by_name)?);
        return Ok(());
    }

    println!("\nRaw statement fields for {} ({})", raw.company_name(), raw.ticker);
    println!("{}", "=".repeat(80));
    if available.is_empty() {
        println!("No financial statement fields were found.");
    }
    for (kind, fields) in &available {
        println!("\n{} ({} fields):", kind.title(), fields.len());
        for field in fields {
            println!("  {field}");
        }
    }

    if tables {
        for kind in StatementKind::ALL {
            let table = raw.statement(kind);
            if table.is_empty() {
                continue;
            }
            println!("\n{}:", kind.title());
            println!("{}", table.to_dataframe()?);
        }
    }
    Ok(())
}
