//! finlens CLI binary.
//!
//! Look up a company by ticker, then compute its key financial ratios or
//! print one of its financial statements.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use finlens::data::yahoo::{YahooConfig, YahooFinancialsProvider};
use finlens::data::{StatementFrequency, StatementKind};
use finlens::output::{
    ChartConfig, ExportFormat, Exporter, RatioExport, ReportBuilder, StatementExport,
    render_bar_chart, render_ratio_table, render_statement_table,
};
use finlens::ratios::{RatioCategory, available_ratios, ratios_by_category};
use finlens::{Action, ActionOutput, Dashboard, DashboardError};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "finlens")]
#[command(about = "finlens: financial statements and key ratios", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute key financial ratios for the most recent period
    Analyze {
        /// Stock ticker symbol
        symbol: String,

        /// Use quarterly instead of annual statements
        #[arg(long)]
        quarterly: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = AnalyzeFormat::Text)]
        format: AnalyzeFormat,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip the bar chart in text output
        #[arg(long)]
        no_chart: bool,

        /// Width of the longest chart bar
        #[arg(long, default_value_t = ChartConfig::default().bar_width)]
        bar_width: usize,
    },

    /// View a financial statement
    Statements {
        /// Stock ticker symbol
        symbol: String,

        /// Statement to show
        #[arg(long, value_enum, default_value_t = Document::BalanceSheet)]
        document: Document,

        /// Use quarterly instead of annual statements
        #[arg(long)]
        quarterly: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = StatementFormat::Text)]
        format: StatementFormat,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the available ratios
    Ratios,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AnalyzeFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatementFormat {
    Text,
    Dataframe,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Document {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl From<Document> for StatementKind {
    fn from(document: Document) -> Self {
        match document {
            Document::BalanceSheet => Self::BalanceSheet,
            Document::IncomeStatement => Self::IncomeStatement,
            Document::CashFlow => Self::CashFlow,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        match e.downcast_ref::<DashboardError>() {
            Some(err) if err.is_invalid_ticker() => eprintln!("{}", err),
            _ => eprintln!("Error: {}", e),
        }
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = YahooConfig {
        timeout: Duration::from_secs(cli.timeout),
        ..YahooConfig::default()
    };

    match cli.command {
        Commands::Analyze {
            symbol,
            quarterly,
            format,
            output,
            no_chart,
            bar_width,
        } => {
            let chart = (!no_chart).then_some(ChartConfig {
                bar_width,
                ..ChartConfig::default()
            });
            analyze(&symbol, frequency(quarterly), format, output, chart, config).await?;
        }
        Commands::Statements {
            symbol,
            document,
            quarterly,
            format,
            output,
        } => {
            view_statement(
                &symbol,
                document.into(),
                frequency(quarterly),
                format,
                output,
                config,
            )
            .await?;
        }
        Commands::Ratios => list_ratios(),
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so exported data on stdout stays clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

const fn frequency(quarterly: bool) -> StatementFrequency {
    if quarterly {
        StatementFrequency::Quarterly
    } else {
        StatementFrequency::Annual
    }
}

fn spinner(message: String) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

async fn submit(
    symbol: &str,
    action: Action,
    frequency: StatementFrequency,
    config: YahooConfig,
) -> Result<Option<ActionOutput>, Box<dyn std::error::Error>> {
    let provider = YahooFinancialsProvider::with_config(config)?;
    let dashboard = Dashboard::new(provider).with_frequency(frequency);

    let pb = spinner(format!(
        "Fetching {} financial data for {}...",
        frequency,
        symbol.trim().to_uppercase()
    ))?;
    let result = dashboard.submit(symbol, action).await;
    pb.finish_and_clear();

    Ok(result?)
}

async fn analyze(
    symbol: &str,
    frequency: StatementFrequency,
    format: AnalyzeFormat,
    output: Option<PathBuf>,
    chart: Option<ChartConfig>,
    config: YahooConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(result) = submit(symbol, Action::AnalyzePerformance, frequency, config).await? else {
        debug!("no ticker entered");
        return Ok(());
    };
    let ActionOutput::Analysis { company, ratios } = result else {
        return Err("unexpected output for Analyze Performance".into());
    };

    let ticker = symbol.trim().to_uppercase();
    let export_format = match format {
        AnalyzeFormat::Text => None,
        AnalyzeFormat::Json => Some(ExportFormat::PrettyJson),
        AnalyzeFormat::Csv => Some(ExportFormat::Csv),
    };

    let Some(export_format) = export_format else {
        let mut text = format!("Company: {}\n", company);
        text.push_str(&render_ratio_table(&ratios));
        if let Some(chart) = chart {
            text.push_str(&render_bar_chart(&ratios, &chart));
        }
        return write_text(&text, output);
    };

    if export_format == ExportFormat::Csv {
        write_export(&RatioExport::from_result(&ticker, &ratios), export_format, output)
    } else {
        let report = ReportBuilder::new()
            .symbol(ticker)
            .company(company)
            .frequency(frequency)
            .ratios(ratios)
            .build()?;
        write_export(&report, export_format, output)
    }
}

async fn view_statement(
    symbol: &str,
    kind: StatementKind,
    frequency: StatementFrequency,
    format: StatementFormat,
    output: Option<PathBuf>,
    config: YahooConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(result) = submit(symbol, Action::ViewStatements(kind), frequency, config).await?
    else {
        debug!("no ticker entered");
        return Ok(());
    };
    let ActionOutput::Statement { company, view } = result else {
        return Err("unexpected output for View Financial Statements".into());
    };

    let ticker = symbol.trim().to_uppercase();
    let text = match format {
        StatementFormat::Text => format!(
            "Company: {}\n{}",
            company,
            render_statement_table(&view.table)
        ),
        StatementFormat::Dataframe => format!(
            "Company: {}\n{}\n{}\n",
            company,
            view.table.kind(),
            view.table.to_dataframe()?
        ),
        StatementFormat::Json | StatementFormat::Csv => {
            let export_format = if format == StatementFormat::Csv {
                ExportFormat::Csv
            } else {
                ExportFormat::PrettyJson
            };
            let records = StatementExport::from_table(&ticker, frequency, &view.table);
            return write_export(&records, export_format, output);
        }
    };
    write_text(&text, output)
}

fn write_text(text: &str, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            std::fs::write(&path, text)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn write_export<E: Exporter>(
    data: &E,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            data.export_to_file(&path, format)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", data.export_to_string(format)?),
    }
    Ok(())
}

fn list_ratios() {
    println!("\nAvailable Ratios ({})", available_ratios().len());
    println!("{}", "=".repeat(80));

    for category in [
        RatioCategory::Profitability,
        RatioCategory::Liquidity,
        RatioCategory::Leverage,
        RatioCategory::Coverage,
    ] {
        println!("\n{}", category.name());
        println!("{}", "-".repeat(80));
        for info in ratios_by_category(category) {
            let [numerator, denominator] = info.line_items;
            let scale = if info.percentage { " x 100" } else { "" };
            println!("  {:<26} {}", info.name(), info.description);
            println!(
                "  {:<26} = {} / {}{}",
                "",
                numerator.label(),
                denominator.label(),
                scale
            );
        }
    }
}
