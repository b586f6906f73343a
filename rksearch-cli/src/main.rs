mod prompt;

use clap::Parser;
use colored::Colorize;
use rksearch::{
    config::CliOverrides,
    metrics::SearchMetrics,
    parse_radius, search_source,
    search::SourceText,
    Locale, OutputFormat, Pattern, SearchConfig, SearchError, SearchOptions,
};
use std::{
    io,
    num::NonZeroU32,
    path::{Path, PathBuf},
    process,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::prompt::Prompter;

type Result<T> = std::result::Result<T, SearchError>;

/// Case-insensitive Rabin-Karp search that reports every match with context
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text file to search
    input: PathBuf,

    /// File the report is written to
    output: PathBuf,

    /// Search string (prompted for when omitted)
    #[arg(short = 'p', long)]
    pattern: Option<String>,

    /// Visible characters of context on each side of a match (prompted for when omitted)
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    radius: Option<String>,

    /// Base of the rolling hash
    #[arg(long)]
    base: Option<NonZeroU32>,

    /// Modulus of the rolling hash
    #[arg(long)]
    modulus: Option<NonZeroU32>,

    /// Report language (en|ru)
    #[arg(short = 'l', long)]
    locale: Option<String>,

    /// Report format (text|json|yaml)
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error), overridden by RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        hash_base: cli.base,
        modulus: cli.modulus,
        radius: cli.radius.as_deref().map(parse_radius).transpose()?,
        locale: cli.locale.as_deref().map(str::parse::<Locale>).transpose()?,
        format: cli
            .format
            .as_deref()
            .map(str::parse::<OutputFormat>)
            .transpose()?,
        log_level: cli.log_level.clone(),
    };
    let config = SearchConfig::load_from(cli.config.as_deref())?.merge_with_cli(overrides);

    init_logging(&config.log_level);
    debug!("Effective config: {:?}", config);

    // The input is read before anything is asked, so a bad path fails fast.
    let metrics = SearchMetrics::new();
    let source = SourceText::load(&cli.input, &metrics)?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let pattern = match cli.pattern {
        Some(text) => Pattern::new(text)?,
        None => prompter.pattern()?,
    };

    let radius = match config.radius {
        Some(radius) => radius,
        None => prompter.radius()?,
    };

    let options = SearchOptions {
        params: config.hash_params(),
        radius,
    };
    let outcome = search_source(
        &source,
        &cli.output,
        &pattern,
        options,
        config.format,
        config.locale,
        &metrics,
    )?;

    print_summary(&cli.output, outcome.report.len(), &metrics);
    Ok(())
}

fn print_summary(output: &Path, matches: usize, metrics: &SearchMetrics) {
    println!();
    println!(
        "Execution time of the Rabin-Karp algorithm: {}",
        humantime::format_duration(metrics.search_time())
            .to_string()
            .yellow()
    );
    println!(
        "Found {} matches. The results are saved in: {}",
        matches.to_string().green(),
        output.display().to_string().blue()
    );
}
