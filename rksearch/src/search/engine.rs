use std::path::Path;
use tracing::{debug, info};

use super::annotator::ContextAnnotator;
use super::matcher::{HashParams, RollingHashMatcher};
use super::processor::{write_report, SourceText};
use crate::errors::SearchResult;
use crate::metrics::{SearchMetrics, SearchStats};
use crate::pattern::{fold_case, Pattern};
use crate::results::{Locale, OutputFormat, Report};

/// Parameters of a single search run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Rolling hash parameters
    pub params: HashParams,
    /// Visible characters of context on each side of a match
    pub radius: usize,
}

/// The report of a run together with what it cost
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub report: Report,
    pub stats: SearchStats,
}

/// Searches `text` for `pattern`, ignoring ASCII case, and annotates every
/// match with context taken from the unmodified text.
pub fn search(
    text: &[u8],
    pattern: &Pattern,
    options: SearchOptions,
    metrics: &SearchMetrics,
) -> Report {
    info!(
        "Searching {} bytes for {:?} (radius {})",
        text.len(),
        pattern.as_str(),
        options.radius
    );

    let folded = fold_case(text);
    let matcher = RollingHashMatcher::with_metrics(options.params, metrics.clone());
    let matches = matcher.find_matches(&folded, pattern.folded());
    debug!("Matcher returned {} offsets", matches.len());

    let report = ContextAnnotator::new(options.radius).annotate(text, &matches, pattern);

    info!("Search complete. Found {} matches", report.len());
    metrics.log_stats();
    report
}

/// Runs a whole search: load `input`, search it, write the rendered report
/// to `output`.
///
/// Nothing is written when `input` cannot be read.
pub fn search_file(
    input: &Path,
    output: &Path,
    pattern: &Pattern,
    options: SearchOptions,
    format: OutputFormat,
    locale: Locale,
) -> SearchResult<SearchOutcome> {
    let metrics = SearchMetrics::new();
    let source = SourceText::load(input, &metrics)?;
    search_source(&source, output, pattern, options, format, locale, &metrics)
}

/// Searches an already loaded source and writes the rendered report to
/// `output`
pub fn search_source(
    source: &SourceText,
    output: &Path,
    pattern: &Pattern,
    options: SearchOptions,
    format: OutputFormat,
    locale: Locale,
    metrics: &SearchMetrics,
) -> SearchResult<SearchOutcome> {
    debug!("Searching {}", source.path().display());
    let report = search(source, pattern, options, metrics);
    let rendered = report.render(format, locale)?;
    write_report(output, &rendered)?;

    Ok(SearchOutcome {
        report,
        stats: metrics.get_stats(),
    })
}
