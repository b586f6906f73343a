/// This module implements the search pipeline.
///
/// # Pipeline
///
/// 1. **Load**: [`processor::SourceText`] holds the original bytes of the input.
/// 2. **Fold**: a lowercased copy is made for comparison. It has the same
///    length and newline positions as the original.
/// 3. **Match**: [`matcher::RollingHashMatcher`] slides a Rabin-Karp window over
///    the folded copy. Hash hits are confirmed byte by byte, so a small modulus
///    only costs time, never correctness.
/// 4. **Annotate**: [`annotator::ContextAnnotator`] maps raw offsets to visible
///    positions (newlines not counted) and cuts context windows out of the
///    original text.
///
/// ```rust,ignore
/// let pattern = Pattern::new("fox")?;
/// let report = search(text, &pattern, SearchOptions { radius: 4, ..Default::default() }, &metrics);
/// ```
pub mod annotator;
pub mod engine;
pub mod matcher;
pub mod processor;

pub use annotator::ContextAnnotator;
pub use engine::{search, search_file, search_source, SearchOptions, SearchOutcome};
pub use matcher::{HashParams, RollingHashMatcher};
pub use processor::{write_report, SourceText};
