use tracing::{trace, warn};

use crate::pattern::Pattern;
use crate::results::{Report, ReportEntry};

const NEWLINE: u8 = b'\n';

/// Counts the bytes of `text` that are not newlines
pub fn visible_len(text: &[u8]) -> usize {
    text.iter().filter(|&&b| b != NEWLINE).count()
}

/// Turns raw match offsets into a report with surrounding context.
///
/// Positions and windows are measured in visible coordinates, where newlines
/// are not counted, so a match keeps its position when lines are rewrapped.
#[derive(Debug, Clone, Copy)]
pub struct ContextAnnotator {
    radius: usize,
}

impl ContextAnnotator {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Builds the report for `matches`, which must be ascending offsets into
    /// a folded copy of `original`.
    pub fn annotate(&self, original: &[u8], matches: &[usize], pattern: &Pattern) -> Report {
        if matches.is_empty() {
            return Report::no_matches();
        }

        if self.radius > original.len() {
            warn!(
                "Context radius {} exceeds text length {}",
                self.radius,
                original.len()
            );
        }

        let mut entries = Vec::with_capacity(matches.len());
        // Offsets are ascending, so the visible count carries over between matches.
        let mut counted_to = 0;
        let mut visible_index = 0;

        for &idx in matches {
            let idx = idx.min(original.len());
            if idx >= counted_to {
                visible_index += visible_len(&original[counted_to..idx]);
            } else {
                visible_index = visible_len(&original[..idx]);
            }
            counted_to = idx;

            let context_start = visible_index.saturating_sub(self.radius);
            let context_end = visible_index
                .saturating_add(pattern.len())
                .saturating_add(self.radius);
            let origin = window_origin(original, idx, visible_index - context_start);
            let context = render_window(&original[origin..], context_start, context_end);

            trace!(
                "Match at raw offset {} -> visible {} (window {}..{})",
                idx,
                visible_index,
                context_start,
                context_end
            );

            entries.push(ReportEntry::new(pattern.as_str(), visible_index, context));
        }

        Report::from_entries(entries)
    }
}

/// Raw index of the first byte of a window that opens `back` visible bytes
/// before the match at `idx`.
fn window_origin(text: &[u8], idx: usize, back: usize) -> usize {
    let mut raw = idx;
    let mut remaining = back;
    while remaining > 0 && raw > 0 {
        raw -= 1;
        if text[raw] != NEWLINE {
            remaining -= 1;
        }
    }
    // A window never opens on a line break.
    while raw < text.len() && text[raw] == NEWLINE {
        raw += 1;
    }
    raw
}

/// Copies bytes from `text`, which starts at visible index `start`, until
/// the visible index reaches `end`.
///
/// A newline sits at the visible index of the byte that follows it, so line
/// breaks inside the window are kept and one directly after it is not.
fn render_window(text: &[u8], start: usize, end: usize) -> Vec<u8> {
    let mut context = Vec::with_capacity(end.saturating_sub(start).min(text.len()));
    let mut clean_index = start;

    for &byte in text {
        if clean_index >= end {
            break;
        }
        context.push(byte);
        if byte != NEWLINE {
            clean_index += 1;
        }
    }

    context
}
