use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::errors::{SearchError, SearchResult};

// Space through tilde, checked byte by byte so multi-byte UTF-8 is rejected.
static PRINTABLE_ASCII: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^[\x20-\x7E]*$").expect("printable ASCII regex is valid")
});

/// Returns the ASCII-lowercased copy of `bytes`.
///
/// Length and newline positions are preserved, so offsets into the folded
/// copy are valid offsets into the original.
pub fn fold_case(bytes: &[u8]) -> Vec<u8> {
    bytes.to_ascii_lowercase()
}

/// Returns true if every byte lies in the printable ASCII range 0x20..=0x7E
pub fn is_printable_ascii(bytes: &[u8]) -> bool {
    PRINTABLE_ASCII.is_match(bytes)
}

/// A validated search pattern.
///
/// Keeps the text as the user typed it (used when reporting) next to its
/// case-folded form (used when matching).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    original: String,
    folded: Vec<u8>,
}

impl Pattern {
    /// Validates `text` and builds its folded form
    pub fn new(text: impl Into<String>) -> SearchResult<Self> {
        Self::from_bytes(text.into().into_bytes())
    }

    /// Validates raw input bytes, which need not be UTF-8
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> SearchResult<Self> {
        let bytes = bytes.into();

        if bytes.is_empty() {
            return Err(SearchError::EmptyPattern);
        }

        if !is_printable_ascii(&bytes) {
            let (position, byte) = bytes
                .iter()
                .copied()
                .enumerate()
                .find(|&(_, b)| !(0x20..=0x7E).contains(&b))
                .unwrap_or((0, bytes[0]));
            return Err(SearchError::NonPrintablePattern { position, byte });
        }

        // Printable ASCII maps one byte to one char.
        let original: String = bytes.iter().map(|&b| char::from(b)).collect();
        let folded = fold_case(&bytes);
        Ok(Self { original, folded })
    }

    /// The pattern exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// The ASCII-lowercased bytes used for matching
    pub fn folded(&self) -> &[u8] {
        &self.folded
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.original)
    }
}

/// Parses a context radius typed by the user.
///
/// Surrounding whitespace is ignored. Anything that is not an integer, and any
/// negative integer, is rejected.
pub fn parse_radius(input: &str) -> SearchResult<usize> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if value >= 0 => {
            usize::try_from(value).map_err(|_| SearchError::invalid_radius(trimmed))
        }
        _ => Err(SearchError::invalid_radius(trimmed)),
    }
}
