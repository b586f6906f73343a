/// This module implements the report produced by a search run.
///
/// # Report Shape
///
/// A report is an ordered list of entries, one per match, each holding:
/// - the pattern as the user typed it (original case),
/// - the visible position of the match (newlines not counted),
/// - the context window copied from the original text.
///
/// An empty list is the "no matches" report. It renders as a single sentinel
/// line no matter which pattern or radius produced it.
///
/// # Rendering
///
/// The text rendering is localized through [`Locale`]; the message strings are
/// not part of the search itself. Structured renderings (JSON, YAML) serialize
/// the same entries with serde:
/// ```text
/// {"matches": [{"pattern": "fox", "position": 10, "context": "ick fox. th"}]}
/// ```
use serde::{Deserialize, Serialize, Serializer};
use std::io::Write;
use std::str::FromStr;

use crate::errors::{SearchError, SearchResult};

/// Language used for the text rendering of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    fn no_matches(self) -> &'static str {
        match self {
            Locale::En => "No matches were found.",
            Locale::Ru => "Совпадений не найдено.",
        }
    }

    fn match_found(self, pattern: &str, position: usize) -> String {
        match self {
            Locale::En => format!(
                "A match was found: \"{}\" in the position {}",
                pattern, position
            ),
            Locale::Ru => format!("Найдено совпадение: \"{}\" в позиции {}", pattern, position),
        }
    }

    fn context_label(self) -> &'static str {
        match self {
            Locale::En => "Context: ",
            Locale::Ru => "Контекст: ",
        }
    }
}

impl FromStr for Locale {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ru" | "russian" => Ok(Locale::Ru),
            other => Err(SearchError::config_error(format!(
                "Unknown locale '{}' (expected en|ru)",
                other
            ))),
        }
    }
}

/// Encoding of the written report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(SearchError::config_error(format!(
                "Unknown output format '{}' (expected text|json|yaml)",
                other
            ))),
        }
    }
}

/// A single annotated match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// The pattern as supplied by the caller
    pub pattern: String,
    /// Number of non-newline bytes before the match
    pub position: usize,
    /// Original-case text around the match, line breaks included
    #[serde(serialize_with = "serialize_lossy")]
    pub context: Vec<u8>,
}

impl ReportEntry {
    pub fn new(pattern: impl Into<String>, position: usize, context: Vec<u8>) -> Self {
        Self {
            pattern: pattern.into(),
            position,
            context,
        }
    }

    /// The context as text, with invalid UTF-8 replaced
    pub fn context_lossy(&self) -> String {
        String::from_utf8_lossy(&self.context).into_owned()
    }
}

fn serialize_lossy<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

/// The complete result of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Entries in ascending position order
    #[serde(rename = "matches")]
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// The report for a run without matches
    pub fn no_matches() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ReportEntry>) -> Self {
        Self { entries }
    }

    pub fn is_no_matches(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the human-readable report.
    ///
    /// Contexts are copied byte for byte, so the output is only as valid
    /// UTF-8 as the input text was.
    pub fn render_text(&self, locale: Locale) -> Vec<u8> {
        let mut out = Vec::new();
        if self.entries.is_empty() {
            out.extend_from_slice(locale.no_matches().as_bytes());
            out.push(b'\n');
            return out;
        }

        for entry in &self.entries {
            out.extend_from_slice(locale.match_found(&entry.pattern, entry.position).as_bytes());
            out.push(b'\n');
            out.extend_from_slice(locale.context_label().as_bytes());
            out.extend_from_slice(&entry.context);
            out.push(b'\n');
        }
        out
    }

    /// Renders the report in the requested format
    pub fn render(&self, format: OutputFormat, locale: Locale) -> SearchResult<Vec<u8>> {
        match format {
            OutputFormat::Text => Ok(self.render_text(locale)),
            OutputFormat::Json => {
                let mut out = serde_json::to_vec_pretty(self)
                    .map_err(|e| SearchError::serialize_error(e.to_string()))?;
                writeln!(out)?;
                Ok(out)
            }
            OutputFormat::Yaml => serde_yaml::to_string(self)
                .map(String::into_bytes)
                .map_err(|e| SearchError::serialize_error(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report::from_entries(vec![
            ReportEntry::new("fox", 10, b"ick fox. th".to_vec()),
            ReportEntry::new("fox", 25, b"ick Fox.".to_vec()),
        ])
    }

    #[test]
    fn test_no_matches_report() {
        let report = Report::no_matches();
        assert!(report.is_no_matches());
        assert_eq!(report.len(), 0);
        assert_eq!(report.render_text(Locale::En), b"No matches were found.\n");
        assert_eq!(
            String::from_utf8(report.render_text(Locale::Ru)).unwrap(),
            "Совпадений не найдено.\n"
        );
    }

    #[test]
    fn test_render_text_english() {
        let text = String::from_utf8(sample().render_text(Locale::En)).unwrap();
        assert_eq!(
            text,
            "A match was found: \"fox\" in the position 10\n\
             Context: ick fox. th\n\
             A match was found: \"fox\" in the position 25\n\
             Context: ick Fox.\n"
        );
    }

    #[test]
    fn test_render_text_russian() {
        let text = String::from_utf8(sample().render_text(Locale::Ru)).unwrap();
        assert!(text.starts_with("Найдено совпадение: \"fox\" в позиции 10\nКонтекст: ick fox. th\n"));
    }

    #[test]
    fn test_render_text_keeps_raw_context_bytes() {
        let report = Report::from_entries(vec![ReportEntry::new("a", 0, vec![b'a', 0xff, b'\n'])]);
        let out = report.render_text(Locale::En);
        assert!(out.ends_with(&[b'a', 0xff, b'\n', b'\n']));
    }

    #[test]
    fn test_render_json() {
        let out = sample().render(OutputFormat::Json, Locale::En).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["matches"].as_array().unwrap().len(), 2);
        assert_eq!(value["matches"][0]["pattern"], "fox");
        assert_eq!(value["matches"][0]["position"], 10);
        assert_eq!(value["matches"][1]["context"], "ick Fox.");
    }

    #[test]
    fn test_render_json_empty() {
        let out = Report::no_matches()
            .render(OutputFormat::Json, Locale::En)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["matches"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_render_yaml() {
        let out = sample().render(OutputFormat::Yaml, Locale::En).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_slice(&out).unwrap();
        assert_eq!(value["matches"][1]["position"].as_u64(), Some(25));
    }

    #[test]
    fn test_lossy_context() {
        let entry = ReportEntry::new("a", 0, vec![b'a', 0xff]);
        assert_eq!(entry.context_lossy(), "a\u{fffd}");
    }

    #[test]
    fn test_parse_locale_and_format() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("russian".parse::<Locale>().unwrap(), Locale::Ru);
        assert!("fr".parse::<Locale>().is_err());

        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
