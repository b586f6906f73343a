pub mod config;
pub mod errors;
pub mod metrics;
pub mod pattern;
pub mod results;
pub mod search;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use pattern::{parse_radius, Pattern};
pub use results::{Locale, OutputFormat, Report, ReportEntry};
pub use search::{search, search_file, search_source, HashParams, SearchOptions, SearchOutcome};
