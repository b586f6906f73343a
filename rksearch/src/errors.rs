/// This module defines the error types for rksearch.
///
/// # Error Kinds
///
/// Every failure a run can hit falls into one of three groups:
///
/// 1. **I/O failures** - the input file cannot be read or the report cannot be
///    written. These abort the run before (or instead of) producing output.
/// 2. **Validation failures** - an empty pattern, a pattern with bytes outside
///    the printable ASCII range, a malformed radius or unusable hash parameters.
///    These abort the run before the matcher is invoked.
/// 3. **Configuration / serialization failures** - a broken config file or a
///    report that cannot be encoded in the requested format.
///
/// Finding no matches is *not* an error; it produces a regular report.
///
/// ```rust,ignore
/// match Pattern::new(input) {
///     Ok(pattern) => // search,
///     Err(SearchError::EmptyPattern) => // ask again,
///     Err(e) => // report and stop
/// }
/// ```
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while loading, searching or reporting
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Couldn't read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Couldn't write to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("The search string cannot be empty")]
    EmptyPattern,
    #[error(
        "The search string must contain only printable ASCII characters \
         (found byte {byte:#04x} at position {position})"
    )]
    NonPrintablePattern { position: usize, byte: u8 },
    #[error("The radius must be a non-negative integer, got {0:?}")]
    InvalidRadius(String),
    #[error("Invalid hash parameters: {0}")]
    InvalidHashParams(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Serialization error: {0}")]
    SerializeError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    /// Maps an I/O error raised while reading `path` to the most specific variant
    pub fn from_read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::ReadFailed { path, source: err },
        }
    }

    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_radius(input: impl Into<String>) -> Self {
        Self::InvalidRadius(input.into())
    }

    pub fn invalid_hash_params(msg: impl Into<String>) -> Self {
        Self::InvalidHashParams(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn serialize_error(msg: impl Into<String>) -> Self {
        Self::SerializeError(msg.into())
    }

    /// True for errors caused by user input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyPattern
                | Self::NonPrintablePattern { .. }
                | Self::InvalidRadius(_)
                | Self::InvalidHashParams(_)
        )
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
