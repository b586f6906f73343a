use memmap2::Mmap;
use std::fs::{self, File};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::{SearchError, SearchResult};
use crate::metrics::SearchMetrics;

// Files at or above this size are memory mapped instead of copied
pub(crate) const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

enum Contents {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

/// The original text of an input file, read once and kept unmodified
pub struct SourceText {
    path: PathBuf,
    contents: Contents,
}

impl SourceText {
    /// Wraps in-memory text, e.g. for tests or piped input
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: Contents::Owned(bytes.into()),
        }
    }

    /// Loads the whole file at `path`
    pub fn load(path: &Path, metrics: &SearchMetrics) -> SearchResult<Self> {
        let metadata = fs::metadata(path).map_err(|e| SearchError::from_read(path, e))?;
        if metadata.is_dir() {
            return Err(SearchError::ReadFailed {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "is a directory"),
            });
        }

        let size = metadata.len();
        let contents = if size >= LARGE_FILE_THRESHOLD {
            trace!("Memory mapping {} ({} bytes)", path.display(), size);
            let file = File::open(path).map_err(|e| SearchError::from_read(path, e))?;
            // SAFETY: the map is read-only and lives no longer than this run
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| SearchError::from_read(path, e))?;
            Contents::Mapped(mmap)
        } else {
            trace!("Reading {} ({} bytes)", path.display(), size);
            Contents::Owned(fs::read(path).map_err(|e| SearchError::from_read(path, e))?)
        };

        let source = Self {
            path: path.to_path_buf(),
            contents,
        };
        metrics.record_load(source.len() as u64, source.is_mapped());
        debug!("Loaded {} bytes from {}", source.len(), path.display());
        Ok(source)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self.contents, Contents::Mapped(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.contents {
            Contents::Owned(bytes) => bytes.as_slice(),
            Contents::Mapped(mmap) => &mmap[..],
        }
    }
}

impl Deref for SourceText {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for SourceText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceText")
            .field("path", &self.path)
            .field("len", &self.len())
            .field("mapped", &self.is_mapped())
            .finish()
    }
}

/// Writes a rendered report to `path` in a single call, replacing any
/// existing file.
pub fn write_report(path: &Path, rendered: &[u8]) -> SearchResult<()> {
    fs::write(path, rendered).map_err(|e| SearchError::write_failed(path, e))?;
    debug!("Wrote {} bytes to {}", rendered.len(), path.display());
    Ok(())
}
