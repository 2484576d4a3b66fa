use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`FileReader`](super::reader::FileReader) operations.
///
/// Only `read` and `read_sync` fail at all; every other operation presents
/// failure as a benign default (`false` / `0`).
#[derive(Error, Debug)]
pub enum FileError {
    /// The requested path matches a configured ignore pattern. Raised before
    /// any cache or filesystem access; carries the full pattern list so the
    /// caller can tell which configuration produced the rejection.
    #[error("{} matches an ignore pattern (patterns: {patterns:?})", .path.display())]
    Ignored {
        path: PathBuf,
        patterns: Vec<String>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FileError {
    pub fn is_ignored(&self) -> bool {
        matches!(self, FileError::Ignored { .. })
    }
}
