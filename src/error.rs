use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Structural load errors
// ---------------------------------------------------------------------------

/// A failure that prevents any listing from being loaded.
///
/// Field-level parse problems never show up here: they degrade to a missing
/// value on the affected record instead.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse CSV header of {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column(s): {}", path.display(), columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },
}

impl DataLoadError {
    /// Classify an I/O failure on `path`, mapping "not found" to its own variant.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            DataLoadError::NotFound { path }
        } else {
            DataLoadError::Io { path, source }
        }
    }
}
