//! Errors raised while writing the rendered map.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures while persisting an SVG document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        /// Directory that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A previous map could not be removed.
    #[error("failed to remove existing map {path}: {source}")]
    RemoveExisting {
        /// Path of the stale map.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// No temporary file could be created next to the destination.
    #[error("failed to create temporary file in {dir}: {source}")]
    CreateTemp {
        /// Directory holding the destination.
        dir: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Serialising the document failed.
    #[error("failed to write map {path}: {source}")]
    Write {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The finished document could not be moved into place.
    #[error("failed to move map into place at {path}: {source}")]
    Persist {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
