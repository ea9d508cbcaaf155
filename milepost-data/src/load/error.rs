//! Error types produced by the geometry loaders.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors produced while reading cached datasets into collections.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The shapefile reader failed.
    #[error("failed to read shapefile {path}: {source}")]
    Shapefile {
        /// Path of the `.shp` file.
        path: Utf8PathBuf,
        /// Underlying reader error.
        source: shapefile::Error,
    },
    /// A record held a shape other than a polygon.
    #[error("record {index} of {path} is a {shape_type}, expected a polygon")]
    UnsupportedShape {
        /// Path of the `.shp` file.
        path: Utf8PathBuf,
        /// Zero-based record index.
        index: usize,
        /// Shape type reported by the file.
        shape_type: String,
    },
    /// The point extract could not be opened.
    #[error("failed to open point extract {path}: {source}")]
    ReadExtract {
        /// Path of the extract.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The point extract is not well-formed XML.
    #[error("malformed XML in {path} at byte {position}: {source}")]
    Xml {
        /// Path of the extract.
        path: Utf8PathBuf,
        /// Byte offset of the failure.
        position: u64,
        /// Underlying parser error.
        source: quick_xml::Error,
    },
    /// A node lacks a usable position.
    #[error("node {id} in {path} is invalid: {message}")]
    InvalidNode {
        /// Path of the extract.
        path: Utf8PathBuf,
        /// Node identifier, or `?` when absent.
        id: String,
        /// What was wrong with the node.
        message: String,
    },
}
