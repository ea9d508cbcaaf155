//! Error types produced while populating the dataset cache.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors produced while downloading datasets or filling the cache.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The cache root could not be created.
    #[error("failed to create cache directory {path}: {source}")]
    CreateCacheDir {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A temporary download file could not be created or written.
    #[error("failed to write download into {path}: {source}")]
    WriteArchive {
        /// Directory holding the temporary file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// An archive member could not be copied into a staging file.
    #[error("failed to stage archive member in {path}: {source}")]
    PrepareExtract {
        /// Directory that should have held the staged member.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The downloaded bytes were not a readable zip archive.
    #[error("archive downloaded from {url} could not be extracted: {source}")]
    Archive {
        /// Source URL of the archive.
        url: String,
        /// Underlying zip error.
        source: zip::result::ZipError,
    },
    /// The archive did not contain an expected shapefile member.
    #[error("archive downloaded from {url} is missing {member}")]
    MissingArchiveMember {
        /// Source URL of the archive.
        url: String,
        /// File name that was expected inside the archive.
        member: String,
    },
    /// The dataset URL does not name an archive file.
    #[error("cannot derive a cache name from {url}")]
    InvalidDatasetUrl {
        /// Offending URL.
        url: String,
    },
    /// A staged member could not be moved into the cache.
    #[error("failed to move {from} to {to}: {source}")]
    Rename {
        /// Staged member.
        from: Utf8PathBuf,
        /// Destination inside the cache root.
        to: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Every download attempt failed.
    #[error("failed to download {url} after {attempts} attempt(s): {source}")]
    Download {
        /// Requested URL.
        url: String,
        /// Number of attempts made.
        attempts: u32,
        /// Error from the final attempt.
        source: TransportError,
    },
    /// The point query could not be turned into a request URL.
    #[error("failed to build query URL from {endpoint}: {source}")]
    Query {
        /// Configured query endpoint.
        endpoint: String,
        /// Underlying URL parse error.
        source: url::ParseError,
    },
    /// The downloaded point extract could not be moved into place.
    #[error("failed to persist point extract to {path}: {source}")]
    PersistExtract {
        /// Final location of the extract.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Checking the cache for an existing file failed.
    #[error("failed to inspect cached file {path}: {source}")]
    InspectCache {
        /// Cached file that could not be inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Transport-level errors encountered while issuing HTTP requests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The server returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description supplied by the server.
        message: String,
    },
    /// The request failed due to an I/O error.
    #[error("network error contacting {url}: {source}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// I/O error reported by the transport.
        source: io::Error,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// Underlying client error.
        source: reqwest::Error,
    },
}
