//! Error types emitted by the milepost map CLI.

use std::sync::Arc;

use milepost_core::GeometryError;
use milepost_data::{FetchError, LoadError, TransportError};
use milepost_render::RenderError;
use thiserror::Error;

/// Errors emitted by the milepost map CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A retry budget was configured as zero.
    #[error("--{field} must be at least 1, got {value}")]
    InvalidAttempts { field: &'static str, value: u32 },
    /// The async runtime could not be started.
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] TransportError),
    /// Filling the dataset cache failed.
    #[error("failed to fetch datasets: {0}")]
    Fetch(#[from] FetchError),
    /// Reading a cached dataset failed.
    #[error("failed to load datasets: {0}")]
    Load(#[from] LoadError),
    /// Preparing geometry for the canvas failed.
    #[error("failed to prepare geometry: {0}")]
    Geometry(#[from] GeometryError),
    /// Writing the map failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
