//! Command-line interface that renders the National Cycle Network milepost
//! map.
//!
//! One invocation fills the dataset cache, loads and prepares the layers and
//! writes `<output>/map-<mode>.svg`.
#![forbid(unsafe_code)]

mod error;

use std::num::NonZeroU32;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use milepost_core::{BritishNationalGrid, ColorMode, MapFrame, prepare_layers};
use milepost_data::fetch::{NATURAL_EARTH_BASE_URL, OVERPASS_URL};
use milepost_data::{
    CacheLayout, DatasetSource, FetchOptions, HttpDatasetSource, RetryPolicy, fetch_all, load_all,
};
use milepost_render::{RenderOptions, map_file_name, render_map, write_document};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

pub use error::CliError;

const ARG_SHAPE_ATTEMPTS: &str = "shape-attempts";
const ARG_QUERY_ATTEMPTS: &str = "query-attempts";
const DEFAULT_CACHE_DIR: &str = "cache";
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Run the CLI with the current process arguments and environment.
///
/// Returns the path of the written map.
pub fn run() -> Result<Utf8PathBuf, CliError> {
    let args = RenderArgs::try_parse().map_err(CliError::ArgumentParsing)?;
    let config = args.into_config()?;
    let source = HttpDatasetSource::new().map_err(CliError::BuildHttpClient)?;
    render_with_source(&config, &source)
}

/// CLI arguments for rendering the map.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "milepost-map",
    about = "Render a map of the National Cycle Network Millennium Mileposts",
    long_about = "Download Natural Earth and OpenStreetMap data into a local \
                  cache and render the Millennium Mileposts of the United \
                  Kingdom as an SVG map. Options can come from CLI flags, \
                  configuration files, or environment variables.",
    version
)]
#[ortho_config(prefix = "MILEPOST")]
pub struct RenderArgs {
    /// Render the dark colour scheme instead of the light one.
    ///
    /// An absent flag is left out of the CLI layer so a file or environment
    /// setting can still select the dark map.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dark: bool,
    /// Directory holding downloaded datasets.
    #[arg(long = "cache-dir", value_name = "dir")]
    #[serde(default)]
    pub cache_dir: Option<Utf8PathBuf>,
    /// Directory the map is written to.
    #[arg(long = "output-dir", value_name = "dir")]
    #[serde(default)]
    pub output_dir: Option<Utf8PathBuf>,
    /// Root URL of the Natural Earth downloads.
    #[arg(long = "natural-earth-url", value_name = "url")]
    #[serde(default)]
    pub natural_earth_url: Option<String>,
    /// Overpass API interpreter endpoint.
    #[arg(long = "overpass-url", value_name = "url")]
    #[serde(default)]
    pub overpass_url: Option<String>,
    /// Attempts per shapefile download.
    #[arg(long = ARG_SHAPE_ATTEMPTS, value_name = "n")]
    #[serde(default)]
    pub shape_attempts: Option<u32>,
    /// Attempts for the milepost query.
    #[arg(long = ARG_QUERY_ATTEMPTS, value_name = "n")]
    #[serde(default)]
    pub query_attempts: Option<u32>,
}

impl RenderArgs {
    /// Layer configuration files and environment beneath these arguments.
    ///
    /// # Errors
    /// Returns [`CliError::Configuration`] when a layer cannot be read and
    /// [`CliError::InvalidAttempts`] for a zero retry budget.
    pub fn into_config(self) -> Result<MapConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MapConfig::try_from(merged)
    }
}

/// Validated settings for one rendering run.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Colour scheme.
    pub mode: ColorMode,
    /// Dataset cache directory.
    pub cache_dir: Utf8PathBuf,
    /// Output directory.
    pub output_dir: Utf8PathBuf,
    /// Endpoints and retry policies.
    pub fetch: FetchOptions,
}

impl MapConfig {
    /// Path the map is written to.
    pub fn output_path(&self) -> Utf8PathBuf {
        self.output_dir.join(map_file_name(self.mode))
    }
}

fn retry_policy(
    value: Option<u32>,
    field: &'static str,
    default: RetryPolicy,
) -> Result<RetryPolicy, CliError> {
    match value {
        None => Ok(default),
        Some(count) => NonZeroU32::new(count)
            .map(RetryPolicy::new)
            .ok_or(CliError::InvalidAttempts { field, value: count }),
    }
}

impl TryFrom<RenderArgs> for MapConfig {
    type Error = CliError;

    fn try_from(args: RenderArgs) -> Result<Self, Self::Error> {
        let shape_retry = retry_policy(
            args.shape_attempts,
            ARG_SHAPE_ATTEMPTS,
            RetryPolicy::SHAPE_DEFAULT,
        )?;
        let query_retry = retry_policy(
            args.query_attempts,
            ARG_QUERY_ATTEMPTS,
            RetryPolicy::QUERY_DEFAULT,
        )?;
        let fetch = FetchOptions {
            natural_earth_url: args
                .natural_earth_url
                .unwrap_or_else(|| NATURAL_EARTH_BASE_URL.to_owned()),
            overpass_url: args
                .overpass_url
                .unwrap_or_else(|| OVERPASS_URL.to_owned()),
            shape_retry,
            query_retry,
            ..FetchOptions::default()
        };
        Ok(Self {
            mode: ColorMode::from_dark_flag(args.dark),
            cache_dir: args
                .cache_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CACHE_DIR)),
            output_dir: args
                .output_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_DIR)),
            fetch,
        })
    }
}

/// Run the full pipeline against `source`.
///
/// Fetches into the cache on a current-thread runtime, loads every layer,
/// prepares it for the canvas and writes the map. Returns the map's path.
///
/// # Errors
/// Returns the first failing stage's error; the output file is only
/// replaced once rendering has succeeded.
pub fn render_with_source<S: DatasetSource + ?Sized>(
    config: &MapConfig,
    source: &S,
) -> Result<Utf8PathBuf, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let cache = CacheLayout::new(config.cache_dir.clone());
    info!("filling dataset cache in {}", config.cache_dir);
    let manifest = runtime.block_on(fetch_all(source, &cache, &config.fetch))?;

    info!("loading datasets");
    let raw = load_all(&manifest)?;

    info!("preparing layers");
    let frame = MapFrame::default();
    let projector = BritishNationalGrid::new()?;
    let layers = prepare_layers(raw, &frame, &projector)?;

    let document = render_map(&layers, &RenderOptions::today(config.mode, frame.canvas));
    let path = config.output_path();
    write_document(&path, &document)?;
    Ok(path)
}

#[cfg(test)]
mod tests;
