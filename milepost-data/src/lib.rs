//! Dataset access for the milepost map.
//!
//! Responsibilities:
//! - Download the Natural Earth shapefiles and the Overpass point extract
//!   into a local cache.
//! - Read cached datasets into [`milepost_core::GeometryCollection`] values.
//!
//! Boundaries:
//! - Geometry transforms live in `milepost-core`.
//! - Network access only happens through [`fetch::DatasetSource`].
#![forbid(unsafe_code)]

pub mod fetch;
pub mod load;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use fetch::{
    CacheLayout, CacheManifest, DatasetSource, FetchError, FetchOptions, HttpDatasetSource,
    PointQuery, RetryPolicy, ShapeDataset, ShapePaths, TransportError, fetch_all,
    fetch_point_features, fetch_shape,
};
pub use load::{LoadError, load_point_features, load_shape_collection};

use milepost_core::{MILEPOST_TAG, RawLayers};

/// Load every cached dataset named by `manifest`.
///
/// # Errors
/// Propagates the first [`LoadError`].
pub fn load_all(manifest: &CacheManifest) -> Result<RawLayers, LoadError> {
    let shapes = |dataset: ShapeDataset| {
        load_shape_collection(manifest.shapes(dataset), dataset.layer())
    };
    Ok(RawLayers {
        land: shapes(ShapeDataset::Land)?,
        minor_islands: shapes(ShapeDataset::MinorIslands)?,
        lakes: shapes(ShapeDataset::Lakes)?,
        lakes_europe: shapes(ShapeDataset::LakesEurope)?,
        urban_areas: shapes(ShapeDataset::UrbanAreas)?,
        mileposts: load_point_features(&manifest.mileposts, MILEPOST_TAG)?,
    })
}
