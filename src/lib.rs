//! Facade crate for the milepost map.
//!
//! This crate re-exports the geometry pipeline, the dataset cache and the
//! SVG renderer so a caller can drive the whole map from one dependency.

#![forbid(unsafe_code)]

pub use milepost_core::{
    BritishNationalGrid, CanvasFrame, CanvasLayers, ColorMode, GeoBounds, GeoProjector,
    GeometryCollection, GeometryError, GeometryFeature, MapFrame, MilepostCategory, Palette,
    RawLayers, prepare_layers,
};

pub use milepost_data::{
    CacheLayout, CacheManifest, DatasetSource, FetchError, FetchOptions, HttpDatasetSource,
    LoadError, fetch_all, load_all,
};

pub use milepost_render::{RenderError, RenderOptions, render_map, write_document};
