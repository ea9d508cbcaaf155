//! Core domain types for the milepost map.
//!
//! Geometry flows through the pipeline as [`GeometryCollection`] values that
//! are moved from stage to stage. Each collection records the coordinate
//! space it lives in, so a stage applied to the wrong space fails loudly
//! instead of producing a silently distorted map.

pub mod category;
pub mod color;
pub mod error;
pub mod feature;
pub mod frame;
pub mod transform;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use category::{CategoryColors, MILEPOST_TAG, MilepostCategory};
pub use color::{Color, ColorMode, DrawStyle, Palette};
pub use error::GeometryError;
pub use feature::{Crs, GeometryCollection, GeometryFeature, Layer, Tags};
pub use frame::{CanvasFrame, GeoBounds, MapFrame};
pub use transform::{
    BritishNationalGrid, CanvasLayers, GeoProjector, RawLayers, clip_to_region, prepare_layers,
    project_to_canvas, subtract_lakes, swap_axes,
};
