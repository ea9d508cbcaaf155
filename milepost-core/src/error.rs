//! Errors raised by the geometry transform pipeline.

use thiserror::Error;

use crate::{Crs, Layer};

/// Errors produced while clipping, subtracting or projecting geometry.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GeometryError {
    /// A stage received a collection in the wrong coordinate space.
    #[error("{stage} expects {expected} coordinates but the {layer} layer is in {actual}")]
    UnexpectedCrs {
        /// Name of the stage that rejected the collection.
        stage: &'static str,
        /// Layer of the offending collection.
        layer: Layer,
        /// Coordinate space the stage requires.
        expected: Crs,
        /// Coordinate space the collection carried.
        actual: Crs,
    },
    /// The projection definition could not be parsed.
    #[error("failed to initialise projection `{definition}`: {message}")]
    ProjectionSetup {
        /// PROJ-style definition string.
        definition: &'static str,
        /// Message reported by the projection library.
        message: String,
    },
    /// A coordinate could not be reprojected.
    #[error("failed to project latitude {lat}, longitude {lon}: {message}")]
    Projection {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
        /// Message reported by the projection library.
        message: String,
    },
}
