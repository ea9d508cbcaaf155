//! Geometry builders and a planar projector shared by unit and behaviour
//! tests.

use geo::{Coord, LineString, MultiPolygon, Polygon};

use crate::{GeoProjector, GeometryError, GeometryFeature, MILEPOST_TAG, Tags};

/// Axis-aligned square polygon spanning `(min_x, min_y)` to `(max_x, max_y)`.
pub fn square(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![Polygon::new(
        LineString::from(vec![
            (min_x, min_y),
            (max_x, min_y),
            (max_x, max_y),
            (min_x, max_y),
            (min_x, min_y),
        ]),
        Vec::new(),
    )])
}

/// A point tagged `ncn_milepost=<value>`.
pub fn tagged_point(x: f64, y: f64, value: &str) -> GeometryFeature {
    let tags = Tags::from([(MILEPOST_TAG.to_owned(), value.to_owned())]);
    GeometryFeature::point(Coord { x, y }, tags)
}

/// Projector that scales degrees linearly into metres.
///
/// Easting is `lon * metres_per_degree` and northing is
/// `lat * metres_per_degree`, which keeps canvas expectations easy to
/// compute by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarProjector {
    /// Metres per degree on both axes.
    pub metres_per_degree: f64,
}

impl Default for PlanarProjector {
    fn default() -> Self {
        Self {
            metres_per_degree: 100_000.0,
        }
    }
}

impl GeoProjector for PlanarProjector {
    fn project(&self, lat: f64, lon: f64) -> Result<Coord<f64>, GeometryError> {
        Ok(Coord {
            x: lon * self.metres_per_degree,
            y: lat * self.metres_per_degree,
        })
    }
}

/// Projector that rejects every coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingProjector;

impl GeoProjector for FailingProjector {
    fn project(&self, lat: f64, lon: f64) -> Result<Coord<f64>, GeometryError> {
        Err(GeometryError::Projection {
            lat,
            lon,
            message: "outside projection domain".to_owned(),
        })
    }
}
