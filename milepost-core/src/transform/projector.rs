//! Reprojection from WGS84 degrees into a projected grid.

use std::fmt;

use geo::Coord;
use proj4rs::proj::Proj;

use crate::GeometryError;

/// Converts a WGS84 latitude/longitude into projected grid metres.
///
/// The returned coordinate is `(easting, northing)`.
pub trait GeoProjector {
    /// Project a position given in degrees.
    fn project(&self, lat: f64, lon: f64) -> Result<Coord<f64>, GeometryError>;
}

const WGS84_DEFINITION: &str = "+proj=longlat +datum=WGS84 +no_defs";

// EPSG:27700 with the OSGB36 seven-parameter shift.
const OSGB36_DEFINITION: &str = "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 \
     +x_0=400000 +y_0=-100000 +ellps=airy \
     +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489 +units=m +no_defs";

/// Projects WGS84 (EPSG:4326) onto the British National Grid (EPSG:27700).
pub struct BritishNationalGrid {
    source: Proj,
    target: Proj,
}

impl BritishNationalGrid {
    /// Build the projection pair.
    ///
    /// # Errors
    /// Returns [`GeometryError::ProjectionSetup`] when either definition is
    /// rejected by the projection library.
    pub fn new() -> Result<Self, GeometryError> {
        Ok(Self {
            source: parse_definition(WGS84_DEFINITION)?,
            target: parse_definition(OSGB36_DEFINITION)?,
        })
    }
}

fn parse_definition(definition: &'static str) -> Result<Proj, GeometryError> {
    Proj::from_proj_string(definition).map_err(|err| GeometryError::ProjectionSetup {
        definition,
        message: err.to_string(),
    })
}

impl fmt::Debug for BritishNationalGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BritishNationalGrid")
            .field("source", &WGS84_DEFINITION)
            .field("target", &OSGB36_DEFINITION)
            .finish()
    }
}

impl GeoProjector for BritishNationalGrid {
    fn project(&self, lat: f64, lon: f64) -> Result<Coord<f64>, GeometryError> {
        let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
        proj4rs::transform::transform(&self.source, &self.target, &mut point).map_err(|err| {
            GeometryError::Projection {
                lat,
                lon,
                message: err.to_string(),
            }
        })?;
        let (easting, northing, _) = point;
        if !easting.is_finite() || !northing.is_finite() {
            return Err(GeometryError::Projection {
                lat,
                lon,
                message: "projected coordinate is not finite".to_owned(),
            });
        }
        Ok(Coord {
            x: easting,
            y: northing,
        })
    }
}
