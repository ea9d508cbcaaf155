use geo::MultiPolygon;
use log::debug;
use milepost_core::{Crs, GeometryCollection, GeometryFeature, Layer};
use shapefile::Shape;

use super::LoadError;
use crate::fetch::ShapePaths;

/// Read a cached shapefile pair into a lon/lat collection.
///
/// Each polygon record becomes one area feature in file order. Null shapes
/// are skipped.
///
/// # Errors
/// Returns [`LoadError::Shapefile`] when the pair cannot be read and
/// [`LoadError::UnsupportedShape`] for any non-polygon record.
pub fn load_shape_collection(
    paths: &ShapePaths,
    layer: Layer,
) -> Result<GeometryCollection, LoadError> {
    let shapefile_error = |source| LoadError::Shapefile {
        path: paths.shp.clone(),
        source,
    };
    let mut reader = shapefile::Reader::from_path(&paths.shp).map_err(shapefile_error)?;
    let mut features = Vec::new();
    for (index, entry) in reader.iter_shapes_and_records().enumerate() {
        let (shape, _record) = entry.map_err(shapefile_error)?;
        match shape {
            Shape::Polygon(polygon) => {
                features.push(GeometryFeature::Area(MultiPolygon::<f64>::from(polygon)));
            }
            Shape::NullShape => {}
            other => {
                return Err(LoadError::UnsupportedShape {
                    path: paths.shp.clone(),
                    index,
                    shape_type: format!("{:?}", other.shapetype()),
                });
            }
        }
    }
    debug!("loaded {} {layer} features from {}", features.len(), paths.shp);
    Ok(GeometryCollection::new(layer, Crs::Wgs84LonLat, features))
}
