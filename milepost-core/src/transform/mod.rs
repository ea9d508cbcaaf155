//! Pure geometry stages that carry loaded collections onto the canvas.
//!
//! Stages consume a [`GeometryCollection`] and return a new one. They check
//! the coordinate space they are handed and never touch point tags.

mod projector;

pub use projector::{BritishNationalGrid, GeoProjector};

use geo::{BooleanOps, BoundingRect, Coord, MultiPolygon, Rect};

use crate::{
    CanvasFrame, Crs, GeoBounds, GeometryCollection, GeometryError, GeometryFeature, Layer,
    MapFrame,
};

fn require_crs(
    collection: &GeometryCollection,
    stage: &'static str,
    expected: Crs,
) -> Result<(), GeometryError> {
    if collection.crs() == expected {
        Ok(())
    } else {
        Err(GeometryError::UnexpectedCrs {
            stage,
            layer: collection.layer(),
            expected,
            actual: collection.crs(),
        })
    }
}

/// Swap the x and y of every coordinate.
///
/// Toggles between [`Crs::Wgs84LonLat`] and [`Crs::Wgs84LatLon`].
///
/// # Errors
/// Returns [`GeometryError::UnexpectedCrs`] for canvas collections.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use milepost_core::{Crs, GeometryCollection, GeometryFeature, Layer, Tags, swap_axes};
///
/// let points = GeometryCollection::new(
///     Layer::Mileposts,
///     Crs::Wgs84LonLat,
///     vec![GeometryFeature::point(Coord { x: -1.5, y: 53.8 }, Tags::new())],
/// );
/// let swapped = swap_axes(points).expect("lon/lat swaps");
/// assert_eq!(swapped.crs(), Crs::Wgs84LatLon);
/// assert_eq!(swapped.points().next().map(|(c, _)| c), Some(Coord { x: 53.8, y: -1.5 }));
/// ```
pub fn swap_axes(collection: GeometryCollection) -> Result<GeometryCollection, GeometryError> {
    let Some(target) = collection.crs().swapped() else {
        return Err(GeometryError::UnexpectedCrs {
            stage: "swap_axes",
            layer: collection.layer(),
            expected: Crs::Wgs84LonLat,
            actual: collection.crs(),
        });
    };
    let (layer, _, features) = collection.into_parts();
    let swapped = features
        .into_iter()
        .map(|feature| feature.map_coords(|c| Coord { x: c.y, y: c.x }))
        .collect();
    Ok(GeometryCollection::new(layer, target, swapped))
}

fn rect_within(inner: &Rect<f64>, outer: &Rect<f64>) -> bool {
    inner.min().x >= outer.min().x
        && inner.min().y >= outer.min().y
        && inner.max().x <= outer.max().x
        && inner.max().y <= outer.max().y
}

fn rects_overlap(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x
        && b.min().x <= a.max().x
        && a.min().y <= b.max().y
        && b.min().y <= a.max().y
}

fn point_within(point: Coord<f64>, rect: &Rect<f64>) -> bool {
    (rect.min().x..=rect.max().x).contains(&point.x)
        && (rect.min().y..=rect.max().y).contains(&point.y)
}

fn clip_area(geometry: MultiPolygon<f64>, region: &Rect<f64>) -> Option<MultiPolygon<f64>> {
    let bounds = geometry.bounding_rect()?;
    if rect_within(&bounds, region) {
        return Some(geometry);
    }
    if !rects_overlap(&bounds, region) {
        return None;
    }
    let clipped = geometry.intersection(&region.to_polygon());
    if clipped.0.is_empty() {
        None
    } else {
        Some(clipped)
    }
}

/// Intersect every feature with `bounds`, dropping what falls outside.
///
/// Areas fully inside the region are returned untouched. Points on the
/// region boundary are kept.
///
/// # Errors
/// Returns [`GeometryError::UnexpectedCrs`] unless the collection is in
/// [`Crs::Wgs84LatLon`].
pub fn clip_to_region(
    collection: GeometryCollection,
    bounds: &GeoBounds,
) -> Result<GeometryCollection, GeometryError> {
    require_crs(&collection, "clip_to_region", Crs::Wgs84LatLon)?;
    let region = bounds.lat_lon_rect();
    let (layer, crs, features) = collection.into_parts();
    let kept = features
        .into_iter()
        .filter_map(|feature| match feature {
            GeometryFeature::Area(geometry) => {
                clip_area(geometry, &region).map(GeometryFeature::Area)
            }
            GeometryFeature::Point { location, tags } => point_within(location, &region)
                .then_some(GeometryFeature::Point { location, tags }),
        })
        .collect();
    Ok(GeometryCollection::new(layer, crs, kept))
}

/// Remove lake interiors from every land area.
///
/// Each land polygon has the lakes of every collection in `lakes`
/// subtracted one at a time, in order. Land features whose area vanishes
/// are kept as empty geometry so feature positions stay stable.
///
/// # Errors
/// Returns [`GeometryError::UnexpectedCrs`] unless the land and every lake
/// collection are in [`Crs::Wgs84LatLon`].
pub fn subtract_lakes(
    land: GeometryCollection,
    lakes: &[&GeometryCollection],
) -> Result<GeometryCollection, GeometryError> {
    require_crs(&land, "subtract_lakes", Crs::Wgs84LatLon)?;
    for collection in lakes {
        require_crs(collection, "subtract_lakes", Crs::Wgs84LatLon)?;
    }
    let (layer, crs, features) = land.into_parts();
    let subtracted = features
        .into_iter()
        .map(|feature| match feature {
            GeometryFeature::Area(geometry) => GeometryFeature::Area(
                lakes
                    .iter()
                    .flat_map(|collection| collection.areas())
                    .fold(geometry, subtract_one),
            ),
            point @ GeometryFeature::Point { .. } => point,
        })
        .collect();
    Ok(GeometryCollection::new(layer, crs, subtracted))
}

fn subtract_one(land: MultiPolygon<f64>, lake: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let overlapping = match (land.bounding_rect(), lake.bounding_rect()) {
        (Some(a), Some(b)) => rects_overlap(&a, &b),
        _ => false,
    };
    if overlapping { land.difference(lake) } else { land }
}

/// Reproject a latitude/longitude collection onto the canvas.
///
/// Every coordinate is projected with `projector` and then placed by
/// `canvas`.
///
/// # Errors
/// Returns [`GeometryError::UnexpectedCrs`] unless the collection is in
/// [`Crs::Wgs84LatLon`], or the first projection failure.
pub fn project_to_canvas<P>(
    collection: GeometryCollection,
    projector: &P,
    canvas: &CanvasFrame,
) -> Result<GeometryCollection, GeometryError>
where
    P: GeoProjector + ?Sized,
{
    require_crs(&collection, "project_to_canvas", Crs::Wgs84LatLon)?;
    let (layer, _, features) = collection.into_parts();
    let projected = features
        .into_iter()
        .map(|feature| {
            feature.try_map_coords(|c| {
                projector
                    .project(c.x, c.y)
                    .map(|grid| canvas.to_canvas(grid))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(GeometryCollection::new(layer, Crs::Canvas, projected))
}

/// Collections exactly as loaded from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLayers {
    /// Land polygons.
    pub land: GeometryCollection,
    /// Minor island polygons.
    pub minor_islands: GeometryCollection,
    /// Global lakes.
    pub lakes: GeometryCollection,
    /// Supplementary European lakes.
    pub lakes_europe: GeometryCollection,
    /// Urban area polygons.
    pub urban_areas: GeometryCollection,
    /// Tagged milepost points.
    pub mileposts: GeometryCollection,
}

/// Collections ready to draw, all in [`Crs::Canvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasLayers {
    /// Land with lakes removed.
    pub land: GeometryCollection,
    /// Minor island polygons.
    pub minor_islands: GeometryCollection,
    /// Urban area polygons.
    pub urban_areas: GeometryCollection,
    /// Tagged milepost points.
    pub mileposts: GeometryCollection,
}

impl CanvasLayers {
    /// An empty set of layers.
    pub const fn empty() -> Self {
        Self {
            land: GeometryCollection::new(Layer::Land, Crs::Canvas, Vec::new()),
            minor_islands: GeometryCollection::new(Layer::MinorIslands, Crs::Canvas, Vec::new()),
            urban_areas: GeometryCollection::new(Layer::UrbanAreas, Crs::Canvas, Vec::new()),
            mileposts: GeometryCollection::new(Layer::Mileposts, Crs::Canvas, Vec::new()),
        }
    }
}

fn swap_and_clip(
    collection: GeometryCollection,
    bounds: &GeoBounds,
) -> Result<GeometryCollection, GeometryError> {
    clip_to_region(swap_axes(collection)?, bounds)
}

/// Run every stage over the loaded layers.
///
/// All collections are swapped into latitude/longitude order and clipped.
/// Lakes are subtracted from land only, then the drawable layers are
/// projected onto the canvas.
///
/// # Errors
/// Propagates the first [`GeometryError`] raised by any stage.
pub fn prepare_layers<P>(
    raw: RawLayers,
    frame: &MapFrame,
    projector: &P,
) -> Result<CanvasLayers, GeometryError>
where
    P: GeoProjector + ?Sized,
{
    let RawLayers {
        land,
        minor_islands,
        lakes,
        lakes_europe,
        urban_areas,
        mileposts,
    } = raw;
    let clip = &frame.clip;
    let lakes_clipped = swap_and_clip(lakes, clip)?;
    let lakes_europe_clipped = swap_and_clip(lakes_europe, clip)?;
    let dry_land = subtract_lakes(
        swap_and_clip(land, clip)?,
        &[&lakes_clipped, &lakes_europe_clipped],
    )?;
    let canvas = &frame.canvas;
    Ok(CanvasLayers {
        land: project_to_canvas(dry_land, projector, canvas)?,
        minor_islands: project_to_canvas(swap_and_clip(minor_islands, clip)?, projector, canvas)?,
        urban_areas: project_to_canvas(swap_and_clip(urban_areas, clip)?, projector, canvas)?,
        mileposts: project_to_canvas(swap_and_clip(mileposts, clip)?, projector, canvas)?,
    })
}
