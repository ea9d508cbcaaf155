//! Geometry features and the collections that carry them between stages.

use std::collections::BTreeMap;
use std::fmt;

use geo::{Coord, MapCoords, MultiPolygon};

/// OpenStreetMap-style key/value tags attached to point features.
pub type Tags = BTreeMap<String, String>;

/// Semantic class of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Natural Earth land polygons.
    Land,
    /// Natural Earth minor islands.
    MinorIslands,
    /// Natural Earth global lakes.
    Lakes,
    /// Natural Earth supplementary European lakes.
    LakesEurope,
    /// Natural Earth urban areas.
    UrbanAreas,
    /// Millennium Milepost nodes from OpenStreetMap.
    Mileposts,
}

impl Layer {
    /// Return the layer as a lowercase identifier.
    ///
    /// # Examples
    /// ```
    /// use milepost_core::Layer;
    ///
    /// assert_eq!(Layer::UrbanAreas.as_str(), "urban-areas");
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::MinorIslands => "minor-islands",
            Self::Lakes => "lakes",
            Self::LakesEurope => "lakes-europe",
            Self::UrbanAreas => "urban-areas",
            Self::Mileposts => "mileposts",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinate space of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crs {
    /// WGS84 degrees with `x = longitude`, `y = latitude`, as stored on disk.
    Wgs84LonLat,
    /// WGS84 degrees with `x = latitude`, `y = longitude`.
    Wgs84LatLon,
    /// Output-device pixels with the origin at the top-left corner.
    Canvas,
}

impl Crs {
    /// The space reached by swapping axes, if any.
    pub const fn swapped(self) -> Option<Self> {
        match self {
            Self::Wgs84LonLat => Some(Self::Wgs84LatLon),
            Self::Wgs84LatLon => Some(Self::Wgs84LonLat),
            Self::Canvas => None,
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wgs84LonLat => "WGS84 lon/lat",
            Self::Wgs84LatLon => "WGS84 lat/lon",
            Self::Canvas => "canvas",
        })
    }
}

/// A single polygonal area or a tagged point.
///
/// Every coordinate transform must carry the tags of a [`GeometryFeature::Point`]
/// through unchanged; renderers resolve milepost categories from them.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use milepost_core::{GeometryFeature, Tags};
///
/// let tags = Tags::from([("ncn_milepost".to_owned(), "rowe".to_owned())]);
/// let point = GeometryFeature::point(Coord { x: -3.2, y: 55.9 }, tags);
/// let moved = point.map_coords(|c| Coord { x: c.y, y: c.x });
/// assert_eq!(
///     moved.tags().and_then(|t| t.get("ncn_milepost")).map(String::as_str),
///     Some("rowe"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryFeature {
    /// Polygon or multi-polygon geometry without tags.
    Area(MultiPolygon<f64>),
    /// A point carrying its originating OSM tags.
    Point {
        /// Position of the point.
        location: Coord<f64>,
        /// Tags of the originating OSM node.
        tags: Tags,
    },
}

impl GeometryFeature {
    /// Construct an area feature from polygonal geometry.
    pub fn area(geometry: impl Into<MultiPolygon<f64>>) -> Self {
        Self::Area(geometry.into())
    }

    /// Construct a tagged point feature.
    pub const fn point(location: Coord<f64>, tags: Tags) -> Self {
        Self::Point { location, tags }
    }

    /// Tags carried by a point feature.
    pub const fn tags(&self) -> Option<&Tags> {
        match self {
            Self::Area(_) => None,
            Self::Point { tags, .. } => Some(tags),
        }
    }

    /// Apply `func` to every coordinate, keeping tags intact.
    #[must_use]
    pub fn map_coords(self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        match self {
            Self::Area(geometry) => Self::Area(geometry.map_coords(func)),
            Self::Point { location, tags } => Self::Point {
                location: func(location),
                tags,
            },
        }
    }

    /// Apply a fallible `func` to every coordinate, keeping tags intact.
    pub fn try_map_coords<E>(
        self,
        func: impl Fn(Coord<f64>) -> Result<Coord<f64>, E> + Copy,
    ) -> Result<Self, E> {
        match self {
            Self::Area(geometry) => geometry.try_map_coords(func).map(Self::Area),
            Self::Point { location, tags } => Ok(Self::Point {
                location: func(location)?,
                tags,
            }),
        }
    }
}

/// Ordered features of one layer in one coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    layer: Layer,
    crs: Crs,
    features: Vec<GeometryFeature>,
}

impl GeometryCollection {
    /// Construct a collection from its parts.
    pub const fn new(layer: Layer, crs: Crs, features: Vec<GeometryFeature>) -> Self {
        Self {
            layer,
            crs,
            features,
        }
    }

    /// Semantic class of the collection.
    pub const fn layer(&self) -> Layer {
        self.layer
    }

    /// Coordinate space of the collection.
    pub const fn crs(&self) -> Crs {
        self.crs
    }

    /// Features in their original order.
    pub fn features(&self) -> &[GeometryFeature] {
        &self.features
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over the polygonal features.
    pub fn areas(&self) -> impl Iterator<Item = &MultiPolygon<f64>> {
        self.features.iter().filter_map(|feature| match feature {
            GeometryFeature::Area(geometry) => Some(geometry),
            GeometryFeature::Point { .. } => None,
        })
    }

    /// Iterate over point features with their tags.
    pub fn points(&self) -> impl Iterator<Item = (Coord<f64>, &Tags)> {
        self.features.iter().filter_map(|feature| match feature {
            GeometryFeature::Area(_) => None,
            GeometryFeature::Point { location, tags } => Some((*location, tags)),
        })
    }

    /// Split the collection into its parts.
    pub fn into_parts(self) -> (Layer, Crs, Vec<GeometryFeature>) {
        (self.layer, self.crs, self.features)
    }
}
