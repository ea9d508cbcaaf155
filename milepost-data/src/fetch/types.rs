//! Dataset identifiers, cache layout and fetch settings.

use std::fmt;
use std::num::NonZeroU32;

use camino::{Utf8Path, Utf8PathBuf};
use milepost_core::{GeoBounds, Layer, MILEPOST_TAG};
use url::Url;

use super::FetchError;

/// Default Natural Earth download root.
pub const NATURAL_EARTH_BASE_URL: &str = "https://naturalearth.s3.amazonaws.com/";

/// Default Overpass API interpreter endpoint.
pub const OVERPASS_URL: &str = "http://overpass-api.de/api/interpreter";

/// File name of the cached point extract.
pub const POINT_EXTRACT_FILE: &str = "mileposts.osm";

/// The Natural Earth 1:10m shapefiles the map is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeDataset {
    /// Land polygons.
    Land,
    /// Minor islands.
    MinorIslands,
    /// Global lakes.
    Lakes,
    /// Supplementary European lakes.
    LakesEurope,
    /// Urban areas.
    UrbanAreas,
}

impl ShapeDataset {
    /// Datasets in fetch order.
    pub const ALL: [Self; 5] = [
        Self::Land,
        Self::MinorIslands,
        Self::Lakes,
        Self::LakesEurope,
        Self::UrbanAreas,
    ];

    /// Archive path relative to the Natural Earth root.
    pub const fn archive_path(self) -> &'static str {
        match self {
            Self::Land => "10m_physical/ne_10m_land.zip",
            Self::MinorIslands => "10m_physical/ne_10m_minor_islands.zip",
            Self::Lakes => "10m_physical/ne_10m_lakes.zip",
            Self::LakesEurope => "10m_physical/ne_10m_lakes_europe.zip",
            Self::UrbanAreas => "10m_cultural/ne_10m_urban_areas.zip",
        }
    }

    /// Layer the dataset loads into.
    pub const fn layer(self) -> Layer {
        match self {
            Self::Land => Layer::Land,
            Self::MinorIslands => Layer::MinorIslands,
            Self::Lakes => Layer::Lakes,
            Self::LakesEurope => Layer::LakesEurope,
            Self::UrbanAreas => Layer::UrbanAreas,
        }
    }

    /// Full archive URL beneath `base`.
    ///
    /// # Examples
    /// ```
    /// use milepost_data::fetch::{NATURAL_EARTH_BASE_URL, ShapeDataset};
    ///
    /// assert_eq!(
    ///     ShapeDataset::UrbanAreas.url(NATURAL_EARTH_BASE_URL),
    ///     "https://naturalearth.s3.amazonaws.com/10m_cultural/ne_10m_urban_areas.zip",
    /// );
    /// ```
    pub fn url(self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.archive_path())
    }
}

impl fmt::Display for ShapeDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.layer().as_str())
    }
}

/// Derive the cache stem from an archive URL.
///
/// The stem is the final path segment up to its first `.`.
///
/// # Examples
/// ```
/// use milepost_data::fetch::cache_stem;
///
/// assert_eq!(cache_stem("https://example.org/10m_physical/ne_10m_land.zip"), Some("ne_10m_land"));
/// assert_eq!(cache_stem("https://example.org/"), None);
/// ```
pub fn cache_stem(url: &str) -> Option<&str> {
    let segment = url.rsplit('/').next()?;
    let stem = segment.split('.').next()?;
    (!stem.is_empty()).then_some(stem)
}

/// Cached `.shp`/`.dbf` pair for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapePaths {
    /// Geometry file.
    pub shp: Utf8PathBuf,
    /// Attribute table.
    pub dbf: Utf8PathBuf,
}

/// Layout of files beneath the cache root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    root: Utf8PathBuf,
}

impl CacheLayout {
    /// Construct a layout rooted at `root`.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache root directory.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Locations of the shapefile pair for `stem`.
    pub fn shape_paths(&self, stem: &str) -> ShapePaths {
        ShapePaths {
            shp: self.root.join(format!("{stem}.shp")),
            dbf: self.root.join(format!("{stem}.dbf")),
        }
    }

    /// Location of the OSM point extract.
    pub fn point_extract(&self) -> Utf8PathBuf {
        self.root.join(POINT_EXTRACT_FILE)
    }
}

/// How many times a download is attempted before giving up.
///
/// Failed attempts are retried immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: NonZeroU32,
}

impl RetryPolicy {
    /// Five attempts, used for shapefile archives.
    pub const SHAPE_DEFAULT: Self = Self::from_non_zero(NonZeroU32::new(5));
    /// A single attempt, used for the point query.
    pub const QUERY_DEFAULT: Self = Self::from_non_zero(NonZeroU32::new(1));

    const fn from_non_zero(attempts: Option<NonZeroU32>) -> Self {
        match attempts {
            Some(attempts) => Self { attempts },
            None => Self { attempts: NonZeroU32::MIN },
        }
    }

    /// Allow `attempts` attempts in total.
    pub const fn new(attempts: NonZeroU32) -> Self {
        Self { attempts }
    }

    /// Total number of attempts.
    pub const fn attempts(self) -> u32 {
        self.attempts.get()
    }
}

/// Overpass QL query selecting tagged nodes inside a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct PointQuery {
    /// Tag key a node must carry.
    pub tag: String,
    /// Area to search.
    pub bounds: GeoBounds,
    /// Server-side timeout in seconds.
    pub timeout_secs: u32,
}

impl Default for PointQuery {
    fn default() -> Self {
        Self {
            tag: MILEPOST_TAG.to_owned(),
            bounds: GeoBounds::UK_AND_IRELAND,
            timeout_secs: 25,
        }
    }
}

impl PointQuery {
    /// Render the query as Overpass QL.
    ///
    /// # Examples
    /// ```
    /// use milepost_data::fetch::PointQuery;
    ///
    /// assert_eq!(
    ///     PointQuery::default().to_overpass_ql(),
    ///     "[timeout:25];(node[ncn_milepost](49.959900,-8.195600,60.884200,1.774600););out;",
    /// );
    /// ```
    pub fn to_overpass_ql(&self) -> String {
        format!(
            "[timeout:{}];(node[{}]({}););out;",
            self.timeout_secs,
            self.tag,
            self.bounds.to_overpass_bbox()
        )
    }

    /// Request URL sending the query as the form-encoded `data` parameter.
    ///
    /// # Errors
    /// Returns [`FetchError::Query`] when `endpoint` is not a valid URL.
    pub fn request_url(&self, endpoint: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(endpoint, [("data", self.to_overpass_ql())]).map_err(|source| {
            FetchError::Query {
                endpoint: endpoint.to_owned(),
                source,
            }
        })
    }
}

/// Endpoints and retry policies for a full cache fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    /// Natural Earth download root.
    pub natural_earth_url: String,
    /// Overpass interpreter endpoint.
    pub overpass_url: String,
    /// Point query to run.
    pub query: PointQuery,
    /// Retry policy for shapefile archives.
    pub shape_retry: RetryPolicy,
    /// Retry policy for the point query.
    pub query_retry: RetryPolicy,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            natural_earth_url: NATURAL_EARTH_BASE_URL.to_owned(),
            overpass_url: OVERPASS_URL.to_owned(),
            query: PointQuery::default(),
            shape_retry: RetryPolicy::SHAPE_DEFAULT,
            query_retry: RetryPolicy::QUERY_DEFAULT,
        }
    }
}

/// Resolved cache paths for every dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheManifest {
    /// Land shapefile.
    pub land: ShapePaths,
    /// Minor islands shapefile.
    pub minor_islands: ShapePaths,
    /// Global lakes shapefile.
    pub lakes: ShapePaths,
    /// European lakes shapefile.
    pub lakes_europe: ShapePaths,
    /// Urban areas shapefile.
    pub urban_areas: ShapePaths,
    /// OSM point extract.
    pub mileposts: Utf8PathBuf,
}

impl CacheManifest {
    /// Shapefile pair for `dataset`.
    pub const fn shapes(&self, dataset: ShapeDataset) -> &ShapePaths {
        match dataset {
            ShapeDataset::Land => &self.land,
            ShapeDataset::MinorIslands => &self.minor_islands,
            ShapeDataset::Lakes => &self.lakes,
            ShapeDataset::LakesEurope => &self.lakes_europe,
            ShapeDataset::UrbanAreas => &self.urban_areas,
        }
    }
}
