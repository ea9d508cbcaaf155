//! Fetch-and-cache for the Natural Earth shapefiles and the Overpass point
//! extract.
//!
//! Presence on disk is validity: a dataset found in the cache is never
//! downloaded again. Files only appear in the cache once complete.

mod error;
mod ops;
mod source;
mod types;

#[cfg(any(test, feature = "test-support"))]
mod test_support;
#[cfg(any(test, feature = "test-support"))]
pub use test_support::{StubSource, block_on_for_tests};

pub use error::{FetchError, TransportError};
pub use ops::{fetch_all, fetch_point_features, fetch_shape};
pub use source::{DEFAULT_USER_AGENT, DatasetSource, HttpDatasetSource};
pub use types::{
    CacheLayout, CacheManifest, FetchOptions, NATURAL_EARTH_BASE_URL, OVERPASS_URL,
    POINT_EXTRACT_FILE, PointQuery, RetryPolicy, ShapeDataset, ShapePaths, cache_stem,
};
