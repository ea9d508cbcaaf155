//! Loaders turning cached datasets into geometry collections.

mod error;
mod osm;
mod shape;

pub use error::LoadError;
pub use osm::load_point_features;
pub use shape::load_shape_collection;

#[cfg(test)]
mod tests;
