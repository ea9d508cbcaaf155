//! SVG rendering for the milepost map.
//!
//! [`render_map`] turns canvas-space layers into an [`svg::Document`];
//! [`write_document`] persists it atomically. Geometry must already be in
//! canvas pixels with the origin at the top-left corner.
#![forbid(unsafe_code)]

mod draw;
mod error;
mod legend;
mod map;
mod text;
mod write;

pub use draw::{area_data, area_group, marker, milepost_group};
pub use error::RenderError;
pub use legend::legend_group;
pub use map::{RenderOptions, TEXT_MARGIN, TITLE, map_file_name, render_map};
pub use text::{FONT_FAMILY, FontWeight, TextStyle};
pub use write::write_document;
