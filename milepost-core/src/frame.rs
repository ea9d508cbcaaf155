//! Geographic bounds and the canvas frame the map is drawn into.

use geo::{Coord, Rect};

/// A latitude/longitude bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Southern latitude.
    pub south: f64,
    /// Western longitude.
    pub west: f64,
    /// Northern latitude.
    pub north: f64,
    /// Eastern longitude.
    pub east: f64,
}

impl GeoBounds {
    /// Area queried for mileposts: the United Kingdom and Ireland.
    pub const UK_AND_IRELAND: Self = Self::new(49.9599, -8.1956, 60.8842, 1.7746);

    /// Area background geometry is clipped to.
    pub const BRITISH_ISLES_CLIP: Self = Self::new(48.0, -12.0, 62.0, 4.0);

    /// Construct bounds from the south, west, north and east edges.
    pub const fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// The bounds as a rectangle in latitude/longitude axis order.
    pub fn lat_lon_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.south,
                y: self.west,
            },
            Coord {
                x: self.north,
                y: self.east,
            },
        )
    }

    /// Format the bounds as an Overpass QL bounding box.
    ///
    /// # Examples
    /// ```
    /// use milepost_core::GeoBounds;
    ///
    /// assert_eq!(
    ///     GeoBounds::UK_AND_IRELAND.to_overpass_bbox(),
    ///     "49.959900,-8.195600,60.884200,1.774600",
    /// );
    /// ```
    pub fn to_overpass_bbox(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6},{:.6}",
            self.south, self.west, self.north, self.east
        )
    }
}

/// Mapping from British National Grid metres onto output pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    /// Canvas width in pixels.
    pub width_px: f64,
    /// Canvas height in pixels.
    pub height_px: f64,
    /// Ground distance spanned by the canvas width, in metres.
    pub geo_width_m: f64,
    /// Easting and northing of the canvas top-left corner.
    pub origin: Coord<f64>,
}

impl Default for CanvasFrame {
    fn default() -> Self {
        Self {
            width_px: 720.0,
            height_px: 1180.0,
            geo_width_m: 800_000.0,
            origin: Coord {
                x: -80_000.0,
                y: 1_225_000.0,
            },
        }
    }
}

impl CanvasFrame {
    /// Pixels per metre.
    pub fn scale(&self) -> f64 {
        self.width_px / self.geo_width_m
    }

    /// Map an easting/northing onto the canvas, flipping the y axis.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use milepost_core::CanvasFrame;
    ///
    /// let frame = CanvasFrame::default();
    /// let corner = frame.to_canvas(Coord { x: 720_000.0, y: 1_225_000.0 });
    /// assert!((corner.x - 720.0).abs() < 1e-9);
    /// assert!(corner.y.abs() < 1e-9);
    /// ```
    pub fn to_canvas(&self, grid: Coord<f64>) -> Coord<f64> {
        let scale = self.scale();
        Coord {
            x: (grid.x - self.origin.x) * scale,
            y: (self.origin.y - grid.y) * scale,
        }
    }
}

/// Everything the transform pipeline needs to place geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    /// Region background geometry is clipped to.
    pub clip: GeoBounds,
    /// Target canvas.
    pub canvas: CanvasFrame,
}

impl Default for MapFrame {
    fn default() -> Self {
        Self {
            clip: GeoBounds::BRITISH_ISLES_CLIP,
            canvas: CanvasFrame::default(),
        }
    }
}
