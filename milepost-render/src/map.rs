//! Composition of the full map document.

use geo::Coord;
use jiff::civil::Date;
use log::info;
use milepost_core::{CanvasFrame, CanvasLayers, ColorMode};
use svg::Document;
use svg::node::element::{Group, Rectangle};

use crate::draw::{area_group, milepost_group};
use crate::legend::legend_group;
use crate::text::TextStyle;

/// Heading drawn in the top-left corner.
pub const TITLE: &str = "Millennium Mileposts in the United Kingdom by Type";

/// Inset of every text block from the canvas edge.
pub const TEXT_MARGIN: f64 = 40.0;

/// Width the title wraps at.
const TITLE_WIDTH: f64 = 300.0;

/// Space between the title and the legend.
const LEGEND_GAP: f64 = 20.0;

/// Everything [`render_map`] needs besides the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Colour scheme.
    pub mode: ColorMode,
    /// Canvas dimensions.
    pub canvas: CanvasFrame,
    /// Date printed in the "Last Updated" stamp.
    pub date: Date,
}

impl RenderOptions {
    /// Options stamped with today's date in the system time zone.
    pub fn today(mode: ColorMode, canvas: CanvasFrame) -> Self {
        Self {
            mode,
            canvas,
            date: jiff::Zoned::now().date(),
        }
    }
}

/// File name of the rendered map for `mode`, e.g. `map-dark.svg`.
pub fn map_file_name(mode: ColorMode) -> String {
    format!("map-{mode}.svg")
}

fn date_stamp(date: Date) -> String {
    format!("Last Updated: {}", date.strftime("%Y-%m-%d"))
}

/// Draw `layers` into an SVG document.
///
/// Layers are painted bottom to top: background, land and minor islands,
/// urban areas, milepost symbols, then the title, date stamp and legend.
/// Mileposts without a recognised category are not drawn.
pub fn render_map(layers: &CanvasLayers, options: &RenderOptions) -> Document {
    let palette = options.mode.palette();
    let width = options.canvas.width_px;
    let height = options.canvas.height_px;

    let background = Rectangle::new()
        .set("id", "background")
        .set("x", 0)
        .set("y", 0)
        .set("width", width)
        .set("height", height)
        .set("fill", palette.background.to_string());
    let land = area_group(
        "land",
        &[&layers.land, &layers.minor_islands],
        &palette.land_style(),
    );
    let urban = area_group("urban-areas", &[&layers.urban_areas], &palette.urban_style());
    let (mileposts, drawn) = milepost_group(&layers.mileposts);

    let title_style = TextStyle::TITLE;
    let title_lines = title_style.wrap(TITLE, TITLE_WIDTH);
    let line_pitch = title_style.line_height() + title_style.spacing_px;
    let title = title_lines
        .iter()
        .zip(0_u32..)
        .fold(Group::new().set("id", "title"), |group, (line, index)| {
            let top = TEXT_MARGIN + f64::from(index) * line_pitch;
            group.add(title_style.text(line, TEXT_MARGIN, top, palette.text))
        });

    let date_style = TextStyle::BODY;
    let date = date_style
        .text(
            &date_stamp(options.date),
            TEXT_MARGIN,
            height - date_style.line_height() - TEXT_MARGIN,
            palette.text,
        )
        .set("id", "last-updated");

    let legend_origin = Coord {
        x: TEXT_MARGIN,
        y: TEXT_MARGIN + title_style.block_height(title_lines.len()) + LEGEND_GAP,
    };
    let legend = legend_group(legend_origin, palette.text);

    info!(
        "rendered {} map with {drawn} of {} mileposts",
        options.mode,
        layers.mileposts.len()
    );
    Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height))
        .add(background)
        .add(land)
        .add(urban)
        .add(mileposts)
        .add(title)
        .add(date)
        .add(legend)
}
