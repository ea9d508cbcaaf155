//! The category key drawn beneath the title.

use geo::Coord;
use milepost_core::{Color, DrawStyle, MilepostCategory};
use svg::node::element::Group;

use crate::draw::marker;
use crate::text::TextStyle;

/// Horizontal distance between legend columns.
pub const COLUMN_GAP: f64 = 100.0;
/// Vertical distance between legend rows.
pub const ROW_GAP: f64 = 32.0;
/// Diameter of the filled swatch.
const SWATCH_DIAMETER: f64 = 12.0;
/// Diameter of the ring drawn around the swatch.
const RING_DIAMETER: f64 = 13.0;
const RING_WIDTH: f64 = 1.0;

/// Categories per legend row.
const COLUMNS: usize = 2;

/// Draw the 2×2 category key with its top-left corner at `origin`.
pub fn legend_group(origin: Coord<f64>, text_color: Color) -> Group {
    let style = TextStyle::BODY;
    // Swatches sit slightly above the middle of the label's line box.
    let swatch_offset = style.line_height() / 2.5;
    let swatch_radius = SWATCH_DIAMETER / 2.0;

    let mut group = Group::new().set("id", "legend");
    let mut row_y = origin.y;
    for row in MilepostCategory::DRAWN.chunks(COLUMNS) {
        let mut column_x = origin.x;
        for &category in row {
            let colors = category.colors();
            let centre = Coord {
                x: column_x + swatch_radius,
                y: row_y + swatch_offset,
            };
            let ring = DrawStyle {
                fill: colors.fill,
                stroke: colors.stroke,
                stroke_width: RING_WIDTH,
            };
            group = group
                .add(marker(centre, SWATCH_DIAMETER, &DrawStyle::filled(colors.fill)))
                .add(marker(centre, RING_DIAMETER, &ring).set("fill", "none"))
                .add(style.text(
                    category.label(),
                    centre.x + SWATCH_DIAMETER,
                    row_y,
                    text_color,
                ));
            column_x += COLUMN_GAP;
        }
        row_y += ROW_GAP;
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn legend_lists_every_category_in_order() {
        let rendered = legend_group(Coord { x: 40.0, y: 100.0 }, Color::BLACK).to_string();

        let positions: Vec<usize> = ["Mills", "Rowe", "McColl", "Dudgeon"]
            .iter()
            .map(|label| rendered.find(label).expect("label is drawn"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(rendered.matches("<circle").count(), 8);
    }

    #[rstest]
    fn swatches_are_ringed_with_the_category_stroke() {
        let rendered = legend_group(Coord { x: 40.0, y: 100.0 }, Color::BLACK).to_string();

        assert_eq!(rendered.matches(r#"stroke-width="1""#).count(), 4);
        assert_eq!(rendered.matches(r#"fill="none""#).count(), 4);
    }
}
