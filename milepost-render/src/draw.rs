//! Shape drawing: filled polygons and milepost markers.

use geo::{Coord, LineString, MultiPolygon};
use milepost_core::category::MARKER_DIAMETER;
use milepost_core::{DrawStyle, GeometryCollection, MilepostCategory};
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path};

fn point(coord: Coord<f64>) -> (f32, f32) {
    (coord.x as f32, coord.y as f32)
}

fn trace_ring(mut data: Data, ring: &LineString<f64>) -> Data {
    let mut coords = ring.coords().copied();
    let Some(first) = coords.next() else {
        return data;
    };
    data = data.move_to(point(first));
    for coord in coords {
        data = data.line_to(point(coord));
    }
    data.close()
}

/// Path data tracing every ring of `geometry` as its own subpath.
pub fn area_data(geometry: &MultiPolygon<f64>) -> Data {
    geometry.iter().fold(Data::new(), |data, polygon| {
        let data = trace_ring(data, polygon.exterior());
        polygon.interiors().iter().fold(data, trace_ring)
    })
}

/// Apply fill and optional stroke attributes.
fn styled<T: svg::Node>(mut element: T, style: &DrawStyle) -> T {
    element.assign("fill", style.fill.to_string());
    match style.stroke {
        Some(stroke) => {
            element.assign("stroke", stroke.to_string());
            element.assign("stroke-width", style.stroke_width);
        }
        None => element.assign("stroke", "none"),
    }
    element
}

/// Draw every area of the given collections into a group with `id`.
///
/// Empty geometry is skipped so the group never holds a path without data.
pub fn area_group(id: &str, collections: &[&GeometryCollection], style: &DrawStyle) -> Group {
    collections
        .iter()
        .flat_map(|collection| collection.areas())
        .filter(|geometry| !geometry.0.is_empty())
        .fold(
            Group::new()
                .set("id", id)
                .set("stroke-linejoin", "round"),
            |group, geometry| {
                let path = Path::new()
                    .set("d", area_data(geometry))
                    .set("fill-rule", "evenodd");
                group.add(styled(path, style))
            },
        )
}

/// A filled and stroked circle of `diameter` centred on `centre`.
pub fn marker(centre: Coord<f64>, diameter: f64, style: &DrawStyle) -> Circle {
    let circle = Circle::new()
        .set("cx", centre.x)
        .set("cy", centre.y)
        .set("r", diameter / 2.0);
    styled(circle, style)
}

/// Draw one circle per milepost whose category resolves.
///
/// Points with a missing or unrecognised category are skipped.
pub fn milepost_group(mileposts: &GeometryCollection) -> (Group, usize) {
    let mut group = Group::new().set("id", "mileposts");
    let mut drawn = 0;
    for (location, tags) in mileposts.points() {
        let Some(category) = MilepostCategory::from_tags(tags) else {
            continue;
        };
        group = group.add(
            marker(location, MARKER_DIAMETER, &category.colors())
                .set("class", category.as_str()),
        );
        drawn += 1;
    }
    (group, drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use milepost_core::test_support::square;
    use milepost_core::{Color, Crs, GeometryFeature, Layer};
    use rstest::rstest;

    #[rstest]
    fn holes_become_extra_subpaths() {
        let outer = square(0.0, 0.0, 10.0, 10.0);
        let hole = square(2.0, 2.0, 4.0, 4.0);
        let polygon = geo::Polygon::new(
            outer.0[0].exterior().clone(),
            vec![hole.0[0].exterior().clone()],
        );
        let data = area_data(&MultiPolygon::new(vec![polygon]));

        let closes = data
            .iter()
            .filter(|command| matches!(command, svg::node::element::path::Command::Close))
            .count();
        assert_eq!(closes, 2);
    }

    #[rstest]
    fn unfilled_style_has_no_stroke() {
        let collection = GeometryCollection::new(
            Layer::Land,
            Crs::Canvas,
            vec![GeometryFeature::area(square(0.0, 0.0, 1.0, 1.0))],
        );
        let group = area_group("land", &[&collection], &DrawStyle::filled(Color::WHITE));

        let rendered = group.to_string();
        assert!(rendered.contains(r##"fill="#ffffff""##), "{rendered}");
        assert!(rendered.contains(r#"stroke="none""#), "{rendered}");
        assert!(rendered.contains(r#"fill-rule="evenodd""#), "{rendered}");
    }
}
