//! Unit tests for the shapefile and OSM loaders.

use std::fs;

use geo::{Area, Coord};
use milepost_core::{Crs, Layer, MILEPOST_TAG};
use rstest::rstest;

use super::{LoadError, load_point_features, load_shape_collection};
use crate::fetch::CacheLayout;
use crate::load_all;
use crate::test_support::{
    FixtureCache, FixtureNode, osm_xml, rect_ring, utf8_tempdir, write_point_shapefile,
    write_polygon_shapefile,
};

#[rstest]
fn polygons_load_in_file_order() {
    let (_dir, root) = utf8_tempdir();
    write_polygon_shapefile(
        &root,
        "land",
        &[
            vec![rect_ring(0.0, 0.0, 1.0, 1.0)],
            vec![rect_ring(10.0, 10.0, 12.0, 12.0)],
        ],
    );
    let paths = CacheLayout::new(&root).shape_paths("land");

    let collection = load_shape_collection(&paths, Layer::Land).expect("load should succeed");

    assert_eq!(collection.layer(), Layer::Land);
    assert_eq!(collection.crs(), Crs::Wgs84LonLat);
    let areas: Vec<f64> = collection
        .areas()
        .map(|area| area.unsigned_area())
        .collect();
    assert_eq!(areas.len(), 2);
    assert!((areas[0] - 1.0).abs() < 1e-9);
    assert!((areas[1] - 4.0).abs() < 1e-9);
}

#[rstest]
fn interior_rings_become_holes() {
    let (_dir, root) = utf8_tempdir();
    write_polygon_shapefile(
        &root,
        "lakes",
        &[vec![
            rect_ring(0.0, 0.0, 4.0, 4.0),
            rect_ring(1.0, 1.0, 2.0, 2.0),
        ]],
    );
    let paths = CacheLayout::new(&root).shape_paths("lakes");

    let collection = load_shape_collection(&paths, Layer::Lakes).expect("load should succeed");

    let area = collection.areas().next().expect("one area");
    assert_eq!(area.0.len(), 1);
    assert_eq!(area.0[0].interiors().len(), 1);
    assert!((area.unsigned_area() - 15.0).abs() < 1e-9);
}

#[rstest]
fn point_shapefiles_are_unsupported() {
    let (_dir, root) = utf8_tempdir();
    write_point_shapefile(&root, "points", &[(1.0, 2.0)]);
    let paths = CacheLayout::new(&root).shape_paths("points");

    let err = load_shape_collection(&paths, Layer::Land).expect_err("points are rejected");

    let LoadError::UnsupportedShape { index, .. } = err else {
        panic!("expected an unsupported shape error");
    };
    assert_eq!(index, 0);
}

#[rstest]
fn missing_shapefile_is_reported() {
    let (_dir, root) = utf8_tempdir();
    let paths = CacheLayout::new(&root).shape_paths("absent");

    let err = load_shape_collection(&paths, Layer::Land).expect_err("file is missing");

    assert!(matches!(err, LoadError::Shapefile { .. }));
}

#[rstest]
fn only_tagged_nodes_are_kept() {
    let (_dir, root) = utf8_tempdir();
    let path = root.join("extract.osm");
    let untagged = FixtureNode {
        id: 2,
        lat: 52.0,
        lon: -1.0,
        tags: Vec::new(),
    };
    let other_tag = FixtureNode {
        id: 3,
        lat: 52.5,
        lon: -1.5,
        tags: vec![("amenity".to_owned(), "bench".to_owned())],
    };
    let mut milepost = FixtureNode::milepost(1, 54.25, -2.5, "mccoll");
    milepost
        .tags
        .push(("ref".to_owned(), "NCN 7".to_owned()));
    fs::write(&path, osm_xml(&[milepost, untagged, other_tag])).expect("write extract");

    let collection = load_point_features(&path, MILEPOST_TAG).expect("load should succeed");

    assert_eq!(collection.layer(), Layer::Mileposts);
    assert_eq!(collection.crs(), Crs::Wgs84LonLat);
    let points: Vec<_> = collection.points().collect();
    assert_eq!(points.len(), 1);
    let (location, tags) = points[0];
    assert_eq!(location, Coord { x: -2.5, y: 54.25 });
    assert_eq!(tags.get(MILEPOST_TAG).map(String::as_str), Some("mccoll"));
    assert_eq!(tags.get("ref").map(String::as_str), Some("NCN 7"));
}

#[rstest]
fn escaped_tag_values_are_unescaped() {
    let (_dir, root) = utf8_tempdir();
    let path = root.join("extract.osm");
    fs::write(
        &path,
        r#"<osm><node id="5" lat="51.0" lon="0.5"><tag k="ncn_milepost" v="mills"/><tag k="name" v="Fish &amp; Chips"/></node></osm>"#,
    )
    .expect("write extract");

    let collection = load_point_features(&path, MILEPOST_TAG).expect("load should succeed");

    let (_, tags) = collection.points().next().expect("one point");
    assert_eq!(tags.get("name").map(String::as_str), Some("Fish & Chips"));
}

#[rstest]
#[case::missing_lat(r#"<osm><node id="9" lon="0.5"/></osm>"#)]
#[case::non_numeric(r#"<osm><node id="9" lat="north" lon="0.5"/></osm>"#)]
#[case::out_of_range(r#"<osm><node id="9" lat="91.0" lon="0.5"/></osm>"#)]
fn nodes_need_a_valid_position(#[case] document: &str) {
    let (_dir, root) = utf8_tempdir();
    let path = root.join("extract.osm");
    fs::write(&path, document).expect("write extract");

    let err = load_point_features(&path, MILEPOST_TAG).expect_err("node is invalid");

    let LoadError::InvalidNode { id, .. } = err else {
        panic!("expected an invalid node error");
    };
    assert_eq!(id, "9");
}

#[rstest]
fn malformed_xml_is_reported() {
    let (_dir, root) = utf8_tempdir();
    let path = root.join("extract.osm");
    fs::write(&path, "<osm><node id=\"1\" lat=\"1\" lon=\"1\"></way></osm>")
        .expect("write extract");

    let err = load_point_features(&path, MILEPOST_TAG).expect_err("mismatched end tag");

    assert!(matches!(err, LoadError::Xml { .. }), "got {err:?}");
}

#[rstest]
fn missing_extract_is_reported() {
    let (_dir, root) = utf8_tempdir();

    let err = load_point_features(&root.join("absent.osm"), MILEPOST_TAG)
        .expect_err("file is missing");

    assert!(matches!(err, LoadError::ReadExtract { .. }));
}

#[rstest]
fn load_all_reads_every_layer() {
    let (_dir, root) = utf8_tempdir();
    let manifest = FixtureCache::default()
        .with_shapes(
            crate::ShapeDataset::Land,
            vec![
                vec![rect_ring(-5.0, 50.0, 1.0, 55.0)],
                vec![rect_ring(-10.0, 51.5, -6.0, 55.0)],
            ],
        )
        .with_node(FixtureNode::milepost(1, 53.8, -1.55, "dudgeon"))
        .write(&root);

    let raw = load_all(&manifest).expect("load should succeed");

    assert_eq!(raw.land.len(), 2);
    assert_eq!(raw.minor_islands.len(), 1);
    assert_eq!(raw.lakes.layer(), Layer::Lakes);
    assert_eq!(raw.lakes_europe.layer(), Layer::LakesEurope);
    assert_eq!(raw.urban_areas.layer(), Layer::UrbanAreas);
    assert_eq!(raw.mileposts.len(), 1);
}
