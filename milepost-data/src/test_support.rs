//! Fixture builders for shapefiles, zip archives and OSM extracts.
//!
//! Shared by the unit tests here and by downstream crates through the
//! `test-support` feature.

use std::fs;
use std::io::{Cursor, Write};

use camino::{Utf8Path, Utf8PathBuf};
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing};

use crate::fetch::{CacheLayout, CacheManifest, POINT_EXTRACT_FILE, ShapeDataset, cache_stem};

/// A polygon ring given as `(lon, lat)` pairs.
pub type Ring = Vec<(f64, f64)>;

/// Axis-aligned `(lon, lat)` ring from the western, southern, eastern and
/// northern edges.
pub fn rect_ring(west: f64, south: f64, east: f64, north: f64) -> Ring {
    vec![
        (west, south),
        (west, north),
        (east, north),
        (east, south),
        (west, south),
    ]
}

fn to_points(ring: &[(f64, f64)]) -> Vec<Point> {
    ring.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn name_table() -> TableWriterBuilder {
    let field = FieldName::try_from("name").expect("valid dBase field name");
    TableWriterBuilder::new().add_character_field(field, 32)
}

fn named_record(index: usize) -> Record {
    let mut record = Record::default();
    record.insert(
        "name".to_owned(),
        FieldValue::Character(Some(format!("feature {index}"))),
    );
    record
}

/// Write a polygon shapefile at `<dir>/<stem>.shp` (plus `.shx`/`.dbf`).
///
/// Each entry of `polygons` is an exterior ring followed by its holes.
pub fn write_polygon_shapefile(dir: &Utf8Path, stem: &str, polygons: &[Vec<Ring>]) {
    let path = dir.join(format!("{stem}.shp"));
    let mut writer =
        shapefile::Writer::from_path(&path, name_table()).expect("create shapefile writer");
    for (index, rings) in polygons.iter().enumerate() {
        let mut shape_rings = Vec::with_capacity(rings.len());
        for (position, ring) in rings.iter().enumerate() {
            let points = to_points(ring);
            shape_rings.push(if position == 0 {
                PolygonRing::Outer(points)
            } else {
                PolygonRing::Inner(points)
            });
        }
        let polygon = Polygon::with_rings(shape_rings);
        writer
            .write_shape_and_record(&polygon, &named_record(index))
            .expect("write polygon record");
    }
}

/// Write a point shapefile, used to exercise unsupported shape handling.
pub fn write_point_shapefile(dir: &Utf8Path, stem: &str, points: &[(f64, f64)]) {
    let path = dir.join(format!("{stem}.shp"));
    let mut writer =
        shapefile::Writer::from_path(&path, name_table()).expect("create shapefile writer");
    for (index, &(x, y)) in points.iter().enumerate() {
        writer
            .write_shape_and_record(&Point::new(x, y), &named_record(index))
            .expect("write point record");
    }
}

/// Zip the given files into an in-memory archive.
pub fn zip_files(files: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in files {
        writer
            .start_file(name.as_str(), zip::write::SimpleFileOptions::default())
            .expect("start zip member");
        writer.write_all(contents).expect("write zip member");
    }
    writer.finish().expect("finish zip archive").into_inner()
}

/// Build a Natural Earth style archive holding `<stem>.shp/.shx/.dbf`.
pub fn shapefile_archive(stem: &str, polygons: &[Vec<Ring>]) -> Vec<u8> {
    let scratch = tempfile::tempdir().expect("create scratch directory");
    let dir = Utf8Path::from_path(scratch.path()).expect("utf-8 scratch directory");
    write_polygon_shapefile(dir, stem, polygons);
    let files: Vec<_> = ["shp", "shx", "dbf"]
        .into_iter()
        .map(|extension| {
            let name = format!("{stem}.{extension}");
            let contents = fs::read(dir.join(&name)).expect("read shapefile member");
            (name, contents)
        })
        .collect();
    zip_files(&files)
}

/// A node in an OSM XML fixture.
#[derive(Debug, Clone)]
pub struct FixtureNode {
    /// Node identifier.
    pub id: u64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Tags as key/value pairs.
    pub tags: Vec<(String, String)>,
}

impl FixtureNode {
    /// A node tagged `ncn_milepost=<value>`.
    pub fn milepost(id: u64, lat: f64, lon: f64, value: &str) -> Self {
        Self {
            id,
            lat,
            lon,
            tags: vec![("ncn_milepost".to_owned(), value.to_owned())],
        }
    }
}

/// Render nodes as an Overpass-style OSM XML document.
pub fn osm_xml(nodes: &[FixtureNode]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<osm version=\"0.6\" generator=\"Overpass API\">\n",
    );
    for node in nodes {
        if node.tags.is_empty() {
            xml.push_str(&format!(
                "  <node id=\"{}\" lat=\"{}\" lon=\"{}\"/>\n",
                node.id, node.lat, node.lon
            ));
            continue;
        }
        xml.push_str(&format!(
            "  <node id=\"{}\" lat=\"{}\" lon=\"{}\">\n",
            node.id, node.lat, node.lon
        ));
        for (key, value) in &node.tags {
            xml.push_str(&format!("    <tag k=\"{key}\" v=\"{value}\"/>\n"));
        }
        xml.push_str("  </node>\n");
    }
    xml.push_str("</osm>\n");
    xml
}

/// Geometry written into a fixture cache.
#[derive(Debug, Clone, Default)]
pub struct FixtureCache {
    /// Polygons per dataset; datasets without an entry get one polygon in
    /// the South Pacific.
    pub shapes: Vec<(ShapeDataset, Vec<Vec<Ring>>)>,
    /// Nodes of the point extract.
    pub nodes: Vec<FixtureNode>,
}

impl FixtureCache {
    /// Add polygons for `dataset`.
    #[must_use]
    pub fn with_shapes(mut self, dataset: ShapeDataset, polygons: Vec<Vec<Ring>>) -> Self {
        self.shapes.push((dataset, polygons));
        self
    }

    /// Add a node to the point extract.
    #[must_use]
    pub fn with_node(mut self, node: FixtureNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Write every dataset into `root`, returning the warm cache manifest.
    pub fn write(&self, root: &Utf8Path) -> CacheManifest {
        fs::create_dir_all(root).expect("create fixture cache");
        let layout = CacheLayout::new(root);
        let base = crate::fetch::NATURAL_EARTH_BASE_URL;
        for dataset in ShapeDataset::ALL {
            let mut polygons = self
                .shapes
                .iter()
                .filter(|(candidate, _)| *candidate == dataset)
                .flat_map(|(_, polygons)| polygons.iter().cloned())
                .collect::<Vec<_>>();
            if polygons.is_empty() {
                // Keep every file non-empty; this polygon is clipped away.
                polygons.push(vec![rect_ring(170.0, -40.0, 171.0, -39.0)]);
            }
            let url = dataset.url(base);
            let stem = cache_stem(&url).expect("dataset URL has a stem");
            write_polygon_shapefile(layout.root(), stem, &polygons);
        }
        fs::write(root.join(POINT_EXTRACT_FILE), osm_xml(&self.nodes))
            .expect("write point extract");
        let paths = |dataset: ShapeDataset| {
            let url = dataset.url(base);
            layout.shape_paths(cache_stem(&url).expect("dataset URL has a stem"))
        };
        CacheManifest {
            land: paths(ShapeDataset::Land),
            minor_islands: paths(ShapeDataset::MinorIslands),
            lakes: paths(ShapeDataset::Lakes),
            lakes_europe: paths(ShapeDataset::LakesEurope),
            urban_areas: paths(ShapeDataset::UrbanAreas),
            mileposts: layout.point_extract(),
        }
    }
}

/// Temporary directory paired with its UTF-8 path.
pub fn utf8_tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
    (dir, path)
}
