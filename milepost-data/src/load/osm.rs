use std::io::{BufRead, BufReader};

use camino::Utf8Path;
use geo::Coord;
use log::debug;
use milepost_core::{Crs, GeometryCollection, GeometryFeature, Layer, Tags};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::LoadError;

/// A `<node>` whose children are still being read.
struct PendingNode {
    location: Coord<f64>,
    tags: Tags,
}

struct ExtractParser<'a, R> {
    path: &'a Utf8Path,
    reader: Reader<R>,
}

impl<R: BufRead> ExtractParser<'_, R> {
    fn xml_error(&self, source: quick_xml::Error) -> LoadError {
        LoadError::Xml {
            path: self.path.to_path_buf(),
            position: self.reader.error_position(),
            source,
        }
    }

    fn invalid_node(&self, id: Option<&str>, message: impl Into<String>) -> LoadError {
        LoadError::InvalidNode {
            path: self.path.to_path_buf(),
            id: id.unwrap_or("?").to_owned(),
            message: message.into(),
        }
    }

    fn attributes(&self, element: &BytesStart<'_>) -> Result<Vec<(String, String)>, LoadError> {
        element
            .attributes()
            .map(|attribute| -> Result<(String, String), LoadError> {
                let attribute = attribute.map_err(|err| self.xml_error(err.into()))?;
                let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                let value = attribute
                    .unescape_value()
                    .map_err(|err| self.xml_error(err))?
                    .into_owned();
                Ok((key, value))
            })
            .collect()
    }

    fn start_node(&self, element: &BytesStart<'_>) -> Result<PendingNode, LoadError> {
        let attributes = self.attributes(element)?;
        let lookup = |name: &str| {
            attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };
        let id = lookup("id");
        let coordinate = |name: &str, limit: f64| -> Result<f64, LoadError> {
            let raw = lookup(name)
                .ok_or_else(|| self.invalid_node(id, format!("missing {name}")))?;
            let value: f64 = raw
                .trim()
                .parse()
                .map_err(|_| self.invalid_node(id, format!("{name} `{raw}` is not a number")))?;
            if value.is_finite() && value.abs() <= limit {
                Ok(value)
            } else {
                Err(self.invalid_node(id, format!("{name} {value} is out of range")))
            }
        };
        let lat = coordinate("lat", 90.0)?;
        let lon = coordinate("lon", 180.0)?;
        Ok(PendingNode {
            location: Coord { x: lon, y: lat },
            tags: Tags::new(),
        })
    }

    fn add_tag(&self, node: &mut PendingNode, element: &BytesStart<'_>) -> Result<(), LoadError> {
        let attributes = self.attributes(element)?;
        let mut key = None;
        let mut value = None;
        for (name, text) in attributes {
            match name.as_str() {
                "k" => key = Some(text),
                "v" => value = Some(text),
                _ => {}
            }
        }
        if let Some(key) = key {
            node.tags.insert(key, value.unwrap_or_default());
        }
        Ok(())
    }

    fn parse(mut self, tag_key: &str) -> Result<Vec<GeometryFeature>, LoadError> {
        let mut features = Vec::new();
        let mut pending: Option<PendingNode> = None;
        let mut buf = Vec::new();
        let mut keep = |node: PendingNode| {
            if node.tags.contains_key(tag_key) {
                features.push(GeometryFeature::point(node.location, node.tags));
            }
        };
        loop {
            let event = self
                .reader
                .read_event_into(&mut buf)
                .map_err(|err| self.xml_error(err))?;
            match event {
                Event::Start(element) if element.name().as_ref() == b"node" => {
                    pending = Some(self.start_node(&element)?);
                }
                Event::Empty(element) if element.name().as_ref() == b"node" => {
                    keep(self.start_node(&element)?);
                }
                Event::Empty(element) if element.name().as_ref() == b"tag" => {
                    if let Some(node) = pending.as_mut() {
                        self.add_tag(node, &element)?;
                    }
                }
                Event::End(element) if element.name().as_ref() == b"node" => {
                    if let Some(node) = pending.take() {
                        keep(node);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(features)
    }
}

/// Read an OSM XML extract into a collection of tagged points.
///
/// Only `<node>` elements carrying a `tag_key` tag are kept; ways and
/// relations are ignored. Each point keeps every tag of its node and is
/// positioned at `(lon, lat)`.
///
/// # Errors
/// Returns [`LoadError::ReadExtract`] when the file cannot be opened,
/// [`LoadError::Xml`] for malformed XML and [`LoadError::InvalidNode`] for a
/// node without a usable `lat`/`lon`.
pub fn load_point_features(
    path: &Utf8Path,
    tag_key: &str,
) -> Result<GeometryCollection, LoadError> {
    let file = milepost_fs::open_utf8_file(path).map_err(|source| LoadError::ReadExtract {
        path: path.to_path_buf(),
        source,
    })?;
    let parser = ExtractParser {
        path,
        reader: Reader::from_reader(BufReader::new(file.into_std())),
    };
    let features = parser.parse(tag_key)?;
    debug!("loaded {} nodes tagged {tag_key} from {path}", features.len());
    Ok(GeometryCollection::new(Layer::Mileposts, Crs::Wgs84LonLat, features))
}
