use super::items::{Member, Node, NodeId, Relation, RelationId, Role, Store, Tags, Way, WayId};
use super::ProgressMonitor;
use log::warn;
use serde_json::{Deserializer, Map, Value};
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The token stream is not well-formed JSON.
    #[error("invalid json: {0}")]
    Syntax(#[from] serde_json::Error),
    /// Well-formed JSON that does not form a GeoJSON document.
    #[error("illegal data: {0}")]
    IllegalData(String),
    /// The progress monitor asked for the import to be aborted.
    #[error("import was canceled")]
    Canceled,
}

fn illegal(message: impl Into<String>) -> ImportError {
    ImportError::IllegalData(message.into())
}

#[derive(Default)]
struct IdGenerator {
    nodes: i64,
    ways: i64,
    relations: i64,
}

impl IdGenerator {
    fn next_node(&mut self) -> NodeId {
        self.nodes += 1;
        NodeId(self.nodes)
    }

    fn next_way(&mut self) -> WayId {
        self.ways += 1;
        WayId(self.ways)
    }

    fn next_relation(&mut self) -> RelationId {
        self.relations += 1;
        RelationId(self.relations)
    }
}

/// Reader that turns a GeoJSON document (RFC 7946) into map primitives.
///
/// Every created primitive is added to the store immediately; a fatal error
/// leaves the primitives created up to that point in place, so callers should
/// discard the store when `read` fails.
pub struct GeoJsonReader<'a, S: Store> {
    store: &'a mut S,
    monitor: &'a mut dyn ProgressMonitor,
    ids: IdGenerator,
}

impl<'a, S: Store> GeoJsonReader<'a, S> {
    pub fn new(store: &'a mut S, monitor: &'a mut dyn ProgressMonitor) -> Self {
        GeoJsonReader {
            store,
            monitor,
            ids: IdGenerator::default(),
        }
    }

    /// Consume all top-level JSON values from `source`. Objects are parsed as
    /// GeoJSON, any other top-level value is skipped.
    pub fn read(&mut self, source: impl Read) -> Result<(), ImportError> {
        for value in Deserializer::from_reader(source).into_iter::<Value>() {
            if let Value::Object(object) = value? {
                self.parse_root(&object)?;
            }
        }
        Ok(())
    }

    fn parse_root(&mut self, object: &Map<String, Value>) -> Result<(), ImportError> {
        if self.monitor.is_canceled() {
            return Err(ImportError::Canceled);
        }
        match object_type(object)? {
            "FeatureCollection" => self.parse_feature_collection(object),
            "Feature" => self.parse_feature(object),
            "GeometryCollection" => self.parse_geometry_collection(None, object),
            _ => self.parse_geometry(None, object),
        }
    }

    fn parse_feature_collection(
        &mut self,
        object: &Map<String, Value>,
    ) -> Result<(), ImportError> {
        let features = object
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| illegal("FeatureCollection without a \"features\" array"))?;
        for feature in features {
            if let Value::Object(feature) = feature {
                self.parse_feature(feature)?;
            }
        }
        Ok(())
    }

    fn parse_feature(&mut self, feature: &Map<String, Value>) -> Result<(), ImportError> {
        if self.monitor.is_canceled() {
            return Err(ImportError::Canceled);
        }
        let tags = extract_tags(feature);
        match feature.get("geometry") {
            Some(Value::Object(geometry)) => self.parse_geometry(Some(&tags), geometry)?,
            Some(Value::Null) | None => {}
            Some(_) => return Err(illegal("a feature's \"geometry\" must be an object")),
        }
        self.monitor.worked(1);
        Ok(())
    }

    fn parse_geometry_collection(
        &mut self,
        tags: Option<&Tags>,
        geometry: &Map<String, Value>,
    ) -> Result<(), ImportError> {
        let geometries = geometry
            .get("geometries")
            .and_then(Value::as_array)
            .ok_or_else(|| illegal("GeometryCollection without a \"geometries\" array"))?;
        for member in geometries {
            let member = member
                .as_object()
                .ok_or_else(|| illegal("a collection's geometry must be an object"))?;
            self.parse_geometry(tags, member)?;
        }
        Ok(())
    }

    fn parse_geometry(
        &mut self,
        tags: Option<&Tags>,
        geometry: &Map<String, Value>,
    ) -> Result<(), ImportError> {
        match object_type(geometry)? {
            "Point" => self.parse_point(tags, coordinates(geometry)?),
            "MultiPoint" => self.parse_multi_point(tags, coordinates(geometry)?),
            "LineString" => self.parse_line_string(tags, coordinates(geometry)?),
            "MultiLineString" => self.parse_multi_line_string(tags, coordinates(geometry)?),
            "Polygon" => self.parse_polygon(tags, coordinates(geometry)?),
            "MultiPolygon" => self.parse_multi_polygon(tags, coordinates(geometry)?),
            "GeometryCollection" => self.parse_geometry_collection(tags, geometry),
            unknown => {
                warn!("unknown geometry type {:?}, skipping object", unknown);
                Ok(())
            }
        }
    }

    fn parse_point(&mut self, tags: Option<&Tags>, pair: &[Value]) -> Result<(), ImportError> {
        let (lat, lon) = coordinate_pair(pair)?;
        self.create_node(lat, lon, tags.cloned().unwrap_or_default());
        Ok(())
    }

    fn parse_multi_point(
        &mut self,
        tags: Option<&Tags>,
        coordinates: &[Value],
    ) -> Result<(), ImportError> {
        for pair in coordinates {
            self.parse_point(tags, nested_array(pair)?)?;
        }
        Ok(())
    }

    fn parse_line_string(
        &mut self,
        tags: Option<&Tags>,
        coordinates: &[Value],
    ) -> Result<(), ImportError> {
        self.create_way(coordinates, false, tags.cloned().unwrap_or_default())?;
        Ok(())
    }

    fn parse_multi_line_string(
        &mut self,
        tags: Option<&Tags>,
        coordinates: &[Value],
    ) -> Result<(), ImportError> {
        for line in coordinates {
            self.parse_line_string(tags, nested_array(line)?)?;
        }
        Ok(())
    }

    fn parse_polygon(&mut self, tags: Option<&Tags>, rings: &[Value]) -> Result<(), ImportError> {
        match rings {
            [] => Ok(()),
            [ring] => {
                self.create_way(nested_array(ring)?, true, tags.cloned().unwrap_or_default())?;
                Ok(())
            }
            [exterior, interior @ ..] => {
                let mut members = Vec::with_capacity(rings.len());
                if let Some(way) = self.create_way(nested_array(exterior)?, true, Tags::new())? {
                    members.push(Member {
                        role: Role::Outer,
                        way,
                    });
                }
                for ring in interior {
                    if let Some(way) = self.create_way(nested_array(ring)?, true, Tags::new())? {
                        members.push(Member {
                            role: Role::Inner,
                            way,
                        });
                    }
                }
                let mut relation_tags = tags.cloned().unwrap_or_default();
                // inserted last so the invariant survives a "type" property
                relation_tags.insert("type".into(), "multipolygon".into());
                let relation = Relation {
                    id: self.ids.next_relation(),
                    members,
                    tags: relation_tags,
                };
                self.store.add_primitive(relation.into());
                Ok(())
            }
        }
    }

    fn parse_multi_polygon(
        &mut self,
        tags: Option<&Tags>,
        coordinates: &[Value],
    ) -> Result<(), ImportError> {
        for polygon in coordinates {
            self.parse_polygon(tags, nested_array(polygon)?)?;
        }
        Ok(())
    }

    fn create_node(&mut self, lat: f64, lon: f64, tags: Tags) -> NodeId {
        let id = self.ids.next_node();
        self.store.add_primitive(
            Node {
                id,
                lat,
                lon,
                tags,
            }
            .into(),
        );
        id
    }

    /// Build a way from a coordinate sequence. An empty sequence builds
    /// nothing. A sequence whose first and last pairs are equal shares a
    /// single node between both ends instead of duplicating it; `auto_close`
    /// forces that closure on rings that do not repeat their first pair.
    fn create_way(
        &mut self,
        coordinates: &[Value],
        auto_close: bool,
        tags: Tags,
    ) -> Result<Option<WayId>, ImportError> {
        if coordinates.is_empty() {
            return Ok(None);
        }
        let pairs = coordinates
            .iter()
            .map(|pair| coordinate_pair(nested_array(pair)?))
            .collect::<Result<Vec<_>, _>>()?;

        let closes = pairs.len() > 1 && pairs.first() == pairs.last();
        let distinct = if closes { pairs.len() - 1 } else { pairs.len() };
        let mut nodes: Vec<NodeId> = pairs[..distinct]
            .iter()
            .map(|&(lat, lon)| self.create_node(lat, lon, Tags::new()))
            .collect();
        if closes || (auto_close && nodes.len() > 1) {
            nodes.push(nodes[0]);
        }

        let id = self.ids.next_way();
        self.store.add_primitive(Way { id, nodes, tags }.into());
        Ok(Some(id))
    }
}

fn object_type(object: &Map<String, Value>) -> Result<&str, ImportError> {
    object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| illegal("object is missing a \"type\" string"))
}

fn coordinates(geometry: &Map<String, Value>) -> Result<&[Value], ImportError> {
    geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| illegal("geometry without a \"coordinates\" array"))
}

fn nested_array(value: &Value) -> Result<&[Value], ImportError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| illegal("expected a nested coordinate array"))
}

/// Read one `[longitude, latitude]` pair, returning `(lat, lon)`. Elements
/// beyond the second (e.g. an altitude) are ignored.
fn coordinate_pair(pair: &[Value]) -> Result<(f64, f64), ImportError> {
    let lon = pair.get(0).and_then(Value::as_f64);
    let lat = pair.get(1).and_then(Value::as_f64);
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok((lat, lon)),
        _ => Err(illegal("a coordinate pair needs two numbers")),
    }
}

/// Turn a feature's properties into tags. String values are taken verbatim,
/// anything else keeps its JSON text form ("42", "true", "{\"a\":1}").
fn extract_tags(feature: &Map<String, Value>) -> Tags {
    let mut tags = Tags::new();
    if let Some(Value::Object(properties)) = feature.get("properties") {
        for (key, value) in properties {
            let value = match value {
                Value::String(string) => string.as_str().into(),
                other => other.to_string().into(),
            };
            tags.insert(key.as_str().into(), value);
        }
    }
    tags
}
