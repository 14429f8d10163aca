use super::geo::{get_compound_coordinates, get_geo_info, Bounds, Location};
use super::items::{DataSet, Node, OsmObj, Relation, Tags, Way};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::to_string;
use std::error::Error;
use std::io::Write;

#[derive(Serialize, Deserialize)]
struct JSONNode {
    id: i64,
    #[serde(rename = "type")]
    osm_type: &'static str,
    lat: f64,
    lon: f64,
    tags: Tags,
}

#[derive(Serialize, Deserialize)]
struct JSONWay {
    id: i64,
    #[serde(rename = "type")]
    osm_type: &'static str,
    tags: Tags,
    centroid: Option<Location>,
    bounds: Option<Bounds>,
}

#[derive(Serialize, Deserialize)]
struct JSONRelation {
    id: i64,
    #[serde(rename = "type")]
    osm_type: &'static str,
    tags: Tags,
    centroid: Option<Location>,
    bounds: Option<Bounds>,
}

type SerdeResult = Result<String, serde_json::error::Error>;

pub(crate) trait SerializeParent {
    fn get_coordinates(&self, data_set: &DataSet) -> Vec<(f64, f64)>;
    fn to_json_string(&self, data_set: &DataSet) -> SerdeResult;
}

impl SerializeParent for Way {
    fn get_coordinates(&self, data_set: &DataSet) -> Vec<(f64, f64)> {
        self.nodes
            .iter()
            .filter_map(|&id| {
                let node = data_set.node(id)?;
                Some((node.lon, node.lat))
            })
            .collect()
    }

    fn to_json_string(&self, data_set: &DataSet) -> SerdeResult {
        let coordinates = self.get_coordinates(data_set);
        let (centroid, bounds) = get_geo_info(coordinates);
        let jw = JSONWay {
            osm_type: "way",
            id: self.id.0,
            tags: self.tags.to_owned(),
            centroid,
            bounds,
        };
        to_string(&jw)
    }
}

impl SerializeParent for Relation {
    fn get_coordinates(&self, data_set: &DataSet) -> Vec<(f64, f64)> {
        let coordinates = self
            .members
            .iter()
            .filter_map(|member| {
                let way = data_set.way(member.way)?;
                Some(way.get_coordinates(data_set))
            })
            .flatten()
            .dedup()
            .collect();
        get_compound_coordinates(coordinates)
    }

    fn to_json_string(&self, data_set: &DataSet) -> SerdeResult {
        let coordinates = self.get_coordinates(data_set);
        let (centroid, bounds) = get_geo_info(coordinates);
        let jr = JSONRelation {
            osm_type: "relation",
            id: self.id.0,
            tags: self.tags.to_owned(),
            centroid,
            bounds,
        };
        to_string(&jr)
    }
}

pub(crate) trait SerializeNode {
    fn to_json_string(&self) -> SerdeResult;
}

impl SerializeNode for Node {
    fn to_json_string(&self) -> SerdeResult {
        let jn = JSONNode {
            osm_type: "node",
            id: self.id.0,
            lat: self.lat,
            lon: self.lon,
            tags: self.tags.to_owned(),
        };
        to_string(&jn)
    }
}

pub trait Output {
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;
}

impl Output for DataSet {
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        for obj in self.objects() {
            let json = match obj {
                OsmObj::Node(node) => node.to_json_string(),
                OsmObj::Way(way) => way.to_json_string(self),
                OsmObj::Relation(relation) => relation.to_json_string(self),
            }?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }
}
