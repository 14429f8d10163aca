use self::filter::{Filter, Group};
use self::geojson::GeoJsonReader;
use self::items::{DataSet, OsmObj};
use self::output::{SerializeNode, SerializeParent};
use std::error::Error;
use std::io::{Read, Write};

pub mod filter;
mod geo;
pub mod geojson;
pub mod items;
pub mod output;

pub use self::geojson::ImportError;

/// Collaborator observing import progress; may ask for the import to stop.
pub trait ProgressMonitor {
    /// Reports finished work units, one unit per processed feature.
    fn worked(&mut self, units: usize);

    /// Polled between features; answering `true` aborts the import.
    fn is_canceled(&self) -> bool;
}

/// Monitor that discards progress reports and never cancels.
pub struct NullProgressMonitor;

impl ProgressMonitor for NullProgressMonitor {
    fn worked(&mut self, _units: usize) {}

    fn is_canceled(&self) -> bool {
        false
    }
}

/// Parse a GeoJSON document into a fresh [`DataSet`].
///
/// When no monitor is given, [`NullProgressMonitor`] is assumed. A returned
/// error means the store's contents cannot be trusted for this parse.
///
/// # Example
///
/// ```
/// use geojson2osm::parse_dataset;
///
/// let doc = r#"{"type": "Point", "coordinates": [13.4, 52.5]}"#;
/// let data_set = parse_dataset(doc.as_bytes(), None).unwrap();
/// assert_eq!(data_set.len(), 1);
/// ```
pub fn parse_dataset(
    source: impl Read,
    monitor: Option<&mut dyn ProgressMonitor>,
) -> Result<DataSet, ImportError> {
    let mut data_set = DataSet::new();
    let mut fallback = NullProgressMonitor;
    let monitor = monitor.unwrap_or(&mut fallback);
    GeoJsonReader::new(&mut data_set, monitor).read(source)?;
    Ok(data_set)
}

/// Parse a GeoJSON document and write the created primitives as JSON lines,
/// keeping only those matching `groups` if a selector is given.
pub fn process(
    source: impl Read,
    writer: &mut dyn Write,
    groups: Option<&[Group]>,
) -> Result<(), Box<dyn Error>> {
    let data_set = parse_dataset(source, None)?;

    for obj in data_set.objects() {
        if let Some(groups) = groups {
            if !obj.filter(groups) {
                continue;
            }
        }

        let json_str = match obj {
            OsmObj::Node(node) => node.to_json_string(),
            OsmObj::Way(way) => way.to_json_string(&data_set),
            OsmObj::Relation(relation) => relation.to_json_string(&data_set),
        }?;
        writeln!(writer, "{}", json_str)?;
    }
    Ok(())
}
