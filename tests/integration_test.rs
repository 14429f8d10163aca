extern crate geojson2osm;

use geojson2osm::items::Role;
use geojson2osm::output::Output;
use geojson2osm::{filter, parse_dataset, process};
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};

fn get_string(cursor: &mut Cursor<Vec<u8>>) -> String {
    cursor.seek(SeekFrom::Start(0)).unwrap();
    let mut out = Vec::new();
    cursor.read_to_end(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn import_alexanderplatz() {
    let file = File::open("./tests/data/alexanderplatz.geojson").unwrap();
    let data_set = parse_dataset(file, None).unwrap();

    // 2 poi nodes, 3 footway nodes, 4 + 3 park ring nodes, 2 bicycle parkings
    assert_eq!(data_set.nodes().count(), 14);
    // footway + park outer ring + park inner ring
    assert_eq!(data_set.ways().count(), 3);
    assert_eq!(data_set.relations().count(), 1);
}

#[test]
fn park_becomes_a_multipolygon() {
    let file = File::open("./tests/data/alexanderplatz.geojson").unwrap();
    let data_set = parse_dataset(file, None).unwrap();

    let park = data_set.relations().next().unwrap();
    assert_eq!(park.tags.get("type"), Some("multipolygon"));
    assert_eq!(park.tags.get("leisure"), Some("park"));
    assert_eq!(park.tags.get("name"), Some("Monbijoupark"));

    let roles: Vec<Role> = park.members.iter().map(|member| member.role).collect();
    assert_eq!(roles, vec![Role::Outer, Role::Inner]);

    for member in &park.members {
        let way = data_set.way(member.way).unwrap();
        assert!(way.tags.is_empty());
        assert_eq!(way.nodes.first(), way.nodes.last());
    }
}

#[test]
fn find_fountains_or_townhalls() {
    let mut cursor = Cursor::new(Vec::new());
    let groups = filter::parse("amenity~fountain+tourism,amenity~townhall");
    let file = File::open("./tests/data/alexanderplatz.geojson").unwrap();
    process(file, &mut cursor, Some(&groups)).unwrap();

    let string = get_string(&mut cursor);
    let lines: Vec<&str> = string.trim().split('\n').collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert!(
            (line.contains(r#"amenity":"fountain"#) && line.contains(r#"tourism"#))
                || line.contains(r#"amenity":"townhall"#)
        );
    }
}

#[test]
fn find_bike_parking_for_six() {
    let mut cursor = Cursor::new(Vec::new());
    let groups = filter::parse("amenity~bicycle_parking+capacity~6");
    let file = File::open("./tests/data/alexanderplatz.geojson").unwrap();
    process(file, &mut cursor, Some(&groups)).unwrap();

    let string = get_string(&mut cursor);
    let lines: Vec<&str> = string.trim().split('\n').collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert!(line.contains(r#""capacity":"6""#));
    }
}

#[test]
fn write_all_primitives_as_json_lines() {
    let file = File::open("./tests/data/alexanderplatz.geojson").unwrap();
    let data_set = parse_dataset(file, None).unwrap();

    let mut cursor = Cursor::new(Vec::new());
    data_set.write_json_lines(&mut cursor).unwrap();
    let string = get_string(&mut cursor);
    let lines: Vec<&str> = string.trim().split('\n').collect();
    assert_eq!(lines.len(), data_set.len());
    assert!(lines[0].contains(r#""type":"node""#));
    let relation_line = lines.last().unwrap();
    assert!(relation_line.contains(r#""type":"relation""#));
    assert!(relation_line.contains("multipolygon"));
    assert!(relation_line.contains("centroid"));
}

#[test]
fn import_a_bare_geometry() {
    let file = File::open("./tests/data/spree.geojson").unwrap();
    let data_set = parse_dataset(file, None).unwrap();

    assert_eq!(data_set.nodes().count(), 4);
    let way = data_set.ways().next().unwrap();
    assert_eq!(way.nodes.len(), 4);
    assert!(way.tags.is_empty());
    assert_ne!(way.nodes.first(), way.nodes.last());
}
