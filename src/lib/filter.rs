use super::items::{OsmObj, Tags};
use smartstring::alias::String;

#[derive(PartialEq, Debug, Clone)]
pub enum Condition {
    TagPresence(String),
    ValueMatch(String, String),
}

impl Condition {
    pub fn new(tag: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            return Condition::ValueMatch(tag.into(), value.into());
        }
        Condition::TagPresence(tag.into())
    }

    fn holds(&self, tags: &Tags) -> bool {
        match self {
            Condition::TagPresence(key) => tags.contains_key(key),
            Condition::ValueMatch(key, value) => tags.contains(key, value),
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Group {
    pub conditions: Vec<Condition>,
}

impl Group {
    fn holds(&self, tags: &Tags) -> bool {
        self.conditions.iter().all(|condition| condition.holds(tags))
    }
}

fn parse_condition(condition_str: &str) -> Condition {
    let split_str: Vec<&str> = condition_str.splitn(2, '~').collect();
    if split_str.len() < 2 {
        Condition::TagPresence(condition_str.into())
    } else {
        let key = split_str[0];
        let value = split_str[1];
        Condition::ValueMatch(key.into(), value.into())
    }
}

fn parse_group(group_str: &str) -> Group {
    let condition_strs: Vec<&str> = group_str.split('+').collect();
    let conditions = condition_strs.into_iter().map(parse_condition).collect();
    Group { conditions }
}

/// Parse an expression into filter groups
///
/// Stating a key (`amenity`), will pick all primitives which are tagged using
/// that key. To further narrow down the results, a specific value can be given
/// using a `~` field separator (`amenity~fountain`). To check the presence of
/// multiple tags for the same primitive, statements can be combined using the
/// `+` operator (`'amenity~fountain+tourism'`). Finally, options can be
/// specified by concatenating groups of statements with `,`
/// (`amenity~fountain+tourism,amenity~townhall`). If a primitive matches the
/// criteria of either group it will be included in the output.
///
/// # Example
///
/// ```
/// use geojson2osm::filter::parse;
///
/// let groups = parse("amenity~fountain+tourism,amenity~townhall");
/// assert_eq!(groups.len(), 2);
/// let group = &groups[0];
/// assert_eq!(group.conditions.len(), 2);
/// ```
pub fn parse(selector_str: &str) -> Vec<Group> {
    let group_strs: Vec<&str> = selector_str.split(',').collect();
    group_strs.into_iter().map(parse_group).collect()
}

pub trait Filter {
    fn filter(&self, groups: &[Group]) -> bool;
}

impl Filter for OsmObj {
    fn filter(&self, groups: &[Group]) -> bool {
        let tags = self.tags();
        groups.iter().any(|group| group.holds(tags))
    }
}
