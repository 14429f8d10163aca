use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WayId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OsmId {
    Node(NodeId),
    Way(WayId),
    Relation(RelationId),
}

impl From<NodeId> for OsmId {
    fn from(id: NodeId) -> Self {
        OsmId::Node(id)
    }
}

impl From<WayId> for OsmId {
    fn from(id: WayId) -> Self {
        OsmId::Way(id)
    }
}

impl From<RelationId> for OsmId {
    fn from(id: RelationId) -> Self {
        OsmId::Relation(id)
    }
}

/// Tag map with deterministic, key-sorted iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<SmartString, SmartString>);

impl Tags {
    pub fn new() -> Self {
        Tags(BTreeMap::new())
    }

    pub fn insert(&mut self, key: SmartString, value: SmartString) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|value| value.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_ref(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Way {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
    pub tags: Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Outer,
    Inner,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Outer => "outer",
            Role::Inner => "inner",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub role: Role,
    pub way: WayId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub id: RelationId,
    pub members: Vec<Member>,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OsmObj {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

impl OsmObj {
    pub fn id(&self) -> OsmId {
        match self {
            OsmObj::Node(node) => node.id.into(),
            OsmObj::Way(way) => way.id.into(),
            OsmObj::Relation(relation) => relation.id.into(),
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            OsmObj::Node(node) => &node.tags,
            OsmObj::Way(way) => &way.tags,
            OsmObj::Relation(relation) => &relation.tags,
        }
    }

    pub fn node(&self) -> Option<&Node> {
        if let OsmObj::Node(node) = self {
            Some(node)
        } else {
            None
        }
    }

    pub fn way(&self) -> Option<&Way> {
        if let OsmObj::Way(way) = self {
            Some(way)
        } else {
            None
        }
    }

    pub fn relation(&self) -> Option<&Relation> {
        if let OsmObj::Relation(relation) = self {
            Some(relation)
        } else {
            None
        }
    }
}

impl From<Node> for OsmObj {
    fn from(node: Node) -> Self {
        OsmObj::Node(node)
    }
}

impl From<Way> for OsmObj {
    fn from(way: Way) -> Self {
        OsmObj::Way(way)
    }
}

impl From<Relation> for OsmObj {
    fn from(relation: Relation) -> Self {
        OsmObj::Relation(relation)
    }
}

/// Destination for created primitives. The reader only ever adds, it never
/// reads an inserted primitive back.
pub trait Store {
    fn add_primitive(&mut self, obj: OsmObj);
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataSet {
    objs: BTreeMap<OsmId, OsmObj>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: OsmId) -> Option<&OsmObj> {
        self.objs.get(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.get(id.into()).and_then(OsmObj::node)
    }

    pub fn way(&self, id: WayId) -> Option<&Way> {
        self.get(id.into()).and_then(OsmObj::way)
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.get(id.into()).and_then(OsmObj::relation)
    }

    pub fn objects(&self) -> impl Iterator<Item = &OsmObj> {
        self.objs.values()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.objects().filter_map(OsmObj::node)
    }

    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.objects().filter_map(OsmObj::way)
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.objects().filter_map(OsmObj::relation)
    }

    pub fn len(&self) -> usize {
        self.objs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objs.is_empty()
    }
}

impl Store for DataSet {
    fn add_primitive(&mut self, obj: OsmObj) {
        self.objs.insert(obj.id(), obj);
    }
}
