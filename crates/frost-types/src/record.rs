use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::entries::Entries;
use crate::error::TypeError;
use crate::mapping::Mapping;
use crate::node::{entries_to_json, Node};

/// A sealed, ordered property mapping.
///
/// A `Record` is immutable from the moment it exists: it has no `&mut self`
/// methods and its fields are private, so the only way to obtain a different
/// record is to derive a new one (see `frost-merge`). Cloning is cheap and
/// shares storage; nested values are shared by reference between a record
/// and every record derived from it that did not change them.
#[derive(Clone, Default, PartialEq)]
pub struct Record {
    entries: Entries,
}

impl Record {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seal an ordered list of pairs.
    ///
    /// A repeated key keeps the position of its first occurrence and the
    /// value of its last.
    pub fn from_entries<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Self {
            entries: Entries::from_pairs(pairs),
        }
    }

    /// Seal an unsealed mapping. The record shares the mapping's storage.
    pub fn seal(mapping: Mapping) -> Self {
        Self {
            entries: mapping.into_entries(),
        }
    }

    /// Unsealed copy of this record's top level, sharing every nested value.
    pub fn thaw(&self) -> Mapping {
        Mapping::from(self.entries.clone())
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys()
    }

    /// Values in key order.
    pub fn values(&self) -> impl Iterator<Item = &Node> + '_ {
        self.entries.values()
    }

    /// Returns `true` if both records are the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.entries.ptr_eq(&other.entries)
    }

    pub fn to_json(&self) -> Value {
        entries_to_json(&self.entries)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record")?;
        fmt::Debug::fmt(&self.entries, f)
    }
}

impl TryFrom<Value> for Record {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match Node::from(value) {
            Node::Mapping(m) => Ok(Self::seal(m)),
            Node::Record(r) => Ok(r),
            other => Err(TypeError::NotAMapping(other.kind_name())),
        }
    }
}

impl TryFrom<Node> for Record {
    type Error = TypeError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Mapping(m) => Ok(Self::seal(m)),
            Node::Record(r) => Ok(r),
            other => Err(TypeError::NotAMapping(other.kind_name())),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let node = Node::deserialize(deserializer)?;
        Self::try_from(node).map_err(serde::de::Error::custom)
    }
}
