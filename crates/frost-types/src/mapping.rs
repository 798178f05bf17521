use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::entries::Entries;
use crate::error::TypeError;
use crate::node::{entries_to_json, Node};

/// An unsealed, ordered property mapping.
///
/// Mappings are what callers build patches from, and what plain nested
/// objects ingested from JSON become. Writes are copy-on-write, so a mapping
/// that shares storage with a record (see [`Record::thaw`](crate::Record::thaw))
/// never changes that record.
#[derive(Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Entries,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Self {
            entries: Entries::from_pairs(pairs),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.remove(key)
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Entries {
        self.entries
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

    pub fn values(&self) -> impl Iterator<Item = &Node> + '_ {
        self.entries.values()
    }

    pub fn to_json(&self) -> Value {
        entries_to_json(&self.entries)
    }
}

impl From<Entries> for Mapping {
    fn from(entries: Entries) -> Self {
        Self { entries }
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mapping")?;
        fmt::Debug::fmt(&self.entries, f)
    }
}

impl TryFrom<Value> for Mapping {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match Node::from(value) {
            Node::Mapping(m) => Ok(m),
            other => Err(TypeError::NotAMapping(other.kind_name())),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
