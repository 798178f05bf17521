use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::entries::Entries;
use crate::mapping::Mapping;
use crate::record::Record;

/// Any value that can appear in a Frost tree.
///
/// The variant is decided once, at ingestion: JSON objects become
/// [`Mapping`]s, everything else (including arrays) becomes a `Leaf`. Deep
/// merge dispatches on this tag instead of probing values at runtime.
///
/// Cloning a `Node` never copies data; every variant is `Arc`-backed.
#[derive(Clone, PartialEq)]
pub enum Node {
    /// An atomic value: null, bool, number, string, or array.
    ///
    /// A leaf is always terminal, even if it wraps a JSON object built by
    /// hand with [`Node::Leaf`] rather than ingested through [`Node::from`].
    Leaf(Arc<Value>),
    /// Unsealed, ordered property mapping.
    Mapping(Mapping),
    /// Sealed, ordered property mapping.
    Record(Record),
}

impl Node {
    /// Ingest a JSON value, classifying objects as mappings at every level.
    pub fn ingest(value: impl Into<Value>) -> Self {
        Self::from(value.into())
    }

    /// Shorthand for `Node::Leaf(null)`.
    pub fn null() -> Self {
        Self::Leaf(Arc::new(Value::Null))
    }

    /// Returns `true` for a sealed [`Record`].
    pub fn is_sealed(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Returns `true` for either mapping kind.
    pub fn is_mapping(&self) -> bool {
        !matches!(self, Self::Leaf(_))
    }

    /// The entries of a mapping or record; `None` for leaves.
    pub fn entries(&self) -> Option<&Entries> {
        match self {
            Self::Leaf(_) => None,
            Self::Mapping(m) => Some(m.entries()),
            Self::Record(r) => Some(r.entries()),
        }
    }

    /// The sealed record, if this node is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// The unsealed mapping, if this node is one.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// The wrapped JSON value, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Self::Leaf(v) => Some(v),
            _ => None,
        }
    }

    /// Look up `key` when this node is a mapping or record.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries().and_then(|e| e.get(key))
    }

    /// Short, human-readable name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Leaf(v) => match v.as_ref() {
                Value::Null => "null",
                Value::Bool(_) => "bool",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                Value::Array(_) => "array",
                Value::Object(_) => "opaque object",
            },
            Self::Mapping(_) => "mapping",
            Self::Record(_) => "record",
        }
    }

    /// Returns `true` if both nodes share the same storage.
    ///
    /// This is reference identity, not value equality: two equal leaves
    /// ingested separately are not `ptr_eq`.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => Arc::ptr_eq(a, b),
            (Self::Mapping(a), Self::Mapping(b)) => a.entries().ptr_eq(b.entries()),
            (Self::Record(a), Self::Record(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Seal this level. A mapping becomes a record sharing the same entries;
    /// records and leaves are returned as they are.
    pub fn into_sealed(self) -> Self {
        match self {
            Self::Mapping(m) => Self::Record(Record::seal(m)),
            other => other,
        }
    }

    /// Seal every mapping in the tree, not just this level.
    pub fn sealed_deep(&self) -> Self {
        match self {
            Self::Leaf(_) => self.clone(),
            Self::Mapping(m) => Self::Record(Record::from_entries(
                m.iter().map(|(k, v)| (k, v.sealed_deep())),
            )),
            Self::Record(r) => Self::Record(Record::from_entries(
                r.iter().map(|(k, v)| (k, v.sealed_deep())),
            )),
        }
    }

    /// Copy the whole tree into fresh storage. The result is equal to
    /// `self` but shares nothing with it.
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::Leaf(v) => Self::Leaf(Arc::new(Value::clone(v))),
            Self::Mapping(m) => Self::Mapping(Mapping::from_entries(
                m.iter().map(|(k, v)| (k, v.deep_clone())),
            )),
            Self::Record(r) => Self::Record(Record::from_entries(
                r.iter().map(|(k, v)| (k, v.deep_clone())),
            )),
        }
    }

    /// Render back to plain JSON, keeping key order.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Leaf(v) => Value::clone(v),
            Self::Mapping(m) => entries_to_json(m.entries()),
            Self::Record(r) => entries_to_json(r.entries()),
        }
    }
}

pub(crate) fn entries_to_json(entries: &Entries) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_json()))
            .collect(),
    )
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(v) => write!(f, "{v}"),
            Self::Mapping(m) => fmt::Debug::fmt(m, f),
            Self::Record(r) => fmt::Debug::fmt(r, f),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(Mapping::from_entries(
                map.into_iter().map(|(k, v)| (k, Node::from(v))),
            )),
            other => Self::Leaf(Arc::new(other)),
        }
    }
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Mapping> for Node {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Leaf(Arc::new(Value::from(s)))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Leaf(Arc::new(Value::from(s)))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Self::Leaf(Arc::new(Value::from(n)))
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Self::Leaf(Arc::new(Value::from(n)))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Self::Leaf(Arc::new(Value::from(b)))
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(v) => v.serialize(serializer),
            Self::Mapping(m) => m.serialize(serializer),
            Self::Record(r) => r.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}
