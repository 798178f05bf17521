use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::node::Node;

/// Ordered, key-unique list of `(key, value)` pairs.
///
/// Storage lives behind an `Arc`, so cloning an `Entries` shares the
/// underlying list. Mutation is crate-private and copy-on-write: only an
/// unsealed [`Mapping`](crate::Mapping) ever reaches it, and it never
/// disturbs other holders of the same storage.
#[derive(Clone, Default, PartialEq)]
pub struct Entries(Arc<Vec<(String, Node)>>);

impl Entries {
    /// Create an empty entry list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an entry list from pairs.
    ///
    /// A repeated key keeps the position of its first occurrence and the
    /// value of its last.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        let mut entries: Vec<(String, Node)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (key, value) in pairs {
            let key = key.into();
            match positions.get(&key) {
                Some(&i) => entries[i].1 = value,
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, value));
                }
            }
        }
        Self(Arc::new(entries))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Position of `key` in iteration order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|(k, _)| k == key)
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over values in key order.
    pub fn values(&self) -> impl Iterator<Item = &Node> + '_ {
        self.0.iter().map(|(_, v)| v)
    }

    /// Returns `true` if both lists share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Insert or replace. A replaced key keeps its position.
    pub(crate) fn insert(&mut self, key: String, value: Node) -> Option<Node> {
        let entries = Arc::make_mut(&mut self.0);
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                entries.push((key, value));
                None
            }
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Node> {
        let i = self.position(key)?;
        Some(Arc::make_mut(&mut self.0).remove(i).1)
    }
}

impl fmt::Debug for Entries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Entries {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
