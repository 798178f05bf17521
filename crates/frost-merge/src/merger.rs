use frost_types::{Entries, Node, Record};
use tracing::debug;

use crate::config::MergeConfig;
use crate::error::{MergeError, MergeResult};

/// The merge engine.
///
/// A `Merger` derives new sealed records from a base record and a patch. It
/// holds no state beyond its configuration, so one instance can be shared
/// freely across threads. The crate-level functions ([`crate::set`],
/// [`crate::set_deep`], ...) use `Merger::default()`.
#[derive(Clone, Debug, Default)]
pub struct Merger {
    pub(crate) config: MergeConfig,
}

impl Merger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Shallow merge: overlay `patch` onto `base` one level deep.
    ///
    /// Keys in both take the patch's value at the base's position. Keys
    /// only in the patch are appended in the patch's order. Nested values
    /// are never merged, only replaced.
    pub fn set(&self, base: &Node, patch: &Node) -> MergeResult<Record> {
        let base = require_record(base)?;
        let patch = require_patch(patch)?;
        Ok(self.overlay(base.entries(), patch))
    }

    /// Shallow merge of a single `name: value` pair.
    pub fn set_property(
        &self,
        base: &Node,
        name: impl Into<String>,
        value: impl Into<Node>,
    ) -> MergeResult<Record> {
        let base = require_record(base)?;
        let patch = Entries::from_pairs([(name.into(), value.into())]);
        Ok(self.overlay(base.entries(), &patch))
    }

    /// Every entry of `base` except `name`, in the original order. An absent
    /// `name` yields an equal but distinct record.
    pub fn delete_property(&self, base: &Node, name: &str) -> MergeResult<Record> {
        let base = require_record(base)?;
        Ok(self.without(base.entries(), name))
    }

    /// Deep merge: overlay `patch` onto `base`, descending into every key
    /// where both sides are mappings.
    pub fn set_deep(&self, base: &Node, patch: &Node) -> MergeResult<Record> {
        let base = require_record(base)?;
        let patch = require_patch(patch)?;
        self.derive_deep(base, patch)
    }

    /// Build one record from `sources`, overlaying each onto a blank
    /// record from left to right with shallow-merge semantics.
    pub fn construct<'a, I>(&self, sources: I) -> MergeResult<Record>
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut record = Record::new();
        let mut count = 0usize;
        for source in sources {
            let patch = require_patch(source)?;
            record = self.overlay(record.entries(), patch);
            count += 1;
        }
        debug!(sources = count, keys = record.len(), "constructed record");
        Ok(record)
    }
}

/// The base of every derivation must already be sealed.
pub(crate) fn require_record(node: &Node) -> MergeResult<&Record> {
    node.as_record().ok_or_else(|| MergeError::NotImmutable {
        found: node.kind_name(),
    })
}

/// A patch may be either mapping kind, but never a leaf.
pub(crate) fn require_patch(node: &Node) -> MergeResult<&Entries> {
    node.entries().ok_or_else(|| MergeError::InvalidPatch {
        found: node.kind_name(),
    })
}
