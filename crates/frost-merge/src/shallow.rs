//! One-level overlay and key removal.

use std::collections::{HashMap, HashSet};

use frost_types::{Entries, Node, Record};
use tracing::debug;

use crate::merger::Merger;

impl Merger {
    /// Overlay `patch` onto `base` without recursion.
    pub(crate) fn overlay(&self, base: &Entries, patch: &Entries) -> Record {
        let patch_values: HashMap<&str, &Node> = patch.iter().collect();
        let mut merged = Vec::with_capacity(base.len() + patch.len());

        for (key, value) in base.iter() {
            let value = match patch_values.get(key) {
                Some(replacement) => Node::clone(replacement),
                None => self.carry(value),
            };
            merged.push((key.to_string(), value));
        }

        let base_keys: HashSet<&str> = base.keys().collect();
        merged.extend(
            patch
                .iter()
                .filter(|(key, _)| !base_keys.contains(key))
                .map(|(key, value)| (key.to_string(), value.clone())),
        );

        debug!(
            base_keys = base.len(),
            patch_keys = patch.len(),
            result_keys = merged.len(),
            "shallow merge"
        );
        Record::from_entries(merged)
    }

    /// Copy of `base` without `name`.
    pub(crate) fn without(&self, base: &Entries, name: &str) -> Record {
        let record = Record::from_entries(
            base.iter()
                .filter(|(key, _)| *key != name)
                .map(|(key, value)| (key, self.carry(value))),
        );
        debug!(
            key = name,
            removed = record.len() < base.len(),
            "delete property"
        );
        record
    }

    /// A value the patch leaves alone: shared, or copied when detached.
    pub(crate) fn carry(&self, value: &Node) -> Node {
        if self.config.share_unchanged {
            value.clone()
        } else {
            value.deep_clone()
        }
    }
}
