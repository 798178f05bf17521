//! Recursive, order-preserving deep merge.

use std::collections::{HashMap, HashSet};

use frost_types::{both_mergeable, Entries, Mapping, Node, Record};
use tracing::{debug, trace};

use crate::error::{MergeError, MergeResult};
use crate::merger::Merger;

impl Merger {
    /// Deep merge two arbitrary nodes.
    ///
    /// Unlike [`set_deep`](Self::set_deep), the base does not have to be
    /// sealed: plain mappings merge too. The result is a [`Record`] if
    /// either side is one, otherwise a [`Mapping`]. The same rule applies at
    /// every nested level, so only levels that were already sealed come out
    /// sealed.
    pub fn merge_deep(&self, base: &Node, patch: &Node) -> MergeResult<Node> {
        let mut path = Vec::new();
        let merged = self.merge_level(base, patch, &mut path)?;
        debug!(sealed = merged.is_sealed(), "deep merge");
        Ok(merged)
    }

    pub(crate) fn derive_deep(&self, base: &Record, patch: &Entries) -> MergeResult<Record> {
        let mut path = Vec::new();
        let merged = self.merge_entries(base.entries(), patch, &mut path)?;
        debug!(
            base_keys = base.len(),
            patch_keys = patch.len(),
            result_keys = merged.len(),
            "deep merge"
        );
        Ok(Record::from_entries(merged))
    }

    fn merge_level(
        &self,
        base: &Node,
        patch: &Node,
        path: &mut Vec<String>,
    ) -> MergeResult<Node> {
        let (Some(base_entries), Some(patch_entries)) = (base.entries(), patch.entries()) else {
            return Err(MergeError::MalformedMergePair {
                path: render_path(path),
                base: base.kind_name(),
                patch: patch.kind_name(),
            });
        };
        if let Some(limit) = self.config.max_depth {
            if path.len() > limit {
                return Err(MergeError::DepthExceeded {
                    path: render_path(path),
                    limit,
                });
            }
        }

        let merged = self.merge_entries(base_entries, patch_entries, path)?;
        if base.is_sealed() || patch.is_sealed() {
            Ok(Node::Record(Record::from_entries(merged)))
        } else {
            Ok(Node::Mapping(Mapping::from_entries(merged)))
        }
    }

    /// Walk `base` in order, then append what only `patch` has.
    fn merge_entries(
        &self,
        base: &Entries,
        patch: &Entries,
        path: &mut Vec<String>,
    ) -> MergeResult<Vec<(String, Node)>> {
        let patch_values: HashMap<&str, &Node> = patch.iter().collect();
        let mut merged = Vec::with_capacity(base.len() + patch.len());

        for (key, base_value) in base.iter() {
            let value = match patch_values.get(key) {
                None => self.carry(base_value),
                Some(patch_value) if both_mergeable(base_value, patch_value) => {
                    path.push(key.to_string());
                    trace!(path = %render_path(path), "descending into nested mapping");
                    let child = self.merge_level(base_value, patch_value, path)?;
                    path.pop();
                    child
                }
                Some(patch_value) => Node::clone(patch_value),
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
        Ok(merged)
    }
}

fn render_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(".")
    }
}
