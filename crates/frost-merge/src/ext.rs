use frost_types::{Entries, Node, Record};

use crate::error::MergeResult;
use crate::merger::{require_patch, Merger};

/// Derivation methods on [`Record`] itself.
///
/// These are the typed counterparts of the crate-level functions: the base
/// is a `Record` by construction, so only the patch is validated, and the
/// single-property helpers cannot fail at all.
pub trait RecordMergeExt {
    /// Shallow merge. See [`Merger::set`].
    fn set(&self, patch: &Node) -> MergeResult<Record>;

    /// Shallow merge of a single property.
    fn set_property(&self, name: impl Into<String>, value: impl Into<Node>) -> Record;

    /// Copy without `name`. See [`Merger::delete_property`].
    fn delete_property(&self, name: &str) -> Record;

    /// Deep merge. See [`Merger::set_deep`].
    fn set_deep(&self, patch: &Node) -> MergeResult<Record>;
}

impl RecordMergeExt for Record {
    fn set(&self, patch: &Node) -> MergeResult<Record> {
        let patch = require_patch(patch)?;
        Ok(Merger::default().overlay(self.entries(), patch))
    }

    fn set_property(&self, name: impl Into<String>, value: impl Into<Node>) -> Record {
        let patch = Entries::from_pairs([(name.into(), value.into())]);
        Merger::default().overlay(self.entries(), &patch)
    }

    fn delete_property(&self, name: &str) -> Record {
        Merger::default().without(self.entries(), name)
    }

    fn set_deep(&self, patch: &Node) -> MergeResult<Record> {
        let patch = require_patch(patch)?;
        Merger::default().derive_deep(self, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergeError;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[test]
    fn chained_derivations() {
        let v1 = record(json!({"name": "a", "tags": {"x": 1}}));
        let v2 = v1.set_property("name", "b");
        let v3 = v2.set_deep(&Node::from(json!({"tags": {"y": 2}}))).unwrap();
        let v4 = v3.delete_property("name");

        assert_eq!(v1.to_json(), json!({"name": "a", "tags": {"x": 1}}));
        assert_eq!(v2.to_json(), json!({"name": "b", "tags": {"x": 1}}));
        assert_eq!(v3.to_json(), json!({"name": "b", "tags": {"x": 1, "y": 2}}));
        assert_eq!(v4.to_json(), json!({"tags": {"x": 1, "y": 2}}));
    }

    #[test]
    fn typed_set_still_validates_patch() {
        let base = record(json!({"a": 1}));
        assert_eq!(
            base.set(&Node::from(json!([1, 2]))).unwrap_err(),
            MergeError::InvalidPatch { found: "array" }
        );
        assert_eq!(
            base.set_deep(&Node::null()).unwrap_err(),
            MergeError::InvalidPatch { found: "null" }
        );
    }

    #[test]
    fn every_derivation_is_a_new_instance() {
        let base = record(json!({"a": 1}));
        assert!(!base.set(&Node::from(json!({}))).unwrap().ptr_eq(&base));
        assert!(!base.set_deep(&Node::from(json!({}))).unwrap().ptr_eq(&base));
        assert!(!base.delete_property("missing").ptr_eq(&base));
        assert!(!base.set_property("a", 1i64).ptr_eq(&base));
    }
}
