//! Merge engine for Frost.
//!
//! Derives new sealed [`Record`]s from an existing record plus a patch,
//! either one level deep ([`set`]) or recursively ([`set_deep`]). Inputs are
//! never modified; values the patch leaves alone are shared by reference
//! between the base and the result.
//!
//! # Ordering
//!
//! Keys present in the base keep the base's order, whether or not their
//! value changed. Keys present only in the patch are appended after them,
//! in the patch's order. Deleting a key and setting it again therefore moves
//! it to the end.
//!
//! # Quick Start
//!
//! ```rust
//! use frost_merge::{set_deep, RecordMergeExt};
//! use frost_types::{Node, Record};
//! use serde_json::json;
//!
//! let base = Record::try_from(json!({"k": {"m": 1, "n": 2}})).unwrap();
//! let next = base.set_deep(&Node::from(json!({"k": {"n": 9, "p": 3}}))).unwrap();
//! assert_eq!(next.to_json(), json!({"k": {"m": 1, "n": 9, "p": 3}}));
//!
//! // The free function takes any node and checks that the base is sealed.
//! let err = set_deep(&Node::from(json!({})), &Node::from(json!({}))).unwrap_err();
//! assert!(err.is_validation());
//! ```

pub mod config;
pub mod deep;
pub mod error;
pub mod ext;
pub mod merger;
pub mod shallow;

pub use config::MergeConfig;
pub use error::{MergeError, MergeResult};
pub use ext::RecordMergeExt;
pub use merger::Merger;

pub use frost_types::{is_sealed, is_terminal, Mapping, Node, Record};

/// Shallow merge with the default configuration. See [`Merger::set`].
pub fn set(base: &Node, patch: &Node) -> MergeResult<Record> {
    Merger::default().set(base, patch)
}

/// Single-property shallow merge. See [`Merger::set_property`].
pub fn set_property(
    base: &Node,
    name: impl Into<String>,
    value: impl Into<Node>,
) -> MergeResult<Record> {
    Merger::default().set_property(base, name, value)
}

/// Copy without one key. See [`Merger::delete_property`].
pub fn delete_property(base: &Node, name: &str) -> MergeResult<Record> {
    Merger::default().delete_property(base, name)
}

/// Deep merge with the default configuration. See [`Merger::set_deep`].
pub fn set_deep(base: &Node, patch: &Node) -> MergeResult<Record> {
    Merger::default().set_deep(base, patch)
}

/// Deep merge of arbitrary mapping nodes. See [`Merger::merge_deep`].
pub fn merge_deep(base: &Node, patch: &Node) -> MergeResult<Node> {
    Merger::default().merge_deep(base, patch)
}

/// Build one record from several sources. See [`Merger::construct`].
pub fn construct<'a, I>(sources: I) -> MergeResult<Record>
where
    I: IntoIterator<Item = &'a Node>,
{
    Merger::default().construct(sources)
}

/// The values of a sealed record, in key order.
pub fn values(value: &Node) -> MergeResult<Vec<Node>> {
    let record = merger::require_record(value)?;
    Ok(record.values().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn sealed(value: Value) -> Node {
        Node::from(value).into_sealed()
    }

    fn keys(record: &Record) -> Vec<&str> {
        record.keys().collect()
    }

    #[test]
    fn shallow_merge_preserves_order() {
        let base = sealed(json!({"a": 1, "b": 2, "c": 3}));
        let result = set(&base, &Node::from(json!({"b": "x", "d": "y"}))).unwrap();
        assert_eq!(keys(&result), vec!["a", "b", "c", "d"]);
        assert_eq!(result.get("b"), Some(&Node::from("x")));
    }

    #[test]
    fn merges_never_mutate_inputs() {
        let base = sealed(json!({"a": {"x": 1}, "b": [1, 2], "c": "s"}));
        let patch = Node::from(json!({"a": {"y": 2}, "b": [3], "d": null}));
        let base_before = base.deep_clone();
        let patch_before = patch.deep_clone();

        set(&base, &patch).unwrap();
        set_deep(&base, &patch).unwrap();
        set_property(&base, "a", 0i64).unwrap();
        delete_property(&base, "a").unwrap();
        values(&base).unwrap();

        assert_eq!(base, base_before);
        assert_eq!(patch, patch_before);
        assert_eq!(
            base.entries().unwrap().keys().collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn deep_terminal_replace() {
        let result = set_deep(&sealed(json!({"k": {"m": 1}})), &Node::from(json!({"k": 5})));
        assert_eq!(result.unwrap().to_json(), json!({"k": 5}));
    }

    #[test]
    fn deep_recursive_merge() {
        let result = set_deep(
            &sealed(json!({"k": {"m": 1, "n": 2}})),
            &Node::from(json!({"k": {"n": 9, "p": 3}})),
        )
        .unwrap();
        assert_eq!(result.to_json(), json!({"k": {"m": 1, "n": 9, "p": 3}}));
        let inner: Vec<&str> = result.get("k").unwrap().entries().unwrap().keys().collect();
        assert_eq!(inner, vec!["m", "n", "p"]);
    }

    #[test]
    fn delete_then_re_add_appends() {
        let base = sealed(json!({"a": 1, "b": 2}));
        let deleted = delete_property(&base, "a").unwrap();
        let re_added = set(&Node::from(deleted), &Node::from(json!({"a": 9}))).unwrap();
        assert_eq!(keys(&re_added), vec!["b", "a"]);
    }

    #[test]
    fn values_accessor_is_idempotent() {
        let base = sealed(json!({"b": 1, "a": {"x": true}, "c": [1]}));
        let first = values(&base).unwrap();
        let second = values(&base).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[0], Node::from(1i64));
        assert_eq!(base.to_json(), json!({"b": 1, "a": {"x": true}, "c": [1]}));
    }

    #[test]
    fn values_requires_a_record() {
        assert_eq!(
            values(&Node::from(json!({"a": 1}))).unwrap_err(),
            MergeError::NotImmutable { found: "mapping" }
        );
    }

    #[test]
    fn invalid_patches_are_rejected() {
        let base = sealed(json!({"a": 1}));
        let before = base.deep_clone();
        assert_eq!(
            set(&base, &Node::from(json!([1, 2]))).unwrap_err(),
            MergeError::InvalidPatch { found: "array" }
        );
        assert_eq!(
            set(&base, &Node::null()).unwrap_err(),
            MergeError::InvalidPatch { found: "null" }
        );
        assert_eq!(base, before);
    }

    #[test]
    fn empty_deep_patch_shares_every_sub_value() {
        let base = sealed(json!({
            "nested": {"a": {"b": 1}},
            "sealed": {"x": 1},
            "list": [1, 2],
            "n": 3
        }))
        .sealed_deep();
        let result = set_deep(&base, &Node::from(json!({}))).unwrap();
        let base = base.as_record().unwrap();

        assert!(!result.ptr_eq(base));
        for ((rk, rv), (bk, bv)) in result.iter().zip(base.iter()) {
            assert_eq!(rk, bk);
            assert!(rv.ptr_eq(bv), "{rk} was copied");
        }
    }

    #[test]
    fn concurrent_derivations_from_one_base() {
        let base = sealed(json!({"counter": 0, "shared": {"x": 1}}));
        let results: Vec<Record> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8i64)
                .map(|i| {
                    let base = &base;
                    scope.spawn(move || {
                        set_deep(base, &Node::from(json!({"counter": i, "shared": {"y": i}})))
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (i, result) in results.iter().enumerate() {
            assert_eq!(
                result.to_json(),
                json!({"counter": i, "shared": {"x": 1, "y": i}})
            );
        }
        assert_eq!(base.to_json(), json!({"counter": 0, "shared": {"x": 1}}));
    }

    #[test]
    fn construct_then_derive() {
        let defaults = Node::from(json!({"retries": 3, "log": {"level": "info"}}));
        let overrides = Node::from(json!({"log": {"format": "json"}}));
        let record = construct([&defaults]).unwrap();
        let merged = set_deep(&Node::from(record.clone()), &overrides).unwrap();
        assert_eq!(
            merged.to_json(),
            json!({"retries": 3, "log": {"level": "info", "format": "json"}})
        );
        assert!(is_sealed(&Node::from(merged)));
        assert!(!is_terminal(&Node::from(record)));
    }

    fn key_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-f]{1,2}", 0..8)
    }

    fn record_from_keys(keys: &[String], tag: i64) -> Node {
        let pairs = keys.iter().map(|k| (k.clone(), Node::from(tag)));
        Node::from(Record::from_entries(pairs))
    }

    proptest! {
        #[test]
        fn result_keys_are_base_keys_then_new_patch_keys(
            base_keys in key_list(),
            patch_keys in key_list(),
        ) {
            let base = record_from_keys(&base_keys, 0);
            let patch = Node::from(Mapping::from(
                record_from_keys(&patch_keys, 1).entries().cloned().unwrap(),
            ));
            let base_order: Vec<String> =
                base.entries().unwrap().keys().map(str::to_string).collect();
            let patch_order: Vec<String> =
                patch.entries().unwrap().keys().map(str::to_string).collect();

            let mut expected = base_order.clone();
            for key in &patch_order {
                if !expected.contains(key) {
                    expected.push(key.clone());
                }
            }

            for result in [set(&base, &patch).unwrap(), set_deep(&base, &patch).unwrap()] {
                let got: Vec<String> = result.keys().map(str::to_string).collect();
                prop_assert_eq!(&got, &expected);
                for key in &patch_order {
                    prop_assert_eq!(result.get(key), Some(&Node::from(1i64)));
                }
            }
            prop_assert_eq!(
                base.entries().unwrap().keys().map(str::to_string).collect::<Vec<_>>(),
                base_order
            );
        }

        #[test]
        fn delete_removes_exactly_one_key(keys in key_list(), victim in "[a-f]{1,2}") {
            let base = record_from_keys(&keys, 0);
            let result = delete_property(&base, &victim).unwrap();
            let expected: Vec<&str> = base
                .entries()
                .unwrap()
                .keys()
                .filter(|k| *k != victim)
                .collect();
            prop_assert_eq!(result.keys().collect::<Vec<_>>(), expected);
            prop_assert!(!result.contains_key(&victim));
        }
    }
}
