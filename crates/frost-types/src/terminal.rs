//! Terminal classification: which values deep merge replaces wholesale and
//! which it descends into.

use crate::node::Node;

/// How deep merge treats a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terminality {
    /// Replaced outright; never recursed into.
    Leaf,
    /// Merged key by key.
    Mapping,
}

impl Terminality {
    /// Returns `true` for [`Terminality::Leaf`].
    pub fn is_terminal(self) -> bool {
        self == Self::Leaf
    }
}

/// Classify a node. Mappings and records are non-terminal; every leaf,
/// arrays included, is terminal.
pub fn classify(node: &Node) -> Terminality {
    match node {
        Node::Leaf(_) => Terminality::Leaf,
        Node::Mapping(_) | Node::Record(_) => Terminality::Mapping,
    }
}

/// Returns `true` if deep merge must replace `node` instead of merging into it.
pub fn is_terminal(node: &Node) -> bool {
    classify(node).is_terminal()
}

/// Returns `true` only if both sides can be merged key by key.
///
/// One terminal side is enough to force a replacement.
pub fn both_mergeable(base: &Node, patch: &Node) -> bool {
    !is_terminal(base) && !is_terminal(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;
    use serde_json::json;

    #[test]
    fn primitives_are_terminal() {
        for value in [json!(null), json!(true), json!(1), json!(1.5), json!("s")] {
            assert!(is_terminal(&Node::from(value)));
        }
    }

    #[test]
    fn arrays_are_terminal() {
        assert!(is_terminal(&Node::from(json!([]))));
        assert!(is_terminal(&Node::from(json!([{"a": 1}]))));
    }

    #[test]
    fn mappings_and_records_are_not_terminal() {
        assert_eq!(classify(&Node::from(json!({}))), Terminality::Mapping);
        assert_eq!(classify(&Node::from(Record::new())), Terminality::Mapping);
    }

    #[test]
    fn asymmetric_pair_is_not_mergeable() {
        let mapping = Node::from(json!({"m": 1}));
        let leaf = Node::from(5i64);
        assert!(!both_mergeable(&mapping, &leaf));
        assert!(!both_mergeable(&leaf, &mapping));
        assert!(!both_mergeable(&leaf, &leaf));
        assert!(both_mergeable(&mapping, &Node::from(Record::new())));
    }
}
