//! Foundation types for Frost.
//!
//! This crate provides the value model that the merge engine operates on.
//! Every other Frost crate depends on `frost-types`.
//!
//! # Key Types
//!
//! - [`Record`] — Sealed, ordered property mapping; has no mutators
//! - [`Mapping`] — Unsealed, ordered property mapping (patches, plain nested objects)
//! - [`Node`] — Tagged variant over leaves, mappings and records, decided at ingestion
//! - [`Entries`] — Shared, ordered, key-unique entry storage behind both mapping kinds
//! - [`Terminality`] — Leaf-vs-mapping classification used by deep merge
//!
//! # Design Rules
//!
//! 1. A `Record` is sealed from the moment it is constructed.
//! 2. Keys are unique within one entry list; insertion order is preserved.
//! 3. Cloning any value is cheap: storage is shared behind `Arc`.
//! 4. Arrays are leaves. They are never merged element-wise.

pub mod entries;
pub mod error;
pub mod mapping;
pub mod node;
pub mod record;
pub mod terminal;

pub use entries::Entries;
pub use error::TypeError;
pub use mapping::Mapping;
pub use node::Node;
pub use record::Record;
pub use terminal::{both_mergeable, classify, is_terminal, Terminality};

/// Returns `true` if `node` is a sealed [`Record`].
pub fn is_sealed(node: &Node) -> bool {
    node.is_sealed()
}
