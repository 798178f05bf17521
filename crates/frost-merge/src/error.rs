//! Error types for the merge crate.

/// Errors that can occur while deriving a new record.
///
/// Every variant is raised at the point of detection and aborts the whole
/// operation. No partial result is ever returned, and the inputs are left
/// exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The base argument is not a sealed record.
    #[error("base is not an instance of the immutable record type (got {found})")]
    NotImmutable { found: &'static str },

    /// The patch is not a mapping (null, scalar, or array).
    #[error("invalid patch: expected a mapping, got {found}")]
    InvalidPatch { found: &'static str },

    /// Deep merge reached a pair that cannot be merged key by key.
    #[error("malformed merge pair at {path}: cannot merge {patch} into {base}")]
    MalformedMergePair {
        path: String,
        base: &'static str,
        patch: &'static str,
    },

    /// Deep merge went deeper than the configured limit.
    #[error("deep merge exceeded maximum depth {limit} at {path}")]
    DepthExceeded { path: String, limit: usize },
}

impl MergeError {
    /// Returns `true` for errors caused by the shape of the caller's input,
    /// as opposed to a configured limit.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::DepthExceeded { .. })
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
