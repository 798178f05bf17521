use serde::{Deserialize, Serialize};

/// Configuration for a [`Merger`](crate::Merger).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Maximum nesting depth deep merge may descend to. The top level is
    /// depth 0. `None` means unlimited.
    pub max_depth: Option<usize>,
    /// When `true`, values the patch does not touch are carried into the
    /// result by reference. When `false`, they are deep-copied, so the
    /// result shares no storage with the base.
    pub share_unchanged: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            share_unchanged: true,
        }
    }
}

impl MergeConfig {
    /// A configuration whose results never share storage with their base.
    pub fn detached() -> Self {
        Self {
            share_unchanged: false,
            ..Default::default()
        }
    }

    /// Limit deep merge recursion to `depth` levels below the top.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}
