//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control which directories are
//! entered and which entries are visited at all, before any filtering.

/// Configuration for directory scanning behavior.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Whether to descend into subdirectories
    pub recursive: bool,

    /// Whether to visit entries whose name starts with `.`
    pub include_hidden: bool,

    /// Maximum directory depth for recursive listings (None = unlimited)
    pub max_depth: Option<usize>,

    /// Entry names that are neither listed nor descended into
    pub skip: Vec<String>,
}

impl ScanOptions {
    /// Deepest level that will be visited below a root directory.
    ///
    /// Immediate children are at depth 1. Without recursion only they are
    /// visited; otherwise the configured limit applies, if any.
    #[must_use]
    pub const fn effective_max_depth(&self) -> usize {
        if !self.recursive {
            return 1;
        }

        match self.max_depth {
            Some(depth) => depth,
            None => usize::MAX,
        }
    }
}
