//! Name-based allow/block lists used when refreshing vendored trees.
//!
//! The keep-list decides which entries survive a [`crate::clear::clear`]
//! pass; the skip-list decides which upstream entries are never imported.
//!
//! # Examples
//!
//! ```
//! use common::filter::{KeepSet, SkipSet};
//!
//! let keep = KeepSet::new(&["readme.txt"], Some("emscripten"));
//! assert!(keep.is_kept("README.txt"));
//! assert!(keep.is_kept("emscripten_mmap.c"));
//! assert!(!keep.is_kept("atomic.c"));
//!
//! let skip = SkipSet::new(&["CMakeLists.txt", "*.S"]).unwrap();
//! assert!(skip.is_skipped("clear_cache.S"));
//! assert!(!skip.is_skipped("atomic.c"));
//! ```

use anyhow::Context;

/// Entry names that survive a clear pass.
///
/// A name is kept when it equals one of the configured names (ASCII
/// case-insensitive) or contains the marker substring. The marker protects
/// locally-added files that carry the project marker in their name.
#[derive(Debug, Clone, Default)]
pub struct KeepSet {
    names: Vec<String>,
    marker: Option<String>,
}

impl KeepSet {
    pub fn new(names: &[&str], marker: Option<&str>) -> Self {
        Self {
            names: names.iter().map(|name| name.to_ascii_lowercase()).collect(),
            marker: marker.map(str::to_string),
        }
    }

    /// Check whether an entry with this name should be left in place.
    pub fn is_kept(&self, name: &str) -> bool {
        let lowered = name.to_ascii_lowercase();
        if self.names.contains(&lowered) {
            return true;
        }
        self.marker
            .as_deref()
            .is_some_and(|marker| name.contains(marker))
    }
}

/// Entry names that are never imported from upstream.
///
/// Patterns use glob syntax over the plain entry name (no path
/// components): exact names like `CMakeLists.txt` or suffix patterns like
/// `*.S`. Patterns are validated and compiled once at construction.
#[derive(Debug, Clone)]
pub struct SkipSet {
    set: globset::GlobSet,
}

impl SkipSet {
    pub fn new(patterns: &[&str]) -> Result<Self, anyhow::Error> {
        let mut builder = globset::GlobSetBuilder::new();
        for pattern in patterns {
            let glob = globset::GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .with_context(|| format!("invalid skip pattern: {pattern}"))?;
            builder.add(glob);
        }
        let set = builder.build().context("failed compiling skip patterns")?;
        Ok(Self { set })
    }

    /// Check whether an upstream entry with this name should be skipped.
    pub fn is_skipped(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}
