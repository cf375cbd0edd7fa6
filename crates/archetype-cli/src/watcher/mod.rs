// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! File system watching for rebuilds.
//!
//! This module provides `FileWatcher` for monitoring project sources and
//! triggering a rebuild of the shared compiler.
//!
//! # Features
//!
//! - Debounced file change events (300ms)
//! - Build output, dependencies and generated files are ignored
//! - Recursive directory watching

use globset::{Glob, GlobSet, GlobSetBuilder};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebouncedEvent, Debouncer, RecommendedCache};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Paths, relative to the watched root, that never trigger a rebuild.
pub const DEFAULT_IGNORES: &[&str] = &[
    "dist/**",
    "node_modules/**",
    ".archetype/**",
    ".git/**",
    "**/*.swp",
    "**/*~",
];

/// Builds the ignore set from glob patterns.
pub fn build_ignore_set(patterns: &[&str]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Relative paths of `paths` under `base_path` that are not ignored.
pub fn relevant_changes<'a, I>(paths: I, base_path: &Path, ignore: &GlobSet) -> Vec<PathBuf>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    let mut changed: Vec<PathBuf> = paths
        .into_iter()
        .map(|p| p.strip_prefix(base_path).unwrap_or(p).to_path_buf())
        .filter(|p| !ignore.is_match(p))
        .collect();
    changed.sort();
    changed.dedup();
    changed
}

/// Watches a project directory for source changes.
pub struct FileWatcher {
    #[allow(dead_code)]
    debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
}

impl FileWatcher {
    /// Creates a new file watcher for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory path to watch recursively
    /// * `ignore` - Globs, relative to `path`, whose changes are dropped
    /// * `on_change` - Callback invoked with the relevant changed paths
    pub fn new<F>(path: PathBuf, ignore: GlobSet, on_change: F) -> anyhow::Result<Self>
    where
        F: Fn(Vec<PathBuf>) + Send + 'static,
    {
        let base_path = path.clone();

        let mut debouncer = new_debouncer(
            Duration::from_millis(300),
            None,
            move |result: Result<Vec<DebouncedEvent>, Vec<notify::Error>>| match result {
                Ok(events) => {
                    let changed = relevant_changes(
                        events.iter().flat_map(|e| e.paths.iter()),
                        &base_path,
                        &ignore,
                    );
                    if !changed.is_empty() {
                        on_change(changed);
                    }
                }
                Err(errors) => {
                    for error in errors {
                        tracing::warn!(error = %error, "watch error");
                    }
                }
            },
        )?;

        debouncer.watch(&path, RecursiveMode::Recursive)?;

        Ok(Self { debouncer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_build_output_and_dependencies() {
        let ignore = build_ignore_set(DEFAULT_IGNORES).unwrap();
        let base = PathBuf::from("/project");
        let paths = vec![
            base.join("index.js"),
            base.join("dist/index-abc.js"),
            base.join("node_modules/react/index.js"),
            base.join(".archetype/webpack.config.js"),
            base.join("src/demo.js"),
            base.join("index.js"),
        ];

        let changed = relevant_changes(&paths, &base, &ignore);
        assert_eq!(
            changed,
            vec![PathBuf::from("index.js"), PathBuf::from("src/demo.js")]
        );
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(build_ignore_set(&["[unclosed"]).is_err());
    }
}
