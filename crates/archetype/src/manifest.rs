// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project manifest (`package.json`) access and externals probing.
//!
//! Reading goes through [`ManifestReader`] so configurators can be driven
//! from memory in tests and embedders without touching the filesystem.

use crate::error::{ArchetypeError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// File name of the manifest inside a project directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Reads raw manifest contents.
pub trait ManifestReader: Send + Sync {
    /// Returns the contents of the file at `path`.
    ///
    /// Implementations report a missing file as [`ArchetypeError::ManifestNotFound`].
    fn read_manifest(&self, path: &Path) -> Result<String>;
}

impl<R: ManifestReader + ?Sized> ManifestReader for &R {
    fn read_manifest(&self, path: &Path) -> Result<String> {
        (**self).read_manifest(path)
    }
}

impl<R: ManifestReader + ?Sized> ManifestReader for Arc<R> {
    fn read_manifest(&self, path: &Path) -> Result<String> {
        (**self).read_manifest(path)
    }
}

/// Reads manifests from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsManifestReader;

impl ManifestReader for FsManifestReader {
    fn read_manifest(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ArchetypeError::ManifestNotFound {
                path: path.to_path_buf(),
            },
            _ => ArchetypeError::Io(e),
        })
    }
}

/// In-memory manifest store keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryManifestReader {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryManifestReader {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `contents` as the manifest of `project_path`.
    pub fn insert(&self, project_path: impl AsRef<Path>, contents: impl Into<String>) {
        let path = project_path.as_ref().join(MANIFEST_FILE);
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, contents.into());
    }
}

impl ManifestReader for MemoryManifestReader {
    fn read_manifest(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| ArchetypeError::ManifestNotFound {
                path: path.to_path_buf(),
            })
    }
}

/// The subset of `package.json` archetypes care about.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Dependencies the host project is expected to provide.
    #[serde(default)]
    pub peer_dependencies: Option<BTreeMap<String, serde_json::Value>>,
}

impl PackageManifest {
    /// Loads and parses the manifest of `project_path`.
    pub fn load(reader: &dyn ManifestReader, project_path: &Path) -> Result<Self> {
        let path = project_path.join(MANIFEST_FILE);
        let content = reader.read_manifest(&path)?;
        serde_json::from_str(&content)
            .map_err(|source| ArchetypeError::MalformedManifest { path, source })
    }

    /// Names of the declared peer dependencies.
    pub fn peer_dependency_names(&self) -> BTreeSet<String> {
        self.peer_dependencies
            .as_ref()
            .map(|deps| deps.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Returns the peer dependency names of the project, to be kept out of the bundle.
pub fn probe_externals(
    reader: &dyn ManifestReader,
    project_path: &Path,
) -> Result<BTreeSet<String>> {
    let manifest = PackageManifest::load(reader, project_path)?;
    let externals = manifest.peer_dependency_names();
    debug!(
        project = %project_path.display(),
        count = externals.len(),
        "probed externals"
    );
    Ok(externals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_peer_dependencies() {
        let reader = MemoryManifestReader::new();
        reader.insert(
            "/project",
            r#"{"name":"lib","peerDependencies":{"react":"^16","react-dom":"^16"}}"#,
        );

        let externals = probe_externals(&reader, Path::new("/project")).unwrap();
        let expected: BTreeSet<String> =
            ["react", "react-dom"].iter().map(|s| s.to_string()).collect();
        assert_eq!(externals, expected);
    }

    #[test]
    fn test_probe_without_peer_dependencies() {
        let reader = MemoryManifestReader::new();
        reader.insert("/project", r#"{"name":"lib","dependencies":{"lodash":"4"}}"#);

        let externals = probe_externals(&reader, Path::new("/project")).unwrap();
        assert!(externals.is_empty());
    }

    #[test]
    fn test_probe_null_peer_dependencies() {
        let reader = MemoryManifestReader::new();
        reader.insert("/project", r#"{"peerDependencies":null}"#);

        let externals = probe_externals(&reader, Path::new("/project")).unwrap();
        assert!(externals.is_empty());
    }

    #[test]
    fn test_probe_missing_manifest() {
        let reader = MemoryManifestReader::new();
        let err = probe_externals(&reader, Path::new("/nowhere")).unwrap_err();
        match err {
            ArchetypeError::ManifestNotFound { path } => {
                assert_eq!(path, PathBuf::from("/nowhere/package.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_probe_malformed_manifest() {
        let reader = MemoryManifestReader::new();
        reader.insert("/project", "{ not json");

        let err = probe_externals(&reader, Path::new("/project")).unwrap_err();
        assert!(matches!(err, ArchetypeError::MalformedManifest { .. }));
    }

    #[test]
    fn test_memory_reader_survives_poisoned_lock() {
        let reader = MemoryManifestReader::new();
        let files = reader.files.clone();
        let _ = std::thread::spawn(move || {
            let _guard = files.lock().unwrap();
            panic!("poison the store");
        })
        .join();

        reader.insert("/project", r#"{"peerDependencies":{"react":"^16"}}"#);
        let externals = probe_externals(&reader, Path::new("/project")).unwrap();
        assert!(externals.contains("react"));
    }

    #[test]
    fn test_fs_reader_reports_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsManifestReader
            .read_manifest(&dir.path().join(MANIFEST_FILE))
            .unwrap_err();
        assert!(matches!(err, ArchetypeError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_fs_reader_reads_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"peerDependencies":{"vue":"^2"}}"#,
        )
        .unwrap();

        let externals = probe_externals(&FsManifestReader, dir.path()).unwrap();
        assert!(externals.contains("vue"));
        assert_eq!(externals.len(), 1);
    }
}
