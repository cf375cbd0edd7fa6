// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests running the archetypes against a project on disk.

use std::fs;
use std::path::Path;

use archetype::{
    configure_all, configure_library, configure_pages, ArchetypeError, ArchetypeOptions,
    BuildTarget, FsManifestReader, LibraryArchetype, LibraryTarget, PagesArchetype,
};
use serde_json::json;
use tempfile::tempdir;

fn write_manifest(dir: &Path, contents: &str) {
    fs::write(dir.join("package.json"), contents).unwrap();
}

#[test]
fn library_reads_peer_dependencies_from_disk() {
    let dir = tempdir().unwrap();
    write_manifest(
        dir.path(),
        r#"{
            "name": "widgets",
            "peerDependencies": { "react": "^16.0.0", "react-dom": "^16.0.0" },
            "devDependencies": { "webpack": "^3.0.0" }
        }"#,
    );

    let options = ArchetypeOptions::new(dir.path()).with_library("Widgets");
    let config = configure_library(&options, &FsManifestReader).unwrap();

    let output = config.output.as_ref().unwrap();
    assert_eq!(output.path.as_deref(), Some(dir.path().join("dist").as_path()));
    assert_eq!(output.filename.as_deref(), Some("index.js"));
    assert_eq!(output.library_target, Some(LibraryTarget::CommonJs2));

    let externals = config.externals.as_ref().unwrap();
    assert!(externals.contains("react"));
    assert!(externals.contains("react-dom"));
    assert!(!externals.contains("webpack"));
}

#[test]
fn library_for_test_target_drops_only_the_library_target() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), r#"{"name":"widgets"}"#);

    let default = configure_library(
        &ArchetypeOptions::new(dir.path()).with_library("Widgets"),
        &FsManifestReader,
    )
    .unwrap();
    let test = configure_library(
        &ArchetypeOptions::new(dir.path())
            .with_library("Widgets")
            .with_build_target(BuildTarget::Test),
        &FsManifestReader,
    )
    .unwrap();

    let mut expected = default.clone();
    if let Some(output) = expected.output.as_mut() {
        output.library_target = None;
    }
    assert_eq!(test, expected);
    assert!(test.externals.as_ref().unwrap().is_empty());
}

#[test]
fn library_without_manifest_fails() {
    let dir = tempdir().unwrap();
    let options = ArchetypeOptions::new(dir.path()).with_library("Widgets");

    let err = configure_library(&options, &FsManifestReader).unwrap_err();
    assert!(matches!(err, ArchetypeError::ManifestNotFound { .. }));
    assert!(err.to_string().contains("package.json"));
}

#[test]
fn pages_configuration_serializes_like_webpack_expects() {
    let options = ArchetypeOptions::new("/tmp/projec-path").with_pages(["index", "demo"]);
    let config = configure_pages(&options).unwrap();

    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(
        value["entry"],
        json!({ "index": ["./index"], "demo": ["./demo"] })
    );
    assert_eq!(value["output"]["path"], "/tmp/projec-path/dist");
    assert_eq!(value["output"]["filename"], "[name]-[hash].js");
    assert_eq!(value["output"]["chunkFilename"], "[name]-[hash].chunk.js");
    assert_eq!(value["plugins"].as_array().unwrap().len(), 3);
    assert!(value.get("externals").is_none());
}

#[test]
fn every_archetype_can_run_on_any_project() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), r#"{"peerDependencies":{"vue":"^2"}}"#);
    let library = LibraryArchetype::new(FsManifestReader);

    let pages_only = ArchetypeOptions::new(dir.path()).with_pages(["index"]);
    let config = configure_all(&pages_only, &[&library, &PagesArchetype]).unwrap();
    assert!(config.externals.is_none());
    assert_eq!(config.html_plugins().len(), 1);

    let library_only = ArchetypeOptions::new(dir.path()).with_library("Lib");
    let config = configure_all(&library_only, &[&library, &PagesArchetype]).unwrap();
    assert!(config.plugins.is_empty());
    assert!(config.externals.unwrap().contains("vue"));
}
