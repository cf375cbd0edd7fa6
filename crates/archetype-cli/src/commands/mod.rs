// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `config`: Print the resolved bundle configuration
//! - `build`: Run one production build
//! - `dev`: Start the development server with hot reload

/// Production build command.
pub mod build;
/// Configuration printing command.
pub mod config;
/// Development server command.
pub mod dev;

use archetype::{configure_all, BundleConfig, FsManifestReader, LibraryArchetype, PagesArchetype};
use std::path::Path;

use crate::config::Config;

/// Runs every archetype for the project at `project_path` and merges the results.
///
/// Fails when no archetype applies, since there is nothing to build.
pub fn resolve_bundle_config(config: &Config, project_path: &Path) -> anyhow::Result<BundleConfig> {
    let options = config.archetype_options(project_path);
    let library = LibraryArchetype::new(FsManifestReader);

    let bundle = configure_all(&options, &[&library, &PagesArchetype])?;
    if bundle.is_empty() {
        anyhow::bail!(
            "No archetype applies: set `library` or `pages` under [project] in {}",
            crate::config::CONFIG_FILE
        );
    }
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requires_an_archetype() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_bundle_config(&Config::default(), dir.path()).unwrap_err();
        assert!(err.to_string().contains("No archetype applies"));
    }

    #[test]
    fn test_resolve_pages_project() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.project.pages = Some(vec!["index".to_string(), "demo".to_string()]);

        let bundle = resolve_bundle_config(&config, dir.path()).unwrap();
        assert_eq!(bundle.html_plugins().len(), 2);
        assert_eq!(bundle.output_path(), Some(&dir.path().join("dist")));
    }

    #[test]
    fn test_resolve_library_without_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.project.library = Some("Lib".to_string());

        let err = resolve_bundle_config(&config, dir.path()).unwrap_err();
        assert!(err.to_string().contains("Manifest not found"));
    }
}
