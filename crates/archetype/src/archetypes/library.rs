// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Library archetype: one entry, one output file, peer dependencies external.

use super::Archetype;
use crate::config::{BundleConfig, Entry, LibraryTarget, Output};
use crate::error::Result;
use crate::manifest::{probe_externals, ManifestReader};
use crate::options::ArchetypeOptions;

const LIBRARY_ENTRY: &str = "./index";
const LIBRARY_FILENAME: &str = "index.js";

/// Configures a reusable library bundle.
///
/// Returns the empty configuration when no library name is set. Otherwise the
/// project manifest is read to mark peer dependencies as externals, and a
/// missing or malformed manifest is returned as an error.
///
/// Test bundles get no `libraryTarget`: test harnesses load them directly and
/// a module wrapper would break that.
pub fn configure_library(
    options: &ArchetypeOptions,
    reader: &dyn ManifestReader,
) -> Result<BundleConfig> {
    let Some(library) = options.library_name() else {
        return Ok(BundleConfig::empty());
    };

    let externals = probe_externals(reader, options.project_path())?;

    let library_target = if options.build_target.is_test() {
        None
    } else {
        Some(LibraryTarget::CommonJs2)
    };

    Ok(BundleConfig {
        entry: Some(Entry::Single(LIBRARY_ENTRY.to_string())),
        output: Some(Output {
            path: Some(options.dist_dir()),
            filename: Some(LIBRARY_FILENAME.to_string()),
            chunk_filename: None,
            library_target,
            library: Some(library.to_string()),
        }),
        externals: Some(externals),
        plugins: Vec::new(),
    })
}

/// [`configure_library`] bound to a manifest reader.
#[derive(Debug, Clone)]
pub struct LibraryArchetype<R> {
    reader: R,
}

impl<R: ManifestReader> LibraryArchetype<R> {
    /// Creates the archetype reading manifests through `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: ManifestReader> Archetype for LibraryArchetype<R> {
    fn name(&self) -> &'static str {
        "webpack-archetype-library"
    }

    fn configure(&self, options: &ArchetypeOptions) -> Result<BundleConfig> {
        configure_library(options, &self.reader)
    }
}
