// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! Archetype-based webpack configuration.
//!
//! An *archetype* is a preset of bundler configuration for a recurring project
//! shape. Two are provided:
//!
//! - **library**: a single `./index` entry bundled to `dist/index.js`, with the
//!   project's peer dependencies left external
//! - **pages**: one entry and one emitted HTML page per page name, with shared
//!   code extracted into a `common` chunk when there are several pages
//!
//! Each configurator is a pure function of [`ArchetypeOptions`] (plus, for the
//! library archetype, the project's `package.json`). An archetype that does not
//! apply returns the empty [`BundleConfig`], so results can be merged.
//!
//! # Quick Start
//!
//! ```
//! use archetype::{configure_pages, ArchetypeOptions};
//!
//! let options = ArchetypeOptions::new("/srv/app").with_pages(["index", "demo"]);
//! let config = configure_pages(&options).unwrap();
//!
//! assert_eq!(config.html_plugins().len(), 2);
//! assert_eq!(config.commons_chunk_count(), 1);
//! ```
//!
//! # Reading manifests
//!
//! The library archetype reads `package.json` through a [`ManifestReader`].
//! Use [`FsManifestReader`] for real projects and [`MemoryManifestReader`]
//! to run without a filesystem.

/// Archetype configurators and their common trait.
pub mod archetypes;
/// Typed webpack configuration.
pub mod config;
/// Error types.
pub mod error;
/// `package.json` access and externals probing.
pub mod manifest;
/// Options accepted by every archetype.
pub mod options;
/// Rendering configurations as `webpack.config.js` modules.
pub mod render;

pub use archetypes::{
    configure_all, configure_library, configure_pages, Archetype, LibraryArchetype,
    PagesArchetype,
};
pub use config::{
    BundleConfig, CommonsChunkOptions, Entry, HtmlPluginOptions, LibraryTarget, Output, Plugin,
    COMMON_CHUNK,
};
pub use error::{ArchetypeError, Result};
pub use manifest::{
    probe_externals, FsManifestReader, ManifestReader, MemoryManifestReader, PackageManifest,
    MANIFEST_FILE,
};
pub use options::{ArchetypeOptions, BuildTarget};
pub use render::render_module;
