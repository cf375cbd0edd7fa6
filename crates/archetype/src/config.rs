// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Typed webpack configuration.
//!
//! [`BundleConfig`] is a closed record of the keys archetypes produce. Every
//! field is optional so the empty value stands for "archetype not applicable"
//! and serializes to `{}`.
//!
//! # Example
//!
//! ```
//! use archetype::{BundleConfig, Entry};
//!
//! let config = BundleConfig {
//!     entry: Some(Entry::Single("./index".to_string())),
//!     ..Default::default()
//! };
//! assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"entry":"./index"}"#);
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Name of the chunk that holds code shared between pages.
pub const COMMON_CHUNK: &str = "common";

/// A webpack configuration fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundleConfig {
    /// Entry points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Entry>,
    /// Output location and naming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,
    /// Module names left out of the bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub externals: Option<BTreeSet<String>>,
    /// Plugin descriptors, in application order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Plugin>,
}

/// Entry point specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A single module path.
    Single(String),
    /// Named entries, kept in insertion order.
    Named(Vec<(String, Vec<String>)>),
}

impl Entry {
    /// Names of the named entries; empty for a single entry.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Entry::Single(_) => Vec::new(),
            Entry::Named(entries) => entries.iter().map(|(name, _)| name.as_str()).collect(),
        }
    }

    /// Modules for the named entry `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        match self {
            Entry::Single(_) => None,
            Entry::Named(entries) => entries
                .iter()
                .find(|(entry, _)| entry == name)
                .map(|(_, modules)| modules.as_slice()),
        }
    }
}

impl Serialize for Entry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Entry::Single(module) => serializer.serialize_str(module),
            Entry::Named(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (name, modules) in entries {
                    map.serialize_entry(name, modules)?;
                }
                map.end()
            }
        }
    }
}

/// Output section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Directory emitted files land in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// File name pattern for entry bundles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// File name pattern for non-entry chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<String>,
    /// Module format the library is exported as.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_target: Option<LibraryTarget>,
    /// Exported library name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
}

impl Output {
    /// Fills every field of `self` that `other` sets, `other` winning.
    fn merge(self, other: Output) -> Output {
        Output {
            path: other.path.or(self.path),
            filename: other.filename.or(self.filename),
            chunk_filename: other.chunk_filename.or(self.chunk_filename),
            library_target: other.library_target.or(self.library_target),
            library: other.library.or(self.library),
        }
    }
}

/// Library export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryTarget {
    /// `module.exports = ...` interop form.
    CommonJs2,
}

/// Plugin descriptors understood by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin", content = "options")]
pub enum Plugin {
    /// `html-webpack-plugin` emitting one HTML page.
    #[serde(rename = "HtmlWebpackPlugin")]
    Html(HtmlPluginOptions),
    /// `webpack.optimize.CommonsChunkPlugin` extracting shared code.
    #[serde(rename = "CommonsChunkPlugin")]
    CommonsChunk(CommonsChunkOptions),
}

impl Plugin {
    /// HTML options, if this is an HTML plugin.
    pub fn as_html(&self) -> Option<&HtmlPluginOptions> {
        match self {
            Plugin::Html(options) => Some(options),
            _ => None,
        }
    }

    /// Returns `true` for the shared-chunk extraction plugin.
    pub fn is_commons_chunk(&self) -> bool {
        matches!(self, Plugin::CommonsChunk(_))
    }
}

/// Options for one emitted HTML page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlPluginOptions {
    /// Template file, relative to the project.
    pub template: String,
    /// Emitted file name.
    pub filename: String,
    /// Chunks injected as script tags.
    pub chunks: Vec<String>,
}

/// Options for shared-chunk extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonsChunkOptions {
    /// Name of the extracted chunk.
    pub name: String,
}

impl Default for CommonsChunkOptions {
    fn default() -> Self {
        Self {
            name: COMMON_CHUNK.to_string(),
        }
    }
}

impl BundleConfig {
    /// The "archetype not applicable" configuration.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` when no key is set.
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
            && self.output.is_none()
            && self.externals.is_none()
            && self.plugins.is_empty()
    }

    /// HTML plugin options, in plugin order.
    pub fn html_plugins(&self) -> Vec<&HtmlPluginOptions> {
        self.plugins.iter().filter_map(Plugin::as_html).collect()
    }

    /// Number of shared-chunk extraction plugins.
    pub fn commons_chunk_count(&self) -> usize {
        self.plugins.iter().filter(|p| p.is_commons_chunk()).count()
    }

    /// Output directory, if set.
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.output.as_ref().and_then(|output| output.path.as_ref())
    }

    /// Combines two fragments.
    ///
    /// Named entries are concatenated, a single entry is only taken when
    /// `self` has none, output fields from `other` take precedence,
    /// externals are unioned and plugins appended.
    pub fn merge(self, other: BundleConfig) -> BundleConfig {
        let entry = match (self.entry, other.entry) {
            (Some(Entry::Named(mut left)), Some(Entry::Named(right))) => {
                left.extend(right);
                Some(Entry::Named(left))
            }
            (Some(left), _) => Some(left),
            (None, right) => right,
        };

        let output = match (self.output, other.output) {
            (Some(left), Some(right)) => Some(left.merge(right)),
            (left, right) => right.or(left),
        };

        let externals = match (self.externals, other.externals) {
            (Some(mut left), Some(right)) => {
                left.extend(right);
                Some(left)
            }
            (left, right) => right.or(left),
        };

        let mut plugins = self.plugins;
        plugins.extend(other.plugins);

        BundleConfig {
            entry,
            output,
            externals,
            plugins,
        }
    }
}
