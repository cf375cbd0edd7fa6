// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Declarative options shared by every archetype.

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// What the bundle is being built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BuildTarget {
    /// Regular production/development bundle.
    #[default]
    Default,
    /// Bundle loaded directly by a test harness.
    Test,
}

impl BuildTarget {
    /// Parses a target tag. Only `"test"` is recognised; anything else is `Default`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("test") => BuildTarget::Test,
            _ => BuildTarget::Default,
        }
    }

    /// Returns `true` for [`BuildTarget::Test`].
    pub fn is_test(&self) -> bool {
        matches!(self, BuildTarget::Test)
    }
}

impl std::str::FromStr for BuildTarget {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BuildTarget::from_tag(Some(s)))
    }
}

impl<'de> Deserialize<'de> for BuildTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(BuildTarget::from_tag(tag.as_deref()))
    }
}

/// Input to every archetype configurator.
///
/// Absent and empty `library`/`pages` both mean "this archetype does not apply".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeOptions {
    /// Exported name of the library bundle.
    #[serde(default)]
    pub library: Option<String>,
    /// Page names, one HTML page and entry point each.
    #[serde(default)]
    pub pages: Option<Vec<String>>,
    /// Absolute path to the project root (holds `package.json`).
    #[serde(default)]
    pub project_path: PathBuf,
    /// Build target tag.
    #[serde(default)]
    pub build_target: BuildTarget,
}

impl ArchetypeOptions {
    /// Creates options rooted at `project_path` with no archetype selected.
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            ..Default::default()
        }
    }

    /// Selects the library archetype.
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// Selects the pages archetype.
    pub fn with_pages<I, S>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages = Some(pages.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the build target.
    pub fn with_build_target(mut self, build_target: BuildTarget) -> Self {
        self.build_target = build_target;
        self
    }

    /// Library name, if one is set and non-empty.
    pub fn library_name(&self) -> Option<&str> {
        self.library.as_deref().filter(|name| !name.is_empty())
    }

    /// Page names, if any are set.
    pub fn page_names(&self) -> Option<&[String]> {
        self.pages.as_deref().filter(|pages| !pages.is_empty())
    }

    /// `<project_path>/dist`, where every archetype emits its output.
    pub fn dist_dir(&self) -> PathBuf {
        self.project_path.join("dist")
    }

    /// Project root.
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}
