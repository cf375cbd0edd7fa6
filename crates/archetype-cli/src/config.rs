// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project configuration.
//!
//! Configuration is loaded from `archetype.toml` at the project root.
//!
//! # Example Configuration
//!
//! ```toml
//! [project]
//! library = "MyLib"
//! pages = ["index", "demo"]
//! build_target = "test"
//!
//! [dev]
//! port = 8080
//! host = "localhost"
//! quiet = true
//!
//! [build]
//! webpack = "node_modules/.bin/webpack"
//! ```

use archetype::{ArchetypeOptions, BuildTarget};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "archetype.toml";

/// Main configuration structure loaded from `archetype.toml`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    /// Archetype selection.
    #[serde(default)]
    pub project: ProjectConfig,
    /// Development server settings.
    #[serde(default)]
    pub dev: DevConfig,
    /// Bundler invocation settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Which archetypes apply to the project.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ProjectConfig {
    /// Library name; selects the library archetype.
    #[serde(default)]
    pub library: Option<String>,
    /// Page names; select the pages archetype.
    #[serde(default)]
    pub pages: Option<Vec<String>>,
    /// Build target tag; only `"test"` is recognised.
    #[serde(default)]
    pub build_target: BuildTarget,
}

/// Development server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DevConfig {
    /// Server port (default: 8080).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Server host (default: "127.0.0.1").
    #[serde(default = "default_host")]
    pub host: String,
    /// Suppress per-request informational logging (default: true).
    #[serde(default = "default_quiet")]
    pub quiet: bool,
}

/// Bundler configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct BuildConfig {
    /// Path to the webpack executable, relative to the project (default: "node_modules/.bin/webpack").
    #[serde(default = "default_webpack")]
    pub webpack: String,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_quiet() -> bool {
    true
}

fn default_webpack() -> String {
    "node_modules/.bin/webpack".to_string()
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            quiet: default_quiet(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            webpack: default_webpack(),
        }
    }
}

impl Config {
    /// Loads configuration from `archetype.toml` in the current directory.
    ///
    /// If no configuration file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&std::env::current_dir()?)
    }

    /// Loads configuration from `archetype.toml` in `dir`.
    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Archetype options for a project rooted at `project_path`.
    pub fn archetype_options(&self, project_path: &Path) -> ArchetypeOptions {
        ArchetypeOptions {
            library: self.project.library.clone(),
            pages: self.project.pages.clone(),
            project_path: project_path.to_path_buf(),
            build_target: self.project.build_target,
        }
    }

    /// Absolute path of the webpack executable for `project_path`.
    pub fn webpack_path(&self, project_path: &Path) -> PathBuf {
        let webpack = Path::new(&self.build.webpack);
        if webpack.is_absolute() {
            webpack.to_path_buf()
        } else {
            project_path.join(webpack)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path()).unwrap();

        assert!(config.project.library.is_none());
        assert!(config.project.pages.is_none());
        assert_eq!(config.dev.port, 8080);
        assert!(config.dev.quiet);
        assert_eq!(
            config.webpack_path(dir.path()),
            dir.path().join("node_modules/.bin/webpack")
        );
    }

    #[test]
    fn test_parse_full_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[project]
library = "MyLib"
pages = ["index", "demo"]
build_target = "test"

[dev]
port = 3000
quiet = false

[build]
webpack = "/usr/local/bin/webpack"
"#,
        )
        .unwrap();

        let config = Config::load_from(dir.path()).unwrap();
        let options = config.archetype_options(dir.path());
        assert_eq!(options.library_name(), Some("MyLib"));
        assert_eq!(options.page_names().unwrap().len(), 2);
        assert_eq!(options.build_target, BuildTarget::Test);
        assert_eq!(config.dev.port, 3000);
        assert_eq!(config.dev.host, "127.0.0.1");
        assert!(!config.dev.quiet);
        assert_eq!(
            config.webpack_path(dir.path()),
            PathBuf::from("/usr/local/bin/webpack")
        );
    }

    #[test]
    fn test_unknown_build_target_is_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[project]\nbuild_target = \"production\"\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.project.build_target, BuildTarget::Default);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[project\n").unwrap();
        assert!(Config::load_from(dir.path()).is_err());
    }
}
