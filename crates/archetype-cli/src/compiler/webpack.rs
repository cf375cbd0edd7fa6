// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Runs webpack as an external process.

use super::output::OutputFilter;
use super::types::{BuildRequest, Bundler, CompilerError, CompilerResult};
use archetype::render_module;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Directory, relative to the project, holding generated files.
pub const GENERATED_DIR: &str = ".archetype";
/// Generated webpack config module name.
pub const GENERATED_CONFIG: &str = "webpack.config.js";

/// Builds configurations with the project's webpack executable.
#[derive(Debug, Clone)]
pub struct WebpackBundler {
    /// Path to the webpack executable
    executable: PathBuf,
    /// Project root, used as the working directory
    project_path: PathBuf,
    /// Hide informational output
    quiet: bool,
}

impl WebpackBundler {
    /// Creates a bundler running `executable` from `project_path`.
    pub fn new(executable: impl Into<PathBuf>, project_path: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            project_path: project_path.into(),
            quiet: true,
        }
    }

    /// Sets quiet mode (only warnings and errors are printed)
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Path of the generated config module.
    pub fn config_module_path(&self) -> PathBuf {
        self.project_path.join(GENERATED_DIR).join(GENERATED_CONFIG)
    }

    /// Renders the configuration module to disk and returns its path.
    pub fn write_config_module(&self, request: &BuildRequest) -> CompilerResult<PathBuf> {
        let path = self.config_module_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, render_module(&request.config)?)?;
        Ok(path)
    }

    async fn execute(&self, config_path: &Path) -> CompilerResult<()> {
        if !self.executable.exists() {
            return Err(CompilerError::ExecutionFailed(format!(
                "webpack not found at {} (run `npm install` first)",
                self.executable.display()
            )));
        }

        debug!(
            executable = %self.executable.display(),
            config = %config_path.display(),
            "running webpack"
        );

        let output = Command::new(&self.executable)
            .arg("--config")
            .arg(config_path)
            .current_dir(&self.project_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let filter = OutputFilter::new("webpack", self.quiet);
        filter.print(&stdout);
        filter.print(&stderr);

        if !output.status.success() {
            let detail = stderr
                .lines()
                .chain(stdout.lines())
                .filter(|line| filter.is_problem(line))
                .take(10)
                .collect::<Vec<_>>()
                .join("\n");
            return Err(CompilerError::ExecutionFailed(format!(
                "webpack exited with {}{}{}",
                output.status,
                if detail.is_empty() { "" } else { ":\n" },
                detail
            )));
        }

        Ok(())
    }
}

impl Bundler for WebpackBundler {
    fn name(&self) -> &'static str {
        "webpack"
    }

    fn run<'a>(&'a self, request: &'a BuildRequest) -> BoxFuture<'a, CompilerResult<()>> {
        async move {
            let config_path = self.write_config_module(request)?;
            self.execute(&config_path).await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archetype::{configure_pages, ArchetypeOptions};

    #[test]
    fn test_write_config_module() {
        let dir = tempfile::tempdir().unwrap();
        let options = ArchetypeOptions::new(dir.path()).with_pages(["index"]);
        let request = BuildRequest {
            config: configure_pages(&options).unwrap(),
        };

        let bundler = WebpackBundler::new("/nonexistent/webpack", dir.path());
        let path = bundler.write_config_module(&request).unwrap();

        assert_eq!(path, dir.path().join(".archetype/webpack.config.js"));
        let module = std::fs::read_to_string(path).unwrap();
        assert!(module.contains("new HtmlWebpackPlugin("));
    }

    #[tokio::test]
    async fn test_missing_executable_fails() {
        let dir = tempfile::tempdir().unwrap();
        let request = BuildRequest {
            config: Default::default(),
        };

        let bundler = WebpackBundler::new(dir.path().join("missing"), dir.path());
        let err = bundler.run(&request).await.unwrap_err();
        assert!(matches!(err, CompilerError::ExecutionFailed(_)));
        assert!(err.to_string().contains("webpack not found"));
    }
}
