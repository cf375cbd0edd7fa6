// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Type definitions for the compiler module.

use archetype::{ArchetypeError, BundleConfig};
use futures_util::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;

/// A configuration handed to a [`Bundler`].
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Configuration to build.
    pub config: BundleConfig,
}

/// Runs one build of a configuration.
///
/// The bundler writes its artifacts into the configuration's output path.
pub trait Bundler: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Builds `request` to completion.
    fn run<'a>(&'a self, request: &'a BuildRequest) -> BoxFuture<'a, CompilerResult<()>>;
}

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStats {
    /// Content hash of the emitted artifacts.
    pub hash: String,
    /// Wall-clock build time in milliseconds.
    pub duration_ms: u64,
    /// Emitted files, relative to the output directory.
    pub assets: Vec<String>,
}

/// Build lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileState {
    /// Nothing built yet, or the last build was invalidated.
    Idle,
    /// A build is running.
    Building,
    /// The last build succeeded.
    Built(BuildStats),
    /// The last build failed with this message.
    Failed(String),
}

/// Lifecycle notifications pushed to hot-reload clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum CompilerEvent {
    /// A build started.
    Building,
    /// A build finished.
    Built {
        /// Content hash of the new artifacts.
        hash: String,
        /// Build time in milliseconds.
        time: u64,
    },
    /// A build failed.
    Failed {
        /// Error output.
        message: String,
    },
    /// Current state, sent once when a client connects.
    Sync {
        /// Content hash of the current artifacts.
        hash: String,
    },
}

/// Errors related to compiling a configuration
#[derive(Debug, Error)]
pub enum CompilerError {
    /// The bundler ran but reported failure
    #[error("Bundler execution failed: {0}")]
    ExecutionFailed(String),

    /// A previous build failed and has not been invalidated since
    #[error("Build failed: {0}")]
    BuildFailed(String),

    /// The configuration could not be produced or rendered
    #[error("Configuration error: {0}")]
    Archetype(#[from] ArchetypeError),

    /// The configuration could not be serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for compiler operations
pub type CompilerResult<T> = Result<T, CompilerError>;
