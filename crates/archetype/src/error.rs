// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for archetype configuration.
//!
//! An archetype that does not apply is never an error: it yields an empty
//! [`BundleConfig`](crate::BundleConfig). The variants here cover the cases
//! where a configuration cannot be produced at all.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for archetype operations.
#[derive(Error, Debug)]
pub enum ArchetypeError {
    /// No `package.json` exists in the project directory.
    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The manifest exists but is not valid JSON of the expected shape.
    #[error("Malformed manifest {}: {source}", path.display())]
    MalformedManifest {
        /// Path of the offending manifest.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The same page name was given more than once.
    #[error("Duplicate page name: {0}")]
    DuplicatePage(String),

    /// Any other I/O failure while reading project files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for archetype operations.
pub type Result<T> = std::result::Result<T, ArchetypeError>;
