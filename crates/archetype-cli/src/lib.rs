// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! Archetype CLI library.
//!
//! This crate drives webpack with configurations produced by the `archetype`
//! crate and provides a development server around it.
//!
//! # Features
//!
//! - **Development server** with on-demand compilation and hot reload
//! - **One shared compiler** observed by every middleware
//! - **File watching** for automatic rebuilds
//!
//! # Usage
//!
//! This crate is primarily used through the `archetype` binary:
//!
//! ```bash
//! archetype config   # Print the resolved webpack configuration
//! archetype build    # Build once
//! archetype dev      # Start development server
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `archetype.toml` at the project root.

/// CLI commands (config, build, dev).
pub mod commands;
/// Shared build lifecycle and the webpack process backend.
pub mod compiler;
/// Project configuration from `archetype.toml`.
pub mod config;
/// Development server with hot reload.
pub mod server;
/// File system watching for rebuilds.
pub mod watcher;
