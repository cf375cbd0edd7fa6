// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Development server components.
//!
//! [`create_dev_server`] assembles an axum [`Router`] over one shared
//! [`Compiler`]:
//!
//! - `hot`: WebSocket at `/__webpack_hmr` pushing build events
//! - `middleware`: compiles on demand and serves emitted artifacts, adding
//!   a client for the hot endpoint to every HTML page
//!
//! Binding a port is left to the caller.

/// Hot-reload WebSocket middleware.
pub mod hot;
/// On-demand compilation and artifact serving.
pub mod middleware;

use std::sync::Arc;

use archetype::BundleConfig;
use axum::{routing::get, Router};

use crate::compiler::{Bundler, Compiler};
use middleware::BundleState;

/// Default route of the hot-reload endpoint.
pub const HOT_PATH: &str = "/__webpack_hmr";

/// Options for [`create_dev_server`].
#[derive(Debug, Clone)]
pub struct DevServerOptions {
    /// Suppress informational logging of served requests.
    pub quiet: bool,
    /// Route of the hot-reload endpoint.
    pub hot_path: String,
}

impl Default for DevServerOptions {
    fn default() -> Self {
        Self {
            quiet: true,
            hot_path: HOT_PATH.to_string(),
        }
    }
}

/// An assembled development application.
pub struct DevServer {
    router: Router,
    compiler: Arc<Compiler>,
}

impl DevServer {
    /// The application, ready to be served.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Consumes the server, returning the application.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// The compiler shared by both middlewares.
    pub fn compiler(&self) -> Arc<Compiler> {
        self.compiler.clone()
    }
}

/// Builds the dev application for `config`.
///
/// One compiler is created and shared by the hot-reload endpoint and the
/// bundling middleware, which is mounted as the fallback for every other path.
pub fn create_dev_server(
    config: BundleConfig,
    bundler: Arc<dyn Bundler>,
    options: DevServerOptions,
) -> DevServer {
    let compiler = Arc::new(Compiler::new(config, bundler));

    let bundle_state = Arc::new(BundleState {
        compiler: compiler.clone(),
        quiet: options.quiet,
        hot_path: options.hot_path.clone(),
    });

    let hot = Router::new()
        .route(&options.hot_path, get(hot::hot_handler))
        .with_state(compiler.clone());

    let router = Router::new()
        .fallback(middleware::serve_artifact)
        .with_state(bundle_state)
        .merge(hot);

    DevServer { router, compiler }
}

/// Binds `addr` and serves `server` until the process is stopped.
pub async fn serve(addr: &str, server: DevServer) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, server.into_router()).await?;
    Ok(())
}
