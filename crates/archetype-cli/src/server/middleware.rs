// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Bundling middleware: compiles on demand and serves emitted artifacts.

use std::sync::Arc;

use axum::{
    body::{self, Body},
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use super::hot::inject_hot_client;
use crate::compiler::Compiler;

/// State shared by the bundling middleware.
pub struct BundleState {
    /// The compiler shared with the hot middleware.
    pub compiler: Arc<Compiler>,
    /// Demote per-request logging to debug.
    pub quiet: bool,
    /// Route the injected hot client connects to.
    pub hot_path: String,
}

/// Waits for a current build, then serves the request from the output directory.
pub async fn serve_artifact(
    State(state): State<Arc<BundleState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    let stats = match state.compiler.ensure_compiled().await {
        Ok(stats) => stats,
        Err(e) => {
            warn!(path = %path, error = %e, "request during failed build");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    if state.quiet {
        debug!(path = %path, hash = %stats.hash, "serving artifact");
    } else {
        info!(path = %path, hash = %stats.hash, "serving artifact");
    }

    let mut serve_dir =
        ServeDir::new(state.compiler.output_dir()).append_index_html_on_directories(true);
    match serve_dir.try_call(request).await {
        Ok(response) if response.status() == StatusCode::OK && is_html(&response) => {
            with_hot_client(response.into_response(), &state.hot_path).await
        }
        Ok(response) => response.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

fn is_html<B>(response: &Response<B>) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"))
}

/// Rewrites an HTML page so it reloads after the next build.
async fn with_hot_client(response: Response, hot_path: &str) -> Response {
    let (mut parts, body) = response.into_parts();
    let bytes = match body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    };

    let html = inject_hot_client(&String::from_utf8_lossy(&bytes), hot_path);
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::ETAG);
    Response::from_parts(parts, Body::from(html))
}
