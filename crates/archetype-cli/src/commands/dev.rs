// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Development server command with hot reload support.

use console::style;
use std::path::PathBuf;
use std::sync::Arc;

use super::resolve_bundle_config;
use crate::compiler::WebpackBundler;
use crate::config::Config;
use crate::server::{create_dev_server, serve, DevServerOptions, HOT_PATH};
use crate::watcher::{build_ignore_set, FileWatcher, DEFAULT_IGNORES};

/// Runs the development server with hot reload.
pub async fn run(
    host: Option<String>,
    port: Option<u16>,
    verbose: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let project_path = std::env::current_dir()?;
    let bundle = resolve_bundle_config(&config, &project_path)?;

    let quiet_requests = config.dev.quiet && !verbose;
    let bundler = WebpackBundler::new(config.webpack_path(&project_path), &project_path)
        .with_quiet(quiet_requests);

    let server = create_dev_server(
        bundle,
        Arc::new(bundler),
        DevServerOptions {
            quiet: quiet_requests,
            ..Default::default()
        },
    );
    let compiler = server.compiler();

    // Warm up so the first page load does not wait for a full build
    let warmup = compiler.clone();
    tokio::spawn(async move {
        if let Err(e) = warmup.ensure_compiled().await {
            eprintln!(
                "  {} {}",
                style("✗").red(),
                style(format!("Initial build failed: {}", e)).red()
            );
        }
    });

    // Rebuild on source changes; the hot endpoint notifies connected clients
    let runtime = tokio::runtime::Handle::current();
    let watcher_compiler = compiler.clone();
    let quiet_watcher = quiet;
    let _watcher = FileWatcher::new(
        project_path.clone(),
        build_ignore_set(DEFAULT_IGNORES)?,
        move |paths: Vec<PathBuf>| {
            if !quiet_watcher {
                let display = paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("  {} {}", style("changed").cyan(), style(display).dim());
            }
            let compiler = watcher_compiler.clone();
            runtime.spawn(async move {
                match compiler.rebuild().await {
                    Ok(stats) if !quiet_watcher => println!(
                        "  {} {} {}",
                        style("✓").green(),
                        style(&stats.hash).dim(),
                        style(format!("{}ms", stats.duration_ms)).dim()
                    ),
                    Ok(_) => {}
                    Err(e) => eprintln!("  {} {}", style("✗").red(), style(e.to_string()).red()),
                }
            });
        },
    )?;

    let host = host.unwrap_or_else(|| config.dev.host.clone());
    let port = port.unwrap_or(config.dev.port);
    let addr = format!("{}:{}", host, port);
    if !quiet {
        println!(
            "{} {}",
            style("Server:").cyan(),
            style(format!("http://{}", addr)).green().bold()
        );
        println!(
            "{} {}",
            style("Hot reload:").cyan(),
            style(format!("ws://{}{}", addr, HOT_PATH)).dim()
        );
        println!(
            "{} {}",
            style("Status:").cyan(),
            style("Watching for changes...").dim()
        );
        println!();
    }

    serve(&addr, server).await
}
