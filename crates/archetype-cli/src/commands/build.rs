// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Build command running one compilation of the project.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use super::resolve_bundle_config;
use crate::compiler::{Compiler, WebpackBundler};
use crate::config::Config;

/// Runs the build command.
pub async fn run(verbose: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let project_path = std::env::current_dir()?;
    let bundle = resolve_bundle_config(&config, &project_path)?;

    let bundler = WebpackBundler::new(config.webpack_path(&project_path), &project_path)
        .with_quiet(!verbose);
    let compiler = Compiler::new(bundle, Arc::new(bundler));

    println!(
        "{} {}",
        style("Building into:").cyan(),
        compiler.output_dir().display()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}")?);
    pb.set_message("webpack");
    pb.enable_steady_tick(Duration::from_millis(80));

    match compiler.ensure_compiled().await {
        Ok(stats) => {
            pb.finish_with_message(format!(
                "{} {} {}",
                style("✓").green(),
                style(format!("{} assets, hash {}", stats.assets.len(), stats.hash)).dim(),
                style(format!("{}ms", stats.duration_ms)).dim()
            ));
            Ok(())
        }
        Err(e) => {
            pb.finish_with_message(format!("{} {}", style("✗").red(), style("build failed").red()));
            Err(e.into())
        }
    }
}
