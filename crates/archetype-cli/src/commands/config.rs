// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Prints the resolved bundle configuration.

use archetype::render_module;

use super::resolve_bundle_config;
use crate::config::Config;

/// Prints the merged configuration as JSON, or as a `webpack.config.js` module.
pub async fn run(module: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let project_path = std::env::current_dir()?;
    let bundle = resolve_bundle_config(&config, &project_path)?;

    if module {
        print!("{}", render_module(&bundle)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    }
    Ok(())
}
