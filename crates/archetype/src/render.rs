// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Renders a [`BundleConfig`] as a `webpack.config.js` module.
//!
//! Plain keys are embedded as JSON. Plugin descriptors become constructor
//! calls, since webpack only accepts plugin instances.

use crate::config::{BundleConfig, Plugin};
use std::fmt::Write;

const HEADER: &str = "// Generated by archetype. Do not edit.\n'use strict';\n";

/// Renders `config` as a CommonJS module exporting the webpack configuration.
pub fn render_module(config: &BundleConfig) -> serde_json::Result<String> {
    let mut out = String::from(HEADER);

    let needs_html = config.plugins.iter().any(|p| matches!(p, Plugin::Html(_)));
    let needs_webpack = config.plugins.iter().any(Plugin::is_commons_chunk);
    if needs_html {
        out.push_str("const HtmlWebpackPlugin = require('html-webpack-plugin');\n");
    }
    if needs_webpack {
        out.push_str("const webpack = require('webpack');\n");
    }
    out.push('\n');

    let mut fields = Vec::new();
    if let Some(entry) = &config.entry {
        fields.push(format!("  entry: {}", serde_json::to_string(entry)?));
    }
    if let Some(output) = &config.output {
        fields.push(format!("  output: {}", serde_json::to_string(output)?));
    }
    if let Some(externals) = &config.externals {
        fields.push(format!("  externals: {}", serde_json::to_string(externals)?));
    }
    if !config.plugins.is_empty() {
        let mut plugins = String::from("  plugins: [\n");
        let rendered = config
            .plugins
            .iter()
            .map(render_plugin)
            .collect::<serde_json::Result<Vec<_>>>()?;
        plugins.push_str(&rendered.join(",\n"));
        plugins.push_str("\n  ]");
        fields.push(plugins);
    }

    if fields.is_empty() {
        out.push_str("module.exports = {};\n");
    } else {
        let _ = writeln!(out, "module.exports = {{\n{}\n}};", fields.join(",\n"));
    }
    Ok(out)
}

fn render_plugin(plugin: &Plugin) -> serde_json::Result<String> {
    let rendered = match plugin {
        Plugin::Html(options) => format!(
            "    new HtmlWebpackPlugin({})",
            serde_json::to_string(options)?
        ),
        Plugin::CommonsChunk(options) => format!(
            "    new webpack.optimize.CommonsChunkPlugin({})",
            serde_json::to_string(options)?
        ),
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::{configure_library, configure_pages};
    use crate::manifest::MemoryManifestReader;
    use crate::options::ArchetypeOptions;

    #[test]
    fn test_render_empty() {
        let module = render_module(&BundleConfig::empty()).unwrap();
        assert!(module.contains("module.exports = {};"));
        assert!(!module.contains("require("));
    }

    #[test]
    fn test_render_pages_instantiates_plugins() {
        let options = ArchetypeOptions::new("/p").with_pages(["index", "demo"]);
        let module = render_module(&configure_pages(&options).unwrap()).unwrap();

        assert!(module.contains("const HtmlWebpackPlugin = require('html-webpack-plugin');"));
        assert!(module.contains("const webpack = require('webpack');"));
        assert_eq!(module.matches("new HtmlWebpackPlugin(").count(), 2);
        assert_eq!(
            module.matches("new webpack.optimize.CommonsChunkPlugin(").count(),
            1
        );
        assert!(module.contains(r#"entry: {"index":["./index"],"demo":["./demo"]}"#));
        assert!(module.contains(r#""chunkFilename":"[name]-[hash].chunk.js""#));
    }

    #[test]
    fn test_render_single_page_skips_webpack_require() {
        let options = ArchetypeOptions::new("/p").with_pages(["index"]);
        let module = render_module(&configure_pages(&options).unwrap()).unwrap();

        assert!(module.contains("new HtmlWebpackPlugin("));
        assert!(!module.contains("require('webpack')"));
    }

    #[test]
    fn test_render_library() {
        let reader = MemoryManifestReader::new();
        reader.insert("/p", r#"{"peerDependencies":{"react":"*"}}"#);
        let options = ArchetypeOptions::new("/p").with_library("Lib");
        let module = render_module(&configure_library(&options, &reader).unwrap()).unwrap();

        assert!(module.contains(r#"entry: "./index""#));
        assert!(module.contains(r#""libraryTarget":"commonjs2""#));
        assert!(module.contains(r#"externals: ["react"]"#));
        assert!(!module.contains("plugins"));
    }
}
