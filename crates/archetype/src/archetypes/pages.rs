// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Pages archetype: one entry and one HTML page per page name.

use super::Archetype;
use crate::config::{
    BundleConfig, CommonsChunkOptions, Entry, HtmlPluginOptions, Output, Plugin, COMMON_CHUNK,
};
use crate::error::{ArchetypeError, Result};
use crate::options::ArchetypeOptions;
use std::collections::HashSet;

// Content hashes keep file names stable until the content changes, so
// browsers can cache them across deploys.
const PAGE_FILENAME: &str = "[name]-[hash].js";
const PAGE_CHUNK_FILENAME: &str = "[name]-[hash].chunk.js";

/// Configures a multi-page application.
///
/// Returns the empty configuration when no pages are given. Page names must be
/// unique. Shared-chunk extraction is only added for two or more pages and
/// never for test builds, whose harness cannot load the extracted chunk.
pub fn configure_pages(options: &ArchetypeOptions) -> Result<BundleConfig> {
    let Some(pages) = options.page_names() else {
        return Ok(BundleConfig::empty());
    };

    let mut seen = HashSet::with_capacity(pages.len());
    for page in pages {
        if !seen.insert(page.as_str()) {
            return Err(ArchetypeError::DuplicatePage(page.clone()));
        }
    }

    let entries = pages
        .iter()
        .map(|page| (page.clone(), vec![format!("./{}", page)]))
        .collect();

    let mut plugins: Vec<Plugin> = pages.iter().map(|page| html_page(page)).collect();

    if pages.len() > 1 && !options.build_target.is_test() {
        plugins.push(Plugin::CommonsChunk(CommonsChunkOptions::default()));
    }

    Ok(BundleConfig {
        entry: Some(Entry::Named(entries)),
        output: Some(Output {
            path: Some(options.dist_dir()),
            filename: Some(PAGE_FILENAME.to_string()),
            chunk_filename: Some(PAGE_CHUNK_FILENAME.to_string()),
            library_target: None,
            library: None,
        }),
        externals: None,
        plugins,
    })
}

fn html_page(page: &str) -> Plugin {
    let html = format!("{}.html", page);
    Plugin::Html(HtmlPluginOptions {
        template: html.clone(),
        filename: html,
        chunks: vec![COMMON_CHUNK.to_string(), page.to_string()],
    })
}

/// [`configure_pages`] as an [`Archetype`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PagesArchetype;

impl Archetype for PagesArchetype {
    fn name(&self) -> &'static str {
        "webpack-archetype-pages"
    }

    fn configure(&self, options: &ArchetypeOptions) -> Result<BundleConfig> {
        configure_pages(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BuildTarget;
    use std::path::PathBuf;

    const PROJECT: &str = "/tmp/projec-path";

    fn chunks(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_undefined_pages_is_empty() {
        let config = configure_pages(&ArchetypeOptions::default()).unwrap();
        assert_eq!(config, BundleConfig::empty());
    }

    #[test]
    fn test_empty_pages_is_empty() {
        let options = ArchetypeOptions::default().with_pages(Vec::<String>::new());
        let config = configure_pages(&options).unwrap();
        assert_eq!(config, BundleConfig::empty());
    }

    #[test]
    fn test_single_page_output() {
        let options = ArchetypeOptions::new(PROJECT).with_pages(["index"]);
        let config = configure_pages(&options).unwrap();

        let output = config.output.as_ref().unwrap();
        assert_eq!(output.path, Some(PathBuf::from("/tmp/projec-path/dist")));
        assert_eq!(output.filename.as_deref(), Some("[name]-[hash].js"));
        assert_eq!(output.chunk_filename.as_deref(), Some("[name]-[hash].chunk.js"));
    }

    #[test]
    fn test_single_page_entry_and_html() {
        let options = ArchetypeOptions::new(PROJECT).with_pages(["index"]);
        let config = configure_pages(&options).unwrap();

        assert_eq!(
            config.entry,
            Some(Entry::Named(vec![(
                "index".to_string(),
                vec!["./index".to_string()]
            )]))
        );

        let html = config.html_plugins();
        assert_eq!(html.len(), 1);
        assert_eq!(html[0].chunks, chunks(&["common", "index"]));
        assert_eq!(html[0].filename, "index.html");
        assert_eq!(html[0].template, "index.html");

        assert_eq!(config.commons_chunk_count(), 0);
    }

    #[test]
    fn test_multiple_pages() {
        let options = ArchetypeOptions::new(PROJECT).with_pages(["index", "demo"]);
        let config = configure_pages(&options).unwrap();

        let entry = config.entry.as_ref().unwrap();
        assert_eq!(entry.names(), vec!["index", "demo"]);
        assert_eq!(entry.get("demo"), Some(&["./demo".to_string()][..]));

        let html = config.html_plugins();
        assert_eq!(html.len(), 2);
        assert_eq!(html[0].chunks, chunks(&["common", "index"]));
        assert_eq!(html[0].filename, "index.html");
        assert_eq!(html[1].chunks, chunks(&["common", "demo"]));
        assert_eq!(html[1].template, "demo.html");

        assert_eq!(config.commons_chunk_count(), 1);
        assert!(config.plugins.last().unwrap().is_commons_chunk());
    }

    #[test]
    fn test_multiple_pages_test_target_has_no_commons_chunk() {
        let options = ArchetypeOptions::new(PROJECT)
            .with_pages(["index", "demo"])
            .with_build_target(BuildTarget::Test);
        let config = configure_pages(&options).unwrap();

        assert_eq!(config.entry.as_ref().unwrap().names(), vec!["index", "demo"]);
        let html = config.html_plugins();
        assert_eq!(html.len(), 2);
        assert_eq!(html[1].chunks, chunks(&["common", "demo"]));
        assert_eq!(config.commons_chunk_count(), 0);
    }

    #[test]
    fn test_duplicate_pages_are_rejected() {
        let options = ArchetypeOptions::new(PROJECT).with_pages(["index", "demo", "index"]);
        let err = configure_pages(&options).unwrap_err();
        assert!(matches!(err, ArchetypeError::DuplicatePage(ref name) if name == "index"));
    }

    #[test]
    fn test_pages_is_deterministic() {
        let options = ArchetypeOptions::new(PROJECT).with_pages(["a", "b", "c"]);
        assert_eq!(
            configure_pages(&options).unwrap(),
            configure_pages(&options).unwrap()
        );
    }
}
