// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Archetype configurators.
//!
//! Each archetype maps [`ArchetypeOptions`] to a [`BundleConfig`] fragment and
//! returns the empty configuration when it does not apply, so a caller can
//! run every archetype and merge the results.

mod library;
mod pages;

pub use library::{configure_library, LibraryArchetype};
pub use pages::{configure_pages, PagesArchetype};

use crate::config::BundleConfig;
use crate::error::Result;
use crate::options::ArchetypeOptions;
use tracing::debug;

/// A named preset of bundle configuration.
pub trait Archetype: Send + Sync {
    /// Stable identifier of the archetype.
    fn name(&self) -> &'static str;

    /// Produces this archetype's configuration fragment.
    fn configure(&self, options: &ArchetypeOptions) -> Result<BundleConfig>;
}

/// Runs every archetype and merges the fragments in order.
pub fn configure_all(
    options: &ArchetypeOptions,
    archetypes: &[&dyn Archetype],
) -> Result<BundleConfig> {
    let mut merged = BundleConfig::empty();
    for archetype in archetypes {
        let fragment = archetype.configure(options)?;
        if fragment.is_empty() {
            debug!(archetype = archetype.name(), "archetype not applicable");
            continue;
        }
        debug!(archetype = archetype.name(), "archetype applied");
        merged = merged.merge(fragment);
    }
    Ok(merged)
}
