//! Probe directory adapters: discover module descriptors, read and parse them into a
//! catalog whose modules can be handed to the admission engine.
//!
//! This crate is allowed to do filesystem IO. Nothing here decides admission.

#![forbid(unsafe_code)]

mod catalog;
mod discover;
mod parse;

use anyhow::Context;
use camino::Utf8Path;

pub use catalog::{CatalogEntry, CatalogModule, ModuleCatalog};
pub use discover::discover_modules;
pub use parse::{DESCRIPTOR_SUFFIX, ModuleDescriptor, TypeDecl};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions never panic on any input.
pub mod fuzz {
    use modgate_domain::CandidateModule;
    use modgate_types::ProbePath;

    /// Parse arbitrary text as a module descriptor.
    pub fn parse_descriptor(text: &str) -> anyhow::Result<()> {
        let path = ProbePath::new("fuzz.module.toml");
        let _ = crate::parse::parse_descriptor(&path, text)?;
        Ok(())
    }

    /// Load arbitrary descriptor texts as one catalog and enumerate every module's types.
    /// Returns how many modules enumerated without a fault.
    pub fn enumerate_all(texts: &[String]) -> usize {
        let sources = texts
            .iter()
            .enumerate()
            .map(|(i, t)| (ProbePath::new(format!("m{i}.module.toml")), t.clone()))
            .collect();
        let catalog = super::ModuleCatalog::from_sources(sources);
        catalog
            .candidates()
            .iter()
            .filter(|m| m.exported_types().is_ok())
            .count()
    }
}

/// Discover and load every module descriptor under `probe_root`.
pub fn load_probe(probe_root: &Utf8Path, include: &[String]) -> anyhow::Result<ModuleCatalog> {
    let paths = discover_modules(probe_root, include)
        .with_context(|| format!("discover modules under {probe_root}"))?;
    let catalog = ModuleCatalog::load(probe_root, &paths);

    let broken = catalog
        .entries()
        .iter()
        .filter(|e| matches!(e, CatalogEntry::Broken { .. }))
        .count();
    tracing::debug!(
        probe_root = %probe_root,
        modules = catalog.len(),
        broken,
        "loaded module catalog"
    );
    Ok(catalog)
}
