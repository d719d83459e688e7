use crate::parse::{ModuleDescriptor, TypeDecl, fallback_module_name, parse_descriptor};
use camino::Utf8Path;
use modgate_domain::{CandidateModule, LoaderFault, TypeDescriptor, TypeKind, TypeLoadError};
use modgate_types::ProbePath;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// One discovered descriptor: either parsed, or unreadable with the reason recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogEntry {
    Loaded(ModuleDescriptor),
    Broken {
        path: ProbePath,
        name: String,
        message: String,
    },
}

impl CatalogEntry {
    pub fn path(&self) -> &ProbePath {
        match self {
            CatalogEntry::Loaded(d) => &d.path,
            CatalogEntry::Broken { path, .. } => path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Loaded(d) => &d.name,
            CatalogEntry::Broken { name, .. } => name,
        }
    }
}

/// Every module descriptor found in a probe directory, indexed by module name.
#[derive(Clone, Debug, Default)]
pub struct ModuleCatalog {
    entries: Vec<CatalogEntry>,
    by_name: BTreeMap<String, usize>,
}

impl ModuleCatalog {
    /// Read and parse every descriptor in `paths`. Unreadable files become broken entries
    /// rather than errors so one bad descriptor cannot stop the scan.
    pub fn load(probe_root: &Utf8Path, paths: &[ProbePath]) -> ModuleCatalog {
        let entries: Vec<CatalogEntry> = paths
            .par_iter()
            .map(|path| {
                let abs = path.under(probe_root);
                match std::fs::read_to_string(&abs) {
                    Ok(text) => entry_from_source(path, &text),
                    Err(e) => CatalogEntry::Broken {
                        path: path.clone(),
                        name: fallback_module_name(path, ""),
                        message: format!("read {abs}: {e}"),
                    },
                }
            })
            .collect();
        ModuleCatalog::from_entries(entries)
    }

    /// Build a catalog from in-memory descriptor sources.
    pub fn from_sources(sources: Vec<(ProbePath, String)>) -> ModuleCatalog {
        let entries = sources
            .iter()
            .map(|(path, text)| entry_from_source(path, text))
            .collect();
        ModuleCatalog::from_entries(entries)
    }

    fn from_entries(entries: Vec<CatalogEntry>) -> ModuleCatalog {
        let mut by_name = BTreeMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            if let Some(&first) = by_name.get(entry.name()) {
                let first: &CatalogEntry = &entries[first];
                tracing::warn!(
                    module = entry.name(),
                    kept = %first.path(),
                    ignored = %entry.path(),
                    "duplicate module name; keeping the first descriptor"
                );
                continue;
            }
            by_name.insert(entry.name().to_string(), idx);
        }
        ModuleCatalog { entries, by_name }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Modules that parsed, viewed as admission candidates resolving against this catalog.
    pub fn candidates(&self) -> Vec<CatalogModule<'_>> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                CatalogEntry::Loaded(descriptor) => Some(CatalogModule {
                    descriptor,
                    catalog: self,
                }),
                CatalogEntry::Broken { .. } => None,
            })
            .collect()
    }
}

fn entry_from_source(path: &ProbePath, text: &str) -> CatalogEntry {
    match parse_descriptor(path, text) {
        Ok(descriptor) => CatalogEntry::Loaded(descriptor),
        Err(e) => CatalogEntry::Broken {
            path: path.clone(),
            name: fallback_module_name(path, text),
            message: format!("{e:#}"),
        },
    }
}

/// A parsed module whose types resolve their dependencies against the rest of the catalog.
#[derive(Clone, Copy, Debug)]
pub struct CatalogModule<'a> {
    descriptor: &'a ModuleDescriptor,
    catalog: &'a ModuleCatalog,
}

impl<'a> CatalogModule<'a> {
    pub fn descriptor(&self) -> &'a ModuleDescriptor {
        self.descriptor
    }

    pub fn path(&self) -> &'a ProbePath {
        &self.descriptor.path
    }

    fn resolve(&self, decl: &TypeDecl) -> Result<TypeDescriptor, LoaderFault> {
        let Some(kind) = TypeKind::parse(decl.kind.trim()) else {
            return Err(LoaderFault::InvalidTypeDefinition {
                type_name: decl.name.clone(),
                message: format!("unknown kind '{}'", decl.kind),
            });
        };
        if decl.name.trim().is_empty() {
            return Err(LoaderFault::InvalidTypeDefinition {
                type_name: decl.name.clone(),
                message: "type name is empty".to_string(),
            });
        }

        let deps = self.descriptor.references.iter().chain(decl.requires.iter());
        for dep in deps.filter(|d| d.as_str() != self.descriptor.name) {
            match self.catalog.get(dep) {
                None => {
                    return Err(LoaderFault::DependencyNotFound {
                        dependency: Some(dep.clone()),
                        message: format!("could not find module '{dep}' in the probe directory"),
                    });
                }
                Some(CatalogEntry::Broken { path, message, .. }) => {
                    return Err(LoaderFault::DependencyLoadFailed {
                        dependency: Some(dep.clone()),
                        message: format!("module '{dep}' at {path} could not be loaded: {message}"),
                    });
                }
                Some(CatalogEntry::Loaded(_)) => {}
            }
        }

        Ok(TypeDescriptor {
            name: decl.name.clone(),
            namespace: decl.namespace.clone(),
            kind,
            public: decl.public,
            abstract_: decl.abstract_,
            implements: decl.implements.clone(),
            attributes: decl.attributes.clone(),
        })
    }
}

impl CandidateModule for CatalogModule<'_> {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn exported_types(&self) -> Result<Vec<TypeDescriptor>, TypeLoadError> {
        let mut types = Vec::with_capacity(self.descriptor.types.len());
        let mut faults = Vec::new();
        for decl in &self.descriptor.types {
            match self.resolve(decl) {
                Ok(t) => types.push(t),
                Err(fault) => faults.push(fault),
            }
        }
        if faults.is_empty() {
            Ok(types)
        } else {
            Err(TypeLoadError::new(self.descriptor.name.clone(), faults))
        }
    }
}
