//! Faults raised while enumerating a module's exported types.

use thiserror::Error;

/// Why a single exported type could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoaderFault {
    /// A module the type depends on is not present.
    #[error("dependency {} not found: {message}", display_dependency(.dependency))]
    DependencyNotFound {
        dependency: Option<String>,
        message: String,
    },

    /// A module the type depends on is present but could not be loaded.
    #[error("dependency {} could not be loaded: {message}", display_dependency(.dependency))]
    DependencyLoadFailed {
        dependency: Option<String>,
        message: String,
    },

    /// The type's own definition is malformed.
    #[error("invalid definition for type '{type_name}': {message}")]
    InvalidTypeDefinition { type_name: String, message: String },

    #[error("{message}")]
    Other { message: String },
}

fn display_dependency(dependency: &Option<String>) -> String {
    match dependency {
        Some(d) => format!("'{d}'"),
        None => "<unnamed>".to_string(),
    }
}

/// Type enumeration failed for some of a module's types.
///
/// Carries one sub-fault per type that failed, in enumeration order. Several sub-faults
/// often share one underlying missing dependency.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unable to load {} type(s) from module '{module}'", .faults.len())]
pub struct TypeLoadError {
    pub module: String,
    pub faults: Vec<LoaderFault>,
}

impl TypeLoadError {
    pub fn new(module: impl Into<String>, faults: Vec<LoaderFault>) -> Self {
        TypeLoadError {
            module: module.into(),
            faults,
        }
    }
}
