//! Classification of partial type-load faults.
//!
//! A partial load is reportable when every sub-fault is a missing or unloadable
//! dependency. Anything else must surface as an error instead of being downgraded to a
//! rejection.

use crate::fault::{LoaderFault, TypeLoadError};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interception {
    /// One complaint per distinct dependency, in first-seen order.
    Classified(Vec<String>),
    Unclassified,
}

/// Classify a type enumeration fault. Never panics and never fails.
pub fn intercept(fault: &TypeLoadError) -> Interception {
    if fault.faults.is_empty() {
        return Interception::Unclassified;
    }

    // dependency -> first message seen, plus the order dependencies were first seen in.
    let mut first_message: BTreeMap<Option<&str>, &str> = BTreeMap::new();
    let mut order: Vec<Option<&str>> = Vec::new();

    for sub in &fault.faults {
        let Some((dependency, message)) = classify(sub) else {
            return Interception::Unclassified;
        };
        if !first_message.contains_key(&dependency) {
            first_message.insert(dependency, message);
            order.push(dependency);
        }
    }

    Interception::Classified(
        order
            .into_iter()
            .map(|dependency| complaint(dependency, first_message[&dependency]))
            .collect(),
    )
}

fn classify(fault: &LoaderFault) -> Option<(Option<&str>, &str)> {
    match fault {
        LoaderFault::DependencyNotFound {
            dependency,
            message,
        }
        | LoaderFault::DependencyLoadFailed {
            dependency,
            message,
        } => Some((dependency.as_deref(), message.as_str())),
        LoaderFault::InvalidTypeDefinition { .. } | LoaderFault::Other { .. } => None,
    }
}

fn complaint(dependency: Option<&str>, message: &str) -> String {
    match dependency {
        Some(d) => format!("could not load dependency '{}': {}", d, message),
        None => format!("could not load an unnamed dependency: {}", message),
    }
}
