use crate::fault::{LoaderFault, TypeLoadError};
use thiserror::Error;

/// Invalid criterion construction. Raised by `build()`, never deferred to evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CriterionError {
    #[error("criterion '{id}' has no predicate")]
    MissingPredicate { id: String },

    #[error("criterion '{id}' needs at least one default complaint")]
    EmptyDefaultComplaints { id: String },

    #[error("criterion '{id}' has a blank default complaint at index {index}")]
    BlankDefaultComplaint { id: String, index: usize },

    #[error("criterion '{id}' has an invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        id: String,
        pattern: String,
        reason: String,
    },
}

/// Evaluation could not reach an admit/reject decision.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    TypeLoad(#[from] AggregateLoadFault),
}

/// Loader faults that could not be classified as missing or unloadable dependencies,
/// gathered into a single error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", summarize(.module, .faults))]
pub struct AggregateLoadFault {
    pub module: String,
    pub faults: Vec<LoaderFault>,
}

impl From<&TypeLoadError> for AggregateLoadFault {
    fn from(value: &TypeLoadError) -> Self {
        AggregateLoadFault {
            module: value.module.clone(),
            faults: value.faults.clone(),
        }
    }
}

fn summarize(module: &str, faults: &[LoaderFault]) -> String {
    let mut out = format!(
        "unexpected loader fault(s) enumerating types of module '{}'",
        module
    );
    for (i, fault) in faults.iter().enumerate() {
        out.push_str(if i == 0 { ": " } else { "; " });
        out.push_str(&fault.to_string());
    }
    out
}
