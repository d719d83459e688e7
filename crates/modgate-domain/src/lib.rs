//! Pure admission evaluation (no IO).
//!
//! Input: candidate modules that can enumerate their exported types, and the criteria a
//! module must satisfy.
//! Output: an admit/reject decision with complaints per module, plus an aggregate verdict.
//!
//! Nothing in this crate logs. Rejections are data; only unclassifiable loader faults are
//! errors.

#![forbid(unsafe_code)]

pub mod criterion;
pub mod error;
pub mod fault;
pub mod intercept;
pub mod lift;
pub mod model;
pub mod policy;
pub mod predicates;
pub mod report;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use criterion::{Criterion, ModuleCriterion, ModuleCriterionBuilder, ModulePredicate};
pub use engine::{evaluate, evaluate_module};
pub use error::{AggregateLoadFault, CriterionError, EvaluationError};
pub use fault::{LoaderFault, TypeLoadError};
pub use fingerprint::fingerprint_for_complaint;
pub use intercept::{Interception, intercept};
pub use lift::{TypeCriterion, TypeCriterionBuilder, TypePredicate, lift_type_predicate};
pub use model::{Admission, CandidateModule, TypeDescriptor, TypeKind};
