//! Lifting per-type predicates into whole-module criteria.
//!
//! "The module qualifies if at least one of its exported types satisfies X", without each
//! caller writing enumeration, short-circuit and complaint merging by hand.

use crate::criterion::{DEFAULT_CRITERION_ID, ModuleCriterion, ModulePredicate};
use crate::error::{AggregateLoadFault, CriterionError, EvaluationError};
use crate::intercept::{Interception, intercept};
use crate::model::{Admission, CandidateModule, TypeDescriptor};
use std::sync::Arc;

/// Per-type predicate.
pub type TypePredicate = Arc<dyn Fn(&TypeDescriptor) -> Admission + Send + Sync>;

/// Builds a [`ModuleCriterion`] from a per-type predicate.
pub struct TypeCriterion;

impl TypeCriterion {
    pub fn builder() -> TypeCriterionBuilder {
        TypeCriterionBuilder::default()
    }
}

pub struct TypeCriterionBuilder {
    id: String,
    predicate: Option<TypePredicate>,
    default_complaints: Vec<String>,
}

impl Default for TypeCriterionBuilder {
    fn default() -> Self {
        TypeCriterionBuilder {
            id: DEFAULT_CRITERION_ID.to_string(),
            predicate: None,
            default_complaints: Vec::new(),
        }
    }
}

impl TypeCriterionBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn type_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&TypeDescriptor) -> Admission + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Set (or clear, with `None`) an already shared predicate.
    pub fn shared_predicate(mut self, predicate: Option<TypePredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    /// Complaints reported when no type matched and no type said why.
    pub fn default_complaints<I, S>(mut self, complaints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_complaints = complaints.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<ModuleCriterion, CriterionError> {
        let Some(predicate) = self.predicate else {
            return Err(CriterionError::MissingPredicate { id: self.id });
        };
        validate_default_complaints(&self.id, &self.default_complaints)?;

        ModuleCriterion::builder()
            .id(self.id)
            .shared_predicate(Some(lift_type_predicate(
                predicate,
                self.default_complaints,
            )))
            .build()
    }
}

fn validate_default_complaints(id: &str, complaints: &[String]) -> Result<(), CriterionError> {
    if complaints.is_empty() {
        return Err(CriterionError::EmptyDefaultComplaints { id: id.to_string() });
    }
    if let Some(index) = complaints.iter().position(|c| c.trim().is_empty()) {
        return Err(CriterionError::BlankDefaultComplaint {
            id: id.to_string(),
            index,
        });
    }
    Ok(())
}

/// Adapt a per-type predicate into a whole-module predicate.
///
/// - A partial load made only of missing/unloadable dependencies rejects the module with
///   one complaint per dependency; the type predicate is never invoked.
/// - Any other partial load is returned as [`EvaluationError::TypeLoad`].
/// - Types are visited in enumeration order and the first admitted type admits the
///   module; later types are not visited.
/// - Otherwise the module is rejected with every type's complaints, or with
///   `default_complaints` when no type produced any.
pub fn lift_type_predicate(
    predicate: TypePredicate,
    default_complaints: Vec<String>,
) -> ModulePredicate {
    Arc::new(move |module: &dyn CandidateModule| {
        let types = match module.exported_types() {
            Ok(types) => types,
            Err(fault) => {
                return match intercept(&fault) {
                    Interception::Classified(complaints) => Ok(Admission::Rejected { complaints }),
                    Interception::Unclassified => Err(EvaluationError::TypeLoad(
                        AggregateLoadFault::from(&fault),
                    )),
                };
            }
        };

        let mut complaints: Vec<String> = Vec::new();
        for t in &types {
            match predicate(t) {
                Admission::Admitted => return Ok(Admission::Admitted),
                Admission::Rejected {
                    complaints: type_complaints,
                } => complaints.extend(type_complaints),
            }
        }

        if complaints.is_empty() {
            complaints = default_complaints.clone();
        }
        Ok(Admission::Rejected { complaints })
    })
}
