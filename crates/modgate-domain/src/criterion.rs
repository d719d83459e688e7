//! Admission rules over whole modules.

use crate::error::{CriterionError, EvaluationError};
use crate::model::{Admission, CandidateModule};
use std::fmt;
use std::sync::Arc;

/// Whole-module predicate. Panics inside a predicate are programming errors and are never
/// caught by the evaluator.
pub type ModulePredicate =
    Arc<dyn Fn(&dyn CandidateModule) -> Result<Admission, EvaluationError> + Send + Sync>;

/// One admission rule.
///
/// Implementations hold no mutable state, so a single criterion can be evaluated
/// concurrently against many modules.
pub trait Criterion: Send + Sync {
    /// Stable identifier used to tag complaints in reports.
    fn id(&self) -> &str;

    fn evaluate(&self, module: &dyn CandidateModule) -> Result<Admission, EvaluationError>;
}

/// Plain closures are criteria too, reported under the default id.
impl<F> Criterion for F
where
    F: Fn(&dyn CandidateModule) -> Result<Admission, EvaluationError> + Send + Sync,
{
    fn id(&self) -> &str {
        DEFAULT_CRITERION_ID
    }

    fn evaluate(&self, module: &dyn CandidateModule) -> Result<Admission, EvaluationError> {
        self(module)
    }
}

/// A criterion backed by a whole-module predicate.
#[derive(Clone)]
pub struct ModuleCriterion {
    id: String,
    predicate: ModulePredicate,
}

impl ModuleCriterion {
    pub fn builder() -> ModuleCriterionBuilder {
        ModuleCriterionBuilder::default()
    }
}

impl Criterion for ModuleCriterion {
    fn id(&self) -> &str {
        &self.id
    }

    fn evaluate(&self, module: &dyn CandidateModule) -> Result<Admission, EvaluationError> {
        (self.predicate)(module)
    }
}

impl fmt::Debug for ModuleCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleCriterion")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

pub const DEFAULT_CRITERION_ID: &str = "criterion";

pub struct ModuleCriterionBuilder {
    id: String,
    predicate: Option<ModulePredicate>,
}

impl Default for ModuleCriterionBuilder {
    fn default() -> Self {
        ModuleCriterionBuilder {
            id: DEFAULT_CRITERION_ID.to_string(),
            predicate: None,
        }
    }
}

impl ModuleCriterionBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn module_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&dyn CandidateModule) -> Result<Admission, EvaluationError> + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Set (or clear, with `None`) an already shared predicate.
    pub fn shared_predicate(mut self, predicate: Option<ModulePredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn build(self) -> Result<ModuleCriterion, CriterionError> {
        let Some(predicate) = self.predicate else {
            return Err(CriterionError::MissingPredicate { id: self.id });
        };
        Ok(ModuleCriterion {
            id: self.id,
            predicate,
        })
    }
}
