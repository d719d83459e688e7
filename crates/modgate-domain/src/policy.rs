use crate::criterion::Criterion;
use std::fmt;
use std::sync::Arc;

/// Which outcomes fail the scan as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    /// Only faulted modules fail the scan; rejections warn.
    Fault,
    /// Rejected modules fail the scan too.
    Rejection,
}

#[derive(Clone)]
pub struct AdmissionPolicy {
    pub profile: String,
    pub fail_on: FailOn,
    /// Complaints kept per module before truncating.
    pub max_complaints: usize,
    /// Every criterion must admit a module for it to be admitted.
    pub criteria: Vec<Arc<dyn Criterion>>,
}

impl AdmissionPolicy {
    pub fn criterion_ids(&self) -> Vec<&str> {
        self.criteria.iter().map(|c| c.id()).collect()
    }
}

impl fmt::Debug for AdmissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionPolicy")
            .field("profile", &self.profile)
            .field("fail_on", &self.fail_on)
            .field("max_complaints", &self.max_complaints)
            .field("criteria", &self.criterion_ids())
            .finish()
    }
}
