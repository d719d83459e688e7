use modgate_types::Verdict;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedComplaint {
    pub criterion_id: String,
    pub message: String,
    pub fingerprint: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleStatus {
    Admitted,
    Rejected,
    /// Evaluation stopped at an unclassifiable loader fault.
    Faulted { error: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleOutcome {
    pub module: String,
    pub status: ModuleStatus,
    pub complaints: Vec<TaggedComplaint>,
    pub truncated_reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub admitted: u32,
    pub rejected: u32,
    pub faulted: u32,
}

impl OutcomeCounts {
    pub fn from_outcomes(outcomes: &[ModuleOutcome]) -> Self {
        let mut counts = OutcomeCounts::default();
        for o in outcomes {
            match o.status {
                ModuleStatus::Admitted => counts.admitted += 1,
                ModuleStatus::Rejected => counts.rejected += 1,
                ModuleStatus::Faulted { .. } => counts.faulted += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    /// One outcome per input module, in input order.
    pub outcomes: Vec<ModuleOutcome>,
    pub counts: OutcomeCounts,
}
