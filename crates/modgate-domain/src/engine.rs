use crate::fingerprint::fingerprint_for_complaint;
use crate::model::{Admission, CandidateModule};
use crate::policy::{AdmissionPolicy, FailOn};
use crate::report::{DomainReport, ModuleOutcome, ModuleStatus, OutcomeCounts, TaggedComplaint};
use modgate_types::Verdict;
use rayon::prelude::*;

/// Evaluate every module against every criterion of `policy`.
///
/// Modules are evaluated in parallel; outcomes come back in input order. A fault in one
/// module never stops the others.
pub fn evaluate<M>(modules: &[M], policy: &AdmissionPolicy) -> DomainReport
where
    M: CandidateModule + Sync,
{
    let outcomes: Vec<ModuleOutcome> = modules
        .par_iter()
        .map(|m| evaluate_module(m, policy))
        .collect();

    let counts = OutcomeCounts::from_outcomes(&outcomes);
    let verdict = compute_verdict(&counts, policy.fail_on);

    DomainReport {
        verdict,
        outcomes,
        counts,
    }
}

/// Run all criteria in order. Rejecting criteria all contribute complaints; the first
/// evaluation error marks the module faulted and skips the remaining criteria.
pub fn evaluate_module(module: &dyn CandidateModule, policy: &AdmissionPolicy) -> ModuleOutcome {
    let mut complaints: Vec<TaggedComplaint> = Vec::new();
    let mut rejected = false;

    for criterion in &policy.criteria {
        match criterion.evaluate(module) {
            Ok(Admission::Admitted) => {}
            Ok(Admission::Rejected {
                complaints: messages,
            }) => {
                rejected = true;
                complaints.extend(messages.into_iter().map(|message| TaggedComplaint {
                    fingerprint: fingerprint_for_complaint(criterion.id(), module.name(), &message),
                    criterion_id: criterion.id().to_string(),
                    message,
                }));
            }
            Err(err) => {
                return finish(
                    module,
                    ModuleStatus::Faulted {
                        error: err.to_string(),
                    },
                    complaints,
                    policy.max_complaints,
                );
            }
        }
    }

    let status = if rejected {
        ModuleStatus::Rejected
    } else {
        ModuleStatus::Admitted
    };
    finish(module, status, complaints, policy.max_complaints)
}

fn finish(
    module: &dyn CandidateModule,
    status: ModuleStatus,
    mut complaints: Vec<TaggedComplaint>,
    max_complaints: usize,
) -> ModuleOutcome {
    let mut truncated_reason = None;
    if complaints.len() > max_complaints {
        truncated_reason = Some(format!(
            "{} complaint(s) truncated to max_complaints={}",
            complaints.len(),
            max_complaints
        ));
        complaints.truncate(max_complaints);
    }

    ModuleOutcome {
        module: module.name().to_string(),
        status,
        complaints,
        truncated_reason,
    }
}

fn compute_verdict(counts: &OutcomeCounts, fail_on: FailOn) -> Verdict {
    if counts.faulted > 0 {
        return Verdict::Fail;
    }

    if counts.rejected > 0 {
        return match fail_on {
            FailOn::Rejection => Verdict::Fail,
            FailOn::Fault => Verdict::Warn,
        };
    }

    Verdict::Pass
}
