//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - dependency deduplication during fault interception
//! - short-circuiting on the first admitting type
//! - complaint ordering when no type admits

use crate::criterion::Criterion;
use crate::fault::{LoaderFault, TypeLoadError};
use crate::intercept::{Interception, intercept};
use crate::lift::TypeCriterion;
use crate::model::Admission;
use crate::test_support::{CallLog, StubModule, classes};
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Strategies
// ============================================================================

/// A classifiable sub-fault over a small dependency alphabet, so duplicates are common.
fn arb_dependency_fault() -> impl Strategy<Value = LoaderFault> {
    (
        prop::option::weighted(0.9, prop::sample::select(vec!["X", "Y", "Z", "W"])),
        "[a-z]{1,8}",
        any::<bool>(),
    )
        .prop_map(|(dep, message, not_found)| {
            let dependency = dep.map(str::to_string);
            if not_found {
                LoaderFault::DependencyNotFound {
                    dependency,
                    message,
                }
            } else {
                LoaderFault::DependencyLoadFailed {
                    dependency,
                    message,
                }
            }
        })
}

fn arb_unclassifiable_fault() -> impl Strategy<Value = LoaderFault> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|message| LoaderFault::Other { message }),
        ("[A-Z][a-z]{0,6}", "[a-z]{1,8}").prop_map(|(type_name, message)| {
            LoaderFault::InvalidTypeDefinition { type_name, message }
        }),
    ]
}

fn key_and_message(fault: &LoaderFault) -> (Option<String>, String) {
    match fault {
        LoaderFault::DependencyNotFound {
            dependency,
            message,
        }
        | LoaderFault::DependencyLoadFailed {
            dependency,
            message,
        } => (dependency.clone(), message.clone()),
        other => panic!("unexpected fault {other:?}"),
    }
}

// ============================================================================
// Interception
// ============================================================================

proptest! {
    #[test]
    fn interception_keeps_first_message_per_dependency(
        faults in prop::collection::vec(arb_dependency_fault(), 1..24)
    ) {
        let err = TypeLoadError::new("m", faults.clone());
        let Interception::Classified(complaints) = intercept(&err) else {
            panic!("dependency-only faults must classify");
        };

        let mut expected: Vec<(Option<String>, String)> = Vec::new();
        for f in &faults {
            let (key, message) = key_and_message(f);
            if !expected.iter().any(|(k, _)| *k == key) {
                expected.push((key, message));
            }
        }

        prop_assert_eq!(complaints.len(), expected.len());
        for (complaint, (key, message)) in complaints.iter().zip(&expected) {
            match key {
                Some(k) => {
                    let quoted = format!("'{k}'");
                    prop_assert!(complaint.contains(&quoted));
                }
                None => prop_assert!(complaint.contains("unnamed")),
            }
            let suffix = format!(": {message}");
            prop_assert!(complaint.ends_with(&suffix));
        }
    }

    #[test]
    fn one_unclassifiable_fault_poisons_interception(
        mut faults in prop::collection::vec(arb_dependency_fault(), 0..12),
        bad in arb_unclassifiable_fault(),
        at in any::<prop::sample::Index>(),
    ) {
        let position = at.index(faults.len() + 1);
        faults.insert(position, bad);
        let err = TypeLoadError::new("m", faults);
        prop_assert_eq!(intercept(&err), Interception::Unclassified);
    }
}

// ============================================================================
// Type lifting
// ============================================================================

proptest! {
    #[test]
    fn lifting_stops_at_first_admitting_type(
        n in 1usize..20,
        admit in prop::collection::btree_set(1usize..20, 0..4),
    ) {
        let log = Arc::new(CallLog::default());
        let seen = Arc::clone(&log);
        let admit_names: Vec<String> = admit.iter().map(|i| format!("T{i}")).collect();
        let criterion = TypeCriterion::builder()
            .type_predicate(move |t| {
                seen.record(t);
                if admit_names.contains(&t.name) {
                    Admission::Admitted
                } else {
                    Admission::silent_rejection()
                }
            })
            .default_complaints(["none"])
            .build()
            .expect("build");

        let result = criterion.evaluate(&StubModule::with_types("m", classes(n)));
        match admit.iter().copied().find(|i| *i <= n) {
            Some(first) => {
                prop_assert_eq!(result, Ok(Admission::Admitted));
                prop_assert_eq!(log.count(), first);
            }
            None => {
                prop_assert_eq!(result, Ok(Admission::rejected(["none"])));
                prop_assert_eq!(log.count(), n);
            }
        }
    }

    #[test]
    fn rejected_complaints_follow_type_order(
        per_type in prop::collection::vec(prop::collection::vec("[a-z]{1,4}", 0..3), 1..10),
    ) {
        let table = per_type.clone();
        let criterion = TypeCriterion::builder()
            .type_predicate(move |t| {
                let index: usize = t.name[1..].parse().expect("T<n>");
                Admission::rejected(table[index - 1].clone())
            })
            .default_complaints(["fallback"])
            .build()
            .expect("build");

        let flat: Vec<String> = per_type.iter().flatten().cloned().collect();
        let expected = if flat.is_empty() {
            vec!["fallback".to_string()]
        } else {
            flat
        };

        let result = criterion.evaluate(&StubModule::with_types("m", classes(per_type.len())));
        prop_assert_eq!(result, Ok(Admission::Rejected { complaints: expected }));
    }
}
