//! Built-in predicates the configuration layer assembles criteria from.

use crate::error::{CriterionError, EvaluationError};
use crate::model::{Admission, CandidateModule, TypeDescriptor};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Admit a public, concrete type implementing `interface`.
///
/// Types implementing it that the host could not instantiate get a complaint naming the
/// type. Types not implementing it are silently skipped.
pub fn implements(
    interface: &str,
) -> impl Fn(&TypeDescriptor) -> Admission + Send + Sync + 'static {
    let interface = interface.to_string();
    move |t: &TypeDescriptor| {
        if !t.implements(&interface) {
            return Admission::silent_rejection();
        }
        match uninstantiable_reason(t) {
            None => Admission::Admitted,
            Some(reason) => Admission::rejected([format!(
                "type '{}' implements '{}' but {}",
                t.full_name(),
                interface,
                reason
            )]),
        }
    }
}

/// Admit a public, concrete type carrying the marker `attribute`.
pub fn has_attribute(
    attribute: &str,
) -> impl Fn(&TypeDescriptor) -> Admission + Send + Sync + 'static {
    let attribute = attribute.to_string();
    move |t: &TypeDescriptor| {
        if !t.has_attribute(&attribute) {
            return Admission::silent_rejection();
        }
        match uninstantiable_reason(t) {
            None => Admission::Admitted,
            Some(reason) => Admission::rejected([format!(
                "type '{}' is marked [{}] but {}",
                t.full_name(),
                attribute,
                reason
            )]),
        }
    }
}

/// Admit a type whose full name matches any of `patterns`.
pub fn type_name_matches(
    id: &str,
    patterns: &[String],
) -> Result<impl Fn(&TypeDescriptor) -> Admission + Send + Sync + 'static, CriterionError> {
    let set = build_globset(id, patterns)?;
    Ok(move |t: &TypeDescriptor| {
        if set.is_match(t.full_name()) {
            Admission::Admitted
        } else {
            Admission::silent_rejection()
        }
    })
}

/// Admit any type at all; only the default complaints speak for a module without types.
pub fn any_type() -> impl Fn(&TypeDescriptor) -> Admission + Send + Sync + 'static {
    |_: &TypeDescriptor| Admission::Admitted
}

/// Admit a module whose name matches any of `patterns`.
pub fn module_name_allowed(
    id: &str,
    patterns: &[String],
) -> Result<
    impl Fn(&dyn CandidateModule) -> Result<Admission, EvaluationError> + Send + Sync + 'static,
    CriterionError,
> {
    let set = build_globset(id, patterns)?;
    Ok(move |m: &dyn CandidateModule| {
        if set.is_match(m.name()) {
            Ok(Admission::Admitted)
        } else {
            Ok(Admission::rejected([format!(
                "module name '{}' is not in the allowlist",
                m.name()
            )]))
        }
    })
}

/// Reject a module whose name matches any of `patterns`, naming the first pattern hit.
pub fn module_name_denied(
    id: &str,
    patterns: &[String],
) -> Result<
    impl Fn(&dyn CandidateModule) -> Result<Admission, EvaluationError> + Send + Sync + 'static,
    CriterionError,
> {
    let set = build_globset(id, patterns)?;
    let patterns = patterns.to_vec();
    Ok(move |m: &dyn CandidateModule| {
        match set.matches(m.name()).first() {
            Some(&index) => Ok(Admission::rejected([format!(
                "module name '{}' is denied by pattern '{}'",
                m.name(),
                patterns[index]
            )])),
            None => Ok(Admission::Admitted),
        }
    })
}

fn uninstantiable_reason(t: &TypeDescriptor) -> Option<&'static str> {
    if t.kind == crate::model::TypeKind::Interface {
        Some("is itself an interface")
    } else if !t.public {
        Some("is not public")
    } else if t.abstract_ {
        Some("is abstract")
    } else {
        None
    }
}

fn build_globset(id: &str, patterns: &[String]) -> Result<GlobSet, CriterionError> {
    let invalid = |pattern: &str, reason: String| CriterionError::InvalidPattern {
        id: id.to_string(),
        pattern: pattern.to_string(),
        reason,
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| invalid(pattern, e.to_string()))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| invalid(&patterns.join(", "), e.to_string()))
}
