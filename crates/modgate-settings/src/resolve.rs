use crate::model::{CriterionConfig, ModgateConfigV1};
use crate::presets::{self, DEFAULT_PROFILE};
use anyhow::Context;
use globset::Glob;
use modgate_domain::policy::{AdmissionPolicy, FailOn};
use modgate_domain::{Criterion, ModuleCriterion, TypeCriterion, TypePredicate, predicates};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_on: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub policy: AdmissionPolicy,
    /// Discovery globs, relative to the probe directory.
    pub include: Vec<String>,
}

pub fn resolve_config(
    cfg: ModgateConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

    let preset = presets::preset(&profile);

    let fail_on = match overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        Some(v) => parse_fail_on(v)?,
        None => preset.fail_on,
    };

    let max_complaints = cfg
        .max_complaints
        .map(|n| n as usize)
        .unwrap_or(preset.max_complaints);

    let include = if cfg.include.is_empty() {
        preset.include
    } else {
        validate_include(&cfg.include)?;
        cfg.include
    };

    let criterion_configs = if cfg.criteria.is_empty() {
        preset.criteria
    } else {
        cfg.criteria
    };

    let mut criteria: Vec<Arc<dyn Criterion>> = Vec::with_capacity(criterion_configs.len());
    for cc in &criterion_configs {
        let criterion =
            build_criterion(cc).with_context(|| format!("invalid criterion '{}'", cc.id))?;
        criteria.push(Arc::new(criterion));
    }

    Ok(ResolvedConfig {
        policy: AdmissionPolicy {
            profile: preset.profile,
            fail_on,
            max_complaints,
            criteria,
        },
        include,
    })
}

/// Turn one `[[criteria]]` entry into a criterion.
///
/// An entry without `rule` is passed to the builder without a predicate, so the builder's
/// own validation reports it.
pub fn build_criterion(cc: &CriterionConfig) -> anyhow::Result<ModuleCriterion> {
    match cc.kind.as_deref().unwrap_or("type") {
        "type" => {
            let predicate = cc.rule.as_deref().map(|r| type_rule(cc, r)).transpose()?;
            let default_complaints = match &cc.default_complaints {
                Some(list) => list.clone(),
                None => vec![derived_default_complaint(cc)],
            };
            Ok(TypeCriterion::builder()
                .id(&cc.id)
                .shared_predicate(predicate)
                .default_complaints(default_complaints)
                .build()?)
        }
        "module" => {
            if cc.default_complaints.is_some() {
                anyhow::bail!("default_complaints only apply to type criteria");
            }
            let builder = ModuleCriterion::builder().id(&cc.id);
            let builder = match cc.rule.as_deref() {
                None => builder,
                Some("module_name") => builder
                    .module_predicate(predicates::module_name_allowed(&cc.id, patterns(cc)?)?),
                Some("module_deny") => builder
                    .module_predicate(predicates::module_name_denied(&cc.id, patterns(cc)?)?),
                Some(other) => anyhow::bail!(
                    "unknown module rule: {other} (expected module_name|module_deny)"
                ),
            };
            Ok(builder.build()?)
        }
        other => anyhow::bail!("unknown criterion kind: {other} (expected type|module)"),
    }
}

fn type_rule(cc: &CriterionConfig, rule: &str) -> anyhow::Result<TypePredicate> {
    let predicate: TypePredicate = match rule {
        "implements" => Arc::new(predicates::implements(required(&cc.interface, "interface")?)),
        "has_attribute" => {
            Arc::new(predicates::has_attribute(required(&cc.attribute, "attribute")?))
        }
        "type_name" => Arc::new(predicates::type_name_matches(&cc.id, patterns(cc)?)?),
        "any_type" => Arc::new(predicates::any_type()),
        other => anyhow::bail!(
            "unknown type rule: {other} (expected implements|has_attribute|type_name|any_type)"
        ),
    };
    Ok(predicate)
}

fn derived_default_complaint(cc: &CriterionConfig) -> String {
    match (cc.rule.as_deref(), &cc.interface, &cc.attribute) {
        (Some("implements"), Some(interface), _) => format!(
            "module exports no public concrete type implementing '{}'",
            interface
        ),
        (Some("has_attribute"), _, Some(attribute)) => format!(
            "module exports no public concrete type marked [{}]",
            attribute
        ),
        (Some("type_name"), _, _) => format!(
            "module exports no type matching {}",
            cc.patterns.join(", ")
        ),
        _ => "module exports no qualifying type".to_string(),
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> anyhow::Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("missing required field '{field}'"))
}

fn patterns(cc: &CriterionConfig) -> anyhow::Result<&[String]> {
    if cc.patterns.is_empty() {
        anyhow::bail!("missing required field 'patterns'");
    }
    Ok(&cc.patterns)
}

fn validate_include(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid include glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "fault" => Ok(FailOn::Fault),
        "rejection" | "reject" => Ok(FailOn::Rejection),
        other => anyhow::bail!("unknown fail_on: {other} (expected fault|rejection)"),
    }
}
