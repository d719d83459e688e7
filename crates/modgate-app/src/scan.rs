//! The `scan` use case: load a probe directory, evaluate admission and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use modgate_domain::report::{ModuleOutcome, ModuleStatus};
use modgate_repo::CatalogEntry;
use modgate_settings::{ModgateConfigV1, Overrides, ResolvedConfig};
use modgate_types::{
    AdmissionStatus, ComplaintRecord, ModuleRecord, SCHEMA_REPORT_V1, ScanData, ScanReport,
    ToolMeta, Verdict,
};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Input for the scan use case.
#[derive(Clone, Debug)]
pub struct ScanInput<'a> {
    /// Directory holding the candidate module descriptors.
    pub probe_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct ScanOutput {
    pub report: ScanReport,
    pub resolved: ResolvedConfig,
}

/// Run the scan use case: parse config, discover and load modules, evaluate admission.
pub fn run_scan(input: ScanInput<'_>) -> anyhow::Result<ScanOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Empty config is allowed, presets apply.
    let cfg = if input.config_text.trim().is_empty() {
        ModgateConfigV1::default()
    } else {
        modgate_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        modgate_settings::resolve_config(cfg, input.overrides).context("resolve config")?;

    let catalog = modgate_repo::load_probe(input.probe_root, &resolved.include)
        .context("load probe directory")?;

    let candidates = catalog.candidates();
    let domain_report = modgate_domain::evaluate(&candidates, &resolved.policy);

    let by_path: BTreeMap<&str, &ModuleOutcome> = candidates
        .iter()
        .zip(domain_report.outcomes.iter())
        .map(|(m, o)| (m.path().as_str(), o))
        .collect();

    let modules: Vec<ModuleRecord> = catalog
        .entries()
        .iter()
        .map(|entry| match entry {
            CatalogEntry::Broken { path, message, .. } => ModuleRecord {
                path: path.clone(),
                name: None,
                status: AdmissionStatus::Unreadable,
                complaints: Vec::new(),
                complaints_truncated: None,
                fault: Some(message.clone()),
            },
            CatalogEntry::Loaded(d) => match by_path.get(d.path.as_str()) {
                Some(outcome) => record_from_outcome(entry, outcome),
                // Every loaded entry is a candidate, so this arm only guards the lookup.
                None => ModuleRecord {
                    path: d.path.clone(),
                    name: Some(d.name.clone()),
                    status: AdmissionStatus::Faulted,
                    complaints: Vec::new(),
                    complaints_truncated: None,
                    fault: Some("module was not evaluated".to_string()),
                },
            },
        })
        .collect();

    let data = scan_data(&resolved.policy.profile, &modules);
    let verdict = if data.unreadable > 0 {
        Verdict::Fail
    } else {
        domain_report.verdict
    };

    tracing::info!(
        profile = %data.profile,
        scanned = data.modules_scanned,
        admitted = data.admitted,
        rejected = data.rejected,
        faulted = data.faulted,
        unreadable = data.unreadable,
        verdict = ?verdict,
        "scan finished"
    );

    let report = ScanReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "modgate".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        modules,
        data,
    };

    Ok(ScanOutput { report, resolved })
}

fn record_from_outcome(entry: &CatalogEntry, outcome: &ModuleOutcome) -> ModuleRecord {
    let (status, fault) = match &outcome.status {
        ModuleStatus::Admitted => (AdmissionStatus::Admitted, None),
        ModuleStatus::Rejected => (AdmissionStatus::Rejected, None),
        ModuleStatus::Faulted { error } => (AdmissionStatus::Faulted, Some(error.clone())),
    };
    ModuleRecord {
        path: entry.path().clone(),
        name: Some(entry.name().to_string()),
        status,
        complaints: outcome
            .complaints
            .iter()
            .map(|c| ComplaintRecord {
                criterion_id: c.criterion_id.clone(),
                message: c.message.clone(),
                fingerprint: Some(c.fingerprint.clone()),
            })
            .collect(),
        complaints_truncated: outcome.truncated_reason.clone(),
        fault,
    }
}

fn scan_data(profile: &str, modules: &[ModuleRecord]) -> ScanData {
    let mut data = ScanData {
        profile: profile.to_string(),
        modules_scanned: modules.len() as u32,
        ..ScanData::default()
    };
    for m in modules {
        match m.status {
            AdmissionStatus::Admitted => data.admitted += 1,
            AdmissionStatus::Rejected => data.rejected += 1,
            AdmissionStatus::Faulted => data.faulted += 1,
            AdmissionStatus::Unreadable => data.unreadable += 1,
        }
    }
    data
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
