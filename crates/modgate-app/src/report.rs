use anyhow::Context;
use modgate_render::{
    RenderableComplaint, RenderableCounts, RenderableModule, RenderableReport, RenderableStatus,
    RenderableVerdict,
};
use modgate_types::{
    AdmissionStatus, ComplaintRecord, ModuleRecord, ProbePath, SCHEMA_REPORT_V1, ScanData,
    ScanReport, ToolMeta, Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<ScanReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse modgate report")
}

pub fn serialize_report(report: &ScanReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// JSON schema of the scan report, pretty printed.
pub fn report_schema() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(ScanReport);
    serde_json::to_string_pretty(&schema).context("serialize report schema")
}

pub fn to_renderable(report: &ScanReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdict::Pass,
            Verdict::Warn => RenderableVerdict::Warn,
            Verdict::Fail => RenderableVerdict::Fail,
        },
        profile: report.data.profile.clone(),
        modules: report.modules.iter().map(renderable_module).collect(),
        counts: RenderableCounts {
            scanned: report.data.modules_scanned,
            admitted: report.data.admitted,
            rejected: report.data.rejected,
            faulted: report.data.faulted,
            unreadable: report.data.unreadable,
        },
    }
}

fn renderable_module(m: &ModuleRecord) -> RenderableModule {
    RenderableModule {
        path: m.path.as_str().to_string(),
        name: m.name.clone(),
        status: match m.status {
            AdmissionStatus::Admitted => RenderableStatus::Admitted,
            AdmissionStatus::Rejected => RenderableStatus::Rejected,
            AdmissionStatus::Faulted => RenderableStatus::Faulted,
            AdmissionStatus::Unreadable => RenderableStatus::Unreadable,
        },
        complaints: m
            .complaints
            .iter()
            .map(|c| RenderableComplaint {
                criterion_id: c.criterion_id.clone(),
                message: c.message.clone(),
            })
            .collect(),
        truncated_reason: m.complaints_truncated.clone(),
        fault: m.fault.clone(),
    }
}

/// A failing report describing a tool error, so CI still receives a parseable artifact.
pub fn runtime_error_report(message: &str) -> ScanReport {
    let now = OffsetDateTime::now_utc();
    ScanReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "modgate".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        modules: vec![ModuleRecord {
            path: ProbePath::default(),
            name: None,
            status: AdmissionStatus::Faulted,
            complaints: vec![ComplaintRecord {
                criterion_id: ids::CRITERION_TOOL_RUNTIME.to_string(),
                message: message.to_string(),
                fingerprint: None,
            }],
            complaints_truncated: None,
            fault: Some(format!("{}: {}", ids::CODE_RUNTIME_ERROR, message)),
        }],
        data: ScanData {
            profile: "unknown".to_string(),
            modules_scanned: 0,
            faulted: 1,
            ..ScanData::default()
        },
    }
}
