use crate::ProbePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for modgate scan reports.
pub const SCHEMA_REPORT_V1: &str = "modgate.report.v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

/// What happened to one candidate module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionStatus {
    /// Every criterion admitted the module.
    Admitted,
    /// At least one criterion rejected the module; see `complaints`.
    Rejected,
    /// A criterion failed with an unclassifiable loader fault; see `fault`.
    Faulted,
    /// The module descriptor itself could not be read or parsed.
    Unreadable,
}

impl AdmissionStatus {
    pub fn code(self) -> &'static str {
        match self {
            AdmissionStatus::Admitted => crate::ids::CODE_ADMITTED,
            AdmissionStatus::Rejected => crate::ids::CODE_REJECTED,
            AdmissionStatus::Faulted => crate::ids::CODE_FAULTED,
            AdmissionStatus::Unreadable => crate::ids::CODE_UNREADABLE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComplaintRecord {
    pub criterion_id: String,
    pub message: String,

    /// Stable identifier intended for dedup and trending: a hash of
    /// `criterion_id + module name + message`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModuleRecord {
    pub path: ProbePath,

    /// Declared module name; absent when the descriptor was unreadable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub status: AdmissionStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub complaints: Vec<ComplaintRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub complaints_truncated: Option<String>,

    /// Rendered fault for `faulted` and `unreadable` modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Modgate-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ScanData {
    pub profile: String,

    pub modules_scanned: u32,
    pub admitted: u32,
    pub rejected: u32,
    pub faulted: u32,
    pub unreadable: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanReport {
    /// Versioned schema identifier for the report shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub modules: Vec<ModuleRecord>,
    pub data: ScanData,
}

impl ScanReport {
    /// Names of admitted modules, in report order.
    pub fn admitted_names(&self) -> Vec<&str> {
        self.modules
            .iter()
            .filter(|m| m.status == AdmissionStatus::Admitted)
            .filter_map(|m| m.name.as_deref())
            .collect()
    }
}
