//! Stable DTOs and IDs used across the modgate workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted scan report
//! - stable criterion IDs and outcome codes
//! - canonical probe-relative path handling

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod receipt;

pub use path::ProbePath;
pub use receipt::{
    AdmissionStatus, ComplaintRecord, ModuleRecord, SCHEMA_REPORT_V1, ScanData, ScanReport,
    ToolMeta, Verdict,
};
