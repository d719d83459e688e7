//! Use case orchestration for modgate.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo,
//! settings and render layers. The CLI crate depends on this; it only handles argument
//! parsing and I/O.

#![forbid(unsafe_code)]

mod render;
mod report;
mod scan;

pub use render::{render_annotations, render_markdown};
pub use report::{
    parse_report_json, report_schema, runtime_error_report, serialize_report, to_renderable,
};
pub use scan::{ScanInput, ScanOutput, run_scan, verdict_exit_code};
