//! Stable identifiers for preset criteria and module outcome codes.
//!
//! Criterion IDs are a dotted namespace. Outcome codes are short snake_case discriminators.

// Preset criteria
pub const CRITERION_PLUGIN_EXPORTS_PLUGIN: &str = "plugin.exports_plugin";
pub const CRITERION_MODULE_EXPORTS_TYPES: &str = "module.exports_types";

// Outcome codes
pub const CODE_ADMITTED: &str = "admitted";
pub const CODE_REJECTED: &str = "rejected";
pub const CODE_FAULTED: &str = "faulted";
pub const CODE_UNREADABLE: &str = "unreadable";

// Tool-level
pub const CRITERION_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
