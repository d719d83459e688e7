use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `modgate.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ModgateConfigV1 {
    /// Optional schema string for tooling (`modgate.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When to fail the scan: `fault` (default) or `rejection`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many complaints to keep per module before truncating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_complaints: Option<u32>,

    /// Globs (relative to the probe directory) selecting module descriptor files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Criteria replacing the profile's criteria when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<CriterionConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CriterionConfig {
    /// Stable identifier tagging this criterion's complaints.
    pub id: String,

    /// `type` (default) evaluates exported types; `module` evaluates the module as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Type rules: `implements`, `has_attribute`, `type_name`, `any_type`.
    /// Module rules: `module_name`, `module_deny`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,

    /// Glob patterns for the name-based rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,

    /// Complaints reported when no type qualifies and none said why (type rules only).
    /// Omitted: derived from the rule. Present: must be non-empty with no blank entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_complaints: Option<Vec<String>>,
}
