use crate::model::CriterionConfig;
use modgate_domain::policy::FailOn;
use modgate_types::ids;

pub const DEFAULT_PROFILE: &str = "plugin";
pub const DEFAULT_INCLUDE: &str = "**/*.module.toml";

/// A profile before user config is layered on top.
#[derive(Clone, Debug)]
pub struct Preset {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_complaints: usize,
    pub include: Vec<String>,
    pub criteria: Vec<CriterionConfig>,
}

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into probe config.
pub fn preset(profile: &str) -> Preset {
    match profile {
        "any" => any_profile(),
        // default
        _ => plugin_profile(),
    }
}

fn plugin_profile() -> Preset {
    Preset {
        profile: DEFAULT_PROFILE.to_string(),
        fail_on: FailOn::Fault,
        max_complaints: 50,
        include: vec![DEFAULT_INCLUDE.to_string()],
        criteria: vec![CriterionConfig {
            id: ids::CRITERION_PLUGIN_EXPORTS_PLUGIN.to_string(),
            kind: Some("type".to_string()),
            rule: Some("implements".to_string()),
            interface: Some("Plugin".to_string()),
            ..CriterionConfig::default()
        }],
    }
}

fn any_profile() -> Preset {
    // Admits anything that loads and exports at least one type.
    Preset {
        profile: "any".to_string(),
        fail_on: FailOn::Fault,
        max_complaints: 50,
        include: vec![DEFAULT_INCLUDE.to_string()],
        criteria: vec![CriterionConfig {
            id: ids::CRITERION_MODULE_EXPORTS_TYPES.to_string(),
            kind: Some("type".to_string()),
            rule: Some("any_type".to_string()),
            ..CriterionConfig::default()
        }],
    }
}
