//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CriterionConfig, ModgateConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `modgate.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ModgateConfigV1> {
    let cfg: ModgateConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective policy used by the engine (profiles + overrides + criteria).
pub fn resolve_config(
    cfg: ModgateConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
