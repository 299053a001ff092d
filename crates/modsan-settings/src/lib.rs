//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod defaults;
mod legacy;
mod model;
mod resolve;

pub use legacy::{PublishConfig, PublishModule};
pub use model::{ModsanConfigV1, ModuleConfig};
pub use resolve::{
    ConfigError, EffectiveConfig, ModuleSource, Overrides, ResolvedConfig, gradle_project_dir,
};

/// Parse `modsan.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ModsanConfigV1> {
    let cfg: ModsanConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Parse a legacy root `publish.json` (`{"modules":[{"name":..}]}`). Unknown keys are ignored.
pub fn parse_publish_json(input: &str) -> anyhow::Result<PublishConfig> {
    let cfg: PublishConfig = serde_json::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (defaults + config file + legacy module list + overrides).
pub fn resolve_config(
    cfg: ModsanConfigV1,
    legacy: Option<PublishConfig>,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, legacy, overrides)
}

/// JSON schema for `modsan.toml`.
pub fn config_schema() -> serde_json::Value {
    schemars::schema_for!(ModsanConfigV1).to_value()
}
