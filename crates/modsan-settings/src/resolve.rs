use crate::{defaults, legacy::PublishConfig, model::ModsanConfigV1};
use anyhow::Context;
use modsan_domain::ExclusionSet;
use modsan_types::{Coordinate, ids};

const MAX_INDENT: usize = 16;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub publication: Option<String>,
    /// Replaces the configured exclusions entirely.
    pub exclusions: Option<Vec<Coordinate>>,
    pub indent: Option<usize>,
}

/// Where the list of module files comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleSource {
    /// `[[modules]]` in `modsan.toml`; project directories relative to the repo root.
    Config(Vec<String>),
    /// Root `publish.json`; project directories relative to the repo root.
    PublishJson(Vec<String>),
    /// Walk the repo for `<build_dir>/publications/<publication>/module.json`.
    Discover,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveConfig {
    pub publication: String,
    pub build_dir: String,
    pub indent: usize,
    pub exclusions: ExclusionSet,
    pub modules: ModuleSource,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported config schema: {0} (expected {expected})", expected = ids::SCHEMA_CONFIG_V1)]
    Schema(String),
    #[error("no exclusion rules configured")]
    NoExclusions,
    #[error("exclusion rule has an empty {0}")]
    EmptyCoordinate(&'static str),
    #[error("indent {0} is out of range (expected 0..={max})", max = MAX_INDENT)]
    Indent(usize),
    #[error("invalid {kind} name: {value:?}")]
    PathComponent { kind: &'static str, value: String },
    #[error("invalid Gradle project path: {0:?}")]
    ProjectPath(String),
}

pub fn resolve_config(
    cfg: ModsanConfigV1,
    legacy: Option<PublishConfig>,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != ids::SCHEMA_CONFIG_V1
    {
        return Err(ConfigError::Schema(schema.to_string()).into());
    }

    let mut effective = defaults::effective_defaults();

    if let Some(publication) = overrides.publication.or(cfg.publication) {
        validate_component("publication", &publication)?;
        effective.publication = publication;
    }

    if let Some(build_dir) = cfg.build_dir {
        validate_component("build_dir", &build_dir)?;
        effective.build_dir = build_dir;
    }

    if let Some(indent) = overrides.indent.or(cfg.indent) {
        if indent > MAX_INDENT {
            return Err(ConfigError::Indent(indent).into());
        }
        effective.indent = indent;
    }

    // Exclusions: an override replaces the file's list, which replaces the default.
    let rules = match overrides.exclusions {
        Some(rules) => Some(rules),
        None if !cfg.exclude.is_empty() => Some(cfg.exclude),
        None => None,
    };
    if let Some(rules) = rules {
        for rule in &rules {
            validate_coordinate(rule)?;
        }
        effective.exclusions = ExclusionSet::new(rules);
    }
    if effective.exclusions.is_empty() {
        return Err(ConfigError::NoExclusions.into());
    }

    effective.modules = if !cfg.modules.is_empty() {
        let dirs = project_dirs(cfg.modules.iter().map(|m| m.name.as_str()))
            .context("modsan.toml modules")?;
        ModuleSource::Config(dirs)
    } else if let Some(legacy) = legacy {
        let dirs = project_dirs(legacy.modules.iter().map(|m| m.name.as_str()))
            .context("publish.json modules")?;
        ModuleSource::PublishJson(dirs)
    } else {
        ModuleSource::Discover
    };

    Ok(ResolvedConfig { effective })
}

/// Map a Gradle project path to its directory relative to the root project.
///
/// `:a:b` -> `a/b`, `a` -> `a`, `:` -> `.`
pub fn gradle_project_dir(path: &str) -> Result<String, ConfigError> {
    let trimmed = path.trim();
    let body = trimmed.strip_prefix(':').unwrap_or(trimmed);
    if body.is_empty() {
        return if trimmed.is_empty() {
            Err(ConfigError::ProjectPath(path.to_string()))
        } else {
            Ok(".".to_string())
        };
    }

    let segments: Vec<&str> = body.split(':').collect();
    if segments.iter().any(|s| !is_plain_component(s)) {
        return Err(ConfigError::ProjectPath(path.to_string()));
    }
    Ok(segments.join("/"))
}

fn project_dirs<'a>(names: impl Iterator<Item = &'a str>) -> Result<Vec<String>, ConfigError> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let dir = gradle_project_dir(name)?;
        if !out.contains(&dir) {
            out.push(dir);
        }
    }
    Ok(out)
}

fn validate_coordinate(rule: &Coordinate) -> Result<(), ConfigError> {
    if rule.group.trim().is_empty() {
        return Err(ConfigError::EmptyCoordinate("group"));
    }
    if rule.module.trim().is_empty() {
        return Err(ConfigError::EmptyCoordinate("module"));
    }
    Ok(())
}

fn validate_component(kind: &'static str, value: &str) -> Result<(), ConfigError> {
    if is_plain_component(value) {
        Ok(())
    } else {
        Err(ConfigError::PathComponent {
            kind,
            value: value.to_string(),
        })
    }
}

fn is_plain_component(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\'])
}
