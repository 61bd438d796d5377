//! Configuration loading.
//!
//! Settings are layered file → environment → command line as raw numbers,
//! then clamped once into a [`DrillConfig`]. Out-of-range values are never
//! rejected; each clamp produces a [`ConfigWarning`].

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{clamp_focus, clamp_max_operand, DrillConfig, Operation, DEFAULT_MAX_OPERAND};

/// File name searched for in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "drillcard.toml";

/// Raw, unclamped drill settings as they appear in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillSettings {
    #[serde(default)]
    pub max_operand: Option<i64>,
    #[serde(default)]
    pub focus: Option<i64>,
    #[serde(default)]
    pub operation: Option<Operation>,
}

impl DrillSettings {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merge(&mut self, other: &DrillSettings) {
        if other.max_operand.is_some() {
            self.max_operand = other.max_operand;
        }
        if other.focus.is_some() {
            self.focus = other.focus;
        }
        if other.operation.is_some() {
            self.operation = other.operation;
        }
    }
}

/// Top-level `drillcard.toml` layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillcardFile {
    #[serde(default)]
    pub drill: DrillSettings,
}

/// A setting that had to be clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub field: &'static str,
    pub requested: i64,
    pub applied: u32,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is out of range, using {}",
            self.field, self.requested, self.applied
        )
    }
}

/// The resolved configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DrillConfig,
    /// Config file that was read, if any.
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Clamp raw settings into a valid configuration, collecting a warning for
/// every value that moved.
pub fn resolve(settings: &DrillSettings) -> (DrillConfig, Vec<ConfigWarning>) {
    let mut warnings = Vec::new();

    let requested_max = settings.max_operand.unwrap_or(i64::from(DEFAULT_MAX_OPERAND));
    let max_operand = clamp_max_operand(requested_max);
    if i64::from(max_operand) != requested_max {
        warnings.push(ConfigWarning {
            field: "max_operand",
            requested: requested_max,
            applied: max_operand,
        });
    }

    if let Some(requested_focus) = settings.focus {
        let focus = clamp_focus(requested_focus, max_operand);
        if i64::from(focus) != requested_focus {
            warnings.push(ConfigWarning {
                field: "focus",
                requested: requested_focus,
                applied: focus,
            });
        }
    }

    for w in &warnings {
        tracing::warn!(
            field = w.field,
            requested = w.requested,
            applied = w.applied,
            "clamped setting"
        );
    }

    let config = DrillConfig::new(
        requested_max,
        settings.focus,
        settings.operation.unwrap_or_default(),
    );
    (config, warnings)
}

/// Parse a `drillcard.toml` file.
pub fn parse_config_file(path: &Path) -> Result<DrillcardFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<DrillcardFile>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Read `DRILLCARD_MAX`, `DRILLCARD_FOCUS` and `DRILLCARD_OPERATION` through
/// `lookup`. `DRILLCARD_FOCUS=off` is reported as `Some(None)`.
pub fn env_settings_with<F>(lookup: F) -> Result<(DrillSettings, Option<Option<i64>>)>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = DrillSettings::default();
    let mut focus_override = None;

    if let Some(raw) = lookup("DRILLCARD_MAX") {
        settings.max_operand = Some(parse_number("DRILLCARD_MAX", &raw)?);
    }
    if let Some(raw) = lookup("DRILLCARD_FOCUS") {
        focus_override = Some(parse_focus("DRILLCARD_FOCUS", &raw)?);
    }
    if let Some(raw) = lookup("DRILLCARD_OPERATION") {
        settings.operation = Some(raw.parse::<Operation>().context("DRILLCARD_OPERATION")?);
    }

    Ok((settings, focus_override))
}

/// Parse a focus value where `off`, `none` or an empty string clear it.
pub fn parse_focus(field: &'static str, raw: &str) -> Result<Option<i64>, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "" | "off" | "none" => Ok(None),
        _ => parse_number(field, raw).map(Some),
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<i64, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Load config from an explicit path, then apply environment overrides and
/// finally `cli` overrides.
///
/// Without an explicit path the search order is:
/// 1. `drillcard.toml` in the current directory
/// 2. `~/.config/drillcard/config.toml`
///
/// `clear_focus` drops any focus number set by earlier layers.
pub fn load_config_from(
    path: Option<&Path>,
    cli: &DrillSettings,
    clear_focus: bool,
) -> Result<LoadedConfig> {
    let source = find_config_file(path)?;

    let mut settings = match &source {
        Some(path) => parse_config_file(path)?.drill,
        None => DrillSettings::default(),
    };

    let (env, env_focus) = env_settings_with(|name| std::env::var(name).ok())?;
    settings.merge(&env);
    if let Some(focus) = env_focus {
        settings.focus = focus;
    }

    settings.merge(cli);
    if clear_focus {
        settings.focus = None;
    }

    let (config, warnings) = resolve(&settings);
    tracing::debug!(%config, source = ?source, "configuration loaded");
    Ok(LoadedConfig {
        config,
        source,
        warnings,
    })
}

fn find_config_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(p) = path {
        if p.exists() {
            return Ok(Some(p.to_path_buf()));
        }
        anyhow::bail!("config file not found: {}", p.display());
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(dirs_path()
        .map(|dir| dir.join("config.toml"))
        .filter(|global| global.exists()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("drillcard"))
}
