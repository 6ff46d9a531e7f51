//! Configuration file support for cps-deps.
//!
//! Provides YAML-based configuration through `cps-deps.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use cps_dependencies::application::dto::OutputFormat;
use cps_dependencies::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "cps-deps.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub target: Option<String>,
    pub project_item_specs: Option<Vec<String>>,
    pub show_hidden: Option<bool>,
    pub follow_project_references: Option<bool>,
    pub fail_on_unresolved: Option<bool>,
    pub filters: Option<FiltersConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Filter chain settings.
#[derive(Debug, Deserialize, Default)]
pub struct FiltersConfig {
    /// Built-in filters to leave out of the chain, by name.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl ConfigFile {
    pub fn disabled_filters(&self) -> &[String] {
        self.filters
            .as_ref()
            .map(|f| f.disabled.as_slice())
            .unwrap_or_default()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "using discovered config file");
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        if let Err(e) = format.parse::<OutputFormat>() {
            bail!("Invalid config: {}", e);
        }
    }
    for (i, name) in config.disabled_filters().iter().enumerate() {
        if name.trim().is_empty() {
            bail!(
                "Invalid config: filters.disabled[{}] must not be empty.\n\n\
                 💡 Hint: Use a built-in filter name (e.g., \"implicit-top-level\").",
                i
            );
        }
    }
    if let Some(ref specs) = config.project_item_specs {
        if specs.iter().any(|s| s.trim().is_empty()) {
            bail!("Invalid config: project_item_specs entries must not be empty.");
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
