//! Project-level configuration support
//!
//! Loads per-project configuration from `rubricrank.toml` or
//! `.rubricrankrc.json` in the working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # rubricrank.toml
//!
//! [modules.security]
//! enabled = true
//! weight = 0.30          # Override the default weight
//!
//! [modules.documentation]
//! enabled = false
//!
//! [presets.ship-it]
//! performance = 3
//! security = 1
//!
//! [defaults]
//! preset = "balanced"
//! format = "markdown"
//! ```

use crate::models::AnalyzerModule;
use crate::scoring::{Preset, PresetCatalog};
use anyhow::{bail, Context};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Config file names searched in order
pub const CONFIG_FILE_NAMES: &[&str] = &["rubricrank.toml", ".rubricrankrc.json"];

/// Project configuration loaded from rubricrank.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Per-module overrides (keyed by module id)
    #[serde(default)]
    pub modules: HashMap<String, ModuleOverride>,

    /// Extra presets: name -> module id -> fraction
    #[serde(default)]
    pub presets: IndexMap<String, IndexMap<String, f64>>,

    /// Default CLI settings
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Override settings for one module
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ModuleOverride {
    /// Enable/disable the module at registration
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Replaces the module's default weight
    #[serde(default)]
    pub weight: Option<f64>,

    /// Replaces the module's display name
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Preset applied before any --weight edits
    #[serde(default)]
    pub preset: Option<String>,

    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `rubricrank.toml`
/// 2. `.rubricrankrc.json`
///
/// A file that fails to parse is skipped with a warning. Returns default
/// configuration if no usable file is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load and validate a config file, choosing the parser by extension
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let config: ProjectConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => toml::from_str(&content)?,
    };
    config.validate()?;
    Ok(config)
}

impl ProjectConfig {
    /// Reject negative or non-finite weights and fractions
    pub fn validate(&self) -> anyhow::Result<()> {
        for (id, module) in &self.modules {
            if let Some(weight) = module.weight {
                if !weight.is_finite() || weight < 0.0 {
                    bail!("modules.{}.weight must be a non-negative number, got {}", id, weight);
                }
            }
        }
        for (name, fractions) in &self.presets {
            for (id, fraction) in fractions {
                if !fraction.is_finite() || *fraction < 0.0 {
                    bail!(
                        "presets.{}.{} must be a non-negative number, got {}",
                        name,
                        id,
                        fraction
                    );
                }
            }
        }
        Ok(())
    }

    fn module_override(&self, id: &str) -> Option<&ModuleOverride> {
        self.modules
            .get(id)
            .or_else(|| self.modules.get(&normalize_module_id(id)))
            .or_else(|| {
                self.modules
                    .iter()
                    .find(|(key, _)| normalize_module_id(key) == normalize_module_id(id))
                    .map(|(_, o)| o)
            })
    }

    /// Check if a module is enabled (defaults to the module's own flag)
    pub fn is_module_enabled(&self, id: &str) -> Option<bool> {
        self.module_override(id).and_then(|o| o.enabled)
    }

    /// Apply overrides to a module before it is registered
    pub fn apply_to_module(&self, mut module: AnalyzerModule) -> AnalyzerModule {
        if let Some(o) = self.module_override(&module.id) {
            if let Some(enabled) = o.enabled {
                module.enabled = enabled;
            }
            if let Some(weight) = o.weight {
                module.default_weight = weight;
            }
            if let Some(name) = &o.display_name {
                module.display_name = name.clone();
            }
        }
        module
    }

    /// Built-in presets plus the configured ones (configured names win)
    pub fn preset_catalog(&self) -> PresetCatalog {
        let mut catalog = PresetCatalog::builtin();
        for (name, fractions) in &self.presets {
            let fractions = fractions
                .iter()
                .map(|(id, f)| (normalize_module_id(id), *f));
            catalog.insert(Preset::new(name.clone(), fractions));
        }
        catalog
    }
}

/// Normalize a module id for config lookup
///
/// Accepts kebab-case and mixed case: `Code-Quality` -> `code_quality`.
pub fn normalize_module_id(id: &str) -> String {
    id.trim().to_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_module_id() {
        assert_eq!(normalize_module_id("code_quality"), "code_quality");
        assert_eq!(normalize_module_id("Code-Quality"), "code_quality");
        assert_eq!(normalize_module_id(" security "), "security");
    }

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert!(config.is_module_enabled("security").is_none());
        let module = config.apply_to_module(AnalyzerModule::new("security", "Security", 0.15));
        assert!(module.enabled);
        assert!((module.default_weight - 0.15).abs() < f64::EPSILON);
        assert_eq!(config.preset_catalog().len(), PresetCatalog::builtin().len());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
[modules.security]
weight = 0.3
display_name = "Security"

[modules.requirements-traceability]
enabled = false

[presets.ship-it]
performance = 3
code-quality = 1

[defaults]
preset = "ship-it"
format = "markdown"
"#;

        let config: ProjectConfig = toml::from_str(toml_content).expect("parse config");
        config.validate().expect("valid config");

        let security = config.apply_to_module(AnalyzerModule::new("security", "Security Analysis", 0.15));
        assert!((security.default_weight - 0.3).abs() < f64::EPSILON);
        assert_eq!(security.display_name, "Security");

        assert_eq!(config.is_module_enabled("requirements_traceability"), Some(false));

        let catalog = config.preset_catalog();
        let preset = catalog.get("ship-it").expect("custom preset");
        assert_eq!(preset.fraction("code_quality"), Some(1.0));
        assert_eq!(preset.fraction("performance"), Some(3.0));

        assert_eq!(config.defaults.preset.as_deref(), Some("ship-it"));
        assert_eq!(config.defaults.format.as_deref(), Some("markdown"));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let config: ProjectConfig = toml::from_str(
            r#"
[presets.bad]
security = -1
"#,
        )
        .expect("parse config");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_project_config_prefers_toml() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(
            dir.path().join("rubricrank.toml"),
            "[defaults]\nformat = \"json\"\n",
        )
        .expect("write toml");
        std::fs::write(
            dir.path().join(".rubricrankrc.json"),
            r#"{"defaults": {"format": "markdown"}}"#,
        )
        .expect("write json");

        let config = load_project_config(dir.path());
        assert_eq!(config.defaults.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_load_project_config_falls_back_on_bad_toml() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("rubricrank.toml"), "[modules\nbroken").expect("write toml");
        std::fs::write(
            dir.path().join(".rubricrankrc.json"),
            r#"{"modules": {"documentation": {"enabled": false}}}"#,
        )
        .expect("write json");

        let config = load_project_config(dir.path());
        assert_eq!(config.is_module_enabled("documentation"), Some(false));
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().expect("temp dir");
        let config = load_project_config(dir.path());
        assert!(config.modules.is_empty());
        assert!(config.presets.is_empty());
    }

    #[test]
    fn test_load_config_file_strict() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[modules.security]\nweight = -2\n").expect("write toml");
        assert!(load_config_file(&path).is_err());
        assert!(load_config_file(&dir.path().join("missing.toml")).is_err());
    }
}
