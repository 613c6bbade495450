//! Configuration module for rubricrank
//!
//! This module handles:
//! - Project-level configuration (rubricrank.toml)
//! - Module enable flags and weight overrides
//! - Custom presets
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, normalize_module_id, CliDefaults, ModuleOverride,
    ProjectConfig, CONFIG_FILE_NAMES,
};
