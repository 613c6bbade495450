//! Named weight configurations
//!
//! Preset fractions are authored by hand and do not need to sum to 1.0;
//! they are normalized over the enabled modules when applied.

use crate::error::{EngineError, EngineResult};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Presets shipped with the rubric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinPreset {
    /// The rubric's default emphasis
    Balanced,
    /// Vulnerabilities and defensive coding dominate
    SecurityFirst,
    /// Efficiency and scalability dominate
    PerformanceFirst,
    /// Long-term upkeep: clarity, docs, structure
    Maintainability,
    /// Does it do what was asked
    RequirementsFirst,
}

impl BuiltinPreset {
    pub const ALL: [BuiltinPreset; 5] = [
        BuiltinPreset::Balanced,
        BuiltinPreset::SecurityFirst,
        BuiltinPreset::PerformanceFirst,
        BuiltinPreset::Maintainability,
        BuiltinPreset::RequirementsFirst,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinPreset::Balanced => "balanced",
            BuiltinPreset::SecurityFirst => "security-first",
            BuiltinPreset::PerformanceFirst => "performance-first",
            BuiltinPreset::Maintainability => "maintainability",
            BuiltinPreset::RequirementsFirst => "requirements-first",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BuiltinPreset::Balanced => "Default rubric weighting across all dimensions",
            BuiltinPreset::SecurityFirst => "Prioritize security and defensive code quality",
            BuiltinPreset::PerformanceFirst => "Prioritize efficiency and scalability",
            BuiltinPreset::Maintainability => "Prioritize readability, documentation and structure",
            BuiltinPreset::RequirementsFirst => "Prioritize fidelity to the original requirements",
        }
    }

    /// Authored fractions over the built-in module ids
    pub fn fractions(&self) -> &'static [(&'static str, f64)] {
        match self {
            BuiltinPreset::Balanced => &[
                ("performance", 20.0),
                ("readability", 15.0),
                ("requirements_traceability", 25.0),
                ("code_quality", 10.0),
                ("documentation", 5.0),
                ("security", 15.0),
                ("adaptability", 10.0),
            ],
            BuiltinPreset::SecurityFirst => &[
                ("security", 40.0),
                ("code_quality", 20.0),
                ("requirements_traceability", 20.0),
                ("performance", 10.0),
                ("readability", 5.0),
                ("documentation", 5.0),
            ],
            BuiltinPreset::PerformanceFirst => &[
                ("performance", 45.0),
                ("requirements_traceability", 20.0),
                ("code_quality", 15.0),
                ("security", 10.0),
                ("readability", 5.0),
            ],
            BuiltinPreset::Maintainability => &[
                ("readability", 30.0),
                ("documentation", 25.0),
                ("code_quality", 25.0),
                ("adaptability", 20.0),
            ],
            BuiltinPreset::RequirementsFirst => &[
                ("requirements_traceability", 50.0),
                ("performance", 15.0),
                ("security", 15.0),
                ("code_quality", 10.0),
                ("documentation", 10.0),
            ],
        }
    }

    pub fn preset(&self) -> Preset {
        Preset::new(self.name(), self.fractions().iter().copied())
            .with_description(self.description())
    }
}

impl FromStr for BuiltinPreset {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinPreset::ALL
            .into_iter()
            .find(|p| p.name() == s.to_lowercase())
            .ok_or_else(|| EngineError::UnknownPreset {
                name: s.to_string(),
                available: BuiltinPreset::ALL.map(|p| p.name()).join(", "),
            })
    }
}

impl fmt::Display for BuiltinPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named partial mapping of module id to fraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub name: String,
    pub description: Option<String>,
    pub weights: IndexMap<String, f64>,
}

impl Preset {
    pub fn new<I, S>(name: impl Into<String>, weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            weights: weights.into_iter().map(|(id, w)| (id.into(), w)).collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Authored fraction for a module, if the preset mentions it
    pub fn fraction(&self, module_id: &str) -> Option<f64> {
        self.weights.get(module_id).copied()
    }

    /// Fractions scaled to sum to 1.0 over every module the preset mentions
    pub fn normalized(&self) -> IndexMap<String, f64> {
        let total: f64 = self.weights.values().sum();
        self.weights
            .iter()
            .map(|(id, w)| {
                let share = if total > 0.0 { w / total } else { 0.0 };
                (id.clone(), share)
            })
            .collect()
    }
}

/// Presets available to a session, fixed after startup
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Catalog with no presets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in preset
    pub fn builtin() -> Self {
        Self {
            presets: BuiltinPreset::ALL.iter().map(BuiltinPreset::preset).collect(),
        }
    }

    /// Add a preset, replacing any existing preset with the same name
    pub fn insert(&mut self, preset: Preset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    pub fn get(&self, name: &str) -> EngineResult<&Preset> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| EngineError::UnknownPreset {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::builtin_module;

    #[test]
    fn test_builtin_catalog_has_all_presets() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.len(), BuiltinPreset::ALL.len());
        assert!(catalog.get("security-first").is_ok());
    }

    #[test]
    fn test_builtin_presets_reference_builtin_modules() {
        for preset in BuiltinPreset::ALL {
            for (id, fraction) in preset.fractions() {
                assert!(builtin_module(id).is_some(), "{} references {}", preset, id);
                assert!(*fraction > 0.0);
            }
        }
    }

    #[test]
    fn test_unknown_preset_lists_names() {
        let catalog = PresetCatalog::builtin();
        match catalog.get("yolo") {
            Err(EngineError::UnknownPreset { name, available }) => {
                assert_eq!(name, "yolo");
                assert!(available.contains("balanced"));
            }
            other => panic!("expected UnknownPreset, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_from_str() {
        assert_eq!(
            "Security-First".parse::<BuiltinPreset>(),
            Ok(BuiltinPreset::SecurityFirst)
        );
        assert!("nope".parse::<BuiltinPreset>().is_err());
    }

    #[test]
    fn test_normalized_fractions() {
        let preset = Preset::new("ship-it", vec![("performance", 3.0), ("security", 1.0)]);
        let normalized = preset.normalized();
        assert!((normalized["performance"] - 0.75).abs() < 1e-12);
        assert!((normalized["security"] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_insert_replaces_by_name() {
        let mut catalog = PresetCatalog::builtin();
        catalog.insert(Preset::new("balanced", vec![("security", 1.0)]));
        assert_eq!(catalog.len(), BuiltinPreset::ALL.len());
        assert_eq!(catalog.get("balanced").expect("preset").weights.len(), 1);

        catalog.insert(Preset::new("custom", vec![("docs", 1.0)]));
        assert_eq!(catalog.len(), BuiltinPreset::ALL.len() + 1);
    }
}
