//! Score file loading
//!
//! A score file is the JSON output of one analysis run:
//!
//! ```json
//! {
//!   "modules": [{"id": "security", "display_name": "Security", "default_weight": 0.15}],
//!   "solutions": ["llm1", "llm2"],
//!   "scores": [
//!     {"module_id": "security", "solution_id": "llm1", "value": 82.5, "notes": ["no eval()"]}
//!   ]
//! }
//! ```
//!
//! `modules` and `solutions` are optional. Modules seen only in `scores`
//! get built-in metadata when the id is known, otherwise a generic entry.

use anyhow::{Context, Result};
use rubricrank::analyzers::module_or_fallback;
use rubricrank::models::{AnalyzerModule, ScoreEntry};
use rubricrank::scoring::ScoreTable;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreFile {
    #[serde(default)]
    pub modules: Vec<AnalyzerModule>,
    #[serde(default)]
    pub solutions: Vec<String>,
    pub scores: Vec<ScoreEntry>,
}

impl ScoreFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading score file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing score file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Declared modules first, then any module only referenced by a score
    pub fn modules(&self) -> Vec<AnalyzerModule> {
        let mut modules = self.modules.clone();
        for entry in &self.scores {
            if !modules.iter().any(|m| m.id == entry.module_id) {
                modules.push(module_or_fallback(&entry.module_id));
            }
        }
        modules
    }

    /// Freeze the scores into a table, keeping declared solution order
    pub fn to_table(&self) -> Result<ScoreTable> {
        let mut builder = ScoreTable::builder().with_solutions(self.solutions.iter().cloned());
        for entry in &self.scores {
            builder.insert(entry.clone())?;
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "modules": [{"id": "custom_lint", "display_name": "Lint", "default_weight": 0.5}],
        "solutions": ["b", "a"],
        "scores": [
            {"module_id": "security", "solution_id": "a", "value": 70},
            {"module_id": "custom_lint", "solution_id": "a", "value": 40, "notes": ["tabs"]},
            {"module_id": "security", "solution_id": "b", "value": 90},
            {"module_id": "custom_lint", "solution_id": "b", "value": 60}
        ]
    }"#;

    #[test]
    fn test_modules_declared_then_discovered() {
        let file = ScoreFile::parse(SAMPLE).expect("parse");
        let modules = file.modules();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].id, "custom_lint");
        assert_eq!(modules[0].display_name, "Lint");
        assert!(modules[0].enabled);
        assert_eq!(modules[1].id, "security");
        assert!((modules[1].default_weight - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_table_keeps_declared_solution_order() {
        let table = ScoreFile::parse(SAMPLE).expect("parse").to_table().expect("table");
        assert_eq!(table.solutions(), ["b", "a"]);
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.get("custom_lint", "a").expect("entry").notes,
            vec!["tabs"]
        );
    }

    #[test]
    fn test_minimal_file() {
        let file = ScoreFile::parse(
            r#"{"scores": [{"module_id": "mystery", "solution_id": "x", "value": 10}]}"#,
        )
        .expect("parse");
        let modules = file.modules();
        assert_eq!(modules[0].display_name, "mystery");
        assert!((modules[0].default_weight - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_scores() {
        let out_of_range = ScoreFile::parse(
            r#"{"scores": [{"module_id": "m", "solution_id": "x", "value": 120}]}"#,
        )
        .expect("parse");
        assert!(out_of_range.to_table().is_err());

        let duplicate = ScoreFile::parse(
            r#"{"scores": [
                {"module_id": "m", "solution_id": "x", "value": 1},
                {"module_id": "m", "solution_id": "x", "value": 2}
            ]}"#,
        )
        .expect("parse");
        assert!(duplicate.to_table().is_err());

        assert!(ScoreFile::parse(r#"{"modules": []}"#).is_err());
    }
}
