//! Core data models for rubricrank
//!
//! These models are shared by the registry, the scoring engine and the
//! reporters. Everything here is plain data; behaviour lives in
//! `analyzers`, `scoring` and `session`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A rubric dimension registered with the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerModule {
    /// Unique identifier (e.g. "security")
    pub id: String,
    /// Human-readable name shown in reports
    pub display_name: String,
    /// Weight the module starts with, before normalization
    pub default_weight: f64,
    /// Disabled modules hold no weight and are not aggregated
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// What the dimension measures
    #[serde(default)]
    pub description: Option<String>,
    /// Grouping label (performance, security, ...)
    #[serde(default)]
    pub category: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl AnalyzerModule {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, default_weight: f64) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            default_weight,
            enabled: true,
            description: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// One module's score for one solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub module_id: String,
    pub solution_id: String,
    /// Normalized score, 0-100
    pub value: f64,
    /// Evidence collected by the analyzer, in the order it was found
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ScoreEntry {
    pub fn new(module_id: impl Into<String>, solution_id: impl Into<String>, value: f64) -> Self {
        Self {
            module_id: module_id.into(),
            solution_id: solution_id.into(),
            value,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// A file belonging to a competing solution
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

/// A competing solution handed to analyzers
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub id: String,
    pub files: Vec<SourceFile>,
}

impl Solution {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.files.push(file);
        self
    }
}

/// A solution's position in the comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// 1-based position
    pub rank: usize,
    pub solution_id: String,
    /// Weighted sum of module scores, 0-100
    pub overall_score: f64,
    /// `weight * score` per module, in weight vector order
    pub contributions: IndexMap<String, f64>,
}

/// Weight of a module as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub module_id: String,
    pub display_name: String,
    pub weight: f64,
}

/// Raw score and contribution of one module for one solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleScore {
    pub module_id: String,
    pub display_name: String,
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Everything reporters need about a single solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub rank: usize,
    pub solution_id: String,
    pub overall_score: f64,
    pub modules: Vec<ModuleScore>,
}

/// Best solution for a single dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWinner {
    pub module_id: String,
    pub display_name: String,
    pub solution_id: String,
    pub value: f64,
}

/// Snapshot of a session rendered by the reporters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub generated_at: DateTime<Utc>,
    /// Last preset applied in the session, if any
    pub preset: Option<String>,
    pub weights: Vec<WeightEntry>,
    pub solutions: Vec<SolutionReport>,
    pub category_winners: Vec<CategoryWinner>,
}

impl RankingReport {
    /// Highest ranked solution
    pub fn winner(&self) -> Option<&SolutionReport> {
        self.solutions.first()
    }
}
