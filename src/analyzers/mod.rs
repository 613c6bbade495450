//! Analyzer modules and their registry
//!
//! An analyzer scores every competing solution along one rubric dimension.
//! This module defines:
//! - `Analyzer` trait that every scoring dimension implements
//! - `ModuleRegistry` holding the registered dimensions in order
//! - the built-in dimension catalog (`builtin_modules`)
//!
//! Heuristic detectors themselves live outside this crate; they plug in by
//! implementing `Analyzer` and being registered explicitly.

mod builtin;
mod registry;

pub use builtin::{builtin_module, builtin_modules, module_or_fallback, UNKNOWN_MODULE_WEIGHT};
pub use registry::ModuleRegistry;

use crate::models::{AnalyzerModule, ScoreEntry, Solution};
use anyhow::Result;

/// Trait for all rubric dimensions
///
/// # Example Implementation
///
/// ```ignore
/// pub struct LineCountAnalyzer;
///
/// impl Analyzer for LineCountAnalyzer {
///     fn id(&self) -> &str { "line_count" }
///     fn display_name(&self) -> &str { "Line Count" }
///     fn default_weight(&self) -> f64 { 0.1 }
///
///     fn score_all(&self, solutions: &[Solution]) -> Result<Vec<ScoreEntry>> {
///         Ok(solutions
///             .iter()
///             .map(|s| ScoreEntry::new(self.id(), &s.id, 50.0))
///             .collect())
///     }
/// }
/// ```
pub trait Analyzer {
    /// Unique identifier, used as the key in weight vectors and score tables
    fn id(&self) -> &str;

    /// Name shown in reports
    fn display_name(&self) -> &str;

    /// Starting weight before normalization
    fn default_weight(&self) -> f64;

    /// Score every solution
    ///
    /// Must return exactly one entry per solution, each with a value in
    /// 0-100 and `module_id == self.id()`.
    fn score_all(&self, solutions: &[Solution]) -> Result<Vec<ScoreEntry>>;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Category of the dimension
    ///
    /// Used for grouping in reports.
    fn category(&self) -> &str {
        "general"
    }

    /// Registry metadata for this analyzer
    fn module(&self) -> AnalyzerModule {
        let mut module = AnalyzerModule::new(self.id(), self.display_name(), self.default_weight())
            .with_category(self.category());
        module.description = self.description().map(str::to_string);
        module
    }
}
