//! Immutable per-run score snapshot
//!
//! A `ScoreTable` is built once per analysis run and then only read. The
//! aggregation engine re-reads the same table on every weight change, so
//! it is typically shared behind an `Arc`.

use crate::analyzers::Analyzer;
use crate::error::{EngineError, EngineResult};
use crate::models::{ScoreEntry, Solution};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    /// Solution ids in input order (the ranking tie-break order)
    solutions: Vec<String>,
    /// Module ids in first-seen order
    modules: Vec<String>,
    /// module id -> solution id -> entry
    entries: HashMap<String, HashMap<String, ScoreEntry>>,
}

impl ScoreTable {
    pub fn builder() -> ScoreTableBuilder {
        ScoreTableBuilder::default()
    }

    /// Build a table from loose entries; solution order is first appearance
    pub fn from_entries(entries: impl IntoIterator<Item = ScoreEntry>) -> EngineResult<Self> {
        let mut builder = Self::builder();
        for entry in entries {
            builder.insert(entry)?;
        }
        Ok(builder.build())
    }

    /// Run every analyzer once over `solutions` and freeze the results
    pub fn collect(analyzers: &[&dyn Analyzer], solutions: &[Solution]) -> EngineResult<Self> {
        let mut builder =
            Self::builder().with_solutions(solutions.iter().map(|s| s.id.clone()));

        for analyzer in analyzers {
            let entries = analyzer
                .score_all(solutions)
                .map_err(|e| EngineError::AnalyzerFailed {
                    id: analyzer.id().to_string(),
                    message: format!("{:#}", e),
                })?;

            debug!("{} produced {} scores", analyzer.id(), entries.len());

            for entry in entries {
                if entry.module_id != analyzer.id() {
                    return Err(EngineError::AnalyzerFailed {
                        id: analyzer.id().to_string(),
                        message: format!("returned a score for module '{}'", entry.module_id),
                    });
                }
                builder.insert(entry)?;
            }
        }

        let table = builder.build();
        info!(
            "Collected {} scores from {} analyzers over {} solutions",
            table.len(),
            analyzers.len(),
            table.solutions.len()
        );
        Ok(table)
    }

    /// Score for one (module, solution) pair
    pub fn get(&self, module_id: &str, solution_id: &str) -> EngineResult<&ScoreEntry> {
        self.entries
            .get(module_id)
            .and_then(|by_solution| by_solution.get(solution_id))
            .ok_or_else(|| EngineError::MissingScore {
                module_id: module_id.to_string(),
                solution_id: solution_id.to_string(),
            })
    }

    /// Solution ids in input order
    pub fn solutions(&self) -> &[String] {
        &self.solutions
    }

    /// Module ids that have at least one score, in first-seen order
    pub fn module_ids(&self) -> &[String] {
        &self.modules
    }

    pub fn has_module(&self, module_id: &str) -> bool {
        self.entries.contains_key(module_id)
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that `module_id` scores every solution in the table
    ///
    /// Returns the first solution (in input order) lacking a score.
    pub fn check_complete(&self, module_id: &str) -> EngineResult<()> {
        let by_solution = self.entries.get(module_id);
        for solution_id in &self.solutions {
            if !by_solution.is_some_and(|m| m.contains_key(solution_id)) {
                return Err(EngineError::IncompleteScoreTable {
                    module_id: module_id.to_string(),
                    solution_id: solution_id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Accumulates entries before the table is frozen
#[derive(Debug, Default)]
pub struct ScoreTableBuilder {
    table: ScoreTable,
}

impl ScoreTableBuilder {
    /// Declare solution order up front
    pub fn with_solutions(mut self, solutions: impl IntoIterator<Item = String>) -> Self {
        for solution in solutions {
            self.push_solution(&solution);
        }
        self
    }

    /// Add one entry
    ///
    /// Rejects duplicates and values outside 0-100 (including NaN).
    pub fn insert(&mut self, entry: ScoreEntry) -> EngineResult<()> {
        if !(0.0..=100.0).contains(&entry.value) {
            return Err(EngineError::ScoreOutOfRange {
                module_id: entry.module_id,
                solution_id: entry.solution_id,
                value: entry.value,
            });
        }

        if self.table.get(&entry.module_id, &entry.solution_id).is_ok() {
            return Err(EngineError::DuplicateScore {
                module_id: entry.module_id,
                solution_id: entry.solution_id,
            });
        }

        self.push_solution(&entry.solution_id);
        if !self.table.entries.contains_key(&entry.module_id) {
            self.table.modules.push(entry.module_id.clone());
        }
        self.table
            .entries
            .entry(entry.module_id.clone())
            .or_default()
            .insert(entry.solution_id.clone(), entry);
        Ok(())
    }

    pub fn build(self) -> ScoreTable {
        self.table
    }

    fn push_solution(&mut self, solution_id: &str) {
        if !self.table.solutions.iter().any(|s| s == solution_id) {
            self.table.solutions.push(solution_id.to_string());
        }
    }
}
