//! Interactive grading session
//!
//! A `Session` owns everything one user edits: the module registry, the
//! preset catalog, the weight vector and a shared handle to the frozen score
//! table. Every user event is one method call, processed to completion
//! before the next; rankings are recomputed on demand and never cached.
//!
//! Sessions are not shared. Two users need two sessions; they may share the
//! same `Arc<ScoreTable>`.

use crate::analyzers::{Analyzer, ModuleRegistry};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AnalyzerModule, CategoryWinner, ModuleScore, RankedResult, RankingReport, SolutionReport,
    WeightEntry,
};
use crate::scoring::{compute_ranking, PresetCatalog, ScoreTable, WeightManager, WeightVector};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Session {
    registry: ModuleRegistry,
    presets: PresetCatalog,
    weights: WeightManager,
    scores: Arc<ScoreTable>,
    active_preset: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PresetCatalog::builtin())
    }
}

impl Session {
    pub fn new(presets: PresetCatalog) -> Self {
        Self {
            registry: ModuleRegistry::new(),
            presets,
            weights: WeightManager::default(),
            scores: Arc::new(ScoreTable::default()),
            active_preset: None,
        }
    }

    /// Register a module
    ///
    /// Registration happens at bootstrap: the weight vector is rebuilt from
    /// the normalized default weights of every enabled module.
    pub fn register(&mut self, module: AnalyzerModule) -> EngineResult<()> {
        self.registry.register(module)?;
        self.weights.reset_to_defaults(&self.registry);
        self.active_preset = None;
        Ok(())
    }

    pub fn register_analyzer(&mut self, analyzer: &dyn Analyzer) -> EngineResult<()> {
        self.register(analyzer.module())
    }

    /// Enable or disable a module
    ///
    /// Disabling drives the module's weight to 0 (redistributing it) and
    /// removes it from the vector. Enabling re-admits it at weight 0.
    pub fn set_enabled(&mut self, module_id: &str, enabled: bool) -> EngineResult<()> {
        let currently = self
            .registry
            .get(module_id)
            .map(|m| m.enabled)
            .ok_or_else(|| EngineError::UnknownModule(module_id.to_string()))?;
        if currently == enabled {
            return Ok(());
        }

        if enabled {
            self.registry.set_enabled(module_id, true)?;
            self.weights.admit(module_id, &self.registry);
        } else {
            self.weights.remove(module_id)?;
            self.registry.set_enabled(module_id, false)?;
        }
        self.active_preset = None;
        info!(
            "{} module {}",
            if enabled { "Enabled" } else { "Disabled" },
            module_id
        );
        Ok(())
    }

    /// Edit one weight, redistributing the rest
    pub fn set_weight(&mut self, module_id: &str, value: f64) -> EngineResult<()> {
        self.weights.set_weight(module_id, value)?;
        self.active_preset = None;
        Ok(())
    }

    /// Replace the weight vector with a named preset
    pub fn apply_preset(&mut self, name: &str) -> EngineResult<()> {
        self.weights.apply_preset(&self.presets, name)?;
        self.active_preset = Some(name.to_string());
        Ok(())
    }

    /// Swap in the score table of a new analysis run
    pub fn load_scores(&mut self, scores: impl Into<Arc<ScoreTable>>) {
        self.scores = scores.into();
        debug!(
            "Loaded score table: {} solutions, {} modules",
            self.scores.solutions().len(),
            self.scores.module_ids().len()
        );
    }

    pub fn scores(&self) -> &Arc<ScoreTable> {
        &self.scores
    }

    pub fn weights(&self) -> &WeightVector {
        self.weights.vector()
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    /// Name of the preset in effect, cleared by any manual edit
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Rank the loaded solutions under the current weights
    pub fn ranking(&self) -> EngineResult<Vec<RankedResult>> {
        compute_ranking(&self.scores, self.weights.vector())
    }

    /// Build the snapshot rendered by reporters
    pub fn report(&self) -> EngineResult<RankingReport> {
        let ranking = self.ranking()?;
        let weights = self.weights.vector();

        let weight_entries = weights
            .iter()
            .map(|(id, weight)| WeightEntry {
                module_id: id.to_string(),
                display_name: self.registry.display_name(id).to_string(),
                weight,
            })
            .collect();

        let solutions = ranking
            .into_iter()
            .map(|result| self.solution_report(result))
            .collect();

        Ok(RankingReport {
            generated_at: Utc::now(),
            preset: self.active_preset.clone(),
            weights: weight_entries,
            solutions,
            category_winners: self.category_winners(),
        })
    }

    fn solution_report(&self, result: RankedResult) -> SolutionReport {
        let modules = self
            .weights
            .vector()
            .iter()
            .filter_map(|(id, weight)| {
                let entry = self.scores.get(id, &result.solution_id).ok()?;
                Some(ModuleScore {
                    module_id: id.to_string(),
                    display_name: self.registry.display_name(id).to_string(),
                    value: entry.value,
                    weight,
                    contribution: weight * entry.value,
                    notes: entry.notes.clone(),
                })
            })
            .collect();

        SolutionReport {
            rank: result.rank,
            solution_id: result.solution_id,
            overall_score: result.overall_score,
            modules,
        }
    }

    /// Best raw score per enabled module; ties go to the earlier solution
    fn category_winners(&self) -> Vec<CategoryWinner> {
        let mut winners = Vec::new();
        for module_id in self.weights.vector().module_ids() {
            let mut best: Option<(&str, f64)> = None;
            for solution_id in self.scores.solutions() {
                if let Ok(entry) = self.scores.get(module_id, solution_id) {
                    if best.map_or(true, |(_, value)| entry.value > value) {
                        best = Some((solution_id.as_str(), entry.value));
                    }
                }
            }
            if let Some((solution_id, value)) = best {
                winners.push(CategoryWinner {
                    module_id: module_id.to_string(),
                    display_name: self.registry.display_name(module_id).to_string(),
                    solution_id: solution_id.to_string(),
                    value,
                });
            }
        }
        winners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreEntry;

    fn two_module_session() -> Session {
        let mut session = Session::default();
        session
            .register(AnalyzerModule::new("perf", "Performance", 0.6))
            .expect("register perf");
        session
            .register(AnalyzerModule::new("doc", "Documentation", 0.4))
            .expect("register doc");
        session.load_scores(
            ScoreTable::from_entries(vec![
                ScoreEntry::new("perf", "s1", 80.0).with_note("streams input"),
                ScoreEntry::new("perf", "s2", 60.0),
                ScoreEntry::new("doc", "s1", 50.0),
                ScoreEntry::new("doc", "s2", 90.0),
            ])
            .expect("build table"),
        );
        session
    }

    #[test]
    fn test_register_normalizes_defaults() {
        let mut session = Session::default();
        session
            .register(AnalyzerModule::new("a", "A", 0.25))
            .expect("register");
        assert!((session.weights().get("a").expect("a") - 1.0).abs() < 1e-9);
        session
            .register(AnalyzerModule::new("b", "B", 0.75))
            .expect("register");
        assert!((session.weights().get("a").expect("a") - 0.25).abs() < 1e-9);
        assert!((session.weights().get("b").expect("b") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_ranking_recomputed_after_edit() {
        let mut session = two_module_session();
        let ranking = session.ranking().expect("rank");
        assert_eq!(ranking[0].solution_id, "s2");

        session.set_weight("perf", 0.9).expect("set weight");
        let ranking = session.ranking().expect("rank");
        // s1 = 0.9*80 + 0.1*50 = 77, s2 = 0.9*60 + 0.1*90 = 63
        assert_eq!(ranking[0].solution_id, "s1");
        assert!((ranking[0].overall_score - 77.0).abs() < 1e-9);
    }

    #[test]
    fn test_disable_and_reenable() {
        let mut session = two_module_session();
        session.set_enabled("doc", false).expect("disable");
        assert!(!session.weights().contains("doc"));
        assert!((session.weights().get("perf").expect("perf") - 1.0).abs() < 1e-9);
        assert_eq!(session.ranking().expect("rank")[0].solution_id, "s1");

        session.set_enabled("doc", true).expect("enable");
        assert_eq!(session.weights().get("doc"), Some(0.0));
        // Re-enabled at zero weight: ranking unchanged until redistributed
        assert_eq!(session.ranking().expect("rank")[0].solution_id, "s1");
    }

    #[test]
    fn test_disable_last_module_fails() {
        let mut session = two_module_session();
        session.set_enabled("doc", false).expect("disable doc");
        assert!(matches!(
            session.set_enabled("perf", false),
            Err(EngineError::NoEnabledModules(_))
        ));
        assert!(session.registry().is_enabled("perf"));
    }

    #[test]
    fn test_set_enabled_unknown() {
        let mut session = two_module_session();
        assert_eq!(
            session.set_enabled("ghost", false),
            Err(EngineError::UnknownModule("ghost".to_string()))
        );
    }

    #[test]
    fn test_set_weight_on_disabled_module_fails() {
        let mut session = two_module_session();
        session.set_enabled("doc", false).expect("disable");
        assert_eq!(
            session.set_weight("doc", 0.5),
            Err(EngineError::UnknownModule("doc".to_string()))
        );
    }

    #[test]
    fn test_active_preset_cleared_by_edit() {
        let mut session = Session::default();
        for module in crate::analyzers::builtin_modules() {
            session.register(module).expect("register");
        }
        session.apply_preset("maintainability").expect("preset");
        assert_eq!(session.active_preset(), Some("maintainability"));
        assert_eq!(session.weights().get("performance"), Some(0.0));

        session.set_weight("security", 0.2).expect("set weight");
        assert_eq!(session.active_preset(), None);
    }

    #[test]
    fn test_unknown_preset_keeps_weights() {
        let mut session = two_module_session();
        let before = session.weights().clone();
        assert!(matches!(
            session.apply_preset("nope"),
            Err(EngineError::UnknownPreset { .. })
        ));
        assert_eq!(session.weights(), &before);
    }

    #[test]
    fn test_report_contents() {
        let session = two_module_session();
        let report = session.report().expect("report");
        assert_eq!(report.weights.len(), 2);
        assert_eq!(report.weights[0].display_name, "Performance");

        let winner = report.winner().expect("winner");
        assert_eq!(winner.solution_id, "s2");
        assert_eq!(winner.rank, 1);
        assert_eq!(winner.modules.len(), 2);

        let s1 = &report.solutions[1];
        assert_eq!(s1.modules[0].notes, vec!["streams input"]);
        assert!((s1.modules[0].contribution - 48.0).abs() < 1e-9);

        let perf_winner = &report.category_winners[0];
        assert_eq!(perf_winner.module_id, "perf");
        assert_eq!(perf_winner.solution_id, "s1");
        assert_eq!(report.category_winners[1].solution_id, "s2");
    }
}
