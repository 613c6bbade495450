//! Error taxonomy for the ranking engine
//!
//! Every variant is an integration error: a collaborator broke its contract
//! (registered the same module twice, referenced an unknown preset, produced
//! an incomplete score table). They are surfaced immediately and never
//! replaced by a default value.

use thiserror::Error;

/// Errors raised by the registry, weight manager, score table and aggregation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Module '{0}' is already registered")]
    DuplicateModule(String),

    #[error("Unknown or disabled module '{0}'")]
    UnknownModule(String),

    #[error("Unknown preset '{name}'. Available presets: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("No score for module '{module_id}' on solution '{solution_id}'")]
    MissingScore {
        module_id: String,
        solution_id: String,
    },

    #[error(
        "Incomplete score table: module '{module_id}' has no score for solution '{solution_id}'"
    )]
    IncompleteScoreTable {
        module_id: String,
        solution_id: String,
    },

    #[error("Duplicate score for module '{module_id}' on solution '{solution_id}'")]
    DuplicateScore {
        module_id: String,
        solution_id: String,
    },

    #[error("Score {value} for module '{module_id}' on solution '{solution_id}' is outside 0-100")]
    ScoreOutOfRange {
        module_id: String,
        solution_id: String,
        value: f64,
    },

    #[error("Analyzer '{id}' failed: {message}")]
    AnalyzerFailed { id: String, message: String },

    #[error("No enabled modules left: {0}")]
    NoEnabledModules(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
