//! Weighted aggregation and ranking
//!
//! Rankings are recomputed from scratch on every call. Nothing is cached
//! between weight changes; a full pass is O(modules x solutions).

use crate::error::{EngineError, EngineResult};
use crate::models::RankedResult;
use crate::scoring::score_table::ScoreTable;
use crate::scoring::weights::WeightVector;
use indexmap::IndexMap;
use tracing::debug;

/// Overall scores closer than this are ties
pub const TIE_EPSILON: f64 = 1e-9;

/// Rank every solution in `table` under `weights`
///
/// Every module with a positive weight must score every solution; there is
/// no partial aggregation. Modules at weight 0 contribute nothing and need
/// no scores. Ties keep the table's solution order.
pub fn compute_ranking(table: &ScoreTable, weights: &WeightVector) -> EngineResult<Vec<RankedResult>> {
    if weights.is_empty() {
        return Err(EngineError::NoEnabledModules(
            "nothing to aggregate".to_string(),
        ));
    }

    let contributing: Vec<(&str, f64)> = weights.iter().filter(|(_, w)| *w > 0.0).collect();
    for (module_id, _) in &contributing {
        table.check_complete(module_id)?;
    }

    let mut ranked: Vec<RankedResult> = Vec::with_capacity(table.solutions().len());
    for solution_id in table.solutions() {
        let mut contributions = IndexMap::with_capacity(contributing.len());
        let mut overall = 0.0;
        for (module_id, weight) in &contributing {
            let contribution = weight * table.get(module_id, solution_id)?.value;
            overall += contribution;
            contributions.insert(module_id.to_string(), contribution);
        }

        // Insert after every result that is not strictly lower: stable on ties
        let position = ranked
            .iter()
            .position(|r| r.overall_score < overall - TIE_EPSILON)
            .unwrap_or(ranked.len());
        ranked.insert(
            position,
            RankedResult {
                rank: 0,
                solution_id: solution_id.clone(),
                overall_score: overall,
                contributions,
            },
        );
    }

    for (i, result) in ranked.iter_mut().enumerate() {
        result.rank = i + 1;
    }

    if let Some(top) = ranked.first() {
        debug!(
            "Ranked {} solutions over {} modules, leader {} ({:.1})",
            ranked.len(),
            contributing.len(),
            top.solution_id,
            top.overall_score
        );
    }
    Ok(ranked)
}
