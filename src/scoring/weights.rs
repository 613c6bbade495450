//! Weight vector and its redistribution rules
//!
//! The vector holds one weight per enabled module and always sums to 1.0
//! (within `SUM_TOLERANCE`) between edits. Two operations mutate it:
//!
//! - `set_weight`: one module is moved to a target value and every other
//!   module absorbs the difference in proportion to its current weight.
//! - `apply_preset`: the whole vector is replaced by a normalized preset.
//!
//! ```text
//! {A: 0.5, B: 0.3, C: 0.2}  set_weight(A, 0.8)
//!   delta = +0.3, others_sum = 0.5
//!   B = 0.3 - 0.3 * 0.3/0.5 = 0.12
//!   C = 0.2 - 0.3 * 0.2/0.5 = 0.08
//! ```

use crate::analyzers::ModuleRegistry;
use crate::error::{EngineError, EngineResult};
use crate::scoring::presets::PresetCatalog;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Allowed drift of the weight sum from 1.0
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Weights at or below this are treated as exactly zero after redistribution
const ZERO_SNAP: f64 = 1e-12;

/// Normalized importance per enabled module, in registration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightVector {
    weights: IndexMap<String, f64>,
}

impl WeightVector {
    pub fn get(&self, module_id: &str) -> Option<f64> {
        self.weights.get(module_id).copied()
    }

    pub fn contains(&self, module_id: &str) -> bool {
        self.weights.contains_key(module_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(id, w)| (id.as_str(), *w))
    }

    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum within tolerance of 1.0 and no negative weight
    pub fn is_normalized(&self) -> bool {
        self.weights.values().all(|w| *w >= 0.0) && (self.sum() - 1.0).abs() <= SUM_TOLERANCE
    }

    /// Divide every weight by the sum if it drifted outside tolerance
    ///
    /// Returns true when a correction was applied.
    fn renormalize(&mut self) -> bool {
        let sum = self.sum();
        if sum <= 0.0 || (sum - 1.0).abs() <= SUM_TOLERANCE {
            return false;
        }
        for w in self.weights.values_mut() {
            *w /= sum;
        }
        debug!("Corrected weight drift (sum was {:.9})", sum);
        true
    }
}

/// Owns the weight vector of a session
#[derive(Debug, Clone, Default)]
pub struct WeightManager {
    current: WeightVector,
}

impl WeightManager {
    /// Start from the registry's normalized default weights
    pub fn from_registry(registry: &ModuleRegistry) -> Self {
        let mut manager = Self::default();
        manager.reset_to_defaults(registry);
        manager
    }

    /// Build from explicit weights, normalizing them
    ///
    /// Negative inputs count as zero. If nothing is positive every module
    /// gets an equal share.
    pub fn from_weights<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let weights: IndexMap<String, f64> = weights
            .into_iter()
            .map(|(id, w)| (id.into(), w.max(0.0)))
            .collect();
        Self {
            current: normalized(weights),
        }
    }

    pub fn vector(&self) -> &WeightVector {
        &self.current
    }

    pub fn get(&self, module_id: &str) -> Option<f64> {
        self.current.get(module_id)
    }

    /// Replace the vector with the normalized default weights of enabled modules
    pub fn reset_to_defaults(&mut self, registry: &ModuleRegistry) {
        let defaults: IndexMap<String, f64> = registry
            .enabled()
            .map(|m| (m.id.clone(), m.default_weight.max(0.0)))
            .collect();
        let raw_sum: f64 = defaults.values().sum();
        if !defaults.is_empty() && (raw_sum - 1.0).abs() > SUM_TOLERANCE {
            debug!("Default weights sum to {:.4}, normalizing", raw_sum);
        }
        self.current = normalized(defaults);
    }

    /// Move one module to `target` and redistribute the difference
    ///
    /// The target is clamped to [0, 1]. Other modules absorb the change in
    /// proportion to their current weights; if they are all zero the change
    /// is split equally. A module that would go negative is held at zero and
    /// its residual is spread over the remaining positive modules.
    pub fn set_weight(&mut self, module_id: &str, target: f64) -> EngineResult<()> {
        let current = self
            .current
            .get(module_id)
            .ok_or_else(|| EngineError::UnknownModule(module_id.to_string()))?;

        if target.is_nan() {
            warn!("Ignoring NaN weight for {}", module_id);
            return Ok(());
        }
        let target = target.clamp(0.0, 1.0);

        // A lone module carries the whole weight
        if self.current.len() == 1 {
            self.current.weights[module_id] = 1.0;
            return Ok(());
        }

        let delta = target - current;
        let others: Vec<String> = self
            .current
            .module_ids()
            .filter(|id| *id != module_id)
            .map(str::to_string)
            .collect();

        let mut next = self.current.weights.clone();
        next[module_id] = target;
        let passes = redistribute(&mut next, &others, -delta);

        self.current.weights = next;
        self.current.renormalize();

        debug!(
            "Weight {}: {:.4} -> {:.4} (delta {:+.4}, {} redistribution passes)",
            module_id, current, target, delta, passes
        );
        Ok(())
    }

    /// Replace the vector with a named preset
    ///
    /// Enabled modules missing from the preset get weight 0. Fails without
    /// touching the vector if the preset is unknown or covers no enabled
    /// module.
    pub fn apply_preset(&mut self, catalog: &PresetCatalog, name: &str) -> EngineResult<()> {
        let preset = catalog.get(name)?;

        let fractions: IndexMap<String, f64> = self
            .current
            .module_ids()
            .map(|id| (id.to_string(), preset.fraction(id).unwrap_or(0.0)))
            .collect();
        let total: f64 = fractions.values().sum();
        if total <= 0.0 {
            return Err(EngineError::NoEnabledModules(format!(
                "preset '{}' assigns no weight to any enabled module",
                preset.name
            )));
        }

        self.current.weights = fractions.into_iter().map(|(id, f)| (id, f / total)).collect();
        self.current.renormalize();

        info!("Applied preset '{}'", preset.name);
        Ok(())
    }

    /// Drive a module to zero and drop it from the vector
    pub fn remove(&mut self, module_id: &str) -> EngineResult<()> {
        if !self.current.contains(module_id) {
            return Err(EngineError::UnknownModule(module_id.to_string()));
        }
        if self.current.len() == 1 {
            return Err(EngineError::NoEnabledModules(format!(
                "cannot disable '{}', it is the only enabled module",
                module_id
            )));
        }
        self.set_weight(module_id, 0.0)?;
        self.current.weights.shift_remove(module_id);
        self.current.renormalize();
        Ok(())
    }

    /// Insert a re-enabled module at weight 0, keeping registration order
    ///
    /// A module admitted into an empty vector takes the full weight.
    pub fn admit(&mut self, module_id: &str, registry: &ModuleRegistry) {
        if self.current.contains(module_id) {
            return;
        }
        let weight = if self.current.is_empty() { 1.0 } else { 0.0 };
        self.current.weights.insert(module_id.to_string(), weight);

        let position = |id: &str| {
            registry
                .list()
                .iter()
                .position(|m| m.id == id)
                .unwrap_or(usize::MAX)
        };
        self.current
            .weights
            .sort_by(|a, _, b, _| position(a.as_str()).cmp(&position(b.as_str())));
    }
}

/// Spread `amount` over `others`, proportionally to their current weights
///
/// Bounded to `others.len() + 1` passes; each pass either finishes or pins
/// at least one module at zero. Returns the number of passes used.
fn redistribute(weights: &mut IndexMap<String, f64>, others: &[String], amount: f64) -> usize {
    let mut remaining = amount;
    let mut pool: Vec<&str> = others.iter().map(String::as_str).collect();
    let max_passes = others.len() + 1;
    let mut passes = 0;

    while passes < max_passes && remaining.abs() > f64::EPSILON && !pool.is_empty() {
        passes += 1;
        let pool_sum: f64 = pool.iter().map(|id| weights[*id]).sum();
        let equal_share = 1.0 / pool.len() as f64;
        let mut residual = 0.0;

        for id in &pool {
            let share = if pool_sum > 0.0 {
                weights[*id] / pool_sum
            } else {
                equal_share
            };
            let candidate = weights[*id] + remaining * share;
            if candidate <= ZERO_SNAP {
                residual += candidate.min(0.0);
                weights[*id] = 0.0;
            } else {
                weights[*id] = candidate;
            }
        }

        remaining = residual;
        pool.retain(|id| weights[*id] > 0.0);
    }

    if remaining.abs() > SUM_TOLERANCE {
        debug!("Redistribution left {:.9} unassigned", remaining);
    }
    passes
}

fn normalized(weights: IndexMap<String, f64>) -> WeightVector {
    let sum: f64 = weights.values().sum();
    let count = weights.len();
    let weights = weights
        .into_iter()
        .map(|(id, w)| {
            let w = if sum > 0.0 { w / sum } else { 1.0 / count as f64 };
            (id, w)
        })
        .collect();
    WeightVector { weights }
}
