//! Weighted multi-criteria scoring
//!
//! Turns per-dimension scores (0-100) into a single ranked comparison and
//! keeps the weight vector consistent while the user edits it.
//!
//! # Scoring Formula
//!
//! ```text
//! Overall(s) = Σ weight[m] × score[m][s]     over enabled modules m
//!
//! Where:
//!   Σ weight[m] = 1.0 (± 1e-6), every weight >= 0
//!   score[m][s] ∈ [0, 100]
//! ```
//!
//! # Editing weights
//!
//! - `set_weight`: the edited module moves to its target; the others absorb
//!   the difference in proportion to their current weights, so their
//!   relative preferences are preserved.
//! - `apply_preset`: the vector is replaced atomically by a normalized
//!   preset; modules the preset does not mention drop to 0.
//!
//! # Example
//!
//! Two modules `{perf: 0.6, doc: 0.4}` with `perf = {s1: 80, s2: 60}` and
//! `doc = {s1: 50, s2: 90}`:
//!
//! - s1 = 0.6 × 80 + 0.4 × 50 = 68
//! - s2 = 0.6 × 60 + 0.4 × 90 = 72
//!
//! Ranking: s2, s1.

mod presets;
mod ranking;
mod score_table;
mod weights;

pub use presets::{BuiltinPreset, Preset, PresetCatalog};
pub use ranking::{compute_ranking, TIE_EPSILON};
pub use score_table::{ScoreTable, ScoreTableBuilder};
pub use weights::{WeightManager, WeightVector, SUM_TOLERANCE};
