//! rubricrank - weighted rubric ranking for competing code solutions
//!
//! Analyzer modules score every solution along one rubric dimension
//! (0-100). This crate aggregates those scores under a user-editable,
//! always-normalized weight vector and ranks the solutions, recomputing the
//! ranking on every weight change without re-running any analysis.
//!
//! ```rust,ignore
//! use rubricrank::{analyzers::builtin_modules, session::Session};
//!
//! let mut session = Session::default();
//! for module in builtin_modules() {
//!     session.register(module)?;
//! }
//! session.load_scores(table);
//! session.apply_preset("security-first")?;
//! session.set_weight("performance", 0.3)?;
//! let ranking = session.ranking()?;
//! ```

pub mod analyzers;
pub mod config;
pub mod error;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod session;

pub use error::{EngineError, EngineResult};
pub use session::Session;
