//! Rank command - score a loaded analysis run under the requested weights

use super::score_file::ScoreFile;
use anyhow::{Context, Result};
use console::style;
use rubricrank::config::{normalize_module_id, ProjectConfig};
use rubricrank::reporters::{self, OutputFormat};
use rubricrank::Session;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Default)]
pub struct RankArgs {
    pub scores: PathBuf,
    pub preset: Option<String>,
    pub weights: Vec<(String, f64)>,
    pub disable: Vec<String>,
    pub enable: Vec<String>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
}

/// Map a user-typed id onto a registered one (`code-quality` -> `code_quality`)
fn resolve_id(session: &Session, id: &str) -> String {
    if session.registry().contains(id) {
        return id.to_string();
    }
    let normalized = normalize_module_id(id);
    if session.registry().contains(&normalized) {
        normalized
    } else {
        id.to_string()
    }
}

/// Build a session from a score file and replay the requested edits
///
/// Edits run in a fixed order: disables, enables, preset, then weight
/// edits in the order given.
pub fn build_session(config: &ProjectConfig, args: &RankArgs) -> Result<Session> {
    let file = ScoreFile::load(&args.scores)?;

    let mut session = Session::new(config.preset_catalog());
    for module in file.modules() {
        session.register(config.apply_to_module(module))?;
    }
    session.load_scores(file.to_table()?);
    debug!(
        "Registered {} modules from {}",
        session.registry().len(),
        args.scores.display()
    );

    for id in &args.disable {
        let id = resolve_id(&session, id);
        session
            .set_enabled(&id, false)
            .with_context(|| format!("disabling {}", id))?;
    }
    for id in &args.enable {
        let id = resolve_id(&session, id);
        session
            .set_enabled(&id, true)
            .with_context(|| format!("enabling {}", id))?;
    }

    if let Some(preset) = args.preset.as_ref().or(config.defaults.preset.as_ref()) {
        session.apply_preset(preset)?;
    }

    for (id, value) in &args.weights {
        let id = resolve_id(&session, id);
        session
            .set_weight(&id, *value)
            .with_context(|| format!("setting weight for {}", id))?;
    }

    Ok(session)
}

pub fn run(config: &ProjectConfig, args: RankArgs) -> Result<()> {
    let session = build_session(config, &args)?;
    let report = session.report()?;

    let format = args
        .format
        .as_deref()
        .or(config.defaults.format.as_deref())
        .unwrap_or("text");
    let format: OutputFormat = format.parse()?;
    let output = reporters::report_with_format(&report, format)?;

    match &args.output {
        Some(path) => {
            let mut path = path.clone();
            if path.extension().is_none() {
                path.set_extension(reporters::file_extension(format));
            }
            std::fs::write(&path, &output)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "\nReport written to: {}",
                style(path.display()).cyan()
            );
        }
        None => println!("{}", output),
    }

    Ok(())
}
