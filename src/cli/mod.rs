//! CLI command definitions and handlers

mod list;
mod rank;
mod score_file;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rubricrank::config::{load_config_file, load_project_config, ProjectConfig};
use std::path::PathBuf;

/// Parse an `ID=VALUE` weight edit
fn parse_weight(s: &str) -> Result<(String, f64), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' is not ID=VALUE", s))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("'{}' has an empty module id", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid weight", value))?;
    if !value.is_finite() {
        return Err(format!("weight for '{}' must be finite", id));
    }
    Ok((id.to_string(), value))
}

/// rubricrank - rank competing code solutions against a weighted rubric
#[derive(Parser, Debug)]
#[command(name = "rubricrank")]
#[command(
    version,
    about = "Rank competing code solutions against a weighted rubric",
    long_about = "rubricrank aggregates per-dimension analyzer scores (0-100) into a single \
ranked comparison. Weights always sum to 1: editing one weight redistributes the others \
in proportion to their current values, and presets replace the whole vector at once.",
    after_help = "\
Examples:
  rubricrank rank scores.json                              Rank with default weights
  rubricrank rank scores.json --preset security-first      Apply a preset
  rubricrank rank scores.json --weight performance=0.4     Edit one weight
  rubricrank rank scores.json --disable documentation      Drop a dimension
  rubricrank rank scores.json -f markdown -o report.md     Markdown report
  rubricrank presets                                       List presets"
)]
pub struct Cli {
    /// Config file (default: rubricrank.toml or .rubricrankrc.json in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the solutions in a score file
    Rank {
        /// Score file (JSON) produced by an analysis run
        scores: PathBuf,

        /// Preset applied before any --weight edits
        #[arg(long)]
        preset: Option<String>,

        /// Set one weight, redistributing the others (repeatable, applied in order)
        #[arg(long = "weight", value_name = "ID=VALUE", value_parser = parse_weight)]
        weights: Vec<(String, f64)>,

        /// Disable a module (repeatable)
        #[arg(long, value_name = "ID")]
        disable: Vec<String>,

        /// Enable a module disabled by config (repeatable)
        #[arg(long, value_name = "ID")]
        enable: Vec<String>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List available presets with their normalized fractions
    Presets,

    /// List the built-in rubric modules
    Modules,
}

fn load_config(cli: &Cli) -> Result<ProjectConfig> {
    match &cli.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("reading current directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Rank {
            scores,
            preset,
            weights,
            disable,
            enable,
            format,
            output,
        } => rank::run(
            &config,
            rank::RankArgs {
                scores,
                preset,
                weights,
                disable,
                enable,
                format,
                output,
            },
        ),
        Commands::Presets => list::presets(&config),
        Commands::Modules => list::modules(&config),
    }
}
