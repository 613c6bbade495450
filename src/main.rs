//! rubricrank - rank competing code solutions against a weighted rubric
//!
//! Loads a scored analysis run, applies presets and weight edits, and
//! renders the resulting comparison.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level; logs go to stderr so stdout stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
