//! Output reporters for ranking reports
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

use crate::models::RankingReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render a ranking report in the specified format
pub fn report(report: &RankingReport, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt)
}

/// Render a ranking report using an OutputFormat enum
pub fn report_with_format(report: &RankingReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{CategoryWinner, ModuleScore, SolutionReport, WeightEntry};
    use chrono::Utc;

    fn module_score(id: &str, name: &str, value: f64, weight: f64, notes: &[&str]) -> ModuleScore {
        ModuleScore {
            module_id: id.into(),
            display_name: name.into(),
            value,
            weight,
            contribution: value * weight,
            notes: notes.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Two solutions ranked over two modules
    pub(crate) fn test_report() -> RankingReport {
        RankingReport {
            generated_at: Utc::now(),
            preset: Some("balanced".into()),
            weights: vec![
                WeightEntry {
                    module_id: "perf".into(),
                    display_name: "Performance Analysis".into(),
                    weight: 0.6,
                },
                WeightEntry {
                    module_id: "doc".into(),
                    display_name: "Documentation Analysis".into(),
                    weight: 0.4,
                },
            ],
            solutions: vec![
                SolutionReport {
                    rank: 1,
                    solution_id: "llm2".into(),
                    overall_score: 72.0,
                    modules: vec![
                        module_score("perf", "Performance Analysis", 60.0, 0.6, &[]),
                        module_score("doc", "Documentation Analysis", 90.0, 0.4, &["README present"]),
                    ],
                },
                SolutionReport {
                    rank: 2,
                    solution_id: "llm1".into(),
                    overall_score: 68.0,
                    modules: vec![
                        module_score("perf", "Performance Analysis", 80.0, 0.6, &["Streams input"]),
                        module_score("doc", "Documentation Analysis", 50.0, 0.4, &[]),
                    ],
                },
            ],
            category_winners: vec![
                CategoryWinner {
                    module_id: "perf".into(),
                    display_name: "Performance Analysis".into(),
                    solution_id: "llm1".into(),
                    value: 80.0,
                },
                CategoryWinner {
                    module_id: "doc".into(),
                    display_name: "Documentation Analysis".into(),
                    solution_id: "llm2".into(),
                    value: 90.0,
                },
            ],
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_report_dispatch() {
        let rendered = report(&test_report(), "json").expect("render");
        assert!(rendered.trim_start().starts_with('{'));
        assert!(report(&test_report(), "pdf").is_err());
        assert_eq!(file_extension(OutputFormat::Markdown), "md");
    }
}
