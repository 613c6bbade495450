//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - Evaluation write-ups
//! - Documentation

use crate::models::{RankingReport, SolutionReport};
use anyhow::Result;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &RankingReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_rankings(report));
    md.push('\n');

    md.push_str(&render_breakdown(report));
    md.push('\n');

    for solution in &report.solutions {
        md.push_str(&render_solution(solution));
        md.push('\n');
    }

    md.push_str(&render_summary(report));

    Ok(md)
}

fn render_header(report: &RankingReport) -> String {
    let preset = report.preset.as_deref().unwrap_or("custom");
    format!(
        r#"# Solution Comparison Report

Generated: {}
Weighting: **{}**
"#,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        preset
    )
}

fn render_rankings(report: &RankingReport) -> String {
    let mut md = String::from(
        "## Overall Rankings\n\n| Rank | Solution | Overall Score |\n|------|----------|---------------|\n",
    );
    for solution in &report.solutions {
        md.push_str(&format!(
            "| {} | {} | {:.1} |\n",
            solution.rank, solution.solution_id, solution.overall_score
        ));
    }
    md
}

/// Strip the trailing " Analysis" the built-in names carry
fn short_name(display_name: &str) -> &str {
    display_name.trim_end_matches(" Analysis")
}

fn render_breakdown(report: &RankingReport) -> String {
    let mut md = String::from("## Detailed Score Breakdown\n\n| Solution |");
    let mut separator = String::from("|----------|");
    for weight in &report.weights {
        md.push_str(&format!(" {} |", short_name(&weight.display_name)));
        separator.push_str("-------|");
    }
    md.push('\n');
    md.push_str(&separator);
    md.push('\n');

    for solution in &report.solutions {
        md.push_str(&format!("| {} |", solution.solution_id));
        for weight in &report.weights {
            let cell = solution
                .modules
                .iter()
                .find(|m| m.module_id == weight.module_id)
                .map(|m| format!("{:.1}", m.value))
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(" {} |", cell));
        }
        md.push('\n');
    }
    md
}

fn render_solution(solution: &SolutionReport) -> String {
    let mut md = format!(
        "## {} - Detailed Analysis\n\n**Overall Score: {:.1}/100**\n\n",
        solution.solution_id, solution.overall_score
    );

    for module in &solution.modules {
        md.push_str(&format!(
            "### {}\n**Score: {:.1}/100** (weight {:.0}%, contributes {:.1})\n\n",
            module.display_name,
            module.value,
            module.weight * 100.0,
            module.contribution
        ));
        if !module.notes.is_empty() {
            for note in &module.notes {
                md.push_str(&format!("- {}\n", note));
            }
            md.push('\n');
        }
    }

    md.push_str("---\n");
    md
}

fn render_summary(report: &RankingReport) -> String {
    let mut md = String::from("## Summary and Recommendations\n\n");

    match report.winner() {
        Some(best) => md.push_str(&format!(
            "**Best Overall Solution:** {} (Score: {:.1})\n\n",
            best.solution_id, best.overall_score
        )),
        None => md.push_str("No solutions were scored.\n\n"),
    }

    if !report.category_winners.is_empty() {
        md.push_str("### Category Winners\n\n");
        for winner in &report.category_winners {
            md.push_str(&format!(
                "- **{}:** {} ({:.1})\n",
                winner.display_name, winner.solution_id, winner.value
            ));
        }
        md.push('\n');
    }

    md.push_str("### Analysis Modules Used\n\n");
    for weight in &report.weights {
        md.push_str(&format!(
            "- **{}** (Weight: {:.0}%)\n",
            weight.display_name,
            weight.weight * 100.0
        ));
    }

    md
}
