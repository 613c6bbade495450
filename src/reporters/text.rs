//! Text (terminal) reporter with colors and formatting

use crate::models::RankingReport;
use anyhow::Result;

/// Score colors (ANSI escape codes)
fn score_color(score: f64) -> &'static str {
    if score >= 80.0 {
        "\x1b[32m" // Green
    } else if score >= 65.0 {
        "\x1b[92m" // Light green
    } else if score >= 50.0 {
        "\x1b[33m" // Yellow
    } else {
        "\x1b[31m" // Red
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Width of the weight bar in characters
const BAR_WIDTH: usize = 20;

fn weight_bar(weight: f64) -> String {
    let filled = (weight.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Render report as formatted terminal output
pub fn render(report: &RankingReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Solution Ranking{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Weighting: {BOLD}{}{RESET}\n\n",
        report.preset.as_deref().unwrap_or("custom")
    ));

    out.push_str(&format!("{BOLD}Weights{RESET}\n"));
    for weight in &report.weights {
        out.push_str(&format!(
            "  {:<36} {} {:>5.1}%\n",
            weight.display_name,
            weight_bar(weight.weight),
            weight.weight * 100.0
        ));
    }
    out.push('\n');

    if report.solutions.is_empty() {
        out.push_str(&format!("{DIM}No solutions scored.{RESET}\n"));
        return Ok(out);
    }

    out.push_str(&format!("{BOLD}Rankings{RESET}\n"));
    for solution in &report.solutions {
        let color = score_color(solution.overall_score);
        out.push_str(&format!(
            "  {:>2}. {:<20} {color}{BOLD}{:>5.1}{RESET}/100\n",
            solution.rank, solution.solution_id, solution.overall_score
        ));
        for module in &solution.modules {
            out.push_str(&format!(
                "      {DIM}{:<34} {:>5.1}  (+{:.1}){RESET}\n",
                module.display_name, module.value, module.contribution
            ));
        }
    }

    if !report.category_winners.is_empty() {
        out.push_str(&format!("\n{BOLD}Category winners{RESET}\n"));
        for winner in &report.category_winners {
            out.push_str(&format!(
                "  {:<36} {} ({:.1})\n",
                winner.display_name, winner.solution_id, winner.value
            ));
        }
    }

    Ok(out)
}
