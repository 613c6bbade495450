//! JSON reporter
//!
//! Outputs the full RankingReport as pretty-printed JSON.
//! Useful for dashboards, piping to jq, or further processing.

use crate::models::RankingReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &RankingReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["preset"], "balanced");
        assert_eq!(parsed["solutions"][0]["solution_id"], "llm2");
        assert_eq!(parsed["weights"].as_array().expect("weights array").len(), 2);
    }

    #[test]
    fn test_json_empty_solutions() {
        let mut report = test_report();
        report.solutions.clear();
        report.category_winners.clear();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["solutions"].as_array().expect("solutions array").len(), 0);
    }
}
