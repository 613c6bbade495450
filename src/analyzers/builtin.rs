//! Built-in rubric dimensions
//!
//! The seven dimensions the grading rubric ships with. Default weights sum
//! to 1.0.

use crate::models::AnalyzerModule;

/// Default weight for a module seen in a score file without metadata
pub const UNKNOWN_MODULE_WEIGHT: f64 = 0.05;

/// (id, display name, default weight, category, description)
const BUILTIN: &[(&str, &str, f64, &str, &str)] = &[
    (
        "performance",
        "Performance Analysis",
        0.20,
        "performance",
        "Evaluates algorithmic efficiency, optimization techniques, and performance patterns",
    ),
    (
        "readability",
        "Readability Analysis",
        0.15,
        "readability",
        "Evaluates code clarity, comments, structure, and naming conventions",
    ),
    (
        "requirements_traceability",
        "Requirements Traceability Analysis",
        0.25,
        "requirements",
        "Maps original prompt requirements to implementation evidence",
    ),
    (
        "code_quality",
        "Code Quality Analysis",
        0.10,
        "quality",
        "Evaluates error handling, type safety, and language best practices",
    ),
    (
        "documentation",
        "Documentation Analysis",
        0.05,
        "documentation",
        "Evaluates README files, inline documentation, and help system quality",
    ),
    (
        "security",
        "Security Analysis",
        0.15,
        "security",
        "Evaluates security vulnerabilities, input validation, and safe coding practices",
    ),
    (
        "adaptability",
        "Adaptability Analysis",
        0.10,
        "adaptability",
        "Evaluates configurability and cross-platform compatibility",
    ),
];

fn to_module(entry: &(&str, &str, f64, &str, &str)) -> AnalyzerModule {
    let (id, name, weight, category, description) = *entry;
    AnalyzerModule::new(id, name, weight)
        .with_category(category)
        .with_description(description)
}

/// All built-in dimensions in rubric order
pub fn builtin_modules() -> Vec<AnalyzerModule> {
    BUILTIN.iter().map(to_module).collect()
}

/// Look up a built-in dimension by id
pub fn builtin_module(id: &str) -> Option<AnalyzerModule> {
    BUILTIN.iter().find(|entry| entry.0 == id).map(to_module)
}

/// Built-in metadata for `id`, or a generic module at `UNKNOWN_MODULE_WEIGHT`
pub fn module_or_fallback(id: &str) -> AnalyzerModule {
    builtin_module(id).unwrap_or_else(|| AnalyzerModule::new(id, id, UNKNOWN_MODULE_WEIGHT))
}
