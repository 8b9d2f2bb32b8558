//! Canned improvement suggestions derived from metrics

use codeq_shared::{ComplexityMetrics, Language};

/// Suggestions in a fixed order: metric thresholds first, then language tips
pub fn suggest(metrics: &ComplexityMetrics, language: Language) -> Vec<String> {
    let rules: [(bool, &str); 7] = [
        (
            metrics.cyclomatic > 20,
            "Refactor to reduce cyclomatic complexity; extract smaller functions and simplify conditionals.",
        ),
        (
            metrics.lines > 400,
            "File is large; consider splitting into cohesive modules.",
        ),
        (
            metrics.functions > 50,
            "High function count; group related logic and remove dead code.",
        ),
        (
            metrics.maintainability < 60,
            "Improve maintainability by adding documentation and consistent naming.",
        ),
        (
            metrics.score < 70,
            "Apply early returns and guard clauses to reduce nesting.",
        ),
        (
            language == Language::Python,
            "Follow PEP 8: 4-space indents, snake_case names, and module-level docstrings.",
        ),
        (
            language == Language::Cpp,
            "Prefer modern C++ (RAII, smart pointers, range-based loops) and avoid 'using namespace std;'.",
        ),
    ];

    rules
        .into_iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, text)| text.to_string())
        .collect()
}
