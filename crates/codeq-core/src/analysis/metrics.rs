//! Complexity metrics
//!
//! Cyclomatic complexity and function counts are estimated by counting
//! keyword and operator patterns over masked code, so the numbers are language
//! agnostic and only approximate. Both derived scores are log-scaled.

use codeq_shared::ComplexityMetrics;
use regex::Regex;
use std::sync::LazyLock;

/// Decision points; each match adds one path
static DECISION_POINTS: LazyLock<[Regex; 12]> = LazyLock::new(|| {
    [
        r"\bif\b",
        r"\belse\b",
        r"\bfor\b",
        r"\bwhile\b",
        r"\bcase\b",
        r"\bcatch\b",
        r"\?\s*[^:]",
        r"&&",
        r"\|\|",
        r"\bwhen\b",
        r"\belif\b",
        r"\bswitch\b",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid regex literal"))
});

/// Function-like definitions across the supported languages
static FUNCTION_MARKERS: LazyLock<[Regex; 8]> = LazyLock::new(|| {
    [
        r"\bfunction\b",
        r"=>",
        r"\bdef\b",
        r"\bfunc\b",
        r"\bfn\b",
        r"\bclass\b",
        r"\binterface\b",
        // C-style definition: return type, name, parameter list, opening brace
        r"(?m)^\s*[\w:\*<&>\s]+\s+[A-Za-z_]\w*\s*\([^;{]*\)\s*\{",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid regex literal"))
});

fn count_matches(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|re| re.find_iter(text).count()).sum()
}

/// `1 +` the number of decision points found
pub fn estimate_cyclomatic(masked: &str) -> usize {
    1 + count_matches(DECISION_POINTS.as_slice(), masked)
}

pub fn estimate_functions(masked: &str) -> usize {
    count_matches(FUNCTION_MARKERS.as_slice(), masked)
}

/// `100 - penalty`, with the penalty capped at `cap`, rounded into 0..=100
fn log_scaled(cyclomatic: usize, lines: usize, cyc_weight: f64, line_weight: f64, cap: f64) -> u32 {
    let penalty = (cyclomatic.max(1) as f64).log2() * cyc_weight
        + (lines.max(1) as f64).log2() * line_weight;
    (100.0 - penalty.min(cap)).round().clamp(0.0, 100.0) as u32
}

/// Compute every metric over masked code
pub fn compute_metrics(masked: &str) -> ComplexityMetrics {
    let lines = masked.split('\n').count();
    let cyclomatic = estimate_cyclomatic(masked);
    let functions = estimate_functions(masked);

    ComplexityMetrics {
        score: log_scaled(cyclomatic, lines, 10.0, 5.0, 60.0),
        cyclomatic,
        lines,
        functions,
        maintainability: log_scaled(cyclomatic, lines, 12.0, 6.0, 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_code() {
        let metrics = compute_metrics("x = 1");
        assert_eq!(
            metrics,
            ComplexityMetrics {
                score: 100,
                cyclomatic: 1,
                lines: 1,
                functions: 0,
                maintainability: 100,
            }
        );
    }

    #[test]
    fn test_trailing_newline_counts_a_line() {
        assert_eq!(compute_metrics("a\nb\n").lines, 3);
        assert_eq!(compute_metrics("").lines, 1);
    }

    #[test]
    fn test_cyclomatic_counts_decision_points() {
        let code = "if (a && b || c) { x } else { y }\nwhile (t) {}\nlet v = ok ? 1 : 2;";
        // if, else, while, &&, ||, ?
        assert_eq!(estimate_cyclomatic(code), 7);
    }

    #[test]
    fn test_ternary_needs_an_operand() {
        // `?:` without a middle operand is not a branch
        assert_eq!(estimate_cyclomatic("a ?: b"), 1);
        assert_eq!(estimate_cyclomatic("x?.y"), 2);
    }

    #[test]
    fn test_function_markers() {
        assert_eq!(estimate_functions("const a = function () {};\nconst b = () => 1;"), 2);
        assert_eq!(estimate_functions("def f():\n    pass\nclass A:\n    pass"), 2);
        // keyword plus the C-style definition shape
        assert_eq!(estimate_functions("fn main() {}"), 2);
    }

    #[test]
    fn test_c_style_definition() {
        assert_eq!(estimate_functions("int main(int argc, char **argv) {\n    return 0;\n}"), 1);
        // a declaration ends with `;` and is not counted
        assert_eq!(estimate_functions("int add(int a, int b);"), 0);
    }

    #[test]
    fn test_scores_for_known_inputs() {
        // cyc = 1, lines = 16: penalty 4 * 6 = 24, score penalty 4 * 5 = 20
        let code = "\n".repeat(15);
        let metrics = compute_metrics(&code);
        assert_eq!(metrics.lines, 16);
        assert_eq!(metrics.maintainability, 76);
        assert_eq!(metrics.score, 80);
    }

    #[test]
    fn test_score_penalty_is_capped() {
        let code = "if x\n".repeat(5000);
        let metrics = compute_metrics(&code);
        assert_eq!(metrics.score, 40);
        assert_eq!(metrics.maintainability, 0);
    }
}
