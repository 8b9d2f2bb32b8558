//! Statement-terminator heuristics for C++, Java, C# and PHP

use super::{ends_ok, ends_with_paren, missing_terminators};
use codeq_shared::Issue;
use regex::Regex;
use std::sync::LazyLock;

const MISSING_SEMICOLON: &str = "Possible missing ';' at end of statement";

static CPP_IOSTREAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|\n)\s*#\s*include\s*<iostream>").expect("valid regex literal")
});

static CPP_STREAM_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(std::)?(cout|cin)\b").expect("valid regex literal"));

static CPP_USING_STD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"using\s+namespace\s+std\s*;").expect("valid regex literal"));

static CPP_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(case\b|default\b|(public|private|protected)\s*:)").expect("valid regex literal")
});

static CPP_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(=|\breturn\b|\bint\b|\blong\b|\bshort\b|\bfloat\b|\bdouble\b|\bchar\b|\bbool\b|\bauto\b|\bstring\b|\bstd::string\b)",
    )
    .expect("valid regex literal")
});

static CPP_CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(if|for|while|switch|else)\b").expect("valid regex literal"));

static JAVA_CONTROL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(if|for|while|switch|else|try|catch|finally|do)\b").expect("valid regex literal")
});

static JAVA_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(class|interface|enum)\b").expect("valid regex literal"));

static CSHARP_CONSOLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Console\.Write(Line)?\s*\(").expect("valid regex literal"));

static CSHARP_USING_SYSTEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"using\s+System\s*;").expect("valid regex literal"));

static CSHARP_CONTROL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(if|for|while|switch|else|try|catch|finally|do|using)\b")
        .expect("valid regex literal")
});

static CSHARP_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(class|interface|enum|struct|record)\b").expect("valid regex literal")
});

static PHP_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\w+").expect("valid regex literal"));

static PHP_CONTROL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(if|for|while|switch|else|foreach|function)\b").expect("valid regex literal")
});

/// C/C++ checks over masked code
pub(super) fn check_cpp(masked: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if CPP_STREAM_USE.is_match(masked) && !CPP_IOSTREAM.is_match(masked) {
        issues.push(Issue::warn("Uses cout/cin without including <iostream>"));
    }
    if CPP_USING_STD.is_match(masked) {
        issues.push(Issue::info(
            "Avoid 'using namespace std;'. Prefer explicit std:: qualifiers.",
        ));
    }

    issues.extend(missing_terminators(masked, MISSING_SEMICOLON, |t| {
        t.starts_with('#')
            || t.starts_with("//")
            || CPP_LABEL.is_match(t)
            || CPP_CONTROL.is_match(t)
            || !CPP_STATEMENT.is_match(t)
            // a function header, its body opens on the next line
            || (ends_with_paren(t) && !ends_ok(t))
    }));

    issues
}

/// Java checks over masked code
pub(super) fn check_java(masked: &str) -> Vec<Issue> {
    missing_terminators(masked, MISSING_SEMICOLON, |t| {
        t.starts_with("//")
            || t.starts_with("/*")
            || t.starts_with('*')
            || JAVA_CONTROL.is_match(t)
            || JAVA_DECL.is_match(t)
            || ends_with_paren(t)
    })
}

/// C# checks over masked code
pub(super) fn check_csharp(masked: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if CSHARP_CONSOLE.is_match(masked) && !CSHARP_USING_SYSTEM.is_match(masked) {
        issues.push(Issue::info("Uses Console without 'using System;'."));
    }

    issues.extend(missing_terminators(masked, MISSING_SEMICOLON, |t| {
        t.starts_with("//")
            || CSHARP_CONTROL.is_match(t)
            || CSHARP_DECL.is_match(t)
            || ends_with_paren(t)
    }));

    issues
}

/// PHP checks over raw code
pub(super) fn check_php(raw: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if PHP_VARIABLE.is_match(raw) && !raw.trim().starts_with("<?php") {
        issues.push(Issue::error("Missing '<?php' opening tag"));
    }

    issues.extend(missing_terminators(raw, MISSING_SEMICOLON, |t| {
        // deliberately exempt: a bare open or close tag is not a statement,
        // so a lone `<?php` line is never reported as missing ';'
        matches!(t, "<?php" | "<?" | "?>")
            || t.starts_with("//")
            || t.starts_with('#')
            || t.starts_with("/*")
            || PHP_CONTROL.is_match(t)
            || ends_with_paren(t)
    }));

    issues
}
