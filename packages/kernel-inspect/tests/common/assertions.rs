//! Custom assertions for inspection reports

use kernel_inspect::{InspectionReport, RuleKind, Severity, Violation};

/// Findings of one rule
pub fn violations_of(report: &InspectionReport, rule: RuleKind) -> Vec<&Violation> {
    report.violations.iter().filter(|v| v.rule == rule).collect()
}

/// Messages of one rule, in report order
pub fn messages_of(report: &InspectionReport, rule: RuleKind) -> Vec<String> {
    violations_of(report, rule)
        .into_iter()
        .map(|v| v.message.clone())
        .collect()
}

/// Assert that the report contains no findings at all
pub fn assert_clean(report: &InspectionReport) {
    assert!(
        report.is_clean(),
        "Expected no violations, got: {:?}",
        report
            .violations
            .iter()
            .map(|v| (v.rule, v.message.as_str()))
            .collect::<Vec<_>>()
    );
}

/// Assert the number of findings of one rule
pub fn assert_rule_count(report: &InspectionReport, rule: RuleKind, expected: usize) {
    let found = violations_of(report, rule);
    assert_eq!(
        found.len(),
        expected,
        "Expected {expected} {rule} violations, got {}: {:?}",
        found.len(),
        found.iter().map(|v| v.message.as_str()).collect::<Vec<_>>()
    );
}

/// Assert that every finding of `rule` has `severity`
pub fn assert_rule_severity(report: &InspectionReport, rule: RuleKind, severity: Severity) {
    for violation in violations_of(report, rule) {
        assert_eq!(
            violation.severity, severity,
            "{rule} violation '{}' has the wrong severity",
            violation.message
        );
    }
}
