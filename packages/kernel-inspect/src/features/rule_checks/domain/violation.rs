//! Findings and rule identities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::shared::models::{MethodId, NodeId, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Error,
    Warning,
    WeakWarning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::WeakWarning => "weak-warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    DataType,
    Recursion,
    Throw,
    SystemCall,
    NonVoidReturn,
    StaticTaskGraph,
    Assert,
    ExternalLibrary,
    UnresolvableHelper,
}

impl RuleKind {
    pub const ALL: [RuleKind; 9] = [
        RuleKind::DataType,
        RuleKind::Recursion,
        RuleKind::Throw,
        RuleKind::SystemCall,
        RuleKind::NonVoidReturn,
        RuleKind::StaticTaskGraph,
        RuleKind::Assert,
        RuleKind::ExternalLibrary,
        RuleKind::UnresolvableHelper,
    ];

    /// Stable id used in configuration and reports
    pub fn id(&self) -> &'static str {
        match self {
            RuleKind::DataType => "data-type",
            RuleKind::Recursion => "recursion",
            RuleKind::Throw => "throw",
            RuleKind::SystemCall => "system-call",
            RuleKind::NonVoidReturn => "non-void-return",
            RuleKind::StaticTaskGraph => "static-task-graph",
            RuleKind::Assert => "assert",
            RuleKind::ExternalLibrary => "external-library",
            RuleKind::UnresolvableHelper => "unresolvable-helper",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RuleKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .iter()
            .copied()
            .find(|k| k.id() == s)
            .ok_or_else(|| {
                let ids: Vec<&str> = RuleKind::ALL.iter().map(|k| k.id()).collect();
                ConfigError::unknown_rule_with_suggestion(s, &ids)
            })
    }
}

/// What a finding is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationTarget {
    /// Statement, expression, variable or type use
    Node(NodeId),
    /// A method declaration (recursion closes on it)
    Method(MethodId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: RuleKind,
    pub severity: Severity,
    pub message: String,
    pub target: ViolationTarget,
    pub span: Span,
    /// Method whose source contains the target
    pub method: MethodId,
    /// Kernel whose scope produced the finding
    pub kernel: MethodId,
}
