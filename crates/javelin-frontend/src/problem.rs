use std::fmt;

use javelin_syntax::TextRange;
use serde::{Deserialize, Serialize};

/// Stable identifier of a front-end problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemId {
    SyntaxError,
    /// A switch expression without `default` whose selector type is unknown.
    SwitchNotExhaustive,
    UnresolvedType,
    UnresolvedName,
    UnresolvedMethod,
    UnresolvedField,
    UnusedImport,
    UnusedLocal,
    UnusedPrivateField,
    UnusedPrivateMethod,
    UnusedPrivateType,
    RedundantCast,
    UnusedLabel,
    DeadCode,
}

impl ProblemId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SyntaxError => "syntax-error",
            Self::SwitchNotExhaustive => "switch-not-exhaustive",
            Self::UnresolvedType => "unresolved-type",
            Self::UnresolvedName => "unresolved-name",
            Self::UnresolvedMethod => "unresolved-method",
            Self::UnresolvedField => "unresolved-field",
            Self::UnusedImport => "unused-import",
            Self::UnusedLocal => "unused-local",
            Self::UnusedPrivateField => "unused-private-field",
            Self::UnusedPrivateMethod => "unused-private-method",
            Self::UnusedPrivateType => "unused-private-type",
            Self::RedundantCast => "redundant-cast",
            Self::UnusedLabel => "unused-label",
            Self::DeadCode => "dead-code",
        }
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemCategory {
    Syntax,
    Type,
    Semantic,
    UnnecessaryCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub id: ProblemId,
    pub category: ProblemCategory,
    pub severity: Severity,
    pub message: String,
    pub range: TextRange,
}

impl Problem {
    pub fn new(
        id: ProblemId,
        category: ProblemCategory,
        severity: Severity,
        message: impl Into<String>,
        range: TextRange,
    ) -> Self {
        Self { id, category, severity, message: message.into(), range }
    }

    pub fn syntax(message: impl Into<String>, range: TextRange) -> Self {
        Self::new(ProblemId::SyntaxError, ProblemCategory::Syntax, Severity::Error, message, range)
    }

    pub fn unnecessary(id: ProblemId, message: impl Into<String>, range: TextRange) -> Self {
        Self::new(id, ProblemCategory::UnnecessaryCode, Severity::Warning, message, range)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] at {:?}", self.message, self.id, self.range)
    }
}
