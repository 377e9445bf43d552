//! Which front-end syntax problems abort a file.
//!
//! Some front-ends report problems as syntax errors that are really gaps in
//! their type knowledge. Exception tables name those problems per front-end
//! and version so they can be tolerated without hiding real syntax errors.

use std::collections::BTreeSet;

use javelin_frontend::{Problem, ProblemCategory, ProblemId};
use serde::{Deserialize, Serialize};

/// Problem ids one front-end may report as syntax errors without the file
/// being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionTable {
    pub front_end: String,
    /// Exact front-end version, or `*` for any.
    #[serde(default = "any_version")]
    pub version: String,
    #[serde(default)]
    pub ignored: Vec<ProblemId>,
}

fn any_version() -> String {
    "*".to_owned()
}

impl Default for ExceptionTable {
    fn default() -> Self {
        Self {
            front_end: "javelin-java".to_owned(),
            version: any_version(),
            ignored: vec![ProblemId::SwitchNotExhaustive],
        }
    }
}

impl ExceptionTable {
    pub fn matches(&self, front_end: &str, version: &str) -> bool {
        self.front_end == front_end && (self.version == "*" || self.version == version)
    }
}

/// Resolved exceptions for one front-end. The default policy tolerates
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxPolicy {
    ignored: BTreeSet<ProblemId>,
}

impl SyntaxPolicy {
    /// Merges every table matching `front_end` at `version`.
    pub fn for_front_end(tables: &[ExceptionTable], front_end: &str, version: &str) -> Self {
        let mut ignored = BTreeSet::new();
        for table in tables {
            if table.matches(front_end, version) {
                ignored.extend(table.ignored.iter().copied());
            } else {
                tracing::warn!(
                    table.front_end = %table.front_end,
                    table.version = %table.version,
                    front_end,
                    version,
                    "exception table does not match the front-end, ignoring it"
                );
            }
        }
        Self { ignored }
    }

    pub fn allows(&self, id: ProblemId) -> bool {
        self.ignored.contains(&id)
    }

    /// The first problem that must abort the file.
    pub fn first_fatal<'p>(&self, problems: &'p [Problem]) -> Option<&'p Problem> {
        problems
            .iter()
            .find(|problem| problem.category == ProblemCategory::Syntax && problem.is_error() && !self.allows(problem.id))
    }
}

#[cfg(test)]
mod tests {
    use javelin_frontend::Severity;
    use javelin_syntax::TextRange;

    use super::*;

    fn problem(id: ProblemId, category: ProblemCategory) -> Problem {
        Problem::new(id, category, Severity::Error, id.as_str(), TextRange::default())
    }

    #[test]
    fn tables_load_from_toml() {
        #[derive(Deserialize)]
        struct File {
            exceptions: Vec<ExceptionTable>,
        }

        let file: File = toml::from_str(
            r#"
            [[exceptions]]
            front_end = "javelin-java"
            ignored = ["switch-not-exhaustive"]

            [[exceptions]]
            front_end = "other"
            version = "2.1"
            "#,
        )
        .unwrap();

        assert_eq!(file.exceptions[0], ExceptionTable::default());
        assert!(file.exceptions[1].matches("other", "2.1"));
        assert!(!file.exceptions[1].matches("other", "2.2"));
        assert!(file.exceptions[1].ignored.is_empty());
    }

    #[test]
    fn only_matching_tables_apply() {
        let tables = [
            ExceptionTable::default(),
            ExceptionTable { front_end: "other".to_owned(), version: "1".to_owned(), ignored: vec![ProblemId::SyntaxError] },
        ];
        let policy = SyntaxPolicy::for_front_end(&tables, "javelin-java", "0.1.0");
        assert!(policy.allows(ProblemId::SwitchNotExhaustive));
        assert!(!policy.allows(ProblemId::SyntaxError));
        assert!(!SyntaxPolicy::default().allows(ProblemId::SwitchNotExhaustive));
    }

    #[test]
    fn fatal_problems_skip_tolerated_and_semantic_ones() {
        let policy = SyntaxPolicy::for_front_end(&[ExceptionTable::default()], "javelin-java", "0.1.0");
        let problems = [
            problem(ProblemId::UnresolvedType, ProblemCategory::Type),
            problem(ProblemId::SwitchNotExhaustive, ProblemCategory::Syntax),
            problem(ProblemId::SyntaxError, ProblemCategory::Syntax),
        ];

        assert_eq!(policy.first_fatal(&problems).map(|problem| problem.id), Some(ProblemId::SyntaxError));
        assert_eq!(policy.first_fatal(&problems[..2]), None);
        assert_eq!(SyntaxPolicy::default().first_fatal(&problems[..2]).map(|p| p.id), Some(ProblemId::SwitchNotExhaustive));
    }
}
