//! Front-end problems mapped onto syntax nodes.
//!
//! A warning is reported against a byte range; rules want a node. Each
//! warning is attached to the innermost node covering its range whose kind
//! its category admits. Warnings with no such node are dropped.

use std::collections::BTreeSet;

use javelin_frontend::{Problem, ProblemCategory, ProblemId, Severity};
use javelin_syntax::SyntaxKind::*;
use javelin_syntax::{NodeId, STATEMENTS, SyntaxKind, SyntaxSet, SyntaxTree, TYPE_DECLARATIONS, TextRange, TextSize};

const IMPORTS: SyntaxSet = SyntaxSet::new([IMPORT_DECLARATION]);
const VARIABLES: SyntaxSet = SyntaxSet::new([VARIABLE]);
const METHODS: SyntaxSet = SyntaxSet::new([METHOD, CONSTRUCTOR]);
const CASTS: SyntaxSet = SyntaxSet::new([TYPE_CAST]);
const LABELS: SyntaxSet = SyntaxSet::new([LABELED_STATEMENT]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCategory {
    UnusedImport,
    UnusedLocalVariable,
    UnusedPrivateField,
    UnusedPrivateMethod,
    UnusedPrivateType,
    RedundantCast,
    UnusedLabel,
    DeadCode,
}

impl WarningCategory {
    pub fn from_problem(id: ProblemId) -> Option<Self> {
        Some(match id {
            ProblemId::UnusedImport => Self::UnusedImport,
            ProblemId::UnusedLocal => Self::UnusedLocalVariable,
            ProblemId::UnusedPrivateField => Self::UnusedPrivateField,
            ProblemId::UnusedPrivateMethod => Self::UnusedPrivateMethod,
            ProblemId::UnusedPrivateType => Self::UnusedPrivateType,
            ProblemId::RedundantCast => Self::RedundantCast,
            ProblemId::UnusedLabel => Self::UnusedLabel,
            ProblemId::DeadCode => Self::DeadCode,
            ProblemId::SyntaxError
            | ProblemId::SwitchNotExhaustive
            | ProblemId::UnresolvedType
            | ProblemId::UnresolvedName
            | ProblemId::UnresolvedMethod
            | ProblemId::UnresolvedField => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnusedImport => "unused-import",
            Self::UnusedLocalVariable => "unused-local-variable",
            Self::UnusedPrivateField => "unused-private-field",
            Self::UnusedPrivateMethod => "unused-private-method",
            Self::UnusedPrivateType => "unused-private-type",
            Self::RedundantCast => "redundant-cast",
            Self::UnusedLabel => "unused-label",
            Self::DeadCode => "dead-code",
        }
    }

    /// Node kinds a warning of this category can be attached to.
    pub fn admits(self, kind: SyntaxKind) -> bool {
        let eligible = match self {
            Self::UnusedImport => &IMPORTS,
            Self::UnusedLocalVariable | Self::UnusedPrivateField => &VARIABLES,
            Self::UnusedPrivateMethod => &METHODS,
            Self::UnusedPrivateType => &TYPE_DECLARATIONS,
            Self::RedundantCast => &CASTS,
            Self::UnusedLabel => &LABELS,
            Self::DeadCode => &STATEMENTS,
        };
        eligible.contains(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub category: WarningCategory,
    pub range: TextRange,
    pub attached: Option<NodeId>,
}

/// Splits `problems` into attached warnings and semantic errors. Anything
/// else (tolerated syntax problems, unknown warnings) is dropped.
pub fn attach_warnings(tree: &SyntaxTree, problems: Vec<Problem>) -> (Vec<Warning>, Vec<Problem>) {
    let mut warnings = Vec::new();
    let mut semantic_errors = Vec::new();
    for problem in problems {
        match (problem.severity, WarningCategory::from_problem(problem.id)) {
            (Severity::Warning, Some(category)) => {
                warnings.push(Warning { message: problem.message, category, range: problem.range, attached: None });
            }
            (Severity::Error, _) if matches!(problem.category, ProblemCategory::Type | ProblemCategory::Semantic) => {
                semantic_errors.push(problem);
            }
            _ => tracing::debug!(id = %problem.id, "problem not mapped"),
        }
    }

    refine(tree, &mut warnings);
    warnings.retain(|warning| {
        if warning.attached.is_none() {
            tracing::debug!(message = %warning.message, range = ?warning.range, "warning has no eligible node");
        }
        warning.attached.is_some()
    });
    (warnings, semantic_errors)
}

/// One pre-order pass. Node starts never decrease in pre-order, so a
/// pending warning starting before the current node is final.
fn refine(tree: &SyntaxTree, warnings: &mut [Warning]) {
    let mut pending: BTreeSet<(TextSize, TextSize, usize)> = warnings
        .iter()
        .enumerate()
        .map(|(index, warning)| (warning.range.start(), warning.range.end(), index))
        .collect();
    let mut widths: Vec<Option<TextSize>> = vec![None; warnings.len()];

    for node in tree.root().descendants() {
        if pending.is_empty() {
            break;
        }
        let range = node.text_range();
        while pending.first().is_some_and(|&(start, _, _)| start < range.start()) {
            pending.pop_first();
        }

        let mut exact = Vec::new();
        let inside = pending.range((range.start(), TextSize::from(0), 0)..);
        for &(start, end, index) in inside.take_while(|&&(start, _, _)| start <= range.end()) {
            let warning = &mut warnings[index];
            if end > range.end() || !warning.category.admits(node.kind()) {
                continue;
            }
            if widths[index].is_none_or(|width| range.len() <= width) {
                widths[index] = Some(range.len());
                warning.attached = Some(node.id());
            }
            if start == range.start() && end == range.end() {
                exact.push((start, end, index));
            }
        }
        for entry in exact {
            pending.remove(&entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use javelin_frontend::{JavaFrontEnd, SourceInput};
    use javelin_syntax::LanguageLevel;

    use super::*;
    use crate::{FileContext, SyntaxPolicy, parse_and_convert};

    fn convert(text: &str) -> FileContext {
        let input = SourceInput::new("Test.java", text, LanguageLevel::default());
        parse_and_convert(&JavaFrontEnd::new(), &input, &SyntaxPolicy::default()).unwrap()
    }

    fn attached(context: &FileContext) -> Vec<(WarningCategory, SyntaxKind, &str)> {
        context
            .warnings()
            .iter()
            .map(|warning| {
                let node = context.tree().node(warning.attached.unwrap());
                (warning.category, node.kind(), node.text())
            })
            .collect()
    }

    #[test]
    fn warnings_land_on_eligible_nodes() {
        let context = convert(
            "import java.util.List;

class D {
    private int unused;

    void m(String s) {
        inner:
        while (true) {
            break;
        }
        if (false) {
            s = \"x\";
        }
        Object o = (String) s;
        System.out.println(o);
    }
}
",
        );
        assert_eq!(
            attached(&context),
            [
                (WarningCategory::UnusedImport, IMPORT_DECLARATION, "import java.util.List;"),
                (WarningCategory::UnusedPrivateField, VARIABLE, "private int unused;"),
                (WarningCategory::UnusedLabel, LABELED_STATEMENT, "inner:\n        while (true) {\n            break;\n        }"),
                (WarningCategory::DeadCode, BLOCK, "{\n            s = \"x\";\n        }"),
                (WarningCategory::RedundantCast, TYPE_CAST, "(String) s"),
            ]
        );
    }

    #[test]
    fn later_declarator_gets_its_own_warning() {
        let context = convert(
            "class E {
    void m() {
        int a = 1, b;
        System.out.println(a);
    }
}
",
        );
        assert_eq!(attached(&context), [(WarningCategory::UnusedLocalVariable, VARIABLE, "b;")]);
    }

    #[test]
    fn ineligible_ranges_are_dropped_and_errors_kept() {
        let context = convert("class F { int x; }\n");
        let range = context.tree().root().descendants().find(|node| node.kind() == VARIABLE).unwrap().text_range();
        let problems = vec![
            Problem::unnecessary(ProblemId::UnusedImport, "not an import", range),
            Problem::unnecessary(ProblemId::UnusedPrivateField, "field", range),
            Problem::new(ProblemId::UnresolvedType, ProblemCategory::Type, Severity::Error, "Foo", range),
            Problem::new(
                ProblemId::SwitchNotExhaustive,
                ProblemCategory::Syntax,
                Severity::Error,
                "switch",
                range,
            ),
        ];

        let (warnings, errors) = attach_warnings(context.tree(), problems);
        let messages: Vec<&str> = warnings.iter().map(|warning| warning.message.as_str()).collect();
        assert_eq!(messages, ["field"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].id, ProblemId::UnresolvedType);
    }

    #[test]
    fn innermost_statement_wins() {
        let context = convert("class G { void m() { { return; } } }\n");
        let ret = context.tree().root().descendants().find(|node| node.kind() == RETURN_STATEMENT).unwrap();
        let problems = vec![Problem::unnecessary(ProblemId::DeadCode, "dead", ret.text_range())];

        let (warnings, _) = attach_warnings(context.tree(), problems);
        assert_eq!(warnings[0].attached, Some(ret.id()));
    }
}
