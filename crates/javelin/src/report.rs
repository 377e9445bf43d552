use std::fmt;

use javelin_convert::FileContext;
use javelin_driver::FileOutcome;
use javelin_errors::{Diagnostic, Renderer, Severity};
use javelin_inputs::{LineCol, SourceFile};

#[derive(Default)]
pub(crate) struct Summary {
    files: usize,
    warnings: usize,
    errors: usize,
    pub(crate) skipped: usize,
    cancelled: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} warnings, {} semantic errors, {} skipped",
            self.files, self.warnings, self.errors, self.skipped
        )?;
        if self.cancelled > 0 {
            write!(f, ", {} cancelled", self.cancelled)?;
        }
        Ok(())
    }
}

/// Prints every message to stderr.
pub(crate) fn check(
    db: &dyn salsa::Database,
    files: &[SourceFile],
    outcomes: &[FileOutcome],
    short: bool,
) -> Summary {
    let renderer = Renderer::styled();
    let mut summary = Summary { files: files.len(), ..Summary::default() };

    for (&file, outcome) in files.iter().zip(outcomes) {
        let path = file.path(db).as_str();
        let diagnostics = match outcome {
            FileOutcome::Converted(context) => {
                summary.warnings += context.warnings().len();
                summary.errors += context.semantic_errors().len();
                diagnostics(context)
            }
            FileOutcome::Skipped { error, .. } => {
                summary.skipped += 1;
                let Some(range) = error.range() else {
                    eprintln!("error: {path}: file skipped: {error}");
                    continue;
                };
                vec![Diagnostic::error(format!("file skipped: {error}"), range)]
            }
            FileOutcome::Cancelled { .. } => {
                summary.cancelled += 1;
                continue;
            }
        };

        for diagnostic in &diagnostics {
            if short {
                let LineCol { line, col } = file.line_col(db, diagnostic.range().start());
                let severity = match diagnostic.severity() {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                };
                eprintln!("{path}:{}:{}: {severity}: {}", line + 1, col + 1, diagnostic.message());
            } else {
                eprintln!("{}", diagnostic.render(&renderer, path, file.text(db)));
            }
        }
    }
    summary
}

/// Warnings and semantic errors in source order.
fn diagnostics(context: &FileContext) -> Vec<Diagnostic> {
    let warnings = context.warnings().iter().map(|warning| {
        Diagnostic::warning(&warning.message, warning.range).with_label(warning.category.as_str())
    });
    let errors = context
        .semantic_errors()
        .iter()
        .map(|problem| Diagnostic::error(&problem.message, problem.range).with_label(problem.id.as_str()));

    let mut diagnostics: Vec<Diagnostic> = warnings.chain(errors).collect();
    diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());
    diagnostics
}

pub(crate) struct Dump<'a> {
    pub(crate) outcomes: &'a [FileOutcome],
    pub(crate) symbols: bool,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in self.outcomes {
            match outcome {
                FileOutcome::Converted(context) => {
                    writeln!(f, "// {}", context.path())?;
                    write!(f, "{:?}", context.tree())?;
                    if self.symbols {
                        symbols(f, context)?;
                    }
                }
                FileOutcome::Skipped { path, error } => writeln!(f, "// {path}: skipped: {error}")?,
                FileOutcome::Cancelled { path } => writeln!(f, "// {path}: cancelled")?,
            }
        }
        Ok(())
    }
}

fn symbols(f: &mut fmt::Formatter<'_>, context: &FileContext) -> fmt::Result {
    let (tree, semantic) = (context.tree(), context.semantic());
    for (binding, node) in semantic.declarations() {
        let symbol = semantic.symbol(binding);
        write!(f, "{} {}", tree.node_position(node), symbol.name())?;
        if let Some(kind) = symbol.kind() {
            write!(f, " ({kind:?})")?;
        }
        let usages: Vec<String> = symbol.usages().iter().map(|&usage| tree.node_position(usage).to_string()).collect();
        if usages.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, " used at {}", usages.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line() {
        let mut summary = Summary { files: 3, warnings: 2, errors: 0, skipped: 1, cancelled: 0 };
        assert_eq!(summary.to_string(), "3 files: 2 warnings, 0 semantic errors, 1 skipped");
        summary.cancelled = 2;
        assert_eq!(summary.to_string(), "3 files: 2 warnings, 0 semantic errors, 1 skipped, 2 cancelled");
    }
}
