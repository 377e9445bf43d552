//! The built-in Java front-end.

mod builtins;
mod checks;
mod exprs;
mod items;
mod parser;
mod resolve;
mod stmts;
#[cfg(test)]
mod tests;
mod types;

use javelin_syntax::{TextRange, TextSize};

use crate::ast::CompilationUnit;
use crate::{FrontEnd, FrontEndError, ParsedUnit, Problem, SourceInput};

/// Parses and binds Java sources against a small built-in slice of the JDK.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaFrontEnd;

impl JavaFrontEnd {
    pub fn new() -> Self {
        Self
    }
}

impl FrontEnd for JavaFrontEnd {
    fn name(&self) -> &str {
        "javelin-java"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn parse(&self, input: &SourceInput) -> Result<ParsedUnit, FrontEndError> {
        let _span = tracing::debug_span!("parse", path = %input.path).entered();
        let len = TextSize::of(input.text.as_str());

        let stream = match javelin_tokenizer::tokenize(&input.text, input.level) {
            Ok(stream) => stream,
            Err(error) => {
                let range = TextRange::empty(error.offset);
                return Ok(rejected(len, Problem::syntax(error.kind.to_string(), range)));
            }
        };

        let mut p = parser::Parser::new(&stream, input.level);
        let mut unit = match items::compilation_unit(&mut p, len) {
            Ok(unit) => unit,
            Err(error) => {
                tracing::debug!(message = %error.message, "syntax error");
                return Ok(rejected(len, Problem::syntax(error.message, error.range)));
            }
        };

        let resolution = resolve::resolve(&mut unit);
        let mut problems = resolution.problems.clone();
        problems.extend(checks::check(&unit, &resolution));
        tracing::debug!(bindings = resolution.bindings.len(), problems = problems.len(), "bound");

        Ok(ParsedUnit { unit, bindings: resolution.bindings, problems })
    }
}

/// A unit the front-end could not parse: no tree, one syntax problem.
fn rejected(len: TextSize, problem: Problem) -> ParsedUnit {
    let unit = CompilationUnit { range: TextRange::up_to(len), package: None, imports: Vec::new(), types: Vec::new() };
    ParsedUnit { unit, bindings: builtins::universe(), problems: vec![problem] }
}
