//! Front-end contract: parsing with name bindings.
//!
//! A [`FrontEnd`] turns source text into an owned [`ast::CompilationUnit`]
//! whose declarations and references carry [`BindingId`]s into a per-file
//! [`Bindings`] table, plus a list of classified [`Problem`]s.
//! [`JavaFrontEnd`] is the reference implementation.

pub mod ast;
mod binding;
mod java;
mod problem;
pub mod visit;

use camino::Utf8PathBuf;
use javelin_syntax::LanguageLevel;

pub use crate::binding::{BindingData, BindingId, BindingKind, Bindings, ModifierFlags, Origin};
pub use crate::java::JavaFrontEnd;
pub use crate::problem::{Problem, ProblemCategory, ProblemId, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub path: Utf8PathBuf,
    pub text: String,
    pub level: LanguageLevel,
}

impl SourceInput {
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>, level: LanguageLevel) -> Self {
        Self { path: path.into(), text: text.into(), level }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUnit {
    pub unit: ast::CompilationUnit,
    pub bindings: Bindings,
    pub problems: Vec<Problem>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontEndError {
    #[error("front-end failed on {path}: {message}")]
    Failed { path: Utf8PathBuf, message: String },
    #[error("batch aborted after {accepted} files: {message}")]
    BatchAborted { accepted: usize, message: String },
}

pub trait FrontEnd {
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn parse(&self, input: &SourceInput) -> Result<ParsedUnit, FrontEndError>;

    /// Parses `inputs`, handing each result to `accept` with its index as soon
    /// as it is available. On error, units already accepted stay valid.
    fn parse_batch(
        &self,
        inputs: &[SourceInput],
        accept: &mut dyn FnMut(usize, ParsedUnit),
    ) -> Result<(), FrontEndError> {
        for (index, input) in inputs.iter().enumerate() {
            accept(index, self.parse(input)?);
        }
        Ok(())
    }
}
