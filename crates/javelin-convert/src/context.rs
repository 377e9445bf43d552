use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use javelin_frontend::Problem;
use javelin_semantic::SemanticModel;
use javelin_syntax::SyntaxTree;

use crate::Warning;

/// Everything rules get to see about one converted file. Read-only.
pub struct FileContext {
    path: Utf8PathBuf,
    tree: SyntaxTree,
    semantic: SemanticModel,
    warnings: Vec<Warning>,
    semantic_errors: Vec<Problem>,
}

impl FileContext {
    pub(crate) fn new(
        path: Utf8PathBuf,
        tree: SyntaxTree,
        semantic: SemanticModel,
        warnings: Vec<Warning>,
        semantic_errors: Vec<Problem>,
    ) -> Self {
        Self { path, tree, semantic, warnings, semantic_errors }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn semantic(&self) -> &SemanticModel {
        &self.semantic
    }

    /// Front-end warnings, each attached to a node.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn semantic_errors(&self) -> &[Problem] {
        &self.semantic_errors
    }

    /// The front-end could not resolve everything; rules relying on types or
    /// bindings should stay quiet.
    pub fn has_incomplete_semantics(&self) -> bool {
        !self.semantic_errors.is_empty()
    }
}

impl fmt::Debug for FileContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileContext")
            .field("path", &self.path)
            .field("nodes", &self.tree.node_count())
            .field("semantic", &self.semantic)
            .field("warnings", &self.warnings.len())
            .field("semantic_errors", &self.semantic_errors.len())
            .finish()
    }
}
