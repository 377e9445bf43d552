use javelin_frontend::FrontEndError;
use javelin_syntax::{SyntaxKind, TextRange, TextSize, TreeError};
use javelin_tokenizer::LexError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("{message} at {line}:{column}")]
    Syntax { message: String, line: u32, column: u32, range: TextRange },
    /// The front-end tree and the token stream disagree.
    #[error("cannot build {node:?} at {offset:?}: {reason}")]
    StructuralMismatch { node: SyntaxKind, offset: TextSize, reason: Mismatch },
    #[error(transparent)]
    FrontEnd(#[from] FrontEndError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("expected {0:?}")]
    MissingToken(SyntaxKind),
    #[error("the range holds no token")]
    NoTokens,
    #[error("children overlap or leave the parent range")]
    Overlap,
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ConvertError {
    pub(crate) fn missing(node: SyntaxKind, offset: TextSize, expected: SyntaxKind) -> Self {
        Self::StructuralMismatch { node, offset, reason: Mismatch::MissingToken(expected) }
    }

    /// Where in the file the error was found, if anywhere.
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::Lex(error) => Some(TextRange::empty(error.offset)),
            Self::Syntax { range, .. } => Some(*range),
            Self::StructuralMismatch { offset, .. } => Some(TextRange::empty(*offset)),
            Self::FrontEnd(_) => None,
        }
    }
}

impl From<TreeError> for ConvertError {
    fn from(error: TreeError) -> Self {
        let node = match error {
            TreeError::EmptyNode { kind }
            | TreeError::OrphanNode { kind }
            | TreeError::SharedNode { kind }
            | TreeError::OutOfOrder { kind, .. } => kind,
            TreeError::UnownedToken { .. }
            | TreeError::SharedToken { .. }
            | TreeError::UnsortedTokens { .. }
            | TreeError::MissingEof => SyntaxKind::COMPILATION_UNIT,
        };
        let offset = error.offset().unwrap_or_default();
        Self::StructuralMismatch { node, offset, reason: Mismatch::Tree(error) }
    }
}
