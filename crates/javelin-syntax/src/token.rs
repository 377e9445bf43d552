//! Tokens and the comments attached to them.

use std::fmt;

use text_size::{TextRange, TextSize};

use crate::SyntaxKind;

/// 1-based line, 0-based column counted in characters.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const START: Self = Self { line: 1, column: 0 };

    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Position reached after `text` starting from `self`.
    ///
    /// `\r\n`, `\n` and a lone `\r` each end a line.
    pub fn advance(self, text: &str) -> Self {
        let mut position = self;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' | '\r' => {
                    position.line += 1;
                    position.column = 0;
                }
                _ => position.column += 1,
            }
        }
        position
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Index of a significant token in a [`SyntaxTree`](crate::SyntaxTree), in source order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TokenId(u32);

impl TokenId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaKind {
    Line,
    Block,
    Doc,
    MarkdownDoc,
}

impl TriviaKind {
    /// Comment kind for a trivia token kind; whitespace has none.
    pub fn from_syntax_kind(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::LINE_COMMENT => Self::Line,
            SyntaxKind::BLOCK_COMMENT => Self::Block,
            SyntaxKind::DOC_COMMENT => Self::Doc,
            SyntaxKind::MARKDOWN_DOC_COMMENT => Self::MarkdownDoc,
            _ => return None,
        })
    }
}

/// A comment attached to the token that follows it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: Box<str>,
    pub range: TextRange,
    pub position: Position,
}

/// A significant token with its exact text and location.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    kind: SyntaxKind,
    text: Box<str>,
    range: TextRange,
    position: Position,
    trivia: Box<[Trivia]>,
}

impl Token {
    pub fn new(
        kind: SyntaxKind,
        text: impl Into<Box<str>>,
        range: TextRange,
        position: Position,
        trivia: Vec<Trivia>,
    ) -> Self {
        debug_assert!(kind.is_token() && !kind.is_trivia(), "{kind:?} is not a significant token");
        Self { kind, text: text.into(), range, position, trivia: trivia.into_boxed_slice() }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn text_range(&self) -> TextRange {
        self.range
    }

    #[inline]
    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    #[inline]
    pub fn end(&self) -> TextSize {
        self.range.end()
    }

    /// 1-based line of the first character.
    #[inline]
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// 0-based column of the first character.
    #[inline]
    pub fn column(&self) -> u32 {
        self.position.column
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Position just past the last character.
    pub fn end_position(&self) -> Position {
        self.position.advance(&self.text)
    }

    /// Comments preceding this token, in source order.
    #[inline]
    pub fn trivia(&self) -> &[Trivia] {
        &self.trivia
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == SyntaxKind::EOF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_over_line_breaks() {
        let start = Position::new(3, 4);
        assert_eq!(start.advance("abc"), Position::new(3, 7));
        assert_eq!(start.advance("a\nbc"), Position::new(4, 2));
        assert_eq!(start.advance("\r\n"), Position::new(4, 0));
        assert_eq!(start.advance("\r\rx"), Position::new(5, 1));
        assert_eq!(start.advance("é"), Position::new(3, 5));
    }

    #[test]
    fn text_block_end_position() {
        let text = "\"\"\"\n  hi\n  \"\"\"";
        let range = TextRange::at(TextSize::from(10), TextSize::of(text));
        let token = Token::new(SyntaxKind::TEXT_BLOCK, text, range, Position::new(2, 8), Vec::new());
        assert_eq!(token.end_position(), Position::new(4, 5));
        assert!(!token.is_eof());
        assert!(token.trivia().is_empty());
    }
}
