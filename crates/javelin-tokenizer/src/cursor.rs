use std::str::Chars;

use javelin_syntax::Position;
use text_size::TextSize;

pub(crate) const EOF_CHAR: char = '\0';

/// Character cursor that tracks the byte offset, line and column of the
/// next character.
pub(crate) struct Cursor<'a> {
    chars: Chars<'a>,
    text_len: usize,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { chars: text.chars(), text_len: text.len(), position: Position::START }
    }

    pub(crate) fn offset(&self) -> TextSize {
        TextSize::new((self.text_len - self.chars.as_str().len()) as u32)
    }

    pub(crate) fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn matches(&self, c: char) -> bool {
        !self.is_eof() && self.peek() == c
    }

    pub(crate) fn advance(&mut self) -> char {
        let Some(c) = self.chars.next() else {
            return EOF_CHAR;
        };
        match c {
            '\r' if self.peek() == '\n' => {}
            '\n' | '\r' => {
                self.position.line += 1;
                self.position.column = 0;
            }
            _ => self.position.column += 1,
        }
        c
    }

    /// Advances `n` characters.
    pub(crate) fn bump(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }
}
