use javelin_syntax::SyntaxKind::{self, *};
use javelin_syntax::{Feature, LanguageLevel, TextRange, TextSize};
use javelin_tokenizer::TokenStream;

use crate::ast::Ident;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub(crate) message: String,
    pub(crate) range: TextRange,
}

pub(crate) type PResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, Copy)]
struct Tok {
    kind: SyntaxKind,
    range: TextRange,
}

/// Parser state to return to after a failed speculative parse.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    pos: usize,
    prev_end: TextSize,
    splits: usize,
}

/// Recursive-descent parser over the significant tokens of one file.
///
/// Lexed `>>`-style operators are split in place when a type argument list
/// closes inside them; every split is logged so that [`Parser::restore`] can
/// undo it.
pub(crate) struct Parser<'t> {
    text: &'t str,
    level: LanguageLevel,
    tokens: Vec<Tok>,
    pos: usize,
    prev_end: TextSize,
    splits: Vec<usize>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(stream: &TokenStream<'t>, level: LanguageLevel) -> Self {
        let tokens =
            stream.significant().map(|(_, token)| Tok { kind: token.kind, range: token.range }).collect();
        Self { text: stream.text(), level, tokens, pos: 0, prev_end: TextSize::new(0), splits: Vec::new() }
    }

    pub(crate) fn supports(&self, feature: Feature) -> bool {
        self.level.supports(feature)
    }

    fn tok(&self, n: usize) -> Tok {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens.get((self.pos + n).min(last)).copied().unwrap_or(Tok {
            kind: EOF,
            range: TextRange::empty(TextSize::of(self.text)),
        })
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.tok(0).kind
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.tok(n).kind
    }

    pub(crate) fn nth_text(&self, n: usize) -> &'t str {
        &self.text[self.tok(n).range]
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    /// Whether the current token is the identifier `word`, as used for
    /// contextual keywords like `record` and `yield`.
    pub(crate) fn at_contextual(&self, word: &str) -> bool {
        self.nth_contextual(0, word)
    }

    pub(crate) fn nth_contextual(&self, n: usize, word: &str) -> bool {
        self.nth(n) == IDENT && self.nth_text(n) == word
    }

    /// Start offset of the current token.
    pub(crate) fn start(&self) -> TextSize {
        self.tok(0).range.start()
    }

    /// Range from `start` to the end of the last consumed token.
    pub(crate) fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_end.max(start))
    }

    pub(crate) fn text(&self, range: TextRange) -> &'t str {
        &self.text[range]
    }

    pub(crate) fn advance(&mut self) -> TextRange {
        let tok = self.tok(0);
        if tok.kind != EOF {
            self.pos += 1;
            self.prev_end = tok.range.end();
        }
        tok.range
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> PResult<TextRange> {
        if self.at(kind) { Ok(self.advance()) } else { Err(self.expected(describe(kind))) }
    }

    pub(crate) fn ident(&mut self) -> PResult<Ident> {
        if self.at(IDENT) {
            let range = self.advance();
            Ok(Ident { range, text: self.text(range).to_owned() })
        } else {
            Err(self.expected("identifier"))
        }
    }

    /// Consumes one `>`, splitting a lexed `>>`, `>>>`, `>=`, `>>=` or `>>>=`.
    pub(crate) fn eat_gt(&mut self) -> PResult<TextRange> {
        let tok = self.tok(0);
        if tok.kind == GT {
            return Ok(self.advance());
        }
        if !tok.kind.starts_with_gt() {
            return Err(self.expected("'>'"));
        }

        let split = tok.range.start() + TextSize::new(1);
        let rest = TextRange::new(split, tok.range.end());
        let Some(rest_kind) = SyntaxKind::from_gt_text(self.text(rest)) else {
            return Err(self.expected("'>'"));
        };
        self.tokens[self.pos] = Tok { kind: GT, range: TextRange::new(tok.range.start(), split) };
        self.tokens.insert(self.pos + 1, Tok { kind: rest_kind, range: rest });
        self.splits.push(self.pos);
        Ok(self.advance())
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint { pos: self.pos, prev_end: self.prev_end, splits: self.splits.len() }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        while self.splits.len() > checkpoint.splits {
            let Some(index) = self.splits.pop() else { break };
            let second = self.tokens.remove(index + 1);
            let first = self.tokens[index];
            let range = first.range.cover(second.range);
            let kind = SyntaxKind::from_gt_text(self.text(range)).unwrap_or(first.kind);
            self.tokens[index] = Tok { kind, range };
        }
        self.pos = checkpoint.pos;
        self.prev_end = checkpoint.prev_end;
    }

    /// Runs `f`, rewinding if it fails.
    pub(crate) fn speculate<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.restore(checkpoint);
                None
            }
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError { message: message.into(), range: self.tok(0).range }
    }

    pub(crate) fn expected(&self, what: &str) -> SyntaxError {
        let tok = self.tok(0);
        if tok.kind == EOF {
            self.error(format!("Syntax error, insert {what} to complete the file"))
        } else {
            self.error(format!("Syntax error on token \"{}\", {what} expected", self.text(tok.range)))
        }
    }

    /// Index of the token closing the bracket opened at lookahead `n`.
    pub(crate) fn matching_close(&self, n: usize) -> Option<usize> {
        let open = self.nth(n);
        let close = match open {
            L_PAREN => R_PAREN,
            L_BRACKET => R_BRACKET,
            L_BRACE => R_BRACE,
            _ => return None,
        };
        let mut depth = 0usize;
        let mut index = n;
        loop {
            match self.nth(index) {
                EOF => return None,
                kind if kind == open => depth += 1,
                kind if kind == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
            index += 1;
        }
    }
}

fn describe(kind: SyntaxKind) -> &'static str {
    match kind {
        IDENT => "identifier",
        L_PAREN => "\"(\"",
        R_PAREN => "\")\"",
        L_BRACE => "\"{\"",
        R_BRACE => "\"}\"",
        L_BRACKET => "\"[\"",
        R_BRACKET => "\"]\"",
        SEMICOLON => "\";\"",
        COMMA => "\",\"",
        DOT => "\".\"",
        COLON => "\":\"",
        ARROW => "\"->\"",
        EQ => "\"=\"",
        LT => "\"<\"",
        GT => "\">\"",
        WHILE_KW => "\"while\"",
        CATCH_KW => "\"catch\"",
        CLASS_KW => "\"class\"",
        INTERFACE_KW => "\"interface\"",
        _ => "token",
    }
}

#[cfg(test)]
mod tests {
    use javelin_syntax::LanguageLevel;

    use super::*;

    #[test]
    fn split_and_restore() {
        let stream = javelin_tokenizer::tokenize("a >>> b", LanguageLevel::default()).unwrap();
        let mut p = Parser::new(&stream, LanguageLevel::default());
        p.advance();
        let checkpoint = p.checkpoint();

        assert_eq!(p.eat_gt().unwrap(), TextRange::new(TextSize::new(2), TextSize::new(3)));
        assert_eq!(p.peek_kind(), SHR);
        assert_eq!(p.eat_gt().unwrap(), TextRange::new(TextSize::new(3), TextSize::new(4)));
        assert_eq!(p.peek_kind(), GT);
        assert_eq!(p.range_from(TextSize::new(2)), TextRange::new(TextSize::new(2), TextSize::new(4)));

        p.restore(checkpoint);
        assert_eq!(p.peek_kind(), USHR);
        assert_eq!(p.nth(1), IDENT);
        assert_eq!(p.advance(), TextRange::new(TextSize::new(2), TextSize::new(5)));
    }

    #[test]
    fn expected_messages() {
        let stream = javelin_tokenizer::tokenize("x", LanguageLevel::default()).unwrap();
        let mut p = Parser::new(&stream, LanguageLevel::default());
        assert_eq!(p.expect(SEMICOLON).unwrap_err().message, "Syntax error on token \"x\", \";\" expected");
        p.advance();
        assert_eq!(
            p.expect(SEMICOLON).unwrap_err().message,
            "Syntax error, insert \";\" to complete the file"
        );
    }
}
