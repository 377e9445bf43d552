//! Java tokenizer producing a gap-free stream of raw tokens.
//!
//! Whitespace and comments are tokens here; folding them into the following
//! significant token is left to the consumer. The stream always ends with a
//! zero-width `EOF`.

mod cursor;

use cursor::{Cursor, EOF_CHAR};
use javelin_syntax::SyntaxKind::{self, *};
use javelin_syntax::{Feature, LanguageLevel, Position};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub position: Position,
}

/// Tokens of one source text, in order and without gaps.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    text: &'a str,
    tokens: Vec<RawToken>,
}

impl<'a> TokenStream<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn tokens(&self) -> &[RawToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RawToken> {
        self.tokens.get(index)
    }

    pub fn text_of(&self, token: &RawToken) -> &'a str {
        &self.text[token.range]
    }

    /// Non-trivia tokens with their raw indices, `EOF` included.
    pub fn significant(&self) -> impl Iterator<Item = (usize, &RawToken)> {
        self.tokens.iter().enumerate().filter(|(_, token)| !token.kind.is_trivia())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("unterminated text block")]
    UnterminatedTextBlock,
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {position}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: TextSize,
    pub position: Position,
}

/// Tokenizes `text` at the given language level.
pub fn tokenize(text: &str, level: LanguageLevel) -> Result<TokenStream<'_>, LexError> {
    let mut tokenizer = Tokenizer::new(text, level);
    let mut tokens = Vec::with_capacity(text.len() / 4 + 1);
    loop {
        let token = tokenizer.next_token()?;
        tokens.push(token);
        if token.kind == EOF {
            return Ok(TokenStream { text, tokens });
        }
    }
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    level: LanguageLevel,
    start: TextSize,
    start_position: Position,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str, level: LanguageLevel) -> Self {
        Self {
            text,
            cursor: Cursor::new(text),
            level,
            start: TextSize::new(0),
            start_position: Position::START,
        }
    }

    fn text(&self) -> &'a str {
        &self.text[TextRange::new(self.start, self.cursor.offset())]
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError { kind, offset: self.start, position: self.start_position }
    }

    pub fn next_token(&mut self) -> Result<RawToken, LexError> {
        self.start = self.cursor.offset();
        self.start_position = self.cursor.position();
        let kind = self.syntax_kind()?;
        Ok(RawToken {
            kind,
            range: TextRange::new(self.start, self.cursor.offset()),
            position: self.start_position,
        })
    }

    fn syntax_kind(&mut self) -> Result<SyntaxKind, LexError> {
        if self.cursor.is_eof() {
            return Ok(EOF);
        }

        let kind = match self.cursor.advance() {
            c if is_whitespace(c) => {
                self.cursor.advance_while(is_whitespace);
                WHITESPACE
            }
            '/' => match self.cursor.peek() {
                '/' => {
                    self.cursor.advance();
                    let markdown = self.cursor.matches('/')
                        && self.level.supports(Feature::MarkdownDocComments);
                    self.cursor.advance_while(|c| c != '\n' && c != '\r');
                    if markdown { MARKDOWN_DOC_COMMENT } else { LINE_COMMENT }
                }
                '*' => {
                    self.cursor.advance();
                    let doc = self.cursor.matches('*') && self.cursor.second() != '/';
                    self.block_comment_end()?;
                    if doc { DOC_COMMENT } else { BLOCK_COMMENT }
                }
                '=' => self.bump_as(1, SLASH_EQ),
                _ => SLASH,
            },
            '(' => L_PAREN,
            ')' => R_PAREN,
            '{' => L_BRACE,
            '}' => R_BRACE,
            '[' => L_BRACKET,
            ']' => R_BRACKET,
            ';' => SEMICOLON,
            ',' => COMMA,
            '@' => AT,
            '~' => TILDE,
            '?' => QUESTION,
            '.' => match self.cursor.peek() {
                '0'..='9' => self.number('.'),
                '.' if self.cursor.second() == '.' => self.bump_as(2, ELLIPSIS),
                _ => DOT,
            },
            ':' => self.one_of(&[("::", COLON_COLON)], COLON),
            '=' => self.one_of(&[("==", EQ2)], EQ),
            '!' => self.one_of(&[("!=", BANG_EQ)], BANG),
            '<' => self.one_of(&[("<<=", SHL_EQ), ("<<", SHL), ("<=", LT_EQ)], LT),
            '>' => self.one_of(
                &[(">>>=", USHR_EQ), (">>>", USHR), (">>=", SHR_EQ), (">>", SHR), (">=", GT_EQ)],
                GT,
            ),
            '&' => self.one_of(&[("&&", AMP2), ("&=", AMP_EQ)], AMP),
            '|' => self.one_of(&[("||", PIPE2), ("|=", PIPE_EQ)], PIPE),
            '+' => self.one_of(&[("++", PLUS2), ("+=", PLUS_EQ)], PLUS),
            '-' => self.one_of(&[("--", MINUS2), ("-=", MINUS_EQ), ("->", ARROW)], MINUS),
            '*' => self.one_of(&[("*=", STAR_EQ)], STAR),
            '^' => self.one_of(&[("^=", CARET_EQ)], CARET),
            '%' => self.one_of(&[("%=", PERCENT_EQ)], PERCENT),
            '\'' => self.char_literal()?,
            '"' => self.string_literal()?,
            c @ '0'..='9' => self.number(c),
            c if is_ident_start(c) => {
                self.cursor.advance_while(is_ident_continue);
                self.keyword_or_ident()
            }
            c => return Err(self.error(LexErrorKind::UnexpectedCharacter(c))),
        };
        Ok(kind)
    }

    fn bump_as(&mut self, n: usize, kind: SyntaxKind) -> SyntaxKind {
        self.cursor.bump(n);
        kind
    }

    /// Longest operator among `candidates`, which start at the character just
    /// consumed and are listed longest first.
    fn one_of(&mut self, candidates: &[(&str, SyntaxKind)], single: SyntaxKind) -> SyntaxKind {
        let rest = self.cursor.rest();
        for &(operator, kind) in candidates {
            // The first character is already consumed.
            if rest.starts_with(&operator[1..]) {
                return self.bump_as(operator.len() - 1, kind);
            }
        }
        single
    }

    fn block_comment_end(&mut self) -> Result<(), LexError> {
        loop {
            match self.cursor.advance() {
                '*' if self.cursor.matches('/') => {
                    self.cursor.advance();
                    return Ok(());
                }
                EOF_CHAR if self.cursor.is_eof() => {
                    return Err(self.error(LexErrorKind::UnterminatedBlockComment));
                }
                _ => {}
            }
        }
    }

    fn char_literal(&mut self) -> Result<SyntaxKind, LexError> {
        self.quoted('\'', LexErrorKind::UnterminatedChar)?;
        Ok(CHAR_LITERAL)
    }

    fn string_literal(&mut self) -> Result<SyntaxKind, LexError> {
        if self.cursor.peek() == '"'
            && self.cursor.second() == '"'
            && self.level.supports(Feature::TextBlocks)
        {
            self.cursor.bump(2);
            return self.text_block();
        }
        self.quoted('"', LexErrorKind::UnterminatedString)?;
        Ok(STRING_LITERAL)
    }

    fn quoted(&mut self, quote: char, unterminated: LexErrorKind) -> Result<(), LexError> {
        loop {
            if self.cursor.is_eof() {
                return Err(self.error(unterminated));
            }
            match self.cursor.advance() {
                '\\' => {
                    if matches!(self.cursor.peek(), '\n' | '\r') {
                        return Err(self.error(unterminated));
                    }
                    self.cursor.advance();
                }
                '\n' | '\r' => return Err(self.error(unterminated)),
                c if c == quote => return Ok(()),
                _ => {}
            }
        }
    }

    fn text_block(&mut self) -> Result<SyntaxKind, LexError> {
        loop {
            if self.cursor.is_eof() {
                return Err(self.error(LexErrorKind::UnterminatedTextBlock));
            }
            match self.cursor.advance() {
                '\\' => {
                    self.cursor.advance();
                }
                '"' if self.cursor.peek() == '"' && self.cursor.second() == '"' => {
                    self.cursor.bump(2);
                    return Ok(TEXT_BLOCK);
                }
                _ => {}
            }
        }
    }

    fn keyword_or_ident(&self) -> SyntaxKind {
        match self.text() {
            "abstract" => ABSTRACT_KW,
            "assert" if self.level.supports(Feature::AssertKeyword) => ASSERT_KW,
            "boolean" => BOOLEAN_KW,
            "break" => BREAK_KW,
            "byte" => BYTE_KW,
            "case" => CASE_KW,
            "catch" => CATCH_KW,
            "char" => CHAR_KW,
            "class" => CLASS_KW,
            "const" => CONST_KW,
            "continue" => CONTINUE_KW,
            "default" => DEFAULT_KW,
            "do" => DO_KW,
            "double" => DOUBLE_KW,
            "else" => ELSE_KW,
            "enum" if self.level.supports(Feature::EnumKeyword) => ENUM_KW,
            "extends" => EXTENDS_KW,
            "final" => FINAL_KW,
            "finally" => FINALLY_KW,
            "float" => FLOAT_KW,
            "for" => FOR_KW,
            "goto" => GOTO_KW,
            "if" => IF_KW,
            "implements" => IMPLEMENTS_KW,
            "import" => IMPORT_KW,
            "instanceof" => INSTANCEOF_KW,
            "int" => INT_KW,
            "interface" => INTERFACE_KW,
            "long" => LONG_KW,
            "native" => NATIVE_KW,
            "new" => NEW_KW,
            "package" => PACKAGE_KW,
            "private" => PRIVATE_KW,
            "protected" => PROTECTED_KW,
            "public" => PUBLIC_KW,
            "return" => RETURN_KW,
            "short" => SHORT_KW,
            "static" => STATIC_KW,
            "strictfp" => STRICTFP_KW,
            "super" => SUPER_KW,
            "switch" => SWITCH_KW,
            "synchronized" => SYNCHRONIZED_KW,
            "this" => THIS_KW,
            "throw" => THROW_KW,
            "throws" => THROWS_KW,
            "transient" => TRANSIENT_KW,
            "try" => TRY_KW,
            "void" => VOID_KW,
            "volatile" => VOLATILE_KW,
            "while" => WHILE_KW,
            "_" if self.level.supports(Feature::UnderscoreKeyword) => UNDERSCORE_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            "null" => NULL_KW,
            _ => IDENT,
        }
    }

    /// `first` is the character already consumed: a digit or a leading `.`.
    fn number(&mut self, first: char) -> SyntaxKind {
        if first == '.' {
            self.digits(false);
            self.exponent('e');
            return self.float_suffix();
        }

        let mut floating = false;
        if first == '0' {
            match self.cursor.peek() {
                'x' | 'X' => {
                    self.cursor.advance();
                    self.digits(true);
                    if self.cursor.matches('.') {
                        self.cursor.advance();
                        self.digits(true);
                        floating = true;
                    }
                    floating |= self.exponent('p');
                    return if floating { self.float_suffix() } else { self.int_suffix() };
                }
                'b' | 'B' => {
                    self.cursor.advance();
                    self.digits(false);
                    return self.int_suffix();
                }
                _ => {}
            }
        }

        self.digits(false);
        if self.cursor.matches('.') && self.cursor.second() != '.' {
            self.cursor.advance();
            self.digits(false);
            floating = true;
        }
        floating |= self.exponent('e');
        if floating || matches!(self.cursor.peek(), 'f' | 'F' | 'd' | 'D') {
            self.float_suffix()
        } else {
            self.int_suffix()
        }
    }

    fn digits(&mut self, hex: bool) {
        self.cursor.advance_while(|c| {
            c == '_' || (if hex { c.is_ascii_hexdigit() } else { c.is_ascii_digit() })
        });
    }

    /// Consumes an exponent introduced by `marker` (either case).
    fn exponent(&mut self, marker: char) -> bool {
        if !self.cursor.peek().eq_ignore_ascii_case(&marker) {
            return false;
        }
        self.cursor.advance();
        if matches!(self.cursor.peek(), '+' | '-') {
            self.cursor.advance();
        }
        self.digits(false);
        true
    }

    fn int_suffix(&mut self) -> SyntaxKind {
        if matches!(self.cursor.peek(), 'l' | 'L') {
            self.bump_as(1, LONG_LITERAL)
        } else {
            INT_LITERAL
        }
    }

    fn float_suffix(&mut self) -> SyntaxKind {
        match self.cursor.peek() {
            'f' | 'F' => self.bump_as(1, FLOAT_LITERAL),
            'd' | 'D' => self.bump_as(1, DOUBLE_LITERAL),
            _ => DOUBLE_LITERAL,
        }
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

#[cfg(test)]
mod tests;
