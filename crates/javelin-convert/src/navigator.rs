//! Significant tokens of one file, searchable by offset.
//!
//! Comments are folded into the token that follows them. Lexed operators
//! that glue closing generic brackets together (`>>`, `>>>=`, ...) are split
//! wherever a type argument list ends inside them.

use javelin_syntax::{Position, SyntaxKind, TextRange, TextSize, Token, TokenId, Trivia, TriviaKind};
use javelin_tokenizer::{RawToken, TokenStream};

use crate::ConvertError;

pub struct Navigator {
    tokens: Vec<Token>,
}

impl Navigator {
    /// `splits` are the end offsets of every type argument and type
    /// parameter list, in any order.
    pub fn new(stream: &TokenStream<'_>, splits: &[TextSize]) -> Self {
        let mut splits = splits.to_vec();
        splits.sort_unstable();
        splits.dedup();

        let mut tokens = Vec::with_capacity(stream.len() / 2 + 1);
        for (index, raw) in stream.significant() {
            let trivia = comments_before(stream, index);
            let inside = splits_inside(&splits, raw);
            if inside.is_empty() || !raw.kind.starts_with_gt() {
                tokens.push(Token::new(raw.kind, stream.text_of(raw), raw.range, raw.position, trivia));
                continue;
            }
            split_token(stream, raw, inside, trivia, &mut tokens);
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    pub fn eof(&self) -> TokenId {
        TokenId::new(self.tokens.len().saturating_sub(1) as u32)
    }

    /// Tokens a node can own; the trailing `EOF` belongs to the root only.
    fn searchable(&self) -> &[Token] {
        match self.tokens.split_last() {
            Some((last, rest)) if last.is_eof() => rest,
            _ => &self.tokens,
        }
    }

    /// Index of the first token starting at or after `offset`.
    fn lower_bound(&self, offset: TextSize) -> usize {
        self.searchable().partition_point(|token| token.start() < offset)
    }

    /// Index one past the last token ending at or before `offset`.
    fn upper_bound(&self, offset: TextSize) -> usize {
        self.searchable().partition_point(|token| token.end() <= offset)
    }

    /// First token of `kind` inside `range`.
    pub fn first_token_in(
        &self,
        node: SyntaxKind,
        range: TextRange,
        kind: SyntaxKind,
    ) -> Result<TokenId, ConvertError> {
        let tokens = self.searchable();
        (self.lower_bound(range.start())..tokens.len())
            .take_while(|&index| tokens[index].end() <= range.end())
            .find(|&index| tokens[index].kind() == kind)
            .map(id)
            .ok_or_else(|| ConvertError::missing(node, range.start(), kind))
    }

    /// Last token of `kind` inside `range`.
    pub fn last_token_in(
        &self,
        node: SyntaxKind,
        range: TextRange,
        kind: SyntaxKind,
    ) -> Result<TokenId, ConvertError> {
        let tokens = self.searchable();
        (0..self.upper_bound(range.end()))
            .rev()
            .take_while(|&index| tokens[index].start() >= range.start())
            .find(|&index| tokens[index].kind() == kind)
            .map(id)
            .ok_or_else(|| ConvertError::missing(node, range.end(), kind))
    }

    pub fn first_token_in_any(&self, range: TextRange) -> Option<TokenId> {
        let index = self.lower_bound(range.start());
        let token = self.searchable().get(index)?;
        (token.end() <= range.end()).then(|| id(index))
    }

    pub fn last_token_in_any(&self, range: TextRange) -> Option<TokenId> {
        let index = self.upper_bound(range.end()).checked_sub(1)?;
        (self.tokens[index].start() >= range.start()).then(|| id(index))
    }

    /// Nearest token ending at or before `offset`.
    pub fn first_token_before(&self, offset: TextSize) -> Option<TokenId> {
        self.upper_bound(offset).checked_sub(1).map(id)
    }

    /// Nearest token starting at or after `offset`, `EOF` included.
    pub fn first_token_after(&self, offset: TextSize) -> Option<TokenId> {
        let index = self.tokens.partition_point(|token| token.start() < offset);
        (index < self.tokens.len()).then(|| id(index))
    }

    /// Token covering `offset`.
    pub fn token_at(&self, offset: TextSize) -> Option<TokenId> {
        let index = self.upper_bound(offset);
        let token = self.searchable().get(index)?;
        (token.start() <= offset).then(|| id(index))
    }
}

fn id(index: usize) -> TokenId {
    TokenId::new(index as u32)
}

/// Comments directly preceding the raw token at `index`, in source order.
fn comments_before(stream: &TokenStream<'_>, index: usize) -> Vec<Trivia> {
    let mut comments = Vec::new();
    for raw in stream.tokens()[..index].iter().rev().take_while(|raw| raw.kind.is_trivia()) {
        if let Some(kind) = TriviaKind::from_syntax_kind(raw.kind) {
            let text = stream.text_of(raw).into();
            comments.push(Trivia { kind, text, range: raw.range, position: raw.position });
        }
    }
    comments.reverse();
    comments
}

fn splits_inside<'s>(splits: &'s [TextSize], raw: &RawToken) -> &'s [TextSize] {
    let from = splits.partition_point(|&offset| offset <= raw.range.start());
    let to = splits.partition_point(|&offset| offset < raw.range.end());
    &splits[from..to]
}

/// Pushes the pieces of `raw` cut at every offset in `inside`. The first
/// piece keeps the comments.
fn split_token(
    stream: &TokenStream<'_>,
    raw: &RawToken,
    inside: &[TextSize],
    trivia: Vec<Trivia>,
    out: &mut Vec<Token>,
) {
    let bounds: Vec<TextSize> = std::iter::once(raw.range.start())
        .chain(inside.iter().copied())
        .chain([raw.range.end()])
        .collect();
    let pieces: Option<Vec<(SyntaxKind, TextRange)>> = bounds
        .windows(2)
        .map(|pair| {
            let range = TextRange::new(pair[0], pair[1]);
            SyntaxKind::from_gt_text(&stream.text()[range]).map(|kind| (kind, range))
        })
        .collect();
    let Some(pieces) = pieces else {
        out.push(Token::new(raw.kind, stream.text_of(raw), raw.range, raw.position, trivia));
        return;
    };

    let mut trivia = Some(trivia);
    for (kind, range) in pieces {
        let shift = u32::from(range.start() - raw.range.start());
        let position = Position::new(raw.position.line, raw.position.column + shift);
        let text = &stream.text()[range];
        out.push(Token::new(kind, text, range, position, trivia.take().unwrap_or_default()));
    }
}

#[cfg(test)]
mod tests {
    use javelin_syntax::LanguageLevel;
    use javelin_syntax::SyntaxKind::*;

    use super::*;

    fn navigator(text: &str, splits: &[u32]) -> Navigator {
        let stream = javelin_tokenizer::tokenize(text, LanguageLevel::default()).unwrap();
        let splits: Vec<TextSize> = splits.iter().copied().map(TextSize::from).collect();
        Navigator::new(&stream, &splits)
    }

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::from(start), TextSize::from(end))
    }

    fn kinds(nav: &Navigator) -> Vec<SyntaxKind> {
        nav.tokens().iter().map(Token::kind).collect()
    }

    #[test]
    fn comments_attach_to_the_next_token() {
        let nav = navigator("// a\n/* b */ x /** c */;", &[]);
        assert_eq!(kinds(&nav), [IDENT, SEMICOLON, EOF]);

        let x = &nav.tokens()[0];
        let texts: Vec<&str> = x.trivia().iter().map(|trivia| &*trivia.text).collect();
        assert_eq!(texts, ["// a", "/* b */"]);
        assert_eq!(x.trivia()[1].position, Position::new(2, 0));
        assert_eq!(nav.tokens()[1].trivia()[0].kind, TriviaKind::Doc);
        assert!(nav.tokens()[2].trivia().is_empty());
    }

    #[test]
    fn nested_generic_close_is_split() {
        //         0         1         2
        //         0123456789012345678901234
        let text = "List<List<String>> x;";
        let nav = navigator(text, &[17, 18]);
        assert_eq!(kinds(&nav), [IDENT, LT, IDENT, LT, IDENT, GT, GT, IDENT, SEMICOLON, EOF]);
        assert_eq!(nav.tokens()[5].text_range(), range(16, 17));
        assert_eq!(nav.tokens()[6].text_range(), range(17, 18));
        assert_eq!(nav.tokens()[6].column(), 17);
        assert_eq!(nav.tokens()[6].text(), ">");
    }

    #[test]
    fn split_keeps_comments_on_the_leading_half() {
        let nav = navigator("A<B<C<D/*x*/>>>= y", &[13, 14]);
        let pieces: Vec<(SyntaxKind, &str, usize)> = nav.tokens()[7..10]
            .iter()
            .map(|token| (token.kind(), token.text(), token.trivia().len()))
            .collect();
        assert_eq!(pieces, [(GT, ">", 1), (GT, ">", 0), (GT_EQ, ">=", 0)]);
    }

    #[test]
    fn shift_operator_stays_whole() {
        let nav = navigator("a >> b", &[]);
        assert_eq!(kinds(&nav), [IDENT, SHR, IDENT, EOF]);
    }

    #[test]
    fn searches_within_ranges() {
        //                   0         1
        //                   0123456789012345
        let nav = navigator("if (a) { b; } c;", &[]);
        let whole = range(0, 13);

        assert_eq!(nav.first_token_in(IF_STATEMENT, whole, L_BRACE).unwrap(), TokenId::new(4));
        assert_eq!(nav.last_token_in(IF_STATEMENT, whole, SEMICOLON).unwrap(), TokenId::new(6));
        assert_eq!(
            nav.first_token_in(IF_STATEMENT, whole, ELSE_KW),
            Err(ConvertError::missing(IF_STATEMENT, TextSize::from(0), ELSE_KW))
        );
        assert_eq!(nav.first_token_in_any(range(1, 6)), Some(TokenId::new(1)));
        assert_eq!(nav.last_token_in_any(range(1, 6)), Some(TokenId::new(3)));
        assert_eq!(nav.first_token_in_any(range(6, 7)), None);
        assert_eq!(nav.first_token_before(TextSize::from(7)), Some(TokenId::new(3)));
        assert_eq!(nav.first_token_after(TextSize::from(13)), Some(TokenId::new(8)));
        assert_eq!(nav.token_at(TextSize::from(4)), Some(TokenId::new(2)));
        assert_eq!(nav.token_at(TextSize::from(6)), None);
    }

    #[test]
    fn eof_is_only_reachable_from_after() {
        let nav = navigator("x", &[]);
        assert_eq!(nav.last_token_in_any(range(0, 1)), Some(TokenId::new(0)));
        assert_eq!(nav.first_token_in_any(range(1, 1)), None);
        assert_eq!(nav.first_token_after(TextSize::from(1)), Some(nav.eof()));
    }
}
