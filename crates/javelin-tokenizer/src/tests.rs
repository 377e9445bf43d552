use super::*;

fn lex(text: &str) -> Vec<(SyntaxKind, &str)> {
    lex_at(text, LanguageLevel::default())
}

fn lex_at(text: &str, level: LanguageLevel) -> Vec<(SyntaxKind, &str)> {
    let stream = tokenize(text, level).unwrap();
    stream
        .tokens()
        .iter()
        .filter(|token| token.kind != WHITESPACE && token.kind != EOF)
        .map(|token| (token.kind, stream.text_of(token)))
        .collect()
}

#[test]
fn test_stream_is_gap_free() {
    let text = "class A { /* c */ int x = 1; } // end\n";
    let stream = tokenize(text, LanguageLevel::default()).unwrap();

    let mut offset = TextSize::new(0);
    for token in stream.tokens() {
        assert_eq!(token.range.start(), offset, "gap before {token:?}");
        offset = token.range.end();
    }
    assert_eq!(offset, TextSize::of(text));

    let eof = stream.tokens().last().unwrap();
    assert_eq!(eof.kind, EOF);
    assert!(eof.range.is_empty());
    assert_eq!(eof.position, Position::new(2, 0));
}

#[test]
fn test_positions() {
    let text = "int a;\r\n  é b;";
    let stream = tokenize(text, LanguageLevel::default()).unwrap();
    let positions: Vec<(SyntaxKind, Position)> = stream
        .significant()
        .map(|(_, token)| (token.kind, token.position))
        .collect();

    assert_eq!(
        positions,
        [
            (INT_KW, Position::new(1, 0)),
            (IDENT, Position::new(1, 4)),
            (SEMICOLON, Position::new(1, 5)),
            (IDENT, Position::new(2, 2)),
            (IDENT, Position::new(2, 4)),
            (SEMICOLON, Position::new(2, 5)),
            (EOF, Position::new(2, 6)),
        ]
    );
}

#[test]
fn test_shift_operators() {
    assert_eq!(lex("a >> b"), [(IDENT, "a"), (SHR, ">>"), (IDENT, "b")]);
    assert_eq!(lex("a>>>=b"), [(IDENT, "a"), (USHR_EQ, ">>>="), (IDENT, "b")]);
    assert_eq!(lex("a >>= b"), [(IDENT, "a"), (SHR_EQ, ">>="), (IDENT, "b")]);
    assert_eq!(lex("a >>> b"), [(IDENT, "a"), (USHR, ">>>"), (IDENT, "b")]);
    assert_eq!(lex("a<<=b"), [(IDENT, "a"), (SHL_EQ, "<<="), (IDENT, "b")]);
}

#[test]
fn test_generic_close_is_lexed_greedily() {
    assert_eq!(
        lex("List<List<String>> x;"),
        [
            (IDENT, "List"),
            (LT, "<"),
            (IDENT, "List"),
            (LT, "<"),
            (IDENT, "String"),
            (SHR, ">>"),
            (IDENT, "x"),
            (SEMICOLON, ";"),
        ]
    );
}

#[test]
fn test_punctuation() {
    assert_eq!(
        lex("String... a -> b::c"),
        [
            (IDENT, "String"),
            (ELLIPSIS, "..."),
            (IDENT, "a"),
            (ARROW, "->"),
            (IDENT, "b"),
            (COLON_COLON, "::"),
            (IDENT, "c"),
        ]
    );
    assert_eq!(
        lex("a.b != c && !d"),
        [
            (IDENT, "a"),
            (DOT, "."),
            (IDENT, "b"),
            (BANG_EQ, "!="),
            (IDENT, "c"),
            (AMP2, "&&"),
            (BANG, "!"),
            (IDENT, "d"),
        ]
    );
    assert_eq!(lex("i++ - --j"), [(IDENT, "i"), (PLUS2, "++"), (MINUS, "-"), (MINUS2, "--"), (IDENT, "j")]);
}

#[test]
fn test_integer_literals() {
    let inputs = [
        ("123", INT_LITERAL),
        ("0", INT_LITERAL),
        ("0b1010", INT_LITERAL),
        ("017", INT_LITERAL),
        ("0x1F", INT_LITERAL),
        ("1_000_000", INT_LITERAL),
        ("123L", LONG_LITERAL),
        ("0xFFl", LONG_LITERAL),
    ];

    for (input, expected_kind) in inputs {
        assert_eq!(lex(input), [(expected_kind, input)], "Input: '{input}'");
    }
}

#[test]
fn test_float_literals() {
    let inputs = [
        ("1.5", DOUBLE_LITERAL),
        ("1.", DOUBLE_LITERAL),
        (".5", DOUBLE_LITERAL),
        ("1e10", DOUBLE_LITERAL),
        ("1.0e-5", DOUBLE_LITERAL),
        ("2f", FLOAT_LITERAL),
        ("3.0F", FLOAT_LITERAL),
        ("4d", DOUBLE_LITERAL),
        ("0x1.8p1", DOUBLE_LITERAL),
        ("0x1p-2f", FLOAT_LITERAL),
    ];

    for (input, expected_kind) in inputs {
        assert_eq!(lex(input), [(expected_kind, input)], "Input: '{input}'");
    }
}

#[test]
fn test_char_and_string_literals() {
    assert_eq!(
        lex(r#"'a' '\'' "x\"y" """#),
        [(CHAR_LITERAL, "'a'"), (CHAR_LITERAL, r"'\''"), (STRING_LITERAL, r#""x\"y""#), (STRING_LITERAL, r#""""#)]
    );
}

#[test]
fn test_text_block() {
    let text = "String s = \"\"\"\n    hello \\\"\"\" world\n    \"\"\";";
    let tokens = lex(text);
    assert_eq!(tokens[3], (TEXT_BLOCK, "\"\"\"\n    hello \\\"\"\" world\n    \"\"\""));
    assert_eq!(tokens[4], (SEMICOLON, ";"));
}

#[test]
fn test_comments() {
    assert_eq!(
        lex("/** doc */ /* block */ /**/ // line\n/// markdown"),
        [
            (DOC_COMMENT, "/** doc */"),
            (BLOCK_COMMENT, "/* block */"),
            (BLOCK_COMMENT, "/**/"),
            (LINE_COMMENT, "// line"),
            (LINE_COMMENT, "/// markdown"),
        ]
    );
    assert_eq!(
        lex_at("/// markdown", LanguageLevel::JAVA_23),
        [(MARKDOWN_DOC_COMMENT, "/// markdown")]
    );
}

#[test]
fn test_level_dependent_keywords() {
    assert_eq!(lex_at("assert enum _", LanguageLevel::JAVA_1_4), [
        (ASSERT_KW, "assert"),
        (IDENT, "enum"),
        (IDENT, "_")
    ]);
    assert_eq!(lex_at("assert enum _", LanguageLevel::JAVA_8), [
        (ASSERT_KW, "assert"),
        (ENUM_KW, "enum"),
        (IDENT, "_")
    ]);
    assert_eq!(lex_at("assert enum _", LanguageLevel::JAVA_11), [
        (ASSERT_KW, "assert"),
        (ENUM_KW, "enum"),
        (UNDERSCORE_KW, "_")
    ]);
    assert_eq!(lex("var record yield"), [(IDENT, "var"), (IDENT, "record"), (IDENT, "yield")]);
}

#[test]
fn test_unicode_identifiers() {
    assert_eq!(lex("$x größe _y1"), [(IDENT, "$x"), (IDENT, "größe"), (IDENT, "_y1")]);
}

#[test]
fn test_errors() {
    let error = tokenize("int x; /* open", LanguageLevel::default()).unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnterminatedBlockComment);
    assert_eq!(error.offset, TextSize::new(7));
    assert_eq!(error.position, Position::new(1, 7));

    let error = tokenize("a = \"abc\nd\";", LanguageLevel::default()).unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnterminatedString);

    let error = tokenize("c = 'x", LanguageLevel::default()).unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnterminatedChar);

    let error = tokenize("s = \"\"\"\nabc", LanguageLevel::default()).unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnterminatedTextBlock);

    let error = tokenize("x\n  # y", LanguageLevel::default()).unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnexpectedCharacter('#'));
    assert_eq!(error.position, Position::new(2, 2));
    assert_eq!(error.to_string(), "unexpected character '#' at 2:2");
}
