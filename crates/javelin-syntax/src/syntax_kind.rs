/// Unified kind for raw tokens, tree tokens and tree nodes.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u16)]
pub enum SyntaxKind {
    // trivia
    WHITESPACE,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DOC_COMMENT,
    MARKDOWN_DOC_COMMENT,

    IDENT,
    INT_LITERAL,
    LONG_LITERAL,
    FLOAT_LITERAL,
    DOUBLE_LITERAL,
    CHAR_LITERAL,
    STRING_LITERAL,
    TEXT_BLOCK,

    ABSTRACT_KW,
    ASSERT_KW,
    BOOLEAN_KW,
    BREAK_KW,
    BYTE_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EXTENDS_KW,
    FINAL_KW,
    FINALLY_KW,
    FLOAT_KW,
    FOR_KW,
    GOTO_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORT_KW,
    INSTANCEOF_KW,
    INT_KW,
    INTERFACE_KW,
    LONG_KW,
    NATIVE_KW,
    NEW_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    SHORT_KW,
    STATIC_KW,
    STRICTFP_KW,
    SUPER_KW,
    SWITCH_KW,
    SYNCHRONIZED_KW,
    THIS_KW,
    THROW_KW,
    THROWS_KW,
    TRANSIENT_KW,
    TRY_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,
    UNDERSCORE_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,

    L_PAREN,
    R_PAREN,
    L_BRACE,
    R_BRACE,
    L_BRACKET,
    R_BRACKET,
    SEMICOLON,
    COMMA,
    DOT,
    ELLIPSIS,
    AT,
    COLON_COLON,

    EQ,
    GT,
    LT,
    BANG,
    TILDE,
    QUESTION,
    COLON,
    ARROW,
    EQ2,
    LT_EQ,
    GT_EQ,
    BANG_EQ,
    AMP2,
    PIPE2,
    PLUS2,
    MINUS2,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    AMP,
    PIPE,
    CARET,
    PERCENT,
    SHL,
    SHR,
    USHR,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    PERCENT_EQ,
    SHL_EQ,
    SHR_EQ,
    USHR_EQ,

    EOF,

    // declarations
    COMPILATION_UNIT,
    PACKAGE_DECLARATION,
    IMPORT_DECLARATION,
    CLASS,
    INTERFACE,
    ENUM,
    RECORD,
    ENUM_CONSTANT,
    METHOD,
    CONSTRUCTOR,
    INITIALIZER,
    STATIC_INITIALIZER,
    VARIABLE,
    PARAMETER,
    PARAMETER_LIST,
    EMPTY_DECLARATION,
    MODIFIERS,
    ANNOTATION,
    TYPE_PARAMETERS,
    TYPE_PARAMETER,
    EXTENDS_CLAUSE,
    IMPLEMENTS_CLAUSE,
    PERMITS_CLAUSE,
    THROWS_CLAUSE,

    // types
    PRIMITIVE_TYPE,
    VAR_TYPE,
    CLASS_TYPE,
    PARAMETERIZED_TYPE,
    TYPE_ARGUMENTS,
    ARRAY_TYPE,
    WILDCARD_TYPE,
    UNION_TYPE,
    INTERSECTION_TYPE,
    ARRAY_DIMENSION,

    // statements
    BLOCK,
    EMPTY_STATEMENT,
    EXPRESSION_STATEMENT,
    IF_STATEMENT,
    WHILE_STATEMENT,
    DO_STATEMENT,
    FOR_STATEMENT,
    FOR_INIT,
    FOR_UPDATE,
    FOREACH_STATEMENT,
    RETURN_STATEMENT,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    YIELD_STATEMENT,
    LABELED_STATEMENT,
    THROW_STATEMENT,
    TRY_STATEMENT,
    RESOURCE_LIST,
    CATCH_CLAUSE,
    SWITCH_STATEMENT,
    CASE_GROUP,
    CASE_LABEL,
    SYNCHRONIZED_STATEMENT,
    ASSERT_STATEMENT,

    // expressions
    LITERAL,
    IDENTIFIER,
    MEMBER_SELECT,
    METHOD_INVOCATION,
    ARGUMENTS,
    NEW_CLASS,
    NEW_ARRAY,
    ARRAY_INITIALIZER,
    ARRAY_ACCESS,
    PREFIX_EXPRESSION,
    POSTFIX_EXPRESSION,
    BINARY_EXPRESSION,
    ASSIGNMENT,
    CONDITIONAL_EXPRESSION,
    INSTANCEOF_EXPRESSION,
    PATTERN,
    TYPE_CAST,
    PARENTHESIZED_EXPRESSION,
    CLASS_LITERAL,
    LAMBDA_EXPRESSION,
    METHOD_REFERENCE,
    SWITCH_EXPRESSION,
}

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE
                | Self::LINE_COMMENT
                | Self::BLOCK_COMMENT
                | Self::DOC_COMMENT
                | Self::MARKDOWN_DOC_COMMENT
        )
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        self.is_trivia() && self != Self::WHITESPACE
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (Self::ABSTRACT_KW..=Self::NULL_KW).contains(&self)
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_LITERAL
                | Self::LONG_LITERAL
                | Self::FLOAT_LITERAL
                | Self::DOUBLE_LITERAL
                | Self::CHAR_LITERAL
                | Self::STRING_LITERAL
                | Self::TEXT_BLOCK
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Tokens are everything up to and including `EOF`; the rest are nodes.
    #[inline]
    pub fn is_token(self) -> bool {
        self <= Self::EOF
    }

    #[inline]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Operators that a closing generic bracket can be glued into.
    #[inline]
    pub fn starts_with_gt(self) -> bool {
        matches!(self, Self::GT | Self::GT_EQ | Self::SHR | Self::USHR | Self::SHR_EQ | Self::USHR_EQ)
    }

    /// Kind of a token made only of `>` and `=` characters.
    pub fn from_gt_text(text: &str) -> Option<Self> {
        Some(match text {
            ">" => Self::GT,
            ">=" => Self::GT_EQ,
            ">>" => Self::SHR,
            ">>=" => Self::SHR_EQ,
            ">>>" => Self::USHR,
            ">>>=" => Self::USHR_EQ,
            "=" => Self::EQ,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SyntaxKind::*;

    #[test]
    fn classification() {
        assert!(DOC_COMMENT.is_trivia());
        assert!(!WHITESPACE.is_comment());
        assert!(ASSERT_KW.is_keyword());
        assert!(!IDENT.is_keyword());
        assert!(EOF.is_token());
        assert!(COMPILATION_UNIT.is_node());
        assert!(NULL_KW.is_literal());
    }

    #[test]
    fn gt_family() {
        assert_eq!(super::SyntaxKind::from_gt_text(">>"), Some(SHR));
        assert_eq!(super::SyntaxKind::from_gt_text(">="), Some(GT_EQ));
        assert_eq!(super::SyntaxKind::from_gt_text("<"), None);
        assert!(USHR_EQ.starts_with_gt());
    }
}
