//! Typed views over `SyntaxNode`s.
//!
//! Views never own data: each wraps a node handle and reads children on
//! demand. Sum types group node kinds so that consumers can `match`
//! exhaustively.

use crate::SyntaxKind::{self, *};
use crate::{DeclaredType, SyntaxNode, SyntaxToken};

pub trait AstNode<'a>: Sized {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>;

    fn syntax(self) -> SyntaxNode<'a>;
}

macro_rules! ast_node {
    ($($name:ident => $kind:ident),* $(,)?) => {$(
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a>(SyntaxNode<'a>);

        impl<'a> AstNode<'a> for $name<'a> {
            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                (syntax.kind() == $kind).then_some(Self(syntax))
            }

            fn syntax(self) -> SyntaxNode<'a> {
                self.0
            }
        }
    )*};
}

ast_node! {
    CompilationUnit => COMPILATION_UNIT,
    ImportDecl => IMPORT_DECLARATION,
    MethodDecl => METHOD,
    VariableDecl => VARIABLE,
    Parameter => PARAMETER,
    Identifier => IDENTIFIER,
    LabeledStmt => LABELED_STATEMENT,
    TypeCast => TYPE_CAST,
    Block => BLOCK,
}

fn child<'a, N: AstNode<'a>>(parent: SyntaxNode<'a>) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn name_of(parent: SyntaxNode<'_>) -> Option<SyntaxToken<'_>> {
    child::<Identifier<'_>>(parent).and_then(Identifier::token)
}

impl<'a> CompilationUnit<'a> {
    pub fn imports(self) -> impl Iterator<Item = ImportDecl<'a>> + 'a {
        self.0.children().filter_map(ImportDecl::cast)
    }

    pub fn types(self) -> impl Iterator<Item = TypeDecl<'a>> + 'a {
        self.0.children().filter_map(TypeDecl::cast)
    }
}

impl<'a> ImportDecl<'a> {
    pub fn is_static(self) -> bool {
        self.0.token_of_kind(STATIC_KW).is_some()
    }

    pub fn is_on_demand(self) -> bool {
        self.0.token_of_kind(STAR).is_some()
    }
}

impl<'a> Identifier<'a> {
    /// The identifier, `this` or `super` token.
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0.child_tokens().next()
    }

    pub fn text(self) -> &'a str {
        self.token().map_or("", SyntaxToken::text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Record,
}

/// Class, interface, enum, record or anonymous class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDecl<'a>(SyntaxNode<'a>);

impl<'a> AstNode<'a> for TypeDecl<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        matches!(syntax.kind(), CLASS | INTERFACE | ENUM | RECORD).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'a> {
        self.0
    }
}

impl<'a> TypeDecl<'a> {
    pub fn kind(self) -> TypeDeclKind {
        match self.0.kind() {
            INTERFACE => TypeDeclKind::Interface,
            ENUM => TypeDeclKind::Enum,
            RECORD => TypeDeclKind::Record,
            _ => TypeDeclKind::Class,
        }
    }

    /// `None` for anonymous class bodies.
    pub fn name(self) -> Option<SyntaxToken<'a>> {
        name_of(self.0)
    }

    pub fn is_anonymous(self) -> bool {
        self.0.parent().is_some_and(|parent| parent.kind() == NEW_CLASS)
    }

    pub fn members(self) -> impl Iterator<Item = Member<'a>> + 'a {
        self.0.children().filter_map(Member::cast)
    }
}

/// Anything that can appear in a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member<'a> {
    Field(VariableDecl<'a>),
    Method(MethodDecl<'a>),
    Constructor(SyntaxNode<'a>),
    Initializer(SyntaxNode<'a>),
    EnumConstant(SyntaxNode<'a>),
    Type(TypeDecl<'a>),
    Empty(SyntaxNode<'a>),
}

impl<'a> AstNode<'a> for Member<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        Some(match syntax.kind() {
            VARIABLE => Self::Field(VariableDecl(syntax)),
            METHOD => Self::Method(MethodDecl(syntax)),
            CONSTRUCTOR => Self::Constructor(syntax),
            INITIALIZER | STATIC_INITIALIZER => Self::Initializer(syntax),
            ENUM_CONSTANT => Self::EnumConstant(syntax),
            CLASS | INTERFACE | ENUM | RECORD => Self::Type(TypeDecl(syntax)),
            EMPTY_DECLARATION => Self::Empty(syntax),
            _ => return None,
        })
    }

    fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Self::Field(field) => field.0,
            Self::Method(method) => method.0,
            Self::Type(decl) => decl.0,
            Self::Constructor(node)
            | Self::Initializer(node)
            | Self::EnumConstant(node)
            | Self::Empty(node) => node,
        }
    }
}

impl<'a> MethodDecl<'a> {
    pub fn name(self) -> Option<SyntaxToken<'a>> {
        name_of(self.0)
    }

    pub fn parameters(self) -> impl Iterator<Item = Parameter<'a>> + 'a {
        self.0.child_of_kind(PARAMETER_LIST).into_iter().flat_map(|list| list.children().filter_map(Parameter::cast))
    }

    pub fn body(self) -> Option<Block<'a>> {
        child(self.0)
    }

    pub fn declared_type(self) -> Option<&'a DeclaredType> {
        self.0.declared_type()
    }
}

impl<'a> Parameter<'a> {
    pub fn name(self) -> Option<SyntaxToken<'a>> {
        name_of(self.0)
    }

    pub fn is_varargs(self) -> bool {
        self.0.descendants().any(|node| node.token_of_kind(ELLIPSIS).is_some())
    }

    pub fn declared_type(self) -> Option<&'a DeclaredType> {
        self.0.declared_type()
    }
}

impl<'a> VariableDecl<'a> {
    pub fn name(self) -> Option<SyntaxToken<'a>> {
        name_of(self.0)
    }

    /// `true` for the first declarator of a declaration, which owns the
    /// modifiers and the type.
    pub fn owns_type(self) -> bool {
        self.declared_type().is_some_and(|declared| {
            self.0.tree().node(declared.type_node).parent() == Some(self.0)
        })
    }

    pub fn declared_type(self) -> Option<&'a DeclaredType> {
        self.0.declared_type()
    }

    /// Dimension nodes written after the name.
    pub fn name_dimensions(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.0.children().filter(|child| child.kind() == ARRAY_DIMENSION)
    }

    pub fn initializer(self) -> Option<Expr<'a>> {
        let eq = self.0.token_of_kind(EQ)?;
        self.0
            .children()
            .skip_while(|child| child.first_token().id() < eq.id())
            .find_map(Expr::cast)
    }

    /// Trailing `,` or `;`, absent for the last declarator of a `for` init.
    pub fn separator(self) -> Option<SyntaxToken<'a>> {
        self.0.child_tokens().next_back().filter(|token| matches!(token.kind(), COMMA | SEMICOLON))
    }
}

impl<'a> LabeledStmt<'a> {
    pub fn label(self) -> Option<SyntaxToken<'a>> {
        name_of(self.0)
    }

    pub fn body(self) -> Option<Stmt<'a>> {
        self.0.children().find_map(Stmt::cast)
    }
}

impl<'a> TypeCast<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        child(self.0)
    }

    pub fn expr(self) -> Option<Expr<'a>> {
        self.0.children().filter_map(Expr::cast).last()
    }
}

impl<'a> Block<'a> {
    pub fn statements(self) -> impl Iterator<Item = Stmt<'a>> + 'a {
        self.0.children().filter_map(Stmt::cast)
    }
}

macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $kind:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name<'a> {
            $($variant(SyntaxNode<'a>),)*
        }

        impl<'a> AstNode<'a> for $name<'a> {
            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                Some(match syntax.kind() {
                    $($kind => Self::$variant(syntax),)*
                    _ => return None,
                })
            }

            fn syntax(self) -> SyntaxNode<'a> {
                match self {
                    $(Self::$variant(node) => node,)*
                }
            }
        }

        impl $name<'_> {
            pub const KINDS: &'static [SyntaxKind] = &[$($kind),*];
        }
    };
}

ast_enum! {
    /// Statements, including local variable and local class declarations.
    Stmt {
        Block => BLOCK,
        Empty => EMPTY_STATEMENT,
        Expr => EXPRESSION_STATEMENT,
        LocalVariable => VARIABLE,
        LocalType => CLASS,
        If => IF_STATEMENT,
        While => WHILE_STATEMENT,
        Do => DO_STATEMENT,
        For => FOR_STATEMENT,
        ForEach => FOREACH_STATEMENT,
        Return => RETURN_STATEMENT,
        Break => BREAK_STATEMENT,
        Continue => CONTINUE_STATEMENT,
        Yield => YIELD_STATEMENT,
        Labeled => LABELED_STATEMENT,
        Throw => THROW_STATEMENT,
        Try => TRY_STATEMENT,
        Switch => SWITCH_STATEMENT,
        Synchronized => SYNCHRONIZED_STATEMENT,
        Assert => ASSERT_STATEMENT,
    }
}

ast_enum! {
    Expr {
        Literal => LITERAL,
        Name => IDENTIFIER,
        MemberSelect => MEMBER_SELECT,
        MethodCall => METHOD_INVOCATION,
        New => NEW_CLASS,
        NewArray => NEW_ARRAY,
        ArrayInit => ARRAY_INITIALIZER,
        ArrayAccess => ARRAY_ACCESS,
        Prefix => PREFIX_EXPRESSION,
        Postfix => POSTFIX_EXPRESSION,
        Binary => BINARY_EXPRESSION,
        Assign => ASSIGNMENT,
        Conditional => CONDITIONAL_EXPRESSION,
        InstanceOf => INSTANCEOF_EXPRESSION,
        Cast => TYPE_CAST,
        Paren => PARENTHESIZED_EXPRESSION,
        ClassLiteral => CLASS_LITERAL,
        Lambda => LAMBDA_EXPRESSION,
        MethodRef => METHOD_REFERENCE,
        Switch => SWITCH_EXPRESSION,
    }
}

ast_enum! {
    Type {
        Primitive => PRIMITIVE_TYPE,
        Var => VAR_TYPE,
        Class => CLASS_TYPE,
        Parameterized => PARAMETERIZED_TYPE,
        Array => ARRAY_TYPE,
        Wildcard => WILDCARD_TYPE,
        Union => UNION_TYPE,
        Intersection => INTERSECTION_TYPE,
    }
}

impl<'a> Stmt<'a> {
    /// Label named by a `break` or `continue`, if any.
    pub fn jump_label(self) -> Option<SyntaxToken<'a>> {
        match self {
            Self::Break(node) | Self::Continue(node) => name_of(node),
            _ => None,
        }
    }
}
