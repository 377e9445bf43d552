//! Front-end syntax tree with resolved bindings.
//!
//! Every node carries the byte range of the source it was parsed from; every
//! declaration and every name reference carries the binding it introduces or
//! resolves to, when the front-end could resolve it.

use javelin_syntax::{SyntaxKind, TextRange};

use crate::BindingId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub range: TextRange,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub range: TextRange,
    pub segments: Vec<Ident>,
}

impl QualifiedName {
    pub fn last(&self) -> Option<&Ident> {
        self.segments.last()
    }

    pub fn to_dotted(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&segment.text);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub range: TextRange,
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDecl {
    pub range: TextRange,
    pub annotations: Vec<Annotation>,
    pub name: QualifiedName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub range: TextRange,
    pub is_static: bool,
    pub name: QualifiedName,
    pub on_demand: bool,
    /// The imported type, for single-type imports that resolved.
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKeyword {
    Public,
    Protected,
    Private,
    Static,
    Abstract,
    Final,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    Default,
    /// Contextual `sealed`.
    Sealed,
    /// Contextual `non-sealed`.
    NonSealed,
}

impl ModifierKeyword {
    pub fn from_token(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::PUBLIC_KW => Self::Public,
            SyntaxKind::PROTECTED_KW => Self::Protected,
            SyntaxKind::PRIVATE_KW => Self::Private,
            SyntaxKind::STATIC_KW => Self::Static,
            SyntaxKind::ABSTRACT_KW => Self::Abstract,
            SyntaxKind::FINAL_KW => Self::Final,
            SyntaxKind::NATIVE_KW => Self::Native,
            SyntaxKind::SYNCHRONIZED_KW => Self::Synchronized,
            SyntaxKind::TRANSIENT_KW => Self::Transient,
            SyntaxKind::VOLATILE_KW => Self::Volatile,
            SyntaxKind::STRICTFP_KW => Self::Strictfp,
            SyntaxKind::DEFAULT_KW => Self::Default,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifiers {
    pub range: TextRange,
    pub items: Vec<Modifier>,
}

impl Modifiers {
    pub fn has(&self, keyword: ModifierKeyword) -> bool {
        self.items.iter().any(|item| matches!(item, Modifier::Keyword { keyword: k, .. } if *k == keyword))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    Keyword { range: TextRange, keyword: ModifierKeyword },
    Annotation(Annotation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub range: TextRange,
    pub name: QualifiedName,
    /// The annotation type.
    pub binding: Option<BindingId>,
    pub args: Option<AnnotationArgs>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationArgs {
    /// Parentheses included.
    pub range: TextRange,
    pub values: AnnotationValues,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValues {
    Empty,
    Single(Box<Expr>),
    Pairs(Vec<ElementValuePair>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementValuePair {
    pub range: TextRange,
    pub name: Ident,
    pub value: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Interface,
    /// `@interface`
    Annotation,
    Enum,
    Record,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub range: TextRange,
    pub kind: TypeDeclKind,
    pub modifiers: Option<Modifiers>,
    pub name: Ident,
    pub binding: Option<BindingId>,
    pub type_params: Option<TypeParams>,
    pub record_components: Option<Params>,
    pub extends: Vec<TypeRef>,
    pub implements: Vec<TypeRef>,
    /// Permitted subtypes of a sealed class or interface.
    pub permits: Vec<TypeRef>,
    pub body: ClassBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBody {
    /// Braces included.
    pub range: TextRange,
    pub enum_constants: Vec<EnumConstant>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    pub range: TextRange,
    pub modifiers: Option<Modifiers>,
    pub name: Ident,
    pub binding: Option<BindingId>,
    pub args: Option<Args>,
    pub body: Option<ClassBody>,
    pub body_binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(VarDecl),
    Method(MethodDecl),
    Initializer(Initializer),
    Type(TypeDecl),
}

impl Member {
    pub fn range(&self) -> TextRange {
        match self {
            Self::Field(field) => field.range,
            Self::Method(method) => method.range,
            Self::Initializer(init) => init.range,
            Self::Type(decl) => decl.range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    pub range: TextRange,
    pub is_static: bool,
    pub body: Block,
}

/// Field, local variable, `for` initializer, resource or enhanced-for
/// variable. Each fragment declares one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub range: TextRange,
    pub modifiers: Option<Modifiers>,
    pub ty: TypeRef,
    pub fragments: Vec<VarFragment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarFragment {
    /// From the name to the end of the initializer.
    pub range: TextRange,
    pub name: Ident,
    pub binding: Option<BindingId>,
    /// `[]` pairs written after the name.
    pub dims: Vec<TextRange>,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub range: TextRange,
    pub modifiers: Option<Modifiers>,
    pub type_params: Option<TypeParams>,
    /// `None` for constructors.
    pub return_type: Option<TypeRef>,
    pub name: Ident,
    pub binding: Option<BindingId>,
    /// `None` for compact record constructors.
    pub params: Option<Params>,
    /// `[]` pairs written after the parameter list.
    pub dims: Vec<TextRange>,
    pub throws: Vec<TypeRef>,
    /// Annotation element default, `default <value>`.
    pub default_value: Option<Expr>,
    pub body: Option<Block>,
}

impl MethodDecl {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    /// Parentheses included, unless this is a bare lambda parameter.
    pub range: TextRange,
    pub items: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub range: TextRange,
    pub modifiers: Option<Modifiers>,
    /// `None` for implicitly typed lambda parameters.
    pub ty: Option<TypeRef>,
    /// The `...` token of a variable-arity parameter.
    pub varargs: Option<TextRange>,
    pub name: Ident,
    pub binding: Option<BindingId>,
    pub dims: Vec<TextRange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParams {
    /// Angle brackets included.
    pub range: TextRange,
    pub items: Vec<TypeParam>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub range: TextRange,
    pub annotations: Vec<Annotation>,
    pub name: Ident,
    pub binding: Option<BindingId>,
    pub bounds: Vec<TypeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub fn from_token(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::BOOLEAN_KW => Self::Boolean,
            SyntaxKind::BYTE_KW => Self::Byte,
            SyntaxKind::SHORT_KW => Self::Short,
            SyntaxKind::INT_KW => Self::Int,
            SyntaxKind::LONG_KW => Self::Long,
            SyntaxKind::CHAR_KW => Self::Char,
            SyntaxKind::FLOAT_KW => Self::Float,
            SyntaxKind::DOUBLE_KW => Self::Double,
            SyntaxKind::VOID_KW => Self::Void,
            _ => return None,
        })
    }

    pub fn token_kind(self) -> SyntaxKind {
        match self {
            Self::Boolean => SyntaxKind::BOOLEAN_KW,
            Self::Byte => SyntaxKind::BYTE_KW,
            Self::Short => SyntaxKind::SHORT_KW,
            Self::Int => SyntaxKind::INT_KW,
            Self::Long => SyntaxKind::LONG_KW,
            Self::Char => SyntaxKind::CHAR_KW,
            Self::Float => SyntaxKind::FLOAT_KW,
            Self::Double => SyntaxKind::DOUBLE_KW,
            Self::Void => SyntaxKind::VOID_KW,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Extends,
    Super,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive {
        range: TextRange,
        kind: PrimitiveKind,
    },
    Var {
        range: TextRange,
    },
    Named(NamedType),
    Array {
        range: TextRange,
        element: Box<TypeRef>,
        /// The `[]` pair, or the `...` of a variable-arity parameter.
        dim: TextRange,
    },
    Wildcard {
        range: TextRange,
        bound: Option<(BoundKind, Box<TypeRef>)>,
    },
    Union {
        range: TextRange,
        alternatives: Vec<TypeRef>,
    },
    /// `A & B`, the target of an intersection cast.
    Intersection {
        range: TextRange,
        bounds: Vec<TypeRef>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub range: TextRange,
    /// Outer type or package prefix.
    pub qualifier: Option<Box<TypeRef>>,
    pub name: Ident,
    pub binding: Option<BindingId>,
    pub args: Option<TypeArgs>,
}

impl TypeRef {
    pub fn range(&self) -> TextRange {
        match self {
            Self::Primitive { range, .. }
            | Self::Var { range }
            | Self::Array { range, .. }
            | Self::Wildcard { range, .. }
            | Self::Union { range, .. }
            | Self::Intersection { range, .. } => *range,
            Self::Named(named) => named.range,
        }
    }

    /// Innermost element type of an array type.
    pub fn element(&self) -> &Self {
        match self {
            Self::Array { element, .. } => element.element(),
            _ => self,
        }
    }

    /// Normalized spelling, as in `Map<String, int[]>`.
    pub fn display_name(&self) -> String {
        let mut out = String::new();
        self.write_name(&mut out);
        out
    }

    fn write_name(&self, out: &mut String) {
        match self {
            Self::Primitive { kind, .. } => out.push_str(kind.name()),
            Self::Var { .. } => out.push_str("var"),
            Self::Named(named) => {
                if let Some(qualifier) = &named.qualifier {
                    qualifier.write_name(out);
                    out.push('.');
                }
                out.push_str(&named.name.text);
                if let Some(args) = &named.args {
                    out.push('<');
                    for (i, arg) in args.args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        arg.write_name(out);
                    }
                    out.push('>');
                }
            }
            Self::Array { element, .. } => {
                element.write_name(out);
                out.push_str("[]");
            }
            Self::Wildcard { bound, .. } => {
                out.push('?');
                if let Some((kind, bound)) = bound {
                    out.push_str(match kind {
                        BoundKind::Extends => " extends ",
                        BoundKind::Super => " super ",
                    });
                    bound.write_name(out);
                }
            }
            Self::Union { alternatives, .. } => {
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    alternative.write_name(out);
                }
            }
            Self::Intersection { bounds, .. } => {
                for (i, bound) in bounds.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" & ");
                    }
                    bound.write_name(out);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArgs {
    /// Angle brackets included. The end may fall inside a lexed `>>`.
    pub range: TextRange,
    pub args: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Braces included.
    pub range: TextRange,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForInit {
    Decl(VarDecl),
    Exprs(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Decl(VarDecl),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    /// Parentheses included.
    pub range: TextRange,
    pub items: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchClause {
    pub range: TextRange,
    pub param: Param,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchBody {
    /// Braces included.
    pub range: TextRange,
    pub cases: Vec<SwitchCase>,
}

impl SwitchBody {
    pub fn has_default(&self) -> bool {
        self.cases.iter().any(|case| case.labels.iter().any(|label| label.is_default))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCase {
    pub range: TextRange,
    pub labels: Vec<CaseLabel>,
    pub arrow: bool,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseLabel {
    /// From `case`/`default` through the `:` or `->`.
    pub range: TextRange,
    pub is_default: bool,
    pub exprs: Vec<Expr>,
    /// A type pattern, `case String s`. Excludes `exprs`.
    pub pattern: Option<PatternDecl>,
    /// The `when` condition of a pattern label.
    pub guard: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Block(Block),
    LocalVar(VarDecl),
    LocalType(TypeDecl),
    /// The range includes the `;`, except in arrow switch bodies of lambdas.
    Expr { range: TextRange, expr: Expr },
    If { range: TextRange, cond: Expr, then: Box<Stmt>, else_: Option<Box<Stmt>> },
    While { range: TextRange, cond: Expr, body: Box<Stmt> },
    Do { range: TextRange, body: Box<Stmt>, cond: Expr },
    For { range: TextRange, init: Option<ForInit>, cond: Option<Expr>, update: Vec<Expr>, body: Box<Stmt> },
    ForEach { range: TextRange, var: VarDecl, iterable: Expr, body: Box<Stmt> },
    Return { range: TextRange, expr: Option<Expr> },
    Break { range: TextRange, label: Option<Ident> },
    Continue { range: TextRange, label: Option<Ident> },
    Yield { range: TextRange, expr: Expr },
    Labeled { range: TextRange, label: Ident, body: Box<Stmt> },
    Throw { range: TextRange, expr: Expr },
    Try { range: TextRange, resources: Option<Resources>, body: Block, catches: Vec<CatchClause>, finally: Option<Block> },
    Switch { range: TextRange, selector: Expr, body: SwitchBody },
    Synchronized { range: TextRange, lock: Expr, body: Block },
    Assert { range: TextRange, cond: Expr, message: Option<Expr> },
    Empty { range: TextRange },
}

impl Stmt {
    pub fn range(&self) -> TextRange {
        match self {
            Self::Block(block) => block.range,
            Self::LocalVar(decl) => decl.range,
            Self::LocalType(decl) => decl.range,
            Self::Expr { range, .. }
            | Self::If { range, .. }
            | Self::While { range, .. }
            | Self::Do { range, .. }
            | Self::For { range, .. }
            | Self::ForEach { range, .. }
            | Self::Return { range, .. }
            | Self::Break { range, .. }
            | Self::Continue { range, .. }
            | Self::Yield { range, .. }
            | Self::Labeled { range, .. }
            | Self::Throw { range, .. }
            | Self::Try { range, .. }
            | Self::Switch { range, .. }
            | Self::Synchronized { range, .. }
            | Self::Assert { range, .. }
            | Self::Empty { range } => *range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    TextBlock,
    True,
    False,
    Null,
}

/// A simple name occurrence that refers to something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRef {
    pub ident: Ident,
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// Parentheses included.
    pub range: TextRange,
    pub exprs: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayInit {
    /// Braces included.
    pub range: TextRange,
    pub items: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimExpr {
    /// Brackets included.
    pub range: TextRange,
    pub expr: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UnaryOp {
    pub fn is_postfix(self) -> bool {
        matches!(self, Self::PostInc | Self::PostDec)
    }

    pub fn token_kind(self) -> SyntaxKind {
        match self {
            Self::Plus => SyntaxKind::PLUS,
            Self::Minus => SyntaxKind::MINUS,
            Self::Not => SyntaxKind::BANG,
            Self::BitNot => SyntaxKind::TILDE,
            Self::PreInc | Self::PostInc => SyntaxKind::PLUS2,
            Self::PreDec | Self::PostDec => SyntaxKind::MINUS2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn from_token(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::PIPE2 => Self::Or,
            SyntaxKind::AMP2 => Self::And,
            SyntaxKind::PIPE => Self::BitOr,
            SyntaxKind::CARET => Self::BitXor,
            SyntaxKind::AMP => Self::BitAnd,
            SyntaxKind::EQ2 => Self::Eq,
            SyntaxKind::BANG_EQ => Self::Ne,
            SyntaxKind::LT => Self::Lt,
            SyntaxKind::GT => Self::Gt,
            SyntaxKind::LT_EQ => Self::Le,
            SyntaxKind::GT_EQ => Self::Ge,
            SyntaxKind::SHL => Self::Shl,
            SyntaxKind::SHR => Self::Shr,
            SyntaxKind::USHR => Self::UShr,
            SyntaxKind::PLUS => Self::Add,
            SyntaxKind::MINUS => Self::Sub,
            SyntaxKind::STAR => Self::Mul,
            SyntaxKind::SLASH => Self::Div,
            SyntaxKind::PERCENT => Self::Rem,
            _ => return None,
        })
    }

    pub fn token_kind(self) -> SyntaxKind {
        match self {
            Self::Or => SyntaxKind::PIPE2,
            Self::And => SyntaxKind::AMP2,
            Self::BitOr => SyntaxKind::PIPE,
            Self::BitXor => SyntaxKind::CARET,
            Self::BitAnd => SyntaxKind::AMP,
            Self::Eq => SyntaxKind::EQ2,
            Self::Ne => SyntaxKind::BANG_EQ,
            Self::Lt => SyntaxKind::LT,
            Self::Gt => SyntaxKind::GT,
            Self::Le => SyntaxKind::LT_EQ,
            Self::Ge => SyntaxKind::GT_EQ,
            Self::Shl => SyntaxKind::SHL,
            Self::Shr => SyntaxKind::SHR,
            Self::UShr => SyntaxKind::USHR,
            Self::Add => SyntaxKind::PLUS,
            Self::Sub => SyntaxKind::MINUS,
            Self::Mul => SyntaxKind::STAR,
            Self::Div => SyntaxKind::SLASH,
            Self::Rem => SyntaxKind::PERCENT,
        }
    }

    /// Binding power; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::BitOr => 3,
            Self::BitXor => 4,
            Self::BitAnd => 5,
            Self::Eq | Self::Ne => 6,
            Self::Lt | Self::Gt | Self::Le | Self::Ge => 7,
            Self::Shl | Self::Shr | Self::UShr => 8,
            Self::Add | Self::Sub => 9,
            Self::Mul | Self::Div | Self::Rem => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
}

impl AssignOp {
    pub fn from_token(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::EQ => Self::Assign,
            SyntaxKind::PLUS_EQ => Self::Add,
            SyntaxKind::MINUS_EQ => Self::Sub,
            SyntaxKind::STAR_EQ => Self::Mul,
            SyntaxKind::SLASH_EQ => Self::Div,
            SyntaxKind::PERCENT_EQ => Self::Rem,
            SyntaxKind::AMP_EQ => Self::BitAnd,
            SyntaxKind::PIPE_EQ => Self::BitOr,
            SyntaxKind::CARET_EQ => Self::BitXor,
            SyntaxKind::SHL_EQ => Self::Shl,
            SyntaxKind::SHR_EQ => Self::Shr,
            SyntaxKind::USHR_EQ => Self::UShr,
            _ => return None,
        })
    }

    pub fn token_kind(self) -> SyntaxKind {
        match self {
            Self::Assign => SyntaxKind::EQ,
            Self::Add => SyntaxKind::PLUS_EQ,
            Self::Sub => SyntaxKind::MINUS_EQ,
            Self::Mul => SyntaxKind::STAR_EQ,
            Self::Div => SyntaxKind::SLASH_EQ,
            Self::Rem => SyntaxKind::PERCENT_EQ,
            Self::BitAnd => SyntaxKind::AMP_EQ,
            Self::BitOr => SyntaxKind::PIPE_EQ,
            Self::BitXor => SyntaxKind::CARET_EQ,
            Self::Shl => SyntaxKind::SHL_EQ,
            Self::Shr => SyntaxKind::SHR_EQ,
            Self::UShr => SyntaxKind::USHR_EQ,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDecl {
    pub range: TextRange,
    pub modifiers: Option<Modifiers>,
    pub ty: TypeRef,
    pub name: Ident,
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceOfTarget {
    Type(TypeRef),
    Pattern(PatternDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal { range: TextRange, kind: LiteralKind },
    Name(NameRef),
    FieldAccess { range: TextRange, target: Box<Expr>, name: NameRef },
    MethodCall { range: TextRange, target: Option<Box<Expr>>, type_args: Option<TypeArgs>, name: NameRef, args: Args },
    /// `outer` is set for a qualified creation, `outer.new Inner()`.
    New {
        range: TextRange,
        outer: Option<Box<Expr>>,
        ty: TypeRef,
        args: Args,
        body: Option<ClassBody>,
        anonymous_binding: Option<BindingId>,
    },
    NewArray { range: TextRange, element: TypeRef, dims: Vec<DimExpr>, init: Option<ArrayInit> },
    ArrayInit(ArrayInit),
    ArrayAccess { range: TextRange, array: Box<Expr>, index: Box<Expr> },
    Unary { range: TextRange, op: UnaryOp, operand: Box<Expr> },
    Binary { range: TextRange, op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Assign { range: TextRange, op: AssignOp, target: Box<Expr>, value: Box<Expr> },
    Conditional { range: TextRange, cond: Box<Expr>, then: Box<Expr>, else_: Box<Expr> },
    InstanceOf { range: TextRange, expr: Box<Expr>, target: Box<InstanceOfTarget> },
    Cast { range: TextRange, ty: TypeRef, expr: Box<Expr> },
    Paren { range: TextRange, expr: Box<Expr> },
    This { range: TextRange },
    Super { range: TextRange },
    ClassLiteral { range: TextRange, ty: TypeRef },
    Lambda { range: TextRange, params: Params, parenthesized: bool, body: LambdaBody },
    /// `target::name`; `name` is `None` for `::new`.
    MethodRef { range: TextRange, target: Box<Expr>, name: Option<NameRef> },
    Switch { range: TextRange, selector: Box<Expr>, body: SwitchBody },
    /// Only as an annotation element value.
    Annotation(Box<Annotation>),
    /// A type used as a method reference target, as in `int[]::new`.
    Type(TypeRef),
}

impl Expr {
    pub fn range(&self) -> TextRange {
        match self {
            Self::Name(name) => name.ident.range,
            Self::ArrayInit(init) => init.range,
            Self::Annotation(annotation) => annotation.range,
            Self::Type(ty) => ty.range(),
            Self::Literal { range, .. }
            | Self::FieldAccess { range, .. }
            | Self::MethodCall { range, .. }
            | Self::New { range, .. }
            | Self::NewArray { range, .. }
            | Self::ArrayAccess { range, .. }
            | Self::Unary { range, .. }
            | Self::Binary { range, .. }
            | Self::Assign { range, .. }
            | Self::Conditional { range, .. }
            | Self::InstanceOf { range, .. }
            | Self::Cast { range, .. }
            | Self::Paren { range, .. }
            | Self::This { range }
            | Self::Super { range }
            | Self::ClassLiteral { range, .. }
            | Self::Lambda { range, .. }
            | Self::MethodRef { range, .. }
            | Self::Switch { range, .. } => *range,
        }
    }
}
