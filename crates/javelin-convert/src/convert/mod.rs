//! Front-end tree to lossless syntax tree.
//!
//! Every front-end node is mapped onto the span of significant tokens its
//! source range covers. Tokens of that span not claimed by a child node
//! become direct children, so keywords, punctuation and brackets land on the
//! innermost node whose range holds them.

mod exprs;
mod items;
mod stmts;
mod types;

use javelin_frontend::ast::{self, Expr, NamedType, TypeRef};
use javelin_frontend::visit::{self, Visitor};
use javelin_frontend::{BindingId, FrontEnd, ParsedUnit, Problem, SourceInput};
use javelin_semantic::SemanticBuilder;
use javelin_syntax::SyntaxKind::{self, *};
use javelin_syntax::{Element, NodeId, Position, SyntaxTree, TextRange, TextSize, TokenId, TreeBuilder};
use la_arena::ArenaMap;

use crate::warnings::attach_warnings;
use crate::{ConvertError, FileContext, Mismatch, Navigator, SyntaxPolicy};

/// Parses `input` with `front_end` and converts the result.
pub fn parse_and_convert(
    front_end: &dyn FrontEnd,
    input: &SourceInput,
    policy: &SyntaxPolicy,
) -> Result<FileContext, ConvertError> {
    let parsed = front_end.parse(input)?;
    convert_file(input, parsed, policy)
}

/// Builds the syntax tree, semantic model and warnings of one parsed file.
pub fn convert_file(
    input: &SourceInput,
    parsed: ParsedUnit,
    policy: &SyntaxPolicy,
) -> Result<FileContext, ConvertError> {
    let stream = javelin_tokenizer::tokenize(&input.text, input.level)?;
    if let Some(problem) = policy.first_fatal(&parsed.problems) {
        return Err(syntax_error(&input.text, problem));
    }

    let ParsedUnit { unit, bindings, problems } = parsed;
    let mut splits = SplitOffsets::default();
    splits.visit_unit(&unit);
    let nav = Navigator::new(&stream, &splits.offsets);

    let (tree, semantic) = Converter::new(&input.text, &nav).convert(&unit).inspect_err(|error| {
        tracing::error!(path = %input.path, %error, "syntax tree does not match the token stream");
    })?;
    let semantic = semantic.finish(&tree, bindings);
    let (warnings, semantic_errors) = attach_warnings(&tree, problems);

    tracing::debug!(
        path = %input.path,
        nodes = tree.node_count(),
        warnings = warnings.len(),
        semantic_errors = semantic_errors.len(),
        "converted file"
    );
    Ok(FileContext::new(input.path.clone(), tree, semantic, warnings, semantic_errors))
}

fn syntax_error(text: &str, problem: &Problem) -> ConvertError {
    let offset = usize::from(problem.range.start());
    let position = Position::START.advance(text.get(..offset).unwrap_or(text));
    ConvertError::Syntax {
        message: problem.message.clone(),
        line: position.line,
        column: position.column,
        range: problem.range,
    }
}

/// End offsets of every type argument and type parameter list.
#[derive(Default)]
struct SplitOffsets {
    offsets: Vec<TextSize>,
}

impl Visitor for SplitOffsets {
    fn visit_type_decl(&mut self, decl: &ast::TypeDecl) {
        self.offsets.extend(decl.type_params.as_ref().map(|params| params.range.end()));
        visit::walk_type_decl(self, decl);
    }

    fn visit_method(&mut self, method: &ast::MethodDecl) {
        self.offsets.extend(method.type_params.as_ref().map(|params| params.range.end()));
        visit::walk_method(self, method);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::MethodCall { type_args: Some(args), .. } = expr {
            self.offsets.push(args.range.end());
        }
        visit::walk_expr(self, expr);
    }

    fn visit_type_ref(&mut self, ty: &TypeRef) {
        if let TypeRef::Named(NamedType { args: Some(args), .. }) = ty {
            self.offsets.push(args.range.end());
        }
        visit::walk_type_ref(self, ty);
    }
}

/// What happens to tokens of a node's span that no child claims.
#[derive(Clone, Copy)]
enum Gaps {
    Tokens,
    /// Stray `;` become `EMPTY_DECLARATION` nodes, except `keep`.
    Declarations { keep: Option<TokenId> },
}

pub(crate) struct Converter<'n> {
    nav: &'n Navigator,
    builder: TreeBuilder,
    spans: ArenaMap<NodeId, (TokenId, TokenId)>,
    semantic: SemanticBuilder,
}

impl<'n> Converter<'n> {
    pub(crate) fn new(text: &str, nav: &'n Navigator) -> Self {
        Self {
            nav,
            builder: TreeBuilder::new(text, nav.tokens().to_vec()),
            spans: ArenaMap::default(),
            semantic: SemanticBuilder::new(),
        }
    }

    pub(crate) fn convert(
        mut self,
        unit: &ast::CompilationUnit,
    ) -> Result<(SyntaxTree, SemanticBuilder), ConvertError> {
        let root = self.unit(unit)?;
        debug_assert_eq!(self.semantic.label_depth(), 0);
        let tree = self.builder.finish(root)?;
        Ok((tree, self.semantic))
    }

    /// First and last significant token inside `range`.
    fn span(&self, range: TextRange) -> Option<(TokenId, TokenId)> {
        let first = self.nav.first_token_in_any(range)?;
        let last = self.nav.last_token_in_any(range)?;
        (first <= last).then_some((first, last))
    }

    fn node(&mut self, kind: SyntaxKind, range: TextRange, children: Vec<NodeId>) -> Result<NodeId, ConvertError> {
        self.node_with(kind, range, children, Gaps::Tokens)
    }

    fn node_with(
        &mut self,
        kind: SyntaxKind,
        range: TextRange,
        children: Vec<NodeId>,
        gaps: Gaps,
    ) -> Result<NodeId, ConvertError> {
        let span = self.span(range).ok_or(ConvertError::StructuralMismatch {
            node: kind,
            offset: range.start(),
            reason: Mismatch::NoTokens,
        })?;
        let elements = self.layout(kind, span, children, gaps)?;
        Ok(self.alloc(kind, elements, span))
    }

    /// A node over the tokens of `range` with no child nodes.
    fn leaf(&mut self, kind: SyntaxKind, range: TextRange) -> Result<NodeId, ConvertError> {
        self.node(kind, range, Vec::new())
    }

    fn alloc(&mut self, kind: SyntaxKind, elements: Vec<Element>, span: (TokenId, TokenId)) -> NodeId {
        let node = self.builder.node(kind, elements);
        self.spans.insert(node, span);
        node
    }

    /// Interleaves `children` with the unclaimed tokens of `span`.
    fn layout(
        &mut self,
        kind: SyntaxKind,
        (first, last): (TokenId, TokenId),
        mut children: Vec<NodeId>,
        gaps: Gaps,
    ) -> Result<Vec<Element>, ConvertError> {
        children.sort_by_key(|&child| self.spans[child].0);

        let mut elements = Vec::with_capacity(children.len() + 2);
        let mut next = first.index();
        for child in children {
            let (start, end) = self.spans[child];
            if start.index() < next || end > last {
                return Err(ConvertError::StructuralMismatch {
                    node: kind,
                    offset: self.nav.token(start).start(),
                    reason: Mismatch::Overlap,
                });
            }
            for index in next..start.index() {
                elements.push(self.gap(token_id(index), gaps));
            }
            elements.push(child.into());
            next = end.index() + 1;
        }
        for index in next..=last.index() {
            elements.push(self.gap(token_id(index), gaps));
        }
        Ok(elements)
    }

    fn gap(&mut self, token: TokenId, gaps: Gaps) -> Element {
        match gaps {
            Gaps::Declarations { keep } if keep != Some(token) && self.nav.token(token).kind() == SEMICOLON => {
                self.alloc(EMPTY_DECLARATION, vec![token.into()], (token, token)).into()
            }
            _ => token.into(),
        }
    }

    /// The first token of `range`, which must be a `kind`.
    fn leading(&self, node: SyntaxKind, range: TextRange, kind: SyntaxKind) -> Result<TokenId, ConvertError> {
        self.nav
            .first_token_in_any(range)
            .filter(|&token| self.nav.token(token).kind() == kind)
            .ok_or_else(|| ConvertError::missing(node, range.start(), kind))
    }

    /// The token right before `offset`, which must be a `kind`.
    fn preceding(&self, node: SyntaxKind, offset: TextSize, kind: SyntaxKind) -> Result<TokenId, ConvertError> {
        self.nav
            .first_token_before(offset)
            .filter(|&token| self.nav.token(token).kind() == kind)
            .ok_or_else(|| ConvertError::missing(node, offset, kind))
    }

    /// The token right after `offset`, which must be a `kind`.
    fn following(&self, node: SyntaxKind, offset: TextSize, kind: SyntaxKind) -> Result<TokenId, ConvertError> {
        self.nav
            .first_token_after(offset)
            .filter(|&token| self.nav.token(token).kind() == kind)
            .ok_or_else(|| ConvertError::missing(node, offset, kind))
    }

    fn declare(&mut self, binding: Option<BindingId>, node: NodeId) {
        if let Some(binding) = binding {
            self.semantic.declare(binding, node);
        }
    }

    fn reference(&mut self, binding: Option<BindingId>, node: NodeId) {
        if let Some(binding) = binding {
            self.semantic.reference(binding, node);
        }
    }

    fn ident(&mut self, ident: &ast::Ident) -> Result<NodeId, ConvertError> {
        self.leaf(IDENTIFIER, ident.range)
    }

    fn name_ref(&mut self, name: &ast::NameRef) -> Result<NodeId, ConvertError> {
        let node = self.ident(&name.ident)?;
        self.reference(name.binding, node);
        Ok(node)
    }
}

fn token_id(index: usize) -> TokenId {
    TokenId::new(index as u32)
}
