//! Borrowed handles for navigating a finished `SyntaxTree`.

use std::fmt::{self, Write as _};

use text_size::TextRange;

use crate::cursor::Preorder;
use crate::{
    DeclaredType, Element, LineColRange, NodeId, SyntaxKind, SyntaxTree, Token, TokenId, Trivia,
};

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    pub(crate) fn new(tree: &'a SyntaxTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn tree(self) -> &'a SyntaxTree {
        self.tree
    }

    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.tree.nodes[self.id].kind
    }

    #[inline]
    pub fn parent(self) -> Option<Self> {
        self.tree.nodes[self.id].parent.map(|id| Self::new(self.tree, id))
    }

    /// Iterates over this node and its ancestors, innermost first.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = Self> + 'a {
        std::iter::successors(Some(self), |node| node.parent())
    }

    #[inline]
    pub fn children_with_tokens(self) -> impl DoubleEndedIterator<Item = SyntaxElement<'a>> + 'a {
        let tree = self.tree;
        self.tree.nodes[self.id].children.iter().map(move |&element| SyntaxElement::new(tree, element))
    }

    #[inline]
    pub fn children(self) -> impl DoubleEndedIterator<Item = Self> + 'a {
        self.children_with_tokens().filter_map(SyntaxElement::into_node)
    }

    /// Direct child tokens, without descending into child nodes.
    #[inline]
    pub fn child_tokens(self) -> impl DoubleEndedIterator<Item = SyntaxToken<'a>> + 'a {
        self.children_with_tokens().filter_map(SyntaxElement::into_token)
    }

    #[inline]
    pub fn first_child(self) -> Option<Self> {
        self.children().next()
    }

    pub fn next_sibling(self) -> Option<Self> {
        let data = &self.tree.nodes[self.id];
        let parent = &self.tree.nodes[data.parent?];
        parent.children[data.index_in_parent as usize + 1..]
            .iter()
            .find_map(|element| element.into_node())
            .map(|id| Self::new(self.tree, id))
    }

    pub fn prev_sibling(self) -> Option<Self> {
        let data = &self.tree.nodes[self.id];
        let parent = &self.tree.nodes[data.parent?];
        parent.children[..data.index_in_parent as usize]
            .iter()
            .rev()
            .find_map(|element| element.into_node())
            .map(|id| Self::new(self.tree, id))
    }

    /// First direct child of `kind`.
    pub fn child_of_kind(self, kind: SyntaxKind) -> Option<Self> {
        self.children().find(|child| child.kind() == kind)
    }

    /// First direct child token of `kind`.
    pub fn token_of_kind(self, kind: SyntaxKind) -> Option<SyntaxToken<'a>> {
        self.child_tokens().find(|token| token.kind() == kind)
    }

    #[inline]
    pub fn first_token(self) -> SyntaxToken<'a> {
        SyntaxToken::new(self.tree, self.tree.nodes[self.id].first_token)
    }

    #[inline]
    pub fn last_token(self) -> SyntaxToken<'a> {
        SyntaxToken::new(self.tree, self.tree.nodes[self.id].last_token)
    }

    /// All tokens spanned by this node, in source order.
    pub fn tokens(self) -> impl DoubleEndedIterator<Item = SyntaxToken<'a>> + 'a {
        let tree = self.tree;
        let data = &tree.nodes[self.id];
        let first = data.first_token.index() as u32;
        let last = data.last_token.index() as u32;
        (first..=last).map(move |index| SyntaxToken::new(tree, TokenId::new(index)))
    }

    #[inline]
    pub fn text_range(self) -> TextRange {
        self.tree.node_range(self.id)
    }

    /// Source text from the first token to the last, comments in between
    /// included.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    #[inline]
    pub fn position(self) -> LineColRange {
        self.tree.node_position(self.id)
    }

    #[inline]
    pub fn declared_type(self) -> Option<&'a DeclaredType> {
        self.tree.declared_type(self.id)
    }

    #[inline]
    pub fn preorder(self) -> Preorder<'a> {
        Preorder::new(self)
    }

    /// All descendants, this node included, in pre-order.
    pub fn descendants(self) -> impl Iterator<Item = Self> + 'a {
        self.preorder().filter_map(|event| match event {
            crate::WalkEvent::Enter(node) => Some(node),
            crate::WalkEvent::Leave(_) => None,
        })
    }

    pub(crate) fn debug_dump(self, buf: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = writeln!(buf, "{indent}{:?}@{:?}", self.kind(), self.text_range());
        for child in self.children_with_tokens() {
            match child {
                SyntaxElement::Node(node) => node.debug_dump(buf, depth + 1),
                SyntaxElement::Token(token) => {
                    for trivia in token.trivia() {
                        let _ = writeln!(buf, "{indent}  {:?} {:?}", trivia.kind, trivia.text);
                    }
                    let _ =
                        writeln!(buf, "{indent}  {:?}@{:?} {:?}", token.kind(), token.text_range(), token.text());
                }
            }
        }
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

/// Token handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a SyntaxTree,
    id: TokenId,
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    pub(crate) fn new(tree: &'a SyntaxTree, id: TokenId) -> Self {
        Self { tree, id }
    }

    #[inline]
    pub fn id(self) -> TokenId {
        self.id
    }

    #[inline]
    pub fn data(self) -> &'a Token {
        &self.tree.tokens[self.id.index()]
    }

    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind()
    }

    #[inline]
    pub fn text(self) -> &'a str {
        self.data().text()
    }

    #[inline]
    pub fn text_range(self) -> TextRange {
        self.data().text_range()
    }

    #[inline]
    pub fn line(self) -> u32 {
        self.data().line()
    }

    #[inline]
    pub fn column(self) -> u32 {
        self.data().column()
    }

    #[inline]
    pub fn trivia(self) -> &'a [Trivia] {
        self.data().trivia()
    }

    #[inline]
    pub fn parent(self) -> SyntaxNode<'a> {
        SyntaxNode::new(self.tree, self.tree.token_parent(self.id))
    }

    pub fn prev_token(self) -> Option<Self> {
        let index = self.id.index().checked_sub(1)?;
        Some(Self::new(self.tree, TokenId::new(index as u32)))
    }

    pub fn next_token(self) -> Option<Self> {
        let index = self.id.index() + 1;
        (index < self.tree.tokens.len()).then(|| Self::new(self.tree, TokenId::new(index as u32)))
    }
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxToken<'_> {}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntaxElement<'a> {
    Node(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

impl<'a> SyntaxElement<'a> {
    fn new(tree: &'a SyntaxTree, element: Element) -> Self {
        match element {
            Element::Node(id) => Self::Node(SyntaxNode::new(tree, id)),
            Element::Token(id) => Self::Token(SyntaxToken::new(tree, id)),
        }
    }

    #[inline]
    pub fn into_node(self) -> Option<SyntaxNode<'a>> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    #[inline]
    pub fn into_token(self) -> Option<SyntaxToken<'a>> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }

    pub fn kind(self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    pub fn text_range(self) -> TextRange {
        match self {
            Self::Node(node) => node.text_range(),
            Self::Token(token) => token.text_range(),
        }
    }
}
