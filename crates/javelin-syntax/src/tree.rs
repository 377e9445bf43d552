//! Arena storage for the immutable syntax tree.

use std::fmt;

use la_arena::{Arena, Idx};
use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};

use crate::{DeclaredType, Position, SyntaxKind, SyntaxNode, SyntaxToken, Token, TokenId};

pub type NodeId = Idx<NodeData>;

/// Child slot of a node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Element {
    Node(NodeId),
    Token(TokenId),
}

impl Element {
    #[inline]
    pub fn into_node(self) -> Option<NodeId> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    #[inline]
    pub fn into_token(self) -> Option<TokenId> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }
}

impl From<NodeId> for Element {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<TokenId> for Element {
    fn from(token: TokenId) -> Self {
        Self::Token(token)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) children: Box<[Element]>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) index_in_parent: u32,
    pub(crate) first_token: TokenId,
    pub(crate) last_token: TokenId,
}

impl NodeData {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Start and end of a node as reported to users.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LineColRange {
    pub start: Position,
    pub end: Position,
}

impl fmt::Display for LineColRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A broken structural invariant, found when the tree is finished.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("{kind:?} node owns no token")]
    EmptyNode { kind: SyntaxKind },
    #[error("{kind:?} node is not reachable from the root")]
    OrphanNode { kind: SyntaxKind },
    #[error("{kind:?} node has more than one parent")]
    SharedNode { kind: SyntaxKind },
    #[error("token {kind:?} at {offset:?} is not owned by any node")]
    UnownedToken { kind: SyntaxKind, offset: TextSize },
    #[error("token {kind:?} at {offset:?} is owned twice")]
    SharedToken { kind: SyntaxKind, offset: TextSize },
    #[error("children of {kind:?} overlap or are out of order at {offset:?}")]
    OutOfOrder { kind: SyntaxKind, offset: TextSize },
    #[error("token stream is not sorted at {offset:?}")]
    UnsortedTokens { offset: TextSize },
    #[error("token stream does not end with EOF")]
    MissingEof,
}

impl TreeError {
    /// Source offset the error is reported at, when there is one.
    pub fn offset(&self) -> Option<TextSize> {
        match *self {
            Self::UnownedToken { offset, .. }
            | Self::SharedToken { offset, .. }
            | Self::OutOfOrder { offset, .. }
            | Self::UnsortedTokens { offset } => Some(offset),
            Self::EmptyNode { .. }
            | Self::OrphanNode { .. }
            | Self::SharedNode { .. }
            | Self::MissingEof => None,
        }
    }
}

/// Lossless syntax tree of one source file.
///
/// Every significant token, including `EOF`, is a direct child of exactly one
/// node and siblings never overlap. Comments ride on the token they precede.
pub struct SyntaxTree {
    pub(crate) text: Box<str>,
    pub(crate) tokens: Box<[Token]>,
    pub(crate) token_parents: Box<[NodeId]>,
    pub(crate) nodes: Arena<NodeData>,
    pub(crate) root: NodeId,
    pub(crate) declared_types: FxHashMap<NodeId, DeclaredType>,
}

impl SyntaxTree {
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        self.node(self.root)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        SyntaxNode::new(self, id)
    }

    #[inline]
    pub fn token(&self, id: TokenId) -> SyntaxToken<'_> {
        SyntaxToken::new(self, id)
    }

    #[inline]
    pub fn node_data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id]
    }

    #[inline]
    pub fn token_data(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    /// Full source text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node that owns `token` as a direct child.
    #[inline]
    pub fn token_parent(&self, token: TokenId) -> NodeId {
        self.token_parents[token.index()]
    }

    pub fn declared_type(&self, node: NodeId) -> Option<&DeclaredType> {
        self.declared_types.get(&node)
    }

    /// Byte range from the start of the first token to the end of the last.
    pub fn node_range(&self, node: NodeId) -> TextRange {
        let data = &self.nodes[node];
        TextRange::new(
            self.tokens[data.first_token.index()].start(),
            self.tokens[data.last_token.index()].end(),
        )
    }

    /// Line/column span of a node, taken from its boundary tokens.
    pub fn node_position(&self, node: NodeId) -> LineColRange {
        let data = &self.nodes[node];
        LineColRange {
            start: self.tokens[data.first_token.index()].position(),
            end: self.tokens[data.last_token.index()].end_position(),
        }
    }

    /// Checks order and coverage again. A finished tree always passes; this
    /// exists for tests and for trees that were assembled by hand.
    pub fn verify(&self) -> Result<(), TreeError> {
        verify_tokens(&self.tokens)?;
        let mut owners = vec![None; self.tokens.len()];
        let mut parents = vec![0u32; self.nodes.len()];

        for (id, data) in self.nodes.iter() {
            let mut previous_end: Option<TokenId> = None;
            for child in data.children.iter() {
                let (first, last) = match *child {
                    Element::Token(token) => {
                        let owner = &mut owners[token.index()];
                        if owner.is_some() {
                            let token = &self.tokens[token.index()];
                            return Err(TreeError::SharedToken {
                                kind: token.kind(),
                                offset: token.start(),
                            });
                        }
                        *owner = Some(id);
                        (token, token)
                    }
                    Element::Node(node) => {
                        parents[slot(node)] += 1;
                        let child = &self.nodes[node];
                        (child.first_token, child.last_token)
                    }
                };
                if previous_end.is_some_and(|end| end >= first) {
                    return Err(TreeError::OutOfOrder {
                        kind: data.kind,
                        offset: self.tokens[first.index()].start(),
                    });
                }
                previous_end = Some(last);
            }
        }

        for (id, data) in self.nodes.iter() {
            match parents[slot(id)] {
                0 if id != self.root => return Err(TreeError::OrphanNode { kind: data.kind }),
                0 | 1 => {}
                _ => return Err(TreeError::SharedNode { kind: data.kind }),
            }
        }

        if let Some(index) = owners.iter().position(Option::is_none) {
            let token = &self.tokens[index];
            return Err(TreeError::UnownedToken { kind: token.kind(), offset: token.start() });
        }
        Ok(())
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        self.root().debug_dump(&mut buf, 0);
        f.write_str(&buf)
    }
}

#[inline]
pub(crate) fn slot(id: NodeId) -> usize {
    u32::from(id.into_raw()) as usize
}

pub(crate) fn verify_tokens(tokens: &[Token]) -> Result<(), TreeError> {
    if tokens.last().is_none_or(|token| !token.is_eof()) {
        return Err(TreeError::MissingEof);
    }
    for pair in tokens.windows(2) {
        if pair[0].end() > pair[1].start() {
            return Err(TreeError::UnsortedTokens { offset: pair[1].start() });
        }
    }
    Ok(())
}
