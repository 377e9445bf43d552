//! Two-phase construction of a `SyntaxTree`.
//!
//! Nodes are allocated bottom-up with their children already built; parent
//! links are assigned by one linear pass in [`TreeBuilder::finish`].

use la_arena::Arena;
use rustc_hash::FxHashMap;

use crate::tree::{slot, verify_tokens};
use crate::{DeclaredType, Element, NodeData, NodeId, SyntaxKind, SyntaxTree, Token, TokenId, TreeError};

/// Placeholder until `finish` resolves the real boundaries.
const UNRESOLVED: TokenId = TokenId::new(u32::MAX);

pub struct TreeBuilder {
    text: Box<str>,
    tokens: Vec<Token>,
    nodes: Arena<NodeData>,
    declared_types: FxHashMap<NodeId, DeclaredType>,
}

impl TreeBuilder {
    /// `tokens` are the significant tokens of `text` in source order, ending
    /// with `EOF`.
    pub fn new(text: impl Into<Box<str>>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
            nodes: Arena::default(),
            declared_types: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    #[inline]
    pub fn kind(&self, node: NodeId) -> SyntaxKind {
        self.nodes[node].kind
    }

    #[inline]
    pub fn children(&self, node: NodeId) -> &[Element] {
        &self.nodes[node].children
    }

    /// Allocates a node over already built children.
    pub fn node(&mut self, kind: SyntaxKind, children: Vec<Element>) -> NodeId {
        debug_assert!(kind.is_node(), "{kind:?} is a token kind");
        self.nodes.alloc(NodeData {
            kind,
            children: children.into_boxed_slice(),
            parent: None,
            index_in_parent: 0,
            first_token: UNRESOLVED,
            last_token: UNRESOLVED,
        })
    }

    pub fn set_declared_type(&mut self, node: NodeId, declared: DeclaredType) {
        self.declared_types.insert(node, declared);
    }

    /// Resolves boundaries, links parents and checks the structural
    /// invariants.
    pub fn finish(self, root: NodeId) -> Result<SyntaxTree, TreeError> {
        let Self { text, tokens, mut nodes, declared_types } = self;
        verify_tokens(&tokens)?;

        // Children are always allocated before their parent, so arena order
        // is a valid bottom-up order.
        let ids: Vec<NodeId> = nodes.iter().map(|(id, _)| id).collect();
        for &id in &ids {
            let data = &nodes[id];
            let bounds = |element: &Element| match *element {
                Element::Token(token) => (token, token),
                Element::Node(node) => (nodes[node].first_token, nodes[node].last_token),
            };
            let (Some(first), Some(last)) = (data.children.first(), data.children.last()) else {
                return Err(TreeError::EmptyNode { kind: data.kind });
            };
            let (first, _) = bounds(first);
            let (_, last) = bounds(last);
            let data = &mut nodes[id];
            data.first_token = first;
            data.last_token = last;
        }

        let mut token_parents = vec![None; tokens.len()];
        let mut links = Vec::new();
        for (id, data) in nodes.iter() {
            for (index, child) in data.children.iter().enumerate() {
                match *child {
                    Element::Node(node) => links.push((node, id, index as u32)),
                    Element::Token(token) => {
                        let owner = &mut token_parents[token.index()];
                        if owner.is_some() {
                            let token = &tokens[token.index()];
                            return Err(TreeError::SharedToken {
                                kind: token.kind(),
                                offset: token.start(),
                            });
                        }
                        *owner = Some(id);
                    }
                }
            }
        }

        let mut linked = vec![false; nodes.len()];
        for (child, parent, index) in links {
            let data = &mut nodes[child];
            if linked[slot(child)] {
                return Err(TreeError::SharedNode { kind: data.kind });
            }
            linked[slot(child)] = true;
            data.parent = Some(parent);
            data.index_in_parent = index;
        }

        let token_parents = token_parents
            .into_iter()
            .enumerate()
            .map(|(index, owner)| {
                owner.ok_or_else(|| {
                    let token = &tokens[index];
                    TreeError::UnownedToken { kind: token.kind(), offset: token.start() }
                })
            })
            .collect::<Result<Box<[NodeId]>, _>>()?;

        let tree = SyntaxTree {
            text,
            tokens: tokens.into_boxed_slice(),
            token_parents,
            nodes,
            root,
            declared_types,
        };
        tree.verify()?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use text_size::{TextRange, TextSize};

    use super::*;
    use crate::{Position, SyntaxKind::*};

    fn token(kind: SyntaxKind, text: &str, start: u32, column: u32) -> Token {
        let range = TextRange::at(TextSize::from(start), TextSize::of(text));
        Token::new(kind, text, range, Position::new(1, column), Vec::new())
    }

    /// `x;` as an expression statement.
    fn statement_tokens() -> Vec<Token> {
        vec![token(IDENT, "x", 0, 0), token(SEMICOLON, ";", 1, 1), token(EOF, "", 2, 2)]
    }

    #[test]
    fn links_parents_in_second_pass() {
        let mut builder = TreeBuilder::new("x;", statement_tokens());
        let name = builder.node(IDENTIFIER, vec![TokenId::new(0).into()]);
        let stmt = builder.node(EXPRESSION_STATEMENT, vec![name.into(), TokenId::new(1).into()]);
        let root = builder.node(COMPILATION_UNIT, vec![stmt.into(), TokenId::new(2).into()]);
        let tree = builder.finish(root).unwrap();

        assert_eq!(tree.node_data(name).parent(), Some(stmt));
        assert_eq!(tree.node_data(stmt).parent(), Some(root));
        assert_eq!(tree.node_data(root).parent(), None);
        assert_eq!(tree.token_parent(TokenId::new(1)), stmt);
        assert_eq!(tree.node(stmt).text(), "x;");
        assert!(tree.verify().is_ok());
    }

    #[test]
    fn rejects_unowned_token() {
        let mut builder = TreeBuilder::new("x;", statement_tokens());
        let name = builder.node(IDENTIFIER, vec![TokenId::new(0).into()]);
        let root = builder.node(COMPILATION_UNIT, vec![name.into(), TokenId::new(2).into()]);
        assert_eq!(
            builder.finish(root).unwrap_err(),
            TreeError::UnownedToken { kind: SEMICOLON, offset: TextSize::from(1) }
        );
    }

    #[test]
    fn rejects_out_of_order_children() {
        let mut builder = TreeBuilder::new("x;", statement_tokens());
        let name = builder.node(IDENTIFIER, vec![TokenId::new(0).into()]);
        let stmt = builder.node(EXPRESSION_STATEMENT, vec![TokenId::new(1).into(), name.into()]);
        let root = builder.node(COMPILATION_UNIT, vec![stmt.into(), TokenId::new(2).into()]);
        assert!(matches!(
            builder.finish(root),
            Err(TreeError::OutOfOrder { kind: EXPRESSION_STATEMENT, .. })
        ));
    }

    #[test]
    fn rejects_orphans_and_empty_nodes() {
        let mut builder = TreeBuilder::new("x;", statement_tokens());
        let name = builder.node(IDENTIFIER, vec![TokenId::new(0).into()]);
        let _stray = builder.node(EXPRESSION_STATEMENT, vec![TokenId::new(1).into()]);
        let root = builder.node(COMPILATION_UNIT, vec![name.into(), TokenId::new(2).into()]);
        assert_eq!(
            builder.finish(root).unwrap_err(),
            TreeError::OrphanNode { kind: EXPRESSION_STATEMENT }
        );

        let mut builder = TreeBuilder::new("x;", statement_tokens());
        let empty = builder.node(MODIFIERS, Vec::new());
        let root = builder.node(COMPILATION_UNIT, vec![empty.into()]);
        assert_eq!(builder.finish(root).unwrap_err(), TreeError::EmptyNode { kind: MODIFIERS });
    }
}
