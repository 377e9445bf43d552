//! Declared types of variables, parameters and methods.
//!
//! Java allows array brackets after the type (`int[] a`), after the name
//! (`int a[]`), or both. The tree keeps the brackets where they were written;
//! this side table records the normalized shape next to the lexical layout.

use crate::{NodeId, SyntaxTree, TokenId};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DimensionPosition {
    AfterType,
    AfterName,
}

/// One `[]` pair. For varargs `open` and `close` are both the `...` token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Dimension {
    pub open: TokenId,
    pub close: TokenId,
    pub position: DimensionPosition,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeclaredType {
    /// Type node as written before the name. Later declarators of a split
    /// declaration point at the node owned by the first one.
    pub type_node: NodeId,
    /// Innermost non-array type.
    pub base: NodeId,
    /// Type-side dimensions first, then name-side ones.
    pub dimensions: Vec<Dimension>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeShape {
    Base(NodeId),
    Array(Box<TypeShape>),
}

impl TypeShape {
    pub fn base(&self) -> NodeId {
        match self {
            Self::Base(node) => *node,
            Self::Array(element) => element.base(),
        }
    }

    pub fn rank(&self) -> usize {
        match self {
            Self::Base(_) => 0,
            Self::Array(element) => element.rank() + 1,
        }
    }
}

impl DeclaredType {
    /// Array wrappers nested around the base type in declaration order.
    pub fn shape(&self) -> TypeShape {
        self.dimensions
            .iter()
            .fold(TypeShape::Base(self.base), |shape, _| TypeShape::Array(Box::new(shape)))
    }

    pub fn name_side_dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.iter().filter(|dim| dim.position == DimensionPosition::AfterName)
    }

    pub fn has_name_side_dimensions(&self) -> bool {
        self.name_side_dimensions().next().is_some()
    }

    /// Normalized type text, e.g. `int[][]` for `int[] a[]`.
    pub fn display(&self, tree: &SyntaxTree) -> String {
        let mut text = String::new();
        let mut previous_end = None;
        for token in tree.node(self.base).tokens() {
            if previous_end.is_some_and(|end| end < token.text_range().start()) {
                text.push(' ');
            }
            text.push_str(token.text());
            previous_end = Some(token.text_range().end());
        }
        for _ in &self.dimensions {
            text.push_str("[]");
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use text_size::{TextRange, TextSize};

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{Position, SyntaxKind, Token, TreeBuilder, WalkEvent};

    fn tokens(items: &[(SyntaxKind, &str, u32)]) -> Vec<Token> {
        items
            .iter()
            .map(|&(kind, text, start)| {
                let range = TextRange::at(TextSize::from(start), TextSize::of(text));
                Token::new(kind, text, range, Position::new(1, start), Vec::new())
            })
            .collect()
    }

    #[test]
    fn name_side_dimension_shape() {
        let text = "int a[];";
        let tokens = tokens(&[
            (INT_KW, "int", 0),
            (IDENT, "a", 4),
            (L_BRACKET, "[", 5),
            (R_BRACKET, "]", 6),
            (SEMICOLON, ";", 7),
            (EOF, "", 8),
        ]);
        let mut builder = TreeBuilder::new(text, tokens);
        let ty = builder.node(PRIMITIVE_TYPE, vec![TokenId::new(0).into()]);
        let name = builder.node(IDENTIFIER, vec![TokenId::new(1).into()]);
        let dim = builder.node(ARRAY_DIMENSION, vec![TokenId::new(2).into(), TokenId::new(3).into()]);
        let var = builder.node(
            VARIABLE,
            vec![ty.into(), name.into(), dim.into(), TokenId::new(4).into()],
        );
        builder.set_declared_type(
            var,
            DeclaredType {
                type_node: ty,
                base: ty,
                dimensions: vec![Dimension {
                    open: TokenId::new(2),
                    close: TokenId::new(3),
                    position: DimensionPosition::AfterName,
                }],
            },
        );
        let root = builder.node(COMPILATION_UNIT, vec![var.into(), TokenId::new(5).into()]);
        let tree = builder.finish(root).unwrap();

        let declared = tree.declared_type(var).unwrap();
        assert_eq!(declared.shape(), TypeShape::Array(Box::new(TypeShape::Base(ty))));
        assert_eq!(declared.shape().rank(), 1);
        assert!(declared.has_name_side_dimensions());
        assert_eq!(declared.display(&tree), "int[]");

        let entered: Vec<SyntaxKind> = tree
            .root()
            .preorder()
            .filter_map(|event| match event {
                WalkEvent::Enter(node) => Some(node.kind()),
                WalkEvent::Leave(_) => None,
            })
            .collect();
        assert_eq!(
            entered,
            [COMPILATION_UNIT, VARIABLE, PRIMITIVE_TYPE, IDENTIFIER, ARRAY_DIMENSION]
        );
        assert_eq!(tree.node(dim).prev_sibling().map(|node| node.kind()), Some(IDENTIFIER));
        assert_eq!(tree.node_position(var).end, Position::new(1, 8));
    }
}
