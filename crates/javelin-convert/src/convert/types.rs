use javelin_frontend::ast::{NamedType, TypeArgs, TypeRef};
use javelin_syntax::SyntaxKind::*;
use javelin_syntax::{DeclaredType, Dimension, DimensionPosition, NodeId, TextRange};

use super::Converter;
use crate::ConvertError;

impl Converter<'_> {
    pub(super) fn ty(&mut self, ty: &TypeRef) -> Result<NodeId, ConvertError> {
        match ty {
            TypeRef::Primitive { range, .. } => self.leaf(PRIMITIVE_TYPE, *range),
            TypeRef::Var { range } => self.leaf(VAR_TYPE, *range),
            TypeRef::Named(named) => self.named_type(named),
            TypeRef::Array { range, element, .. } => {
                let element = self.ty(element)?;
                self.node(ARRAY_TYPE, *range, vec![element])
            }
            TypeRef::Wildcard { range, bound } => {
                let bound = bound.as_ref().map(|(_, bound)| self.ty(bound)).transpose()?;
                self.node(WILDCARD_TYPE, *range, bound.into_iter().collect())
            }
            TypeRef::Union { range, alternatives } => {
                let alternatives = alternatives.iter().map(|ty| self.ty(ty)).collect::<Result<_, _>>()?;
                self.node(UNION_TYPE, *range, alternatives)
            }
            TypeRef::Intersection { range, bounds } => {
                let bounds = bounds.iter().map(|ty| self.ty(ty)).collect::<Result<_, _>>()?;
                self.node(INTERSECTION_TYPE, *range, bounds)
            }
        }
    }

    /// `CLASS_TYPE`, wrapped in `PARAMETERIZED_TYPE` when it has arguments.
    fn named_type(&mut self, named: &NamedType) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        if let Some(qualifier) = &named.qualifier {
            children.push(self.ty(qualifier)?);
        }
        let name = self.ident(&named.name)?;
        self.reference(named.binding, name);
        children.push(name);

        let class_range = TextRange::new(named.range.start(), named.name.range.end());
        let class_type = self.node(CLASS_TYPE, class_range, children)?;
        match &named.args {
            Some(args) => {
                let args = self.type_args(args)?;
                self.node(PARAMETERIZED_TYPE, named.range, vec![class_type, args])
            }
            None => Ok(class_type),
        }
    }

    pub(super) fn type_args(&mut self, args: &TypeArgs) -> Result<NodeId, ConvertError> {
        let items = args.args.iter().map(|ty| self.ty(ty)).collect::<Result<_, _>>()?;
        self.node(TYPE_ARGUMENTS, args.range, items)
    }

    /// Declared type rooted at `type_node`, the node built for `ty`.
    pub(super) fn declared_type(
        &self,
        type_node: NodeId,
        ty: &TypeRef,
        after_name: Vec<Dimension>,
    ) -> DeclaredType {
        let mut dimensions = Vec::new();
        self.type_dimensions(ty, &mut dimensions);
        dimensions.extend(after_name);
        DeclaredType { type_node, base: self.base_of(type_node), dimensions }
    }

    /// `[]` pairs of an array type, innermost first.
    fn type_dimensions(&self, ty: &TypeRef, out: &mut Vec<Dimension>) {
        let TypeRef::Array { element, dim, .. } = ty else { return };
        self.type_dimensions(element, out);
        if let Some((open, close)) = self.span(*dim) {
            out.push(Dimension { open, close, position: DimensionPosition::AfterType });
        }
    }

    fn base_of(&self, mut node: NodeId) -> NodeId {
        while self.builder.kind(node) == ARRAY_TYPE {
            match self.builder.children(node).iter().find_map(|child| child.into_node()) {
                Some(element) => node = element,
                None => break,
            }
        }
        node
    }
}
