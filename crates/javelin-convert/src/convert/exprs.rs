use javelin_frontend::ast::{Args, ArrayInit, Expr, InstanceOfTarget, LambdaBody, PatternDecl};
use javelin_syntax::NodeId;
use javelin_syntax::SyntaxKind::*;
use javelin_syntax::TextRange;

use super::Converter;
use crate::ConvertError;

impl Converter<'_> {
    pub(super) fn expr(&mut self, expr: &Expr) -> Result<NodeId, ConvertError> {
        match expr {
            Expr::Literal { range, .. } => self.leaf(LITERAL, *range),
            Expr::Name(name) => self.name_ref(name),
            Expr::This { range } | Expr::Super { range } => self.leaf(IDENTIFIER, *range),
            Expr::FieldAccess { range, target, name } => {
                let children = vec![self.expr(target)?, self.name_ref(name)?];
                self.node(MEMBER_SELECT, *range, children)
            }
            Expr::MethodCall { range, target, type_args, name, args } => {
                let mut children = Vec::new();
                if let Some(target) = target {
                    let mut select = vec![self.expr(target)?];
                    select.extend(type_args.as_ref().map(|args| self.type_args(args)).transpose()?);
                    select.push(self.name_ref(name)?);
                    let select_range = TextRange::new(range.start(), name.ident.range.end());
                    children.push(self.node(MEMBER_SELECT, select_range, select)?);
                } else {
                    children.extend(type_args.as_ref().map(|args| self.type_args(args)).transpose()?);
                    children.push(self.name_ref(name)?);
                }
                children.push(self.arguments(args)?);
                self.node(METHOD_INVOCATION, *range, children)
            }
            Expr::New { range, outer, ty, args, body, anonymous_binding } => {
                let mut children = Vec::new();
                if let Some(outer) = outer {
                    children.push(self.expr(outer)?);
                }
                children.push(self.ty(ty)?);
                children.push(self.arguments(args)?);
                if let Some(body) = body {
                    children.push(self.anonymous_body(body, *anonymous_binding)?);
                }
                self.node(NEW_CLASS, *range, children)
            }
            Expr::NewArray { range, element, dims, init } => {
                let mut children = vec![self.ty(element)?];
                for dim in dims {
                    let size = dim.expr.iter().map(|expr| self.expr(expr)).collect::<Result<_, _>>()?;
                    children.push(self.node(ARRAY_DIMENSION, dim.range, size)?);
                }
                if let Some(init) = init {
                    children.push(self.array_init(init)?);
                }
                self.node(NEW_ARRAY, *range, children)
            }
            Expr::ArrayInit(init) => self.array_init(init),
            Expr::ArrayAccess { range, array, index } => {
                let children = vec![self.expr(array)?, self.expr(index)?];
                self.node(ARRAY_ACCESS, *range, children)
            }
            Expr::Unary { range, op, operand } => {
                let kind = if op.is_postfix() { POSTFIX_EXPRESSION } else { PREFIX_EXPRESSION };
                let operand = self.expr(operand)?;
                self.node(kind, *range, vec![operand])
            }
            Expr::Binary { range, lhs, rhs, .. } => {
                let children = vec![self.expr(lhs)?, self.expr(rhs)?];
                self.node(BINARY_EXPRESSION, *range, children)
            }
            Expr::Assign { range, target, value, .. } => {
                let children = vec![self.expr(target)?, self.expr(value)?];
                self.node(ASSIGNMENT, *range, children)
            }
            Expr::Conditional { range, cond, then, else_ } => {
                let children = vec![self.expr(cond)?, self.expr(then)?, self.expr(else_)?];
                self.node(CONDITIONAL_EXPRESSION, *range, children)
            }
            Expr::InstanceOf { range, expr, target } => {
                let expr = self.expr(expr)?;
                let target = match &**target {
                    InstanceOfTarget::Type(ty) => self.ty(ty)?,
                    InstanceOfTarget::Pattern(pattern) => self.pattern(pattern)?,
                };
                self.node(INSTANCEOF_EXPRESSION, *range, vec![expr, target])
            }
            Expr::Cast { range, ty, expr } => {
                let children = vec![self.ty(ty)?, self.expr(expr)?];
                self.node(TYPE_CAST, *range, children)
            }
            Expr::Paren { range, expr } => {
                let expr = self.expr(expr)?;
                self.node(PARENTHESIZED_EXPRESSION, *range, vec![expr])
            }
            Expr::ClassLiteral { range, ty } => {
                let ty = self.ty(ty)?;
                self.node(CLASS_LITERAL, *range, vec![ty])
            }
            Expr::Lambda { range, params, body, .. } => {
                let params = self.params(params)?;
                let frame = self.semantic.enter_body();
                let body = match body {
                    LambdaBody::Expr(expr) => self.expr(expr),
                    LambdaBody::Block(block) => self.block(block),
                };
                self.semantic.exit_body(frame);
                self.node(LAMBDA_EXPRESSION, *range, vec![params, body?])
            }
            Expr::MethodRef { range, target, name } => {
                let mut children = vec![self.expr(target)?];
                if let Some(name) = name {
                    children.push(self.name_ref(name)?);
                }
                self.node(METHOD_REFERENCE, *range, children)
            }
            Expr::Switch { range, selector, body } => {
                let mut children = vec![self.expr(selector)?];
                children.extend(self.switch_body(body)?);
                self.node(SWITCH_EXPRESSION, *range, children)
            }
            Expr::Annotation(annotation) => self.annotation(annotation),
            Expr::Type(ty) => self.ty(ty),
        }
    }

    pub(super) fn arguments(&mut self, args: &Args) -> Result<NodeId, ConvertError> {
        let exprs = args.exprs.iter().map(|expr| self.expr(expr)).collect::<Result<_, _>>()?;
        self.node(ARGUMENTS, args.range, exprs)
    }

    fn array_init(&mut self, init: &ArrayInit) -> Result<NodeId, ConvertError> {
        let items = init.items.iter().map(|expr| self.expr(expr)).collect::<Result<_, _>>()?;
        self.node(ARRAY_INITIALIZER, init.range, items)
    }

    pub(super) fn pattern(&mut self, pattern: &PatternDecl) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        children.extend(self.modifiers(pattern.modifiers.as_ref())?);
        let type_node = self.ty(&pattern.ty)?;
        children.push(type_node);
        children.push(self.ident(&pattern.name)?);

        let node = self.node(PATTERN, pattern.range, children)?;
        let declared = self.declared_type(type_node, &pattern.ty, Vec::new());
        self.builder.set_declared_type(node, declared);
        self.declare(pattern.binding, node);
        Ok(node)
    }
}
