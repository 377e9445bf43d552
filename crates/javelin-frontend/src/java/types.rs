use javelin_syntax::SyntaxKind::{self, *};
use javelin_syntax::{Feature, TextSize};

use super::items::annotation;
use super::parser::{PResult, Parser};
use crate::ast::{BoundKind, NamedType, PrimitiveKind, TypeArgs, TypeParam, TypeParams, TypeRef};

pub(crate) fn is_primitive_kind(kind: SyntaxKind) -> bool {
    PrimitiveKind::from_token(kind).is_some()
}

pub(crate) fn at_primitive(p: &Parser<'_>) -> bool {
    is_primitive_kind(p.peek_kind())
}

/// A full type, array dimensions included.
pub(crate) fn ty(p: &mut Parser<'_>) -> PResult<TypeRef> {
    let start = p.start();
    let base = non_array_type(p)?;
    Ok(dims(p, start, base))
}

pub(crate) fn non_array_type(p: &mut Parser<'_>) -> PResult<TypeRef> {
    let start = p.start();
    if let Some(kind) = PrimitiveKind::from_token(p.peek_kind()) {
        p.advance();
        return Ok(TypeRef::Primitive { range: p.range_from(start), kind });
    }
    class_type(p)
}

/// `a.b.C<T>.D<U>`
pub(crate) fn class_type(p: &mut Parser<'_>) -> PResult<TypeRef> {
    let start = p.start();
    let mut current: Option<TypeRef> = None;
    loop {
        let name = p.ident()?;
        let args = if p.at(LT) { Some(type_args(p)?) } else { None };
        current = Some(TypeRef::Named(NamedType {
            range: p.range_from(start),
            qualifier: current.map(Box::new),
            name,
            binding: None,
            args,
        }));
        if p.at(DOT) && p.nth(1) == IDENT {
            p.advance();
        } else {
            break;
        }
    }
    current.ok_or_else(|| p.expected("type"))
}

/// Wraps `ty` in one array type per `[]` pair that follows.
pub(crate) fn dims(p: &mut Parser<'_>, start: TextSize, mut ty: TypeRef) -> TypeRef {
    while p.at(L_BRACKET) && p.nth(1) == R_BRACKET {
        let open = p.advance();
        let close = p.advance();
        ty = TypeRef::Array { range: p.range_from(start), element: Box::new(ty), dim: open.cover(close) };
    }
    ty
}

pub(crate) fn type_args(p: &mut Parser<'_>) -> PResult<TypeArgs> {
    let start = p.start();
    p.expect(LT)?;
    let mut args = Vec::new();
    if !p.peek_kind().starts_with_gt() {
        loop {
            args.push(type_arg(p)?);
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    p.eat_gt()?;
    Ok(TypeArgs { range: p.range_from(start), args })
}

fn type_arg(p: &mut Parser<'_>) -> PResult<TypeRef> {
    if !p.at(QUESTION) {
        return ty(p);
    }
    let start = p.start();
    p.advance();
    let bound = match p.peek_kind() {
        EXTENDS_KW => Some(BoundKind::Extends),
        SUPER_KW => Some(BoundKind::Super),
        _ => None,
    };
    let bound = match bound {
        Some(kind) => {
            p.advance();
            Some((kind, Box::new(ty(p)?)))
        }
        None => None,
    };
    Ok(TypeRef::Wildcard { range: p.range_from(start), bound })
}

pub(crate) fn type_params(p: &mut Parser<'_>) -> PResult<TypeParams> {
    let start = p.start();
    p.expect(LT)?;
    let mut items = Vec::new();
    loop {
        items.push(type_param(p)?);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.eat_gt()?;
    Ok(TypeParams { range: p.range_from(start), items })
}

fn type_param(p: &mut Parser<'_>) -> PResult<TypeParam> {
    let start = p.start();
    let mut annotations = Vec::new();
    while p.at(AT) {
        annotations.push(annotation(p)?);
    }
    let name = p.ident()?;
    let mut bounds = Vec::new();
    if p.eat(EXTENDS_KW) {
        loop {
            bounds.push(ty(p)?);
            if !p.eat(AMP) {
                break;
            }
        }
    }
    Ok(TypeParam { range: p.range_from(start), annotations, name, binding: None, bounds })
}

/// Comma separated types, as after `implements` or `throws`.
pub(crate) fn type_list(p: &mut Parser<'_>) -> PResult<Vec<TypeRef>> {
    let mut types = Vec::new();
    loop {
        types.push(ty(p)?);
        if !p.eat(COMMA) {
            return Ok(types);
        }
    }
}

/// `A | B | C` in a catch clause.
pub(crate) fn catch_type(p: &mut Parser<'_>) -> PResult<TypeRef> {
    let start = p.start();
    let first = ty(p)?;
    if !p.at(PIPE) {
        return Ok(first);
    }
    let mut alternatives = vec![first];
    while p.eat(PIPE) {
        alternatives.push(ty(p)?);
    }
    Ok(TypeRef::Union { range: p.range_from(start), alternatives })
}

/// `var` as the type of a local variable, at levels that infer it.
pub(crate) fn local_var_type(p: &Parser<'_>, ty: TypeRef) -> TypeRef {
    match ty {
        TypeRef::Named(NamedType { range, qualifier: None, ref name, args: None, .. })
            if name.text == "var" && p.supports(Feature::LocalVarInference) =>
        {
            TypeRef::Var { range }
        }
        ty => ty,
    }
}
