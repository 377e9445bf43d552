use javelin_syntax::SyntaxKind::{self, *};
use javelin_syntax::TextSize;

use super::items::{class_body, formal_param, modifiers};
use super::parser::{PResult, Parser};
use super::stmts::{block, switch_body};
use super::types::{self, type_args};
use crate::ast::*;

const INSTANCEOF_PRECEDENCE: u8 = 7;

/// Any expression, lambdas and assignments included.
pub(crate) fn expr(p: &mut Parser<'_>) -> PResult<Expr> {
    if let Some(lambda) = lambda(p)? {
        return Ok(lambda);
    }
    let start = p.start();
    let lhs = conditional(p)?;
    let Some(op) = AssignOp::from_token(p.peek_kind()) else {
        return Ok(lhs);
    };
    p.advance();
    let value = expr(p)?;
    Ok(Expr::Assign { range: p.range_from(start), op, target: Box::new(lhs), value: Box::new(value) })
}

/// `a ? b : c` and everything that binds tighter.
pub(crate) fn conditional(p: &mut Parser<'_>) -> PResult<Expr> {
    let start = p.start();
    let cond = binary(p, 0)?;
    if !p.eat(QUESTION) {
        return Ok(cond);
    }
    let then = expr(p)?;
    p.expect(COLON)?;
    let else_ = match lambda(p)? {
        Some(lambda) => lambda,
        None => conditional(p)?,
    };
    Ok(Expr::Conditional {
        range: p.range_from(start),
        cond: Box::new(cond),
        then: Box::new(then),
        else_: Box::new(else_),
    })
}

fn binary(p: &mut Parser<'_>, min_precedence: u8) -> PResult<Expr> {
    let start = p.start();
    let mut lhs = unary(p)?;
    loop {
        if p.at(INSTANCEOF_KW) {
            if INSTANCEOF_PRECEDENCE <= min_precedence {
                break;
            }
            p.advance();
            let target = instanceof_target(p)?;
            lhs = Expr::InstanceOf { range: p.range_from(start), expr: Box::new(lhs), target: Box::new(target) };
            continue;
        }
        let Some(op) = BinaryOp::from_token(p.peek_kind()) else { break };
        let precedence = op.precedence();
        if precedence <= min_precedence {
            break;
        }
        p.advance();
        let rhs = binary(p, precedence)?;
        lhs = Expr::Binary { range: p.range_from(start), op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
    }
    Ok(lhs)
}

fn instanceof_target(p: &mut Parser<'_>) -> PResult<InstanceOfTarget> {
    let start = p.start();
    let modifiers = modifiers(p)?;
    let ty = types::ty(p)?;
    if !p.at(IDENT) {
        return match modifiers {
            Some(_) => Err(p.expected("identifier")),
            None => Ok(InstanceOfTarget::Type(ty)),
        };
    }
    let name = p.ident()?;
    Ok(InstanceOfTarget::Pattern(PatternDecl { range: p.range_from(start), modifiers, ty, name, binding: None }))
}

fn unary(p: &mut Parser<'_>) -> PResult<Expr> {
    let start = p.start();
    let op = match p.peek_kind() {
        PLUS => Some(UnaryOp::Plus),
        MINUS => Some(UnaryOp::Minus),
        BANG => Some(UnaryOp::Not),
        TILDE => Some(UnaryOp::BitNot),
        PLUS2 => Some(UnaryOp::PreInc),
        MINUS2 => Some(UnaryOp::PreDec),
        _ => None,
    };
    if let Some(op) = op {
        p.advance();
        let operand = unary(p)?;
        return Ok(Expr::Unary { range: p.range_from(start), op, operand: Box::new(operand) });
    }
    if p.at(L_PAREN) {
        if let Some(cast) = cast(p)? {
            return Ok(cast);
        }
    }
    postfix(p)
}

/// Tokens that can start the operand of a cast to a reference type.
fn starts_cast_operand(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || matches!(
            kind,
            IDENT | L_PAREN | BANG | TILDE | THIS_KW | SUPER_KW | NEW_KW | SWITCH_KW
        )
        || types::is_primitive_kind(kind)
}

fn cast(p: &mut Parser<'_>) -> PResult<Option<Expr>> {
    let start = p.start();
    let checkpoint = p.checkpoint();
    let primitive = types::is_primitive_kind(p.nth(1));
    p.advance();

    let ty = types::ty(p).and_then(|ty| if p.at(AMP) && !primitive { intersection(p, ty) } else { Ok(ty) });
    let ty = match ty {
        Ok(ty) if p.at(R_PAREN) => ty,
        _ => {
            p.restore(checkpoint);
            return Ok(None);
        }
    };
    let is_array = matches!(ty, TypeRef::Array { .. });
    if (!primitive || is_array) && !starts_cast_operand(p.nth(1)) {
        p.restore(checkpoint);
        return Ok(None);
    }
    p.advance();

    let operand = match lambda(p)? {
        Some(lambda) => lambda,
        None => unary(p)?,
    };
    Ok(Some(Expr::Cast { range: p.range_from(start), ty, expr: Box::new(operand) }))
}

/// `A & B & ...` after the first type of a cast.
fn intersection(p: &mut Parser<'_>, first: TypeRef) -> PResult<TypeRef> {
    let start = first.range().start();
    let mut bounds = vec![first];
    while p.eat(AMP) {
        bounds.push(types::ty(p)?);
    }
    Ok(TypeRef::Intersection { range: p.range_from(start), bounds })
}

fn postfix(p: &mut Parser<'_>) -> PResult<Expr> {
    let start = p.start();
    let mut current = primary(p)?;
    loop {
        current = match p.peek_kind() {
            DOT => {
                p.advance();
                member_suffix(p, start, current)?
            }
            L_BRACKET => {
                p.advance();
                let index = expr(p)?;
                p.expect(R_BRACKET)?;
                Expr::ArrayAccess { range: p.range_from(start), array: Box::new(current), index: Box::new(index) }
            }
            PLUS2 | MINUS2 => {
                let op = if p.at(PLUS2) { UnaryOp::PostInc } else { UnaryOp::PostDec };
                p.advance();
                Expr::Unary { range: p.range_from(start), op, operand: Box::new(current) }
            }
            COLON_COLON => {
                p.advance();
                let name = if p.eat(NEW_KW) { None } else { Some(name_ref(p)?) };
                Expr::MethodRef { range: p.range_from(start), target: Box::new(current), name }
            }
            _ => return Ok(current),
        };
    }
}

/// What follows `target.`
fn member_suffix(p: &mut Parser<'_>, start: TextSize, target: Expr) -> PResult<Expr> {
    let target = Box::new(target);
    match p.peek_kind() {
        IDENT => {
            let name = name_ref(p)?;
            if p.at(L_PAREN) {
                let args = arguments(p)?;
                Ok(Expr::MethodCall { range: p.range_from(start), target: Some(target), type_args: None, name, args })
            } else {
                Ok(Expr::FieldAccess { range: p.range_from(start), target, name })
            }
        }
        LT => {
            let type_args = Some(type_args(p)?);
            let name = name_ref(p)?;
            let args = arguments(p)?;
            Ok(Expr::MethodCall { range: p.range_from(start), target: Some(target), type_args, name, args })
        }
        THIS_KW | SUPER_KW => {
            let name = keyword_ref(p);
            Ok(Expr::FieldAccess { range: p.range_from(start), target, name })
        }
        NEW_KW => new_expr(p, start, Some(target)),
        CLASS_KW => {
            p.advance();
            let ty = expr_to_type(&target).ok_or_else(|| p.error("Syntax error, type expected before \".class\""))?;
            Ok(Expr::ClassLiteral { range: p.range_from(start), ty })
        }
        _ => Err(p.expected("identifier")),
    }
}

/// Reinterprets a dotted name as a type.
fn expr_to_type(expr: &Expr) -> Option<TypeRef> {
    match expr {
        Expr::Name(name) => Some(TypeRef::Named(NamedType {
            range: name.ident.range,
            qualifier: None,
            name: name.ident.clone(),
            binding: None,
            args: None,
        })),
        Expr::FieldAccess { range, target, name } => Some(TypeRef::Named(NamedType {
            range: *range,
            qualifier: Some(Box::new(expr_to_type(target)?)),
            name: name.ident.clone(),
            binding: None,
            args: None,
        })),
        _ => None,
    }
}

fn name_ref(p: &mut Parser<'_>) -> PResult<NameRef> {
    Ok(NameRef { ident: p.ident()?, binding: None })
}

fn keyword_ref(p: &mut Parser<'_>) -> NameRef {
    let range = p.advance();
    NameRef { ident: Ident { range, text: p.text(range).to_owned() }, binding: None }
}

fn primary(p: &mut Parser<'_>) -> PResult<Expr> {
    let start = p.start();
    let kind = p.peek_kind();
    if let Some(kind) = literal_kind(kind) {
        p.advance();
        return Ok(Expr::Literal { range: p.range_from(start), kind });
    }
    match kind {
        THIS_KW | SUPER_KW => {
            if p.nth(1) == L_PAREN {
                let name = keyword_ref(p);
                let args = arguments(p)?;
                return Ok(Expr::MethodCall { range: p.range_from(start), target: None, type_args: None, name, args });
            }
            p.advance();
            let range = p.range_from(start);
            Ok(if kind == THIS_KW { Expr::This { range } } else { Expr::Super { range } })
        }
        IDENT => {
            let generic_or_array = p.nth(1) == LT || (p.nth(1) == L_BRACKET && p.nth(2) == R_BRACKET);
            if generic_or_array {
                if let Some(expr) = p.speculate(|p| type_primary(p, start)) {
                    return Ok(expr);
                }
            }
            let name = name_ref(p)?;
            if p.at(L_PAREN) {
                let args = arguments(p)?;
                return Ok(Expr::MethodCall { range: p.range_from(start), target: None, type_args: None, name, args });
            }
            Ok(Expr::Name(name))
        }
        _ if types::is_primitive_kind(kind) => type_primary(p, start),
        L_PAREN => {
            p.advance();
            let expr = expr(p)?;
            p.expect(R_PAREN)?;
            Ok(Expr::Paren { range: p.range_from(start), expr: Box::new(expr) })
        }
        NEW_KW => new_expr(p, start, None),
        SWITCH_KW => {
            p.advance();
            p.expect(L_PAREN)?;
            let selector = expr(p)?;
            p.expect(R_PAREN)?;
            let body = switch_body(p)?;
            Ok(Expr::Switch { range: p.range_from(start), selector: Box::new(selector), body })
        }
        _ => Err(p.expected("Expression")),
    }
}

/// `int.class`, `String[].class`, `int[]::new`, `List<String>::new`
fn type_primary(p: &mut Parser<'_>, start: TextSize) -> PResult<Expr> {
    let ty = types::ty(p)?;
    if p.at(COLON_COLON) {
        return Ok(Expr::Type(ty));
    }
    if p.at(DOT) && p.nth(1) == CLASS_KW {
        p.advance();
        p.advance();
        return Ok(Expr::ClassLiteral { range: p.range_from(start), ty });
    }
    Err(p.expected("\"::\" or \".class\""))
}

fn literal_kind(kind: SyntaxKind) -> Option<LiteralKind> {
    Some(match kind {
        INT_LITERAL => LiteralKind::Int,
        LONG_LITERAL => LiteralKind::Long,
        FLOAT_LITERAL => LiteralKind::Float,
        DOUBLE_LITERAL => LiteralKind::Double,
        CHAR_LITERAL => LiteralKind::Char,
        STRING_LITERAL => LiteralKind::String,
        TEXT_BLOCK => LiteralKind::TextBlock,
        TRUE_KW => LiteralKind::True,
        FALSE_KW => LiteralKind::False,
        NULL_KW => LiteralKind::Null,
        _ => return None,
    })
}

fn new_expr(p: &mut Parser<'_>, start: TextSize, outer: Option<Box<Expr>>) -> PResult<Expr> {
    p.expect(NEW_KW)?;
    let ty = types::non_array_type(p)?;

    if p.at(L_BRACKET) && outer.is_none() {
        let mut dims = Vec::new();
        while p.at(L_BRACKET) {
            let dim_start = p.start();
            p.advance();
            let expr = if p.at(R_BRACKET) { None } else { Some(expr(p)?) };
            p.expect(R_BRACKET)?;
            dims.push(DimExpr { range: p.range_from(dim_start), expr });
        }
        let init = if p.at(L_BRACE) { Some(array_init(p)?) } else { None };
        return Ok(Expr::NewArray { range: p.range_from(start), element: ty, dims, init });
    }

    let args = arguments(p)?;
    let body = if p.at(L_BRACE) { Some(class_body(p, TypeDeclKind::Class)?) } else { None };
    Ok(Expr::New { range: p.range_from(start), outer, ty, args, body, anonymous_binding: None })
}

pub(crate) fn arguments(p: &mut Parser<'_>) -> PResult<Args> {
    let start = p.start();
    p.expect(L_PAREN)?;
    let mut exprs = Vec::new();
    if !p.at(R_PAREN) {
        loop {
            exprs.push(expr(p)?);
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    p.expect(R_PAREN)?;
    Ok(Args { range: p.range_from(start), exprs })
}

/// Initializer of a variable: an expression or a braced array initializer.
pub(crate) fn var_init(p: &mut Parser<'_>) -> PResult<Expr> {
    if p.at(L_BRACE) { array_init(p).map(Expr::ArrayInit) } else { expr(p) }
}

fn array_init(p: &mut Parser<'_>) -> PResult<ArrayInit> {
    let start = p.start();
    p.expect(L_BRACE)?;
    let mut items = Vec::new();
    while !p.at(R_BRACE) {
        items.push(var_init(p)?);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(R_BRACE)?;
    Ok(ArrayInit { range: p.range_from(start), items })
}

/// A lambda expression, if one starts here.
fn lambda(p: &mut Parser<'_>) -> PResult<Option<Expr>> {
    let start = p.start();
    let (params, parenthesized) = if p.at(IDENT) && p.nth(1) == ARROW {
        let name = p.ident()?;
        let param = implicit_param(name);
        (Params { range: param.range, items: vec![param] }, false)
    } else if p.at(L_PAREN) && p.matching_close(0).is_some_and(|close| p.nth(close + 1) == ARROW) {
        (lambda_params(p)?, true)
    } else {
        return Ok(None);
    };
    p.expect(ARROW)?;
    let body = if p.at(L_BRACE) { LambdaBody::Block(block(p)?) } else { LambdaBody::Expr(Box::new(expr(p)?)) };
    Ok(Some(Expr::Lambda { range: p.range_from(start), params, parenthesized, body }))
}

fn implicit_param(name: Ident) -> Param {
    Param { range: name.range, modifiers: None, ty: None, varargs: None, name, binding: None, dims: Vec::new() }
}

fn lambda_params(p: &mut Parser<'_>) -> PResult<Params> {
    let start = p.start();
    p.expect(L_PAREN)?;
    let mut items = Vec::new();
    let implicit = p.at(IDENT) && matches!(p.nth(1), COMMA | R_PAREN);
    if !p.at(R_PAREN) {
        loop {
            items.push(if implicit { implicit_param(p.ident()?) } else { formal_param(p)? });
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    p.expect(R_PAREN)?;
    Ok(Params { range: p.range_from(start), items })
}
