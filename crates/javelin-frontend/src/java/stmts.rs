use javelin_syntax::SyntaxKind::*;
use javelin_syntax::{Feature, TextSize};

use super::exprs::{self, expr};
use super::items::{at_type_decl, bracket_pairs, modifiers, type_decl, var_declarators};
use super::parser::{PResult, Parser};
use super::types::{self, local_var_type};
use crate::ast::*;

pub(crate) fn block(p: &mut Parser<'_>) -> PResult<Block> {
    let start = p.start();
    p.expect(L_BRACE)?;
    let mut stmts = Vec::new();
    while !p.at(R_BRACE) && !p.at(EOF) {
        stmts.push(stmt(p)?);
    }
    p.expect(R_BRACE)?;
    Ok(Block { range: p.range_from(start), stmts })
}

pub(crate) fn stmt(p: &mut Parser<'_>) -> PResult<Stmt> {
    let start = p.start();
    match p.peek_kind() {
        L_BRACE => return block(p).map(Stmt::Block),
        SEMICOLON => {
            p.advance();
            return Ok(Stmt::Empty { range: p.range_from(start) });
        }
        IF_KW => return if_stmt(p),
        WHILE_KW => {
            p.advance();
            let cond = paren_expr(p)?;
            let body = Box::new(stmt(p)?);
            return Ok(Stmt::While { range: p.range_from(start), cond, body });
        }
        DO_KW => {
            p.advance();
            let body = Box::new(stmt(p)?);
            p.expect(WHILE_KW)?;
            let cond = paren_expr(p)?;
            p.expect(SEMICOLON)?;
            return Ok(Stmt::Do { range: p.range_from(start), body, cond });
        }
        FOR_KW => return for_stmt(p),
        RETURN_KW => {
            p.advance();
            let expr = if p.at(SEMICOLON) { None } else { Some(expr(p)?) };
            p.expect(SEMICOLON)?;
            return Ok(Stmt::Return { range: p.range_from(start), expr });
        }
        BREAK_KW | CONTINUE_KW => {
            let is_break = p.at(BREAK_KW);
            p.advance();
            let label = if p.at(IDENT) { Some(p.ident()?) } else { None };
            p.expect(SEMICOLON)?;
            let range = p.range_from(start);
            return Ok(if is_break { Stmt::Break { range, label } } else { Stmt::Continue { range, label } });
        }
        THROW_KW => return throw_stmt(p),
        TRY_KW => return try_stmt(p),
        SWITCH_KW => {
            p.advance();
            let selector = paren_expr(p)?;
            let body = switch_body(p)?;
            return Ok(Stmt::Switch { range: p.range_from(start), selector, body });
        }
        SYNCHRONIZED_KW if p.nth(1) == L_PAREN => {
            p.advance();
            let lock = paren_expr(p)?;
            let body = block(p)?;
            return Ok(Stmt::Synchronized { range: p.range_from(start), lock, body });
        }
        ASSERT_KW => {
            p.advance();
            let cond = expr(p)?;
            let message = if p.eat(COLON) { Some(expr(p)?) } else { None };
            p.expect(SEMICOLON)?;
            return Ok(Stmt::Assert { range: p.range_from(start), cond, message });
        }
        IDENT if p.nth(1) == COLON => {
            let label = p.ident()?;
            p.advance();
            let body = Box::new(stmt(p)?);
            return Ok(Stmt::Labeled { range: p.range_from(start), label, body });
        }
        IDENT if at_yield(p) => {
            p.advance();
            let expr = expr(p)?;
            p.expect(SEMICOLON)?;
            return Ok(Stmt::Yield { range: p.range_from(start), expr });
        }
        _ => {}
    }

    if let Some(stmt) = local_declaration(p, start)? {
        return Ok(stmt);
    }

    let expr = expr(p)?;
    p.expect(SEMICOLON)?;
    Ok(Stmt::Expr { range: p.range_from(start), expr })
}

fn at_yield(p: &Parser<'_>) -> bool {
    p.at_contextual("yield")
        && p.supports(Feature::SwitchExpressions)
        && !matches!(p.nth(1), DOT | L_PAREN | L_BRACKET | PLUS2 | MINUS2 | SEMICOLON)
        && AssignOp::from_token(p.nth(1)).is_none()
}

/// Local class or variable declaration starting at the current token.
fn local_declaration(p: &mut Parser<'_>, start: TextSize) -> PResult<Option<Stmt>> {
    let has_modifiers = matches!(p.peek_kind(), FINAL_KW | ABSTRACT_KW | STATIC_KW | STRICTFP_KW)
        || (p.at(AT) && p.nth(1) != INTERFACE_KW);
    if !has_modifiers && !at_type_decl(p) && !at_local_var(p) {
        return Ok(None);
    }

    let modifiers = modifiers(p)?;
    if at_type_decl(p) {
        return Ok(Some(Stmt::LocalType(type_decl(p, start, modifiers)?)));
    }
    let ty = types::ty(p)?;
    let ty = local_var_type(p, ty);
    let name = p.ident()?;
    Ok(Some(Stmt::LocalVar(var_declarators(p, start, modifiers, ty, name, true)?)))
}

/// Whether a type followed by a declared name starts here.
fn at_local_var(p: &mut Parser<'_>) -> bool {
    if types::at_primitive(p) {
        return p.nth(1) != DOT;
    }
    if !p.at(IDENT) {
        return false;
    }
    let checkpoint = p.checkpoint();
    let found = types::ty(p).is_ok()
        && p.at(IDENT)
        && matches!(p.nth(1), EQ | SEMICOLON | COMMA | L_BRACKET | COLON);
    p.restore(checkpoint);
    found
}

fn paren_expr(p: &mut Parser<'_>) -> PResult<Expr> {
    p.expect(L_PAREN)?;
    let expr = expr(p)?;
    p.expect(R_PAREN)?;
    Ok(expr)
}

fn if_stmt(p: &mut Parser<'_>) -> PResult<Stmt> {
    let start = p.start();
    p.expect(IF_KW)?;
    let cond = paren_expr(p)?;
    let then = Box::new(stmt(p)?);
    let else_ = if p.eat(ELSE_KW) { Some(Box::new(stmt(p)?)) } else { None };
    Ok(Stmt::If { range: p.range_from(start), cond, then, else_ })
}

fn throw_stmt(p: &mut Parser<'_>) -> PResult<Stmt> {
    let start = p.start();
    p.expect(THROW_KW)?;
    let expr = expr(p)?;
    p.expect(SEMICOLON)?;
    Ok(Stmt::Throw { range: p.range_from(start), expr })
}

fn for_stmt(p: &mut Parser<'_>) -> PResult<Stmt> {
    let start = p.start();
    p.expect(FOR_KW)?;
    p.expect(L_PAREN)?;

    let mut init = None;
    if p.at(FINAL_KW) || p.at(AT) || at_local_var(p) {
        let decl_start = p.start();
        let modifiers = modifiers(p)?;
        let ty = types::ty(p)?;
        let ty = local_var_type(p, ty);
        let name = p.ident()?;
        let mut n = 0;
        while p.nth(n) == L_BRACKET && p.nth(n + 1) == R_BRACKET {
            n += 2;
        }
        if p.nth(n) == COLON {
            let dims = bracket_pairs(p);
            let fragment = VarFragment { range: p.range_from(name.range.start()), name, binding: None, dims, init: None };
            let var = VarDecl { range: p.range_from(decl_start), modifiers, ty, fragments: vec![fragment] };
            p.expect(COLON)?;
            let iterable = expr(p)?;
            p.expect(R_PAREN)?;
            let body = Box::new(stmt(p)?);
            return Ok(Stmt::ForEach { range: p.range_from(start), var, iterable, body });
        }
        init = Some(ForInit::Decl(var_declarators(p, decl_start, modifiers, ty, name, false)?));
    } else if !p.at(SEMICOLON) {
        init = Some(ForInit::Exprs(expr_list(p)?));
    }
    p.expect(SEMICOLON)?;

    let cond = if p.at(SEMICOLON) { None } else { Some(expr(p)?) };
    p.expect(SEMICOLON)?;
    let update = if p.at(R_PAREN) { Vec::new() } else { expr_list(p)? };
    p.expect(R_PAREN)?;
    let body = Box::new(stmt(p)?);
    Ok(Stmt::For { range: p.range_from(start), init, cond, update, body })
}

fn expr_list(p: &mut Parser<'_>) -> PResult<Vec<Expr>> {
    let mut exprs = vec![expr(p)?];
    while p.eat(COMMA) {
        exprs.push(expr(p)?);
    }
    Ok(exprs)
}

fn try_stmt(p: &mut Parser<'_>) -> PResult<Stmt> {
    let start = p.start();
    p.expect(TRY_KW)?;

    let resources = if p.at(L_PAREN) {
        let resources_start = p.start();
        p.advance();
        let mut items = Vec::new();
        while !p.at(R_PAREN) {
            items.push(resource(p)?);
            if !p.eat(SEMICOLON) {
                break;
            }
        }
        p.expect(R_PAREN)?;
        Some(Resources { range: p.range_from(resources_start), items })
    } else {
        None
    };

    let body = block(p)?;
    let mut catches = Vec::new();
    while p.at(CATCH_KW) {
        let catch_start = p.start();
        p.advance();
        p.expect(L_PAREN)?;
        let param_start = p.start();
        let modifiers = modifiers(p)?;
        let ty = types::catch_type(p)?;
        let name = p.ident()?;
        let param = Param {
            range: p.range_from(param_start),
            modifiers,
            ty: Some(ty),
            varargs: None,
            name,
            binding: None,
            dims: Vec::new(),
        };
        p.expect(R_PAREN)?;
        let body = block(p)?;
        catches.push(CatchClause { range: p.range_from(catch_start), param, body });
    }
    let finally = if p.eat(FINALLY_KW) { Some(block(p)?) } else { None };

    if resources.is_none() && catches.is_empty() && finally.is_none() {
        return Err(p.error("Syntax error, insert \"Finally\" to complete TryStatement"));
    }
    Ok(Stmt::Try { range: p.range_from(start), resources, body, catches, finally })
}

fn resource(p: &mut Parser<'_>) -> PResult<Resource> {
    if !(p.at(FINAL_KW) || p.at(AT) || at_local_var(p)) {
        return expr(p).map(Resource::Expr);
    }
    let start = p.start();
    let modifiers = modifiers(p)?;
    let ty = types::ty(p)?;
    let ty = local_var_type(p, ty);
    let name = p.ident()?;
    let fragment_start = name.range.start();
    p.expect(EQ)?;
    let init = expr(p)?;
    let fragment =
        VarFragment { range: p.range_from(fragment_start), name, binding: None, dims: Vec::new(), init: Some(init) };
    Ok(Resource::Decl(VarDecl { range: p.range_from(start), modifiers, ty, fragments: vec![fragment] }))
}

pub(crate) fn switch_body(p: &mut Parser<'_>) -> PResult<SwitchBody> {
    let start = p.start();
    p.expect(L_BRACE)?;
    let mut cases = Vec::new();
    while !p.at(R_BRACE) && !p.at(EOF) {
        cases.push(switch_case(p)?);
    }
    p.expect(R_BRACE)?;
    Ok(SwitchBody { range: p.range_from(start), cases })
}

/// `Type name` of a pattern label, which only a guard, `->` or `:` may follow.
fn case_pattern(p: &mut Parser<'_>) -> PResult<PatternDecl> {
    let start = p.start();
    let modifiers = modifiers(p)?;
    let ty = types::ty(p)?;
    let name = p.ident()?;
    if !(p.at(ARROW) || p.at(COLON) || p.at_contextual("when")) {
        return Err(p.expected("\"->\" or \":\""));
    }
    Ok(PatternDecl { range: p.range_from(start), modifiers, ty, name, binding: None })
}

fn switch_case(p: &mut Parser<'_>) -> PResult<SwitchCase> {
    let start = p.start();
    let mut labels = Vec::new();
    let mut arrow = false;
    while p.at(CASE_KW) || p.at(DEFAULT_KW) {
        let label_start = p.start();
        let is_default = p.at(DEFAULT_KW);
        p.advance();
        let mut exprs = Vec::new();
        let mut pattern = None;
        let mut guard = None;
        if !is_default {
            pattern = p.speculate(case_pattern);
            if pattern.is_none() {
                exprs.push(exprs::conditional(p)?);
                while p.eat(COMMA) {
                    exprs.push(exprs::conditional(p)?);
                }
            } else if p.at_contextual("when") {
                p.advance();
                guard = Some(exprs::conditional(p)?);
            }
        }
        arrow = p.at(ARROW);
        if arrow {
            p.advance();
        } else {
            p.expect(COLON)?;
        }
        labels.push(CaseLabel { range: p.range_from(label_start), is_default, exprs, pattern, guard });
        if arrow {
            break;
        }
    }
    if labels.is_empty() {
        return Err(p.expected("\"case\""));
    }

    let mut body = Vec::new();
    if arrow {
        let body_start = p.start();
        body.push(match p.peek_kind() {
            L_BRACE => Stmt::Block(block(p)?),
            THROW_KW => throw_stmt(p)?,
            _ => {
                let expr = expr(p)?;
                p.expect(SEMICOLON)?;
                Stmt::Expr { range: p.range_from(body_start), expr }
            }
        });
    } else {
        while !matches!(p.peek_kind(), CASE_KW | DEFAULT_KW | R_BRACE | EOF) {
            body.push(stmt(p)?);
        }
    }
    Ok(SwitchCase { range: p.range_from(start), labels, arrow, body })
}
