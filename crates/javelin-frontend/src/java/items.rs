use javelin_syntax::SyntaxKind::*;
use javelin_syntax::{TextRange, TextSize};

use super::exprs::{self, var_init};
use super::parser::{PResult, Parser};
use super::stmts::block;
use super::types::{self, dims, type_list, type_params};
use crate::ast::*;

pub(crate) fn compilation_unit(p: &mut Parser<'_>, len: TextSize) -> PResult<CompilationUnit> {
    let package = package_decl(p)?;

    let mut imports = Vec::new();
    loop {
        if p.at(IMPORT_KW) {
            imports.push(import_decl(p)?);
        } else if !p.eat(SEMICOLON) {
            break;
        }
    }

    let mut types = Vec::new();
    while !p.at(EOF) {
        if p.eat(SEMICOLON) {
            continue;
        }
        let start = p.start();
        let modifiers = modifiers(p)?;
        types.push(type_decl(p, start, modifiers)?);
    }

    Ok(CompilationUnit { range: TextRange::up_to(len), package, imports, types })
}

fn package_decl(p: &mut Parser<'_>) -> PResult<Option<PackageDecl>> {
    let checkpoint = p.checkpoint();
    let start = p.start();
    let mut annotations = Vec::new();
    while p.at(AT) && p.nth(1) != INTERFACE_KW {
        annotations.push(annotation(p)?);
    }
    if !p.eat(PACKAGE_KW) {
        p.restore(checkpoint);
        return Ok(None);
    }
    let name = qualified_name(p)?;
    p.expect(SEMICOLON)?;
    Ok(Some(PackageDecl { range: p.range_from(start), annotations, name }))
}

fn import_decl(p: &mut Parser<'_>) -> PResult<ImportDecl> {
    let start = p.start();
    p.expect(IMPORT_KW)?;
    let is_static = p.eat(STATIC_KW);
    let name = qualified_name(p)?;
    let on_demand = p.at(DOT) && p.nth(1) == STAR;
    if on_demand {
        p.advance();
        p.advance();
    }
    p.expect(SEMICOLON)?;
    Ok(ImportDecl { range: p.range_from(start), is_static, name, on_demand, binding: None })
}

pub(crate) fn qualified_name(p: &mut Parser<'_>) -> PResult<QualifiedName> {
    let start = p.start();
    let mut segments = vec![p.ident()?];
    while p.at(DOT) && p.nth(1) == IDENT {
        p.advance();
        segments.push(p.ident()?);
    }
    Ok(QualifiedName { range: p.range_from(start), segments })
}

/// Keyword modifiers and annotations, in any order.
pub(crate) fn modifiers(p: &mut Parser<'_>) -> PResult<Option<Modifiers>> {
    let start = p.start();
    let mut items = Vec::new();
    loop {
        if p.at(AT) && p.nth(1) != INTERFACE_KW {
            items.push(Modifier::Annotation(annotation(p)?));
            continue;
        }
        if let Some((keyword, len)) = sealed_modifier(p) {
            let keyword_start = p.start();
            for _ in 0..len {
                p.advance();
            }
            items.push(Modifier::Keyword { range: p.range_from(keyword_start), keyword });
            continue;
        }
        let kind = p.peek_kind();
        let Some(keyword) = ModifierKeyword::from_token(kind) else { break };
        if kind == DEFAULT_KW && matches!(p.nth(1), COLON | ARROW) {
            break;
        }
        let range = p.advance();
        items.push(Modifier::Keyword { range, keyword });
    }
    Ok((!items.is_empty()).then(|| Modifiers { range: p.range_from(start), items }))
}

/// `sealed` or `non-sealed`, with its token count. Both are plain names
/// unless more modifiers or a class or interface keyword follow.
fn sealed_modifier(p: &Parser<'_>) -> Option<(ModifierKeyword, usize)> {
    let (keyword, len) = if p.at_contextual("sealed") {
        (ModifierKeyword::Sealed, 1)
    } else if p.at_contextual("non") && p.nth(1) == MINUS && p.nth_contextual(2, "sealed") {
        (ModifierKeyword::NonSealed, 3)
    } else {
        return None;
    };
    let next = p.nth(len);
    let modifies = matches!(next, CLASS_KW | INTERFACE_KW | AT)
        || ModifierKeyword::from_token(next).is_some()
        || p.nth_contextual(len, "sealed")
        || p.nth_contextual(len, "non");
    modifies.then_some((keyword, len))
}

pub(crate) fn annotation(p: &mut Parser<'_>) -> PResult<Annotation> {
    let start = p.start();
    p.expect(AT)?;
    let name = qualified_name(p)?;
    let args = if p.at(L_PAREN) {
        let args_start = p.start();
        p.advance();
        let values = if p.at(R_PAREN) {
            AnnotationValues::Empty
        } else if p.at(IDENT) && p.nth(1) == EQ {
            let mut pairs = Vec::new();
            loop {
                let pair_start = p.start();
                let name = p.ident()?;
                p.expect(EQ)?;
                let value = element_value(p)?;
                pairs.push(ElementValuePair { range: p.range_from(pair_start), name, value });
                if !p.eat(COMMA) {
                    break;
                }
            }
            AnnotationValues::Pairs(pairs)
        } else {
            AnnotationValues::Single(Box::new(element_value(p)?))
        };
        p.expect(R_PAREN)?;
        Some(AnnotationArgs { range: p.range_from(args_start), values })
    } else {
        None
    };
    Ok(Annotation { range: p.range_from(start), name, binding: None, args })
}

fn element_value(p: &mut Parser<'_>) -> PResult<Expr> {
    match p.peek_kind() {
        AT => Ok(Expr::Annotation(Box::new(annotation(p)?))),
        L_BRACE => {
            let start = p.start();
            p.advance();
            let mut items = Vec::new();
            while !p.at(R_BRACE) {
                items.push(element_value(p)?);
                if !p.eat(COMMA) {
                    break;
                }
            }
            p.expect(R_BRACE)?;
            Ok(Expr::ArrayInit(ArrayInit { range: p.range_from(start), items }))
        }
        _ => exprs::conditional(p),
    }
}

pub(crate) fn at_type_decl(p: &Parser<'_>) -> bool {
    match p.peek_kind() {
        CLASS_KW | INTERFACE_KW | ENUM_KW => true,
        AT => p.nth(1) == INTERFACE_KW,
        IDENT => at_record(p),
        _ => false,
    }
}

fn at_record(p: &Parser<'_>) -> bool {
    p.at_contextual("record") && p.nth(1) == IDENT && matches!(p.nth(2), L_PAREN | LT)
}

/// A class, interface, annotation, enum or record declaration whose
/// modifiers have been parsed already.
pub(crate) fn type_decl(
    p: &mut Parser<'_>,
    start: TextSize,
    modifiers: Option<Modifiers>,
) -> PResult<TypeDecl> {
    let kind = match p.peek_kind() {
        CLASS_KW => TypeDeclKind::Class,
        INTERFACE_KW => TypeDeclKind::Interface,
        ENUM_KW => TypeDeclKind::Enum,
        AT if p.nth(1) == INTERFACE_KW => {
            p.advance();
            TypeDeclKind::Annotation
        }
        IDENT if at_record(p) => TypeDeclKind::Record,
        _ => return Err(p.expected("class, interface, enum, or record")),
    };
    p.advance();

    let name = p.ident()?;
    let type_params = if p.at(LT) { Some(type_params(p)?) } else { None };
    let record_components = if kind == TypeDeclKind::Record { Some(formal_params(p)?) } else { None };

    let mut extends = Vec::new();
    let mut implements = Vec::new();
    if p.eat(EXTENDS_KW) {
        extends = if kind == TypeDeclKind::Interface { type_list(p)? } else { vec![types::ty(p)?] };
    }
    if p.eat(IMPLEMENTS_KW) {
        implements = type_list(p)?;
    }
    let mut permits = Vec::new();
    if matches!(kind, TypeDeclKind::Class | TypeDeclKind::Interface) && p.at_contextual("permits") {
        p.advance();
        permits = type_list(p)?;
    }

    let body = if kind == TypeDeclKind::Enum { enum_body(p)? } else { class_body(p, kind)? };

    Ok(TypeDecl {
        range: p.range_from(start),
        kind,
        modifiers,
        name,
        binding: None,
        type_params,
        record_components,
        extends,
        implements,
        permits,
        body,
    })
}

pub(crate) fn class_body(p: &mut Parser<'_>, kind: TypeDeclKind) -> PResult<ClassBody> {
    let start = p.start();
    p.expect(L_BRACE)?;
    let members = members(p, kind)?;
    p.expect(R_BRACE)?;
    Ok(ClassBody { range: p.range_from(start), enum_constants: Vec::new(), members })
}

fn enum_body(p: &mut Parser<'_>) -> PResult<ClassBody> {
    let start = p.start();
    p.expect(L_BRACE)?;
    let mut enum_constants = Vec::new();
    while !p.at(SEMICOLON) && !p.at(R_BRACE) {
        enum_constants.push(enum_constant(p)?);
        if !p.eat(COMMA) {
            break;
        }
    }
    let members = if p.eat(SEMICOLON) { members(p, TypeDeclKind::Enum)? } else { Vec::new() };
    p.expect(R_BRACE)?;
    Ok(ClassBody { range: p.range_from(start), enum_constants, members })
}

fn enum_constant(p: &mut Parser<'_>) -> PResult<EnumConstant> {
    let start = p.start();
    let modifiers = modifiers(p)?;
    let name = p.ident()?;
    let args = if p.at(L_PAREN) { Some(exprs::arguments(p)?) } else { None };
    let body = if p.at(L_BRACE) { Some(class_body(p, TypeDeclKind::Class)?) } else { None };
    Ok(EnumConstant { range: p.range_from(start), modifiers, name, binding: None, args, body, body_binding: None })
}

fn members(p: &mut Parser<'_>, kind: TypeDeclKind) -> PResult<Vec<Member>> {
    let mut members = Vec::new();
    while !p.at(R_BRACE) && !p.at(EOF) {
        if let Some(member) = member(p, kind)? {
            members.push(member);
        }
    }
    Ok(members)
}

/// One member; `None` for a stray `;`.
fn member(p: &mut Parser<'_>, owner_kind: TypeDeclKind) -> PResult<Option<Member>> {
    if p.eat(SEMICOLON) {
        return Ok(None);
    }
    let start = p.start();
    if p.at(L_BRACE) || (p.at(STATIC_KW) && p.nth(1) == L_BRACE) {
        let is_static = p.eat(STATIC_KW);
        let body = block(p)?;
        return Ok(Some(Member::Initializer(Initializer { range: p.range_from(start), is_static, body })));
    }

    let modifiers = modifiers(p)?;
    if at_type_decl(p) {
        return Ok(Some(Member::Type(type_decl(p, start, modifiers)?)));
    }

    let type_params = if p.at(LT) { Some(type_params(p)?) } else { None };

    if p.at(IDENT) && p.nth(1) == L_PAREN {
        let name = p.ident()?;
        return method_rest(p, start, modifiers, type_params, None, name).map(|m| Some(Member::Method(m)));
    }
    if owner_kind == TypeDeclKind::Record && p.at(IDENT) && p.nth(1) == L_BRACE {
        let name = p.ident()?;
        let body = block(p)?;
        return Ok(Some(Member::Method(MethodDecl {
            range: p.range_from(start),
            modifiers,
            type_params,
            return_type: None,
            name,
            binding: None,
            params: None,
            dims: Vec::new(),
            throws: Vec::new(),
            default_value: None,
            body: Some(body),
        })));
    }

    let ty = types::ty(p)?;
    let name = p.ident()?;
    if p.at(L_PAREN) {
        return method_rest(p, start, modifiers, type_params, Some(ty), name).map(|m| Some(Member::Method(m)));
    }
    if type_params.is_some() {
        return Err(p.expected("\"(\""));
    }
    Ok(Some(Member::Field(var_declarators(p, start, modifiers, ty, name, true)?)))
}

fn method_rest(
    p: &mut Parser<'_>,
    start: TextSize,
    modifiers: Option<Modifiers>,
    type_params: Option<TypeParams>,
    return_type: Option<TypeRef>,
    name: Ident,
) -> PResult<MethodDecl> {
    let params = formal_params(p)?;
    let dims = bracket_pairs(p);
    let throws = if p.eat(THROWS_KW) { type_list(p)? } else { Vec::new() };
    let default_value = if p.eat(DEFAULT_KW) { Some(element_value(p)?) } else { None };
    let body = if p.at(L_BRACE) {
        Some(block(p)?)
    } else {
        p.expect(SEMICOLON)?;
        None
    };
    Ok(MethodDecl {
        range: p.range_from(start),
        modifiers,
        type_params,
        return_type,
        name,
        binding: None,
        params: Some(params),
        dims,
        throws,
        default_value,
        body,
    })
}

/// `[]` pairs written after a declared name or parameter list.
pub(crate) fn bracket_pairs(p: &mut Parser<'_>) -> Vec<TextRange> {
    let mut pairs = Vec::new();
    while p.at(L_BRACKET) && p.nth(1) == R_BRACKET {
        let open = p.advance();
        let close = p.advance();
        pairs.push(open.cover(close));
    }
    pairs
}

pub(crate) fn formal_params(p: &mut Parser<'_>) -> PResult<Params> {
    let start = p.start();
    p.expect(L_PAREN)?;
    let mut items = Vec::new();
    if !p.at(R_PAREN) {
        loop {
            items.push(formal_param(p)?);
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    p.expect(R_PAREN)?;
    Ok(Params { range: p.range_from(start), items })
}

pub(crate) fn formal_param(p: &mut Parser<'_>) -> PResult<Param> {
    let start = p.start();
    let modifiers = modifiers(p)?;
    let ty_start = p.start();
    let base = types::non_array_type(p)?;
    let ty = dims(p, ty_start, base);
    let varargs = if p.at(ELLIPSIS) { Some(p.advance()) } else { None };
    let name = p.ident()?;
    let dims = bracket_pairs(p);
    Ok(Param { range: p.range_from(start), modifiers, ty: Some(ty), varargs, name, binding: None, dims })
}

/// Declarators after the type and first name of a field or local variable.
pub(crate) fn var_declarators(
    p: &mut Parser<'_>,
    start: TextSize,
    modifiers: Option<Modifiers>,
    ty: TypeRef,
    first: Ident,
    terminated: bool,
) -> PResult<VarDecl> {
    let mut fragments = Vec::new();
    let mut name = first;
    loop {
        let fragment_start = name.range.start();
        let dims = bracket_pairs(p);
        let init = if p.eat(EQ) { Some(var_init(p)?) } else { None };
        fragments.push(VarFragment { range: p.range_from(fragment_start), name, binding: None, dims, init });
        if !p.eat(COMMA) {
            break;
        }
        name = p.ident()?;
    }
    if terminated {
        p.expect(SEMICOLON)?;
    }
    Ok(VarDecl { range: p.range_from(start), modifiers, ty, fragments })
}
