use javelin_frontend::BindingId;
use javelin_frontend::ast::{
    Annotation, AnnotationValues, ClassBody, CompilationUnit, ElementValuePair, EnumConstant, ImportDecl,
    Initializer, Member, MethodDecl, Modifier, Modifiers, PackageDecl, Param, Params, QualifiedName, TypeDecl,
    TypeDeclKind, TypeParam, TypeParams, TypeRef, VarDecl,
};
use javelin_syntax::SyntaxKind::{self, *};
use javelin_syntax::{Dimension, DimensionPosition, NodeId, TextRange, TokenId};

use super::{Converter, Gaps};
use crate::{ConvertError, Mismatch};

impl Converter<'_> {
    pub(super) fn unit(&mut self, unit: &CompilationUnit) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        if let Some(package) = &unit.package {
            children.push(self.package(package)?);
        }
        for import in &unit.imports {
            children.push(self.import(import)?);
        }
        for decl in &unit.types {
            children.push(self.type_decl(decl)?);
        }

        // The root is the only owner of `EOF`; a file of comments has no
        // other token.
        let mut elements = match self.span(unit.range) {
            Some(span) => self.layout(COMPILATION_UNIT, span, children, Gaps::Declarations { keep: None })?,
            None => Vec::new(),
        };
        elements.push(self.nav.eof().into());
        Ok(self.builder.node(COMPILATION_UNIT, elements))
    }

    fn package(&mut self, package: &PackageDecl) -> Result<NodeId, ConvertError> {
        let mut children = package
            .annotations
            .iter()
            .map(|annotation| self.annotation(annotation))
            .collect::<Result<Vec<_>, _>>()?;
        children.push(self.qualified_name(&package.name, None)?);
        self.node(PACKAGE_DECLARATION, package.range, children)
    }

    fn import(&mut self, import: &ImportDecl) -> Result<NodeId, ConvertError> {
        let name = self.qualified_name(&import.name, import.binding)?;
        self.node(IMPORT_DECLARATION, import.range, vec![name])
    }

    /// `a.b.c` as nested `MEMBER_SELECT`s; `binding` goes to the last name.
    fn qualified_name(
        &mut self,
        name: &QualifiedName,
        binding: Option<BindingId>,
    ) -> Result<NodeId, ConvertError> {
        let Some((first, rest)) = name.segments.split_first() else {
            return Err(ConvertError::StructuralMismatch {
                node: IDENTIFIER,
                offset: name.range.start(),
                reason: Mismatch::NoTokens,
            });
        };
        let mut current = self.ident(first)?;
        let mut last = current;
        for segment in rest {
            last = self.ident(segment)?;
            let range = TextRange::new(name.range.start(), segment.range.end());
            current = self.node(MEMBER_SELECT, range, vec![current, last])?;
        }
        self.reference(binding, last);
        Ok(current)
    }

    pub(super) fn modifiers(&mut self, modifiers: Option<&Modifiers>) -> Result<Option<NodeId>, ConvertError> {
        let Some(modifiers) = modifiers else { return Ok(None) };
        let mut annotations = Vec::new();
        for item in &modifiers.items {
            if let Modifier::Annotation(annotation) = item {
                annotations.push(self.annotation(annotation)?);
            }
        }
        self.node(MODIFIERS, modifiers.range, annotations).map(Some)
    }

    pub(super) fn annotation(&mut self, annotation: &Annotation) -> Result<NodeId, ConvertError> {
        let mut children = vec![self.qualified_name(&annotation.name, annotation.binding)?];
        if let Some(args) = &annotation.args {
            let values = match &args.values {
                AnnotationValues::Empty => Vec::new(),
                AnnotationValues::Single(value) => vec![self.expr(value)?],
                AnnotationValues::Pairs(pairs) => {
                    pairs.iter().map(|pair| self.element_value_pair(pair)).collect::<Result<_, _>>()?
                }
            };
            children.push(self.node(ARGUMENTS, args.range, values)?);
        }
        self.node(ANNOTATION, annotation.range, children)
    }

    fn element_value_pair(&mut self, pair: &ElementValuePair) -> Result<NodeId, ConvertError> {
        let name = self.ident(&pair.name)?;
        let value = self.expr(&pair.value)?;
        self.node(ASSIGNMENT, pair.range, vec![name, value])
    }

    pub(super) fn type_decl(&mut self, decl: &TypeDecl) -> Result<NodeId, ConvertError> {
        let kind = match decl.kind {
            TypeDeclKind::Class => CLASS,
            TypeDeclKind::Interface | TypeDeclKind::Annotation => INTERFACE,
            TypeDeclKind::Enum => ENUM,
            TypeDeclKind::Record => RECORD,
        };

        let mut children = Vec::new();
        children.extend(self.modifiers(decl.modifiers.as_ref())?);
        children.push(self.ident(&decl.name)?);
        children.extend(self.type_params(decl.type_params.as_ref())?);
        if let Some(components) = &decl.record_components {
            children.push(self.params(components)?);
        }
        children.extend(self.clause(EXTENDS_CLAUSE, EXTENDS_KW, &decl.extends)?);
        children.extend(self.clause(IMPLEMENTS_CLAUSE, IMPLEMENTS_KW, &decl.implements)?);
        children.extend(self.clause(PERMITS_CLAUSE, IDENT, &decl.permits)?);
        self.class_body(&decl.body, &mut children)?;

        let keep = if decl.kind == TypeDeclKind::Enum { self.enum_separator(&decl.body) } else { None };
        let node = self.node_with(kind, decl.range, children, Gaps::Declarations { keep })?;
        self.declare(decl.binding, node);
        Ok(node)
    }

    /// The `;` that ends the constant list of an enum body.
    fn enum_separator(&self, body: &ClassBody) -> Option<TokenId> {
        let from = body.enum_constants.last().map_or(body.range.start(), |constant| constant.range.end());
        let token = self.nav.first_token_in(ENUM, TextRange::new(from, body.range.end()), SEMICOLON).ok()?;
        let before_members =
            body.members.first().is_none_or(|member| self.nav.token(token).end() <= member.range().start());
        before_members.then_some(token)
    }

    /// Body of an anonymous class or an enum constant.
    pub(super) fn anonymous_body(
        &mut self,
        body: &ClassBody,
        binding: Option<BindingId>,
    ) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        self.class_body(body, &mut children)?;
        let node = self.node_with(CLASS, body.range, children, Gaps::Declarations { keep: None })?;
        self.declare(binding, node);
        Ok(node)
    }

    /// Labels of enclosing statements are not visible inside the body.
    fn class_body(&mut self, body: &ClassBody, children: &mut Vec<NodeId>) -> Result<(), ConvertError> {
        let frame = self.semantic.enter_body();
        let members = self.members(body, children);
        self.semantic.exit_body(frame);
        members
    }

    fn members(&mut self, body: &ClassBody, children: &mut Vec<NodeId>) -> Result<(), ConvertError> {
        for constant in &body.enum_constants {
            children.push(self.enum_constant(constant)?);
        }
        for member in &body.members {
            match member {
                Member::Field(field) => self.var_decl(field, children)?,
                Member::Method(method) => children.push(self.method(method)?),
                Member::Initializer(init) => children.push(self.initializer(init)?),
                Member::Type(decl) => children.push(self.type_decl(decl)?),
            }
        }
        Ok(())
    }

    fn enum_constant(&mut self, constant: &EnumConstant) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        children.extend(self.modifiers(constant.modifiers.as_ref())?);
        children.push(self.ident(&constant.name)?);
        if let Some(args) = &constant.args {
            children.push(self.arguments(args)?);
        }
        if let Some(body) = &constant.body {
            children.push(self.anonymous_body(body, constant.body_binding)?);
        }
        let node = self.node(ENUM_CONSTANT, constant.range, children)?;
        self.declare(constant.binding, node);
        Ok(node)
    }

    fn initializer(&mut self, init: &Initializer) -> Result<NodeId, ConvertError> {
        let kind = if init.is_static { STATIC_INITIALIZER } else { INITIALIZER };
        let body = self.block(&init.body)?;
        self.node(kind, init.range, vec![body])
    }

    /// A keyword followed by a type list, as in `extends`, `permits` or `throws`.
    fn clause(
        &mut self,
        kind: SyntaxKind,
        keyword: SyntaxKind,
        types: &[TypeRef],
    ) -> Result<Option<NodeId>, ConvertError> {
        let (Some(first), Some(last)) = (types.first(), types.last()) else { return Ok(None) };
        let keyword = self.preceding(kind, first.range().start(), keyword)?;
        let range = TextRange::new(self.nav.token(keyword).start(), last.range().end());
        let children = types.iter().map(|ty| self.ty(ty)).collect::<Result<Vec<_>, _>>()?;
        self.node(kind, range, children).map(Some)
    }

    fn method(&mut self, method: &MethodDecl) -> Result<NodeId, ConvertError> {
        let kind = if method.is_constructor() { CONSTRUCTOR } else { METHOD };

        let mut children = Vec::new();
        children.extend(self.modifiers(method.modifiers.as_ref())?);
        children.extend(self.type_params(method.type_params.as_ref())?);
        let return_type = method.return_type.as_ref().map(|ty| self.ty(ty)).transpose()?;
        children.extend(return_type);
        children.push(self.ident(&method.name)?);
        if let Some(params) = &method.params {
            children.push(self.params(params)?);
        }
        let (dims, after_name) = self.name_dimensions(&method.dims)?;
        children.extend(dims);
        children.extend(self.clause(THROWS_CLAUSE, THROWS_KW, &method.throws)?);
        if let Some(value) = &method.default_value {
            children.push(self.expr(value)?);
        }
        if let Some(body) = &method.body {
            children.push(self.block(body)?);
        }

        let node = self.node(kind, method.range, children)?;
        if let (Some(type_node), Some(ty)) = (return_type, &method.return_type) {
            let declared = self.declared_type(type_node, ty, after_name);
            self.builder.set_declared_type(node, declared);
        }
        self.declare(method.binding, node);
        Ok(node)
    }

    fn type_params(&mut self, params: Option<&TypeParams>) -> Result<Option<NodeId>, ConvertError> {
        let Some(params) = params else { return Ok(None) };
        let items = params.items.iter().map(|param| self.type_param(param)).collect::<Result<Vec<_>, _>>()?;
        self.node(TYPE_PARAMETERS, params.range, items).map(Some)
    }

    fn type_param(&mut self, param: &TypeParam) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        for annotation in &param.annotations {
            children.push(self.annotation(annotation)?);
        }
        children.push(self.ident(&param.name)?);
        for bound in &param.bounds {
            children.push(self.ty(bound)?);
        }
        let node = self.node(TYPE_PARAMETER, param.range, children)?;
        self.declare(param.binding, node);
        Ok(node)
    }

    pub(super) fn params(&mut self, params: &Params) -> Result<NodeId, ConvertError> {
        let items = params.items.iter().map(|param| self.param(param)).collect::<Result<Vec<_>, _>>()?;
        self.node(PARAMETER_LIST, params.range, items)
    }

    pub(super) fn param(&mut self, param: &Param) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        children.extend(self.modifiers(param.modifiers.as_ref())?);
        let type_node = param.ty.as_ref().map(|ty| self.ty(ty)).transpose()?;
        children.extend(type_node);
        children.push(self.ident(&param.name)?);
        let (dims, after_name) = self.name_dimensions(&param.dims)?;
        children.extend(dims);

        let node = self.node(PARAMETER, param.range, children)?;
        if let (Some(type_node), Some(ty)) = (type_node, &param.ty) {
            let mut declared = self.declared_type(type_node, ty, Vec::new());
            if let Some(ellipsis) = param.varargs.and_then(|range| self.nav.first_token_in_any(range)) {
                declared.dimensions.push(Dimension {
                    open: ellipsis,
                    close: ellipsis,
                    position: DimensionPosition::AfterType,
                });
            }
            declared.dimensions.extend(after_name);
            self.builder.set_declared_type(node, declared);
        }
        self.declare(param.binding, node);
        Ok(node)
    }

    /// Pushes one `VARIABLE` per declarator of `decl`.
    ///
    /// The first declarator owns the modifiers and the type; each one owns
    /// its trailing `,` or `;`. Declarations that are not terminated by their
    /// own `;` (`for` initializers, resources, enhanced-for variables) leave
    /// the last declarator without a separator.
    pub(super) fn var_decl(&mut self, decl: &VarDecl, out: &mut Vec<NodeId>) -> Result<(), ConvertError> {
        let Some(last) = decl.fragments.last() else { return Ok(()) };
        let terminated = decl.range.end() > last.range.end();
        let modifiers = self.modifiers(decl.modifiers.as_ref())?;
        let type_node = self.ty(&decl.ty)?;

        let count = decl.fragments.len();
        for (index, fragment) in decl.fragments.iter().enumerate() {
            let separator = match index + 1 == count {
                false => Some(COMMA),
                true if terminated => Some(SEMICOLON),
                true => None,
            };
            let end = match separator {
                Some(kind) => {
                    let token = self.following(VARIABLE, fragment.range.end(), kind)?;
                    self.nav.token(token).end()
                }
                None => fragment.range.end(),
            };
            let start = if index == 0 { decl.range.start() } else { fragment.range.start() };

            let mut children = Vec::new();
            if index == 0 {
                children.extend(modifiers);
                children.push(type_node);
            }
            children.push(self.ident(&fragment.name)?);
            let (dims, after_name) = self.name_dimensions(&fragment.dims)?;
            children.extend(dims);
            if let Some(init) = &fragment.init {
                children.push(self.expr(init)?);
            }

            let node = self.node(VARIABLE, TextRange::new(start, end), children)?;
            let declared = self.declared_type(type_node, &decl.ty, after_name);
            self.builder.set_declared_type(node, declared);
            self.declare(fragment.binding, node);
            out.push(node);
        }
        Ok(())
    }

    /// `[]` pairs written after a name or a parameter list.
    fn name_dimensions(&mut self, dims: &[TextRange]) -> Result<(Vec<NodeId>, Vec<Dimension>), ConvertError> {
        let mut nodes = Vec::with_capacity(dims.len());
        let mut dimensions = Vec::with_capacity(dims.len());
        for &range in dims {
            let node = self.leaf(ARRAY_DIMENSION, range)?;
            let (open, close) = self.spans[node];
            nodes.push(node);
            dimensions.push(Dimension { open, close, position: DimensionPosition::AfterName });
        }
        Ok((nodes, dimensions))
    }
}
