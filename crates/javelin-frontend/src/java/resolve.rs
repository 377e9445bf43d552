//! Name binding over a parsed compilation unit.
//!
//! Declarations are entered in three passes so that forward references
//! work: type names first, then member signatures, then bodies. Bodies are
//! resolved with a scope stack that mirrors the lexical nesting of the
//! source.

use javelin_syntax::TextRange;
use rustc_hash::{FxHashMap, FxHashSet};

use super::builtins;
use crate::ast::{
    Annotation, AnnotationValues, Args, AssignOp, Block, CaseLabel, ClassBody, CompilationUnit, Expr, ForInit, Ident,
    ImportDecl, InstanceOfTarget, LambdaBody, LiteralKind, Member, MethodDecl, Modifier, Modifiers, NameRef, Param,
    PatternDecl, Resource, Stmt, SwitchBody, TypeDecl, TypeDeclKind, TypeParams, TypeRef, VarDecl,
};
use crate::binding::{BindingData, BindingId, BindingKind, Bindings, ModifierFlags, Origin};
use crate::problem::{Problem, ProblemCategory, ProblemId, Severity};

/// What the binder learned about one file.
pub(crate) struct Resolution {
    pub(crate) bindings: Bindings,
    pub(crate) problems: Vec<Problem>,
    /// Declarations referenced somewhere other than as the target of a
    /// plain assignment.
    pub(crate) used: FxHashSet<BindingId>,
    /// Parallel to the unit's imports.
    pub(crate) imports_used: Vec<bool>,
}

pub(crate) fn resolve(unit: &mut CompilationUnit) -> Resolution {
    let package = unit.package.as_ref().map(|package| package.name.to_dotted());
    let mut binder = Binder::new(package);

    if let Some(package) = &mut unit.package {
        for annotation in &mut package.annotations {
            binder.resolve_annotation(annotation);
        }
    }
    binder.declare_imports(&mut unit.imports);
    for decl in &mut unit.types {
        binder.declare_type(decl, None);
    }
    for decl in &mut unit.types {
        binder.declare_members(decl);
    }
    for decl in &mut unit.types {
        binder.resolve_type_body(decl);
    }

    let Binder { bindings, problems, used, imports, .. } = binder;
    Resolution { bindings, problems, used, imports_used: imports.iter().map(|import| import.used).collect() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Found(BindingId),
    /// Possibly declared somewhere the front-end cannot see.
    Unknown,
    Missing,
}

impl Lookup {
    fn binding(self) -> Option<BindingId> {
        match self {
            Self::Found(id) => Some(id),
            Self::Unknown | Self::Missing => None,
        }
    }
}

/// What the left side of a `.` denotes.
enum Qualifier {
    Package(String),
    Type(BindingId),
    /// A value, with its type when known.
    Value(Option<BindingId>),
    Unknown,
}

struct ImportEntry {
    qualified: String,
    /// Last segment of a single-name import.
    simple: Option<String>,
    is_static: bool,
    /// The imported type, or the owner type of a static import.
    target: Option<BindingId>,
    used: bool,
}

#[derive(Debug, Clone, Copy)]
enum ScopeKind {
    Type(BindingId),
    Method(BindingId),
    Block,
}

struct Scope {
    kind: ScopeKind,
    entries: Vec<(String, BindingId)>,
}

struct Guard(usize);

struct Binder {
    bindings: Bindings,
    problems: Vec<Problem>,
    used: FxHashSet<BindingId>,
    package: Option<String>,
    imports: Vec<ImportEntry>,
    top_level: FxHashMap<String, BindingId>,
    scopes: Vec<Scope>,
    /// Types with a supertype that did not resolve.
    open_types: FxHashSet<BindingId>,
    /// Variables whose declared type did not resolve.
    untyped: FxHashSet<BindingId>,
}

impl Binder {
    fn new(package: Option<String>) -> Self {
        Self {
            bindings: builtins::universe(),
            problems: Vec::new(),
            used: FxHashSet::default(),
            package,
            imports: Vec::new(),
            top_level: FxHashMap::default(),
            scopes: Vec::new(),
            open_types: FxHashSet::default(),
            untyped: FxHashSet::default(),
        }
    }

    fn push(&mut self, kind: ScopeKind) -> Guard {
        let start = self.scopes.len();
        self.scopes.push(Scope { kind, entries: Vec::new() });
        Guard(start)
    }

    fn reset(&mut self, Guard(start): Guard) {
        self.scopes.truncate(start);
    }

    fn enter(&mut self, name: &str, id: BindingId) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.entries.push((name.to_owned(), id));
        }
    }

    fn mark_used(&mut self, id: BindingId) {
        self.used.insert(id);
    }

    fn data(&self, id: BindingId) -> Option<&BindingData> {
        self.bindings.get(id)
    }

    fn builtin(&self, qualified: &str) -> Option<BindingId> {
        self.bindings.by_qualified_name(qualified)
    }

    fn current_type(&self) -> Option<BindingId> {
        self.scopes.iter().rev().find_map(|scope| match scope.kind {
            ScopeKind::Type(id) => Some(id),
            _ => None,
        })
    }

    /// Method, initializer or type that owns locals declared right now.
    fn current_owner(&self) -> Option<BindingId> {
        self.scopes.iter().rev().find_map(|scope| match scope.kind {
            ScopeKind::Type(id) | ScopeKind::Method(id) => Some(id),
            ScopeKind::Block => None,
        })
    }

    fn report(&mut self, id: ProblemId, category: ProblemCategory, message: String, range: TextRange) {
        self.problems.push(Problem::new(id, category, Severity::Error, message, range));
    }

    fn declare_imports(&mut self, imports: &mut [ImportDecl]) {
        for import in imports {
            let qualified = import.name.to_dotted();
            let simple = (!import.on_demand).then(|| import.name.last().map(|last| last.text.clone())).flatten();
            let target = if import.is_static {
                let owner = if import.on_demand {
                    qualified.clone()
                } else {
                    qualified.rsplit_once('.').map_or_else(String::new, |(owner, _)| owner.to_owned())
                };
                self.builtin(&owner)
            } else if import.on_demand {
                None
            } else {
                self.builtin(&qualified)
            };
            if !import.is_static {
                import.binding = target;
            }
            self.imports.push(ImportEntry { qualified, simple, is_static: import.is_static, target, used: false });
        }
    }

    fn declare_type(&mut self, decl: &mut TypeDecl, owner: Option<BindingId>) -> BindingId {
        let kind = match decl.kind {
            TypeDeclKind::Class => BindingKind::Class,
            TypeDeclKind::Interface => BindingKind::Interface,
            TypeDeclKind::Annotation => BindingKind::Annotation,
            TypeDeclKind::Enum => BindingKind::Enum,
            TypeDeclKind::Record => BindingKind::Record,
        };
        let qualified = match owner {
            None => Some(match &self.package {
                Some(package) => format!("{package}.{}", decl.name.text),
                None => decl.name.text.clone(),
            }),
            Some(owner) => match self.data(owner) {
                Some(data) if data.kind.is_type() => {
                    data.qualified_name.as_ref().map(|outer| format!("{outer}.{}", decl.name.text))
                }
                _ => None,
            },
        };

        let mut data = BindingData::new(kind, decl.name.text.clone(), Origin::Source)
            .with_owner(owner)
            .with_modifiers(ModifierFlags::from_modifiers(decl.modifiers.as_ref()));
        data.qualified_name = qualified;
        let id = self.bindings.alloc(data);
        decl.binding = Some(id);
        if owner.is_none() {
            self.top_level.entry(decl.name.text.clone()).or_insert(id);
        }

        self.declare_member_types(&mut decl.body, id);
        id
    }

    fn declare_member_types(&mut self, body: &mut ClassBody, owner: BindingId) {
        for member in &mut body.members {
            if let Member::Type(inner) = member {
                self.declare_type(inner, Some(owner));
            }
        }
    }

    /// Enters the scope of a type body, its type parameters included.
    fn enter_type(&mut self, id: BindingId, type_params: Option<&TypeParams>) -> Guard {
        let guard = self.push(ScopeKind::Type(id));
        for param in type_params.into_iter().flat_map(|params| &params.items) {
            if let Some(binding) = param.binding {
                self.enter(&param.name.text, binding);
            }
        }
        guard
    }

    fn declare_type_params(&mut self, params: Option<&mut TypeParams>, owner: BindingId) {
        let Some(params) = params else { return };
        for param in &mut params.items {
            let data = BindingData::new(BindingKind::TypeParameter, param.name.text.clone(), Origin::Source)
                .with_owner(Some(owner));
            let id = self.bindings.alloc(data);
            param.binding = Some(id);
            self.enter(&param.name.text, id);
        }
        for param in &mut params.items {
            for annotation in &mut param.annotations {
                self.resolve_annotation(annotation);
            }
            for bound in &mut param.bounds {
                self.resolve_type(bound);
            }
        }
    }

    fn declare_members(&mut self, decl: &mut TypeDecl) {
        let Some(id) = decl.binding else { return };
        let guard = self.push(ScopeKind::Type(id));
        self.declare_type_params(decl.type_params.as_mut(), id);
        self.declare_supertypes(decl, id);

        if let Some(components) = &mut decl.record_components {
            for component in &mut components.items {
                let (type_name, type_binding, _) = self.resolve_param_type(component);
                let private_final = ModifierFlags::PRIVATE.union(ModifierFlags::FINAL);
                let mut field = BindingData::new(BindingKind::Field, component.name.text.clone(), Origin::Source)
                    .with_owner(Some(id))
                    .with_modifiers(private_final);
                field.type_name = Some(type_name.clone());
                field.type_binding = type_binding;
                component.binding = Some(self.bindings.alloc(field));

                let mut accessor = BindingData::new(BindingKind::Method, component.name.text.clone(), Origin::Source)
                    .with_owner(Some(id))
                    .with_modifiers(ModifierFlags::PUBLIC);
                accessor.type_name = Some(type_name);
                accessor.type_binding = type_binding;
                self.bindings.alloc(accessor);
            }
        }

        self.declare_body_members(id, &mut decl.body);
        self.reset(guard);
    }

    fn declare_supertypes(&mut self, decl: &mut TypeDecl, id: BindingId) {
        let mut super_class = match decl.kind {
            TypeDeclKind::Class => self.builtin("java.lang.Object"),
            TypeDeclKind::Enum => self.builtin("java.lang.Enum"),
            TypeDeclKind::Record => self.builtin("java.lang.Record"),
            TypeDeclKind::Interface | TypeDeclKind::Annotation => None,
        };
        let mut interfaces = Vec::new();
        let extends_interfaces = matches!(decl.kind, TypeDeclKind::Interface | TypeDeclKind::Annotation);
        let extends_len = decl.extends.len();

        for (index, ty) in decl.extends.iter_mut().chain(decl.implements.iter_mut()).enumerate() {
            let is_extends = index < extends_len;
            match self.resolve_type(ty) {
                Lookup::Found(parent) => {
                    if is_extends && !extends_interfaces {
                        super_class = Some(parent);
                    } else {
                        interfaces.push(parent);
                    }
                }
                Lookup::Unknown | Lookup::Missing => {
                    self.open_types.insert(id);
                }
            }
        }
        for ty in &mut decl.permits {
            self.resolve_type(ty);
        }
        if let Some(data) = self.bindings.get_mut(id) {
            data.super_class = super_class;
            data.interfaces = interfaces;
        }
    }

    fn declare_body_members(&mut self, owner: BindingId, body: &mut ClassBody) {
        let is_interface = matches!(self.bindings.kind(owner), Some(BindingKind::Interface | BindingKind::Annotation));
        let constant_flags = ModifierFlags::PUBLIC.union(ModifierFlags::STATIC).union(ModifierFlags::FINAL);
        let owner_name = self.bindings.name(owner).to_owned();
        for constant in &mut body.enum_constants {
            let mut data = BindingData::new(BindingKind::EnumConstant, constant.name.text.clone(), Origin::Source)
                .with_owner(Some(owner))
                .with_modifiers(constant_flags);
            data.type_name = Some(owner_name.clone());
            data.type_binding = Some(owner);
            constant.binding = Some(self.bindings.alloc(data));
        }

        for member in &mut body.members {
            match member {
                Member::Field(field) => {
                    let mut flags = ModifierFlags::from_modifiers(field.modifiers.as_ref());
                    if is_interface {
                        flags = flags.union(constant_flags);
                    }
                    self.declare_fields(field, owner, flags);
                }
                Member::Method(method) => self.declare_method(method, owner, is_interface),
                Member::Type(inner) => self.declare_members(inner),
                Member::Initializer(_) => {}
            }
        }
    }

    fn declare_fields(&mut self, field: &mut VarDecl, owner: BindingId, flags: ModifierFlags) {
        let lookup = self.resolve_type(&mut field.ty);
        let base = field.ty.display_name();
        for fragment in &mut field.fragments {
            let mut data = BindingData::new(BindingKind::Field, fragment.name.text.clone(), Origin::Source)
                .with_owner(Some(owner))
                .with_modifiers(flags);
            data.type_name = Some(with_dims(&base, fragment.dims.len()));
            data.type_binding = if fragment.dims.is_empty() { element_binding(&field.ty, lookup) } else { None };
            fragment.binding = Some(self.bindings.alloc(data));
        }
    }

    fn declare_method(&mut self, method: &mut MethodDecl, owner: BindingId, in_interface: bool) {
        let kind = if method.is_constructor() { BindingKind::Constructor } else { BindingKind::Method };
        let mut flags = ModifierFlags::from_modifiers(method.modifiers.as_ref());
        if in_interface && !flags.contains(ModifierFlags::PRIVATE) {
            flags.insert(ModifierFlags::PUBLIC);
        }
        let data = BindingData::new(kind, method.name.text.clone(), Origin::Source)
            .with_owner(Some(owner))
            .with_modifiers(flags);
        let id = self.bindings.alloc(data);
        method.binding = Some(id);

        let guard = self.push(ScopeKind::Method(id));
        self.declare_type_params(method.type_params.as_mut(), id);

        let mut type_name = None;
        let mut type_binding = None;
        if let Some(ret) = &mut method.return_type {
            let lookup = self.resolve_type(ret);
            type_name = Some(with_dims(&ret.display_name(), method.dims.len()));
            if method.dims.is_empty() {
                type_binding = element_binding(ret, lookup);
            }
        }

        let mut params = Vec::new();
        let mut varargs = false;
        for param in method.params.iter_mut().flat_map(|params| &mut params.items) {
            let (param_type, param_binding, lookup) = self.resolve_param_type(param);
            varargs |= param.varargs.is_some();
            let mut data = BindingData::new(BindingKind::Parameter, param.name.text.clone(), Origin::Source)
                .with_owner(Some(id))
                .with_modifiers(ModifierFlags::from_modifiers(param.modifiers.as_ref()));
            data.type_name = Some(param_type.clone());
            data.type_binding = param_binding;
            let param_id = self.bindings.alloc(data);
            if lookup == Lookup::Missing {
                self.untyped.insert(param_id);
            }
            param.binding = Some(param_id);
            params.push(param_type);
        }
        for thrown in &mut method.throws {
            self.resolve_type(thrown);
        }
        self.reset(guard);

        if let Some(data) = self.bindings.get_mut(id) {
            data.params = params;
            data.varargs = varargs;
            data.type_name = type_name;
            data.type_binding = type_binding;
        }
    }

    /// Resolves the declared type of a parameter; returns its spelling, its
    /// type binding and how the lookup went.
    fn resolve_param_type(&mut self, param: &mut Param) -> (String, Option<BindingId>, Lookup) {
        let Some(ty) = &mut param.ty else { return (String::new(), None, Lookup::Unknown) };
        let lookup = self.resolve_type(ty);
        let mut name = with_dims(&ty.display_name(), param.dims.len());
        if param.varargs.is_some() {
            name.push_str("...");
        }
        let binding = if param.dims.is_empty() && param.varargs.is_none() { element_binding(ty, lookup) } else { None };
        (name, binding, lookup)
    }

    fn resolve_type_body(&mut self, decl: &mut TypeDecl) {
        let Some(id) = decl.binding else { return };
        let guard = self.enter_type(id, decl.type_params.as_ref());
        self.resolve_modifiers(decl.modifiers.as_mut());
        for component in decl.record_components.iter_mut().flat_map(|params| &mut params.items) {
            self.resolve_modifiers(component.modifiers.as_mut());
        }
        self.resolve_body(id, &mut decl.body);
        self.reset(guard);
    }

    fn resolve_body(&mut self, owner: BindingId, body: &mut ClassBody) {
        for constant in &mut body.enum_constants {
            self.resolve_modifiers(constant.modifiers.as_mut());
            if let Some(args) = &mut constant.args {
                self.resolve_args(args);
            }
            if let Some(class_body) = &mut constant.body {
                let anonymous = self.declare_anonymous(Some(owner));
                constant.body_binding = Some(anonymous);
                self.resolve_anonymous(anonymous, class_body);
            }
        }

        for member in &mut body.members {
            match member {
                Member::Field(field) => {
                    self.resolve_modifiers(field.modifiers.as_mut());
                    for fragment in &mut field.fragments {
                        if let Some(init) = &mut fragment.init {
                            self.resolve_expr(init);
                        }
                    }
                }
                Member::Method(method) => self.resolve_method_body(method),
                Member::Initializer(init) => {
                    let guard = self.push(ScopeKind::Block);
                    self.resolve_block(&mut init.body);
                    self.reset(guard);
                }
                Member::Type(inner) => self.resolve_type_body(inner),
            }
        }
    }

    fn declare_anonymous(&mut self, super_type: Option<BindingId>) -> BindingId {
        let mut data = BindingData::new(BindingKind::Class, "", Origin::Source).with_owner(self.current_owner());
        match super_type.and_then(|ty| self.bindings.kind(ty).map(|kind| (ty, kind))) {
            Some((ty, BindingKind::Interface)) => {
                data.super_class = self.builtin("java.lang.Object");
                data.interfaces = vec![ty];
            }
            Some((ty, _)) => data.super_class = Some(ty),
            None => data.super_class = self.builtin("java.lang.Object"),
        }
        let id = self.bindings.alloc(data);
        if super_type.is_none() {
            self.open_types.insert(id);
        }
        id
    }

    fn resolve_anonymous(&mut self, id: BindingId, body: &mut ClassBody) {
        self.declare_member_types(body, id);
        let guard = self.enter_type(id, None);
        self.declare_body_members(id, body);
        self.resolve_body(id, body);
        self.reset(guard);
    }

    fn resolve_method_body(&mut self, method: &mut MethodDecl) {
        let Some(id) = method.binding else { return };
        self.resolve_modifiers(method.modifiers.as_mut());
        let guard = self.push(ScopeKind::Method(id));
        for param in method.type_params.iter().flat_map(|params| &params.items) {
            if let Some(binding) = param.binding {
                self.enter(&param.name.text, binding);
            }
        }
        for param in method.params.iter_mut().flat_map(|params| &mut params.items) {
            self.resolve_modifiers(param.modifiers.as_mut());
            if let Some(binding) = param.binding {
                self.enter(&param.name.text, binding);
            }
        }
        // Compact constructors see the record components as parameters.
        if method.params.is_none() {
            let components: Vec<_> = self
                .current_type()
                .map(|ty| self.bindings.members(ty).to_vec())
                .unwrap_or_default()
                .into_iter()
                .filter(|&member| self.bindings.kind(member) == Some(BindingKind::Field))
                .collect();
            for component in components {
                let name = self.bindings.name(component).to_owned();
                self.enter(&name, component);
            }
        }
        if let Some(value) = &mut method.default_value {
            self.resolve_expr(value);
        }
        if let Some(body) = &mut method.body {
            self.resolve_block(body);
        }
        self.reset(guard);
    }

    fn resolve_modifiers(&mut self, modifiers: Option<&mut Modifiers>) {
        for item in modifiers.into_iter().flat_map(|modifiers| &mut modifiers.items) {
            if let Modifier::Annotation(annotation) = item {
                self.resolve_annotation(annotation);
            }
        }
    }

    fn resolve_annotation(&mut self, annotation: &mut Annotation) {
        let lookup = match annotation.name.segments.as_slice() {
            [simple] => self.lookup_type(&simple.text),
            _ => match self.builtin(&annotation.name.to_dotted()) {
                Some(id) => Lookup::Found(id),
                None => Lookup::Unknown,
            },
        };
        match lookup {
            Lookup::Found(id) => {
                annotation.binding = Some(id);
                self.mark_used(id);
            }
            Lookup::Unknown => {}
            Lookup::Missing => {
                let name = annotation.name.to_dotted();
                self.report(
                    ProblemId::UnresolvedType,
                    ProblemCategory::Type,
                    format!("{name} cannot be resolved to a type"),
                    annotation.name.range,
                );
            }
        }

        let Some(args) = &mut annotation.args else { return };
        match &mut args.values {
            AnnotationValues::Empty => {}
            AnnotationValues::Single(value) => self.resolve_expr(value),
            AnnotationValues::Pairs(pairs) => {
                for pair in pairs {
                    self.resolve_expr(&mut pair.value);
                }
            }
        }
    }

    /// Resolves a type reference and every type inside it. Array types
    /// resolve to their element type.
    fn resolve_type(&mut self, ty: &mut TypeRef) -> Lookup {
        match ty {
            TypeRef::Primitive { .. } | TypeRef::Var { .. } => Lookup::Unknown,
            TypeRef::Array { element, .. } => self.resolve_type(element),
            TypeRef::Wildcard { bound, .. } => {
                if let Some((_, bound)) = bound {
                    self.resolve_type(bound);
                }
                Lookup::Unknown
            }
            TypeRef::Union { alternatives: types, .. } | TypeRef::Intersection { bounds: types, .. } => {
                for ty in types {
                    self.resolve_type(ty);
                }
                Lookup::Unknown
            }
            TypeRef::Named(named) => {
                for arg in named.args.iter_mut().flat_map(|args| &mut args.args) {
                    self.resolve_type(arg);
                }
                let lookup = match &mut named.qualifier {
                    None => self.lookup_type(&named.name.text),
                    Some(qualifier) => {
                        let dotted = format!("{}.{}", erased_name(qualifier), named.name.text);
                        match self.builtin(&dotted) {
                            Some(id) => Lookup::Found(id),
                            None => match self.resolve_type_qualifier(qualifier) {
                                Lookup::Found(outer) => self
                                    .bindings
                                    .find_member(outer, &named.name.text, |data| data.kind.is_type())
                                    .map_or_else(|| self.missing_unless_open(outer), Lookup::Found),
                                Lookup::Unknown | Lookup::Missing => Lookup::Unknown,
                            },
                        }
                    }
                };
                match lookup {
                    Lookup::Found(id) => {
                        named.binding = Some(id);
                        self.mark_used(id);
                    }
                    Lookup::Unknown => {}
                    Lookup::Missing => self.report(
                        ProblemId::UnresolvedType,
                        ProblemCategory::Type,
                        format!("{} cannot be resolved to a type", named.name.text),
                        named.name.range,
                    ),
                }
                lookup
            }
        }
    }

    /// The type created by `outer.new Inner()`, looked up among the members
    /// of `owner`, the type of `outer`.
    fn resolve_inner_type(&mut self, owner: Option<BindingId>, ty: &mut TypeRef) -> Lookup {
        let TypeRef::Named(named) = ty else { return Lookup::Unknown };
        for arg in named.args.iter_mut().flat_map(|args| &mut args.args) {
            self.resolve_type(arg);
        }
        let found = owner
            .and_then(|owner| self.bindings.find_member(owner, &named.name.text, |data| data.kind.is_type()));
        match found {
            Some(id) => {
                named.binding = Some(id);
                self.mark_used(id);
                Lookup::Found(id)
            }
            None => Lookup::Unknown,
        }
    }

    /// Like [`Self::resolve_type`] for the qualifier of a qualified type,
    /// which may also be a package.
    fn resolve_type_qualifier(&mut self, ty: &mut TypeRef) -> Lookup {
        let TypeRef::Named(named) = ty else { return Lookup::Unknown };
        if named.qualifier.is_none() && starts_lowercase(&named.name.text) {
            return match self.lookup_type(&named.name.text) {
                Lookup::Found(id) => {
                    named.binding = Some(id);
                    Lookup::Found(id)
                }
                Lookup::Unknown | Lookup::Missing => Lookup::Unknown,
            };
        }
        if named.qualifier.as_deref().is_some_and(is_package_like) {
            let dotted = erased_name(ty);
            return match self.builtin(&dotted) {
                Some(id) => {
                    if let TypeRef::Named(named) = ty {
                        named.binding = Some(id);
                    }
                    Lookup::Found(id)
                }
                None => Lookup::Unknown,
            };
        }
        self.resolve_type(ty)
    }

    fn missing_unless_open(&self, ty: BindingId) -> Lookup {
        if self.is_closed(ty) { Lookup::Missing } else { Lookup::Unknown }
    }

    /// Whether every member of `ty` is known to the front-end.
    fn is_closed(&self, ty: BindingId) -> bool {
        const COMPLETE: [&str; 3] = ["java.lang.Object", "java.lang.Enum", "java.lang.Record"];
        self.bindings.supertypes(ty).into_iter().all(|id| {
            let Some(data) = self.data(id) else { return false };
            if self.open_types.contains(&id) || data.kind == BindingKind::TypeParameter {
                return false;
            }
            data.origin == Origin::Source || data.qualified_name.as_deref().is_some_and(|name| COMPLETE.contains(&name))
        })
    }

    fn lookup_type(&mut self, name: &str) -> Lookup {
        let mut open = false;
        for scope in self.scopes.iter().rev() {
            let local = scope.entries.iter().rev().find(|(entry, id)| {
                entry == name && self.bindings.kind(*id).is_some_and(BindingKind::is_type)
            });
            if let Some(&(_, id)) = local {
                return Lookup::Found(id);
            }
            if let ScopeKind::Type(ty) = scope.kind {
                if self.bindings.name(ty) == name {
                    return Lookup::Found(ty);
                }
                if let Some(id) = self.bindings.find_member(ty, name, |data| data.kind.is_type()) {
                    return Lookup::Found(id);
                }
                open |= !self.is_closed(ty);
            }
        }
        if let Some(&id) = self.top_level.get(name) {
            return Lookup::Found(id);
        }

        if let Some(import) = self
            .imports
            .iter_mut()
            .find(|import| !import.is_static && import.simple.as_deref() == Some(name))
        {
            import.used = true;
            return import.target.map_or(Lookup::Unknown, Lookup::Found);
        }
        if let Some(id) = self.builtin(&format!("java.lang.{name}")) {
            return Lookup::Found(id);
        }

        let mut unknown_package = false;
        for index in 0..self.imports.len() {
            let import = &self.imports[index];
            if import.is_static || import.simple.is_some() {
                continue;
            }
            if let Some(id) = self.bindings.by_qualified_name(&format!("{}.{name}", import.qualified)) {
                self.imports[index].used = true;
                return Lookup::Found(id);
            }
            if !builtins::is_known_package(&import.qualified) && self.builtin(&import.qualified).is_none() {
                unknown_package = true;
            }
        }
        if unknown_package {
            for import in &mut self.imports {
                if !import.is_static && import.simple.is_none() && !builtins::is_known_package(&import.qualified) {
                    import.used = true;
                }
            }
            return Lookup::Unknown;
        }
        if open { Lookup::Unknown } else { Lookup::Missing }
    }

    fn lookup_var(&mut self, name: &str) -> Lookup {
        let mut open = false;
        for scope in self.scopes.iter().rev() {
            let local = scope.entries.iter().rev().find(|(entry, id)| {
                entry == name && self.bindings.kind(*id).is_some_and(BindingKind::is_variable)
            });
            if let Some(&(_, id)) = local {
                return Lookup::Found(id);
            }
            if let ScopeKind::Type(ty) = scope.kind {
                if let Some(id) = self.bindings.find_member(ty, name, |data| data.kind.is_variable()) {
                    return Lookup::Found(id);
                }
                open |= !self.is_closed(ty);
            }
        }
        let lookup = self.lookup_static_import(name, |data| data.kind.is_variable());
        if lookup != Lookup::Missing || !open { lookup } else { Lookup::Unknown }
    }

    fn lookup_static_import(&mut self, name: &str, filter: impl Fn(&BindingData) -> bool) -> Lookup {
        let bindings = &self.bindings;
        for import in self.imports.iter_mut().filter(|import| import.is_static) {
            match &import.simple {
                Some(simple) if simple == name => {
                    import.used = true;
                    let member = import.target.and_then(|owner| bindings.find_member(owner, name, &filter));
                    return member.map_or(Lookup::Unknown, Lookup::Found);
                }
                Some(_) => {}
                None => match import.target {
                    Some(owner) => {
                        if let Some(member) = bindings.find_member(owner, name, &filter) {
                            import.used = true;
                            return Lookup::Found(member);
                        }
                    }
                    None => {
                        import.used = true;
                        return Lookup::Unknown;
                    }
                },
            }
        }
        Lookup::Missing
    }

    fn find_method(&self, ty: BindingId, name: &str, arity: usize) -> Option<BindingId> {
        let filter = |data: &BindingData| data.kind == BindingKind::Method && data.accepts_arity(arity);
        self.bindings.find_member(ty, name, filter).or_else(|| {
            let object = self.builtin("java.lang.Object")?;
            self.bindings.find_member(object, name, filter)
        })
    }

    fn lookup_method(&mut self, name: &str, arity: usize) -> Lookup {
        let mut open = false;
        let types: Vec<_> = self
            .scopes
            .iter()
            .rev()
            .filter_map(|scope| match scope.kind {
                ScopeKind::Type(ty) => Some(ty),
                _ => None,
            })
            .collect();
        for ty in types {
            if let Some(id) = self.find_method(ty, name, arity) {
                return Lookup::Found(id);
            }
            open |= !self.is_closed(ty);
        }
        let lookup = self.lookup_static_import(name, |data| data.kind == BindingKind::Method);
        if lookup != Lookup::Missing || !open { lookup } else { Lookup::Unknown }
    }

    fn declare_local(
        &mut self,
        name: &Ident,
        kind: BindingKind,
        modifiers: Option<&Modifiers>,
        ty: Option<&TypeRef>,
        lookup: Lookup,
        dims: usize,
    ) -> BindingId {
        let mut data = BindingData::new(kind, name.text.clone(), Origin::Source)
            .with_owner(self.current_owner())
            .with_modifiers(ModifierFlags::from_modifiers(modifiers));
        if let Some(ty) = ty {
            data.type_name = Some(with_dims(&ty.display_name(), dims));
            if dims == 0 {
                data.type_binding = element_binding(ty, lookup);
            }
        }
        let id = self.bindings.alloc(data);
        if lookup == Lookup::Missing {
            self.untyped.insert(id);
        }
        self.enter(&name.text, id);
        id
    }

    fn declare_pattern(&mut self, pattern: &mut PatternDecl) {
        self.resolve_modifiers(pattern.modifiers.as_mut());
        let lookup = self.resolve_type(&mut pattern.ty);
        let id = self.declare_local(
            &pattern.name,
            BindingKind::LocalVariable,
            pattern.modifiers.as_ref(),
            Some(&pattern.ty),
            lookup,
            0,
        );
        pattern.binding = Some(id);
    }

    fn declare_locals(&mut self, decl: &mut VarDecl) {
        self.resolve_modifiers(decl.modifiers.as_mut());
        let lookup = self.resolve_type(&mut decl.ty);
        for fragment in &mut decl.fragments {
            if let Some(init) = &mut fragment.init {
                self.resolve_expr(init);
            }
            let id = self.declare_local(
                &fragment.name,
                BindingKind::LocalVariable,
                decl.modifiers.as_ref(),
                Some(&decl.ty),
                lookup,
                fragment.dims.len(),
            );
            fragment.binding = Some(id);
        }
    }

    fn declare_param(&mut self, param: &mut Param) {
        self.resolve_modifiers(param.modifiers.as_mut());
        let lookup = match &mut param.ty {
            Some(ty) => self.resolve_type(ty),
            None => Lookup::Unknown,
        };
        let dims = param.dims.len() + usize::from(param.varargs.is_some());
        let id =
            self.declare_local(&param.name, BindingKind::Parameter, param.modifiers.as_ref(), param.ty.as_ref(), lookup, dims);
        param.binding = Some(id);
    }

    fn resolve_block(&mut self, block: &mut Block) {
        let guard = self.push(ScopeKind::Block);
        for stmt in &mut block.stmts {
            self.resolve_stmt(stmt);
        }
        self.reset(guard);
    }

    fn resolve_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Block(block) => self.resolve_block(block),
            Stmt::LocalVar(decl) => self.declare_locals(decl),
            Stmt::LocalType(decl) => {
                let id = self.declare_type(decl, self.current_owner());
                self.enter(&decl.name.text, id);
                self.declare_members(decl);
                self.resolve_type_body(decl);
            }
            Stmt::Expr { expr, .. } => self.resolve_expr(expr),
            Stmt::If { cond, then, else_, .. } => {
                self.resolve_expr(cond);
                self.resolve_nested(then);
                if let Some(else_) = else_ {
                    self.resolve_nested(else_);
                }
            }
            Stmt::While { cond, body, .. } => {
                self.resolve_expr(cond);
                self.resolve_nested(body);
            }
            Stmt::Do { body, cond, .. } => {
                self.resolve_nested(body);
                self.resolve_expr(cond);
            }
            Stmt::For { init, cond, update, body, .. } => {
                let guard = self.push(ScopeKind::Block);
                match init {
                    Some(ForInit::Decl(decl)) => self.declare_locals(decl),
                    Some(ForInit::Exprs(exprs)) => exprs.iter_mut().for_each(|expr| self.resolve_expr(expr)),
                    None => {}
                }
                if let Some(cond) = cond {
                    self.resolve_expr(cond);
                }
                for expr in update {
                    self.resolve_expr(expr);
                }
                self.resolve_nested(body);
                self.reset(guard);
            }
            Stmt::ForEach { var, iterable, body, .. } => {
                self.resolve_expr(iterable);
                let guard = self.push(ScopeKind::Block);
                self.declare_locals(var);
                self.resolve_nested(body);
                self.reset(guard);
            }
            Stmt::Return { expr, .. } => {
                if let Some(expr) = expr {
                    self.resolve_expr(expr);
                }
            }
            Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Empty { .. } => {}
            Stmt::Yield { expr, .. } | Stmt::Throw { expr, .. } => self.resolve_expr(expr),
            Stmt::Labeled { body, .. } => self.resolve_nested(body),
            Stmt::Try { resources, body, catches, finally, .. } => {
                let guard = self.push(ScopeKind::Block);
                for resource in resources.iter_mut().flat_map(|resources| &mut resources.items) {
                    match resource {
                        Resource::Decl(decl) => self.declare_locals(decl),
                        Resource::Expr(expr) => self.resolve_expr(expr),
                    }
                }
                self.resolve_block(body);
                self.reset(guard);
                for catch in catches {
                    let guard = self.push(ScopeKind::Block);
                    self.declare_param(&mut catch.param);
                    self.resolve_block(&mut catch.body);
                    self.reset(guard);
                }
                if let Some(finally) = finally {
                    self.resolve_block(finally);
                }
            }
            Stmt::Switch { selector, body, .. } => {
                self.resolve_expr(selector);
                let selector_type = self.expr_type(selector);
                self.resolve_switch_body(body, selector_type);
            }
            Stmt::Synchronized { lock, body, .. } => {
                self.resolve_expr(lock);
                self.resolve_block(body);
            }
            Stmt::Assert { cond, message, .. } => {
                self.resolve_expr(cond);
                if let Some(message) = message {
                    self.resolve_expr(message);
                }
            }
        }
    }

    /// A statement in a position that opens its own scope, like a loop body.
    fn resolve_nested(&mut self, stmt: &mut Stmt) {
        let guard = self.push(ScopeKind::Block);
        self.resolve_stmt(stmt);
        self.reset(guard);
    }

    fn resolve_switch_body(&mut self, body: &mut SwitchBody, selector_type: Option<BindingId>) {
        let enum_type = selector_type.filter(|&ty| self.bindings.kind(ty) == Some(BindingKind::Enum));
        let guard = self.push(ScopeKind::Block);
        for case in &mut body.cases {
            // Pattern variables stay within their case.
            let scoped = case.arrow || case.labels.iter().any(|label| label.pattern.is_some());
            let inner = scoped.then(|| self.push(ScopeKind::Block));
            for label in &mut case.labels {
                self.resolve_case_label(label, enum_type);
            }
            for stmt in &mut case.body {
                self.resolve_stmt(stmt);
            }
            if let Some(inner) = inner {
                self.reset(inner);
            }
        }
        self.reset(guard);
    }

    fn resolve_case_label(&mut self, label: &mut CaseLabel, enum_type: Option<BindingId>) {
        for expr in &mut label.exprs {
            match (expr, enum_type) {
                (Expr::Name(name), Some(ty)) => {
                    let constant = self.bindings.find_member(ty, &name.ident.text, |data| {
                        data.kind == BindingKind::EnumConstant
                    });
                    if let Some(id) = constant {
                        name.binding = Some(id);
                        self.mark_used(id);
                    }
                }
                (Expr::Name(name), None) => {
                    if let Lookup::Found(id) = self.lookup_var(&name.ident.text) {
                        name.binding = Some(id);
                        self.mark_used(id);
                    }
                }
                (expr, _) => self.resolve_expr(expr),
            }
        }
        if let Some(pattern) = &mut label.pattern {
            self.declare_pattern(pattern);
        }
        if let Some(guard) = &mut label.guard {
            self.resolve_expr(guard);
        }
    }

    fn resolve_args(&mut self, args: &mut Args) {
        for expr in &mut args.exprs {
            self.resolve_expr(expr);
        }
    }

    fn resolve_expr(&mut self, expr: &mut Expr) {
        match expr {
            Expr::Literal { .. } | Expr::This { .. } | Expr::Super { .. } => {}
            Expr::Name(name) => self.resolve_simple_name(name),
            Expr::FieldAccess { .. } => {
                self.resolve_qualifier(expr);
            }
            Expr::MethodCall { target, type_args, name, args, .. } => {
                for arg in type_args.iter_mut().flat_map(|args| &mut args.args) {
                    self.resolve_type(arg);
                }
                self.resolve_args(args);
                self.resolve_call(target.as_deref_mut(), name, args);
            }
            Expr::New { outer, ty, args, body, anonymous_binding, .. } => {
                let lookup = match outer {
                    Some(outer) => {
                        self.resolve_expr(outer);
                        let owner = self.expr_type(outer);
                        self.resolve_inner_type(owner, ty)
                    }
                    None => self.resolve_type(ty),
                };
                self.resolve_args(args);
                if let Some(body) = body {
                    let id = self.declare_anonymous(lookup.binding());
                    *anonymous_binding = Some(id);
                    self.resolve_anonymous(id, body);
                }
            }
            Expr::NewArray { element, dims, init, .. } => {
                self.resolve_type(element);
                for dim in dims {
                    if let Some(expr) = &mut dim.expr {
                        self.resolve_expr(expr);
                    }
                }
                if let Some(init) = init {
                    init.items.iter_mut().for_each(|item| self.resolve_expr(item));
                }
            }
            Expr::ArrayInit(init) => init.items.iter_mut().for_each(|item| self.resolve_expr(item)),
            Expr::ArrayAccess { array, index, .. } => {
                self.resolve_expr(array);
                self.resolve_expr(index);
            }
            Expr::Unary { operand, .. } => self.resolve_expr(operand),
            Expr::Binary { lhs, rhs, .. } => {
                self.resolve_expr(lhs);
                self.resolve_expr(rhs);
            }
            Expr::Assign { op, target, value, .. } => {
                self.resolve_expr(value);
                if *op == AssignOp::Assign {
                    self.resolve_write_target(target);
                } else {
                    self.resolve_expr(target);
                }
            }
            Expr::Conditional { cond, then, else_, .. } => {
                self.resolve_expr(cond);
                self.resolve_expr(then);
                self.resolve_expr(else_);
            }
            Expr::InstanceOf { expr, target, .. } => {
                self.resolve_expr(expr);
                match &mut **target {
                    InstanceOfTarget::Type(ty) => {
                        self.resolve_type(ty);
                    }
                    InstanceOfTarget::Pattern(pattern) => self.declare_pattern(pattern),
                }
            }
            Expr::Cast { ty, expr, .. } => {
                self.resolve_type(ty);
                self.resolve_expr(expr);
            }
            Expr::Paren { expr, .. } => self.resolve_expr(expr),
            Expr::ClassLiteral { ty, .. } | Expr::Type(ty) => {
                self.resolve_type(ty);
            }
            Expr::Lambda { params, body, .. } => {
                let guard = self.push(ScopeKind::Block);
                for param in &mut params.items {
                    self.declare_param(param);
                }
                match body {
                    LambdaBody::Expr(expr) => self.resolve_expr(expr),
                    LambdaBody::Block(block) => self.resolve_block(block),
                }
                self.reset(guard);
            }
            Expr::MethodRef { target, name, .. } => {
                let qualifier = self.resolve_qualifier(target);
                let owner = match qualifier {
                    Qualifier::Type(ty) | Qualifier::Value(Some(ty)) => Some(ty),
                    _ => None,
                };
                if let (Some(owner), Some(name)) = (owner, name) {
                    let method = self.bindings.find_member(owner, &name.ident.text, |data| data.kind.is_method());
                    if let Some(id) = method {
                        name.binding = Some(id);
                        self.mark_used(id);
                    }
                }
            }
            Expr::Switch { range, selector, body } => {
                self.resolve_expr(selector);
                if !body.has_default() {
                    let untyped = match &**selector {
                        Expr::Name(NameRef { binding: Some(id), .. }) => self.untyped.contains(id),
                        _ => false,
                    };
                    if untyped {
                        self.problems.push(Problem::new(
                            ProblemId::SwitchNotExhaustive,
                            ProblemCategory::Syntax,
                            Severity::Error,
                            "A switch expression should have a default case",
                            *range,
                        ));
                    }
                }
                let selector_type = self.expr_type(selector);
                self.resolve_switch_body(body, selector_type);
            }
            Expr::Annotation(annotation) => self.resolve_annotation(annotation),
        }
    }

    fn resolve_simple_name(&mut self, name: &mut NameRef) {
        let lookup = match self.lookup_var(&name.ident.text) {
            Lookup::Missing => self.lookup_type(&name.ident.text),
            lookup => lookup,
        };
        match lookup {
            Lookup::Found(id) => {
                name.binding = Some(id);
                self.mark_used(id);
            }
            Lookup::Unknown => {}
            Lookup::Missing => self.report(
                ProblemId::UnresolvedName,
                ProblemCategory::Semantic,
                format!("{} cannot be resolved to a variable", name.ident.text),
                name.ident.range,
            ),
        }
    }

    /// Binds the target of `x = ...` without counting it as a read.
    fn resolve_write_target(&mut self, target: &mut Expr) {
        match target {
            Expr::Name(name) => match self.lookup_var(&name.ident.text) {
                Lookup::Found(id) => name.binding = Some(id),
                Lookup::Unknown => {}
                Lookup::Missing => self.resolve_simple_name(name),
            },
            Expr::FieldAccess { target: this, name, .. } if matches!(**this, Expr::This { .. }) => {
                let field = self
                    .current_type()
                    .and_then(|ty| self.bindings.find_member(ty, &name.ident.text, |data| data.kind.is_variable()));
                match field {
                    Some(id) => name.binding = Some(id),
                    None => self.resolve_expr(target),
                }
            }
            _ => self.resolve_expr(target),
        }
    }

    fn resolve_qualifier(&mut self, expr: &mut Expr) -> Qualifier {
        match expr {
            Expr::Name(name) => {
                match self.lookup_var(&name.ident.text) {
                    Lookup::Found(id) => {
                        name.binding = Some(id);
                        self.mark_used(id);
                        return Qualifier::Value(self.value_type(id));
                    }
                    Lookup::Unknown => return Qualifier::Unknown,
                    Lookup::Missing => {}
                }
                match self.lookup_type(&name.ident.text) {
                    Lookup::Found(id) => {
                        name.binding = Some(id);
                        self.mark_used(id);
                        Qualifier::Type(id)
                    }
                    Lookup::Unknown => Qualifier::Unknown,
                    Lookup::Missing if starts_lowercase(&name.ident.text) => {
                        Qualifier::Package(name.ident.text.clone())
                    }
                    Lookup::Missing => {
                        self.report(
                            ProblemId::UnresolvedName,
                            ProblemCategory::Semantic,
                            format!("{} cannot be resolved", name.ident.text),
                            name.ident.range,
                        );
                        Qualifier::Unknown
                    }
                }
            }
            Expr::FieldAccess { target, name, .. } => {
                let qualifier = self.resolve_qualifier(target);
                self.select(qualifier, name)
            }
            Expr::This { .. } => Qualifier::Value(self.current_type()),
            Expr::Super { .. } => {
                Qualifier::Value(self.current_type().and_then(|ty| self.data(ty).and_then(|data| data.super_class)))
            }
            Expr::Type(ty) => match self.resolve_type(ty) {
                Lookup::Found(id) if !matches!(ty, TypeRef::Array { .. }) => Qualifier::Type(id),
                _ => Qualifier::Unknown,
            },
            other => {
                self.resolve_expr(other);
                Qualifier::Value(self.expr_type(other))
            }
        }
    }

    /// Resolves `name` as selected from `qualifier`.
    fn select(&mut self, qualifier: Qualifier, name: &mut NameRef) -> Qualifier {
        let text = name.ident.text.clone();
        match qualifier {
            Qualifier::Package(package) => {
                let dotted = format!("{package}.{text}");
                match self.builtin(&dotted) {
                    Some(id) => {
                        name.binding = Some(id);
                        self.mark_used(id);
                        Qualifier::Type(id)
                    }
                    None if starts_lowercase(&text) || builtins::is_known_package(&dotted) => {
                        Qualifier::Package(dotted)
                    }
                    None => Qualifier::Unknown,
                }
            }
            Qualifier::Type(ty) | Qualifier::Value(Some(ty)) if text == "this" => {
                name.binding = Some(ty);
                Qualifier::Value(Some(ty))
            }
            Qualifier::Type(ty) if text == "super" => {
                Qualifier::Value(self.data(ty).and_then(|data| data.super_class))
            }
            Qualifier::Type(ty) | Qualifier::Value(Some(ty)) => {
                if let Some(id) = self.bindings.find_member(ty, &text, |data| data.kind.is_variable()) {
                    name.binding = Some(id);
                    self.mark_used(id);
                    return Qualifier::Value(self.value_type(id));
                }
                if let Some(id) = self.bindings.find_member(ty, &text, |data| data.kind.is_type()) {
                    name.binding = Some(id);
                    self.mark_used(id);
                    return Qualifier::Type(id);
                }
                if self.is_closed(ty) && text != "length" {
                    self.report(
                        ProblemId::UnresolvedField,
                        ProblemCategory::Semantic,
                        format!("{text} cannot be resolved or is not a field"),
                        name.ident.range,
                    );
                }
                Qualifier::Unknown
            }
            Qualifier::Value(None) | Qualifier::Unknown => Qualifier::Unknown,
        }
    }

    fn resolve_call(&mut self, target: Option<&mut Expr>, name: &mut NameRef, args: &Args) {
        let arity = args.exprs.len();
        let Some(target) = target else {
            if matches!(name.ident.text.as_str(), "this" | "super") {
                self.resolve_constructor_call(name, arity);
                return;
            }
            match self.lookup_method(&name.ident.text, arity) {
                Lookup::Found(id) => {
                    name.binding = Some(id);
                    self.mark_used(id);
                }
                Lookup::Unknown => {}
                Lookup::Missing => {
                    let owner = self.current_type().map(|ty| self.bindings.name(ty).to_owned()).unwrap_or_default();
                    self.report_undefined_method(name, args, &owner);
                }
            }
            return;
        };

        let owner = match self.resolve_qualifier(target) {
            Qualifier::Type(ty) | Qualifier::Value(Some(ty)) => ty,
            Qualifier::Package(_) | Qualifier::Value(None) | Qualifier::Unknown => return,
        };
        match self.find_method(owner, &name.ident.text, arity) {
            Some(id) => {
                name.binding = Some(id);
                self.mark_used(id);
            }
            None if self.is_closed(owner) => {
                let owner = self.bindings.name(owner).to_owned();
                self.report_undefined_method(name, args, &owner);
            }
            None => {}
        }
    }

    fn resolve_constructor_call(&mut self, name: &mut NameRef, arity: usize) {
        let Some(current) = self.current_type() else { return };
        let ty = if name.ident.text == "super" { self.data(current).and_then(|data| data.super_class) } else { Some(current) };
        let Some(ty) = ty else { return };
        let constructor = self.bindings.members(ty).iter().copied().find(|&member| {
            self.data(member).is_some_and(|data| data.kind == BindingKind::Constructor && data.accepts_arity(arity))
        });
        if let Some(id) = constructor {
            name.binding = Some(id);
            self.mark_used(id);
        }
    }

    fn report_undefined_method(&mut self, name: &NameRef, args: &Args, owner: &str) {
        let signature: Vec<String> = args.exprs.iter().map(|arg| self.describe_arg(arg)).collect();
        self.report(
            ProblemId::UnresolvedMethod,
            ProblemCategory::Semantic,
            format!("The method {}({}) is undefined for the type {owner}", name.ident.text, signature.join(", ")),
            name.ident.range,
        );
    }

    fn describe_arg(&self, arg: &Expr) -> String {
        let literal = match arg {
            Expr::Literal { kind, .. } => match kind {
                LiteralKind::Int => Some("int"),
                LiteralKind::Long => Some("long"),
                LiteralKind::Float => Some("float"),
                LiteralKind::Double => Some("double"),
                LiteralKind::Char => Some("char"),
                LiteralKind::String | LiteralKind::TextBlock => Some("String"),
                LiteralKind::True | LiteralKind::False => Some("boolean"),
                LiteralKind::Null => Some("null"),
            },
            _ => None,
        };
        if let Some(literal) = literal {
            return literal.to_owned();
        }
        if let Expr::Name(NameRef { binding: Some(id), .. }) = arg {
            if let Some(type_name) = self.data(*id).and_then(|data| data.type_name.clone()) {
                return type_name;
            }
        }
        self.expr_type(arg).map_or_else(|| "Object".to_owned(), |ty| self.bindings.name(ty).to_owned())
    }

    /// The type of a variable, or the type itself for type bindings.
    fn value_type(&self, id: BindingId) -> Option<BindingId> {
        let data = self.data(id)?;
        if data.kind.is_type() { Some(id) } else { data.type_binding }
    }

    /// Static type of an already resolved expression, when it is a named
    /// type the front-end knows.
    fn expr_type(&self, expr: &Expr) -> Option<BindingId> {
        match expr {
            Expr::Name(name) | Expr::FieldAccess { name, .. } => name.binding.and_then(|id| self.value_type(id)),
            Expr::MethodCall { name, .. } => name.binding.and_then(|id| self.data(id)?.type_binding),
            Expr::New { ty, anonymous_binding, .. } => anonymous_binding.or_else(|| named_binding(ty)),
            Expr::Literal { kind: LiteralKind::String | LiteralKind::TextBlock, .. } => {
                self.builtin("java.lang.String")
            }
            Expr::Paren { expr, .. } => self.expr_type(expr),
            Expr::Cast { ty, .. } => named_binding(ty),
            Expr::This { .. } => self.current_type(),
            Expr::Super { .. } => self.current_type().and_then(|ty| self.data(ty)?.super_class),
            Expr::Conditional { then, .. } => self.expr_type(then),
            Expr::Assign { target, .. } => self.expr_type(target),
            _ => None,
        }
    }
}

fn with_dims(base: &str, dims: usize) -> String {
    let mut name = base.to_owned();
    for _ in 0..dims {
        name.push_str("[]");
    }
    name
}

fn named_binding(ty: &TypeRef) -> Option<BindingId> {
    match ty {
        TypeRef::Named(named) => named.binding,
        _ => None,
    }
}

/// The resolved type of a non-array declared type.
fn element_binding(ty: &TypeRef, lookup: Lookup) -> Option<BindingId> {
    match ty {
        TypeRef::Named(_) => lookup.binding(),
        _ => None,
    }
}

/// Dotted name of a type without its type arguments.
fn erased_name(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named(named) => match &named.qualifier {
            Some(qualifier) => format!("{}.{}", erased_name(qualifier), named.name.text),
            None => named.name.text.clone(),
        },
        other => other.display_name(),
    }
}

fn is_package_like(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Named(named) => {
            named.args.is_none()
                && starts_lowercase(&named.name.text)
                && named.qualifier.as_deref().is_none_or(is_package_like)
        }
        _ => false,
    }
}

fn starts_lowercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase)
}
