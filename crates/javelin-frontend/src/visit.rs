//! Read-only traversal of the front-end tree.
//!
//! Override a `visit_*` method to observe a node; call the matching `walk_*`
//! function from the override to keep descending.

use crate::ast::*;

pub trait Visitor: Sized {
    fn visit_unit(&mut self, unit: &CompilationUnit) {
        walk_unit(self, unit);
    }

    fn visit_type_decl(&mut self, decl: &TypeDecl) {
        walk_type_decl(self, decl);
    }

    fn visit_member(&mut self, member: &Member) {
        walk_member(self, member);
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) {
        walk_var_decl(self, decl);
    }

    fn visit_method(&mut self, method: &MethodDecl) {
        walk_method(self, method);
    }

    fn visit_param(&mut self, param: &Param) {
        walk_param(self, param);
    }

    fn visit_annotation(&mut self, annotation: &Annotation) {
        walk_annotation(self, annotation);
    }

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_type_ref(&mut self, ty: &TypeRef) {
        walk_type_ref(self, ty);
    }
}

pub fn walk_unit(v: &mut impl Visitor, unit: &CompilationUnit) {
    if let Some(package) = &unit.package {
        for annotation in &package.annotations {
            v.visit_annotation(annotation);
        }
    }
    for decl in &unit.types {
        v.visit_type_decl(decl);
    }
}

fn walk_modifiers(v: &mut impl Visitor, modifiers: Option<&Modifiers>) {
    for item in modifiers.into_iter().flat_map(|modifiers| &modifiers.items) {
        if let Modifier::Annotation(annotation) = item {
            v.visit_annotation(annotation);
        }
    }
}

fn walk_type_params(v: &mut impl Visitor, params: Option<&TypeParams>) {
    for param in params.into_iter().flat_map(|params| &params.items) {
        for annotation in &param.annotations {
            v.visit_annotation(annotation);
        }
        for bound in &param.bounds {
            v.visit_type_ref(bound);
        }
    }
}

pub fn walk_type_decl(v: &mut impl Visitor, decl: &TypeDecl) {
    walk_modifiers(v, decl.modifiers.as_ref());
    walk_type_params(v, decl.type_params.as_ref());
    for param in decl.record_components.iter().flat_map(|params| &params.items) {
        v.visit_param(param);
    }
    for ty in decl.extends.iter().chain(&decl.implements).chain(&decl.permits) {
        v.visit_type_ref(ty);
    }
    walk_class_body(v, &decl.body);
}

pub fn walk_class_body(v: &mut impl Visitor, body: &ClassBody) {
    for constant in &body.enum_constants {
        walk_modifiers(v, constant.modifiers.as_ref());
        for arg in constant.args.iter().flat_map(|args| &args.exprs) {
            v.visit_expr(arg);
        }
        if let Some(body) = &constant.body {
            walk_class_body(v, body);
        }
    }
    for member in &body.members {
        v.visit_member(member);
    }
}

pub fn walk_member(v: &mut impl Visitor, member: &Member) {
    match member {
        Member::Field(field) => v.visit_var_decl(field),
        Member::Method(method) => v.visit_method(method),
        Member::Initializer(init) => v.visit_block(&init.body),
        Member::Type(decl) => v.visit_type_decl(decl),
    }
}

pub fn walk_var_decl(v: &mut impl Visitor, decl: &VarDecl) {
    walk_modifiers(v, decl.modifiers.as_ref());
    v.visit_type_ref(&decl.ty);
    for fragment in &decl.fragments {
        if let Some(init) = &fragment.init {
            v.visit_expr(init);
        }
    }
}

pub fn walk_method(v: &mut impl Visitor, method: &MethodDecl) {
    walk_modifiers(v, method.modifiers.as_ref());
    walk_type_params(v, method.type_params.as_ref());
    if let Some(ty) = &method.return_type {
        v.visit_type_ref(ty);
    }
    for param in method.params.iter().flat_map(|params| &params.items) {
        v.visit_param(param);
    }
    for ty in &method.throws {
        v.visit_type_ref(ty);
    }
    if let Some(value) = &method.default_value {
        v.visit_expr(value);
    }
    if let Some(body) = &method.body {
        v.visit_block(body);
    }
}

pub fn walk_param(v: &mut impl Visitor, param: &Param) {
    walk_modifiers(v, param.modifiers.as_ref());
    if let Some(ty) = &param.ty {
        v.visit_type_ref(ty);
    }
}

pub fn walk_annotation(v: &mut impl Visitor, annotation: &Annotation) {
    match annotation.args.as_ref().map(|args| &args.values) {
        Some(AnnotationValues::Single(value)) => v.visit_expr(value),
        Some(AnnotationValues::Pairs(pairs)) => {
            for pair in pairs {
                v.visit_expr(&pair.value);
            }
        }
        Some(AnnotationValues::Empty) | None => {}
    }
}

pub fn walk_block(v: &mut impl Visitor, block: &Block) {
    for stmt in &block.stmts {
        v.visit_stmt(stmt);
    }
}

fn walk_switch_body(v: &mut impl Visitor, body: &SwitchBody) {
    for case in &body.cases {
        for label in &case.labels {
            label.exprs.iter().for_each(|expr| v.visit_expr(expr));
            if let Some(pattern) = &label.pattern {
                v.visit_type_ref(&pattern.ty);
            }
            if let Some(guard) = &label.guard {
                v.visit_expr(guard);
            }
        }
        for stmt in &case.body {
            v.visit_stmt(stmt);
        }
    }
}

pub fn walk_stmt(v: &mut impl Visitor, stmt: &Stmt) {
    match stmt {
        Stmt::Block(block) => v.visit_block(block),
        Stmt::LocalVar(decl) => v.visit_var_decl(decl),
        Stmt::LocalType(decl) => v.visit_type_decl(decl),
        Stmt::Expr { expr, .. } | Stmt::Throw { expr, .. } | Stmt::Yield { expr, .. } => v.visit_expr(expr),
        Stmt::If { cond, then, else_, .. } => {
            v.visit_expr(cond);
            v.visit_stmt(then);
            if let Some(else_) = else_ {
                v.visit_stmt(else_);
            }
        }
        Stmt::While { cond, body, .. } => {
            v.visit_expr(cond);
            v.visit_stmt(body);
        }
        Stmt::Do { body, cond, .. } => {
            v.visit_stmt(body);
            v.visit_expr(cond);
        }
        Stmt::For { init, cond, update, body, .. } => {
            match init {
                Some(ForInit::Decl(decl)) => v.visit_var_decl(decl),
                Some(ForInit::Exprs(exprs)) => exprs.iter().for_each(|expr| v.visit_expr(expr)),
                None => {}
            }
            if let Some(cond) = cond {
                v.visit_expr(cond);
            }
            for expr in update {
                v.visit_expr(expr);
            }
            v.visit_stmt(body);
        }
        Stmt::ForEach { var, iterable, body, .. } => {
            v.visit_var_decl(var);
            v.visit_expr(iterable);
            v.visit_stmt(body);
        }
        Stmt::Return { expr, .. } => {
            if let Some(expr) = expr {
                v.visit_expr(expr);
            }
        }
        Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Empty { .. } => {}
        Stmt::Labeled { body, .. } => v.visit_stmt(body),
        Stmt::Try { resources, body, catches, finally, .. } => {
            for resource in resources.iter().flat_map(|resources| &resources.items) {
                match resource {
                    Resource::Decl(decl) => v.visit_var_decl(decl),
                    Resource::Expr(expr) => v.visit_expr(expr),
                }
            }
            v.visit_block(body);
            for catch in catches {
                v.visit_param(&catch.param);
                v.visit_block(&catch.body);
            }
            if let Some(finally) = finally {
                v.visit_block(finally);
            }
        }
        Stmt::Switch { selector, body, .. } => {
            v.visit_expr(selector);
            walk_switch_body(v, body);
        }
        Stmt::Synchronized { lock, body, .. } => {
            v.visit_expr(lock);
            v.visit_block(body);
        }
        Stmt::Assert { cond, message, .. } => {
            v.visit_expr(cond);
            if let Some(message) = message {
                v.visit_expr(message);
            }
        }
    }
}

pub fn walk_expr(v: &mut impl Visitor, expr: &Expr) {
    match expr {
        Expr::Literal { .. } | Expr::Name(_) | Expr::This { .. } | Expr::Super { .. } => {}
        Expr::FieldAccess { target, .. } => v.visit_expr(target),
        Expr::MethodCall { target, type_args, args, .. } => {
            if let Some(target) = target {
                v.visit_expr(target);
            }
            for ty in type_args.iter().flat_map(|args| &args.args) {
                v.visit_type_ref(ty);
            }
            args.exprs.iter().for_each(|arg| v.visit_expr(arg));
        }
        Expr::New { outer, ty, args, body, .. } => {
            if let Some(outer) = outer {
                v.visit_expr(outer);
            }
            v.visit_type_ref(ty);
            args.exprs.iter().for_each(|arg| v.visit_expr(arg));
            if let Some(body) = body {
                walk_class_body(v, body);
            }
        }
        Expr::NewArray { element, dims, init, .. } => {
            v.visit_type_ref(element);
            for expr in dims.iter().filter_map(|dim| dim.expr.as_ref()) {
                v.visit_expr(expr);
            }
            if let Some(init) = init {
                init.items.iter().for_each(|item| v.visit_expr(item));
            }
        }
        Expr::ArrayInit(init) => init.items.iter().for_each(|item| v.visit_expr(item)),
        Expr::ArrayAccess { array, index, .. } => {
            v.visit_expr(array);
            v.visit_expr(index);
        }
        Expr::Unary { operand, .. } => v.visit_expr(operand),
        Expr::Binary { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        Expr::Assign { target, value, .. } => {
            v.visit_expr(target);
            v.visit_expr(value);
        }
        Expr::Conditional { cond, then, else_, .. } => {
            v.visit_expr(cond);
            v.visit_expr(then);
            v.visit_expr(else_);
        }
        Expr::InstanceOf { expr, target, .. } => {
            v.visit_expr(expr);
            match &**target {
                InstanceOfTarget::Type(ty) => v.visit_type_ref(ty),
                InstanceOfTarget::Pattern(pattern) => v.visit_type_ref(&pattern.ty),
            }
        }
        Expr::Cast { ty, expr, .. } => {
            v.visit_type_ref(ty);
            v.visit_expr(expr);
        }
        Expr::Paren { expr, .. } => v.visit_expr(expr),
        Expr::ClassLiteral { ty, .. } | Expr::Type(ty) => v.visit_type_ref(ty),
        Expr::Lambda { params, body, .. } => {
            params.items.iter().for_each(|param| v.visit_param(param));
            match body {
                LambdaBody::Expr(expr) => v.visit_expr(expr),
                LambdaBody::Block(block) => v.visit_block(block),
            }
        }
        Expr::MethodRef { target, .. } => v.visit_expr(target),
        Expr::Switch { selector, body, .. } => {
            v.visit_expr(selector);
            walk_switch_body(v, body);
        }
        Expr::Annotation(annotation) => v.visit_annotation(annotation),
    }
}

pub fn walk_type_ref(v: &mut impl Visitor, ty: &TypeRef) {
    match ty {
        TypeRef::Primitive { .. } | TypeRef::Var { .. } => {}
        TypeRef::Named(named) => {
            if let Some(qualifier) = &named.qualifier {
                v.visit_type_ref(qualifier);
            }
            for arg in named.args.iter().flat_map(|args| &args.args) {
                v.visit_type_ref(arg);
            }
        }
        TypeRef::Array { element, .. } => v.visit_type_ref(element),
        TypeRef::Wildcard { bound, .. } => {
            if let Some((_, bound)) = bound {
                v.visit_type_ref(bound);
            }
        }
        TypeRef::Union { alternatives: types, .. } | TypeRef::Intersection { bounds: types, .. } => {
            types.iter().for_each(|ty| v.visit_type_ref(ty));
        }
    }
}
