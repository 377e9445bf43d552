//! Unnecessary-code warnings computed from a resolved unit.

use javelin_syntax::TextRange;

use super::resolve::Resolution;
use crate::ast::{CompilationUnit, Expr, ForInit, LiteralKind, Member, Stmt, TypeDecl, TypeRef, VarDecl};
use crate::binding::{BindingId, ModifierFlags};
use crate::problem::{Problem, ProblemId};
use crate::visit::{self, Visitor};

pub(crate) fn check(unit: &CompilationUnit, resolution: &Resolution) -> Vec<Problem> {
    let mut checker = Checker { resolution, problems: Vec::new() };

    for (import, &used) in unit.imports.iter().zip(&resolution.imports_used) {
        if !used {
            let name = import.name.to_dotted();
            let message = format!("The import {name} is never used");
            checker.problems.push(Problem::unnecessary(ProblemId::UnusedImport, message, import.name.range));
        }
    }
    checker.visit_unit(unit);

    let mut problems = checker.problems;
    problems.sort_by_key(|problem| problem.range.start());
    problems
}

struct Checker<'r> {
    resolution: &'r Resolution,
    problems: Vec<Problem>,
}

impl Checker<'_> {
    fn is_used(&self, id: BindingId) -> bool {
        self.resolution.used.contains(&id)
    }

    fn is_private(&self, id: BindingId) -> bool {
        self.resolution.bindings.get(id).is_some_and(|data| data.modifiers.contains(ModifierFlags::PRIVATE))
    }

    fn qualified_member(&self, id: BindingId) -> String {
        let bindings = &self.resolution.bindings;
        match bindings.enclosing_type(id) {
            Some(owner) => format!("{}.{}", bindings.name(owner), bindings.name(id)),
            None => bindings.name(id).to_owned(),
        }
    }

    fn unused_locals(&mut self, decl: &VarDecl) {
        for fragment in &decl.fragments {
            let Some(id) = fragment.binding else { continue };
            if !self.is_used(id) {
                self.problems.push(Problem::unnecessary(
                    ProblemId::UnusedLocal,
                    format!("The value of the local variable {} is not used", fragment.name.text),
                    fragment.name.range,
                ));
            }
        }
    }

    fn unused_private_member(&mut self, member: &Member) {
        match member {
            Member::Field(field) => {
                for fragment in &field.fragments {
                    let Some(id) = fragment.binding else { continue };
                    if self.is_private(id) && !self.is_used(id) && fragment.name.text != "serialVersionUID" {
                        self.problems.push(Problem::unnecessary(
                            ProblemId::UnusedPrivateField,
                            format!("The value of the field {} is not used", self.qualified_member(id)),
                            fragment.name.range,
                        ));
                    }
                }
            }
            Member::Method(method) => {
                let Some(id) = method.binding else { return };
                if method.is_constructor() || !self.is_private(id) || self.is_used(id) {
                    return;
                }
                let params = self.resolution.bindings.get(id).map(|data| data.params.join(", ")).unwrap_or_default();
                let owner = self
                    .resolution
                    .bindings
                    .enclosing_type(id)
                    .map(|owner| self.resolution.bindings.name(owner).to_owned())
                    .unwrap_or_default();
                self.problems.push(Problem::unnecessary(
                    ProblemId::UnusedPrivateMethod,
                    format!("The method {}({params}) from the type {owner} is never used locally", method.name.text),
                    method.name.range,
                ));
            }
            Member::Type(decl) => {
                let Some(id) = decl.binding else { return };
                if self.is_private(id) && !self.is_used(id) {
                    self.problems.push(Problem::unnecessary(
                        ProblemId::UnusedPrivateType,
                        format!("The type {} is never used locally", self.qualified_member(id)),
                        decl.name.range,
                    ));
                }
            }
            Member::Initializer(_) => {}
        }
    }

    fn redundant_cast(&mut self, range: TextRange, ty: &TypeRef, expr: &Expr) {
        if matches!(ty, TypeRef::Var { .. }) {
            return;
        }
        let target = ty.display_name();
        let source = match strip_parens(expr) {
            Expr::Name(name) => name
                .binding
                .and_then(|id| self.resolution.bindings.get(id))
                .filter(|data| data.kind.is_variable())
                .and_then(|data| data.type_name.clone()),
            Expr::Literal { kind: LiteralKind::String | LiteralKind::TextBlock, .. } => Some("String".to_owned()),
            _ => None,
        };
        if source.as_deref() == Some(target.as_str()) {
            self.problems.push(Problem::unnecessary(
                ProblemId::RedundantCast,
                format!("Unnecessary cast from {target} to {target}"),
                range,
            ));
        }
    }
}

impl Visitor for Checker<'_> {
    fn visit_member(&mut self, member: &Member) {
        self.unused_private_member(member);
        visit::walk_member(self, member);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::LocalVar(decl) | Stmt::ForEach { var: decl, .. } => self.unused_locals(decl),
            Stmt::For { init: Some(ForInit::Decl(decl)), .. } => self.unused_locals(decl),
            Stmt::Labeled { label, body, .. } => {
                let mut refs = LabelRefs { name: &label.text, found: false };
                refs.visit_stmt(body);
                if !refs.found {
                    self.problems.push(Problem::unnecessary(
                        ProblemId::UnusedLabel,
                        format!("The label {} is never explicitly referenced", label.text),
                        label.range,
                    ));
                }
            }
            Stmt::If { cond, then, else_, .. } => {
                let dead = match strip_parens(cond) {
                    Expr::Literal { kind: LiteralKind::False, .. } => Some(then.range()),
                    Expr::Literal { kind: LiteralKind::True, .. } => else_.as_ref().map(|else_| else_.range()),
                    _ => None,
                };
                if let Some(range) = dead {
                    self.problems.push(Problem::unnecessary(ProblemId::DeadCode, "Dead code", range));
                }
            }
            _ => {}
        }
        visit::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::Cast { range, ty, expr: operand } = expr {
            self.redundant_cast(*range, ty, operand);
        }
        visit::walk_expr(self, expr);
    }
}

/// Finds `break label` or `continue label` that target one labeled
/// statement, stopping at labels of the same name and at class or lambda
/// boundaries.
struct LabelRefs<'a> {
    name: &'a str,
    found: bool,
}

impl Visitor for LabelRefs<'_> {
    fn visit_type_decl(&mut self, _: &TypeDecl) {}

    fn visit_member(&mut self, _: &Member) {}

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Break { label: Some(label), .. } | Stmt::Continue { label: Some(label), .. } => {
                self.found |= label.text == self.name;
            }
            Stmt::Labeled { label, .. } if label.text == self.name => {}
            _ => visit::walk_stmt(self, stmt),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if !matches!(expr, Expr::Lambda { .. }) {
            visit::walk_expr(self, expr);
        }
    }
}

fn strip_parens(mut expr: &Expr) -> &Expr {
    while let Expr::Paren { expr: inner, .. } = expr {
        expr = inner;
    }
    expr
}
