use javelin_syntax::LanguageLevel;

use crate::ast::{Expr, Member, Stmt, TypeRef};
use crate::{
    BindingKind, FrontEnd as _, JavaFrontEnd, ModifierFlags, ParsedUnit, ProblemCategory, ProblemId, Severity,
    SourceInput,
};

fn parse(text: &str) -> ParsedUnit {
    let input = SourceInput::new("Test.java", text, LanguageLevel::default());
    JavaFrontEnd::new().parse(&input).unwrap()
}

fn messages(parsed: &ParsedUnit, severity: Severity) -> Vec<&str> {
    parsed.problems.iter().filter(|problem| problem.severity == severity).map(|problem| problem.message.as_str()).collect()
}

#[test]
fn clean_class() {
    let parsed = parse(
        "package demo;

import java.util.List;

public class A {
    private int count;
    public List<String> names() { return null; }
}
",
    );
    assert!(messages(&parsed, Severity::Error).is_empty());
    assert_eq!(messages(&parsed, Severity::Warning), ["The value of the field A.count is not used"]);

    let Some(class) = parsed.unit.types.first() else { panic!("no type") };
    let class_binding = class.binding.unwrap();
    let data = parsed.bindings.get(class_binding).unwrap();
    assert_eq!(data.qualified_name.as_deref(), Some("demo.A"));
    assert_eq!(parsed.bindings.members(class_binding).len(), 2);
}

#[test]
fn unresolved_symbols() {
    let parsed = parse(
        "class B {
    void run() {
        Foo foo = null;
        missing();
        int x = y;
    }
}
",
    );
    assert_eq!(
        messages(&parsed, Severity::Error),
        [
            "Foo cannot be resolved to a type",
            "The method missing() is undefined for the type B",
            "y cannot be resolved to a variable",
        ]
    );
    assert_eq!(
        messages(&parsed, Severity::Warning),
        ["The value of the local variable foo is not used", "The value of the local variable x is not used"]
    );
    let categories: Vec<_> = parsed.problems.iter().filter(|p| p.is_error()).map(|p| p.category).collect();
    assert_eq!(categories, [ProblemCategory::Type, ProblemCategory::Semantic, ProblemCategory::Semantic]);
}

#[test]
fn switch_on_unresolved_type() {
    let parsed = parse(
        "class C {
    int f(Unknown u) {
        return switch (u) {
            case A -> 1;
            case B -> 2;
        };
    }
}
",
    );
    let ids: Vec<_> = parsed.problems.iter().map(|problem| (problem.id, problem.category)).collect();
    assert_eq!(
        ids,
        [
            (ProblemId::UnresolvedType, ProblemCategory::Type),
            (ProblemId::SwitchNotExhaustive, ProblemCategory::Syntax),
        ]
    );
}

#[test]
fn labels_dead_code_and_casts() {
    let parsed = parse(
        "class D {
    void m(String s) {
        outer:
        for (int i = 0; i < 3; i++) {
            inner:
            while (true) {
                break outer;
            }
        }
        if (false) {
            s = \"x\";
        }
        Object o = (String) s;
        System.out.println(o);
    }
}
",
    );
    let ids: Vec<_> = parsed.problems.iter().map(|problem| problem.id).collect();
    assert_eq!(ids, [ProblemId::UnusedLabel, ProblemId::DeadCode, ProblemId::RedundantCast]);
    assert_eq!(parsed.problems[0].message, "The label inner is never explicitly referenced");
    assert_eq!(parsed.problems[2].message, "Unnecessary cast from String to String");
}

#[test]
fn imports() {
    let parsed = parse(
        "import java.util.List;
import java.util.*;
import java.io.IOException;

class F {
    Map<String, Integer> m;
    void run() throws IOException {}
}
",
    );
    assert!(messages(&parsed, Severity::Error).is_empty());
    assert_eq!(messages(&parsed, Severity::Warning), ["The import java.util.List is never used"]);
    assert!(parsed.unit.imports[0].binding.is_some());
    assert!(parsed.unit.imports[1].binding.is_none());
}

#[test]
fn references_bind_to_declarations() {
    let parsed = parse(
        "class G {
    int total;
    int add(int n) {
        int sum = total + n;
        return sum;
    }
}
",
    );
    assert!(parsed.problems.is_empty(), "{:?}", parsed.problems);

    let members = &parsed.unit.types[0].body.members;
    let (Member::Field(field), Member::Method(method)) = (&members[0], &members[1]) else {
        panic!("unexpected members: {members:?}")
    };
    let total = field.fragments[0].binding.unwrap();
    assert_eq!(parsed.bindings.kind(total), Some(BindingKind::Field));

    let stmts = &method.body.as_ref().unwrap().stmts;
    let (Stmt::LocalVar(local), Stmt::Return { expr: Some(Expr::Name(returned)), .. }) = (&stmts[0], &stmts[1])
    else {
        panic!("unexpected statements: {stmts:?}")
    };
    let sum = local.fragments[0].binding.unwrap();
    assert_eq!(returned.binding, Some(sum));
    assert_eq!(parsed.bindings.get(sum).unwrap().owner, method.binding);

    let Some(Expr::Binary { lhs, .. }) = &local.fragments[0].init else { panic!("not a binary expression") };
    let Expr::Name(read) = &**lhs else { panic!("not a name") };
    assert_eq!(read.binding, Some(total));
}

#[test]
fn enum_switch_labels() {
    let parsed = parse(
        "enum Color { RED, GREEN }

class H {
    String name(Color c) {
        switch (c) {
            case RED: return \"r\";
            default: return \"other\";
        }
    }
}
",
    );
    assert!(parsed.problems.is_empty(), "{:?}", parsed.problems);
}

#[test]
fn anonymous_classes_and_lambdas() {
    let parsed = parse(
        "class K {
    void run() {
        Runnable r = new Runnable() {
            public void run() { helper(); }
        };
        r.run();
        java.util.function.Function<String, Integer> f = s -> s.length();
        f.apply(\"x\");
    }

    private void helper() {}
}
",
    );
    assert!(parsed.problems.is_empty(), "{:?}", parsed.problems);
}

#[test]
fn sealed_types_intersection_casts_and_pattern_labels() {
    let parsed = parse(
        "sealed interface Shape permits Circle, Square {}
final class Circle implements Shape {}
non-sealed class Square implements Shape {
    class Corner {}
}

class M {
    int describe(Object o) {
        Runnable r = (Runnable & java.io.Serializable) () -> {};
        r.run();
        Square.Corner corner = new Square().new Corner();
        System.out.println(corner);
        return switch (o) {
            case String s when s.isEmpty() -> 0;
            case String s -> s.length();
            default -> -1;
        };
    }
}
",
    );
    assert!(parsed.problems.is_empty(), "{:?}", parsed.problems);

    let [shape, circle, square, m] = &parsed.unit.types[..] else { panic!("unexpected types") };
    let flags = |id| parsed.bindings.get(id).unwrap().modifiers;
    assert!(flags(shape.binding.unwrap()).contains(ModifierFlags::SEALED));
    assert!(flags(square.binding.unwrap()).contains(ModifierFlags::NON_SEALED));
    let permitted: Vec<_> = shape
        .permits
        .iter()
        .map(|ty| match ty {
            TypeRef::Named(named) => named.binding,
            other => panic!("not a named type: {other:?}"),
        })
        .collect();
    assert_eq!(permitted, [circle.binding, square.binding]);

    let Member::Method(describe) = &m.body.members[0] else { panic!("not a method") };
    let stmts = &describe.body.as_ref().unwrap().stmts;

    let Stmt::LocalVar(runnable) = &stmts[0] else { panic!("not a local variable") };
    let Some(Expr::Cast { ty: TypeRef::Intersection { bounds, .. }, expr, .. }) = &runnable.fragments[0].init else {
        panic!("not an intersection cast")
    };
    assert_eq!(bounds.len(), 2);
    assert!(matches!(**expr, Expr::Lambda { .. }));

    let Member::Type(corner_decl) = &square.body.members[0] else { panic!("not a member type") };
    let Stmt::LocalVar(corner) = &stmts[2] else { panic!("not a local variable") };
    let Some(Expr::New { outer: Some(outer), ty: TypeRef::Named(created), .. }) = &corner.fragments[0].init else {
        panic!("not a qualified creation")
    };
    assert!(matches!(**outer, Expr::New { outer: None, .. }));
    assert_eq!(created.binding, corner_decl.binding);

    let Stmt::Return { expr: Some(Expr::Switch { body, .. }), .. } = &stmts[4] else { panic!("not a switch") };
    let guarded = &body.cases[0].labels[0];
    let pattern = guarded.pattern.as_ref().unwrap();
    assert!(guarded.exprs.is_empty());
    assert_eq!(parsed.bindings.kind(pattern.binding.unwrap()), Some(BindingKind::LocalVariable));
    let Some(Expr::MethodCall { target: Some(target), .. }) = &guarded.guard else { panic!("no guard") };
    let Expr::Name(tested) = &**target else { panic!("not a name") };
    assert_eq!(tested.binding, pattern.binding);
    assert!(body.cases[1].labels[0].guard.is_none());
}

#[test]
fn sealed_and_when_stay_plain_names() {
    let parsed = parse(
        "class N {
    int sealed;
    int when(int permits) {
        int non = 1;
        switch (permits) {
            case 1 -> sealed = non - sealed;
            default -> {}
        }
        return (sealed & permits);
    }
}
",
    );
    assert!(messages(&parsed, Severity::Error).is_empty(), "{:?}", parsed.problems);
    let Member::Field(field) = &parsed.unit.types[0].body.members[0] else { panic!("not a field") };
    assert!(field.modifiers.is_none());
    assert_eq!(field.fragments[0].name.text, "sealed");
}

#[test]
fn declarators_and_nested_generics() {
    let parsed = parse(
        "class L {
    int a, b[];
    java.util.List<java.util.List<String>> nested;
}
",
    );
    assert!(messages(&parsed, Severity::Error).is_empty());

    let members = &parsed.unit.types[0].body.members;
    let Member::Field(ints) = &members[0] else { panic!("not a field") };
    assert_eq!(ints.fragments.len(), 2);
    assert!(ints.fragments[0].dims.is_empty());
    assert_eq!(ints.fragments[1].dims.len(), 1);
    let b = ints.fragments[1].binding.unwrap();
    assert_eq!(parsed.bindings.get(b).unwrap().type_name.as_deref(), Some("int[]"));

    let Member::Field(nested) = &members[1] else { panic!("not a field") };
    let TypeRef::Named(outer) = &nested.ty else { panic!("not a named type") };
    let args = outer.args.as_ref().unwrap();
    assert_eq!(u32::from(args.range.end()), u32::from(nested.ty.range().end()));
    assert_eq!(nested.ty.display_name(), "java.util.List<java.util.List<String>>");
}

#[test]
fn syntax_error_yields_empty_unit() {
    let parsed = parse("class E { void m() { int x = ; } }");
    assert!(parsed.unit.types.is_empty());
    assert_eq!(parsed.problems.len(), 1);
    assert_eq!(parsed.problems[0].category, ProblemCategory::Syntax);
    assert!(parsed.problems[0].is_error());
}

#[test]
fn lexical_error_is_a_syntax_problem() {
    let parsed = parse("class E { String s = \"open; }");
    assert_eq!(parsed.problems.len(), 1);
    assert_eq!(parsed.problems[0].id, ProblemId::SyntaxError);
}
