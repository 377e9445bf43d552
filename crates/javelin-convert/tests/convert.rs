use expect_test::expect;
use javelin_convert::{ConvertError, ExceptionTable, FileContext, SyntaxPolicy, parse_and_convert};
use javelin_frontend::{FrontEnd as _, JavaFrontEnd, SourceInput};
use javelin_syntax::SyntaxKind::{self, *};
use javelin_syntax::ast::{AstNode as _, Parameter, VariableDecl};
use javelin_syntax::{LanguageLevel, SyntaxNode, SyntaxTree};

fn input(text: &str) -> SourceInput {
    SourceInput::new("Test.java", text, LanguageLevel::default())
}

fn lenient() -> SyntaxPolicy {
    let front_end = JavaFrontEnd::new();
    SyntaxPolicy::for_front_end(&[ExceptionTable::default()], front_end.name(), front_end.version())
}

#[track_caller]
fn convert(text: &str) -> FileContext {
    match parse_and_convert(&JavaFrontEnd::new(), &input(text), &lenient()) {
        Ok(context) => context,
        Err(error) => panic!("conversion failed: {error}"),
    }
}

fn nodes(tree: &SyntaxTree, kind: SyntaxKind) -> Vec<SyntaxNode<'_>> {
    tree.root().descendants().filter(|node| node.kind() == kind).collect()
}

fn named<'t>(tree: &'t SyntaxTree, kind: SyntaxKind, name: &str) -> SyntaxNode<'t> {
    nodes(tree, kind)
        .into_iter()
        .find(|node| node.child_of_kind(IDENTIFIER).is_some_and(|ident| ident.text() == name))
        .unwrap_or_else(|| panic!("no {kind:?} named {name}"))
}

#[test]
fn declarators_are_split() {
    let context = convert("class A { int a, b[]; }\n");
    let tree = context.tree();
    expect![[r#"
        COMPILATION_UNIT@0..24
          CLASS@0..23
            CLASS_KW@0..5 "class"
            IDENTIFIER@6..7
              IDENT@6..7 "A"
            L_BRACE@8..9 "{"
            VARIABLE@10..16
              PRIMITIVE_TYPE@10..13
                INT_KW@10..13 "int"
              IDENTIFIER@14..15
                IDENT@14..15 "a"
              COMMA@15..16 ","
            VARIABLE@17..21
              IDENTIFIER@17..18
                IDENT@17..18 "b"
              ARRAY_DIMENSION@18..20
                L_BRACKET@18..19 "["
                R_BRACKET@19..20 "]"
              SEMICOLON@20..21 ";"
            R_BRACE@22..23 "}"
          EOF@24..24 ""
    "#]]
    .assert_eq(&format!("{tree:?}"));

    let vars: Vec<VariableDecl<'_>> = nodes(tree, VARIABLE).into_iter().filter_map(VariableDecl::cast).collect();
    let types: Vec<String> =
        vars.iter().map(|var| var.declared_type().unwrap().display(tree)).collect();
    assert_eq!(types, ["int", "int[]"]);
    assert!(vars[0].owns_type());
    assert!(!vars[1].owns_type());
    assert_eq!(vars[0].declared_type().unwrap().type_node, vars[1].declared_type().unwrap().type_node);
    assert_eq!(vars[1].declared_type().unwrap().shape().rank(), 1);
    assert!(vars[1].declared_type().unwrap().has_name_side_dimensions());
}

#[test]
fn for_initializer_leaves_semicolon_to_the_loop() {
    let context = convert("class F { void m() { for (int i = 0, j = 1; i < j; i++) {} } }\n");
    let tree = context.tree();

    let init = nodes(tree, FOR_INIT).pop().unwrap();
    let texts: Vec<&str> = init.children().map(|var| var.text()).collect();
    assert_eq!(texts, ["int i = 0,", "j = 1"]);
    let for_stmt = init.parent().unwrap();
    let semicolons = for_stmt.child_tokens().filter(|token| token.kind() == SEMICOLON).count();
    assert_eq!(semicolons, 2);
}

#[test]
fn every_construct_converts() {
    let context = convert(
        r#"package demo;

import java.util.List;
import static java.lang.Math.max;

/** A sample. */
@Deprecated
public class Sample<T extends Comparable<T>> implements Runnable {
    private static final int[] TABLE = {1, 2, 3};
    private final List<List<T>> rows;
    ;

    static {
        System.out.println("init");
    }

    public Sample(List<List<T>> rows) {
        this.rows = rows;
    }

    @Override
    public void run() {
        outer:
        for (int i = 0, j = 10; i < j; i++, j--) {
            for (int value : TABLE) {
                if (value > i) continue outer;
                else break;
            }
        }
        try (var reader = new java.io.StringReader("x")) {
            reader.read();
        } catch (IllegalStateException | IllegalArgumentException e) {
            throw e;
        } catch (Exception e) {
            assert false : "unreachable";
        } finally {
            synchronized (this) {
                do { } while (false);
            }
        }
        Runnable r = () -> {};
        java.util.function.Function<String, Integer> f = String::length;
        int[][] grid = new int[3][];
        Object o = rows;
        if (o instanceof List<?> list && !list.isEmpty()) {
            System.out.println(list.size());
        }
        int kind = switch (grid.length) {
            case 0 -> 0;
            case 1, 2 -> {
                yield max(1, 2);
            }
            default -> -1;
        };
        String text = kind > 0 ? "a" : "b";
        r.run();
        f.apply(text);
        Object copy = (Object) text;
        Class<?> type = String.class;
        grid[0] = new int[] {kind};
        new Thread(this) {
            @Override
            public void run() {}
        }.start();
    }

    <R> R id(R value, Object... rest) {
        return value;
    }

    enum Mode {
        ON("on") {
            @Override
            String label() { return "ON"; }
        },
        OFF("off");

        private final String name;

        Mode(String name) { this.name = name; }

        String label() { return name; }
    }

    record Point(int x, int y) {
        Point {
            if (x < 0) throw new IllegalArgumentException();
        }
    }

    @interface Marker {
        String value() default "";
    }
}
"#,
    );
    let tree = context.tree();
    tree.verify().unwrap();

    let expected = [
        PACKAGE_DECLARATION,
        IMPORT_DECLARATION,
        MODIFIERS,
        ANNOTATION,
        TYPE_PARAMETERS,
        IMPLEMENTS_CLAUSE,
        EMPTY_DECLARATION,
        STATIC_INITIALIZER,
        CONSTRUCTOR,
        LABELED_STATEMENT,
        FOR_INIT,
        FOR_UPDATE,
        FOREACH_STATEMENT,
        CONTINUE_STATEMENT,
        TRY_STATEMENT,
        RESOURCE_LIST,
        CATCH_CLAUSE,
        UNION_TYPE,
        ASSERT_STATEMENT,
        SYNCHRONIZED_STATEMENT,
        DO_STATEMENT,
        LAMBDA_EXPRESSION,
        METHOD_REFERENCE,
        NEW_ARRAY,
        ARRAY_INITIALIZER,
        INSTANCEOF_EXPRESSION,
        PATTERN,
        WILDCARD_TYPE,
        SWITCH_EXPRESSION,
        CASE_GROUP,
        YIELD_STATEMENT,
        CONDITIONAL_EXPRESSION,
        TYPE_CAST,
        CLASS_LITERAL,
        NEW_CLASS,
        ENUM,
        ENUM_CONSTANT,
        RECORD,
        INTERFACE,
    ];
    for kind in expected {
        assert!(!nodes(tree, kind).is_empty(), "no {kind:?} node");
    }

    let javadoc = nodes(tree, CLASS)[0].first_token();
    assert_eq!(javadoc.trivia().len(), 1);
    assert_eq!(&*javadoc.trivia()[0].text, "/** A sample. */");

    let rest = named(tree, PARAMETER, "rest");
    assert!(Parameter::cast(rest).unwrap().is_varargs());
    assert_eq!(rest.declared_type().unwrap().display(tree), "Object[]");

    let grid = named(tree, VARIABLE, "grid");
    assert_eq!(grid.declared_type().unwrap().shape().rank(), 2);
}

#[test]
fn sealed_types_casts_and_pattern_labels() {
    let context = convert(
        "sealed interface Shape permits Circle, Square {}
final class Circle implements Shape {}
non-sealed class Square implements Shape {
    class Corner {}
}

class M {
    int describe(Object o) {
        Runnable r = (Runnable & java.io.Serializable) () -> {};
        Square.Corner corner = new Square().new Corner();
        return switch (o) {
            case String s when s.isEmpty() -> 0;
            default -> corner == null ? 1 : r.hashCode();
        };
    }
}
",
    );
    let tree = context.tree();
    tree.verify().unwrap();

    let permits = nodes(tree, PERMITS_CLAUSE);
    assert_eq!(permits.len(), 1);
    assert_eq!(permits[0].text(), "permits Circle, Square");
    let square = named(tree, CLASS, "Square");
    assert_eq!(square.child_of_kind(MODIFIERS).map(|modifiers| modifiers.text()), Some("non-sealed"));

    let intersection = nodes(tree, INTERSECTION_TYPE);
    assert_eq!(intersection.len(), 1);
    assert_eq!(intersection[0].text(), "Runnable & java.io.Serializable");
    assert_eq!(intersection[0].parent().map(|cast| cast.kind()), Some(TYPE_CAST));

    let qualified: Vec<_> = nodes(tree, NEW_CLASS)
        .into_iter()
        .filter(|node| node.first_child().is_some_and(|outer| outer.kind() == NEW_CLASS))
        .collect();
    assert_eq!(qualified.len(), 1);
    assert_eq!(qualified[0].text(), "new Square().new Corner()");

    let label = nodes(tree, CASE_LABEL)[0];
    let kinds: Vec<_> = label.children().map(|child| child.kind()).collect();
    assert_eq!(kinds, [PATTERN, METHOD_INVOCATION]);
    assert_eq!(label.text(), "case String s when s.isEmpty() ->");
}

#[test]
fn nested_generic_closers_are_split() {
    let context = convert("class L { java.util.List<java.util.List<String>> nested; }\n");
    let tree = context.tree();
    let kinds: Vec<SyntaxKind> = tree.tokens().iter().map(|token| token.kind()).collect();
    assert_eq!(kinds.iter().filter(|&&kind| kind == GT).count(), 2);
    assert!(!kinds.contains(&SHR));

    for args in nodes(tree, TYPE_ARGUMENTS) {
        assert_eq!(args.last_token().kind(), GT);
    }
}

#[test]
fn bindings_map_to_declarations_and_usages() {
    let context = convert(
        "class G {
    int total;
    int add(int n) {
        int sum = total + n;
        return sum;
    }
}
",
    );
    let tree = context.tree();
    let semantic = context.semantic();

    let sum = named(tree, VARIABLE, "sum");
    let symbol = semantic.symbol_at(sum.id()).unwrap();
    assert_eq!(symbol.name(), "sum");
    assert_eq!(symbol.declaration(), Some(sum.id()));
    let usages: Vec<SyntaxKind> =
        symbol.usages().iter().map(|&usage| tree.node(usage).parent().unwrap().kind()).collect();
    assert_eq!(usages, [RETURN_STATEMENT]);

    let total = semantic.symbol_at(named(tree, VARIABLE, "total").id()).unwrap();
    let usage = tree.node(total.usages()[0]);
    assert_eq!(usage.text(), "total");
    assert_eq!(usage.parent().unwrap().kind(), BINARY_EXPRESSION);
    assert_eq!(total.enclosing_type().map(|owner| owner.name()), Some("G"));
}

#[test]
fn labels_resolve_innermost_first() {
    let context = convert(
        "class L {
    void m() {
        outer:
        for (int i = 0; i < 3; i++) {
            outer:
            while (true) {
                break outer;
            }
            continue outer;
        }
        while (true) {
            break missing;
        }
    }
}
",
    );
    let tree = context.tree();
    let semantic = context.semantic();

    let labels: Vec<_> = semantic.labels().collect();
    assert_eq!(labels.len(), 2);
    let jumps: Vec<Vec<SyntaxKind>> = labels
        .iter()
        .map(|label| label.usages().iter().map(|&usage| tree.node(usage).parent().unwrap().kind()).collect())
        .collect();
    assert_eq!(jumps, [vec![CONTINUE_STATEMENT], vec![BREAK_STATEMENT]]);

    let loops: Vec<SyntaxKind> = labels
        .iter()
        .map(|label| {
            let statement = tree.node(label.declaration().unwrap());
            assert_eq!(statement.kind(), LABELED_STATEMENT);
            statement.children().last().unwrap().kind()
        })
        .collect();
    assert_eq!(loops, [FOR_STATEMENT, WHILE_STATEMENT]);

    let unresolved = semantic.unresolved_labels();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(tree.node(unresolved[0]).text(), "missing");
}

#[test]
fn labels_stop_at_class_and_lambda_bodies() {
    let text = "class K {
    void m() {
        outer:
        while (true) {
            new Runnable() {
                public void run() {
                    while (true) {
                        break outer;
                    }
                }
            };
            Runnable r = () -> {
                while (true) {
                    continue outer;
                }
            };
            break outer;
        }
    }
}
";
    let context = convert(text);
    let tree = context.tree();
    let semantic = context.semantic();

    let labels: Vec<_> = semantic.labels().collect();
    assert_eq!(labels.len(), 1);
    let usages = labels[0].usages();
    assert_eq!(usages.len(), 1);
    let last_break = text.rfind("break outer").unwrap() + "break ".len();
    assert_eq!(usize::from(tree.node(usages[0]).text_range().start()), last_break);

    let unresolved: Vec<SyntaxKind> =
        semantic.unresolved_labels().iter().map(|&usage| tree.node(usage).parent().unwrap().kind()).collect();
    assert_eq!(unresolved, [BREAK_STATEMENT, CONTINUE_STATEMENT]);
}

#[test]
fn conversion_is_idempotent() {
    let text = "class I { int x; int y() { return x; } }\n";
    let first = convert(text);
    let second = convert(text);
    assert_eq!(format!("{:?}", first.tree()), format!("{:?}", second.tree()));
    assert_eq!(first.semantic().declarations(), second.semantic().declarations());
    assert_eq!(first.warnings(), second.warnings());
}

#[test]
fn syntax_errors_abort_the_file() {
    let error = parse_and_convert(&JavaFrontEnd::new(), &input("class E { void m() { int x = ; } }"), &lenient())
        .unwrap_err();
    assert!(matches!(error, ConvertError::Syntax { line: 1, .. }), "{error:?}");
    assert!(error.range().is_some_and(|range| range.start() > 0.into()));

    let error =
        parse_and_convert(&JavaFrontEnd::new(), &input("class E { String s = \"open; }"), &lenient()).unwrap_err();
    assert!(matches!(error, ConvertError::Lex(_)), "{error:?}");
    assert_eq!(error.range().map(|range| range.start()), Some(21.into()));
}

#[test]
fn tolerated_syntax_problems_leave_incomplete_semantics() {
    let text = "class C {
    int f(Unknown u) {
        return switch (u) {
            case A -> 1;
            case B -> 2;
        };
    }
}
";
    let context = convert(text);
    assert!(context.has_incomplete_semantics());
    assert!(context.warnings().is_empty());

    let strict = parse_and_convert(&JavaFrontEnd::new(), &input(text), &SyntaxPolicy::default());
    assert!(matches!(strict, Err(ConvertError::Syntax { .. })));
}
