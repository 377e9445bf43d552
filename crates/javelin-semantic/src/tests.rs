use javelin_frontend::{BindingData, BindingId, BindingKind, Bindings, ModifierFlags, Origin};
use javelin_syntax::SyntaxKind::*;
use javelin_syntax::{Element, NodeId, Position, SyntaxTree, TextRange, TextSize, Token, TokenId, TreeBuilder};

use crate::SemanticBuilder;

/// `a b a` with one `IDENTIFIER` node per name.
fn names_tree() -> (SyntaxTree, [NodeId; 3]) {
    let tokens = [("a", 0), ("b", 2), ("a", 4)]
        .into_iter()
        .map(|(text, start)| {
            let range = TextRange::at(TextSize::from(start), TextSize::of(text));
            Token::new(IDENT, text, range, Position::new(1, start), Vec::new())
        })
        .chain([Token::new(EOF, "", TextRange::empty(TextSize::from(5)), Position::new(1, 5), Vec::new())])
        .collect();
    let mut builder = TreeBuilder::new("a b a", tokens);
    let names = [0, 1, 2].map(|index| builder.node(IDENTIFIER, vec![TokenId::new(index).into()]));
    let mut children: Vec<Element> = names.iter().map(|&name| name.into()).collect();
    children.push(TokenId::new(3).into());
    let root = builder.node(COMPILATION_UNIT, children);
    (builder.finish(root).unwrap(), names)
}

fn method(bindings: &mut Bindings, owner: BindingId, name: &str, params: &[&str]) -> BindingId {
    let mut data = BindingData::new(BindingKind::Method, name, Origin::Source).with_owner(Some(owner));
    data.params = params.iter().map(|param| (*param).to_owned()).collect();
    bindings.alloc(data)
}

struct Hierarchy {
    bindings: Bindings,
    base: BindingId,
    iface: BindingId,
    derived: BindingId,
    base_m: BindingId,
    iface_run: BindingId,
    derived_m: BindingId,
    derived_m_long: BindingId,
    derived_run: BindingId,
    derived_helper: BindingId,
}

/// `class Base { void m(int) }`, `interface Iface { void run() }` and
/// `class Derived extends Base implements Iface`.
fn hierarchy() -> Hierarchy {
    let mut bindings = Bindings::new();
    let base = bindings.alloc(BindingData::new(BindingKind::Class, "Base", Origin::Source));
    let base_m = method(&mut bindings, base, "m", &["int"]);
    let iface = bindings.alloc(BindingData::new(BindingKind::Interface, "Iface", Origin::Source));
    let iface_run = method(&mut bindings, iface, "run", &[]);

    let mut derived_data = BindingData::new(BindingKind::Class, "Derived", Origin::Source);
    derived_data.super_class = Some(base);
    derived_data.interfaces = vec![iface];
    let derived = bindings.alloc(derived_data);
    let derived_m = method(&mut bindings, derived, "m", &["int"]);
    let derived_m_long = method(&mut bindings, derived, "m", &["long"]);
    let derived_run = method(&mut bindings, derived, "run", &[]);
    let helper = BindingData::new(BindingKind::Method, "run", Origin::Source)
        .with_owner(Some(derived))
        .with_modifiers(ModifierFlags::STATIC);
    let derived_helper = bindings.alloc(helper);

    Hierarchy {
        bindings,
        base,
        iface,
        derived,
        base_m,
        iface_run,
        derived_m,
        derived_m_long,
        derived_run,
        derived_helper,
    }
}

#[test]
fn usages_are_in_source_order() {
    let (tree, [first, second, third]) = names_tree();
    let mut bindings = Bindings::new();
    let a = bindings.alloc(BindingData::new(BindingKind::LocalVariable, "a", Origin::Source));
    let b = bindings.alloc(BindingData::new(BindingKind::LocalVariable, "b", Origin::Source));

    let mut builder = SemanticBuilder::new();
    builder.reference(a, third);
    builder.declare(a, first);
    builder.reference(b, second);
    let model = builder.finish(&tree, bindings);

    assert_eq!(model.declaration(a), Some(first));
    assert_eq!(model.usages(a), [third]);
    assert_eq!(model.declaration(b), None);
    assert_eq!(model.usages(b), [second]);
    assert_eq!(model.symbol_at(third).map(|symbol| symbol.name()), Some("a"));
    assert_eq!(model.declarations(), [(a, first)]);
}

#[test]
fn supertypes_and_overrides() {
    let (tree, _) = names_tree();
    let h = hierarchy();
    let model = SemanticBuilder::new().finish(&tree, h.bindings);

    let derived = model.symbol(h.derived);
    assert_eq!(derived.supertypes(), [h.base, h.iface]);
    assert_eq!(derived.super_type().map(|ty| ty.id()), Some(h.base));
    assert_eq!(derived.members().count(), 4);

    assert_eq!(model.symbol(h.derived_m).overrides().map(|m| m.id()), Some(h.base_m));
    assert_eq!(model.symbol(h.derived_run).overrides().map(|m| m.id()), Some(h.iface_run));
    assert_eq!(model.symbol(h.derived_m_long).overrides(), None);
    assert_eq!(model.symbol(h.derived_helper).overrides(), None);
    assert_eq!(model.symbol(h.base_m).overrides(), None);

    // Memoized answers stay the same.
    assert_eq!(model.symbol(h.derived_m).overrides().map(|m| m.id()), Some(h.base_m));
    assert_eq!(model.symbol(h.derived_m).enclosing_type(), Some(derived));
}

#[test]
fn labels_flow_into_the_model() {
    let (tree, [label, jump, stray]) = names_tree();
    let mut builder = SemanticBuilder::new();
    let id = builder.enter_label("a");
    assert_eq!(builder.resolve_label("a", jump), Some(id));
    assert_eq!(builder.exit_label(label), Some(id));
    assert_eq!(builder.resolve_label("a", stray), None);
    let model = builder.finish(&tree, Bindings::new());

    let symbol = model.label_of(jump).unwrap();
    assert_eq!(symbol.name(), "a");
    assert_eq!(symbol.declaration(), Some(label));
    assert_eq!(model.label_of(label), Some(symbol));
    assert_eq!(model.unresolved_labels(), [stray]);
}

#[test]
fn unknown_bindings_are_harmless() {
    let (tree, _) = names_tree();
    let model = SemanticBuilder::new().finish(&tree, Bindings::new());
    let ghost = hierarchy().derived;
    let symbol = model.symbol(ghost);
    assert!(symbol.is_unknown());
    assert_eq!(symbol.name(), "");
    assert!(symbol.supertypes().is_empty());
    assert_eq!(symbol.overrides(), None);
}
