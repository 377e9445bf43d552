//! Moving C-style array brackets from a name to its type.

use javelin_syntax::SyntaxKind::*;
use javelin_syntax::ast::{AstNode as _, VariableDecl};
use javelin_syntax::{NodeId, SyntaxNode, SyntaxTree, TextEdit, TextRange, TextSize};

/// Edits turning `int a[]` into `int[] a`.
///
/// `node` is a `VARIABLE` or `PARAMETER` with brackets after its name. When
/// the variable shares its type with other declarators, it is split into a
/// declaration of its own placed after the existing one, so the others keep
/// their type. Returns `None` when there is nothing to move or when the
/// declaration cannot be split (a `for` initializer).
pub fn move_dimensions_to_type(tree: &SyntaxTree, node: NodeId) -> Option<Vec<TextEdit>> {
    let node = tree.node(node);
    let declared = node.declared_type().filter(|declared| declared.has_name_side_dimensions())?;
    let dims: Vec<SyntaxNode<'_>> = node.children().filter(|child| child.kind() == ARRAY_DIMENSION).collect();
    let brackets: String = dims.iter().map(|dim| dim.text()).collect();
    let type_end = tree.node_range(declared.type_node).end();

    match node.kind() {
        PARAMETER => Some(in_place(&dims, type_end, brackets)),
        VARIABLE => {
            let parent = node.parent()?;
            let group: Vec<SyntaxNode<'_>> = parent
                .children()
                .filter(|sibling| {
                    sibling.declared_type().is_some_and(|other| other.type_node == declared.type_node)
                })
                .collect();
            if group.len() == 1 {
                return Some(in_place(&dims, type_end, brackets));
            }
            if parent.kind() == FOR_INIT {
                return None;
            }
            split_off(tree.text(), &group, node, &dims, type_end, &brackets)
        }
        _ => None,
    }
}

fn in_place(dims: &[SyntaxNode<'_>], type_end: TextSize, brackets: String) -> Vec<TextEdit> {
    let mut edits: Vec<TextEdit> = dims.iter().map(|dim| TextEdit::delete(dim.text_range())).collect();
    edits.push(TextEdit::insert(type_end, brackets));
    edits
}

/// Removes `node` from its declaration and re-declares it right after.
fn split_off(
    text: &str,
    group: &[SyntaxNode<'_>],
    node: SyntaxNode<'_>,
    dims: &[SyntaxNode<'_>],
    type_end: TextSize,
    brackets: &str,
) -> Option<Vec<TextEdit>> {
    let index = group.iter().position(|&member| member == node)?;
    let (first, last) = (group.first()?, group.last()?);
    let decl = VariableDecl::cast(node)?;
    let name = decl.name()?;
    let separator = decl.separator().map(|token| token.id());
    let content_end = node.tokens().rev().find(|token| Some(token.id()) != separator)?.text_range().end();

    let removed = match index {
        0 => TextRange::new(name.text_range().start(), group.get(1)?.text_range().start()),
        _ => {
            let comma = VariableDecl::cast(group[index - 1])?.separator()?;
            TextRange::new(comma.text_range().start(), content_end)
        }
    };

    let start = first.text_range().start();
    let prefix = &text[TextRange::new(start, type_end)];
    let declarator = without_dimensions(text, TextRange::new(name.text_range().start(), content_end), dims);
    let indent = indentation(text, start);
    let declaration = format!("\n{indent}{prefix}{brackets} {declarator};");

    Some(vec![TextEdit::delete(removed), TextEdit::insert(last.text_range().end(), declaration)])
}

/// Text of `range` with the bracket pairs cut out.
fn without_dimensions(text: &str, range: TextRange, dims: &[SyntaxNode<'_>]) -> String {
    let mut out = String::new();
    let mut cursor = range.start();
    for dim in dims {
        let dim = dim.text_range();
        out.push_str(&text[TextRange::new(cursor, dim.start())]);
        cursor = dim.end();
    }
    out.push_str(&text[TextRange::new(cursor, range.end())]);
    out
}

/// Leading whitespace of the line holding `offset`, if nothing else
/// precedes it on that line.
fn indentation(text: &str, offset: TextSize) -> &str {
    let before = &text[..usize::from(offset)];
    let line = before.rfind('\n').map_or(before, |newline| &before[newline + 1..]);
    if line.chars().all(char::is_whitespace) { line } else { "" }
}

#[cfg(test)]
mod tests {
    use javelin_frontend::{JavaFrontEnd, SourceInput};
    use javelin_syntax::{LanguageLevel, apply_edits};

    use super::*;
    use crate::{FileContext, SyntaxPolicy, parse_and_convert};

    fn convert(text: &str) -> FileContext {
        let input = SourceInput::new("Test.java", text, LanguageLevel::default());
        parse_and_convert(&JavaFrontEnd::new(), &input, &SyntaxPolicy::default()).unwrap()
    }

    /// Applies the fix to the declaration of `name`.
    fn fix(text: &str, name: &str) -> Option<String> {
        let context = convert(text);
        let tree = context.tree();
        let node = tree
            .root()
            .descendants()
            .filter(|node| matches!(node.kind(), VARIABLE | PARAMETER))
            .find(|node| node.child_of_kind(IDENTIFIER).is_some_and(|ident| ident.text() == name))?;
        let edits = move_dimensions_to_type(tree, node.id())?;
        Some(apply_edits(text, &edits).unwrap())
    }

    #[test]
    fn sole_declarator_is_fixed_in_place() {
        assert_eq!(fix("class T { int a[] = {1}; }", "a").as_deref(), Some("class T { int[] a = {1}; }"));
        assert_eq!(
            fix("class T { void m(String args[]) {} }", "args").as_deref(),
            Some("class T { void m(String[] args) {} }")
        );
    }

    #[test]
    fn later_declarator_is_split_off() {
        assert_eq!(
            fix("class T {\n    int a, b[];\n}\n", "b").as_deref(),
            Some("class T {\n    int a;\n    int[] b;\n}\n")
        );
        assert_eq!(
            fix("class T {\n    private int[] a, b[] = null, c;\n}\n", "b").as_deref(),
            Some("class T {\n    private int[] a, c;\n    private int[][] b = null;\n}\n")
        );
    }

    #[test]
    fn first_declarator_is_split_off() {
        assert_eq!(
            fix("class T {\n    int a[], b;\n}\n", "a").as_deref(),
            Some("class T {\n    int b;\n    int[] a;\n}\n")
        );
    }

    #[test]
    fn nothing_to_move() {
        assert_eq!(fix("class T { int[] a; }", "a"), None);
        assert_eq!(fix("class T { void m() { for (int i = 0, j[] = {}; i < 1; i++) {} } }", "j"), None);
    }
}
