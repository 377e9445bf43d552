//! Statement labels and the `break`/`continue` statements naming them.

use javelin_syntax::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(u32);

impl LabelId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Labels open outside a class or lambda body, set aside while it is converted.
#[derive(Debug)]
#[must_use = "the outer labels are lost unless the frame is restored"]
pub struct LabelFrame(Vec<LabelId>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSymbol {
    name: String,
    declaration: Option<NodeId>,
    usages: Vec<NodeId>,
}

impl LabelSymbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The labeled statement. Set once the statement is built.
    pub fn declaration(&self) -> Option<NodeId> {
        self.declaration
    }

    pub fn usages(&self) -> &[NodeId] {
        &self.usages
    }
}

/// Stack of labels enclosing the statement being converted.
///
/// A label is entered before its statement body is converted and exited
/// after, so a `break` or `continue` inside the body resolves against the
/// innermost open label of that name.
#[derive(Debug, Default)]
pub struct LabelScopes {
    labels: Vec<LabelSymbol>,
    open: Vec<LabelId>,
    unresolved: Vec<NodeId>,
}

impl LabelScopes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, name: impl Into<String>) -> LabelId {
        let id = LabelId(self.labels.len() as u32);
        self.labels.push(LabelSymbol { name: name.into(), declaration: None, usages: Vec::new() });
        self.open.push(id);
        id
    }

    /// Closes the innermost label and records the statement it labels.
    pub fn exit(&mut self, declaration: NodeId) -> Option<LabelId> {
        let id = self.open.pop()?;
        self.labels[id.index()].declaration = Some(declaration);
        Some(id)
    }

    /// Resolves `name` used at `usage`, innermost first. Unknown names are
    /// remembered as unresolved.
    pub fn resolve(&mut self, name: &str, usage: NodeId) -> Option<LabelId> {
        let found = self.open.iter().rev().copied().find(|id| self.labels[id.index()].name == name);
        match found {
            Some(id) => self.labels[id.index()].usages.push(usage),
            None => self.unresolved.push(usage),
        }
        found
    }

    /// Hides the open labels; jumps in a class or lambda body cannot target them.
    pub fn enter_body(&mut self) -> LabelFrame {
        LabelFrame(std::mem::take(&mut self.open))
    }

    pub fn exit_body(&mut self, frame: LabelFrame) {
        debug_assert!(self.open.is_empty(), "labels left open in a body");
        self.open = frame.0;
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn get(&self, id: LabelId) -> &LabelSymbol {
        &self.labels[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelId, &LabelSymbol)> {
        self.labels.iter().enumerate().map(|(index, label)| (LabelId(index as u32), label))
    }

    pub fn unresolved(&self) -> &[NodeId] {
        &self.unresolved
    }
}

#[cfg(test)]
mod tests {
    use la_arena::RawIdx;

    use super::*;

    fn node(index: u32) -> NodeId {
        NodeId::from_raw(RawIdx::from(index))
    }

    #[test]
    fn innermost_label_wins() {
        let mut scopes = LabelScopes::new();
        let outer = scopes.enter("loop");
        let inner = scopes.enter("loop");

        assert_eq!(scopes.resolve("loop", node(1)), Some(inner));
        assert_eq!(scopes.exit(node(2)), Some(inner));
        assert_eq!(scopes.resolve("loop", node(3)), Some(outer));
        assert_eq!(scopes.exit(node(4)), Some(outer));

        assert_eq!(scopes.get(inner).usages(), [node(1)]);
        assert_eq!(scopes.get(outer).usages(), [node(3)]);
        assert_eq!(scopes.get(outer).declaration(), Some(node(4)));
        assert_eq!(scopes.depth(), 0);
    }

    #[test]
    fn closed_and_unknown_labels_stay_unresolved() {
        let mut scopes = LabelScopes::new();
        scopes.enter("a");
        scopes.exit(node(0));

        assert_eq!(scopes.resolve("a", node(1)), None);
        assert_eq!(scopes.resolve("b", node(2)), None);
        assert_eq!(scopes.unresolved(), [node(1), node(2)]);
        assert_eq!(scopes.exit(node(3)), None);
    }

    #[test]
    fn bodies_hide_enclosing_labels() {
        let mut scopes = LabelScopes::new();
        let outer = scopes.enter("outer");

        let frame = scopes.enter_body();
        assert_eq!(scopes.depth(), 0);
        assert_eq!(scopes.resolve("outer", node(1)), None);
        let inner = scopes.enter("outer");
        assert_eq!(scopes.resolve("outer", node(2)), Some(inner));
        scopes.exit(node(3));
        scopes.exit_body(frame);

        assert_eq!(scopes.resolve("outer", node(4)), Some(outer));
        assert_eq!(scopes.get(outer).usages(), [node(4)]);
        assert_eq!(scopes.unresolved(), [node(1)]);
    }
}
