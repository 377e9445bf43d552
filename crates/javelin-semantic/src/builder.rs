use javelin_frontend::BindingId;
use javelin_syntax::{NodeId, SyntaxTree};
use rustc_hash::FxHashMap;

use crate::labels::{LabelFrame, LabelId, LabelScopes};
use crate::model::{Derived, SemanticModel};
use crate::SymbolBackend;

/// Collects declarations, usages and labels while a tree is being built.
#[derive(Debug, Default)]
pub struct SemanticBuilder {
    declarations: FxHashMap<BindingId, NodeId>,
    usages: FxHashMap<BindingId, Vec<NodeId>>,
    bindings_by_node: FxHashMap<NodeId, BindingId>,
    labels: LabelScopes,
    labels_by_node: FxHashMap<NodeId, LabelId>,
}

impl SemanticBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `node` as the declaration of `binding`.
    pub fn declare(&mut self, binding: BindingId, node: NodeId) {
        if self.claim(node, binding) {
            self.declarations.entry(binding).or_insert(node);
        }
    }

    /// Records `node` as a usage of `binding`.
    pub fn reference(&mut self, binding: BindingId, node: NodeId) {
        if self.claim(node, binding) {
            self.usages.entry(binding).or_default().push(node);
        }
    }

    /// A node carries at most one binding; later registrations are dropped.
    fn claim(&mut self, node: NodeId, binding: BindingId) -> bool {
        debug_assert!(!self.bindings_by_node.contains_key(&node), "{node:?} registered twice");
        if self.bindings_by_node.contains_key(&node) {
            return false;
        }
        self.bindings_by_node.insert(node, binding);
        true
    }

    pub fn enter_label(&mut self, name: &str) -> LabelId {
        self.labels.enter(name)
    }

    /// Closes the innermost label, declared by the statement `node`.
    pub fn exit_label(&mut self, node: NodeId) -> Option<LabelId> {
        let id = self.labels.exit(node)?;
        self.labels_by_node.insert(node, id);
        Some(id)
    }

    /// Resolves a `break`/`continue` label written at `node`.
    pub fn resolve_label(&mut self, name: &str, node: NodeId) -> Option<LabelId> {
        let id = self.labels.resolve(name, node)?;
        self.labels_by_node.insert(node, id);
        Some(id)
    }

    /// Called on entering a class or lambda body.
    pub fn enter_body(&mut self) -> LabelFrame {
        self.labels.enter_body()
    }

    pub fn exit_body(&mut self, frame: LabelFrame) {
        self.labels.exit_body(frame);
    }

    pub fn label_depth(&self) -> usize {
        self.labels.depth()
    }

    /// Freezes the collected facts. Usages are put in source order.
    pub fn finish(self, tree: &SyntaxTree, backend: impl SymbolBackend + 'static) -> SemanticModel {
        let Self { declarations, mut usages, bindings_by_node, labels, labels_by_node } = self;
        for nodes in usages.values_mut() {
            nodes.sort_by_key(|&node| tree.node_range(node).start());
        }
        let cache = (0..backend.len()).map(|_| Derived::default()).collect();
        tracing::debug!(declarations = declarations.len(), usages = usages.len(), "semantic model built");
        SemanticModel {
            backend: Box::new(backend),
            declarations,
            usages,
            bindings_by_node,
            labels,
            labels_by_node,
            cache,
        }
    }
}
