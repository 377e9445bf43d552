use std::cell::OnceCell;
use std::fmt;

use javelin_frontend::{BindingId, BindingKind, ModifierFlags};
use javelin_syntax::NodeId;
use rustc_hash::FxHashMap;

use crate::SymbolBackend;
use crate::labels::{LabelId, LabelScopes, LabelSymbol};

/// Declarations, usages and labels of one converted file.
///
/// Frozen once built; derived symbol facts are computed on first request and
/// kept for the lifetime of the model.
pub struct SemanticModel {
    pub(crate) backend: Box<dyn SymbolBackend>,
    pub(crate) declarations: FxHashMap<BindingId, NodeId>,
    pub(crate) usages: FxHashMap<BindingId, Vec<NodeId>>,
    pub(crate) bindings_by_node: FxHashMap<NodeId, BindingId>,
    pub(crate) labels: LabelScopes,
    pub(crate) labels_by_node: FxHashMap<NodeId, LabelId>,
    pub(crate) cache: Box<[Derived]>,
}

#[derive(Default)]
pub(crate) struct Derived {
    supertypes: OnceCell<Vec<BindingId>>,
    overridden: OnceCell<Option<BindingId>>,
}

impl SemanticModel {
    pub fn declaration(&self, binding: BindingId) -> Option<NodeId> {
        self.declarations.get(&binding).copied()
    }

    /// Usage nodes in source order.
    pub fn usages(&self, binding: BindingId) -> &[NodeId] {
        self.usages.get(&binding).map_or(&[], Vec::as_slice)
    }

    pub fn binding_of(&self, node: NodeId) -> Option<BindingId> {
        self.bindings_by_node.get(&node).copied()
    }

    pub fn symbol(&self, binding: BindingId) -> Symbol<'_> {
        Symbol { model: self, id: binding }
    }

    /// Symbol declared or referenced by `node`.
    pub fn symbol_at(&self, node: NodeId) -> Option<Symbol<'_>> {
        self.binding_of(node).map(|id| self.symbol(id))
    }

    /// Label declared by a labeled statement, or targeted by a `break` or
    /// `continue` label.
    pub fn label_of(&self, node: NodeId) -> Option<&LabelSymbol> {
        self.labels_by_node.get(&node).map(|&id| self.labels.get(id))
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelSymbol> {
        self.labels.iter().map(|(_, label)| label)
    }

    /// `break`/`continue` labels that named no enclosing label.
    pub fn unresolved_labels(&self) -> &[NodeId] {
        self.labels.unresolved()
    }

    /// Declared bindings with their nodes, by binding.
    pub fn declarations(&self) -> Vec<(BindingId, NodeId)> {
        let mut declarations: Vec<_> = self.declarations.iter().map(|(&binding, &node)| (binding, node)).collect();
        declarations.sort_unstable_by_key(|&(binding, _)| binding);
        declarations
    }

    pub fn backend(&self) -> &dyn SymbolBackend {
        &*self.backend
    }

    fn derived(&self, id: BindingId) -> Option<&Derived> {
        self.cache.get(id.index())
    }
}

impl fmt::Debug for SemanticModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticModel")
            .field("declarations", &self.declarations.len())
            .field("usages", &self.usages.len())
            .field("labels", &self.labels.iter().count())
            .finish_non_exhaustive()
    }
}

/// Read facade over one binding.
#[derive(Clone, Copy)]
pub struct Symbol<'m> {
    model: &'m SemanticModel,
    id: BindingId,
}

impl<'m> Symbol<'m> {
    pub fn id(self) -> BindingId {
        self.id
    }

    pub fn name(self) -> &'m str {
        self.model.backend.name(self.id)
    }

    pub fn kind(self) -> Option<BindingKind> {
        self.model.backend.kind(self.id)
    }

    /// The front-end knows nothing about this binding.
    pub fn is_unknown(self) -> bool {
        self.kind().is_none()
    }

    pub fn is_builtin(self) -> bool {
        self.model.backend.is_builtin(self.id)
    }

    pub fn owner(self) -> Option<Self> {
        self.model.backend.owner(self.id).map(|id| self.model.symbol(id))
    }

    /// Nearest enclosing type, excluding this symbol.
    pub fn enclosing_type(self) -> Option<Self> {
        let mut current = self.owner();
        while let Some(owner) = current {
            if owner.kind().is_some_and(BindingKind::is_type) {
                return Some(owner);
            }
            current = owner.owner();
        }
        None
    }

    pub fn declaration(self) -> Option<NodeId> {
        self.model.declaration(self.id)
    }

    pub fn usages(self) -> &'m [NodeId] {
        self.model.usages(self.id)
    }

    pub fn modifiers(self) -> ModifierFlags {
        self.model.backend.modifiers(self.id)
    }

    pub fn is_final(self) -> bool {
        self.modifiers().contains(ModifierFlags::FINAL)
    }

    pub fn is_static(self) -> bool {
        self.modifiers().contains(ModifierFlags::STATIC)
    }

    pub fn is_private(self) -> bool {
        self.modifiers().contains(ModifierFlags::PRIVATE)
    }

    pub fn is_abstract(self) -> bool {
        self.modifiers().contains(ModifierFlags::ABSTRACT)
    }

    /// Declared type of a variable, or return type of a method.
    pub fn type_name(self) -> Option<&'m str> {
        self.model.backend.type_name(self.id)
    }

    pub fn members(self) -> impl Iterator<Item = Self> + 'm {
        let model = self.model;
        model.backend.members(self.id).iter().map(move |&id| model.symbol(id))
    }

    pub fn super_type(self) -> Option<Self> {
        self.model.backend.super_class(self.id).map(|id| self.model.symbol(id))
    }

    pub fn interfaces(self) -> impl Iterator<Item = Self> + 'm {
        let model = self.model;
        model.backend.interfaces(self.id).iter().map(move |&id| model.symbol(id))
    }

    /// Every super class and interface, breadth first, each once.
    pub fn supertypes(self) -> &'m [BindingId] {
        match self.model.derived(self.id) {
            Some(derived) => derived.supertypes.get_or_init(|| self.compute_supertypes()),
            None => &[],
        }
    }

    fn compute_supertypes(self) -> Vec<BindingId> {
        let backend = &self.model.backend;
        let mut seen = vec![self.id];
        let mut index = 0;
        while let Some(&current) = seen.get(index) {
            index += 1;
            for &parent in backend.super_class(current).iter().chain(backend.interfaces(current)) {
                if !seen.contains(&parent) {
                    seen.push(parent);
                }
            }
        }
        seen.remove(0);
        seen
    }

    /// The method this method overrides, nearest supertype first.
    pub fn overrides(self) -> Option<Self> {
        let derived = self.model.derived(self.id)?;
        let overridden = *derived.overridden.get_or_init(|| self.compute_overridden());
        overridden.map(|id| self.model.symbol(id))
    }

    fn compute_overridden(self) -> Option<BindingId> {
        if self.kind() != Some(BindingKind::Method) || self.is_static() || self.is_private() {
            return None;
        }
        let backend = &self.model.backend;
        let owner = self.enclosing_type()?;
        let name = self.name();
        let params = backend.params(self.id);
        owner.supertypes().iter().find_map(|&ty| {
            backend.members(ty).iter().copied().find(|&member| {
                backend.kind(member) == Some(BindingKind::Method)
                    && backend.name(member) == name
                    && !backend.modifiers(member).contains(ModifierFlags::PRIVATE)
                    && (backend.is_builtin(member) || backend.params(member) == params)
            })
        })
    }
}

impl PartialEq for Symbol<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.id == other.id
    }
}

impl Eq for Symbol<'_> {}

impl fmt::Debug for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol").field("id", &self.id).field("name", &self.name()).field("kind", &self.kind()).finish()
    }
}
