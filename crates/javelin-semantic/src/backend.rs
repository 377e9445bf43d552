use javelin_frontend::{BindingId, BindingKind, Bindings, ModifierFlags, Origin};

/// Read access to the front-end's binding table.
///
/// Rules never see front-end binding objects; everything they learn about a
/// declaration goes through a [`Symbol`](crate::Symbol) backed by this trait.
pub trait SymbolBackend {
    /// Number of bindings; ids are dense below it.
    fn len(&self) -> usize;

    fn kind(&self, id: BindingId) -> Option<BindingKind>;

    fn name(&self, id: BindingId) -> &str;

    fn owner(&self, id: BindingId) -> Option<BindingId>;

    fn modifiers(&self, id: BindingId) -> ModifierFlags;

    fn super_class(&self, id: BindingId) -> Option<BindingId>;

    fn interfaces(&self, id: BindingId) -> &[BindingId];

    fn members(&self, id: BindingId) -> &[BindingId];

    /// Parameter type names of a method.
    fn params(&self, id: BindingId) -> &[String];

    fn type_name(&self, id: BindingId) -> Option<&str>;

    fn is_builtin(&self, id: BindingId) -> bool;
}

impl SymbolBackend for Bindings {
    fn len(&self) -> usize {
        Bindings::len(self)
    }

    fn kind(&self, id: BindingId) -> Option<BindingKind> {
        Bindings::kind(self, id)
    }

    fn name(&self, id: BindingId) -> &str {
        Bindings::name(self, id)
    }

    fn owner(&self, id: BindingId) -> Option<BindingId> {
        self.get(id).and_then(|data| data.owner)
    }

    fn modifiers(&self, id: BindingId) -> ModifierFlags {
        self.get(id).map_or_else(ModifierFlags::empty, |data| data.modifiers)
    }

    fn super_class(&self, id: BindingId) -> Option<BindingId> {
        self.get(id).and_then(|data| data.super_class)
    }

    fn interfaces(&self, id: BindingId) -> &[BindingId] {
        self.get(id).map_or(&[], |data| data.interfaces.as_slice())
    }

    fn members(&self, id: BindingId) -> &[BindingId] {
        Bindings::members(self, id)
    }

    fn params(&self, id: BindingId) -> &[String] {
        self.get(id).map_or(&[], |data| data.params.as_slice())
    }

    fn type_name(&self, id: BindingId) -> Option<&str> {
        self.get(id).and_then(|data| data.type_name.as_deref())
    }

    fn is_builtin(&self, id: BindingId) -> bool {
        self.get(id).is_some_and(|data| data.origin == Origin::BuiltIn)
    }
}
