use std::fmt;

use rustc_hash::FxHashMap;

use crate::ast::{Modifier, ModifierKeyword, Modifiers};

/// Opaque identity of a declaration, stable for the lifetime of one
/// [`Bindings`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingId(u32);

impl BindingId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Class,
    Interface,
    Annotation,
    Enum,
    Record,
    TypeParameter,
    Field,
    EnumConstant,
    Method,
    Constructor,
    Parameter,
    LocalVariable,
}

impl BindingKind {
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Annotation | Self::Enum | Self::Record | Self::TypeParameter
        )
    }

    pub fn is_variable(self) -> bool {
        matches!(self, Self::Field | Self::EnumConstant | Self::Parameter | Self::LocalVariable)
    }

    pub fn is_method(self) -> bool {
        matches!(self, Self::Method | Self::Constructor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Source,
    BuiltIn,
}

/// Set of declaration modifiers.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierFlags(u16);

impl ModifierFlags {
    pub const PUBLIC: Self = Self(1 << 0);
    pub const PROTECTED: Self = Self(1 << 1);
    pub const PRIVATE: Self = Self(1 << 2);
    pub const STATIC: Self = Self(1 << 3);
    pub const ABSTRACT: Self = Self(1 << 4);
    pub const FINAL: Self = Self(1 << 5);
    pub const NATIVE: Self = Self(1 << 6);
    pub const SYNCHRONIZED: Self = Self(1 << 7);
    pub const TRANSIENT: Self = Self(1 << 8);
    pub const VOLATILE: Self = Self(1 << 9);
    pub const STRICTFP: Self = Self(1 << 10);
    pub const DEFAULT: Self = Self(1 << 11);
    pub const SEALED: Self = Self(1 << 12);
    pub const NON_SEALED: Self = Self(1 << 13);

    const NAMES: [(Self, &'static str); 14] = [
        (Self::PUBLIC, "public"),
        (Self::PROTECTED, "protected"),
        (Self::PRIVATE, "private"),
        (Self::STATIC, "static"),
        (Self::ABSTRACT, "abstract"),
        (Self::FINAL, "final"),
        (Self::NATIVE, "native"),
        (Self::SYNCHRONIZED, "synchronized"),
        (Self::TRANSIENT, "transient"),
        (Self::VOLATILE, "volatile"),
        (Self::STRICTFP, "strictfp"),
        (Self::DEFAULT, "default"),
        (Self::SEALED, "sealed"),
        (Self::NON_SEALED, "non-sealed"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn from_keyword(keyword: ModifierKeyword) -> Self {
        match keyword {
            ModifierKeyword::Public => Self::PUBLIC,
            ModifierKeyword::Protected => Self::PROTECTED,
            ModifierKeyword::Private => Self::PRIVATE,
            ModifierKeyword::Static => Self::STATIC,
            ModifierKeyword::Abstract => Self::ABSTRACT,
            ModifierKeyword::Final => Self::FINAL,
            ModifierKeyword::Native => Self::NATIVE,
            ModifierKeyword::Synchronized => Self::SYNCHRONIZED,
            ModifierKeyword::Transient => Self::TRANSIENT,
            ModifierKeyword::Volatile => Self::VOLATILE,
            ModifierKeyword::Strictfp => Self::STRICTFP,
            ModifierKeyword::Default => Self::DEFAULT,
            ModifierKeyword::Sealed => Self::SEALED,
            ModifierKeyword::NonSealed => Self::NON_SEALED,
        }
    }

    pub fn from_modifiers(modifiers: Option<&Modifiers>) -> Self {
        let mut flags = Self::empty();
        for item in modifiers.into_iter().flat_map(|modifiers| &modifiers.items) {
            if let Modifier::Keyword { keyword, .. } = item {
                flags.insert(Self::from_keyword(*keyword));
            }
        }
        flags
    }
}

impl fmt::Debug for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = Self::NAMES.iter().filter(|(flag, _)| self.contains(*flag)).map(|(_, name)| name);
        f.debug_set().entries(names).finish()
    }
}

/// Everything the front-end knows about one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingData {
    pub kind: BindingKind,
    pub name: String,
    pub modifiers: ModifierFlags,
    /// Enclosing type, or enclosing method for locals and parameters.
    pub owner: Option<BindingId>,
    pub origin: Origin,
    /// Fully qualified name, for types.
    pub qualified_name: Option<String>,
    pub super_class: Option<BindingId>,
    pub interfaces: Vec<BindingId>,
    /// Parameter type names, for methods and constructors.
    pub params: Vec<String>,
    pub varargs: bool,
    /// Declared type name of a variable, or return type name of a method.
    pub type_name: Option<String>,
    /// Resolved declared type of a variable, or return type of a method.
    pub type_binding: Option<BindingId>,
}

impl BindingData {
    pub fn new(kind: BindingKind, name: impl Into<String>, origin: Origin) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: ModifierFlags::empty(),
            owner: None,
            origin,
            qualified_name: None,
            super_class: None,
            interfaces: Vec::new(),
            params: Vec::new(),
            varargs: false,
            type_name: None,
            type_binding: None,
        }
    }

    pub fn with_owner(mut self, owner: Option<BindingId>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether a call with `arity` arguments can target this method.
    pub fn accepts_arity(&self, arity: usize) -> bool {
        if self.origin == Origin::BuiltIn {
            return true;
        }
        if self.varargs {
            arity + 1 >= self.params.len()
        } else {
            arity == self.params.len()
        }
    }
}

/// Binding table of one file, built-in universe first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    data: Vec<BindingData>,
    members: FxHashMap<BindingId, Vec<BindingId>>,
    by_qualified_name: FxHashMap<String, BindingId>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, data: BindingData) -> BindingId {
        let id = BindingId(self.data.len() as u32);
        if let Some(owner) = data.owner {
            self.members.entry(owner).or_default().push(id);
        }
        if let Some(qualified) = &data.qualified_name {
            self.by_qualified_name.entry(qualified.clone()).or_insert(id);
        }
        self.data.push(data);
        id
    }

    pub fn get(&self, id: BindingId) -> Option<&BindingData> {
        self.data.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: BindingId) -> Option<&mut BindingData> {
        self.data.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &BindingData)> {
        self.data.iter().enumerate().map(|(index, data)| (BindingId(index as u32), data))
    }

    /// Direct members in declaration order: nested types, fields, enum
    /// constants, methods. Locals and parameters are members of their method.
    pub fn members(&self, owner: BindingId) -> &[BindingId] {
        self.members.get(&owner).map_or(&[], Vec::as_slice)
    }

    pub fn by_qualified_name(&self, name: &str) -> Option<BindingId> {
        self.by_qualified_name.get(name).copied()
    }

    pub fn kind(&self, id: BindingId) -> Option<BindingKind> {
        self.get(id).map(|data| data.kind)
    }

    pub fn name(&self, id: BindingId) -> &str {
        self.get(id).map_or("", |data| data.name.as_str())
    }

    /// Nearest enclosing type of `id`, excluding `id` itself.
    pub fn enclosing_type(&self, id: BindingId) -> Option<BindingId> {
        let mut current = self.get(id)?.owner;
        while let Some(owner) = current {
            let data = self.get(owner)?;
            if data.kind.is_type() {
                return Some(owner);
            }
            current = data.owner;
        }
        None
    }

    /// `id` followed by its super classes and interfaces, breadth first,
    /// each type at most once.
    pub fn supertypes(&self, id: BindingId) -> Vec<BindingId> {
        let mut seen = vec![id];
        let mut index = 0;
        while let Some(&current) = seen.get(index) {
            index += 1;
            let Some(data) = self.get(current) else { continue };
            for &parent in data.super_class.iter().chain(&data.interfaces) {
                if !seen.contains(&parent) {
                    seen.push(parent);
                }
            }
        }
        seen
    }

    /// First member named `name` accepted by `filter`, searching `ty` and its
    /// supertypes.
    pub fn find_member(
        &self,
        ty: BindingId,
        name: &str,
        filter: impl Fn(&BindingData) -> bool,
    ) -> Option<BindingId> {
        self.supertypes(ty).into_iter().find_map(|owner| {
            self.members(owner).iter().copied().find(|&member| {
                self.get(member).is_some_and(|data| data.name == name && filter(data))
            })
        })
    }
}
