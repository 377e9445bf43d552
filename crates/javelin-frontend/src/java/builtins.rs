//! The built-in type universe: a small slice of the JDK that every file can
//! see without a classpath.

use std::sync::LazyLock;

use crate::binding::{BindingData, BindingKind, Bindings, ModifierFlags, Origin};

struct BuiltinType {
    package: &'static str,
    name: &'static str,
    kind: BindingKind,
    super_class: Option<&'static str>,
    interfaces: &'static [&'static str],
    /// `(name, type)` of static fields.
    fields: &'static [(&'static str, &'static str)],
    methods: &'static [&'static str],
}

const fn class(
    package: &'static str,
    name: &'static str,
    super_class: &'static str,
    methods: &'static [&'static str],
) -> BuiltinType {
    BuiltinType {
        package,
        name,
        kind: BindingKind::Class,
        super_class: Some(super_class),
        interfaces: &[],
        fields: &[],
        methods,
    }
}

const fn interface(
    package: &'static str,
    name: &'static str,
    interfaces: &'static [&'static str],
    methods: &'static [&'static str],
) -> BuiltinType {
    BuiltinType {
        package,
        name,
        kind: BindingKind::Interface,
        super_class: None,
        interfaces,
        fields: &[],
        methods,
    }
}

const fn annotation(package: &'static str, name: &'static str) -> BuiltinType {
    BuiltinType {
        package,
        name,
        kind: BindingKind::Annotation,
        super_class: None,
        interfaces: &[],
        fields: &[],
        methods: &["value"],
    }
}

const OBJECT_METHODS: &[&str] = &["equals", "hashCode", "toString", "getClass", "notify", "notifyAll", "wait"];
const THROWABLE_METHODS: &[&str] =
    &["getMessage", "getCause", "printStackTrace", "getStackTrace", "addSuppressed", "initCause"];
const COLLECTION_METHODS: &[&str] = &[
    "add", "addAll", "clear", "contains", "containsAll", "isEmpty", "iterator", "remove", "removeAll",
    "removeIf", "retainAll", "size", "stream", "toArray", "forEach", "of", "copyOf",
];

static TYPES: &[BuiltinType] = &[
    BuiltinType {
        package: "java.lang",
        name: "Object",
        kind: BindingKind::Class,
        super_class: None,
        interfaces: &[],
        fields: &[],
        methods: OBJECT_METHODS,
    },
    class("java.lang", "String", "Object", &[
        "length", "charAt", "isEmpty", "isBlank", "substring", "indexOf", "lastIndexOf", "contains",
        "startsWith", "endsWith", "equalsIgnoreCase", "compareTo", "trim", "strip", "toLowerCase",
        "toUpperCase", "split", "replace", "replaceAll", "format", "valueOf", "join", "chars",
        "toCharArray", "repeat", "lines", "formatted", "matches", "concat", "intern",
    ]),
    class("java.lang", "StringBuilder", "Object", &[
        "append", "insert", "length", "reverse", "setLength", "charAt", "deleteCharAt", "toString",
    ]),
    class("java.lang", "Number", "Object", &["intValue", "longValue", "doubleValue", "floatValue"]),
    BuiltinType {
        package: "java.lang",
        name: "Integer",
        kind: BindingKind::Class,
        super_class: Some("Number"),
        interfaces: &["Comparable"],
        fields: &[("MAX_VALUE", "int"), ("MIN_VALUE", "int")],
        methods: &["parseInt", "valueOf", "toString", "compare", "sum", "max", "min", "toHexString"],
    },
    BuiltinType {
        package: "java.lang",
        name: "Long",
        kind: BindingKind::Class,
        super_class: Some("Number"),
        interfaces: &["Comparable"],
        fields: &[("MAX_VALUE", "long"), ("MIN_VALUE", "long")],
        methods: &["parseLong", "valueOf", "toString", "compare", "sum", "max", "min"],
    },
    BuiltinType {
        package: "java.lang",
        name: "Double",
        kind: BindingKind::Class,
        super_class: Some("Number"),
        interfaces: &["Comparable"],
        fields: &[("MAX_VALUE", "double"), ("MIN_VALUE", "double"), ("NaN", "double")],
        methods: &["parseDouble", "valueOf", "toString", "compare", "isNaN"],
    },
    BuiltinType {
        package: "java.lang",
        name: "Boolean",
        kind: BindingKind::Class,
        super_class: Some("Object"),
        interfaces: &["Comparable"],
        fields: &[("TRUE", "Boolean"), ("FALSE", "Boolean")],
        methods: &["parseBoolean", "valueOf", "toString", "booleanValue"],
    },
    class("java.lang", "Character", "Object", &[
        "isDigit", "isLetter", "isWhitespace", "isUpperCase", "toUpperCase", "toLowerCase", "valueOf",
    ]),
    BuiltinType {
        package: "java.lang",
        name: "Math",
        kind: BindingKind::Class,
        super_class: Some("Object"),
        interfaces: &[],
        fields: &[("PI", "double"), ("E", "double")],
        methods: &["abs", "max", "min", "pow", "sqrt", "floor", "ceil", "round", "random", "floorMod"],
    },
    BuiltinType {
        package: "java.lang",
        name: "System",
        kind: BindingKind::Class,
        super_class: Some("Object"),
        interfaces: &[],
        fields: &[("out", "PrintStream"), ("err", "PrintStream"), ("in", "InputStream")],
        methods: &["currentTimeMillis", "nanoTime", "arraycopy", "exit", "getProperty", "getenv", "lineSeparator"],
    },
    class("java.lang", "Thread", "Object", &["start", "join", "sleep", "interrupt", "currentThread", "run"]),
    class("java.lang", "Class", "Object", &["getName", "getSimpleName", "isInstance", "cast"]),
    class("java.lang", "Enum", "Object", &["name", "ordinal", "values", "valueOf", "compareTo"]),
    class("java.lang", "Record", "Object", &[]),
    class("java.lang", "Void", "Object", &[]),
    class("java.lang", "Throwable", "Object", THROWABLE_METHODS),
    class("java.lang", "Exception", "Throwable", &[]),
    class("java.lang", "Error", "Throwable", &[]),
    class("java.lang", "RuntimeException", "Exception", &[]),
    class("java.lang", "IllegalArgumentException", "RuntimeException", &[]),
    class("java.lang", "IllegalStateException", "RuntimeException", &[]),
    class("java.lang", "NullPointerException", "RuntimeException", &[]),
    class("java.lang", "UnsupportedOperationException", "RuntimeException", &[]),
    class("java.lang", "IndexOutOfBoundsException", "RuntimeException", &[]),
    class("java.lang", "InterruptedException", "Exception", &[]),
    class("java.lang", "CloneNotSupportedException", "Exception", &[]),
    interface("java.lang", "Runnable", &[], &["run"]),
    interface("java.lang", "Iterable", &[], &["iterator", "forEach"]),
    interface("java.lang", "Comparable", &[], &["compareTo"]),
    interface("java.lang", "CharSequence", &[], &["length", "charAt", "subSequence"]),
    interface("java.lang", "AutoCloseable", &[], &["close"]),
    interface("java.lang", "Cloneable", &[], &[]),
    annotation("java.lang", "Override"),
    annotation("java.lang", "Deprecated"),
    annotation("java.lang", "SuppressWarnings"),
    annotation("java.lang", "FunctionalInterface"),
    annotation("java.lang", "SafeVarargs"),
    interface("java.util", "Collection", &["Iterable"], COLLECTION_METHODS),
    interface("java.util", "List", &["Collection"], &["get", "set", "indexOf", "subList", "sort"]),
    interface("java.util", "Set", &["Collection"], &[]),
    interface("java.util", "Iterator", &[], &["hasNext", "next", "remove"]),
    interface("java.util", "Map", &[], &[
        "get", "put", "putAll", "remove", "containsKey", "containsValue", "keySet", "values",
        "entrySet", "size", "isEmpty", "getOrDefault", "computeIfAbsent", "merge", "forEach", "of",
        "clear",
    ]),
    interface("java.util", "Comparator", &[], &["compare", "comparing", "reversed", "thenComparing"]),
    BuiltinType {
        package: "java.util",
        name: "ArrayList",
        kind: BindingKind::Class,
        super_class: Some("Object"),
        interfaces: &["List"],
        fields: &[],
        methods: &["ensureCapacity", "trimToSize"],
    },
    BuiltinType {
        package: "java.util",
        name: "LinkedList",
        kind: BindingKind::Class,
        super_class: Some("Object"),
        interfaces: &["List"],
        fields: &[],
        methods: &["addFirst", "addLast", "poll", "peek"],
    },
    BuiltinType {
        package: "java.util",
        name: "HashMap",
        kind: BindingKind::Class,
        super_class: Some("Object"),
        interfaces: &["Map"],
        fields: &[],
        methods: &[],
    },
    BuiltinType {
        package: "java.util",
        name: "HashSet",
        kind: BindingKind::Class,
        super_class: Some("Object"),
        interfaces: &["Set"],
        fields: &[],
        methods: &[],
    },
    class("java.util", "Collections", "Object", &[
        "emptyList", "emptyMap", "emptySet", "unmodifiableList", "sort", "singletonList", "reverse",
    ]),
    class("java.util", "Arrays", "Object", &["asList", "sort", "fill", "copyOf", "stream", "toString", "equals"]),
    class("java.util", "Objects", "Object", &["equals", "hash", "hashCode", "requireNonNull", "isNull", "nonNull", "toString"]),
    class("java.util", "Optional", "Object", &[
        "of", "ofNullable", "empty", "isPresent", "isEmpty", "get", "orElse", "orElseGet", "orElseThrow",
        "map", "flatMap", "filter", "ifPresent",
    ]),
    class("java.util", "Scanner", "Object", &["nextLine", "nextInt", "hasNext", "hasNextLine", "close"]),
    interface("java.util.function", "Function", &[], &["apply", "andThen", "compose", "identity"]),
    interface("java.util.function", "BiFunction", &[], &["apply", "andThen"]),
    interface("java.util.function", "Supplier", &[], &["get"]),
    interface("java.util.function", "Consumer", &[], &["accept", "andThen"]),
    interface("java.util.function", "Predicate", &[], &["test", "and", "or", "negate", "not"]),
    interface("java.io", "Serializable", &[], &[]),
    interface("java.io", "Closeable", &["AutoCloseable"], &[]),
    class("java.io", "IOException", "Exception", &[]),
    class("java.io", "UncheckedIOException", "RuntimeException", &[]),
    class("java.io", "InputStream", "Object", &["read", "close"]),
    class("java.io", "PrintStream", "Object", &["println", "print", "printf", "format", "flush"]),
];

static UNIVERSE: LazyLock<Bindings> = LazyLock::new(build_universe);

/// A fresh binding table seeded with the built-in universe.
pub(crate) fn universe() -> Bindings {
    UNIVERSE.clone()
}

/// Whether `package` holds built-in types.
pub(crate) fn is_known_package(package: &str) -> bool {
    TYPES.iter().any(|ty| ty.package == package)
}

fn build_universe() -> Bindings {
    let mut bindings = Bindings::new();
    let public = ModifierFlags::PUBLIC;

    let ids: Vec<_> = TYPES
        .iter()
        .map(|ty| {
            let mut data = BindingData::new(ty.kind, ty.name, Origin::BuiltIn).with_modifiers(public);
            data.qualified_name = Some(format!("{}.{}", ty.package, ty.name));
            bindings.alloc(data)
        })
        .collect();

    let lookup = |name: &str| TYPES.iter().position(|ty| ty.name == name).map(|index| ids[index]);

    for (ty, &id) in TYPES.iter().zip(&ids) {
        let super_class = ty.super_class.and_then(lookup);
        let interfaces: Vec<_> = ty.interfaces.iter().filter_map(|name| lookup(name)).collect();
        if let Some(data) = bindings.get_mut(id) {
            data.super_class = super_class;
            data.interfaces = interfaces;
        }

        for &(name, type_name) in ty.fields {
            let mut data = BindingData::new(BindingKind::Field, name, Origin::BuiltIn)
                .with_owner(Some(id))
                .with_modifiers(public.union(ModifierFlags::STATIC).union(ModifierFlags::FINAL));
            data.type_name = Some(type_name.to_owned());
            data.type_binding = lookup(type_name);
            bindings.alloc(data);
        }

        for &name in ty.methods {
            bindings.alloc(
                BindingData::new(BindingKind::Method, name, Origin::BuiltIn)
                    .with_owner(Some(id))
                    .with_modifiers(public),
            );
        }
    }

    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universe_links_hierarchy() {
        let bindings = universe();
        let list = bindings.by_qualified_name("java.util.ArrayList").unwrap();
        let supertypes: Vec<_> =
            bindings.supertypes(list).into_iter().map(|id| bindings.name(id).to_owned()).collect();
        assert_eq!(supertypes, ["ArrayList", "Object", "List", "Collection", "Iterable"]);

        let size = bindings.find_member(list, "size", |data| data.kind == BindingKind::Method);
        assert!(size.is_some());

        let system = bindings.by_qualified_name("java.lang.System").unwrap();
        let out = bindings.find_member(system, "out", |data| data.kind.is_variable()).unwrap();
        let print_stream = bindings.get(out).unwrap().type_binding.unwrap();
        assert_eq!(bindings.name(print_stream), "PrintStream");
    }

    #[test]
    fn known_packages() {
        assert!(is_known_package("java.util.function"));
        assert!(!is_known_package("java.nio"));
    }
}
