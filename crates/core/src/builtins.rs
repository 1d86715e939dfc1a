//! Built-in kinds.
//!
//! The value kinds (`int`, `list`, ...) carry the method names their
//! host counterparts expose so that structural checks see the same
//! interface. The failure kinds form the hierarchy used by `throws`:
//! every contract violation is a `TypeError`, except an undeclared
//! failure which is a `RuntimeError`.

use std::sync::LazyLock;

use crate::kind::Kind;

const SEQUENCE_METHODS: &[&str] = &[
    "__contains__",
    "__getitem__",
    "__iter__",
    "__len__",
    "count",
    "index",
];

const MUTABLE_SEQUENCE_METHODS: &[&str] = &[
    "__delitem__",
    "__setitem__",
    "append",
    "clear",
    "copy",
    "extend",
    "insert",
    "pop",
    "remove",
    "reverse",
    "sort",
];

const MAPPING_METHODS: &[&str] = &[
    "__contains__",
    "__delitem__",
    "__getitem__",
    "__iter__",
    "__len__",
    "__setitem__",
    "clear",
    "copy",
    "get",
    "items",
    "keys",
    "pop",
    "popitem",
    "setdefault",
    "update",
    "values",
];

const STR_METHODS: &[&str] = &[
    "endswith", "find", "format", "join", "lower", "replace", "rsplit", "split", "startswith",
    "strip", "upper",
];

const NUMBER_METHODS: &[&str] = &["__add__", "__mul__", "__sub__", "__truediv__", "conjugate"];

struct Builtins {
    object: Kind,
    none: Kind,
    bool_: Kind,
    int: Kind,
    float: Kind,
    complex: Kind,
    str_: Kind,
    tuple: Kind,
    list: Kind,
    dict: Kind,
    function: Kind,
    exception: Kind,
    type_error: Kind,
    value_error: Kind,
    key_error: Kind,
    attribute_error: Kind,
    runtime_error: Kind,
    not_implemented_error: Kind,
    argument_type_error: Kind,
    return_type_error: Kind,
    missing_argument_error: Kind,
    unexpected_argument_error: Kind,
    capability_error: Kind,
    unexpected_failure_error: Kind,
}

impl Builtins {
    fn new() -> Self {
        let object = Kind::new("object");
        let sub = |name: &str, base: &Kind| Kind::builder(name).extends(base).build();

        let exception = Kind::new("Exception");
        let type_error = sub("TypeError", &exception);
        let runtime_error = sub("RuntimeError", &exception);

        Self {
            none: Kind::new("NoneType"),
            bool_: Kind::new("bool"),
            int: Kind::builder("int")
                .opaque_methods(NUMBER_METHODS.iter().copied())
                .opaque_methods(["bit_length"])
                .build(),
            float: Kind::builder("float")
                .opaque_methods(NUMBER_METHODS.iter().copied())
                .opaque_methods(["is_integer"])
                .build(),
            complex: Kind::builder("complex")
                .opaque_methods(NUMBER_METHODS.iter().copied())
                .build(),
            str_: Kind::builder("str")
                .opaque_methods(SEQUENCE_METHODS.iter().copied())
                .opaque_methods(STR_METHODS.iter().copied())
                .build(),
            tuple: Kind::builder("tuple")
                .opaque_methods(SEQUENCE_METHODS.iter().copied())
                .build(),
            list: Kind::builder("list")
                .opaque_methods(SEQUENCE_METHODS.iter().copied())
                .opaque_methods(MUTABLE_SEQUENCE_METHODS.iter().copied())
                .build(),
            dict: Kind::builder("dict")
                .opaque_methods(MAPPING_METHODS.iter().copied())
                .build(),
            function: Kind::builder("function")
                .opaque_methods(["__call__"])
                .build(),
            value_error: sub("ValueError", &exception),
            key_error: sub("KeyError", &exception),
            attribute_error: sub("AttributeError", &exception),
            not_implemented_error: sub("NotImplementedError", &runtime_error),
            argument_type_error: sub("ArgumentTypeError", &type_error),
            return_type_error: sub("ReturnTypeError", &type_error),
            missing_argument_error: sub("MissingArgumentError", &type_error),
            unexpected_argument_error: sub("UnexpectedArgumentError", &type_error),
            capability_error: sub("CapabilityError", &type_error),
            unexpected_failure_error: sub("UnexpectedFailureError", &runtime_error),
            object,
            exception,
            type_error,
            runtime_error,
        }
    }

    fn all(&self) -> [&Kind; 24] {
        [
            &self.object,
            &self.none,
            &self.bool_,
            &self.int,
            &self.float,
            &self.complex,
            &self.str_,
            &self.tuple,
            &self.list,
            &self.dict,
            &self.function,
            &self.exception,
            &self.type_error,
            &self.value_error,
            &self.key_error,
            &self.attribute_error,
            &self.runtime_error,
            &self.not_implemented_error,
            &self.argument_type_error,
            &self.return_type_error,
            &self.missing_argument_error,
            &self.unexpected_argument_error,
            &self.capability_error,
            &self.unexpected_failure_error,
        ]
    }
}

static BUILTINS: LazyLock<Builtins> = LazyLock::new(Builtins::new);

macro_rules! builtin_kinds {
    ($($(#[$doc:meta])* $fn_name:ident => $field:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name() -> Kind {
                BUILTINS.$field.clone()
            }
        )*
    };
}

builtin_kinds! {
    /// The root kind; every kind is a subkind of it.
    object => object,
    /// Kind of `None`.
    none => none,
    /// Kind of booleans. Not a subkind of `int`.
    bool_ => bool_,
    int => int,
    float => float,
    complex => complex,
    str_ => str_,
    tuple => tuple,
    list => list,
    dict => dict,
    function => function,
    /// Root of the failure hierarchy.
    exception => exception,
    type_error => type_error,
    value_error => value_error,
    key_error => key_error,
    attribute_error => attribute_error,
    runtime_error => runtime_error,
    not_implemented_error => not_implemented_error,
    argument_type_error => argument_type_error,
    return_type_error => return_type_error,
    missing_argument_error => missing_argument_error,
    unexpected_argument_error => unexpected_argument_error,
    capability_error => capability_error,
    unexpected_failure_error => unexpected_failure_error,
}

/// Find a built-in kind by its name.
pub fn lookup(name: &str) -> Option<Kind> {
    BUILTINS
        .all()
        .into_iter()
        .find(|kind| kind.name() == name)
        .cloned()
}
