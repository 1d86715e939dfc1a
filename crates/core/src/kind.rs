//! # Kinds - Nominal Types
//!
//! A [`Kind`] is the nominal type of a value: a name, an ordered list of
//! base kinds and a table of methods. Kinds are compared by identity, not
//! by name, so two separately built kinds called `"Dog"` are distinct.
//!
//! Every kind is implicitly a subkind of the root `object` kind.
//!
//! ```rust
//! use pledge_core::kind::Kind;
//!
//! let animal = Kind::new("Animal");
//! let dog = Kind::builder("Dog").extends(&animal).build();
//!
//! assert!(dog.is_subkind_of(&animal));
//! assert!(!animal.is_subkind_of(&dog));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::builtins;
use crate::function::Function;

/// A nominal type with bases and methods.
#[derive(Clone)]
pub struct Kind(Arc<KindInner>);

struct KindInner {
    name: String,
    bases: Vec<Kind>,
    methods: BTreeMap<String, Function>,
}

impl Kind {
    /// Create a kind with no explicit bases and no methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    /// Start building a kind.
    pub fn builder(name: impl Into<String>) -> KindBuilder {
        KindBuilder::new(name)
    }

    /// The kind's name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Direct bases, in declaration order.
    pub fn bases(&self) -> &[Kind] {
        &self.0.bases
    }

    /// Whether `self` is `other` or (transitively) derives from it.
    pub fn is_subkind_of(&self, other: &Kind) -> bool {
        if self == other || *other == builtins::object() {
            return true;
        }
        self.0.bases.iter().any(|base| base.is_subkind_of(other))
    }

    /// Look up a method on this kind, then on its bases in declaration order.
    pub fn method(&self, name: &str) -> Option<&Function> {
        self.0
            .methods
            .get(name)
            .or_else(|| self.0.bases.iter().find_map(|base| base.method(name)))
    }

    /// Whether the kind (or a base) defines `name`.
    pub fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }

    /// Names of the methods defined directly on this kind.
    pub fn own_methods(&self) -> impl Iterator<Item = &str> {
        self.0.methods.keys().map(String::as_str)
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.0.name)
    }
}

/// Builder for [`Kind`].
#[derive(Debug)]
pub struct KindBuilder {
    name: String,
    bases: Vec<Kind>,
    methods: BTreeMap<String, Function>,
}

impl KindBuilder {
    /// Create a builder for a kind called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            methods: BTreeMap::new(),
        }
    }

    /// Add a base kind.
    pub fn extends(mut self, base: &Kind) -> Self {
        self.bases.push(base.clone());
        self
    }

    /// Define a method.
    pub fn method(mut self, name: impl Into<String>, function: Function) -> Self {
        self.methods.insert(name.into(), function);
        self
    }

    /// Define methods that exist but cannot be invoked from Rust.
    pub fn opaque_methods<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        for name in names {
            let qualified = format!("{}.{}", self.name, name);
            self.methods
                .insert(name.to_string(), Function::opaque(qualified));
        }
        self
    }

    /// Finish the kind.
    pub fn build(self) -> Kind {
        Kind(Arc::new(KindInner {
            name: self.name,
            bases: self.bases,
            methods: self.methods,
        }))
    }
}
