//! # Implementation Validator
//!
//! An [`Implementation`] describes what a concrete object must look like:
//! an instance of a base kind that also carries some attributes, some
//! methods and some attributes of a given kind. It is used standalone, or
//! as a predicate through its [`Check`] implementation.
//!
//! ```rust
//! use pledge_core::implementation::{Implementation, Requirement};
//! use pledge_core::{builtins, Function, Kind, Object, Value};
//!
//! let dog = Kind::builder("Dog")
//!     .method("bark", Function::opaque("bark"))
//!     .build();
//!
//! let spec = Implementation::new(&dog)
//!     .with(Requirement::method("bark"))
//!     .with(Requirement::typed("name", builtins::str_()));
//!
//! assert!(spec.validate(&Value::from(Object::new(&dog).with_field("name", "Rex"))));
//! assert!(!spec.validate(&Value::from(Object::new(&dog))));
//! ```

use crate::kind::Kind;
use crate::predicate::{Check, Predicate};
use crate::value::Value;

/// One structural requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// The attribute must exist.
    Attribute(String),
    /// The attribute must exist and be callable.
    Method(String),
    /// The attribute must exist and be an instance of the kind.
    Typed { name: String, kind: Kind },
}

impl Requirement {
    pub fn attribute(name: impl Into<String>) -> Self {
        Requirement::Attribute(name.into())
    }

    pub fn method(name: impl Into<String>) -> Self {
        Requirement::Method(name.into())
    }

    pub fn typed(name: impl Into<String>, kind: Kind) -> Self {
        Requirement::Typed {
            name: name.into(),
            kind,
        }
    }
}

/// A batch of requirements for [`Implementation::configure`].
#[derive(Debug, Clone, Default)]
pub struct ImplementationOptions {
    pub attributes: Vec<String>,
    pub methods: Vec<String>,
    pub types: Vec<(String, Kind)>,
}

/// Base kind plus attribute, method and typed-field requirements.
#[derive(Debug, Clone)]
pub struct Implementation {
    base: Kind,
    attributes: Vec<String>,
    types: Vec<(String, Kind)>,
    methods: Vec<String>,
}

impl Implementation {
    pub fn new(base: &Kind) -> Self {
        Self {
            base: base.clone(),
            attributes: Vec::new(),
            types: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Add one requirement.
    pub fn require(&mut self, requirement: Requirement) {
        match requirement {
            Requirement::Attribute(name) => self.attributes.push(name),
            Requirement::Method(name) => self.methods.push(name),
            Requirement::Typed { name, kind } => self.types.push((name, kind)),
        }
    }

    /// Builder form of [`Implementation::require`].
    pub fn with(mut self, requirement: Requirement) -> Self {
        self.require(requirement);
        self
    }

    /// Add a batch of requirements.
    pub fn configure(&mut self, options: ImplementationOptions) {
        self.attributes.extend(options.attributes);
        self.methods.extend(options.methods);
        self.types.extend(options.types);
    }

    pub fn base(&self) -> &Kind {
        &self.base
    }

    /// Whether `value` meets every requirement.
    ///
    /// Checks run cheapest first: kind, attributes, typed fields, methods.
    pub fn validate(&self, value: &Value) -> bool {
        if !value.is_instance(&self.base) {
            return false;
        }
        if !self.attributes.iter().all(|name| value.has_attr(name)) {
            return false;
        }
        let typed = self.types.iter().all(|(name, kind)| {
            value
                .attr(name)
                .is_some_and(|attr| attr.is_instance(kind))
        });
        if !typed {
            return false;
        }
        self.methods
            .iter()
            .all(|name| value.attr(name).is_some_and(|attr| attr.is_callable()))
    }
}

impl Check for Implementation {
    fn check(&self, value: &Value) -> bool {
        self.validate(value)
    }

    fn describe(&self) -> String {
        format!("implementation of {}", self.base)
    }
}

impl From<Implementation> for Predicate {
    fn from(implementation: Implementation) -> Self {
        Predicate::custom(implementation)
    }
}
