//! # Capability Sets
//!
//! A [`Trait`] is a named, ordered set of member predicates. A value
//! satisfies the trait when it satisfies every member. The contract is
//! structural: it asks what a value can do, not what it is.
//!
//! ## Composition
//!
//! [`Trait::include`] copies the members of another trait into this one.
//! Inclusion is a one-time flattening: the including trait owns its copy,
//! so later extending the source does not change traits that already
//! included it. Traits are immutable values; every builder method returns
//! a new trait.
//!
//! ```rust
//! use pledge_core::capability::Trait;
//! use pledge_core::Value;
//!
//! let sized = Trait::new("Sized").method("__len__");
//! let items = Trait::new("Items").include(&sized).method("__getitem__");
//!
//! assert!(items.test(&Value::list([1, 2])));
//! assert!(items.contains("__len__"));
//! ```
//!
//! ## Registry
//!
//! [`TraitRegistry`] indexes traits by name so definitions can include
//! other traits by name. Names are resolved when a trait is defined.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::predicate::Predicate;
use crate::value::Value;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised by [`TraitRegistry`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// An included trait name is not registered.
    #[error("unknown trait `{name}` included by `{including}`")]
    UnknownTrait { name: String, including: String },
}

// ============================================================================
// Trait
// ============================================================================

/// A named member of a capability set.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub predicate: Predicate,
}

/// A named capability set.
#[derive(Debug, Clone)]
pub struct Trait {
    name: String,
    members: Vec<Member>,
}

impl Trait {
    /// Create an empty trait. An empty trait is satisfied by every value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add (or replace) a named member.
    pub fn member(mut self, name: impl Into<String>, predicate: impl Into<Predicate>) -> Self {
        self.set(name.into(), predicate.into());
        self
    }

    /// Require an attribute; the member is named after the attribute.
    pub fn attribute(self, name: &str) -> Self {
        self.member(name, Predicate::attribute(name))
    }

    /// Require a callable attribute; the member is named after it.
    pub fn method(self, name: &str) -> Self {
        self.member(name, Predicate::method(name))
    }

    /// Require an attribute whose value satisfies `predicate`.
    pub fn field(self, name: &str, predicate: impl Into<Predicate>) -> Self {
        self.member(name, Predicate::field(name, predicate))
    }

    /// Copy every member of `other` into this trait.
    ///
    /// Members with the same name are replaced in place.
    pub fn include(mut self, other: &Trait) -> Self {
        for member in &other.members {
            self.set(member.name.clone(), member.predicate.clone());
        }
        self
    }

    fn set(&mut self, name: String, predicate: Predicate) {
        match self.members.iter_mut().find(|m| m.name == name) {
            Some(existing) => existing.predicate = predicate,
            None => self.members.push(Member { name, predicate }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.predicate)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `value` satisfies every member, in declaration order.
    pub fn test(&self, value: &Value) -> bool {
        self.members.iter().all(|m| m.predicate.test(value))
    }

    /// Names of members `value` fails, in declaration order.
    pub fn missing(&self, value: &Value) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| !m.predicate.test(value))
            .map(|m| m.name.as_str())
            .collect()
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.members.iter().map(|m| m.name.as_str()).collect();
        write!(f, "{} {{ {} }}", self.name, names.join(", "))
    }
}

// ============================================================================
// TraitRegistry
// ============================================================================

/// Traits indexed by name.
#[derive(Debug, Clone, Default)]
pub struct TraitRegistry {
    traits: HashMap<String, Trait>,
}

impl TraitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the standard traits.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for capabilities in crate::protocols::all() {
            registry.register(capabilities);
        }
        registry
    }

    /// Register a trait under its own name, returning the one it replaces.
    pub fn register(&mut self, capabilities: Trait) -> Option<Trait> {
        self.traits
            .insert(capabilities.name().to_string(), capabilities)
    }

    /// Define and register a trait that includes registered traits by name.
    ///
    /// The included members are copied now; re-registering an included
    /// trait later does not affect the new definition.
    pub fn define<'a, I, F>(
        &mut self,
        name: &str,
        includes: I,
        body: F,
    ) -> Result<&Trait, RegistryError>
    where
        I: IntoIterator<Item = &'a str>,
        F: FnOnce(Trait) -> Trait,
    {
        let mut capabilities = Trait::new(name);
        for included in includes {
            let source = self
                .traits
                .get(included)
                .ok_or_else(|| RegistryError::UnknownTrait {
                    name: included.to_string(),
                    including: name.to_string(),
                })?;
            capabilities = capabilities.include(source);
        }
        let capabilities = body(capabilities);
        debug!(
            name,
            members = capabilities.len(),
            "capability set defined"
        );
        self.register(capabilities);
        Ok(&self.traits[name])
    }

    pub fn get(&self, name: &str) -> Option<&Trait> {
        self.traits.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.traits.contains_key(name)
    }

    /// Merge two registries (other wins on conflict).
    pub fn merge(mut self, other: Self) -> Self {
        self.traits.extend(other.traits);
        self
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.traits.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
