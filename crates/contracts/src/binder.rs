//! # Argument Binding
//!
//! Two pieces connect a call to its contract:
//!
//! - [`BindingMap`]: parameter name to predicate, built once when a
//!   decorator is applied by zipping the declared names with the
//!   positional predicates and overlaying the named ones.
//! - [`bind`]: the (name, value) pairs of one call, derived from the
//!   declared names alone.
//!
//! A parameter with no entry in the map is never checked.

use std::collections::HashMap;

use pledge_core::{Args, Predicate, Signature, Value};
use tracing::debug;

/// Parameter name to predicate, fixed at decoration time.
#[derive(Debug, Clone, Default)]
pub struct BindingMap {
    entries: HashMap<String, Predicate>,
}

impl BindingMap {
    /// Zip `signature` with `positional`, then overlay `named`.
    ///
    /// Positional predicates beyond the declared names are dropped; named
    /// predicates win over positional ones for the same parameter.
    pub fn build(
        signature: &Signature,
        positional: Vec<Predicate>,
        named: Vec<(String, Predicate)>,
    ) -> Self {
        let declared = positional.len();
        let mut entries: HashMap<String, Predicate> = signature
            .names()
            .iter()
            .cloned()
            .zip(positional)
            .collect();
        if declared > signature.len() {
            debug!(
                declared,
                parameters = signature.len(),
                "ignoring positional predicates beyond the parameter list"
            );
        }
        entries.extend(named);
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The (name, value) pairs of a call that contracts inspect.
///
/// 1. The i-th positional value binds to the i-th declared name.
/// 2. Declared names not reached positionally bind to the keyword of the
///    same name, when supplied.
/// 3. Keywords naming no declared parameter bind under their own name.
///
/// Positional values beyond the declared names are not bound.
pub fn bind<'a>(names: &'a [String], args: &'a Args) -> Vec<(&'a str, &'a Value)> {
    let positional = args.positional();
    let mut bound: Vec<(&'a str, &'a Value)> = names
        .iter()
        .zip(positional)
        .map(|(name, value)| (name.as_str(), value))
        .collect();

    let reached = positional.len().min(names.len());
    for name in &names[reached..] {
        if let Some(value) = args.keyword_value(name) {
            bound.push((name.as_str(), value));
        }
    }

    for (name, value) in args.keyword() {
        if !names.contains(name) {
            bound.push((name.as_str(), value));
        }
    }
    bound
}
