//! Attribute-presence contract over every argument.
//!
//! [`implements`] checks plain attribute presence on each positional and
//! keyword argument value. Callability and traits are not consulted; use
//! `accepts` with a `Trait` for structural checks per parameter.

use pledge_core::{Error, Function};

use crate::decorator::{enforced, Decorator, Enforcer};

/// Every argument must expose every listed attribute.
#[derive(Debug, Clone)]
pub struct Implements {
    attributes: Vec<String>,
    enforcer: Enforcer,
}

enforced!(Implements);

impl Decorator for Implements {
    fn decorate(self, function: Function) -> Function {
        let inner = function.clone();
        Function::wraps(&function, move |args| {
            if self.enforcer.enabled() {
                self.enforcer.call(&inner, "implements", args);
                for value in args.values() {
                    for attribute in &self.attributes {
                        if !value.has_attr(attribute) {
                            self.enforcer.violation(
                                &inner,
                                Error::Capability {
                                    capability: attribute.clone(),
                                    value: value.to_string(),
                                },
                            )?;
                        }
                    }
                }
            }
            inner.call(args)
        })
    }
}

/// Every argument must expose each of `attributes`.
pub fn implements<I, S>(attributes: I) -> Implements
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Implements {
        attributes: attributes.into_iter().map(Into::into).collect(),
        enforcer: Enforcer::new(),
    }
}
