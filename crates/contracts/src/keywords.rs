//! # Keyword Contracts
//!
//! Contracts on how arguments are supplied rather than what they are:
//!
//! | Decorator        | Fails when                                        | Wildcard `"*"`            |
//! |------------------|---------------------------------------------------|---------------------------|
//! | [`requires`]     | a listed name is not supplied as a keyword        | n/a                       |
//! | [`exposes`]      | a keyword outside the list is supplied            | any positional argument   |
//! | [`disallows`]    | a listed keyword is supplied                      | any keyword argument      |
//!
//! Supplying a required name positionally does not satisfy [`requires`].

use std::collections::BTreeSet;

use pledge_core::{Args, Error, Function};

use crate::decorator::{enforced, Decorator, Enforcer};

/// Name list entry meaning "every name".
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Require,
    Expose,
    Disallow,
}

impl Rule {
    fn contract(self) -> &'static str {
        match self {
            Rule::Require => "requires",
            Rule::Expose => "exposes",
            Rule::Disallow => "disallows",
        }
    }
}

/// A contract over the names of keyword arguments.
#[derive(Debug, Clone)]
pub struct KeywordContract {
    rule: Rule,
    names: BTreeSet<String>,
    enforcer: Enforcer,
}

impl KeywordContract {
    fn new<I, S>(rule: Rule, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule,
            names: names.into_iter().map(Into::into).collect(),
            enforcer: Enforcer::new(),
        }
    }

    fn wildcard(&self) -> bool {
        self.names.contains(WILDCARD)
    }

    /// Every way `args` breaks this contract, in argument order.
    fn violations(&self, function: &Function, args: &Args) -> Vec<Error> {
        match self.rule {
            Rule::Require => self
                .names
                .iter()
                .filter(|name| args.keyword_value(name).is_none())
                .map(|name| Error::MissingArgument { name: name.clone() })
                .collect(),
            Rule::Expose if self.wildcard() => {
                let names = function.signature().names();
                (0..args.positional().len())
                    .map(|index| Error::UnexpectedArgument {
                        name: names
                            .get(index)
                            .cloned()
                            .unwrap_or_else(|| format!("#{}", index)),
                        reason: "arguments must be passed by keyword".to_string(),
                    })
                    .collect()
            }
            Rule::Expose => args
                .keyword()
                .keys()
                .filter(|name| !self.names.contains(*name))
                .map(|name| Error::UnexpectedArgument {
                    name: name.clone(),
                    reason: "keyword is not exposed".to_string(),
                })
                .collect(),
            Rule::Disallow if self.wildcard() => args
                .keyword()
                .keys()
                .map(|name| Error::UnexpectedArgument {
                    name: name.clone(),
                    reason: "arguments must be passed by position".to_string(),
                })
                .collect(),
            Rule::Disallow => args
                .keyword()
                .keys()
                .filter(|name| self.names.contains(*name))
                .map(|name| Error::UnexpectedArgument {
                    name: name.clone(),
                    reason: "keyword is disallowed".to_string(),
                })
                .collect(),
        }
    }
}

enforced!(KeywordContract);

impl Decorator for KeywordContract {
    fn decorate(self, function: Function) -> Function {
        let inner = function.clone();
        Function::wraps(&function, move |args| {
            if self.enforcer.enabled() {
                self.enforcer.call(&inner, self.rule.contract(), args);
                for error in self.violations(&inner, args) {
                    self.enforcer.violation(&inner, error)?;
                }
            }
            inner.call(args)
        })
    }
}

/// Each name must be supplied as a keyword argument.
pub fn requires<I, S>(names: I) -> KeywordContract
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    KeywordContract::new(Rule::Require, names)
}

/// Only these keywords may be supplied; `"*"` makes the function keyword-only.
pub fn exposes<I, S>(names: I) -> KeywordContract
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    KeywordContract::new(Rule::Expose, names)
}

/// These keywords may not be supplied; `"*"` makes the function positional-only.
pub fn disallows<I, S>(names: I) -> KeywordContract
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    KeywordContract::new(Rule::Disallow, names)
}
