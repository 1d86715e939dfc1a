//! # Return Contracts
//!
//! [`returns`] invokes the wrapped function and fails with a
//! `ReturnTypeError` unless the result satisfies at least one of the
//! declared predicates. [`Returns::tuple`] declares a fixed-arity tuple
//! whose elements are checked position by position.

use pledge_core::{Error, Function, Predicate};
use tracing::trace;

use crate::decorator::{enforced, Decorator, Enforcer};

/// The result must satisfy one of the predicates.
///
/// An empty predicate list places no constraint on the result.
#[derive(Debug, Clone)]
pub struct Returns {
    predicates: Vec<Predicate>,
    enforcer: Enforcer,
}

impl Returns {
    /// The result must be a tuple of exactly these element predicates.
    pub fn tuple<I, P>(elements: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        returns([Predicate::sequence(elements)])
    }

    fn expected(&self) -> String {
        match self.predicates.as_slice() {
            [single] => single.to_string(),
            many => Predicate::AnyOf(many.to_vec()).to_string(),
        }
    }
}

enforced!(Returns);

impl Decorator for Returns {
    fn decorate(self, function: Function) -> Function {
        let inner = function.clone();
        let expected = self.expected();
        let Returns {
            predicates,
            enforcer,
        } = self;

        Function::wraps(&function, move |args| {
            let value = inner.call(args)?;
            if predicates.is_empty() || !enforcer.checks_returns() {
                return Ok(value);
            }
            enforcer.call(&inner, "returns", args);
            let satisfied = predicates.iter().any(|p| p.test(&value));
            trace!(function = inner.name(), satisfied, "checked return value");
            if !satisfied {
                enforcer.violation(
                    &inner,
                    Error::ReturnType {
                        value: value.to_string(),
                        expected: expected.clone(),
                    },
                )?;
            }
            enforcer.returned(&inner, &value);
            Ok(value)
        })
    }
}

/// The result must satisfy at least one of `predicates`.
pub fn returns<I, P>(predicates: I) -> Returns
where
    I: IntoIterator<Item = P>,
    P: Into<Predicate>,
{
    Returns {
        predicates: predicates.into_iter().map(Into::into).collect(),
        enforcer: Enforcer::new(),
    }
}
