//! Declared failure kinds.
//!
//! [`throws`] lets failures whose kind derives from a declared kind pass
//! unchanged. Any other failure is re-signalled as an
//! `UnexpectedFailureError` carrying the original as its source. Contract
//! violations from inner wrappers are failures like any other.

use pledge_core::{Error, Function, Kind};

use crate::decorator::{enforced, Decorator, Enforcer};

/// Only failures of the declared kinds may escape.
#[derive(Debug, Clone)]
pub struct Throws {
    kinds: Vec<Kind>,
    enforcer: Enforcer,
}

impl Throws {
    fn declares(&self, error: &Error) -> bool {
        self.kinds.iter().any(|kind| error.is_instance_of(kind))
    }
}

enforced!(Throws);

impl Decorator for Throws {
    fn decorate(self, function: Function) -> Function {
        let inner = function.clone();
        Function::wraps(&function, move |args| {
            let error = match inner.call(args) {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };
            if !self.enforcer.enabled() || self.declares(&error) {
                return Err(error);
            }
            let undeclared = Error::UnexpectedFailure {
                allowed: self.kinds.clone(),
                source: Box::new(error.clone()),
            };
            // Under warn enforcement the original failure propagates.
            self.enforcer.violation(&inner, undeclared)?;
            Err(error)
        })
    }
}

/// Failures must be of one of `kinds` (or a subkind).
pub fn throws<I>(kinds: I) -> Throws
where
    I: IntoIterator<Item = Kind>,
{
    Throws {
        kinds: kinds.into_iter().collect(),
        enforcer: Enforcer::new(),
    }
}
