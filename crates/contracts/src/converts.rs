//! # Argument Conversion
//!
//! [`converts`] binds target kinds to parameters the way `accepts` binds
//! predicates, and converts each bound argument that is not already an
//! instance of its target before invoking the wrapped function:
//!
//! ```rust
//! use pledge::{converts, ContractExt};
//! use pledge_core::{builtins, Args, Function, Value};
//!
//! let div = Function::positional("div", ["x", "y"], |args| {
//!     match (args.require(0, "x")?, args.require(1, "y")?) {
//!         (Value::Float(x), Value::Float(y)) => Ok(Value::Float(x / y)),
//!         _ => Ok(Value::None),
//!     }
//! })
//! .with(converts([builtins::float(), builtins::float()]));
//!
//! assert_eq!(div.call(&Args::new().arg(1).arg(2)).unwrap(), Value::Float(0.5));
//! ```
//!
//! Conversion is not a check: it applies under every enforcement mode, and
//! an impossible conversion fails with the host `ValueError` or `TypeError`.

use std::collections::HashMap;

use pledge_core::{Function, Kind, Value};
use tracing::{debug, trace};

use crate::binder::bind;
use crate::decorator::Decorator;

/// Convert bound arguments to target kinds.
#[derive(Debug, Clone)]
pub struct Converts {
    positional: Vec<Kind>,
    named: Vec<(String, Kind)>,
}

impl Converts {
    /// Convert the argument bound to `name`.
    pub fn named(mut self, name: impl Into<String>, kind: Kind) -> Self {
        self.named.push((name.into(), kind));
        self
    }
}

impl Decorator for Converts {
    fn decorate(self, function: Function) -> Function {
        let mut targets: HashMap<String, Kind> = function
            .signature()
            .names()
            .iter()
            .cloned()
            .zip(self.positional)
            .collect();
        targets.extend(self.named);
        debug!(
            function = function.name(),
            targets = targets.len(),
            "conversion targets bound"
        );

        let inner = function.clone();
        Function::wraps(&function, move |args| {
            let names = inner.signature().names();
            let mut converted = args.clone();
            let mut changed = false;
            for (index, (name, value)) in bind(names, args).into_iter().enumerate() {
                let Some(target) = targets.get(name) else {
                    continue;
                };
                if value.is_instance(target) {
                    continue;
                }
                let value: Value = value.convert(target)?;
                trace!(parameter = name, %target, "converted argument");
                if index < args.positional().len() && index < names.len() {
                    converted.set_positional(index, value);
                } else {
                    converted.set_keyword(name, value);
                }
                changed = true;
            }
            if changed {
                inner.call(&converted)
            } else {
                inner.call(args)
            }
        })
    }
}

/// Target kinds for the declared parameters, in order.
pub fn converts<I>(positional: I) -> Converts
where
    I: IntoIterator<Item = Kind>,
{
    Converts {
        positional: positional.into_iter().collect(),
        named: Vec::new(),
    }
}
