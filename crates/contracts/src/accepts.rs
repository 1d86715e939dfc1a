//! # Argument Contracts
//!
//! [`accepts`] fails a call when a bound argument does not satisfy its
//! predicate; [`rejects`] fails it when the argument does. Both bind
//! predicates to parameter names once, when applied:
//!
//! ```rust
//! use pledge::{accepts, ContractExt};
//! use pledge_core::{builtins, Args, Function, Value};
//!
//! let f = Function::positional("f", ["x", "y"], |args| Ok(args.require(0, "x")?.clone()))
//!     .with(accepts([builtins::int()]).named("y", builtins::str_()));
//!
//! assert!(f.call(&Args::new().arg(1).arg("a")).is_ok());
//! assert!(f.call(&Args::new().arg(1).kwarg("y", 2)).is_err());
//! ```
//!
//! The wrapped function is never invoked when a check fails.

use pledge_core::{Error, Function, Predicate};
use tracing::{debug, trace};

use crate::binder::{bind, BindingMap};
use crate::decorator::{enforced, Decorator, Enforcer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    /// Arguments must satisfy their predicate.
    Accept,
    /// Arguments must not satisfy their predicate.
    Reject,
}

impl Polarity {
    fn contract(self) -> &'static str {
        match self {
            Polarity::Accept => "accepts",
            Polarity::Reject => "rejects",
        }
    }

    fn violated_by(self, satisfied: bool) -> bool {
        match self {
            Polarity::Accept => !satisfied,
            Polarity::Reject => satisfied,
        }
    }

    fn expectation(self, predicate: &Predicate) -> String {
        match self {
            Polarity::Accept => format!("expected {}", predicate),
            Polarity::Reject => format!("must not be {}", predicate),
        }
    }
}

fn guard(
    function: Function,
    positional: Vec<Predicate>,
    named: Vec<(String, Predicate)>,
    enforcer: Enforcer,
    polarity: Polarity,
) -> Function {
    let map = BindingMap::build(function.signature(), positional, named);
    let contract = polarity.contract();
    debug!(
        function = function.name(),
        contract,
        bound = map.len(),
        "binding map built"
    );

    let inner = function.clone();
    Function::wraps(&function, move |args| {
        if enforcer.enabled() {
            enforcer.call(&inner, contract, args);
            for (name, value) in bind(inner.signature().names(), args) {
                let Some(predicate) = map.get(name) else {
                    continue;
                };
                let satisfied = predicate.test(value);
                trace!(parameter = name, %predicate, satisfied, "checked argument");
                if polarity.violated_by(satisfied) {
                    enforcer.violation(
                        &inner,
                        Error::ArgumentType {
                            name: name.to_string(),
                            value: value.to_string(),
                            expected: polarity.expectation(predicate),
                        },
                    )?;
                }
            }
        }
        inner.call(args)
    })
}

// ============================================================================
// Accepts
// ============================================================================

/// Arguments must satisfy their predicates.
#[derive(Debug, Clone)]
pub struct Accepts {
    positional: Vec<Predicate>,
    named: Vec<(String, Predicate)>,
    enforcer: Enforcer,
}

impl Accepts {
    /// Bind a predicate to the parameter `name`.
    pub fn named(mut self, name: impl Into<String>, predicate: impl Into<Predicate>) -> Self {
        self.named.push((name.into(), predicate.into()));
        self
    }
}

enforced!(Accepts);

impl Decorator for Accepts {
    fn decorate(self, function: Function) -> Function {
        guard(
            function,
            self.positional,
            self.named,
            self.enforcer,
            Polarity::Accept,
        )
    }
}

/// Predicates for the declared parameters, in order.
pub fn accepts<I, P>(positional: I) -> Accepts
where
    I: IntoIterator<Item = P>,
    P: Into<Predicate>,
{
    Accepts {
        positional: positional.into_iter().map(Into::into).collect(),
        named: Vec::new(),
        enforcer: Enforcer::new(),
    }
}

// ============================================================================
// Rejects
// ============================================================================

/// Arguments must not satisfy their predicates.
#[derive(Debug, Clone)]
pub struct Rejects {
    positional: Vec<Predicate>,
    named: Vec<(String, Predicate)>,
    enforcer: Enforcer,
}

impl Rejects {
    /// Bind a predicate to the parameter `name`.
    pub fn named(mut self, name: impl Into<String>, predicate: impl Into<Predicate>) -> Self {
        self.named.push((name.into(), predicate.into()));
        self
    }
}

enforced!(Rejects);

impl Decorator for Rejects {
    fn decorate(self, function: Function) -> Function {
        guard(
            function,
            self.positional,
            self.named,
            self.enforcer,
            Polarity::Reject,
        )
    }
}

/// Predicates the declared parameters must not satisfy, in order.
pub fn rejects<I, P>(positional: I) -> Rejects
where
    I: IntoIterator<Item = P>,
    P: Into<Predicate>,
{
    Rejects {
        positional: positional.into_iter().map(Into::into).collect(),
        named: Vec::new(),
        enforcer: Enforcer::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContractConfig, Enforcement};
    use crate::decorator::ContractExt;
    use crate::hooks::NullHook;
    use pledge_core::{builtins, Args, Param, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn identity() -> Function {
        Function::positional("identity", ["x"], |args| Ok(args.require(0, "x")?.clone()))
    }

    fn strict() -> ContractConfig {
        ContractConfig::default()
    }

    #[test]
    fn test_accepts_positional_and_keyword() {
        let f = identity().with(accepts([builtins::int()]).with_config(strict()));

        assert_eq!(f.call(&Args::new().arg(1)).unwrap(), Value::Int(1));
        assert_eq!(f.call(&Args::new().kwarg("x", 1)).unwrap(), Value::Int(1));

        let err = f.call(&Args::new().arg(1.0)).unwrap_err();
        assert!(err.is_instance_of(&builtins::argument_type_error()));
        assert!(err.is_instance_of(&builtins::type_error()));
    }

    #[test]
    fn test_rejects() {
        let f = identity().with(rejects([builtins::int()]).with_config(strict()));
        assert!(f.call(&Args::new().arg(1.5)).is_ok());
        assert!(matches!(
            f.call(&Args::new().arg(3)),
            Err(Error::ArgumentType { ref name, .. }) if name == "x"
        ));
    }

    #[test]
    fn test_failed_check_never_invokes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let f = Function::positional("f", ["x"], move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::None)
        })
        .with(accepts([builtins::str_()]).with_config(strict()));

        assert!(f.call(&Args::new().arg(1)).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(f.call(&Args::new().arg("ok")).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unspecified_parameter_passes() {
        let f = Function::positional("f", ["a", "b"], |_| Ok(Value::None))
            .with(accepts([builtins::int()]).with_config(strict()));
        assert!(f.call(&Args::new().arg(1).arg("anything")).is_ok());
    }

    #[test]
    fn test_named_extra_keyword() {
        let f = Function::new(
            "f",
            [Param::positional("a"), Param::var_keyword("options")],
            |_| Ok(Value::None),
        )
        .with(accepts(Vec::<Predicate>::new()).named("verbose", builtins::bool_()).with_config(strict()));

        assert!(f.call(&Args::new().arg(1).kwarg("verbose", true)).is_ok());
        assert!(f.call(&Args::new().arg(1).kwarg("verbose", 1)).is_err());
        assert!(f.call(&Args::new().arg(1).kwarg("other", 1)).is_ok());
    }

    #[test]
    fn test_warn_calls_through() {
        let config = ContractConfig {
            enforcement: Enforcement::Warn,
            check_returns: true,
        };
        let f = identity().with(accepts([builtins::int()]).with_config(config).with_hook(NullHook));
        assert_eq!(f.call(&Args::new().arg("s")).unwrap(), Value::from("s"));
    }

    #[test]
    fn test_off_skips_checks() {
        let config = ContractConfig {
            enforcement: Enforcement::Off,
            check_returns: true,
        };
        let f = identity().with(accepts([builtins::int()]).with_config(config));
        assert!(f.call(&Args::new().arg("s")).is_ok());
    }

    #[test]
    fn test_wrapper_keeps_metadata() {
        let f = identity()
            .with_doc("Returns its argument.")
            .with(accepts([builtins::int()]));
        assert_eq!(f.name(), "identity");
        assert_eq!(f.doc(), Some("Returns its argument."));
        assert_eq!(f.signature().names(), ["x"]);
    }
}
