//! # Decorator Plumbing
//!
//! A [`Decorator`] consumes a [`Function`] and returns a wrapper with the
//! same name, documentation and parameter list. [`ContractExt::with`]
//! applies one:
//!
//! ```rust
//! use pledge::{accepts, returns, ContractExt};
//! use pledge_core::{builtins, Args, Function, Value};
//!
//! let inc = Function::positional("inc", ["x"], |args| match args.require(0, "x")? {
//!     Value::Int(i) => Ok(Value::Int(i + 1)),
//!     other => Ok(other.clone()),
//! })
//! .with(returns([builtins::int()]))
//! .with(accepts([builtins::int()]));
//!
//! assert_eq!(inc.call(&Args::new().arg(1)).unwrap(), Value::Int(2));
//! assert!(inc.call(&Args::new().arg(1.5)).is_err());
//! ```
//!
//! `f.with(a).with(b)` makes `b` the outermost wrapper: its pre-checks run
//! before `a`'s, and its post-checks after `a`'s.
//!
//! Every decorator carries an [`Enforcer`], which pairs the
//! [`ContractConfig`] in effect with the [`ContractHook`] that observes it.

use std::fmt;
use std::sync::Arc;

use pledge_core::{Args, Error, Function, Value};

use crate::config::{ContractConfig, Enforcement};
use crate::hooks::{ContractHook, TracingHook};

// ============================================================================
// Decorator Trait
// ============================================================================

/// Something that wraps a function in a contract.
pub trait Decorator {
    /// Produce the wrapper.
    fn decorate(self, function: Function) -> Function;
}

/// Applies decorators to functions.
pub trait ContractExt {
    /// Wrap `self` with `decorator`; the last decorator applied is outermost.
    fn with<D: Decorator>(self, decorator: D) -> Function;
}

impl ContractExt for Function {
    fn with<D: Decorator>(self, decorator: D) -> Function {
        decorator.decorate(self)
    }
}

// ============================================================================
// Enforcer
// ============================================================================

/// Enforcement settings and hook of one decorator.
///
/// Without an explicit configuration the process-wide
/// [`ContractConfig::global`] applies, read at call time.
#[derive(Clone)]
pub struct Enforcer {
    config: Option<ContractConfig>,
    hook: Arc<dyn ContractHook>,
}

impl Enforcer {
    pub fn new() -> Self {
        Self {
            config: None,
            hook: Arc::new(TracingHook::new()),
        }
    }

    pub fn set_config(&mut self, config: ContractConfig) {
        self.config = Some(config);
    }

    pub fn set_hook(&mut self, hook: Arc<dyn ContractHook>) {
        self.hook = hook;
    }

    pub fn config(&self) -> &ContractConfig {
        self.config.as_ref().unwrap_or_else(|| ContractConfig::global())
    }

    /// Whether argument contracts are checked at all.
    pub fn enabled(&self) -> bool {
        self.config().checks_enabled()
    }

    /// Whether return contracts are checked.
    pub fn checks_returns(&self) -> bool {
        self.config().returns_enabled()
    }

    pub fn call(&self, function: &Function, contract: &str, args: &Args) {
        self.hook.on_call(function.name(), contract, args);
    }

    pub fn returned(&self, function: &Function, value: &Value) {
        self.hook.on_return(function.name(), value);
    }

    /// Report a violation; under strict enforcement it becomes the call's error.
    pub fn violation(&self, function: &Function, error: Error) -> Result<(), Error> {
        self.hook.on_violation(function.name(), &error);
        match self.config().enforcement {
            Enforcement::Strict => Err(error),
            Enforcement::Warn | Enforcement::Off => Ok(()),
        }
    }
}

impl Default for Enforcer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Enforcer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enforcer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Adds `with_config` and `with_hook` to a decorator holding an `enforcer`.
macro_rules! enforced {
    ($decorator:ty) => {
        impl $decorator {
            /// Override the process-wide configuration for this contract.
            pub fn with_config(mut self, config: $crate::config::ContractConfig) -> Self {
                self.enforcer.set_config(config);
                self
            }

            /// Observe this contract with `hook` instead of the tracing hook.
            pub fn with_hook<H>(mut self, hook: H) -> Self
            where
                H: $crate::hooks::ContractHook + 'static,
            {
                self.enforcer.set_hook(::std::sync::Arc::new(hook));
                self
            }
        }
    };
}

pub(crate) use enforced;
