//! Contract hooks for observability.
//!
//! Hooks observe what a contract wrapper does without changing it. Every
//! decorator holds one hook; the default is [`TracingHook`], which turns
//! events into `tracing` records.
//!
//! ## Events
//!
//! - `on_call`: Before a contract checks the arguments of a call
//! - `on_violation`: When a contract is violated (in any enforcement mode)
//! - `on_return`: After a `returns` contract checked the result of a call
//!
//! ## Example
//!
//! ```rust
//! use pledge::hooks::ContractHook;
//! use pledge_core::Error;
//!
//! struct PrintViolations;
//!
//! impl ContractHook for PrintViolations {
//!     fn on_violation(&self, function: &str, error: &Error) {
//!         eprintln!("{} broke its contract: {}", function, error);
//!     }
//! }
//! ```

use pledge_core::{Args, Error, Value};
use tracing::{trace, warn};

// ============================================================================
// Contract Hook Trait
// ============================================================================

/// Trait for observing contract events.
///
/// All methods have default no-op implementations, so you only need to
/// implement the events you care about.
pub trait ContractHook: Send + Sync {
    /// Called before a contract checks a call.
    ///
    /// # Arguments
    /// * `function` - Name of the wrapped function
    /// * `contract` - Name of the contract (`accepts`, `returns`, ...)
    /// * `args` - Arguments of the call
    fn on_call(&self, _function: &str, _contract: &str, _args: &Args) {}

    /// Called when a contract is violated.
    ///
    /// # Arguments
    /// * `function` - Name of the wrapped function
    /// * `error` - The violation
    fn on_violation(&self, _function: &str, _error: &Error) {}

    /// Called after a `returns` contract checked the result of a call.
    ///
    /// Only [`Returns`](crate::Returns) reports results, and only while
    /// return checks are enabled. Other contracts never call this.
    ///
    /// # Arguments
    /// * `function` - Name of the wrapped function
    /// * `value` - The returned value
    fn on_return(&self, _function: &str, _value: &Value) {}
}

// ============================================================================
// Null Hook
// ============================================================================

/// A no-op hook implementation for when no observation is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHook;

impl ContractHook for NullHook {}

// ============================================================================
// Tracing Hook (Default)
// ============================================================================

/// A hook that records events through `tracing`.
///
/// Violations are `warn!` events; calls and returns are `trace!` events
/// and only carry argument values when `verbose` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook {
    /// Whether to include argument and return values
    pub verbose: bool,
}

impl TracingHook {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl ContractHook for TracingHook {
    fn on_call(&self, function: &str, contract: &str, args: &Args) {
        if self.verbose {
            trace!(function, contract, args = ?args, "checking call");
        } else {
            trace!(function, contract, arity = args.len(), "checking call");
        }
    }

    fn on_violation(&self, function: &str, error: &Error) {
        warn!(function, kind = %error.kind(), "{}", error);
    }

    fn on_return(&self, function: &str, value: &Value) {
        if self.verbose {
            trace!(function, value = %value, "returned");
        }
    }
}

// ============================================================================
// Composite Hook
// ============================================================================

/// A hook that delegates to multiple inner hooks.
pub struct CompositeHook {
    hooks: Vec<Box<dyn ContractHook>>,
}

impl CompositeHook {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Add a hook to the composite.
    pub fn with<H: ContractHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl Default for CompositeHook {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractHook for CompositeHook {
    fn on_call(&self, function: &str, contract: &str, args: &Args) {
        for hook in &self.hooks {
            hook.on_call(function, contract, args);
        }
    }

    fn on_violation(&self, function: &str, error: &Error) {
        for hook in &self.hooks {
            hook.on_violation(function, error);
        }
    }

    fn on_return(&self, function: &str, value: &Value) {
        for hook in &self.hooks {
            hook.on_return(function, value);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
