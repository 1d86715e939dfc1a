//! # Single Dispatch
//!
//! A dispatching function chooses a delegate by testing its first argument
//! against registered predicates, in registration order. When nothing
//! matches, or the call has no first argument, the base function runs.
//!
//! ```rust
//! use pledge::dispatch::single_dispatch;
//! use pledge_core::{builtins, Args, Function, Value};
//!
//! let describe = single_dispatch(Function::positional("describe", ["x"], |_| {
//!     Ok(Value::from("something"))
//! }));
//! describe.register(builtins::int(), Function::native("int", |_| Ok(Value::from("a number"))));
//!
//! let f = describe.function();
//! assert_eq!(f.call(&Args::new().arg(1)).unwrap(), Value::from("a number"));
//! assert_eq!(f.call(&Args::new().arg("x")).unwrap(), Value::from("something"));
//! ```
//!
//! Registrations made after [`SingleDispatch::function`] was taken are
//! visible to it. Callers should not rely on priority between overlapping
//! predicates.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use pledge_core::{Args, Error, Function, Predicate, Value};
use tracing::{debug, trace};

type Delegates = Arc<RwLock<Vec<(Predicate, Function)>>>;

/// A registry of delegates keyed by a predicate on the first argument.
#[derive(Clone)]
pub struct SingleDispatch {
    base: Function,
    delegates: Delegates,
    function: Function,
}

impl SingleDispatch {
    fn new(base: Function) -> Self {
        let delegates: Delegates = Arc::new(RwLock::new(Vec::new()));
        let function = {
            let fallback = base.clone();
            let delegates = Arc::clone(&delegates);
            Function::wraps(&base, move |args| {
                let chosen =
                    first_argument(&fallback, args).and_then(|first| select(&delegates, first));
                match chosen {
                    Some(delegate) => delegate.call(args),
                    None => fallback.call(args),
                }
            })
        };
        Self {
            base,
            delegates,
            function,
        }
    }

    /// Route first arguments satisfying `predicate` to `delegate`.
    ///
    /// Returns the delegate so it can still be called directly.
    ///
    /// The registry holds `delegate` strongly and lives as long as any
    /// clone of this dispatcher or of [`function`](Self::function). A
    /// delegate that captures either of those forms a cycle, and the
    /// registry is then never freed.
    pub fn register(&self, predicate: impl Into<Predicate>, delegate: Function) -> Function {
        let predicate = predicate.into();
        debug!(
            function = self.base.name(),
            %predicate,
            delegate = delegate.name(),
            "registered delegate"
        );
        self.delegates.write().push((predicate, delegate.clone()));
        delegate
    }

    /// The delegate chosen for `first`, if any.
    pub fn resolve(&self, first: &Value) -> Option<Function> {
        select(&self.delegates, first)
    }

    /// The dispatching function.
    pub fn function(&self) -> Function {
        self.function.clone()
    }

    pub fn base(&self) -> &Function {
        &self.base
    }

    /// Dispatch one call.
    pub fn call(&self, args: &Args) -> Result<Value, Error> {
        self.function.call(args)
    }

    pub fn len(&self) -> usize {
        self.delegates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.read().is_empty()
    }
}

impl fmt::Debug for SingleDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleDispatch")
            .field("base", &self.base)
            .field("delegates", &self.len())
            .finish()
    }
}

/// The first positional argument, else the keyword named like the first
/// declared parameter.
fn first_argument<'a>(base: &Function, args: &'a Args) -> Option<&'a Value> {
    args.positional().first().or_else(|| {
        base.signature()
            .names()
            .first()
            .and_then(|name| args.keyword_value(name))
    })
}

/// The lock is released before the delegate runs, so delegates may register.
fn select(delegates: &Delegates, first: &Value) -> Option<Function> {
    let delegates = delegates.read();
    let found = delegates
        .iter()
        .find(|(predicate, _)| predicate.test(first))
        .map(|(_, delegate)| delegate.clone());
    trace!(value = %first, matched = found.is_some(), "dispatch lookup");
    found
}

/// Make `base` the fallback of a new dispatch registry.
pub fn single_dispatch(base: Function) -> SingleDispatch {
    SingleDispatch::new(base)
}
