//! # Functions and Signatures
//!
//! A [`Function`] is a named, documented callable with a declared
//! parameter list. Its [`Signature`] holds the ordered names of the
//! ordinary parameters (variadic collectors excluded); it is computed on
//! first use and cached on the function.
//!
//! Wrappers built with [`Function::wraps`] keep the wrapped function's
//! name, documentation and parameter list, so a stack of wrappers binds
//! arguments exactly as the innermost function declares them.
//!
//! ```rust
//! use pledge_core::function::{Args, Function, Param};
//! use pledge_core::Value;
//!
//! let add = Function::new(
//!     "add",
//!     [Param::positional("x"), Param::positional("y")],
//!     |args| {
//!         let (x, y) = (args.require(0, "x")?, args.require(1, "y")?);
//!         match (x, y) {
//!             (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x + y)),
//!             _ => Err(pledge_core::Error::type_error("add expects ints")),
//!         }
//!     },
//! );
//!
//! assert_eq!(add.signature().names(), ["x", "y"]);
//! let sum = add.call(&Args::new().arg(2).kwarg("y", 3)).unwrap();
//! assert_eq!(sum, Value::Int(5));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::builtins;
use crate::error::Error;
use crate::value::Value;

type Body = dyn Fn(&Args) -> Result<Value, Error> + Send + Sync;

// ============================================================================
// Parameters
// ============================================================================

/// How a declared parameter receives arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Ordinary parameter, bound by position or by name.
    Positional,
    /// Collects surplus positional arguments.
    VarPositional,
    /// Collects surplus keyword arguments.
    VarKeyword,
}

/// A declared formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
}

impl Param {
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
        }
    }

    pub fn var_positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::VarPositional,
        }
    }

    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::VarKeyword,
        }
    }
}

/// Ordered names of a function's ordinary parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    names: Vec<String>,
}

impl Signature {
    fn from_params(params: Option<&[Param]>) -> Self {
        let names = params
            .unwrap_or_default()
            .iter()
            .filter(|p| p.kind == ParamKind::Positional)
            .map(|p| p.name.clone())
            .collect();
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a parameter name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// The arguments of one call: positional values and keyword values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    keyword: BTreeMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments made only of positional values.
    pub fn positional_only<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keyword: BTreeMap::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keyword(&self) -> &BTreeMap<String, Value> {
        &self.keyword
    }

    pub fn keyword_value(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Total number of arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The argument at `index`, or else the keyword argument `name`.
    pub fn get(&self, index: usize, name: &str) -> Option<&Value> {
        self.positional
            .get(index)
            .or_else(|| self.keyword.get(name))
    }

    /// Like [`Args::get`], raising a `TypeError` when absent.
    pub fn require(&self, index: usize, name: &str) -> Result<&Value, Error> {
        self.get(index, name)
            .ok_or_else(|| Error::type_error(format!("missing required argument '{}'", name)))
    }

    /// Every argument value: positional first, then keyword values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.positional.iter().chain(self.keyword.values())
    }

    pub fn set_positional(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.positional.get_mut(index) {
            *slot = value;
        }
    }

    pub fn set_keyword(&mut self, name: impl Into<String>, value: Value) {
        self.keyword.insert(name.into(), value);
    }
}

// ============================================================================
// Function
// ============================================================================

/// A callable value.
///
/// Cloning is cheap and preserves identity: clones compare equal.
#[derive(Clone)]
pub struct Function(Arc<FunctionInner>);

#[derive(Clone)]
struct FunctionInner {
    name: String,
    doc: Option<String>,
    params: Option<Vec<Param>>,
    body: Arc<Body>,
    signature: OnceLock<Signature>,
    wrapped: Option<Function>,
}

impl Function {
    /// Define a function with a parameter list and a body.
    pub fn new<P, F>(name: impl Into<String>, params: P, body: F) -> Self
    where
        P: IntoIterator<Item = Param>,
        F: Fn(&Args) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Function(Arc::new(FunctionInner {
            name: name.into(),
            doc: None,
            params: Some(params.into_iter().collect()),
            body: Arc::new(body),
            signature: OnceLock::new(),
            wrapped: None,
        }))
    }

    /// Define a function whose parameters are all ordinary positional ones.
    pub fn positional<'a, N, F>(name: impl Into<String>, names: N, body: F) -> Self
    where
        N: IntoIterator<Item = &'a str>,
        F: Fn(&Args) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Self::new(name, names.into_iter().map(Param::positional), body)
    }

    /// Define a native function without an introspectable parameter list.
    pub fn native<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Args) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Function(Arc::new(FunctionInner {
            name: name.into(),
            doc: None,
            params: None,
            body: Arc::new(body),
            signature: OnceLock::new(),
            wrapped: None,
        }))
    }

    /// A function that exists but raises `NotImplementedError` when called.
    pub fn opaque(name: impl Into<String>) -> Self {
        let name = name.into();
        let message = format!("{} cannot be invoked from here", name);
        Self::native(name, move |_| {
            Err(Error::raise(&builtins::not_implemented_error(), message.clone()))
        })
    }

    /// Build a wrapper around `inner` that keeps its name, documentation
    /// and parameter list.
    pub fn wraps<F>(inner: &Function, body: F) -> Self
    where
        F: Fn(&Args) -> Result<Value, Error> + Send + Sync + 'static,
    {
        let signature = OnceLock::new();
        if let Some(cached) = inner.0.signature.get() {
            let _ = signature.set(cached.clone());
        }
        Function(Arc::new(FunctionInner {
            name: inner.0.name.clone(),
            doc: inner.0.doc.clone(),
            params: inner.0.params.clone(),
            body: Arc::new(body),
            signature,
            wrapped: Some(inner.clone()),
        }))
    }

    /// Attach documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.0).doc = Some(doc.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.0.doc.as_deref()
    }

    /// Declared parameters, if the function has an introspectable list.
    pub fn params(&self) -> Option<&[Param]> {
        self.0.params.as_deref()
    }

    /// The function this one wraps, if any.
    pub fn wrapped(&self) -> Option<&Function> {
        self.0.wrapped.as_ref()
    }

    /// The innermost wrapped function.
    pub fn unwrapped(&self) -> &Function {
        let mut current = self;
        while let Some(inner) = current.wrapped() {
            current = inner;
        }
        current
    }

    /// Ordered ordinary parameter names, computed once and cached.
    pub fn signature(&self) -> &Signature {
        self.0
            .signature
            .get_or_init(|| Signature::from_params(self.0.params.as_deref()))
    }

    /// Invoke the function.
    pub fn call(&self, args: &Args) -> Result<Value, Error> {
        (self.0.body)(args)
    }

    /// Whether two handles refer to the same function.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Ordered parameter names of `function`, excluding variadic collectors.
///
/// Idempotent: the names are computed on first call and cached on the
/// function. A function without a parameter list yields no names.
pub fn parameter_names(function: &Function) -> &[String] {
    function.signature().names()
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.0.name)
            .field("params", &self.0.params)
            .field("wrapped", &self.0.wrapped.is_some())
            .finish()
    }
}
