//! # Values
//!
//! [`Value`] is the dynamic value every contract is checked against. It is
//! deliberately small: scalars, the three built-in containers, user
//! objects and functions.
//!
//! Values expose the same reflective surface the predicates rely on:
//!
//! - [`Value::kind`] for nominal checks
//! - [`Value::attr`] / [`Value::has_attr`] for attribute checks
//! - [`Value::is_callable`] for method checks
//! - [`Value::items`] for per-element checks

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::builtins;
use crate::error::Error;
use crate::function::Function;
use crate::kind::Kind;

/// A complex number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "({:?}-{:?}j)", self.re, -self.im)
        } else {
            write!(f, "({:?}+{:?}j)", self.re, self.im)
        }
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex(Complex),
    Str(String),
    /// Fixed-size ordered collection.
    Tuple(Vec<Value>),
    /// Variable-size ordered collection.
    List(Vec<Value>),
    /// Key/value pairs in insertion order.
    Dict(Vec<(Value, Value)>),
    Object(Object),
    Function(Function),
}

impl Value {
    /// Build a tuple.
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Build a list.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// The nominal kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::None => builtins::none(),
            Value::Bool(_) => builtins::bool_(),
            Value::Int(_) => builtins::int(),
            Value::Float(_) => builtins::float(),
            Value::Complex(_) => builtins::complex(),
            Value::Str(_) => builtins::str_(),
            Value::Tuple(_) => builtins::tuple(),
            Value::List(_) => builtins::list(),
            Value::Dict(_) => builtins::dict(),
            Value::Object(object) => object.kind().clone(),
            Value::Function(_) => builtins::function(),
        }
    }

    /// Whether the value's kind is `kind` or a subkind of it.
    pub fn is_instance(&self, kind: &Kind) -> bool {
        self.kind().is_subkind_of(kind)
    }

    /// Look up an attribute.
    ///
    /// Objects resolve their own fields first, then methods of their kind.
    /// Numbers expose `real` and `imag`. Methods of built-in kinds resolve
    /// to opaque functions.
    pub fn attr(&self, name: &str) -> Option<Value> {
        if let Value::Object(object) = self {
            if let Some(field) = object.field(name) {
                return Some(field.clone());
            }
        }
        if let Some(number) = self.numeric_attr(name) {
            return Some(number);
        }
        self.kind()
            .method(name)
            .map(|method| Value::Function(method.clone()))
    }

    /// Whether [`Value::attr`] would find `name`.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    fn numeric_attr(&self, name: &str) -> Option<Value> {
        let (re, im) = match self {
            Value::Int(i) => (Value::Int(*i), Value::Int(0)),
            Value::Float(x) => (Value::Float(*x), Value::Float(0.0)),
            Value::Complex(c) => (Value::Float(c.re), Value::Float(c.im)),
            _ => return None,
        };
        match name {
            "real" => Some(re),
            "imag" => Some(im),
            _ => None,
        }
    }

    /// Whether the value can be invoked.
    pub fn is_callable(&self) -> bool {
        match self {
            Value::Function(_) => true,
            Value::Object(object) => object.kind().has_method("__call__"),
            _ => false,
        }
    }

    /// The elements produced by iterating the value, if it is iterable.
    ///
    /// Dicts yield their keys and strings yield one-character strings.
    pub fn items(&self) -> Option<Vec<Value>> {
        match self {
            Value::Tuple(items) | Value::List(items) => Some(items.clone()),
            Value::Dict(pairs) => Some(pairs.iter().map(|(k, _)| k.clone()).collect()),
            Value::Str(s) => Some(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            _ => None,
        }
    }

    /// Convert to a built-in scalar kind.
    ///
    /// Values already of the target kind are returned unchanged. Supported
    /// targets are `int`, `float`, `complex`, `str` and `bool`.
    pub fn convert(&self, target: &Kind) -> Result<Value, Error> {
        if self.is_instance(target) {
            return Ok(self.clone());
        }
        let cannot = || {
            Error::type_error(format!(
                "cannot convert {} to {}",
                self.kind().name(),
                target.name()
            ))
        };

        if *target == builtins::int() {
            match self {
                Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
                // 2^63 itself is out of range, so the upper bound is exclusive.
                Value::Float(x) if (i64::MIN as f64..i64::MAX as f64).contains(&x.trunc()) => {
                    Ok(Value::Int(x.trunc() as i64))
                }
                Value::Float(x) => Err(Error::value_error(format!(
                    "cannot convert float {:?} to int",
                    x
                ))),
                Value::Str(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
                    Error::value_error(format!("invalid literal for int(): {:?}", s))
                }),
                _ => Err(cannot()),
            }
        } else if *target == builtins::float() {
            match self {
                Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
                Value::Int(i) => Ok(Value::Float(*i as f64)),
                Value::Str(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
                    Error::value_error(format!("could not convert string to float: {:?}", s))
                }),
                _ => Err(cannot()),
            }
        } else if *target == builtins::complex() {
            match self {
                Value::Bool(_) | Value::Int(_) | Value::Float(_) => match self.convert(&builtins::float())? {
                    Value::Float(re) => Ok(Value::Complex(Complex::new(re, 0.0))),
                    _ => Err(cannot()),
                },
                _ => Err(cannot()),
            }
        } else if *target == builtins::str_() {
            match self {
                Value::Str(_) => Ok(self.clone()),
                other => Ok(Value::Str(other.to_string())),
            }
        } else if *target == builtins::bool_() {
            Ok(Value::Bool(self.truthy()))
        } else {
            Err(cannot())
        }
    }

    /// Truthiness: zero, empty and `None` are false.
    pub fn truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(x) => *x != 0.0,
            Value::Complex(c) => c.re != 0.0 || c.im != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Tuple(items) | Value::List(items) => !items.is_empty(),
            Value::Dict(pairs) => !pairs.is_empty(),
            Value::Object(_) | Value::Function(_) => true,
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Complex(c) => write!(f, "{}", c),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::List(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            }
            Value::Dict(pairs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Object(object) => write!(f, "<{} object>", object.kind()),
            Value::Function(function) => write!(f, "<function {}>", function.name()),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::None
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self {
        Value::Complex(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

// ============================================================================
// Objects
// ============================================================================

/// An instance of a user kind with named fields.
///
/// Objects compare by identity.
#[derive(Clone)]
pub struct Object(Arc<ObjectInner>);

#[derive(Clone)]
struct ObjectInner {
    kind: Kind,
    fields: BTreeMap<String, Value>,
}

impl Object {
    /// Create an instance of `kind` with no fields.
    pub fn new(kind: &Kind) -> Self {
        Object(Arc::new(ObjectInner {
            kind: kind.clone(),
            fields: BTreeMap::new(),
        }))
    }

    /// Set a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.0)
            .fields
            .insert(name.into(), value.into());
        self
    }

    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("kind", &self.0.kind)
            .field("fields", &self.0.fields)
            .finish()
    }
}
