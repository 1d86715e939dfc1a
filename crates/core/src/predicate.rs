//! # Predicates
//!
//! A [`Predicate`] answers one question: does this value satisfy me?
//! Primitive checks look at a value's kind or its attribute table;
//! combinators build new predicates out of existing ones without
//! touching their operands.
//!
//! | Constructor              | Satisfied when                                       |
//! |--------------------------|------------------------------------------------------|
//! | `Predicate::nominal`     | the value's kind derives from one of the kinds       |
//! | `Predicate::attribute`   | the value exposes the attribute                      |
//! | `Predicate::method`      | the attribute exists and is callable                 |
//! | `Predicate::field`       | the attribute exists and satisfies a nested predicate|
//! | `Predicate::any_of`      | at least one operand is satisfied                    |
//! | `Predicate::every`       | every operand is satisfied                           |
//! | `Predicate::each`        | every element of an iterable satisfies the operand   |
//! | `Predicate::sequence`    | a tuple of exactly N elements, pairwise satisfied    |
//! | `Predicate::numeric`     | the value is an `int`, `float` or `complex`          |
//!
//! Testing never fails: an unsatisfied predicate returns `false`.
//!
//! ```rust
//! use pledge_core::{builtins, Predicate, Value};
//!
//! let pair = Predicate::sequence([builtins::int(), builtins::bool_()]);
//! assert!(pair.test(&Value::tuple([Value::Int(1), Value::Bool(false)])));
//! assert!(!pair.test(&Value::tuple([Value::Bool(false), Value::Int(1)])));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::builtins;
use crate::capability::Trait;
use crate::kind::Kind;
use crate::value::Value;

/// Anything that can decide whether a value satisfies it.
///
/// Implementations must be deterministic and side-effect free.
pub trait Check: Send + Sync {
    /// Whether `value` satisfies this check.
    fn check(&self, value: &Value) -> bool;

    /// Short human-readable description used in error messages.
    fn describe(&self) -> String;
}

/// A composable, immutable value test.
#[derive(Clone)]
pub enum Predicate {
    /// Instance of at least one of the kinds.
    Nominal(Vec<Kind>),
    /// Exposes the named attribute.
    Attribute(String),
    /// Exposes the named attribute and it is callable.
    Method(String),
    /// Exposes the named attribute and its value satisfies the predicate.
    Field {
        name: String,
        predicate: Box<Predicate>,
    },
    /// Satisfies every member of the capability set.
    Trait(Trait),
    /// Satisfies at least one operand.
    AnyOf(Vec<Predicate>),
    /// Satisfies every operand.
    Every(Vec<Predicate>),
    /// Iterable whose elements all satisfy the operand.
    Each(Box<Predicate>),
    /// Tuple of exactly `len` elements, element `i` satisfying operand `i`.
    Sequence(Vec<Predicate>),
    /// A user-supplied check.
    Custom(Arc<dyn Check>),
}

impl Predicate {
    pub fn nominal<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = Kind>,
    {
        Predicate::Nominal(kinds.into_iter().collect())
    }

    /// The built-in numeric union: `int`, `float` or `complex`.
    pub fn numeric() -> Self {
        Self::nominal([builtins::int(), builtins::float(), builtins::complex()])
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Predicate::Attribute(name.into())
    }

    pub fn method(name: impl Into<String>) -> Self {
        Predicate::Method(name.into())
    }

    pub fn field(name: impl Into<String>, predicate: impl Into<Predicate>) -> Self {
        Predicate::Field {
            name: name.into(),
            predicate: Box::new(predicate.into()),
        }
    }

    pub fn any_of<I, P>(operands: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        Predicate::AnyOf(operands.into_iter().map(Into::into).collect())
    }

    pub fn every<I, P>(operands: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        Predicate::Every(operands.into_iter().map(Into::into).collect())
    }

    pub fn each(operand: impl Into<Predicate>) -> Self {
        Predicate::Each(Box::new(operand.into()))
    }

    pub fn sequence<I, P>(operands: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        Predicate::Sequence(operands.into_iter().map(Into::into).collect())
    }

    pub fn custom(check: impl Check + 'static) -> Self {
        Predicate::Custom(Arc::new(check))
    }

    /// Whether `value` satisfies this predicate.
    pub fn test(&self, value: &Value) -> bool {
        match self {
            Predicate::Nominal(kinds) => kinds.iter().any(|kind| value.is_instance(kind)),
            Predicate::Attribute(name) => value.has_attr(name),
            Predicate::Method(name) => value.attr(name).is_some_and(|attr| attr.is_callable()),
            Predicate::Field { name, predicate } => value
                .attr(name)
                .is_some_and(|attr| predicate.test(&attr)),
            Predicate::Trait(capabilities) => capabilities.test(value),
            Predicate::AnyOf(operands) => operands.iter().any(|p| p.test(value)),
            Predicate::Every(operands) => operands.iter().all(|p| p.test(value)),
            Predicate::Each(operand) => value
                .items()
                .is_some_and(|items| items.iter().all(|item| operand.test(item))),
            Predicate::Sequence(operands) => match value {
                Value::Tuple(items) if items.len() == operands.len() => operands
                    .iter()
                    .zip(items)
                    .all(|(p, item)| p.test(item)),
                _ => false,
            },
            Predicate::Custom(check) => check.check(value),
        }
    }
}

impl Check for Predicate {
    fn check(&self, value: &Value) -> bool {
        self.test(value)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

fn join(f: &mut fmt::Formatter<'_>, operands: &[Predicate], sep: &str) -> fmt::Result {
    for (i, p) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", p)?;
    }
    Ok(())
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Nominal(kinds) => {
                let names: Vec<&str> = kinds.iter().map(Kind::name).collect();
                write!(f, "{}", names.join(" | "))
            }
            Predicate::Attribute(name) => write!(f, "has .{}", name),
            Predicate::Method(name) => write!(f, "has .{}()", name),
            Predicate::Field { name, predicate } => write!(f, ".{}: {}", name, predicate),
            Predicate::Trait(capabilities) => write!(f, "{}", capabilities.name()),
            Predicate::AnyOf(operands) => {
                write!(f, "AnyOf[")?;
                join(f, operands, ", ")?;
                write!(f, "]")
            }
            Predicate::Every(operands) => {
                write!(f, "Every[")?;
                join(f, operands, ", ")?;
                write!(f, "]")
            }
            Predicate::Each(operand) => write!(f, "Each[{}]", operand),
            Predicate::Sequence(operands) => {
                write!(f, "(")?;
                join(f, operands, ", ")?;
                write!(f, ")")
            }
            Predicate::Custom(check) => write!(f, "{}", check.describe()),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self)
    }
}

impl From<Kind> for Predicate {
    fn from(kind: Kind) -> Self {
        Predicate::Nominal(vec![kind])
    }
}

impl From<&Kind> for Predicate {
    fn from(kind: &Kind) -> Self {
        Predicate::Nominal(vec![kind.clone()])
    }
}

impl From<Trait> for Predicate {
    fn from(capabilities: Trait) -> Self {
        Predicate::Trait(capabilities)
    }
}

impl From<&Trait> for Predicate {
    fn from(capabilities: &Trait) -> Self {
        Predicate::Trait(capabilities.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;
    use crate::value::{Complex, Object};

    #[test]
    fn test_nominal_union() {
        let p = Predicate::nominal([builtins::int(), builtins::float()]);
        assert!(p.test(&Value::Int(1)));
        assert!(p.test(&Value::Float(1.0)));
        assert!(!p.test(&Value::from("1")));
    }

    #[test]
    fn test_nominal_respects_subkinds() {
        let animal = Kind::new("Animal");
        let dog = Kind::builder("Dog").extends(&animal).build();
        let rex = Value::from(Object::new(&dog));

        assert!(Predicate::from(&animal).test(&rex));
        assert!(Predicate::from(builtins::object()).test(&rex));
        assert!(!Predicate::from(builtins::int()).test(&rex));
    }

    #[test]
    fn test_numeric() {
        let n = Predicate::numeric();
        assert!(n.test(&Value::Int(3)));
        assert!(n.test(&Value::Float(3.5)));
        assert!(n.test(&Value::Complex(Complex::new(0.0, 1.0))));
        assert!(!n.test(&Value::Bool(true)));
        assert!(!n.test(&Value::from("3")));
    }

    #[test]
    fn test_attribute_vs_method() {
        let kind = Kind::builder("Doc")
            .method("save", Function::opaque("save"))
            .build();
        let doc = Value::from(Object::new(&kind).with_field("title", "x"));

        assert!(Predicate::attribute("title").test(&doc));
        assert!(Predicate::attribute("save").test(&doc));
        assert!(Predicate::method("save").test(&doc));
        assert!(!Predicate::method("title").test(&doc));
        assert!(!Predicate::method("delete").test(&doc));
    }

    #[test]
    fn test_field() {
        let kind = Kind::new("Person");
        let alice = Value::from(Object::new(&kind).with_field("age", 30));

        assert!(Predicate::field("age", builtins::int()).test(&alice));
        assert!(!Predicate::field("age", builtins::str_()).test(&alice));
        assert!(!Predicate::field("name", builtins::str_()).test(&alice));
    }

    #[test]
    fn test_any_of_and_every() {
        let any = Predicate::any_of([builtins::int(), builtins::str_()]);
        assert!(any.test(&Value::from("s")));
        assert!(!any.test(&Value::Float(0.0)));
        assert!(!Predicate::any_of(Vec::<Predicate>::new()).test(&Value::None));

        let every = Predicate::every([
            Predicate::from(builtins::list()),
            Predicate::method("append"),
        ]);
        assert!(every.test(&Value::list([1])));
        assert!(!every.test(&Value::tuple([1])));
        assert!(Predicate::every(Vec::<Predicate>::new()).test(&Value::None));
    }

    #[test]
    fn test_each() {
        let ints = Predicate::each(builtins::int());
        assert!(ints.test(&Value::tuple([1, 2, 3])));
        assert!(!ints.test(&Value::tuple([Value::Int(1), Value::from("x"), Value::Int(3)])));
        assert!(ints.test(&Value::Tuple(vec![])));
        assert!(ints.test(&Value::list([4, 5])));
        assert!(!ints.test(&Value::Int(1)));
    }

    #[test]
    fn test_sequence_arity() {
        let pair = Predicate::sequence([builtins::int(), builtins::bool_()]);
        assert!(pair.test(&Value::tuple([Value::Int(1), Value::Bool(false)])));
        assert!(!pair.test(&Value::tuple([
            Value::Int(1),
            Value::Bool(false),
            Value::Int(2)
        ])));
        assert!(!pair.test(&Value::tuple([Value::Bool(false), Value::Int(1)])));
        // lists are not fixed-size
        assert!(!pair.test(&Value::list([Value::Int(1), Value::Bool(false)])));
    }

    #[test]
    fn test_nested_combinators() {
        let matrix = Predicate::each(Predicate::each(Predicate::numeric()));
        let rows = Value::list([Value::list([1, 2]), Value::list([3.5, 4.0])]);
        assert!(matrix.test(&rows));
    }

    #[test]
    fn test_display() {
        let p = Predicate::any_of([
            Predicate::from(builtins::int()),
            Predicate::each(builtins::str_()),
        ]);
        assert_eq!(p.to_string(), "AnyOf[int, Each[str]]");
        assert_eq!(
            Predicate::sequence([builtins::int(), builtins::bool_()]).to_string(),
            "(int, bool)"
        );
        assert_eq!(Predicate::numeric().to_string(), "int | float | complex");
    }

    #[test]
    fn test_custom_check() {
        struct Positive;
        impl Check for Positive {
            fn check(&self, value: &Value) -> bool {
                matches!(value, Value::Int(i) if *i > 0)
            }
            fn describe(&self) -> String {
                "positive int".into()
            }
        }

        let p = Predicate::custom(Positive);
        assert!(p.test(&Value::Int(3)));
        assert!(!p.test(&Value::Int(-3)));
        assert_eq!(p.to_string(), "positive int");
    }
}
