//! # Pledge Core - Values and Predicates
//!
//! This crate provides the model runtime contracts are checked against:
//!
//! - **Kinds**: nominal types with bases and method tables
//! - **Values**: the dynamic values arguments and results are made of
//! - **Functions**: callables with a declared, cached parameter signature
//! - **Predicates**: composable "does this value satisfy me" tests
//! - **Capabilities**: named structural traits with one-time inclusion
//! - **Implementations**: standalone structural validators
//! - **Errors**: contract violations and raised failures in one enum
//!
//! ## Design Philosophy
//!
//! Every check is a pure function of the value. Predicates never fail and
//! never mutate; composing them builds new predicates. The decorator
//! surface lives in the `pledge` crate.

pub mod builtins;
pub mod capability;
pub mod error;
pub mod function;
pub mod implementation;
pub mod kind;
pub mod predicate;
pub mod protocols;
pub mod value;

// Re-export key types at crate root for convenience
pub use capability::{Member, RegistryError, Trait, TraitRegistry};
pub use error::Error;
pub use function::{parameter_names, Args, Function, Param, ParamKind, Signature};
pub use implementation::{Implementation, ImplementationOptions, Requirement};
pub use kind::{Kind, KindBuilder};
pub use predicate::{Check, Predicate};
pub use value::{Complex, Object, Value};
