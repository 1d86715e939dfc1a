//! # Pledge - Runtime Contracts
//!
//! Declare what a function's arguments and result must satisfy, and have
//! the declarations enforced every time it is called.
//!
//! ## Overview
//!
//! - **Argument contracts**: [`accepts`], [`rejects`]
//! - **Return contracts**: [`returns`], [`Returns::tuple`]
//! - **Keyword contracts**: [`requires`], [`exposes`], [`disallows`]
//! - **Capability contracts**: [`implements`]
//! - **Failure contracts**: [`throws`]
//! - **Conversion**: [`converts`]
//! - **Dispatch**: [`single_dispatch`]
//!
//! Values, kinds, predicates and traits come from [`pledge_core`].
//!
//! ## Example
//!
//! ```rust
//! use pledge::{accepts, requires, returns, ContractExt};
//! use pledge_core::{builtins, Args, Function, Value};
//!
//! let area = Function::positional("area", ["width", "height"], |args| {
//!     match (args.require(0, "width")?, args.require(1, "height")?) {
//!         (Value::Int(w), Value::Int(h)) => Ok(Value::Int(w * h)),
//!         _ => Ok(Value::None),
//!     }
//! })
//! .with(returns([builtins::int()]))
//! .with(accepts([builtins::int(), builtins::int()]))
//! .with(requires(["height"]));
//!
//! assert_eq!(area.call(&Args::new().arg(3).kwarg("height", 4)).unwrap(), Value::Int(12));
//! assert!(area.call(&Args::new().arg(3).arg(4)).is_err());
//! ```
//!
//! ## Enforcement
//!
//! Each contract follows a [`ContractConfig`]: strict by default, or
//! `warn` / `off` through `PLEDGE_ENFORCEMENT`. Violations are reported to
//! a [`ContractHook`], which defaults to `tracing` events.

pub mod accepts;
pub mod binder;
pub mod config;
pub mod converts;
pub mod decorator;
pub mod dispatch;
pub mod hooks;
pub mod implements;
pub mod keywords;
pub mod returns;
pub mod throws;

// Re-export key types at crate root for convenience
pub use accepts::{accepts, rejects, Accepts, Rejects};
pub use binder::{bind, BindingMap};
pub use config::{ConfigError, ContractConfig, Enforcement};
pub use converts::{converts, Converts};
pub use decorator::{ContractExt, Decorator, Enforcer};
pub use dispatch::{single_dispatch, SingleDispatch};
pub use hooks::{CompositeHook, ContractHook, NullHook, TracingHook};
pub use implements::{implements, Implements};
pub use keywords::{disallows, exposes, requires, KeywordContract, WILDCARD};
pub use returns::{returns, Returns};
pub use throws::{throws, Throws};
