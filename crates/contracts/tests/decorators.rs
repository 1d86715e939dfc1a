//! # Decorator Tests
//!
//! End-to-end behaviour of the contract decorators:
//! - The documented call/return examples
//! - Stacking order and metadata preservation
//! - Structural contracts built from traits and implementations
//! - Enforcement modes observed through hooks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pledge::{
    accepts, converts, disallows, exposes, implements, rejects, requires, returns, throws,
    ContractConfig, ContractExt, ContractHook, Enforcement, Returns,
};
use pledge_core::capability::Trait;
use pledge_core::{
    builtins, protocols, Args, Error, Function, Implementation, Kind, Object, Predicate,
    Requirement, Value,
};

fn strict() -> ContractConfig {
    ContractConfig::default()
}

fn warn() -> ContractConfig {
    ContractConfig {
        enforcement: Enforcement::Warn,
        check_returns: true,
    }
}

fn identity() -> Function {
    Function::positional("identity", ["x"], |args| Ok(args.require(0, "x")?.clone()))
}

fn increment() -> Function {
    Function::positional("increment", ["x"], |args| match args.require(0, "x")? {
        Value::Int(i) => Ok(Value::Int(i + 1)),
        Value::Float(x) => Ok(Value::Float(x + 1.0)),
        _ => Ok(Value::from("oops")),
    })
}

// ============================================================================
// Documented Examples
// ============================================================================

#[test]
fn test_accepts_int() {
    let f = identity().with(accepts([builtins::int()]).with_config(strict()));

    assert_eq!(f.call(&Args::new().arg(1)).unwrap(), Value::Int(1));
    assert_eq!(f.call(&Args::new().kwarg("x", 1)).unwrap(), Value::Int(1));

    let err = f.call(&Args::new().arg(1.0)).unwrap_err();
    assert!(err.is_instance_of(&builtins::argument_type_error()));
}

#[test]
fn test_returns_int_or_float() {
    let f = increment().with(returns([builtins::int(), builtins::float()]).with_config(strict()));

    assert_eq!(f.call(&Args::new().arg(1)).unwrap(), Value::Int(2));
    assert_eq!(f.call(&Args::new().arg(1.5)).unwrap(), Value::Float(2.5));
    assert!(f
        .call(&Args::new().arg("x"))
        .unwrap_err()
        .is_instance_of(&builtins::return_type_error()));
}

#[test]
fn test_returns_sequence() {
    let returning = |value: Value| {
        Function::native("pair", move |_| Ok(value.clone()))
            .with(Returns::tuple([builtins::int(), builtins::bool_()]).with_config(strict()))
    };

    assert!(returning(Value::tuple([Value::Int(1), Value::Bool(false)]))
        .call(&Args::new())
        .is_ok());
    assert!(returning(Value::tuple([Value::Int(1), Value::Bool(false), Value::Int(2)]))
        .call(&Args::new())
        .is_err());
    assert!(returning(Value::tuple([Value::Bool(false), Value::Int(1)]))
        .call(&Args::new())
        .is_err());
}

#[test]
fn test_accepts_each() {
    let f = identity().with(accepts([Predicate::each(builtins::int())]).with_config(strict()));

    assert!(f.call(&Args::new().arg(Value::tuple([1, 2, 3]))).is_ok());
    assert!(f.call(&Args::new().arg(Value::Tuple(vec![]))).is_ok());
    assert!(f
        .call(&Args::new().arg(Value::tuple([Value::Int(1), Value::from("x"), Value::Int(3)])))
        .is_err());
    assert!(f.call(&Args::new().arg(5)).is_err());
}

#[test]
fn test_requires_node() {
    let f = Function::positional("f", ["node"], |args| Ok(args.require(0, "node")?.clone()))
        .with(requires(["node"]).with_config(strict()));

    assert!(f
        .call(&Args::new().arg(10))
        .unwrap_err()
        .is_instance_of(&builtins::missing_argument_error()));
    assert_eq!(f.call(&Args::new().kwarg("node", 10)).unwrap(), Value::Int(10));
}

#[test]
fn test_throws_value_error() {
    let failing = |kind: Kind| {
        Function::native("f", move |_| Err(Error::raise(&kind, "boom")))
            .with(throws([builtins::value_error()]).with_config(strict()))
    };

    let declared = failing(builtins::value_error()).call(&Args::new()).unwrap_err();
    assert_eq!(declared.kind(), builtins::value_error());

    let other = failing(builtins::attribute_error()).call(&Args::new()).unwrap_err();
    assert!(other.is_instance_of(&builtins::unexpected_failure_error()));
    assert!(other.is_instance_of(&builtins::runtime_error()));
}

// ============================================================================
// Stacking
// ============================================================================

#[test]
fn test_stacked_wrappers_keep_metadata() {
    let f = identity()
        .with_doc("Return x.")
        .with(accepts([builtins::int()]))
        .with(returns([builtins::int()]))
        .with(requires(["x"]));

    assert_eq!(f.name(), "identity");
    assert_eq!(f.doc(), Some("Return x."));
    assert_eq!(f.signature().names(), ["x"]);
    assert_eq!(f.unwrapped().name(), "identity");
}

#[test]
fn test_outer_checks_run_first() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let inner_log = Arc::clone(&order);

    let f = Function::positional("f", ["x"], move |args| {
        if let Ok(mut log) = inner_log.lock() {
            log.push("body");
        }
        Ok(args.require(0, "x")?.clone())
    })
    .with(accepts([builtins::int()]).with_config(strict()))
    .with(requires(["x"]).with_config(strict()));

    // The outer keyword check fails before the inner type check runs.
    let err = f.call(&Args::new().arg("not an int")).unwrap_err();
    assert!(err.is_instance_of(&builtins::missing_argument_error()));

    let err = f.call(&Args::new().kwarg("x", "not an int")).unwrap_err();
    assert!(err.is_instance_of(&builtins::argument_type_error()));
    assert!(order.lock().unwrap().is_empty());
}

#[test]
fn test_throws_sees_inner_violations() {
    let f = identity()
        .with(accepts([builtins::int()]).with_config(strict()))
        .with(throws([builtins::type_error()]).with_config(strict()));
    let err = f.call(&Args::new().arg("s")).unwrap_err();
    assert!(err.is_instance_of(&builtins::argument_type_error()));

    let g = identity()
        .with(accepts([builtins::int()]).with_config(strict()))
        .with(throws([builtins::value_error()]).with_config(strict()));
    let err = g.call(&Args::new().arg("s")).unwrap_err();
    assert!(err.is_instance_of(&builtins::unexpected_failure_error()));
}

#[test]
fn test_converts_then_accepts() {
    let f = identity()
        .with(accepts([builtins::float()]).with_config(strict()))
        .with(converts([builtins::float()]));
    assert_eq!(f.call(&Args::new().arg(2)).unwrap(), Value::Float(2.0));
}

// ============================================================================
// Structural Contracts
// ============================================================================

#[test]
fn test_accepts_trait() {
    let f = identity().with(accepts([protocols::list()]).with_config(strict()));
    assert!(f.call(&Args::new().arg(Value::list([1]))).is_ok());
    assert!(f.call(&Args::new().arg(Value::Dict(vec![]))).is_err());
}

#[test]
fn test_accepts_implementation() {
    let dog = Kind::builder("Dog")
        .method("bark", Function::opaque("bark"))
        .build();
    let spec = Implementation::new(&dog)
        .with(Requirement::method("bark"))
        .with(Requirement::typed("name", builtins::str_()));

    let f = identity().with(accepts([spec]).with_config(strict()));
    assert!(f
        .call(&Args::new().arg(Object::new(&dog).with_field("name", "Rex")))
        .is_ok());
    assert!(f.call(&Args::new().arg(Object::new(&dog))).is_err());
}

#[test]
fn test_rejects_any_of() {
    let f = identity().with(
        rejects([Predicate::any_of([builtins::str_(), builtins::bool_()])]).with_config(strict()),
    );
    assert!(f.call(&Args::new().arg(1)).is_ok());
    assert!(f.call(&Args::new().arg(true)).is_err());
}

#[test]
fn test_nested_trait_field() {
    let point = Trait::new("Point")
        .field("x", builtins::int())
        .field("y", builtins::int());
    let kind = Kind::new("P");
    let f = identity().with(accepts([point]).with_config(strict()));

    assert!(f
        .call(&Args::new().arg(Object::new(&kind).with_field("x", 1).with_field("y", 2)))
        .is_ok());
    assert!(f
        .call(&Args::new().arg(Object::new(&kind).with_field("x", 1).with_field("y", "2")))
        .is_err());
}

#[test]
fn test_implements_and_keyword_sets() {
    let f = Function::positional("f", ["a", "b"], |_| Ok(Value::None))
        .with(implements(["copy"]).with_config(strict()))
        .with(exposes(["b"]).with_config(strict()))
        .with(disallows(["a"]).with_config(strict()));

    assert!(f.call(&Args::new().arg(Value::list([1])).kwarg("b", Value::list([2]))).is_ok());
    assert!(f.call(&Args::new().kwarg("a", Value::list([1]))).is_err());
    assert!(f.call(&Args::new().arg(1)).is_err());
}

// ============================================================================
// Enforcement Modes
// ============================================================================

#[derive(Clone, Default)]
struct Recorder {
    violations: Arc<AtomicUsize>,
    returns: Arc<AtomicUsize>,
}

impl ContractHook for Recorder {
    fn on_violation(&self, _function: &str, _error: &Error) {
        self.violations.fetch_add(1, Ordering::SeqCst);
    }

    fn on_return(&self, _function: &str, _value: &Value) {
        self.returns.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_warn_reports_and_calls_through() {
    let recorder = Recorder::default();
    let f = increment()
        .with(returns([builtins::int()]).with_config(warn()).with_hook(recorder.clone()))
        .with(accepts([builtins::int()]).with_config(warn()).with_hook(recorder.clone()));

    assert_eq!(f.call(&Args::new().arg(1.5)).unwrap(), Value::Float(2.5));
    assert_eq!(recorder.violations.load(Ordering::SeqCst), 2);
    assert_eq!(recorder.returns.load(Ordering::SeqCst), 1);
}

#[test]
fn test_only_returns_reports_results() {
    let recorder = Recorder::default();
    let unchecked = identity()
        .with(accepts([builtins::int()]).with_config(strict()).with_hook(recorder.clone()))
        .with(requires(["x"]).with_config(strict()).with_hook(recorder.clone()));
    assert!(unchecked.call(&Args::new().kwarg("x", 1)).is_ok());
    assert_eq!(recorder.returns.load(Ordering::SeqCst), 0);

    let checked = identity().with(returns([builtins::int()]).with_config(strict()).with_hook(recorder.clone()));
    assert!(checked.call(&Args::new().arg(1)).is_ok());
    assert_eq!(recorder.returns.load(Ordering::SeqCst), 1);

    let skipped = identity().with(
        returns([builtins::int()])
            .with_config(ContractConfig {
                enforcement: Enforcement::Strict,
                check_returns: false,
            })
            .with_hook(recorder.clone()),
    );
    assert!(skipped.call(&Args::new().arg(1)).is_ok());
    assert_eq!(recorder.returns.load(Ordering::SeqCst), 1);
}

#[test]
fn test_strict_reports_once() {
    let recorder = Recorder::default();
    let f = identity().with(accepts([builtins::int()]).with_config(strict()).with_hook(recorder.clone()));

    assert!(f.call(&Args::new().arg("s")).is_err());
    assert_eq!(recorder.violations.load(Ordering::SeqCst), 1);
}

#[test]
fn test_off_skips_everything() {
    let off = ContractConfig {
        enforcement: Enforcement::Off,
        check_returns: true,
    };
    let recorder = Recorder::default();
    let f = increment()
        .with(returns([builtins::str_()]).with_config(off.clone()).with_hook(recorder.clone()))
        .with(accepts([builtins::str_()]).with_config(off).with_hook(recorder.clone()));

    assert_eq!(f.call(&Args::new().arg(1)).unwrap(), Value::Int(2));
    assert_eq!(recorder.violations.load(Ordering::SeqCst), 0);
}

#[test]
fn test_config_from_json() {
    let config = ContractConfig::from_json(r#"{"enforcement": "warn", "check_returns": false}"#)
        .unwrap();
    let f = increment().with(returns([builtins::str_()]).with_config(config));
    assert_eq!(f.call(&Args::new().arg(1)).unwrap(), Value::Int(2));
}
