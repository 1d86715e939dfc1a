//! # Dispatch Tests
//!
//! Single dispatch over nominal kinds, traits and user kinds, combined
//! with contract decorators.

use std::sync::Arc;
use std::thread;

use pledge::{accepts, single_dispatch, ContractConfig, ContractExt};
use pledge_core::capability::Trait;
use pledge_core::{builtins, protocols, Args, Function, Kind, Object, Predicate, Value};

fn constant(name: &str, value: &'static str) -> Function {
    Function::native(name, move |_| Ok(Value::from(value)))
}

fn size() -> pledge::SingleDispatch {
    single_dispatch(Function::positional("size", ["x"], |_| Ok(Value::Int(-1))))
}

#[test]
fn test_dispatch_on_kinds() {
    let d = size();
    d.register(builtins::int(), constant("int", "int"));
    d.register(Predicate::numeric(), constant("number", "number"));

    let f = d.function();
    assert_eq!(f.call(&Args::new().arg(1)).unwrap(), Value::from("int"));
    assert_eq!(f.call(&Args::new().arg(1.5)).unwrap(), Value::from("number"));
    assert_eq!(f.call(&Args::new().arg("s")).unwrap(), Value::Int(-1));
    assert_eq!(f.name(), "size");
}

#[test]
fn test_dispatch_on_traits() {
    let d = size();
    d.register(protocols::collection(), constant("collection", "collection"));
    d.register(protocols::list(), constant("list", "list"));

    assert_eq!(
        d.call(&Args::new().arg(Value::Dict(vec![]))).unwrap(),
        Value::from("collection")
    );
    assert_eq!(d.call(&Args::new().arg(Value::list([1]))).unwrap(), Value::from("list"));
}

#[test]
fn test_dispatch_on_user_kinds() {
    let animal = Kind::new("Animal");
    let dog = Kind::builder("Dog").extends(&animal).build();
    let speaker = Trait::new("Speaker").method("speak");

    let d = size();
    d.register(speaker, constant("speaker", "speaker"));
    d.register(&animal, constant("animal", "animal"));

    let loud = Kind::builder("Parrot")
        .method("speak", Function::opaque("speak"))
        .build();

    assert_eq!(d.call(&Args::new().arg(Object::new(&dog))).unwrap(), Value::from("animal"));
    assert_eq!(d.call(&Args::new().arg(Object::new(&loud))).unwrap(), Value::from("speaker"));
}

#[test]
fn test_contracts_on_dispatching_function() {
    let d = size();
    d.register(builtins::str_(), constant("str", "str"));
    let f = d
        .function()
        .with(accepts([Predicate::any_of([builtins::str_(), builtins::int()])]).with_config(ContractConfig::default()));

    assert_eq!(f.call(&Args::new().arg("s")).unwrap(), Value::from("str"));
    assert_eq!(f.call(&Args::new().arg(3)).unwrap(), Value::Int(-1));
    assert!(f.call(&Args::new().arg(1.5)).is_err());
}

#[test]
fn test_concurrent_register_and_call() {
    let d = Arc::new(size());
    let f = d.function();

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let d = Arc::clone(&d);
            thread::spawn(move || {
                let kind = Kind::new(format!("K{}", i));
                d.register(kind, constant("k", "k"));
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let f = f.clone();
            thread::spawn(move || f.call(&Args::new().arg(1)))
        })
        .collect();

    for w in writers {
        w.join().unwrap();
    }
    for r in readers {
        assert_eq!(r.join().unwrap().unwrap(), Value::Int(-1));
    }
    assert_eq!(d.len(), 4);
}
