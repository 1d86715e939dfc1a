//! Contracts Tour
//!
//! Run with: cargo run -p pledge --example contracts_tour
//!
//! Set `RUST_LOG=pledge=trace` to see every check, and
//! `PLEDGE_ENFORCEMENT=warn` to let violating calls through.
//!
//! This example walks through:
//! - Argument, return and keyword contracts
//! - Traits and the standard trait registry
//! - Declared failures
//! - Single dispatch

use pledge::{
    accepts, converts, requires, returns, single_dispatch, throws, ContractExt, Returns,
};
use pledge_core::{builtins, Args, Error, Function, Kind, Object, TraitRegistry, Value};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    println!("=== Pledge: Runtime Contracts ===\n");

    // -------------------------------------------------------------------------
    // 1. Argument and Return Contracts
    // -------------------------------------------------------------------------
    println!("1. Argument and Return Contracts");
    println!("--------------------------------\n");

    let increment = Function::positional("increment", ["x"], |args| match args.require(0, "x")? {
        Value::Int(i) => Ok(Value::Int(i + 1)),
        Value::Float(x) => Ok(Value::Float(x + 1.0)),
        other => Err(Error::type_error(format!("cannot increment {}", other))),
    })
    .with_doc("Add one to a number.")
    .with(returns([builtins::int(), builtins::float()]))
    .with(accepts([builtins::int()]));

    show("increment(1)", increment.call(&Args::new().arg(1)));
    show("increment(x=41)", increment.call(&Args::new().kwarg("x", 41)));
    show("increment(1.5)", increment.call(&Args::new().arg(1.5)));

    let pair = Function::native("pair", |_| Ok(Value::tuple([Value::Int(1), Value::Bool(false)])))
        .with(Returns::tuple([builtins::int(), builtins::bool_()]));
    show("pair()", pair.call(&Args::new()));

    // -------------------------------------------------------------------------
    // 2. Keyword Contracts and Conversion
    // -------------------------------------------------------------------------
    println!("\n2. Keyword Contracts and Conversion");
    println!("-----------------------------------\n");

    let ratio = Function::positional("ratio", ["x", "y"], |args| {
        match (args.require(0, "x")?, args.require(1, "y")?) {
            (Value::Float(x), Value::Float(y)) if *y != 0.0 => Ok(Value::Float(x / y)),
            _ => Err(Error::value_error("division by zero")),
        }
    })
    .with(converts([builtins::float(), builtins::float()]))
    .with(requires(["y"]));

    show("ratio(1, y=4)", ratio.call(&Args::new().arg(1).kwarg("y", 4)));
    show("ratio(1, 4)", ratio.call(&Args::new().arg(1).arg(4)));

    // -------------------------------------------------------------------------
    // 3. Traits
    // -------------------------------------------------------------------------
    println!("\n3. Traits");
    println!("---------\n");

    let mut registry = TraitRegistry::standard();
    let result = registry.define("Sized", ["List"], |t| t.method("__len__"));
    if let Err(err) = result {
        println!("could not define Sized: {}", err);
    }
    println!("Registered traits: {:?}", registry.names());

    if let Some(sized) = registry.get("Sized") {
        let length = Function::positional("length", ["items"], |args| {
            match args.require(0, "items")?.items() {
                Some(items) => Ok(Value::Int(items.len() as i64)),
                None => Ok(Value::None),
            }
        })
        .with(accepts([sized]));

        show("length([1, 2, 3])", length.call(&Args::new().arg(Value::list([1, 2, 3]))));
        show("length({})", length.call(&Args::new().arg(Value::Dict(vec![]))));
    }

    // -------------------------------------------------------------------------
    // 4. Declared Failures
    // -------------------------------------------------------------------------
    println!("\n4. Declared Failures");
    println!("--------------------\n");

    let parse = Function::positional("parse", ["text"], |args| {
        args.require(0, "text")?.convert(&builtins::int())
    })
    .with(throws([builtins::value_error()]));

    show("parse(\"12\")", parse.call(&Args::new().arg("12")));
    show("parse(\"twelve\")", parse.call(&Args::new().arg("twelve")));
    show("parse([])", parse.call(&Args::new().arg(Value::list(Vec::<Value>::new()))));

    // -------------------------------------------------------------------------
    // 5. Single Dispatch
    // -------------------------------------------------------------------------
    println!("\n5. Single Dispatch");
    println!("------------------\n");

    let shape = Kind::new("Shape");
    let describe = single_dispatch(Function::positional("describe", ["x"], |_| {
        Ok(Value::from("something"))
    }));
    describe.register(
        builtins::int(),
        Function::native("describe_int", |_| Ok(Value::from("an int"))),
    );
    describe.register(
        &shape,
        Function::native("describe_shape", |_| Ok(Value::from("a shape"))),
    );

    let f = describe.function();
    show("describe(1)", f.call(&Args::new().arg(1)));
    show("describe(Shape())", f.call(&Args::new().arg(Object::new(&shape))));
    show("describe(\"s\")", f.call(&Args::new().arg("s")));

    println!("\n=== Done ===");
}

fn show(label: &str, result: Result<Value, Error>) {
    match result {
        Ok(value) => println!("  {} = {}", label, value),
        Err(err) => println!("  {} failed: [{}] {}", label, err.kind(), err),
    }
}
