use std::cell::Cell;
use std::rc::Rc;

use lumen::ast::Binder;
use lumen::error::Error;
use lumen::interpreter::{EvalError, Primops, PrimopsBuilder, Value, ValueKind, evaluate};
use lumen::pipeline::Pipeline;
use lumen::prelude::{INT, Prelude};

fn run(source: &str) -> Result<String, Error> {
    Pipeline::default().run(source, "Main.main")
}

fn eval_error(result: Result<String, Error>) -> EvalError {
    match result {
        Err(Error::Eval(error)) => error,
        other => panic!("expected an evaluation error, got {other:?}"),
    }
}

/// A pipeline with an extra `Tick : Int -> Int` primitive that counts how
/// often it runs.
fn counting_pipeline() -> (Pipeline, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    let primops = PrimopsBuilder::standard()
        .register("Tick", &[ValueKind::Int], move |arguments| {
            counter.set(counter.get() + 1);
            Ok(arguments[0].clone())
        })
        .build()
        .unwrap();

    let base = Prelude::standard();
    let int = base.constructor(INT);
    let tick = base.function_type(int.clone(), int);
    let prelude = base.with_value("Tick", tick);

    (Pipeline::new(prelude, primops), count)
}

#[test]
fn eval_addition() {
    assert_eq!(run("module Main main :: Int; main = Add 1 2; ;").unwrap(), "3");
}

#[test]
fn eval_argument_is_shared() {
    let source = r"module Main main :: Int; main = (\x -> Add x x) (Add 1 2); ;";
    assert_eq!(run(source).unwrap(), "6");
}

#[test]
fn eval_argument_is_evaluated_once() {
    let (pipeline, count) = counting_pipeline();
    let source = r"module Main main :: Int; main = (\x -> Add x x) (Tick 3); ;";
    assert_eq!(pipeline.run(source, "Main.main").unwrap(), "6");
    assert_eq!(count.get(), 1);
}

#[test]
fn eval_global_is_evaluated_once() {
    let (pipeline, count) = counting_pipeline();
    let source = r#"
        module Main
            shared :: Int;
            shared = Tick 5;
            main :: Int;
            main = Add shared (Add shared shared);
        ;
    "#;
    assert_eq!(pipeline.run(source, "Main.main").unwrap(), "15");
    assert_eq!(count.get(), 1);
}

#[test]
fn eval_unused_argument_is_never_forced() {
    let (pipeline, count) = counting_pipeline();
    let source = r"module Main main :: Int; main = (\x -> 1) (Tick 2); ;";
    assert_eq!(pipeline.run(source, "Main.main").unwrap(), "1");
    assert_eq!(count.get(), 0);
}

#[test]
fn eval_raw_module_skips_resolution() {
    let source = r"module Main main = (\x -> 1) undefinedThing; ;";
    assert_eq!(Pipeline::default().run_raw(source, "main").unwrap(), "1");
    assert!(matches!(run(source), Err(Error::Scope(_))));
}

#[test]
fn eval_operator_sections() {
    let source = |body: &str| {
        format!(
            "module Main infixl 6 + (+) :: Int -> Int -> Int; (+) = Add; main :: Int; main = {body}; ;"
        )
    };
    assert_eq!(run(&source("(+ 1) 2")).unwrap(), "3");
    assert_eq!(run(&source("(1 +) 2")).unwrap(), "3");
    assert_eq!(run(&source("1 + 2 + 3")).unwrap(), "6");
}

#[test]
fn eval_polymorphic_functions() {
    let source = r#"
        module Main
            twice :: (a -> a) -> a -> a;
            twice f x = f (f x);
            inc :: Int -> Int;
            inc = Add 1;
            main :: Int;
            main = twice inc 1;
        ;
    "#;
    assert_eq!(run(source).unwrap(), "3");
}

#[test]
fn eval_float_and_string_results() {
    let pipeline = Pipeline::default();
    assert_eq!(
        pipeline.run_raw("module Main main = Add 1.5 2.25; ;", "main").unwrap(),
        "3.75"
    );
    assert_eq!(
        run(r#"module Main main :: String; main = "hi\n"; ;"#).unwrap(),
        "\"hi\\n\""
    );
}

#[test]
fn eval_function_result() {
    let source = "module Main main :: Int -> Int; main = Add 1; ;";
    assert_eq!(run(source).unwrap(), "<function>");
}

#[test]
fn eval_nested_module_entry() {
    let source = "module Main module Inner value :: Int; value = 4; ; ;";
    let result = Pipeline::default().run(source, "Main.Inner.value");
    assert_eq!(result.unwrap(), "4");
}

#[test]
fn eval_self_reference_is_an_infinite_loop() {
    let error = eval_error(run("module Main main :: Int; main = main; ;"));
    assert_eq!(error, EvalError::InfiniteLoop);
}

#[test]
fn eval_entry_point_not_found() {
    let error = eval_error(Pipeline::default().run("module Main other :: Int; other = 1; ;", "Main.main"));
    assert_eq!(error, EvalError::EntryPointNotFound);
}

#[test]
fn eval_ambiguous_entry_point() {
    let pipeline = Pipeline::default();
    let module = pipeline
        .resolve("module Main main = 1; module Inner main = 2; ; ;")
        .unwrap();
    let primops = Primops::standard();
    let result = evaluate(&module, &primops, |binder| binder.local_name() == "main");
    assert!(matches!(
        result,
        Err(EvalError::AmbiguousEntryPoint { ref candidates }) if candidates.len() == 2
    ));
}

#[test]
fn eval_integer_overflow() {
    let source = "module Main main = Add 9223372036854775807 1; ;";
    let error = eval_error(Pipeline::default().run_raw(source, "main"));
    assert!(matches!(error, EvalError::IntegerOverflow { .. }));
}

#[test]
fn eval_value_borrows_module() {
    let pipeline = Pipeline::default();
    let module = pipeline.resolve("module Main main = Add 20 22; ;").unwrap();
    let value = evaluate(&module, &pipeline.primops, |binder| binder.to_string() == "Main.main").unwrap();
    assert!(matches!(value, Value::Int(42)));
}
