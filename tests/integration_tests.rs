use lumen::error::Error;
use lumen::pipeline::Pipeline;

const PROGRAM: &str = r#"
module Main
    infixl 6 +
    infixr 0 $

    (+) :: Int -> Int -> Int;
    (+) = Add;

    f $ x = f x;

    ($) :: (a -> b) -> a -> b;

    module Numbers
        double :: Int -> Int;
        double n = n + n;

        answer :: Int;
        answer = double $ 20 + 1;
    ;

    import Numbers

    compose :: (b -> c) -> (a -> b) -> a -> c;
    compose f g x = f (g x);

    quadruple :: Int -> Int;
    quadruple = compose double double;

    main :: Int;
    main = quadruple answer;
;
"#;

#[test]
fn full_program() {
    let pipeline = Pipeline::default();
    assert_eq!(pipeline.run(PROGRAM, "Main.main").unwrap(), "168");
    assert_eq!(pipeline.run(PROGRAM, "Main.Numbers.answer").unwrap(), "42");
}

#[test]
fn every_stage_accepts_the_program() {
    let pipeline = Pipeline::default();
    assert!(!pipeline.tokens(PROGRAM).unwrap().is_empty());
    let parsed = pipeline.parse(PROGRAM).unwrap();
    assert_eq!(parsed.name, "Main");
    assert!(parsed.submodule("Numbers").is_some());
    let resolved = pipeline.resolve(PROGRAM).unwrap();
    let (_, typed) = pipeline.check(PROGRAM).unwrap();
    assert_eq!(resolved.definitions().len(), typed.definitions().len());
}

#[test]
fn errors_name_their_stage() {
    let pipeline = Pipeline::default();

    let lex = pipeline.run("module Main main = \"open;", "Main.main");
    assert!(matches!(lex, Err(Error::Lex(_))));

    let parse = pipeline.run("module Main main = 1;", "Main.main");
    assert!(matches!(parse, Err(Error::Parse(_))));

    let scope = pipeline.run("module Main main :: Int; main = nothing; ;", "Main.main");
    assert!(matches!(scope, Err(Error::Scope(_))));

    let types = pipeline.run("module Main main = 1; ;", "Main.main");
    match types {
        Err(error @ Error::Type(_)) => {
            assert!(error.to_string().starts_with("Type error:"), "{error}")
        }
        other => panic!("expected a type error, got {other:?}"),
    }

    let eval = pipeline.run("module Main main :: Int; main = 1; ;", "Main.missing");
    assert!(matches!(eval, Err(Error::Eval(_))));
}

#[test]
fn operators_are_user_defined() {
    let pipeline = Pipeline::default();
    let source = "module Main main :: Int; main = 1 + 2; ;";
    assert!(matches!(pipeline.run(source, "Main.main"), Err(Error::Parse(_))));
}

#[test]
fn resolved_module_prints() {
    let pipeline = Pipeline::default();
    let resolved = pipeline.resolve("module Main main :: Int; main = Add 1 2; ;").unwrap();
    let printed = resolved.to_string();
    assert!(printed.contains("Main.main :: Int;"), "{printed}");
    assert!(printed.contains("Main.main = Add 1 2;"), "{printed}");
}
