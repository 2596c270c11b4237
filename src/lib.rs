//! # Lumen - A Small Lazily Evaluated Functional Language
//!
//! Lumen is a statically typed functional language with Hindley-Milner type
//! inference and call-by-need evaluation. This crate holds the complete
//! front end and a reference interpreter.
//!
//! ## Architecture Overview
//!
//! The pipeline consists of the following stages:
//!
//! 1. **Lexer** (`lexer`) - Tokenizes source code into terminals using the `lachs` library
//! 2. **Parser** (`parser`) - Builds the module tree with combinators and precedence climbing
//! 3. **Name Resolution** (`semantic`) - Replaces every name with a unique binder
//! 4. **Type Checking** (`types`) - Assigns types to binders and runs Hindley-Milner inference
//! 5. **Interpreter** (`interpreter`) - Evaluates a definition lazily, sharing every result
//!
//! ## Pipeline Flow
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → Terminals (Vec<lexer::Terminal>)
//!     ↓
//! [Parser] → Module<RawBinder>
//!     ↓
//! [Name Resolution] → Module<UniqueBinder>
//!     ↓
//! [Type Checker] → Module<TypedBinder, UniqueBinder>
//!     ↓
//! [Interpreter] → Runtime Value (interpreter::Value)
//! ```
//!
//! ## Key Design Decisions
//!
//! ### One AST, Many Binders
//! Every stage uses the same [`ast::Expr`] and [`ast::Module`] types. Only
//! the binder changes: raw text after parsing, a unique identity after
//! resolution, and a name paired with its type after type checking.
//!
//! ### Types Are Expressions
//! A type is an expression over unique binders. `a -> b` is the `->`
//! constructor applied to two arguments and a quantified type is a
//! type-level lambda. Unification works on this representation directly.
//!
//! ### User-Defined Operators
//! There are no built-in operators apart from the type arrow. Modules
//! declare operators with `infixl`/`infixr` and define them like any other
//! function:
//!
//! ```text
//! module Main
//!     infixl 6 +
//!     (+) :: Int -> Int -> Int;
//!     (+) = Add;
//!     main :: Int;
//!     main = 1 + 2;
//! ;
//! ```
//!
//! ### Explicit Builtins
//! Builtin types and values live in a [`prelude::Prelude`], primitive
//! operations in an [`interpreter::Primops`] table. Both are plain values
//! handed to the stages that need them.
//!
//! ## Module Structure
//!
//! - [`ast`] - Expression and module trees, binder kinds
//! - [`lexer`] - Tokenization using lachs
//! - [`parser`] - Parsing using combinators and precedence climbing
//! - [`semantic`] - Name resolution
//! - [`types`] - Type assignment and inference
//! - [`interpreter`] - Lazy evaluation
//! - [`prelude`] - Builtin types and values
//! - [`fmt`] - Pretty-printing
//! - [`pipeline`] - Running several stages at once
//!
//! ## Getting Started
//!
//! ```no_run
//! use lumen::pipeline::Pipeline;
//!
//! let source = "module Main main :: Int; main = Add 1 2; ;";
//! let value = Pipeline::default().run(source, "Main.main")?;
//! assert_eq!(value, "3");
//! # Ok::<(), lumen::error::Error>(())
//! ```

pub mod ast;
pub mod error;
pub mod fmt;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod prelude;
pub mod semantic;
pub mod types;

pub use error::Error;
