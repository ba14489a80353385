//! Vixie source code front end
//!
//! This module transforms Vixie shader source text into an Abstract Syntax
//! Tree (AST):
//! - [`consumer`]: single-item lookahead buffers over any sequence, and the
//!   line/column tracking character reader
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`operator`]: precedence levels and fixity of every operator
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`error`]: the syntax errors shared by lexer and parser
//! - [`pretty`]: tree rendering of a parsed program
//!
//! # Language
//!
//! - Types: `int`, `mat4x4`, `float`, `float2`, `float3`, `float4`
//! - Pipeline values: `@uniform`, `@input`, `@varying`
//! - Statements: `ret`, `if`/`elif`/`else`, `while`
//! - Expressions: arithmetic, bitwise, comparison, logical, assignment,
//!   member and index access, function calls
//!
//! # Parser Implementation
//!
//! Hand-written Pratt parser pulling tokens lazily from the lexer.
//! No external parser generator dependencies.

pub mod ast;
pub mod consumer;
mod declarations;
pub mod error;
mod expressions;
pub mod lexer;
pub mod operator;
pub mod parse;
pub mod pretty;
mod statements;
