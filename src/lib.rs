//! # Introduction
//!
//! Vixie is a small shading language. This crate is its front end: it turns
//! shader source into tokens and then into an expression tree, and ships a
//! terminal viewer that shows the source, the token stream and the parsed
//! tree side by side, built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Pretty printer / TUI
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds the AST with a Pratt
//!    parser. Lexing is lazy: the parser pulls one token at a time.
//! 2. [`logger`]: stderr backend for the `log` records the parser emits.
//! 3. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Quick start
//!
//! ```
//! use vixie::parser::parse::parse;
//! use vixie::parser::pretty::pretty_print;
//!
//! let program = parse("var float x = 1.0 + 2.0;").unwrap();
//! assert!(pretty_print(&program).starts_with("Program"));
//! ```

pub mod logger;
pub mod parser;
pub mod ui;
