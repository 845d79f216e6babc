//! # Infixtree
//!
//! Build an expression tree from a single-digit infix arithmetic expression like `1 + 2 * 3`, and
//! print it back out with an in-order traversal.
//!
//! ```
//! let tree = infixtree::build("1 + 2 * 3").unwrap();
//! assert_eq!(tree.to_string(), "(+ 1 (* 2 3))");
//! assert_eq!(infixtree::render(&tree), "1+2*3");
//! ```
//!
//! Operands are single digits, and operators are `+ - * /`. Every other character is ignored.
//! There are no parentheses.
//!
//! ## Precedence
//!
//! Precedence is a four-level order, from tightest to loosest: `*`, `/`, `+`, `-`. This differs
//! from ordinary arithmetic, where `*` and `/` tie, as do `+` and `-`. Operators of equal
//! precedence group to the right, so `1 - 2 + 3` is `(- 1 (+ 2 3))` and `1 + 2 + 3` is
//! `(+ 1 (+ 2 3))`.
//!
//! The in-order traversal of the tree always reproduces the input's digits and operators in their
//! original order, so precedence is only visible in the shape of the tree. Inspect it with
//! [`Node`]'s accessors or its s-expression `Display`.

mod lexer;
mod node;
mod op;
mod parse_error;
mod parser;
mod shunter;
mod source;
mod traversal;

use std::io;
use std::sync::OnceLock;
use thiserror::Error;

pub use lexer::LexerError;
pub use node::Node;
pub use op::{Operator, Prec};
pub use parse_error::{ParseError, ParseErrorCause};
pub use parser::Parser;
pub use source::Source;
pub use traversal::{print_in_order, render, InOrder};

/// The inputs run by `infixtree --demo`.
pub const DEMO_EXPRESSIONS: [&str; 3] = ["1 + 2 + 3", "1 + 2 * 3", "1 * 2 + 3"];

/// Any failure of [`build`] or [`build_and_print`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The parser used by [`build`], compiled on first use.
fn default_parser() -> Result<&'static Parser, LexerError> {
    static PARSER: OnceLock<Result<Parser, LexerError>> = OnceLock::new();
    PARSER.get_or_init(Parser::new).as_ref().map_err(Clone::clone)
}

/// Build the expression tree for `expression`.
pub fn build(expression: &str) -> Result<Node, Error> {
    let parser = default_parser()?;
    let source = Source::new("expression", expression.to_owned());
    Ok(parser.parse(&source)?)
}

/// Build the expression tree for `expression`, and print its in-order traversal to stdout.
pub fn build_and_print(expression: &str) -> Result<(), Error> {
    let tree = build(expression)?;
    print_in_order(&tree, &mut io::stdout().lock())?;
    Ok(())
}

pub mod implementation {
    pub mod lexer {
        pub use crate::lexer::*;
    }
}

#[test]
fn test_default_parser_is_compiled_once() {
    let first = default_parser().unwrap();
    let second = default_parser().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(render(&build("1 + 2").unwrap()), "1+2");
}
