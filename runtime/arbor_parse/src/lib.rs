//! The arbor parse driver.
//!
//! An LR-style shift/reduce loop extended with three things the plain
//! automaton does not have:
//!
//! 1. **Extras**: tokens (whitespace, comments) that may appear between
//!    any two grammar-visible tokens without affecting parse states.
//! 2. **Error recovery**: on an unexpected token, the stack is rewound
//!    to a state that declared an error handler and the skipped input is
//!    materialized as an `ERROR` node, so every parse yields a tree
//!    covering the full input.
//! 3. **Incremental restart**: given the edit that invalidated a
//!    previous parse, the longest still-valid prefix of the old stack is
//!    reused and lexing resumes where it ends.
//!
//! The driver is single-threaded and non-suspending: a [`Parser::parse`]
//! call owns the parser for its duration, and repeated calls with equal
//! inputs and edits are deterministic.
//!
//! With the parser's debug flag on, every decision the loop takes is
//! emitted as a `tracing` event under the `arbor::parse` target.

mod error;
mod input;
mod lexer;
mod parser;
mod stack;

#[cfg(test)]
mod tests;

pub use error::ParseError;
pub use input::Input;
pub use lexer::Lexer;
pub use parser::Parser;
pub use stack::{Stack, StackEntry};
