//! Language tables for the arbor parse runtime.
//!
//! A [`Language`] is the precomputed, read-only description a parser is
//! constructed with: a dense action table indexed by (parse state,
//! symbol), a lex-state hint per parse state, per-symbol metadata, and
//! the lex function that turns characters into tokens. Tables are emitted
//! by a generator (out of scope here) or assembled by hand through
//! [`LanguageBuilder`].

mod action;
mod language;

pub use action::{LexState, ParseAction, StateId};
pub use language::{Language, LanguageBuilder, LanguageError, LexContext, LexFn};
