//! Concrete syntax tree nodes for the arbor parse runtime.
//!
//! A [`Tree`] is a cheap-to-clone handle to an immutable node. The parse
//! stack, the lookahead registers, and the caller's previous parse all
//! hold shares of the same nodes; an incremental re-parse hands intact
//! subtrees back verbatim, so identity ([`Tree::same_node`]) is part of
//! the contract.

mod node;
mod symbol;

pub use node::Tree;
pub use symbol::Symbol;
