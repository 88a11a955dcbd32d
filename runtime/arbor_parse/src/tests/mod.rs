//! Driver tests.
//!
//! All of these run against the hand-encoded fixture language in
//! [`fixtures`]: `S → a b c | a ERROR c`, with whitespace extras.

mod fixtures;
mod props;
