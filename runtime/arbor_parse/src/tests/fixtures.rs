//! The fixture language: `S → a b c | a ERROR c`.
//!
//! Two variants share one table. [`language`] lexes whitespace as extra
//! tokens, so spaces show up as `ws` nodes floating through the tree;
//! [`padded_language`] folds whitespace into token padding instead, so
//! the padding arithmetic gets exercised.

use std::sync::Arc;

use arbor_language::{Language, LexContext, LexFn, LexState, ParseAction};
use arbor_text::{InputEdit, Length};
use arbor_tree::{Symbol, Tree};

use crate::Parser;

pub const A: Symbol = Symbol(3);
pub const B: Symbol = Symbol(4);
pub const C: Symbol = Symbol(5);
pub const WS: Symbol = Symbol(6);
pub const S: Symbol = Symbol(7);

pub const NORMAL: LexState = LexState(1);

/// Whitespace becomes extra `ws` tokens.
fn lex_extras(lexer: &mut dyn LexContext, _state: LexState) -> Tree {
    lexer.start_token();
    match lexer.lookahead() {
        Some(' ' | '\n') => {
            lexer.advance();
            lexer.finish_token(WS)
        }
        Some('a') => {
            lexer.advance();
            lexer.finish_token(A)
        }
        Some('b') => {
            lexer.advance();
            lexer.finish_token(B)
        }
        Some('c') => {
            lexer.advance();
            lexer.finish_token(C)
        }
        Some(_) => lexer.finish_token(Symbol::ERROR),
        None => lexer.finish_token(Symbol::END),
    }
}

/// Whitespace becomes padding on the following token.
fn lex_padding(lexer: &mut dyn LexContext, _state: LexState) -> Tree {
    while matches!(lexer.lookahead(), Some(' ' | '\n')) {
        lexer.advance();
    }
    lexer.start_token();
    match lexer.lookahead() {
        Some('a') => {
            lexer.advance();
            lexer.finish_token(A)
        }
        Some('b') => {
            lexer.advance();
            lexer.finish_token(B)
        }
        Some('c') => {
            lexer.advance();
            lexer.finish_token(C)
        }
        Some(_) => lexer.finish_token(Symbol::ERROR),
        None => lexer.finish_token(Symbol::END),
    }
}

fn build_language(lex_fn: LexFn) -> Arc<Language> {
    let mut builder = Language::builder(lex_fn);
    let a = builder.symbol("a");
    let b = builder.symbol("b");
    let c = builder.symbol("c");
    let ws = builder.symbol("ws");
    let s = builder.symbol("S");
    assert_eq!((a, b, c, ws, s), (A, B, C, WS, S));

    let s0 = builder.state(NORMAL); // start
    let s1 = builder.state(NORMAL); // after `a`
    let s2 = builder.state(NORMAL); // after `a b`
    let s3 = builder.state(NORMAL); // after `a b c`
    let s4 = builder.state(NORMAL); // after `S`
    let s5 = builder.state(NORMAL); // after `a ERROR`
    let s6 = builder.state(NORMAL); // after `a ERROR c`

    for state in [s0, s1, s2, s3, s4, s5, s6] {
        builder.action(state, ws, ParseAction::ShiftExtra).unwrap();
    }

    builder
        .action(s0, a, ParseAction::Shift { state: s1 })
        .unwrap();
    builder
        .action(s0, s, ParseAction::Shift { state: s4 })
        .unwrap();
    builder
        .action(s1, b, ParseAction::Shift { state: s2 })
        .unwrap();
    builder
        .action(s1, Symbol::ERROR, ParseAction::Shift { state: s5 })
        .unwrap();
    builder
        .action(s2, c, ParseAction::Shift { state: s3 })
        .unwrap();
    builder
        .action(s5, c, ParseAction::Shift { state: s6 })
        .unwrap();
    for lookahead in [Symbol::END, Symbol::ERROR] {
        for state in [s3, s6] {
            builder
                .action(
                    state,
                    lookahead,
                    ParseAction::Reduce {
                        symbol: s,
                        child_count: 3,
                    },
                )
                .unwrap();
        }
    }
    builder.action(s4, Symbol::END, ParseAction::Accept).unwrap();

    Arc::new(builder.build().unwrap())
}

pub fn language() -> Arc<Language> {
    build_language(lex_extras)
}

pub fn padded_language() -> Arc<Language> {
    build_language(lex_padding)
}

// === Helpers ===

pub fn parse_text(parser: &mut Parser, text: &str) -> Tree {
    let mut input: &str = text;
    parser.parse(&mut input, None).unwrap()
}

pub fn reparse_text(parser: &mut Parser, text: &str, edit: InputEdit) -> Tree {
    let mut input: &str = text;
    parser.parse(&mut input, Some(&edit)).unwrap()
}

pub fn sexp(language: &Language, tree: &Tree) -> String {
    tree.to_sexp(&|symbol| language.display_name(symbol).to_string())
}

/// Assert that the tree covers `text` exactly: its cached extent matches,
/// and so does the sum of leaf paddings and sizes in left-to-right order.
pub fn assert_covers(tree: &Tree, text: &str) {
    let expected = Length::of_text(text);
    assert_eq!(tree.total_size(), expected, "cached extent mismatch");
    assert_eq!(leaf_extent(tree), expected, "leaf extent mismatch");
}

fn leaf_extent(tree: &Tree) -> Length {
    let mut sum = tree.padding() + tree.size();
    for child in tree.children() {
        sum = sum + leaf_extent(child);
    }
    sum
}
