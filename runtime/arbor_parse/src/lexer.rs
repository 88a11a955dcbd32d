//! The lexer adaptor.
//!
//! Holds the input cursor and position bookkeeping, and drives the
//! language's lex function through the [`LexContext`] protocol. The
//! driver uses it in exactly two modes: the lex state declared by the
//! current parse state, and [`LexState::ERROR`] while searching for a
//! recovery point.

use arbor_language::{Language, LexContext, LexState};
use arbor_text::Length;
use arbor_tree::{Symbol, Tree};

use crate::Input;

/// Character cursor and token assembly for one parse call.
pub struct Lexer<'a> {
    input: &'a mut dyn Input,
    language: &'a Language,
    /// Buffered copy of the chunk the cursor is inside.
    chunk: String,
    /// Byte offset of the current character within `chunk`.
    chunk_offset: usize,
    /// The character under the cursor, `None` at end of input.
    current: Option<char>,
    current_position: Length,
    token_start_position: Length,
    /// End of the previously built token; the gap up to
    /// `token_start_position` becomes the next token's padding.
    token_end_position: Length,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a mut dyn Input, language: &'a Language) -> Self {
        Lexer {
            input,
            language,
            chunk: String::new(),
            chunk_offset: 0,
            current: None,
            current_position: Length::ZERO,
            token_start_position: Length::ZERO,
            token_end_position: Length::ZERO,
        }
    }

    /// Rewind the cursor to `position` and forget any buffered text.
    pub fn reset(&mut self, position: Length) {
        self.current_position = position;
        self.token_start_position = position;
        self.token_end_position = position;
        self.chunk.clear();
        self.chunk_offset = 0;
        self.current = None;
        self.fill();
    }

    /// Run the language's lex function in the given lex state.
    pub fn lex(&mut self, lex_state: LexState) -> Tree {
        (self.language.lex_fn())(self, lex_state)
    }

    /// Position of the cursor.
    #[inline]
    pub fn current_position(&self) -> Length {
        self.current_position
    }

    /// Position where the most recent token's text began.
    #[inline]
    pub fn token_start_position(&self) -> Length {
        self.token_start_position
    }

    fn fill(&mut self) {
        if self.current.is_some() {
            return;
        }
        if self.chunk_offset >= self.chunk.len() {
            let chunk = self.input.read(self.current_position);
            if chunk.is_empty() {
                return;
            }
            self.chunk.clear();
            self.chunk.push_str(chunk);
            self.chunk_offset = 0;
        }
        self.current = self.chunk[self.chunk_offset..].chars().next();
    }
}

impl LexContext for Lexer<'_> {
    #[inline]
    fn lookahead(&self) -> Option<char> {
        self.current
    }

    fn advance(&mut self) -> bool {
        let Some(ch) = self.current else {
            return false;
        };
        self.chunk_offset += ch.len_utf8();
        self.current_position += Length::of_char(ch);
        self.current = None;
        self.fill();
        true
    }

    fn start_token(&mut self) {
        self.token_start_position = self.current_position;
    }

    fn finish_token(&mut self, symbol: Symbol) -> Tree {
        let padding = self.token_start_position - self.token_end_position;
        let size = self.current_position - self.token_start_position;
        self.token_end_position = self.current_position;
        Tree::leaf(symbol, padding, size, self.language.symbol_is_hidden(symbol))
    }
}
