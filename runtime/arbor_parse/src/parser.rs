//! The parse driver: the lex/shift/reduce loop, extras, error recovery,
//! incremental restart, and root finalization.

use std::sync::Arc;

use arbor_language::{Language, LexContext, LexState, ParseAction, StateId};
use arbor_text::{InputEdit, Length};
use arbor_tree::{Symbol, Tree};

use crate::{Input, Lexer, ParseError, Stack};

macro_rules! debug_parse {
    ($run:expr, $($arg:tt)*) => {
        if $run.debug {
            tracing::debug!(target: "arbor::parse", $($arg)*);
        }
    };
}

/// An incremental parser for one language.
///
/// The parser owns its stack across calls. After a successful parse the
/// stack holds the finished root; the next call's edit description tells
/// [`breakdown`](Parser::parse) how much of that run to reuse. Dropping
/// the parser releases the stack's shares; trees handed out by `parse`
/// stay alive as long as the caller holds them.
pub struct Parser {
    language: Arc<Language>,
    stack: Stack,
    debug: bool,
}

impl Parser {
    /// Create a parser with an empty stack and the debug channel off.
    pub fn new(language: Arc<Language>) -> Self {
        Parser {
            language,
            stack: Stack::new(),
            debug: false,
        }
    }

    /// The language this parser was constructed with.
    pub fn language(&self) -> &Arc<Language> {
        &self.language
    }

    /// Toggle the `arbor::parse` tracing channel.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Parse `input`, reusing the previous run's stack up to the point
    /// `edit` disturbed. With no edit the previous run is discarded and
    /// the input parsed from scratch.
    ///
    /// Always returns a tree covering the full input; syntax errors
    /// come back in-band as `ERROR` nodes. The only `Err` is a defect in
    /// the language table itself.
    pub fn parse(
        &mut self,
        input: &mut dyn Input,
        edit: Option<&InputEdit>,
    ) -> Result<Tree, ParseError> {
        let language = Arc::clone(&self.language);
        let mut run = ParseRun {
            language: &language,
            stack: &mut self.stack,
            lexer: Lexer::new(input, &language),
            lookahead: None,
            next_lookahead: None,
            debug: self.debug,
        };
        let position = run.breakdown_stack(edit);
        run.lexer.reset(position);
        run.run()
    }
}

/// State for a single `parse` call. The lookahead registers live here so
/// that leaving the call releases them while the stack persists.
struct ParseRun<'a> {
    language: &'a Language,
    stack: &'a mut Stack,
    lexer: Lexer<'a>,
    lookahead: Option<Tree>,
    next_lookahead: Option<Tree>,
    debug: bool,
}

impl ParseRun<'_> {
    /// Reuse the longest valid prefix of the previous run's stack that
    /// ends at or before the edit, and return the position lexing should
    /// resume from.
    ///
    /// Tokens are indivisible, so a token whose extent lies entirely
    /// before the edit is kept whole. Interior nodes are unwound one
    /// child level at a time until the first child that straddles or
    /// follows the edit; the unchanged left siblings go back on the
    /// stack as if they had just been shifted. Extras re-push with the
    /// retained state, since their action is not a shift.
    fn breakdown_stack(&mut self, edit: Option<&InputEdit>) -> Length {
        let Some(edit) = edit else {
            self.stack.shrink(0);
            return Length::ZERO;
        };

        let mut position = self.stack.right_position();
        loop {
            let Some(node) = self.stack.top_node().cloned() else {
                break;
            };
            if node.child_count() == 0 && position.chars as usize <= edit.position {
                break;
            }

            debug_parse!(self, "POP {}", self.language.display_name(node.symbol()));
            self.stack.shrink(self.stack.len() - 1);
            position = position - node.total_size();

            for child in node.children() {
                if position.chars as usize >= edit.position {
                    break;
                }
                let state = self.stack.top_state();
                let next_state = match self.language.action_for(state, child.symbol()) {
                    Some(ParseAction::Shift { state: next }) => next,
                    _ => state,
                };
                debug_parse!(
                    self,
                    "PUT BACK {}",
                    self.language.display_name(child.symbol())
                );
                self.stack.push(next_state, child.clone());
                position = position + child.total_size();
            }
        }

        debug_parse!(self, "RESUME {}", position.chars);
        position
    }

    /// The main loop: lex when there is no lookahead, then dispatch on
    /// the table's action for (state, lookahead symbol).
    fn run(mut self) -> Result<Tree, ParseError> {
        loop {
            let state = self.stack.top_state();
            let lookahead = match self.lookahead.take() {
                Some(node) => node,
                None => {
                    let lex_state = self
                        .language
                        .lex_state_for(state)
                        .ok_or_else(|| ParseError::missing_lex_state(state))?;
                    self.lexer.lex(lex_state)
                }
            };
            let symbol = lookahead.symbol();
            debug_parse!(self, "LOOKAHEAD {}", self.language.display_name(symbol));

            let action = self
                .language
                .action_for(state, symbol)
                .ok_or_else(|| ParseError::malformed_table(state, symbol))?;
            self.lookahead = Some(lookahead);

            match action {
                ParseAction::Shift { state: next_state } => {
                    if symbol == Symbol::ERROR {
                        if !self.handle_error() {
                            return Ok(self.finalize());
                        }
                    } else {
                        debug_parse!(self, "SHIFT {next_state}");
                        self.shift(next_state);
                    }
                }
                ParseAction::ShiftExtra => {
                    debug_parse!(self, "SHIFT EXTRA");
                    self.shift_extra();
                }
                ParseAction::Reduce {
                    symbol: reduced,
                    child_count,
                } => {
                    debug_parse!(
                        self,
                        "REDUCE {} {}",
                        self.language.display_name(reduced),
                        child_count
                    );
                    self.reduce(reduced, child_count as usize);
                }
                ParseAction::ReduceExtra { symbol: reduced } => {
                    debug_parse!(self, "REDUCE EXTRA");
                    self.reduce_extra(reduced);
                }
                ParseAction::Accept => {
                    debug_parse!(self, "ACCEPT");
                    return Ok(self.finalize());
                }
                ParseAction::Error => {
                    debug_parse!(self, "ERROR");
                    if !self.handle_error() {
                        return Ok(self.finalize());
                    }
                }
            }
        }
    }

    /// Push the lookahead. Extras push at the current top state (they
    /// are invisible to the automaton), and the parked token, if any,
    /// becomes the next lookahead.
    fn shift(&mut self, state: StateId) {
        if let Some(node) = self.lookahead.take() {
            let state = if node.is_extra() {
                self.stack.top_state()
            } else {
                state
            };
            self.stack.push(state, node);
        }
        self.lookahead = self.next_lookahead.take();
    }

    /// Mark the lookahead extra and shift it; the dummy target state is
    /// never used because extras keep the top state.
    fn shift_extra(&mut self) {
        if let Some(node) = self.lookahead.take() {
            self.lookahead = Some(node.into_extra());
        }
        self.shift(StateId::ZERO);
    }

    /// Build a `symbol` node from the top `child_count` grammar-visible
    /// entries. Extras interleaved with them are absorbed into the new
    /// node but do not count. The triggering lookahead is parked so the
    /// next iteration consumes it without re-lexing.
    fn reduce(&mut self, symbol: Symbol, child_count: usize) -> Tree {
        self.next_lookahead = self.lookahead.take();

        let mut count = child_count.min(self.stack.len());
        let mut depth = 0;
        while depth < count {
            if count == self.stack.len() {
                break;
            }
            if self.stack.node_from_top(depth).is_some_and(Tree::is_extra) {
                count += 1;
            }
            depth += 1;
        }

        let children = self.stack.split_off(self.stack.len() - count);
        let node = Tree::interior(symbol, children, self.language.symbol_is_hidden(symbol));
        self.lookahead = Some(node.clone());
        node
    }

    /// Single-child reduction whose result is marked extra.
    fn reduce_extra(&mut self, symbol: Symbol) {
        let node = self.reduce(symbol, 1);
        self.lookahead = Some(node.into_extra());
    }

    /// Recover from a syntax error.
    ///
    /// On success the stack ends in a state from which the current
    /// lookahead is acceptable, with an `ERROR` node spanning exactly
    /// the skipped input shifted on top. Returns `false` when input ran
    /// out first; the error node then sits at state zero for
    /// finalization to wrap.
    fn handle_error(&mut self) -> bool {
        let Some(error) = self.lookahead.clone() else {
            return false;
        };

        loop {
            // Unwind the parse stack until a state is found in which an
            // error is expected and the current lookahead token is
            // expected afterwards.
            let lookahead_symbol = self.lookahead.as_ref().map_or(Symbol::ERROR, Tree::symbol);
            let mut recovery = None;
            for (index, entry) in self.stack.iter_from_top() {
                let Some(ParseAction::Shift { state: error_state }) =
                    self.language.action_for(entry.state, Symbol::ERROR)
                else {
                    continue;
                };
                match self.language.action_for(error_state, lookahead_symbol) {
                    Some(ParseAction::Error) | None => {}
                    Some(_) => {
                        recovery = Some((index, error_state));
                        break;
                    }
                }
            }

            if let Some((index, error_state)) = recovery {
                debug_parse!(self, "RECOVER {error_state}");
                self.stack.shrink(index + 1);
                // Padding is meaningless on a token that follows skipped
                // input.
                if let Some(node) = self.lookahead.take() {
                    self.lookahead = Some(node.with_padding(Length::ZERO));
                }
                let error = self.resize_error(&error);
                self.stack.push(error_state, error);
                return true;
            }

            // No state in the stack can recover with this lookahead.
            // Move on to the next token; if the lexer is stuck, skip one
            // character; if input is exhausted, give up.
            debug_parse!(self, "LEX AGAIN");
            let previous_position = self.lexer.current_position();
            self.lookahead = Some(self.lexer.lex(LexState::ERROR));
            if self.lexer.current_position() == previous_position && !self.lexer.advance() {
                debug_parse!(self, "FAIL TO RECOVER");
                let error = self.resize_error(&error);
                self.stack.push(StateId::ZERO, error);
                return false;
            }
        }
    }

    /// Rebuild the retained error node so it spans exactly the skipped
    /// input: from the stack's right edge, past the error's own padding,
    /// up to the start of the token lexing stopped at.
    fn resize_error(&self, error: &Tree) -> Tree {
        let size =
            self.lexer.token_start_position() - self.stack.right_position() - error.padding();
        Tree::leaf(
            Symbol::ERROR,
            error.padding(),
            size,
            self.language.symbol_is_hidden(Symbol::ERROR),
        )
    }

    /// Collapse the remaining stack into the root document node and
    /// leave it as the sole entry at state zero.
    fn finalize(&mut self) -> Tree {
        if self.stack.is_empty() {
            self.stack.push(
                StateId::ZERO,
                Tree::leaf(
                    Symbol::ERROR,
                    Length::ZERO,
                    Length::ZERO,
                    self.language.symbol_is_hidden(Symbol::ERROR),
                ),
            );
        }
        let root = self.reduce(Symbol::DOCUMENT, self.stack.len());
        self.shift(StateId::ZERO);
        root
    }
}
