//! The read-only language table and its builder.

use std::fmt;

use arbor_tree::{Symbol, Tree};

use crate::{LexState, ParseAction, StateId};

/// The surface a language's lex function drives.
///
/// The runtime's lexer adaptor implements this; generated lex functions
/// see only the protocol. A token is produced by optionally consuming
/// padding, calling [`start_token`](LexContext::start_token), consuming
/// the token's characters, and calling
/// [`finish_token`](LexContext::finish_token). Finishing without
/// consuming yields a zero-width token, the shape used for the
/// end-of-input token and for error tokens, whose extents are assigned
/// by recovery rather than by the lexer.
pub trait LexContext {
    /// The character under the cursor, or `None` at end of input.
    fn lookahead(&self) -> Option<char>;
    /// Consume one character. Returns `false` at end of input.
    fn advance(&mut self) -> bool;
    /// Mark the current position as the start of the next token's text;
    /// everything consumed since the previous token becomes padding.
    fn start_token(&mut self);
    /// Build the token consumed since `start_token`.
    fn finish_token(&mut self, symbol: Symbol) -> Tree;
}

/// A language's lex function: recognize one token in the given lex state.
pub type LexFn = fn(&mut dyn LexContext, LexState) -> Tree;

/// A precomputed language description.
///
/// Read-only once built. The action table is a dense row-major array
/// (`state * symbol_count + symbol`) behind
/// [`action_for`](Language::action_for), so the rest of the runtime never
/// sees the layout.
#[derive(PartialEq)]
pub struct Language {
    symbol_names: Vec<String>,
    hidden_symbols: Vec<bool>,
    actions: Vec<ParseAction>,
    lex_states: Vec<LexState>,
    lex_fn: LexFn,
}

impl Language {
    /// Start assembling a language around its lex function.
    pub fn builder(lex_fn: LexFn) -> LanguageBuilder {
        LanguageBuilder::new(lex_fn)
    }

    /// Number of declared symbols, reserved ids included.
    #[inline]
    pub fn symbol_count(&self) -> usize {
        self.symbol_names.len()
    }

    /// Number of parse states.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.lex_states.len()
    }

    /// The action for a (state, symbol) pair, or `None` if either index
    /// is out of range, the malformed-table case the driver surfaces.
    #[inline]
    pub fn action_for(&self, state: StateId, symbol: Symbol) -> Option<ParseAction> {
        if symbol.index() >= self.symbol_count() {
            return None;
        }
        self.actions
            .get(state.index() * self.symbol_count() + symbol.index())
            .copied()
    }

    /// The lex-state hint for a parse state.
    #[inline]
    pub fn lex_state_for(&self, state: StateId) -> Option<LexState> {
        self.lex_states.get(state.index()).copied()
    }

    /// The declared name of a symbol.
    pub fn symbol_name(&self, symbol: Symbol) -> Option<&str> {
        self.symbol_names.get(symbol.index()).map(String::as_str)
    }

    /// The name of a symbol, or `"?"` for ids the table never declared.
    pub fn display_name(&self, symbol: Symbol) -> &str {
        self.symbol_name(symbol).unwrap_or("?")
    }

    /// Whether a symbol's nodes are spliced away on child exposure.
    #[inline]
    pub fn symbol_is_hidden(&self, symbol: Symbol) -> bool {
        self.hidden_symbols.get(symbol.index()).copied().unwrap_or(false)
    }

    /// The language's lex function.
    #[inline]
    pub fn lex_fn(&self) -> LexFn {
        self.lex_fn
    }
}

impl fmt::Debug for Language {
    // The lex function pointer has no useful Debug form; show the table
    // shape instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("symbols", &self.symbol_names)
            .field("states", &self.lex_states.len())
            .finish_non_exhaustive()
    }
}

/// Error raised while assembling or validating a language table.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LanguageError {
    /// An action referenced a state the table never declared.
    UnknownState(StateId),
    /// An action referenced a symbol the table never declared.
    UnknownSymbol(Symbol),
    /// A shift action targets a state outside the table.
    ShiftTargetOutOfRange {
        state: StateId,
        symbol: Symbol,
        target: StateId,
    },
    /// The table declares no states at all.
    NoStates,
}

impl fmt::Display for LanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageError::UnknownState(state) => {
                write!(f, "state {state} is not declared by the table")
            }
            LanguageError::UnknownSymbol(symbol) => {
                write!(f, "symbol {symbol} is not declared by the table")
            }
            LanguageError::ShiftTargetOutOfRange {
                state,
                symbol,
                target,
            } => write!(
                f,
                "shift from state {state} on symbol {symbol} targets missing state {target}"
            ),
            LanguageError::NoStates => write!(f, "the table declares no states"),
        }
    }
}

impl std::error::Error for LanguageError {}

/// Assembles a [`Language`] by hand: declare symbols, declare states,
/// fill in actions, build.
///
/// Shift targets may reference states declared later; they are checked
/// when [`build`](LanguageBuilder::build) runs.
#[derive(Debug, PartialEq)]
pub struct LanguageBuilder {
    symbol_names: Vec<String>,
    hidden_symbols: Vec<bool>,
    rows: Vec<Vec<ParseAction>>,
    lex_states: Vec<LexState>,
    lex_fn: LexFn,
}

impl LanguageBuilder {
    pub fn new(lex_fn: LexFn) -> Self {
        LanguageBuilder {
            symbol_names: vec!["ERROR".into(), "END".into(), "DOCUMENT".into()],
            hidden_symbols: vec![false, false, false],
            rows: Vec::new(),
            lex_states: Vec::new(),
            lex_fn,
        }
    }

    /// Declare the next symbol.
    pub fn symbol(&mut self, name: &str) -> Symbol {
        self.declare(name, false)
    }

    /// Declare the next symbol as hidden.
    pub fn hidden_symbol(&mut self, name: &str) -> Symbol {
        self.declare(name, true)
    }

    fn declare(&mut self, name: &str, hidden: bool) -> Symbol {
        let id = self.symbol_names.len() as u16;
        self.symbol_names.push(name.to_string());
        self.hidden_symbols.push(hidden);
        Symbol(id)
    }

    /// Declare the next parse state, with its lex-state hint. All of the
    /// new state's actions start as [`ParseAction::Error`].
    pub fn state(&mut self, lex_state: LexState) -> StateId {
        let id = StateId(self.rows.len() as u16);
        self.rows.push(vec![ParseAction::Error; self.symbol_names.len()]);
        self.lex_states.push(lex_state);
        id
    }

    /// Set the action for a (state, symbol) pair.
    pub fn action(
        &mut self,
        state: StateId,
        symbol: Symbol,
        action: ParseAction,
    ) -> Result<&mut Self, LanguageError> {
        if let ParseAction::Reduce { symbol, .. } | ParseAction::ReduceExtra { symbol } = action {
            if symbol.index() >= self.symbol_names.len() {
                return Err(LanguageError::UnknownSymbol(symbol));
            }
        }
        let row = self
            .rows
            .get_mut(state.index())
            .ok_or(LanguageError::UnknownState(state))?;
        let slot = row
            .get_mut(symbol.index())
            .ok_or(LanguageError::UnknownSymbol(symbol))?;
        *slot = action;
        Ok(self)
    }

    /// Validate the table and freeze it.
    pub fn build(self) -> Result<Language, LanguageError> {
        if self.rows.is_empty() {
            return Err(LanguageError::NoStates);
        }
        let state_count = self.rows.len();
        for (row_index, row) in self.rows.iter().enumerate() {
            for (symbol_index, action) in row.iter().enumerate() {
                if let ParseAction::Shift { state: target } = *action {
                    if target.index() >= state_count {
                        return Err(LanguageError::ShiftTargetOutOfRange {
                            state: StateId(row_index as u16),
                            symbol: Symbol(symbol_index as u16),
                            target,
                        });
                    }
                }
            }
        }

        let symbol_count = self.symbol_names.len();
        let mut actions = Vec::with_capacity(state_count * symbol_count);
        for mut row in self.rows {
            // Symbols may have been declared after this row was; pad it
            // out to the final width.
            row.resize(symbol_count, ParseAction::Error);
            actions.extend(row);
        }

        Ok(Language {
            symbol_names: self.symbol_names,
            hidden_symbols: self.hidden_symbols,
            actions,
            lex_states: self.lex_states,
            lex_fn: self.lex_fn,
        })
    }
}
