//! Parse states, lex states, and parse actions.

use std::fmt;

use arbor_tree::Symbol;

/// A parse state identifier.
///
/// State `0` is the initial state, and doubles as the sentinel used when
/// no parse decision applies (an empty stack's top state, the state the
/// finished root is pushed at).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct StateId(pub u16);

impl StateId {
    pub const ZERO: StateId = StateId(0);

    /// Index of this state in per-state tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({})", self.0)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lex-state hint: which token kinds the lexer should look for.
///
/// Each parse state declares the lex state to use for its next token.
/// [`LexState::ERROR`] is reserved: it recognizes every token kind, and
/// the driver switches to it while searching for a recovery point.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct LexState(pub u16);

impl LexState {
    /// The recognize-everything lex state used during error recovery.
    pub const ERROR: LexState = LexState(0);
}

impl fmt::Debug for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == LexState::ERROR {
            write!(f, "LexState::ERROR")
        } else {
            write!(f, "LexState({})", self.0)
        }
    }
}

/// One entry of the parse table: what the driver does when a given
/// symbol is the lookahead in a given state.
///
/// Gotos are encoded as `Shift` actions on nonterminal symbols.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ParseAction {
    /// No valid action; triggers error recovery.
    #[default]
    Error,
    /// Consume the lookahead and move to `state`.
    Shift { state: StateId },
    /// Consume the lookahead as an extra, keeping the current state.
    ShiftExtra,
    /// Pop `child_count` grammar-visible entries and wrap them in a
    /// `symbol` node.
    Reduce { symbol: Symbol, child_count: u16 },
    /// Single-child reduction whose result is marked extra.
    ReduceExtra { symbol: Symbol },
    /// The parse is complete.
    Accept,
}
