//! The parse stack.

use arbor_language::StateId;
use arbor_text::Length;
use arbor_tree::Tree;

/// One stack entry: a parse state and the subtree shifted into it.
#[derive(Clone, Debug)]
pub struct StackEntry {
    pub state: StateId,
    pub node: Tree,
}

/// The driver's working memory: a flat sequence of (state, subtree)
/// entries.
///
/// Flat rather than linked because error recovery scans it from the top
/// down by index. Entries are cheap to copy: cloning one bumps the
/// node's refcount.
#[derive(Default)]
pub struct Stack {
    entries: Vec<StackEntry>,
}

impl Stack {
    pub fn new() -> Self {
        Stack::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push an entry, taking ownership of a share of `node`.
    pub fn push(&mut self, state: StateId, node: Tree) {
        self.entries.push(StackEntry { state, node });
    }

    /// Release every entry above `new_len`.
    pub fn shrink(&mut self, new_len: usize) {
        self.entries.truncate(new_len);
    }

    /// Remove the top `self.len() - new_len` entries, returning their
    /// nodes in stack order (bottom first).
    pub fn split_off(&mut self, new_len: usize) -> Vec<Tree> {
        self.entries
            .split_off(new_len)
            .into_iter()
            .map(|entry| entry.node)
            .collect()
    }

    /// The top entry's state; `StateId::ZERO` when empty.
    #[inline]
    pub fn top_state(&self) -> StateId {
        self.entries
            .last()
            .map_or(StateId::ZERO, |entry| entry.state)
    }

    /// The top entry's node, if any.
    #[inline]
    pub fn top_node(&self) -> Option<&Tree> {
        self.entries.last().map(|entry| &entry.node)
    }

    /// The node `depth` entries below the top.
    pub fn node_from_top(&self, depth: usize) -> Option<&Tree> {
        let index = self.entries.len().checked_sub(depth + 1)?;
        self.entries.get(index).map(|entry| &entry.node)
    }

    /// Visit entries from the top down, with their absolute indices.
    pub fn iter_from_top(&self) -> impl Iterator<Item = (usize, &StackEntry)> {
        self.entries.iter().enumerate().rev()
    }

    /// Cumulative extent of every node on the stack.
    pub fn right_position(&self) -> Length {
        self.entries
            .iter()
            .fold(Length::ZERO, |position, entry| {
                position + entry.node.total_size()
            })
    }
}
