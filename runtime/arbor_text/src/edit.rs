//! Edit descriptions for incremental re-parses.

/// A single edit to previously parsed text.
///
/// A region of `chars_removed` characters starting at `position` (a
/// character offset in the old text) was replaced with `chars_inserted`
/// characters. The parse driver only consults `position`, the earliest
/// disturbed offset, when deciding how much of the previous parse to
/// reuse; the removed/inserted counts describe the rest of the change for
/// callers that need to shift their own positions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct InputEdit {
    /// Character offset of the first disturbed character.
    pub position: usize,
    /// Number of characters removed from the old text.
    pub chars_removed: usize,
    /// Number of characters inserted in their place.
    pub chars_inserted: usize,
}

impl InputEdit {
    /// Create a new edit.
    #[inline]
    pub const fn new(position: usize, chars_removed: usize, chars_inserted: usize) -> Self {
        InputEdit {
            position,
            chars_removed,
            chars_inserted,
        }
    }

    /// An insertion (no characters removed).
    #[inline]
    pub const fn insert(position: usize, chars_inserted: usize) -> Self {
        InputEdit::new(position, 0, chars_inserted)
    }

    /// A deletion (no characters inserted).
    #[inline]
    pub const fn delete(position: usize, chars_removed: usize) -> Self {
        InputEdit::new(position, chars_removed, 0)
    }

    /// A replacement.
    #[inline]
    pub const fn replace(position: usize, chars_removed: usize, chars_inserted: usize) -> Self {
        InputEdit::new(position, chars_removed, chars_inserted)
    }

    /// End of the removed region in the old text.
    #[inline]
    pub const fn old_end(&self) -> usize {
        self.position + self.chars_removed
    }

    /// End of the inserted region in the new text.
    #[inline]
    pub const fn new_end(&self) -> usize {
        self.position + self.chars_inserted
    }

    /// Net change in text length (positive = grew, negative = shrank).
    #[inline]
    pub fn delta(&self) -> i64 {
        self.chars_inserted as i64 - self.chars_removed as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_insert() {
        let edit = InputEdit::insert(10, 5);
        assert_eq!(edit.position, 10);
        assert_eq!(edit.old_end(), 10);
        assert_eq!(edit.new_end(), 15);
        assert_eq!(edit.delta(), 5);
    }

    #[test]
    fn test_edit_delete() {
        let edit = InputEdit::delete(10, 5);
        assert_eq!(edit.old_end(), 15);
        assert_eq!(edit.new_end(), 10);
        assert_eq!(edit.delta(), -5);
    }

    #[test]
    fn test_edit_replace() {
        let edit = InputEdit::replace(10, 3, 5);
        assert_eq!(edit.old_end(), 13);
        assert_eq!(edit.new_end(), 15);
        assert_eq!(edit.delta(), 2);
    }
}
