//! Two-dimensional text extents.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::Point;

/// A text extent: a scalar character count paired with the rows and
/// columns it spans.
///
/// All tree sizes, paddings, and lexer positions are `Length`s. The
/// scalar `chars` component is authoritative for comparisons; the
/// `extent` rides along so row/column positions stay available without a
/// separate line index.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Length {
    /// Number of characters.
    pub chars: u32,
    /// Rows and columns spanned by those characters.
    pub extent: Point,
}

impl Length {
    pub const ZERO: Length = Length {
        chars: 0,
        extent: Point::ZERO,
    };

    /// Create a new length.
    #[inline]
    pub const fn new(chars: u32, extent: Point) -> Self {
        Length { chars, extent }
    }

    /// Check if this length is zero characters long.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.chars == 0
    }

    /// Measure a piece of text.
    pub fn of_text(text: &str) -> Self {
        let mut length = Length::ZERO;
        for ch in text.chars() {
            length += Length::of_char(ch);
        }
        length
    }

    /// The extent of a single character.
    #[inline]
    pub fn of_char(ch: char) -> Self {
        if ch == '\n' {
            Length::new(1, Point::new(1, 0))
        } else {
            Length::new(1, Point::new(0, 1))
        }
    }
}

impl Add for Length {
    type Output = Length;

    #[inline]
    fn add(self, rhs: Length) -> Length {
        Length {
            chars: self.chars + rhs.chars,
            extent: self.extent + rhs.extent,
        }
    }
}

impl Sub for Length {
    type Output = Length;

    /// Saturates at zero characters.
    #[inline]
    fn sub(self, rhs: Length) -> Length {
        Length {
            chars: self.chars.saturating_sub(rhs.chars),
            extent: self.extent - rhs.extent,
        }
    }
}

impl AddAssign for Length {
    #[inline]
    fn add_assign(&mut self, rhs: Length) {
        *self = *self + rhs;
    }
}

impl SubAssign for Length {
    #[inline]
    fn sub_assign(&mut self, rhs: Length) {
        *self = *self - rhs;
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.chars, self.extent)
    }
}

// Size assertion to prevent accidental regressions
crate::static_assert_size!(Length, 12);
