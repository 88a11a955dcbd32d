//! Text positions for the arbor parse runtime.
//!
//! Everything the runtime measures (token extents, node paddings, lexer
//! cursors, stack positions) is a [`Length`]: a scalar character count
//! paired with the rows and columns it spans. [`InputEdit`] describes the
//! change an incremental re-parse starts from.

/// Assert the size of a type at compile time.
///
/// Keeps the hot types from growing accidentally.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod edit;
mod length;
mod point;

pub use edit::InputEdit;
pub use length::Length;
pub use point::Point;
