//! Input sources.

use arbor_text::Length;

/// A seekable source of text, read in chunks.
///
/// `read` returns a chunk of text starting at `position`; an empty chunk
/// means end of input. Chunks may be any nonzero size the source finds
/// convenient; the lexer buffers one chunk at a time and seeks again
/// when it runs out. Only the scalar `chars` component of `position` is
/// meaningful to the source; the extent rides along for sources that
/// index by row.
pub trait Input {
    fn read(&mut self, position: Length) -> &str;
}

impl Input for &str {
    fn read(&mut self, position: Length) -> &str {
        let byte = self
            .char_indices()
            .nth(position.chars as usize)
            .map(|(byte, _)| byte)
            .unwrap_or(self.len());
        &self[byte..]
    }
}
