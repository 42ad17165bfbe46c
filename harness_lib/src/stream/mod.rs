//! Character streams consumed by lexers.
//!
//! The streams follow the recognizer runtime contract: lookahead returns a code point as an
//! `isize`, [`EOF`] past either end of the input, and `0` for the undefined offset `0`.

mod case_insensitive;
mod cursor;
mod input_stream;
#[cfg(test)]
mod test;

pub use case_insensitive::{CaseInsensitiveInputStream, CaseMode, LookaheadBuffer};
pub use cursor::Cursor;
pub use input_stream::InputStream;

/// Returned by lookahead when the requested position lies outside the input.
pub const EOF: isize = -1;

/// Returned by lookahead for offset `0`, which has no meaning.
pub const UNDEFINED: isize = 0;

/// Name reported by streams that were not given one.
pub const UNKNOWN_SOURCE_NAME: &str = "<unknown>";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("cannot consume EOF")]
    ConsumeAtEof,
}

/// An inclusive range of character positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: usize,
    pub stop: usize,
}

impl Interval {
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }
}

impl From<std::ops::RangeInclusive<usize>> for Interval {
    fn from(value: std::ops::RangeInclusive<usize>) -> Self {
        let (start, stop) = value.into_inner();
        Self { start, stop }
    }
}

pub trait IntStream {
    /// Advances the cursor by one position.
    fn consume(&mut self) -> Result<(), StreamError>;

    /// Looks at the symbol `offset` positions away from the cursor without moving it.
    ///
    /// `la(1)` is the next symbol to be consumed and `la(-1)` the one consumed last.
    fn la(&self, offset: isize) -> isize;

    /// The whole input is buffered, so marks are meaningless and always `-1`.
    fn mark(&mut self) -> isize {
        -1
    }

    fn release(&mut self, _marker: isize) {}

    fn index(&self) -> usize;

    fn seek(&mut self, index: usize);

    fn size(&self) -> usize;

    fn source_name(&self) -> &str;
}

pub trait CharStream: IntStream {
    /// Returns the original text inside `interval`, clamped to the input.
    fn text(&self, interval: Interval) -> String;
}

/// Resolves a lookahead offset relative to `cursor` into a buffer position.
///
/// Returns `None` for positions outside `0..len`. Offset `0` must be handled by the caller.
pub(crate) fn lookahead_position(cursor: usize, offset: isize, len: usize) -> Option<usize> {
    debug_assert_ne!(offset, 0);
    let offset = if offset < 0 { offset + 1 } else { offset };
    let pos = (cursor as isize).checked_add(offset - 1)?;
    if pos < 0 || pos >= len as isize {
        None
    } else {
        Some(pos as usize)
    }
}
