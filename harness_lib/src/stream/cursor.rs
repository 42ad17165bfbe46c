use super::StreamError;

/// Read position over a buffer of `len` symbols.
///
/// The cursor is always in `0..=len`; `index == len` means all input was consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self, len: usize) -> Result<(), StreamError> {
        if self.index >= len {
            return Err(StreamError::ConsumeAtEof);
        }
        self.index += 1;
        Ok(())
    }

    pub fn seek(&mut self, index: usize, len: usize) {
        self.index = index.min(len);
    }
}
