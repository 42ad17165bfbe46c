use super::{
    lookahead_position, CharStream, Cursor, IntStream, Interval, StreamError, EOF, UNDEFINED,
    UNKNOWN_SOURCE_NAME,
};

/// A fully buffered stream of characters.
///
/// Every position holds one Unicode scalar value, so positions are char indices into the source
/// text, not byte offsets.
#[derive(Debug, Clone)]
pub struct InputStream {
    data: Box<[char]>,
    cursor: Cursor,
    name: String,
}

impl InputStream {
    pub fn new(input: &str) -> Self {
        Self {
            data: input.chars().collect(),
            cursor: Cursor::new(),
            name: UNKNOWN_SOURCE_NAME.to_owned(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl IntStream for InputStream {
    fn consume(&mut self) -> Result<(), StreamError> {
        self.cursor.advance(self.data.len())
    }

    fn la(&self, offset: isize) -> isize {
        if offset == 0 {
            return UNDEFINED;
        }
        match lookahead_position(self.cursor.index(), offset, self.data.len()) {
            Some(pos) => self.data[pos] as isize,
            None => EOF,
        }
    }

    fn index(&self) -> usize {
        self.cursor.index()
    }

    fn seek(&mut self, index: usize) {
        self.cursor.seek(index, self.data.len());
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

impl CharStream for InputStream {
    fn text(&self, interval: Interval) -> String {
        let len = self.data.len();
        if interval.start >= len || interval.stop < interval.start {
            return String::new();
        }
        let stop = interval.stop.min(len - 1);
        self.data[interval.start..=stop].iter().collect()
    }
}
