use super::{
    lookahead_position, CharStream, InputStream, IntStream, Interval, StreamError, EOF, UNDEFINED,
};

/// The case lookahead is normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseMode {
    Lower,
    Upper,
}

impl CaseMode {
    /// Folds a single character, keeping `c` itself when the folded form is longer than one
    /// character (e.g. `'İ'` lowercases to `"i\u{307}"`).
    pub fn fold(self, c: char) -> char {
        let mut folded = match self {
            CaseMode::Lower => FoldIter::Lower(c.to_lowercase()),
            CaseMode::Upper => FoldIter::Upper(c.to_uppercase()),
        };
        match (folded.next(), folded.next()) {
            (Some(single), None) => single,
            _ => c,
        }
    }
}

impl std::fmt::Display for CaseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CaseMode::Lower => "lower",
            CaseMode::Upper => "upper",
        };
        write!(f, "{name}")
    }
}

enum FoldIter {
    Lower(std::char::ToLowercase),
    Upper(std::char::ToUppercase),
}

impl Iterator for FoldIter {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            FoldIter::Lower(it) => it.next(),
            FoldIter::Upper(it) => it.next(),
        }
    }
}

/// Case-normalized code points, one per character of the source text.
///
/// The buffer never changes after construction and knows nothing about read positions; lookahead
/// is always answered relative to a cursor supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookaheadBuffer {
    mode: CaseMode,
    data: Box<[u32]>,
}

impl LookaheadBuffer {
    pub fn new(input: &str, mode: CaseMode) -> Self {
        Self {
            mode,
            data: input.chars().map(|c| mode.fold(c) as u32).collect(),
        }
    }

    pub fn mode(&self) -> CaseMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Lookahead relative to `cursor`.
    ///
    /// Offset `0` yields [`UNDEFINED`], positions past either edge of the buffer yield [`EOF`].
    pub fn la(&self, cursor: usize, offset: isize) -> isize {
        if offset == 0 {
            return UNDEFINED;
        }
        match lookahead_position(cursor, offset, self.data.len()) {
            Some(pos) => self.data[pos] as isize,
            None => EOF,
        }
    }
}

/// A character stream whose lookahead is case-normalized while extracted text keeps the original
/// case.
///
/// Lexers match against [`IntStream::la`], so a grammar written in lowercase matches `SELECT`,
/// `Select` and `select` alike, but the token text is still taken from the original input.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveInputStream {
    input: InputStream,
    lookahead: LookaheadBuffer,
}

impl CaseInsensitiveInputStream {
    pub fn new(input: &str, mode: CaseMode) -> Self {
        Self {
            input: InputStream::new(input),
            lookahead: LookaheadBuffer::new(input, mode),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.input = self.input.with_name(name);
        self
    }

    pub fn lookahead(&self) -> &LookaheadBuffer {
        &self.lookahead
    }

    pub fn mode(&self) -> CaseMode {
        self.lookahead.mode()
    }
}

impl IntStream for CaseInsensitiveInputStream {
    fn consume(&mut self) -> Result<(), StreamError> {
        self.input.consume()
    }

    fn la(&self, offset: isize) -> isize {
        self.lookahead.la(self.input.index(), offset)
    }

    fn mark(&mut self) -> isize {
        self.input.mark()
    }

    fn release(&mut self, marker: isize) {
        self.input.release(marker)
    }

    fn index(&self) -> usize {
        self.input.index()
    }

    fn seek(&mut self, index: usize) {
        self.input.seek(index)
    }

    fn size(&self) -> usize {
        self.input.size()
    }

    fn source_name(&self) -> &str {
        self.input.source_name()
    }
}

impl CharStream for CaseInsensitiveInputStream {
    fn text(&self, interval: Interval) -> String {
        self.input.text(interval)
    }
}
