use crate::token::{Token, DEFAULT_CHANNEL};

/// A buffered token list read by parsers on the default channel.
///
/// Off-channel tokens stay in the buffer (their text is still part of the input) but are skipped
/// by [`lt`](Self::lt) and [`consume`](Self::consume).
#[derive(Debug, Clone)]
pub struct CommonTokenStream {
    tokens: Vec<Token>,
    /// Always points at a default-channel token.
    position: usize,
}

impl CommonTokenStream {
    /// Builds a stream over `tokens`, which must not contain an EOF token. An EOF token is
    /// appended right after the last token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) => {
                let start = (last.stop + 1).max(0) as usize;
                let (line, column) = end_position(last);
                Token::eof(start, line, column)
            }
            None => Token::eof(0, 1, 0),
        };
        tokens.push(eof);
        for (i, token) in tokens.iter_mut().enumerate() {
            token.index = i;
        }

        let mut stream = Self {
            tokens,
            position: 0,
        };
        stream.position = stream.next_on_channel(0);
        stream
    }

    fn next_on_channel(&self, mut i: usize) -> usize {
        while i < self.tokens.len() - 1 && self.tokens[i].channel != DEFAULT_CHANNEL {
            i += 1;
        }
        i
    }

    /// The `k`-th default-channel token from the current position, `k >= 1`. Reading past the end
    /// yields the EOF token.
    pub fn lt(&self, k: usize) -> &Token {
        debug_assert!(k >= 1);
        let mut i = self.position;
        for _ in 1..k {
            if self.tokens[i].is_eof() {
                break;
            }
            i = self.next_on_channel(i + 1);
        }
        &self.tokens[i]
    }

    pub fn la(&self, k: usize) -> isize {
        self.lt(k).token_type
    }

    /// Moves to the next default-channel token. Consuming EOF leaves the stream at EOF.
    pub fn consume(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if !token.is_eof() {
            self.position = self.next_on_channel(self.position + 1);
        }
        token
    }

    pub fn index(&self) -> usize {
        self.position
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The text of all tokens from `start` to `stop` (inclusive), hidden ones included.
    pub fn text(&self, start: usize, stop: usize) -> String {
        self.tokens[start..=stop.min(self.tokens.len() - 1)]
            .iter()
            .filter(|t| !t.is_eof())
            .map(|t| t.text.as_str())
            .collect()
    }
}

fn end_position(token: &Token) -> (usize, usize) {
    let mut line = token.line;
    let mut column = token.column;
    for c in token.text.chars() {
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}
