use crate::{
    diagnostic::{Diagnostic, DiagnosticBuilder},
    stream::{CharStream, Interval, EOF},
    token::Token,
};

/// Position bookkeeping and error reporting shared by hand-written lexers.
pub struct LexerBase<'a> {
    input: Box<dyn CharStream + 'a>,
    line: usize,
    column: usize,
    token_start: usize,
    token_line: usize,
    token_column: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LexerBase<'a> {
    pub fn new(input: Box<dyn CharStream + 'a>) -> Self {
        tracing::debug!(source = input.source_name(), size = input.size(), "lexer input");
        Self {
            input,
            line: 1,
            column: 0,
            token_start: 0,
            token_line: 1,
            token_column: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn la(&self, offset: isize) -> isize {
        self.input.la(offset)
    }

    /// Lookahead as a `char`, `None` at EOF.
    pub fn la_char(&self, offset: isize) -> Option<char> {
        u32::try_from(self.la(offset)).ok().and_then(char::from_u32)
    }

    /// Consumes one character, tracking line and column. Does nothing at EOF.
    pub fn consume(&mut self) {
        let c = self.la(1);
        if c == EOF {
            return;
        }
        match self.input.consume() {
            Ok(()) if c == '\n' as isize => {
                self.line += 1;
                self.column = 0;
            }
            Ok(()) => self.column += 1,
            Err(err) => tracing::trace!(%err, "lexer consume rejected"),
        }
    }

    /// Consumes characters while `pred` holds for the lookahead.
    pub fn consume_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.la_char(1).is_some_and(&mut pred) {
            self.consume();
        }
    }

    /// Marks the current position as the start of the next token.
    pub fn start_token(&mut self) {
        self.token_start = self.input.index();
        self.token_line = self.line;
        self.token_column = self.column;
    }

    /// Builds a token from the start mark up to the current position.
    pub fn emit(&mut self, token_type: isize, channel: usize) -> Token {
        let stop = self.input.index() as isize - 1;
        let text = if stop >= self.token_start as isize {
            self.input
                .text(Interval::new(self.token_start, stop as usize))
        } else {
            String::new()
        };
        Token {
            token_type,
            channel,
            start: self.token_start,
            stop,
            line: self.token_line,
            column: self.token_column,
            text,
            index: 0,
        }
    }

    pub fn emit_eof(&self) -> Token {
        Token::eof(self.input.index(), self.line, self.column)
    }

    /// Reports the text from the token start through the current character as unrecognizable and
    /// skips the current character.
    pub fn recognition_error(&mut self) {
        let index = self.input.index();
        let text = self.input.text(Interval::new(self.token_start, index));
        let end = (index + 1).min(self.input.size()).max(self.token_start);
        let diagnostic =
            DiagnosticBuilder::new(self.token_start..end, self.token_line, self.token_column)
                .build_token_recognition(&text);
        tracing::trace!(%diagnostic, "lexer error");
        self.diagnostics.push(diagnostic);
        self.consume();
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
