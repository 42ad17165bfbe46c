use super::{COMMA, COMMENT, EQ, FROM, ID, NUMBER, SELECT, SEMI, STAR, STRING, WHERE, WHITESPACE};
use crate::{
    diagnostic::Diagnostic,
    grammar::LexerBase,
    stream::CharStream,
    token::{Token, TokenSource, DEFAULT_CHANNEL, HIDDEN_CHANNEL},
};

pub struct QueryLexer<'a> {
    base: LexerBase<'a>,
}

impl<'a> QueryLexer<'a> {
    pub fn new(input: Box<dyn CharStream + 'a>) -> Self {
        Self {
            base: LexerBase::new(input),
        }
    }

    fn keyword(word: &str) -> Option<isize> {
        match word {
            "select" => Some(SELECT),
            "from" => Some(FROM),
            "where" => Some(WHERE),
            _ => None,
        }
    }

    fn is_whitespace(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\r' | '\n')
    }

    fn is_id_part(c: char) -> bool {
        matches!(c, 'a'..='z' | '0'..='9' | '_')
    }

    /// Lexes one token starting at the lookahead, or `None` after reporting an error.
    fn lex_token(&mut self, c: char) -> Option<Token> {
        let base = &mut self.base;
        match c {
            c if Self::is_whitespace(c) => {
                base.consume_while(Self::is_whitespace);
                Some(base.emit(WHITESPACE, HIDDEN_CHANNEL))
            }
            '-' => {
                base.consume();
                if base.la_char(1) != Some('-') {
                    base.recognition_error();
                    return None;
                }
                base.consume_while(|c| c != '\r' && c != '\n');
                Some(base.emit(COMMENT, HIDDEN_CHANNEL))
            }
            'a'..='z' | '_' => {
                // Lookahead is lowercase already, so keywords match in any case.
                let mut word = String::new();
                while let Some(c) = base.la_char(1).filter(|c| Self::is_id_part(*c)) {
                    word.push(c);
                    base.consume();
                }
                let token_type = Self::keyword(&word).unwrap_or(ID);
                Some(base.emit(token_type, DEFAULT_CHANNEL))
            }
            '0'..='9' => {
                base.consume_while(|c| c.is_ascii_digit());
                Some(base.emit(NUMBER, DEFAULT_CHANNEL))
            }
            '\'' => {
                base.consume();
                base.consume_while(|c| c != '\'');
                if base.la_char(1).is_none() {
                    base.recognition_error();
                    return None;
                }
                base.consume();
                Some(base.emit(STRING, DEFAULT_CHANNEL))
            }
            '*' | ',' | '=' | ';' => {
                let token_type = match c {
                    '*' => STAR,
                    ',' => COMMA,
                    '=' => EQ,
                    _ => SEMI,
                };
                base.consume();
                Some(base.emit(token_type, DEFAULT_CHANNEL))
            }
            _ => {
                base.recognition_error();
                None
            }
        }
    }
}

impl TokenSource for QueryLexer<'_> {
    fn next_token(&mut self) -> Token {
        loop {
            self.base.start_token();
            let Some(c) = self.base.la_char(1) else {
                return self.base.emit_eof();
            };
            if let Some(token) = self.lex_token(c) {
                tracing::trace!(token_type = token.token_type, text = %token.text, "token");
                return token;
            }
        }
    }

    fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.base.take_diagnostics()
    }
}
