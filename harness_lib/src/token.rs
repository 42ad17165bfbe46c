use crate::{
    diagnostic::{AggregateResult, Diagnostic},
    util::escape_whitespace,
};

/// Token type of the end-of-file token.
pub const TOKEN_EOF: isize = crate::stream::EOF;

/// Marks a follow set that reaches the end of the enclosing rule. Never produced by a lexer.
pub const TOKEN_EPSILON: isize = -2;

pub const DEFAULT_CHANNEL: usize = 0;
pub const HIDDEN_CHANNEL: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: isize,
    pub channel: usize,
    /// First character position, inclusive.
    pub start: usize,
    /// Last character position, inclusive. `stop < start` for empty tokens such as EOF.
    pub stop: isize,
    /// 1-based.
    pub line: usize,
    /// 0-based character offset in `line`.
    pub column: usize,
    pub text: String,
    /// Position in the token list, assigned by the token stream.
    pub index: usize,
}

impl Token {
    pub fn eof(start: usize, line: usize, column: usize) -> Self {
        Self {
            token_type: TOKEN_EOF,
            channel: DEFAULT_CHANNEL,
            start,
            stop: start as isize - 1,
            line,
            column,
            text: "<EOF>".to_owned(),
            index: 0,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TOKEN_EOF
    }

    /// The quoted form used in syntax error messages, e.g. `'id2'` or `'<EOF>'`.
    pub fn error_display(&self) -> String {
        format!("'{}'", escape_whitespace(&self.text))
    }
}

/// The name tables of a grammar's token types, indexed by token type.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    literal_names: &'static [Option<&'static str>],
    symbolic_names: &'static [Option<&'static str>],
}

impl Vocabulary {
    pub const fn new(
        literal_names: &'static [Option<&'static str>],
        symbolic_names: &'static [Option<&'static str>],
    ) -> Self {
        Self {
            literal_names,
            symbolic_names,
        }
    }

    pub fn max_token_type(&self) -> isize {
        self.literal_names.len().max(self.symbolic_names.len()) as isize - 1
    }

    pub fn literal_name(&self, token_type: isize) -> Option<&'static str> {
        usize::try_from(token_type)
            .ok()
            .and_then(|i| self.literal_names.get(i).copied().flatten())
    }

    pub fn symbolic_name(&self, token_type: isize) -> Option<&'static str> {
        if token_type == TOKEN_EOF {
            return Some("EOF");
        }
        usize::try_from(token_type)
            .ok()
            .and_then(|i| self.symbolic_names.get(i).copied().flatten())
    }

    /// The literal name if there is one, else the symbolic name, else the number.
    pub fn display_name(&self, token_type: isize) -> String {
        self.literal_name(token_type)
            .or_else(|| self.symbolic_name(token_type))
            .map(str::to_owned)
            .unwrap_or_else(|| token_type.to_string())
    }

    /// Renders a set of expected token types the way error messages list them: a single type
    /// bare, several as `{A, B}` in token type order.
    pub fn display_set(&self, token_types: &[isize]) -> String {
        let mut token_types = token_types.to_vec();
        token_types.sort_unstable();
        token_types.dedup();
        let names: Vec<_> = token_types
            .iter()
            .map(|&t| {
                if t == TOKEN_EOF {
                    "<EOF>".to_owned()
                } else {
                    self.display_name(t)
                }
            })
            .collect();
        match names.as_slice() {
            [single] => single.clone(),
            _ => format!("{{{}}}", names.join(", ")),
        }
    }
}

/// Produces tokens from a character stream. Keeps returning EOF tokens once the input is exhausted.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;

    /// Takes the diagnostics reported since the last call.
    fn take_diagnostics(&mut self) -> Vec<Diagnostic>;
}

/// Lexes all tokens before EOF, including off-channel ones.
pub fn get_all_tokens(source: &mut dyn TokenSource) -> AggregateResult<Vec<Token>> {
    let mut tokens = Vec::new();
    loop {
        let token = source.next_token();
        if token.is_eof() {
            break;
        }
        tokens.push(token);
    }
    tracing::debug!(count = tokens.len(), "lexed tokens");

    let mut res = AggregateResult::new_ok(tokens);
    for diagnostic in source.take_diagnostics() {
        res.add_rec_diagnostic(diagnostic);
    }
    res
}

/// The compact token listing of the harness protocol, e.g. `SELECT Id(users) SEMI(;) EOF`.
///
/// A token whose name equals its text (ignoring case) is shown by name only; otherwise the text
/// follows in parentheses, without line breaks and cut after 8 characters.
pub fn format_tokens(tokens: &[Token], vocabulary: &Vocabulary) -> String {
    let mut out = String::new();
    for token in tokens {
        let mut name = vocabulary
            .symbolic_name(token.token_type)
            .map(str::to_owned)
            .unwrap_or_else(|| vocabulary.display_name(token.token_type));
        let value: String = token
            .text
            .chars()
            .filter(|c| *c != '\r' && *c != '\n')
            .collect();
        if !name.eq_ignore_ascii_case(&value) {
            name.push('(');
            if value.chars().count() <= 8 {
                name.push_str(&value);
            } else {
                name.extend(value.chars().take(8));
                name.push_str("...");
            }
            name.push(')');
        }
        out.push_str(&name);
        out.push(' ');
    }
    out.push_str("EOF");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    static VOCABULARY: Vocabulary = Vocabulary::new(
        &[None, Some("'select'"), Some("';'")],
        &[None, Some("SELECT"), Some("SEMI"), Some("Id"), Some("Whitespace")],
    );

    fn token(token_type: isize, text: &str) -> Token {
        Token {
            token_type,
            channel: DEFAULT_CHANNEL,
            start: 0,
            stop: text.chars().count() as isize - 1,
            line: 1,
            column: 0,
            text: text.to_owned(),
            index: 0,
        }
    }

    #[test]
    fn display_names_prefer_literals() {
        assert_eq!(VOCABULARY.display_name(1), "'select'");
        assert_eq!(VOCABULARY.display_name(3), "Id");
        assert_eq!(VOCABULARY.display_name(TOKEN_EOF), "EOF");
        assert_eq!(VOCABULARY.display_name(42), "42");
        assert_eq!(VOCABULARY.max_token_type(), 4);
    }

    #[test]
    fn displays_sets() {
        assert_eq!(VOCABULARY.display_set(&[2]), "';'");
        assert_eq!(VOCABULARY.display_set(&[1, TOKEN_EOF]), "{<EOF>, 'select'}");
        assert_eq!(VOCABULARY.display_set(&[3, 2, 3]), "{';', Id}");
    }

    #[test]
    fn formats_token_listing() {
        let tokens = [
            token(1, "SeLeCt"),
            token(4, " "),
            token(3, "customer_accounts"),
            token(4, "\r\n"),
            token(2, ";"),
        ];
        assert_eq!(
            format_tokens(&tokens, &VOCABULARY),
            "SELECT Whitespace( ) Id(customer...) Whitespace() SEMI(;) EOF"
        );
        assert_eq!(format_tokens(&[], &VOCABULARY), "EOF");
    }

    #[test]
    fn error_display_quotes_and_escapes() {
        assert_eq!(token(3, "id2").error_display(), "'id2'");
        assert_eq!(token(4, "\n").error_display(), "'\\n'");
        assert_eq!(Token::eof(3, 1, 3).error_display(), "'<EOF>'");
    }
}
