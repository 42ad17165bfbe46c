use super::{Code, Diagnostic, Span};
use crate::util::escape_whitespace;

impl DiagnosticBuilder {
    /// Starts a diagnostic at `span`, reported at `line`:`column` of its first character.
    pub fn new(span: impl Into<Span>, line: usize, column: usize) -> Self {
        Self {
            span: span.into(),
            line,
            column,
        }
    }

    fn build_custom(self, code: Code, message: String) -> Diagnostic {
        Diagnostic {
            code,
            message,
            span: self.span,
            line: self.line,
            column: self.column,
        }
    }

    /// `text` is the raw input the lexer could not match.
    pub fn build_token_recognition(self, text: &str) -> Diagnostic {
        let msg = format!("token recognition error at: '{}'", escape_whitespace(text));
        self.build_custom(Code::TokenRecognition, msg)
    }

    /// `found` is the quoted display form of the offending token.
    pub fn build_missing_token(self, expecting: &str, found: &str) -> Diagnostic {
        let msg = format!("missing {expecting} at {found}");
        self.build_custom(Code::MissingToken, msg)
    }

    pub fn build_extraneous_input(self, found: &str, expecting: &str) -> Diagnostic {
        let msg = format!("extraneous input {found} expecting {expecting}");
        self.build_custom(Code::ExtraneousInput, msg)
    }

    pub fn build_mismatched_input(self, found: &str, expecting: &str) -> Diagnostic {
        let msg = format!("mismatched input {found} expecting {expecting}");
        self.build_custom(Code::MismatchedInput, msg)
    }

    /// `input` is the raw text from the start of the decision up to the offending token.
    pub fn build_no_viable_alternative(self, input: &str) -> Diagnostic {
        let msg = format!(
            "no viable alternative at input '{}'",
            escape_whitespace(input)
        );
        self.build_custom(Code::NoViableAlternative, msg)
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    span: Span,
    line: usize,
    column: usize,
}
