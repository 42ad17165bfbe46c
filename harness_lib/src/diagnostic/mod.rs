//! Syntax errors and the result type that carries them alongside a recovered value.

pub mod builder;

use std::{fmt, ops::Range};

pub use builder::DiagnosticBuilder;

/// Character positions `start..end` of the offending text.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive.
    pub fn end(&self) -> usize {
        self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The kind of recognition error. The discriminants are the numbers shown by rich diagnostics,
/// so new kinds go at the end.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    TokenRecognition = 1,
    MissingToken,
    ExtraneousInput,
    MismatchedInput,
    NoViableAlternative,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:0>4x}", *self as u32)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    code: Code,
    message: String,
    span: Span,
    line: usize,
    column: usize,
}

impl Diagnostic {
    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// 1-based line of the offending symbol.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based character offset of the offending symbol inside its line.
    pub fn column(&self) -> usize {
        self.column
    }
}

/// The `line L:C message` form recognizer error listeners print.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:{} {}", self.line, self.column, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Reported, but a value was still produced.
    Rec,
    /// Fatal, there is no value.
    Err,
}

/// A value together with the diagnostics reported while producing it.
///
/// A result is _ok_ when it holds a value and no diagnostics, _rec_ when it holds a recovered
/// value and only [`DiagnosticKind::Rec`] diagnostics, and _err_ when an upgraded diagnostic
/// removed the value. Diagnostics keep the order they were reported in.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult<T> {
    value: Option<T>,
    diagnostics: Vec<(DiagnosticKind, Diagnostic)>,
}

impl<T> AggregateResult<T> {
    /// ```
    /// # use harness_lib::diagnostic::*;
    /// let res = AggregateResult::new_ok("tree");
    /// assert!(res.is_ok());
    /// assert_eq!(res.value(), Some(&"tree"));
    /// ```
    pub fn new_ok(value: T) -> Self {
        Self {
            value: Some(value),
            diagnostics: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.value.is_some() && self.diagnostics.is_empty()
    }

    pub fn is_rec(&self) -> bool {
        self.value.is_some() && !self.diagnostics.is_empty()
    }

    pub fn is_err(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = (DiagnosticKind, &Diagnostic)> {
        self.diagnostics.iter().map(|(kind, d)| (*kind, d))
    }

    /// Records a diagnostic the value was recovered from, turning an _ok_ result into _rec_.
    pub fn add_rec_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push((DiagnosticKind::Rec, diagnostic));
    }

    /// Makes every diagnostic fatal. A result with any diagnostics loses its value.
    ///
    /// ```
    /// # use harness_lib::diagnostic::*;
    /// let mut res = AggregateResult::new_ok(1);
    /// res.add_rec_diagnostic(DiagnosticBuilder::new(0..1, 1, 0).build_token_recognition("#"));
    /// res.upgrade_all();
    /// assert!(res.is_err());
    /// ```
    pub fn upgrade_all(&mut self) {
        if self.diagnostics.is_empty() {
            return;
        }
        for (kind, _) in &mut self.diagnostics {
            *kind = DiagnosticKind::Err;
        }
        self.value = None;
    }

    #[must_use]
    pub fn map<U, F>(self, op: F) -> AggregateResult<U>
    where
        F: FnOnce(T) -> U,
    {
        AggregateResult {
            value: self.value.map(op),
            diagnostics: self.diagnostics,
        }
    }

    /// Feeds the value into the next stage. The diagnostics of `self` come first, followed by
    /// those of the stage. Without a value the stage is skipped.
    #[must_use]
    pub fn and_then<U, F>(self, op: F) -> AggregateResult<U>
    where
        F: FnOnce(T) -> AggregateResult<U>,
    {
        let mut diagnostics = self.diagnostics;
        let value = match self.value {
            Some(value) => {
                let next = op(value);
                diagnostics.extend(next.diagnostics);
                next.value
            }
            None => None,
        };
        AggregateResult { value, diagnostics }
    }
}
