use crate::{
    diagnostic::{AggregateResult, Diagnostic, DiagnosticBuilder},
    prediction::PredictionMode,
    token::{Token, Vocabulary, TOKEN_EOF, TOKEN_EPSILON},
    token_stream::CommonTokenStream,
    tree::ParseTree,
};

/// Raised when a rule can't continue. The error has already been reported; the enclosing rule
/// resynchronises with [`ParserBase::recover`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionError;

/// The decision point guarded by a [`ParserBase::sync`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    /// Start of an alternative block or of an optional block.
    BlockStart,
    /// Before the first iteration of a loop.
    LoopEntry,
    /// After each iteration of a loop.
    LoopBack,
}

// Follow set of the outermost rule. Only EOF can come after it.
const ROOT_FOLLOW: &[isize] = &[TOKEN_EOF];

/// Token access, error reporting and error recovery shared by hand-written parsers.
///
/// Recovery follows the usual recognizer strategy: a missing or extra single token is repaired
/// in place, anything else unwinds to the enclosing rule, which skips tokens until one that can
/// follow a rule on the invocation stack. After reporting, further errors are suppressed until a
/// token is matched again.
///
/// Token sets passed to the parser are local to the current rule. [`TOKEN_EPSILON`] in a set
/// means the rule can end at that point, so the follow sets of the enclosing rules apply too.
pub struct ParserBase {
    input: CommonTokenStream,
    vocabulary: &'static Vocabulary,
    prediction_mode: PredictionMode,
    diagnostics: Vec<Diagnostic>,
    error_recovery_mode: bool,
    last_error_index: Option<usize>,
    /// For each active rule, the tokens that can follow it in its caller.
    follow_stack: Vec<&'static [isize]>,
}

impl ParserBase {
    pub fn new(
        input: CommonTokenStream,
        vocabulary: &'static Vocabulary,
        prediction_mode: PredictionMode,
    ) -> Self {
        Self {
            input,
            vocabulary,
            prediction_mode,
            diagnostics: Vec::new(),
            error_recovery_mode: false,
            last_error_index: None,
            follow_stack: Vec::new(),
        }
    }

    pub fn prediction_mode(&self) -> PredictionMode {
        self.prediction_mode
    }

    pub fn la(&self, k: usize) -> isize {
        self.input.la(k)
    }

    pub fn lt(&self, k: usize) -> &Token {
        self.input.lt(k)
    }

    /// Runs `body` as the rule `name`, recovering from a [`RecognitionError`] by skipping to a
    /// token that can follow one of the active rules. `follow` is what comes after the rule in
    /// its caller and is ignored when the rule is the parse root.
    pub fn rule<P>(
        parser: &mut P,
        name: &'static str,
        follow: &'static [isize],
        body: fn(&mut P, &mut ParseTree) -> Result<(), RecognitionError>,
    ) -> ParseTree
    where
        P: AsMut<ParserBase>,
    {
        tracing::trace!(rule = name, "enter rule");
        let mut node = ParseTree::rule(name);
        let base = parser.as_mut();
        let follow = if base.follow_stack.is_empty() {
            ROOT_FOLLOW
        } else {
            follow
        };
        base.follow_stack.push(follow);
        if body(parser, &mut node).is_err() {
            parser.as_mut().recover(&mut node);
        }
        parser.as_mut().follow_stack.pop();
        node
    }

    /// Adds the current token to `node` and moves on. Consumed tokens become error nodes while
    /// recovering.
    fn consume_into(&mut self, node: &mut ParseTree) {
        let token = self.input.consume();
        if self.error_recovery_mode {
            node.push(ParseTree::Error(token));
        } else {
            node.push(ParseTree::Terminal(token));
        }
    }

    pub fn match_token(
        &mut self,
        token_type: isize,
        next: &[isize],
        node: &mut ParseTree,
    ) -> Result<(), RecognitionError> {
        self.match_set(&[token_type], next, node)
    }

    /// Matches one token out of `expected`. `next` lists the token types that may follow the
    /// matched token and decides whether a missing token can be conjured.
    pub fn match_set(
        &mut self,
        expected: &[isize],
        next: &[isize],
        node: &mut ParseTree,
    ) -> Result<(), RecognitionError> {
        if expected.contains(&self.la(1)) {
            self.error_recovery_mode = false;
            self.consume_into(node);
            return Ok(());
        }

        if self.single_token_deletion(expected, node) {
            self.consume_into(node);
            return Ok(());
        }

        if self.expected_tokens(next).contains(&self.la(1)) {
            self.report_missing_token(expected);
            node.push(ParseTree::Error(self.missing_token(expected)));
            return Ok(());
        }

        self.report_input_mismatch(expected);
        Err(RecognitionError)
    }

    /// Checks the lookahead at a decision point. `expected` lists the tokens that can come next,
    /// with [`TOKEN_EPSILON`] if the rule can end here, in which case nothing is checked.
    ///
    /// Before a block or loop, an unexpected token followed by an expected one is dropped,
    /// otherwise the mismatch is reported and the rule unwinds. After a loop iteration, the
    /// unexpected tokens are reported and skipped up to one that continues the loop or follows
    /// an active rule.
    pub fn sync(
        &mut self,
        kind: SyncKind,
        expected: &[isize],
        node: &mut ParseTree,
    ) -> Result<(), RecognitionError> {
        if self.error_recovery_mode
            || expected.contains(&self.la(1))
            || expected.contains(&TOKEN_EPSILON)
        {
            return Ok(());
        }

        match kind {
            SyncKind::BlockStart | SyncKind::LoopEntry => {
                if self.single_token_deletion(expected, node) {
                    return Ok(());
                }
                self.report_input_mismatch(expected);
                Err(RecognitionError)
            }
            SyncKind::LoopBack => {
                self.report_unwanted_token(expected);
                let mut stop = self.recovery_set();
                stop.extend_from_slice(expected);
                self.consume_until(&stop, node);
                Ok(())
            }
        }
    }

    /// Drops the current token if the one after it is in `expected`.
    fn single_token_deletion(&mut self, expected: &[isize], node: &mut ParseTree) -> bool {
        if !expected.contains(&self.la(2)) {
            return false;
        }
        self.report_unwanted_token(expected);
        self.consume_into(node);
        self.error_recovery_mode = false;
        true
    }

    /// Reports that no alternative of the current decision matches the lookahead.
    pub fn no_viable_alternative(&mut self, decision_start: usize) -> RecognitionError {
        if !self.begin_error_condition() {
            return RecognitionError;
        }
        let offending = self.lt(1).clone();
        let input = if offending.is_eof() && decision_start >= offending.index {
            "<EOF>".to_owned()
        } else {
            self.input.text(decision_start, offending.index)
        };
        let diagnostic = self
            .builder_at(&offending)
            .build_no_viable_alternative(&input);
        self.push_diagnostic(diagnostic);
        RecognitionError
    }

    /// Index of the current token, used as the start of a decision.
    pub fn index(&self) -> usize {
        self.input.index()
    }

    pub fn recover(&mut self, node: &mut ParseTree) {
        if self.last_error_index == Some(self.input.index()) && !self.lt(1).is_eof() {
            // No progress since the last recovery, skip at least one token.
            self.consume_into(node);
        }
        self.last_error_index = Some(self.input.index());
        let stop = self.recovery_set();
        self.consume_until(&stop, node);
    }

    /// Tokens that can follow any active rule below the root.
    fn recovery_set(&self) -> Vec<isize> {
        self.follow_stack
            .iter()
            .skip(1)
            .flat_map(|f| f.iter().copied())
            .filter(|&t| t != TOKEN_EPSILON)
            .collect()
    }

    /// Resolves [`TOKEN_EPSILON`] in `local` against the follow sets of the active rules.
    fn expected_tokens(&self, local: &[isize]) -> Vec<isize> {
        let mut expected: Vec<_> = local
            .iter()
            .copied()
            .filter(|&t| t != TOKEN_EPSILON)
            .collect();
        if !local.contains(&TOKEN_EPSILON) {
            return expected;
        }
        for follow in self.follow_stack.iter().rev() {
            expected.extend(follow.iter().copied().filter(|&t| t != TOKEN_EPSILON));
            if !follow.contains(&TOKEN_EPSILON) {
                return expected;
            }
        }
        expected.push(TOKEN_EOF);
        expected
    }

    fn consume_until(&mut self, stop: &[isize], node: &mut ParseTree) {
        while self.la(1) != TOKEN_EOF && !stop.contains(&self.la(1)) {
            self.consume_into(node);
        }
    }

    fn missing_token(&self, expected: &[isize]) -> Token {
        let expected_type = expected.iter().copied().min().unwrap_or(TOKEN_EOF);
        let current = self.lt(1);
        Token {
            token_type: expected_type,
            channel: current.channel,
            start: current.start,
            stop: current.start as isize - 1,
            line: current.line,
            column: current.column,
            text: format!("<missing {}>", self.vocabulary.display_name(expected_type)),
            index: current.index,
        }
    }

    /// Enters error recovery mode. Returns `false` if already in it, in which case nothing
    /// should be reported.
    fn begin_error_condition(&mut self) -> bool {
        if self.error_recovery_mode {
            return false;
        }
        self.error_recovery_mode = true;
        true
    }

    fn builder_at(&self, token: &Token) -> DiagnosticBuilder {
        let end = (token.stop + 1).max(token.start as isize) as usize;
        DiagnosticBuilder::new(token.start..end, token.line, token.column)
    }

    fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(%diagnostic, "syntax error");
        self.diagnostics.push(diagnostic);
    }

    fn report_unwanted_token(&mut self, expected: &[isize]) {
        if !self.begin_error_condition() {
            return;
        }
        let offending = self.lt(1).clone();
        let diagnostic = self.builder_at(&offending).build_extraneous_input(
            &offending.error_display(),
            &self.vocabulary.display_set(expected),
        );
        self.push_diagnostic(diagnostic);
    }

    fn report_missing_token(&mut self, expected: &[isize]) {
        if !self.begin_error_condition() {
            return;
        }
        let offending = self.lt(1).clone();
        let diagnostic = self.builder_at(&offending).build_missing_token(
            &self.vocabulary.display_set(expected),
            &offending.error_display(),
        );
        self.push_diagnostic(diagnostic);
    }

    fn report_input_mismatch(&mut self, expected: &[isize]) {
        if !self.begin_error_condition() {
            return;
        }
        let offending = self.lt(1).clone();
        let diagnostic = self.builder_at(&offending).build_mismatched_input(
            &offending.error_display(),
            &self.vocabulary.display_set(expected),
        );
        self.push_diagnostic(diagnostic);
    }

    /// Wraps `tree` together with the syntax errors reported while building it.
    pub fn finish(self, tree: ParseTree) -> AggregateResult<ParseTree> {
        let mut res = AggregateResult::new_ok(tree);
        for diagnostic in self.diagnostics {
            res.add_rec_diagnostic(diagnostic);
        }
        res
    }
}

impl AsMut<ParserBase> for ParserBase {
    fn as_mut(&mut self) -> &mut ParserBase {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grammar::{
            query::{QueryGrammar, COMMA, FROM, ID, STAR, VOCABULARY},
            Grammar,
        },
        stream::{CaseInsensitiveInputStream, CaseMode},
        token::get_all_tokens,
    };

    fn base(input: &str) -> ParserBase {
        let stream = CaseInsensitiveInputStream::new(input, CaseMode::Lower);
        let mut lexer = QueryGrammar.lexer(Box::new(stream));
        let tokens = get_all_tokens(lexer.as_mut()).into_value().unwrap();
        ParserBase::new(
            CommonTokenStream::new(tokens),
            &VOCABULARY,
            PredictionMode::Ll,
        )
    }

    fn messages(base: ParserBase) -> Vec<String> {
        let res = base.finish(ParseTree::rule("test"));
        res.diagnostics().map(|(_, d)| d.to_string()).collect()
    }

    #[test]
    fn sync_lets_rule_end_through() {
        let mut base = base("a b");
        let mut node = ParseTree::rule("test");
        for kind in [SyncKind::BlockStart, SyncKind::LoopEntry, SyncKind::LoopBack] {
            assert_eq!(base.sync(kind, &[COMMA, TOKEN_EPSILON], &mut node), Ok(()));
        }
        assert!(node.children().is_empty());
        assert!(messages(base).is_empty());
    }

    #[test]
    fn block_sync_unwinds_when_deletion_fails() {
        let mut base = base("; ;");
        let mut node = ParseTree::rule("test");
        assert_eq!(
            base.sync(SyncKind::LoopEntry, &[STAR, ID], &mut node),
            Err(RecognitionError)
        );
        assert!(node.children().is_empty());
        assert_eq!(
            messages(base),
            ["line 1:0 mismatched input ';' expecting {'*', Id}"]
        );
    }

    #[test]
    fn loop_back_sync_skips_to_loop_or_follow() {
        let mut base = base("; ; , a");
        let mut node = ParseTree::rule("test");
        assert_eq!(base.sync(SyncKind::LoopBack, &[COMMA, FROM], &mut node), Ok(()));
        assert_eq!(node.children().len(), 2);
        assert_eq!(base.la(1), COMMA);
        assert_eq!(
            messages(base),
            ["line 1:0 extraneous input ';' expecting {'from', ','}"]
        );
    }

    #[test]
    fn errors_are_silent_until_a_match() {
        let mut base = base("; a ;");
        let mut node = ParseTree::rule("test");
        assert!(base.match_token(STAR, &[FROM], &mut node).is_err());
        assert_eq!(base.sync(SyncKind::BlockStart, &[STAR], &mut node), Ok(()));
        let start = base.index();
        base.no_viable_alternative(start);
        base.consume_into(&mut node);
        assert!(base.match_token(ID, &[], &mut node).is_ok());
        let start = base.index();
        base.no_viable_alternative(start);
        assert!(matches!(&node.children()[0], ParseTree::Error(t) if t.text == ";"));
        assert_eq!(
            messages(base),
            [
                "line 1:0 mismatched input ';' expecting '*'",
                "line 1:4 no viable alternative at input ';'",
            ]
        );
    }
}
