//! Grammars the harness can drive.
//!
//! A [`Grammar`] bundles what a generated lexer/parser pair exposes to a test harness: its
//! vocabulary, its rule names, the case it expects lookahead in, a lexer factory and a way to
//! invoke a rule by name.

mod lexer;
mod parser;
pub mod query;

pub use lexer::LexerBase;
pub use parser::{ParserBase, RecognitionError, SyncKind};

use crate::{
    diagnostic::AggregateResult,
    prediction::PredictionMode,
    stream::{CaseMode, CharStream},
    token::{TokenSource, Vocabulary},
    token_stream::CommonTokenStream,
    tree::ParseTree,
};

pub trait Grammar: Sync {
    fn name(&self) -> &'static str;

    fn vocabulary(&self) -> &'static Vocabulary;

    /// All parser rules. The first one is the default root rule.
    fn rule_names(&self) -> &'static [&'static str];

    /// The case the lexer expects lookahead in, or `None` if the grammar is case-sensitive.
    fn case_mode(&self) -> Option<CaseMode>;

    fn lexer<'a>(&self, input: Box<dyn CharStream + 'a>) -> Box<dyn TokenSource + 'a>;

    /// Parses `tokens` starting at `rule`. Returns `None` if the grammar has no such rule.
    fn parse(
        &self,
        tokens: CommonTokenStream,
        rule: &str,
        mode: PredictionMode,
    ) -> Option<AggregateResult<ParseTree>>;

    fn default_rule(&self) -> &'static str {
        self.rule_names()[0]
    }
}

static GRAMMARS: &[&dyn Grammar] = &[&query::QueryGrammar];

pub fn grammar_names() -> impl Iterator<Item = &'static str> {
    GRAMMARS.iter().map(|g| g.name())
}

pub fn find_grammar(name: &str) -> Option<&'static dyn Grammar> {
    GRAMMARS.iter().copied().find(|g| g.name() == name)
}
