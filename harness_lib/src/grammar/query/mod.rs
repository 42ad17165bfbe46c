//! A small case-insensitive query language.
//!
//! ```text
//! script      : statement* EOF ;
//! statement   : SELECT columns FROM Id whereClause? ';' ;
//! columns     : '*' | Id (',' Id)* ;
//! whereClause : WHERE Id '=' value ;
//! value       : Number | String | Id ;
//! ```
//!
//! Keywords and identifiers are matched in lowercase, so the grammar relies on a
//! [`CaseInsensitiveInputStream`](crate::stream::CaseInsensitiveInputStream) in
//! [`CaseMode::Lower`] to accept `SELECT`, `Select` or `select`.

mod lexer;
mod parser;

pub use lexer::QueryLexer;
pub use parser::QueryParser;

use super::Grammar;
use crate::{
    diagnostic::AggregateResult,
    prediction::PredictionMode,
    stream::{CaseMode, CharStream},
    token::{TokenSource, Vocabulary},
    token_stream::CommonTokenStream,
    tree::ParseTree,
};

pub const SELECT: isize = 1;
pub const FROM: isize = 2;
pub const WHERE: isize = 3;
pub const STAR: isize = 4;
pub const COMMA: isize = 5;
pub const EQ: isize = 6;
pub const SEMI: isize = 7;
pub const ID: isize = 8;
pub const NUMBER: isize = 9;
pub const STRING: isize = 10;
pub const WHITESPACE: isize = 11;
pub const COMMENT: isize = 12;

pub static VOCABULARY: Vocabulary = Vocabulary::new(
    &[
        None,
        Some("'select'"),
        Some("'from'"),
        Some("'where'"),
        Some("'*'"),
        Some("','"),
        Some("'='"),
        Some("';'"),
    ],
    &[
        None,
        Some("SELECT"),
        Some("FROM"),
        Some("WHERE"),
        Some("STAR"),
        Some("COMMA"),
        Some("EQ"),
        Some("SEMI"),
        Some("Id"),
        Some("Number"),
        Some("String"),
        Some("Whitespace"),
        Some("Comment"),
    ],
);

pub const RULE_NAMES: &[&str] = &["script", "statement", "columns", "whereClause", "value"];

pub struct QueryGrammar;

impl Grammar for QueryGrammar {
    fn name(&self) -> &'static str {
        "query"
    }

    fn vocabulary(&self) -> &'static Vocabulary {
        &VOCABULARY
    }

    fn rule_names(&self) -> &'static [&'static str] {
        RULE_NAMES
    }

    fn case_mode(&self) -> Option<CaseMode> {
        Some(CaseMode::Lower)
    }

    fn lexer<'a>(&self, input: Box<dyn CharStream + 'a>) -> Box<dyn TokenSource + 'a> {
        Box::new(QueryLexer::new(input))
    }

    fn parse(
        &self,
        tokens: CommonTokenStream,
        rule: &str,
        mode: PredictionMode,
    ) -> Option<AggregateResult<ParseTree>> {
        let mut parser = QueryParser::new(tokens, mode);
        let tree = match rule {
            "script" => parser.script(),
            "statement" => parser.statement(),
            "columns" => parser.columns(),
            "whereClause" => parser.where_clause(),
            "value" => parser.value(),
            _ => return None,
        };
        Some(parser.finish(tree))
    }
}
