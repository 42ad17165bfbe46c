use super::{COMMA, EQ, FROM, ID, NUMBER, SELECT, SEMI, STAR, STRING, VOCABULARY, WHERE};
use crate::{
    diagnostic::AggregateResult,
    grammar::{ParserBase, RecognitionError, SyncKind},
    prediction::PredictionMode,
    token::{TOKEN_EOF, TOKEN_EPSILON},
    token_stream::CommonTokenStream,
    tree::ParseTree,
};

// Tokens that may follow each rule where it is called.
const FOLLOW_SCRIPT: &[isize] = &[];
const FOLLOW_STATEMENT: &[isize] = &[SELECT, TOKEN_EOF];
const FOLLOW_COLUMNS: &[isize] = &[FROM];
const FOLLOW_WHERE_CLAUSE: &[isize] = &[SEMI];
const FOLLOW_VALUE: &[isize] = &[TOKEN_EPSILON];

const RULE_END: &[isize] = &[TOKEN_EPSILON];
const STATEMENTS: &[isize] = &[SELECT, TOKEN_EOF];
const MORE_COLUMNS: &[isize] = &[COMMA, TOKEN_EPSILON];

pub struct QueryParser {
    base: ParserBase,
}

impl AsMut<ParserBase> for QueryParser {
    fn as_mut(&mut self) -> &mut ParserBase {
        &mut self.base
    }
}

impl QueryParser {
    pub fn new(tokens: CommonTokenStream, mode: PredictionMode) -> Self {
        tracing::debug!(%mode, "query parser");
        Self {
            base: ParserBase::new(tokens, &VOCABULARY, mode),
        }
    }

    pub fn finish(self, tree: ParseTree) -> AggregateResult<ParseTree> {
        self.base.finish(tree)
    }

    pub fn script(&mut self) -> ParseTree {
        ParserBase::rule(self, "script", FOLLOW_SCRIPT, Self::script_body)
    }

    fn script_body(&mut self, node: &mut ParseTree) -> Result<(), RecognitionError> {
        self.base.sync(SyncKind::LoopEntry, STATEMENTS, node)?;
        while self.base.la(1) == SELECT {
            node.push(self.statement());
            self.base.sync(SyncKind::LoopBack, STATEMENTS, node)?;
        }
        self.base.match_token(TOKEN_EOF, RULE_END, node)
    }

    pub fn statement(&mut self) -> ParseTree {
        ParserBase::rule(self, "statement", FOLLOW_STATEMENT, Self::statement_body)
    }

    fn statement_body(&mut self, node: &mut ParseTree) -> Result<(), RecognitionError> {
        self.base.match_token(SELECT, &[STAR, ID], node)?;
        node.push(self.columns());
        self.base.match_token(FROM, &[ID], node)?;
        self.base.match_token(ID, &[WHERE, SEMI], node)?;
        self.base.sync(SyncKind::BlockStart, &[WHERE, SEMI], node)?;
        if self.base.la(1) == WHERE {
            node.push(self.where_clause());
        }
        self.base.match_token(SEMI, RULE_END, node)
    }

    pub fn columns(&mut self) -> ParseTree {
        ParserBase::rule(self, "columns", FOLLOW_COLUMNS, Self::columns_body)
    }

    fn columns_body(&mut self, node: &mut ParseTree) -> Result<(), RecognitionError> {
        self.base.sync(SyncKind::BlockStart, &[STAR, ID], node)?;
        match self.base.la(1) {
            STAR => self.base.match_token(STAR, RULE_END, node),
            ID => {
                self.base.match_token(ID, MORE_COLUMNS, node)?;
                self.base.sync(SyncKind::LoopEntry, MORE_COLUMNS, node)?;
                while self.base.la(1) == COMMA {
                    self.base.match_token(COMMA, &[ID], node)?;
                    self.base.match_token(ID, MORE_COLUMNS, node)?;
                    self.base.sync(SyncKind::LoopBack, MORE_COLUMNS, node)?;
                }
                Ok(())
            }
            // Reached only in error-recovery mode, where sync lets any token through.
            _ => {
                let start = self.base.index();
                Err(self.base.no_viable_alternative(start))
            }
        }
    }

    pub fn where_clause(&mut self) -> ParseTree {
        ParserBase::rule(self, "whereClause", FOLLOW_WHERE_CLAUSE, Self::where_clause_body)
    }

    fn where_clause_body(&mut self, node: &mut ParseTree) -> Result<(), RecognitionError> {
        self.base.match_token(WHERE, &[ID], node)?;
        self.base.match_token(ID, &[EQ], node)?;
        self.base.match_token(EQ, &[ID, NUMBER, STRING], node)?;
        node.push(self.value());
        Ok(())
    }

    pub fn value(&mut self) -> ParseTree {
        ParserBase::rule(self, "value", FOLLOW_VALUE, Self::value_body)
    }

    fn value_body(&mut self, node: &mut ParseTree) -> Result<(), RecognitionError> {
        self.base.match_set(&[ID, NUMBER, STRING], RULE_END, node)
    }
}
