use std::time::{Duration, Instant};

use crate::{
    diagnostic::AggregateResult,
    grammar::{self, Grammar},
    inspectors,
    prediction::PredictionMode,
    stream::{CaseInsensitiveInputStream, CaseMode, CharStream, InputStream},
    token::{format_tokens, get_all_tokens, Token, Vocabulary},
    token_stream::CommonTokenStream,
    tree::ParseTree,
    util::format_elapsed,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// The line protocol read by the grammar editor.
    AntlrTree,
    TreeDot,
    TokensJson,
    TreeJson,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::AntlrTree => "antlr tree",
            OutputFormat::TreeDot => "tree dot",
            OutputFormat::TokensJson => "tokens json",
            OutputFormat::TreeJson => "tree json",
        };
        write!(f, "{name}")
    }
}

/// Which case the lexer sees its lookahead in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CaseSetting {
    /// Whatever the grammar asks for.
    #[default]
    Grammar,
    /// Raw input, no folding.
    Sensitive,
    Lower,
    Upper,
}

impl CaseSetting {
    pub fn resolve(self, grammar: &dyn Grammar) -> Option<CaseMode> {
        match self {
            CaseSetting::Grammar => grammar.case_mode(),
            CaseSetting::Sensitive => None,
            CaseSetting::Lower => Some(CaseMode::Lower),
            CaseSetting::Upper => Some(CaseMode::Upper),
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("unknown grammar `{name}`, available grammars: {available}")]
    UnknownGrammar { name: String, available: String },
    #[error("grammar `{grammar}` has no rule `{rule}`")]
    UnknownRule { rule: String, grammar: &'static str },
    #[error("can't use the {0} format when only tokenizing")]
    NoTreeToEmit(OutputFormat),
}

#[derive(Clone)]
pub struct HarnessOpts {
    grammar: &'static dyn Grammar,
    root_rule: &'static str,
    prediction_mode: PredictionMode,
    only_tokenize: bool,
    case: Option<CaseMode>,
    strict: bool,
    output_format: OutputFormat,
}

impl HarnessOpts {
    pub fn grammar(&self) -> &'static dyn Grammar {
        self.grammar
    }

    pub fn root_rule(&self) -> &'static str {
        self.root_rule
    }

    pub fn prediction_mode(&self) -> PredictionMode {
        self.prediction_mode
    }

    pub fn only_tokenize(&self) -> bool {
        self.only_tokenize
    }

    pub fn case(&self) -> Option<CaseMode> {
        self.case
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

#[derive(Debug, Clone)]
pub struct HarnessOptsBuilder {
    grammar: String,
    root_rule: Option<String>,
    prediction_mode: PredictionMode,
    only_tokenize: bool,
    case: CaseSetting,
    strict: bool,
    output_format: OutputFormat,
}

impl Default for HarnessOptsBuilder {
    fn default() -> Self {
        Self {
            grammar: "query".to_owned(),
            root_rule: None,
            prediction_mode: PredictionMode::default(),
            only_tokenize: false,
            case: CaseSetting::default(),
            strict: false,
            output_format: OutputFormat::AntlrTree,
        }
    }
}

impl HarnessOptsBuilder {
    /// The `query` grammar from its first rule, in LL mode, printing the line protocol.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grammar(mut self, name: impl Into<String>) -> Self {
        self.grammar = name.into();
        self
    }

    /// Start parsing at `rule` instead of the grammar's first rule.
    pub fn root_rule(mut self, rule: impl Into<String>) -> Self {
        self.root_rule = Some(rule.into());
        self
    }

    pub fn prediction_mode(mut self, mode: PredictionMode) -> Self {
        self.prediction_mode = mode;
        self
    }

    pub fn only_tokenize(mut self, only_tokenize: bool) -> Self {
        self.only_tokenize = only_tokenize;
        self
    }

    pub fn case(mut self, case: CaseSetting) -> Self {
        self.case = case;
        self
    }

    /// Treat syntax errors as fatal: no output is produced when there are any.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn build(self) -> Result<HarnessOpts, HarnessError> {
        let grammar =
            grammar::find_grammar(&self.grammar).ok_or_else(|| HarnessError::UnknownGrammar {
                available: grammar::grammar_names().collect::<Vec<_>>().join(", "),
                name: self.grammar.clone(),
            })?;

        let root_rule = match &self.root_rule {
            None => grammar.default_rule(),
            Some(rule) => grammar
                .rule_names()
                .iter()
                .copied()
                .find(|r| *r == rule.as_str())
                .ok_or_else(|| HarnessError::UnknownRule {
                    rule: rule.clone(),
                    grammar: grammar.name(),
                })?,
        };

        let needs_tree = matches!(
            self.output_format,
            OutputFormat::TreeDot | OutputFormat::TreeJson
        );
        if self.only_tokenize && needs_tree {
            return Err(HarnessError::NoTreeToEmit(self.output_format));
        }

        Ok(HarnessOpts {
            grammar,
            root_rule,
            prediction_mode: self.prediction_mode,
            only_tokenize: self.only_tokenize,
            case: self.case.resolve(grammar),
            strict: self.strict,
            output_format: self.output_format,
        })
    }
}

/// What one run produced.
#[derive(Debug, Clone)]
pub struct HarnessOutput {
    vocabulary: &'static Vocabulary,
    pub lexer_time: Duration,
    pub tokens: Vec<Token>,
    /// Absent when only tokenizing.
    pub parse: Option<(Duration, ParseTree)>,
}

impl HarnessOutput {
    pub fn tree(&self) -> Option<&ParseTree> {
        self.parse.as_ref().map(|(_, tree)| tree)
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::AntlrTree => {
                let mut out = format!(
                    "LexerTime {}\nTokens {}\n",
                    format_elapsed(self.lexer_time),
                    format_tokens(&self.tokens, self.vocabulary)
                );
                if let Some((parser_time, tree)) = &self.parse {
                    out += &format!(
                        "ParserTime {}\nTree {}\n",
                        format_elapsed(*parser_time),
                        tree.to_string_tree()
                    );
                }
                out
            }
            OutputFormat::TreeDot => match self.tree() {
                Some(tree) => inspectors::dot::inspect_tree(tree),
                None => String::new(),
            },
            OutputFormat::TokensJson => {
                inspectors::json::inspect_tokens(&self.tokens, self.vocabulary)
            }
            OutputFormat::TreeJson => match self.tree() {
                Some(tree) => inspectors::json::inspect_tree(tree),
                None => String::new(),
            },
        }
    }
}

fn open_stream(source: &str, source_name: &str, case: Option<CaseMode>) -> Box<dyn CharStream> {
    match case {
        Some(mode) => {
            Box::new(CaseInsensitiveInputStream::new(source, mode).with_name(source_name))
        }
        None => Box::new(InputStream::new(source).with_name(source_name)),
    }
}

/// Lexes `source` and, unless only tokenizing, parses it from the root rule.
///
/// Syntax errors are recoverable diagnostics of the result. In strict mode they are upgraded to
/// errors and the result holds no output. Fails if the grammar doesn't know the root rule.
pub fn run(
    source: &str,
    source_name: &str,
    opts: &HarnessOpts,
) -> Result<AggregateResult<HarnessOutput>, HarnessError> {
    let mut res = run_harness(source, source_name, opts)?;
    if opts.strict {
        res.upgrade_all();
    }
    Ok(res)
}

fn run_harness(
    source: &str,
    source_name: &str,
    opts: &HarnessOpts,
) -> Result<AggregateResult<HarnessOutput>, HarnessError> {
    let grammar = opts.grammar;
    tracing::debug!(
        grammar = grammar.name(),
        source = source_name,
        case = ?opts.case,
        "running harness"
    );

    let stream = open_stream(source, source_name, opts.case);
    let mut lexer = grammar.lexer(stream);
    let start = Instant::now();
    let tokens = get_all_tokens(lexer.as_mut());
    let lexer_time = start.elapsed();
    tracing::debug!(elapsed = ?lexer_time, "lexing done");

    let parsed = match tokens.value() {
        Some(tokens) if !opts.only_tokenize => {
            let stream = CommonTokenStream::new(tokens.clone());
            let start = Instant::now();
            let tree = grammar
                .parse(stream, opts.root_rule, opts.prediction_mode)
                .ok_or_else(|| HarnessError::UnknownRule {
                    rule: opts.root_rule.to_owned(),
                    grammar: grammar.name(),
                })?;
            let parser_time = start.elapsed();
            tracing::debug!(elapsed = ?parser_time, rule = opts.root_rule, "parsing done");
            Some((parser_time, tree))
        }
        _ => None,
    };

    Ok(tokens.and_then(|tokens| {
        let output = HarnessOutput {
            vocabulary: grammar.vocabulary(),
            lexer_time,
            tokens,
            parse: None,
        };
        match parsed {
            Some((parser_time, tree)) => tree.map(|tree| HarnessOutput {
                parse: Some((parser_time, tree)),
                ..output
            }),
            None => AggregateResult::new_ok(output),
        }
    }))
}
