use crate::{logging::LogFormat, util::{self, PathOrStd}};

use harness_lib::{
    harness::{self, CaseSetting, HarnessError, HarnessOpts, HarnessOptsBuilder},
    prediction::PredictionMode,
};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use codespan_reporting::files::SimpleFile;

use std::{fs::File, io::Read};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    AntlrTree,
    TreeDot,
    TokensJson,
    TreeJson,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Case {
    /// Use the case the grammar was written for.
    Grammar,
    /// Don't fold the lookahead.
    #[value(name = "none")]
    Sensitive,
    Lower,
    Upper,
}

/// Runs a grammar over a text file and prints the tokens and parse tree.
///
/// The positional arguments follow the grammar editor's runner: `FILE [ROOT] [ONLY_TOKENIZE] [MODE]`.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The input file, use `-` for std in.
    #[arg(default_value = "../../Text")]
    input_path: PathOrStd,

    /// The rule to start parsing at. Defaults to the grammar's first rule.
    root: Option<String>,

    /// `true` to only run the lexer. Anything but `true` parses.
    only_tokenize: Option<String>,

    /// Prediction mode: `sll`, `ll`, anything else selects exact ambiguity detection.
    mode: Option<String>,

    /// The grammar to run.
    #[arg(short = 'g', long, default_value = "query")]
    grammar: String,

    /// The case the lexer sees its lookahead in.
    #[arg(long, value_enum, default_value = "grammar")]
    case: Case,

    /// The output format.
    #[arg(short = 'e', long, value_name = "FORMAT", value_enum, default_value = "antlr-tree")]
    emit: OutputFormat,

    /// Fail on syntax errors instead of printing a recovered tree.
    #[arg(long)]
    strict: bool,

    /// Show diagnostics with source snippets instead of `line L:C message` lines.
    #[arg(long)]
    rich_diagnostics: bool,

    /// A log filter like `debug` or `harness_lib::grammar=trace`. Falls back to `HARNESS_LOG`.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    #[arg(long, value_enum, default_value = "compact")]
    log_format: LogFormat,

    /// The output file, use `-` for std out.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output_path: PathOrStd,
}

impl Args {
    pub fn rich_diagnostics(&self) -> bool {
        self.rich_diagnostics
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

pub fn open_input_source(args: &Args) -> anyhow::Result<SimpleFile<String, String>> {
    match &args.input_path {
        PathOrStd::Path(path) => {
            if !path.exists() {
                bail!("Input file `{}` doesn't exist", path.display());
            }
            let mut handle = File::open(path)
                .with_context(|| format!("Failed to open input file `{}`", path.display()))?;
            let mut s = String::new();
            handle
                .read_to_string(&mut s)
                .with_context(|| format!("Failed to read from input file `{}`", path.display()))?;

            Ok(SimpleFile::new(path.display().to_string(), s))
        }
        PathOrStd::StdStream => {
            let mut handle = std::io::stdin().lock();
            let mut s = String::new();
            handle
                .read_to_string(&mut s)
                .context("Failed to read from stdin")?;

            Ok(SimpleFile::new("stdin stream".to_owned(), s))
        }
    }
}

pub fn extract_harness_opts(args: &Args) -> Result<HarnessOpts, HarnessError> {
    let opts = HarnessOptsBuilder::new().grammar(args.grammar.as_str());

    let opts = if let Some(root) = &args.root {
        opts.root_rule(root.as_str())
    } else {
        opts
    };

    let format = match args.emit {
        OutputFormat::AntlrTree => harness::OutputFormat::AntlrTree,
        OutputFormat::TreeDot => harness::OutputFormat::TreeDot,
        OutputFormat::TokensJson => harness::OutputFormat::TokensJson,
        OutputFormat::TreeJson => harness::OutputFormat::TreeJson,
    };

    let case = match args.case {
        Case::Grammar => CaseSetting::Grammar,
        Case::Sensitive => CaseSetting::Sensitive,
        Case::Lower => CaseSetting::Lower,
        Case::Upper => CaseSetting::Upper,
    };

    opts.only_tokenize(args.only_tokenize.as_deref().is_some_and(util::parse_flag))
        .prediction_mode(
            args.mode
                .as_deref()
                .map_or(PredictionMode::default(), PredictionMode::from_arg),
        )
        .case(case)
        .strict(args.strict)
        .output_format(format)
        .build()
}

pub fn open_output(args: &Args) -> anyhow::Result<Box<dyn std::io::Write>> {
    match &args.output_path {
        PathOrStd::Path(path) => std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)
            .map(|f| Box::new(f) as Box<dyn std::io::Write>)
            .with_context(|| format!("Failed to open output file `{}`", path.display())),
        PathOrStd::StdStream => Ok(Box::new(std::io::stdout().lock())),
    }
}
