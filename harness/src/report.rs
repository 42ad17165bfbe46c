use crate::util::byte_offset;

use codespan_reporting::{
    diagnostic::{Label, Severity},
    files::SimpleFile,
    term::{self, termcolor::ColorChoice},
};
use harness_lib::diagnostic::{AggregateResult, Diagnostic, DiagnosticKind};
use is_terminal::IsTerminal;

pub fn eprint_aggregate<T>(
    aggregate: &AggregateResult<T>,
    file: &SimpleFile<String, String>,
    rich: bool,
) {
    if rich {
        eprint_rich(aggregate, file);
    } else {
        for (_, d) in aggregate.diagnostics() {
            eprintln!("{d}");
        }
    }
}

fn eprint_rich<T>(aggregate: &AggregateResult<T>, file: &SimpleFile<String, String>) {
    let color = if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut writer = term::termcolor::StandardStream::stderr(color);
    let config = term::Config {
        chars: term::Chars {
            single_primary_caret: '─',
            single_secondary_caret: '─',
            multi_primary_caret_start: '╯',
            multi_secondary_caret_start: '╯',
            multi_primary_caret_end: '╯',
            multi_secondary_caret_end: '╯',
            ..term::Chars::box_drawing()
        },

        ..Default::default()
    };

    for (t, d) in aggregate.diagnostics() {
        let diagnostic = to_codespan(t, d, file.source());
        if let Err(err) = term::emit(&mut writer, &config, file, &diagnostic) {
            // Stderr is gone, fall back to the plain line.
            tracing::warn!(%err, "couldn't render diagnostic");
            eprintln!("{d}");
        }
    }
}

fn to_codespan(
    kind: DiagnosticKind,
    d: &Diagnostic,
    source: &str,
) -> codespan_reporting::diagnostic::Diagnostic<()> {
    let severity = match kind {
        DiagnosticKind::Rec => Severity::Warning,
        DiagnosticKind::Err => Severity::Error,
    };

    // Spans count characters, codespan wants byte offsets.
    let span = *d.span();
    let range = byte_offset(source, span.start())..byte_offset(source, span.end());

    codespan_reporting::diagnostic::Diagnostic::new(severity)
        .with_message(d.message())
        .with_code(d.code().to_string())
        .with_labels(vec![Label::primary((), range)
            .with_message(format!("line {}:{}", d.line(), d.column()))])
}
