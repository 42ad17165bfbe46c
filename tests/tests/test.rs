use std::fs;

use harness_lib::{
    diagnostic::{AggregateResult, Code, DiagnosticKind},
    harness::{self, HarnessOptsBuilder, HarnessOutput},
};

include! {concat!(env!("OUT_DIR"), "/tests.rs")}

fn run(file: &str, strict: bool) -> AggregateResult<HarnessOutput> {
    let source = fs::read_to_string(file).unwrap();
    let opts = HarnessOptsBuilder::new().strict(strict).build().unwrap();
    harness::run(&source, file, &opts).unwrap()
}

fn print_diagnostics<T>(res: &AggregateResult<T>) {
    for (t, d) in res.diagnostics() {
        match t {
            DiagnosticKind::Rec => println!("Rec: {d}"),
            DiagnosticKind::Err => println!("Err: {d}"),
        }
    }
}

fn tree_test(file: &str, expected: &str) {
    let res = run(file, false);
    if !res.is_ok() {
        println!(
            "Expected file `{}` to parse cleanly but got the following diagnostics:",
            file
        );
        print_diagnostics(&res);
        println!();
    }
    let output = res.into_value().unwrap();
    let tree = output.tree().unwrap().to_string_tree();

    pretty_assertions::assert_str_eq!(
        tree,
        expected,
        "The parse tree (left) does not match the expected tree (right)",
    );
}

fn diagnostics_test(file: &str, expected_codes: Vec<Code>, needs_err: bool) {
    let res = run(file, needs_err);
    if needs_err && !res.is_err() {
        panic!("Expected the strict run to fail, but it didn't!");
    }
    if !needs_err && res.is_err() {
        println!("Expected a recovered tree, but the run failed with:");
        print_diagnostics(&res);
        panic!();
    }

    let found_codes: Vec<Code> = res.diagnostics().map(|(_, d)| *d.code()).collect();
    if expected_codes != found_codes {
        print_diagnostics(&res);
        pretty_assertions::assert_eq!(
            found_codes,
            expected_codes,
            "The diagnostic codes (left) don't match the expected codes (right)",
        );
    }
}
