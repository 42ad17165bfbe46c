mod cli;
mod logging;
mod report;
mod util;

use anyhow::{bail, Context, Result};
use clap::Parser;

use harness_lib::harness;
use std::io::Write;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    logging::init(args.log_level(), args.log_format())?;

    let source = cli::open_input_source(&args)?;

    let opts = cli::extract_harness_opts(&args)?;
    let res = harness::run(source.source(), source.name(), &opts)?;

    if !res.is_ok() {
        report::eprint_aggregate(&res, &source, args.rich_diagnostics());
    }

    let Some(output) = res.into_value() else {
        bail!("couldn't parse due to the previous errors");
    };

    cli::open_output(&args)?
        .write_all(output.render(opts.output_format()).as_bytes())
        .with_context(|| "Failed to write to output".to_string())?;

    Ok(())
}
