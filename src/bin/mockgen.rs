#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use mockgen::cli::args::CliArgs;
use mockgen::cli::{driver, reporter::Reporter};

fn main() -> Result<()> {
    // Initialize tracing if MOCKGEN_LOG or RUST_LOG is set (zero cost otherwise).
    // Supports MOCKGEN_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    mockgen::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let result = driver::run(&args, &cwd)?;

    if args.output.is_none() {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(result.text.as_bytes())
            .context("failed to write generated source")?;
        stdout.flush().context("failed to flush stdout")?;
    }

    let color = !args.no_color && (args.pretty || std::io::stderr().is_terminal());
    let reporter = Reporter::new(color, args.verbose);
    let output = reporter.render(&result.diagnostics);
    if !output.is_empty() {
        eprintln!("{output}");
    }
    if args.output.is_some() {
        eprintln!("{}", reporter.summary(result.mocks.len(), &result.diagnostics));
    }

    Ok(())
}
