//! CLI entry point for the layered collection generator

use clap::Parser;
use layerloom::io::cli::{Cli, CollectionRunner};
use layerloom::io::logging::init_logging;

fn main() -> layerloom::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet)?;
    let mut runner = CollectionRunner::new(cli);
    runner.process()?;
    Ok(())
}
