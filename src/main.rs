//! Pecel CLI: combine a directory tree into one file; use --dry-run to list without writing.

use anyhow::Result;
use clap::Parser;
use pecel::engine::arg_parser::Cli;
use pecel::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
