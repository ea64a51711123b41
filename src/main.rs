//! namemark - mark duplicate record names in JSON collections
//!
//! Main binary entry point for the command-line interface.

use clap::Parser;
use namemark::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::run(cli)?;
    Ok(())
}
