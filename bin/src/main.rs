//! Oracle datum reader.

mod cli;
mod logger;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().exec()
}
