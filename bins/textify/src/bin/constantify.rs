use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, BufWriter, Write};
use textify::cli::parse_or_usage;
use textify::constant::constantify;

/// Turn strings read from stdin into constant assignments
#[derive(Parser, Debug)]
#[command(name = "constantify", version)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = parse_or_usage::<Cli>();

    let mut out = BufWriter::new(io::stdout().lock());
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if let Some(assignment) = constantify(&line) {
            writeln!(out, "{}", assignment)?;
        }
    }
    out.flush()?;
    Ok(())
}
