use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Read, Write};
use textify::cli::parse_or_usage;
use textify::wrap::{wrap_lines, DEFAULT_COLUMN};

/// Wrap lines read from stdin without breaking words
#[derive(Parser, Debug)]
#[command(name = "wrapify", version)]
struct Cli {
    /// Column at which to wrap
    #[arg(default_value_t = DEFAULT_COLUMN)]
    column: usize,
}

fn main() -> Result<()> {
    let cli = parse_or_usage::<Cli>();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    let lines: Vec<&str> = input.lines().collect();

    let mut out = BufWriter::new(io::stdout().lock());
    for line in wrap_lines(&lines, cli.column) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}
