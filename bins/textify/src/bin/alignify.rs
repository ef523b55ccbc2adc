use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::io::{self, BufWriter, Read, Write};
use textify::align::{align_block, AlignSide, DEFAULT_INDICATOR};
use textify::cli::parse_or_usage;

/// Align lines read from stdin around an indicator
#[derive(Parser, Debug)]
#[command(name = "alignify", version)]
struct Cli {
    /// String to align on
    #[arg(short = 'i', value_name = "indicator", default_value = DEFAULT_INDICATOR,
          value_parser = NonEmptyStringValueParser::new())]
    indicator: String,

    /// Extra spaces before the indicator
    #[arg(short = 'p', value_name = "padding", default_value_t = 0)]
    padding: usize,

    /// Align on the rightmost indicator column (default)
    #[arg(short = 'r', overrides_with = "leftmost")]
    rightmost: bool,

    /// Align on the leftmost indicator column
    #[arg(short = 'l', overrides_with = "rightmost")]
    leftmost: bool,
}

fn main() -> Result<()> {
    let cli = parse_or_usage::<Cli>();
    let side = if cli.leftmost {
        AlignSide::Leftmost
    } else {
        AlignSide::Rightmost
    };

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;

    // Keep line terminators so the output mirrors the input exactly
    let lines: Vec<&str> = input.split_inclusive('\n').collect();

    let mut out = BufWriter::new(io::stdout().lock());
    for line in align_block(&lines, &cli.indicator, side, cli.padding) {
        out.write_all(line.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
