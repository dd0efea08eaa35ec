use std::path::PathBuf;

use anyhow::{bail, ensure};
use clap::Parser;

mod bitio;
mod code;
mod commands;
mod error;
mod freq;
mod header;
mod heap;
mod pipeline;
mod tree;
mod verify;

/// Lossless file compressor using static per-file Huffman coding.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// File to compress or decompress
    #[arg(short, long)]
    input: PathBuf,

    /// Destination file
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Compress the input file
    #[arg(short, long)]
    compress: bool,

    /// Decompress the input file
    #[arg(short, long)]
    decompress: bool,

    /// After decompressing, byte-compare the output against this file
    #[arg(long, value_name = "ORIGINAL")]
    verify: Option<PathBuf>,

    /// Print the frequency and code tables before compressing
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ensure!(
        cli.input.exists(),
        "input file {} does not exist",
        cli.input.display()
    );
    ensure!(
        !(cli.compress && cli.decompress),
        "provide either --compress or --decompress, not both"
    );
    if cli.compress {
        commands::compress(&cli.input, &cli.output, cli.verbose)
    } else if cli.decompress {
        commands::decompress(&cli.input, &cli.output, cli.verify.as_deref())
    } else {
        bail!("provide one of --compress or --decompress")
    }
}
