use std::path::Path;

use anyhow::Context;

use crate::{
    code, freq,
    pipeline::{self, CompressionStats},
    tree, verify,
};

pub fn compress(input: &Path, output: &Path, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        print_tables(input).context("printing frequency and code tables")?;
    }
    println!("Compressing {} to {}...", input.display(), output.display());
    pipeline::compress(input, output)
        .context(format!("compressing {}", input.display()))?;
    let stats = CompressionStats::measure(input, output)
        .context("measuring compression statistics")?;
    print!("{stats}");
    println!("Successfully compressed to {}", output.display());
    Ok(())
}

pub fn decompress(
    input: &Path,
    output: &Path,
    verify_against: Option<&Path>,
) -> anyhow::Result<()> {
    println!("Decompressing {} to {}...", input.display(), output.display());
    pipeline::decompress(input, output)
        .context(format!("decompressing {}", input.display()))?;
    println!("Successfully decompressed to {}", output.display());
    if let Some(original) = verify_against {
        verify::verify(original, output).context(format!(
            "comparing {} against {}",
            output.display(),
            original.display()
        ))?;
        println!("Output matches {}", original.display());
    }
    Ok(())
}

fn print_tables(input: &Path) -> anyhow::Result<()> {
    let table =
        freq::analyze_file(input).context(format!("scanning {}", input.display()))?;
    if table.is_empty() {
        // The compression pass reports the empty input.
        return Ok(());
    }
    let root = tree::build(&table).context("building the coding tree")?;
    let codes = code::generate(&root).context("generating the code table")?;
    for (&symbol, &count) in &table {
        let Some(code) = codes.get(&symbol) else {
            continue;
        };
        if symbol.is_ascii_graphic() {
            println!(
                "'{}' ({symbol:#04x}): {count} occurrences, code {code}",
                symbol as char
            );
        } else {
            println!("({symbol:#04x}): {count} occurrences, code {code}");
        }
    }
    Ok(())
}
