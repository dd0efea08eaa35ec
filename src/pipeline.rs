use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::bitio::{BitReader, BitWriter};
use crate::code;
use crate::error::{Error, Result};
use crate::freq::{self, CHUNK_SIZE};
use crate::header::{self, PADDING_BITS_OFFSET};
use crate::tree::{self, Node};

/// Compresses `input` into the self-describing container format at
/// `output`.
///
/// The header goes out first with a placeholder padding count, the payload
/// is streamed through a [`BitWriter`], and the padding byte is patched in
/// place once the true value is known. That keeps memory flat: neither the
/// input nor the encoded payload is ever held whole.
pub fn compress(input: &Path, output: &Path) -> Result<()> {
    let table = freq::analyze_file(input)?;
    if table.is_empty() {
        return Err(Error::EmptyInput);
    }
    if table.len() > 255 {
        return Err(Error::AlphabetTooLarge(table.len()));
    }
    // Counts must fit the header's u32 field before any of them shape the
    // tree; a count this large also implies a code deeper than u64 bits.
    for (&symbol, &count) in &table {
        if u32::try_from(count).is_err() {
            return Err(Error::FrequencyOverflow { symbol, count });
        }
    }

    let root = tree::build(&table)?;
    let codes = code::generate(&root)?;
    let original_size: u64 = table.values().sum();

    let mut sink = BufWriter::new(File::create(output)?);
    header::write_header(&mut sink, &table, original_size, 0)?;

    let mut source = File::open(input)?;
    let mut writer = BitWriter::new(sink);
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let count = source.read(&mut buffer)?;
        if count == 0 {
            break;
        }
        for &byte in &buffer[..count] {
            let code = codes
                .get(&byte)
                .ok_or(Error::CorruptStream("symbol missing from code table"))?;
            writer.write_code(*code)?;
        }
    }

    let (padding_bits, sink) = writer.close()?;
    let mut file = sink.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    file.seek(SeekFrom::Start(PADDING_BITS_OFFSET))?;
    file.write_all(&[padding_bits])?;
    Ok(())
}

/// Rebuilds the coding tree from the header of `input` and decodes the
/// payload bit by bit into `output`.
///
/// Termination is governed solely by the decoded-symbol count reaching the
/// header's original size; the padding bits exist only to byte-align the
/// payload and are never interpreted.
pub fn decompress(input: &Path, output: &Path) -> Result<()> {
    let mut source = BufReader::new(File::open(input)?);
    let file_header = header::read_header(&mut source)?;
    if file_header.original_size == 0 {
        return Err(Error::CorruptHeader("original size is zero"));
    }
    if file_header.frequencies.is_empty() {
        return Err(Error::CorruptHeader("frequency table is empty"));
    }

    let root = tree::build(&file_header.frequencies)?;
    let mut bits = BitReader::new(source);
    let mut sink = BufWriter::new(File::create(output)?);

    let mut current = &root;
    let mut decoded = 0u64;
    while decoded < file_header.original_size {
        let bit = bits.read_bit().map_err(|e| match e {
            Error::EndOfStream => Error::TruncatedStream {
                decoded,
                expected: file_header.original_size,
            },
            other => other,
        })?;
        let next: &Node = match current {
            Node::Internal { left, right, .. } => {
                if bit == 0 {
                    left
                } else {
                    right
                }
            }
            Node::Leaf { .. } => return Err(Error::CorruptStream("descended past a leaf")),
        };
        match next {
            Node::Leaf { .. } if next.is_filler() => {
                return Err(Error::CorruptStream("path leads to the filler leaf"))
            }
            Node::Leaf { symbol, .. } => {
                sink.write_all(&[*symbol])?;
                decoded += 1;
                current = &root;
            }
            Node::Internal { .. } => current = next,
        }
    }
    sink.flush()?;
    Ok(())
}

pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
}

impl CompressionStats {
    pub fn measure(input: &Path, output: &Path) -> Result<Self> {
        Ok(Self {
            original_size: fs::metadata(input)?.len(),
            compressed_size: fs::metadata(output)?.len(),
        })
    }

    pub fn ratio(&self) -> f64 {
        self.compressed_size as f64 / self.original_size as f64 * 100.0
    }
}

impl Display for CompressionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Original size:     {} bytes", self.original_size)?;
        writeln!(f, "Compressed size:   {} bytes", self.compressed_size)?;
        writeln!(f, "Compression ratio: {:.2}%", self.ratio())?;
        if self.compressed_size <= self.original_size {
            writeln!(
                f,
                "Space saved:       {} bytes",
                self.original_size - self.compressed_size
            )
        } else {
            writeln!(
                f,
                "Space increased:   {} bytes (input too small to compress)",
                self.compressed_size - self.original_size
            )
        }
    }
}
