use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::freq::FrequencyTable;

pub const MAGIC: [u8; 2] = *b"HF";

/// Compression writes the header with `padding_bits` 0, then patches this
/// byte in place once the payload is done: magic (2) + size (8) + count (1).
pub const PADDING_BITS_OFFSET: u64 = 11;

/// The container preamble: everything decode needs to rebuild the coding
/// tree and know when to stop.
///
/// Layout: `["HF"][original_size: u64 BE][num_symbols: u8][padding_bits: u8]`
/// followed by `num_symbols` entries of `[symbol: u8][freq: u32 BE]`.
#[derive(Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub original_size: u64,
    pub padding_bits: u8,
    pub frequencies: FrequencyTable,
}

impl FileHeader {
    pub fn encoded_len(num_symbols: usize) -> usize {
        12 + 5 * num_symbols
    }
}

pub fn write_header<W: Write>(
    sink: &mut W,
    table: &FrequencyTable,
    original_size: u64,
    padding_bits: u8,
) -> Result<()> {
    let num_symbols =
        u8::try_from(table.len()).map_err(|_| Error::AlphabetTooLarge(table.len()))?;
    sink.write_all(&MAGIC)?;
    sink.write_all(&original_size.to_be_bytes())?;
    sink.write_all(&[num_symbols, padding_bits])?;
    for (&symbol, &count) in table {
        let freq = u32::try_from(count)
            .map_err(|_| Error::FrequencyOverflow { symbol, count })?;
        sink.write_all(&[symbol])?;
        sink.write_all(&freq.to_be_bytes())?;
    }
    Ok(())
}

pub fn read_header<R: Read>(source: &mut R) -> Result<FileHeader> {
    let mut magic = [0u8; 2];
    read_field(source, &mut magic, "magic number")?;
    if magic != MAGIC {
        return Err(Error::BadMagic { found: magic });
    }

    let mut size_bytes = [0u8; 8];
    read_field(source, &mut size_bytes, "original size")?;
    let original_size = u64::from_be_bytes(size_bytes);

    let mut counts = [0u8; 2];
    read_field(source, &mut counts, "symbol count and padding")?;
    let [num_symbols, padding_bits] = counts;
    if padding_bits > 7 {
        return Err(Error::CorruptHeader("padding bits out of range"));
    }

    let mut frequencies = FrequencyTable::new();
    for _ in 0..num_symbols {
        let mut entry = [0u8; 5];
        read_field(source, &mut entry, "frequency entry")?;
        let symbol = entry[0];
        let freq = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]);
        if freq == 0 {
            return Err(Error::CorruptHeader("zero frequency entry"));
        }
        if frequencies.insert(symbol, u64::from(freq)).is_some() {
            return Err(Error::CorruptHeader("duplicate symbol entry"));
        }
    }

    Ok(FileHeader {
        original_size,
        padding_bits,
        frequencies,
    })
}

fn read_field<R: Read>(source: &mut R, buffer: &mut [u8], field: &'static str) -> Result<()> {
    source.read_exact(buffer).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::TruncatedHeader { field }
        } else {
            Error::Io(e)
        }
    })
}
