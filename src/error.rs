use thiserror::Error;

/// Everything that can go wrong while compressing, decompressing or
/// verifying a file. Pipelines are fail-fast: the first error aborts the
/// operation and any partially written output must be discarded.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is empty, nothing to compress")]
    EmptyInput,

    #[error("input contains {0} distinct byte values (max 255 supported)")]
    AlphabetTooLarge(usize),

    #[error("priority queue is empty")]
    QueueEmpty,

    #[error("frequency table has no entries")]
    EmptyAlphabet,

    #[error("symbol {symbol:#04x} occurs {count} times, which does not fit the header's u32 frequency field")]
    FrequencyOverflow { symbol: u8, count: u64 },

    #[error("code for symbol {0:#04x} is a prefix of the code for symbol {1:#04x}")]
    NotPrefixFree(u8, u8),

    #[error("generated code for symbol {0:#04x} is empty")]
    EmptyCode(u8),

    #[error("bad magic number: expected \"HF\", found {found:02x?}")]
    BadMagic { found: [u8; 2] },

    #[error("header truncated while reading {field}")]
    TruncatedHeader { field: &'static str },

    #[error("corrupt header: {0}")]
    CorruptHeader(&'static str),

    #[error("bit stream exhausted")]
    EndOfStream,

    #[error("compressed stream ended after {decoded} of {expected} symbols")]
    TruncatedStream { decoded: u64, expected: u64 },

    #[error("corrupt stream: {0}")]
    CorruptStream(&'static str),

    #[error("size mismatch: expected {expected} bytes, found {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("content mismatch at byte offset {offset}")]
    ContentMismatch { offset: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
