use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Result;

/// Occurrence count per byte value. A `BTreeMap` so every iteration over
/// the table visits symbols in ascending order, the seed order the tree
/// builder relies on.
pub type FrequencyTable = BTreeMap<u8, u64>;

pub const CHUNK_SIZE: usize = 8192;

/// Counts byte occurrences in a single streaming pass over `source`.
pub fn analyze<R: Read>(source: &mut R) -> Result<FrequencyTable> {
    let mut table = FrequencyTable::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let count = source.read(&mut buffer)?;
        if count == 0 {
            break;
        }
        for &byte in &buffer[..count] {
            *table.entry(byte).or_insert(0) += 1;
        }
    }
    Ok(table)
}

pub fn analyze_file(path: &Path) -> Result<FrequencyTable> {
    analyze(&mut BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::analyze;

    #[test]
    fn counts_every_byte() {
        let table = analyze(&mut &b"aaabbc"[..]).unwrap();
        assert_eq!(3, table.len());
        assert_eq!(Some(&3), table.get(&b'a'));
        assert_eq!(Some(&2), table.get(&b'b'));
        assert_eq!(Some(&1), table.get(&b'c'));
    }

    #[test]
    fn empty_source_gives_empty_table() {
        let table = analyze(&mut &b""[..]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn iterates_in_ascending_symbol_order() {
        let table = analyze(&mut &b"zebra"[..]).unwrap();
        let symbols: Vec<u8> = table.keys().copied().collect();
        assert_eq!(vec![b'a', b'b', b'e', b'r', b'z'], symbols);
    }
}
