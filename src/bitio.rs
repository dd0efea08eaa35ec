use std::io::{Read, Write};

use crate::code::Code;
use crate::error::{Error, Result};

/// Packs bits into bytes, most significant bit first, flushing each byte
/// to the sink as soon as it is complete.
pub struct BitWriter<W: Write> {
    sink: W,
    current: u8,
    filled: u8,
    total_bits: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            current: 0,
            filled: 0,
            total_bits: 0,
        }
    }

    pub fn write_bit(&mut self, bit: u8) -> std::io::Result<()> {
        if bit != 0 {
            self.current |= 1 << (7 - self.filled);
        }
        self.filled += 1;
        self.total_bits += 1;
        if self.filled == 8 {
            self.sink.write_all(&[self.current])?;
            self.current = 0;
            self.filled = 0;
        }
        Ok(())
    }

    /// Emits `len` bits of `bits`, lowest index first, so a code reaches
    /// the wire in root-to-leaf descent order.
    pub fn write_bits(&mut self, bits: u64, len: u8) -> std::io::Result<()> {
        for i in 0..len {
            self.write_bit(((bits >> i) & 1) as u8)?;
        }
        Ok(())
    }

    pub fn write_code(&mut self, code: Code) -> std::io::Result<()> {
        self.write_bits(code.bits, code.len)
    }

    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    /// Zero-pads and flushes any partial byte, handing back the sink and
    /// the number of padding bits added (0 if the stream was byte-aligned).
    pub fn close(mut self) -> std::io::Result<(u8, W)> {
        let padding = if self.filled == 0 { 0 } else { 8 - self.filled };
        if self.filled > 0 {
            self.sink.write_all(&[self.current])?;
        }
        Ok((padding, self.sink))
    }
}

/// Pulls bits out of a byte source, most significant bit first, fetching
/// bytes lazily one at a time.
pub struct BitReader<R: Read> {
    source: R,
    current: u8,
    consumed: u8,
    finished: bool,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            current: 0,
            consumed: 8, // force a fetch on the first read
            finished: false,
        }
    }

    pub fn read_bit(&mut self) -> Result<u8> {
        if self.finished {
            return Err(Error::EndOfStream);
        }
        if self.consumed == 8 {
            let mut buffer = [0u8; 1];
            match self.source.read_exact(&mut buffer) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    self.finished = true;
                    return Err(Error::EndOfStream);
                }
                Err(e) => return Err(Error::Io(e)),
            }
            self.current = buffer[0];
            self.consumed = 0;
        }
        let bit = (self.current >> (7 - self.consumed)) & 1;
        self.consumed += 1;
        Ok(bit)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::{BitReader, BitWriter};
    use crate::error::Error;

    #[test]
    fn bits_fill_bytes_msb_first() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [1, 0, 1, 1, 0, 0, 0, 1] {
            writer.write_bit(bit).unwrap();
        }
        let (padding, bytes) = writer.close().unwrap();
        assert_eq!(0, padding);
        assert_eq!(vec![0b1011_0001], bytes);
    }

    #[test]
    fn close_zero_pads_the_final_byte() {
        let mut writer = BitWriter::new(Vec::new());
        for _ in 0..11 {
            writer.write_bit(1).unwrap();
        }
        assert_eq!(11, writer.total_bits());
        let (padding, bytes) = writer.close().unwrap();
        assert_eq!(5, padding);
        // ceil(11 / 8) bytes, unused low-order bits zero.
        assert_eq!(vec![0xff, 0b1110_0000], bytes);
    }

    #[test]
    fn empty_stream_closes_without_output() {
        let (padding, bytes) = BitWriter::new(Vec::new()).close().unwrap();
        assert_eq!(0, padding);
        assert!(bytes.is_empty());
    }

    #[test]
    fn write_bits_emits_lowest_index_first() {
        let mut writer = BitWriter::new(Vec::new());
        // Bit index 0 is 1, the rest 0: the 1 must come out first.
        writer.write_bits(0b001, 3).unwrap();
        let (padding, bytes) = writer.close().unwrap();
        assert_eq!(5, padding);
        assert_eq!(vec![0b1000_0000], bytes);
    }

    #[test]
    fn reader_returns_bits_msb_first() {
        let mut reader = BitReader::new(&[0b1011_0001u8][..]);
        let bits: Vec<u8> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(vec![1, 0, 1, 1, 0, 0, 0, 1], bits);
    }

    #[test]
    fn reader_round_trips_writer_output() {
        let pattern = [1u8, 1, 0, 1, 0, 0, 1, 1, 1, 0, 1];
        let mut writer = BitWriter::new(Vec::new());
        for &bit in &pattern {
            writer.write_bit(bit).unwrap();
        }
        let (_, bytes) = writer.close().unwrap();

        let mut reader = BitReader::new(bytes.as_slice());
        for &expected in &pattern {
            assert_eq!(expected, reader.read_bit().unwrap());
        }
    }

    #[test]
    fn exhausted_reader_keeps_failing() {
        let mut reader = BitReader::new(&[0xffu8][..]);
        for _ in 0..8 {
            reader.read_bit().unwrap();
        }
        assert!(!reader.is_finished());
        assert!(matches!(reader.read_bit(), Err(Error::EndOfStream)));
        assert!(reader.is_finished());
        assert!(matches!(reader.read_bit(), Err(Error::EndOfStream)));
    }
}
