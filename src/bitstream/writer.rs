//! BitWriter - LSB-first bit packer
//!
//! Bits accumulate in a 64-bit buffer and complete bytes move into an
//! output buffer, which is handed to the underlying writer in chunks.

use super::{low_bits_mask, IO_BUFF_SIZE, MAX_BITS_PER_CALL};
use crate::Result;
use std::io::Write;

/// Bit-level writer over a byte sink
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    writer: W,
    /// Pending bits, valid in the low `bit_count` positions
    bit_buff: u64,
    /// Number of valid bits in `bit_buff`; below 8 between calls
    bit_count: u32,
    out_buff: Vec<u8>,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bit_buff: 0,
            bit_count: 0,
            out_buff: Vec::with_capacity(IO_BUFF_SIZE),
            bytes_written: 0,
        }
    }

    /// Append the low `nbits` bits of `value`, least significant bit first
    pub fn write_bits(&mut self, value: u32, nbits: u32) -> Result<()> {
        debug_assert!(nbits <= MAX_BITS_PER_CALL);
        if nbits == 0 {
            return Ok(());
        }

        self.bit_buff |= (value as u64 & low_bits_mask(nbits)) << self.bit_count;
        self.bit_count += nbits;

        while self.bit_count >= 8 {
            self.out_buff.push(self.bit_buff as u8);
            self.bit_buff >>= 8;
            self.bit_count -= 8;
        }

        if self.out_buff.len() >= IO_BUFF_SIZE {
            self.flush_output_buffer()?;
        }
        Ok(())
    }

    /// Write a single bit
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad with zero bits up to the next byte boundary
    pub fn align_to_byte(&mut self) -> Result<()> {
        if self.bit_count > 0 {
            self.write_bits(0, 8 - self.bit_count)?;
        }
        Ok(())
    }

    /// Emit any partial trailing byte and flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.align_to_byte()?;
        self.flush_output_buffer()?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush everything and return the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Number of complete bytes produced so far, buffered or not
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written + self.out_buff.len() as u64
    }

    /// Number of bits waiting for a byte boundary
    pub fn pending_bits(&self) -> u32 {
        self.bit_count
    }

    fn flush_output_buffer(&mut self) -> Result<()> {
        if !self.out_buff.is_empty() {
            self.writer.write_all(&self.out_buff)?;
            self.bytes_written += self.out_buff.len() as u64;
            self.out_buff.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_first_packing() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        writer.write_bit(false).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes, vec![0b0000_1101]);
    }

    #[test]
    fn test_byte_aligned_value_is_little_endian() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0x1234_5678, 32).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes, 0x1234_5678u32.to_le_bytes());
    }

    #[test]
    fn test_value_masked_to_width() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xFF, 4).unwrap();
        writer.write_bits(0, 4).unwrap();
        assert_eq!(writer.finish().unwrap(), vec![0x0F]);
    }

    #[test]
    fn test_zero_width_write_is_noop() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xFFFF, 0).unwrap();
        assert_eq!(writer.pending_bits(), 0);
        assert!(writer.finish().unwrap().is_empty());
    }

    #[test]
    fn test_align_and_counters() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        assert_eq!(writer.pending_bits(), 3);
        assert_eq!(writer.bytes_written(), 0);

        writer.align_to_byte().unwrap();
        assert_eq!(writer.pending_bits(), 0);
        assert_eq!(writer.bytes_written(), 1);

        // Already aligned: no padding byte is added
        writer.align_to_byte().unwrap();
        assert_eq!(writer.bytes_written(), 1);

        writer.write_bits(0xAB, 8).unwrap();
        assert_eq!(writer.finish().unwrap(), vec![0b101, 0xAB]);
    }

    #[test]
    fn test_large_output_spills_buffer() {
        let mut writer = BitWriter::new(Vec::new());
        for i in 0..(IO_BUFF_SIZE * 3) {
            writer.write_bits(i as u32, 8).unwrap();
        }
        assert_eq!(writer.bytes_written(), (IO_BUFF_SIZE * 3) as u64);
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes.len(), IO_BUFF_SIZE * 3);
        assert_eq!(bytes[IO_BUFF_SIZE + 5], ((IO_BUFF_SIZE + 5) % 256) as u8);
    }
}
