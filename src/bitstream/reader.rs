//! BitReader - LSB-first bit unpacker
//!
//! The bit buffer is replenished one whole byte at a time from an input
//! buffer that is itself refilled from the underlying reader.

use super::{low_bits_mask, IO_BUFF_SIZE, MAX_BITS_PER_CALL};
use crate::{LzhError, Result};
use std::io::{ErrorKind, Read};

/// Bit-level reader over a byte source
#[derive(Debug)]
pub struct BitReader<R: Read> {
    reader: R,
    /// Buffered bits, valid in the low `bit_count` positions
    bit_buff: u64,
    bit_count: u32,
    in_buff: Box<[u8]>,
    in_pos: usize,
    in_bytes: usize,
    source_exhausted: bool,
    bytes_consumed: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new BitReader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bit_buff: 0,
            bit_count: 0,
            in_buff: vec![0u8; IO_BUFF_SIZE].into_boxed_slice(),
            in_pos: 0,
            in_bytes: 0,
            source_exhausted: false,
            bytes_consumed: 0,
        }
    }

    /// Read `nbits` bits, least significant bit first
    ///
    /// Fails with [`LzhError::UnexpectedEof`] when the source runs dry.
    /// Bits pulled in before the failure are not given back, so a failed
    /// read leaves the reader unusable for further decoding.
    pub fn read_bits(&mut self, nbits: u32) -> Result<u32> {
        debug_assert!(nbits <= MAX_BITS_PER_CALL);
        while self.bit_count < nbits {
            let byte = self.next_byte()?.ok_or(LzhError::UnexpectedEof)?;
            self.bit_buff |= (byte as u64) << self.bit_count;
            self.bit_count += 8;
        }

        let value = self.bit_buff & low_bits_mask(nbits);
        self.bit_buff >>= nbits;
        self.bit_count -= nbits;
        Ok(value as u32)
    }

    /// Read a single bit
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Drop buffered bits up to the next byte boundary
    pub fn align_to_byte(&mut self) {
        let partial = self.bit_count % 8;
        self.bit_buff >>= partial;
        self.bit_count -= partial;
    }

    /// True once the source is exhausted and no buffered bits remain
    pub fn eof(&mut self) -> Result<bool> {
        if self.bit_count > 0 || self.in_pos < self.in_bytes {
            return Ok(false);
        }
        self.fill_input()?;
        Ok(self.in_pos >= self.in_bytes)
    }

    /// Number of source bytes pulled into the bit buffer so far
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.in_pos >= self.in_bytes {
            self.fill_input()?;
            if self.in_pos >= self.in_bytes {
                return Ok(None);
            }
        }
        let byte = self.in_buff[self.in_pos];
        self.in_pos += 1;
        self.bytes_consumed += 1;
        Ok(Some(byte))
    }

    fn fill_input(&mut self) -> Result<()> {
        if self.source_exhausted {
            return Ok(());
        }
        loop {
            match self.reader.read(&mut self.in_buff) {
                Ok(0) => {
                    self.source_exhausted = true;
                    self.in_pos = 0;
                    self.in_bytes = 0;
                    return Ok(());
                }
                Ok(n) => {
                    self.in_pos = 0;
                    self.in_bytes = n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
