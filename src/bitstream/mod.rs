//! Bit-level I/O over byte streams
//!
//! Bits are packed least-significant-bit first: the first bit written lands
//! in bit 0 of the first output byte. A multi-bit value written at a byte
//! boundary therefore appears in little-endian byte order.

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

/// Widest value accepted by a single `write_bits`/`read_bits` call
pub const MAX_BITS_PER_CALL: u32 = 32;

/// Size of the byte buffer between the bit cursor and the underlying stream
pub const IO_BUFF_SIZE: usize = 0x800;

/// Mask selecting the low `nbits` bits of a value
#[inline]
pub(crate) fn low_bits_mask(nbits: u32) -> u64 {
    if nbits >= 64 {
        u64::MAX
    } else {
        (1u64 << nbits) - 1
    }
}
