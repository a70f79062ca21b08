//! Container codec
//!
//! A container is a [`FileHeader`] followed by one Huffman-coded block of
//! tokens terminated by the end-of-block symbol. The two Huffman tables
//! are never transmitted directly: the decoder rebuilds them from the
//! frequency tables stored in the header.

mod decoder;
mod encoder;
mod header;

pub use decoder::{decompress, decompress_bytes, read_container, DecompressReader};
pub use encoder::{compress, compress_bytes, write_container, CompressWriter, SymbolFrequencies};
pub use header::{FileHeader, FIXED_HEADER_SIZE, FREQ_ENTRY_SIZE};

use crate::bitstream::BitReader;
use crate::Result;

/// Parse just the header of an in-memory container
pub fn read_header(data: &[u8]) -> Result<FileHeader> {
    FileHeader::read_from(&mut BitReader::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompressOptions, LzhError};

    #[test]
    fn test_read_header() {
        let options = CompressOptions::default().with_window_size(2048);
        let data = compress_bytes(b"header inspection", &options).unwrap();
        let header = read_header(&data).unwrap();
        assert_eq!(header.window_size, 2048);
        assert_eq!(header.original_size, 17);
        assert!(header.encoded_len() < data.len());
    }

    #[test]
    fn test_read_header_rejects_garbage() {
        assert!(matches!(
            read_header(b"LZ"),
            Err(LzhError::TruncatedHeader("magic"))
        ));
        assert!(matches!(
            read_header(b"GZIP-ish data"),
            Err(LzhError::InvalidMagic(_))
        ));
    }
}
