//! Integration tests for the lzhuff container codec

use lzhuff::bitstream::{BitReader, BitWriter};
use lzhuff::container::FIXED_HEADER_SIZE;
use lzhuff::{
    compress, compress_bytes, decompress, decompress_bytes, read_header, CompressOptions,
    CompressWriter, DecompressReader, HuffmanCodec, LzhError, Matcher, Token, MAGIC,
    MAX_WINDOW_SIZE,
};
use std::io::{Read, Write};

fn round_trip(data: &[u8], options: &CompressOptions) -> Vec<u8> {
    let compressed = compress_bytes(data, options).unwrap();
    let decompressed = decompress_bytes(&compressed).unwrap();
    assert_eq!(decompressed, data, "round trip failed for {} bytes", data.len());
    compressed
}

fn text_data(size: usize) -> Vec<u8> {
    let base = b"The quick brown fox jumps over the lazy dog. Pack my box with five dozen liquor jugs. ";
    base.iter().copied().cycle().take(size).collect()
}

fn pseudo_random(size: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..size)
        .map(|_| {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            (state >> 24) as u8
        })
        .collect()
}

#[test]
fn test_empty_input() {
    let compressed = round_trip(b"", &CompressOptions::default());
    let header = read_header(&compressed).unwrap();
    assert_eq!(header.original_size, 0);
    assert!(!header.has_distances());
    // Only the end-of-block symbol is coded: one byte after the header
    assert_eq!(compressed.len(), header.encoded_len() + 1);
}

#[test]
fn test_single_byte() {
    round_trip(b"x", &CompressOptions::default());
    round_trip(&[0u8], &CompressOptions::default());
    round_trip(&[0xFFu8], &CompressOptions::default());
}

#[test]
fn test_run_of_ten_tokens() {
    let data = b"aaaaaaaaaa";
    let mut matcher = Matcher::new(&CompressOptions::default());
    assert_eq!(
        matcher.tokenize(data),
        vec![
            Token::Literal(b'a'),
            Token::Match {
                length: 9,
                distance: 1
            }
        ]
    );

    let compressed = round_trip(data, &CompressOptions::default());
    let header = read_header(&compressed).unwrap();
    assert!(header.has_distances());
    assert_eq!(header.litlen_freqs[b'a' as usize], 1);
    assert_eq!(header.distance_freqs[0], 1);
}

#[test]
fn test_repetitive_data_compresses() {
    let data: Vec<u8> = b"ABCDEFGHIJ".iter().copied().cycle().take(100_000).collect();
    let compressed = round_trip(&data, &CompressOptions::default());
    assert!(
        compressed.len() < data.len() / 20,
        "repetitive data compressed to {} bytes",
        compressed.len()
    );
}

#[test]
fn test_text_data() {
    let data = text_data(50_000);
    let compressed = round_trip(&data, &CompressOptions::default());
    assert!(compressed.len() < data.len() / 2);
}

#[test]
fn test_random_data() {
    let data = pseudo_random(20_000, 0x1234_5678);
    let compressed = round_trip(&data, &CompressOptions::default());
    // Incompressible input still decodes; overhead is the header plus a
    // little coding slack
    assert!(compressed.len() < data.len() + 2048);
}

#[test]
fn test_all_byte_values() {
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    round_trip(&data, &CompressOptions::default());
}

#[test]
fn test_large_input() {
    let mut data = text_data(300_000);
    data.extend(pseudo_random(100_000, 42));
    data.extend(text_data(300_000));
    round_trip(&data, &CompressOptions::default());
}

#[test]
fn test_window_sizes() {
    let mut data = pseudo_random(6000, 7);
    let copy = data.clone();
    data.extend_from_slice(&copy);

    for window in [1u32, 2, 3, 64, 1024, 4096, 6000, MAX_WINDOW_SIZE] {
        let options = CompressOptions::new(window, 32).unwrap();
        let compressed = round_trip(&data, &options);
        assert_eq!(read_header(&compressed).unwrap().window_size, window);
    }
}

#[test]
fn test_small_window_cannot_reach_distant_repeat() {
    let mut data = pseudo_random(5000, 99);
    let copy = data.clone();
    data.extend_from_slice(&copy);

    let narrow = round_trip(&data, &CompressOptions::new(1024, 64).unwrap());
    let wide = round_trip(&data, &CompressOptions::new(8192, 64).unwrap());
    assert!(wide.len() < narrow.len());
}

#[test]
fn test_chain_depth_does_not_affect_correctness() {
    let data = text_data(20_000);
    for max_chain in [1usize, 2, 16, 1024] {
        let options = CompressOptions::default().with_max_chain(max_chain);
        round_trip(&data, &options);
    }
}

#[test]
fn test_deterministic_output() {
    let data = text_data(10_000);
    let options = CompressOptions::default();
    assert_eq!(
        compress_bytes(&data, &options).unwrap(),
        compress_bytes(&data, &options).unwrap()
    );
}

#[test]
fn test_invalid_options_rejected() {
    let bad_window = CompressOptions::default().with_window_size(MAX_WINDOW_SIZE + 1);
    assert!(matches!(
        compress_bytes(b"data", &bad_window),
        Err(LzhError::InvalidWindowSize(_))
    ));
    let bad_chain = CompressOptions::default().with_max_chain(0);
    assert!(matches!(
        compress_bytes(b"data", &bad_chain),
        Err(LzhError::InvalidOptions(_))
    ));
}

#[test]
fn test_corrupted_magic_produces_no_output() {
    let mut compressed = compress_bytes(b"some data", &CompressOptions::default()).unwrap();
    compressed[0] ^= 0xFF;

    let mut output = Vec::new();
    assert!(matches!(
        decompress(&compressed[..], &mut output),
        Err(LzhError::InvalidMagic(_))
    ));
    assert!(output.is_empty());
}

#[test]
fn test_unsupported_version() {
    let mut compressed = compress_bytes(b"versioned", &CompressOptions::default()).unwrap();
    compressed[4] = 9;
    assert!(matches!(
        decompress_bytes(&compressed),
        Err(LzhError::UnsupportedVersion(9))
    ));
}

#[test]
fn test_declared_size_mismatch() {
    let data = text_data(500);
    let compressed = compress_bytes(&data, &CompressOptions::default()).unwrap();

    // Original size lives after magic, version and window size
    let mut larger = compressed.clone();
    larger[10..18].copy_from_slice(&(data.len() as u64 + 1).to_le_bytes());
    assert!(matches!(
        decompress_bytes(&larger),
        Err(LzhError::SizeMismatch { expected, actual })
            if expected == data.len() as u64 + 1 && actual == data.len() as u64
    ));

    let mut smaller = compressed;
    smaller[10..18].copy_from_slice(&(data.len() as u64 - 1).to_le_bytes());
    assert!(matches!(
        decompress_bytes(&smaller),
        Err(LzhError::SizeMismatch { expected, .. }) if expected == data.len() as u64 - 1
    ));
}

#[test]
fn test_truncated_container() {
    let compressed = compress_bytes(&text_data(2000), &CompressOptions::default()).unwrap();
    for len in [0, 3, FIXED_HEADER_SIZE - 1, FIXED_HEADER_SIZE + 4, compressed.len() - 1] {
        let result = decompress_bytes(&compressed[..len]);
        assert!(result.is_err(), "truncation to {} bytes decoded", len);
    }
    assert!(matches!(
        decompress_bytes(&compressed[..compressed.len() - 1]),
        Err(LzhError::UnexpectedEof) | Err(LzhError::InvalidCode)
    ));
}

#[test]
fn test_trailing_bytes_ignored() {
    let data = b"trailing garbage after the end-of-block symbol";
    let mut compressed = compress_bytes(data, &CompressOptions::default()).unwrap();
    compressed.extend_from_slice(b"\xDE\xAD\xBE\xEF");
    assert_eq!(decompress_bytes(&compressed).unwrap(), data);
}

#[test]
fn test_header_layout() {
    let data = b"header layout";
    let compressed = compress_bytes(data, &CompressOptions::new(512, 8).unwrap()).unwrap();
    assert_eq!(&compressed[..4], &MAGIC);
    assert_eq!(u16::from_le_bytes([compressed[4], compressed[5]]), 1);
    assert_eq!(
        u32::from_le_bytes(compressed[6..10].try_into().unwrap()),
        512
    );
    assert_eq!(
        u64::from_le_bytes(compressed[10..18].try_into().unwrap()),
        data.len() as u64
    );

    // Literal/length table: distinct bytes plus end-of-block
    let mut distinct: Vec<u8> = data.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    let count = u16::from_le_bytes([compressed[18], compressed[19]]);
    assert_eq!(count as usize, distinct.len() + 1);
}

#[test]
fn test_stream_api() {
    let data = text_data(30_000);
    let mut compressed = Vec::new();
    let stats = compress(&data[..], &mut compressed, &CompressOptions::default()).unwrap();
    assert_eq!(stats.input_bytes, data.len() as u64);
    assert_eq!(stats.output_bytes, compressed.len() as u64);
    assert!(stats.match_count > 0);
    assert!(stats.ratio() < 1.0);

    let mut output = Vec::new();
    let stats = decompress(&compressed[..], &mut output).unwrap();
    assert_eq!(output, data);
    assert_eq!(stats.output_bytes, data.len() as u64);
}

#[test]
fn test_compress_writer_and_decompress_reader() {
    let data = text_data(10_000);

    let mut writer = CompressWriter::new(Vec::new(), CompressOptions::default()).unwrap();
    for chunk in data.chunks(777) {
        writer.write_all(chunk).unwrap();
    }
    writer.flush().unwrap();
    assert_eq!(writer.buffered_len(), data.len());
    let compressed = writer.finish().unwrap();
    assert_eq!(compressed, compress_bytes(&data, &CompressOptions::default()).unwrap());

    let mut reader = DecompressReader::new(&compressed[..]);
    let mut output = Vec::new();
    let mut buf = [0u8; 100];
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        output.extend_from_slice(&buf[..n]);
    }
    assert_eq!(output, data);
    assert_eq!(reader.stats().unwrap().output_bytes, data.len() as u64);
}

#[test]
fn test_decompress_reader_reports_corruption() {
    let mut reader = DecompressReader::new(&b"not a container"[..]);
    let mut output = Vec::new();
    let err = reader.read_to_end(&mut output).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn test_huffman_codec_over_bitstream() {
    let mut freqs = vec![0u32; 286];
    for (symbol, freq) in [(b'e' as usize, 40), (b't' as usize, 25), (256, 1), (270, 3)] {
        freqs[symbol] = freq;
    }
    let codec = HuffmanCodec::build(&freqs).unwrap();
    let message = [b'e' as u16, b't' as u16, 270, b'e' as u16, 256];

    let mut writer = BitWriter::new(Vec::new());
    for &symbol in &message {
        codec.encode(symbol, &mut writer).unwrap();
    }
    let bytes = writer.finish().unwrap();

    let mut reader = BitReader::new(&bytes[..]);
    for &symbol in &message {
        assert_eq!(codec.decode(&mut reader).unwrap(), symbol);
    }
    assert!(matches!(
        codec.encode(b'z' as u16, &mut BitWriter::new(Vec::new())),
        Err(LzhError::SymbolNotEncodable(122))
    ));
}
