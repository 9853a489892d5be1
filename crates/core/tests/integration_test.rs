//! Integration tests for full codec sessions.
//!
//! These tests verify end-to-end behavior: pixels -> frequency table ->
//! tree -> code table -> container -> decode -> pixels, with verification that
//! output matches input.

use huffpix_core::{
    build_tree,
    container::{read_header, Container},
    decode, derive_codes, encode,
    metrics::CodecMetrics,
    pixels, Error, FrequencyEntry, FrequencyTable, HuffmanCodec, HuffmanTree, MalformedStream,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn abc() -> FrequencyTable {
    FrequencyTable::from_entries([
        FrequencyEntry::new("A", 0.5),
        FrequencyEntry::new("B", 0.25),
        FrequencyEntry::new("C", 0.25),
    ])
    .expect("valid table")
}

/// The worked example: {A:0.5, B:0.25, C:0.25} and [A, B, C, A] at 4x1.
#[test]
fn test_abc_scenario() {
    let freqs = abc();
    let tree = build_tree(&freqs).expect("tree build failed");
    let codes = derive_codes(&tree);

    let lengths = codes.code_lengths();
    assert_eq!(lengths["A"], 1);
    assert_eq!(lengths["B"], 2);
    assert_eq!(lengths["C"], 2);

    let bytes = encode(&codes, &["A", "B", "C", "A"], 4, 1).expect("encode failed");

    // 6 codeword bits fit in one 16-bit group
    assert_eq!(bytes.len(), 4 + 2);
    assert_eq!(read_header(&bytes).unwrap(), (4, 1));

    let decoded = decode(&tree, &bytes).expect("decode failed");
    assert_eq!(decoded, vec!["A", "B", "C", "A"]);
}

/// Round-trip a synthetic image through the pixel helpers.
#[test]
fn test_pixel_image_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (width, height) = (64usize, 48usize);

    // Smooth gradient with a little noise: skewed distribution
    let image: Vec<u8> = (0..width * height)
        .map(|i| ((i % width) as u8 / 4).saturating_add(rng.gen_range(0..4)))
        .collect();

    let freqs = pixels::frequencies(&image).expect("frequencies failed");
    let codec = HuffmanCodec::new(&freqs).expect("codec build failed");

    let symbols = pixels::to_symbols(&image);
    let encoded = codec.encode(&symbols, width, height).expect("encode failed");

    // Fewer than 8 bits per pixel for a skewed alphabet
    assert!(encoded.container.body.len() < image.len());
    assert_eq!((encoded.payload_bits + encoded.padding_bits) % 16, 0);
    assert!(encoded.padding_bits < 16);

    let bytes = encoded.container.to_bytes();
    let decoded = decode(codec.tree(), &bytes).expect("decode failed");
    assert_eq!(pixels::from_symbols(&decoded).unwrap(), image);
}

/// Every byte value present once: a perfectly flat 256-symbol alphabet.
#[test]
fn test_all_symbols() {
    let image: Vec<u8> = (0..=255).collect();
    let freqs = pixels::frequencies(&image).unwrap();
    let tree = build_tree(&freqs).unwrap();
    let codes = derive_codes(&tree);

    // A flat power-of-two alphabet gets fixed 8-bit codes
    assert!(codes.iter().all(|(_, code)| code.len() == 8));

    let bytes = encode(&codes, &pixels::to_symbols(&image), 16, 16).unwrap();
    assert_eq!(bytes.len(), 4 + 256);

    let decoded = decode(&tree, &bytes).unwrap();
    assert_eq!(pixels::from_symbols(&decoded).unwrap(), image);
}

/// Single intensity image: the placeholder code carries one bit per pixel.
#[test]
fn test_single_symbol_image() {
    let image = vec![200u8; 40];
    let freqs = pixels::frequencies(&image).unwrap();
    let codec = HuffmanCodec::new(&freqs).unwrap();

    let encoded = codec.encode(&pixels::to_symbols(&image), 8, 5).unwrap();
    assert_eq!(encoded.payload_bits, 40);
    assert_eq!(encoded.container.body, vec![0u8; 6]);

    let decoded = codec.decode(&encoded.container).unwrap();
    assert_eq!(decoded, vec!["200"; 40]);
}

/// A decoder holding a different tree fails or decodes garbage.
#[test]
fn test_mismatched_tree() {
    let codes = derive_codes(&build_tree(&abc()).unwrap());
    let bytes = encode(&codes, &["C"; 8], 8, 1).unwrap();

    // "C" = 11 under abc; a flat two-symbol tree reads every 1 as "Y"
    let other = HuffmanTree::from_entries([
        FrequencyEntry::new("X", 1.0),
        FrequencyEntry::new("Y", 1.0),
    ])
    .unwrap();
    let decoded = decode(&other, &bytes).unwrap();
    assert_ne!(decoded, vec!["C"; 8]);

    // Declaring more symbols than the body holds is detected
    let mut oversized = bytes.clone();
    oversized[0..2].copy_from_slice(&100u16.to_be_bytes());
    assert!(matches!(
        decode(&other, &oversized),
        Err(Error::MalformedStream(MalformedStream::OutOfBits { expected: 100, .. }))
    ));
}

/// Full session through the filesystem, with separate encoder and decoder.
#[test]
fn test_file_session() {
    let dir = tempfile::tempdir().unwrap();
    let freq_path = dir.path().join("distribution.txt");
    let huff_path = dir.path().join("compressed.huff");

    let image: Vec<u8> = (0..300u32).map(|i| (i * i % 7) as u8).collect();
    pixels::frequencies(&image).unwrap().save(&freq_path).unwrap();

    let encoder = HuffmanCodec::from_frequency_file(&freq_path).unwrap();
    let encoded = encoder
        .encode_to_file(&huff_path, &pixels::to_symbols(&image), 20, 15)
        .unwrap();

    let mut metrics = CodecMetrics::new();
    metrics.raw_bytes = image.len() as u64;
    metrics.record_encoded(&encoded);
    metrics.complete();
    assert!(metrics.compression_ratio() < 1.0);

    let on_disk = Container::read_from_file(&huff_path).unwrap();
    assert_eq!(on_disk, encoded.container);

    let decoder = HuffmanCodec::from_frequency_file(&freq_path).unwrap();
    assert_eq!(decoder.fingerprint(), encoder.fingerprint());

    let (_, symbols) = decoder.decode_from_file(&huff_path).unwrap();
    assert_eq!(pixels::from_symbols(&symbols).unwrap(), image);
}

/// Header limits are enforced before anything is written.
#[test]
fn test_dimension_limits() {
    let codes = derive_codes(&build_tree(&abc()).unwrap());

    let bytes = encode::<&str>(&codes, &[], 65_535, 0).unwrap();
    assert_eq!(read_header(&bytes).unwrap(), (65_535, 0));

    assert!(matches!(
        encode::<&str>(&codes, &[], 0, 65_536),
        Err(Error::DimensionOverflow { field: "height", value: 65_536 })
    ));
}
