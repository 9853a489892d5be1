//! Bit-stream decoder.
//!
//! Walks the tree from the root one bit at a time (0 = left, 1 = right). Each
//! leaf reached emits its symbol and restarts the walk at the root. Decoding
//! stops after exactly `width * height` symbols; whatever bits remain are
//! padding. The walk is linear in the number of bits consumed.
//!
//! The tree must be built from the same frequency table the encoder used.
//! Nothing in the container can verify that.

use crate::bitio::BitReader;
use crate::codes::PLACEHOLDER_CODE;
use crate::container::{read_header, Container, HEADER_SIZE};
use crate::error::{MalformedStream, Result};
use crate::frequency::Symbol;
use crate::tree::{HuffNode, HuffmanTree};
use tracing::debug;

/// Decode container bytes back into the symbol sequence.
///
/// # Errors
/// - `MalformedStream::TruncatedHeader` if the header is incomplete
/// - `MalformedStream::OutOfBits` if the body ends before
///   `width * height` symbols were produced
/// - `MalformedStream::InvalidPlaceholderBit` if a single-symbol stream
///   carries a `1`
pub fn decode(tree: &HuffmanTree, bytes: &[u8]) -> Result<Vec<Symbol>> {
    let (width, height) = read_header(bytes)?;
    let expected = usize::from(width) * usize::from(height);
    decode_body(tree, &bytes[HEADER_SIZE..], expected)
}

/// Decode an already parsed container.
pub fn decode_container(tree: &HuffmanTree, container: &Container) -> Result<Vec<Symbol>> {
    decode_body(tree, &container.body, container.element_count())
}

/// Decode exactly `expected` symbols from a packed body.
pub fn decode_body(tree: &HuffmanTree, body: &[u8], expected: usize) -> Result<Vec<Symbol>> {
    let mut reader = BitReader::new(body);
    // Every symbol costs at least one bit, so a lying header cannot force a
    // huge allocation
    let mut symbols = Vec::with_capacity(expected.min(reader.bits_remaining()));

    match tree.root() {
        HuffNode::Leaf { symbol, .. } => {
            while symbols.len() < expected {
                let position = reader.position();
                let bit = next_bit(&mut reader, symbols.len(), expected)?;
                if bit != PLACEHOLDER_CODE {
                    return Err(MalformedStream::InvalidPlaceholderBit { position }.into());
                }
                symbols.push(symbol.clone());
            }
        }
        root => {
            while symbols.len() < expected {
                let mut node = root;
                loop {
                    match node {
                        HuffNode::Leaf { symbol, .. } => {
                            symbols.push(symbol.clone());
                            break;
                        }
                        HuffNode::Internal { left, right, .. } => {
                            node = if next_bit(&mut reader, symbols.len(), expected)? {
                                right
                            } else {
                                left
                            };
                        }
                    }
                }
            }
        }
    }

    debug!(
        symbols = symbols.len(),
        bits_consumed = reader.position(),
        padding_bits = reader.bits_remaining(),
        "decoded symbol stream"
    );

    Ok(symbols)
}

fn next_bit(reader: &mut BitReader<'_>, decoded: usize, expected: usize) -> Result<bool> {
    reader
        .read_bit()
        .map_err(|_| MalformedStream::OutOfBits { decoded, expected }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frequency::{FrequencyEntry, FrequencyTable};

    fn abc_tree() -> HuffmanTree {
        HuffmanTree::build(
            &FrequencyTable::from_entries([
                FrequencyEntry::new("A", 0.5),
                FrequencyEntry::new("B", 0.25),
                FrequencyEntry::new("C", 0.25),
            ])
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_abca() {
        let bytes = [0x00, 0x04, 0x00, 0x01, 0b0101_1000, 0x00];
        assert_eq!(decode(&abc_tree(), &bytes).unwrap(), vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_padding_is_ignored() {
        // 4x1 needs only 6 bits; the remaining zeros would decode as more As
        let bytes = [0x00, 0x02, 0x00, 0x02, 0b0101_1000, 0x00, 0x00, 0x00];
        assert_eq!(decode(&abc_tree(), &bytes).unwrap(), vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_out_of_bits() {
        // 20 symbols of at least one bit each cannot fit in 16 bits
        let bytes = [0x00, 0x14, 0x00, 0x01, 0xFF, 0xFF];
        assert!(matches!(
            decode(&abc_tree(), &bytes),
            Err(Error::MalformedStream(MalformedStream::OutOfBits {
                decoded: 8,
                expected: 20
            }))
        ));
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            decode(&abc_tree(), &[0x00]),
            Err(Error::MalformedStream(MalformedStream::TruncatedHeader { .. }))
        ));
    }

    #[test]
    fn test_zero_elements() {
        let bytes = [0x00, 0x00, 0xFF, 0xFF];
        assert!(decode(&abc_tree(), &bytes).unwrap().is_empty());
    }

    #[test]
    fn test_single_leaf() {
        let tree = HuffmanTree::from_entries([FrequencyEntry::new("128", 1.0)]).unwrap();

        let bytes = [0x00, 0x03, 0x00, 0x02, 0x00, 0x00];
        assert_eq!(decode(&tree, &bytes).unwrap(), vec!["128"; 6]);

        let corrupt = [0x00, 0x03, 0x00, 0x02, 0b0010_0000, 0x00];
        assert!(matches!(
            decode(&tree, &corrupt),
            Err(Error::MalformedStream(MalformedStream::InvalidPlaceholderBit {
                position: 2
            }))
        ));

        let short = [0x00, 0x20, 0x00, 0x01, 0x00, 0x00];
        assert!(matches!(
            decode(&tree, &short),
            Err(Error::MalformedStream(MalformedStream::OutOfBits {
                decoded: 16,
                expected: 32
            }))
        ));
    }
}
