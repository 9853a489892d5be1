//! huffpix-core: Huffman compression for grayscale pixel streams
//!
//! This library provides the codec behind the `huffpix` tool:
//! - Builds a Huffman tree from symbol frequencies with a fixed tie-break
//! - Derives a prefix-free code table from the tree
//! - Packs codewords into a container with a (width, height) header
//! - Decodes a container back into exactly `width * height` symbols
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `frequency`: Frequency tables and the side-channel text format
//! - `tree`: Greedy tree construction
//! - `codes`: Code table derivation
//! - `bitio`: 16-bit group bit reading/writing
//! - `container`: Header layout and file storage
//! - `encoder` / `decoder`: The bit-stream codec
//! - `codec`: A session bundling tree and code table
//! - `pixels`: Pixel intensity <-> symbol conversion
//! - `metrics`: Observable session behavior
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Deterministic**: Equal inputs always give the same tree and bytes
//! - **No shipped table**: Both sides rebuild the tree from the same
//!   frequency table; the container only carries the shape and the bits
//!
//! # Example
//! ```
//! use huffpix_core::{build_tree, decode, derive_codes, encode, FrequencyEntry, FrequencyTable};
//!
//! let freqs = FrequencyTable::from_entries([
//!     FrequencyEntry::new("A", 0.5),
//!     FrequencyEntry::new("B", 0.25),
//!     FrequencyEntry::new("C", 0.25),
//! ])?;
//! let tree = build_tree(&freqs)?;
//! let codes = derive_codes(&tree);
//!
//! let bytes = encode(&codes, &["A", "B", "C", "A"], 4, 1)?;
//! assert_eq!(bytes.len(), 4 + 2);
//! assert_eq!(decode(&tree, &bytes)?, vec!["A", "B", "C", "A"]);
//! # Ok::<(), huffpix_core::Error>(())
//! ```

pub mod bitio;
pub mod codec;
pub mod codes;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod pixels;
pub mod tree;

// Re-export commonly used types
pub use codec::HuffmanCodec;
pub use codes::{derive_codes, CodeTable, Codeword};
pub use container::Container;
pub use decoder::decode;
pub use encoder::{encode, Encoded};
pub use error::{Error, MalformedStream, Result};
pub use frequency::{FrequencyEntry, FrequencyTable, Symbol};
pub use tree::{build_tree, HuffNode, HuffmanTree};
