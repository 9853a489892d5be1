//! Codec session: one tree and its code table.
//!
//! A `HuffmanCodec` is built from a frequency table and lives for a single
//! encode or decode session. Both sides of a transfer build their own codec
//! from the same side-channel table; the codec itself is never persisted.

use crate::codes::{derive_codes, CodeTable};
use crate::container::Container;
use crate::decoder::decode_container;
use crate::encoder::{encode_container, Encoded};
use crate::error::Result;
use crate::frequency::{FrequencyTable, Symbol};
use crate::tree::{build_tree, HuffmanTree};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    codes: CodeTable,
    fingerprint: u32,
}

impl HuffmanCodec {
    pub fn new(frequencies: &FrequencyTable) -> Result<Self> {
        let tree = build_tree(frequencies)?;
        let codes = derive_codes(&tree);
        tree.log_structure();

        Ok(Self {
            tree,
            codes,
            fingerprint: frequencies.fingerprint(),
        })
    }

    /// Load the side-channel table at `path` and build a codec from it.
    pub fn from_frequency_file(path: &Path) -> Result<Self> {
        Self::new(&FrequencyTable::load(path)?)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Fingerprint of the frequency table this codec was built from.
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    pub fn encode<S: AsRef<str>>(
        &self,
        symbols: &[S],
        width: usize,
        height: usize,
    ) -> Result<Encoded> {
        encode_container(&self.codes, symbols, width, height)
    }

    pub fn decode(&self, container: &Container) -> Result<Vec<Symbol>> {
        decode_container(&self.tree, container)
    }

    /// Encode and write the container to `path`.
    pub fn encode_to_file<S: AsRef<str>>(
        &self,
        path: &Path,
        symbols: &[S],
        width: usize,
        height: usize,
    ) -> Result<Encoded> {
        let encoded = self.encode(symbols, width, height)?;
        encoded.container.write_to_file(path)?;
        info!(
            path = %path.display(),
            width,
            height,
            fingerprint = %format!("{:#010x}", self.fingerprint),
            "compressed"
        );
        Ok(encoded)
    }

    /// Read the container at `path` and decode it.
    pub fn decode_from_file(&self, path: &Path) -> Result<(Container, Vec<Symbol>)> {
        let container = Container::read_from_file(path)?;
        let symbols = self.decode(&container)?;
        info!(
            path = %path.display(),
            width = container.width,
            height = container.height,
            fingerprint = %format!("{:#010x}", self.fingerprint),
            "decompressed"
        );
        Ok((container, symbols))
    }
}
