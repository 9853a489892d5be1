//! Code table derivation.
//!
//! Codewords are read off the tree's leaf paths: a left edge appends `0`, a
//! right edge appends `1`. Leaf paths never extend one another, so the table
//! is prefix-free by construction.
//!
//! A lone leaf has an empty path, which cannot be packed. It is given the
//! one-bit placeholder code `0` instead, and the decoder expects exactly that
//! bit for each symbol of a single-symbol stream.

use crate::frequency::{FrequencyTable, Symbol};
use crate::tree::{HuffNode, HuffmanTree};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

/// Code assigned to the only symbol of a one-leaf tree.
pub const PLACEHOLDER_CODE: bool = false;

/// The bit string assigned to one symbol, first bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Codeword(Vec<bool>);

impl Codeword {
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Codeword>,
}

impl CodeTable {
    /// Derive the table for `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        match tree.root() {
            HuffNode::Leaf { symbol, .. } => {
                codes.insert(symbol.clone(), Codeword::new(vec![PLACEHOLDER_CODE]));
            }
            root => collect(root, &mut Vec::new(), &mut codes),
        }

        Self { codes }
    }

    pub fn get(&self, symbol: &str) -> Option<&Codeword> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Codeword)> + '_ {
        self.codes.iter().map(|(s, c)| (s.as_str(), c))
    }

    pub fn code_lengths(&self) -> BTreeMap<&str, usize> {
        self.iter().map(|(s, c)| (s, c.len())).collect()
    }

    /// Expected codeword length under `frequencies`, in bits per symbol.
    ///
    /// Symbols missing from the table are ignored. Returns 0.0 when the
    /// matching frequencies sum to zero.
    pub fn average_length(&self, frequencies: &FrequencyTable) -> f64 {
        let (weighted, total) = frequencies
            .iter()
            .filter_map(|(symbol, p)| self.get(symbol).map(|code| (code.len() as f64 * p, p)))
            .fold((0.0, 0.0), |(w, t), (cw, p)| (w + cw, t + p));

        if total == 0.0 {
            0.0
        } else {
            weighted / total
        }
    }

    /// Write one `<symbol> : <code>` line per symbol, followed by the
    /// average code length.
    pub fn write_report<W: Write>(
        &self,
        writer: &mut W,
        frequencies: &FrequencyTable,
    ) -> std::io::Result<()> {
        for (symbol, code) in self.iter() {
            writeln!(writer, "{symbol} : {code}")?;
        }
        writeln!(writer, "Average length: {}", self.average_length(frequencies))
    }

    /// True when no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Codeword> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

fn collect(node: &HuffNode, path: &mut Vec<bool>, codes: &mut BTreeMap<Symbol, Codeword>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes.insert(symbol.clone(), Codeword::new(path.clone()));
        }
        HuffNode::Internal { left, right, .. } => {
            path.push(false);
            collect(left, path, codes);
            path.pop();

            path.push(true);
            collect(right, path, codes);
            path.pop();
        }
    }
}

/// Derive the code table for a tree.
pub fn derive_codes(tree: &HuffmanTree) -> CodeTable {
    CodeTable::from_tree(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyEntry;

    fn abc() -> FrequencyTable {
        FrequencyTable::from_entries([
            FrequencyEntry::new("A", 0.5),
            FrequencyEntry::new("B", 0.25),
            FrequencyEntry::new("C", 0.25),
        ])
        .unwrap()
    }

    #[test]
    fn test_abc_codes() {
        let table = derive_codes(&HuffmanTree::build(&abc()).unwrap());

        assert_eq!(table.get("A").unwrap().to_string(), "0");
        assert_eq!(table.get("B").unwrap().to_string(), "10");
        assert_eq!(table.get("C").unwrap().to_string(), "11");
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_single_leaf_placeholder() {
        let freqs = FrequencyTable::from_entries([FrequencyEntry::new("9", 1.0)]).unwrap();
        let table = derive_codes(&HuffmanTree::build(&freqs).unwrap());

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("9").unwrap().bits(), &[PLACEHOLDER_CODE]);
    }

    #[test]
    fn test_average_length() {
        let freqs = abc();
        let table = derive_codes(&HuffmanTree::build(&freqs).unwrap());
        assert_eq!(table.average_length(&freqs), 1.5);
    }

    #[test]
    fn test_report() {
        let freqs = abc();
        let table = derive_codes(&HuffmanTree::build(&freqs).unwrap());

        let mut out = Vec::new();
        table.write_report(&mut out, &freqs).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "A : 0\nB : 10\nC : 11\nAverage length: 1.5\n");
    }

    #[test]
    fn test_prefix_check_detects_violation() {
        let mut codes = BTreeMap::new();
        codes.insert("x".to_string(), Codeword::new(vec![true]));
        codes.insert("y".to_string(), Codeword::new(vec![true, false]));
        assert!(!CodeTable { codes }.is_prefix_free());
    }
}
