//! Huffman tree construction.
//!
//! The tree is built by the classic greedy reduction: keep every node in a
//! min-priority queue, repeatedly take the two lightest, join them under a new
//! internal node and push that back, until a single root remains.
//!
//! # Tie-break
//!
//! Equal frequencies are resolved by a sequence number, which makes the tree
//! shape (and therefore every codeword) reproducible:
//! - leaves are numbered `0..N` in ascending symbol order
//! - each internal node takes the next unused number when it is created
//! - the first node extracted becomes the left child, the second the right
//!
//! Encoder and decoder must agree on this rule; it is part of the container
//! format even though nothing in the container records it.

use crate::error::{Error, Result};
use crate::frequency::{FrequencyEntry, FrequencyTable, Symbol};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Write as _;
use tracing::debug;

/// A node of the Huffman tree.
///
/// Internal nodes own their children exclusively; there are no parent links.
#[derive(Debug, Clone, PartialEq)]
pub enum HuffNode {
    Leaf {
        symbol: Symbol,
        frequency: f64,
    },
    Internal {
        frequency: f64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: impl Into<Symbol>, frequency: f64) -> Self {
        HuffNode::Leaf {
            symbol: symbol.into(),
            frequency,
        }
    }

    /// Join two nodes; the frequency is the sum of both.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffNode::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn frequency(&self) -> f64 {
        match self {
            HuffNode::Leaf { frequency, .. } | HuffNode::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn internal_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn render(&self, out: &mut String, depth: usize, label: &str) {
        // Writing to a String cannot fail
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { symbol, frequency } => {
                let _ = writeln!(out, "{indent}{label}-> Leaf {symbol:?} [frequency: {frequency}]");
            }
            HuffNode::Internal {
                frequency,
                left,
                right,
            } => {
                let _ = writeln!(out, "{indent}{label}-> Internal [frequency: {frequency}]");
                left.render(out, depth + 1, "L");
                right.render(out, depth + 1, "R");
            }
        }
    }
}

/// Node waiting in the reduction queue.
#[derive(Debug)]
struct QueuedNode {
    seq: usize,
    node: HuffNode,
}

// Min-heap on (frequency, seq)
impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap pops the greatest, we want the lightest
        other
            .node
            .frequency()
            .total_cmp(&self.node.frequency())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A built Huffman tree, rooted at a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Build a tree from a validated frequency table.
    ///
    /// A single-symbol table yields a lone leaf.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut heap: BinaryHeap<QueuedNode> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (symbol, frequency))| QueuedNode {
                seq,
                node: HuffNode::leaf(symbol, frequency),
            })
            .collect();
        let mut next_seq = heap.len();

        while heap.len() > 1 {
            if let (Some(left), Some(right)) = (heap.pop(), heap.pop()) {
                heap.push(QueuedNode {
                    seq: next_seq,
                    node: HuffNode::merge(left.node, right.node),
                });
                next_seq += 1;
            }
        }

        let root = heap
            .pop()
            .map(|queued| queued.node)
            .ok_or_else(|| Error::invalid("cannot build a tree without symbols"))?;

        let tree = HuffmanTree { root };
        debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// Build a tree straight from (symbol, frequency) pairs.
    ///
    /// # Errors
    /// `Error::InvalidInput` for an empty list, duplicate symbols, or a
    /// negative/NaN frequency.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = FrequencyEntry>,
    {
        Self::build(&FrequencyTable::from_entries(entries)?)
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn internal_count(&self) -> usize {
        self.root.internal_count()
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// True for the degenerate one-symbol tree.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    /// Indented text dump of the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.root.render(&mut out, 0, "root");
        out
    }

    /// Emit `render` at debug level.
    pub fn log_structure(&self) {
        debug!("huffman tree structure:\n{}", self.render());
    }
}

/// Build the Huffman tree for a frequency table.
pub fn build_tree(frequencies: &FrequencyTable) -> Result<HuffmanTree> {
    HuffmanTree::build(frequencies)
}
