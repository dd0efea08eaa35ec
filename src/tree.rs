use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::heap::MinHeap;

/// A node of the coding tree. Each internal node owns exactly two children;
/// the whole structure is a strict ownership tree with no sharing.
#[derive(Debug, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: u8, freq: u64 },
    Internal { freq: u64, left: Box<Node>, right: Box<Node> },
}

impl Node {
    fn leaf(symbol: u8, freq: u64) -> Self {
        Node::Leaf { symbol, freq }
    }

    fn internal(left: Node, right: Node) -> Self {
        Node::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => *freq,
        }
    }

    /// The synthetic zero-frequency leaf paired with a lone real symbol.
    /// No real leaf can have frequency 0, so the shape is unambiguous.
    pub fn is_filler(&self) -> bool {
        matches!(self, Node::Leaf { symbol: 0, freq: 0 })
    }
}

/// Builds the Huffman tree for `table` with the greedy two-smallest merge.
///
/// Leaves enter the queue in ascending symbol order and the queue breaks
/// priority ties by insertion order, so the same table always yields the
/// same tree. Compression and decompression depend on that: decode rebuilds
/// the tree from the header's table and must get a bit-identical shape.
pub fn build(table: &FrequencyTable) -> Result<Node> {
    if table.is_empty() {
        return Err(Error::EmptyAlphabet);
    }

    // A lone symbol gets a filler sibling so its code still has length 1.
    if table.len() == 1 {
        let (&symbol, &freq) = table.iter().next().ok_or(Error::EmptyAlphabet)?;
        return Ok(Node::internal(Node::leaf(symbol, freq), Node::leaf(0, 0)));
    }

    let mut queue = MinHeap::new();
    for (&symbol, &freq) in table {
        queue.insert(Node::leaf(symbol, freq), freq);
    }

    while queue.len() > 1 {
        let left = queue.extract_min()?;
        let right = queue.extract_min()?;
        let parent = Node::internal(left, right);
        let freq = parent.freq();
        queue.insert(parent, freq);
    }

    queue.extract_min()
}
