use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::{debug, trace};

use super::min_heap::MinHeap;
use crate::bitstream::bitstring::BitString;
use crate::error::{HuffError, Result};
use crate::tools::freq_count::{freqs, FreqTable};

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    /// Creation order. Leaves are numbered in ascending symbol order, merged nodes after them.
    pub seq: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, seq: u32, node_data: NodeData) -> Node {
        Node {
            weight,
            seq,
            node_data,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }
}

impl Ord for Node {
    /// Sort Nodes by increasing weight, then by creation order. Sequence numbers are unique
    /// within one tree, so two distinct nodes never compare equal.
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A huffman code tree. The root is a single leaf when the input has only one distinct symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Count the symbols in `data` and build the tree for them.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&freqs(data))
    }

    /// Build the tree by repeatedly merging the two lightest nodes. Fails with EmptyInput
    /// when there are no symbols at all.
    pub fn from_frequencies(frequencies: &FreqTable) -> Result<Self> {
        let mut heap = MinHeap::with_capacity(frequencies.len());
        let mut seq: u32 = 0;
        for (&sym, &count) in frequencies {
            heap.push(Node::new(count, seq, NodeData::Leaf(sym)));
            seq += 1;
        }

        loop {
            let left = heap.pop().ok_or(HuffError::EmptyInput)?;
            // A lone node left in the heap is the root.
            let right = match heap.pop() {
                Some(node) => node,
                None => {
                    debug!(
                        "Built huffman tree over {} symbols, total weight {}.",
                        frequencies.len(),
                        left.weight
                    );
                    return Ok(HuffmanTree { root: left });
                }
            };
            trace!(
                "Merging node {} (weight {}) with node {} (weight {}) into node {}.",
                left.seq,
                left.weight,
                right.seq,
                right.weight,
                seq
            );
            heap.push(Node::new(
                left.weight + right.weight,
                seq,
                NodeData::Kids(Box::new(left), Box::new(right)),
            ));
            seq += 1;
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight of the tree (the number of symbols it was built from).
    pub fn weight(&self) -> u64 {
        self.root.weight
    }

    /// Return (symbol, depth) for every leaf, left to right.
    pub fn leaf_depths(&self) -> Vec<(u8, usize)> {
        let mut leaves = vec![];
        return_leaves(&self.root, 0, &mut leaves);
        leaves
    }

    /// Collect the code for every leaf: 0 for each step left, 1 for each step right.
    /// A tree that is a single leaf has no path to record, so it gets the code "0".
    pub fn codes(&self) -> BTreeMap<u8, BitString> {
        let mut codes = BTreeMap::new();
        match &self.root.node_data {
            NodeData::Leaf(sym) => {
                codes.insert(*sym, std::iter::once(false).collect());
            }
            NodeData::Kids(..) => {
                let mut path = BitString::new();
                return_codes(&self.root, &mut path, &mut codes);
            }
        }
        codes
    }
}

/// Recursively walk the tree and return in "leaves" how far (deep) from the root node each leaf is.
fn return_leaves(node: &Node, depth: usize, leaves: &mut Vec<(u8, usize)>) {
    match &node.node_data {
        NodeData::Kids(left_child, right_child) => {
            return_leaves(left_child, depth + 1, leaves);
            return_leaves(right_child, depth + 1, leaves);
        }
        NodeData::Leaf(sym) => leaves.push((*sym, depth)),
    }
}

/// Recursively walk the tree, extending `path` on the way down and recording it at each leaf.
fn return_codes(node: &Node, path: &mut BitString, codes: &mut BTreeMap<u8, BitString>) {
    match &node.node_data {
        NodeData::Kids(left_child, right_child) => {
            path.push(false);
            return_codes(left_child, path, codes);
            path.pop();
            path.push(true);
            return_codes(right_child, path, codes);
            path.pop();
        }
        NodeData::Leaf(sym) => {
            codes.insert(*sym, path.clone());
        }
    }
}
