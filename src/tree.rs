use bitvec::prelude::*;
use derivative::Derivative;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::{Hash, Hasher};

use crate::config::{CodecConfig, TieBreak};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{HuffmanError, Result};
use crate::fingerprint::TreeHasher;
use crate::frequency::FrequencyTable;

/// A node of the prefix-code tree. Only leaves carry symbols, so no symbol
/// value is reserved for merge nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node<Symbol> {
    Leaf {
        symbol: Symbol,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: Box<Node<Symbol>>,
        right: Box<Node<Symbol>>,
    },
}

impl<Symbol> Node<Symbol> {
    fn leaf(symbol: Symbol, weight: usize) -> Self {
        Node::Leaf { symbol, weight }
    }

    fn from_children(left: Node<Symbol>, right: Node<Symbol>) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> usize {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Child reached by `bit` (`false` is left, `true` is right). Leaves have none.
    pub fn child(&self, bit: bool) -> Option<&Node<Symbol>> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }
}

/// Heap entry: ordered by weight, then by rank. The node itself never takes
/// part in the comparison.
#[derive(Debug, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Pending<Symbol> {
    weight: usize,
    rank: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: Node<Symbol>,
}

/// A complete Huffman tree. A message encoded with this tree can only be
/// decoded with this tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanTree<Symbol> {
    root: Node<Symbol>,
}

impl<Symbol> HuffmanTree<Symbol> {
    pub fn root(&self) -> &Node<Symbol> {
        &self.root
    }

    /// Length of the message the tree was built from.
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|(n, _)| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes().filter(|(n, _)| !n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.nodes().map(|(_, d)| d).max().unwrap_or(0)
    }

    /// Preorder walk yielding every node with its depth.
    fn nodes(&self) -> impl Iterator<Item = (&Node<Symbol>, usize)> {
        let mut stack = vec![(&self.root, 0)];
        std::iter::from_fn(move || {
            let (node, depth) = stack.pop()?;
            if let Node::Internal { left, right, .. } = node {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
            Some((node, depth))
        })
    }

    pub fn decoder(&self) -> Decoder<'_, Symbol> {
        Decoder::new(self)
    }
}

impl<Symbol> HuffmanTree<Symbol>
where
    Symbol: Hash + Eq + Clone,
{
    /// FNV-1a hash of the tree's shape, symbols and weights, identical on
    /// every target. Streams are stamped with it so they can be matched
    /// against the tree that produced them.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = TreeHasher::default();
        for (node, depth) in self.nodes() {
            hasher.write_u64(depth as u64);
            match node {
                Node::Leaf { symbol, weight } => {
                    hasher.write_u8(0);
                    symbol.hash(&mut hasher);
                    hasher.write_u64(*weight as u64);
                }
                Node::Internal { weight, .. } => {
                    hasher.write_u8(1);
                    hasher.write_u64(*weight as u64);
                }
            }
        }
        hasher.finish()
    }

    /// Walks the tree with an explicit stack, appending `0` for every left
    /// turn and `1` for every right turn. A lone leaf root gets the codeword `0`.
    pub fn code_map(&self) -> CodeMap<Symbol> {
        let mut codes = HashMap::new();
        let mut stack: Vec<(&Node<Symbol>, BitVec)> = vec![(&self.root, BitVec::new())];

        while let Some((node, mut path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    if path.is_empty() {
                        path.push(false);
                    }
                    codes.insert(symbol.clone(), path.into_boxed_bitslice());
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right, right_path));

                    path.push(false);
                    stack.push((left, path));
                }
            }
        }

        CodeMap {
            codes,
            fingerprint: self.fingerprint(),
        }
    }

    pub fn encoder(&self) -> Encoder<Symbol> {
        Encoder::new(self.code_map())
    }
}

/// Symbol to codeword mapping derived from one tree.
#[derive(Debug, Clone)]
pub struct CodeMap<Symbol> {
    codes: HashMap<Symbol, BitBox>,
    fingerprint: u64,
}

impl<Symbol> CodeMap<Symbol>
where
    Symbol: Hash + Eq,
{
    pub fn get(&self, symbol: &Symbol) -> Option<&BitSlice> {
        self.codes.get(symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &BitSlice)> {
        self.codes.iter().map(|(s, code)| (s, code.as_bitslice()))
    }

    /// Fingerprint of the tree this map was derived from.
    pub fn tree_fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Number of bits a message with these frequencies encodes to, or `None`
    /// if the table holds a symbol without a codeword.
    pub fn encoded_len(&self, table: &FrequencyTable<Symbol>) -> Option<usize>
    where
        Symbol: Clone,
    {
        table
            .iter()
            .map(|(s, count)| self.get(s).map(|code| code.len() * count))
            .sum()
    }
}

/// Builds a tree by repeatedly merging the two lightest nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    tie_break: TieBreak,
}

impl TreeBuilder {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.tie_break)
    }

    pub fn build<Symbol>(
        &self,
        table: &FrequencyTable<Symbol>,
    ) -> Result<(HuffmanTree<Symbol>, CodeMap<Symbol>)>
    where
        Symbol: Hash + Eq + Ord + Clone,
    {
        if table.is_empty() {
            return Err(HuffmanError::EmptyAlphabet);
        }

        let mut seeds: Vec<(&Symbol, usize)> = table.iter().collect();
        if self.tie_break == TieBreak::BySymbol {
            seeds.sort_by(|a, b| a.0.cmp(b.0));
        }

        let mut pq: BinaryHeap<_> = seeds
            .into_iter()
            .enumerate()
            .map(|(rank, (s, count))| {
                Reverse(Pending {
                    weight: count,
                    rank,
                    node: Node::leaf(s.clone(), count),
                })
            })
            .collect();
        let mut next_rank = pq.len();

        let root = loop {
            let Reverse(left) = pq.pop().ok_or(HuffmanError::EmptyAlphabet)?;
            let Some(Reverse(right)) = pq.pop() else {
                break left.node;
            };

            trace!(
                "merging weight {} (rank {}) with weight {} (rank {})",
                left.weight,
                left.rank,
                right.weight,
                right.rank
            );
            let node = Node::from_children(left.node, right.node);
            pq.push(Reverse(Pending {
                weight: node.weight(),
                rank: next_rank,
                node,
            }));
            next_rank += 1;
        };

        let tree = HuffmanTree { root };
        let codes = tree.code_map();
        debug!(
            "built tree over {} symbols, depth {}, {:?} tie-break",
            codes.len(),
            tree.depth(),
            self.tie_break
        );

        Ok((tree, codes))
    }
}
