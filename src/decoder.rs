use bitvec::prelude::*;
use log::debug;
use std::hash::Hash;

use crate::error::{HuffmanError, Result};
use crate::stream::EncodedStream;
use crate::tree::{HuffmanTree, Node};

/// Position of the decoding cursor between two bits.
enum Walk<'t, Symbol> {
    AtRoot,
    Descending(&'t Node<Symbol>),
}

/// Walks bits down a borrowed tree, emitting a symbol at every leaf.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'t, Symbol> {
    tree: &'t HuffmanTree<Symbol>,
}

impl<'t, Symbol> Decoder<'t, Symbol> {
    pub fn new(tree: &'t HuffmanTree<Symbol>) -> Self {
        Self { tree }
    }
}

impl<'t, Symbol> Decoder<'t, Symbol>
where
    Symbol: Hash + Eq + Clone,
{
    /// Decodes a stream, refusing it up front if it is stamped with another
    /// tree's fingerprint.
    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<Symbol>> {
        if let Some(stamp) = stream.fingerprint() {
            let ours = self.tree.fingerprint();
            if stamp != ours {
                return Err(HuffmanError::StaleTreeMismatch {
                    stream: Some(stamp),
                    tree: Some(ours),
                });
            }
        }

        self.decode_bits(stream.bits())
    }

    /// Decodes raw bits. With a lone leaf as root every bit is one symbol.
    pub fn decode_bits(&self, input: &BitSlice) -> Result<Vec<Symbol>> {
        let root = self.tree.root();
        if let Node::Leaf { symbol, .. } = root {
            return Ok(vec![symbol.clone(); input.len()]);
        }

        let mut out = Vec::new();
        let mut state = Walk::AtRoot;
        for (position, bit) in input.iter().by_vals().enumerate() {
            let from = match state {
                Walk::AtRoot => root,
                Walk::Descending(node) => node,
            };
            let next = from
                .child(bit)
                .ok_or(HuffmanError::MalformedStream { position })?;

            state = match next {
                Node::Leaf { symbol, .. } => {
                    out.push(symbol.clone());
                    Walk::AtRoot
                }
                Node::Internal { .. } => Walk::Descending(next),
            };
        }

        match state {
            Walk::AtRoot => {
                debug!("decoded {} bits into {} symbols", input.len(), out.len());
                Ok(out)
            }
            Walk::Descending(_) => Err(HuffmanError::MalformedStream {
                position: input.len(),
            }),
        }
    }
}
