use bitvec::prelude::*;
use log::debug;
use std::hash::Hash;

use crate::error::{HuffmanError, Result};
use crate::stream::EncodedStream;
use crate::tree::CodeMap;

#[derive(Debug, Clone)]
pub struct Encoder<Symbol> {
    encode_table: CodeMap<Symbol>,
}

impl<Symbol> Encoder<Symbol>
where
    Symbol: Eq + Hash,
{
    pub fn new(encode_table: CodeMap<Symbol>) -> Self {
        Self { encode_table }
    }

    pub fn code_map(&self) -> &CodeMap<Symbol> {
        &self.encode_table
    }

    pub fn into_code_map(self) -> CodeMap<Symbol> {
        self.encode_table
    }

    /// Concatenates the codeword of every symbol in order. Fails on the first
    /// symbol the table has no codeword for; nothing is returned in that case.
    pub fn encode(&self, stream: impl IntoIterator<Item = Symbol>) -> Result<EncodedStream> {
        let mut out = BitVec::new();
        let mut count = 0;
        for (position, s) in stream.into_iter().enumerate() {
            let code = self
                .encode_table
                .get(&s)
                .ok_or(HuffmanError::UnknownSymbol { position })?;
            out.extend_from_bitslice(code);
            count += 1;
        }

        debug!("encoded {} symbols into {} bits", count, out.len());
        Ok(EncodedStream::stamped(
            out,
            self.encode_table.tree_fingerprint(),
        ))
    }
}
