use log::{debug, info};
use std::hash::Hash;

use crate::config::CodecConfig;
use crate::encoder::Encoder;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::stream::EncodedStream;
use crate::tree::{CodeMap, HuffmanTree, TreeBuilder};

/// Builds a code for `symbols` and encodes them with it. The tree is handed
/// back to the caller, who must pass it to [`decode_symbols`].
pub fn encode_symbols<Symbol>(
    symbols: &[Symbol],
    config: &CodecConfig,
) -> Result<(EncodedStream, HuffmanTree<Symbol>)>
where
    Symbol: Hash + Eq + Ord + Clone,
{
    let (stream, tree, _) = build_and_encode(symbols, config)?;
    Ok((stream, tree))
}

fn build_and_encode<Symbol>(
    symbols: &[Symbol],
    config: &CodecConfig,
) -> Result<(EncodedStream, HuffmanTree<Symbol>, CodeMap<Symbol>)>
where
    Symbol: Hash + Eq + Ord + Clone,
{
    if symbols.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }

    let table = FrequencyTable::from_symbols(symbols.iter().cloned());
    let (tree, codes) = TreeBuilder::from_config(config).build(&table)?;
    let encoder = Encoder::new(codes);
    let stream = encoder.encode(symbols.iter().cloned())?;

    Ok((stream, tree, encoder.into_code_map()))
}

pub fn decode_symbols<Symbol>(
    stream: &EncodedStream,
    tree: &HuffmanTree<Symbol>,
) -> Result<Vec<Symbol>>
where
    Symbol: Hash + Eq + Clone,
{
    tree.decoder().decode(stream)
}

/// Encodes text with the default configuration.
///
/// ```
/// let (stream, tree) = huffman::encode("abracadabra")?;
/// assert!(stream.len() <= 3 * 11);
/// assert_eq!(huffman::decode(&stream, &tree)?, "abracadabra");
/// # Ok::<(), huffman::HuffmanError>(())
/// ```
pub fn encode(text: &str) -> Result<(EncodedStream, HuffmanTree<char>)> {
    let symbols: Vec<char> = text.chars().collect();
    encode_symbols(&symbols, &CodecConfig::default())
}

pub fn decode(stream: &EncodedStream, tree: &HuffmanTree<char>) -> Result<String> {
    Ok(decode_symbols(stream, tree)?.into_iter().collect())
}

/// A text codec session that keeps the tree of the last message it encoded.
///
/// `decode` only accepts streams belonging to that tree: once a second
/// message has been encoded, streams of the first one are rejected with
/// [`HuffmanError::StaleTreeMismatch`] instead of being decoded with the
/// wrong tree. Streams parsed from text carry no fingerprint and are
/// trusted to belong to the current tree.
#[derive(Debug, Clone, Default)]
pub struct TextCodec {
    config: CodecConfig,
    current: Option<(HuffmanTree<char>, CodeMap<char>)>,
}

impl TextCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encodes `text` with a freshly built tree, which replaces the stored
    /// one. On failure the stored tree is left untouched.
    pub fn encode(&mut self, text: &str) -> Result<EncodedStream> {
        let symbols: Vec<char> = text.chars().collect();
        let (stream, tree, codes) = build_and_encode(&symbols, &self.config)?;

        if self.current.is_some() {
            debug!("replacing stored tree");
        }
        info!(
            "encoded {} characters into {} bits",
            symbols.len(),
            stream.len()
        );
        self.current = Some((tree, codes));

        Ok(stream)
    }

    pub fn decode(&self, stream: &EncodedStream) -> Result<String> {
        let (tree, _) = self
            .current
            .as_ref()
            .ok_or(HuffmanError::StaleTreeMismatch {
                stream: stream.fingerprint(),
                tree: None,
            })?;

        decode(stream, tree)
    }

    /// Parses `'0'`/`'1'` text and decodes it. Blank text is rejected.
    pub fn decode_text(&self, bits: &str) -> Result<String> {
        if bits.trim().is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let stream: EncodedStream = bits.parse()?;
        self.decode(&stream)
    }

    pub fn tree(&self) -> Option<&HuffmanTree<char>> {
        self.current.as_ref().map(|(tree, _)| tree)
    }

    pub fn code_map(&self) -> Option<&CodeMap<char>> {
        self.current.as_ref().map(|(_, codes)| codes)
    }

    /// Forgets the stored tree.
    pub fn reset(&mut self) {
        self.current = None;
    }
}
