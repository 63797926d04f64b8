//! Huffman prefix coding of text and other symbol sequences.
//!
//! A message is counted into a [`FrequencyTable`], a [`TreeBuilder`] merges
//! the counts into a [`HuffmanTree`] and its [`CodeMap`], and an [`Encoder`]
//! concatenates codewords into an [`EncodedStream`]. Decoding walks the same
//! tree with a [`Decoder`]; the tree is always passed explicitly.
//!
//! ```
//! use huffman::{decode, encode};
//!
//! let (stream, tree) = encode("Hello my name is Sam!")?;
//! println!("{stream}");
//! assert_eq!(decode(&stream, &tree)?, "Hello my name is Sam!");
//! # Ok::<(), huffman::HuffmanError>(())
//! ```

mod codec;
mod config;
mod decoder;
mod encoder;
mod error;
mod fingerprint;
mod frequency;
mod stream;
mod tree;

pub use codec::{decode, decode_symbols, encode, encode_symbols, TextCodec};
pub use config::{CodecConfig, TieBreak};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use stream::EncodedStream;
pub use tree::{CodeMap, HuffmanTree, Node, TreeBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let s = String::from(
            "This is a really long message, I sure do hope it encodes and decodes properly.",
        );
        let table = FrequencyTable::from_text(&s);
        let (tree, codes) = TreeBuilder::default().build(&table).unwrap();
        let e = Encoder::new(codes);

        let out = e.encode(s.chars()).unwrap();
        let dec: String = tree.decoder().decode(&out).unwrap().into_iter().collect();

        assert_eq!(dec, s);
        assert_eq!(Some(out.len()), e.code_map().encoded_len(&table));
    }

    #[test]
    fn test_tree_serialization() {
        let (stream, tree) = encode("Hello my name is Sam!").unwrap();

        let packed = rmp_serde::to_vec(&(&tree, &stream)).unwrap();
        let (tree2, stream2): (HuffmanTree<char>, EncodedStream) =
            rmp_serde::from_slice(&packed).unwrap();

        assert_eq!(tree2, tree);
        assert_eq!(tree2.fingerprint(), tree.fingerprint());
        assert_eq!(decode(&stream2, &tree2).unwrap(), "Hello my name is Sam!");
    }

    #[test]
    fn test_config_serialization() {
        let config = CodecConfig::default().with_tie_break(TieBreak::FirstOccurrence);

        let packed = rmp_serde::to_vec(&config).unwrap();
        let back: CodecConfig = rmp_serde::from_slice(&packed).unwrap();

        assert_eq!(back, config);
    }
}
