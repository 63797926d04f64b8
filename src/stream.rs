use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::error::HuffmanError;

/// The bits of an encoded message.
///
/// Streams coming out of an [`Encoder`](crate::Encoder) remember the
/// fingerprint of the tree that produced them, so decoding against any other
/// tree is refused. Streams parsed from text or built from raw bits carry no
/// fingerprint and are decoded against whatever tree they are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SerializableStream", into = "SerializableStream")]
pub struct EncodedStream {
    bits: BitVec,
    fingerprint: Option<u64>,
}

impl EncodedStream {
    pub fn new(bits: BitVec) -> Self {
        Self {
            bits,
            fingerprint: None,
        }
    }

    pub(crate) fn stamped(bits: BitVec, fingerprint: u64) -> Self {
        Self {
            bits,
            fingerprint: Some(fingerprint),
        }
    }

    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }

    pub fn into_bits(self) -> BitVec {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn fingerprint(&self) -> Option<u64> {
        self.fingerprint
    }
}

impl From<BitVec> for EncodedStream {
    fn from(bits: BitVec) -> Self {
        Self::new(bits)
    }
}

/// Renders the stream as `'0'` and `'1'` characters.
impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.bits.iter().by_vals() {
            f.write_char(if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Parses `'0'`/`'1'` text. ASCII whitespace is skipped so wrapped text
/// parses as one stream.
impl FromStr for EncodedStream {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = BitVec::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                c if c.is_ascii_whitespace() => {}
                found => return Err(HuffmanError::InvalidBit { position, found }),
            }
        }

        Ok(Self::new(bits))
    }
}

// serialize the BitVec as its bit length plus the backing words
#[derive(Serialize, Deserialize)]
struct SerializableStream {
    data: Box<[usize]>,
    bit_len: usize,
    fingerprint: Option<u64>,
}

impl From<EncodedStream> for SerializableStream {
    fn from(other: EncodedStream) -> Self {
        let EncodedStream { bits, fingerprint } = other;
        let bit_len = bits.len();

        Self {
            data: bits.into_boxed_bitslice().into_boxed_slice(),
            bit_len,
            fingerprint,
        }
    }
}

impl From<SerializableStream> for EncodedStream {
    fn from(other: SerializableStream) -> Self {
        let SerializableStream {
            data,
            bit_len,
            fingerprint,
        } = other;

        let mut bits = BitBox::from_boxed_slice(data).into_bitvec();
        bits.resize(bit_len, false);

        Self { bits, fingerprint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_bits() {
        let s = EncodedStream::new(bitvec![0, 1, 1, 0, 1]);

        assert_eq!(s.to_string(), "01101");
        assert_eq!(EncodedStream::default().to_string(), "");
    }

    #[test]
    fn parse_skips_whitespace() {
        let s: EncodedStream = "0110\n 1 0\t1".parse().unwrap();

        assert_eq!(s.bits(), bits![0, 1, 1, 0, 1, 0, 1]);
        assert_eq!(s.fingerprint(), None);
    }

    #[test]
    fn parse_rejects_other_characters() {
        let err = "0102".parse::<EncodedStream>().unwrap_err();

        assert_eq!(
            err,
            HuffmanError::InvalidBit {
                position: 2,
                found: '2'
            }
        );
    }

    #[test]
    fn serialize_keeps_length_and_fingerprint() {
        let mut bits = BitVec::new();
        for i in 0..133 {
            bits.push(i % 3 == 0);
        }
        let s = EncodedStream::stamped(bits, 0xfeed);

        let data = rmp_serde::to_vec(&s).unwrap();
        let back: EncodedStream = rmp_serde::from_slice(&data).unwrap();

        assert_eq!(back, s);
        assert_eq!(back.len(), 133);
        assert_eq!(back.fingerprint(), Some(0xfeed));
    }
}
