use rand::prelude::*;
use rand::rngs::StdRng;
use std::fmt::Debug;
use std::hash::Hash;

use huffman::{
    decode, decode_symbols, encode, encode_symbols, CodecConfig, FrequencyTable, TieBreak,
    TreeBuilder,
};

const ROUNDS: u64 = 200;

/// Draws a message over `alphabet`. With `skewed` set, low indices are far
/// more likely than high ones.
fn random_message<Symbol: Clone>(
    rng: &mut StdRng,
    alphabet: &[Symbol],
    skewed: bool,
) -> Vec<Symbol> {
    let len = rng.gen_range(1..=600);
    (0..len)
        .map(|_| {
            let i = if skewed {
                let r: f64 = rng.gen();
                ((r * r * r * r) * alphabet.len() as f64) as usize
            } else {
                rng.gen_range(0..alphabet.len())
            };
            alphabet[i.min(alphabet.len() - 1)].clone()
        })
        .collect()
}

/// Cost of an optimal code: the sum of the weights of every merge.
fn optimal_cost(mut weights: Vec<usize>) -> usize {
    let mut cost = 0;
    while weights.len() > 1 {
        weights.sort_unstable_by(|a, b| b.cmp(a));
        let a = weights.pop().unwrap();
        let b = weights.pop().unwrap();
        cost += a + b;
        weights.push(a + b);
    }
    cost
}

fn check_code<Symbol>(message: &[Symbol], tie_break: TieBreak)
where
    Symbol: Hash + Eq + Ord + Clone + Debug,
{
    let config = CodecConfig::default().with_tie_break(tie_break);
    let (stream, tree) = encode_symbols(message, &config).unwrap();
    assert_eq!(decode_symbols(&stream, &tree).unwrap(), message);

    let table = FrequencyTable::from_symbols(message.iter().cloned());
    let (_, codes) = TreeBuilder::new(tie_break).build(&table).unwrap();
    assert_eq!(codes.len(), table.len());

    let all: Vec<_> = codes.iter().collect();
    for (i, (a, ca)) in all.iter().enumerate() {
        for (b, cb) in all.iter().skip(i + 1) {
            assert!(!cb.starts_with(*ca), "{a:?} is a prefix of {b:?}");
            assert!(!ca.starts_with(*cb), "{b:?} is a prefix of {a:?}");
        }
    }

    let encoded_len = codes.encoded_len(&table).unwrap();
    assert_eq!(encoded_len, stream.len());
    if table.len() > 1 {
        let weights = table.iter().map(|(_, c)| c).collect();
        assert_eq!(encoded_len, optimal_cost(weights));
    } else {
        assert_eq!(encoded_len, message.len());
    }
}

#[test]
fn random_text() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let pool: Vec<char> = ('a'..='z')
        .chain('A'..='Z')
        .chain(" .,;\n\t".chars())
        .chain("äöüßéñ→✓漢字🦀".chars())
        .collect();

    for round in 0..ROUNDS {
        let mut alphabet = pool.clone();
        alphabet.shuffle(&mut rng);
        alphabet.truncate(rng.gen_range(1..=pool.len()));
        let message = random_message(&mut rng, &alphabet, round % 2 == 0);
        let text: String = message.iter().collect();

        let (stream, tree) = encode(&text).unwrap();
        assert_eq!(decode(&stream, &tree).unwrap(), text);

        check_code(&message, TieBreak::BySymbol);
        check_code(&message, TieBreak::FirstOccurrence);
    }
}

#[test]
fn random_u16_symbols() {
    let mut rng = StdRng::seed_from_u64(0xc0de);

    for round in 0..ROUNDS {
        let k = rng.gen_range(1..=300);
        let alphabet: Vec<u16> = (0..k).map(|_| rng.gen()).collect();
        let message = random_message(&mut rng, &alphabet, round % 3 != 0);

        check_code(&message, TieBreak::BySymbol);
        check_code(&message, TieBreak::FirstOccurrence);
    }
}

#[test]
fn random_bytes_with_thread_rng() {
    let mut source: Vec<u8> = (0..=255u8)
        .flat_map(|b| std::iter::repeat(b).take(b as usize % 7 + 1))
        .collect();
    source.shuffle(&mut thread_rng());

    check_code(&source, TieBreak::BySymbol);
}
