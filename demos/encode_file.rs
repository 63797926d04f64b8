use anyhow::{Context, Result};
use huffman::TextCodec;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Loads a text file, encodes it, saves the bitstring next to it, then
/// decodes that bitstring back from disk and saves the result.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let fp: PathBuf = env::args()
        .nth(1)
        .context("Please provide path to input file as first argument.")?
        .into();
    let text = fs::read_to_string(&fp)
        .with_context(|| format!("could not read {}", fp.display()))?;

    let mut codec = TextCodec::new();

    // encode scope - save to file
    let bits_path = fp.with_extension("bits");
    {
        let encoded = codec.encode(&text)?;
        fs::write(&bits_path, encoded.to_string())
            .with_context(|| format!("could not write {}", bits_path.display()))?;
    }

    // decode scope - read from file
    {
        let bits = fs::read_to_string(&bits_path)?;
        let decoded = codec.decode_text(&bits)?;

        let out_path = fp.with_extension("decoded.txt");
        fs::write(&out_path, &decoded)
            .with_context(|| format!("could not write {}", out_path.display()))?;

        anyhow::ensure!(decoded == text, "round trip changed the text");
        println!("wrote {} and {}", bits_path.display(), out_path.display());
    }

    Ok(())
}
