use huffman::{decode, encode};

fn main() -> Result<(), huffman::HuffmanError> {
    env_logger::init();

    let s = String::from("Hello my name is Sam!");
    let (out, tree) = encode(&s)?;
    let dec = decode(&out, &tree)?;

    println!("{out}");
    println!("{} bits, {} bits at 8 per char", out.len(), 8 * s.len());
    println!("{:?}", dec);

    Ok(())
}
