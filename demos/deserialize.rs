//! Matching JSON documents against a fixed declared schema.
//!
//! Run with: cargo run --example deserialize

use stackjson::{deserialize_text, field, serialize_to_string, Node, Options, Token};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut threshold = 50u64;
    let mut offset = 0i64;
    let mut enabled = false;
    let mut gain = 0u64;
    let filter = [field!(unsigned gain)];
    let tree = [
        field!(unsigned threshold),
        field!(signed offset),
        field!(bool enabled),
        field!(object filter),
    ];
    let options = Options::new();
    let mut tokens = [Token::default(); 32];

    // A partial document: absent fields keep their values.
    let update = br#"{"enabled":true,"filter":{"gain":3}}"#;
    deserialize_text(&tree, &mut tokens, update, &options)?;
    println!("After partial update:    {}", dump(&tree)?);

    // A document from a newer peer: unknown keys are skipped, known
    // ones still match.
    let newer = br#"{"schema":9,"extras":{"a":[1,2,3]},"threshold":80,"offset":-5}"#;
    let consumed = deserialize_text(&tree, &mut tokens, newer, &options)?;
    println!("After newer-peer update: {} ({consumed} tokens)", dump(&tree)?);

    // Truncated input is reported before anything is written.
    let truncated = &newer[..20];
    match deserialize_text(&tree, &mut tokens, truncated, &options) {
        Err(error) => println!("Truncated document rejected: {error}"),
        Ok(_) => unreachable!(),
    }

    Ok(())
}

fn dump(tree: &[Node]) -> Result<String, Box<dyn Error>> {
    Ok(serialize_to_string(tree, &Options::new())?)
}
