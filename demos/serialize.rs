//! Serializing a declared tree to compact and pretty JSON.
//!
//! Run with: cargo run --example serialize

use stackjson::{field, measure, serialize_to_string, ByteBuf, Node, Options, StrBuf, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut uptime = 86_400u64;
    let mut drift = -12i64;
    let mut online = true;

    let mut firmware_storage = [0u8; 16];
    let firmware = StrBuf::new(&mut firmware_storage);
    firmware.set("2.4.1-rc3")?;

    let mut mac_storage = [0u8; 6];
    let mac = ByteBuf::new(&mut mac_storage);
    mac.set(&[0x02, 0x1A, 0xC5, 0x00, 0x17, 0x9B])?;

    let mut channel = 11u64;
    let mut rssi = -67i64;
    let radio = [field!(unsigned channel), field!(signed rssi)];

    let mut t1_storage = [0u8; 8];
    let t1 = StrBuf::new(&mut t1_storage);
    t1.set("lab")?;
    let mut t2_storage = [0u8; 8];
    let t2 = StrBuf::new(&mut t2_storage);
    t2.set("east")?;
    let tags = [
        Node::unnamed(Value::string(&t1)),
        Node::unnamed(Value::string(&t2)),
    ];

    let tree = [
        field!(unsigned uptime),
        field!(signed drift),
        field!(bool online),
        field!(str firmware),
        field!(bytes mac),
        field!(object radio),
        field!(array tags),
    ];

    // Compact: no whitespace at all.
    let compact = serialize_to_string(&tree, &Options::new())?;
    println!("Compact ({} bytes):\n{}\n", compact.len(), compact);

    // Pretty: one tab per level by default.
    let pretty = serialize_to_string(&tree, &Options::pretty())?;
    println!("Pretty:\n{}\n", pretty);

    let spaces = Options::pretty().with_indent("    ");
    println!(
        "Four-space indent:\n{}\n",
        serialize_to_string(&tree, &spaces)?
    );

    // measure() reports the exact length without writing a byte, so a
    // caller on a fixed buffer budget can check up front.
    let need = measure(&tree, &Options::new())?;
    assert_eq!(need, compact.len());
    println!("✓ measure() agrees with the serialized length ({} bytes)", need);

    Ok(())
}
