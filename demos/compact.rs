//! Compacting a declared tree into a contiguous node pool.
//!
//! Run with: cargo run --example compact

use stackjson::{
    compact_into, field, node_count, retrieve, walk, Node, Options, PooledNode, PooledValue, Value,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut total = 3u64;
    let mut e1 = 10u64;
    let mut e2 = 20u64;
    let mut e3 = 30u64;
    let mut e4 = 0u64;
    let samples = [
        Node::unnamed(Value::unsigned(&mut e1)),
        Node::unnamed(Value::unsigned(&mut e2)),
        Node::unnamed(Value::unsigned(&mut e3)),
        Node::unnamed(Value::unsigned(&mut e4)),
    ];
    let mut min = 10u64;
    let mut max = 30u64;
    let stats = [field!(unsigned min), field!(unsigned max)];
    let tree = [
        field!(unsigned total),
        field!(array samples),
        field!(object stats),
    ];

    // Only the first three sample slots are live.
    if let Value::Array { used, .. } = &tree[1].value {
        used.set(3);
    }

    println!("Live nodes in the tree: {}", node_count(&tree)?);

    // walk() visits parents before children.
    walk(&tree, |node| {
        println!("  visit {}", node.name.unwrap_or("<element>"));
        Ok(())
    })?;

    // retrieve() addresses nodes by slash path.
    let found = retrieve(&tree, "stats/max", &Options::new())?;
    println!("stats/max found: {}\n", found.is_some());

    // The compacted copy groups each child list contiguously and drops
    // the dead array slot.
    let mut pool = [PooledNode::EMPTY; 16];
    let slots = compact_into(&tree, &mut pool)?;
    println!("Pool slots used: {}", slots);

    for (at, node) in pool[..slots].iter().enumerate() {
        let name = node.name.unwrap_or("-");
        match &node.value {
            PooledValue::Leaf(_) => println!("  [{at}] {name:<8} leaf"),
            PooledValue::Object(span) => println!(
                "  [{at}] {name:<8} object, children {}..{}",
                span.start,
                span.start + span.len
            ),
            PooledValue::Array(span) => println!(
                "  [{at}] {name:<8} array,  children {}..{}",
                span.start,
                span.start + span.len
            ),
        }
    }

    // Pool leaves share storage with the source tree.
    if let Value::Unsigned(cell) = &tree[0].value {
        cell.set(4);
    }
    if let PooledValue::Leaf(Value::Unsigned(cell)) = &pool[0].value {
        println!("\n✓ pool leaf sees the tree update: total = {}", cell.get());
    }

    Ok(())
}
