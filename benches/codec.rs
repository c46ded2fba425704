use core::cell::Cell;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stackjson::{
    deserialize, field, measure, serialize, serialize_to_string, tokenize, ByteBuf, Node, Options,
    StrBuf, Token, Value,
};

fn benchmark_measure(c: &mut Criterion) {
    let mut seq = 42u64;
    let mut delta = -17i64;
    let mut active = true;
    let mut label_storage = [0u8; 16];
    let label = StrBuf::new(&mut label_storage);
    label.set("sensor-7").unwrap();
    let mut raw_storage = [0u8; 12];
    let raw = ByteBuf::new(&mut raw_storage);
    raw.set(b"\x00\x01\x02\x03\x04\x05").unwrap();
    let mut x = 1u64;
    let mut y = 2u64;
    let inner = [field!(unsigned x), field!(unsigned y)];
    let tree = [
        field!(unsigned seq),
        field!(signed delta),
        field!(bool active),
        field!(str label),
        field!(bytes raw),
        field!(object inner),
    ];
    let options = Options::new();

    c.bench_function("measure_tree", |b| {
        b.iter(|| measure(black_box(&tree), &options))
    });
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut seq = 42u64;
    let mut delta = -17i64;
    let mut active = true;
    let mut label_storage = [0u8; 16];
    let label = StrBuf::new(&mut label_storage);
    label.set("sensor-7").unwrap();
    let mut raw_storage = [0u8; 12];
    let raw = ByteBuf::new(&mut raw_storage);
    raw.set(b"\x00\x01\x02\x03\x04\x05").unwrap();
    let mut x = 1u64;
    let mut y = 2u64;
    let inner = [field!(unsigned x), field!(unsigned y)];
    let tree = [
        field!(unsigned seq),
        field!(signed delta),
        field!(bool active),
        field!(str label),
        field!(bytes raw),
        field!(object inner),
    ];

    for options in [Options::new(), Options::pretty()] {
        let name = if options.pretty {
            "serialize_tree_pretty"
        } else {
            "serialize_tree"
        };
        let len = measure(&tree, &options).unwrap();
        let mut out = vec![0u8; len];
        c.bench_function(name, |b| {
            b.iter(|| serialize(black_box(&tree), &mut out, &options))
        });
    }
}

fn benchmark_deserialize(c: &mut Criterion) {
    let mut seq = 0u64;
    let mut delta = 0i64;
    let mut active = false;
    let mut label_storage = [0u8; 16];
    let label = StrBuf::new(&mut label_storage);
    let mut raw_storage = [0u8; 12];
    let raw = ByteBuf::new(&mut raw_storage);
    let mut x = 0u64;
    let mut y = 0u64;
    let inner = [field!(unsigned x), field!(unsigned y)];
    let tree = [
        field!(unsigned seq),
        field!(signed delta),
        field!(bool active),
        field!(str label),
        field!(bytes raw),
        field!(object inner),
    ];
    let options = Options::new();
    let text = br#"{"seq":42,"delta":-17,"active":true,"label":"sensor-7","raw":"AAECAwQF","inner":{"x":1,"y":2}}"#;

    let mut tokens = [Token::default(); 32];
    c.bench_function("tokenize_document", |b| {
        b.iter(|| tokenize(black_box(text), &mut tokens))
    });

    let produced = tokenize(text, &mut tokens).unwrap();
    c.bench_function("deserialize_document", |b| {
        b.iter(|| deserialize(black_box(&tree), &tokens[..produced], text, &options))
    });
}

fn benchmark_array_scaling(c: &mut Criterion) {
    let options = Options::new();

    let mut group = c.benchmark_group("serialize_scalar_run");
    for size in [4usize, 16, 64] {
        let mut values = vec![7u64; size];
        let tree = [Node::named("values", Value::unsigned_slice(&mut values))];
        let len = measure(&tree, &options).unwrap();
        let mut out = vec![0u8; len];
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| serialize(black_box(&tree), &mut out, &options))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("deserialize_array");
    for size in [4usize, 16, 64] {
        let cells: Vec<Cell<u64>> = (0..size).map(|_| Cell::new(0)).collect();
        let elements: Vec<Node> = cells
            .iter()
            .map(|cell| Node::unnamed(Value::Unsigned(cell)))
            .collect();
        let tree = [Node::named("a", Value::array(&elements))];
        let text = format!("{{\"a\":[{}]}}", vec!["7"; size].join(","));
        let mut tokens = vec![Token::default(); size + 4];
        let produced = tokenize(text.as_bytes(), &mut tokens).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| deserialize(black_box(&tree), &tokens[..produced], text.as_bytes(), &options))
        });
    }
    group.finish();
}

fn benchmark_comparison_with_serde_json(c: &mut Criterion) {
    let mut seq = 42u64;
    let mut active = true;
    let mut label_storage = [0u8; 16];
    let label = StrBuf::new(&mut label_storage);
    label.set("sensor-7").unwrap();
    let tree = [
        field!(unsigned seq),
        field!(bool active),
        field!(str label),
    ];
    let options = Options::new();
    let text = serialize_to_string(&tree, &options).unwrap();

    let mut group = c.benchmark_group("comparison");

    let len = measure(&tree, &options).unwrap();
    let mut out = vec![0u8; len];
    group.bench_function("stackjson_serialize", |b| {
        b.iter(|| serialize(black_box(&tree), &mut out, &options))
    });
    group.bench_function("serde_json_serialize", |b| {
        b.iter(|| {
            serde_json::to_string(&serde_json::json!({
                "seq": 42u64, "active": true, "label": "sensor-7"
            }))
        })
    });

    let mut tokens = [Token::default(); 16];
    group.bench_function("stackjson_deserialize", |b| {
        b.iter(|| {
            let produced = tokenize(black_box(text.as_bytes()), &mut tokens).unwrap();
            deserialize(&tree, &tokens[..produced], text.as_bytes(), &options)
        })
    });
    group.bench_function("serde_json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(&text)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_measure,
    benchmark_serialize,
    benchmark_deserialize,
    benchmark_array_scaling,
    benchmark_comparison_with_serde_json
);
criterion_main!(benches);
