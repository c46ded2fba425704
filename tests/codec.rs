#![cfg(feature = "std")]

use stackjson::{
    deserialize, deserialize_str, field, measure, serialize, serialize_to_string, tokenize,
    ByteBuf, Error, Node, Options, StrBuf, Token, Value,
};

#[test]
fn reference_scalar_fields() {
    let mut l1 = 123u64;
    assert_eq!(text_of(&[field!(unsigned l1)]), r#"{"l1":123}"#);

    let mut l2 = 0u64;
    assert_eq!(text_of(&[field!(unsigned l2)]), r#"{"l2":0}"#);

    let mut l3 = -123i64;
    assert_eq!(text_of(&[field!(signed l3)]), r#"{"l3":-123}"#);

    let mut b1 = true;
    assert_eq!(text_of(&[field!(bool b1)]), r#"{"b1":true}"#);
}

#[test]
fn reference_string_and_buffer_fields() {
    let mut str1_storage = [0u8; 16];
    let str1 = StrBuf::new(&mut str1_storage);
    str1.set("HELLO").unwrap();
    assert_eq!(text_of(&[field!(str str1)]), r#"{"str1":"HELLO"}"#);

    let mut str2_storage = [0u8; 4];
    let str2 = StrBuf::new(&mut str2_storage);
    assert_eq!(text_of(&[field!(str str2)]), r#"{"str2":""}"#);

    let mut buf1_storage = [0u8; 8];
    let buf1 = ByteBuf::new(&mut buf1_storage);
    buf1.set(b"HELLO\0").unwrap();
    assert_eq!(text_of(&[field!(bytes buf1)]), r#"{"buf1":"SEVMTE8A"}"#);

    let mut buf2_storage = [0u8; 4];
    let buf2 = ByteBuf::new(&mut buf2_storage);
    assert_eq!(text_of(&[field!(bytes buf2)]), r#"{"buf2":""}"#);
}

#[test]
fn mixed_tree_matches_the_reference_text() {
    let mut lu1 = 123u64;
    let mut lu2 = 456u64;
    let mut ld1 = 123i64;
    let mut ld2 = -456i64;

    let mut ul3 = 0u64;
    let mut ul4 = 999u64;
    let mut l2 = -1i64;
    let mut str3_storage = [0u8; 8];
    let str3 = StrBuf::new(&mut str3_storage);
    str3.set("ABC").unwrap();
    let j1 = [
        field!(unsigned ul3),
        field!(unsigned ul4),
        field!(signed l2),
        field!(str str3),
    ];

    let mut s1_storage = [0u8; 4];
    let s1 = StrBuf::new(&mut s1_storage);
    s1.set("HI").unwrap();
    let mut s2_storage = [0u8; 4];
    let s2 = StrBuf::new(&mut s2_storage);
    s2.set("BYE").unwrap();

    let mut e1 = 123u64;
    let mut e2 = 456u64;
    let mut e3 = -456i64;
    let mut e4_storage = [0u8; 4];
    let e4 = StrBuf::new(&mut e4_storage);
    e4.set("ABC").unwrap();
    let a1 = [
        Node::unnamed(Value::unsigned(&mut e1)),
        Node::unnamed(Value::unsigned(&mut e2)),
        Node::unnamed(Value::signed(&mut e3)),
        Node::unnamed(Value::string(&e4)),
    ];

    let mut b1 = true;
    let mut b2 = false;
    let mut b3 = false;

    let mut s4_storage = [0u8; 32];
    let s4 = StrBuf::new(&mut s4_storage);
    s4.set("A\tB\n\rC\\  \" escaped").unwrap();

    let mut buf1_storage = [0u8; 8];
    let buf1 = ByteBuf::new(&mut buf1_storage);
    buf1.set(b"HELLO").unwrap();

    let tree = [
        field!(unsigned lu1),
        field!(unsigned lu2),
        field!(signed ld1),
        field!(signed ld2),
        field!(object j1),
        field!(str s1),
        field!(str s2),
        field!(array a1),
        field!(bool b1),
        field!(bool b2),
        field!(bool b3),
        field!(str s4),
        field!(bytes buf1),
    ];

    let text = serialize_to_string(&tree, &Options::new()).unwrap();
    assert_eq!(
        text,
        "{\"lu1\":123,\"lu2\":456,\"ld1\":123,\"ld2\":-456,\
         \"j1\":{\"ul3\":0,\"ul4\":999,\"l2\":-1,\"str3\":\"ABC\"},\
         \"s1\":\"HI\",\"s2\":\"BYE\",\"a1\":[123,456,-456,\"ABC\"],\
         \"b1\":true,\"b2\":false,\"b3\":false,\
         \"s4\":\"A\\tB\\n\\rC\\\\  \\\" escaped\",\"buf1\":\"SEVMTE8=\"}"
    );
    assert_eq!(measure(&tree, &Options::new()), Ok(text.len()));

    // The output must be well-formed JSON for any other parser.
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["lu1"], 123);
    assert_eq!(parsed["ld2"], -456);
    assert_eq!(parsed["j1"]["str3"], "ABC");
    assert_eq!(parsed["a1"][2], -456);
    assert_eq!(parsed["s4"], "A\tB\n\rC\\  \" escaped");
    assert_eq!(parsed["buf1"], "SEVMTE8=");

    // Pretty mode changes whitespace only.
    let pretty = serialize_to_string(&tree, &Options::pretty()).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(parsed, reparsed);
    assert_eq!(measure(&tree, &Options::pretty()), Ok(pretty.len()));
}

#[test]
fn round_trip_restores_every_field() {
    let mut count = 7u64;
    let mut delta = -9i64;
    let mut on = true;
    let mut name_storage = [0u8; 8];
    let name = StrBuf::new(&mut name_storage);
    name.set("alpha").unwrap();
    let mut blob_storage = [0u8; 6];
    let blob = ByteBuf::new(&mut blob_storage);
    blob.set(&[1, 2, 254, 255]).unwrap();
    let mut x = 11u64;
    let inner = [field!(unsigned x)];
    let mut e1 = 1i64;
    let mut e2 = 2i64;
    let elems = [
        Node::unnamed(Value::signed(&mut e1)),
        Node::unnamed(Value::signed(&mut e2)),
    ];
    let tree = [
        field!(unsigned count),
        field!(signed delta),
        field!(bool on),
        field!(str name),
        field!(bytes blob),
        field!(object inner),
        field!(array elems),
    ];
    let text = serialize_to_string(&tree, &Options::new()).unwrap();

    // Same shape, different contents.
    let mut count = 0u64;
    let mut delta = 0i64;
    let mut on = false;
    let mut name_storage = [0u8; 8];
    let name = StrBuf::new(&mut name_storage);
    let mut blob_storage = [0u8; 6];
    let blob = ByteBuf::new(&mut blob_storage);
    let mut x = 0u64;
    let inner = [field!(unsigned x)];
    let mut e1 = 0i64;
    let mut e2 = 0i64;
    let elems = [
        Node::unnamed(Value::signed(&mut e1)),
        Node::unnamed(Value::signed(&mut e2)),
    ];
    let other = [
        field!(unsigned count),
        field!(signed delta),
        field!(bool on),
        field!(str name),
        field!(bytes blob),
        field!(object inner),
        field!(array elems),
    ];
    deserialize_str(&other, &text, &Options::new()).unwrap();

    assert!(name.eq_bytes(b"alpha"));
    assert!(blob.eq_bytes(&[1, 2, 254, 255]));
    assert_eq!(serialize_to_string(&other, &Options::new()).unwrap(), text);
}

#[test]
fn evolving_document_updates_only_named_fields() {
    let mut a = 1u64;
    let mut b = 2u64;
    let mut c = 3u64;
    let tree = [field!(unsigned a), field!(unsigned b), field!(unsigned c)];
    let options = Options::new();

    assert_eq!(deserialize_str(&tree, r#"{"b":9}"#, &options), Ok(3));
    assert_eq!(
        deserialize_str(&tree, r#"{"a":4,"ignored":[1,2]}"#, &options),
        Ok(7)
    );
    assert_eq!(deserialize_str(&tree, "{}", &options), Ok(1));
    assert_eq!(deserialize_str(&tree, "", &options), Ok(0));
    // A truncated document fails in the tokenizer and touches nothing.
    assert_eq!(
        deserialize_str(&tree, r#"{"c":8"#, &options),
        Err(Error::MoreData)
    );

    let values: Vec<u64> = tree
        .iter()
        .map(|node| {
            let Value::Unsigned(cell) = &node.value else {
                unreachable!()
            };
            cell.get()
        })
        .collect();
    assert_eq!(values, [4, 9, 3]);
}

#[test]
fn unknown_keys_with_nested_composites_are_skipped() {
    let mut x = 0u64;
    let tree = [field!(unsigned x)];
    let text = br#"{"pre":{"deep":{"a":1}},"x":5,"post":[[1],[2,3]]}"#;
    let mut tokens = [Token::default(); 32];

    let produced = tokenize(text, &mut tokens).unwrap();
    let consumed = deserialize(&tree, &tokens[..produced], text, &Options::new()).unwrap();
    assert_eq!(consumed, produced);

    let Value::Unsigned(cell) = &tree[0].value else {
        unreachable!()
    };
    assert_eq!(cell.get(), 5);
}

#[test]
fn pretty_output_is_byte_exact() {
    let mut count = 3u64;
    let mut ul3 = 0u64;
    let j1 = [field!(unsigned ul3)];
    let tree = [field!(unsigned count), field!(object j1)];
    assert_eq!(
        serialize_to_string(&tree, &Options::pretty()).unwrap(),
        "{\n\t\"count\": 3,\n\t\"j1\": \n\t{\n\t\t\"ul3\": 0\n\t}\n}"
    );

    let mut e1 = 1i64;
    let mut e2 = 2i64;
    let elems = [
        Node::unnamed(Value::signed(&mut e1)),
        Node::unnamed(Value::signed(&mut e2)),
    ];
    let tree = [field!(array elems as "a")];
    assert_eq!(
        serialize_to_string(&tree, &Options::pretty()).unwrap(),
        "{\n\t\"a\": \n\t[\n\t\t1,\n\t\t2\n\t]\n}"
    );

    let mut x = 1u64;
    let tree = [field!(unsigned x)];
    let spaces = Options::pretty().with_indent("  ");
    assert_eq!(
        serialize_to_string(&tree, &spaces).unwrap(),
        "{\n  \"x\": 1\n}"
    );
}

#[test]
fn scalar_runs_stay_compact_in_pretty_mode() {
    let mut xs = [1u64, 2, 3];
    let mut flags = [true, false];
    let tree = [field!(unsigned_slice xs), field!(bool_slice flags)];

    assert_eq!(
        serialize_to_string(&tree, &Options::new()).unwrap(),
        r#"{"xs":[1,2,3],"flags":[true,false]}"#
    );
    assert_eq!(
        serialize_to_string(&tree, &Options::pretty()).unwrap(),
        "{\n\t\"xs\": [1,2,3],\n\t\"flags\": [true,false]\n}"
    );
}

#[test]
fn exact_measured_buffer_succeeds_and_one_less_fails() {
    let mut hits = 456u64;
    let mut label_storage = [0u8; 8];
    let label = StrBuf::new(&mut label_storage);
    label.set("abc").unwrap();
    let mut raw_storage = [0u8; 4];
    let raw = ByteBuf::new(&mut raw_storage);
    raw.set(b"\x00\x01").unwrap();
    let tree = [
        field!(unsigned hits),
        field!(str label),
        field!(bytes raw),
    ];

    for options in [Options::new(), Options::pretty()] {
        let len = measure(&tree, &options).unwrap();
        let mut exact = vec![0u8; len];
        assert_eq!(serialize(&tree, &mut exact, &options), Ok(len));
        let mut short = vec![0u8; len - 1];
        assert_eq!(serialize(&tree, &mut short, &options), Err(Error::Space));
    }
}

#[test]
fn kind_mismatches_fail_type_and_keep_prior_values() {
    let mut flag = true;
    let tree = [field!(bool flag)];
    assert_eq!(
        deserialize_str(&tree, r#"{"flag":"true"}"#, &Options::new()),
        Err(Error::Type)
    );

    let mut n = 7u64;
    let tree = [field!(unsigned n)];
    assert_eq!(
        deserialize_str(&tree, r#"{"n":-1}"#, &Options::new()),
        Err(Error::Number)
    );
    let Value::Unsigned(cell) = &tree[0].value else {
        unreachable!()
    };
    assert_eq!(cell.get(), 7);

    let mut x = 0u64;
    let inner = [field!(unsigned x)];
    let tree = [field!(object inner as "o")];
    assert_eq!(
        deserialize_str(&tree, r#"{"o":[1]}"#, &Options::new()),
        Err(Error::Type)
    );
    assert_eq!(
        deserialize_str(&tree, r#"{"o":7}"#, &Options::new()),
        Err(Error::Type)
    );

    // A stored string must leave room for a terminator.
    let mut s_storage = [0u8; 4];
    let s = StrBuf::new(&mut s_storage);
    s.set("old").unwrap();
    let tree = [field!(str s)];
    assert_eq!(
        deserialize_str(&tree, r#"{"s":"ABCD"}"#, &Options::new()),
        Err(Error::Type)
    );
    assert!(s.eq_bytes(b"old"));
}

#[test]
fn array_matching_is_positional_and_rewrites_used() {
    let mut a = 0i64;
    let mut b = 0i64;
    let mut c = 0i64;
    let elements = [
        Node::unnamed(Value::signed(&mut a)),
        Node::unnamed(Value::signed(&mut b)),
        Node::unnamed(Value::signed(&mut c)),
    ];
    let tree = [field!(array elements as "a")];
    let options = Options::new();

    deserialize_str(&tree, r#"{"a":[5]}"#, &options).unwrap();
    assert_eq!(serialize_to_string(&tree, &options).unwrap(), r#"{"a":[5]}"#);

    deserialize_str(&tree, r#"{"a":[1,2,3]}"#, &options).unwrap();
    assert_eq!(
        serialize_to_string(&tree, &options).unwrap(),
        r#"{"a":[1,2,3]}"#
    );

    // Overfull input fails and leaves the live count cleared.
    assert_eq!(
        deserialize_str(&tree, r#"{"a":[1,2,3,4]}"#, &options),
        Err(Error::Space)
    );
    assert_eq!(serialize_to_string(&tree, &options).unwrap(), r#"{"a":[]}"#);
}

#[test]
fn buffer_fields_decode_base64() {
    let mut storage = [0u8; 8];
    let buf = ByteBuf::new(&mut storage);
    let tree = [field!(bytes buf)];
    let options = Options::new();

    deserialize_str(&tree, r#"{"buf":"SEVMTE8="}"#, &options).unwrap();
    assert_eq!(buf.used(), 5);
    assert!(buf.eq_bytes(b"HELLO"));

    // Whitespace inside the payload is ignored.
    deserialize_str(&tree, r#"{"buf":"SEVM TE8A"}"#, &options).unwrap();
    assert!(buf.eq_bytes(b"HELLO\0"));

    deserialize_str(&tree, r#"{"buf":""}"#, &options).unwrap();
    assert_eq!(buf.used(), 0);

    assert_eq!(
        deserialize_str(&tree, r#"{"buf":"@@@@"}"#, &options),
        Err(Error::Format)
    );

    let mut small_storage = [0u8; 2];
    let small = ByteBuf::new(&mut small_storage);
    let tree = [field!(bytes small)];
    assert_eq!(
        deserialize_str(&tree, r#"{"small":"SEVMTE8="}"#, &options),
        Err(Error::Format)
    );
}

fn text_of(tree: &[Node]) -> String {
    serialize_to_string(tree, &Options::new()).unwrap()
}
