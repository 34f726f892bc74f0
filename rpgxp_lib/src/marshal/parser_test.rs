//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

use super::parser::parse;
use crate::marshal::node::{Node, StringEncoding};

fn header() -> Vec<u8> {
    vec![4, 8]
}

/// Encodes a Marshal fixnum body (the bytes following the `i` tag), mirroring
/// the scheme `Parser::read_fixnum` decodes.
fn fixnum_body(n: i64) -> Vec<u8> {
    if n == 0 {
        return vec![0];
    }
    if (1..123).contains(&n) {
        return vec![(n + 5) as u8];
    }
    if (-123..0).contains(&n) {
        return vec![((n - 5) as i8) as u8];
    }
    // Mirrors CRuby's `w_long`: emit two's-complement bytes of `x`,
    // arithmetic-shifting right until only sign bits remain.
    let mut buf = vec![];
    let mut x = n;
    let mut len = 0i32;
    for i in 1..=8i32 {
        buf.push((x & 0xff) as u8);
        x >>= 8;
        if x == 0 {
            len = i;
            break;
        }
        if x == -1 {
            len = -i;
            break;
        }
    }
    let mut out = vec![(len as i8) as u8];
    out.extend(&buf[0..len.unsigned_abs() as usize]);
    out
}

fn symbol_bytes(name: &str) -> Vec<u8> {
    let mut out = vec![b':'];
    out.extend(fixnum_body(name.len() as i64));
    out.extend(name.as_bytes());
    out
}

#[test]
fn decodes_nil_true_false() {
    assert_eq!(parse(&[&header()[..], &[b'0']].concat()).unwrap(), Node::Nil);
    assert_eq!(
        parse(&[&header()[..], &[b'T']].concat()).unwrap(),
        Node::Bool(true)
    );
    assert_eq!(
        parse(&[&header()[..], &[b'F']].concat()).unwrap(),
        Node::Bool(false)
    );
}

#[test]
fn decodes_fixnums_across_encoding_widths() {
    for n in [0_i64, 1, -1, 100, -100, 1000, -1000, 70000, -70000] {
        let mut bytes = header();
        bytes.push(b'i');
        bytes.extend(fixnum_body(n));
        assert_eq!(parse(&bytes).unwrap(), Node::Int(n), "round trip for {n}");
    }
}

#[test]
fn decodes_plain_string_as_ascii_8bit_by_default() {
    let mut bytes = header();
    bytes.push(b'"');
    bytes.extend(fixnum_body(3));
    bytes.extend(b"abc");
    let node = parse(&bytes).unwrap();
    match node {
        Node::Str { raw, encoding } => {
            assert_eq!(raw, b"abc");
            assert_eq!(encoding, StringEncoding::Ascii8Bit);
        }
        other => panic!("expected string, got {other:?}"),
    }
}

#[test]
fn decodes_ivar_wrapped_utf8_string() {
    let mut bytes = header();
    bytes.push(b'I'); // ivar wrapper
    bytes.push(b'"');
    bytes.extend(fixnum_body(2));
    bytes.extend("hi".as_bytes());
    bytes.extend(fixnum_body(1)); // 1 ivar
    bytes.extend(symbol_bytes("E"));
    bytes.push(b'T'); // E => true (utf-8)
    let node = parse(&bytes).unwrap();
    assert_eq!(
        node,
        Node::Str {
            raw: b"hi".to_vec(),
            encoding: StringEncoding::Utf8,
        }
    );
    assert_eq!(node.decoded_str().unwrap(), "hi");
}

#[test]
fn decodes_array_of_mixed_values() {
    let mut bytes = header();
    bytes.push(b'[');
    bytes.extend(fixnum_body(3));
    bytes.push(b'0');
    bytes.push(b'i');
    bytes.extend(fixnum_body(42));
    bytes.push(b'T');
    let node = parse(&bytes).unwrap();
    assert_eq!(
        node,
        Node::Array(vec![Node::Nil, Node::Int(42), Node::Bool(true)])
    );
}

#[test]
fn decodes_hash_of_symbol_to_int() {
    let mut bytes = header();
    bytes.push(b'{');
    bytes.extend(fixnum_body(1));
    bytes.extend(symbol_bytes("a"));
    bytes.push(b'i');
    bytes.extend(fixnum_body(1));
    let node = parse(&bytes).unwrap();
    assert_eq!(
        node,
        Node::Hash(vec![(Node::Symbol("a".to_owned()), Node::Int(1))])
    );
}

#[test]
fn decodes_object_with_ivars_and_symbol_links() {
    // Object { @id => 1, @name => "x" } where the class symbol is reused
    // via a link to exercise the symbol table.
    let mut bytes = header();
    bytes.push(b'['); // wrap two objects of the same class in an array
    bytes.extend(fixnum_body(2));

    bytes.push(b'o');
    bytes.extend(symbol_bytes("RPG::Actor"));
    bytes.extend(fixnum_body(1));
    bytes.extend(symbol_bytes("@id"));
    bytes.push(b'i');
    bytes.extend(fixnum_body(1));

    bytes.push(b'o');
    bytes.push(b';'); // symbol link back to "RPG::Actor" (index 0)
    bytes.extend(fixnum_body(0));
    bytes.extend(fixnum_body(1));
    bytes.extend(symbol_bytes("@id"));
    bytes.push(b'i');
    bytes.extend(fixnum_body(2));

    let node = parse(&bytes).unwrap();
    let items = node.as_array().unwrap();
    assert_eq!(items.len(), 2);
    for (item, expected_id) in items.iter().zip([1, 2]) {
        let (class, ivars) = item.as_object().unwrap();
        assert_eq!(class, "RPG::Actor");
        assert_eq!(ivars.len(), 1);
        assert_eq!(ivars[0].0, "@id");
        assert_eq!(ivars[0].1, Node::Int(expected_id));
    }
}

#[test]
fn decodes_user_data_payload() {
    let mut bytes = header();
    bytes.push(b'u');
    bytes.extend(symbol_bytes("Table"));
    bytes.extend(fixnum_body(4));
    bytes.extend([1, 2, 3, 4]);
    let node = parse(&bytes).unwrap();
    let (class, payload) = node.as_user_data().unwrap();
    assert_eq!(class, "Table");
    assert_eq!(payload, &[1, 2, 3, 4]);
}

#[test]
fn decodes_float_literal() {
    let mut bytes = header();
    bytes.push(b'f');
    bytes.extend(fixnum_body(3));
    bytes.extend(b"1.5");
    let node = parse(&bytes).unwrap();
    assert_eq!(node, Node::Float(1.5));
}

#[test]
fn rejects_unsupported_tag() {
    let mut bytes = header();
    bytes.push(b'c'); // class reference, unsupported
    bytes.extend(fixnum_body(1));
    bytes.push(b'X');
    assert!(parse(&bytes).is_err());
}

#[test]
fn rejects_bad_version_header() {
    let bytes = vec![5, 0, b'0'];
    assert!(parse(&bytes).is_err());
}
