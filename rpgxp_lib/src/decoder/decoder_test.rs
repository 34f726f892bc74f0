//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

use crate::marshal::{Node, StringEncoding};
use crate::schema::algebra::{build, FirstItemPolicy, IndexBehavior, Schema};

use super::*;

fn decode_ok(schema: &Schema, node: &Node) -> Value {
    decode(schema, node, &mut vec![]).unwrap()
}

#[test]
fn bool_and_int_bool_decode() {
    assert_eq!(decode_ok(&Schema::Bool, &Node::Bool(true)), Value::Bool(true));
    assert_eq!(decode_ok(&Schema::IntBool, &Node::Int(1)), Value::Bool(true));
    assert_eq!(decode_ok(&Schema::IntBool, &Node::Int(0)), Value::Bool(false));
    assert!(decode(&Schema::IntBool, &Node::Int(2), &mut vec![]).is_err());
}

#[test]
fn int_bounds_are_enforced() {
    let schema = Schema::Int { lb: Some(1), ub: Some(10) };
    assert_eq!(decode_ok(&schema, &Node::Int(5)), Value::Int(5));
    assert!(decode(&schema, &Node::Int(0), &mut vec![]).is_err());
    assert!(decode(&schema, &Node::Int(11), &mut vec![]).is_err());
}

#[test]
fn str_decodes_via_source_encoding() {
    let node = Node::Str {
        raw: "\xe3\x81\x82".as_bytes().to_vec(),
        encoding: StringEncoding::Utf8,
    };
    assert_eq!(decode_ok(&Schema::Str, &node), Value::Str("\u{3042}".to_owned()));
}

#[test]
fn fk_maps_zero_sentinel_to_null_when_nullable() {
    let schema = Schema::Fk { target_table: "map".to_owned(), nullable: true };
    assert_eq!(decode_ok(&schema, &Node::Int(0)), Value::Null);
    assert_eq!(decode_ok(&schema, &Node::Int(3)), Value::Int(3));

    let not_nullable = Schema::Fk { target_table: "map".to_owned(), nullable: false };
    assert_eq!(decode_ok(&not_nullable, &Node::Int(0)), Value::Int(0));
}

#[test]
fn obj_requires_exact_ivar_set() {
    let schema = Schema::Obj {
        class: "RPG::BaseItem",
        fields: vec![build::id_field(), build::str_field("name")],
    };
    let node = Node::Object {
        class: "RPG::BaseItem".to_owned(),
        ivars: vec![
            ("@id".to_owned(), Node::Int(1)),
            ("@name".to_owned(), Node::Str { raw: b"Potion".to_vec(), encoding: StringEncoding::Utf8 }),
        ],
    };
    let value = decode_ok(&schema, &node);
    assert_eq!(value.field("name"), Some(&Value::Str("Potion".to_owned())));

    let missing_field_node = Node::Object {
        class: "RPG::BaseItem".to_owned(),
        ivars: vec![("@id".to_owned(), Node::Int(1))],
    };
    assert!(decode(&schema, &missing_field_node, &mut vec![]).is_err());

    let extra_field_node = Node::Object {
        class: "RPG::BaseItem".to_owned(),
        ivars: vec![
            ("@id".to_owned(), Node::Int(1)),
            ("@name".to_owned(), Node::Str { raw: b"Potion".to_vec(), encoding: StringEncoding::Utf8 }),
            ("@extra".to_owned(), Node::Nil),
        ],
    };
    assert!(decode(&schema, &extra_field_node, &mut vec![]).is_err());
}

#[test]
fn list_with_null_first_item_skips_sentinel() {
    let schema = Schema::List {
        item: Box::new(Schema::Str),
        first_item: FirstItemPolicy::Null,
        index: IndexBehavior::AddIndex("position".to_owned()),
        table_name: "thing".to_owned(),
        min_len: None,
        max_len: None,
    };
    let node = Node::Array(vec![
        Node::Nil,
        Node::Str { raw: b"a".to_vec(), encoding: StringEncoding::Utf8 },
        Node::Str { raw: b"b".to_vec(), encoding: StringEncoding::Utf8 },
    ]);
    let value = decode_ok(&schema, &node);
    assert_eq!(
        value,
        Value::List(vec![Value::Str("a".to_owned()), Value::Str("b".to_owned())])
    );
}

#[test]
fn list_with_null_first_item_rejects_non_nil_sentinel() {
    let schema = Schema::List {
        item: Box::new(Schema::Str),
        first_item: FirstItemPolicy::Null,
        index: IndexBehavior::AddIndex("position".to_owned()),
        table_name: "thing".to_owned(),
        min_len: None,
        max_len: None,
    };
    let node = Node::Array(vec![Node::Str { raw: b"oops".to_vec(), encoding: StringEncoding::Utf8 }]);
    assert!(decode(&schema, &node, &mut vec![]).is_err());
}

#[test]
fn event_command_variant_decodes_simple_and_complex() {
    let schema = crate::schema::event_command::event_command_schema();

    let simple = Node::Object {
        class: "RPG::EventCommand".to_owned(),
        ivars: vec![
            ("@indent".to_owned(), Node::Int(0)),
            ("@code".to_owned(), Node::Int(101)),
            (
                "@parameters".to_owned(),
                Node::Array(vec![Node::Str { raw: b"hi".to_vec(), encoding: StringEncoding::Utf8 }]),
            ),
        ],
    };
    let value = decode_ok(&schema, &simple);
    match value {
        Value::Variant { path, .. } => {
            assert_eq!(path.len(), 1);
            assert_eq!(path[0].name, "show_text");
        }
        _ => panic!("expected a Variant value"),
    }

    let complex = Node::Object {
        class: "RPG::EventCommand".to_owned(),
        ivars: vec![
            ("@indent".to_owned(), Node::Int(0)),
            ("@code".to_owned(), Node::Int(111)),
            (
                "@parameters".to_owned(),
                Node::Array(vec![Node::Int(0), Node::Int(1), Node::Int(0)]),
            ),
        ],
    };
    let value = decode_ok(&schema, &complex);
    match value {
        Value::Variant { path, .. } => {
            assert_eq!(path.len(), 2);
            assert_eq!(path[0].name, "conditional_branch");
            assert_eq!(path[1].name, "switch");
        }
        _ => panic!("expected a Variant value"),
    }
}

#[test]
fn event_command_rejects_parameters_length_mismatch() {
    let schema = crate::schema::event_command::event_command_schema();
    let node = Node::Object {
        class: "RPG::EventCommand".to_owned(),
        ivars: vec![
            ("@indent".to_owned(), Node::Int(0)),
            ("@code".to_owned(), Node::Int(101)),
            (
                "@parameters".to_owned(),
                Node::Array(vec![
                    Node::Str { raw: b"hi".to_vec(), encoding: StringEncoding::Utf8 },
                    Node::Int(0),
                ]),
            ),
        ],
    };
    assert!(decode(&schema, &node, &mut vec![]).is_err());
}
