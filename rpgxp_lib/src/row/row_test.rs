use super::*;
use crate::decoder::Value;
use crate::schema::algebra::build::*;
use crate::schema::algebra::{FirstItemPolicy, IndexBehavior, SubVariants};

fn obj(fields: Vec<(&str, Value)>) -> Value {
    Value::Obj(fields.into_iter().map(|(n, v)| (n.to_owned(), v)).collect())
}

#[test]
fn id_indexed_list_produces_one_row_per_element() {
    let file = single_file(
        "Classes.rxdata",
        "class",
        list(
            "class",
            Schema::Obj { class: "RPG::Class", fields: vec![id_field(), str_field("name")] },
            None,
            FirstItemPolicy::Null,
            IndexBehavior::MatchIndexToField("id".to_owned()),
        ),
    );
    // The decoder strips the array's leading nil sentinel before row lowering
    // ever sees it (see `decoder::decode_list`'s `.skip(start)`), so the
    // `Value::List` here holds only the real elements.
    let value = Value::List(vec![
        obj(vec![("id", Value::Int(1)), ("name", Value::Str("Warrior".to_owned()))]),
        obj(vec![("id", Value::Int(2)), ("name", Value::Str("Mage".to_owned()))]),
    ]);
    let reg = lower_single_file(&file, &value).unwrap();
    let statements = reg.into_insert_statements();
    let class = statements.iter().find(|s| s.table_name == "class").unwrap();
    assert_eq!(class.rows.len(), 2);
    assert!(class.rows.iter().any(|r| r.contains(&SqlValue::Text("Warrior".to_owned()))));
}

#[test]
fn nested_list_rows_carry_the_renamed_parent_pk() {
    let file = single_file(
        "Classes.rxdata",
        "class",
        list(
            "class",
            Schema::Obj {
                class: "RPG::Class",
                fields: vec![
                    id_field(),
                    many_field(
                        "learnings",
                        "learning",
                        Schema::ArrayObj { class: "RPG::Class::Learning", fields: vec![int_field("level"), int_field("skill_id")] },
                        None,
                        FirstItemPolicy::Regular,
                        IndexBehavior::AddIndex("index".to_owned()),
                    ),
                ],
            },
            None,
            FirstItemPolicy::Null,
            IndexBehavior::MatchIndexToField("id".to_owned()),
        ),
    );
    let value = Value::List(vec![
        obj(vec![
            ("id", Value::Int(3)),
            (
                "learnings",
                Value::List(vec![
                    obj(vec![("level", Value::Int(5)), ("skill_id", Value::Int(10))]),
                    obj(vec![("level", Value::Int(8)), ("skill_id", Value::Int(11))]),
                ]),
            ),
        ]),
    ]);
    let reg = lower_single_file(&file, &value).unwrap();
    let statements = reg.into_insert_statements();
    let learning = statements.iter().find(|s| s.table_name == "class_learning").unwrap();
    assert_eq!(learning.rows.len(), 2);
    let id_pos = learning.columns.iter().position(|c| c == "class_learning_id").unwrap();
    let index_pos = learning.columns.iter().position(|c| c == "index").unwrap();
    assert_eq!(learning.rows[0][id_pos], SqlValue::Int(3));
    assert_eq!(learning.rows[0][index_pos], SqlValue::Int(0));
    assert_eq!(learning.rows[1][index_pos], SqlValue::Int(1));
}

#[test]
fn variant_obj_rows_land_in_the_matching_leaf_table() {
    let command = Schema::VariantObj {
        class: "RPG::EventCommand",
        fields: vec![int_field("indent")],
        discriminant: int_field("code"),
        variants: vec![
            Variant {
                discriminant_value: 101,
                name: "show_text".to_owned(),
                fields: vec![str_field("text")],
                sub: None,
            },
            Variant {
                discriminant_value: 111,
                name: "conditional_branch".to_owned(),
                fields: vec![],
                sub: Some(SubVariants {
                    discriminant_field: "condition_type".to_owned(),
                    variants: vec![Variant {
                        discriminant_value: 0,
                        name: "switch".to_owned(),
                        fields: vec![int_field("switch_id")],
                        sub: None,
                    }],
                }),
            },
        ],
    };
    let file = single_file(
        "CommonEvents.rxdata",
        "common_event",
        list(
            "common_event",
            Schema::Obj {
                class: "RPG::CommonEvent",
                fields: vec![
                    id_field(),
                    many_field(
                        "command",
                        "command",
                        command,
                        None,
                        FirstItemPolicy::Regular,
                        IndexBehavior::AddIndex("index".to_owned()),
                    ),
                ],
            },
            None,
            FirstItemPolicy::Null,
            IndexBehavior::MatchIndexToField("id".to_owned()),
        ),
    );

    let show_text = Value::Variant {
        base: vec![("indent".to_owned(), Value::Int(0)), ("code".to_owned(), Value::Int(101))],
        path: vec![VariantStep {
            name: "show_text".to_owned(),
            fields: vec![("text".to_owned(), Value::Str("Hello".to_owned()))],
            nested: vec![],
        }],
    };
    let branch = Value::Variant {
        base: vec![("indent".to_owned(), Value::Int(0)), ("code".to_owned(), Value::Int(111))],
        path: vec![VariantStep {
            name: "conditional_branch".to_owned(),
            fields: vec![],
            nested: vec![VariantStep {
                name: "switch".to_owned(),
                fields: vec![("switch_id".to_owned(), Value::Int(7))],
                nested: vec![],
            }],
        }],
    };

    let value = Value::List(vec![
        Value::Null,
        obj(vec![("id", Value::Int(1)), ("command", Value::List(vec![show_text, branch]))]),
    ]);

    let reg = lower_single_file(&file, &value).unwrap();
    let statements = reg.into_insert_statements();

    let show_text_rows = statements.iter().find(|s| s.table_name == "common_event_command_show_text").unwrap();
    assert_eq!(show_text_rows.rows.len(), 1);
    let text_pos = show_text_rows.columns.iter().position(|c| c == "text").unwrap();
    assert_eq!(show_text_rows.rows[0][text_pos], SqlValue::Text("Hello".to_owned()));

    let branch_rows = statements
        .iter()
        .find(|s| s.table_name == "common_event_command_conditional_branch_switch")
        .unwrap();
    assert_eq!(branch_rows.rows.len(), 1);
    let switch_pos = branch_rows.columns.iter().position(|c| c == "switch_id").unwrap();
    assert_eq!(branch_rows.rows[0][switch_pos], SqlValue::Int(7));
}

#[test]
fn map_file_uses_the_filename_captured_id_not_decoded_content() {
    let inner = Schema::Obj {
        class: "RPG::Map",
        fields: vec![fk_field("tileset_id", "tileset", false), int_field("width")],
    };
    let value = obj(vec![("tileset_id", Value::Int(2)), ("width", Value::Int(20))]);
    let reg = lower_map_file("map", &inner, "id", 5, &value).unwrap();
    let statements = reg.into_insert_statements();
    let map = statements.iter().find(|s| s.table_name == "map").unwrap();
    let id_pos = map.columns.iter().position(|c| c == "id").unwrap();
    assert_eq!(map.rows[0][id_pos], SqlValue::Int(5));
}

#[test]
fn four_doubles_value_lowers_to_four_suffixed_columns() {
    let file = single_file(
        "Animations.rxdata",
        "animation_timing",
        list(
            "animation_timing",
            Schema::ArrayObj {
                class: "RPG::Animation::Timing",
                fields: vec![color_field("flash_color")],
            },
            None,
            FirstItemPolicy::Regular,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
    );
    let value = Value::List(vec![obj(vec![(
        "flash_color",
        Value::Obj(vec![
            ("a".to_owned(), Value::Float(255.0)),
            ("b".to_owned(), Value::Float(128.0)),
            ("c".to_owned(), Value::Float(0.0)),
            ("d".to_owned(), Value::Float(64.0)),
        ]),
    )])]);
    let reg = lower_single_file(&file, &value).unwrap();
    let statements = reg.into_insert_statements();
    let table = statements.iter().find(|s| s.table_name == "animation_timing").unwrap();
    let b_pos = table.columns.iter().position(|c| c == "flash_color_b").unwrap();
    assert_eq!(table.rows[0][b_pos], SqlValue::Real(128.0));
}

#[test]
fn into_script_prefixes_every_populated_table_with_a_delete() {
    let file = single_file(
        "Classes.rxdata",
        "class",
        list(
            "class",
            Schema::Obj { class: "RPG::Class", fields: vec![id_field(), str_field("name")] },
            None,
            FirstItemPolicy::Null,
            IndexBehavior::MatchIndexToField("id".to_owned()),
        ),
    );
    let value = Value::List(vec![obj(vec![("id", Value::Int(1)), ("name", Value::Str("Warrior".to_owned()))])]);
    let reg = lower_single_file(&file, &value).unwrap();
    let script = reg.into_script().to_string();

    let delete_pos = script.find("DELETE FROM \"class\";").unwrap();
    let insert_pos = script.find("INSERT INTO \"class\"").unwrap();
    assert!(delete_pos < insert_pos, "DELETE must precede INSERT for idempotent re-imports");
}
