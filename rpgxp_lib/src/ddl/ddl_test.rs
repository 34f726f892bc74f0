use super::*;
use crate::schema::algebra::build::*;
use crate::schema::algebra::{FirstItemPolicy, IndexBehavior};

fn simple_actor_file() -> Schema {
    single_file(
        "Actors.rxdata",
        "actor",
        list(
            "actor",
            Schema::Obj {
                class: "RPG::Actor",
                fields: vec![id_field(), str_field("name"), fk_field("class_id", "class", false)],
            },
            None,
            FirstItemPolicy::Null,
            IndexBehavior::MatchIndexToField("id".to_owned()),
        ),
    )
}

fn simple_class_file() -> Schema {
    single_file(
        "Classes.rxdata",
        "class",
        list(
            "class",
            Schema::Obj {
                class: "RPG::Class",
                fields: vec![id_field(), str_field("name")],
            },
            None,
            FirstItemPolicy::Null,
            IndexBehavior::MatchIndexToField("id".to_owned()),
        ),
    )
}

#[test]
fn id_indexed_list_marks_id_as_primary_key() {
    let ddl = build(&[simple_class_file()]).unwrap();
    let table = ddl.table("class").unwrap();
    let pk = table.pk().unwrap();
    assert_eq!(pk.len(), 1);
    assert_eq!(pk[0].name, "id");
}

#[test]
fn forward_referencing_fk_resolves_against_a_later_file() {
    // `actor` is lowered before `class` even exists yet; the FK must still
    // resolve once both files have been lowered.
    let ddl = build(&[simple_actor_file(), simple_class_file()]).unwrap();
    let actor = ddl.table("actor").unwrap();
    let class_id = actor.columns().find(|c| c.name == "class_id").unwrap();
    assert_eq!(class_id.references, Some(("class".to_owned(), "id".to_owned())));
}

#[test]
fn fk_target_missing_is_a_schema_error() {
    let err = build(&[simple_actor_file()]).unwrap_err();
    assert!(matches!(err, RpgxpError::Schema(_)));
}

#[test]
fn nested_list_inherits_and_renames_parent_pk() {
    let file = single_file(
        "Classes.rxdata",
        "class",
        list(
            "class",
            Schema::Obj {
                class: "RPG::Class",
                fields: vec![
                    id_field(),
                    str_field("name"),
                    many_field(
                        "learnings",
                        "learning",
                        Schema::ArrayObj {
                            class: "RPG::Class::Learning",
                            fields: vec![int_field("level"), int_field("skill_id")],
                        },
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
    let ddl = build(&[file]).unwrap();
    let child = ddl.table("class_learning").unwrap();
    let pk: Vec<&str> = child.pk().unwrap().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(pk, vec!["class_learning_id", "index"]);
}

#[test]
fn same_nested_schema_under_two_parents_gets_distinct_table_names() {
    let troop = single_file(
        "Troops.rxdata",
        "troop",
        list(
            "troop",
            Schema::Obj {
                class: "RPG::Troop",
                fields: vec![
                    id_field(),
                    many_field(
                        "commands",
                        "command",
                        Schema::Obj { class: "RPG::EventCommand", fields: vec![int_field("code")] },
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
    let common_event = single_file(
        "CommonEvents.rxdata",
        "common_event",
        list(
            "common_event",
            Schema::Obj {
                class: "RPG::CommonEvent",
                fields: vec![
                    id_field(),
                    many_field(
                        "commands",
                        "command",
                        Schema::Obj { class: "RPG::EventCommand", fields: vec![int_field("code")] },
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

    let ddl = build(&[troop, common_event]).unwrap();
    assert!(ddl.table("troop_command").is_some());
    assert!(ddl.table("common_event_command").is_some());
}

#[test]
fn enum_field_seeds_its_lookup_table_once_per_enum() {
    let file = single_file(
        "States.rxdata",
        "state",
        list(
            "state",
            Schema::Obj {
                class: "RPG::State",
                fields: vec![
                    id_field(),
                    enum_field("restriction", "StateRestriction", EnumVariants::Int(crate::common::StateRestriction::VARIANTS)),
                ],
            },
            None,
            FirstItemPolicy::Null,
            IndexBehavior::MatchIndexToField("id".to_owned()),
        ),
    );
    let ddl = build(&[file]).unwrap();
    assert!(ddl.table("state_restriction").is_some());
    assert_eq!(ddl.enum_seeds.len(), 1);
}

#[test]
fn variant_obj_leaves_each_get_their_own_table_sharing_the_base_pk() {
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
                sub: Some(crate::schema::algebra::SubVariants {
                    discriminant_field: "condition_type".to_owned(),
                    variants: vec![
                        Variant {
                            discriminant_value: 0,
                            name: "switch".to_owned(),
                            fields: vec![int_field("switch_id")],
                            sub: None,
                        },
                        Variant {
                            discriminant_value: 1,
                            name: "variable".to_owned(),
                            fields: vec![int_field("variable_id")],
                            sub: None,
                        },
                    ],
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
    let ddl = build(&[file]).unwrap();
    assert!(ddl.table("common_event_command_show_text").is_some());
    assert!(ddl.table("common_event_command_conditional_branch_switch").is_some());
    assert!(ddl.table("common_event_command_conditional_branch_variable").is_some());

    let leaf = ddl.table("common_event_command_conditional_branch_switch").unwrap();
    let pk_names: Vec<&str> = leaf.pk().unwrap().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(pk_names, vec!["common_event_command_id", "index"]);
    assert!(leaf.columns().any(|c| c.name == "switch_id"));
}

#[test]
fn material_ref_with_enforce_adds_generated_columns_and_composite_fk() {
    let file = single_file(
        "Actors.rxdata",
        "actor",
        list(
            "actor",
            Schema::Obj {
                class: "RPG::Actor",
                fields: vec![id_field(), material_field("battler_name", crate::material::MaterialType::Graphics, crate::material::MaterialSubtype::Battlers, true, true)],
            },
            None,
            FirstItemPolicy::Null,
            IndexBehavior::MatchIndexToField("id".to_owned()),
        ),
    );
    let ddl = build(&[file]).unwrap();
    let actor = ddl.table("actor").unwrap();
    assert!(actor.columns().any(|c| c.name == "battler_name_type" && c.generated.is_some()));
    assert!(actor
        .members
        .iter()
        .any(|m| matches!(m, Member::ForeignKey { referenced_table, .. } if referenced_table == "material")));
}

#[test]
fn to_script_includes_material_best_file_view() {
    let ddl = build(&[simple_class_file()]).unwrap();
    let script = ddl.to_script().unwrap().to_string();
    assert!(script.contains("material_best_file"));
}
