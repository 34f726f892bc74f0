//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The concrete RPG Maker XP data model: one [`Schema`] per `Data/*.rxdata`
//! file, built out of the generic algebra in [`crate::schema::algebra`].
//! This is the single source of truth every other component — the
//! schema-driven decoder, the DDL lowering, the row lowering — is driven
//! from; [`file_schemas`] is the pipeline's one entry point into it.

use crate::common::*;
use crate::material::{MaterialSubtype, MaterialType};
use crate::schema::algebra::build::*;
use crate::schema::algebra::{
    ColumnType, EnumVariants, Field, FirstItemPolicy, IndexBehavior, KeyBehavior, Schema,
};
use crate::schema::event_command::event_command_schema;

fn enum_variants_int(pairs: &'static [(i32, &'static str)]) -> EnumVariants {
    EnumVariants::Int(pairs)
}

/// A field whose Marshal name differs from its Rust name, the way `@list`
/// always stores under `list_` across this schema, matching RPG Maker's
/// own `RPG::*` class field names verbatim.
fn list_field(table_suffix: &str, item: Schema) -> Field {
    let mut field = many_field(
        "list_",
        table_suffix,
        item,
        None,
        FirstItemPolicy::Regular,
        IndexBehavior::AddIndex("index".to_owned()),
    );
    field.rpg_name = "@list".to_owned();
    field
}

fn id_indexed_list(table_name: &str, item: Schema) -> Schema {
    list(
        table_name,
        item,
        None,
        FirstItemPolicy::Null,
        IndexBehavior::MatchIndexToField("id".to_owned()),
    )
}

// ---------------------------------------------------------------------
// Actors.rxdata
// ---------------------------------------------------------------------

fn actor_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        fk_field("class_id", "class", false),
        int_field("initial_level"),
        int_field("final_level"),
        int_field("exp_basis"),
        int_field("exp_inflation"),
        str_field("character_name"),
        int_field("character_hue"),
        material_field("battler_name", MaterialType::Graphics, MaterialSubtype::Battlers, true, true),
        int_field("battler_hue"),
        Field::plain("parameters", Schema::NdArray { dims: 2 }),
        fk_field("weapon_id", "weapon", true),
        fk_field("armor1_id", "armor", true),
        fk_field("armor2_id", "armor", true),
        fk_field("armor3_id", "armor", true),
        fk_field("armor4_id", "armor", true),
        bool_field("weapon_fix"),
        bool_field("armor1_fix"),
        bool_field("armor2_fix"),
        bool_field("armor3_fix"),
        bool_field("armor4_fix"),
    ];
    id_indexed_list(
        "actor",
        Schema::Obj {
            class: "RPG::Actor",
            fields,
        },
    )
}

// ---------------------------------------------------------------------
// Classes.rxdata
// ---------------------------------------------------------------------

fn class_learning_schema() -> Schema {
    Schema::ArrayObj {
        class: "RPG::Class::Learning",
        fields: vec![int_field("level"), fk_field("skill_id", "skill", false)],
    }
}

fn class_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        enum_field("position", "ClassPosition", enum_variants_int(ClassPosition::VARIANTS)),
        Field::plain(
            "weapon_set",
            Schema::Set {
                item: Box::new(Schema::Fk { target_table: "weapon".to_owned(), nullable: false }),
                item_name: Some("weapon_id".to_owned()),
                table_name: "${prefix}_weapon".to_owned(),
            },
        ),
        Field::plain(
            "armor_set",
            Schema::Set {
                item: Box::new(Schema::Fk { target_table: "armor".to_owned(), nullable: false }),
                item_name: Some("armor_id".to_owned()),
                table_name: "${prefix}_armor".to_owned(),
            },
        ),
        Field::plain("element_ranks", Schema::NdArray { dims: 1 }),
        Field::plain("state_ranks", Schema::NdArray { dims: 1 }),
        many_field(
            "learnings",
            "learning",
            class_learning_schema(),
            None,
            FirstItemPolicy::Regular,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
    ];
    id_indexed_list("class", Schema::Obj { class: "RPG::Class", fields })
}

// ---------------------------------------------------------------------
// Skills.rxdata / Items.rxdata / Weapons.rxdata / Armors.rxdata share the
// "usable thing with element/state sets" shape.
// ---------------------------------------------------------------------

fn element_set_field(name: &str) -> Field {
    Field::plain(
        name,
        Schema::Set {
            item: Box::new(Schema::Int { lb: Some(1), ub: None }),
            item_name: Some("element_id".to_owned()),
            table_name: format!("${{prefix}}_{name}"),
        },
    )
}

fn state_set_field(name: &str) -> Field {
    Field::plain(
        name,
        Schema::Set {
            item: Box::new(Schema::Fk { target_table: "state".to_owned(), nullable: false }),
            item_name: Some("state_id".to_owned()),
            table_name: format!("${{prefix}}_{name}"),
        },
    )
}

fn skill_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        material_field("icon_name", MaterialType::Graphics, MaterialSubtype::Icons, true, true),
        str_field("description"),
        enum_field("scope", "Scope", enum_variants_int(Scope::VARIANTS)),
        enum_field("occasion", "Occasion", enum_variants_int(Occasion::VARIANTS)),
        fk_field("animation1_id", "animation", true),
        fk_field("animation2_id", "animation", true),
        material_field("menu_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        fk_field("common_event_id", "common_event", true),
        int_field("sp_cost"),
        int_field("power"),
        int_field("atk_f"),
        int_field("eva_f"),
        int_field("str_f"),
        int_field("dex_f"),
        int_field("agi_f"),
        int_field("int_f"),
        int_field("hit"),
        int_field("pdef_f"),
        int_field("mdef_f"),
        int_field("variance"),
        element_set_field("element_set"),
        state_set_field("plus_state_set"),
        state_set_field("minus_state_set"),
    ];
    id_indexed_list("skill", Schema::Obj { class: "RPG::Skill", fields })
}

fn item_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        material_field("icon_name", MaterialType::Graphics, MaterialSubtype::Icons, true, true),
        str_field("description"),
        enum_field("scope", "Scope", enum_variants_int(Scope::VARIANTS)),
        enum_field("occasion", "Occasion", enum_variants_int(Occasion::VARIANTS)),
        fk_field("animation1_id", "animation", true),
        fk_field("animation2_id", "animation", true),
        material_field("menu_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        fk_field("common_event_id", "common_event", true),
        int_field("price"),
        bool_field("consumable"),
        enum_field("parameter_type", "ParameterType", enum_variants_int(ParameterType::VARIANTS)),
        int_field("parameter_points"),
        int_field("recover_hp_rate"),
        int_field("recover_hp"),
        int_field("recover_sp_rate"),
        int_field("recover_sp"),
        int_field("hit"),
        int_field("pdef_f"),
        int_field("mdef_f"),
        int_field("variance"),
        element_set_field("element_set"),
        state_set_field("plus_state_set"),
        state_set_field("minus_state_set"),
    ];
    id_indexed_list("item", Schema::Obj { class: "RPG::Item", fields })
}

fn weapon_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        material_field("icon_name", MaterialType::Graphics, MaterialSubtype::Icons, true, true),
        str_field("description"),
        fk_field("animation1_id", "animation", true),
        fk_field("animation2_id", "animation", true),
        int_field("price"),
        int_field("atk"),
        int_field("pdef"),
        int_field("mdef"),
        int_field("str_plus"),
        int_field("dex_plus"),
        int_field("agi_plus"),
        int_field("int_plus"),
        element_set_field("element_set"),
        state_set_field("plus_state_set"),
        state_set_field("minus_state_set"),
    ];
    id_indexed_list("weapon", Schema::Obj { class: "RPG::Weapon", fields })
}

fn armor_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        material_field("icon_name", MaterialType::Graphics, MaterialSubtype::Icons, true, true),
        str_field("description"),
        enum_field("kind", "ArmorKind", enum_variants_int(ArmorKind::VARIANTS)),
        fk_field("auto_state_id", "state", true),
        int_field("price"),
        int_field("pdef"),
        int_field("mdef"),
        int_field("eva"),
        int_field("str_plus"),
        int_field("dex_plus"),
        int_field("agi_plus"),
        int_field("int_plus"),
        element_set_field("guard_element_set"),
        state_set_field("guard_state_set"),
    ];
    id_indexed_list("armor", Schema::Obj { class: "RPG::Armor", fields })
}

// ---------------------------------------------------------------------
// Enemies.rxdata / Troops.rxdata
// ---------------------------------------------------------------------

fn enemy_action_schema() -> Schema {
    Schema::ArrayObj {
        class: "RPG::Enemy::Action",
        fields: vec![
            enum_field("kind", "EnemyActionKind", enum_variants_int(EnemyActionKind::VARIANTS)),
            enum_field("basic", "EnemyBasicAction", enum_variants_int(EnemyBasicAction::VARIANTS)),
            fk_field("skill_id", "skill", true),
            int_field("condition_turn_a"),
            int_field("condition_turn_b"),
            int_field("condition_hp"),
            int_field("condition_level"),
            // The source encodes this as an FK-shaped integer, but no
            // "switch" lookup table exists in this schema (switches are
            // plain ids, not rows anywhere) — see DESIGN.md's note on this
            // open question. Kept as a plain nullable-by-convention integer
            // rather than a dangling `Fk`.
            int_field("condition_switch_id"),
            int_field("rating"),
        ],
    }
}

fn enemy_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        material_field("battler_name", MaterialType::Graphics, MaterialSubtype::Battlers, true, true),
        int_field("battler_hue"),
        int_field("maxhp"),
        int_field("maxsp"),
        int_field("str"),
        int_field("dex"),
        int_field("agi"),
        int_field("int"),
        int_field("atk"),
        int_field("pdef"),
        int_field("mdef"),
        int_field("eva"),
        fk_field("animation1_id", "animation", true),
        fk_field("animation2_id", "animation", true),
        Field::plain("element_ranks", Schema::NdArray { dims: 1 }),
        Field::plain("state_ranks", Schema::NdArray { dims: 1 }),
        int_field("exp"),
        int_field("gold"),
        fk_field("item_id", "item", true),
        fk_field("weapon_id", "weapon", true),
        fk_field("armor_id", "armor", true),
        int_field("treasure_prob"),
        many_field(
            "actions",
            "action",
            enemy_action_schema(),
            None,
            FirstItemPolicy::Regular,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
    ];
    id_indexed_list("enemy", Schema::Obj { class: "RPG::Enemy", fields })
}

fn troop_member_schema() -> Schema {
    Schema::ArrayObj {
        class: "RPG::Troop::Member",
        fields: vec![
            fk_field("enemy_id", "enemy", false),
            int_field("x"),
            int_field("y"),
            bool_field("hidden"),
            bool_field("immortal"),
        ],
    }
}

fn troop_page_condition_schema() -> Schema {
    Schema::Obj {
        class: "RPG::Troop::Page::Condition",
        fields: vec![
            bool_field("turn_valid"),
            int_field("turn_a"),
            int_field("turn_b"),
            bool_field("enemy_valid"),
            int_field("enemy_index"),
            int_field("enemy_hp"),
            bool_field("actor_valid"),
            fk_field("actor_id", "actor", true),
            int_field("actor_hp"),
            bool_field("switch_valid"),
            int_field("switch_id"),
        ],
    }
}

fn troop_page_schema() -> Schema {
    Schema::Obj {
        class: "RPG::Troop::Page",
        fields: vec![
            Field::plain("condition", troop_page_condition_schema()),
            enum_field("span", "TroopPageSpan", enum_variants_int(TroopPageSpan::VARIANTS)),
            list_field("command", event_command_schema()),
        ],
    }
}

fn troop_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        many_field(
            "members",
            "member",
            troop_member_schema(),
            None,
            FirstItemPolicy::Regular,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
        many_field(
            "pages",
            "page",
            troop_page_schema(),
            None,
            FirstItemPolicy::Regular,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
    ];
    id_indexed_list("troop", Schema::Obj { class: "RPG::Troop", fields })
}

// ---------------------------------------------------------------------
// States.rxdata
// ---------------------------------------------------------------------

fn state_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        fk_field("animation_id", "animation", true),
        enum_field(
            "restriction",
            "StateRestriction",
            enum_variants_int(StateRestriction::VARIANTS),
        ),
        bool_field("nonresistance"),
        bool_field("zero_hp"),
        bool_field("cant_get_exp"),
        bool_field("cant_evade"),
        bool_field("slip_damage"),
        int_field("rating"),
        int_field("hit_rate"),
        int_field("maxhp_rate"),
        int_field("maxsp_rate"),
        int_field("str_rate"),
        int_field("dex_rate"),
        int_field("agi_rate"),
        int_field("int_rate"),
        int_field("atk_rate"),
        int_field("pdef_rate"),
        int_field("mdef_rate"),
        int_field("eva"),
        bool_field("battle_only"),
        int_field("hold_turn"),
        int_field("auto_release_prob"),
        int_field("shock_release_prob"),
        element_set_field("guard_element_set"),
        // Self-referential: State.plus_state_set -> state, resolved via the
        // lazy FK thunk since `state` hasn't finished lowering yet here.
        state_set_field("plus_state_set"),
        state_set_field("minus_state_set"),
    ];
    id_indexed_list("state", Schema::Obj { class: "RPG::State", fields })
}

// ---------------------------------------------------------------------
// Animations.rxdata
// ---------------------------------------------------------------------

fn animation_timing_schema() -> Schema {
    Schema::ArrayObj {
        class: "RPG::Animation::Timing",
        fields: vec![
            int_field("frame"),
            material_field("se", MaterialType::Audio, MaterialSubtype::Se, true, true),
            enum_field(
                "flash_scope",
                "AnimationTimingFlashScope",
                enum_variants_int(AnimationTimingFlashScope::VARIANTS),
            ),
            color_field("flash_color"),
            int_field("flash_duration"),
            enum_field(
                "condition",
                "AnimationTimingCondition",
                enum_variants_int(AnimationTimingCondition::VARIANTS),
            ),
        ],
    }
}

fn animation_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        material_field("animation_name", MaterialType::Graphics, MaterialSubtype::Animations, true, true),
        int_field("animation_hue"),
        enum_field("position", "AnimationPosition", enum_variants_int(AnimationPosition::VARIANTS)),
        int_field("frame_max"),
        many_field(
            "timings",
            "timing",
            animation_timing_schema(),
            None,
            FirstItemPolicy::Regular,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
    ];
    id_indexed_list("animation", Schema::Obj { class: "RPG::Animation", fields })
}

// ---------------------------------------------------------------------
// CommonEvents.rxdata
// ---------------------------------------------------------------------

fn common_event_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        enum_field("trigger", "CommonEventTrigger", enum_variants_int(CommonEventTrigger::VARIANTS)),
        int_field("switch_id"),
        list_field("command", event_command_schema()),
    ];
    id_indexed_list("common_event", Schema::Obj { class: "RPG::CommonEvent", fields })
}

// ---------------------------------------------------------------------
// System.rxdata (a Singleton: exactly one row)
// ---------------------------------------------------------------------

fn system_schema() -> Schema {
    let fields = vec![
        many_field(
            "party_members",
            "party_member",
            Schema::Fk { target_table: "actor".to_owned(), nullable: false },
            Some("actor_id".to_owned()),
            FirstItemPolicy::Regular,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
        many_field(
            "elements",
            "element",
            Schema::Str,
            Some("name".to_owned()),
            FirstItemPolicy::Null,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
        many_field(
            "switches",
            "switch",
            Schema::Str,
            Some("name".to_owned()),
            FirstItemPolicy::Null,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
        many_field(
            "variables",
            "variable",
            Schema::Str,
            Some("name".to_owned()),
            FirstItemPolicy::Null,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
        material_field("windowskin_name", MaterialType::Graphics, MaterialSubtype::Windowskins, true, true),
        material_field("title_name", MaterialType::Graphics, MaterialSubtype::Titles, true, true),
        material_field("gameover_name", MaterialType::Graphics, MaterialSubtype::Gameovers, true, true),
        material_field("battle_transition", MaterialType::Graphics, MaterialSubtype::Transitions, true, true),
        material_field("title_bgm", MaterialType::Audio, MaterialSubtype::Bgm, true, true),
        material_field("battle_bgm", MaterialType::Audio, MaterialSubtype::Bgm, true, true),
        material_field("battle_end_me", MaterialType::Audio, MaterialSubtype::Me, true, true),
        material_field("gameover_me", MaterialType::Audio, MaterialSubtype::Me, true, true),
        material_field("cursor_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("decision_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("cancel_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("buzzer_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("equip_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("shop_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("save_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("load_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("battle_start_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("escape_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("actor_collapse_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        material_field("enemy_collapse_se", MaterialType::Audio, MaterialSubtype::Se, true, true),
        fk_field("test_troop_id", "troop", true),
        fk_field("start_map_id", "map", true),
        int_field("start_x"),
        int_field("start_y"),
        material_field("battleback_name", MaterialType::Graphics, MaterialSubtype::Battlebacks, true, true),
        material_field("battler_name", MaterialType::Graphics, MaterialSubtype::Battlers, true, true),
        int_field("battler_hue"),
        fk_field("edit_map_id", "map", true),
    ];
    Schema::Singleton { class: "RPG::System", fields }
}

// ---------------------------------------------------------------------
// Tilesets.rxdata
// ---------------------------------------------------------------------

fn tileset_schema() -> Schema {
    let fields = vec![
        id_field(),
        str_field("name"),
        material_field("tileset_name", MaterialType::Graphics, MaterialSubtype::Tilesets, true, true),
        many_field(
            "autotile_names",
            "autotile",
            Schema::MaterialRef {
                material_type: MaterialType::Graphics,
                subtype: MaterialSubtype::Autotiles,
                nullable: true,
                enforce: true,
            },
            Some("name".to_owned()),
            FirstItemPolicy::Regular,
            IndexBehavior::AddIndex("index".to_owned()),
        ),
        material_field("panorama_name", MaterialType::Graphics, MaterialSubtype::Panoramas, true, true),
        int_field("panorama_hue"),
        material_field("fog_name", MaterialType::Graphics, MaterialSubtype::Fogs, true, true),
        int_field("fog_hue"),
        int_field("fog_opacity"),
        int_field("fog_blend_type"),
        int_field("fog_zoom"),
        int_field("fog_sx"),
        int_field("fog_sy"),
        material_field("battleback_name", MaterialType::Graphics, MaterialSubtype::Battlebacks, true, true),
        Field::plain("passages", Schema::NdArray { dims: 1 }),
        Field::plain("priorities", Schema::NdArray { dims: 1 }),
        Field::plain("terrain_tags", Schema::NdArray { dims: 1 }),
    ];
    id_indexed_list("tileset", Schema::Obj { class: "RPG::Tileset", fields })
}

// ---------------------------------------------------------------------
// MapInfos.rxdata (a Dict: id -> RPG::MapInfo)
// ---------------------------------------------------------------------

fn map_info_schema() -> Schema {
    dict(
        "map_info",
        KeyBehavior::AddKey("id".to_owned(), ColumnType::Integer),
        Schema::Obj {
            class: "RPG::MapInfo",
            fields: vec![
                str_field("name"),
                int_field("parent_id"),
                int_field("order"),
                bool_field("expanded"),
                int_field("scroll_x"),
                int_field("scroll_y"),
            ],
        },
    )
}

// ---------------------------------------------------------------------
// MapNNN.rxdata (one file per map, captured id into `map.id`)
// ---------------------------------------------------------------------

fn event_page_graphic_schema() -> Schema {
    Schema::Obj {
        class: "RPG::Event::Page::Graphic",
        fields: vec![
            material_field("character_name", MaterialType::Graphics, MaterialSubtype::Characters, true, true),
            int_field("character_hue"),
            int_field("direction"),
            int_field("pattern"),
            int_field("opacity"),
            int_field("blend_type"),
        ],
    }
}

fn event_page_condition_schema() -> Schema {
    Schema::Obj {
        class: "RPG::Event::Page::Condition",
        fields: vec![
            bool_field("switch1_valid"),
            bool_field("switch2_valid"),
            bool_field("variable_valid"),
            bool_field("self_switch_valid"),
            int_field("switch1_id"),
            int_field("switch2_id"),
            int_field("variable_id"),
            int_field("variable_value"),
            str_field("self_switch_ch"),
        ],
    }
}

fn event_page_schema() -> Schema {
    Schema::Obj {
        class: "RPG::Event::Page",
        fields: vec![
            Field::plain("condition", event_page_condition_schema()),
            Field::plain("graphic", event_page_graphic_schema()),
            enum_field("move_type", "MoveType", enum_variants_int(MoveType::VARIANTS)),
            enum_field("move_speed", "MoveSpeed", enum_variants_int(MoveSpeed::VARIANTS)),
            enum_field("move_frequency", "MoveFrequency", enum_variants_int(MoveFrequency::VARIANTS)),
            bool_field("walk_anime"),
            bool_field("step_anime"),
            bool_field("direction_fix"),
            bool_field("through"),
            bool_field("always_on_top"),
            enum_field("trigger", "EventPageTrigger", enum_variants_int(EventPageTrigger::VARIANTS)),
            list_field("command", event_command_schema()),
        ],
    }
}

fn map_event_schema() -> Schema {
    Schema::Obj {
        class: "RPG::Event",
        fields: vec![
            int_field("x"),
            int_field("y"),
            many_field(
                "pages",
                "page",
                event_page_schema(),
                None,
                FirstItemPolicy::Regular,
                IndexBehavior::AddIndex("index".to_owned()),
            ),
        ],
    }
}

/// The inner `Obj` schema for one `MapNNN.rxdata` file, wrapped by
/// [`map_file_schema`]'s `MultiFile` with the captured id as the `map`
/// table's primary key (row lowering's `lower_map_file` supplies that id
/// directly rather than decoding it from the file's own content).
pub fn map_inner_schema() -> Schema {
    Schema::Obj {
        class: "RPG::Map",
        fields: vec![
            fk_field("tileset_id", "tileset", false),
            int_field("width"),
            int_field("height"),
            bool_field("autoplay_bgm"),
            material_field("bgm", MaterialType::Audio, MaterialSubtype::Bgm, true, false),
            bool_field("autoplay_bgs"),
            material_field("bgs", MaterialType::Audio, MaterialSubtype::Bgs, true, false),
            many_field(
                "encounter_list",
                "encounter",
                Schema::Fk { target_table: "troop".to_owned(), nullable: false },
                Some("troop_id".to_owned()),
                FirstItemPolicy::Regular,
                IndexBehavior::AddIndex("index".to_owned()),
            ),
            int_field("encounter_step"),
            Field::plain("data", Schema::NdArray { dims: 3 }),
            dict_field(
                "events",
                "${prefix}_event",
                KeyBehavior::AddKey("id".to_owned(), ColumnType::Integer),
                map_event_schema(),
            ),
        ],
    }
}

/// `MapNNN.rxdata` — captures `NNN` into `map.id`.
pub fn map_file_schema() -> Schema {
    multi_file(
        r"^Map(?P<id>\d{3})\.rxdata$",
        "map",
        vec![("id".to_owned(), ColumnType::Integer)],
        map_inner_schema(),
    )
}

// ---------------------------------------------------------------------
// Scripts.rxdata: a plain (non-nil-sentinel) array of
// `[id, name, zlib-compressed source]` triples.
// ---------------------------------------------------------------------

fn script_schema() -> Schema {
    list(
        "script",
        Schema::ArrayObj {
            class: "",
            fields: vec![
                int_field("id"),
                str_field("name"),
                Field::plain("body", Schema::Zlib { encoding: crate::marshal::StringEncoding::Utf8 }),
            ],
        },
        None,
        FirstItemPolicy::Regular,
        IndexBehavior::AddIndex("index".to_owned()),
    )
}

/// Every top-level file schema, in the declaration order DDL and row
/// lowering both traverse them: one entry per `Data/*.rxdata` file, plus
/// the `MapNNN` family as one `MultiFile` entry.
pub fn file_schemas() -> Vec<Schema> {
    vec![
        single_file("Actors.rxdata", "actor", actor_schema()),
        single_file("Animations.rxdata", "animation", animation_schema()),
        single_file("Armors.rxdata", "armor", armor_schema()),
        single_file("Classes.rxdata", "class", class_schema()),
        single_file("CommonEvents.rxdata", "common_event", common_event_schema()),
        single_file("Enemies.rxdata", "enemy", enemy_schema()),
        single_file("Items.rxdata", "item", item_schema()),
        single_file("MapInfos.rxdata", "map_info", map_info_schema()),
        single_file("Scripts.rxdata", "script", script_schema()),
        single_file("Skills.rxdata", "skill", skill_schema()),
        single_file("States.rxdata", "state", state_schema()),
        single_file("System.rxdata", "system", system_schema()),
        single_file("Tilesets.rxdata", "tileset", tileset_schema()),
        single_file("Troops.rxdata", "troop", troop_schema()),
        single_file("Weapons.rxdata", "weapon", weapon_schema()),
        map_file_schema(),
    ]
}
