//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The event-command discriminated union: `RPG::EventCommand` objects carry
//! a `code` plus a positional `@parameters` tail whose shape depends on that
//! code. This instantiates the generic `VariantObj` machinery with the full
//! RPG Maker XP event-command catalog, including the `Simple` commands with
//! a flat parameter list and the `Complex` ones (`conditional_branch`,
//! `control_variables`, `control_timer`, `change_map_settings`) that recurse
//! into a further discriminated union keyed by one of their own fields.

use crate::common::{
    AddOrRemove, AppointType, AssignType, BoundType, ChoicesCancelType, Comparison, ConditionType,
    ConstOrVar, Direction, DiffType, OtherOperandType, SelfSwitch, SwitchState, TextPosition, Weather,
};
use crate::material::{MaterialSubtype, MaterialType};
use crate::schema::algebra::{EnumVariants, Field, FirstItemPolicy, IndexBehavior, Schema, SubVariants, Variant};
use crate::schema::audio::audio_schema;
use crate::schema::move_command::{move_command_schema, move_route_schema};

fn simple(discriminant_value: i64, name: &str, fields: Vec<Field>) -> Variant {
    Variant { discriminant_value, name: name.to_owned(), fields, sub: None }
}

fn complex(discriminant_value: i64, name: &str, fields: Vec<Field>, sub: SubVariants) -> Variant {
    Variant { discriminant_value, name: name.to_owned(), fields, sub: Some(sub) }
}

fn int_param(name: &str) -> Field {
    Field::new(name, "", Schema::Int { lb: None, ub: None })
}

fn str_param(name: &str) -> Field {
    Field::new(name, "", Schema::Str)
}

fn bool_param(name: &str) -> Field {
    Field::new(name, "", Schema::Bool)
}

fn int_bool_param(name: &str) -> Field {
    Field::new(name, "", Schema::IntBool)
}

fn fk_param(name: &str, target_table: &str, nullable: bool) -> Field {
    Field::new(name, "", Schema::Fk { target_table: target_table.to_owned(), nullable })
}

fn enum_param(name: &str, type_name: &'static str, variants: EnumVariants) -> Field {
    Field::new(name, "", Schema::Enum { type_name, variants })
}

fn tone_param(name: &str) -> Field {
    Field::new(
        name,
        "",
        Schema::FourDoubles {
            class: "Tone",
            bounds: [(-255.0, 255.0), (-255.0, 255.0), (-255.0, 255.0), (0.0, 255.0)],
        },
    )
}

fn color_param(name: &str) -> Field {
    Field::new(
        name,
        "",
        Schema::FourDoubles { class: "Color", bounds: [(0.0, 255.0); 4] },
    )
}

fn material_param(name: &str, subtype: MaterialSubtype) -> Field {
    Field::new(
        name,
        "",
        Schema::MaterialRef { material_type: MaterialType::Graphics, subtype, nullable: true, enforce: true },
    )
}

/// Builds the `RPG::EventCommand` `VariantObj`, shared by every list of
/// commands in the schema (common events, event pages, troop pages) via the
/// `${prefix}` table-name placeholder its caller supplies.
pub fn event_command_schema() -> Schema {
    Schema::VariantObj {
        class: "RPG::EventCommand",
        fields: vec![Field::plain("indent", Schema::Int { lb: Some(0), ub: None })],
        discriminant: Field::plain("code", Schema::Int { lb: None, ub: None }),
        variants: vec![
            simple(0, "blank", vec![]),
            simple(101, "show_text", vec![str_param("text")]),
            simple(
                102,
                "show_choices",
                vec![
                    Field::new(
                        "choices",
                        "",
                        Schema::List {
                            item: Box::new(Schema::Str),
                            item_name: Some("choice".to_owned()),
                            first_item: FirstItemPolicy::Regular,
                            index: IndexBehavior::AddIndex("index".to_owned()),
                            table_name: "${prefix}_choice".to_owned(),
                            min_len: None,
                            max_len: None,
                        },
                    ),
                    enum_param(
                        "cancel_type",
                        "ChoicesCancelType",
                        EnumVariants::Int(ChoicesCancelType::VARIANTS),
                    ),
                ],
            ),
            simple(103, "input_number", vec![Field::new("variable_id", "", Schema::Int { lb: Some(1), ub: None }), int_param("max_digits")]),
            simple(
                104,
                "change_text_options",
                vec![
                    enum_param("position", "TextPosition", EnumVariants::Int(TextPosition::VARIANTS)),
                    int_bool_param("no_frame"),
                ],
            ),
            simple(105, "button_input_processing", vec![Field::new("variable_id", "", Schema::Int { lb: Some(1), ub: None })]),
            // units = frames / 2
            simple(106, "wait", vec![int_param("duration")]),
            simple(108, "comment", vec![str_param("text")]),
            complex(
                111,
                "conditional_branch",
                vec![enum_param(
                    "condition_type",
                    "ConditionType",
                    EnumVariants::Int(ConditionType::VARIANTS),
                )],
                SubVariants {
                    discriminant_field: "condition_type".to_owned(),
                    variants: vec![
                        simple(
                            0,
                            "switch",
                            vec![
                                Field::new("switch_id", "", Schema::Int { lb: Some(1), ub: None }),
                                enum_param("state", "SwitchState", EnumVariants::Int(SwitchState::VARIANTS)),
                            ],
                        ),
                        simple(
                            1,
                            "variable",
                            vec![
                                int_param("variable_id"),
                                int_bool_param("value_is_variable"),
                                int_param("value"),
                                enum_param("comparison", "Comparison", EnumVariants::Int(Comparison::VARIANTS)),
                            ],
                        ),
                        simple(
                            2,
                            "self_switch",
                            vec![
                                enum_param("self_switch_ch", "SelfSwitch", EnumVariants::Str(SelfSwitch::VARIANTS)),
                                enum_param("state", "SwitchState", EnumVariants::Int(SwitchState::VARIANTS)),
                            ],
                        ),
                        simple(
                            3,
                            "timer",
                            vec![int_param("value"), enum_param("bound_type", "BoundType", EnumVariants::Int(BoundType::VARIANTS))],
                        ),
                        // field layouts for these two are unconfirmed against a real capture.
                        complex(
                            4,
                            "actor",
                            vec![fk_param("actor_id", "actor", false)],
                            SubVariants {
                                discriminant_field: "infracode".to_owned(),
                                variants: vec![
                                    simple(0, "in_party", vec![]),
                                    simple(1, "name", vec![str_param("value")]),
                                    simple(2, "skill", vec![fk_param("skill_id", "skill", false)]),
                                    simple(3, "weapon", vec![fk_param("weapon_id", "weapon", false)]),
                                    simple(4, "armor", vec![fk_param("armor_id", "armor", false)]),
                                    simple(5, "state", vec![fk_param("state_id", "state", false)]),
                                ],
                            },
                        ),
                        complex(
                            5,
                            "enemy",
                            vec![fk_param("enemy_id", "enemy", false)],
                            SubVariants {
                                discriminant_field: "infracode".to_owned(),
                                variants: vec![
                                    simple(0, "appear", vec![]),
                                    simple(1, "state", vec![fk_param("state_id", "state", false)]),
                                ],
                            },
                        ),
                        // branches on a character sprite's facing: -1 = player, 0 = this event, else an event id
                        simple(6, "character", vec![int_param("character_reference"), enum_param("direction", "Direction", EnumVariants::Int(Direction::VARIANTS))]),
                        simple(7, "gold", vec![int_param("amount"), enum_param("bound_type", "BoundType", EnumVariants::Int(BoundType::VARIANTS))]),
                        simple(8, "item", vec![fk_param("item_id", "item", false)]),
                        simple(9, "weapon", vec![fk_param("weapon_id", "weapon", false)]),
                        simple(10, "armor", vec![fk_param("armor_id", "armor", false)]),
                        simple(11, "button", vec![int_param("button")]),
                        simple(12, "script", vec![str_param("expr")]),
                    ],
                },
            ),
            simple(112, "loop", vec![]),
            simple(113, "break_loop", vec![]),
            simple(115, "exit_event_processing", vec![]),
            simple(116, "erase_event", vec![]),
            simple(117, "call_common_event", vec![fk_param("called_event_id", "common_event", false)]),
            simple(118, "label", vec![str_param("id")]),
            simple(119, "jump_to_label", vec![str_param("id")]),
            simple(
                121,
                "control_switches",
                // an inclusive range of switch ids to set at once
                vec![
                    int_param("switch_id_lo"),
                    int_param("switch_id_hi"),
                    enum_param("state", "SwitchState", EnumVariants::Int(SwitchState::VARIANTS)),
                ],
            ),
            complex(
                122,
                "control_variables",
                vec![
                    int_param("variable_id_hi"),
                    int_param("variable_id_lo"),
                    enum_param("assign_type", "AssignType", EnumVariants::Int(AssignType::VARIANTS)),
                ],
                SubVariants {
                    discriminant_field: "operand_type".to_owned(),
                    variants: vec![
                        simple(0, "invariant", vec![int_param("value")]),
                        simple(1, "variable", vec![Field::new("variable_id", "", Schema::Int { lb: Some(1), ub: None })]),
                        simple(2, "random_number", vec![int_param("lb"), int_param("ub")]),
                        simple(6, "character", vec![int_param("attr_value"), int_param("attr_code")]),
                        simple(
                            7,
                            "other",
                            vec![enum_param(
                                "other_operand_type",
                                "OtherOperandType",
                                EnumVariants::Int(OtherOperandType::VARIANTS),
                            )],
                        ),
                    ],
                },
            ),
            simple(
                123,
                "control_self_switch",
                vec![
                    enum_param("self_switch_ch", "SelfSwitch", EnumVariants::Str(SelfSwitch::VARIANTS)),
                    enum_param("state", "SwitchState", EnumVariants::Int(SwitchState::VARIANTS)),
                ],
            ),
            complex(
                124,
                "control_timer",
                vec![],
                SubVariants {
                    discriminant_field: "subcode".to_owned(),
                    variants: vec![
                        simple(0, "start", vec![int_param("initial_value")]),
                        simple(1, "stop", vec![]),
                    ],
                },
            ),
            simple(
                125,
                "change_gold",
                vec![
                    enum_param("diff_type", "DiffType", EnumVariants::Int(DiffType::VARIANTS)),
                    int_bool_param("with_variable"),
                    int_param("amount"),
                ],
            ),
            simple(
                126,
                "change_items",
                vec![
                    fk_param("item_id", "item", false),
                    enum_param("operation", "DiffType", EnumVariants::Int(DiffType::VARIANTS)),
                    enum_param("operand_type", "ConstOrVar", EnumVariants::Int(ConstOrVar::VARIANTS)),
                    int_param("operand"),
                ],
            ),
            simple(
                127,
                "change_weapons",
                vec![
                    fk_param("weapon_id", "weapon", false),
                    enum_param("operation", "DiffType", EnumVariants::Int(DiffType::VARIANTS)),
                    enum_param("operand_type", "ConstOrVar", EnumVariants::Int(ConstOrVar::VARIANTS)),
                    int_param("operand"),
                ],
            ),
            simple(
                128,
                "change_armor",
                vec![
                    fk_param("armor_id", "armor", false),
                    enum_param("operation", "DiffType", EnumVariants::Int(DiffType::VARIANTS)),
                    enum_param("operand_type", "ConstOrVar", EnumVariants::Int(ConstOrVar::VARIANTS)),
                    int_param("operand"),
                ],
            ),
            simple(
                129,
                "change_party_member",
                vec![
                    fk_param("actor_id", "actor", false),
                    enum_param("add_or_remove", "AddOrRemove", EnumVariants::Int(AddOrRemove::VARIANTS)),
                    int_bool_param("initialize"),
                ],
            ),
            simple(132, "change_battle_bgm", vec![Field::new("audio", "", audio_schema(MaterialSubtype::Bgm))]),
            simple(133, "change_battle_end_me", vec![Field::new("audio", "", audio_schema(MaterialSubtype::Me))]),
            simple(134, "change_save_access", vec![int_bool_param("enabled")]),
            simple(135, "change_menu_access", vec![int_bool_param("enabled")]),
            simple(136, "change_encounter", vec![int_bool_param("enabled")]),
            simple(
                201,
                "transfer_player",
                vec![
                    int_bool_param("with_variables"),
                    int_param("target_map_id"),
                    int_param("x"),
                    int_param("y"),
                    enum_param("direction", "Direction", EnumVariants::Int(Direction::VARIANTS)),
                    int_bool_param("no_fade"),
                ],
            ),
            simple(
                202,
                "set_event_location",
                vec![
                    // 0 for this event
                    int_param("event_reference"),
                    enum_param("appoint_type", "AppointType", EnumVariants::Int(AppointType::VARIANTS)),
                    int_param("x"),
                    int_param("y"),
                    enum_param("direction", "Direction", EnumVariants::Int(Direction::VARIANTS)),
                ],
            ),
            simple(
                203,
                "scroll_map",
                vec![
                    enum_param("direction", "Direction", EnumVariants::Int(Direction::VARIANTS)),
                    int_param("distance"),
                    int_param("speed"),
                ],
            ),
            complex(
                204,
                "change_map_settings",
                vec![],
                SubVariants {
                    discriminant_field: "subcode".to_owned(),
                    variants: vec![
                        simple(0, "panorama", vec![material_param("name", MaterialSubtype::Panoramas), Field::new("hue", "", Schema::Int { lb: Some(0), ub: Some(360) })]),
                        simple(
                            1,
                            "fog",
                            vec![
                                material_param("name", MaterialSubtype::Fogs),
                                int_param("hue"),
                                int_param("opacity"),
                                int_param("blend_type"),
                                int_param("zoom"),
                                int_param("sx"),
                                int_param("sy"),
                            ],
                        ),
                        simple(2, "battle_back", vec![material_param("name", MaterialSubtype::Battlebacks)]),
                    ],
                },
            ),
            simple(205, "change_fog_color_tone", vec![tone_param("tone"), int_param("duration")]),
            simple(206, "change_fog_opacity", vec![int_param("opacity"), int_param("duration")]),
            // -1 for player, 0 for this event
            simple(207, "show_animation", vec![int_param("event_reference"), int_param("animation_id")]),
            simple(208, "change_transparent_flag", vec![int_bool_param("is_normal")]),
            simple(
                209,
                "set_move_route",
                // can be -1 for player
                vec![int_param("event_reference"), Field::new("move_route", "", move_route_schema())],
            ),
            simple(210, "wait_for_move_completion", vec![]),
            simple(221, "prepare_for_transition", vec![]),
            simple(222, "execute_transition", vec![str_param("name")]),
            // units = frames / 2
            simple(223, "change_screen_color_tone", vec![tone_param("tone"), int_param("duration")]),
            simple(224, "screen_flash", vec![color_param("color"), int_param("duration")]),
            simple(225, "screen_shake", vec![int_param("power"), int_param("speed"), int_param("duration")]),
            simple(
                231,
                "show_picture",
                vec![
                    int_param("number"),
                    material_param("name", MaterialSubtype::Pictures),
                    int_param("origin"),
                    int_bool_param("appoint_with_vars"),
                    int_param("x"),
                    int_param("y"),
                    int_param("zoom_x"),
                    int_param("zoom_y"),
                    int_param("opacity"),
                    int_param("blend_type"),
                ],
            ),
            simple(
                232,
                "move_picture",
                vec![
                    int_param("number"),
                    int_param("duration"),
                    int_param("origin"),
                    int_bool_param("appoint_with_vars"),
                    int_param("x"),
                    int_param("y"),
                    int_param("zoom_x"),
                    int_param("zoom_y"),
                    int_param("opacity"),
                    int_param("blend_type"),
                ],
            ),
            simple(233, "rotate_picture", vec![int_param("number"), int_param("speed")]),
            simple(234, "change_picture_color_tone", vec![int_param("number"), tone_param("tone"), int_param("duration")]),
            simple(235, "erase_picture", vec![int_param("number")]),
            simple(
                236,
                "set_weather_effects",
                vec![enum_param("type", "Weather", EnumVariants::Int(Weather::VARIANTS)), int_param("power"), int_param("duration")],
            ),
            simple(241, "play_bgm", vec![Field::new("audio", "", audio_schema(MaterialSubtype::Bgm))]),
            simple(242, "fade_out_bgm", vec![int_param("seconds")]),
            simple(245, "play_bgs", vec![Field::new("audio", "", audio_schema(MaterialSubtype::Bgs))]),
            simple(246, "fade_out_bgs", vec![int_param("seconds")]),
            simple(247, "memorize_bg_audio", vec![]),
            simple(248, "restore_bg_audio", vec![]),
            simple(249, "play_me", vec![Field::new("audio", "", audio_schema(MaterialSubtype::Me))]),
            simple(250, "play_se", vec![Field::new("audio", "", audio_schema(MaterialSubtype::Se))]),
            simple(251, "stop_se", vec![]),
            simple(
                301,
                "battle_processing",
                vec![fk_param("opponent_troop_id", "troop", false), bool_param("can_escape"), bool_param("can_continue_when_loser")],
            ),
            simple(302, "shop_processing", vec![int_param("goods"), int_param("price")]),
            simple(303, "name_input_processing", vec![fk_param("actor_id", "actor", false), int_param("maxlen")]),
            // 0 for all party
            simple(314, "recover_all", vec![fk_param("actor_id", "actor", true)]),
            simple(335, "enemy_appearance", vec![int_param("enemy_index")]),
            simple(336, "enemy_transform", vec![int_param("enemy_index"), fk_param("new_enemy_id", "enemy", false)]),
            simple(340, "abort_battle", vec![]),
            simple(351, "call_menu_screen", vec![]),
            simple(352, "call_save_screen", vec![]),
            simple(353, "game_over", vec![]),
            simple(354, "return_to_title_screen", vec![]),
            simple(355, "script", vec![str_param("line")]),
            simple(401, "continue_show_text", vec![str_param("text")]),
            simple(402, "show_choices_when_choice", vec![int_param("choice_index"), str_param("choice_text")]),
            simple(403, "show_choices_when_cancel", vec![]),
            simple(404, "show_choices_branch_end", vec![]),
            simple(408, "continue_comment", vec![str_param("text")]),
            simple(411, "else_branch", vec![]),
            simple(412, "conditional_branch_end", vec![]),
            simple(413, "repeat_above", vec![]),
            simple(509, "continue_set_move_route", vec![Field::new("command", "", move_command_schema())]),
            simple(601, "if_win", vec![]),
            simple(602, "if_escape", vec![]),
            simple(603, "if_lose", vec![]),
            simple(604, "battle_processing_end", vec![]),
            simple(605, "continue_shop_processing", vec![int_param("goods"), int_param("price")]),
            simple(655, "continue_script", vec![str_param("line")]),
        ],
    }
}
