//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! `RPG::MoveCommand`/`RPG::MoveRoute`: the discriminated union a custom
//! move route is built from, and the route object (`repeat`/`skippable`
//! flags plus the command list) that embeds it. Shared by the event-command
//! variants that carry a move route (`SetMoveRoute`, `ContinueSetMoveRoute`).

use crate::common::{Direction, MoveFrequency, MoveSpeed};
use crate::material::{MaterialSubtype, MaterialType};
use crate::schema::algebra::build::*;
use crate::schema::algebra::{EnumVariants, Field, FirstItemPolicy, IndexBehavior, Schema, Variant};
use crate::schema::audio::audio_schema;

fn simple(discriminant_value: i64, name: &str, fields: Vec<Field>) -> Variant {
    Variant { discriminant_value, name: name.to_owned(), fields, sub: None }
}

pub fn move_command_schema() -> Schema {
    Schema::VariantObj {
        class: "RPG::MoveCommand",
        fields: vec![],
        discriminant: Field::plain("code", Schema::Int { lb: None, ub: None }),
        variants: vec![
            simple(0, "blank", vec![]),
            simple(1, "move_down", vec![]),
            simple(2, "move_left", vec![]),
            simple(3, "move_right", vec![]),
            simple(4, "move_up", vec![]),
            simple(5, "move_lower_left", vec![]),
            simple(6, "move_lower_right", vec![]),
            simple(7, "move_upper_left", vec![]),
            simple(8, "move_upper_right", vec![]),
            simple(9, "move_at_random", vec![]),
            simple(10, "move_toward_player", vec![]),
            simple(11, "move_away_from_player", vec![]),
            simple(12, "step_forward", vec![]),
            simple(13, "step_backward", vec![]),
            simple(
                14,
                "jump",
                vec![Field::new("x", "", Schema::Int { lb: None, ub: None }), Field::new("y", "", Schema::Int { lb: None, ub: None })],
            ),
            simple(15, "wait", vec![Field::new("duration", "", Schema::Int { lb: None, ub: None })]),
            simple(16, "turn_down", vec![]),
            simple(17, "turn_left", vec![]),
            simple(18, "turn_right", vec![]),
            simple(19, "turn_up", vec![]),
            simple(20, "turn_90_right", vec![]),
            simple(21, "turn_90_left", vec![]),
            simple(22, "turn_180", vec![]),
            simple(23, "turn_90_right_or_left", vec![]),
            simple(24, "turn_at_random", vec![]),
            simple(25, "turn_toward_player", vec![]),
            simple(26, "turn_away_from_player", vec![]),
            // No `switch` lookup table exists in this schema (see DESIGN.md);
            // kept as a plain id rather than a dangling `Fk`.
            simple(27, "switch_on", vec![Field::new("switch_id", "", Schema::Int { lb: Some(1), ub: None })]),
            simple(28, "switch_off", vec![Field::new("switch_id", "", Schema::Int { lb: Some(1), ub: None })]),
            simple(
                29,
                "change_speed",
                vec![Field::new(
                    "speed",
                    "",
                    Schema::Enum { type_name: "MoveSpeed", variants: EnumVariants::Int(MoveSpeed::VARIANTS) },
                )],
            ),
            simple(
                30,
                "change_freq",
                vec![Field::new(
                    "freq",
                    "",
                    Schema::Enum { type_name: "MoveFrequency", variants: EnumVariants::Int(MoveFrequency::VARIANTS) },
                )],
            ),
            simple(31, "move_animation_on", vec![]),
            simple(32, "move_animation_off", vec![]),
            simple(33, "stop_animation_on", vec![]),
            simple(34, "stop_animation_off", vec![]),
            simple(35, "direction_fix_on", vec![]),
            simple(36, "direction_fix_off", vec![]),
            simple(37, "through_on", vec![]),
            simple(38, "through_off", vec![]),
            simple(39, "always_on_top_on", vec![]),
            simple(40, "always_on_top_off", vec![]),
            simple(
                41,
                "graphic",
                vec![
                    Field::new(
                        "character_name",
                        "",
                        Schema::MaterialRef {
                            material_type: MaterialType::Graphics,
                            subtype: MaterialSubtype::Characters,
                            nullable: true,
                            enforce: true,
                        },
                    ),
                    Field::new("character_hue", "", Schema::Int { lb: Some(0), ub: Some(360) }),
                    Field::new(
                        "direction",
                        "",
                        Schema::Enum { type_name: "Direction", variants: EnumVariants::Int(Direction::VARIANTS) },
                    ),
                    Field::new("pattern", "", Schema::Int { lb: None, ub: None }),
                ],
            ),
            simple(42, "change_opacity", vec![Field::new("opacity", "", Schema::Int { lb: None, ub: None })]),
            simple(43, "change_blending", vec![Field::new("blend_type", "", Schema::Int { lb: None, ub: None })]),
            simple(44, "play_se", vec![Field::new("audio", "", audio_schema(MaterialSubtype::Se))]),
            simple(45, "script", vec![Field::new("line", "", Schema::Str)]),
        ],
    }
}

pub fn move_route_schema() -> Schema {
    Schema::Obj {
        class: "RPG::MoveRoute",
        fields: vec![
            bool_field("repeat"),
            bool_field("skippable"),
            list_field("move_command", move_command_schema()),
        ],
    }
}

/// A field whose Marshal name differs from its Rust name, matching
/// [`crate::schema::rpgxp::list_field`]'s `@list`-under-`list_` convention.
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
