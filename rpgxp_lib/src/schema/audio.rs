//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! `RPG::AudioFile`: a material reference paired with playback volume and
//! pitch, the shape every BGM/BGS/ME/SE command parameter shares.

use crate::material::{MaterialSubtype, MaterialType};
use crate::schema::algebra::Schema;
use crate::schema::algebra::build::*;

pub(super) fn audio_schema(subtype: MaterialSubtype) -> Schema {
    Schema::Obj {
        class: "RPG::AudioFile",
        fields: vec![
            material_field("name", MaterialType::Audio, subtype, true, true),
            int_field("volume"),
            int_field("pitch"),
        ],
    }
}
