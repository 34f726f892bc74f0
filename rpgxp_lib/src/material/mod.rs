//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The material (asset) inventory: scans the game and RTP asset roots, records
//! every file once per `(type, subtype, name, source, extension)`, and
//! exposes the "best file" selection used both by the FK-enforced
//! `MaterialRef` columns and by downstream asset-copy tooling.

pub mod inventory;

#[cfg(test)]
mod inventory_test;

pub use inventory::{scan, Inventory, Material, MaterialFile, MaterialSource};

/// The two top-level asset kinds RPG Maker XP organizes its files under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialType {
    Audio,
    Graphics,
}

impl MaterialType {
    pub fn db_name(self) -> &'static str {
        match self {
            MaterialType::Audio => "Audio",
            MaterialType::Graphics => "Graphics",
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            MaterialType::Audio => "Audio",
            MaterialType::Graphics => "Graphics",
        }
    }
}

/// The fixed set of asset subdirectories nested under each [`MaterialType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialSubtype {
    Bgm,
    Bgs,
    Me,
    Se,
    Animations,
    Autotiles,
    Battlebacks,
    Battlers,
    Characters,
    Fogs,
    Gameovers,
    Icons,
    Panoramas,
    Pictures,
    Tilesets,
    Titles,
    Transitions,
    Windowskins,
}

impl MaterialSubtype {
    pub const AUDIO: &'static [MaterialSubtype] = &[
        MaterialSubtype::Bgm,
        MaterialSubtype::Bgs,
        MaterialSubtype::Me,
        MaterialSubtype::Se,
    ];

    pub const GRAPHICS: &'static [MaterialSubtype] = &[
        MaterialSubtype::Animations,
        MaterialSubtype::Autotiles,
        MaterialSubtype::Battlebacks,
        MaterialSubtype::Battlers,
        MaterialSubtype::Characters,
        MaterialSubtype::Fogs,
        MaterialSubtype::Gameovers,
        MaterialSubtype::Icons,
        MaterialSubtype::Panoramas,
        MaterialSubtype::Pictures,
        MaterialSubtype::Tilesets,
        MaterialSubtype::Titles,
        MaterialSubtype::Transitions,
        MaterialSubtype::Windowskins,
    ];

    pub fn material_type(self) -> MaterialType {
        if Self::AUDIO.contains(&self) {
            MaterialType::Audio
        } else {
            MaterialType::Graphics
        }
    }

    pub fn db_name(self) -> &'static str {
        match self {
            MaterialSubtype::Bgm => "BGM",
            MaterialSubtype::Bgs => "BGS",
            MaterialSubtype::Me => "ME",
            MaterialSubtype::Se => "SE",
            MaterialSubtype::Animations => "Animations",
            MaterialSubtype::Autotiles => "Autotiles",
            MaterialSubtype::Battlebacks => "Battlebacks",
            MaterialSubtype::Battlers => "Battlers",
            MaterialSubtype::Characters => "Characters",
            MaterialSubtype::Fogs => "Fogs",
            MaterialSubtype::Gameovers => "Gameovers",
            MaterialSubtype::Icons => "Icons",
            MaterialSubtype::Panoramas => "Panoramas",
            MaterialSubtype::Pictures => "Pictures",
            MaterialSubtype::Tilesets => "Tilesets",
            MaterialSubtype::Titles => "Titles",
            MaterialSubtype::Transitions => "Transitions",
            MaterialSubtype::Windowskins => "Windowskins",
        }
    }

    pub fn dir_name(self) -> &'static str {
        self.db_name()
    }
}
