//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

use std::fs;

use tempfile::tempdir;

use super::*;

fn touch(path: &std::path::Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

#[test]
fn best_file_picks_highest_priority_source_then_smallest_extension() {
    let game = tempdir().unwrap();
    let rtp = tempdir().unwrap();

    touch(&game.path().join("Audio/BGM/town.ogg"));
    touch(&game.path().join("Audio/BGM/town.mp3"));
    touch(&rtp.path().join("Audio/BGM/town.wav"));

    let inventory = scan(game.path(), Some(rtp.path())).unwrap();
    let material = Material {
        material_type: MaterialType::Audio,
        subtype: MaterialSubtype::Bgm,
        name: "town".to_owned(),
    };

    let best = inventory.best_file(&material).unwrap();
    assert_eq!(best.source, MaterialSource::Game);
    assert_eq!(best.extension, "mp3");
}

#[test]
fn materials_are_registered_once_across_sources() {
    let game = tempdir().unwrap();
    let rtp = tempdir().unwrap();

    touch(&game.path().join("Graphics/Icons/001-Weapon01.png"));
    touch(&rtp.path().join("Graphics/Icons/001-Weapon01.png"));

    let inventory = scan(game.path(), Some(rtp.path())).unwrap();
    let matching = inventory
        .materials
        .iter()
        .filter(|m| m.name == "001-Weapon01")
        .count();
    assert_eq!(matching, 1);

    let matching_files = inventory
        .files
        .iter()
        .filter(|f| f.name == "001-Weapon01")
        .count();
    assert_eq!(matching_files, 2);
}

#[test]
fn scan_without_rtp_root_only_scans_game() {
    let game = tempdir().unwrap();
    touch(&game.path().join("Audio/SE/jump.wav"));

    let inventory = scan(game.path(), None).unwrap();
    assert_eq!(inventory.materials.len(), 1);
    assert_eq!(inventory.files[0].source, MaterialSource::Game);
}

#[test]
fn insert_statements_cover_both_tables_with_matching_columns() {
    let game = tempdir().unwrap();
    touch(&game.path().join("Audio/SE/jump.wav"));

    let inventory = scan(game.path(), None).unwrap();
    let statements = inventory.to_insert_statements();

    let material_stmt = statements.iter().find(|s| s.table_name == "material").unwrap();
    assert_eq!(material_stmt.columns, vec!["name", "type", "subtype"]);
    assert_eq!(material_stmt.rows.len(), 1);

    let file_stmt = statements.iter().find(|s| s.table_name == "material_file").unwrap();
    assert_eq!(file_stmt.columns, vec!["name", "type", "subtype", "source", "extension"]);
    assert_eq!(file_stmt.rows.len(), 1);
}

#[test]
fn empty_inventory_emits_no_insert_statements() {
    let game = tempdir().unwrap();
    fs::create_dir_all(game.path()).unwrap();

    let inventory = scan(game.path(), None).unwrap();
    assert!(inventory.to_insert_statements().is_empty());
}
