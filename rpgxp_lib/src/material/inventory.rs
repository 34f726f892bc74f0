//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Filesystem scan producing `material`/`material_file` rows.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::material::{MaterialSubtype, MaterialType};
use crate::sql::{InsertStatement, SqlValue};

/// `game` sources shadow `rtp` ones; higher priority wins in
/// [`Inventory::best_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialSource {
    Rtp,
    Game,
}

impl MaterialSource {
    pub fn priority(self) -> u8 {
        match self {
            MaterialSource::Rtp => 0,
            MaterialSource::Game => 1,
        }
    }

    pub fn db_name(self) -> &'static str {
        match self {
            MaterialSource::Rtp => "rtp",
            MaterialSource::Game => "game",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Material {
    pub material_type: MaterialType,
    pub subtype: MaterialSubtype,
    /// The file stem, e.g. `"001-Fighter01"`, used as the material's name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialFile {
    pub material_type: MaterialType,
    pub subtype: MaterialSubtype,
    pub name: String,
    pub source: MaterialSource,
    /// Without the leading dot, lowercased (`"ogg"`, not `".OGG"`).
    pub extension: String,
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub materials: Vec<Material>,
    pub files: Vec<MaterialFile>,
}

impl Inventory {
    /// For each material present in `self.files`, the single file with the
    /// highest source priority, tie-broken by lexicographically smallest
    /// extension.
    pub fn best_file(&self, material: &Material) -> Option<&MaterialFile> {
        self.files
            .iter()
            .filter(|f| {
                f.material_type == material.material_type
                    && f.subtype == material.subtype
                    && f.name == material.name
            })
            .max_by(|a, b| {
                a.source
                    .priority()
                    .cmp(&b.source.priority())
                    .then_with(|| b.extension.cmp(&a.extension))
            })
    }

    pub fn best_files(&self) -> Vec<&MaterialFile> {
        self.materials.iter().filter_map(|m| self.best_file(m)).collect()
    }

    /// Lowers this scan into the `material`/`material_file` insert
    /// statements `ddl::register_material_tables` built columns for; the
    /// caller merges these alongside the schema-driven rows so a fresh
    /// import always repopulates both.
    pub fn to_insert_statements(&self) -> Vec<InsertStatement> {
        let mut statements = vec![];

        if !self.materials.is_empty() {
            statements.push(InsertStatement {
                table_name: "material".to_owned(),
                columns: vec!["name".to_owned(), "type".to_owned(), "subtype".to_owned()],
                rows: self
                    .materials
                    .iter()
                    .map(|m| {
                        vec![
                            SqlValue::Text(m.name.clone()),
                            SqlValue::Text(m.material_type.db_name().to_owned()),
                            SqlValue::Text(m.subtype.db_name().to_owned()),
                        ]
                    })
                    .collect(),
            });
        }

        if !self.files.is_empty() {
            statements.push(InsertStatement {
                table_name: "material_file".to_owned(),
                columns: vec![
                    "name".to_owned(),
                    "type".to_owned(),
                    "subtype".to_owned(),
                    "source".to_owned(),
                    "extension".to_owned(),
                ],
                rows: self
                    .files
                    .iter()
                    .map(|f| {
                        vec![
                            SqlValue::Text(f.name.clone()),
                            SqlValue::Text(f.material_type.db_name().to_owned()),
                            SqlValue::Text(f.subtype.db_name().to_owned()),
                            SqlValue::Text(f.source.db_name().to_owned()),
                            SqlValue::Text(f.extension.clone()),
                        ]
                    })
                    .collect(),
            });
        }

        statements
    }
}

/// One `(type, subtype)` leaf directory's scan result. Leaves are scanned
/// in parallel, then merged back into declaration order by `order` so the
/// observable file/material ordering stays deterministic regardless of
/// which thread finished first.
struct LeafScan {
    order: usize,
    files: Vec<MaterialFile>,
}

fn scan_leaf(
    root: &Path,
    source: MaterialSource,
    material_type: MaterialType,
    subtype: MaterialSubtype,
    order: usize,
) -> Result<LeafScan> {
    let dir = root.join(material_type.dir_name()).join(subtype.dir_name());
    let mut files = vec![];

    if dir.is_dir() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(s) => s.to_owned(),
                None => continue,
            };
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_ascii_lowercase();

            files.push(MaterialFile {
                material_type,
                subtype,
                name: stem,
                source,
                extension,
            });
        }
    }

    files.sort_by(|a, b| (&a.name, &a.extension).cmp(&(&b.name, &b.extension)));
    Ok(LeafScan { order, files })
}

/// Scans `rtp_root` then `game_root`,
/// registering one `material` row per distinct `(type, subtype, stem)` and
/// one `material_file` row per actual file.
pub fn scan(game_root: &Path, rtp_root: Option<&Path>) -> Result<Inventory> {
    let mut leaves = vec![];
    let mut order = 0;

    let mut roots: Vec<(&Path, MaterialSource)> = vec![];
    if let Some(rtp_root) = rtp_root {
        roots.push((rtp_root, MaterialSource::Rtp));
    }
    roots.push((game_root, MaterialSource::Game));

    for (root, source) in roots {
        for &subtype in MaterialSubtype::AUDIO.iter().chain(MaterialSubtype::GRAPHICS) {
            leaves.push((root.to_path_buf(), source, subtype.material_type(), subtype, order));
            order += 1;
        }
    }

    let scans: Vec<Result<LeafScan>> = leaves
        .into_par_iter()
        .map(|(root, source, material_type, subtype, order)| {
            scan_leaf(&root, source, material_type, subtype, order)
        })
        .collect();

    let mut scans = scans.into_iter().collect::<Result<Vec<_>>>()?;
    scans.sort_by_key(|s| s.order);

    let mut inventory = Inventory::default();
    let mut seen = std::collections::BTreeSet::new();

    for leaf in scans {
        for file in leaf.files {
            let key = (file.material_type, file.subtype, file.name.clone());
            // `INSERT OR IGNORE` semantics: the
            // material row is only ever registered once, from whichever
            // source (RTP or game) encounters it first.
            if seen.insert(key) {
                inventory.materials.push(Material {
                    material_type: file.material_type,
                    subtype: file.subtype,
                    name: file.name.clone(),
                });
            }
            inventory.files.push(file);
        }
    }

    Ok(inventory)
}
