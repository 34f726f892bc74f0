//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Top-level orchestration: for each top-level file schema, locates and
//! reads the matching file(s) under the game's `Data/` directory, runs them
//! through the Marshal decoder, the schema-driven decoder and row lowering,
//! and merges the result into a shared row set alongside the DDL and the
//! asset inventory. This is the one place that touches the game's on-disk
//! layout directly.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::decoder;
use crate::ddl::{self, DdlResult};
use crate::error::{Result, RpgxpError};
use crate::marshal;
use crate::material::{self, Inventory};
use crate::row::{self, TableRegistry};
use crate::schema::algebra::{ColumnType, Schema};
use crate::schema::rpgxp;

/// Everything one full import run produces: the DDL to (re)create the
/// schema, the rows to populate it with, and the asset scan those rows'
/// material-reference columns are checked against.
pub struct ImportOutput {
    pub ddl: DdlResult,
    pub rows: TableRegistry,
    pub inventory: Inventory,
}

/// Decodes every file named by [`rpgxp::file_schemas`] under `data_root`,
/// scans `game_root`/`rtp_root` for assets, and lowers both into one row
/// set plus the DDL it populates. File iteration is sorted by filename
/// wherever more than one file contributes to a table, so two runs over an
/// unchanged game directory emit byte-identical scripts.
pub fn run(data_root: &Path, game_root: &Path, rtp_root: Option<&Path>) -> Result<ImportOutput> {
    let file_schemas = rpgxp::file_schemas();
    let ddl = ddl::build(&file_schemas)?;

    let mut rows = TableRegistry::default();
    for file_schema in &file_schemas {
        rows.merge(decode_and_lower(data_root, file_schema)?);
    }

    let inventory = material::scan(game_root, rtp_root)?;
    rows.merge_statements(inventory.to_insert_statements());

    Ok(ImportOutput { ddl, rows, inventory })
}

fn decode_and_lower(data_root: &Path, file_schema: &Schema) -> Result<TableRegistry> {
    match file_schema {
        Schema::SingleFile { filename, schema: inner, .. } => {
            let value = decode_one(&data_root.join(filename), filename, inner)?;
            row::lower_single_file(file_schema, &value)
        }
        Schema::MultiFile { pattern, table_name, keys, schema: inner } => {
            lower_multi_file(data_root, pattern, table_name, keys, inner)
        }
        other => Err(RpgxpError::Schema(format!(
            "top-level file schemas must be SingleFile or MultiFile, found {other:?}"
        ))),
    }
}

fn decode_one(path: &Path, label: &str, schema: &Schema) -> Result<decoder::Value> {
    let node = marshal::parse_file(path)?;
    let mut ctx = vec![label.to_owned()];
    decoder::decode(schema, &node, &mut ctx)
}

/// Handles the one `MultiFile` entry in practice, `Map(?P<id>\d{3}).rxdata`:
/// lists `data_root`, matches every entry against `pattern`, sorts the
/// matches by filename, and lowers each one through [`row::lower_map_file`]
/// keyed by its captured id.
fn lower_multi_file(
    data_root: &Path,
    pattern: &str,
    table_name: &str,
    keys: &[(String, ColumnType)],
    inner_schema: &Schema,
) -> Result<TableRegistry> {
    let (key_name, key_type) = keys.first().ok_or_else(|| {
        RpgxpError::Schema(format!("MultiFile \"{table_name}\" declares no captured keys"))
    })?;
    if keys.len() != 1 || *key_type != ColumnType::Integer {
        return Err(RpgxpError::Schema(format!(
            "MultiFile \"{table_name}\": only a single Integer-typed capture key is supported"
        )));
    }

    let re = Regex::new(pattern)
        .map_err(|e| RpgxpError::Schema(format!("invalid MultiFile pattern \"{pattern}\": {e}")))?;

    let mut matches = vec![];
    for entry in fs::read_dir(data_root)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else { continue };
        let Some(captures) = re.captures(name) else { continue };
        let id: i64 = captures
            .name(key_name)
            .ok_or_else(|| {
                RpgxpError::Schema(format!(
                    "pattern \"{pattern}\" has no capture group named \"{key_name}\""
                ))
            })?
            .as_str()
            .parse()
            .map_err(|_| RpgxpError::Decode(format!("non-numeric \"{key_name}\" captured from \"{name}\"")))?;
        matches.push((name.to_owned(), id));
    }
    matches.sort_by(|a, b| a.0.cmp(&b.0));

    let mut reg = TableRegistry::default();
    for (file_name, id) in matches {
        let value = decode_one(&data_root.join(&file_name), &file_name, inner_schema)?;
        let file_rows = row::lower_map_file(table_name, inner_schema, key_name, id, &value)?;
        reg.merge(file_rows);
    }
    Ok(reg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::algebra::build::*;
    use crate::schema::algebra::{FirstItemPolicy, IndexBehavior};
    use tempfile::tempdir;

    /// Marshal's single-byte Fixnum encoding, valid for `1..123` — the only
    /// range this fixture needs (array lengths, ivar counts, symbol lengths,
    /// and the small `id` values below all fall inside it).
    fn fixnum(n: i64) -> Vec<u8> {
        if n == 0 {
            vec![0]
        } else {
            vec![(n + 5) as u8]
        }
    }

    fn symbol(name: &str) -> Vec<u8> {
        let mut out = vec![b':'];
        out.extend(fixnum(name.len() as i64));
        out.extend(name.bytes());
        out
    }

    fn write_marshalled_int_list(path: &Path, ids: &[i32]) {
        // An `Array` of `Object`s each carrying one `@id` Fixnum ivar —
        // enough of a Marshal stream for `decode_one` against a `List`
        // schema of bare `Obj`s with a single `id` field.
        let mut bytes = vec![4u8, 8u8];
        bytes.push(b'[');
        bytes.extend(fixnum(ids.len() as i64));
        for &id in ids {
            bytes.push(b'o');
            bytes.extend(symbol("Object"));
            bytes.extend(fixnum(1));
            bytes.extend(symbol("@id"));
            bytes.push(b'i');
            bytes.extend(fixnum(id as i64));
        }
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn decode_and_lower_reads_a_single_file_relative_to_data_root() {
        let dir = tempdir().unwrap();
        write_marshalled_int_list(&dir.path().join("Widgets.rxdata"), &[1, 2]);

        let file_schema = single_file(
            "Widgets.rxdata",
            "widget",
            list(
                "widget",
                Schema::Obj { class: "Object", fields: vec![id_field()] },
                None,
                FirstItemPolicy::Regular,
                IndexBehavior::AddIndex("index".to_owned()),
            ),
        );

        let reg = decode_and_lower(dir.path(), &file_schema).unwrap();
        let statements = reg.into_insert_statements();
        let widget = statements.iter().find(|s| s.table_name == "widget").unwrap();
        assert_eq!(widget.rows.len(), 2);
    }

    #[test]
    fn non_single_or_multi_file_schema_is_rejected() {
        let err = decode_and_lower(Path::new("."), &Schema::Bool).unwrap_err();
        assert!(matches!(err, RpgxpError::Schema(_)));
    }
}
