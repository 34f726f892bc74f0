//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Executes the emitted DDL and insert scripts against a real SQLite
//! database: the full DB is rebuilt atomically by running `schema.sql`
//! inside a single transaction, with `foreign_keys=OFF` during data load and
//! a final `PRAGMA foreign_key_check` afterwards, plus the FK-violation
//! report pass that surfaces offenders without aborting.

use std::fmt;
use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::{Result, RpgxpError};
use crate::sql::Script;

/// Drops any existing database file at `db_path`, then loads `ddl_script`
/// followed by `insert_script` inside one transaction with deferred FK
/// enforcement.
pub fn rebuild(db_path: &Path, ddl_script: &Script, insert_script: &Script) -> Result<Connection> {
    if db_path.exists() {
        fs::remove_file(db_path)?;
    }

    let mut conn = Connection::open(db_path)?;
    conn.pragma_update(None, "foreign_keys", false)?;

    let tx = conn.transaction()?;
    tx.execute_batch(&ddl_script.to_string())?;
    tx.execute_batch(&insert_script.to_string())?;
    tx.commit()?;

    Ok(conn)
}

/// One row of `PRAGMA foreign_key_check`, enriched with the FK declaration
/// reconstructed from `pragma_foreign_key_list` and the violating row's own
/// FK column value.
#[derive(Debug, Clone)]
pub struct FkViolation {
    pub table: String,
    pub rowid: i64,
    pub referenced_table: String,
    pub from_column: String,
    pub to_column: String,
    pub from_value: String,
}

impl fmt::Display for FkViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" (rowid {}): \"{}\" = {} does not reference any row of \"{}\".\"{}\"",
            self.table, self.rowid, self.from_column, self.from_value, self.referenced_table, self.to_column,
        )
    }
}

/// Runs `PRAGMA foreign_key_check` and reconstructs one [`FkViolation`] per
/// offending row. Never aborts the caller — the database stays available
/// for inspection regardless of what this finds.
pub fn foreign_key_check(conn: &Connection) -> Result<Vec<FkViolation>> {
    let raw: Vec<(String, i64, String, i64)> = {
        let mut stmt = conn.prepare("PRAGMA foreign_key_check;")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?;
        rows.collect::<rusqlite::Result<_>>()?
    };

    let mut violations = Vec::with_capacity(raw.len());
    for (table, rowid, referenced_table, fk_id) in raw {
        let (from_column, to_column) = fk_declaration(conn, &table, fk_id)?;
        let from_value = fk_cell_value(conn, &table, &from_column, rowid)?;
        violations.push(FkViolation {
            table,
            rowid,
            referenced_table,
            from_column,
            to_column,
            from_value,
        });
    }
    Ok(violations)
}

/// Looks up the `(from, to)` column pair for `fk_id` in `table`'s
/// `pragma_foreign_key_list` output.
fn fk_declaration(conn: &Connection, table: &str, fk_id: i64) -> Result<(String, String)> {
    let mut stmt = conn.prepare(&format!("PRAGMA foreign_key_list(\"{table}\");"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let id: i64 = row.get(0)?;
        if id == fk_id {
            return Ok((row.get(3)?, row.get(4)?));
        }
    }
    Err(RpgxpError::Decode(format!(
        "no pragma_foreign_key_list entry {fk_id} for table \"{table}\" (schema/DDL out of sync with the loaded database)"
    )))
}

fn fk_cell_value(conn: &Connection, table: &str, column: &str, rowid: i64) -> Result<String> {
    let value: rusqlite::types::Value = conn.query_row(
        &format!("SELECT \"{column}\" FROM \"{table}\" WHERE rowid = ?1"),
        params![rowid],
        |row| row.get(0),
    )?;
    Ok(match value {
        rusqlite::types::Value::Null => "NULL".to_owned(),
        rusqlite::types::Value::Integer(i) => i.to_string(),
        rusqlite::types::Value::Real(r) => r.to_string(),
        rusqlite::types::Value::Text(s) => s,
        rusqlite::types::Value::Blob(b) => format!("<{} bytes>", b.len()),
    })
}

/// Opens an existing database file, for `rpgxp check` to run the
/// FK-violation report against an existing DB without re-importing.
pub fn open_existing(db_path: &Path) -> Result<Connection> {
    Connection::open(db_path).map_err(RpgxpError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{ColumnSchema, Member, SqlValue, TableSchema};
    use tempfile::tempdir;

    fn script_with(tables: Vec<TableSchema>) -> Script {
        let mut script = Script::default();
        for t in tables {
            script.push(t.to_sql().unwrap());
        }
        script
    }

    #[test]
    fn rebuild_then_check_reports_no_violations_on_a_clean_load() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("game.db");

        let mut parent = TableSchema::new("troop");
        parent.members.push(Member::Column(ColumnSchema {
            pk: true,
            ..ColumnSchema::new("id", crate::schema::algebra::ColumnType::Integer)
        }));

        let mut child = TableSchema::new("map");
        child.members.push(Member::Column(ColumnSchema {
            pk: true,
            ..ColumnSchema::new("id", crate::schema::algebra::ColumnType::Integer)
        }));
        child.members.push(Member::Column(ColumnSchema {
            references: Some(("troop".to_owned(), "id".to_owned())),
            ..ColumnSchema::new("troop_id", crate::schema::algebra::ColumnType::Integer)
        }));

        let ddl = script_with(vec![parent, child]);

        let mut inserts = Script::default();
        inserts.push(
            crate::sql::InsertStatement {
                table_name: "troop".to_owned(),
                columns: vec!["id".to_owned()],
                rows: vec![vec![SqlValue::Int(1)]],
            }
            .to_string(),
        );
        inserts.push(
            crate::sql::InsertStatement {
                table_name: "map".to_owned(),
                columns: vec!["id".to_owned(), "troop_id".to_owned()],
                rows: vec![vec![SqlValue::Int(1), SqlValue::Int(1)]],
            }
            .to_string(),
        );

        let conn = rebuild(&db_path, &ddl, &inserts).unwrap();
        conn.pragma_update(None, "foreign_keys", true).unwrap();
        let violations = foreign_key_check(&conn).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn dangling_fk_surfaces_in_the_report() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("game.db");

        let mut parent = TableSchema::new("troop");
        parent.members.push(Member::Column(ColumnSchema {
            pk: true,
            ..ColumnSchema::new("id", crate::schema::algebra::ColumnType::Integer)
        }));

        let mut child = TableSchema::new("map");
        child.members.push(Member::Column(ColumnSchema {
            pk: true,
            ..ColumnSchema::new("id", crate::schema::algebra::ColumnType::Integer)
        }));
        child.members.push(Member::Column(ColumnSchema {
            references: Some(("troop".to_owned(), "id".to_owned())),
            ..ColumnSchema::new("troop_id", crate::schema::algebra::ColumnType::Integer)
        }));

        let ddl = script_with(vec![parent, child]);

        let mut inserts = Script::default();
        inserts.push(
            crate::sql::InsertStatement {
                table_name: "map".to_owned(),
                columns: vec!["id".to_owned(), "troop_id".to_owned()],
                rows: vec![vec![SqlValue::Int(1), SqlValue::Int(99)]],
            }
            .to_string(),
        );

        let conn = rebuild(&db_path, &ddl, &inserts).unwrap();
        let violations = foreign_key_check(&conn).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].table, "map");
        assert_eq!(violations[0].referenced_table, "troop");
        assert_eq!(violations[0].from_value, "99");
    }
}
