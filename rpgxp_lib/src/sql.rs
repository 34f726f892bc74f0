//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! SQL emission primitives: the column/table/constraint types
//! DDL lowering builds and row lowering fills in, plus their rendering to
//! text. Every table is emitted `STRICT` — deliberately without
//! `WITHOUT ROWID` (see `DESIGN.md`), so a stray `rowid` survives for
//! `PRAGMA foreign_key_check` to report against.

use std::fmt;

use crate::error::{Result, RpgxpError};
use crate::schema::algebra::ColumnType;

impl ColumnType {
    pub fn sql_name(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
        }
    }
}

/// One column of a [`TableSchema`].
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub type_: ColumnType,
    pub nullable: bool,
    pub pk: bool,
    pub default: Option<String>,
    /// A raw SQL boolean expression, rendered as `CHECK (...)`.
    pub check: Option<String>,
    /// `(referenced_table, referenced_column)` for a single-column FK,
    /// rendered inline.
    pub references: Option<(String, String)>,
    /// A raw SQL expression for a `GENERATED ALWAYS AS (...) VIRTUAL`
    /// column — used by enforced `MaterialRef` type/subtype columns.
    pub generated: Option<String>,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, type_: ColumnType) -> Self {
        ColumnSchema {
            name: name.into(),
            type_,
            nullable: false,
            pk: false,
            default: None,
            check: None,
            references: None,
            generated: None,
        }
    }

    fn render(&self, emit_inline_pk: bool) -> String {
        let mut out = format!("\"{}\" {}", self.name, self.type_.sql_name());
        if let Some(expr) = &self.generated {
            out.push_str(&format!(" GENERATED ALWAYS AS ({expr}) VIRTUAL"));
            return out;
        }
        if !self.nullable {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default {
            out.push_str(&format!(" DEFAULT {default}"));
        }
        if let Some(check) = &self.check {
            out.push_str(&format!(" CHECK ({check})"));
        }
        if let Some((table, col)) = &self.references {
            out.push_str(&format!(" REFERENCES \"{table}\" (\"{col}\")"));
        }
        if emit_inline_pk && self.pk {
            out.push_str(" PRIMARY KEY");
        }
        out
    }
}

/// A table-level member that isn't a single-column concern: only
/// multi-column foreign keys need one, such as the composite FK a
/// `MaterialRef` column pair resolves against `material`.
#[derive(Debug, Clone)]
pub enum Member {
    Column(ColumnSchema),
    ForeignKey {
        columns: Vec<String>,
        referenced_table: String,
        referenced_columns: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: String,
    pub members: Vec<Member>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        TableSchema {
            name: name.into(),
            members: vec![],
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.members.iter().filter_map(|m| match m {
            Member::Column(c) => Some(c),
            Member::ForeignKey { .. } => None,
        })
    }

    pub fn columns_mut(&mut self) -> impl Iterator<Item = &mut ColumnSchema> {
        self.members.iter_mut().filter_map(|m| match m {
            Member::Column(c) => Some(c),
            Member::ForeignKey { .. } => None,
        })
    }

    pub fn pk(&self) -> Result<Vec<&ColumnSchema>> {
        let pk: Vec<&ColumnSchema> = self.columns().filter(|c| c.pk).collect();
        if pk.is_empty() {
            return Err(RpgxpError::Schema(format!(
                "table \"{}\" has no primary key",
                self.name
            )));
        }
        Ok(pk)
    }

    pub fn to_sql(&self) -> Result<String> {
        let pk_count = self.pk()?.len();

        let mut column_decls = vec![];
        let mut constraint_decls = vec![];
        for member in &self.members {
            match member {
                Member::Column(col) => column_decls.push(col.render(pk_count == 1)),
                Member::ForeignKey {
                    columns,
                    referenced_table,
                    referenced_columns,
                } => {
                    let cols = quote_csv(columns);
                    let ref_cols = quote_csv(referenced_columns);
                    constraint_decls.push(format!(
                        "FOREIGN KEY ({cols}) REFERENCES \"{referenced_table}\" ({ref_cols})"
                    ));
                }
            }
        }

        if pk_count > 1 {
            let names: Vec<String> = self.pk()?.iter().map(|c| c.name.clone()).collect();
            constraint_decls.insert(0, format!("PRIMARY KEY ({})", quote_csv(&names)));
        }

        let body = column_decls
            .into_iter()
            .chain(constraint_decls)
            .collect::<Vec<_>>()
            .join(",\n    ");

        Ok(format!(
            "DROP TABLE IF EXISTS \"{name}\";\nCREATE TABLE \"{name}\" (\n    {body}\n) STRICT;",
            name = self.name,
        ))
    }
}

fn quote_csv(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A concrete SQL value, as produced by row lowering.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Int(i) => write!(f, "{i}"),
            SqlValue::Real(x) => write!(f, "{x}"),
            // SQLite's own escaping rule: double up embedded single quotes.
            SqlValue::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            SqlValue::Blob(bytes) => {
                write!(f, "x'")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                write!(f, "'")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct InsertStatement {
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = quote_csv(&self.columns);
        writeln!(f, "INSERT INTO \"{}\" ({columns}) VALUES", self.table_name)?;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let cells = row.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ");
                format!("({cells})")
            })
            .collect::<Vec<_>>()
            .join(",\n    ");
        write!(f, "    {rows};")
    }
}

/// An ordered batch of DDL and DML statements, concatenated for execution.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub statements: Vec<String>,
}

impl Script {
    pub fn push(&mut self, sql: impl Into<String>) {
        self.statements.push(sql.into());
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.statements.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_pk_is_inline() {
        let mut table = TableSchema::new("actor");
        table.members.push(Member::Column(ColumnSchema {
            pk: true,
            ..ColumnSchema::new("id", ColumnType::Integer)
        }));
        table.members.push(Member::Column(ColumnSchema::new("name", ColumnType::Text)));
        let sql = table.to_sql().unwrap();
        assert!(sql.contains("\"id\" INTEGER NOT NULL PRIMARY KEY"));
        assert!(sql.contains(") STRICT;"));
        assert!(!sql.contains("WITHOUT ROWID"));
    }

    #[test]
    fn multi_column_pk_is_hoisted() {
        let mut table = TableSchema::new("material");
        for name in ["name", "type", "subtype"] {
            table.members.push(Member::Column(ColumnSchema {
                pk: true,
                ..ColumnSchema::new(name, ColumnType::Text)
            }));
        }
        let sql = table.to_sql().unwrap();
        assert!(sql.contains("PRIMARY KEY (\"name\", \"type\", \"subtype\")"));
        assert!(!sql.contains("\"name\" TEXT NOT NULL PRIMARY KEY"));
    }

    #[test]
    fn text_value_escapes_embedded_quotes() {
        let value = SqlValue::Text("O'Brien".to_owned());
        assert_eq!(value.to_string(), "'O''Brien'");
    }

    #[test]
    fn table_with_no_pk_is_a_schema_error() {
        let table = TableSchema::new("orphan");
        assert!(table.to_sql().is_err());
    }

    #[test]
    fn generated_column_has_no_not_null() {
        let mut table = TableSchema::new("item");
        table.members.push(Member::Column(ColumnSchema {
            pk: true,
            ..ColumnSchema::new("id", ColumnType::Integer)
        }));
        table.members.push(Member::Column(ColumnSchema {
            generated: Some("'Audio'".to_owned()),
            ..ColumnSchema::new("icon_type", ColumnType::Text)
        }));
        let sql = table.to_sql().unwrap();
        assert!(sql.contains("GENERATED ALWAYS AS ('Audio') VIRTUAL"));
        assert!(!sql.contains("\"icon_type\" TEXT NOT NULL GENERATED"));
    }
}
