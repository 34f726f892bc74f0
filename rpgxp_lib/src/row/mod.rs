//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Row lowering: walks a decoded [`Value`] in lock-step with
//! the same [`Schema`] DDL lowering walked, producing [`InsertStatement`]s.
//! Column naming, pk propagation and variant-leaf dispatch mirror
//! `crate::ddl` exactly — the two must stay in lock-step or row inserts
//! won't match the tables DDL created for them.

#[cfg(test)]
mod row_test;

use std::collections::HashMap;

use crate::decoder::{EnumValue, Value, VariantStep};
use crate::error::{Result, RpgxpError};
use crate::schema::algebra::{Field, IndexBehavior, KeyBehavior, Schema, Variant};
use crate::sql::{InsertStatement, SqlValue};

/// Accumulates rows per table across however many files contribute to it —
/// every `MapNNN.rxdata` file adds one row to the shared `map` table plus its
/// children, for instance.
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: Vec<(String, Vec<String>, Vec<Vec<SqlValue>>)>,
    index: HashMap<String, usize>,
}

impl TableRegistry {
    fn table_idx(&mut self, name: &str, columns: &[String]) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.tables.len();
        self.tables.push((name.to_owned(), columns.to_vec(), vec![]));
        self.index.insert(name.to_owned(), i);
        i
    }

    fn push_row_pairs(&mut self, table_name: &str, row: Vec<(String, SqlValue)>) {
        let columns: Vec<String> = row.iter().map(|(n, _)| n.clone()).collect();
        let values: Vec<SqlValue> = row.into_iter().map(|(_, v)| v).collect();
        let idx = self.table_idx(table_name, &columns);
        self.tables[idx].2.push(values);
    }

    pub fn merge(&mut self, other: TableRegistry) {
        for (name, columns, rows) in other.tables {
            let idx = self.table_idx(&name, &columns);
            self.tables[idx].2.extend(rows);
        }
    }

    /// Folds in rows produced elsewhere as plain [`InsertStatement`]s — the
    /// material inventory builds its own statements directly rather than
    /// going through a `Schema`/`Value` pair.
    pub fn merge_statements(&mut self, statements: Vec<InsertStatement>) {
        for stmt in statements {
            let idx = self.table_idx(&stmt.table_name, &stmt.columns);
            self.tables[idx].2.extend(stmt.rows);
        }
    }

    pub fn into_insert_statements(self) -> Vec<InsertStatement> {
        self.tables
            .into_iter()
            .filter(|(_, _, rows)| !rows.is_empty())
            .map(|(table_name, columns, rows)| InsertStatement { table_name, columns, rows })
            .collect()
    }

    /// Renders every populated table's rows as one script, prefixed by a
    /// `DELETE FROM` for each of them so re-running it against an
    /// already-populated database leaves the same row set.
    pub fn into_script(self) -> crate::sql::Script {
        let statements = self.into_insert_statements();
        let mut script = crate::sql::Script::default();
        for stmt in &statements {
            script.push(format!("DELETE FROM \"{}\";", stmt.table_name));
        }
        for stmt in statements {
            script.push(stmt.to_string());
        }
        script
    }
}

fn value_to_sql(value: &Value) -> Result<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Int(*b as i64)),
        Value::Int(i) => Ok(SqlValue::Int(*i)),
        Value::Float(f) => Ok(SqlValue::Real(*f)),
        Value::Str(s) => Ok(SqlValue::Text(s.clone())),
        Value::Blob(b) => Ok(SqlValue::Blob(b.clone())),
        Value::Enum(EnumValue::Int(i)) => Ok(SqlValue::Int(*i)),
        Value::Enum(EnumValue::Str(s)) => Ok(SqlValue::Text(s.clone())),
        other => Err(RpgxpError::Decode(format!(
            "{other:?} cannot be lowered to a single SQL value"
        ))),
    }
}

fn push_scalar_cells(col_name: &str, schema: &Schema, value: &Value, row: &mut Vec<(String, SqlValue)>) -> Result<()> {
    if let Schema::FourDoubles { .. } = schema {
        let fields = match value {
            Value::Obj(f) => f,
            _ => return Err(RpgxpError::Decode(format!("expected a FourDoubles value for \"{col_name}\""))),
        };
        for suffix in ["a", "b", "c", "d"] {
            let v = fields
                .iter()
                .find(|(n, _)| n == suffix)
                .map(|(_, v)| v)
                .ok_or_else(|| RpgxpError::Decode(format!("missing channel \"{suffix}\" in FourDoubles value")))?;
            row.push((format!("{col_name}_{suffix}"), value_to_sql(v)?));
        }
        return Ok(());
    }

    row.push((col_name.to_owned(), value_to_sql(value)?));
    Ok(())
}

fn renamed_pk_names(child_table: &str, parent_pk: &[String]) -> Vec<String> {
    let n = parent_pk.len();
    parent_pk
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i + 1 == n {
                format!("{child_table}_{name}")
            } else {
                name.clone()
            }
        })
        .collect()
}

fn inherited_pk_cells(row: &[(String, SqlValue)], pk_cols: &[String], child_table: &str) -> Vec<(String, SqlValue)> {
    let renamed = renamed_pk_names(child_table, pk_cols);
    pk_cols
        .iter()
        .zip(renamed.iter())
        .map(|(orig, new_name)| {
            let value = row.iter().find(|(n, _)| n == orig).map(|(_, v)| v.clone()).unwrap_or(SqlValue::Null);
            (new_name.clone(), value)
        })
        .collect()
}

fn table_name_template(schema: &Schema) -> &str {
    match schema {
        Schema::List { table_name, .. } => table_name,
        Schema::Set { table_name, .. } => table_name,
        Schema::Dict { table_name, .. } => table_name,
        _ => unreachable!("table_name_template called on a non-table-kind schema"),
    }
}

fn resolve_prefix_template(template: &str, parent_table: &str) -> String {
    template.replace("${prefix}", parent_table)
}

fn lower_obj_fields(
    reg: &mut TableRegistry,
    table_name: &str,
    pk_cols: &[String],
    prefix: &str,
    fields: &[Field],
    value: &Value,
    row: &mut Vec<(String, SqlValue)>,
) -> Result<()> {
    for field in fields {
        let col_name = format!("{prefix}{}", field.name);
        let sub_value = value
            .field(&field.name)
            .ok_or_else(|| RpgxpError::Decode(format!("missing decoded field \"{}\"", field.name)))?;
        lower_field_value(reg, table_name, pk_cols, &col_name, &field.schema, sub_value, row)?;
    }
    Ok(())
}

fn lower_field_value(
    reg: &mut TableRegistry,
    table_name: &str,
    pk_cols: &[String],
    col_name: &str,
    schema: &Schema,
    value: &Value,
    row: &mut Vec<(String, SqlValue)>,
) -> Result<()> {
    match schema {
        Schema::Obj { fields, .. } => {
            lower_obj_fields(reg, table_name, pk_cols, &format!("{col_name}_"), fields, value, row)
        }
        Schema::VariantObj { fields, discriminant, variants, .. } => {
            lower_variant(reg, table_name, fields, discriminant, variants, value, row)
        }
        Schema::List { .. } | Schema::Set { .. } | Schema::Dict { .. } => {
            lower_table_kind_rows(reg, table_name, pk_cols, row, schema, value)
        }
        other => push_scalar_cells(col_name, other, value, row),
    }
}

fn lower_item_value(
    reg: &mut TableRegistry,
    table_name: &str,
    pk_cols: &[String],
    item: &Schema,
    item_name: Option<&str>,
    value: &Value,
    row: &mut Vec<(String, SqlValue)>,
) -> Result<()> {
    match item {
        Schema::Obj { fields, .. } | Schema::ArrayObj { fields, .. } | Schema::Singleton { fields, .. } => {
            lower_obj_fields(reg, table_name, pk_cols, "", fields, value, row)
        }
        Schema::VariantObj { fields, discriminant, variants, .. } => {
            lower_variant(reg, table_name, fields, discriminant, variants, value, row)
        }
        _ => {
            let name = item_name
                .ok_or_else(|| RpgxpError::Schema("a scalar List/Set/Dict item needs an item_name".to_owned()))?;
            push_scalar_cells(name, item, value, row)
        }
    }
}

fn lower_table_kind_rows(
    reg: &mut TableRegistry,
    parent_table: &str,
    parent_pk_cols: &[String],
    parent_row: &[(String, SqlValue)],
    schema: &Schema,
    value: &Value,
) -> Result<()> {
    let template = table_name_template(schema).to_owned();
    let child_table = resolve_prefix_template(&template, parent_table);
    let base_cells = inherited_pk_cells(parent_row, parent_pk_cols, &child_table);
    let child_pk_cols: Vec<String> = base_cells.iter().map(|(n, _)| n.clone()).collect();

    match schema {
        Schema::List { item, item_name, first_item, index, .. } => {
            let items = match value {
                Value::List(items) => items,
                _ => return Err(RpgxpError::Decode(format!("expected a List value for \"{child_table}\""))),
            };
            let start = match first_item {
                crate::schema::algebra::FirstItemPolicy::Regular => 0,
                _ => 1,
            };
            for (offset, item_value) in items.iter().enumerate() {
                let logical_index = start + offset;
                let mut row = base_cells.clone();
                let mut pk_cols = child_pk_cols.clone();
                match index {
                    IndexBehavior::AddIndex(name) => {
                        row.push((name.clone(), SqlValue::Int(logical_index as i64)));
                        pk_cols.push(name.clone());
                    }
                    IndexBehavior::MatchIndexToField(field_name) => pk_cols.push(field_name.clone()),
                }
                lower_item_value(reg, &child_table, &pk_cols, item, item_name.as_deref(), item_value, &mut row)?;
                reg.push_row_pairs(&child_table, row);
            }
            Ok(())
        }
        Schema::Set { item, item_name, .. } => {
            let items = match value {
                Value::List(items) => items,
                _ => return Err(RpgxpError::Decode(format!("expected a Set value for \"{child_table}\""))),
            };
            for item_value in items {
                let mut row = base_cells.clone();
                lower_item_value(reg, &child_table, &child_pk_cols, item, item_name.as_deref(), item_value, &mut row)?;
                reg.push_row_pairs(&child_table, row);
            }
            Ok(())
        }
        Schema::Dict { key, value: value_schema, .. } => {
            let pairs = match value {
                Value::Dict(pairs) => pairs,
                _ => return Err(RpgxpError::Decode(format!("expected a Dict value for \"{child_table}\""))),
            };
            for (k, v) in pairs {
                let mut row = base_cells.clone();
                let mut pk_cols = child_pk_cols.clone();
                match key {
                    KeyBehavior::AddKey(name, _) => {
                        row.push((name.clone(), value_to_sql(k)?));
                        pk_cols.push(name.clone());
                    }
                    KeyBehavior::MatchKeyToField(field_name) => pk_cols.push(field_name.clone()),
                }
                lower_item_value(reg, &child_table, &pk_cols, value_schema, None, v, &mut row)?;
                reg.push_row_pairs(&child_table, row);
            }
            Ok(())
        }
        _ => Err(RpgxpError::Schema("expected a table-kind schema".to_owned())),
    }
}

fn push_named_base_field(row: &mut Vec<(String, SqlValue)>, field: &Field, base: &[(String, Value)]) -> Result<()> {
    let v = base
        .iter()
        .find(|(n, _)| n == &field.name)
        .map(|(_, v)| v)
        .ok_or_else(|| RpgxpError::Decode(format!("missing base field \"{}\" while lowering rows", field.name)))?;
    push_scalar_cells(&field.name, &field.schema, v, row)
}

fn lower_variant_step(
    row: &mut Vec<(String, SqlValue)>,
    name_path: &mut Vec<String>,
    variant: &Variant,
    step: &VariantStep,
) -> Result<()> {
    name_path.push(variant.name.clone());
    for field in &variant.fields {
        let v = step
            .fields
            .iter()
            .find(|(n, _)| n == &field.name)
            .map(|(_, v)| v)
            .ok_or_else(|| RpgxpError::Decode(format!("missing variant field \"{}\"", field.name)))?;
        push_scalar_cells(&field.name, &field.schema, v, row)?;
    }

    if let Some(sub) = &variant.sub {
        let next_step = step
            .nested
            .first()
            .ok_or_else(|| RpgxpError::Decode(format!("missing nested step under variant \"{}\"", variant.name)))?;
        let sub_variant = sub
            .variants
            .iter()
            .find(|v| v.name == next_step.name)
            .ok_or_else(|| RpgxpError::Decode(format!("unknown sub-variant \"{}\"", next_step.name)))?;
        lower_variant_step(row, name_path, sub_variant, next_step)?;
    }
    Ok(())
}

fn lower_variant(
    reg: &mut TableRegistry,
    table_name: &str,
    base_fields: &[Field],
    discriminant: &Field,
    variants: &[Variant],
    value: &Value,
    row: &mut Vec<(String, SqlValue)>,
) -> Result<()> {
    let (base, path) = match value {
        Value::Variant { base, path } => (base, path),
        _ => return Err(RpgxpError::Decode("expected a Variant value".to_owned())),
    };

    push_named_base_field(row, discriminant, base)?;
    for field in base_fields {
        push_named_base_field(row, field, base)?;
    }

    let first_step = path
        .first()
        .ok_or_else(|| RpgxpError::Decode("variant value has an empty path".to_owned()))?;
    let variant = variants
        .iter()
        .find(|v| v.name == first_step.name)
        .ok_or_else(|| RpgxpError::Decode(format!("unknown variant \"{}\" while lowering rows", first_step.name)))?;

    let mut leaf_row = row.clone();
    let mut name_path = vec![];
    lower_variant_step(&mut leaf_row, &mut name_path, variant, first_step)?;

    let leaf_table = format!("{table_name}_{}", name_path.join("_"));
    reg.push_row_pairs(&leaf_table, leaf_row);
    Ok(())
}

/// Lowers one `SingleFile`-wrapped file's decoded [`Value`] into its own
/// registry; the caller merges registries across files into the shared set
/// of tables.
pub fn lower_single_file(file_schema: &Schema, value: &Value) -> Result<TableRegistry> {
    let mut reg = TableRegistry::default();
    match file_schema {
        Schema::SingleFile { schema: inner, table_name, .. } => {
            lower_top_level(&mut reg, table_name, &[], inner, value)?;
        }
        _ => return Err(RpgxpError::Schema("expected a SingleFile schema".to_owned())),
    }
    Ok(reg)
}

/// Lowers one `MapNNN.rxdata` file, whose primary key comes from the
/// filename's captured id rather than from the decoded content itself.
pub fn lower_map_file(map_table: &str, inner_schema: &Schema, id_column: &str, id_value: i64, value: &Value) -> Result<TableRegistry> {
    let mut reg = TableRegistry::default();
    let fields = match inner_schema {
        Schema::Obj { fields, .. } => fields,
        _ => return Err(RpgxpError::Schema("a map file's inner schema must be an Obj".to_owned())),
    };
    let mut row = vec![(id_column.to_owned(), SqlValue::Int(id_value))];
    let pk_cols = vec![id_column.to_owned()];
    lower_obj_fields(&mut reg, map_table, &pk_cols, "", fields, value, &mut row)?;
    reg.push_row_pairs(map_table, row);
    Ok(reg)
}

fn lower_top_level(reg: &mut TableRegistry, table_name: &str, pk_cols: &[String], schema: &Schema, value: &Value) -> Result<()> {
    match schema {
        Schema::List { .. } | Schema::Set { .. } | Schema::Dict { .. } => {
            lower_table_kind_rows(reg, "", &[], &[], schema, value)?;
            // top-level table/set/dict schemas carry their own literal
            // table_name already; resolve_prefix_template is a no-op on a
            // literal name, so `table_name` is only used for error messages.
            let _ = table_name;
            Ok(())
        }
        Schema::Singleton { fields, .. } => {
            let mut row = vec![("id".to_owned(), SqlValue::Int(0))];
            let pk = vec!["id".to_owned()];
            lower_obj_fields(reg, table_name, &pk, "", fields, value, &mut row)?;
            reg.push_row_pairs(table_name, row);
            Ok(())
        }
        Schema::Obj { fields, .. } => {
            let mut row = vec![];
            lower_obj_fields(reg, table_name, pk_cols, "", fields, value, &mut row)?;
            reg.push_row_pairs(table_name, row);
            Ok(())
        }
        _ => Err(RpgxpError::Schema("unsupported top-level file schema kind".to_owned())),
    }
}
