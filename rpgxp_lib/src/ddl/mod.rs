//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! DDL lowering: walks the schema tree once, producing one
//! [`TableSchema`] per table-kind node plus per-leaf-variant child tables,
//! per-enum lookup tables, and the asset inventory's own `material`/
//! `material_file` tables. Forward-referencing FKs are resolved in a second
//! pass once every table's primary key is known.

#[cfg(test)]
mod ddl_test;

use std::collections::{HashMap, HashSet};

use crate::error::{Result, RpgxpError};
use crate::schema::algebra::{ColumnType, EnumVariants, Field, IndexBehavior, KeyBehavior, Schema, Variant};
use crate::sql::{ColumnSchema, InsertStatement, Member, SqlValue, TableSchema};

/// The database view resolving asset shadowing at query time: the
/// highest-priority source, tie-broken by lexicographically smallest
/// extension, for each distinct material.
pub const MATERIAL_BEST_FILE_VIEW: &str = r#"DROP VIEW IF EXISTS "material_best_file";
CREATE VIEW "material_best_file" AS
SELECT mf.*
FROM "material_file" mf
JOIN (
    SELECT name, type, subtype,
           MAX(CASE source WHEN 'game' THEN 1 ELSE 0 END) AS best_priority
    FROM "material_file"
    GROUP BY name, type, subtype
) best ON mf.name = best.name AND mf.type = best.type AND mf.subtype = best.subtype
WHERE (CASE mf.source WHEN 'game' THEN 1 ELSE 0 END) = best.best_priority
  AND mf.extension = (
      SELECT MIN(mf2.extension)
      FROM "material_file" mf2
      WHERE mf2.name = mf.name AND mf2.type = mf.type AND mf2.subtype = mf.subtype
        AND (CASE mf2.source WHEN 'game' THEN 1 ELSE 0 END) = best.best_priority
  );"#;

struct PendingFk {
    table_idx: usize,
    member_idx: usize,
    target_table: String,
}

pub struct Ddl {
    tables: Vec<TableSchema>,
    table_index: HashMap<String, usize>,
    enum_tables: HashSet<&'static str>,
    pending_fks: Vec<PendingFk>,
    enum_seeds: Vec<InsertStatement>,
}

impl Ddl {
    fn new() -> Self {
        Ddl {
            tables: vec![],
            table_index: HashMap::new(),
            enum_tables: HashSet::new(),
            pending_fks: vec![],
            enum_seeds: vec![],
        }
    }

    fn new_table(&mut self, name: &str) -> Result<usize> {
        if self.table_index.contains_key(name) {
            return Err(RpgxpError::Schema(format!("duplicate table name \"{name}\"")));
        }
        let idx = self.tables.len();
        self.tables.push(TableSchema::new(name));
        self.table_index.insert(name.to_owned(), idx);
        Ok(idx)
    }

    fn current_pk(&self, idx: usize) -> Result<Vec<(String, ColumnType)>> {
        let cols: Vec<(String, ColumnType)> = self.tables[idx]
            .columns()
            .filter(|c| c.pk)
            .map(|c| (c.name.clone(), c.type_))
            .collect();
        if cols.is_empty() {
            return Err(RpgxpError::Schema(format!(
                "table \"{}\" has no primary key yet when building a nested table",
                self.tables[idx].name
            )));
        }
        Ok(cols)
    }

    fn inherit_parent_pk(&mut self, idx: usize, parent_pk: &[(String, ColumnType)]) {
        let n = parent_pk.len();
        let child_name = self.tables[idx].name.clone();
        for (i, (name, ty)) in parent_pk.iter().enumerate() {
            let col_name = if i + 1 == n {
                format!("{child_name}_{name}")
            } else {
                name.clone()
            };
            self.tables[idx].members.push(Member::Column(ColumnSchema {
                pk: true,
                ..ColumnSchema::new(col_name, *ty)
            }));
        }
    }

    fn mark_column_pk(&mut self, idx: usize, field_name: &str) -> Result<()> {
        for col in self.tables[idx].columns_mut() {
            if col.name == field_name {
                col.pk = true;
                return Ok(());
            }
        }
        Err(RpgxpError::Schema(format!(
            "field \"{field_name}\" named by MatchIndexToField/MatchKeyToField not found in table \"{}\"",
            self.tables[idx].name
        )))
    }

    fn register_material_tables(&mut self) -> Result<()> {
        let idx = self.new_table("material")?;
        for name in ["name", "type", "subtype"] {
            self.tables[idx].members.push(Member::Column(ColumnSchema {
                pk: true,
                ..ColumnSchema::new(name, ColumnType::Text)
            }));
        }

        let fidx = self.new_table("material_file")?;
        for name in ["name", "type", "subtype", "source", "extension"] {
            self.tables[fidx].members.push(Member::Column(ColumnSchema {
                pk: true,
                ..ColumnSchema::new(name, ColumnType::Text)
            }));
        }
        self.tables[fidx].members.push(Member::ForeignKey {
            columns: vec!["name".into(), "type".into(), "subtype".into()],
            referenced_table: "material".into(),
            referenced_columns: vec!["name".into(), "type".into(), "subtype".into()],
        });
        Ok(())
    }

    fn lower_file(&mut self, schema: &Schema) -> Result<()> {
        match schema {
            Schema::SingleFile { schema: inner, table_name, .. } => {
                self.lower_top_level(table_name, &[], inner)
            }
            Schema::MultiFile { table_name, keys, schema: inner, .. } => {
                let idx = self.new_table(table_name)?;
                for (name, ty) in keys {
                    self.tables[idx].members.push(Member::Column(ColumnSchema {
                        pk: true,
                        ..ColumnSchema::new(name, *ty)
                    }));
                }
                match inner.as_ref() {
                    Schema::Obj { fields, .. } => self.lower_fields(idx, "", fields),
                    _ => Err(RpgxpError::Schema(
                        "a MultiFile schema's inner schema must be an Obj".to_owned(),
                    )),
                }
            }
            _ => Err(RpgxpError::Schema(
                "a top-level file schema must be SingleFile or MultiFile".to_owned(),
            )),
        }
    }

    fn lower_top_level(&mut self, table_name: &str, parent_pk: &[(String, ColumnType)], schema: &Schema) -> Result<()> {
        match schema {
            Schema::List { .. } | Schema::Set { .. } | Schema::Dict { .. } => {
                self.lower_table_kind(table_name, parent_pk, schema)
            }
            Schema::Singleton { fields, .. } => {
                let idx = self.new_table(table_name)?;
                self.tables[idx].members.push(Member::Column(ColumnSchema {
                    pk: true,
                    default: Some("0".to_owned()),
                    check: Some("id = 0".to_owned()),
                    ..ColumnSchema::new("id", ColumnType::Integer)
                }));
                self.lower_fields(idx, "", fields)
            }
            Schema::Obj { fields, .. } => {
                let idx = self.new_table(table_name)?;
                self.inherit_parent_pk(idx, parent_pk);
                self.lower_fields(idx, "", fields)
            }
            _ => Err(RpgxpError::Schema(format!(
                "file schema \"{table_name}\" must be an Obj, Singleton, List, Set or Dict"
            ))),
        }
    }

    fn lower_table_kind(&mut self, table_name: &str, parent_pk: &[(String, ColumnType)], schema: &Schema) -> Result<()> {
        match schema {
            Schema::List { item, item_name, index, .. } => {
                let idx = self.new_table(table_name)?;
                self.inherit_parent_pk(idx, parent_pk);
                match index {
                    IndexBehavior::AddIndex(name) => {
                        self.tables[idx].members.push(Member::Column(ColumnSchema {
                            pk: true,
                            ..ColumnSchema::new(name, ColumnType::Integer)
                        }));
                        self.lower_item(idx, item, item_name.as_deref())
                    }
                    IndexBehavior::MatchIndexToField(field_name) => {
                        self.lower_item(idx, item, item_name.as_deref())?;
                        self.mark_column_pk(idx, field_name)
                    }
                }
            }
            Schema::Set { item, item_name, .. } => {
                let idx = self.new_table(table_name)?;
                self.inherit_parent_pk(idx, parent_pk);
                let before = self.tables[idx].members.len();
                self.lower_item(idx, item, item_name.as_deref())?;
                for member in &mut self.tables[idx].members[before..] {
                    if let Member::Column(c) = member {
                        c.pk = true;
                    }
                }
                Ok(())
            }
            Schema::Dict { key, value, .. } => {
                let idx = self.new_table(table_name)?;
                self.inherit_parent_pk(idx, parent_pk);
                match key {
                    KeyBehavior::AddKey(name, ty) => {
                        self.tables[idx].members.push(Member::Column(ColumnSchema {
                            pk: true,
                            ..ColumnSchema::new(name, *ty)
                        }));
                        self.lower_item(idx, value, None)
                    }
                    KeyBehavior::MatchKeyToField(field_name) => {
                        self.lower_item(idx, value, None)?;
                        self.mark_column_pk(idx, field_name)
                    }
                }
            }
            _ => Err(RpgxpError::Schema("expected a table-kind schema".to_owned())),
        }
    }

    fn lower_item(&mut self, idx: usize, item: &Schema, item_name: Option<&str>) -> Result<()> {
        match item {
            Schema::Obj { fields, .. } | Schema::ArrayObj { fields, .. } | Schema::Singleton { fields, .. } => {
                self.lower_fields(idx, "", fields)
            }
            Schema::VariantObj { fields, discriminant, variants, .. } => {
                self.lower_variant_obj(idx, fields, discriminant, variants)
            }
            _ => {
                let name = item_name.ok_or_else(|| {
                    RpgxpError::Schema("a scalar List/Set/Dict item needs an item_name".to_owned())
                })?;
                self.lower_scalar(idx, name, item)
            }
        }
    }

    fn lower_fields(&mut self, idx: usize, prefix: &str, fields: &[Field]) -> Result<()> {
        for field in fields {
            let col_name = format!("{prefix}{}", field.name);
            match &field.schema {
                Schema::Obj { fields: sub, .. } => {
                    self.lower_fields(idx, &format!("{col_name}_"), sub)?;
                }
                Schema::VariantObj { fields: base, discriminant, variants, .. } => {
                    self.lower_variant_obj(idx, base, discriminant, variants)?;
                }
                Schema::List { .. } | Schema::Set { .. } | Schema::Dict { .. } => {
                    let parent_pk = self.current_pk(idx)?;
                    let template = table_name_template(&field.schema).to_owned();
                    let table_name = resolve_prefix_template(&template, &self.tables[idx].name);
                    self.lower_table_kind(&table_name, &parent_pk, &field.schema)?;
                }
                other => self.lower_scalar(idx, &col_name, other)?,
            }
        }
        Ok(())
    }

    fn lower_variant_obj(&mut self, idx: usize, base_fields: &[Field], discriminant: &Field, variants: &[Variant]) -> Result<()> {
        let mut all_base = vec![discriminant.clone()];
        all_base.extend(base_fields.iter().cloned());
        self.lower_fields(idx, "", &all_base)?;

        let base_table_name = self.tables[idx].name.clone();
        for (name_path, fields_path) in collect_leaves(variants) {
            let variant_table_name = format!("{base_table_name}_{}", name_path.join("_"));
            let vidx = self.new_table(&variant_table_name)?;
            self.tables[vidx].members = self.tables[idx].members.clone();
            self.lower_fields(vidx, "", &fields_path)?;
        }
        Ok(())
    }

    fn lower_scalar(&mut self, idx: usize, col_name: &str, schema: &Schema) -> Result<()> {
        match schema {
            Schema::Bool | Schema::IntBool => {
                self.tables[idx].members.push(Member::Column(ColumnSchema {
                    check: Some(format!("\"{col_name}\" IN (0, 1)")),
                    ..ColumnSchema::new(col_name, ColumnType::Integer)
                }));
            }
            Schema::Int { lb, ub } => {
                self.tables[idx].members.push(Member::Column(ColumnSchema {
                    check: int_range_check(col_name, *lb, *ub),
                    ..ColumnSchema::new(col_name, ColumnType::Integer)
                }));
            }
            Schema::Float { lb, ub } => {
                self.tables[idx].members.push(Member::Column(ColumnSchema {
                    check: float_range_check(col_name, *lb, *ub),
                    ..ColumnSchema::new(col_name, ColumnType::Real)
                }));
            }
            Schema::Str | Schema::Zlib { .. } => {
                self.tables[idx].members.push(Member::Column(ColumnSchema::new(col_name, ColumnType::Text)));
            }
            Schema::NdArray { .. } => {
                self.tables[idx].members.push(Member::Column(ColumnSchema::new(col_name, ColumnType::Blob)));
            }
            Schema::FourDoubles { bounds, .. } => {
                for (suffix, (lb, ub)) in ["a", "b", "c", "d"].iter().zip(bounds.iter()) {
                    let name = format!("{col_name}_{suffix}");
                    self.tables[idx].members.push(Member::Column(ColumnSchema {
                        check: Some(format!("\"{name}\" BETWEEN {lb} AND {ub}")),
                        ..ColumnSchema::new(name, ColumnType::Real)
                    }));
                }
            }
            Schema::Enum { type_name, variants } => {
                self.ensure_enum_table(type_name, *variants)?;
                let enum_table = to_snake_case(type_name);
                let pk_type = self.tables[self.table_index[&enum_table]]
                    .columns()
                    .find(|c| c.pk)
                    .expect("enum lookup tables always declare a pk")
                    .type_;
                self.tables[idx].members.push(Member::Column(ColumnSchema {
                    references: Some((enum_table, "id".to_owned())),
                    ..ColumnSchema::new(col_name, pk_type)
                }));
            }
            Schema::MaterialRef { material_type, subtype, nullable, enforce } => {
                self.tables[idx].members.push(Member::Column(ColumnSchema {
                    nullable: *nullable,
                    ..ColumnSchema::new(col_name, ColumnType::Text)
                }));
                if *enforce {
                    let type_col = format!("{col_name}_type");
                    let subtype_col = format!("{col_name}_subtype");
                    self.tables[idx].members.push(Member::Column(ColumnSchema {
                        generated: Some(format!("'{}'", material_type.db_name())),
                        ..ColumnSchema::new(&type_col, ColumnType::Text)
                    }));
                    self.tables[idx].members.push(Member::Column(ColumnSchema {
                        generated: Some(format!("'{}'", subtype.db_name())),
                        ..ColumnSchema::new(&subtype_col, ColumnType::Text)
                    }));
                    self.tables[idx].members.push(Member::ForeignKey {
                        columns: vec![col_name.to_owned(), type_col, subtype_col],
                        referenced_table: "material".to_owned(),
                        referenced_columns: vec!["name".into(), "type".into(), "subtype".into()],
                    });
                }
            }
            Schema::Fk { target_table, nullable } => {
                let member_idx = self.tables[idx].members.len();
                self.tables[idx].members.push(Member::Column(ColumnSchema {
                    nullable: *nullable,
                    ..ColumnSchema::new(col_name, ColumnType::Integer)
                }));
                self.pending_fks.push(PendingFk {
                    table_idx: idx,
                    member_idx,
                    target_table: target_table.clone(),
                });
            }
            other => {
                return Err(RpgxpError::Schema(format!(
                    "schema kind {} cannot be lowered as a row cell",
                    other.kind_name()
                )))
            }
        }
        Ok(())
    }

    /// Direction's `0` sentinel decodes successfully (see `common::Direction`)
    /// but isn't a real facing, so it's excluded from the seeded lookup rows
    /// even though it's accepted by decode validation.
    fn seed_rows_for(type_name: &'static str, variants: EnumVariants) -> EnumVariants {
        if type_name == "Direction" {
            EnumVariants::Int(crate::common::Direction::SEED_VARIANTS)
        } else {
            variants
        }
    }

    fn ensure_enum_table(&mut self, type_name: &'static str, variants: EnumVariants) -> Result<()> {
        if self.enum_tables.contains(type_name) {
            return Ok(());
        }
        self.enum_tables.insert(type_name);

        let table_name = to_snake_case(type_name);
        let idx = self.new_table(&table_name)?;
        let seed = Self::seed_rows_for(type_name, variants);

        match seed {
            EnumVariants::Int(pairs) => {
                self.tables[idx].members.push(Member::Column(ColumnSchema {
                    pk: true,
                    ..ColumnSchema::new("id", ColumnType::Integer)
                }));
                self.tables[idx].members.push(Member::Column(ColumnSchema::new("name", ColumnType::Text)));
                let rows = pairs
                    .iter()
                    .map(|(value, name)| vec![SqlValue::Int(*value as i64), SqlValue::Text((*name).to_owned())])
                    .collect();
                self.enum_seeds.push(InsertStatement {
                    table_name,
                    columns: vec!["id".to_owned(), "name".to_owned()],
                    rows,
                });
            }
            EnumVariants::Str(pairs) => {
                self.tables[idx].members.push(Member::Column(ColumnSchema {
                    pk: true,
                    ..ColumnSchema::new("id", ColumnType::Text)
                }));
                self.tables[idx].members.push(Member::Column(ColumnSchema::new("name", ColumnType::Text)));
                let rows = pairs
                    .iter()
                    .map(|(value, name)| vec![SqlValue::Text((*value).to_owned()), SqlValue::Text((*name).to_owned())])
                    .collect();
                self.enum_seeds.push(InsertStatement {
                    table_name,
                    columns: vec!["id".to_owned(), "name".to_owned()],
                    rows,
                });
            }
        }
        Ok(())
    }

    fn resolve_fks(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_fks);
        for pf in pending {
            let target_idx = *self.table_index.get(&pf.target_table).ok_or_else(|| {
                RpgxpError::Schema(format!("FK target table \"{}\" not found", pf.target_table))
            })?;
            let (pk_name, pk_type) = {
                let target_pk: Vec<&ColumnSchema> = self.tables[target_idx].columns().filter(|c| c.pk).collect();
                if target_pk.len() != 1 {
                    return Err(RpgxpError::Schema(format!(
                        "FK target \"{}\" must have a single-column primary key",
                        pf.target_table
                    )));
                }
                (target_pk[0].name.clone(), target_pk[0].type_)
            };
            if let Member::Column(col) = &mut self.tables[pf.table_idx].members[pf.member_idx] {
                col.type_ = pk_type;
                col.references = Some((pf.target_table, pk_name));
            }
        }
        Ok(())
    }
}

fn collect_leaves(variants: &[Variant]) -> Vec<(Vec<String>, Vec<Field>)> {
    let mut out = vec![];
    for variant in variants {
        match &variant.sub {
            None => out.push((vec![variant.name.clone()], variant.fields.clone())),
            Some(sub) => {
                for (sub_path, sub_fields) in collect_leaves(&sub.variants) {
                    let mut path = vec![variant.name.clone()];
                    path.extend(sub_path);
                    let mut fields = variant.fields.clone();
                    fields.extend(sub_fields);
                    out.push((path, fields));
                }
            }
        }
    }
    out
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

fn int_range_check(col: &str, lb: Option<i64>, ub: Option<i64>) -> Option<String> {
    match (lb, ub) {
        (Some(lb), Some(ub)) => Some(format!("\"{col}\" BETWEEN {lb} AND {ub}")),
        (Some(lb), None) => Some(format!("\"{col}\" >= {lb}")),
        (None, Some(ub)) => Some(format!("\"{col}\" <= {ub}")),
        (None, None) => None,
    }
}

fn float_range_check(col: &str, lb: Option<f64>, ub: Option<f64>) -> Option<String> {
    match (lb, ub) {
        (Some(lb), Some(ub)) => Some(format!("\"{col}\" BETWEEN {lb} AND {ub}")),
        (Some(lb), None) => Some(format!("\"{col}\" >= {lb}")),
        (None, Some(ub)) => Some(format!("\"{col}\" <= {ub}")),
        (None, None) => None,
    }
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Result of lowering the whole schema: every table in declaration order,
/// plus the enum lookup tables' seed rows.
pub struct DdlResult {
    pub tables: Vec<TableSchema>,
    pub enum_seeds: Vec<InsertStatement>,
}

impl DdlResult {
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Renders every `CREATE TABLE`, the enum seed `INSERT`s, and the
    /// `material_best_file` view as one script.
    pub fn to_script(&self) -> Result<crate::sql::Script> {
        let mut script = crate::sql::Script::default();
        for table in &self.tables {
            script.push(table.to_sql()?);
        }
        for seed in &self.enum_seeds {
            script.push(seed.to_string());
        }
        script.push(MATERIAL_BEST_FILE_VIEW.to_owned());
        Ok(script)
    }
}

/// Lowers every top-level file schema into DDL.
pub fn build(files: &[Schema]) -> Result<DdlResult> {
    let mut ddl = Ddl::new();
    ddl.register_material_tables()?;
    for schema in files {
        ddl.lower_file(schema)?;
    }
    ddl.resolve_fks()?;
    Ok(DdlResult {
        tables: ddl.tables,
        enum_seeds: ddl.enum_seeds,
    })
}
