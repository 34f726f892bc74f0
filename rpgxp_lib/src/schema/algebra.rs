//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The schema node algebra itself. Every other pipeline
//! component — the schema-driven decoder, the DDL lowering, the row
//! lowering — is a pattern-match over [`Schema`].

use crate::marshal::StringEncoding;
use crate::material::{MaterialSubtype, MaterialType};

/// The SQL column type a scalar schema kind lowers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
}

/// RPG Maker's convention of using array index 0 as a sentinel in
/// id-indexed arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstItemPolicy {
    /// Index from 0; every element is real data.
    Regular,
    /// The first element must be `nil`; real data starts at index 1.
    Null,
    /// The first element must be an empty string; real data starts at index 1.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBehavior {
    AddIndex(String),
    MatchIndexToField(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyBehavior {
    AddKey(String, ColumnType),
    MatchKeyToField(String),
}

/// A single field of an [`Schema::Obj`]/[`Schema::ArrayObj`]/[`Schema::VariantObj`]/
/// [`Schema::Singleton`].
#[derive(Debug, Clone)]
pub struct Field {
    /// The in-memory / DB column name.
    pub name: String,
    /// The name the value is stored under in the source: an `@`-prefixed
    /// instance-variable name for [`Schema::Obj`]/[`Schema::VariantObj`]/
    /// [`Schema::Singleton`] fields, ignored (purely positional) for
    /// [`Schema::ArrayObj`] fields and `Simple` variant fields.
    pub rpg_name: String,
    pub schema: Schema,
}

impl Field {
    pub fn new(name: impl Into<String>, rpg_name: impl Into<String>, schema: Schema) -> Self {
        Field {
            name: name.into(),
            rpg_name: rpg_name.into(),
            schema,
        }
    }

    /// A field whose `rpg_name` is simply `@` + its own name — the common case.
    pub fn plain(name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        let rpg_name = format!("@{name}");
        Field {
            name,
            rpg_name,
            schema,
        }
    }
}

/// A single case of a [`Schema::VariantObj`] discriminated union.
#[derive(Debug, Clone)]
pub struct Variant {
    pub discriminant_value: i64,
    /// Used to derive both the variant's DDL table name
    /// (`<parent>_<variant_snake>`) and its generated type name.
    pub name: String,
    pub fields: Vec<Field>,
    /// `Complex` variants recurse into a further discriminated union, keyed
    /// by one of `fields`. `Simple` variants are `kind == None`.
    pub sub: Option<SubVariants>,
}

#[derive(Debug, Clone)]
pub struct SubVariants {
    /// Name of the field (within this variant's own `fields`) that carries
    /// the sub-discriminant value.
    pub discriminant_field: String,
    pub variants: Vec<Variant>,
}

/// Every schema node kind from the table, verbatim.
#[derive(Debug, Clone)]
pub enum Schema {
    Bool,
    /// Boolean stored as a source integer 0/1 rather than Marshal's native
    /// `true`/`false` tags.
    IntBool,
    Int {
        lb: Option<i64>,
        ub: Option<i64>,
    },
    Float {
        lb: Option<f64>,
        ub: Option<f64>,
    },
    Str,
    Zlib {
        encoding: StringEncoding,
    },
    NdArray {
        dims: usize,
    },
    /// A `Color` or `Tone` user-data payload: four little-endian
    /// doubles, with per-channel bounds that differ between the two classes.
    FourDoubles {
        class: &'static str,
        bounds: [(f64, f64); 4],
    },
    Enum {
        /// The enum's `camel_case` Rust type name; its `snake_case` form
        /// names the seeded lookup table.
        type_name: &'static str,
        variants: EnumVariants,
    },
    MaterialRef {
        material_type: MaterialType,
        subtype: MaterialSubtype,
        nullable: bool,
        enforce: bool,
    },
    Fk {
        /// The target table's name, resolved against the DDL lowering's
        /// table registry. The target may not exist yet at the point this
        /// field is lowered, so resolution happens lazily via a thunk.
        target_table: String,
        nullable: bool,
    },
    Obj {
        class: &'static str,
        fields: Vec<Field>,
    },
    VariantObj {
        class: &'static str,
        /// Shared base fields decoded from named instance variables (e.g.
        /// `@indent`), in addition to `discriminant` itself.
        fields: Vec<Field>,
        /// The base field that selects which `variants` entry applies,
        /// decoded from its own named instance variable (e.g. `@code`).
        discriminant: Field,
        variants: Vec<Variant>,
    },
    ArrayObj {
        class: &'static str,
        fields: Vec<Field>,
    },
    Singleton {
        class: &'static str,
        fields: Vec<Field>,
    },
    List {
        item: Box<Schema>,
        /// The single value column's name, when `item` is itself a scalar
        /// (not an `Obj`/`VariantObj`/`ArrayObj`, which contribute their own
        /// named columns). `None` for object-shaped items.
        item_name: Option<String>,
        first_item: FirstItemPolicy,
        index: IndexBehavior,
        table_name: String,
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    Set {
        item: Box<Schema>,
        item_name: Option<String>,
        table_name: String,
    },
    Dict {
        key: KeyBehavior,
        value: Box<Schema>,
        table_name: String,
    },
    SingleFile {
        filename: &'static str,
        schema: Box<Schema>,
        table_name: String,
    },
    MultiFile {
        /// Regex pattern; capture groups become the top-level table's key columns.
        pattern: String,
        table_name: String,
        keys: Vec<(String, ColumnType)>,
        schema: Box<Schema>,
    },
}

/// Either the `(i32, name)` seed rows of an ordinary enum, or the
/// `(&str, name)` seed rows of a string-valued enum like `SelfSwitch`.
#[derive(Debug, Clone, Copy)]
pub enum EnumVariants {
    Int(&'static [(i32, &'static str)]),
    Str(&'static [(&'static str, &'static str)]),
}

impl Schema {
    /// A human-readable name for this schema kind, used in `ParseError` messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Schema::Bool => "Bool",
            Schema::IntBool => "IntBool",
            Schema::Int { .. } => "Int",
            Schema::Float { .. } => "Float",
            Schema::Str => "Str",
            Schema::Zlib { .. } => "Zlib",
            Schema::NdArray { .. } => "NDArray",
            Schema::FourDoubles { .. } => "FourDoubles",
            Schema::Enum { .. } => "Enum",
            Schema::MaterialRef { .. } => "MaterialRef",
            Schema::Fk { .. } => "FK",
            Schema::Obj { .. } => "Obj",
            Schema::VariantObj { .. } => "VariantObj",
            Schema::ArrayObj { .. } => "ArrayObj",
            Schema::Singleton { .. } => "Singleton",
            Schema::List { .. } => "List",
            Schema::Set { .. } => "Set",
            Schema::Dict { .. } => "Dict",
            Schema::SingleFile { .. } => "SingleFile",
            Schema::MultiFile { .. } => "MultiFile",
        }
    }

    /// Whether this schema kind describes a whole table of its own (as
    /// opposed to contributing columns to the table its parent describes).
    pub fn is_table_kind(&self) -> bool {
        matches!(
            self,
            Schema::List { .. } | Schema::Set { .. } | Schema::Dict { .. }
        )
    }
}

/// Convenience constructors mirroring the original Python implementation's
/// terse `id_field()`/`many_fields()`/`enum_field()`/`fk_field()` builder
/// helpers, adapted into free functions over [`Field`]
/// and [`Schema`] rather than copied verbatim.
pub mod build {
    use super::*;

    pub fn int(lb: Option<i64>, ub: Option<i64>) -> Schema {
        Schema::Int { lb, ub }
    }

    pub fn id_field() -> Field {
        Field::plain("id", Schema::Int { lb: Some(0), ub: None })
    }

    pub fn str_field(name: &str) -> Field {
        Field::plain(name, Schema::Str)
    }

    pub fn bool_field(name: &str) -> Field {
        Field::plain(name, Schema::Bool)
    }

    pub fn enum_field(name: &str, type_name: &'static str, variants: EnumVariants) -> Field {
        Field::plain(name, Schema::Enum { type_name, variants })
    }

    pub fn int_field(name: &str) -> Field {
        Field::plain(name, Schema::Int { lb: None, ub: None })
    }

    pub fn float_field(name: &str) -> Field {
        Field::plain(name, Schema::Float { lb: None, ub: None })
    }

    /// Space-separated shorthand for a run of plain int fields, mirroring
    /// the original's `int_fields("a b c")`.
    pub fn int_fields(names: &str) -> Vec<Field> {
        names.split_whitespace().map(int_field).collect()
    }

    pub fn bool_fields(names: &str) -> Vec<Field> {
        names.split_whitespace().map(bool_field).collect()
    }

    pub fn str_fields(names: &str) -> Vec<Field> {
        names.split_whitespace().map(str_field).collect()
    }

    pub fn fk_field(name: &str, target_table: &str, nullable: bool) -> Field {
        Field::plain(
            name,
            Schema::Fk {
                target_table: target_table.to_owned(),
                nullable,
            },
        )
    }

    pub fn material_field(
        name: &str,
        material_type: MaterialType,
        subtype: MaterialSubtype,
        nullable: bool,
        enforce: bool,
    ) -> Field {
        Field::plain(
            name,
            Schema::MaterialRef {
                material_type,
                subtype,
                nullable,
                enforce,
            },
        )
    }

    pub fn color_field(name: &str) -> Field {
        Field::plain(
            name,
            Schema::FourDoubles {
                class: "Color",
                bounds: [(0.0, 255.0), (0.0, 255.0), (0.0, 255.0), (0.0, 255.0)],
            },
        )
    }

    pub fn tone_field(name: &str) -> Field {
        Field::plain(
            name,
            Schema::FourDoubles {
                class: "Tone",
                bounds: [(-255.0, 255.0), (-255.0, 255.0), (-255.0, 255.0), (0.0, 255.0)],
            },
        )
    }

    /// A list table nested under a parent's `${prefix}`: `table_name` is a
    /// literal suffix appended to `${prefix}_`, resolved against the
    /// concrete parent table at DDL time.
    pub fn many_field(
        name: &str,
        table_suffix: &str,
        item: Schema,
        item_name: Option<&str>,
        first_item: FirstItemPolicy,
        index: IndexBehavior,
    ) -> Field {
        Field::plain(
            name,
            Schema::List {
                item: Box::new(item),
                item_name: item_name.map(str::to_owned),
                first_item,
                index,
                table_name: format!("${{prefix}}_{table_suffix}"),
                min_len: None,
                max_len: None,
            },
        )
    }

    /// A top-level (literally named, not `${prefix}`-templated) list field.
    pub fn list_field(
        name: &str,
        table_name: &str,
        item: Schema,
        item_name: Option<&str>,
        first_item: FirstItemPolicy,
        index: IndexBehavior,
    ) -> Field {
        Field::plain(
            name,
            Schema::List {
                item: Box::new(item),
                item_name: item_name.map(str::to_owned),
                first_item,
                index,
                table_name: table_name.to_owned(),
                min_len: None,
                max_len: None,
            },
        )
    }

    pub fn set_field(name: &str, table_suffix: &str, item: Schema, item_name: Option<&str>) -> Field {
        Field::plain(
            name,
            Schema::Set {
                item: Box::new(item),
                item_name: item_name.map(str::to_owned),
                table_name: format!("${{prefix}}_{table_suffix}"),
            },
        )
    }

    pub fn dict_field(name: &str, table_name: &str, key: KeyBehavior, value: Schema) -> Field {
        Field::plain(
            name,
            Schema::Dict {
                key,
                value: Box::new(value),
                table_name: table_name.to_owned(),
            },
        )
    }

    /// A top-level named list, e.g. `ACTORS_SCHEMA`: a standalone `Schema`
    /// rather than a `Field`, since top-level file schemas aren't fields of
    /// anything.
    pub fn list(
        table_name: &str,
        item: Schema,
        item_name: Option<&str>,
        first_item: FirstItemPolicy,
        index: IndexBehavior,
    ) -> Schema {
        Schema::List {
            item: Box::new(item),
            item_name: item_name.map(str::to_owned),
            first_item,
            index,
            table_name: table_name.to_owned(),
            min_len: None,
            max_len: None,
        }
    }

    pub fn dict(table_name: &str, key: KeyBehavior, value: Schema) -> Schema {
        Schema::Dict {
            key,
            value: Box::new(value),
            table_name: table_name.to_owned(),
        }
    }

    pub fn single_file(filename: &'static str, table_name: &str, schema: Schema) -> Schema {
        Schema::SingleFile {
            filename,
            schema: Box::new(schema),
            table_name: table_name.to_owned(),
        }
    }

    pub fn multi_file(
        pattern: &str,
        table_name: &str,
        keys: Vec<(String, ColumnType)>,
        schema: Schema,
    ) -> Schema {
        Schema::MultiFile {
            pattern: pattern.to_owned(),
            table_name: table_name.to_owned(),
            keys,
            schema: Box::new(schema),
        }
    }
}
