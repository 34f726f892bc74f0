//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The dynamic value tree the decoder produces. One [`Value`] shape mirrors
//! one [`crate::schema::algebra::Schema`] shape; row lowering walks both in
//! lock-step.

/// An enum value as decoded: either the source integer or the source
/// string, whichever the enum's [`crate::schema::algebra::EnumVariants`]
/// used. Row lowering uses this directly as a foreign key into the enum's
/// seeded lookup table.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumValue {
    Int(i64),
    Str(String),
}

/// One level of a decoded discriminated union: the variant's own name (used
/// to pick its leaf DDL table) plus its fields, plus — for `Complex`
/// variants — the next level down.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantStep {
    pub name: String,
    pub fields: Vec<(String, Value)>,
    pub nested: Vec<VariantStep>,
}

/// The schema-driven decoder's output, a dynamic stand-in for what a
/// build-time class generator would otherwise emit as concrete per-file
/// Rust types. See the module doc comment on `crate::decoder` for why.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Blob(Vec<u8>),
    Enum(EnumValue),
    /// An `Obj`/`ArrayObj`/`Singleton` instance: ordered `(field name, value)` pairs.
    Obj(Vec<(String, Value)>),
    /// A `VariantObj` instance: shared base fields plus the chain of variant
    /// levels chosen by the discriminant (length 1 for `Simple`, more for
    /// recursive `Complex` variants).
    Variant {
        base: Vec<(String, Value)>,
        path: Vec<VariantStep>,
    },
    List(Vec<Value>),
    Dict(Vec<(Value, Value)>),
}

impl Value {
    /// Looks up a named field on an `Obj` or the base fields of a `Variant`
    /// value, used by `MatchIndexToField`/`MatchKeyToField` validation.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Obj(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            Value::Variant { base, .. } => base.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Reads this value as the integer a discriminant or index comparison
    /// needs — `Int` directly, or an `Enum`'s underlying integer code.
    pub fn as_discriminant_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Enum(EnumValue::Int(i)) => Some(*i),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }
}
