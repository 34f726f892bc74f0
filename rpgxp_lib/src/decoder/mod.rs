//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The schema-driven decoder: given a [`Schema`] node and a [`Node`],
//! produces a typed [`Value`] conforming to the schema's lowered type,
//! validating names, arities, ranges and discriminant tags along the way.
//!
//! In a language with build-time codegen, this would instead produce
//! instances of concrete generated per-file types. Nothing in this exercise
//! can run a build script, so [`Value`] plays that role directly: a single
//! dynamic tree shaped by the same [`Schema`] that describes it, which row
//! lowering then walks in lock-step. See `DESIGN.md` for why this
//! substitution is sound.

pub mod value;

#[cfg(test)]
mod decoder_test;

pub use value::{EnumValue, Value, VariantStep};

use encoding_rs::SHIFT_JIS;
use std::io::Read;

use crate::binary::table::NdTable;
use crate::error::{Result, RpgxpError};
use crate::marshal::{Node, StringEncoding};
use crate::schema::algebra::{FirstItemPolicy, IndexBehavior, KeyBehavior, Schema};

fn mismatch(schema: &Schema, node: &Node, path: &[String]) -> RpgxpError {
    RpgxpError::parse(schema.kind_name(), node.kind_name(), path)
}

/// Decodes `node` against `schema`, the schema-driven decoder's entry point.
pub fn decode(schema: &Schema, node: &Node, path: &mut Vec<String>) -> Result<Value> {
    match schema {
        Schema::Bool => match node {
            Node::Bool(b) => Ok(Value::Bool(*b)),
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::IntBool => match node {
            Node::Int(0) => Ok(Value::Bool(false)),
            Node::Int(1) => Ok(Value::Bool(true)),
            Node::Int(_) => Err(RpgxpError::parse("IntBool (0 or 1)", node.kind_name(), path)),
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::Int { lb, ub } => match node {
            Node::Int(i) => {
                if lb.is_some_and(|lb| *i < lb) || ub.is_some_and(|ub| *i > ub) {
                    return Err(RpgxpError::parse(
                        format!("Int in [{lb:?}, {ub:?}]"),
                        format!("{i}"),
                        path,
                    ));
                }
                Ok(Value::Int(*i))
            }
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::Float { lb, ub } => {
            let value = node.as_f64().ok_or_else(|| mismatch(schema, node, path))?;
            if lb.is_some_and(|lb| value < lb) || ub.is_some_and(|ub| value > ub) {
                return Err(RpgxpError::parse(
                    format!("Float in [{lb:?}, {ub:?}]"),
                    format!("{value}"),
                    path,
                ));
            }
            Ok(Value::Float(value))
        }

        Schema::Str => match node {
            Node::Str { .. } | Node::Symbol(_) => {
                Ok(Value::Str(node.decoded_str().unwrap().into_owned()))
            }
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::Zlib { encoding } => match node {
            Node::Str { raw, .. } => {
                let mut decompressed = vec![];
                flate2::read::ZlibDecoder::new(&raw[..])
                    .read_to_end(&mut decompressed)
                    .map_err(|e| RpgxpError::Decode(format!("zlib decompress failed: {e}")))?;
                let text = match encoding {
                    StringEncoding::Utf8 => String::from_utf8_lossy(&decompressed).into_owned(),
                    StringEncoding::ShiftJis => SHIFT_JIS.decode(&decompressed).0.into_owned(),
                    StringEncoding::Ascii8Bit => {
                        decompressed.iter().map(|&b| b as char).collect()
                    }
                };
                Ok(Value::Str(text))
            }
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::NdArray { dims } => match node {
            Node::UserData { class, bytes } if class == "Table" => {
                let table = NdTable::decode(bytes)?;
                table.reshape_to(*dims)?;
                Ok(Value::Blob(encode_ndtable(&table)))
            }
            Node::UserData { class, .. } => Err(RpgxpError::parse(
                "user_data(Table)",
                format!("user_data({class})"),
                path,
            )),
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::FourDoubles { class, bounds } => match node {
            Node::UserData { class: node_class, bytes } if node_class == class => {
                let four = crate::binary::table::FourDoubles::decode(bytes)?;
                let channels = [four.0, four.1, four.2, four.3];
                for (value, (lb, ub)) in channels.iter().zip(bounds.iter()) {
                    if *value < *lb || *value > *ub {
                        return Err(RpgxpError::parse(
                            format!("{class} channel in [{lb}, {ub}]"),
                            format!("{value}"),
                            path,
                        ));
                    }
                }
                Ok(Value::Obj(vec![
                    ("a".to_owned(), Value::Float(channels[0])),
                    ("b".to_owned(), Value::Float(channels[1])),
                    ("c".to_owned(), Value::Float(channels[2])),
                    ("d".to_owned(), Value::Float(channels[3])),
                ]))
            }
            Node::UserData { class: node_class, .. } => Err(RpgxpError::parse(
                format!("user_data({class})"),
                format!("user_data({node_class})"),
                path,
            )),
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::Enum { type_name, variants } => decode_enum(type_name, variants, node, path),

        Schema::MaterialRef { nullable, .. } => match node {
            Node::Str { .. } => {
                let s = node.decoded_str().unwrap().into_owned();
                if s.is_empty() && *nullable {
                    Ok(Value::Null)
                } else {
                    Ok(Value::Str(s))
                }
            }
            Node::Nil if *nullable => Ok(Value::Null),
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::Fk { nullable, .. } => match node {
            Node::Int(i) => {
                if *i == 0 && *nullable {
                    Ok(Value::Null)
                } else {
                    Ok(Value::Int(*i))
                }
            }
            Node::Str { .. } => {
                let s = node.decoded_str().unwrap().into_owned();
                if s.is_empty() && *nullable {
                    Ok(Value::Null)
                } else {
                    Ok(Value::Str(s))
                }
            }
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::Obj { class, fields } => decode_obj(class, fields, node, path),

        Schema::ArrayObj { class: _, fields } => match node {
            Node::Array(items) => {
                if items.len() != fields.len() {
                    return Err(RpgxpError::parse(
                        format!("array of {} fields", fields.len()),
                        format!("array of {}", items.len()),
                        path,
                    ));
                }
                let mut decoded = Vec::with_capacity(fields.len());
                for (field, item) in fields.iter().zip(items) {
                    path.push(field.name.clone());
                    decoded.push((field.name.clone(), decode(&field.schema, item, path)?));
                    path.pop();
                }
                Ok(Value::Obj(decoded))
            }
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::Singleton { class, fields } => decode_obj(class, fields, node, path),

        Schema::VariantObj {
            class,
            fields,
            discriminant,
            variants,
        } => decode_variant_obj(class, fields, discriminant, variants, node, path),

        Schema::List {
            item,
            first_item,
            index,
            ..
        } => decode_list(item, *first_item, index, node, path),

        Schema::Set { item, .. } => match node {
            Node::Array(items) => {
                let mut out: Vec<Value> = vec![];
                for (i, raw) in items.iter().enumerate() {
                    path.push(i.to_string());
                    let value = decode(item, raw, path)?;
                    path.pop();
                    if !out.contains(&value) {
                        out.push(value);
                    }
                }
                Ok(Value::List(out))
            }
            _ => Err(mismatch(schema, node, path)),
        },

        Schema::Dict { key, value, .. } => decode_dict(key, value, node, path),

        Schema::SingleFile { schema, .. } => decode(schema, node, path),

        Schema::MultiFile { schema, .. } => decode(schema, node, path),
    }
}

fn decode_enum(
    type_name: &str,
    variants: &crate::schema::algebra::EnumVariants,
    node: &Node,
    path: &[String],
) -> Result<Value> {
    use crate::schema::algebra::EnumVariants;
    match variants {
        EnumVariants::Int(pairs) => {
            let i = node
                .as_i64()
                .ok_or_else(|| RpgxpError::parse(format!("Enum({type_name})"), node.kind_name(), path))?;
            if pairs.iter().any(|(value, _)| *value as i64 == i) {
                Ok(Value::Enum(EnumValue::Int(i)))
            } else {
                Err(RpgxpError::parse(
                    format!("Enum({type_name}) value"),
                    format!("{i}"),
                    path,
                ))
            }
        }
        EnumVariants::Str(pairs) => {
            let s = node
                .decoded_str()
                .ok_or_else(|| RpgxpError::parse(format!("Enum({type_name})"), node.kind_name(), path))?;
            if pairs.iter().any(|(value, _)| *value == s) {
                Ok(Value::Enum(EnumValue::Str(s.into_owned())))
            } else {
                Err(RpgxpError::parse(
                    format!("Enum({type_name}) value"),
                    s.into_owned(),
                    path,
                ))
            }
        }
    }
}

fn decode_obj(
    class: &str,
    fields: &[crate::schema::algebra::Field],
    node: &Node,
    path: &mut Vec<String>,
) -> Result<Value> {
    match node {
        Node::Object {
            class: node_class,
            ivars,
        } => {
            if node_class != class {
                return Err(RpgxpError::parse(
                    format!("object({class})"),
                    format!("object({node_class})"),
                    path,
                ));
            }

            let mut expected: Vec<&str> = fields.iter().map(|f| f.rpg_name.as_str()).collect();
            expected.sort_unstable();
            let mut found: Vec<&str> = ivars.iter().map(|(n, _)| n.as_str()).collect();
            found.sort_unstable();
            if expected != found {
                return Err(RpgxpError::parse(
                    format!("ivars {expected:?}"),
                    format!("ivars {found:?}"),
                    path,
                ));
            }

            let mut decoded = Vec::with_capacity(fields.len());
            for field in fields {
                let raw = ivars
                    .iter()
                    .find(|(n, _)| n == &field.rpg_name)
                    .map(|(_, v)| v)
                    .expect("checked above that the ivar set matches exactly");
                path.push(field.name.clone());
                decoded.push((field.name.clone(), decode(&field.schema, raw, path)?));
                path.pop();
            }
            Ok(Value::Obj(decoded))
        }
        _ => Err(RpgxpError::parse(
            format!("object({class})"),
            node.kind_name(),
            path,
        )),
    }
}

/// `VariantObj` decode: decode the shared base
/// fields plus discriminant from named ivars, dispatch on the discriminant,
/// then walk `@parameters` positionally — recursing for `Complex` variants.
fn decode_variant_obj(
    class: &str,
    fields: &[crate::schema::algebra::Field],
    discriminant: &crate::schema::algebra::Field,
    variants: &[crate::schema::algebra::Variant],
    node: &Node,
    path: &mut Vec<String>,
) -> Result<Value> {
    let (node_class, ivars) = match node {
        Node::Object { class: c, ivars } if c == class => (c.as_str(), ivars),
        Node::Object { class: c, .. } => {
            return Err(RpgxpError::parse(
                format!("object({class})"),
                format!("object({c})"),
                path,
            ))
        }
        _ => return Err(RpgxpError::parse(format!("object({class})"), node.kind_name(), path)),
    };
    let _ = node_class;

    let find_ivar = |name: &str| -> Result<&Node> {
        ivars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| RpgxpError::Parse {
                expected: format!("ivar {name}"),
                found: "missing".to_owned(),
                path: path.clone(),
            })
    };

    path.push(discriminant.name.clone());
    let discriminant_node = find_ivar(&discriminant.rpg_name)?;
    let discriminant_value = decode(&discriminant.schema, discriminant_node, path)?;
    path.pop();
    let code = discriminant_value
        .as_discriminant_i64()
        .expect("discriminant schema must lower to an integer-compatible value");

    let mut base = vec![(discriminant.name.clone(), discriminant_value)];
    for field in fields {
        let raw = find_ivar(&field.rpg_name)?;
        path.push(field.name.clone());
        base.push((field.name.clone(), decode(&field.schema, raw, path)?));
        path.pop();
    }

    let variant = variants
        .iter()
        .find(|v| v.discriminant_value == code)
        .ok_or_else(|| {
            RpgxpError::parse(
                format!("known {} discriminant", discriminant.name),
                format!("{code}"),
                path,
            )
        })?;

    let parameters_node = find_ivar("@parameters")?;
    let parameters = parameters_node
        .as_array()
        .ok_or_else(|| RpgxpError::parse("array(@parameters)", parameters_node.kind_name(), path))?;

    let mut cursor = 0usize;
    let step = decode_variant_step(variant, parameters, &mut cursor, path)?;

    if cursor != parameters.len() {
        return Err(RpgxpError::parse(
            format!("@parameters of length {cursor}"),
            format!("length {}", parameters.len()),
            path,
        ));
    }

    Ok(Value::Variant {
        base,
        path: vec![step],
    })
}

/// Decodes one level of a (possibly `Complex`, i.e. recursive) variant's own
/// fields from the positional `parameters` slice, advancing `cursor`.
fn decode_variant_step(
    variant: &crate::schema::algebra::Variant,
    parameters: &[Node],
    cursor: &mut usize,
    path: &mut Vec<String>,
) -> Result<VariantStep> {
    path.push(variant.name.clone());
    let mut decoded_fields = Vec::with_capacity(variant.fields.len());
    for field in &variant.fields {
        let raw = parameters.get(*cursor).ok_or_else(|| {
            RpgxpError::parse(
                format!("parameter at index {cursor}"),
                "end of @parameters",
                path,
            )
        })?;
        path.push(field.name.clone());
        decoded_fields.push((field.name.clone(), decode(&field.schema, raw, path)?));
        path.pop();
        *cursor += 1;
    }

    let mut nested = vec![];
    if let Some(sub) = &variant.sub {
        let sub_code = decoded_fields
            .iter()
            .find(|(n, _)| n == &sub.discriminant_field)
            .and_then(|(_, v)| v.as_discriminant_i64())
            .ok_or_else(|| {
                RpgxpError::parse(format!("sub-discriminant {}", sub.discriminant_field), "missing", path)
            })?;

        let sub_variant = sub
            .variants
            .iter()
            .find(|v| v.discriminant_value == sub_code)
            .ok_or_else(|| {
                RpgxpError::parse(
                    format!("known {} sub-discriminant", sub.discriminant_field),
                    format!("{sub_code}"),
                    path,
                )
            })?;

        nested.push(decode_variant_step(sub_variant, parameters, cursor, path)?);
    }

    path.pop();
    Ok(VariantStep {
        name: variant.name.clone(),
        fields: decoded_fields,
        nested,
    })
}

fn decode_list(
    item: &Schema,
    first_item: FirstItemPolicy,
    index: &IndexBehavior,
    node: &Node,
    path: &mut Vec<String>,
) -> Result<Value> {
    let items = node
        .as_array()
        .ok_or_else(|| RpgxpError::parse("List", node.kind_name(), path))?;

    let start = match first_item {
        FirstItemPolicy::Regular => 0,
        FirstItemPolicy::Null => {
            match items.first() {
                Some(Node::Nil) => {}
                Some(other) => {
                    return Err(RpgxpError::parse("nil sentinel at index 0", other.kind_name(), path))
                }
                None => return Err(RpgxpError::parse("nil sentinel at index 0", "empty list", path)),
            }
            1
        }
        FirstItemPolicy::Blank => {
            match items.first() {
                Some(Node::Str { raw, .. }) if raw.is_empty() => {}
                Some(other) => {
                    return Err(RpgxpError::parse(
                        "empty string sentinel at index 0",
                        other.kind_name(),
                        path,
                    ))
                }
                None => {
                    return Err(RpgxpError::parse(
                        "empty string sentinel at index 0",
                        "empty list",
                        path,
                    ))
                }
            }
            1
        }
    };

    let mut out = vec![];
    for (logical_index, raw) in items.iter().enumerate().skip(start) {
        path.push(logical_index.to_string());
        let value = decode(item, raw, path)?;

        if let IndexBehavior::MatchIndexToField(field_name) = index {
            let actual = value.field(field_name).and_then(Value::as_discriminant_i64);
            if actual != Some(logical_index as i64) {
                path.pop();
                return Err(RpgxpError::parse(
                    format!("{field_name} == {logical_index}"),
                    format!("{field_name} == {actual:?}"),
                    path,
                ));
            }
        }

        out.push(value);
        path.pop();
    }

    Ok(Value::List(out))
}

fn decode_dict(key: &KeyBehavior, value_schema: &Schema, node: &Node, path: &mut Vec<String>) -> Result<Value> {
    let pairs = node
        .as_hash()
        .ok_or_else(|| RpgxpError::parse("Dict", node.kind_name(), path))?;

    let mut out = vec![];
    for (raw_key, raw_value) in pairs {
        let value = decode(value_schema, raw_value, path)?;

        let key_value = match key {
            KeyBehavior::AddKey(_, _) => decode_key_scalar(raw_key, path)?,
            KeyBehavior::MatchKeyToField(field_name) => {
                let key_value = decode_key_scalar(raw_key, path)?;
                let actual = value.field(field_name).and_then(Value::as_discriminant_i64);
                let expected = key_value.as_discriminant_i64();
                if actual != expected {
                    return Err(RpgxpError::parse(
                        format!("{field_name} == key"),
                        format!("{field_name} == {actual:?}, key == {expected:?}"),
                        path,
                    ));
                }
                key_value
            }
        };

        out.push((key_value, value));
    }

    Ok(Value::Dict(out))
}

fn decode_key_scalar(node: &Node, path: &[String]) -> Result<Value> {
    match node {
        Node::Int(i) => Ok(Value::Int(*i)),
        Node::Str { .. } | Node::Symbol(_) => Ok(Value::Str(node.decoded_str().unwrap().into_owned())),
        _ => Err(RpgxpError::parse("dict key (Int or Str)", node.kind_name(), path)),
    }
}

/// The standard n-d array BLOB encoding: three little-endian
/// `u32` dims followed by the flattened `i16` payload in the tensor's
/// original column-major order. This is the one encoding this decoder and
/// any downstream renderer must agree on.
pub fn encode_ndtable(table: &NdTable) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + table.values.len() * 2);
    out.extend((table.dims.0 as u32).to_le_bytes());
    out.extend((table.dims.1 as u32).to_le_bytes());
    out.extend((table.dims.2 as u32).to_le_bytes());
    for v in &table.values {
        out.extend(v.to_le_bytes());
    }
    out
}
