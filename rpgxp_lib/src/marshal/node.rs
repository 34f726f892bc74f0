//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The generic tagged node tree a Marshal stream decodes to.

use std::borrow::Cow;

/// The source encoding tag carried by a Marshal string, used to decide how
/// [`Node::decoded_str`] turns `raw` bytes into a Rust [`String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    Utf8,
    Ascii8Bit,
    ShiftJis,
}

impl Default for StringEncoding {
    fn default() -> Self {
        // Ruby's `String#force_encoding` default for an un-annotated literal;
        // this is also what `_dump`-style strings (script bodies) carry.
        StringEncoding::Ascii8Bit
    }
}

/// A single node of the tree a Marshal byte stream decodes to.
///
/// References inside a Marshal stream may be shared (object/string/array/hash
/// back-references); this decoder resolves them by deep-copy rather than
/// building a true DAG, which states the schema-driven decoder
/// tolerates.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str {
        raw: Vec<u8>,
        encoding: StringEncoding,
    },
    Symbol(String),
    Array(Vec<Node>),
    /// An ordered sequence of key/value pairs, not a `HashMap`: Marshal hashes
    /// preserve insertion order and RPG Maker relies on it nowhere we care
    /// about, but nothing forces us to throw it away either.
    Hash(Vec<(Node, Node)>),
    UserData {
        class: String,
        bytes: Vec<u8>,
    },
    Object {
        class: String,
        /// Instance variables in declaration order, keys including the
        /// leading `@` (e.g. `@id`), matching the guarantee.
        ivars: Vec<(String, Node)>,
    },
}

impl Node {
    /// A short, human-readable name for this node's kind, used in
    /// [`crate::error::RpgxpError::Parse`] messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Nil => "nil",
            Node::Bool(_) => "bool",
            Node::Int(_) => "integer",
            Node::Float(_) => "float",
            Node::Str { .. } => "string",
            Node::Symbol(_) => "symbol",
            Node::Array(_) => "array",
            Node::Hash(_) => "hash",
            Node::UserData { .. } => "user_data",
            Node::Object { .. } => "object",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            Node::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_raw_str(&self) -> Option<&[u8]> {
        match self {
            Node::Str { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Decodes a string node's raw bytes per its source encoding tag: string
    /// nodes expose both the raw bytes and a decoded form honoring the
    /// embedded encoding tag.
    pub fn decoded_str(&self) -> Option<Cow<'_, str>> {
        match self {
            Node::Str { raw, encoding } => Some(match encoding {
                StringEncoding::Utf8 => String::from_utf8_lossy(raw),
                StringEncoding::Ascii8Bit => raw.iter().map(|&b| b as char).collect::<String>().into(),
                StringEncoding::ShiftJis => {
                    let (decoded, _, _) = encoding_rs::SHIFT_JIS.decode(raw);
                    decoded.into_owned().into()
                }
            }),
            Node::Symbol(s) => Some(Cow::Borrowed(s.as_str())),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Node::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&[(Node, Node)]> {
        match self {
            Node::Hash(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_user_data(&self) -> Option<(&str, &[u8])> {
        match self {
            Node::UserData { class, bytes } => Some((class, bytes)),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<(&str, &[(String, Node)])> {
        match self {
            Node::Object { class, ivars } => Some((class, ivars)),
            _ => None,
        }
    }

    /// Looks up an instance variable by its `@`-prefixed name on an `Object` node.
    pub fn ivar(&self, name: &str) -> Option<&Node> {
        match self {
            Node::Object { ivars, .. } => ivars.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}
