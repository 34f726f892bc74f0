//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! A hand-rolled reader for Ruby's Marshal format (stable since version 4.8,
//! the version every RPG Maker XP `.rxdata` file is stamped with). The format
//! is a small, fully public, byte-tagged grammar; reproducing it directly
//! here keeps this decoder fully self-contained and auditable, rather than
//! depending on an external crate's exact `Value` shape we cannot pin down
//! without a network fetch.

use std::fs;
use std::path::Path;

use crate::error::{Result, RpgxpError};
use crate::marshal::node::{Node, StringEncoding};

const MARSHAL_MAJOR: u8 = 4;
const MARSHAL_MINOR: u8 = 8;

/// Parses a full Marshal byte stream (including its 2-byte version header)
/// into a [`Node`] tree.
pub fn parse(bytes: &[u8]) -> Result<Node> {
    let mut parser = Parser::new(bytes);
    parser.read_header()?;
    parser.read_value()
}

/// Reads `path` and parses it as a Marshal stream.
pub fn parse_file(path: &Path) -> Result<Node> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
    symbols: Vec<String>,
    /// The shared back-reference table for every "linkable" value (strings,
    /// arrays, hashes, objects, user-data, instance-variable wrappers).
    /// Symbols have their own table (`symbols`, above); everything else
    /// shares this one, indexed in registration order, matching Ruby's
    /// `marshal.c` link cache.
    links: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Parser {
            data,
            pos: 0,
            symbols: Vec::new(),
            links: Vec::new(),
        }
    }

    fn read_header(&mut self) -> Result<()> {
        let major = self.read_u8()?;
        let minor = self.read_u8()?;
        if major != MARSHAL_MAJOR || minor > MARSHAL_MINOR {
            return Err(RpgxpError::Decode(format!(
                "unsupported marshal version {major}.{minor}"
            )));
        }
        Ok(())
    }

    fn eof(&self) -> RpgxpError {
        RpgxpError::Decode("unexpected end of marshal stream".to_owned())
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.pos).ok_or_else(|| self.eof())?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| self.eof())?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Reads a Marshal "fixnum": a variable-length signed integer encoding.
    /// `0x00` is literal zero; bytes in `5..=127` (as a signed i8, `1..=122`)
    /// encode `byte - 5` directly; bytes in `-128..=-5` encode `byte + 5`;
    /// anything else gives the *count* of little-endian bytes to read next
    /// (positive count for a positive value, negative count for a value
    /// stored in two's-complement form).
    fn read_fixnum(&mut self) -> Result<i64> {
        let c = self.read_u8()? as i8;
        if c == 0 {
            return Ok(0);
        }
        if c > 4 {
            return Ok((c as i64) - 5);
        }
        if c < -4 {
            return Ok((c as i64) + 5);
        }

        let n = c.unsigned_abs() as usize;
        let mut result: i64 = if c < 0 { -1 } else { 0 };
        for i in 0..n {
            let byte = self.read_u8()? as i64;
            result = if c > 0 {
                result | (byte << (8 * i))
            } else {
                (result & !(0xffi64 << (8 * i))) | (byte << (8 * i))
            };
        }
        Ok(result)
    }

    fn read_symbol(&mut self) -> Result<String> {
        let tag = self.read_u8()?;
        match tag {
            b':' => {
                let len = self.read_fixnum()? as usize;
                let raw = self.read_bytes(len)?;
                let name = String::from_utf8_lossy(raw).into_owned();
                self.symbols.push(name.clone());
                Ok(name)
            }
            b';' => {
                let index = self.read_fixnum()? as usize;
                self.symbols
                    .get(index)
                    .cloned()
                    .ok_or_else(|| RpgxpError::Decode(format!("bad symbol link {index}")))
            }
            other => Err(RpgxpError::Decode(format!(
                "expected symbol, got tag {other:#04x}"
            ))),
        }
    }

    /// Reserves a link-table slot before recursing into a container's
    /// contents, so a self-referential back-reference within those contents
    /// resolves to *something* rather than panicking. RPG Maker data has no
    /// such cycles in practice; this is defensive, not load-bearing.
    fn reserve_link(&mut self) -> usize {
        self.links.push(Node::Nil);
        self.links.len() - 1
    }

    fn read_value(&mut self) -> Result<Node> {
        let tag = self.read_u8()?;
        match tag {
            b'0' => Ok(Node::Nil),
            b'T' => Ok(Node::Bool(true)),
            b'F' => Ok(Node::Bool(false)),
            b'i' => Ok(Node::Int(self.read_fixnum()?)),
            b'l' => self.read_bignum(),
            b'f' => self.read_float(),
            b':' => {
                let len = self.read_fixnum()? as usize;
                let raw = self.read_bytes(len)?;
                let name = String::from_utf8_lossy(raw).into_owned();
                self.symbols.push(name.clone());
                Ok(Node::Symbol(name))
            }
            b';' => {
                let index = self.read_fixnum()? as usize;
                let name = self
                    .symbols
                    .get(index)
                    .cloned()
                    .ok_or_else(|| RpgxpError::Decode(format!("bad symbol link {index}")))?;
                Ok(Node::Symbol(name))
            }
            b'"' => {
                let slot = self.reserve_link();
                let len = self.read_fixnum()? as usize;
                let raw = self.read_bytes(len)?.to_vec();
                let node = Node::Str {
                    raw,
                    encoding: StringEncoding::default(),
                };
                self.links[slot] = node.clone();
                Ok(node)
            }
            b'[' => {
                let slot = self.reserve_link();
                let count = self.read_fixnum()? as usize;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.read_value()?);
                }
                let node = Node::Array(items);
                self.links[slot] = node.clone();
                Ok(node)
            }
            b'{' | b'}' => {
                let slot = self.reserve_link();
                let count = self.read_fixnum()? as usize;
                let mut pairs = Vec::with_capacity(count);
                for _ in 0..count {
                    let key = self.read_value()?;
                    let value = self.read_value()?;
                    pairs.push((key, value));
                }
                if tag == b'}' {
                    // Hash-with-default: one trailing value node for the default.
                    self.read_value()?;
                }
                let node = Node::Hash(pairs);
                self.links[slot] = node.clone();
                Ok(node)
            }
            b'u' => {
                let slot = self.reserve_link();
                let class = self.read_symbol()?;
                let len = self.read_fixnum()? as usize;
                let bytes = self.read_bytes(len)?.to_vec();
                let node = Node::UserData { class, bytes };
                self.links[slot] = node.clone();
                Ok(node)
            }
            b'o' => {
                let slot = self.reserve_link();
                let class = self.read_symbol()?;
                let count = self.read_fixnum()? as usize;
                let mut ivars = Vec::with_capacity(count);
                for _ in 0..count {
                    let name = self.read_symbol()?;
                    let value = self.read_value()?;
                    ivars.push((name, value));
                }
                let node = Node::Object { class, ivars };
                self.links[slot] = node.clone();
                Ok(node)
            }
            b'I' => {
                let mut inner = self.read_value()?;
                let count = self.read_fixnum()? as usize;
                let mut encoding = None;
                for _ in 0..count {
                    let name = self.read_symbol()?;
                    let value = self.read_value()?;
                    match name.as_str() {
                        "E" => {
                            encoding = Some(if value.as_bool().unwrap_or(true) {
                                StringEncoding::Utf8
                            } else {
                                StringEncoding::Ascii8Bit
                            });
                        }
                        "encoding" => {
                            if let Some(name) = value.decoded_str() {
                                encoding = Some(match name.as_ref() {
                                    "UTF-8" => StringEncoding::Utf8,
                                    "Shift_JIS" | "SJIS" | "CP932" | "Windows-31J" => {
                                        StringEncoding::ShiftJis
                                    }
                                    _ => StringEncoding::Ascii8Bit,
                                });
                            }
                        }
                        _ => {}
                    }
                }
                if let (Node::Str { encoding: slot, .. }, Some(resolved)) =
                    (&mut inner, encoding)
                {
                    *slot = resolved;
                }
                Ok(inner)
            }
            b'@' => {
                let index = self.read_fixnum()? as usize;
                self.links
                    .get(index)
                    .cloned()
                    .ok_or_else(|| RpgxpError::Decode(format!("bad object link {index}")))
            }
            other => Err(RpgxpError::Decode(format!(
                "unsupported marshal tag {other:#04x} ({})",
                other as char
            ))),
        }
    }

    /// Ruby floats are marshaled as the length-prefixed ASCII text of
    /// `Float#to_s` (e.g. `"3.14"`, `"inf"`, `"-inf"`, `"nan"`).
    fn read_float(&mut self) -> Result<Node> {
        let slot = self.reserve_link();
        let len = self.read_fixnum()? as usize;
        let raw = self.read_bytes(len)?;
        let text = std::str::from_utf8(raw)
            .map_err(|e| RpgxpError::Decode(format!("non-utf8 float literal: {e}")))?;
        let value = match text {
            "inf" => f64::INFINITY,
            "-inf" => f64::NEG_INFINITY,
            "nan" => f64::NAN,
            other => other
                .parse::<f64>()
                .map_err(|e| RpgxpError::Decode(format!("bad float literal {other:?}: {e}")))?,
        };
        let node = Node::Float(value);
        self.links[slot] = node.clone();
        Ok(node)
    }

    /// Bignums are rare in RPG Maker data (no field in the schema needs more
    /// than 64 bits); we decode the sign + little-endian 16-bit word layout
    /// far enough to fit in an `i64` and error on anything larger.
    fn read_bignum(&mut self) -> Result<Node> {
        let slot = self.reserve_link();
        let sign = self.read_u8()?;
        let word_count = self.read_fixnum()? as usize;
        let mut value: i128 = 0;
        for i in 0..word_count {
            let lo = self.read_u8()? as i128;
            let hi = self.read_u8()? as i128;
            value |= (lo | (hi << 8)) << (16 * i);
        }
        if sign == b'-' {
            value = -value;
        }
        let value = i64::try_from(value)
            .map_err(|_| RpgxpError::Decode(format!("bignum {value} does not fit in i64")))?;
        let node = Node::Int(value);
        self.links[slot] = node.clone();
        Ok(node)
    }
}
