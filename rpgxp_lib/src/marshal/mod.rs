//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The Marshal-to-node decoder.
//!
//! RPG Maker XP ships its `Data/*.rxdata` files as Ruby `Marshal` dumps. This
//! module owns the one part of the pipeline that talks to that wire format:
//! it walks the byte stream described by Ruby's (stable, version-4.8) Marshal
//! format and materializes it as the generic tagged [`Node`] tree. Everything
//! above this module — the schema-driven decoder — only ever sees [`Node`],
//! never a raw byte.

pub mod node;
pub mod parser;

#[cfg(test)]
mod parser_test;

pub use node::{Node, StringEncoding};
pub use parser::{parse, parse_file};
