//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! This module contains the [`ReadBytes`] trait, plus the two "user data"
//! payload shapes the Marshal decoder hands us as opaque byte blobs: the
//! n-dimensional `Table` tensor and the four-double `Color`/`Tone` payload.

pub mod reader;
pub mod table;

#[cfg(test)] mod reader_test;
#[cfg(test)] mod table_test;

pub use reader::ReadBytes;
pub use table::NdTable;
