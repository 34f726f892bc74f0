//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The `Table` user-data payload: a packed n-dimensional `i16` tensor.
//! RPG Maker XP uses this class for map tile layers and tileset passability
//! data; the schema's `NDArray(d)` kind reshapes it to `d` logical
//! dimensions and stores it as an opaque BLOB downstream.

use std::io::Cursor;

use crate::binary::ReadBytes;
use crate::error::{Result, RpgxpError};

/// A decoded `Table` tensor, still in its column-major ("Fortran") source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdTable {
    pub dims: (usize, usize, usize),
    pub values: Vec<i16>,
}

impl NdTable {
    /// Parses the raw `Table` payload: five little-endian `i32`s
    /// `(dim_count, dim1, dim2, dim3, total_count)` followed by `total_count`
    /// little-endian `i16`s.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);

        let dim_count = cursor.read_i32()?;
        let dim1 = cursor.read_i32()?;
        let dim2 = cursor.read_i32()?;
        let dim3 = cursor.read_i32()?;
        let total_count = cursor.read_i32()?;

        if !(1..=3).contains(&dim_count) {
            return Err(RpgxpError::Decode(format!(
                "Table dim_count must be 1, 2 or 3, got {dim_count}"
            )));
        }

        let (dim1, dim2, dim3) = (dim1 as usize, dim2 as usize, dim3 as usize);

        if dim1 * dim2 * dim3 != total_count as usize {
            return Err(RpgxpError::Decode(format!(
                "Table total_count {total_count} does not match dims {dim1}x{dim2}x{dim3}"
            )));
        }

        let values = (0..total_count)
            .map(|_| cursor.read_i16())
            .collect::<Result<Vec<_>>>()?;

        Ok(NdTable {
            dims: (dim1, dim2, dim3),
            values,
        })
    }

    /// Returns the logical rank this tensor was declared with once reshaped
    /// to exactly `requested_dims` dimensions, validating that any trailing
    /// collapsed dimension is indeed of size 1.
    pub fn reshape_to(&self, requested_dims: usize) -> Result<&Self> {
        let (d1, d2, d3) = self.dims;
        let trailing_ok = match requested_dims {
            1 => d2 == 1 && d3 == 1,
            2 => d3 == 1,
            3 => true,
            _ => false,
        };

        if !trailing_ok {
            return Err(RpgxpError::Decode(format!(
                "Table cannot be reshaped to {requested_dims} dimensions from {d1}x{d2}x{d3}"
            )));
        }

        Ok(self)
    }

    /// Looks up `values[(z * dim2 + y) * dim1 + x]`, the column-major index for `(x, y, z)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<i16> {
        let (d1, d2, _) = self.dims;
        self.values.get((z * d2 + y) * d1 + x).copied()
    }
}

/// Either a `Color` (r,g,b,a in `[0,255]`) or `Tone` (r,g,b in `[-255,255]`,
/// grey in `[0,255]`) user-data payload: four little-endian doubles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourDoubles(pub f64, pub f64, pub f64, pub f64);

impl FourDoubles {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let a = cursor.read_f64()?;
        let b = cursor.read_f64()?;
        let c = cursor.read_f64()?;
        let d = cursor.read_f64()?;
        Ok(FourDoubles(a, b, c, d))
    }
}
