//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

use byteorder::{LittleEndian, WriteBytesExt};

use super::NdTable;

fn encode_table(dim_count: i32, dims: (i32, i32, i32), values: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_i32::<LittleEndian>(dim_count).unwrap();
    bytes.write_i32::<LittleEndian>(dims.0).unwrap();
    bytes.write_i32::<LittleEndian>(dims.1).unwrap();
    bytes.write_i32::<LittleEndian>(dims.2).unwrap();
    bytes.write_i32::<LittleEndian>(values.len() as i32).unwrap();
    for v in values {
        bytes.write_i16::<LittleEndian>(*v).unwrap();
    }
    bytes
}

#[test]
fn scenario_5_two_dimensional_table() {
    let bytes = encode_table(2, (3, 2, 1), &[1, 2, 3, 4, 5, 6]);
    let table = NdTable::decode(&bytes).unwrap();
    table.reshape_to(2).unwrap();

    assert_eq!(table.get(0, 0, 0), Some(1));
    assert_eq!(table.get(0, 1, 0), Some(4));
}

#[test]
fn rejects_mismatched_total_count() {
    let mut bytes = encode_table(2, (3, 2, 1), &[1, 2, 3, 4, 5, 6]);
    // Corrupt the declared total_count.
    bytes[16..20].copy_from_slice(&99i32.to_le_bytes());
    assert!(NdTable::decode(&bytes).is_err());
}

#[test]
fn reshape_rejects_nontrivial_trailing_dim() {
    let bytes = encode_table(3, (2, 2, 2), &[0; 8]);
    let table = NdTable::decode(&bytes).unwrap();
    assert!(table.reshape_to(2).is_err());
}
