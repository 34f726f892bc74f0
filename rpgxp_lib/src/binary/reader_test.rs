//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

use std::io::Cursor;

use super::ReadBytes;

#[test]
fn read_bool_rejects_non_zero_one() {
    let mut cursor = Cursor::new(vec![2u8]);
    assert!(cursor.read_bool().is_err());
}

#[test]
fn read_slice_rewinds_on_request() {
    let mut cursor = Cursor::new(vec![1u8, 2, 3, 4]);
    let first = cursor.read_slice(2, true).unwrap();
    let second = cursor.read_slice(2, false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn len_restores_stream_position() {
    let mut cursor = Cursor::new(vec![1u8, 2, 3, 4]);
    let _ = cursor.read_u8().unwrap();
    let len = cursor.len().unwrap();
    assert_eq!(len, 4);
    assert_eq!(cursor.read_u8().unwrap(), 2);
}
