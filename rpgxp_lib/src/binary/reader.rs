//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module with the [`ReadBytes`] trait, to read bytes to known types.
//!
//! The Marshal stream itself is parsed by an external collaborator (see
//! [`crate::marshal`]); this trait is for the opaque "user data" payloads
//! that collaborator hands back to us as raw bytes (`Table`, `Color`,
//! `Tone`), which we then have to decode ourselves.

use byteorder::{LittleEndian, ReadBytesExt};

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Result, RpgxpError};

/// This trait allows us to easily read all kinds of data from a source that implements
/// [`Read`] + [`Seek`].
pub trait ReadBytes: Read + Seek {
    /// Returns the length of the data we're reading.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rpgxp_lib::binary::ReadBytes;
    ///
    /// let data = vec![1, 2, 3, 4];
    /// let mut cursor = Cursor::new(data);
    /// let len = cursor.len().unwrap();
    /// assert_eq!(len, 4);
    /// ```
    fn len(&mut self) -> Result<u64> {
        let old_pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        if old_pos != len {
            self.seek(SeekFrom::Start(old_pos))?;
        }
        Ok(len)
    }

    /// Returns whether the data is empty.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rpgxp_lib::binary::ReadBytes;
    ///
    /// let data = vec![];
    /// let mut cursor = Cursor::new(data);
    /// assert!(ReadBytes::is_empty(&mut cursor).unwrap());
    /// ```
    fn is_empty(&mut self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Reads `size` bytes from `self`.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rpgxp_lib::binary::ReadBytes;
    ///
    /// let data = vec![1, 2, 3, 4];
    /// let mut cursor = Cursor::new(data.to_vec());
    /// let data_read = cursor.read_slice(4, false).unwrap();
    /// assert_eq!(data, data_read);
    /// ```
    fn read_slice(&mut self, size: usize, rewind: bool) -> Result<Vec<u8>> {
        let mut data = vec![0; size];

        if size == 0 {
            return Ok(data);
        }

        self.read_exact(&mut data)?;

        if rewind {
            self.seek(SeekFrom::Current(-(size as i64)))?;
        }

        Ok(data)
    }

    /// Reads a bool. 0 is false, 1 is true, anything else is an error.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rpgxp_lib::binary::ReadBytes;
    ///
    /// let data = vec![0, 1, 2];
    /// let mut cursor = Cursor::new(data);
    ///
    /// assert_eq!(cursor.read_bool().unwrap(), false);
    /// assert_eq!(cursor.read_bool().unwrap(), true);
    /// assert!(cursor.read_bool().is_err());
    /// ```
    fn read_bool(&mut self) -> Result<bool> {
        let value = self.read_u8()?;
        match value {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(RpgxpError::Decode(format!("invalid bool byte: {value}"))),
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        ReadBytesExt::read_u8(self).map_err(From::from)
    }

    fn read_i16(&mut self) -> Result<i16> {
        ReadBytesExt::read_i16::<LittleEndian>(self).map_err(From::from)
    }

    fn read_i32(&mut self) -> Result<i32> {
        ReadBytesExt::read_i32::<LittleEndian>(self).map_err(From::from)
    }

    /// Reads a little-endian IEEE-754 double, the payload unit of `Color`/`Tone`.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rpgxp_lib::binary::ReadBytes;
    ///
    /// let data = vec![0, 0, 0, 0, 0, 0, 240, 63];
    /// let mut cursor = Cursor::new(data);
    /// assert_eq!(cursor.read_f64().unwrap(), 1.0);
    /// ```
    fn read_f64(&mut self) -> Result<f64> {
        ReadBytesExt::read_f64::<LittleEndian>(self).map_err(From::from)
    }
}

impl<T: Read + Seek + ?Sized> ReadBytes for T {}
