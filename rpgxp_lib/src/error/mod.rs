//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! This module contains all kinds of errors used inside this crate.
//!
//! The pipeline recognises three error kinds, each with its own recovery
//! policy: [`RpgxpError::Schema`] is fatal and aborts before any DB is
//! produced, [`RpgxpError::Parse`] is fatal for the file being decoded,
//! [`RpgxpError::Decode`] is fatal for the whole import.

use thiserror::Error;

/// Custom `Result` type, to always return our custom error.
pub type Result<T, E = RpgxpError> = core::result::Result<T, E>;

/// Custom error type for the lib.
#[derive(Error, Debug)]
pub enum RpgxpError {
    /// The schema itself is internally inconsistent: duplicate table name, FK to an
    /// unknown target, `MatchIndexToField` naming a nonexistent field, a `VariantObj`
    /// discriminant absent from its own fields, and so on.
    #[error("schema error: {0}")]
    Schema(String),

    /// Input Marshal data does not conform to the schema at some path.
    #[error("parse error: expected {expected}, found {found} at {}", path.join("."))]
    Parse {
        expected: String,
        found: String,
        path: Vec<String>,
    },

    /// The raw Marshal stream is malformed or uses an unsupported node kind.
    #[error("decode error: {0}")]
    Decode(String),

    /// The configuration file named an unrecognized key, or a recognized key
    /// failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Represents all other cases of `rusqlite::Error`.
    #[cfg(feature = "integration_sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    /// Represents all other cases of `std::num::ParseIntError`.
    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),

    /// Represents all other cases of `std::string::FromUtf8Error`.
    #[error(transparent)]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// Represents all other cases of `toml::de::Error`.
    #[error(transparent)]
    TomlError(#[from] toml::de::Error),
}

impl RpgxpError {
    /// Builds a [`RpgxpError::Parse`] from a path accumulated top-down by the decoder.
    pub fn parse(expected: impl Into<String>, found: impl Into<String>, path: &[String]) -> Self {
        Self::Parse {
            expected: expected.into(),
            found: found.into(),
            path: path.to_vec(),
        }
    }
}
