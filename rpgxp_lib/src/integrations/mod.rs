//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! This module contains integrations of this crate with other tools.
//!
//! Each integration is opt-in:
//! - **Log**: installs a `tracing-subscriber` layer so the CLI's
//!   `tracing::info!`/`warn!`/`error!` calls go somewhere. Requires the
//!   feature `integration_log`.
//! - **SQLite**: executes the emitted DDL/insert scripts against a real
//!   database and runs the post-load FK-violation report. Requires the
//!   feature `integration_sqlite`.

#[cfg(feature = "integration_log")]
pub mod log;
#[cfg(feature = "integration_sqlite")]
pub mod sqlite;
