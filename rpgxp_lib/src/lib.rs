//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! `rpgxp_lib` turns an RPG Maker XP project's `.rxdata` files (Ruby
//! `Marshal`-serialized game data) into a normalized SQLite database.
//!
//! The pipeline is a stack of small, independently testable components,
//! each its own module:
//!
//! - [`marshal`]: a hand-rolled decoder for Ruby's Marshal binary format,
//!   producing a generic [`marshal::node::Node`] tree.
//! - [`schema`]: the schema algebra ([`schema::algebra::Schema`]) every
//!   other component pattern-matches over, plus the concrete schemas for
//!   every `.rxdata` file RPG Maker XP ships ([`schema::rpgxp`]) and the
//!   event-command catalog ([`schema::event_command`]).
//! - [`binary`]: the `NdTable`/`FourDoubles` binary payload decoders used
//!   for bitmap tile arrays and RGBA colors/tones.
//! - [`decoder`]: drives a [`schema::algebra::Schema`] against a
//!   [`marshal::node::Node`] to produce a schema-shaped [`decoder::Value`].
//! - [`ddl`]: lowers the schema algebra into SQLite `CREATE TABLE`
//!   statements.
//! - [`row`]: lowers a decoded [`decoder::Value`] into `INSERT` statements
//!   against the tables [`ddl`] built.
//! - [`material`]: scans the game's (and RTP's) asset directories into a
//!   `material`/`material_file` inventory.
//! - [`sql`]: the shared SQL emission primitives ([`sql::TableSchema`],
//!   [`sql::InsertStatement`], [`sql::Script`]) components 6-8 build on.
//! - [`pipeline`]: ties the above into one import run.
//! - [`config`]: the project's key-value configuration file.
//! - [`common`]: the RPG Maker enum tables shared by every schema.
//! - [`error`]: the crate-wide error type.
//! - [`integrations`]: opt-in bindings to the outside world (logging,
//!   SQLite execution), each behind its own Cargo feature.

pub mod binary;
pub mod common;
pub mod config;
pub mod ddl;
pub mod decoder;
pub mod error;
pub mod integrations;
pub mod marshal;
pub mod material;
pub mod pipeline;
pub mod row;
pub mod schema;
pub mod sql;

pub use error::{Result, RpgxpError};
pub use pipeline::{run as run_import, ImportOutput};
