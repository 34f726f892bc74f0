//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

use std::path::Path;
use std::process::exit;

use anyhow::{Context, Result};

use rpgxp_lib::config::Config;
use rpgxp_lib::integrations::sqlite;

/// Runs the foreign-key violation report against a database built by a
/// previous `import` run, without re-decoding any game data.
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    let db_path = config.database_path();
    let conn = sqlite::open_existing(&db_path)
        .with_context(|| format!("opening {}", db_path.display()))?;

    let violations = sqlite::foreign_key_check(&conn)?;
    if violations.is_empty() {
        println!("no foreign-key violations");
    } else {
        for violation in &violations {
            println!("{violation}");
        }
        exit(1);
    }
    Ok(())
}
