//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use rpgxp_lib::config::Config;
use rpgxp_lib::integrations::sqlite;
use rpgxp_lib::pipeline;

/// Decodes every `.rxdata` file named by the schema catalog, scans the
/// game's (and RTP's) asset directories, and rebuilds the database in a
/// single transaction, finishing with a foreign-key violation report.
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    tracing::info!("reading data from {}", config.data_root().display());
    let output = pipeline::run(&config.data_root(), &config.game_root, config.rtp_root.as_deref())
        .context("running the import pipeline")?;

    tracing::info!(
        "decoded {} table(s), {} material(s), {} material file(s)",
        output.ddl.tables.len(),
        output.inventory.materials.len(),
        output.inventory.files.len(),
    );

    let ddl_script = output.ddl.to_script()?;
    fs::create_dir_all(&config.db_root)
        .with_context(|| format!("creating {}", config.db_root.display()))?;
    fs::write(config.schema_sql_path(), ddl_script.to_string())
        .with_context(|| format!("writing {}", config.schema_sql_path().display()))?;

    let insert_script = output.rows.into_script();

    tracing::info!("rebuilding {}", config.database_path().display());
    let conn = sqlite::rebuild(&config.database_path(), &ddl_script, &insert_script)?;
    conn.pragma_update(None, "foreign_keys", true)?;

    let violations = sqlite::foreign_key_check(&conn)?;
    if violations.is_empty() {
        tracing::info!("no foreign-key violations");
    } else {
        for violation in &violations {
            tracing::warn!("{violation}");
        }
        tracing::warn!("{} foreign-key violation(s)", violations.len());
    }

    Ok(())
}
