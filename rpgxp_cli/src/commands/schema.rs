//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

use anyhow::Result;

use rpgxp_lib::ddl;
use rpgxp_lib::schema::rpgxp::file_schemas;

/// Prints the DDL every `import` run creates tables from, without reading
/// any game data or touching a database.
pub fn run() -> Result<()> {
    let files = file_schemas();
    let result = ddl::build(&files)?;
    let script = result.to_script()?;
    print!("{script}");
    Ok(())
}
