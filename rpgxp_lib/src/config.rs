//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! The plain key-value project configuration: `game_name`, `game_root`,
//! `rtp_root`, `db_root`, `site_root`. Unrecognized keys are a
//! `ConfigError`, realized with `#[serde(deny_unknown_fields)]` rather than
//! hand-rolled key validation.

use std::fs;
use std::path::{Path, PathBuf};

use serde_derive::Deserialize;

use crate::error::{Result, RpgxpError};

/// The project's `rpgxp.toml` (or similarly-named) configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Display name used by the (out-of-scope) HTML browser's title bar.
    pub game_name: String,

    /// The game's own `Data/`, `Audio/`, `Graphics/` root.
    pub game_root: PathBuf,

    /// The shared RTP asset root. Optional: some games ship every asset
    /// themselves and have no RTP dependency.
    pub rtp_root: Option<PathBuf>,

    /// Where `schema.sql` and the populated SQLite database are written.
    pub db_root: PathBuf,

    /// Where the (out-of-scope) HTML browser's static site is written.
    pub site_root: PathBuf,
}

impl Config {
    /// Loads and validates a config file, rejecting unrecognized keys.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RpgxpError::Config(e.to_string()))
    }

    /// The `Data/` directory holding the game's `.rxdata` files.
    pub fn data_root(&self) -> PathBuf {
        self.game_root.join("Data")
    }

    pub fn schema_sql_path(&self) -> PathBuf {
        self.db_root.join("schema.sql")
    }

    pub fn database_path(&self) -> PathBuf {
        self.db_root.join(format!("{}.db", self.game_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_recognized_key() {
        let config = Config::parse(
            r#"
            game_name = "My Game"
            game_root = "/games/my_game"
            rtp_root = "/rtp/standard"
            db_root = "/out/db"
            site_root = "/out/site"
            "#,
        )
        .unwrap();
        assert_eq!(config.game_name, "My Game");
        assert_eq!(config.rtp_root, Some(PathBuf::from("/rtp/standard")));
        assert_eq!(config.data_root(), PathBuf::from("/games/my_game/Data"));
    }

    #[test]
    fn rtp_root_is_optional() {
        let config = Config::parse(
            r#"
            game_name = "My Game"
            game_root = "/games/my_game"
            db_root = "/out/db"
            site_root = "/out/site"
            "#,
        )
        .unwrap();
        assert_eq!(config.rtp_root, None);
    }

    #[test]
    fn unrecognized_key_is_a_config_error() {
        let err = Config::parse(
            r#"
            game_name = "My Game"
            game_root = "/games/my_game"
            db_root = "/out/db"
            site_root = "/out/site"
            tileset_compositor = "on"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RpgxpError::Config(_)));
    }
}
