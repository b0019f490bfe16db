use std::{env, fs, path::{Path, PathBuf}};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings read from server-manager.toml in the current folder, all optional.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Folder holding server.properties
    pub server_path: PathBuf,
    /// World folder name, overrides level-name from server.properties
    pub world: Option<String>,
    /// Where reset-players moves files to, relative paths start at the server folder
    pub backup_path: PathBuf
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_path: PathBuf::from("."),
            world: None,
            backup_path: PathBuf::from("player-backups")
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "server-manager.toml";

    pub fn path() -> Result<PathBuf> {
        Ok(env::current_dir()?.join(Self::FILE_NAME))
    }

    pub fn read() -> Result<Self> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| Error::Parse(format!("Error while parsing {} to toml {err}", path.display())))
    }

    pub fn with_server_path(mut self, server_path: Option<PathBuf>) -> Self {
        if let Some(server_path) = server_path {
            self.server_path = server_path;
        }
        self
    }

    pub fn server_path(&self) -> PathBuf {
        self.server_path.clean()
    }

    pub fn backup_path(&self) -> PathBuf {
        self.server_path().join(&self.backup_path).clean()
    }

    /// The world folder, `level_name` comes from server.properties.
    pub fn world_path(&self, level_name: &str) -> PathBuf {
        self.server_path().join(self.world.as_deref().unwrap_or(level_name)).clean()
    }
}
