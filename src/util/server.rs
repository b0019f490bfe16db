use std::{fs, path::{Path, PathBuf}};

use log::debug;

use crate::{
    error::{Error, Result},
    structs::{config::Config, file::Registry, player::UserCacheEntry, server::{OnlineMode, Server, ServerProperties}}
};

impl Server {
    /// Opens the server from server-manager.toml, `server_path` overrides its folder.
    pub fn open(server_path: Option<PathBuf>) -> Result<Self> {
        Self::new(Config::read()?.with_server_path(server_path))
    }

    pub fn new(config: Config) -> Result<Self> {
        let properties = ServerProperties::read(&config.server_path())?;
        Ok(Server { config, properties })
    }

    pub fn path(&self) -> PathBuf {
        self.config.server_path()
    }

    pub fn world_path(&self) -> PathBuf {
        self.config.world_path(self.properties.level_name())
    }

    pub fn online_mode(&self) -> Result<OnlineMode> {
        self.properties.online_mode()
    }

    pub fn usercache(&self) -> Result<Vec<UserCacheEntry>> {
        UserCacheEntry::read_all(&self.path())
    }

    /// A registry of every player data file in the world.
    pub fn scan(&self) -> Result<Registry> {
        let mut registry = Registry::new();
        registry.scan(&self.world_path())?;
        Ok(registry)
    }
}

impl ServerProperties {
    pub const FILE_NAME: &'static str = "server.properties";

    pub fn read(server_path: &Path) -> Result<Self> {
        let path = server_path.join(Self::FILE_NAME);
        if !path.is_file() {
            return Err(Error::MissingServerFile(path));
        }

        let lines = fs::read_to_string(&path)?.lines().map(str::to_owned).collect();
        Ok(ServerProperties { path, lines })
    }

    pub fn write(&self) -> Result<()> {
        let mut content = self.lines.join("\n");
        content.push('\n');
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter()
            .filter_map(|line| parse_line(line))
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Replaces the value of `key`, or appends it if the file doesn't have it yet.
    pub fn set(&mut self, key: &str, value: &str) {
        let new_line = format!("{key}={value}");
        match self.lines.iter().position(|line| parse_line(line).is_some_and(|(k, _)| k == key)) {
            Some(idx) => self.lines[idx] = new_line,
            None => self.lines.push(new_line),
        }
        debug!("Set {key} to {value} in {}", self.path.display());
    }

    // vanilla servers default to online mode when the key is missing
    pub fn online_mode(&self) -> Result<OnlineMode> {
        match self.get("online-mode") {
            None => Ok(OnlineMode::Online),
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(OnlineMode::Online),
                "false" => Ok(OnlineMode::Offline),
                other => Err(Error::Parse(format!("online-mode should be true or false, found '{other}'"))),
            },
        }
    }

    pub fn set_online_mode(&mut self, mode: OnlineMode) {
        self.set("online-mode", match mode {
            OnlineMode::Online => "true",
            OnlineMode::Offline => "false",
        });
    }

    pub fn level_name(&self) -> &str {
        match self.get("level-name") {
            Some(name) if !name.is_empty() => name,
            _ => "world",
        }
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.starts_with('#') || line.starts_with('!') {
        return None;
    }
    line.split_once('=').map(|(key, value)| (key.trim(), value.trim()))
}
