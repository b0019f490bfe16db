use std::{collections::HashMap, fs, path::Path};

use chrono::{DateTime, FixedOffset};
use log::{debug, warn};
use md5::{Digest, Md5};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    structs::{
        file::{FileKind, Registry},
        player::{Player, PlayerSummary, StatsFile, UserCacheEntry, WhitelistEntry},
        server::OnlineMode
    }
};

/// The uuid an offline mode server hands out to `name`, a v3 uuid of "OfflinePlayer:<name>".
pub fn offline_uuid(name: &str) -> String {
    let hash = Md5::digest(format!("OfflinePlayer:{name}").as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash);
    uuid::Builder::from_md5_bytes(bytes).into_uuid().hyphenated().to_string()
}

/// Offline uuids are name based (v3), the ones mojang hands out are random (v4).
pub fn uuid_mode(uuid: &str) -> Option<OnlineMode> {
    match Uuid::parse_str(uuid).ok()?.get_version_num() {
        3 => Some(OnlineMode::Offline),
        4 => Some(OnlineMode::Online),
        _ => None,
    }
}

/// The uuid `name` should have on a server running in `mode`, if it can be known without asking mojang.
pub fn uuid_for_mode(name: &str, known_uuid: Option<&str>, usercache: &[UserCacheEntry], mode: OnlineMode) -> Option<String> {
    match mode {
        OnlineMode::Offline => Some(offline_uuid(name)),
        OnlineMode::Online => match known_uuid {
            Some(uuid) if uuid_mode(uuid) == Some(OnlineMode::Online) => Some(uuid.to_owned()),
            _ => usercache.iter()
                .find(|e| e.name.eq_ignore_ascii_case(name) && uuid_mode(&e.uuid) == Some(OnlineMode::Online))
                .map(|e| e.uuid.clone()),
        },
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|err| Error::Parse(format!("{} is not valid, {err}", path.display())))
}

impl UserCacheEntry {
    pub const FILE_NAME: &'static str = "usercache.json";

    pub fn read_all(server_path: &Path) -> Result<Vec<Self>> {
        let path = server_path.join(Self::FILE_NAME);
        if !path.is_file() {
            debug!("No usercache found at {}", path.display());
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    pub fn expires(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(self.expires_on.as_deref()?, "%Y-%m-%d %H:%M:%S %z").ok()
    }
}

impl WhitelistEntry {
    pub const FILE_NAME: &'static str = "whitelist.json";

    pub fn read_all(server_path: &Path) -> Result<Vec<Self>> {
        let path = server_path.join(Self::FILE_NAME);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    pub fn write_all(server_path: &Path, entries: &[Self]) -> Result<()> {
        fs::write(server_path.join(Self::FILE_NAME), serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

/// Rewrites `whitelist` so every uuid fits `mode`, then adds the known players it's missing.
pub fn sync_whitelist(whitelist: &[WhitelistEntry], usercache: &[UserCacheEntry], players: &[Player], mode: OnlineMode) -> Vec<WhitelistEntry> {
    let mut synced: Vec<WhitelistEntry> = Vec::new();

    let known = whitelist.iter()
        .map(|e| (e.name.as_str(), Some(e.uuid.as_str())))
        .chain(players.iter().filter_map(|p| p.username.as_deref().map(|name| (name, Some(p.uuid.as_str())))));

    for (name, uuid) in known {
        if synced.iter().any(|e| e.name.eq_ignore_ascii_case(name)) {
            continue;
        }

        match uuid_for_mode(name, uuid, usercache, mode).or_else(|| whitelist_uuid(whitelist, name)) {
            Some(uuid) => synced.push(WhitelistEntry { uuid, name: name.to_owned() }),
            None => warn!("Don't know the {mode} uuid of {name}, leaving them out of the whitelist"),
        }
    }

    synced
}

// entries already on the whitelist keep their uuid when there's nothing better
fn whitelist_uuid(whitelist: &[WhitelistEntry], name: &str) -> Option<String> {
    whitelist.iter().find(|e| e.name.eq_ignore_ascii_case(name)).map(|e| e.uuid.clone())
}

impl Player {
    /// Every player with files in `registry`, named after their usercache entry.
    pub fn generate(registry: &Registry, usercache: &[UserCacheEntry]) -> Vec<Self> {
        registry.uuids().into_iter().map(|uuid| {
            let username = usercache.iter()
                .find(|e| e.uuid.eq_ignore_ascii_case(&uuid))
                .map(|e| e.name.clone());
            Player { username, uuid }
        }).collect()
    }

    pub fn name(&self) -> &str {
        self.username.as_deref().unwrap_or("?")
    }

    pub fn mode(&self) -> Option<OnlineMode> {
        uuid_mode(&self.uuid)
    }

    // whether a string matches the player's name/uuid
    pub fn matches_str(&self, string: &str) -> bool {
        self.uuid.eq_ignore_ascii_case(string)
            || self.username.as_ref().is_some_and(|name| name.eq_ignore_ascii_case(string))
    }

    pub fn summary(&self, registry: &Registry) -> Result<PlayerSummary> {
        let files = registry.player_files(&self.uuid);
        let mut summary = PlayerSummary {
            files: FileKind::ALL.iter()
                .map(|kind| (*kind, files.iter().filter(|f| f.kind == *kind).count()))
                .collect(),
            ..Default::default()
        };

        for file in files {
            match file.kind {
                FileKind::PlayerData => {
                    summary.player_data_size = Some(fs::metadata(&file.path)?.len());
                },
                FileKind::Stats => {
                    let stats: StatsFile = read_json(&file.path)?;
                    if let Some(custom) = stats.stats.get("minecraft:custom") {
                        // renamed from play_one_minute in 1.17
                        summary.play_time_ticks = custom.get("minecraft:play_time")
                            .or_else(|| custom.get("minecraft:play_one_minute"))
                            .copied();
                        summary.deaths = custom.get("minecraft:deaths").copied();
                        summary.jumps = custom.get("minecraft:jump").copied();
                    }
                },
                FileKind::Advancements => {
                    let advancements: HashMap<String, serde_json::Value> = read_json(&file.path)?;
                    summary.advancements_done = Some(advancements.iter()
                        .filter(|(id, _)| !id.starts_with("minecraft:recipes/"))
                        .filter(|(_, progress)| progress.get("done").and_then(|d| d.as_bool()) == Some(true))
                        .count());
                },
            }
        }

        Ok(summary)
    }
}
