use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::file::FileKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub username: Option<String>,
    pub uuid: String
}

/// An entry of usercache.json, which the server fills with every player that joined.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UserCacheEntry {
    pub name: String,
    pub uuid: String,
    #[serde(rename = "expiresOn", default)]
    pub expires_on: Option<String>
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WhitelistEntry {
    pub uuid: String,
    pub name: String
}

/// The part of a stats file we care about, `{"stats": {"minecraft:custom": {...}}}`
#[derive(Debug, Deserialize, Default)]
pub struct StatsFile {
    #[serde(default)]
    pub stats: HashMap<String, HashMap<String, u64>>
}

/// What `data` shows about a single player.
#[derive(Debug, Default)]
pub struct PlayerSummary {
    pub files: Vec<(FileKind, usize)>,
    pub player_data_size: Option<u64>,
    pub play_time_ticks: Option<u64>,
    pub deaths: Option<u64>,
    pub jumps: Option<u64>,
    pub advancements_done: Option<usize>
}
