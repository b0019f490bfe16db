use std::{collections::BTreeMap, path::PathBuf};

/// The kinds of player data a world stores, one folder per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileKind {
    /// Inventory, ender chest, health, hunger, position...
    PlayerData,
    Stats,
    Advancements
}

impl FileKind {
    /// Classification order, the first marker found in a path wins.
    /// "stats" would also match a world called "server_stats", keep new
    /// markers from overlapping the existing ones.
    pub const ALL: [FileKind; 3] = [FileKind::PlayerData, FileKind::Stats, FileKind::Advancements];

    pub fn marker(&self) -> &'static str {
        match self {
            Self::PlayerData => "playerdata",
            Self::Stats => "stats",
            Self::Advancements => "advancements",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::PlayerData => "Player data",
            Self::Stats => "Stats",
            Self::Advancements => "Advancements",
        })
    }
}

/// A file on disk holding data of a single player.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub kind: FileKind
}

// records are the same file when they point to the same path, whatever their kind
impl PartialEq for FileRecord {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileRecord {}

/// Every known player data file, bucketed by kind.
#[derive(Debug)]
pub struct Registry {
    pub(crate) buckets: BTreeMap<FileKind, Vec<FileRecord>>
}
