use std::path::PathBuf;

use super::config::Config;

/// An opened server folder.
#[derive(Debug, Clone)]
pub struct Server {
    pub config: Config,
    pub properties: ServerProperties
}

/// A server.properties file, kept line by line so comments survive a rewrite.
#[derive(Debug, Clone)]
pub struct ServerProperties {
    pub path: PathBuf,
    pub lines: Vec<String>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnlineMode {
    Online,
    Offline
}

impl From<bool> for OnlineMode {
    fn from(online: bool) -> Self {
        if online { Self::Online } else { Self::Offline }
    }
}

impl std::fmt::Display for OnlineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Online => "online",
            Self::Offline => "offline",
        })
    }
}
