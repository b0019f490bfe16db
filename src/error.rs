use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{} does not contain a uuid", .0.display())]
    InvalidFile(PathBuf),

    #[error("Could not rename {} to {}, the target already exists", .from.display(), .to.display())]
    RenameCollision { from: PathBuf, to: PathBuf },

    #[error("{} no longer exists", .0.display())]
    FileVanished(PathBuf),

    #[error("Error while scanning, {0}")]
    ScanIo(#[from] walkdir::Error),

    #[error("'{0}' is not a valid uuid")]
    InvalidUuid(String),

    #[error("Could not find {}, is this a minecraft server folder?", .0.display())]
    MissingServerFile(PathBuf),

    #[error("Could not find a player matching '{0}'")]
    PlayerNotFound(String),

    #[error("Error while parsing, {0}")]
    Parse(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String)
}

pub type Result<T> = std::result::Result<T, Error>;
