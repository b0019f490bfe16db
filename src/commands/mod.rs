pub mod online_mode;
pub mod list;
pub mod data;
pub mod debug_files;
pub mod whitelist;
pub mod reset;
pub mod rekey;

use indicatif::ProgressBar;

use crate::{error::Result, structs::{file::Registry, server::Server}};

pub fn scan_world(server: &Server) -> Result<Registry> {
    let progress = ProgressBar::new_spinner().with_message(format!("Scanning {}", server.world_path().display()));
    let registry = server.scan();
    progress.finish_and_clear();
    registry
}
