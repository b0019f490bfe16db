use console::style;

use crate::{
    error::Result,
    structs::{player::{Player, WhitelistEntry}, server::Server},
    util::player::sync_whitelist
};

use super::scan_world;

pub fn whitelist(server: &Server) -> Result<()> {
    let mode = server.online_mode()?;
    let usercache = server.usercache()?;
    let players = Player::generate(&scan_world(server)?, &usercache);
    let current = WhitelistEntry::read_all(&server.path())?;

    let synced = sync_whitelist(&current, &usercache, &players, mode);

    for entry in &synced {
        match current.iter().find(|e| e.name.eq_ignore_ascii_case(&entry.name)) {
            None => println!("Adding {}", entry.name),
            Some(old) if old.uuid != entry.uuid => println!("Updating {} to {}", entry.name, style(&entry.uuid).dim()),
            Some(_) => {},
        }
    }

    WhitelistEntry::write_all(&server.path(), &synced)?;
    println!("Whitelist has {} players for {mode} mode", synced.len());
    Ok(())
}
