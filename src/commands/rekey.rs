use console::style;

use crate::{
    cli::RekeyArgs,
    error::{Error, Result},
    structs::{player::{Player, UserCacheEntry}, server::{OnlineMode, Server}},
    util::player::uuid_for_mode
};

use super::scan_world;

pub fn rekey(server: &Server, args: RekeyArgs) -> Result<()> {
    let mut registry = scan_world(server)?;
    let usercache = server.usercache()?;
    let players = Player::generate(&registry, &usercache);

    let player = players.iter()
        .find(|p| p.matches_str(&args.player))
        .ok_or_else(|| Error::PlayerNotFound(args.player.clone()))?;

    let new_uuid = match args.uuid {
        Some(uuid) => uuid,
        None => target_uuid(player, &usercache, server.online_mode()?)?,
    };

    if player.uuid.eq_ignore_ascii_case(&new_uuid) {
        println!("{} already uses {new_uuid}", player.name());
        return Ok(());
    }

    let renamed = registry.rekey_player(&player.uuid, &new_uuid)?;
    println!("Renamed {renamed} files of {} to {}", style(player.name()).bold(), style(&new_uuid).dim());
    Ok(())
}

fn target_uuid(player: &Player, usercache: &[UserCacheEntry], mode: OnlineMode) -> Result<String> {
    let name = player.username.as_deref()
        .ok_or_else(|| Error::Other(format!("{} has no known name, give the new uuid yourself", player.uuid)))?;

    uuid_for_mode(name, Some(&player.uuid), usercache, mode)
        .ok_or_else(|| Error::Other(format!("The {mode} uuid of {name} isn't known yet, give it yourself")))
}
