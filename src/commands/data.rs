use std::fmt::Write;

use chrono::{DateTime, FixedOffset};
use console::style;

use crate::{
    cli::DataArgs,
    error::{Error, Result},
    structs::{file::FileKind, player::{Player, PlayerSummary, UserCacheEntry}, server::Server}
};

use super::scan_world;

pub fn data(server: &Server, args: DataArgs) -> Result<()> {
    let registry = scan_world(server)?;
    let usercache = server.usercache()?;
    let mut players = Player::generate(&registry, &usercache);

    if let Some(query) = &args.player {
        players.retain(|p| p.matches_str(query));
        if players.is_empty() {
            return Err(Error::PlayerNotFound(query.clone()));
        }
    }

    players.sort_by_key(|p| p.name().to_lowercase());

    for player in players {
        let summary = player.summary(&registry)?;
        let expires = usercache.iter()
            .find(|e| e.uuid.eq_ignore_ascii_case(&player.uuid))
            .and_then(UserCacheEntry::expires);
        print!("{}", format_summary(&player, &summary, expires));
    }

    Ok(())
}

fn format_summary(player: &Player, summary: &PlayerSummary, expires: Option<DateTime<FixedOffset>>) -> String {
    let mut out = String::new();
    writeln!(&mut out, " - {} {}", style(player.name()).bold(), style(&player.uuid).dim()).unwrap();

    let files = summary.files.iter()
        .map(|(kind, count)| format!("{kind}: {count}"))
        .collect::<Vec<String>>()
        .join(", ");
    writeln!(&mut out, "     files: {files}").unwrap();

    if let Some(size) = summary.player_data_size {
        writeln!(&mut out, "     {}: {size} bytes", FileKind::PlayerData).unwrap();
    }
    if let Some(ticks) = summary.play_time_ticks {
        // 20 ticks a second
        let minutes = ticks / 20 / 60;
        writeln!(&mut out, "     play time: {}h {}m", minutes / 60, minutes % 60).unwrap();
    }
    if let Some(deaths) = summary.deaths {
        writeln!(&mut out, "     deaths: {deaths}").unwrap();
    }
    if let Some(jumps) = summary.jumps {
        writeln!(&mut out, "     jumps: {jumps}").unwrap();
    }
    if let Some(done) = summary.advancements_done {
        writeln!(&mut out, "     advancements: {done}").unwrap();
    }
    // the server keeps names cached for a month after the last login
    if let Some(expires) = expires {
        writeln!(&mut out, "     name cached until: {}", expires.format("%Y-%m-%d")).unwrap();
    }

    out
}
