use std::fmt::Write;

use console::style;

use crate::{error::Result, structs::{player::Player, server::Server}};

use super::scan_world;

pub fn list(server: &Server) -> Result<()> {
    let registry = scan_world(server)?;
    let players = Player::generate(&registry, &server.usercache()?);

    if players.is_empty() {
        println!("{}", style("No players have joined this world yet").color256(166));
        return Ok(());
    }

    print!("{}", format_players(&players));
    Ok(())
}

// " - name - mode - uuid", names & modes padded to line up
fn format_players(players: &[Player]) -> String {
    let name_width = players.iter().map(|p| p.name().chars().count()).max().unwrap_or_default();
    let uuid_width = players.iter().map(|p| p.uuid.len()).max().unwrap_or_default();
    let mut out = String::new();

    for player in players {
        let mode = player.mode().map(|m| m.to_string()).unwrap_or("unknown".into());
        let mode = match player.mode() {
            Some(_) => style(format!("{mode:7}")),
            None => style(format!("{mode:7}")).dim(),
        };

        writeln!(&mut out, " - {name} - {mode} - {uuid:>uuid_width$}",
            name = style(format!("{:name_width$}", player.name())).bold(),
            uuid = player.uuid
        ).unwrap();
    }

    out
}
