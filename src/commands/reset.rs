use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use console::style;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use log::info;

use crate::{cli::ResetPlayersArgs, error::Result, structs::{file::{FileRecord, Registry}, server::Server}};

use super::scan_world;

pub fn reset_players(server: &Server, args: ResetPlayersArgs) -> Result<()> {
    let mut registry = scan_world(server)?;
    if registry.is_empty() {
        println!("There is no player data to reset");
        return Ok(());
    }

    let prompt = format!("Move {} player files out of {}", registry.len(), server.world_path().display());
    if !args.yes && !Confirm::new().with_prompt(prompt).default(false).interact()? {
        println!("{}", style("Nothing was reset").color256(166));
        return Ok(());
    }

    let destination = backup_destination(&server.config.backup_path(), Local::now());
    let moved = move_all(&mut registry, &server.world_path(), &destination)?;

    println!("Moved {moved} files to {}", destination.display());
    Ok(())
}

fn backup_destination(backup_path: &Path, now: DateTime<Local>) -> PathBuf {
    backup_path.join(now.format("%Y-%m-%d_%H-%M-%S").to_string())
}

/// Moves every registered file below `destination`, stopping at the first failure.
/// Records leave the registry once their file is moved, so on failure the rest stay registered.
fn move_all(registry: &mut Registry, world: &Path, destination: &Path) -> Result<usize> {
    let records: Vec<FileRecord> = registry.records().cloned().collect();
    let count = records.len();
    let progress = ProgressBar::new(count as u64);

    for mut record in records {
        let old_path = record.path.clone();
        record.move_into(world, destination)?;
        registry.remove(&old_path);
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!("Moved {count} player files to {}", destination.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::TimeZone;

    use super::*;
    use crate::{error::Error, structs::file::FileKind};

    const UUID: &str = "069a79f4-44e9-4726-a5be-fca90e38aaf5";

    #[test]
    fn backup_folder_is_timestamped() {
        let now = Local.with_ymd_and_hms(2026, 10, 18, 9, 5, 0).unwrap();
        assert_eq!(backup_destination(Path::new("backups"), now), PathBuf::from("backups/2026-10-18_09-05-00"));
    }

    #[test]
    fn moves_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let world = dir.path().join("world");
        let destination = dir.path().join("backup");
        for relative in ["playerdata/069a79f4-44e9-4726-a5be-fca90e38aaf5.dat", "stats/069a79f4-44e9-4726-a5be-fca90e38aaf5.json"] {
            let path = world.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "data").unwrap();
        }
        fs::write(world.join("level.dat"), "level").unwrap();

        let mut registry = Registry::new();
        registry.scan(&world).unwrap();

        assert_eq!(move_all(&mut registry, &world, &destination).unwrap(), 2);
        assert!(registry.is_empty());
        assert!(destination.join("playerdata/069a79f4-44e9-4726-a5be-fca90e38aaf5.dat").is_file());
        assert!(destination.join("stats/069a79f4-44e9-4726-a5be-fca90e38aaf5.json").is_file());
        assert!(!world.join("stats/069a79f4-44e9-4726-a5be-fca90e38aaf5.json").exists());
        assert!(world.join("level.dat").is_file());
    }

    #[test]
    fn failed_move_keeps_the_rest_registered() {
        let dir = tempfile::tempdir().unwrap();
        let world = dir.path().join("world");
        let destination = dir.path().join("backup");
        for relative in [format!("playerdata/{UUID}.dat"), format!("stats/{UUID}.json")] {
            let path = world.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "data").unwrap();
        }

        let mut registry = Registry::new();
        registry.scan(&world).unwrap();
        // player data is moved first, then the stats file is gone
        fs::remove_file(world.join(format!("stats/{UUID}.json"))).unwrap();

        let err = move_all(&mut registry, &world, &destination).unwrap_err();

        assert!(matches!(err, Error::FileVanished(_)));
        assert!(destination.join(format!("playerdata/{UUID}.dat")).is_file());
        assert!(registry.get(FileKind::PlayerData).is_empty());
        assert_eq!(registry.get(FileKind::Stats).len(), 1);
        assert_eq!(registry.len(), 1);
    }
}
