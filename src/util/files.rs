use std::{fs, io, path::{Path, PathBuf}};

use lazy_regex::{regex_captures, regex_is_match};
use log::debug;

use crate::{error::{Error, Result}, structs::file::{FileKind, FileRecord}};

/// Returns the uuid right before the extension of the file name, if there is one.
/// Backups such as `<uuid>_old.dat` or `<uuid>.dat_old` never match.
pub fn extract_uuid(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;

    let (_, uuid, extension) = regex_captures!(
        r"([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})\.(\w+)$",
        file_name
    )?;

    if extension.ends_with("_old") {
        return None;
    }

    Some(uuid.to_owned())
}

/// Whether the whole string is a hyphenated uuid, in any case.
pub fn is_uuid(string: &str) -> bool {
    regex_is_match!(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        string
    )
}

impl FileRecord {
    /// Finds out which kind of player data `path` holds, `None` if it isn't player data at all.
    pub fn identify(path: &Path) -> Option<Self> {
        let posix_path = path.to_string_lossy().replace('\\', "/");

        FileKind::ALL.iter()
            .find(|kind| posix_path.contains(kind.marker()))
            .map(|kind| FileRecord { path: path.to_path_buf(), kind: *kind })
    }

    pub fn uuid(&self) -> Result<String> {
        extract_uuid(&self.path).ok_or_else(|| Error::InvalidFile(self.path.clone()))
    }

    pub fn file_name(&self) -> String {
        self.path.file_name().unwrap_or_default().to_string_lossy().to_string()
    }

    // where the file ends up once renamed to `uuid`, same folder & extension
    pub fn rekeyed_path(&self, uuid: &str) -> PathBuf {
        let file_name = match self.path.extension() {
            Some(extension) => format!("{uuid}.{}", extension.to_string_lossy()),
            None => uuid.to_owned(),
        };
        self.path.with_file_name(file_name)
    }

    /// Renames the file so its name uses `uuid`, the record keeps pointing at it afterwards.
    pub fn rekey(&mut self, uuid: &str) -> Result<()> {
        if !is_uuid(uuid) {
            return Err(Error::InvalidUuid(uuid.to_owned()));
        }

        let new_path = self.rekeyed_path(uuid);
        debug!("Changing uuid of {} to {uuid}", self.path.display());

        if new_path == self.path {
            return Ok(());
        }
        if !self.path.exists() {
            return Err(Error::FileVanished(self.path.clone()));
        }
        if new_path.exists() {
            return Err(Error::RenameCollision { from: self.path.clone(), to: new_path });
        }

        fs::rename(&self.path, &new_path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Error::FileVanished(self.path.clone()),
            _ => Error::Io(err),
        })?;

        self.path = new_path;
        Ok(())
    }

    /// Moves the file into `destination`, keeping its path relative to `root`.
    pub fn move_into(&mut self, root: &Path, destination: &Path) -> Result<()> {
        let relative = match self.path.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => PathBuf::from(self.file_name()),
        };
        let new_path = destination.join(relative);

        if !self.path.exists() {
            return Err(Error::FileVanished(self.path.clone()));
        }
        if new_path.exists() {
            return Err(Error::RenameCollision { from: self.path.clone(), to: new_path });
        }
        if let Some(parent) = new_path.parent() {
            fs::create_dir_all(parent)?;
        }

        move_file(&self.path, &new_path)?;

        debug!("Moved {} to {}", self.path.display(), new_path.display());
        self.path = new_path;
        Ok(())
    }
}

/// Renames `from` to `to`, copying across filesystems when rename can't.
/// A file is never left in both places.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            if let Err(err) = fs::remove_file(from) {
                fs::remove_file(to)?;
                return Err(err);
            }
            Ok(())
        }
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UUID: &str = "1234abcd-56ef-78ab-90cd-1234567890ab";
    const NEW_UUID: &str = "069a79f4-44e9-4726-a5be-fca90e38aaf5";

    #[test]
    fn extracts_uuid_before_extension() {
        let path = Path::new("world/playerdata/1234abcd-56ef-78ab-90cd-1234567890ab.dat");
        assert_eq!(extract_uuid(path).as_deref(), Some(UUID));
    }

    #[test]
    fn keeps_uuid_case() {
        let path = Path::new("world/stats/1234ABCD-56EF-78ab-90cd-1234567890AB.json");
        assert_eq!(extract_uuid(path).as_deref(), Some("1234ABCD-56EF-78ab-90cd-1234567890AB"));
    }

    #[test]
    fn ignores_old_backups() {
        assert_eq!(extract_uuid(Path::new("world/playerdata/1234abcd-56ef-78ab-90cd-1234567890ab_old.dat")), None);
        assert_eq!(extract_uuid(Path::new("world/playerdata/1234abcd-56ef-78ab-90cd-1234567890ab.dat_old")), None);
    }

    #[test]
    fn ignores_uuid_in_parent_folders() {
        let path = Path::new("backups/1234abcd-56ef-78ab-90cd-1234567890ab/playerdata/level.dat");
        assert_eq!(extract_uuid(path), None);

        let path = Path::new("backups/1234abcd-56ef-78ab-90cd-1234567890ab/stats/069a79f4-44e9-4726-a5be-fca90e38aaf5.json");
        assert_eq!(extract_uuid(path).as_deref(), Some(NEW_UUID));
    }

    #[test]
    fn ignores_names_without_uuid() {
        assert_eq!(extract_uuid(Path::new("world/level.dat")), None);
        assert_eq!(extract_uuid(Path::new("world/playerdata/1234abcd-56ef-78ab-90cd.dat")), None);
        assert_eq!(extract_uuid(Path::new("world/playerdata/1234abcd-56ef-78ab-90cd-1234567890ab")), None);
    }

    #[test]
    fn validates_uuids() {
        assert!(is_uuid(UUID));
        assert!(is_uuid("1234ABCD-56EF-78AB-90CD-1234567890AB"));
        assert!(!is_uuid("1234abcd56ef78ab90cd1234567890ab"));
        assert!(!is_uuid("1234abcd-56ef-78ab-90cd-1234567890ab.dat"));
        assert!(!is_uuid("zzzzzzzz-56ef-78ab-90cd-1234567890ab"));
    }

    #[test]
    fn identifies_kinds() {
        let record = FileRecord::identify(Path::new("world/playerdata/1234abcd-56ef-78ab-90cd-1234567890ab.dat")).unwrap();
        assert_eq!(record.kind, FileKind::PlayerData);
        assert_eq!(record.uuid().unwrap(), UUID);

        let record = FileRecord::identify(Path::new("world/stats/1234abcd-56ef-78ab-90cd-1234567890ab.json")).unwrap();
        assert_eq!(record.kind, FileKind::Stats);

        let record = FileRecord::identify(Path::new("world/advancements/1234abcd-56ef-78ab-90cd-1234567890ab.json")).unwrap();
        assert_eq!(record.kind, FileKind::Advancements);

        assert!(FileRecord::identify(Path::new("world/data/1234abcd-56ef-78ab-90cd-1234567890ab.dat")).is_none());
    }

    #[test]
    fn first_marker_wins() {
        let record = FileRecord::identify(Path::new("stats_world/playerdata/1234abcd-56ef-78ab-90cd-1234567890ab.dat")).unwrap();
        assert_eq!(record.kind, FileKind::PlayerData);
    }

    #[test]
    fn uuid_of_record_without_one_is_an_error() {
        let record = FileRecord::identify(Path::new("world/playerdata/steve.dat")).unwrap();
        assert!(matches!(record.uuid(), Err(Error::InvalidFile(_))));
    }

    #[test]
    fn equality_is_by_path() {
        let a = FileRecord { path: PathBuf::from("world/stats/a.json"), kind: FileKind::Stats };
        let b = FileRecord { path: PathBuf::from("world/stats/a.json"), kind: FileKind::Advancements };
        let c = FileRecord { path: PathBuf::from("world/stats/b.json"), kind: FileKind::Stats };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    fn record_in(dir: &Path, name: &str) -> FileRecord {
        let folder = dir.join("playerdata");
        fs::create_dir_all(&folder).unwrap();
        let path = folder.join(name);
        fs::write(&path, name).unwrap();
        FileRecord::identify(&path).unwrap()
    }

    #[test]
    fn rekey_renames_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = record_in(dir.path(), &format!("{UUID}.dat"));
        let old_path = record.path.clone();

        record.rekey(NEW_UUID).unwrap();

        assert_eq!(record.file_name(), format!("{NEW_UUID}.dat"));
        assert_eq!(record.path.parent(), old_path.parent());
        assert_eq!(record.uuid().unwrap(), NEW_UUID);
        assert!(!old_path.exists());
        assert_eq!(fs::read_to_string(&record.path).unwrap(), format!("{UUID}.dat"));
    }

    #[test]
    fn rekey_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = record_in(dir.path(), &format!("{UUID}.dat"));
        let other = record_in(dir.path(), &format!("{NEW_UUID}.dat"));
        let old_path = record.path.clone();

        let err = record.rekey(NEW_UUID).unwrap_err();

        assert!(matches!(err, Error::RenameCollision { .. }));
        assert_eq!(record.path, old_path);
        assert_eq!(fs::read_to_string(&old_path).unwrap(), format!("{UUID}.dat"));
        assert_eq!(fs::read_to_string(&other.path).unwrap(), format!("{NEW_UUID}.dat"));
    }

    #[test]
    fn rekey_reports_vanished_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = record_in(dir.path(), &format!("{UUID}.dat"));
        fs::remove_file(&record.path).unwrap();

        assert!(matches!(record.rekey(NEW_UUID), Err(Error::FileVanished(_))));
    }

    #[test]
    fn rekey_rejects_invalid_uuids() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = record_in(dir.path(), &format!("{UUID}.dat"));

        assert!(matches!(record.rekey("not-a-uuid"), Err(Error::InvalidUuid(_))));
        assert!(record.path.exists());
    }

    #[test]
    fn move_into_keeps_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let world = dir.path().join("world");
        let backup = dir.path().join("backup");
        let mut record = record_in(&world, &format!("{UUID}.dat"));
        let old_path = record.path.clone();

        record.move_into(&world, &backup).unwrap();

        assert_eq!(record.path, backup.join("playerdata").join(format!("{UUID}.dat")));
        assert!(record.path.is_file());
        assert!(!old_path.exists());
    }

    #[test]
    fn move_file_reports_rename_errors() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join(format!("{UUID}.dat"));
        let to = dir.path().join("taken");
        fs::write(&from, "data").unwrap();
        fs::create_dir(&to).unwrap();
        fs::write(to.join("inside"), "other").unwrap();

        assert!(move_file(&from, &to).is_err());
        assert_eq!(fs::read_to_string(&from).unwrap(), "data");
        assert!(to.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn move_file_never_leaves_two_copies() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let from = locked.join(format!("{UUID}.dat"));
        let to = dir.path().join(format!("{UUID}.dat"));
        fs::write(&from, "data").unwrap();
        // the file can be read but not unlinked, unless running as root
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let result = move_file(&from, &to);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Ok(()) => assert!(!from.exists() && to.is_file()),
            Err(_) => assert!(from.is_file() && !to.exists()),
        }
    }
}
