use std::{collections::HashSet, path::{Path, PathBuf}};

use log::{debug, info};
use walkdir::WalkDir;

use crate::{error::{Error, Result}, structs::file::{FileKind, FileRecord, Registry}};

use super::files::{extract_uuid, is_uuid};

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            buckets: FileKind::ALL.iter().map(|kind| (*kind, Vec::new())).collect()
        }
    }

    /// Scans `root` and everything below it, registering all player data files found.
    /// Returns how many files weren't registered yet.
    pub fn scan(&mut self, root: &Path) -> Result<usize> {
        debug!("Scanning {} for player data", root.display());
        let before = self.len();

        // broken links come back as errors instead of being skipped
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            // cheaper than trying every marker on files like level.dat or region files
            if extract_uuid(entry.path()).is_none() {
                continue;
            }

            self.classify(entry.path());
        }

        let added = self.len() - before;
        info!("Found {added} new player data files in {}", root.display());
        Ok(added)
    }

    /// Identifies `path` and registers it, returns the registered record.
    pub fn classify(&mut self, path: &Path) -> Option<&FileRecord> {
        let record = FileRecord::identify(path)?;
        let kind = record.kind;
        self.register(record);

        self.buckets.get(&kind)?.iter().find(|r| r.path.as_path() == path)
    }

    /// Adds `record` to its kind's bucket unless it is already there.
    pub fn register(&mut self, record: FileRecord) -> bool {
        let bucket = self.buckets.entry(record.kind).or_default();
        if bucket.contains(&record) {
            return false;
        }

        bucket.push(record);
        true
    }

    pub fn get(&self, kind: FileKind) -> &[FileRecord] {
        self.buckets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileKind, &[FileRecord])> {
        self.buckets.iter().map(|(kind, records)| (*kind, records.as_slice()))
    }

    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every distinct uuid with at least one file, in the order they were found.
    pub fn uuids(&self) -> Vec<String> {
        let mut uuids: Vec<String> = Vec::new();
        for uuid in self.records().filter_map(|record| record.uuid().ok()) {
            if !uuids.iter().any(|u| u.eq_ignore_ascii_case(&uuid)) {
                uuids.push(uuid);
            }
        }
        uuids
    }

    pub fn player_files(&self, uuid: &str) -> Vec<&FileRecord> {
        self.records()
            .filter(|record| record.uuid().is_ok_and(|u| u.eq_ignore_ascii_case(uuid)))
            .collect()
    }

    /// Renames every file of the player `old_uuid` to `new_uuid`.
    /// Nothing is renamed if any of the new names is already taken,
    /// or if two of the player's files would end up with the same name.
    pub fn rekey_player(&mut self, old_uuid: &str, new_uuid: &str) -> Result<usize> {
        if !is_uuid(new_uuid) {
            return Err(Error::InvalidUuid(new_uuid.to_owned()));
        }

        let records: Vec<&mut FileRecord> = self.buckets.values_mut()
            .flatten()
            .filter(|record| record.uuid().is_ok_and(|u| u.eq_ignore_ascii_case(old_uuid)))
            .collect();

        let mut targets: HashSet<PathBuf> = HashSet::new();
        for record in &records {
            let target = record.rekeyed_path(new_uuid);
            // `<uuid>.dat` and `<UUID>.dat` both map to the same new name
            if !targets.insert(target.clone()) || (target != record.path && target.exists()) {
                return Err(Error::RenameCollision { from: record.path.clone(), to: target });
            }
        }

        let count = records.len();
        for record in records {
            record.rekey(new_uuid)?;
        }

        info!("Rekeyed {count} files from {old_uuid} to {new_uuid}");
        Ok(count)
    }

    /// Takes the record at `path` out of its bucket.
    pub fn remove(&mut self, path: &Path) -> Option<FileRecord> {
        self.buckets.values_mut().find_map(|bucket| {
            let index = bucket.iter().position(|record| record.path.as_path() == path)?;
            Some(bucket.remove(index))
        })
    }
}
