//! JSON-file roster store: the whole roster mirrored to one file after every change.

use crate::models::{Distribution, Player, PlayerId, Roster, RosterError};
use crate::store::{RosterStore, StoreError, StoreResult};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    roster: RwLock<Roster>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty roster; it is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let roster = match fs::read_to_string(&path) {
            Ok(contents) => {
                let roster: Roster = serde_json::from_str(&contents)?;
                log::info!(
                    "Loaded roster from {} ({} players, {} checked in)",
                    path.display(),
                    roster.players.len(),
                    roster.checked_in.len()
                );
                roster
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No roster file at {}; starting empty", path.display());
                Roster::new()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            roster: RwLock::new(roster),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&Roster) -> T) -> StoreResult<T> {
        let g = self.roster.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&*g))
    }

    /// Apply `f` to a copy, persist the copy, then swap it in. Nothing changes in memory when
    /// validation or the write fails.
    fn mutate<T>(&self, f: impl FnOnce(&mut Roster) -> Result<T, RosterError>) -> StoreResult<T> {
        let mut g = self.roster.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = g.clone();
        let out = f(&mut next)?;
        write_atomic(&self.path, &next)?;
        *g = next;
        Ok(out)
    }
}

/// Sibling of `path` with `.tmp` appended to the full file name (`roster.tmp` -> `roster.tmp.tmp`),
/// so it never equals `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write to the temp path and rename over `path`, so the file is either old or new, never partial.
fn write_atomic(path: &Path, roster: &Roster) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let temp_path = temp_path(path);
    let json = serde_json::to_vec_pretty(roster)?;
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)?;
    Ok(())
}

impl RosterStore for JsonFileStore {
    fn list_players(&self) -> StoreResult<Vec<Player>> {
        self.read(|r| r.players.clone())
    }

    fn get_player(&self, id: PlayerId) -> StoreResult<Option<Player>> {
        self.read(|r| r.get_player(id).cloned())
    }

    fn find_player_by_name(&self, name: &str) -> StoreResult<Option<Player>> {
        self.read(|r| r.find_by_name(name).cloned())
    }

    fn list_checked_in(&self) -> StoreResult<HashSet<PlayerId>> {
        self.read(Roster::checked_in_ids)
    }

    fn upsert_player(&self, player: Player) -> StoreResult<()> {
        self.mutate(|r| r.upsert_player(player))
    }

    fn update_player(&self, player: Player) -> StoreResult<()> {
        self.mutate(|r| r.update_player(player))
    }

    fn remove_player(&self, id: PlayerId) -> StoreResult<()> {
        self.mutate(|r| r.remove_player(id).map(|_| ()))
    }

    fn set_checked_in(&self, id: PlayerId, checked_in: bool) -> StoreResult<()> {
        self.mutate(|r| r.set_checked_in(id, checked_in))
    }

    fn clear_all_check_ins(&self) -> StoreResult<()> {
        self.mutate(|r| {
            r.clear_all_check_ins();
            Ok(())
        })
    }

    fn save_distribution(&self, distribution: Distribution) -> StoreResult<()> {
        self.mutate(|r| {
            r.last_distribution = Some(distribution);
            Ok(())
        })
    }

    fn last_distribution(&self) -> StoreResult<Option<Distribution>> {
        self.read(|r| r.last_distribution.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("roster.json")).unwrap();
        assert!(store.list_players().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("roster.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.upsert_player(Player::new("Alice", 7.0)).unwrap();
        assert!(path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn temp_name_differs_from_a_tmp_data_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.tmp");
        assert_eq!(temp_path(&path), dir.path().join("roster.tmp.tmp"));

        let store = JsonFileStore::open(&path).unwrap();
        store.upsert_player(Player::new("Alice", 7.0)).unwrap();
        store.upsert_player(Player::new("Bob", 3.0)).unwrap();
        assert!(!temp_path(&path).exists());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.list_players().unwrap().len(), 2);
    }

    #[test]
    fn update_of_deleted_player_is_not_found_and_not_reinserted() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("roster.json")).unwrap();
        let alice = Player::new("Alice", 7.0);
        store.upsert_player(alice.clone()).unwrap();
        store.remove_player(alice.id).unwrap();

        let err = store.update_player(Player { skill: 5.0, ..alice.clone() }).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Roster(RosterError::PlayerNotFound(id)) if id == alice.id
        ));
        assert!(store.list_players().unwrap().is_empty());
    }

    #[test]
    fn rejected_mutation_does_not_touch_memory_or_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.upsert_player(Player::new("Alice", 7.0)).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = store.upsert_player(Player::new(" alice ", 3.0)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Roster(RosterError::DuplicatePlayerName(_))
        ));
        assert_eq!(store.list_players().unwrap().len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
