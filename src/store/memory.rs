//! In-memory roster store (lost on restart).

use crate::models::{Distribution, Player, PlayerId, Roster, RosterError};
use crate::store::{RosterStore, StoreError, StoreResult};
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    roster: RwLock<Roster>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Roster) -> T) -> StoreResult<T> {
        let g = self.roster.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&*g))
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Roster) -> Result<T, RosterError>) -> StoreResult<T> {
        let mut g = self.roster.write().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&mut *g)?)
    }
}

impl RosterStore for MemoryStore {
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
