//! Roster persistence: the store contract and its implementations.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{Distribution, Player, PlayerId, RosterError};
use std::collections::HashSet;
use thiserror::Error;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by roster stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation was rejected by roster validation.
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage format error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A writer panicked while holding the roster lock.
    #[error("roster lock poisoned")]
    Poisoned,
}

/// Players, check-ins and the last distribution, behind whatever backend holds them.
///
/// Every mutation is atomic per call: readers see the roster before or after it, never halfway.
pub trait RosterStore: Send + Sync {
    /// All players in registration order.
    fn list_players(&self) -> StoreResult<Vec<Player>>;

    fn get_player(&self, id: PlayerId) -> StoreResult<Option<Player>>;

    fn find_player_by_name(&self, name: &str) -> StoreResult<Option<Player>>;

    fn list_checked_in(&self) -> StoreResult<HashSet<PlayerId>>;

    /// Insert or update by id. Fails with [`RosterError::DuplicatePlayerName`] when a different
    /// record has the same normalized name.
    fn upsert_player(&self, player: Player) -> StoreResult<()>;

    /// Update an existing record only; a missing id is [`RosterError::PlayerNotFound`], checked
    /// under the same lock as the write.
    fn update_player(&self, player: Player) -> StoreResult<()>;

    fn remove_player(&self, id: PlayerId) -> StoreResult<()>;

    /// Idempotent in both directions.
    fn set_checked_in(&self, id: PlayerId, checked_in: bool) -> StoreResult<()>;

    fn clear_all_check_ins(&self) -> StoreResult<()>;

    /// Replace the stored last distribution.
    fn save_distribution(&self, distribution: Distribution) -> StoreResult<()>;

    fn last_distribution(&self) -> StoreResult<Option<Distribution>>;
}
