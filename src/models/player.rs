//! Player data structure and name normalization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (check-ins and lookups key on this, never on the name).
pub type PlayerId = Uuid;

/// Normalized form of a display name: trimmed and lowercased. Used for equality during lookups.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A registered player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name (free text).
    pub name: String,
    /// Load-balancing weight. No bounds; 0 for self-registered players until an admin rates them.
    pub skill: f64,
}

impl Player {
    /// Create a player with an explicit skill (admin registration).
    pub fn new(name: impl Into<String>, skill: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            skill,
        }
    }

    /// Create a self-registered player pending a skill rating.
    pub fn unrated(name: impl Into<String>) -> Self {
        Self::new(name, 0.0)
    }

    /// True when `name` equals this player's name after normalization.
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}
