//! Roster: registered players, the check-in set, and the last generated teams.

use crate::models::player::{normalize_name, Player, PlayerId};
use crate::models::team::Distribution;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Errors that can occur during roster operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RosterError {
    /// Player name is empty after trimming.
    #[error("Player name must not be empty")]
    InvalidName,
    /// Skill is NaN or infinite.
    #[error("Skill must be a finite number")]
    InvalidSkill,
    /// A different player already uses this name (names are unique after normalization).
    #[error("A player named '{0}' already exists")]
    DuplicatePlayerName(String),
    /// No player with this id.
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    /// No player with this name (self check-in lookup).
    #[error("Player '{0}' not found. Please register first")]
    PlayerNameNotFound(String),
}

/// Full roster state. Store implementations wrap one of these and delegate validation to it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Players in registration order.
    pub players: Vec<Player>,
    /// Ids currently checked in for the session.
    pub checked_in: BTreeSet<PlayerId>,
    /// Most recent team generation, if any.
    #[serde(default)]
    pub last_distribution: Option<Distribution>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player by normalized name.
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = normalize_name(name);
        self.players
            .iter()
            .find(|p| normalize_name(&p.name) == wanted)
    }

    /// Insert a new player or update the one with the same id. The name is stored trimmed.
    ///
    /// Fails if another record already has the same normalized name. Updates keep the player's
    /// position in the roster.
    pub fn upsert_player(&mut self, mut player: Player) -> Result<(), RosterError> {
        let trimmed = player.name.trim();
        if trimmed.is_empty() {
            return Err(RosterError::InvalidName);
        }
        if !player.skill.is_finite() {
            return Err(RosterError::InvalidSkill);
        }
        player.name = trimmed.to_string();

        let collides = self
            .players
            .iter()
            .any(|p| p.id != player.id && p.matches_name(&player.name));
        if collides {
            return Err(RosterError::DuplicatePlayerName(player.name));
        }

        match self.players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player,
            None => self.players.push(player),
        }
        Ok(())
    }

    /// Replace an existing player's name and skill. Unlike [`Roster::upsert_player`] this never
    /// inserts: an unknown id is [`RosterError::PlayerNotFound`].
    pub fn update_player(&mut self, player: Player) -> Result<(), RosterError> {
        if self.get_player(player.id).is_none() {
            return Err(RosterError::PlayerNotFound(player.id));
        }
        self.upsert_player(player)
    }

    /// Remove a player by id. Their check-in goes with them.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, RosterError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(RosterError::PlayerNotFound(id))?;
        self.checked_in.remove(&id);
        Ok(self.players.remove(idx))
    }

    /// Mark a player present or absent. Checking in requires the player to exist; both
    /// directions are idempotent.
    pub fn set_checked_in(&mut self, id: PlayerId, checked_in: bool) -> Result<(), RosterError> {
        if checked_in {
            if self.get_player(id).is_none() {
                return Err(RosterError::PlayerNotFound(id));
            }
            self.checked_in.insert(id);
        } else {
            self.checked_in.remove(&id);
        }
        Ok(())
    }

    pub fn is_checked_in(&self, id: PlayerId) -> bool {
        self.checked_in.contains(&id)
    }

    pub fn clear_all_check_ins(&mut self) {
        self.checked_in.clear();
    }

    /// Checked-in ids as a hash set (the shape the eligibility filter consumes).
    pub fn checked_in_ids(&self) -> HashSet<PlayerId> {
        self.checked_in.iter().copied().collect()
    }

    /// Checked-in players in roster order.
    pub fn checked_in_players(&self) -> Vec<Player> {
        crate::logic::filter_eligible(&self.players, &self.checked_in_ids())
    }
}
